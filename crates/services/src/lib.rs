//! # services
//!
//! Orchestration between the HTTP layer and the storage ports.
//!
//! Each service validates its input, runs the store operations it needs
//! (concurrently where they do not depend on each other), and turns empty
//! results into the right rejection. Store failures pass through untouched;
//! classification happens once, at the response boundary.

pub mod articles;
pub mod comments;
pub mod topics;
pub mod users;

pub use articles::{ArticleOptions, ArticleService};
pub use comments::CommentService;
pub use topics::TopicService;
pub use users::UserService;

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{TimeZone, Utc};
    use domains::{Article, ArticleListing, Comment, StoreFailure};

    pub fn article(article_id: i32) -> Article {
        Article {
            article_id,
            author: "butter_bridge".to_string(),
            title: "Living in the shadow of a great man".to_string(),
            body: "I find this existence challenging".to_string(),
            topic: "mitch".to_string(),
            article_img_url: domains::DEFAULT_ARTICLE_IMG_URL.to_string(),
            votes: 100,
            created_at: Utc.with_ymd_and_hms(2020, 7, 9, 20, 11, 0).unwrap(),
            comment_count: 11,
        }
    }

    pub fn listing(article_id: i32, total_count: i32) -> ArticleListing {
        ArticleListing {
            article: article(article_id),
            total_count,
        }
    }

    pub fn comment(comment_id: i32, article_id: i32) -> Comment {
        Comment {
            comment_id,
            author: "rogersop".to_string(),
            body: "Isn't that sweet, i guess so".to_string(),
            article_id,
            votes: 14,
            created_at: Utc.with_ymd_and_hms(2020, 10, 31, 3, 3, 0).unwrap(),
        }
    }

    pub fn cast_failure() -> domains::AppError {
        StoreFailure::with_code("22P02", "invalid input syntax for type integer").into()
    }
}
