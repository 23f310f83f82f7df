//! newsdesk/crates/domains/src/lib.rs
//!
//! The central domain types and port definitions for Newsdesk.

pub mod errors;
pub mod models;
pub mod ports;
pub mod query;

// Re-exporting for easier access in other crates
pub use errors::*;
pub use models::*;
pub use ports::*;
pub use query::*;

#[cfg(test)]
mod tests {
    use super::models::*;

    #[test]
    fn test_listing_flattens_article_fields() {
        let listing = ArticleListing {
            article: Article {
                article_id: 3,
                author: "icellusedkars".to_string(),
                title: "Eight pug gifs that remind me of mitch".to_string(),
                body: "some gifs".to_string(),
                topic: "mitch".to_string(),
                article_img_url: DEFAULT_ARTICLE_IMG_URL.to_string(),
                votes: 0,
                created_at: chrono::Utc::now(),
                comment_count: 2,
            },
            total_count: 12,
        };

        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json["article_id"], 3);
        assert_eq!(json["comment_count"], 2);
        assert_eq!(json["total_count"], 12);
        assert!(json.get("article").is_none());
    }
}
