//! Shared harness for the HTTP-level tests.
//!
//! Builds the real router over mocked repository ports, so each test states
//! exactly what the store returns and asserts on status and JSON.

use std::sync::Arc;

use api_adapters::{build_router, AppState, Metrics};
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{TimeZone, Utc};
use domains::{
    AppError, Article, ArticleListing, Comment, MockArticleRepository, MockCommentRepository,
    MockTopicRepository, MockUserRepository, StoreFailure, Topic, User,
    DEFAULT_ARTICLE_IMG_URL,
};
use serde_json::Value;
use services::{ArticleOptions, ArticleService, CommentService, TopicService, UserService};
use tower::ServiceExt;

/// One mock per port; set expectations, then call [`Mocks::into_app`].
#[derive(Default)]
pub struct Mocks {
    pub topics: MockTopicRepository,
    pub articles: MockArticleRepository,
    pub comments: MockCommentRepository,
    pub users: MockUserRepository,
}

impl Mocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_app(self) -> Router {
        self.into_app_with(ArticleOptions::default())
    }

    pub fn into_app_with(self, options: ArticleOptions) -> Router {
        build_router(self.into_state(options))
    }

    pub fn into_state(self, options: ArticleOptions) -> AppState {
        let topics = Arc::new(self.topics);
        let articles = Arc::new(self.articles);
        AppState {
            topics: Arc::new(TopicService::new(topics.clone())),
            articles: Arc::new(ArticleService::new(articles.clone(), topics, options)),
            comments: Arc::new(CommentService::new(Arc::new(self.comments), articles)),
            users: Arc::new(UserService::new(Arc::new(self.users))),
            metrics: Arc::new(Metrics::new()),
        }
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub text: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.text).unwrap_or(Value::Null)
    }

    pub fn message(&self) -> Value {
        self.json()["message"].clone()
    }
}

/// Sends one request through the router.
pub async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let request = builder.body(body).expect("valid request");

    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    TestResponse {
        status,
        text: String::from_utf8_lossy(&bytes).into_owned(),
    }
}

pub async fn get(app: Router, uri: &str) -> TestResponse {
    send(app, Method::GET, uri, None).await
}

/// A store failure carrying `code`, as the Postgres adapter would report it.
pub fn store_failure(code: &str) -> AppError {
    StoreFailure::with_code(code, "simulated").into()
}

pub fn topic(slug: &str) -> Topic {
    Topic {
        slug: slug.to_string(),
        description: format!("all about {slug}"),
    }
}

pub fn user(username: &str) -> User {
    User {
        username: username.to_string(),
        name: "jonny".to_string(),
        avatar_url: "https://www.healthytherapies.com/wp-content/uploads/2016/06/Lime3.jpg"
            .to_string(),
    }
}

pub fn article(article_id: i32) -> Article {
    Article {
        article_id,
        author: "butter_bridge".to_string(),
        title: "Living in the shadow of a great man".to_string(),
        body: "I find this existence challenging".to_string(),
        topic: "mitch".to_string(),
        article_img_url: DEFAULT_ARTICLE_IMG_URL.to_string(),
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
        author: "icellusedkars".to_string(),
        body: "I hate streaming noses".to_string(),
        article_id,
        votes: 0,
        created_at: Utc.with_ymd_and_hms(2020, 11, 3, 21, 0, 0).unwrap(),
    }
}
