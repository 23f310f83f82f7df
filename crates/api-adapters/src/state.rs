use std::sync::Arc;

use axum::extract::FromRef;
use services::{ArticleService, CommentService, TopicService, UserService};

use crate::metrics::Metrics;

/// State shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub topics: Arc<TopicService>,
    pub articles: Arc<ArticleService>,
    pub comments: Arc<CommentService>,
    pub users: Arc<UserService>,
    pub metrics: Arc<Metrics>,
}

impl FromRef<AppState> for Arc<Metrics> {
    fn from_ref(state: &AppState) -> Self {
        state.metrics.clone()
    }
}
