use std::sync::Arc;

use domains::{NewTopic, Result, Topic, TopicRepository};
use serde_json::Value;

pub struct TopicService {
    topics: Arc<dyn TopicRepository>,
}

impl TopicService {
    pub fn new(topics: Arc<dyn TopicRepository>) -> Self {
        Self { topics }
    }

    pub async fn list(&self) -> Result<Vec<Topic>> {
        self.topics.list_topics().await
    }

    /// Duplicate slugs and missing fields are left to the store's constraints.
    #[tracing::instrument(level = "debug", skip(self, body))]
    pub async fn create(&self, body: &Value) -> Result<Topic> {
        self.topics.create_topic(NewTopic::from_body(body)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::{ErrorKind, MockTopicRepository, StoreFailure};
    use serde_json::json;

    #[tokio::test]
    async fn test_duplicate_slug_surfaces_as_conflict() {
        let mut topics = MockTopicRepository::new();
        topics
            .expect_create_topic()
            .withf(|new| new.slug.as_deref() == Some("cats"))
            .returning(|_| Err(StoreFailure::with_code("23505", "duplicate key").into()));

        let err = TopicService::new(Arc::new(topics))
            .create(&json!({ "slug": "cats", "description": "Not dogs" }))
            .await
            .unwrap_err();
        assert_eq!(err.classify(), ErrorKind::BodyAlreadyExists);
    }
}
