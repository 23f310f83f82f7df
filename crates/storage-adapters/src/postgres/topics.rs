use async_trait::async_trait;
use domains::{NewTopic, Result, Topic, TopicRepository};
use sqlx::FromRow;

use super::error::store_error;
use super::PgStore;

#[derive(Debug, FromRow)]
struct TopicRow {
    slug: String,
    description: String,
}

impl From<TopicRow> for Topic {
    fn from(row: TopicRow) -> Self {
        Topic {
            slug: row.slug,
            description: row.description,
        }
    }
}

#[async_trait]
impl TopicRepository for PgStore {
    async fn list_topics(&self) -> Result<Vec<Topic>> {
        let rows = sqlx::query_as::<_, TopicRow>("SELECT slug, description FROM topics ORDER BY slug")
            .fetch_all(self.pool())
            .await
            .map_err(store_error)?;
        Ok(rows.into_iter().map(Topic::from).collect())
    }

    async fn create_topic(&self, topic: NewTopic) -> Result<Topic> {
        let row = sqlx::query_as::<_, TopicRow>(
            "INSERT INTO topics (slug, description) VALUES ($1, $2) RETURNING slug, description",
        )
        .bind(topic.slug)
        .bind(topic.description)
        .fetch_one(self.pool())
        .await
        .map_err(store_error)?;
        Ok(row.into())
    }

    async fn topic_exists(&self, slug: &str) -> Result<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM topics WHERE slug = $1)")
            .bind(slug)
            .fetch_one(self.pool())
            .await
            .map_err(store_error)
    }
}
