//! Dataset loader used by the `seed` binary and the Postgres test suite.

use chrono::{DateTime, Utc};
use domains::{Topic, User, DEFAULT_ARTICLE_IMG_URL};
use serde::Deserialize;
use sqlx::PgPool;

#[derive(Debug, Clone, Deserialize)]
pub struct SeedArticle {
    pub title: String,
    pub topic: String,
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub votes: i32,
    #[serde(default)]
    pub article_img_url: Option<String>,
}

/// `article_id` is the 1-based position of the article in the dataset.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedComment {
    pub body: String,
    pub article_id: i32,
    pub author: String,
    #[serde(default)]
    pub votes: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    pub topics: Vec<Topic>,
    pub users: Vec<User>,
    pub articles: Vec<SeedArticle>,
    pub comments: Vec<SeedComment>,
}

impl SeedData {
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

/// Replaces the contents of every table with `data`.
///
/// Identity sequences restart, so article and comment ids follow dataset
/// order. Runs in one transaction.
pub async fn seed(pool: &PgPool, data: &SeedData) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("TRUNCATE comments, articles, users, topics RESTART IDENTITY CASCADE")
        .execute(&mut *tx)
        .await?;

    for topic in &data.topics {
        sqlx::query("INSERT INTO topics (slug, description) VALUES ($1, $2)")
            .bind(&topic.slug)
            .bind(&topic.description)
            .execute(&mut *tx)
            .await?;
    }

    for user in &data.users {
        sqlx::query("INSERT INTO users (username, name, avatar_url) VALUES ($1, $2, $3)")
            .bind(&user.username)
            .bind(&user.name)
            .bind(&user.avatar_url)
            .execute(&mut *tx)
            .await?;
    }

    for article in &data.articles {
        sqlx::query(
            "INSERT INTO articles (title, topic, author, body, created_at, votes, article_img_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(&article.title)
        .bind(&article.topic)
        .bind(&article.author)
        .bind(&article.body)
        .bind(article.created_at)
        .bind(article.votes)
        .bind(
            article
                .article_img_url
                .as_deref()
                .unwrap_or(DEFAULT_ARTICLE_IMG_URL),
        )
        .execute(&mut *tx)
        .await?;
    }

    for comment in &data.comments {
        sqlx::query(
            "INSERT INTO comments (body, article_id, author, votes, created_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&comment.body)
        .bind(comment.article_id)
        .bind(&comment.author)
        .bind(comment.votes)
        .bind(comment.created_at)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    tracing::info!(
        topics = data.topics.len(),
        users = data.users.len(),
        articles = data.articles.len(),
        comments = data.comments.len(),
        "seeded database"
    );
    Ok(())
}
