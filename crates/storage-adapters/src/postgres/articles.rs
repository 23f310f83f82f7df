use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domains::{
    Article, ArticleListing, ArticleQuery, ArticleRepository, ArticleSortColumn, DeleteOutcome,
    DeletePolicy, NewArticle, Result, VoteDelta,
};
use sqlx::{FromRow, Postgres, QueryBuilder};

use super::error::store_error;
use super::PgStore;

const ARTICLE_COLUMNS: &str = "articles.article_id, articles.author, articles.title, \
    articles.body, articles.topic, articles.article_img_url, articles.votes, articles.created_at";

// Article by id with its comment count. The LEFT JOIN keeps articles that
// have no comments; grouping by the primary key keeps one row per article.
const SELECT_ARTICLE: &str = "SELECT articles.article_id, articles.author, articles.title, \
    articles.body, articles.topic, articles.article_img_url, articles.votes, articles.created_at, \
    COUNT(comments.comment_id)::INT AS comment_count \
    FROM articles LEFT JOIN comments ON comments.article_id = articles.article_id \
    WHERE articles.article_id = $1::INT \
    GROUP BY articles.article_id";

const ARTICLE_EXISTS: &str = "SELECT EXISTS (SELECT 1 FROM articles WHERE article_id = $1::INT)";

/// Holds off comment inserts (their foreign key check needs a share lock on
/// the article) until the delete commits.
const LOCK_ARTICLE: &str = "SELECT article_id FROM articles WHERE article_id = $1::INT FOR UPDATE";

const INSERT_ARTICLE: &str = "WITH inserted AS (\
    INSERT INTO articles (author, title, body, topic, article_img_url) \
    VALUES ($1, $2, $3, $4, $5) RETURNING *) \
    SELECT inserted.article_id, inserted.author, inserted.title, inserted.body, inserted.topic, \
    inserted.article_img_url, inserted.votes, inserted.created_at, \
    (SELECT COUNT(*) FROM comments WHERE comments.article_id = inserted.article_id)::INT AS comment_count \
    FROM inserted";

// Single-statement relative update; no read-modify-write.
const INCREMENT_VOTES: &str = "WITH updated AS (\
    UPDATE articles SET votes = votes + $1::INT WHERE article_id = $2::INT RETURNING *) \
    SELECT updated.article_id, updated.author, updated.title, updated.body, updated.topic, \
    updated.article_img_url, updated.votes, updated.created_at, \
    (SELECT COUNT(*) FROM comments WHERE comments.article_id = updated.article_id)::INT AS comment_count \
    FROM updated";

#[derive(Debug, FromRow)]
struct ArticleRow {
    article_id: i32,
    author: String,
    title: String,
    body: String,
    topic: String,
    article_img_url: String,
    votes: i32,
    created_at: DateTime<Utc>,
    comment_count: i32,
}

impl From<ArticleRow> for Article {
    fn from(row: ArticleRow) -> Self {
        Article {
            article_id: row.article_id,
            author: row.author,
            title: row.title,
            body: row.body,
            topic: row.topic,
            article_img_url: row.article_img_url,
            votes: row.votes,
            created_at: row.created_at,
            comment_count: row.comment_count,
        }
    }
}

#[derive(Debug, FromRow)]
struct ArticleListingRow {
    #[sqlx(flatten)]
    article: ArticleRow,
    total_count: i32,
}

#[derive(Debug, FromRow)]
struct DeleteRow {
    found: bool,
    removed: bool,
}

/// Builds the paginated listing for `query`.
///
/// `total_count` is a window count over the grouped rows, so it reflects
/// the topic filter but not `LIMIT`/`OFFSET`. Rows tie-break on
/// `article_id` so pages never overlap.
pub(crate) fn list_articles_query(query: &ArticleQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT ");
    builder.push(ARTICLE_COLUMNS).push(
        ", COUNT(comments.comment_id)::INT AS comment_count, COUNT(*) OVER ()::INT AS total_count \
         FROM articles LEFT JOIN comments ON comments.article_id = articles.article_id",
    );

    if let Some(topic) = &query.topic {
        builder.push(" WHERE articles.topic = ").push_bind(topic.clone());
    }

    builder
        .push(" GROUP BY articles.article_id ORDER BY ")
        .push(query.sort_by.as_sql())
        .push(" ")
        .push(query.order.as_sql());
    if query.sort_by != ArticleSortColumn::ArticleId {
        builder.push(", articles.article_id ASC");
    }

    builder
        .push(" LIMIT ")
        .push_bind(i64::from(query.pagination.limit))
        .push(" OFFSET ")
        .push_bind(query.pagination.offset());
    builder
}

/// Builds the delete for one article.
///
/// The `target` CTE sees the row as it was before the delete, which lets a
/// single statement tell "gone", "never existed" and "blocked" apart.
pub(crate) fn delete_article_query(
    article_id: &str,
    policy: DeletePolicy,
) -> QueryBuilder<'static, Postgres> {
    let mut builder =
        QueryBuilder::new("WITH target AS (SELECT article_id FROM articles WHERE article_id = ");
    builder.push_bind(article_id.to_string()).push(
        "::INT), removed AS (DELETE FROM articles \
         WHERE article_id IN (SELECT article_id FROM target)",
    );
    if policy == DeletePolicy::Block {
        builder.push(
            " AND NOT EXISTS (SELECT 1 FROM comments WHERE comments.article_id = articles.article_id)",
        );
    }
    builder.push(
        " RETURNING article_id) \
         SELECT EXISTS (SELECT 1 FROM target) AS found, EXISTS (SELECT 1 FROM removed) AS removed",
    );
    builder
}

#[async_trait]
impl ArticleRepository for PgStore {
    async fn list_articles(&self, query: &ArticleQuery) -> Result<Vec<ArticleListing>> {
        let rows = list_articles_query(query)
            .build_query_as::<ArticleListingRow>()
            .fetch_all(self.pool())
            .await
            .map_err(store_error)?;

        Ok(rows
            .into_iter()
            .map(|row| ArticleListing {
                article: row.article.into(),
                total_count: row.total_count,
            })
            .collect())
    }

    async fn find_article(&self, article_id: &str) -> Result<Option<Article>> {
        let row = sqlx::query_as::<_, ArticleRow>(SELECT_ARTICLE)
            .bind(article_id)
            .fetch_optional(self.pool())
            .await
            .map_err(store_error)?;
        Ok(row.map(Article::from))
    }

    async fn article_exists(&self, article_id: &str) -> Result<bool> {
        sqlx::query_scalar::<_, bool>(ARTICLE_EXISTS)
            .bind(article_id)
            .fetch_one(self.pool())
            .await
            .map_err(store_error)
    }

    async fn create_article(&self, article: NewArticle) -> Result<Article> {
        let row = sqlx::query_as::<_, ArticleRow>(INSERT_ARTICLE)
            .bind(article.author)
            .bind(article.title)
            .bind(article.body)
            .bind(article.topic)
            .bind(article.article_img_url)
            .fetch_one(self.pool())
            .await
            .map_err(store_error)?;
        Ok(row.into())
    }

    async fn increment_votes(
        &self,
        article_id: &str,
        delta: &VoteDelta,
    ) -> Result<Option<Article>> {
        let row = sqlx::query_as::<_, ArticleRow>(INCREMENT_VOTES)
            .bind(delta.as_str())
            .bind(article_id)
            .fetch_optional(self.pool())
            .await
            .map_err(store_error)?;
        Ok(row.map(Article::from))
    }

    async fn delete_article(&self, article_id: &str, policy: DeletePolicy) -> Result<DeleteOutcome> {
        let mut tx = self.pool().begin().await.map_err(store_error)?;
        // The delete runs as a later statement so its snapshot includes any
        // comment committed while the lock was awaited.
        sqlx::query(LOCK_ARTICLE)
            .bind(article_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(store_error)?;
        let row = delete_article_query(article_id, policy)
            .build_query_as::<DeleteRow>()
            .fetch_one(&mut *tx)
            .await
            .map_err(store_error)?;
        tx.commit().await.map_err(store_error)?;

        Ok(match (row.found, row.removed) {
            (_, true) => DeleteOutcome::Deleted,
            (true, false) if policy == DeletePolicy::Block => DeleteOutcome::HasComments,
            _ => DeleteOutcome::Missing,
        })
    }
}
