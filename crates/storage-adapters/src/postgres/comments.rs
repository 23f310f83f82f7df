use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domains::{
    Comment, CommentQuery, CommentRepository, CommentSortColumn, NewComment, Result, VoteDelta,
};
use sqlx::{FromRow, Postgres, QueryBuilder};

use super::error::store_error;
use super::PgStore;

const COMMENT_COLUMNS: &str = "comment_id, author, body, article_id, votes, created_at";

const INSERT_COMMENT: &str = "INSERT INTO comments (author, body, article_id) \
    VALUES ($1, $2, $3::INT) \
    RETURNING comment_id, author, body, article_id, votes, created_at";

const INCREMENT_VOTES: &str = "UPDATE comments SET votes = votes + $1::INT \
    WHERE comment_id = $2::INT \
    RETURNING comment_id, author, body, article_id, votes, created_at";

const DELETE_COMMENT: &str = "DELETE FROM comments WHERE comment_id = $1::INT";

#[derive(Debug, FromRow)]
struct CommentRow {
    comment_id: i32,
    author: String,
    body: String,
    article_id: i32,
    votes: i32,
    created_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            comment_id: row.comment_id,
            author: row.author,
            body: row.body,
            article_id: row.article_id,
            votes: row.votes,
            created_at: row.created_at,
        }
    }
}

pub(crate) fn list_comments_query(
    article_id: &str,
    query: &CommentQuery,
) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT ");
    builder
        .push(COMMENT_COLUMNS)
        .push(" FROM comments WHERE comments.article_id = ")
        .push_bind(article_id.to_string())
        .push("::INT ORDER BY ")
        .push(query.sort_by.as_sql())
        .push(" ")
        .push(query.order.as_sql());
    if query.sort_by != CommentSortColumn::CommentId {
        builder.push(", comments.comment_id ASC");
    }
    builder
}

#[async_trait]
impl CommentRepository for PgStore {
    async fn list_comments(&self, article_id: &str, query: &CommentQuery) -> Result<Vec<Comment>> {
        let rows = list_comments_query(article_id, query)
            .build_query_as::<CommentRow>()
            .fetch_all(self.pool())
            .await
            .map_err(store_error)?;
        Ok(rows.into_iter().map(Comment::from).collect())
    }

    async fn create_comment(&self, article_id: &str, comment: NewComment) -> Result<Comment> {
        let row = sqlx::query_as::<_, CommentRow>(INSERT_COMMENT)
            .bind(comment.author)
            .bind(comment.body)
            .bind(article_id)
            .fetch_one(self.pool())
            .await
            .map_err(store_error)?;
        Ok(row.into())
    }

    async fn increment_votes(
        &self,
        comment_id: &str,
        delta: &VoteDelta,
    ) -> Result<Option<Comment>> {
        let row = sqlx::query_as::<_, CommentRow>(INCREMENT_VOTES)
            .bind(delta.as_str())
            .bind(comment_id)
            .fetch_optional(self.pool())
            .await
            .map_err(store_error)?;
        Ok(row.map(Comment::from))
    }

    async fn delete_comment(&self, comment_id: &str) -> Result<u64> {
        let result = sqlx::query(DELETE_COMMENT)
            .bind(comment_id)
            .execute(self.pool())
            .await
            .map_err(store_error)?;
        Ok(result.rows_affected())
    }
}
