//! Comments under an article.

use std::sync::Arc;

use domains::{
    ArticleRepository, Comment, CommentQuery, CommentRepository, ErrorKind, NewComment, Result,
    VoteDelta,
};
use serde_json::Value;

pub struct CommentService {
    comments: Arc<dyn CommentRepository>,
    articles: Arc<dyn ArticleRepository>,
}

impl CommentService {
    pub fn new(comments: Arc<dyn CommentRepository>, articles: Arc<dyn ArticleRepository>) -> Self {
        Self { comments, articles }
    }

    /// Lists an article's comments, newest first unless told otherwise.
    ///
    /// The fetch and the article existence check run together. An unknown
    /// article is an error even though its comment query is simply empty;
    /// if both fail, the fetch's error is the one reported.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn list_for_article(
        &self,
        article_id: &str,
        sort_by: Option<&str>,
        order: Option<&str>,
    ) -> Result<Vec<Comment>> {
        let fetch = async {
            let query = CommentQuery::from_params(sort_by, order)?;
            self.comments.list_comments(article_id, &query).await
        };
        let (comments, article_known) =
            tokio::join!(fetch, self.articles.article_exists(article_id));
        let comments = comments?;

        if !article_known? {
            return Err(ErrorKind::NonExistentArticleId.into());
        }
        Ok(comments)
    }

    #[tracing::instrument(level = "debug", skip(self, body))]
    pub async fn create(&self, article_id: &str, body: &Value) -> Result<Comment> {
        self.comments
            .create_comment(article_id, NewComment::from_body(body))
            .await
    }

    #[tracing::instrument(level = "debug", skip(self, body))]
    pub async fn vote(&self, comment_id: &str, body: &Value) -> Result<Comment> {
        let delta = VoteDelta::from_body(body).ok_or(ErrorKind::InvalidFormBody)?;
        self.comments
            .increment_votes(comment_id, &delta)
            .await?
            .ok_or_else(|| ErrorKind::NonExistentCommentId.into())
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn delete(&self, comment_id: &str) -> Result<()> {
        match self.comments.delete_comment(comment_id).await? {
            0 => Err(ErrorKind::NonExistentCommentId.into()),
            _ => Ok(()),
        }
    }
}
