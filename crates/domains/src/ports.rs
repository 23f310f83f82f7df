//! # Core Traits (Ports)
//!
//! Any storage adapter must implement these traits to be used by the binary.
//!
//! Identifiers arrive exactly as they appeared in the request path. The
//! store performs the integer cast, so a malformed id surfaces as a
//! [`StoreFailure`](crate::errors::StoreFailure) rather than being screened
//! out beforehand.

use async_trait::async_trait;

use crate::errors::Result;
use crate::models::{
    Article, ArticleListing, Comment, NewArticle, NewComment, NewTopic, Topic, User, VoteDelta,
};
use crate::query::{ArticleQuery, CommentQuery};

/// What happens to an article's comments when the article is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletePolicy {
    /// Refuse while comments reference the article
    #[default]
    Block,
    /// Remove the comments together with the article
    Cascade,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Missing,
    /// Blocked by [`DeletePolicy::Block`]
    HasComments,
}

#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait TopicRepository: Send + Sync {
    async fn list_topics(&self) -> Result<Vec<Topic>>;
    async fn create_topic(&self, topic: NewTopic) -> Result<Topic>;
    async fn topic_exists(&self, slug: &str) -> Result<bool>;
}

#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// One page of articles; every row carries the filtered `total_count`.
    async fn list_articles(&self, query: &ArticleQuery) -> Result<Vec<ArticleListing>>;
    async fn find_article(&self, article_id: &str) -> Result<Option<Article>>;
    async fn article_exists(&self, article_id: &str) -> Result<bool>;
    async fn create_article(&self, article: NewArticle) -> Result<Article>;
    /// `None` when no row matched.
    async fn increment_votes(&self, article_id: &str, delta: &VoteDelta)
        -> Result<Option<Article>>;
    async fn delete_article(&self, article_id: &str, policy: DeletePolicy)
        -> Result<DeleteOutcome>;
}

#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn list_comments(&self, article_id: &str, query: &CommentQuery) -> Result<Vec<Comment>>;
    async fn create_comment(&self, article_id: &str, comment: NewComment) -> Result<Comment>;
    /// `None` when no row matched.
    async fn increment_votes(&self, comment_id: &str, delta: &VoteDelta)
        -> Result<Option<Comment>>;
    /// Number of rows removed.
    async fn delete_comment(&self, comment_id: &str) -> Result<u64>;
}

#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>>;
    async fn find_user(&self, username: &str) -> Result<Option<User>>;
}
