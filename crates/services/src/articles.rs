//! Article listing, lookup and mutation.

use std::sync::Arc;

use domains::{
    validate_article_query_keys, Article, ArticleListParams, ArticleListing, ArticleQuery,
    ArticleRepository, DeleteOutcome, DeletePolicy, ErrorKind, NewArticle, PageBounds, Result,
    TopicRepository, VoteDelta, DEFAULT_ARTICLE_IMG_URL,
};
use serde_json::Value;

/// Deployment-level knobs for article handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleOptions {
    pub bounds: PageBounds,
    /// Used when a new article omits `article_img_url`
    pub default_img_url: String,
    pub delete_policy: DeletePolicy,
}

impl Default for ArticleOptions {
    fn default() -> Self {
        Self {
            bounds: PageBounds::default(),
            default_img_url: DEFAULT_ARTICLE_IMG_URL.to_string(),
            delete_policy: DeletePolicy::default(),
        }
    }
}

pub struct ArticleService {
    articles: Arc<dyn ArticleRepository>,
    topics: Arc<dyn TopicRepository>,
    options: ArticleOptions,
}

impl ArticleService {
    pub fn new(
        articles: Arc<dyn ArticleRepository>,
        topics: Arc<dyn TopicRepository>,
        options: ArticleOptions,
    ) -> Self {
        Self {
            articles,
            topics,
            options,
        }
    }

    /// Lists a page of articles.
    ///
    /// `keys` are every query-string key the client sent. They are checked
    /// against the allow-list while the page is fetched; both must succeed,
    /// and a fetch failure is reported ahead of a key failure.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn list(
        &self,
        params: &ArticleListParams,
        keys: &[String],
    ) -> Result<Vec<ArticleListing>> {
        let (page, keys_ok) = tokio::join!(self.fetch_page(params), async {
            validate_article_query_keys(keys)
        });
        let page = page?;
        keys_ok?;
        Ok(page)
    }

    async fn fetch_page(&self, params: &ArticleListParams) -> Result<Vec<ArticleListing>> {
        let query = ArticleQuery::from_params(params, self.options.bounds)?;

        let topic_known = async {
            match query.topic.as_deref() {
                Some(slug) => self.topics.topic_exists(slug).await,
                None => Ok(true),
            }
        };
        let (rows, topic_known) = tokio::join!(self.articles.list_articles(&query), topic_known);
        let rows = rows?;

        if !topic_known? {
            return Err(ErrorKind::QueryNotFound.into());
        }
        // Page 1 may legitimately be empty; later pages must not be.
        if rows.is_empty() && query.pagination.page > 1 {
            return Err(ErrorKind::QueryNotFound.into());
        }
        Ok(rows)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn get(&self, article_id: &str) -> Result<Article> {
        self.articles
            .find_article(article_id)
            .await?
            .ok_or_else(|| ErrorKind::NonExistentId.into())
    }

    #[tracing::instrument(level = "debug", skip(self, body))]
    pub async fn create(&self, body: &Value) -> Result<Article> {
        let mut article = NewArticle::from_body(body);
        if article.article_img_url.is_none() {
            article.article_img_url = Some(self.options.default_img_url.clone());
        }
        self.articles.create_article(article).await
    }

    /// Applies `inc_votes` from `body`; rejected before touching the store
    /// when the delta is missing or falsy.
    #[tracing::instrument(level = "debug", skip(self, body))]
    pub async fn vote(&self, article_id: &str, body: &Value) -> Result<Article> {
        let delta = VoteDelta::from_body(body).ok_or(ErrorKind::InvalidFormBody)?;
        self.articles
            .increment_votes(article_id, &delta)
            .await?
            .ok_or_else(|| ErrorKind::NonExistentArticleId.into())
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn delete(&self, article_id: &str) -> Result<()> {
        match self
            .articles
            .delete_article(article_id, self.options.delete_policy)
            .await?
        {
            DeleteOutcome::Deleted => Ok(()),
            DeleteOutcome::Missing => Err(ErrorKind::NonExistentArticleId.into()),
            DeleteOutcome::HasComments => Err(ErrorKind::ArticleHasComments.into()),
        }
    }
}
