//! # Query Validation
//!
//! Turns raw query-string values into typed, allow-listed query plans.
//! Column and direction names only ever reach SQL through the
//! `as_sql` lookups below; nothing the client sends is spliced in.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;

use crate::errors::{ErrorKind, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Accepts `asc`/`desc` in any letter case.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.eq_ignore_ascii_case("asc") {
            Ok(SortOrder::Asc)
        } else if raw.eq_ignore_ascii_case("desc") {
            Ok(SortOrder::Desc)
        } else {
            Err(ErrorKind::InvalidQuery.into())
        }
    }

    pub const fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArticleSortColumn {
    #[default]
    CreatedAt,
    Votes,
    ArticleId,
    Author,
    Body,
    ArticleImgUrl,
    Title,
    Topic,
    CommentCount,
}

impl ArticleSortColumn {
    pub const ALL: [ArticleSortColumn; 9] = [
        ArticleSortColumn::CreatedAt,
        ArticleSortColumn::Votes,
        ArticleSortColumn::ArticleId,
        ArticleSortColumn::Author,
        ArticleSortColumn::Body,
        ArticleSortColumn::ArticleImgUrl,
        ArticleSortColumn::Title,
        ArticleSortColumn::Topic,
        ArticleSortColumn::CommentCount,
    ];

    /// The name clients use in `?sort_by=`.
    pub const fn name(self) -> &'static str {
        match self {
            ArticleSortColumn::CreatedAt => "created_at",
            ArticleSortColumn::Votes => "votes",
            ArticleSortColumn::ArticleId => "article_id",
            ArticleSortColumn::Author => "author",
            ArticleSortColumn::Body => "body",
            ArticleSortColumn::ArticleImgUrl => "article_img_url",
            ArticleSortColumn::Title => "title",
            ArticleSortColumn::Topic => "topic",
            ArticleSortColumn::CommentCount => "comment_count",
        }
    }

    /// The qualified expression used in `ORDER BY`.
    pub const fn as_sql(self) -> &'static str {
        match self {
            ArticleSortColumn::CreatedAt => "articles.created_at",
            ArticleSortColumn::Votes => "articles.votes",
            ArticleSortColumn::ArticleId => "articles.article_id",
            ArticleSortColumn::Author => "articles.author",
            ArticleSortColumn::Body => "articles.body",
            ArticleSortColumn::ArticleImgUrl => "articles.article_img_url",
            ArticleSortColumn::Title => "articles.title",
            ArticleSortColumn::Topic => "articles.topic",
            // select-list alias of the aggregate
            ArticleSortColumn::CommentCount => "comment_count",
        }
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|column| column.name() == raw)
            .ok_or_else(|| ErrorKind::InvalidQuery.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentSortColumn {
    CommentId,
    Votes,
    #[default]
    CreatedAt,
    Author,
    Body,
    ArticleId,
}

impl CommentSortColumn {
    pub const ALL: [CommentSortColumn; 6] = [
        CommentSortColumn::CommentId,
        CommentSortColumn::Votes,
        CommentSortColumn::CreatedAt,
        CommentSortColumn::Author,
        CommentSortColumn::Body,
        CommentSortColumn::ArticleId,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            CommentSortColumn::CommentId => "comment_id",
            CommentSortColumn::Votes => "votes",
            CommentSortColumn::CreatedAt => "created_at",
            CommentSortColumn::Author => "author",
            CommentSortColumn::Body => "body",
            CommentSortColumn::ArticleId => "article_id",
        }
    }

    pub const fn as_sql(self) -> &'static str {
        match self {
            CommentSortColumn::CommentId => "comments.comment_id",
            CommentSortColumn::Votes => "comments.votes",
            CommentSortColumn::CreatedAt => "comments.created_at",
            CommentSortColumn::Author => "comments.author",
            CommentSortColumn::Body => "comments.body",
            CommentSortColumn::ArticleId => "comments.article_id",
        }
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|column| column.name() == raw)
            .ok_or_else(|| ErrorKind::InvalidQuery.into())
    }
}

/// Query-string keys `GET /api/articles` accepts, built once per process.
pub static ARTICLE_QUERY_KEYS: Lazy<BTreeSet<&'static str>> = Lazy::new(|| {
    ArticleSortColumn::ALL
        .iter()
        .map(|column| column.name())
        .chain(["sort_by", "order", "topic", "limit", "p"])
        .collect()
});

/// Rejects the request if any key is outside [`ARTICLE_QUERY_KEYS`].
pub fn validate_article_query_keys<S: AsRef<str>>(keys: &[S]) -> Result<()> {
    match keys
        .iter()
        .find(|key| !ARTICLE_QUERY_KEYS.contains(key.as_ref()))
    {
        Some(_) => Err(ErrorKind::InvalidQuery.into()),
        None => Ok(()),
    }
}

/// A 1-indexed page of `limit` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: u32,
    pub page: u32,
}

impl Pagination {
    pub fn offset(self) -> i64 {
        i64::from(self.limit) * (i64::from(self.page) - 1)
    }
}

/// Page-size rules applied while parsing `limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    pub default_limit: u32,
    pub max_limit: u32,
}

impl Default for PageBounds {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 100,
        }
    }
}

/// Raw `GET /api/articles` parameters, exactly as received.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleListParams {
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub topic: Option<String>,
    pub limit: Option<String>,
    pub p: Option<String>,
}

impl ArticleListParams {
    /// Later occurrences of a key override earlier ones.
    pub fn from_pairs<K: AsRef<str>, V: AsRef<str>>(pairs: &[(K, V)]) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let value = Some(value.as_ref().to_string());
            match key.as_ref() {
                "sort_by" => params.sort_by = value,
                "order" => params.order = value,
                "topic" => params.topic = value,
                "limit" => params.limit = value,
                "p" => params.p = value,
                _ => {}
            }
        }
        params
    }
}

/// A validated article listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleQuery {
    pub sort_by: ArticleSortColumn,
    pub order: SortOrder,
    pub topic: Option<String>,
    pub pagination: Pagination,
}

impl ArticleQuery {
    pub fn from_params(params: &ArticleListParams, bounds: PageBounds) -> Result<Self> {
        let sort_by = params
            .sort_by
            .as_deref()
            .map(ArticleSortColumn::parse)
            .transpose()?
            .unwrap_or_default();
        let order = params
            .order
            .as_deref()
            .map(SortOrder::parse)
            .transpose()?
            .unwrap_or_default();
        let limit = match params.limit.as_deref() {
            Some(raw) => parse_positive(raw)?,
            None => bounds.default_limit,
        };
        if limit > bounds.max_limit {
            return Err(ErrorKind::InvalidQuery.into());
        }
        let page = params.p.as_deref().map(parse_positive).transpose()?.unwrap_or(1);

        Ok(Self {
            sort_by,
            order,
            topic: params.topic.clone().filter(|topic| !topic.is_empty()),
            pagination: Pagination { limit, page },
        })
    }
}

/// A validated comment listing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommentQuery {
    pub sort_by: CommentSortColumn,
    pub order: SortOrder,
}

impl CommentQuery {
    pub fn from_params(sort_by: Option<&str>, order: Option<&str>) -> Result<Self> {
        Ok(Self {
            sort_by: sort_by
                .map(CommentSortColumn::parse)
                .transpose()?
                .unwrap_or_default(),
            order: order.map(SortOrder::parse).transpose()?.unwrap_or_default(),
        })
    }
}

fn parse_positive(raw: &str) -> Result<u32> {
    match raw.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ErrorKind::InvalidQuery.into()),
    }
}
