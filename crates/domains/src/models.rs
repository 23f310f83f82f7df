//! # Domain Models
//!
//! These structs represent the core entities of Newsdesk.
//! Write-side inputs keep every field optional: the store's NOT NULL
//! constraints decide what is missing, not the deserializer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Image used for articles created without an `article_img_url`.
pub const DEFAULT_ARTICLE_IMG_URL: &str =
    "https://grin2b.com/wp-content/uploads/2017/01/Grin2B_icon_NEWS.png";

/// A subject area articles are filed under (e.g. "mitch", "cats").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// Primary key, used verbatim in `?topic=` filters
    pub slug: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub name: String,
    pub avatar_url: String,
}

/// An article together with its derived `comment_count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub article_id: i32,
    pub author: String,
    pub title: String,
    pub body: String,
    pub topic: String,
    pub article_img_url: String,
    pub votes: i32,
    pub created_at: DateTime<Utc>,
    /// Aggregated over comments at query time, never stored
    pub comment_count: i32,
}

/// One row of a paginated article listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleListing {
    #[serde(flatten)]
    pub article: Article,
    /// Size of the filtered set before `limit`/`p` were applied
    pub total_count: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub comment_id: i32,
    pub author: String,
    pub body: String,
    pub article_id: i32,
    pub votes: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTopic {
    pub slug: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewArticle {
    pub author: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub topic: Option<String>,
    pub article_img_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewComment {
    pub author: Option<String>,
    pub body: Option<String>,
}

impl NewTopic {
    pub fn from_body(body: &Value) -> Self {
        Self {
            slug: text_field(body, "slug"),
            description: text_field(body, "description"),
        }
    }
}

impl NewArticle {
    pub fn from_body(body: &Value) -> Self {
        Self {
            author: text_field(body, "author"),
            title: text_field(body, "title"),
            body: text_field(body, "body"),
            topic: text_field(body, "topic"),
            article_img_url: text_field(body, "article_img_url"),
        }
    }
}

impl NewComment {
    /// Clients post `username`; the row column is `author`.
    pub fn from_body(body: &Value) -> Self {
        Self {
            author: text_field(body, "username"),
            body: text_field(body, "body"),
        }
    }
}

/// Reads `key` from a JSON object as the text the store will receive.
///
/// Strings pass through; other scalars are rendered (`123` becomes `"123"`)
/// so that the store, not the decoder, judges them. `null`, a missing key
/// or a non-object body all read as absent.
pub fn text_field(body: &Value, key: &str) -> Option<String> {
    match body.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// A signed vote increment as supplied by the client.
///
/// The raw text is forwarded to the store, which owns the integer cast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteDelta(String);

impl VoteDelta {
    /// Extracts `inc_votes` from a request body.
    ///
    /// Returns `None` when the body is not an object or `inc_votes` is
    /// missing or falsy (`null`, `false`, `0`, `""`); zero is not a no-op.
    pub fn from_body(body: &Value) -> Option<Self> {
        let value = body.as_object()?.get("inc_votes")?;
        let is_falsy = match value {
            Value::Null => true,
            Value::Bool(b) => !b,
            Value::Number(n) => n.as_f64() == Some(0.0),
            Value::String(s) => s.is_empty(),
            Value::Array(_) | Value::Object(_) => false,
        };
        if is_falsy {
            return None;
        }
        Some(Self(match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => integral_text(n),
            other => other.to_string(),
        }))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// `1.0` reads as `1`; fractional values keep their digits.
fn integral_text(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => (f as i64).to_string(),
        _ => n.to_string(),
    }
}
