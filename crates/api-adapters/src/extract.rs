//! Request extractors whose rejections use the service error vocabulary
//! instead of axum's plain-text defaults.

use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::http::{header, HeaderMap};
use domains::ErrorKind;
use serde_json::{Map, Value};

use crate::errors::ApiError;

/// Every `key=value` pair of the query string, in order and with repeats.
#[derive(Debug, Clone, Default)]
pub struct QueryPairs(pub Vec<(String, String)>);

impl QueryPairs {
    pub fn keys(&self) -> Vec<String> {
        self.0.iter().map(|(key, _)| key.clone()).collect()
    }

    /// Last value given for `key`.
    pub fn last(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value.as_str())
    }
}

impl<S> FromRequestParts<S> for QueryPairs
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|err: QueryRejection| {
                tracing::debug!(error = %err, "unparseable query string");
                ApiError::from(ErrorKind::InvalidQuery)
            })?;
        Ok(QueryPairs(pairs))
    }
}

/// A single path segment, such as an article id or a username.
#[derive(Debug, Clone)]
pub struct PathParam(pub String);

impl<S> FromRequestParts<S> for PathParam
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(segment) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|err: PathRejection| {
                tracing::debug!(error = %err, "undecodable path segment");
                ApiError::from(ErrorKind::BadRequest)
            })?;
        Ok(PathParam(segment))
    }
}

/// The request body as JSON. Shape checks belong to the services.
///
/// An empty body, or one not declared as JSON, reads as `{}`. Only a
/// declared JSON body that fails to parse is rejected.
#[derive(Debug, Clone)]
pub struct JsonBody(pub Value);

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !declares_json(req.headers()) {
            return Ok(JsonBody(Value::Object(Map::new())));
        }
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|err: BytesRejection| {
                tracing::debug!(error = %err, "unreadable request body");
                ApiError::from(ErrorKind::BadRequest)
            })?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(JsonBody(Value::Object(Map::new())));
        }
        let value = serde_json::from_slice(&bytes).map_err(|err| {
            tracing::debug!(error = %err, "unparseable request body");
            ApiError::from(ErrorKind::BadRequest)
        })?;
        Ok(JsonBody(value))
    }
}

/// `application/json` or any `application/*+json` media type.
fn declares_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    match essence.strip_prefix("application/") {
        Some(subtype) => subtype == "json" || subtype.ends_with("+json"),
        None => false,
    }
}
