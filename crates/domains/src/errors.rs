//! # AppError
//!
//! Centralized error handling for Newsdesk.
//!
//! Failures come from two places: services and validators reject input
//! explicitly with an [`ErrorKind`], and the store reports a
//! [`StoreFailure`] carrying its SQLSTATE code. [`AppError::classify`]
//! folds both into the one kind that decides the HTTP response.

use thiserror::Error;

/// Every client-visible failure, with its status and message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed identifier or value rejected by the store's type cast
    BadRequest,
    /// Unknown sort column, order, query key, or bad pagination value
    InvalidQuery,
    /// Unknown topic filter or a page past the end of the results
    QueryNotFound,
    /// A required column was left empty on insert
    IncompleteBody,
    /// A referenced row (user, topic, article) does not exist
    NotFound,
    NonExistentId,
    NonExistentArticleId,
    NonExistentCommentId,
    NonExistentUsername,
    /// Vote payload without a usable `inc_votes`
    InvalidFormBody,
    /// Unique key already taken
    BodyAlreadyExists,
    /// Article delete refused because comments still reference it
    ArticleHasComments,
    InternalError,
}

impl ErrorKind {
    pub const fn status(self) -> u16 {
        match self {
            ErrorKind::BadRequest
            | ErrorKind::InvalidQuery
            | ErrorKind::IncompleteBody
            | ErrorKind::InvalidFormBody => 400,
            ErrorKind::QueryNotFound
            | ErrorKind::NotFound
            | ErrorKind::NonExistentId
            | ErrorKind::NonExistentArticleId
            | ErrorKind::NonExistentCommentId
            | ErrorKind::NonExistentUsername => 404,
            ErrorKind::BodyAlreadyExists | ErrorKind::ArticleHasComments => 409,
            ErrorKind::InternalError => 500,
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "Bad Request",
            ErrorKind::InvalidQuery => "Invalid query",
            ErrorKind::QueryNotFound => "Query Not Found",
            ErrorKind::IncompleteBody => "Incomplete/Missing Body",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::NonExistentId => "Non-existent ID",
            ErrorKind::NonExistentArticleId => "Non-existent Article ID",
            ErrorKind::NonExistentCommentId => "Non-existent Comment ID",
            ErrorKind::NonExistentUsername => "Non-existent Username",
            ErrorKind::InvalidFormBody => "Invalid Form Body",
            ErrorKind::BodyAlreadyExists => "Body Already Exists",
            ErrorKind::ArticleHasComments => "Article Has Comments",
            ErrorKind::InternalError => "Internal Server Error",
        }
    }
}

/// A failed statement as reported by the data store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreFailure {
    /// SQLSTATE, absent for connection-level failures
    pub code: Option<String>,
    pub message: String,
}

impl StoreFailure {
    pub fn new(code: Option<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn with_code(code: &str, message: impl Into<String>) -> Self {
        Self::new(Some(code.to_string()), message)
    }
}

/// SQLSTATE → kind. First match wins; anything else is an internal error.
const STORE_RULES: &[(&str, ErrorKind)] = &[
    ("22P02", ErrorKind::BadRequest),        // invalid_text_representation
    ("22003", ErrorKind::BadRequest),        // numeric_value_out_of_range
    ("23502", ErrorKind::IncompleteBody),    // not_null_violation
    ("23503", ErrorKind::NotFound),          // foreign_key_violation
    ("23505", ErrorKind::BodyAlreadyExists), // unique_violation
];

/// The primary error type for all Newsdesk operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Raised explicitly by a service or validator
    #[error("{}", .0.message())]
    Rejected(ErrorKind),

    /// Raised by the store; classified by SQLSTATE
    #[error("store failure (code {code:?}): {message}", code = .0.code, message = .0.message)]
    Store(StoreFailure),
}

impl AppError {
    pub fn classify(&self) -> ErrorKind {
        match self {
            AppError::Rejected(kind) => *kind,
            AppError::Store(failure) => failure
                .code
                .as_deref()
                .and_then(|code| {
                    STORE_RULES
                        .iter()
                        .find(|(rule, _)| *rule == code)
                        .map(|(_, kind)| *kind)
                })
                .unwrap_or(ErrorKind::InternalError),
        }
    }
}

impl From<ErrorKind> for AppError {
    fn from(kind: ErrorKind) -> Self {
        AppError::Rejected(kind)
    }
}

impl From<StoreFailure> for AppError {
    fn from(failure: StoreFailure) -> Self {
        AppError::Store(failure)
    }
}

/// A specialized Result type for Newsdesk logic.
pub type Result<T> = std::result::Result<T, AppError>;
