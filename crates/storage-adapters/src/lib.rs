//! # storage-adapters
//!
//! Implementations of the `domains` repository ports. Each backend sits
//! behind a cargo feature so binaries only compile the stores they use.

#[cfg(feature = "db-postgres")]
pub mod postgres;

#[cfg(feature = "db-postgres")]
pub use postgres::{seed, PgStore, SeedArticle, SeedComment, SeedData};
