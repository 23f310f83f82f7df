//! # PostgreSQL store
//!
//! This module implements the data mapping between the PostgreSQL relational
//! model and the `domains` models.
//!
//! Path identifiers are bound as text and cast with `::INT` inside the
//! statement. A malformed id therefore fails with SQLSTATE `22P02`, which the
//! error classifier turns into a 400 without any pre-validation here.

mod articles;
mod comments;
mod error;
pub mod seed;
mod topics;
mod users;

use std::time::Duration;

use sqlx::migrate::MigrateError;
use sqlx::postgres::{PgPool, PgPoolOptions};

pub use seed::{seed, SeedArticle, SeedComment, SeedData};

/// One pool-backed store implementing every repository port.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Opens a pool. `acquire_timeout` bounds how long a request waits for a
    /// connection before failing; there are no retries.
    pub async fn connect(
        url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect(url)
            .await?;
        tracing::info!(max_connections, "connected to postgres");
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Applies the bundled schema migrations.
    pub async fn migrate(&self) -> Result<(), MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}
