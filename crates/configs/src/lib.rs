//! # Settings
//!
//! Layered runtime configuration for Newsdesk.
//!
//! Sources, lowest precedence first:
//! 1. built-in defaults
//! 2. `config/default.toml` (optional)
//! 3. `config/local.toml` (optional, not checked in)
//! 4. `NEWSDESK__SECTION__KEY` environment variables
//! 5. `DATABASE_URL`, which overrides `database.url`
//!
//! A `.env` file in the working directory is loaded into the environment
//! first, if present.

use std::net::SocketAddr;
use std::time::Duration;

use config::{Config, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

const ENV_PREFIX: &str = "NEWSDESK";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid listen address {0}")]
    Address(String),

    #[error("database.url is not set")]
    MissingDatabaseUrl,

    #[error("invalid page sizes: default {default}, max {max}")]
    PageSize { default: u32, max: u32 },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub articles: ArticleSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Connection string; never logged
    pub url: Option<SecretString>,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    /// Apply bundled migrations at startup
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArticleSettings {
    pub default_page_size: u32,
    pub max_page_size: u32,
    pub default_img_url: String,
    pub delete_policy: DeletePolicySetting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeletePolicySetting {
    Block,
    Cascade,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// `EnvFilter` directive; `RUST_LOG` wins when set
    pub filter: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Settings {
    /// Loads settings from files and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        let settings = Self::from_builder(
            Config::builder()
                .add_source(File::with_name("config/default").required(false))
                .add_source(File::with_name("config/local").required(false))
                .add_source(
                    Environment::with_prefix(ENV_PREFIX)
                        .prefix_separator("__")
                        .separator("__"),
                ),
            std::env::var("DATABASE_URL").ok(),
        )?;
        tracing::debug!(
            host = %settings.server.host,
            port = settings.server.port,
            "configuration loaded"
        );
        Ok(settings)
    }

    /// Applies defaults beneath `builder`'s sources and deserializes.
    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        database_url: Option<String>,
    ) -> Result<Self, ConfigError> {
        let config = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 9090)?
            .set_default("database.max_connections", 10)?
            .set_default("database.acquire_timeout_secs", 5)?
            .set_default("database.run_migrations", true)?
            .set_default("articles.default_page_size", 10)?
            .set_default("articles.max_page_size", 100)?
            .set_default(
                "articles.default_img_url",
                "https://grin2b.com/wp-content/uploads/2017/01/Grin2B_icon_NEWS.png",
            )?
            .set_default("articles.delete_policy", "block")?
            .set_default("log.filter", "info")?
            .set_default("log.format", "pretty")?
            .set_override_option("database.url", database_url)?
            .build()?;
        let settings: Self = config.try_deserialize()?;
        settings.articles.validate()?;
        Ok(settings)
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.server.host, self.server.port);
        raw.parse().map_err(|_| ConfigError::Address(raw))
    }
}

impl ArticleSettings {
    /// Both sizes must be at least 1 and the default may not exceed the max.
    fn validate(&self) -> Result<(), ConfigError> {
        let (default, max) = (self.default_page_size, self.max_page_size);
        if default == 0 || max == 0 || default > max {
            return Err(ConfigError::PageSize { default, max });
        }
        Ok(())
    }
}

impl DatabaseSettings {
    pub fn url(&self) -> Result<&SecretString, ConfigError> {
        self.url.as_ref().ok_or(ConfigError::MissingDatabaseUrl)
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}
