//! Resets the database to a known dataset.
//!
//! Usage: `seed [path/to/dataset.json]`. Without a path the bundled
//! development dataset is loaded.

use anyhow::Context;
use configs::Settings;
use secrecy::ExposeSecret;
use storage_adapters::{PgStore, SeedData};
use tracing_subscriber::EnvFilter;

const DEV_DATASET: &str = include_str!("../data/dev.json");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("loading configuration")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log.filter)),
        )
        .init();

    let raw = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?,
        None => DEV_DATASET.to_string(),
    };
    let data = SeedData::from_json(&raw).context("parsing dataset")?;

    let store = PgStore::connect(
        settings.database.url()?.expose_secret(),
        1,
        settings.database.acquire_timeout(),
    )
    .await
    .context("connecting to postgres")?;
    store.migrate().await.context("running migrations")?;

    storage_adapters::seed(store.pool(), &data)
        .await
        .context("seeding database")?;
    Ok(())
}
