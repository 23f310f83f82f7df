//! # Newsdesk Binary
//!
//! Assembles the application: settings, logging, the Postgres store, the
//! services and the HTTP router.

use std::sync::Arc;

use anyhow::Context;
use api_adapters::{build_router, AppState, Metrics};
use configs::{DeletePolicySetting, LogFormat, LogSettings, Settings};
use domains::{DeletePolicy, PageBounds};
use secrecy::ExposeSecret;
use services::{ArticleOptions, ArticleService, CommentService, TopicService, UserService};
use storage_adapters::PgStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("loading configuration")?;
    init_tracing(&settings.log);

    let store = PgStore::connect(
        settings.database.url()?.expose_secret(),
        settings.database.max_connections,
        settings.database.acquire_timeout(),
    )
    .await
    .context("connecting to postgres")?;

    if settings.database.run_migrations {
        store.migrate().await.context("running migrations")?;
        tracing::info!("migrations applied");
    }

    let state = app_state(Arc::new(store), &settings);
    let app = build_router(state);

    let addr = settings.listen_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "newsdesk listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("newsdesk stopped");
    Ok(())
}

fn app_state(store: Arc<PgStore>, settings: &Settings) -> AppState {
    let options = ArticleOptions {
        bounds: PageBounds {
            default_limit: settings.articles.default_page_size,
            max_limit: settings.articles.max_page_size,
        },
        default_img_url: settings.articles.default_img_url.clone(),
        delete_policy: match settings.articles.delete_policy {
            DeletePolicySetting::Block => DeletePolicy::Block,
            DeletePolicySetting::Cascade => DeletePolicy::Cascade,
        },
    };

    AppState {
        topics: Arc::new(TopicService::new(store.clone())),
        articles: Arc::new(ArticleService::new(store.clone(), store.clone(), options)),
        comments: Arc::new(CommentService::new(store.clone(), store.clone())),
        users: Arc::new(UserService::new(store)),
        metrics: Arc::new(Metrics::new()),
    }
}

fn init_tracing(log: &LogSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.filter));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match log.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
