use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod db;
mod domain;
mod http;
mod mailer;
mod metrics;
mod models;
mod utils;

use config::Config;
use db::PgStore;
use domain::order::workflow::OrderWorkflow;
use mailer::SmtpMailer;
use metrics::Metrics;
use utils::{retry_with_backoff, RetryConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging with environment-based filtering
    // Default to INFO level, can be overridden with RUST_LOG env var
    // Example: RUST_LOG=debug cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,shop_checkout=debug")),
        )
        .init();

    tracing::info!("🚀 Starting checkout service");

    let config = Config::from_env();

    // === 1. Connect to PostgreSQL (retried: the database may still be coming up) ===
    tracing::info!("Connecting to PostgreSQL...");
    let pool = retry_with_backoff(RetryConfig::default(), |_attempt| {
        let url = config.database_url.clone();
        async move { PgPoolOptions::new().max_connections(5).connect(&url).await }
    })
    .await
    .map_err(|e| anyhow::anyhow!("database connection failed: {e}"))?;

    let store = PgStore::new(pool);
    store.init_schema().await?;

    // === 2. Initialize Prometheus metrics ===
    let metrics = Arc::new(Metrics::new()?);
    tracing::info!(
        "📊 Metrics registry created with {} metrics",
        metrics.registry().gather().len()
    );

    // === 3. Notification collaborator ===
    let smtp_mailer = SmtpMailer::new(config.smtp.clone())
        .map_err(|e| anyhow::anyhow!("mailer configuration invalid: {e}"))?;

    // === 4. Wire the checkout workflow and serve ===
    let workflow = OrderWorkflow::new(Arc::new(store), Arc::new(smtp_mailer), metrics.clone());

    http::run_server(workflow, metrics, &config.bind_addr).await?;

    Ok(())
}
