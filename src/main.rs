//! Retail Waste Analyzer: binary entrypoint.
//! Loads the five retail datasets, trains the regression model inline, then
//! boots the Axum HTTP server. Nothing is served until loading and training
//! finish; a failed load aborts startup entirely.

use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use retail_waste_analyzer::api::{self, AppState};
use retail_waste_analyzer::config::Settings;
use retail_waste_analyzer::dataset::Datasets;
use retail_waste_analyzer::engine::Engine;
use retail_waste_analyzer::metrics::Metrics;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let settings = Settings::load()?;

    // Fatal on any missing or header-less file: there is no partial-startup
    // mode, and nothing is retried.
    let datasets = Datasets::load_from_dir(&settings.data_dir)?;

    let metrics = Metrics::init();

    let engine = Engine::bootstrap(datasets, &settings.training);
    metrics.record_startup(&engine.datasets, &engine.report);

    let mut app = api::router(AppState::new(engine)).merge(metrics.router());
    if let Some(dir) = &settings.static_dir {
        app = api::with_static_fallback(app, dir);
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
