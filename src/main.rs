//! Listing Ranker — Binary Entrypoint
//! Boots the Axum HTTP server wiring the ranking engine, routes, and metrics.
//!
//! The binary is a demo shell; the engine itself is a plain in-process library.

use std::path::Path;

use listing_ranker::api::{self, AppState};
use listing_ranker::config::{
    RankingConfig, DEFAULT_PLANS_CONFIG_PATH, ENV_PLANS_CONFIG_PATH,
};
use listing_ranker::engine::RankingEngine;
use listing_ranker::metrics::Metrics;
use listing_ranker::plans::PlanTable;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

/// Plan table from `PLANS_CONFIG_PATH` (default `config/plans.json`); a
/// missing file means the built-in seed, a broken file is a startup error.
fn load_plans() -> anyhow::Result<PlanTable> {
    let path = std::env::var(ENV_PLANS_CONFIG_PATH)
        .unwrap_or_else(|_| DEFAULT_PLANS_CONFIG_PATH.to_string());
    if !Path::new(&path).exists() {
        info!(%path, "plan table not found, using built-in seed");
        return Ok(PlanTable::default_seed());
    }
    let table = PlanTable::load_from_file(&path)?;
    info!(%path, "plan table loaded");
    Ok(table)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    init_tracing();

    let config = RankingConfig::from_env()?;
    let plans = load_plans()?;

    let metrics = Metrics::init(config.mixing.interval, config.location.default_radius_km);

    let engine = RankingEngine::new(plans, config);
    let state = AppState::new(engine);
    let router = api::create_router(state).merge(metrics.router());

    let addr = std::env::var("LISTING_RANKER_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "listing ranker listening");
    axum::serve(listener, router).await?;

    Ok(())
}
