//! api.rs — Thin HTTP shell over the ranking engine for the demo binary and
//! integration tests. The real boundary is the in-process [`RankingEngine`]
//! facade; these handlers only deserialize a request, call it, and serialize
//! the result.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tower_http::cors::CorsLayer;

use crate::analytics::PerformanceReport;
use crate::engine::RankingEngine;
use crate::listing::{Listing, RankedListing, RankingContext};

#[derive(Clone)]
pub struct AppState {
    engine: Arc<RankingEngine>,
}

impl AppState {
    pub fn new(engine: RankingEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/rank", post(rank))
        .route("/sponsored", post(sponsored))
        .route("/analytics/{id}", post(analytics))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Candidate listings plus the per-call search context. Candidates are assumed
/// already filtered by something simpler upstream.
#[derive(Deserialize)]
struct RankReq {
    listings: Vec<Listing>,
    #[serde(default)]
    context: Option<RankingContext>,
}

async fn rank(State(state): State<AppState>, Json(body): Json<RankReq>) -> Json<Vec<RankedListing>> {
    let ctx = body.context.unwrap_or_default();
    Json(state.engine.rank(&body.listings, &ctx))
}

#[derive(Deserialize)]
struct SponsoredQuery {
    #[serde(default = "default_count")]
    count: usize,
}

fn default_count() -> usize {
    5
}

async fn sponsored(
    State(state): State<AppState>,
    Query(q): Query<SponsoredQuery>,
    Json(listings): Json<Vec<Listing>>,
) -> Json<Vec<RankedListing>> {
    Json(state.engine.sponsored_suggestions(&listings, q.count))
}

/// The path id must match the posted listing; the engine itself is stateless
/// and never looks listings up by id.
async fn analytics(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(listing): Json<Listing>,
) -> Result<Json<PerformanceReport>, StatusCode> {
    if listing.id != id {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(Json(state.engine.performance_analytics(&listing)))
}
