// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod analytics;
pub mod api;
pub mod config;
pub mod engine;
pub mod geo;
pub mod listing;
pub mod metrics;
pub mod mixing;
pub mod plans;
pub mod scoring;
pub mod sponsorship;

// ---- Re-exports for stable public API ----
pub use crate::analytics::{PerformanceLabel, PerformanceReport};
pub use crate::engine::RankingEngine;
pub use crate::listing::{
    FactorSet, Listing, RankedListing, RankingContext, Review, SubscriptionTier,
};
