//! # Score Calculator
//! Pure, testable logic that maps `(listing, context, now)` → `RankedListing`.
//! No I/O, suitable for unit tests and offline evaluation.
//!
//! Six independent factors (1.0 = neutral each) are combined into one weighted
//! scalar. Weights are fixed per engine instance and sum to 1.0, so scores are
//! comparable across calls and over time. Missing optional input never errors;
//! it degrades to a neutral factor.

use chrono::{DateTime, Utc};

use crate::config::RankingConfig;
use crate::geo::{haversine_km, Coordinate};
use crate::listing::{month_index, FactorSet, Listing, RankedListing, RankingContext};
use crate::plans::PlanTable;
use crate::sponsorship;

/// Relevance and quality are capped so no single organic factor can run away.
const ORGANIC_FACTOR_CAP: f32 = 2.0;

pub struct ScoreCalculator {
    plans: PlanTable,
    config: RankingConfig,
}

impl ScoreCalculator {
    /// The plan table is a required dependency: configuration problems surface
    /// here instead of being masked by a lazy in-calculator fallback.
    pub fn new(plans: PlanTable, config: RankingConfig) -> Self {
        Self { plans, config }
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    pub fn plans(&self) -> &PlanTable {
        &self.plans
    }

    /// Compute all six factors and the weighted score for one listing.
    pub fn score_listing(
        &self,
        listing: &Listing,
        ctx: &RankingContext,
        now: DateTime<Utc>,
    ) -> RankedListing {
        let factors = FactorSet {
            subscription_boost: self.subscription_boost(listing, now),
            sponsored_boost: self.sponsored_boost(listing, ctx, now),
            relevance_score: self.relevance_score(listing, ctx),
            location_boost: self.location_boost(listing, ctx),
            quality_score: self.quality_score(listing),
            recency_boost: self.recency_boost(listing, now),
        };

        RankedListing {
            listing: listing.clone(),
            is_promoted: factors.promoted(),
            ranking_score: self.combine(&factors),
            factors,
        }
    }

    /// Weighted sum over the factor set.
    pub fn combine(&self, f: &FactorSet) -> f32 {
        let w = &self.config.weights;
        f.subscription_boost * w.subscription
            + f.sponsored_boost * w.sponsored
            + f.relevance_score * w.relevance
            + f.location_boost * w.location
            + f.quality_score * w.quality
            + f.recency_boost * w.recency
    }

    fn subscription_boost(&self, listing: &Listing, now: DateTime<Utc>) -> f32 {
        self.plans.boost_for(listing.effective_tier(now))
    }

    fn sponsored_boost(&self, listing: &Listing, ctx: &RankingContext, now: DateTime<Utc>) -> f32 {
        if !ctx.include_sponsored {
            return 1.0;
        }
        let tier = listing.effective_tier(now);
        if self.plans.grants_sponsored(tier)
            && sponsorship::consumes_slot(listing.id, month_index(now))
        {
            self.config.sponsorship.boost
        } else {
            1.0
        }
    }

    fn relevance_score(&self, listing: &Listing, ctx: &RankingContext) -> f32 {
        let mut score = 1.0f32;

        if let Some(cat) = &ctx.category {
            if listing.category.eq_ignore_ascii_case(cat) {
                score += 0.5;
            }
        }

        if let Some(q) = ctx.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            let q = q.to_lowercase();
            if listing.title.to_lowercase().contains(&q) {
                score += 0.4;
            }
            if listing.description.to_lowercase().contains(&q) {
                score += 0.2;
            }
            if listing.tags.iter().any(|t| t.to_lowercase().contains(&q)) {
                score += 0.1;
            }
        }

        score.min(ORGANIC_FACTOR_CAP)
    }

    fn location_boost(&self, listing: &Listing, ctx: &RankingContext) -> f32 {
        let (searcher, here): (Coordinate, Coordinate) = match (ctx.near, listing.coordinate) {
            (Some(s), Some(l)) => (s, l),
            // No searcher position (or listing has none): stay neutral.
            _ => return 1.0,
        };

        let radius = ctx
            .radius_km
            .unwrap_or(self.config.location.default_radius_km);
        let distance = haversine_km(searcher, here);

        if distance > radius {
            // Outside the radius: suppressed, not excluded.
            self.config.location.out_of_radius_factor
        } else {
            // Linear ramp from 1.0 at the radius edge up to 1.5 at zero distance.
            1.0 + 0.5 * (1.0 - distance / radius) as f32
        }
    }

    fn quality_score(&self, listing: &Listing) -> f32 {
        let mut score = 1.0f32;

        if listing.verified {
            score += 0.2;
        }

        if listing.gallery_size >= 5 {
            score += 0.2;
        } else if listing.gallery_size >= 3 {
            score += 0.1;
        }

        if listing.review_count() >= 1 {
            score += 0.1;
            match listing.mean_rating() {
                Some(avg) if avg >= 4.5 => score += 0.2,
                Some(avg) if avg >= 4.0 => score += 0.1,
                _ => {}
            }
        }

        if listing.website.is_some() {
            score += 0.05;
        }
        if listing.phone.is_some() {
            score += 0.05;
        }
        if listing
            .opening_hours
            .as_deref()
            .is_some_and(|h| !h.trim().is_empty())
        {
            score += 0.05;
        }

        score.min(ORGANIC_FACTOR_CAP)
    }

    fn recency_boost(&self, listing: &Listing, now: DateTime<Utc>) -> f32 {
        let days = (now - listing.updated_at).num_days();
        if days <= 7 {
            1.3
        } else if days <= 30 {
            1.1
        } else if days <= 90 {
            1.0
        } else {
            0.9
        }
    }
}
