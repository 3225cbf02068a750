//! # Ranking Engine
//! Facade over the score calculator, mixing engine, and analytics reporter.
//! This is the in-process boundary external collaborators call: the search UI
//! goes through `rank`/`sponsored_suggestions`, the owner dashboard through
//! `performance_analytics`.
//!
//! All computation is synchronous and side-effect-free; separate calls are
//! independent and may be parallelized by the caller.

use chrono::{DateTime, Utc};
use metrics::counter;
use tracing::debug;

use crate::analytics::{performance_report, PerformanceReport};
use crate::config::RankingConfig;
use crate::listing::{Listing, RankedListing, RankingContext};
use crate::mixing;
use crate::plans::PlanTable;
use crate::scoring::ScoreCalculator;

pub struct RankingEngine {
    calculator: ScoreCalculator,
}

impl RankingEngine {
    pub fn new(plans: PlanTable, config: RankingConfig) -> Self {
        Self {
            calculator: ScoreCalculator::new(plans, config),
        }
    }

    /// Built-in plan seed and production ranking constants.
    pub fn with_defaults() -> Self {
        Self::new(PlanTable::default_seed(), RankingConfig::default())
    }

    pub fn calculator(&self) -> &ScoreCalculator {
        &self.calculator
    }

    /// Full pipeline: score, sort, interleave, paginate.
    pub fn rank(&self, listings: &[Listing], ctx: &RankingContext) -> Vec<RankedListing> {
        self.rank_at(listings, ctx, Utc::now())
    }

    /// Same as [`rank`](Self::rank) with an explicit clock, for tests and
    /// offline evaluation.
    pub fn rank_at(
        &self,
        listings: &[Listing],
        ctx: &RankingContext,
        now: DateTime<Utc>,
    ) -> Vec<RankedListing> {
        counter!("ranker_rank_calls_total").increment(1);

        let mut ranked: Vec<RankedListing> = listings
            .iter()
            .map(|l| self.calculator.score_listing(l, ctx, now))
            .collect();

        // Descending by score. NaN (from unvalidated coordinates) is allowed
        // to land anywhere, per the reference behavior.
        ranked.sort_by(|a, b| {
            b.ranking_score
                .partial_cmp(&a.ranking_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let interval = self.calculator.config().mixing.interval;
        let mixed = mixing::mix(ranked, interval);

        debug!(
            candidates = listings.len(),
            page = ctx.page,
            page_size = ctx.page_size,
            max_results = ?ctx.max_results,
            "ranked listing batch"
        );

        match ctx.max_results {
            Some(cap) => mixing::truncate(mixed, cap),
            None => mixing::paginate(mixed, ctx.page, ctx.page_size),
        }
    }

    /// Premium picks for e.g. a homepage "sponsored businesses" strip:
    /// pre-filters to tiers that grant sponsored slots, then ranks with
    /// sponsorship enabled and a hard result cap.
    pub fn sponsored_suggestions(&self, listings: &[Listing], count: usize) -> Vec<RankedListing> {
        let now = Utc::now();
        let candidates: Vec<Listing> = listings
            .iter()
            .filter(|l| {
                self.calculator
                    .plans()
                    .grants_sponsored(l.effective_tier(now))
            })
            .cloned()
            .collect();

        let ctx = RankingContext {
            include_sponsored: true,
            ..RankingContext::default()
        }
        .capped(count);

        self.rank_at(&candidates, &ctx, now)
    }

    /// Single-listing, context-neutral report for the owner dashboard.
    pub fn performance_analytics(&self, listing: &Listing) -> PerformanceReport {
        counter!("ranker_analytics_calls_total").increment(1);
        performance_report(&self.calculator, listing, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::SubscriptionTier;
    use chrono::Duration;

    fn engine() -> RankingEngine {
        RankingEngine::with_defaults()
    }

    fn fixture(count: u64, now: DateTime<Utc>) -> Vec<Listing> {
        (1..=count)
            .map(|id| {
                let tier = match id % 4 {
                    0 => SubscriptionTier::Tier3,
                    1 => SubscriptionTier::Tier2,
                    _ => SubscriptionTier::None,
                };
                Listing::new(id, format!("Business {id}"))
                    .with_category("restaurant")
                    .with_tier(tier)
                    .updated(now - Duration::days(id as i64))
            })
            .collect()
    }

    #[test]
    fn rank_returns_first_page_by_default() {
        let now = Utc::now();
        let listings = fixture(30, now);
        let out = engine().rank_at(&listings, &RankingContext::default(), now);
        assert_eq!(out.len(), 20);
    }

    #[test]
    fn out_of_range_page_is_empty() {
        let now = Utc::now();
        let listings = fixture(10, now);
        let ctx = RankingContext::default().page(5, 20);
        assert!(engine().rank_at(&listings, &ctx, now).is_empty());
    }

    #[test]
    fn max_results_cap_wins_over_paging() {
        let now = Utc::now();
        let listings = fixture(30, now);
        let ctx = RankingContext::default().capped(7);
        assert_eq!(engine().rank_at(&listings, &ctx, now).len(), 7);
    }

    #[test]
    fn sponsored_suggestions_only_contain_slot_granting_tiers() {
        let e = engine();
        let now = Utc::now();
        let listings = fixture(40, now);
        let out = e.sponsored_suggestions(&listings, 5);
        assert!(out.len() <= 5);
        assert!(!out.is_empty());
        for r in &out {
            assert!(matches!(
                r.listing.tier,
                SubscriptionTier::Tier2 | SubscriptionTier::Tier3
            ));
        }
    }

    #[test]
    fn analytics_round_trips_through_the_same_scorer() {
        let e = engine();
        let l = Listing::new(1, "Solo").with_gallery(1);
        let report = e.performance_analytics(&l);
        let direct = e
            .calculator()
            .score_listing(&l, &RankingContext::default(), Utc::now());
        assert!((report.score - direct.ranking_score).abs() < 1e-3);
    }
}
