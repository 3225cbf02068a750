//! analytics.rs — Owner-facing performance report.
//!
//! Reuses the Score Calculator with a context-neutral default (no query, no
//! category, no searcher position), so the number an owner sees is the same
//! scalar the ranking pipeline sorts by, minus any per-search influence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::listing::{Listing, RankingContext, SubscriptionTier};
use crate::scoring::ScoreCalculator;

/// Five-level qualitative label over the weighted score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceLabel {
    Excellent,
    VeryGood,
    Good,
    Average,
    Low,
}

impl PerformanceLabel {
    fn from_score(score: f32) -> Self {
        if score >= 2.5 {
            Self::Excellent
        } else if score >= 2.0 {
            Self::VeryGood
        } else if score >= 1.5 {
            Self::Good
        } else if score >= 1.2 {
            Self::Average
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::VeryGood => "Very good",
            Self::Good => "Good",
            Self::Average => "Average",
            Self::Low => "Low",
        }
    }
}

/// Report returned to a listing owner's dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub score: f32,
    pub label: PerformanceLabel,
    /// Ordered improvement suggestions; all triggered ones are included.
    pub suggestions: Vec<String>,
    /// Informational sentence about expected position vs. other tiers. Fixed
    /// text per tier, not computed from live competitor data.
    pub competitor_context: String,
}

/// Score the listing context-neutrally and map it to an owner report.
pub fn performance_report(
    calc: &ScoreCalculator,
    listing: &Listing,
    now: DateTime<Utc>,
) -> PerformanceReport {
    let ranked = calc.score_listing(listing, &RankingContext::default(), now);
    let f = &ranked.factors;

    let mut suggestions = Vec::new();
    if f.subscription_boost <= 1.3 {
        suggestions.push(
            "Upgrade your subscription tier to rank higher in search results.".to_string(),
        );
    }
    if f.quality_score < 1.3 {
        suggestions.push(
            "Add more photos and complete your business information (website, phone, opening hours)."
                .to_string(),
        );
    }
    if listing.review_count() < 5 {
        suggestions.push("Ask satisfied customers to leave a review.".to_string());
    }
    if !listing.verified {
        suggestions.push("Verify your listing to gain a quality boost.".to_string());
    }
    if suggestions.is_empty() {
        suggestions.push("Your listing is well optimized.".to_string());
    }

    PerformanceReport {
        score: ranked.ranking_score,
        label: PerformanceLabel::from_score(ranked.ranking_score),
        suggestions,
        competitor_context: competitor_context(listing.effective_tier(now)),
    }
}

fn competitor_context(tier: SubscriptionTier) -> String {
    match tier {
        SubscriptionTier::None => {
            "Free listings typically appear below all paid tiers for comparable relevance."
        }
        SubscriptionTier::Tier1 => {
            "Tier 1 listings typically outrank free listings but sit below Tier 2 and Tier 3."
        }
        SubscriptionTier::Tier2 => {
            "Tier 2 listings typically outrank free and Tier 1 listings and compete with Tier 3 on quality."
        }
        SubscriptionTier::Tier3 => {
            "Tier 3 listings typically hold the strongest positions, ahead of all lower tiers."
        }
    }
    .to_string()
}
