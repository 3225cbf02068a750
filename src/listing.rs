//! listing.rs — Core data model: listings, subscription tiers, the per-call
//! ranking context, and the derived ranked/annotated output shapes.
//!
//! Listings are owned by an external content subsystem; everything derived here
//! (FactorSet, RankedListing) is call-scoped and never cached by listing id —
//! scoring depends on the caller's context and the current calendar month.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// Subscription tier assigned by the external billing subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    None,
    Tier1,
    Tier2,
    Tier3,
}

impl SubscriptionTier {
    /// Canonical config key ("none", "tier1", ...), used by the plan table.
    pub fn key(&self) -> &'static str {
        match self {
            SubscriptionTier::None => "none",
            SubscriptionTier::Tier1 => "tier1",
            SubscriptionTier::Tier2 => "tier2",
            SubscriptionTier::Tier3 => "tier3",
        }
    }
}

/// A single customer review. Count is implicit in the collection length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub rating: f32,
}

/// A business directory entry (external, read-only snapshot).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<Coordinate>,
    #[serde(default)]
    pub gallery_size: u32,
    #[serde(default)]
    pub verified: bool,
    pub tier: SubscriptionTier,
    /// Expiry of the paid tier; in the past → treated as tier `none`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier_expires_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
}

impl Listing {
    /// Minimal listing: free tier, just updated, no extras. Builder methods fill
    /// in the rest (handy in tests and fixtures).
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            category: String::new(),
            tags: Vec::new(),
            coordinate: None,
            gallery_size: 0,
            verified: false,
            tier: SubscriptionTier::None,
            tier_expires_at: None,
            updated_at: Utc::now(),
            reviews: Vec::new(),
            website: None,
            phone: None,
            opening_hours: None,
        }
    }

    pub fn with_description(mut self, d: impl Into<String>) -> Self {
        self.description = d.into();
        self
    }

    pub fn with_category(mut self, c: impl Into<String>) -> Self {
        self.category = c.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tier(mut self, tier: SubscriptionTier) -> Self {
        self.tier = tier;
        self
    }

    pub fn with_tier_expiry(mut self, at: DateTime<Utc>) -> Self {
        self.tier_expires_at = Some(at);
        self
    }

    pub fn at(mut self, lat: f64, lon: f64) -> Self {
        self.coordinate = Some(Coordinate { lat, lon });
        self
    }

    pub fn updated(mut self, at: DateTime<Utc>) -> Self {
        self.updated_at = at;
        self
    }

    pub fn verified(mut self, v: bool) -> Self {
        self.verified = v;
        self
    }

    pub fn with_gallery(mut self, images: u32) -> Self {
        self.gallery_size = images;
        self
    }

    pub fn with_reviews<I: IntoIterator<Item = f32>>(mut self, ratings: I) -> Self {
        self.reviews = ratings.into_iter().map(|rating| Review { rating }).collect();
        self
    }

    pub fn with_website(mut self, url: impl Into<String>) -> Self {
        self.website = Some(url.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_opening_hours(mut self, hours: impl Into<String>) -> Self {
        self.opening_hours = Some(hours.into());
        self
    }

    pub fn review_count(&self) -> usize {
        self.reviews.len()
    }

    /// Mean rating, or `None` with no reviews.
    pub fn mean_rating(&self) -> Option<f32> {
        if self.reviews.is_empty() {
            return None;
        }
        let sum: f32 = self.reviews.iter().map(|r| r.rating).sum();
        Some(sum / self.reviews.len() as f32)
    }

    /// Effective tier after expiry: a lapsed subscription counts as `none`
    /// regardless of the stored value.
    pub fn effective_tier(&self, now: DateTime<Utc>) -> SubscriptionTier {
        match self.tier_expires_at {
            Some(expiry) if expiry < now => SubscriptionTier::None,
            _ => self.tier,
        }
    }
}

/// Per-call search/browse context. Built by the caller, discarded after the call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Searcher position; absent → location factor stays neutral.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub near: Option<Coordinate>,
    /// Search radius in km around `near` (engine default applies when absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius_km: Option<f64>,
    /// 1-based page number.
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Hard cap on total results; applied instead of paging when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_results: Option<usize>,
    /// When false, sponsored-slot boosts are not applied for this call.
    #[serde(default = "default_true")]
    pub include_sponsored: bool,
}

fn default_page() -> usize {
    1
}
fn default_page_size() -> usize {
    20
}
fn default_true() -> bool {
    true
}

impl Default for RankingContext {
    fn default() -> Self {
        Self {
            query: None,
            category: None,
            near: None,
            radius_km: None,
            page: 1,
            page_size: default_page_size(),
            max_results: None,
            include_sponsored: true,
        }
    }
}

impl RankingContext {
    pub fn with_query(mut self, q: impl Into<String>) -> Self {
        self.query = Some(q.into());
        self
    }

    pub fn with_category(mut self, c: impl Into<String>) -> Self {
        self.category = Some(c.into());
        self
    }

    pub fn near(mut self, lat: f64, lon: f64, radius_km: f64) -> Self {
        self.near = Some(Coordinate { lat, lon });
        self.radius_km = Some(radius_km);
        self
    }

    pub fn page(mut self, page: usize, page_size: usize) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }

    pub fn capped(mut self, max_results: usize) -> Self {
        self.max_results = Some(max_results);
        self
    }
}

/// The six independent factors; 1.0 is neutral for each.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorSet {
    pub subscription_boost: f32,
    pub sponsored_boost: f32,
    pub relevance_score: f32,
    pub location_boost: f32,
    pub quality_score: f32,
    pub recency_boost: f32,
}

impl Default for FactorSet {
    fn default() -> Self {
        Self {
            subscription_boost: 1.0,
            sponsored_boost: 1.0,
            relevance_score: 1.0,
            location_boost: 1.0,
            quality_score: 1.0,
            recency_boost: 1.0,
        }
    }
}

impl FactorSet {
    /// Display/interleaving hint: commercially boosted enough to be treated as
    /// promoted. Never fed back into the score itself.
    pub fn promoted(&self) -> bool {
        self.sponsored_boost > 1.0 || self.subscription_boost > 1.5
    }
}

/// A listing annotated with its factors and final weighted score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedListing {
    pub listing: Listing,
    pub factors: FactorSet,
    pub ranking_score: f32,
    pub is_promoted: bool,
}

/// Month index used by the sponsorship oracle: months since year 0, so the
/// answer changes at every calendar month boundary.
pub fn month_index(now: DateTime<Utc>) -> u32 {
    now.year() as u32 * 12 + now.month0()
}
