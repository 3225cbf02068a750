//! # Plan Table
//!
//! Immutable mapping from subscription tier to its commercial parameters:
//! the score boost applied by the subscription factor and the number of
//! monthly sponsored-slot credits the plan grants.
//!
//! - Loads from JSON config (`config/plans.json` by default).
//! - Ships a built-in `default_seed()` with the standard tier ladder.
//! - Loading errors are surfaced (`anyhow::Result`), not masked with a silent
//!   fallback; callers decide whether to fall back to the seed.
//!
//! The table is initialized once at startup and never mutated at runtime.

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::{collections::HashMap, fs, path::Path};

use crate::listing::SubscriptionTier;

/// Built-in ladder, constructed once; `default_seed()` hands out clones.
static SEED: Lazy<PlanTable> = Lazy::new(|| {
    let mut plans = HashMap::new();
    for (key, boost, sponsored_slots) in [
        ("none", 1.0, 0),
        ("tier1", 1.3, 0),
        ("tier2", 1.8, 1),
        ("tier3", 2.5, 2),
    ] {
        plans.insert(
            key.to_string(),
            Plan {
                boost,
                sponsored_slots,
            },
        );
    }
    PlanTable { plans }
});

/// Commercial parameters of one subscription plan.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Plan {
    /// Multiplier used as the subscription factor (1.0 = free tier).
    pub boost: f32,
    /// Monthly sponsored-slot credits; 0 = plan never sponsors.
    #[serde(default)]
    pub sponsored_slots: u32,
}

/// Tier → plan lookup, keyed by canonical tier names ("none", "tier1", ...).
#[derive(Debug, Clone, Deserialize)]
pub struct PlanTable {
    plans: HashMap<String, Plan>,
}

impl PlanTable {
    /// Load the table from a JSON file. Unknown tiers in the file are kept but
    /// unreachable; missing tiers resolve to the free plan at lookup time.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let data = fs::read_to_string(path.as_ref())?;
        let table: PlanTable = serde_json::from_str(&data)?;
        Ok(table)
    }

    /// Built-in tier ladder matching the production defaults.
    pub fn default_seed() -> Self {
        SEED.clone()
    }

    fn plan_for(&self, tier: SubscriptionTier) -> Plan {
        self.plans.get(tier.key()).copied().unwrap_or(Plan {
            boost: 1.0,
            sponsored_slots: 0,
        })
    }

    /// Subscription-factor multiplier for a tier.
    pub fn boost_for(&self, tier: SubscriptionTier) -> f32 {
        self.plan_for(tier).boost
    }

    /// Monthly sponsored-slot quota for a tier.
    pub fn sponsored_slots(&self, tier: SubscriptionTier) -> u32 {
        self.plan_for(tier).sponsored_slots
    }

    /// Whether the tier grants at least one sponsored slot per month.
    pub fn grants_sponsored(&self, tier: SubscriptionTier) -> bool {
        self.sponsored_slots(tier) >= 1
    }
}

impl Default for PlanTable {
    fn default() -> Self {
        Self::default_seed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_matches_tier_ladder() {
        let t = PlanTable::default_seed();
        assert!((t.boost_for(SubscriptionTier::None) - 1.0).abs() < 1e-6);
        assert!((t.boost_for(SubscriptionTier::Tier1) - 1.3).abs() < 1e-6);
        assert!((t.boost_for(SubscriptionTier::Tier2) - 1.8).abs() < 1e-6);
        assert!((t.boost_for(SubscriptionTier::Tier3) - 2.5).abs() < 1e-6);
    }

    #[test]
    fn sponsored_slots_start_at_tier2() {
        let t = PlanTable::default_seed();
        assert!(!t.grants_sponsored(SubscriptionTier::None));
        assert!(!t.grants_sponsored(SubscriptionTier::Tier1));
        assert!(t.grants_sponsored(SubscriptionTier::Tier2));
        assert_eq!(t.sponsored_slots(SubscriptionTier::Tier3), 2);
    }

    #[test]
    fn missing_tier_resolves_to_free_plan() {
        let t: PlanTable = serde_json::from_str(r#"{"plans":{"tier3":{"boost":2.5}}}"#).unwrap();
        assert!((t.boost_for(SubscriptionTier::Tier1) - 1.0).abs() < 1e-6);
        assert_eq!(t.sponsored_slots(SubscriptionTier::Tier3), 0);
    }

    #[test]
    fn load_from_file_surfaces_errors() {
        assert!(PlanTable::load_from_file("definitely/not/here.json").is_err());
    }
}
