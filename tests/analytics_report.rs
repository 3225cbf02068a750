// tests/analytics_report.rs
//
// Owner-facing report behavior through the public facade.

use chrono::{Duration, Utc};
use listing_ranker::{Listing, PerformanceLabel, RankingEngine, SubscriptionTier};

fn engine() -> RankingEngine {
    RankingEngine::with_defaults()
}

#[test]
fn weak_free_listing_gets_the_full_suggestion_list() {
    let now = Utc::now();
    let l = Listing::new(11, "Quiet Kiosk")
        .with_gallery(1)
        .with_reviews([3.0, 4.0])
        .updated(now - Duration::days(14));

    let report = engine().performance_analytics(&l);

    assert!(matches!(
        report.label,
        PerformanceLabel::Low | PerformanceLabel::Average
    ));
    let joined = report.suggestions.join(" | ");
    assert!(joined.contains("subscription tier"), "{joined}");
    assert!(joined.contains("photos"), "{joined}");
    assert!(joined.contains("review"), "{joined}");
    assert!(joined.contains("Verify"), "{joined}");
}

#[test]
fn suggestions_keep_their_fixed_order() {
    let l = Listing::new(12, "Bare Listing");
    let report = engine().performance_analytics(&l);
    let idx = |needle: &str| {
        report
            .suggestions
            .iter()
            .position(|s| s.contains(needle))
            .unwrap_or(usize::MAX)
    };
    assert!(idx("subscription tier") < idx("photos"));
    assert!(idx("photos") < idx("review"));
    assert!(idx("review") < idx("Verify"));
}

#[test]
fn higher_tier_and_quality_raise_the_label() {
    let now = Utc::now();
    let weak = Listing::new(1, "Weak").updated(now - Duration::days(200));
    let strong = Listing::new(2, "Strong")
        .with_tier(SubscriptionTier::Tier3)
        .verified(true)
        .with_gallery(6)
        .with_reviews([4.8, 4.9, 4.7, 5.0, 4.8])
        .updated(now - Duration::days(1));

    let e = engine();
    let weak_report = e.performance_analytics(&weak);
    let strong_report = e.performance_analytics(&strong);
    assert!(strong_report.score > weak_report.score + 0.5);
}

#[test]
fn competitor_context_mentions_the_own_tier() {
    let l = Listing::new(3, "Mid").with_tier(SubscriptionTier::Tier2);
    let report = engine().performance_analytics(&l);
    assert!(report.competitor_context.contains("Tier 2"));
}
