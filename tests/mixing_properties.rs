// tests/mixing_properties.rs
//
// Property-style checks of the interleaving engine over randomized inputs.

use listing_ranker::mixing::mix;
use listing_ranker::{FactorSet, Listing, RankedListing};
use rand::Rng;

fn ranked(id: u64, score: f32, promoted: bool) -> RankedListing {
    let factors = FactorSet {
        sponsored_boost: if promoted { 3.0 } else { 1.0 },
        ..FactorSet::default()
    };
    RankedListing {
        listing: Listing::new(id, format!("L{id}")),
        is_promoted: promoted,
        ranking_score: score,
        factors,
    }
}

/// Score-sorted (descending) random input with roughly `promoted_share`
/// promoted items.
fn random_sorted(len: usize, promoted_share: f64) -> Vec<RankedListing> {
    let mut rng = rand::rng();
    (0..len)
        .map(|i| {
            ranked(
                i as u64,
                len as f32 - i as f32,
                rng.random_bool(promoted_share),
            )
        })
        .collect()
}

#[test]
fn mix_is_always_a_permutation() {
    for len in [0usize, 1, 2, 3, 4, 7, 20, 100] {
        let input = random_sorted(len, 0.3);
        let mut before: Vec<u64> = input.iter().map(|r| r.listing.id).collect();
        let out = mix(input, 3);
        let mut after: Vec<u64> = out.iter().map(|r| r.listing.id).collect();
        before.sort_unstable();
        after.sort_unstable();
        assert_eq!(before, after, "len={len}");
    }
}

#[test]
fn inputs_of_three_or_fewer_are_unchanged() {
    for len in 0..=3usize {
        let input = random_sorted(len, 0.5);
        let before: Vec<u64> = input.iter().map(|r| r.listing.id).collect();
        let after: Vec<u64> = mix(input, 3).iter().map(|r| r.listing.id).collect();
        assert_eq!(before, after);
    }
}

#[test]
fn reserved_slots_are_promoted_while_promoted_items_remain() {
    for _ in 0..20 {
        let input = random_sorted(30, 0.25);
        let promoted_total = input.iter().filter(|r| r.is_promoted).count();
        let organic_total = input.len() - promoted_total;
        if promoted_total == 0 || organic_total == 0 {
            continue;
        }

        let out = mix(input, 3);
        let mut promoted_left = promoted_total;
        let mut organic_left = organic_total;
        for (i, r) in out.iter().enumerate() {
            let reserved = (i + 1) % 3 == 0;
            if reserved && promoted_left > 0 {
                assert!(
                    r.is_promoted,
                    "1-based position {} must be promoted while {} promoted remain",
                    i + 1,
                    promoted_left
                );
            }
            if r.is_promoted {
                promoted_left -= 1;
            } else {
                organic_left -= 1;
            }
        }
        assert_eq!(promoted_left, 0);
        assert_eq!(organic_left, 0);
    }
}

#[test]
fn all_promoted_input_survives_intact() {
    let input: Vec<RankedListing> = (0..10).map(|i| ranked(i, 10.0 - i as f32, true)).collect();
    let out = mix(input, 3);
    let ids: Vec<u64> = out.iter().map(|r| r.listing.id).collect();
    assert_eq!(ids, (0..10).collect::<Vec<u64>>());
}
