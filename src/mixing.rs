//! mixing.rs — Anti-saturation interleaving of promoted and organic listings.
//!
//! A raw score sort would let subscription/sponsorship boosts dominate the top
//! of every result set. Bounded-density interleaving keeps organic listings
//! visible near the top while paying listings still land reliably higher than
//! unboosted ones: promoted items are drained into every `interval`-th output
//! slot, organic items fill the rest, both streams keeping their internal score
//! order.

use std::collections::VecDeque;

use crate::listing::RankedListing;

/// Interleave a score-sorted (descending) sequence so at most one in
/// `interval` consecutive slots is reserved for promoted content.
///
/// Output is always a permutation of the input. Inputs of `interval` items or
/// fewer are returned unchanged — mixing has no visible effect at that size.
pub fn mix(ranked: Vec<RankedListing>, interval: usize) -> Vec<RankedListing> {
    if interval == 0 || ranked.len() <= interval {
        return ranked;
    }

    let mut promoted: VecDeque<RankedListing> = VecDeque::new();
    let mut organic: VecDeque<RankedListing> = VecDeque::new();
    for r in ranked {
        if r.is_promoted {
            promoted.push_back(r);
        } else {
            organic.push_back(r);
        }
    }

    let total = promoted.len() + organic.len();
    let mut out = Vec::with_capacity(total);

    for i in 0..total {
        let reserved = (i + 1) % interval == 0;
        let next = if reserved && !promoted.is_empty() {
            promoted.pop_front()
        } else if !organic.is_empty() {
            organic.pop_front()
        } else {
            // Organic exhausted: fall back to the promoted stream.
            promoted.pop_front()
        };
        match next {
            Some(r) => out.push(r),
            None => break,
        }
    }

    out
}

/// 1-based pagination: slice `[(page-1)*size, page*size)`. An out-of-range
/// page yields an empty vector; no clamping.
pub fn paginate(ranked: Vec<RankedListing>, page: usize, page_size: usize) -> Vec<RankedListing> {
    if page == 0 || page_size == 0 {
        return Vec::new();
    }
    let start = (page - 1) * page_size;
    if start >= ranked.len() {
        return Vec::new();
    }
    ranked
        .into_iter()
        .skip(start)
        .take(page_size)
        .collect()
}

/// Cap the result list to at most `max_results` items.
pub fn truncate(mut ranked: Vec<RankedListing>, max_results: usize) -> Vec<RankedListing> {
    ranked.truncate(max_results);
    ranked
}
