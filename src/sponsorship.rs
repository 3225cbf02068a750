//! sponsorship.rs — Monthly sponsored-slot oracle.
//!
//! Decides, per listing per calendar month, whether the listing consumes one of
//! its plan's sponsored-slot credits. Stands in for a real allocation ledger:
//! the answer is a deterministic digest of `(listing_id, month)`, stable within
//! a month and reshuffled at every month boundary.
//!
//! Known gap: this placeholder does not track actual quota consumption and
//! cannot guarantee at-most-N promotions per tier per month. Replace with an
//! explicit ledger (one record per listing per month, decremented against the
//! plan quota) before relying on it for commercial guarantees.

use sha2::{Digest, Sha256};

/// Fraction of (listing, month) pairs that win a slot: one in three.
const SLOT_MODULUS: u64 = 3;

fn slot_digest(listing_id: u64, month: u32) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(listing_id.to_be_bytes());
    hasher.update(month.to_be_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

/// Whether the listing consumes a sponsored slot in the given month.
///
/// Only meaningful for listings whose plan grants at least one slot per month;
/// the caller gates on the plan quota before asking.
pub fn consumes_slot(listing_id: u64, month: u32) -> bool {
    slot_digest(listing_id, month) % SLOT_MODULUS == 0
}
