//! Offer-set classification: accepted-offer lookup and reservation totals.
//!
//! Everything here recomputes from the full current offer set each call.
//! Realtime updates may arrive in any order, so derivations never trust
//! incremental deltas.

use rematerial_common::offer::{Offer, OfferStatus};

/// The conversation's current accepted offer, if any.
///
/// At most one accepted offer should exist per conversation. If that
/// invariant is ever violated upstream, the first one in iteration order
/// wins, deterministically.
pub fn accepted_offer(offers: &[Offer]) -> Option<&Offer> {
    offers.iter().find(|o| o.status == OfferStatus::Accepted)
}

/// Total quantity held by accepted-and-reserved offers. Saturates rather
/// than overflowing on implausibly large quantities.
pub fn reserved_total(offers: &[Offer]) -> u32 {
    offers
        .iter()
        .filter(|o| o.is_reserved())
        .fold(0u32, |total, o| {
            total.saturating_add(o.reserved_quantity.unwrap_or(0))
        })
}

/// Quantity still open for reservation, given the product's total
/// inventory and the current full offer set.
pub fn available_quantity(inventory: u32, offers: &[Offer]) -> u32 {
    inventory.saturating_sub(reserved_total(offers))
}
