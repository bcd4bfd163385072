//! Derived reservation state for the accepted offer.

use serde::{Deserialize, Serialize};

use rematerial_common::currency::format_eur;
use rematerial_common::offer::Offer;
use rematerial_common::product::Product;

/// How much of the product's stock a reservation consumes, as a UI tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityTier {
    Low,
    Moderate,
    Elevated,
    High,
}

impl SeverityTier {
    /// Tier for a reservation percentage: up to 25 low, up to 50 moderate,
    /// up to 75 elevated, above that high. Boundaries are inclusive on the
    /// lower tier.
    pub fn from_percentage(percentage: f64) -> SeverityTier {
        if percentage <= 25.0 {
            SeverityTier::Low
        } else if percentage <= 50.0 {
            SeverityTier::Moderate
        } else if percentage <= 75.0 {
            SeverityTier::Elevated
        } else {
            SeverityTier::High
        }
    }
}

/// Reservation state derived from the accepted offer. Advisory only; the
/// inventory service stays authoritative for actual stock movements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReservationView {
    pub is_reserved: bool,
    pub is_sold_out: bool,
    pub reserved_quantity: u32,
    pub reserved_price: Option<f64>,
    /// Share of total inventory the reservation consumes, in percent.
    /// Not clamped: anything above 100 is surfaced via `over_reserved`
    /// instead of being hidden.
    pub percentage: f64,
    pub tier: SeverityTier,
    pub over_reserved: bool,
}

impl ReservationView {
    /// Agreed reservation price as a display string ("1.234,56 €"), when
    /// one was recorded.
    pub fn reserved_price_display(&self) -> Option<String> {
        self.reserved_price.map(format_eur)
    }
}

/// Compute the reservation view for a product and its accepted offer.
///
/// Returns `None` when there is no accepted offer, which suppresses the
/// reservation UI entirely. An accepted offer with no explicit quantity
/// counts as reserving a single unit.
pub fn reservation_view(product: &Product, accepted: Option<&Offer>) -> Option<ReservationView> {
    let offer = accepted?;
    let reserved_quantity = offer.reserved_quantity.unwrap_or(1);
    let reserved_price = offer.reserved_price;
    let is_reserved = offer.is_reserved();

    // Zero inventory leaves the percentage formula undefined and nothing
    // to reserve: report sold out at the highest tier, skipping the
    // division entirely.
    if product.inventory == 0 {
        return Some(ReservationView {
            is_reserved,
            is_sold_out: true,
            reserved_quantity,
            reserved_price,
            percentage: 100.0,
            tier: SeverityTier::High,
            over_reserved: reserved_quantity > 0,
        });
    }

    let percentage = reserved_quantity as f64 / product.inventory as f64 * 100.0;
    Some(ReservationView {
        is_reserved,
        is_sold_out: reserved_quantity >= product.inventory,
        reserved_quantity,
        reserved_price,
        percentage,
        tier: SeverityTier::from_percentage(percentage),
        over_reserved: percentage > 100.0,
    })
}
