//! Pre-dispatch validation of offer and reservation inputs.
//!
//! Invalid drafts never reach the persistence store; they come back as
//! [`EngineError::Validation`] with a machine-readable reason.

use crate::error::{EngineError, ValidationReason};

/// A validated offer submission, ready to dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidOffer {
    pub price: f64,
    pub quantity: u32,
}

/// A validated reservation, ready to dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidReservation {
    pub quantity: u32,
    pub price: Option<f64>,
}

/// Validate a draft offer. The price must be finite and positive; a
/// missing quantity means a single unit.
pub fn validate_new_offer(price: f64, quantity: Option<u32>) -> Result<ValidOffer, EngineError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(EngineError::Validation(ValidationReason::NonPositivePrice));
    }
    if quantity == Some(0) {
        return Err(EngineError::Validation(
            ValidationReason::NonPositiveQuantity,
        ));
    }
    Ok(ValidOffer {
        price,
        quantity: quantity.unwrap_or(1),
    })
}

/// Validate a reservation against the available quantity in hand.
///
/// The caller decides how fresh `available` is: the reservation flow
/// re-fetches it at commit time rather than trusting the figure shown
/// when the dialog opened.
pub fn validate_reservation(
    quantity: u32,
    available: u32,
    price: Option<f64>,
) -> Result<ValidReservation, EngineError> {
    if quantity == 0 {
        return Err(EngineError::Validation(
            ValidationReason::NonPositiveQuantity,
        ));
    }
    if quantity > available {
        return Err(EngineError::Validation(
            ValidationReason::QuantityExceedsAvailable,
        ));
    }
    if let Some(p) = price {
        if !p.is_finite() || p < 0.0 {
            return Err(EngineError::Validation(ValidationReason::NegativePrice));
        }
    }
    Ok(ValidReservation { quantity, price })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(result: Result<impl std::fmt::Debug, EngineError>) -> ValidationReason {
        match result {
            Err(EngineError::Validation(reason)) => reason,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_non_positive_prices() {
        assert_eq!(
            reason(validate_new_offer(0.0, Some(5))),
            ValidationReason::NonPositivePrice
        );
        assert_eq!(
            reason(validate_new_offer(-1.0, Some(5))),
            ValidationReason::NonPositivePrice
        );
        assert_eq!(
            reason(validate_new_offer(f64::NAN, Some(5))),
            ValidationReason::NonPositivePrice
        );
        assert_eq!(
            reason(validate_new_offer(f64::INFINITY, Some(5))),
            ValidationReason::NonPositivePrice
        );
    }

    #[test]
    fn rejects_zero_quantity_offers() {
        assert_eq!(
            reason(validate_new_offer(10.0, Some(0))),
            ValidationReason::NonPositiveQuantity
        );
    }

    #[test]
    fn accepts_valid_offers_and_defaults_quantity() {
        let offer = validate_new_offer(10.0, None).unwrap();
        assert_eq!(offer.quantity, 1);
        let offer = validate_new_offer(0.01, Some(40)).unwrap();
        assert_eq!(offer.quantity, 40);
    }

    #[test]
    fn rejects_reservations_beyond_availability() {
        assert_eq!(
            reason(validate_reservation(10, 5, Some(100.0))),
            ValidationReason::QuantityExceedsAvailable
        );
    }

    #[test]
    fn rejects_zero_quantity_reservations() {
        assert_eq!(
            reason(validate_reservation(0, 5, None)),
            ValidationReason::NonPositiveQuantity
        );
    }

    #[test]
    fn reservation_price_may_be_zero_but_not_negative() {
        assert!(validate_reservation(3, 5, Some(0.0)).is_ok());
        assert_eq!(
            reason(validate_reservation(3, 5, Some(-0.01))),
            ValidationReason::NegativePrice
        );
        assert_eq!(
            reason(validate_reservation(3, 5, Some(f64::NAN))),
            ValidationReason::NegativePrice
        );
    }

    #[test]
    fn reservation_up_to_the_full_availability_is_allowed() {
        let reservation = validate_reservation(5, 5, None).unwrap();
        assert_eq!(reservation.quantity, 5);
        assert!(reservation.price.is_none());
    }
}
