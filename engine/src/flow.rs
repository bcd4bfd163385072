//! Two-phase reservation flow.
//!
//! Opening the reservation dialog requests an advisory availability figure
//! from the inventory service; committing re-validates against a freshly
//! fetched figure. The advisory read is display-only — trusting it at
//! commit time would let two sellers reserve the same stock off the same
//! stale snapshot.

use tracing::debug;

use rematerial_common::product::ProductId;

use crate::error::{EngineError, ValidationReason};
use crate::validate::{self, ValidReservation};

/// Request for the host to resolve against the inventory service. The
/// epoch ties the eventual quote back to the dialog that asked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityRequest {
    pub epoch: u64,
    pub product: ProductId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlowState {
    Closed,
    Fetching,
    Open { available: u32 },
}

/// Reservation dialog lifecycle.
///
/// A quote is only accepted while the flow is still fetching under the
/// epoch that requested it, so a result landing after the dialog was
/// dismissed or reopened is discarded rather than applied to a context
/// that no longer exists.
#[derive(Debug)]
pub struct ReservationFlow {
    state: FlowState,
    epoch: u64,
}

impl ReservationFlow {
    pub fn new() -> Self {
        ReservationFlow {
            state: FlowState::Closed,
            epoch: 0,
        }
    }

    /// Open the dialog for `product`, invalidating any in-flight fetch.
    pub fn open(&mut self, product: ProductId) -> AvailabilityRequest {
        self.epoch += 1;
        self.state = FlowState::Fetching;
        AvailabilityRequest {
            epoch: self.epoch,
            product,
        }
    }

    /// Deliver a fetched availability figure. Returns true when the quote
    /// was current and the dialog is now open; stale quotes are dropped.
    pub fn quote(&mut self, epoch: u64, available: u32) -> bool {
        if epoch != self.epoch || self.state != FlowState::Fetching {
            debug!(epoch, available, "discarding stale availability quote");
            return false;
        }
        self.state = FlowState::Open { available };
        true
    }

    /// Close the dialog, discarding any pending fetch.
    pub fn dismiss(&mut self) {
        self.state = FlowState::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, FlowState::Open { .. })
    }

    /// Advisory availability shown in the dialog, once the quote landed.
    pub fn advisory_available(&self) -> Option<u32> {
        match self.state {
            FlowState::Open { available } => Some(available),
            _ => None,
        }
    }

    /// Validate the reservation against a freshly re-fetched availability
    /// and close the dialog on success.
    ///
    /// A quantity that fit the advisory figure but exceeds the fresh one
    /// comes back as [`EngineError::StaleAvailability`], prompting the
    /// user to reduce it or cancel — distinct from asking for more than
    /// the dialog ever showed, which is plain validation failure.
    pub fn commit(
        &mut self,
        quantity: u32,
        price: Option<f64>,
        fresh_available: u32,
    ) -> Result<ValidReservation, EngineError> {
        let FlowState::Open { available } = self.state else {
            return Err(EngineError::ReservationNotOpen);
        };

        let reservation = match validate::validate_reservation(quantity, fresh_available, price) {
            Err(EngineError::Validation(ValidationReason::QuantityExceedsAvailable))
                if quantity <= available =>
            {
                return Err(EngineError::StaleAvailability {
                    requested: quantity,
                    available: fresh_available,
                });
            }
            other => other?,
        };

        self.state = FlowState::Closed;
        Ok(reservation)
    }
}

impl Default for ReservationFlow {
    fn default() -> Self {
        Self::new()
    }
}
