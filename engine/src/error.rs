use std::fmt;
use thiserror::Error;

use rematerial_common::offer::{OfferAction, OfferId, OfferStatus};
use rematerial_common::party::Party;

/// Machine-readable reason for a rejected offer or reservation input.
/// Callers branch on the variant, not on a message string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationReason {
    NonPositivePrice,
    NonPositiveQuantity,
    NegativePrice,
    QuantityExceedsAvailable,
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationReason::NonPositivePrice => write!(f, "price must be greater than zero"),
            ValidationReason::NonPositiveQuantity => {
                write!(f, "quantity must be greater than zero")
            }
            ValidationReason::NegativePrice => write!(f, "price must not be negative"),
            ValidationReason::QuantityExceedsAvailable => {
                write!(f, "quantity exceeds available stock")
            }
        }
    }
}

/// Opaque failure reported by an external collaborator (persistence store
/// or inventory service). Retry policy lives at that boundary, not here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("collaborator failure: {0}")]
pub struct CollaboratorError(pub String);

/// Errors returned across the engine boundary.
///
/// Always typed results, never panics across the boundary. A failed text
/// match is not an error; it is the `None` outcome of the matcher.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid input: {0}")]
    Validation(ValidationReason),

    /// Attempted accept/reject/withdraw on an offer that is no longer
    /// pending. Rejected as a no-op, never silently accepted.
    #[error("offer {offer} is {status}, cannot {action}")]
    InvalidStateTransition {
        offer: OfferId,
        status: OfferStatus,
        action: OfferAction,
    },

    /// The action exists but belongs to the other party.
    #[error("only the {required} may {action} offer {offer}")]
    WrongParty {
        offer: OfferId,
        action: OfferAction,
        required: Party,
    },

    /// Commit-time re-validation found less stock than the advisory fetch
    /// promised. The caller should prompt to reduce quantity or cancel.
    #[error("reservation of {requested} exceeds fresh availability of {available}")]
    StaleAvailability { requested: u32, available: u32 },

    #[error("conversation has no accepted offer to reserve against")]
    NoAcceptedOffer,

    #[error("reservation dialog is not open")]
    ReservationNotOpen,

    #[error("unknown offer {0}")]
    UnknownOffer(OfferId),

    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
}
