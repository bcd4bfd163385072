use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::party::Party;

/// Unique offer identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OfferId(pub String);

impl fmt::Display for OfferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Offer lifecycle status. `Pending` is the only live state; the other
/// three are terminal. A new negotiation round is a new offer, never a
/// reopened one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferStatus {
    Pending,
    Accepted,
    Rejected,
    Withdrawn,
}

impl OfferStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, OfferStatus::Pending)
    }

    /// Returns true if transitioning from self to `next` is valid.
    pub fn can_transition_to(self, next: OfferStatus) -> bool {
        matches!(
            (self, next),
            (OfferStatus::Pending, OfferStatus::Accepted)
                | (OfferStatus::Pending, OfferStatus::Rejected)
                | (OfferStatus::Pending, OfferStatus::Withdrawn)
        )
    }
}

impl fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OfferStatus::Pending => write!(f, "pending"),
            OfferStatus::Accepted => write!(f, "accepted"),
            OfferStatus::Rejected => write!(f, "rejected"),
            OfferStatus::Withdrawn => write!(f, "withdrawn"),
        }
    }
}

/// An action a party can take on a pending offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferAction {
    Accept,
    Reject,
    Withdraw,
}

impl OfferAction {
    /// Status this action produces.
    pub fn target_status(self) -> OfferStatus {
        match self {
            OfferAction::Accept => OfferStatus::Accepted,
            OfferAction::Reject => OfferStatus::Rejected,
            OfferAction::Withdraw => OfferStatus::Withdrawn,
        }
    }

    /// The only party allowed to take this action on an offer made by
    /// `made_by`: accept and reject belong to the counterparty, withdraw
    /// is self-retraction.
    pub fn actor(self, made_by: Party) -> Party {
        match self {
            OfferAction::Accept | OfferAction::Reject => made_by.counterpart(),
            OfferAction::Withdraw => made_by,
        }
    }
}

impl fmt::Display for OfferAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OfferAction::Accept => write!(f, "accept"),
            OfferAction::Reject => write!(f, "reject"),
            OfferAction::Withdraw => write!(f, "withdraw"),
        }
    }
}

/// A structured price/quantity proposal made within a conversation.
///
/// The reservation fields are only meaningful once the offer is accepted;
/// at most one offer per conversation is accepted at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub id: OfferId,
    pub made_by: Party,
    /// Agreed price in EUR.
    pub price: f64,
    #[serde(default)]
    pub note: Option<String>,
    pub status: OfferStatus,
    pub created_at: DateTime<Utc>,
    /// Set by the seller once the accepted offer is backed by stock.
    #[serde(default)]
    pub reserved: Option<bool>,
    #[serde(default)]
    pub reserved_quantity: Option<u32>,
    /// Reservation price, which may differ from the offer price.
    #[serde(default)]
    pub reserved_price: Option<f64>,
}

impl Offer {
    /// True when this offer is accepted and marked reserved.
    pub fn is_reserved(&self) -> bool {
        self.status == OfferStatus::Accepted && self.reserved.unwrap_or(false)
    }
}
