use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::party::Party;

/// Unique message identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A chat message within a negotiation conversation.
///
/// Messages are append-only and immutable once created. The text may carry
/// an informal offer summary ("Oferta: 120,50€ — 5 unidades"); the engine
/// links those back to structured offers at display time, never through a
/// stored foreign key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub author: Party,
    pub text: String,
    pub created_at: DateTime<Utc>,
}
