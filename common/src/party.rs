use serde::{Deserialize, Serialize};
use std::fmt;

/// One side of a negotiation conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Party {
    Buyer,
    Seller,
}

impl Party {
    /// The other side of the table.
    pub fn counterpart(self) -> Party {
        match self {
            Party::Buyer => Party::Seller,
            Party::Seller => Party::Buyer,
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Party::Buyer => write!(f, "buyer"),
            Party::Seller => write!(f, "seller"),
        }
    }
}
