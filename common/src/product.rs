use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique product identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sale unit for a surplus-material listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    Kilogram,
    Tonne,
    Piece,
    Other(String),
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Kilogram => write!(f, "kg"),
            Unit::Tonne => write!(f, "t"),
            Unit::Piece => write!(f, "ud"),
            Unit::Other(s) => write!(f, "{s}"),
        }
    }
}

/// A surplus-material listing under negotiation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub unit: Unit,
    /// Listed price per unit in EUR.
    pub price_per_unit: f64,
    /// Total available quantity. Owned and mutated by the inventory
    /// service; this is only ever a read snapshot.
    pub inventory: u32,
    pub location: String,
    pub seller_name: String,
}
