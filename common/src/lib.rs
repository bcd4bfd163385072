pub mod conversation;
pub mod currency;
pub mod message;
pub mod offer;
pub mod party;
pub mod product;
