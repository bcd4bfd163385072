//! Offer negotiation engine for the ReMaterial marketplace.
//!
//! Pure decision logic behind the negotiation chat: classifying offer sets
//! to find the accepted offer, deriving reservation state and its severity
//! tier, linking free-text offer summaries back to structured offers, and
//! validating offer/reservation submissions before they reach the
//! persistence and inventory collaborators.
//!
//! Persistence, realtime transport and inventory mutation stay behind the
//! traits in [`store`]; everything else computes from explicit inputs and
//! returns typed results.

pub mod classify;
pub mod error;
pub mod flow;
pub mod matching;
pub mod session;
pub mod store;
pub mod validate;
pub mod view;

pub use error::{CollaboratorError, EngineError, ValidationReason};
pub use session::{check_action, NegotiationEvent, NegotiationSession};
