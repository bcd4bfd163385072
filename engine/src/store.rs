//! Collaborator boundaries: persistence store and inventory service.
//!
//! The engine never talks to a network or database itself. Hosts implement
//! these traits over their transport; failures come back as opaque
//! [`CollaboratorError`]s that the engine propagates without retrying.

use rematerial_common::conversation::ConversationId;
use rematerial_common::message::Message;
use rematerial_common::offer::{Offer, OfferId};
use rematerial_common::party::Party;
use rematerial_common::product::ProductId;

use crate::error::CollaboratorError;

/// Authoritative stock lookups.
///
/// The engine only ever reads snapshots. A figure fetched when the
/// reservation dialog opened is advisory; commits re-fetch through this
/// trait so two sellers reserving concurrently cannot both win on a stale
/// read.
pub trait InventoryService {
    fn available_quantity(&self, product: &ProductId) -> Result<u32, CollaboratorError>;
}

/// Durable storage for offers and messages.
///
/// Writes are acknowledged with the stored record where the store assigns
/// identity. Realtime change notifications flow back separately as
/// [`NegotiationEvent`](crate::session::NegotiationEvent)s.
pub trait OfferStore {
    fn submit_offer(
        &mut self,
        conversation: &ConversationId,
        made_by: Party,
        price: f64,
        quantity: u32,
        note: Option<String>,
    ) -> Result<Offer, CollaboratorError>;

    fn send_message(
        &mut self,
        conversation: &ConversationId,
        author: Party,
        text: &str,
    ) -> Result<Message, CollaboratorError>;

    fn accept_offer(&mut self, offer: &OfferId) -> Result<(), CollaboratorError>;

    fn reject_offer(&mut self, offer: &OfferId) -> Result<(), CollaboratorError>;

    fn withdraw_offer(&mut self, offer: &OfferId) -> Result<(), CollaboratorError>;

    fn reserve_offer(
        &mut self,
        offer: &OfferId,
        quantity: u32,
        price: Option<f64>,
    ) -> Result<(), CollaboratorError>;
}
