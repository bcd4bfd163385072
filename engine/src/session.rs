//! Negotiation session: one party's view of a conversation, plus dispatch.
//!
//! The session owns the full current set of offers and messages for a
//! conversation. Realtime change events upsert into that set and every
//! derived value — accepted offer, reservation view, message links — is
//! recomputed from the whole set on demand, so out-of-order delivery can
//! never leave a stale derivation behind.

use tracing::{debug, warn};

use rematerial_common::conversation::ConversationId;
use rematerial_common::message::Message;
use rematerial_common::offer::{Offer, OfferAction, OfferId, OfferStatus};
use rematerial_common::party::Party;
use rematerial_common::product::Product;

use crate::classify;
use crate::error::EngineError;
use crate::matching;
use crate::store::OfferStore;
use crate::validate::{self, ValidReservation};
use crate::view::{self, ReservationView};

/// A realtime change delivered by the persistence collaborator. Events may
/// arrive in any order relative to each other.
#[derive(Debug, Clone)]
pub enum NegotiationEvent {
    OfferUpserted(Offer),
    MessageInserted(Message),
    ProductUpdated(Product),
}

/// Guard for accept/reject/withdraw: the offer must still be pending and
/// the actor must be the party the action belongs to. Returns the status
/// the action produces; nothing is mutated here.
pub fn check_action(
    offer: &Offer,
    action: OfferAction,
    actor: Party,
) -> Result<OfferStatus, EngineError> {
    if offer.status != OfferStatus::Pending {
        return Err(EngineError::InvalidStateTransition {
            offer: offer.id.clone(),
            status: offer.status,
            action,
        });
    }
    let required = action.actor(offer.made_by);
    if actor != required {
        return Err(EngineError::WrongParty {
            offer: offer.id.clone(),
            action,
            required,
        });
    }
    Ok(action.target_status())
}

/// One party's live view of a negotiation conversation.
#[derive(Debug, Clone)]
pub struct NegotiationSession {
    conversation: ConversationId,
    me: Party,
    product: Option<Product>,
    offers: Vec<Offer>,
    messages: Vec<Message>,
}

impl NegotiationSession {
    pub fn new(conversation: ConversationId, me: Party) -> Self {
        NegotiationSession {
            conversation,
            me,
            product: None,
            offers: Vec::new(),
            messages: Vec::new(),
        }
    }

    pub fn conversation(&self) -> &ConversationId {
        &self.conversation
    }

    pub fn me(&self) -> Party {
        self.me
    }

    pub fn product(&self) -> Option<&Product> {
        self.product.as_ref()
    }

    pub fn offers(&self) -> &[Offer] {
        &self.offers
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Ingest a realtime event.
    ///
    /// Offers upsert by id, so an update may arrive before the insert it
    /// logically follows. Duplicate message inserts are dropped and the
    /// timeline is kept in creation order regardless of delivery order.
    pub fn apply(&mut self, event: NegotiationEvent) {
        match event {
            NegotiationEvent::OfferUpserted(offer) => {
                debug!(offer = %offer.id, status = %offer.status, "offer upserted");
                match self.offers.iter_mut().find(|o| o.id == offer.id) {
                    Some(existing) => *existing = offer,
                    None => self.offers.push(offer),
                }
            }
            NegotiationEvent::MessageInserted(message) => {
                if self.messages.iter().any(|m| m.id == message.id) {
                    return;
                }
                self.messages.push(message);
                self.messages.sort_by_key(|m| m.created_at);
            }
            NegotiationEvent::ProductUpdated(product) => {
                self.product = Some(product);
            }
        }
    }

    /// The conversation's accepted offer, recomputed from the full set.
    pub fn accepted_offer(&self) -> Option<&Offer> {
        classify::accepted_offer(&self.offers)
    }

    /// Reservation state for the accepted offer, when there is a product
    /// and an accepted offer to derive it from.
    pub fn reservation_view(&self) -> Option<ReservationView> {
        let product = self.product.as_ref()?;
        view::reservation_view(product, self.accepted_offer())
    }

    /// Stock still open for reservation per the last product snapshot.
    pub fn advisory_available_quantity(&self) -> u32 {
        match &self.product {
            Some(product) => classify::available_quantity(product.inventory, &self.offers),
            None => 0,
        }
    }

    /// The structured offer a chat message summarizes, if any.
    pub fn match_message(&self, message: &Message) -> Option<&Offer> {
        matching::match_message_to_offer(message, &self.offers)
    }

    /// Validate and submit a new offer as this session's party, posting
    /// the automatic summary message alongside it.
    pub fn make_offer<S: OfferStore>(
        &mut self,
        price: f64,
        quantity: Option<u32>,
        note: Option<String>,
        store: &mut S,
    ) -> Result<Offer, EngineError> {
        let valid = validate::validate_new_offer(price, quantity)?;
        let offer = store.submit_offer(
            &self.conversation,
            self.me,
            valid.price,
            valid.quantity,
            note,
        )?;
        let text = matching::offer_summary_text(self.me, valid.price, valid.quantity);
        let message = store.send_message(&self.conversation, self.me, &text)?;
        debug!(offer = %offer.id, price = valid.price, quantity = valid.quantity, "offer submitted");

        // Mirror locally; the realtime feed will confirm with the same upserts.
        self.apply(NegotiationEvent::OfferUpserted(offer.clone()));
        self.apply(NegotiationEvent::MessageInserted(message));
        Ok(offer)
    }

    /// Accept, reject or withdraw a pending offer as this session's party.
    ///
    /// Accepting also rejects every other pending offer in the
    /// conversation — that bulk rejection is what keeps the accepted
    /// offer unique. Guard failures dispatch nothing and mutate nothing.
    pub fn act_on_offer<S: OfferStore>(
        &mut self,
        offer_id: &OfferId,
        action: OfferAction,
        store: &mut S,
    ) -> Result<(), EngineError> {
        let offer = self
            .offers
            .iter()
            .find(|o| o.id == *offer_id)
            .ok_or_else(|| EngineError::UnknownOffer(offer_id.clone()))?;
        let next = match check_action(offer, action, self.me) {
            Ok(next) => next,
            Err(err) => {
                warn!(offer = %offer_id, %action, %err, "offer action refused");
                return Err(err);
            }
        };

        match action {
            OfferAction::Accept => store.accept_offer(offer_id)?,
            OfferAction::Reject => store.reject_offer(offer_id)?,
            OfferAction::Withdraw => store.withdraw_offer(offer_id)?,
        }

        let mut sidelined: Vec<OfferId> = Vec::new();
        if action == OfferAction::Accept {
            sidelined.extend(
                self.offers
                    .iter()
                    .filter(|o| o.id != *offer_id && o.status == OfferStatus::Pending)
                    .map(|o| o.id.clone()),
            );
            for id in &sidelined {
                store.reject_offer(id)?;
            }
        }

        for offer in self.offers.iter_mut() {
            if offer.id == *offer_id {
                offer.status = next;
            } else if sidelined.contains(&offer.id) {
                offer.status = OfferStatus::Rejected;
            }
        }
        Ok(())
    }

    /// Dispatch a committed reservation against the accepted offer.
    pub fn reserve_accepted<S: OfferStore>(
        &mut self,
        reservation: ValidReservation,
        store: &mut S,
    ) -> Result<(), EngineError> {
        let offer_id = self
            .accepted_offer()
            .map(|o| o.id.clone())
            .ok_or(EngineError::NoAcceptedOffer)?;
        store.reserve_offer(&offer_id, reservation.quantity, reservation.price)?;
        debug!(offer = %offer_id, quantity = reservation.quantity, "reservation dispatched");

        if let Some(offer) = self.offers.iter_mut().find(|o| o.id == offer_id) {
            offer.reserved = Some(true);
            offer.reserved_quantity = Some(reservation.quantity);
            offer.reserved_price = reservation.price;
        }
        Ok(())
    }
}
