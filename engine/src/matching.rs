//! Heuristic linking of free-text chat messages to structured offers.
//!
//! Offers posted through the engine leave an automatic summary line in the
//! chat ("Oferta: 120,50€ — 5 unidades"). Recovering the structured offer
//! behind such a line is best-effort and purely derived: parse a price and
//! quantity out of the text, then pick the author's offer closest in time
//! among those within half a cent of the parsed price. Nothing is stored;
//! the association is recomputed on every pass over the message list.

use chrono::Duration;

use rematerial_common::message::Message;
use rematerial_common::offer::Offer;
use rematerial_common::party::Party;

/// Inclusive price tolerance when linking a parsed price to an offer,
/// in milli-euros (0.005 € — half a cent).
const PRICE_TOLERANCE_MILLI_EUR: i64 = 5;

/// How far apart an offer and its summary message may have been created
/// and still count as the same negotiation step.
const MATCH_WINDOW_MINUTES: i64 = 10;

/// Price and quantity recovered from an informal offer summary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedOffer {
    pub price: f64,
    pub quantity: u32,
}

/// The automatic chat line posted alongside a structured offer. Buyers
/// make offers, sellers counter. [`parse_offer_text`] round-trips this.
pub fn offer_summary_text(made_by: Party, price: f64, quantity: u32) -> String {
    let prefix = match made_by {
        Party::Buyer => "Oferta",
        Party::Seller => "Contraoferta",
    };
    format!("{prefix}: {price:.2}€ — {quantity} unidades")
}

/// Try to read an informal offer summary out of a chat message.
///
/// Accepts an `Oferta:` or `Contraoferta:` prefix anywhere in the text,
/// case-insensitively. Prices take comma or dot decimals, with or without
/// a trailing `€` — hand-typed offers often leave it off. A `— N unidades`
/// tail carries the quantity; without one it defaults to 1.
pub fn parse_offer_text(text: &str) -> Option<ParsedOffer> {
    let lower = text.to_lowercase();
    // "contraoferta:" ends in "oferta:", so one marker covers both prefixes
    let idx = lower.find("oferta:")?;
    let rest = lower[idx + "oferta:".len()..].trim_start();

    let (price, rest) = parse_price(rest)?;
    let rest = rest.trim_start();
    let rest = rest.strip_prefix('€').unwrap_or(rest);

    let quantity = parse_quantity_tail(rest).unwrap_or(1);
    Some(ParsedOffer { price, quantity })
}

/// Parse a decimal number with comma or dot separator off the front of `s`.
fn parse_price(s: &str) -> Option<(f64, &str)> {
    let bytes = s.as_bytes();
    let mut end = 0;
    let mut seen_sep = false;
    while end < bytes.len() {
        let b = bytes[end];
        if b.is_ascii_digit() {
            end += 1;
        } else if (b == b'.' || b == b',')
            && !seen_sep
            && end > 0
            && bytes.get(end + 1).is_some_and(|d| d.is_ascii_digit())
        {
            seen_sep = true;
            end += 1;
        } else {
            break;
        }
    }
    if end == 0 || !bytes[0].is_ascii_digit() {
        return None;
    }
    let raw = s[..end].replace(',', ".");
    let price: f64 = raw.parse().ok()?;
    Some((price, &s[end..]))
}

/// Parse a `— N unidades` / `- N unidad` tail. The quantity only counts
/// when positive and followed by the unit word; anything else falls back
/// to the price-only reading.
fn parse_quantity_tail(s: &str) -> Option<u32> {
    let s = s.trim_start();
    let s = s.strip_prefix('—').or_else(|| s.strip_prefix('-'))?;
    let s = s.trim_start();

    let digits = s.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let quantity: u32 = s[..digits].parse().ok()?;
    if quantity == 0 || !s[digits..].trim_start().starts_with("unidad") {
        return None;
    }
    Some(quantity)
}

/// Half-cent price comparison, inclusive at the boundary.
///
/// Both sides are rounded to whole milli-euros before comparing, so a
/// stored 19.995 matches a parsed 20.00 even when the raw float difference
/// lands a hair above 0.005.
pub fn prices_match(a: f64, b: f64) -> bool {
    let ma = (a * 1000.0).round() as i64;
    let mb = (b * 1000.0).round() as i64;
    (ma - mb).abs() <= PRICE_TOLERANCE_MILLI_EUR
}

/// Find the structured offer a chat message is summarizing, if any.
///
/// Pure function of its inputs. Candidates must share the message's author
/// and sit within half a cent of the parsed price; the temporally closest
/// one wins (ties keep the earlier candidate in iteration order), and only
/// when it falls within the ten-minute window. A text with no parseable
/// summary, or no candidate inside the window, is a no-match — a normal
/// outcome, not an error.
pub fn match_message_to_offer<'a>(message: &Message, offers: &'a [Offer]) -> Option<&'a Offer> {
    let parsed = parse_offer_text(&message.text)?;

    let mut best: Option<(&Offer, Duration)> = None;
    for offer in offers {
        if offer.made_by != message.author {
            continue;
        }
        if !prices_match(offer.price, parsed.price) {
            continue;
        }
        let dt = (offer.created_at - message.created_at).abs();
        match best {
            Some((_, best_dt)) if dt >= best_dt => {}
            _ => best = Some((offer, dt)),
        }
    }

    let (offer, dt) = best?;
    if dt > Duration::minutes(MATCH_WINDOW_MINUTES) {
        return None;
    }
    Some(offer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use rematerial_common::message::MessageId;
    use rematerial_common::offer::{OfferId, OfferStatus};

    fn t0() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-03-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn dummy_message(author: Party, text: &str, at: DateTime<Utc>) -> Message {
        Message {
            id: MessageId("m-1".into()),
            author,
            text: text.into(),
            created_at: at,
        }
    }

    fn dummy_offer(id: &str, made_by: Party, price: f64, at: DateTime<Utc>) -> Offer {
        Offer {
            id: OfferId(id.into()),
            made_by,
            price,
            note: None,
            status: OfferStatus::Pending,
            created_at: at,
            reserved: None,
            reserved_quantity: None,
            reserved_price: None,
        }
    }

    #[test]
    fn parses_price_and_quantity() {
        let parsed = parse_offer_text("Oferta: 120,50€ — 3 unidades").unwrap();
        assert_eq!(parsed.price, 120.5);
        assert_eq!(parsed.quantity, 3);
    }

    #[test]
    fn parses_dot_decimals_and_counteroffers() {
        let parsed = parse_offer_text("Contraoferta: 99.95€ — 12 unidades").unwrap();
        assert_eq!(parsed.price, 99.95);
        assert_eq!(parsed.quantity, 12);
    }

    #[test]
    fn price_only_defaults_quantity_to_one() {
        let parsed = parse_offer_text("Contraoferta: 120€").unwrap();
        assert_eq!(parsed.price, 120.0);
        assert_eq!(parsed.quantity, 1);
    }

    #[test]
    fn prefix_matching_is_case_insensitive_and_positional() {
        assert!(parse_offer_text("Te hago una OFERTA: 80€").is_some());
        assert!(parse_offer_text("contraoferta: 80,10€ - 2 unidades").is_some());
    }

    #[test]
    fn bare_price_without_euro_is_still_a_summary() {
        let parsed = parse_offer_text("Oferta: 120").unwrap();
        assert_eq!(parsed.price, 120.0);
        assert_eq!(parsed.quantity, 1);
        let parsed = parse_offer_text("Oferta: 120 — 5 unidades").unwrap();
        assert_eq!(parsed.quantity, 5);
    }

    #[test]
    fn zero_quantity_tail_falls_back_to_price_only() {
        let parsed = parse_offer_text("Oferta: 10€ — 0 unidades").unwrap();
        assert_eq!(parsed.quantity, 1);
        let parsed = parse_offer_text("Oferta: 10 — 0 unidades").unwrap();
        assert_eq!(parsed.quantity, 1);
    }

    #[test]
    fn plain_chat_text_does_not_parse() {
        assert!(parse_offer_text("¿Sigue disponible el material?").is_none());
        assert!(parse_offer_text("Oferta: pronto").is_none());
    }

    #[test]
    fn summary_text_round_trips_through_the_parser() {
        for (party, price, quantity) in [
            (Party::Buyer, 120.5, 3),
            (Party::Seller, 99.95, 1),
            (Party::Buyer, 1500.0, 40),
        ] {
            let text = offer_summary_text(party, price, quantity);
            let parsed = parse_offer_text(&text).unwrap();
            assert_eq!(parsed.price, price, "{text}");
            assert_eq!(parsed.quantity, quantity, "{text}");
        }
    }

    #[test]
    fn summary_prefix_depends_on_party() {
        assert!(offer_summary_text(Party::Buyer, 10.0, 1).starts_with("Oferta:"));
        assert!(offer_summary_text(Party::Seller, 10.0, 1).starts_with("Contraoferta:"));
    }

    #[test]
    fn author_filter_beats_exact_time_match() {
        let msg = dummy_message(Party::Buyer, "Oferta: 120,50€ — 3 unidades", t0());
        let offers = vec![
            dummy_offer("seller-exact", Party::Seller, 120.5, t0()),
            dummy_offer(
                "buyer-later",
                Party::Buyer,
                120.5,
                t0() + Duration::minutes(1),
            ),
        ];
        let matched = match_message_to_offer(&msg, &offers).unwrap();
        assert_eq!(matched.id.0, "buyer-later");
    }

    #[test]
    fn half_cent_tolerance_is_inclusive() {
        let msg = dummy_message(Party::Buyer, "Oferta: 20,00€", t0());

        let close = vec![dummy_offer("close", Party::Buyer, 19.995, t0())];
        assert!(match_message_to_offer(&msg, &close).is_some());

        let far = vec![dummy_offer("far", Party::Buyer, 19.994, t0())];
        assert!(match_message_to_offer(&msg, &far).is_none());
    }

    #[test]
    fn closest_offer_in_time_wins() {
        let msg = dummy_message(Party::Buyer, "Oferta: 50€", t0());
        let offers = vec![
            dummy_offer("far", Party::Buyer, 50.0, t0() + Duration::minutes(8)),
            dummy_offer("near", Party::Buyer, 50.0, t0() + Duration::minutes(2)),
            dummy_offer("earlier", Party::Buyer, 50.0, t0() - Duration::minutes(5)),
        ];
        assert_eq!(match_message_to_offer(&msg, &offers).unwrap().id.0, "near");
    }

    #[test]
    fn exact_time_ties_keep_the_first_candidate() {
        let msg = dummy_message(Party::Buyer, "Oferta: 50€", t0());
        let offers = vec![
            dummy_offer("first", Party::Buyer, 50.0, t0() + Duration::minutes(3)),
            dummy_offer("second", Party::Buyer, 50.0, t0() - Duration::minutes(3)),
        ];
        assert_eq!(match_message_to_offer(&msg, &offers).unwrap().id.0, "first");
    }

    #[test]
    fn window_is_a_strict_cutoff_inclusive_at_ten_minutes() {
        let msg = dummy_message(Party::Buyer, "Oferta: 50€", t0());

        let at_edge = vec![dummy_offer(
            "edge",
            Party::Buyer,
            50.0,
            t0() + Duration::minutes(10),
        )];
        assert!(match_message_to_offer(&msg, &at_edge).is_some());

        let beyond = vec![dummy_offer(
            "late",
            Party::Buyer,
            50.0,
            t0() + Duration::minutes(10) + Duration::seconds(1),
        )];
        assert!(match_message_to_offer(&msg, &beyond).is_none());
    }
}
