//! Phone-based ownership check over the candidates of one search.

use gleura_core::{mask_phone, phones_match};
use serde_json::Value;

use crate::types::CandidateOrder;

/// Where an order records the shopper's phone, most specific first.
const CONTACT_PHONE_PATHS: &[&str] = &[
    "shipping_address.phone",
    "shippingAddress.phone",
    "customer.phone",
    "phone",
];

#[derive(Debug, Clone, PartialEq)]
pub enum Ownership {
    /// First candidate with a matching contact phone.
    Verified(CandidateOrder),
    /// Candidates exist but none matched. `hints` are masked registered
    /// numbers, deduplicated in encounter order.
    Mismatch { hints: Vec<String> },
    NoCandidates,
}

/// Picks the first candidate whose shipping or customer phone matches
/// `phone_raw` on the canonical 10-digit suffix.
#[must_use]
pub fn verify_ownership(candidates: &[CandidateOrder], phone_raw: &str) -> Ownership {
    if candidates.is_empty() {
        return Ownership::NoCandidates;
    }

    if let Some(order) = candidates
        .iter()
        .find(|order| contact_phones(order).any(|phone| phones_match(phone, phone_raw)))
    {
        return Ownership::Verified(order.clone());
    }

    let mut hints: Vec<String> = Vec::new();
    for hint in candidates
        .iter()
        .flat_map(contact_phones)
        .filter_map(mask_phone)
    {
        if !hints.contains(&hint) {
            hints.push(hint);
        }
    }
    Ownership::Mismatch { hints }
}

fn contact_phones(order: &CandidateOrder) -> impl Iterator<Item = &str> {
    CONTACT_PHONE_PATHS
        .iter()
        .filter_map(|path| order.path(path).and_then(Value::as_str))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn order(value: Value) -> CandidateOrder {
        CandidateOrder::new(value)
    }

    #[test]
    fn empty_candidates() {
        assert_eq!(verify_ownership(&[], "9876543210"), Ownership::NoCandidates);
    }

    #[test]
    fn shipping_phone_matches_across_country_code() {
        let candidate = order(json!({ "name": "#1001", "shipping_address": { "phone": "+91 98765 43210" } }));
        assert_eq!(
            verify_ownership(std::slice::from_ref(&candidate), "9876543210"),
            Ownership::Verified(candidate)
        );
    }

    #[test]
    fn customer_phone_matches_graphql_shape() {
        let candidate = order(json!({
            "name": "#1001",
            "shippingAddress": { "phone": null },
            "customer": { "phone": "+14155550134" }
        }));
        assert!(matches!(
            verify_ownership(&[candidate], "(415) 555-0134"),
            Ownership::Verified(_)
        ));
    }

    #[test]
    fn first_matching_candidate_wins() {
        let other = order(json!({ "name": "#1001-A", "phone": "1111111111" }));
        let first = order(json!({ "name": "#1001-B", "phone": "9876543210" }));
        let second = order(json!({ "name": "#1001-C", "phone": "+919876543210" }));
        match verify_ownership(&[other, first, second], "98765 43210") {
            Ownership::Verified(found) => assert_eq!(found.display_name(), "#1001-B"),
            other => panic!("expected a verified order, got {other:?}"),
        }
    }

    #[test]
    fn mismatch_reports_masked_deduplicated_hints() {
        let candidates = [
            order(json!({
                "shipping_address": { "phone": "+91 90000 01234" },
                "customer": { "phone": "9000001234" }
            })),
            order(json!({ "phone": "+1 415 555 0134" })),
        ];
        assert_eq!(
            verify_ownership(&candidates, "9876543210"),
            Ownership::Mismatch {
                hints: vec!["•••••• 1234".to_owned(), "•••••• 0134".to_owned()]
            }
        );
    }

    #[test]
    fn candidates_without_phones_are_a_mismatch() {
        assert_eq!(
            verify_ownership(&[order(json!({ "name": "#1001" }))], "9876543210"),
            Ownership::Mismatch { hints: Vec::new() }
        );
    }

    #[test]
    fn short_numbers_only_match_identical_short_numbers() {
        let candidate = order(json!({ "phone": "12345" }));
        assert!(matches!(
            verify_ownership(std::slice::from_ref(&candidate), "0012345"),
            Ownership::Mismatch { .. }
        ));
        assert!(matches!(
            verify_ownership(&[candidate], "12-345"),
            Ownership::Verified(_)
        ));
    }

    #[test]
    fn empty_input_phone_never_matches_digitless_record() {
        let candidate = order(json!({ "phone": "n/a" }));
        assert!(matches!(
            verify_ownership(&[candidate], "   "),
            Ownership::Mismatch { .. }
        ));
    }
}
