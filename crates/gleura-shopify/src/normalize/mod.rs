//! Maps any Admin API order shape onto [`NormalizedOrder`].
//!
//! The field tables live in [`rules`]; this module only interprets them.

mod rules;

use gleura_core::{is_web_url, NormalizedOrder, Tracking, TrackingLinks, UNKNOWN};
use serde_json::Value;

use crate::types::{lookup_path, CandidateOrder};

use rules::{AddressRule, MONEY, ORDER_ENVELOPES, SHIPPING, TRACKING};

/// Unwraps the order object from a raw upstream body.
///
/// Accepts a bare order, `{order}`, `{data: {order}}`, `{node}`, `{orders: [..]}`
/// and GraphQL connections (first element). Returns `None` when the body is
/// not an object, or is an envelope with nothing inside.
#[must_use]
pub fn coerce_order(body: &Value) -> Option<&Value> {
    let map = body.as_object()?;
    if let Some(order) = ORDER_ENVELOPES
        .iter()
        .filter_map(|path| lookup_path(body, path))
        .find(|v| v.is_object())
    {
        return Some(order);
    }
    if rules::ENVELOPE_KEYS.iter().any(|key| map.contains_key(*key)) {
        return None;
    }
    Some(body)
}

/// Normalizes one candidate order. Never fails: anything unresolvable becomes
/// `None` or the [`UNKNOWN`] placeholder.
#[must_use]
pub fn normalize_order(order: &CandidateOrder, links: &TrackingLinks) -> NormalizedOrder {
    let (value, currency) = money(order);
    NormalizedOrder {
        name: name(order),
        date: first_text(order, rules::DATE),
        value,
        currency,
        status: first_text(order, rules::STATUS)
            .map_or_else(|| UNKNOWN.to_owned(), |s| canonical_status(&s)),
        shipping_summary: shipping_summary(order).unwrap_or_else(|| UNKNOWN.to_owned()),
        tracking: tracking(order, links),
    }
}

fn name(order: &CandidateOrder) -> String {
    first_text(order, rules::NAME)
        .or_else(|| first_text(order, rules::ORDER_NUMBER).map(|n| format!("#{n}")))
        .unwrap_or_else(|| UNKNOWN.to_owned())
}

fn money(order: &CandidateOrder) -> (Option<f64>, Option<String>) {
    let Some((rule, amount)) = MONEY
        .iter()
        .find_map(|rule| order.path(rule.amount).and_then(amount).map(|a| (rule, a)))
    else {
        return (None, None);
    };
    let currency = text(order.path(rule.currency)).or_else(|| {
        MONEY
            .iter()
            .find_map(|other| text(order.path(other.currency)))
    });
    (Some(amount), currency)
}

fn shipping_summary(order: &CandidateOrder) -> Option<String> {
    SHIPPING.iter().find_map(|rule| match rule {
        AddressRule::Joined(path) => {
            let lines: Vec<String> = order
                .path(path)?
                .as_array()?
                .iter()
                .filter_map(|line| text(Some(line)))
                .collect();
            non_empty_join(&lines)
        }
        AddressRule::Parts(paths) => {
            let parts: Vec<String> = paths.iter().filter_map(|p| text(order.path(p))).collect();
            non_empty_join(&parts)
        }
        AddressRule::Flat(path) => order.path(path).and_then(Value::as_str).and_then(non_blank),
    })
}

fn tracking(order: &CandidateOrder, links: &TrackingLinks) -> Tracking {
    TRACKING
        .iter()
        .find_map(|rule| {
            let number = text(order.path(rule.number))?;
            let url = text(order.path(rule.url))
                .filter(|url| is_web_url(url))
                .unwrap_or_else(|| links.lookup_url(&number));
            Some(Tracking {
                company: text(order.path(rule.company)),
                url: Some(url),
                number: Some(number),
            })
        })
        .unwrap_or_default()
}

/// `"PARTIALLY_FULFILLED"`, `"Partially fulfilled"` and `"partially-fulfilled"`
/// all become `"partially_fulfilled"`.
fn canonical_status(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

fn first_text(order: &CandidateOrder, paths: &[&str]) -> Option<String> {
    paths.iter().find_map(|path| text(order.path(path)))
}

/// Strings (non-blank, trimmed) and numbers render as text; anything else is absent.
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => non_blank(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn amount(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

fn non_empty_join(parts: &[String]) -> Option<String> {
    (!parts.is_empty()).then(|| parts.join(", "))
}

#[cfg(test)]
#[path = "../normalize_test.rs"]
mod tests;
