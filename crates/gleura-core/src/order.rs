//! The canonical order summary returned to the storefront widget.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Serialize;

/// Renderable placeholder for fields the upstream did not provide.
pub const UNKNOWN: &str = "—";

/// Default third-party lookup used when a carrier gave no tracking link.
pub const DEFAULT_TRACKING_LOOKUP_URL: &str = "https://www.17track.net/en/track?nums=";

/// Stable order summary, independent of which Admin API shape produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedOrder {
    /// Display order number, e.g. `"#1001"`.
    pub name: String,
    pub date: Option<String>,
    pub value: Option<f64>,
    pub currency: Option<String>,
    /// Lower snake-case status token (`"fulfilled"`, `"paid"`), or [`UNKNOWN`].
    pub status: String,
    /// Free-text address fragment, or [`UNKNOWN`].
    pub shipping_summary: String,
    pub tracking: Tracking,
}

/// Tracking details. `url` is always set when `number` is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tracking {
    pub number: Option<String>,
    pub url: Option<String>,
    pub company: Option<String>,
}

/// `true` for absolute `http://` or `https://` URLs, the only ones worth
/// putting in front of a shopper.
#[must_use]
pub fn is_web_url(url: &str) -> bool {
    let url = url.trim_start();
    ["http://", "https://"].iter().any(|scheme| {
        url.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// Builds fallback tracking links from a bare tracking number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingLinks {
    lookup_prefix: String,
}

impl TrackingLinks {
    #[must_use]
    pub fn new(lookup_prefix: impl Into<String>) -> Self {
        Self {
            lookup_prefix: lookup_prefix.into(),
        }
    }

    /// Lookup URL for `number`: the configured prefix followed by the
    /// percent-encoded number.
    #[must_use]
    pub fn lookup_url(&self, number: &str) -> String {
        format!(
            "{}{}",
            self.lookup_prefix,
            utf8_percent_encode(number, NON_ALPHANUMERIC)
        )
    }
}

impl Default for TrackingLinks {
    fn default() -> Self {
        Self::new(DEFAULT_TRACKING_LOOKUP_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_url_appends_number_to_prefix() {
        let links = TrackingLinks::default();
        assert_eq!(
            links.lookup_url("1Z999AA10123456784"),
            "https://www.17track.net/en/track?nums=1Z999AA10123456784"
        );
    }

    #[test]
    fn only_http_and_https_are_web_urls() {
        assert!(is_web_url("https://carrier.example/t/1"));
        assert!(is_web_url("HTTP://carrier.example/t/1"));
        assert!(!is_web_url("javascript:alert(1)"));
        assert!(!is_web_url("data:text/html,x"));
        assert!(!is_web_url("//carrier.example/t/1"));
        assert!(!is_web_url("http"));
    }

    #[test]
    fn lookup_url_encodes_unsafe_characters() {
        let links = TrackingLinks::new("https://track.example/?q=");
        assert_eq!(links.lookup_url("AB 12&3"), "https://track.example/?q=AB%2012%263");
    }

    #[test]
    fn normalized_order_serializes_camel_case() {
        let order = NormalizedOrder {
            name: "#1001".to_owned(),
            date: None,
            value: Some(49.5),
            currency: Some("INR".to_owned()),
            status: "fulfilled".to_owned(),
            shipping_summary: UNKNOWN.to_owned(),
            tracking: Tracking::default(),
        };
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["shippingSummary"], "—");
        assert_eq!(json["value"], 49.5);
        assert!(json["date"].is_null());
        assert!(json["tracking"]["url"].is_null());
    }
}
