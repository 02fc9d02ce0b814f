//! HTML bubble for a resolved order, in the layout the widget expects.

use askama::Template;
use chrono::DateTime;
use gleura_core::{is_web_url, NormalizedOrder, UNKNOWN};

struct TrackingLink<'a> {
    number: &'a str,
    /// `None` unless `http(s)`; the number is then shown unlinked.
    url: Option<&'a str>,
    carrier: &'a str,
}

#[derive(Template)]
#[template(
    ext = "html",
    source = "Order Date: {{ date }}<br>Order No: {{ name }}<br>Order Value: {{ value }}<br>\
Status: {{ status }}<br>Shipping Address: {{ shipping }}<br>Tracking: \
{% if let Some(link) = tracking %}{% if let Some(url) = link.url %}\
<a href=\"{{ url }}\" target=\"_blank\" rel=\"noopener\">{{ link.number }}</a>\
{% else %}{{ link.number }}{% endif %}{% if !link.carrier.is_empty() %} ({{ link.carrier }}){% endif %}{% else %}—{% endif %}"
)]
struct OrderSummary<'a> {
    date: String,
    name: &'a str,
    value: String,
    status: String,
    shipping: &'a str,
    tracking: Option<TrackingLink<'a>>,
}

/// Renders the order summary shown to the shopper. Upstream text is
/// HTML-escaped.
///
/// # Errors
///
/// Returns [`askama::Error`] if rendering fails.
pub fn order_summary_html(order: &NormalizedOrder) -> Result<String, askama::Error> {
    let tracking = order.tracking.number.as_deref().map(|number| TrackingLink {
        number,
        url: order.tracking.url.as_deref().filter(|url| is_web_url(url)),
        carrier: order.tracking.company.as_deref().unwrap_or_default(),
    });

    OrderSummary {
        date: display_date(order.date.as_deref()),
        name: &order.name,
        value: display_value(order.value, order.currency.as_deref()),
        status: display_status(&order.status),
        shipping: &order.shipping_summary,
        tracking,
    }
    .render()
}

/// `2025-03-02T10:15:00+05:30` → `02 Mar 2025`; anything unparseable is
/// shown as received.
fn display_date(date: Option<&str>) -> String {
    match date {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map_or_else(|_| raw.to_owned(), |d| d.format("%d %b %Y").to_string()),
        None => UNKNOWN.to_owned(),
    }
}

fn display_value(value: Option<f64>, currency: Option<&str>) -> String {
    match (value, currency) {
        (Some(value), Some(currency)) => format!("{currency} {value:.2}"),
        (Some(value), None) => format!("{value:.2}"),
        (None, _) => UNKNOWN.to_owned(),
    }
}

/// `partially_fulfilled` → `Partially fulfilled`.
fn display_status(status: &str) -> String {
    let spaced = status.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => UNKNOWN.to_owned(),
    }
}
