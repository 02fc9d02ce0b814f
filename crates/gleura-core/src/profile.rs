//! Merchant-configured store details shown in scripted replies.

use crate::order::UNKNOWN;

/// A discount code and the one-line description shown next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountCode {
    pub code: String,
    pub description: String,
}

/// Contact details and canned messages configured by the store owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreProfile {
    pub title: String,
    pub support_phone: Option<String>,
    pub support_email: Option<String>,
    pub support_hours: Option<String>,
    pub return_message: String,
    pub shipping_message: String,
    pub discount_codes: Vec<DiscountCode>,
}

impl Default for StoreProfile {
    fn default() -> Self {
        Self {
            title: "Chat Support".to_owned(),
            support_phone: None,
            support_email: None,
            support_hours: None,
            return_message:
                "You can start a return or exchange by emailing support with your order number."
                    .to_owned(),
            shipping_message:
                "Orders ship within 1–2 business days; standard delivery 3–5 business days."
                    .to_owned(),
            discount_codes: Vec::new(),
        }
    }
}

impl StoreProfile {
    /// `Phone / Email / Hours` block, with `—` for anything not configured.
    #[must_use]
    pub fn contact_html(&self) -> String {
        let show = |v: &Option<String>| v.clone().unwrap_or_else(|| UNKNOWN.to_owned());
        format!(
            "Phone: {}<br>Email: {}<br>Hours: {}",
            show(&self.support_phone),
            show(&self.support_email),
            show(&self.support_hours)
        )
    }

    /// One `CODE — description` line per code.
    #[must_use]
    pub fn discounts_html(&self) -> String {
        if self.discount_codes.is_empty() {
            return "There are no active discount codes right now.".to_owned();
        }
        self.discount_codes
            .iter()
            .map(|d| format!("{} — {}", d.code, d.description))
            .collect::<Vec<_>>()
            .join("<br>")
    }
}

/// Parses `CODE=description;CODE=description`.
///
/// Entries without `=` become a code with an empty description; blank
/// entries are skipped.
#[must_use]
pub fn parse_discount_codes(raw: &str) -> Vec<DiscountCode> {
    raw.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|entry| {
            let (code, description) = entry.split_once('=').unwrap_or((entry, ""));
            DiscountCode {
                code: code.trim().to_owned(),
                description: description.trim().to_owned(),
            }
        })
        .filter(|d| !d.code.is_empty())
        .collect()
}
