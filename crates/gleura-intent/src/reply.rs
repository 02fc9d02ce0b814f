use gleura_core::StoreProfile;
use serde::Serialize;

use crate::classifier::classify;
use crate::intent::{Confidence, Intent};

/// The widget's menu, offered whenever a message is not understood.
pub const MENU_HINT: &str =
    "I can help with Track Order, Return/Exchange, Discounts, Shipping &amp; Delivery, or Connect to Support.";

/// A classified message and the HTML bubble to show for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntentReply {
    pub intent: Intent,
    pub confidence: Confidence,
    pub html: String,
}

/// Scripted HTML reply for `intent`, filled in from the store profile.
#[must_use]
pub fn reply(intent: Intent, profile: &StoreProfile) -> String {
    match intent {
        Intent::ProductInquiry => "Prices are shown on each product page, including any active \
            offer. Tell me which product you are looking at and I'll point you to it."
            .to_owned(),
        Intent::HowToOrder => "To place an order: add the product to your cart, open the cart \
            and tap <b>Checkout</b>, then enter your shipping details and pay.<br>\
            You'll receive an order number by email and SMS."
            .to_owned(),
        Intent::OrderStatusHint => format!(
            "I can check that for you. Tap <b>Track Order</b> and share your order number \
             and the phone number used at checkout.<br>{}",
            profile.shipping_message
        ),
        Intent::Cancellation => format!(
            "{}<br>For a cancellation before dispatch, reach us at:<br>{}",
            profile.return_message,
            profile.contact_html()
        ),
        Intent::ProductRecommendation => "Our best sellers are on the home page. Tell me what \
            you need it for and I'll help you pick."
            .to_owned(),
        Intent::ContactSupport => format!(
            "You can reach the {} team here:<br>{}",
            profile.title,
            profile.contact_html()
        ),
        Intent::DiscountQuery => format!("Current offers:<br>{}", profile.discounts_html()),
        Intent::Greeting => format!("Hi! Welcome to {}. {MENU_HINT}", profile.title),
        Intent::General => MENU_HINT.to_owned(),
    }
}

/// Classifies `message` and renders the matching reply.
#[must_use]
pub fn respond(message: &str, profile: &StoreProfile) -> IntentReply {
    let classification = classify(message);
    tracing::debug!(
        intent = %classification.intent,
        confidence = %classification.confidence,
        "classified chat message"
    );
    IntentReply {
        intent: classification.intent,
        confidence: classification.confidence,
        html: reply(classification.intent, profile),
    }
}

#[cfg(test)]
mod tests {
    use gleura_core::parse_discount_codes;

    use super::*;

    fn profile() -> StoreProfile {
        StoreProfile {
            title: "Gleura Skin".to_owned(),
            support_phone: Some("+91 90000 00000".to_owned()),
            support_email: Some("care@gleura.example".to_owned()),
            support_hours: Some("Mon–Sat 10–6".to_owned()),
            discount_codes: parse_discount_codes("SAVE10=10% off;NEWBIE15=15% off"),
            ..StoreProfile::default()
        }
    }

    #[test]
    fn tracking_question_gets_track_order_redirect() {
        let reply = respond("Where is my order", &profile());
        assert_eq!(reply.intent, Intent::OrderStatusHint);
        assert!(reply.html.contains("<b>Track Order</b>"));
        assert_eq!(reply, respond("mera order kahan hai", &profile()));
    }

    #[test]
    fn contact_reply_uses_profile_details() {
        let html = reply(Intent::ContactSupport, &profile());
        assert!(html.starts_with("You can reach the Gleura Skin team here:"));
        assert!(html.contains("Email: care@gleura.example"));
    }

    #[test]
    fn discount_reply_lists_codes() {
        let html = reply(Intent::DiscountQuery, &profile());
        assert_eq!(html, "Current offers:<br>SAVE10 — 10% off<br>NEWBIE15 — 15% off");
    }

    #[test]
    fn discount_reply_without_codes() {
        let html = reply(Intent::DiscountQuery, &StoreProfile::default());
        assert_eq!(
            html,
            "Current offers:<br>There are no active discount codes right now."
        );
    }

    #[test]
    fn cancellation_reply_includes_return_policy_and_contact() {
        let html = reply(Intent::Cancellation, &StoreProfile::default());
        assert!(html.starts_with("You can start a return or exchange"));
        assert!(html.ends_with("Phone: —<br>Email: —<br>Hours: —"));
    }

    #[test]
    fn unknown_message_falls_back_to_menu() {
        let reply = respond("asdfgh", &profile());
        assert_eq!(reply.intent, Intent::General);
        assert_eq!(reply.confidence, Confidence::Low);
        assert_eq!(reply.html, MENU_HINT);
    }
}
