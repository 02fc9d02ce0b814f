//! Keyword rules for free-text shopper messages.
//!
//! Rules are checked in table order and the first match wins, so a message
//! like "how much to cancel" resolves to the earlier price rule. Keywords
//! cover English and romanized Hindi ("mera order kahan hai").

use std::sync::LazyLock;

use regex::RegexSet;

use crate::intent::{Classification, Confidence, Intent};

/// One keyword rule. `pattern` runs against the lower-cased message.
pub(crate) struct IntentRule {
    pub intent: Intent,
    pub confidence: Confidence,
    pub pattern: &'static str,
}

/// Priority order: price, how-to-order, tracking, cancellation/refund,
/// recommendation, contact, discount, greeting.
pub(crate) const RULES: &[IntentRule] = &[
    IntentRule {
        intent: Intent::ProductInquiry,
        confidence: Confidence::High,
        pattern: r"\b(price|prices|pricing|cost|costs|how much|kitna|kitne|kitni|keemat|kimat|daam|dam kya)\b",
    },
    IntentRule {
        intent: Intent::HowToOrder,
        confidence: Confidence::High,
        pattern: r"\b(how (do|can) i (order|buy|purchase)|how to (order|buy|purchase)|place an? order|order kaise|kaise (order|kharid|khareed|mangwa))",
    },
    IntentRule {
        intent: Intent::OrderStatusHint,
        confidence: Confidence::High,
        pattern: r"\b(where('s| is) my|track(ing)?|order status|status of my order|shipped|dispatch(ed)?|out for delivery|kahan|kaha|kab (aayega|ayega|milega|aega)|abhi tak)\b",
    },
    IntentRule {
        intent: Intent::Cancellation,
        confidence: Confidence::High,
        pattern: r"\b(cancel\w*|refund\w*|return\w*|exchange|money back|wapas|wapis|radd)\b",
    },
    IntentRule {
        intent: Intent::ProductRecommendation,
        confidence: Confidence::Medium,
        pattern: r"\b(recommend\w*|suggest\w*|best ?seller\w*|which (one|product)|what should i (buy|get)|konsa|kaunsa|kon sa|kaun sa)\b",
    },
    IntentRule {
        intent: Intent::ContactSupport,
        confidence: Confidence::Medium,
        pattern: r"\b(contact|support|customer care|helpline|talk to|speak to|human|agent|call me|email|baat)\b",
    },
    IntentRule {
        intent: Intent::DiscountQuery,
        confidence: Confidence::High,
        pattern: r"\b(discount\w*|coupon\w*|promo\w*|offers?|sale|deals?|code)\b",
    },
    IntentRule {
        intent: Intent::Greeting,
        confidence: Confidence::Medium,
        pattern: r"^\W*(hi+|hello+|hey+|namaste|namaskar|good (morning|afternoon|evening))\b",
    },
];

static RULE_SET: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new(RULES.iter().map(|rule| rule.pattern)).expect("valid intent patterns")
});

/// Classifies `message` with the first matching rule, or
/// [`Classification::GENERAL`] when none match.
#[must_use]
pub fn classify(message: &str) -> Classification {
    let text = message.trim().to_lowercase();
    if text.is_empty() {
        return Classification::GENERAL;
    }

    // `SetMatches::iter` yields indexes in ascending order, i.e. rule priority.
    RULE_SET
        .matches(&text)
        .iter()
        .next()
        .and_then(|index| RULES.get(index))
        .map_or(Classification::GENERAL, |rule| Classification {
            intent: rule.intent,
            confidence: rule.confidence,
        })
}
