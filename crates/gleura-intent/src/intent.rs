use serde::Serialize;

/// What a free-text shopper message is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    ProductInquiry,
    HowToOrder,
    OrderStatusHint,
    Cancellation,
    ProductRecommendation,
    ContactSupport,
    DiscountQuery,
    Greeting,
    General,
}

impl Intent {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Intent::ProductInquiry => "product_inquiry",
            Intent::HowToOrder => "how_to_order",
            Intent::OrderStatusHint => "order_status_hint",
            Intent::Cancellation => "cancellation",
            Intent::ProductRecommendation => "product_recommendation",
            Intent::ContactSupport => "contact_support",
            Intent::DiscountQuery => "discount_query",
            Intent::Greeting => "greeting",
            Intent::General => "general",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How specific the matching keywords were. Not a probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub intent: Intent,
    pub confidence: Confidence,
}

impl Classification {
    /// The fallback for messages no rule recognises.
    pub const GENERAL: Classification = Classification {
        intent: Intent::General,
        confidence: Confidence::Low,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_serializes_snake_case() {
        let json = serde_json::to_string(&Intent::OrderStatusHint).unwrap();
        assert_eq!(json, "\"order_status_hint\"");
    }

    #[test]
    fn display_matches_serde_name() {
        for intent in [
            Intent::ProductInquiry,
            Intent::HowToOrder,
            Intent::ProductRecommendation,
            Intent::DiscountQuery,
            Intent::General,
        ] {
            assert_eq!(
                serde_json::to_string(&intent).unwrap(),
                format!("\"{intent}\"")
            );
        }
    }

    #[test]
    fn classification_serializes_both_fields() {
        let json = serde_json::to_value(Classification::GENERAL).unwrap();
        assert_eq!(json["intent"], "general");
        assert_eq!(json["confidence"], "low");
    }
}
