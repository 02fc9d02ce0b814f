//! Field-resolution rules, one table per output field.
//!
//! Each table lists dotted paths in priority order; the first path that
//! resolves to a usable value wins. REST (snake_case) and GraphQL
//! (camelCase) spellings sit next to each other so either shape resolves
//! through the same table.

/// Display name.
pub(super) const NAME: &[&str] = &["name"];

/// Numeric order number, rendered as `#<n>` when `name` is absent.
pub(super) const ORDER_NUMBER: &[&str] = &["order_number", "orderNumber"];

/// Creation timestamp, then processed-at.
pub(super) const DATE: &[&str] = &["created_at", "createdAt", "processed_at", "processedAt"];

/// Explicit status, then fulfillment status, then financial status.
pub(super) const STATUS: &[&str] = &[
    "status",
    "fulfillment_status",
    "displayFulfillmentStatus",
    "financial_status",
    "displayFinancialStatus",
];

/// An amount path and the currency path that belongs to it.
pub(super) struct MoneyRule {
    pub amount: &'static str,
    pub currency: &'static str,
}

/// Flat totals, then shop-money sets, then current-total sets. When the
/// winning rule has no currency, the first currency found by any rule is used.
pub(super) const MONEY: &[MoneyRule] = &[
    MoneyRule {
        amount: "total_price",
        currency: "currency",
    },
    MoneyRule {
        amount: "total_price",
        currency: "currency_code",
    },
    MoneyRule {
        amount: "totalPrice",
        currency: "currencyCode",
    },
    MoneyRule {
        amount: "total_price_set.shop_money.amount",
        currency: "total_price_set.shop_money.currency_code",
    },
    MoneyRule {
        amount: "totalPriceSet.shopMoney.amount",
        currency: "totalPriceSet.shopMoney.currencyCode",
    },
    MoneyRule {
        amount: "current_total_price_set.shop_money.amount",
        currency: "current_total_price_set.shop_money.currency_code",
    },
    MoneyRule {
        amount: "currentTotalPriceSet.shopMoney.amount",
        currency: "currentTotalPriceSet.shopMoney.currencyCode",
    },
];

/// How to turn a shipping-address path into a summary line.
pub(super) enum AddressRule {
    /// An array of address lines, joined with `", "`.
    Joined(&'static str),
    /// Several scalar parts, blanks skipped, joined with `", "`.
    Parts(&'static [&'static str]),
    /// A single preformatted string.
    Flat(&'static str),
}

pub(super) const SHIPPING: &[AddressRule] = &[
    AddressRule::Joined("shipping_address.formatted"),
    AddressRule::Joined("shippingAddress.formatted"),
    AddressRule::Parts(&[
        "shipping_address.city",
        "shipping_address.province",
        "shipping_address.country",
    ]),
    AddressRule::Parts(&[
        "shippingAddress.city",
        "shippingAddress.province",
        "shippingAddress.country",
    ]),
    AddressRule::Flat("shipping_address.formatted"),
    AddressRule::Flat("shippingAddress.formatted"),
    AddressRule::Flat("shipping_address"),
    AddressRule::Flat("shippingAddress"),
];

/// Number / url / carrier paths read together from one location.
pub(super) struct TrackingRule {
    pub number: &'static str,
    pub url: &'static str,
    pub company: &'static str,
}

/// Nested object, flat pair, parallel arrays, first fulfillment's tracking
/// info, first fulfillment's flat fields.
pub(super) const TRACKING: &[TrackingRule] = &[
    TrackingRule {
        number: "tracking.number",
        url: "tracking.url",
        company: "tracking.company",
    },
    TrackingRule {
        number: "tracking_number",
        url: "tracking_url",
        company: "tracking_company",
    },
    TrackingRule {
        number: "trackingNumber",
        url: "trackingUrl",
        company: "trackingCompany",
    },
    TrackingRule {
        number: "tracking_numbers.0",
        url: "tracking_urls.0",
        company: "tracking_company",
    },
    TrackingRule {
        number: "trackingNumbers.0",
        url: "trackingUrls.0",
        company: "trackingCompany",
    },
    TrackingRule {
        number: "fulfillments.0.trackingInfo.0.number",
        url: "fulfillments.0.trackingInfo.0.url",
        company: "fulfillments.0.trackingInfo.0.company",
    },
    TrackingRule {
        number: "fulfillments.0.tracking_info.0.number",
        url: "fulfillments.0.tracking_info.0.url",
        company: "fulfillments.0.tracking_info.0.company",
    },
    TrackingRule {
        number: "fulfillments.0.tracking_number",
        url: "fulfillments.0.tracking_url",
        company: "fulfillments.0.tracking_company",
    },
    TrackingRule {
        number: "fulfillments.0.tracking_numbers.0",
        url: "fulfillments.0.tracking_urls.0",
        company: "fulfillments.0.tracking_company",
    },
];

/// Envelope paths tried by `coerce_order`, most specific first.
pub(super) const ORDER_ENVELOPES: &[&str] = &[
    "data.order",
    "order",
    "node",
    "data.orders.edges.0.node",
    "orders.edges.0.node",
    "orders.0",
];

/// Keys that mark a body as an envelope rather than an order.
pub(super) const ENVELOPE_KEYS: &[&str] = &["data", "order", "orders", "node"];
