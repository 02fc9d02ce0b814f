//! Admin API response types.
//!
//! Orders are kept as raw JSON ([`CandidateOrder`]) because their shape
//! depends on which surface answered:
//!
//! ### REST (`orders.json`)
//! snake_case keys. `total_price` is a decimal string alongside a flat
//! `currency`. Money sets (`total_price_set.shop_money`) appear on newer API
//! versions only. Tracking lives on `fulfillments[].tracking_number` /
//! `tracking_url` / `tracking_numbers` / `tracking_urls`.
//! `fulfillment_status` is `null` for unfulfilled orders.
//!
//! ### GraphQL (`graphql.json`)
//! camelCase keys under `data.orders.edges[].node`. Money is always nested
//! (`totalPriceSet.shopMoney.amount`, also a decimal string). Statuses are
//! upper-case enums (`FULFILLED`, `PARTIALLY_PAID`). Tracking lives on
//! `fulfillments[].trackingInfo[] { number url company }`.
//!
//! Normalization into one contract is done in [`crate::normalize`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One order as returned by the Admin API, shape unknown in advance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateOrder(pub Value);

impl CandidateOrder {
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Resolves a dotted path such as `"fulfillments.0.tracking_number"`.
    ///
    /// Numeric segments index into arrays. JSON `null` counts as absent.
    #[must_use]
    pub fn path(&self, path: &str) -> Option<&Value> {
        lookup_path(&self.0, path)
    }

    /// Display name for logs, `"?"` when the order carries none.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.path("name").and_then(Value::as_str).unwrap_or("?")
    }
}

/// Walks `path` (dot-separated keys / array indexes) through `value`.
pub(crate) fn lookup_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let found = path.split('.').try_fold(value, |current, segment| {
        match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
    })?;
    (!found.is_null()).then_some(found)
}

/// `GET /admin/api/{version}/orders.json` body.
#[derive(Debug, Deserialize)]
pub struct RestOrdersResponse {
    #[serde(default)]
    pub orders: Vec<CandidateOrder>,
}

/// `POST /admin/api/{version}/graphql.json` envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlErrorEntry>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlErrorEntry {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlOrdersData {
    pub orders: GraphQlConnection,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlConnection {
    #[serde(default)]
    pub edges: Vec<GraphQlEdge>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlEdge {
    pub node: CandidateOrder,
}

/// `GET /admin/oauth/access_scopes.json` body.
#[derive(Debug, Deserialize)]
pub struct AccessScopesResponse {
    #[serde(default)]
    pub access_scopes: Vec<AccessScope>,
}

#[derive(Debug, Deserialize)]
pub struct AccessScope {
    pub handle: String,
}
