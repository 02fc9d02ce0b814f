//! GraphQL surface: `graphql.json`.

use serde::de::DeserializeOwned;
use serde_json::json;

use crate::error::ShopifyError;
use crate::types::{CandidateOrder, GraphQlOrdersData, GraphQlResponse};

use super::{AdminClient, SEARCH_PAGE_SIZE};

const TRACK_ORDER_QUERY: &str = r"
query TrackOrder($q: String!, $first: Int!) {
  orders(first: $first, query: $q, sortKey: PROCESSED_AT, reverse: true) {
    edges {
      node {
        id
        name
        createdAt
        processedAt
        displayFulfillmentStatus
        displayFinancialStatus
        totalPriceSet { shopMoney { amount currencyCode } }
        currentTotalPriceSet { shopMoney { amount currencyCode } }
        phone
        customer { phone }
        shippingAddress { formatted city province country phone }
        fulfillments(first: 5) {
          status
          trackingInfo(first: 5) { number url company }
        }
      }
    }
  }
}
";

const RECENT_ORDERS_QUERY: &str = r"
query RecentOrders($first: Int!) {
  orders(first: $first, sortKey: CREATED_AT, reverse: true) {
    edges { node { name } }
  }
}
";

/// Search expression for the `orders(query:)` argument. Quotes keep
/// `#` and spaces inside the name term.
pub(super) fn order_search_expression(name_filter: &str) -> String {
    let escaped = name_filter.replace('\\', "\\\\").replace('"', "\\\"");
    format!("name:\"{escaped}\" status:any")
}

impl AdminClient {
    pub(super) async fn search_orders_graphql(
        &self,
        name_filter: &str,
    ) -> Result<Vec<CandidateOrder>, ShopifyError> {
        let variables = json!({
            "q": order_search_expression(name_filter),
            "first": SEARCH_PAGE_SIZE,
        });
        let data: GraphQlOrdersData = self
            .graphql(TRACK_ORDER_QUERY, variables, &format!("TrackOrder({name_filter})"))
            .await?;
        Ok(data.orders.edges.into_iter().map(|e| e.node).collect())
    }

    pub(super) async fn recent_order_names_graphql(
        &self,
        limit: u32,
    ) -> Result<Vec<String>, ShopifyError> {
        let data: GraphQlOrdersData = self
            .graphql(RECENT_ORDERS_QUERY, json!({ "first": limit }), "RecentOrders")
            .await?;
        Ok(data
            .orders
            .edges
            .iter()
            .map(|e| e.node.display_name().to_owned())
            .collect())
    }

    /// Posts one GraphQL operation and unwraps `data`.
    ///
    /// A 200 response carrying `errors` (throttling, missing scopes) becomes
    /// [`ShopifyError::GraphQl`].
    async fn graphql<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
        context: &str,
    ) -> Result<T, ShopifyError> {
        let url = self.versioned_url("graphql.json")?;
        let url_string = url.to_string();
        let request = self
            .post(url)
            .json(&json!({ "query": query, "variables": variables }));

        let body: GraphQlResponse<T> = Self::send_json(request, context).await?;
        if !body.errors.is_empty() {
            return Err(ShopifyError::GraphQl {
                url: url_string,
                messages: body.errors.into_iter().map(|e| e.message).collect(),
            });
        }
        body.data.ok_or_else(|| ShopifyError::GraphQl {
            url: url_string,
            messages: vec![format!("{context}: response carried no data")],
        })
    }
}
