//! REST surface: `orders.json`.

use crate::error::ShopifyError;
use crate::types::{CandidateOrder, RestOrdersResponse};

use super::{AdminClient, SEARCH_PAGE_SIZE};

/// Field subset requested from `orders.json`: identity, timestamps, money,
/// statuses, shipping address, customer contact and fulfillment tracking.
pub(super) const ORDER_FIELDS: &str = "id,name,order_number,created_at,processed_at,\
total_price,currency,total_price_set,current_total_price_set,\
fulfillment_status,financial_status,shipping_address,customer,phone,fulfillments";

impl AdminClient {
    pub(super) async fn search_orders_rest(
        &self,
        name_filter: &str,
    ) -> Result<Vec<CandidateOrder>, ShopifyError> {
        let mut url = self.versioned_url("orders.json")?;
        url.query_pairs_mut()
            .append_pair("name", name_filter)
            .append_pair("status", "any")
            .append_pair("fields", ORDER_FIELDS)
            .append_pair("limit", &SEARCH_PAGE_SIZE.to_string());

        let body: RestOrdersResponse =
            Self::send_json(self.get(url), &format!("orders.json(name={name_filter})")).await?;
        Ok(body.orders)
    }

    pub(super) async fn recent_order_names_rest(
        &self,
        limit: u32,
    ) -> Result<Vec<String>, ShopifyError> {
        let mut url = self.versioned_url("orders.json")?;
        url.query_pairs_mut()
            .append_pair("status", "any")
            .append_pair("fields", "name")
            .append_pair("limit", &limit.to_string());

        let body: RestOrdersResponse =
            Self::send_json(self.get(url), "orders.json(recent)").await?;
        Ok(body
            .orders
            .iter()
            .map(|o| o.display_name().to_owned())
            .collect())
    }
}
