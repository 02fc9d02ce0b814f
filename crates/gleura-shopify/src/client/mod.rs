//! HTTP client for the Shopify Admin API (order lookups only).

mod diagnostics;
mod graphql;
mod rest;
mod search;

use std::time::Duration;

use gleura_core::{AdminApiSurface, AppConfig};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::error::ShopifyError;
use crate::types::CandidateOrder;

pub use diagnostics::{Diagnostics, DiagnosticsProbe};
pub use search::{find_orders, OrderSearch, SearchHit};

/// Header carrying the Admin API access token.
pub(crate) const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Maximum orders returned per name search. A name filter rarely matches
/// more than one order; a handful leaves room for test/duplicate names.
pub(crate) const SEARCH_PAGE_SIZE: u32 = 5;

/// Authenticated client for one shop's Admin API.
///
/// Every request is bounded by the configured timeout; a timeout surfaces as
/// [`ShopifyError::Http`] and is never retried.
pub struct AdminClient {
    client: Client,
    base_url: Url,
    access_token: String,
    api_version: String,
    surface: AdminApiSurface,
}

impl AdminClient {
    /// Creates a client for the Admin API at `origin` (e.g.
    /// `https://demo.myshopify.com`, or a wiremock URI in tests).
    ///
    /// # Errors
    ///
    /// - [`ShopifyError::Http`] if the `reqwest::Client` cannot be built.
    /// - [`ShopifyError::InvalidBaseUrl`] if `origin` does not parse.
    pub fn new(
        origin: &str,
        access_token: &str,
        api_version: &str,
        surface: AdminApiSurface,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ShopifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `Url::join` appends instead of
        // replacing the last path segment.
        let normalised = format!("{}/", origin.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ShopifyError::InvalidBaseUrl {
            base_url: origin.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            access_token: access_token.to_owned(),
            api_version: api_version.to_owned(),
            surface,
        })
    }

    /// Builds a client from application configuration.
    ///
    /// # Errors
    ///
    /// Same as [`AdminClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ShopifyError> {
        Self::new(
            &config.admin_origin(),
            &config.admin_access_token,
            &config.admin_api_version,
            config.admin_api_surface,
            config.admin_request_timeout_secs,
            &config.user_agent,
        )
    }

    #[must_use]
    pub fn surface(&self) -> AdminApiSurface {
        self.surface
    }

    /// Runs one order search for `name_filter` (e.g. `"#1001"`) on the
    /// configured surface, including cancelled and archived orders.
    ///
    /// # Errors
    ///
    /// - [`ShopifyError::UnexpectedStatus`] for any non-2xx response.
    /// - [`ShopifyError::GraphQl`] when GraphQL reports top-level errors.
    /// - [`ShopifyError::Http`] on network failure or timeout.
    /// - [`ShopifyError::Deserialize`] if the body is not the expected JSON.
    pub async fn search_orders(
        &self,
        name_filter: &str,
    ) -> Result<Vec<CandidateOrder>, ShopifyError> {
        match self.surface {
            AdminApiSurface::Rest => self.search_orders_rest(name_filter).await,
            AdminApiSurface::GraphQl => self.search_orders_graphql(name_filter).await,
        }
    }

    /// `{base}/admin/api/{version}/{resource}`
    pub(crate) fn versioned_url(&self, resource: &str) -> Result<Url, ShopifyError> {
        self.join(&format!("admin/api/{}/{resource}", self.api_version))
    }

    pub(crate) fn join(&self, path: &str) -> Result<Url, ShopifyError> {
        self.base_url
            .join(path)
            .map_err(|e| ShopifyError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: format!("cannot join \"{path}\": {e}"),
            })
    }

    pub(crate) fn get(&self, url: Url) -> RequestBuilder {
        self.authorize(self.client.get(url))
    }

    pub(crate) fn post(&self, url: Url) -> RequestBuilder {
        self.authorize(self.client.post(url))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .header(reqwest::header::ACCEPT, "application/json")
    }

    /// Sends `request`, rejects non-2xx statuses and decodes the JSON body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        request: RequestBuilder,
        context: &str,
    ) -> Result<T, ShopifyError> {
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().to_string();

        if !status.is_success() {
            return Err(ShopifyError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<T>(&body).map_err(|e| ShopifyError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
