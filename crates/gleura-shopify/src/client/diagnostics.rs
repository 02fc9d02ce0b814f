//! Best-effort probes run after a lookup came back negative.
//!
//! They help a merchant tell "the order really does not exist" apart from
//! "the app token cannot see orders". Failures are logged and reduced to
//! `None`; nothing here can fail the lookup that triggered it.

use std::future::Future;

use gleura_core::AdminApiSurface;

use crate::error::ShopifyError;
use crate::types::AccessScopesResponse;

use super::AdminClient;

const RECENT_ORDERS_PROBE_LIMIT: u32 = 3;

/// Output of the diagnostic probes. `None` means the probe failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    pub recent_orders: Option<Vec<String>>,
    pub access_scopes: Option<Vec<String>>,
}

impl Diagnostics {
    /// One-line summary for server logs, `unknown` for failed probes.
    #[must_use]
    pub fn summary(&self) -> String {
        let show = |items: &Option<Vec<String>>| match items {
            Some(items) if items.is_empty() => "none".to_owned(),
            Some(items) => items.join(", "),
            None => "unknown".to_owned(),
        };
        format!(
            "recent orders: {}; access scopes: {}",
            show(&self.recent_orders),
            show(&self.access_scopes)
        )
    }

    /// `Some(false)` when the scopes probe worked and `read_orders` is missing.
    #[must_use]
    pub fn can_read_orders(&self) -> Option<bool> {
        self.access_scopes.as_ref().map(|scopes| {
            scopes
                .iter()
                .any(|s| s == "read_orders" || s == "write_orders")
        })
    }
}

/// Collects [`Diagnostics`]. Infallible by signature.
pub trait DiagnosticsProbe {
    fn collect_diagnostics(&self) -> impl Future<Output = Diagnostics> + Send;
}

impl DiagnosticsProbe for AdminClient {
    async fn collect_diagnostics(&self) -> Diagnostics {
        let (recent, scopes) = tokio::join!(
            self.recent_order_names(RECENT_ORDERS_PROBE_LIMIT),
            self.access_scopes()
        );
        Diagnostics {
            recent_orders: best_effort("recent orders", recent),
            access_scopes: best_effort("access scopes", scopes),
        }
    }
}

impl AdminClient {
    /// Names of the most recent orders visible to this token.
    ///
    /// # Errors
    ///
    /// Any [`ShopifyError`] from the underlying request.
    pub async fn recent_order_names(&self, limit: u32) -> Result<Vec<String>, ShopifyError> {
        match self.surface {
            AdminApiSurface::Rest => self.recent_order_names_rest(limit).await,
            AdminApiSurface::GraphQl => self.recent_order_names_graphql(limit).await,
        }
    }

    /// Access scopes granted to this token (`read_orders`, ...).
    ///
    /// # Errors
    ///
    /// Any [`ShopifyError`] from the underlying request.
    pub async fn access_scopes(&self) -> Result<Vec<String>, ShopifyError> {
        let url = self.join("admin/oauth/access_scopes.json")?;
        let body: AccessScopesResponse =
            Self::send_json(self.get(url), "access_scopes.json").await?;
        Ok(body.access_scopes.into_iter().map(|s| s.handle).collect())
    }
}

fn best_effort<T>(probe: &str, result: Result<T, ShopifyError>) -> Option<T> {
    result
        .map_err(|e| tracing::warn!(probe, error = %e, "diagnostic probe failed"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_marks_failed_probes_unknown() {
        let diagnostics = Diagnostics {
            recent_orders: Some(vec!["#1003".to_owned(), "#1002".to_owned()]),
            access_scopes: None,
        };
        assert_eq!(
            diagnostics.summary(),
            "recent orders: #1003, #1002; access scopes: unknown"
        );
    }

    #[test]
    fn summary_distinguishes_empty_from_unknown() {
        let diagnostics = Diagnostics {
            recent_orders: Some(Vec::new()),
            access_scopes: Some(vec!["read_products".to_owned()]),
        };
        assert_eq!(
            diagnostics.summary(),
            "recent orders: none; access scopes: read_products"
        );
        assert_eq!(diagnostics.can_read_orders(), Some(false));
    }

    #[test]
    fn can_read_orders_unknown_without_scopes() {
        assert_eq!(Diagnostics::default().can_read_orders(), None);
    }
}
