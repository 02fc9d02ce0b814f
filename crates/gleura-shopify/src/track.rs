//! The order-tracking pipeline: validate, search, verify, normalize.

use std::time::Duration;

use gleura_core::{
    canonical_phone, mask_phone, ErrorKind, NormalizedOrder, OrderNumberForms, TrackingLinks,
};
use thiserror::Error;

use crate::client::{find_orders, Diagnostics, DiagnosticsProbe, OrderSearch};
use crate::error::ShopifyError;
use crate::normalize::normalize_order;
use crate::ownership::{verify_ownership, Ownership};

/// Upper bound on the diagnostic probes; past it the lookup answers without them.
pub const DIAGNOSTICS_TIMEOUT: Duration = Duration::from_secs(2);

/// A shopper's lookup request, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderQuery {
    pub order_number_raw: String,
    pub phone_raw: String,
}

impl OrderQuery {
    #[must_use]
    pub fn new(order_number_raw: impl Into<String>, phone_raw: impl Into<String>) -> Self {
        Self {
            order_number_raw: order_number_raw.into(),
            phone_raw: phone_raw.into(),
        }
    }
}

/// Every way a lookup can fail. Each variant maps onto one [`ErrorKind`].
#[derive(Debug, Error)]
pub enum TrackError {
    #[error("order number and phone number are both required")]
    MissingParams,

    /// The Admin API answered with an error (non-2xx, GraphQL `errors`, or
    /// an undecodable body).
    #[error("Admin API request failed: {source}")]
    AdminApi {
        status: Option<u16>,
        #[source]
        source: ShopifyError,
    },

    /// The Admin API could not be reached or timed out.
    #[error("Admin API unavailable: {source}")]
    Unavailable {
        #[source]
        source: ShopifyError,
    },

    #[error("no order named {order_number}")]
    NotFound {
        order_number: String,
        diagnostics: Option<Diagnostics>,
    },

    #[error("phone number does not match order {order_number}")]
    PhoneMismatch {
        order_number: String,
        hints: Vec<String>,
        diagnostics: Option<Diagnostics>,
    },

    #[error("internal error: {source}")]
    Internal {
        #[source]
        source: ShopifyError,
    },
}

impl TrackError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            TrackError::MissingParams => ErrorKind::MissingParams,
            TrackError::AdminApi { .. } => ErrorKind::AdminApiError,
            TrackError::Unavailable { .. } => ErrorKind::UpstreamUnavailable,
            TrackError::NotFound { .. } => ErrorKind::NotFound,
            TrackError::PhoneMismatch { .. } => ErrorKind::PhoneMismatch,
            TrackError::Internal { .. } => ErrorKind::InternalError,
        }
    }

    /// Upstream HTTP status, only ever set for [`TrackError::AdminApi`].
    #[must_use]
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            TrackError::AdminApi { status, .. } => *status,
            _ => None,
        }
    }

    /// Message safe to show the shopper. Never includes upstream details.
    #[must_use]
    pub fn client_message(&self) -> String {
        match self {
            TrackError::MissingParams => {
                "Please share both your order number and the phone number used at checkout."
                    .to_owned()
            }
            TrackError::AdminApi { .. } => {
                "We couldn't look up your order right now. Please try again shortly.".to_owned()
            }
            TrackError::Unavailable { .. } => {
                "The store is not reachable at the moment. Please try again in a few minutes."
                    .to_owned()
            }
            TrackError::NotFound { order_number, .. } => format!(
                "We couldn't find order {order_number}. Please check the number and try again."
            ),
            TrackError::PhoneMismatch { hints, .. } => match hints.first() {
                Some(hint) => format!(
                    "That phone number doesn't match this order. Try the number ending {}.",
                    hint.trim_start_matches(['•', ' '])
                ),
                None => "That phone number doesn't match this order.".to_owned(),
            },
            TrackError::Internal { .. } => {
                "Something went wrong on our side. Please try again.".to_owned()
            }
        }
    }

    pub(crate) fn from_upstream(error: ShopifyError) -> Self {
        if error.is_unavailable() {
            return TrackError::Unavailable { source: error };
        }
        match error {
            ShopifyError::InvalidBaseUrl { .. } => TrackError::Internal { source: error },
            other => TrackError::AdminApi {
                status: other.status(),
                source: other,
            },
        }
    }
}

/// Resolves one shopper query to a verified, normalized order.
///
/// At most two searches run (decorated then bare order number). `probe`, when
/// given, runs only on `NotFound` / `PhoneMismatch`; its output is logged and
/// attached to the error but never changes which error is returned.
///
/// # Errors
///
/// See [`TrackError`]; [`TrackError::kind`] gives the wire error kind.
pub async fn track_order<S, P>(
    search: &S,
    query: &OrderQuery,
    links: &TrackingLinks,
    probe: Option<&P>,
) -> Result<NormalizedOrder, TrackError>
where
    S: OrderSearch + ?Sized,
    P: DiagnosticsProbe + ?Sized,
{
    // A phone without digits can never match, so it is treated as absent.
    let phone = query.phone_raw.trim();
    let forms = match OrderNumberForms::parse(&query.order_number_raw) {
        Some(forms) if !canonical_phone(phone).is_empty() => forms,
        _ => return Err(TrackError::MissingParams),
    };

    let hit = find_orders(search, &forms)
        .await
        .map_err(TrackError::from_upstream)?;

    let Some(hit) = hit else {
        let diagnostics = match probe {
            Some(probe) => diagnose(probe, &forms.decorated, "not found").await,
            None => None,
        };
        return Err(TrackError::NotFound {
            order_number: forms.decorated,
            diagnostics,
        });
    };

    match verify_ownership(&hit.orders, phone) {
        Ownership::Verified(order) => {
            tracing::info!(
                order = order.display_name(),
                matched_form = %hit.matched_form,
                "order verified"
            );
            Ok(normalize_order(&order, links))
        }
        Ownership::Mismatch { hints } => {
            tracing::info!(
                order = %forms.decorated,
                candidates = hit.orders.len(),
                phone = mask_phone(phone).as_deref().unwrap_or("-"),
                "phone mismatch"
            );
            let diagnostics = match probe {
                Some(probe) => diagnose(probe, &forms.decorated, "phone mismatch").await,
                None => None,
            };
            Err(TrackError::PhoneMismatch {
                order_number: forms.decorated,
                hints,
                diagnostics,
            })
        }
        // Unreachable in practice: find_orders only returns non-empty hits.
        Ownership::NoCandidates => Err(TrackError::NotFound {
            order_number: forms.decorated,
            diagnostics: None,
        }),
    }
}

/// Runs the diagnostic probes for a negative lookup and logs the result.
///
/// Bounded by [`DIAGNOSTICS_TIMEOUT`]; a probe that overruns yields `None`.
/// Callers that must not wait at all spawn this instead of awaiting it.
pub async fn diagnose<P>(probe: &P, order_number: &str, outcome: &str) -> Option<Diagnostics>
where
    P: DiagnosticsProbe + ?Sized,
{
    let Ok(diagnostics) =
        tokio::time::timeout(DIAGNOSTICS_TIMEOUT, probe.collect_diagnostics()).await
    else {
        tracing::warn!(
            order = order_number,
            outcome,
            timeout_secs = DIAGNOSTICS_TIMEOUT.as_secs(),
            "order lookup diagnostics timed out"
        );
        return None;
    };
    tracing::warn!(
        order = order_number,
        outcome,
        diagnostics = %diagnostics.summary(),
        can_read_orders = ?diagnostics.can_read_orders(),
        "order lookup diagnostics"
    );
    Some(diagnostics)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;

    use super::*;
    use crate::types::CandidateOrder;

    struct StaticSearch(Vec<CandidateOrder>);

    impl OrderSearch for StaticSearch {
        async fn search_orders(&self, _: &str) -> Result<Vec<CandidateOrder>, ShopifyError> {
            Ok(self.0.clone())
        }
    }

    #[derive(Default)]
    struct CountingProbe(AtomicUsize);

    impl DiagnosticsProbe for CountingProbe {
        async fn collect_diagnostics(&self) -> Diagnostics {
            self.0.fetch_add(1, Ordering::SeqCst);
            Diagnostics::default()
        }
    }

    fn order_with_phone(phone: &str) -> CandidateOrder {
        CandidateOrder::new(json!({
            "name": "#1001",
            "displayFulfillmentStatus": "FULFILLED",
            "shippingAddress": { "phone": phone }
        }))
    }

    #[tokio::test]
    async fn blank_inputs_are_missing_params() {
        let search = StaticSearch(vec![order_with_phone("9876543210")]);
        for query in [
            OrderQuery::new("", "9876543210"),
            OrderQuery::new(" # ", "9876543210"),
            OrderQuery::new("1001", "   "),
        ] {
            let err = track_order(&search, &query, &TrackingLinks::default(), None::<&CountingProbe>)
                .await
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MissingParams);
        }
    }

    #[derive(Default)]
    struct CountingSearch(AtomicUsize);

    impl OrderSearch for CountingSearch {
        async fn search_orders(&self, _: &str) -> Result<Vec<CandidateOrder>, ShopifyError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(vec![order_with_phone("9876543210")])
        }
    }

    struct StalledProbe;

    impl DiagnosticsProbe for StalledProbe {
        async fn collect_diagnostics(&self) -> Diagnostics {
            std::future::pending::<()>().await;
            Diagnostics::default()
        }
    }

    #[tokio::test]
    async fn phone_without_digits_is_missing_params_without_searching() {
        let search = CountingSearch::default();
        for phone in ["call me", "+-- ()", "n/a"] {
            let err = track_order(
                &search,
                &OrderQuery::new("1001", phone),
                &TrackingLinks::default(),
                None::<&CountingProbe>,
            )
            .await
            .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MissingParams, "{phone:?}");
        }
        assert_eq!(search.0.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_diagnostics_give_up_after_timeout() {
        let search = StaticSearch(Vec::new());
        let err = track_order(
            &search,
            &OrderQuery::new("9999", "9876543210"),
            &TrackingLinks::default(),
            Some(&StalledProbe),
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            TrackError::NotFound { diagnostics: None, .. }
        ));
    }

    #[tokio::test]
    async fn verified_order_is_normalized() {
        let search = StaticSearch(vec![order_with_phone("+91 98765 43210")]);
        let order = track_order(
            &search,
            &OrderQuery::new("1001", "9876543210"),
            &TrackingLinks::default(),
            None::<&CountingProbe>,
        )
        .await
        .unwrap();
        assert_eq!(order.name, "#1001");
        assert_eq!(order.status, "fulfilled");
    }

    #[tokio::test]
    async fn mismatch_runs_probe_once_and_keeps_kind() {
        let search = StaticSearch(vec![order_with_phone("9000001234")]);
        let probe = CountingProbe::default();
        let err = track_order(
            &search,
            &OrderQuery::new("#1001", "9876543210"),
            &TrackingLinks::default(),
            Some(&probe),
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PhoneMismatch);
        assert_eq!(probe.0.load(Ordering::SeqCst), 1);
        match err {
            TrackError::PhoneMismatch {
                hints, diagnostics, ..
            } => {
                assert_eq!(hints, vec!["•••••• 1234".to_owned()]);
                assert_eq!(diagnostics, Some(Diagnostics::default()));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn not_found_without_probe_has_no_diagnostics() {
        let err = track_order(
            &StaticSearch(Vec::new()),
            &OrderQuery::new("9999", "9876543210"),
            &TrackingLinks::default(),
            None::<&CountingProbe>,
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            TrackError::NotFound { ref order_number, diagnostics: None } if order_number == "#9999"
        ));
    }

    #[test]
    fn mismatch_message_shows_last_digits_only() {
        let err = TrackError::PhoneMismatch {
            order_number: "#1001".to_owned(),
            hints: vec!["•••••• 1234".to_owned()],
            diagnostics: None,
        };
        assert_eq!(
            err.client_message(),
            "That phone number doesn't match this order. Try the number ending 1234."
        );
    }

    #[test]
    fn upstream_status_errors_map_to_admin_api_error() {
        let err = TrackError::from_upstream(ShopifyError::UnexpectedStatus {
            status: 401,
            url: "https://demo.myshopify.com/admin/api/2025-01/orders.json".to_owned(),
        });
        assert_eq!(err.kind(), ErrorKind::AdminApiError);
        assert_eq!(err.upstream_status(), Some(401));
    }

    #[test]
    fn graphql_errors_map_to_admin_api_error_without_status() {
        let err = TrackError::from_upstream(ShopifyError::GraphQl {
            url: "u".to_owned(),
            messages: vec!["Throttled".to_owned()],
        });
        assert_eq!(err.kind(), ErrorKind::AdminApiError);
        assert_eq!(err.upstream_status(), None);
    }

    #[test]
    fn bad_base_url_is_internal() {
        let err = TrackError::from_upstream(ShopifyError::InvalidBaseUrl {
            base_url: "x".to_owned(),
            reason: "relative URL without a base".to_owned(),
        });
        assert_eq!(err.kind(), ErrorKind::InternalError);
    }
}
