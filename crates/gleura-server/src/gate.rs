//! Collaborators consulted around the chat actions: the subscription/quota
//! gate that runs before a lookup, and the usage logger that runs after.

use std::collections::HashMap;

use futures::future::BoxFuture;
use gleura_core::ErrorKind;
use tokio::sync::Mutex;

/// Why a shop was refused service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateRejection {
    NoSubscription,
    LimitExceeded { limit: u64 },
}

impl GateRejection {
    #[must_use]
    pub fn kind(self) -> ErrorKind {
        match self {
            GateRejection::NoSubscription => ErrorKind::NoSubscription,
            GateRejection::LimitExceeded { .. } => ErrorKind::LimitExceeded,
        }
    }

    #[must_use]
    pub fn message(self) -> String {
        match self {
            GateRejection::NoSubscription => {
                "Chat support is not active for this store.".to_owned()
            }
            GateRejection::LimitExceeded { limit } => {
                format!("This store has used all {limit} chats in its plan.")
            }
        }
    }
}

/// Decides whether a shop may use the chat. Consulted before any lookup.
pub trait SubscriptionGate: Send + Sync {
    fn admit<'a>(&'a self, shop: &'a str) -> BoxFuture<'a, Result<(), GateRejection>>;
}

/// Subscription flag plus an optional per-shop chat allowance, counted in
/// memory for the lifetime of the process.
#[derive(Debug)]
pub struct QuotaGate {
    subscription_active: bool,
    limit: Option<u64>,
    used: Mutex<HashMap<String, u64>>,
}

impl QuotaGate {
    #[must_use]
    pub fn new(subscription_active: bool, limit: Option<u64>) -> Self {
        Self {
            subscription_active,
            limit,
            used: Mutex::new(HashMap::new()),
        }
    }
}

impl SubscriptionGate for QuotaGate {
    fn admit<'a>(&'a self, shop: &'a str) -> BoxFuture<'a, Result<(), GateRejection>> {
        Box::pin(async move {
            if !self.subscription_active {
                return Err(GateRejection::NoSubscription);
            }
            let Some(limit) = self.limit else {
                return Ok(());
            };

            let mut used = self.used.lock().await;
            let count = used.entry(shop.to_owned()).or_insert(0);
            if *count >= limit {
                return Err(GateRejection::LimitExceeded { limit });
            }
            *count += 1;
            Ok(())
        })
    }
}

/// One handled chat action, as recorded for usage accounting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageEvent {
    pub request_id: String,
    pub shop: String,
    pub session_id: Option<String>,
    pub action: &'static str,
    /// `"ok"` or the wire error kind.
    pub outcome: &'static str,
}

/// Receives usage events. Called from a spawned task; failures are logged
/// by the caller and never reach the shopper.
pub trait UsageLogger: Send + Sync {
    fn record(&self, event: UsageEvent) -> BoxFuture<'_, anyhow::Result<()>>;
}

/// Emits each event as a structured `tracing` record.
#[derive(Debug, Default)]
pub struct TracingUsageLogger;

impl UsageLogger for TracingUsageLogger {
    fn record(&self, event: UsageEvent) -> BoxFuture<'_, anyhow::Result<()>> {
        Box::pin(async move {
            tracing::info!(
                target: "gleura::usage",
                request_id = %event.request_id,
                shop = %event.shop,
                session_id = event.session_id.as_deref().unwrap_or("-"),
                action = event.action,
                outcome = event.outcome,
                "chat usage"
            );
            Ok(())
        })
    }
}
