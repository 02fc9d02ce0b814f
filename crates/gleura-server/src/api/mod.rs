mod chat;

use std::{any::Any, sync::Arc};

use axum::{
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use gleura_core::{AppConfig, ErrorKind, StoreProfile, TrackingLinks};
use gleura_shopify::{AdminClient, ShopifyError};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer, cors::CorsLayer, set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::gate::{QuotaGate, SubscriptionGate, TracingUsageLogger, UsageLogger};
use crate::middleware::{enforce_rate_limit, request_id, RateLimitState, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub admin: Arc<AdminClient>,
    pub store: Arc<StoreProfile>,
    pub links: TrackingLinks,
    /// Shop key for quota and usage accounting.
    pub default_shop: String,
    pub diagnostics_enabled: bool,
    pub gate: Arc<dyn SubscriptionGate>,
    pub usage: Arc<dyn UsageLogger>,
}

impl AppState {
    /// Wires the Admin API client and the default collaborators from config.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError`] if the Admin API client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, ShopifyError> {
        Ok(Self {
            admin: Arc::new(AdminClient::from_config(config)?),
            store: Arc::new(config.store.clone()),
            links: TrackingLinks::new(config.tracking_lookup_url.clone()),
            default_shop: config.shop_domain.clone(),
            diagnostics_enabled: config.diagnostics_enabled,
            gate: Arc::new(QuotaGate::new(config.subscription_active, config.chat_limit)),
            usage: Arc::new(TracingUsageLogger),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

/// `{ok: false, error, message, status?}`, the failure body of every chat
/// action. The HTTP status follows from `error`.
#[derive(Debug, Serialize)]
pub struct ChatFailure {
    ok: bool,
    error: ErrorKind,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
}

impl ChatFailure {
    pub fn new(error: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            error,
            message: message.into(),
            status: None,
        }
    }

    /// Attaches the upstream HTTP status (`ADMIN_API_ERROR` only).
    #[must_use]
    pub fn with_status(mut self, status: Option<u16>) -> Self {
        self.status = status;
        self
    }
}

impl IntoResponse for ChatFailure {
    fn into_response(self) -> Response {
        (status_for(self.error), Json(self)).into_response()
    }
}

pub(crate) fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::MissingParams | ErrorKind::UnknownAction => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::PhoneMismatch => StatusCode::FORBIDDEN,
        ErrorKind::AdminApiError => StatusCode::BAD_GATEWAY,
        ErrorKind::UpstreamUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::NoSubscription => StatusCode::PAYMENT_REQUIRED,
        ErrorKind::LimitExceeded => StatusCode::TOO_MANY_REQUESTS,
        ErrorKind::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

/// Panics inside a handler still answer with the chat error shape.
fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = detail, "handler panicked");
    ChatFailure::new(
        ErrorKind::InternalError,
        "Something went wrong on our side. Please try again.",
    )
    .into_response()
}

pub fn build_app(state: AppState, rate_limit: RateLimitState) -> Router {
    let chat_routes = Router::new()
        .route("/api/chat", post(chat::chat))
        .route_layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ));

    Router::new()
        .route("/api/health", get(health))
        .merge(chat_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id))
                .layer(CatchPanicLayer::custom(panic_response)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    Json(ApiResponse {
        data: HealthData { status: "ok" },
        meta: ResponseMeta::new(req_id.0),
    })
}

#[cfg(test)]
#[path = "app_test.rs"]
mod tests;
