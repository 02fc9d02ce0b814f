//! `POST /api/chat`: the widget's single endpoint, dispatched on `action`.

use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
    Extension, Json,
};
use gleura_core::{ErrorKind, NormalizedOrder};
use gleura_intent::{respond, Confidence, Intent};
use gleura_shopify::{diagnose, track_order, AdminClient, OrderQuery, TrackError};
use serde::Serialize;
use serde_json::Value;

use crate::gate::UsageEvent;
use crate::middleware::RequestId;
use crate::render::order_summary_html;

use super::{AppState, ChatFailure};

/// Request fields the endpoint understands. Parsed leniently: a body that is
/// not JSON reads as `{}`, and numbers are accepted where text is expected.
#[derive(Debug, Default, PartialEq, Eq)]
pub(super) struct ChatRequest {
    pub action: Option<String>,
    pub order_number: Option<String>,
    pub phone_number: Option<String>,
    pub message: Option<String>,
    pub shop: Option<String>,
    pub session_id: Option<String>,
}

impl ChatRequest {
    pub(super) fn parse(body: &[u8]) -> Self {
        let value: Value = serde_json::from_slice(body).unwrap_or(Value::Null);
        let text = |key: &str| match value.get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };
        Self {
            action: text("action"),
            order_number: text("orderNumber"),
            phone_number: text("phoneNumber"),
            message: text("message"),
            shop: text("shop").filter(|s| !s.trim().is_empty()),
            session_id: text("sessionId"),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatOk<T: Serialize> {
    ok: bool,
    #[serde(flatten)]
    body: T,
}

fn ok<T: Serialize>(body: T) -> Response {
    Json(ChatOk { ok: true, body }).into_response()
}

#[derive(Debug, Serialize)]
struct Pong {
    pong: bool,
}

#[derive(Debug, Serialize)]
struct TrackedOrder {
    order: NormalizedOrder,
    response: String,
}

#[derive(Debug, Serialize)]
struct ScriptedReply {
    #[serde(skip_serializing_if = "Option::is_none")]
    intent: Option<Intent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    confidence: Option<Confidence>,
    response: String,
}

pub(super) async fn chat(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Bytes,
) -> Response {
    let request = ChatRequest::parse(&body);
    let action = request.action.clone();

    match action.as_deref().map(str::trim) {
        Some("ping") => ok(Pong { pong: true }),
        Some("track_order") => track(&state, req_id, request).await,
        Some("discounts") => ok(ScriptedReply {
            intent: None,
            confidence: None,
            response: state.store.discounts_html(),
        }),
        None | Some("") if request.message.as_deref().is_some_and(|m| !m.trim().is_empty()) => {
            message(&state, req_id, request).await
        }
        other => {
            tracing::debug!(action = ?other, "unknown chat action");
            ChatFailure::new(
                ErrorKind::UnknownAction,
                "Sorry, I didn't understand that request.",
            )
            .into_response()
        }
    }
}

async fn track(state: &AppState, req_id: RequestId, request: ChatRequest) -> Response {
    let shop = shop_key(state, &request);
    if let Err(rejection) = state.gate.admit(&shop).await {
        tracing::info!(shop = %shop, kind = %rejection.kind(), "chat refused by gate");
        return ChatFailure::new(rejection.kind(), rejection.message()).into_response();
    }

    let query = OrderQuery::new(
        request.order_number.unwrap_or_default(),
        request.phone_number.unwrap_or_default(),
    );
    let result =
        track_order(state.admin.as_ref(), &query, &state.links, None::<&AdminClient>).await;
    if state.diagnostics_enabled {
        if let Err(e) = &result {
            spawn_diagnostics(state, e);
        }
    }

    let outcome = result
        .as_ref()
        .map_or_else(|e| e.kind().as_str(), |_| "ok");
    log_usage(state, &req_id, shop, request.session_id, "track_order", outcome);

    match result {
        Ok(order) => match order_summary_html(&order) {
            Ok(response) => ok(TrackedOrder { order, response }),
            Err(e) => {
                tracing::error!(error = %e, "order summary rendering failed");
                ChatFailure::new(
                    ErrorKind::InternalError,
                    "Something went wrong on our side. Please try again.",
                )
                .into_response()
            }
        },
        Err(e) => track_failure(&req_id, &e).into_response(),
    }
}

/// Diagnostics for a negative lookup run detached; the shopper's answer never
/// waits on them.
fn spawn_diagnostics(state: &AppState, error: &TrackError) {
    let (order_number, outcome) = match error {
        TrackError::NotFound { order_number, .. } => (order_number.clone(), "not found"),
        TrackError::PhoneMismatch { order_number, .. } => (order_number.clone(), "phone mismatch"),
        _ => return,
    };
    let admin = state.admin.clone();
    tokio::spawn(async move {
        diagnose(admin.as_ref(), &order_number, outcome).await;
    });
}

fn track_failure(req_id: &RequestId, error: &TrackError) -> ChatFailure {
    match error {
        TrackError::AdminApi { .. } | TrackError::Unavailable { .. } | TrackError::Internal { .. } => {
            tracing::error!(request_id = %req_id.0, error = %error, "order lookup failed");
        }
        TrackError::MissingParams | TrackError::NotFound { .. } | TrackError::PhoneMismatch { .. } => {
            tracing::info!(request_id = %req_id.0, kind = %error.kind(), "order lookup refused");
        }
    }
    ChatFailure::new(error.kind(), error.client_message()).with_status(error.upstream_status())
}

async fn message(state: &AppState, req_id: RequestId, request: ChatRequest) -> Response {
    let shop = shop_key(state, &request);
    if let Err(rejection) = state.gate.admit(&shop).await {
        return ChatFailure::new(rejection.kind(), rejection.message()).into_response();
    }

    let text = request.message.unwrap_or_default();
    let reply = respond(&text, &state.store);
    log_usage(state, &req_id, shop, request.session_id, "message", "ok");

    ok(ScriptedReply {
        intent: Some(reply.intent),
        confidence: Some(reply.confidence),
        response: reply.html,
    })
}

/// Quota and usage are keyed on the configured shop; a differing `shop` in
/// the body is logged and ignored.
fn shop_key(state: &AppState, request: &ChatRequest) -> String {
    if let Some(claimed) = request
        .shop
        .as_deref()
        .filter(|shop| !shop.eq_ignore_ascii_case(&state.default_shop))
    {
        tracing::debug!(claimed, configured = %state.default_shop, "ignoring request shop");
    }
    state.default_shop.clone()
}

/// Fire-and-forget: the response never waits on, or fails because of, usage
/// accounting.
fn log_usage(
    state: &AppState,
    req_id: &RequestId,
    shop: String,
    session_id: Option<String>,
    action: &'static str,
    outcome: &'static str,
) {
    let usage = state.usage.clone();
    let event = UsageEvent {
        request_id: req_id.0.clone(),
        shop,
        session_id,
        action,
        outcome,
    };
    tokio::spawn(async move {
        if let Err(e) = usage.record(event).await {
            tracing::warn!(error = %e, "usage logging failed");
        }
    });
}
