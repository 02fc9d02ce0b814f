use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Error kinds returned to the storefront widget in the `error` field.
///
/// Serialized as `SCREAMING_SNAKE_CASE` (e.g. `"PHONE_MISMATCH"`), which is
/// the wire contract the widget switches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    MissingParams,
    AdminApiError,
    UpstreamUnavailable,
    NotFound,
    PhoneMismatch,
    InternalError,
    UnknownAction,
    NoSubscription,
    LimitExceeded,
}

impl ErrorKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::MissingParams => "MISSING_PARAMS",
            ErrorKind::AdminApiError => "ADMIN_API_ERROR",
            ErrorKind::UpstreamUnavailable => "UPSTREAM_UNAVAILABLE",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::PhoneMismatch => "PHONE_MISMATCH",
            ErrorKind::InternalError => "INTERNAL_ERROR",
            ErrorKind::UnknownAction => "UNKNOWN_ACTION",
            ErrorKind::NoSubscription => "NO_SUBSCRIPTION",
            ErrorKind::LimitExceeded => "LIMIT_EXCEEDED",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
