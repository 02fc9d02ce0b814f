use crate::app_config::{AdminApiSurface, AppConfig, Environment};
use crate::order::DEFAULT_TRACKING_LOOKUP_URL;
use crate::profile::{parse_discount_codes, StoreProfile};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_bool = |var: &str, default: bool| -> Result<bool, ConfigError> {
        match optional(var).map(|v| v.to_ascii_lowercase()).as_deref() {
            None => Ok(default),
            Some("1" | "true" | "yes" | "on") => Ok(true),
            Some("0" | "false" | "no" | "off") => Ok(false),
            Some(other) => Err(invalid(var, format!("expected a boolean, got \"{other}\""))),
        }
    };

    let shop_domain = require("GLEURA_SHOP_DOMAIN")?;
    let admin_access_token = require("GLEURA_ADMIN_ACCESS_TOKEN")?;

    let env = parse_environment(&or_default("GLEURA_ENV", "development"));

    let bind_addr = or_default("GLEURA_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("GLEURA_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("GLEURA_LOG_LEVEL", "info");

    let admin_api_version = or_default("GLEURA_ADMIN_API_VERSION", "2025-01");
    let admin_api_surface = parse_surface(&or_default("GLEURA_ADMIN_API_SURFACE", "rest"))
        .ok_or_else(|| {
            invalid(
                "GLEURA_ADMIN_API_SURFACE",
                "expected \"rest\" or \"graphql\"".to_owned(),
            )
        })?;
    let admin_base_url = optional("GLEURA_ADMIN_BASE_URL");
    let admin_request_timeout_secs = parse_u64("GLEURA_ADMIN_REQUEST_TIMEOUT_SECS", "15")?;
    let user_agent = or_default("GLEURA_USER_AGENT", "gleura/0.1 (support-chat)");
    let tracking_lookup_url = or_default("GLEURA_TRACKING_LOOKUP_URL", DEFAULT_TRACKING_LOOKUP_URL);
    let diagnostics_enabled = parse_bool("GLEURA_DIAGNOSTICS_ENABLED", true)?;

    let subscription_active = parse_bool("GLEURA_SUBSCRIPTION_ACTIVE", true)?;
    let chat_limit = optional("GLEURA_CHAT_LIMIT")
        .map(|raw| {
            raw.parse::<u64>()
                .map_err(|e| invalid("GLEURA_CHAT_LIMIT", e.to_string()))
        })
        .transpose()?;
    let rate_limit_per_minute = or_default("GLEURA_RATE_LIMIT_PER_MINUTE", "120")
        .parse::<usize>()
        .map_err(|e| invalid("GLEURA_RATE_LIMIT_PER_MINUTE", e.to_string()))?;

    let defaults = StoreProfile::default();
    let store = StoreProfile {
        title: optional("GLEURA_STORE_TITLE").unwrap_or(defaults.title),
        support_phone: optional("GLEURA_SUPPORT_PHONE"),
        support_email: optional("GLEURA_SUPPORT_EMAIL"),
        support_hours: optional("GLEURA_SUPPORT_HOURS"),
        return_message: optional("GLEURA_RETURN_MESSAGE").unwrap_or(defaults.return_message),
        shipping_message: optional("GLEURA_SHIPPING_MESSAGE")
            .unwrap_or(defaults.shipping_message),
        discount_codes: optional("GLEURA_DISCOUNT_CODES")
            .map(|raw| parse_discount_codes(&raw))
            .unwrap_or_default(),
    };

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        shop_domain,
        admin_access_token,
        admin_api_version,
        admin_api_surface,
        admin_base_url,
        admin_request_timeout_secs,
        user_agent,
        tracking_lookup_url,
        diagnostics_enabled,
        subscription_active,
        chat_limit,
        rate_limit_per_minute,
        store,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

fn parse_surface(s: &str) -> Option<AdminApiSurface> {
    match s.trim().to_ascii_lowercase().as_str() {
        "rest" => Some(AdminApiSurface::Rest),
        "graphql" => Some(AdminApiSurface::GraphQl),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
