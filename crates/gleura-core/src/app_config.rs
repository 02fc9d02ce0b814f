use std::net::SocketAddr;

use crate::profile::StoreProfile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Which Admin API flavour order searches go through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminApiSurface {
    Rest,
    GraphQl,
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// `my-store.myshopify.com`
    pub shop_domain: String,
    pub admin_access_token: String,
    pub admin_api_version: String,
    pub admin_api_surface: AdminApiSurface,
    /// Overrides `https://{shop_domain}` as the Admin API origin.
    pub admin_base_url: Option<String>,
    pub admin_request_timeout_secs: u64,
    pub user_agent: String,
    pub tracking_lookup_url: String,
    pub diagnostics_enabled: bool,
    pub subscription_active: bool,
    pub chat_limit: Option<u64>,
    pub rate_limit_per_minute: usize,
    pub store: StoreProfile,
}

impl AppConfig {
    /// Admin API origin: the explicit override, else `https://{shop_domain}`.
    #[must_use]
    pub fn admin_origin(&self) -> String {
        self.admin_base_url
            .clone()
            .unwrap_or_else(|| format!("https://{}", self.shop_domain))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("shop_domain", &self.shop_domain)
            .field("admin_access_token", &"[redacted]")
            .field("admin_api_version", &self.admin_api_version)
            .field("admin_api_surface", &self.admin_api_surface)
            .field("admin_base_url", &self.admin_base_url)
            .field(
                "admin_request_timeout_secs",
                &self.admin_request_timeout_secs,
            )
            .field("user_agent", &self.user_agent)
            .field("tracking_lookup_url", &self.tracking_lookup_url)
            .field("diagnostics_enabled", &self.diagnostics_enabled)
            .field("subscription_active", &self.subscription_active)
            .field("chat_limit", &self.chat_limit)
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .field("store", &self.store)
            .finish()
    }
}
