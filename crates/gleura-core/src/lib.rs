pub mod app_config;
pub mod config;
pub mod error;
pub mod order;
pub mod order_number;
pub mod phone;
pub mod profile;

pub use app_config::{AdminApiSurface, AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, ErrorKind};
pub use order::{is_web_url, NormalizedOrder, Tracking, TrackingLinks, UNKNOWN};
pub use order_number::OrderNumberForms;
pub use phone::{canonical_phone, mask_phone, phones_match};
pub use profile::{parse_discount_codes, DiscountCode, StoreProfile};
