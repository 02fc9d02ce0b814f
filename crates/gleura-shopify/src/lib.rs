pub mod client;
pub mod error;
pub mod normalize;
pub mod ownership;
pub mod track;
pub mod types;

pub use client::{AdminClient, Diagnostics, DiagnosticsProbe, OrderSearch, SearchHit};
pub use error::ShopifyError;
pub use normalize::{coerce_order, normalize_order};
pub use ownership::{verify_ownership, Ownership};
pub use track::{diagnose, track_order, OrderQuery, TrackError, DIAGNOSTICS_TIMEOUT};
pub use types::CandidateOrder;
