//! Deterministic keyword intent matching and scripted replies for the
//! support chat. No model, no scoring: an ordered rule table decides.

mod classifier;
mod intent;
mod reply;

pub use classifier::classify;
pub use intent::{Classification, Confidence, Intent};
pub use reply::{reply, respond, IntentReply, MENU_HINT};
