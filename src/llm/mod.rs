mod fallbacks;
mod format_validator;
mod generation_client;
mod message;
pub mod providers;
mod schemas;

pub use format_validator::*;
pub use generation_client::*;
pub use message::*;
pub use schemas::*;
