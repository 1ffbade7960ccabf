pub mod bootstrap;
pub mod channel;
pub mod client;
pub mod dispatch;
pub mod error;
pub mod form;

pub use bootstrap::{load_stats, seed_charts};
pub use channel::ControlChannel;
pub use client::ApiClient;
pub use dispatch::{CommandDispatcher, GENERIC_FAILURE};
pub use error::{ControlError, Result};
pub use form::ControlForm;
