pub mod adapters;
pub mod api;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::telegram::TelegramClient;
pub use crate::api::AppState;
pub use crate::config::AppConfig;
pub use crate::core::dispatch::Dispatcher;
pub use crate::utils::error::{RelayError, Result};
