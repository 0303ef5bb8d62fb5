pub mod chunk;
pub mod currency;
pub mod dispatch;
pub mod escape;
pub mod render;

pub use crate::domain::model::{DeliveryOutcome, DeliveryReport, Dialect, RenderedMessage};
pub use crate::domain::ports::{ChunkSender, SendAttempt};
pub use crate::utils::error::Result;
