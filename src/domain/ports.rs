use crate::domain::model::Dialect;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// Raw result of one outbound Bot API call. `http_ok` reflects the
/// transport layer, `tg_ok` the remote's own acceptance flag.
#[derive(Debug, Clone)]
pub struct SendAttempt {
    pub http_ok: bool,
    pub tg_ok: bool,
    pub body: Value,
}

impl SendAttempt {
    pub fn transport_failure(error: impl std::fmt::Display) -> Self {
        Self {
            http_ok: false,
            tg_ok: false,
            body: serde_json::json!({ "error": error.to_string() }),
        }
    }
}

/// Outbound seam between the dispatcher and the Telegram adapter.
///
/// The timeout is an explicit per-call argument: a call that exceeds it
/// must resolve to a transport-failure attempt, never hang.
#[async_trait]
pub trait ChunkSender: Send + Sync {
    async fn send_chunk(
        &self,
        chat_id: &str,
        text: &str,
        dialect: Dialect,
        timeout: Duration,
    ) -> SendAttempt;

    /// `getMe` credential probe backing the selftest endpoint.
    async fn identity_check(&self, timeout: Duration) -> SendAttempt;
}

#[async_trait]
impl<T: ChunkSender + ?Sized> ChunkSender for std::sync::Arc<T> {
    async fn send_chunk(
        &self,
        chat_id: &str,
        text: &str,
        dialect: Dialect,
        timeout: Duration,
    ) -> SendAttempt {
        (**self).send_chunk(chat_id, text, dialect, timeout).await
    }

    async fn identity_check(&self, timeout: Duration) -> SendAttempt {
        (**self).identity_check(timeout).await
    }
}
