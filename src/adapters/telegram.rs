//! HTTP client for the Telegram Bot API `sendMessage` and `getMe` calls.
//!
//! Failures are reported as [`SendAttempt`] values rather than errors:
//! the dispatcher aggregates them per chat and chunk, and a single bad
//! attempt must not abort the whole fan-out.

use crate::domain::model::Dialect;
use crate::domain::ports::{ChunkSender, SendAttempt};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
    disable_web_page_preview: bool,
}

pub struct TelegramClient {
    http: Client,
    /// `{api_base}/bot{token}`.
    base_url: String,
}

impl TelegramClient {
    pub fn new(api_base: &str, token: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: format!("{}/bot{token}", api_base.trim_end_matches('/')),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Read the response envelope leniently: `http_ok` from the status
    /// line, the body as JSON or `{}` when unparseable, `tg_ok` from the
    /// remote's own `ok` flag.
    async fn read_envelope(response: reqwest::Response) -> SendAttempt {
        let http_ok = response.status().is_success();
        let body: Value = response.json().await.unwrap_or_else(|_| Value::Object(Default::default()));
        let tg_ok = body.get("ok").and_then(Value::as_bool).unwrap_or(false);
        SendAttempt {
            http_ok,
            tg_ok,
            body,
        }
    }
}

#[async_trait]
impl ChunkSender for TelegramClient {
    async fn send_chunk(
        &self,
        chat_id: &str,
        text: &str,
        dialect: Dialect,
        timeout: Duration,
    ) -> SendAttempt {
        let url = format!("{}/sendMessage", self.base_url);
        let request = SendMessageRequest {
            chat_id,
            text,
            parse_mode: dialect.parse_mode(),
            disable_web_page_preview: true,
        };

        debug!(chat_id, chars = text.chars().count(), "sending chunk");

        match self
            .http
            .post(&url)
            .timeout(timeout)
            .json(&request)
            .send()
            .await
        {
            Ok(response) => Self::read_envelope(response).await,
            Err(e) => {
                debug!(chat_id, error = %e, "send failed");
                SendAttempt::transport_failure(e)
            }
        }
    }

    async fn identity_check(&self, timeout: Duration) -> SendAttempt {
        let url = format!("{}/getMe", self.base_url);

        debug!("verifying bot token");

        match self.http.get(&url).timeout(timeout).send().await {
            Ok(response) => Self::read_envelope(response).await,
            Err(e) => SendAttempt::transport_failure(e),
        }
    }
}
