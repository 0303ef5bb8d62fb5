//! Orchestrates validate → render → chunk → fan-out over the configured
//! chats and aggregates per-attempt outcomes.

use crate::config::AppConfig;
use crate::core::chunk::{split_message, TELEGRAM_SAFE_LIMIT};
use crate::core::render::{render_contact, render_order};
use crate::domain::model::{
    ContactSubmission, DeliveryOutcome, DeliveryReport, OrderSubmission, RenderedMessage,
};
use crate::domain::ports::{ChunkSender, SendAttempt};
use crate::utils::error::{RelayError, Result};
use crate::utils::validation::{require_non_empty, Validate};
use std::sync::Arc;

impl Validate for OrderSubmission {
    fn validate(&self) -> Result<()> {
        require_non_empty("customer.name", &self.customer.name)?;
        require_non_empty("customer.phone", &self.customer.phone)?;
        if self.items.is_empty() && self.plan.is_none() {
            return Err(RelayError::validation(
                "either items or a plan is required",
            ));
        }
        Ok(())
    }
}

impl Validate for ContactSubmission {
    fn validate(&self) -> Result<()> {
        require_non_empty("name", &self.name)?;
        require_non_empty("phone", &self.phone)?;
        require_non_empty("message", &self.message)?;
        Ok(())
    }
}

pub struct Dispatcher<S: ChunkSender> {
    config: Arc<AppConfig>,
    sender: S,
}

impl<S: ChunkSender> Dispatcher<S> {
    pub fn new(config: Arc<AppConfig>, sender: S) -> Self {
        Self { config, sender }
    }

    pub async fn dispatch_order(&self, order: &OrderSubmission) -> Result<DeliveryReport> {
        order.validate()?;
        self.ensure_configured()?;
        let message = render_order(order, self.config.dialect, self.config.currency_style);
        tracing::info!(
            items = order.items.len(),
            plan = order.plan.is_some(),
            "dispatching order"
        );
        self.deliver(&message).await
    }

    pub async fn dispatch_contact(&self, contact: &ContactSubmission) -> Result<DeliveryReport> {
        contact.validate()?;
        self.ensure_configured()?;
        let message = render_contact(contact, self.config.dialect);
        tracing::info!("dispatching contact message");
        self.deliver(&message).await
    }

    /// `getMe` probe for the selftest endpoint.
    pub async fn self_test(&self) -> Result<SendAttempt> {
        if self.config.bot_token.is_empty() {
            return Err(RelayError::not_configured("missing bot token"));
        }
        Ok(self.sender.identity_check(self.config.send_timeout).await)
    }

    fn ensure_configured(&self) -> Result<()> {
        if self.config.bot_token.is_empty() {
            return Err(RelayError::not_configured("missing bot token"));
        }
        if self.config.chat_ids.is_empty() {
            return Err(RelayError::not_configured("no chat ids configured"));
        }
        Ok(())
    }

    /// Chats in configured order; chunks strictly in order within a chat,
    /// stopping that chat on the first failed chunk. Other chats are
    /// still attempted.
    async fn deliver(&self, message: &RenderedMessage) -> Result<DeliveryReport> {
        let chunks = split_message(&message.text, TELEGRAM_SAFE_LIMIT);
        tracing::debug!(
            chunks = chunks.len(),
            chars = message.text.chars().count(),
            "message rendered"
        );

        if self.config.dry_run {
            tracing::info!("dry run enabled, skipping delivery");
            return Ok(DeliveryReport::default());
        }

        let mut outcomes = Vec::new();
        for chat_id in &self.config.chat_ids {
            for (index, chunk) in chunks.iter().enumerate() {
                let attempt = self
                    .sender
                    .send_chunk(chat_id, chunk, message.dialect, self.config.send_timeout)
                    .await;
                let outcome = DeliveryOutcome {
                    chat_id: chat_id.clone(),
                    chunk: index,
                    http_ok: attempt.http_ok,
                    tg_ok: attempt.tg_ok,
                    body: attempt.body,
                };
                let accepted = outcome.accepted();
                outcomes.push(outcome);
                if !accepted {
                    tracing::warn!(chat_id = %chat_id, chunk = index, "chunk delivery failed, abandoning chat");
                    break;
                }
            }
        }

        let report = DeliveryReport { outcomes };
        if report.all_ok() {
            tracing::info!(attempts = report.outcomes.len(), "delivery complete");
        } else {
            tracing::warn!(attempts = report.outcomes.len(), "delivery failed");
        }
        Ok(report)
    }
}
