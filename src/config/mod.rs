use crate::core::currency::CurrencyStyle;
use crate::domain::model::Dialect;
use crate::utils::error::Result;
use crate::utils::validation::{validate_url, Validate};
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_SEND_TIMEOUT_MS: u64 = 12_000;

/// Process-wide configuration, read from the environment exactly once at
/// startup and immutable afterwards. A missing credential or chat list
/// is not a startup failure: the relay endpoints answer 500 until the
/// operator fixes it.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bot_token: String,
    pub chat_ids: Vec<String>,
    pub port: u16,
    pub dialect: Dialect,
    pub currency_style: CurrencyStyle,
    pub api_base: String,
    pub send_timeout: Duration,
    pub dry_run: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let bot_token = env_string("TELEGRAM_BOT_TOKEN");
        let chat_ids = env_string("TELEGRAM_CHAT_ID")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .collect();

        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let dialect = match std::env::var("TELEGRAM_PARSE_MODE") {
            Ok(raw) => Dialect::from_name(&raw).unwrap_or_else(|| {
                tracing::warn!(value = %raw, "unknown TELEGRAM_PARSE_MODE, using MarkdownV2");
                Dialect::MarkdownV2
            }),
            Err(_) => Dialect::MarkdownV2,
        };

        let currency_style = match std::env::var("CURRENCY_STYLE") {
            Ok(raw) => CurrencyStyle::from_name(&raw).unwrap_or_else(|| {
                tracing::warn!(value = %raw, "unknown CURRENCY_STYLE, using symbol");
                CurrencyStyle::Symbol
            }),
            Err(_) => CurrencyStyle::Symbol,
        };

        let api_base = std::env::var("TELEGRAM_API_BASE")
            .ok()
            .map(|s| s.trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let send_timeout_ms = std::env::var("SEND_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_SEND_TIMEOUT_MS);

        let dry_run = matches!(
            std::env::var("TELEGRAM_DRY_RUN").as_deref(),
            Ok("1") | Ok("true") | Ok("yes")
        );

        Self {
            bot_token,
            chat_ids,
            port,
            dialect,
            currency_style,
            api_base,
            send_timeout: Duration::from_millis(send_timeout_ms.max(1)),
            dry_run,
        }
    }

    pub fn telegram_configured(&self) -> bool {
        !self.bot_token.is_empty() && !self.chat_ids.is_empty()
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_url("TELEGRAM_API_BASE", &self.api_base)?;
        Ok(())
    }
}

fn env_string(key: &str) -> String {
    std::env::var(key).unwrap_or_default()
}
