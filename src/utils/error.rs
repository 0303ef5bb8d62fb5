use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Bad payload: {reason}")]
    Validation { reason: String },

    #[error("Telegram not configured: {message}")]
    NotConfigured { message: String },

    #[error("Configuration error: {field}: {reason}")]
    Config { field: String, reason: String },

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP server error: {0}")]
    Server(#[from] hyper::Error),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl RelayError {
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    pub fn not_configured(message: impl Into<String>) -> Self {
        Self::NotConfigured {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;
