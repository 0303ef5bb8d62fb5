use crate::utils::error::{RelayError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn require_non_empty(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RelayError::validation(format!(
            "{field_name} is required"
        )));
    }
    Ok(())
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(RelayError::Config {
                field: field_name.to_string(),
                reason: format!("Unsupported URL scheme: {scheme}"),
            }),
        },
        Err(e) => Err(RelayError::Config {
            field: field_name.to_string(),
            reason: format!("Invalid URL: {e}"),
        }),
    }
}
