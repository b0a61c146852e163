use std::time::Duration;

use thiserror::Error;

use crate::model::input::LabelStyle;

pub const DEFAULT_API_URL: &str = "https://desafioautou-c87f.onrender.com";
const DEFAULT_ERROR_DISMISS_SECS: u64 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("MAILSORT_API_URL must not be empty")]
    EmptyBaseUrl,

    #[error("MAILSORT_ERROR_DISMISS_SECS must be a whole number of seconds, got {0:?}")]
    InvalidDismissDelay(String),

    #[error("MAILSORT_LABEL_STYLE must be `plain` or `icon`, got {0:?}")]
    InvalidLabelStyle(String),
}

/// Settings shared by the API client and the submission controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub error_dismiss: Duration,
    pub label_style: LabelStyle,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.into()),
            error_dismiss: Duration::from_secs(DEFAULT_ERROR_DISMISS_SECS),
            label_style: LabelStyle::Plain,
        }
    }

    pub fn with_error_dismiss(mut self, delay: Duration) -> Self {
        self.error_dismiss = delay;
        self
    }

    pub fn with_label_style(mut self, style: LabelStyle) -> Self {
        self.label_style = style;
        self
    }

    /// Reads `MAILSORT_*` variables, loading a `.env` file first when one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup("MAILSORT_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        if base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }

        let mut config = Self::new(base_url.trim());

        if let Some(raw) = lookup("MAILSORT_ERROR_DISMISS_SECS") {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidDismissDelay(raw.clone()))?;
            config.error_dismiss = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup("MAILSORT_LABEL_STYLE") {
            config.label_style = match raw.trim().to_ascii_lowercase().as_str() {
                "plain" => LabelStyle::Plain,
                "icon" => LabelStyle::Icon,
                _ => return Err(ConfigError::InvalidLabelStyle(raw)),
            };
        }

        Ok(config)
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn normalize_base_url(raw: String) -> String {
    raw.trim_end_matches('/').to_string()
}
