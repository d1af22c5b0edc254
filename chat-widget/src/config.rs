//! Widget configuration
//!
//! Every field has a default, so an empty JSON object (or no config at all)
//! yields the stock widget talking to `/api/chat`.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::theme::Theme;

pub const DEFAULT_ENDPOINT: &str = "/api/chat";
pub const DEFAULT_THEME_STORAGE_KEY: &str = "theme";
pub const DEFAULT_COPY_FEEDBACK_MS: u32 = 2000;
pub const DEFAULT_APOLOGY_PREFIX: &str = "Sorry, there was an error processing your request";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Chat endpoint, relative to the page origin or absolute
    pub endpoint: String,
    /// Local-storage key holding the theme name
    pub theme_storage_key: String,
    /// Theme used when nothing valid is persisted
    pub default_theme: Theme,
    /// CSS selector of the element receiving the theme class; `None` is `<body>`
    pub root_selector: Option<String>,
    pub copy_label: String,
    pub copied_label: String,
    /// How long the copied acknowledgment stays on a copy button
    pub copy_feedback_ms: u32,
    pub apology_prefix: String,
    /// Run `hljs` over new code blocks when the page provides it
    pub highlight: bool,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            theme_storage_key: DEFAULT_THEME_STORAGE_KEY.to_string(),
            default_theme: Theme::Light,
            root_selector: None,
            copy_label: "Copy".to_string(),
            copied_label: "Copied!".to_string(),
            copy_feedback_ms: DEFAULT_COPY_FEEDBACK_MS,
            apology_prefix: DEFAULT_APOLOGY_PREFIX.to_string(),
            highlight: true,
        }
    }
}

impl WidgetConfig {
    pub fn from_json(raw: &str) -> ConfigResult<Self> {
        let config: WidgetConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let endpoint = self.endpoint.trim();
        if endpoint.is_empty() {
            return Err(ConfigError::Invalid("endpoint must not be empty".to_string()));
        }
        if !(endpoint.starts_with('/') || endpoint.starts_with("http")) {
            return Err(ConfigError::Invalid(format!(
                "endpoint '{endpoint}' must be a path or an http(s) URL"
            )));
        }
        if self.theme_storage_key.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "theme_storage_key must not be empty".to_string(),
            ));
        }
        if self.copy_feedback_ms == 0 {
            return Err(ConfigError::Invalid(
                "copy_feedback_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
