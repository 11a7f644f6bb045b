//! Environment configuration for the commentary service.

use std::sync::Arc;
use std::time::Duration;

use crate::commentator::{Commentator, FallbackCommentator};
use crate::error::CommentaryError;
use crate::gemini::GeminiCommentator;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TIMEOUT_MS: u64 = 4000;

/// Keys checked in order for the API key.
const API_KEY_VARS: [&str; 3] = ["SHEEP_COMMENTARY_API_KEY", "GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentaryConfig {
    pub disabled: bool,
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for CommentaryConfig {
    fn default() -> Self {
        Self {
            disabled: false,
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl CommentaryConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            get(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };

        let disabled = non_empty("SHEEP_COMMENTARY_DISABLED")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);
        let api_key = API_KEY_VARS.iter().find_map(|key| non_empty(*key));
        let model = non_empty("SHEEP_COMMENTARY_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let endpoint = non_empty("SHEEP_COMMENTARY_ENDPOINT")
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let timeout_ms = non_empty("SHEEP_COMMENTARY_TIMEOUT_MS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_MS);

        Self {
            disabled,
            api_key,
            model,
            endpoint,
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    /// True when the remote service will be called.
    pub fn is_enabled(&self) -> bool {
        !self.disabled && self.api_key.is_some()
    }

    /// The commentator this configuration selects.
    pub fn build_commentator(&self) -> Result<Arc<dyn Commentator>, CommentaryError> {
        match &self.api_key {
            Some(key) if !self.disabled => Ok(Arc::new(GeminiCommentator::new(
                key.clone(),
                self.model.clone(),
                self.endpoint.clone(),
            )?)),
            _ => Ok(Arc::new(FallbackCommentator)),
        }
    }
}
