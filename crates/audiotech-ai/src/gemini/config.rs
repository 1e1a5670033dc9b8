//! Gemini API client configuration.

use crate::AiError;

/// Variable consulted when the configured one is unset.
pub const FALLBACK_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Gemini API client configuration.
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    /// Look the model up when a session is created.
    pub verify_model: bool,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("verify_model", &self.verify_model)
            .finish()
    }
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: "gemini-2.5-flash".to_string(),
            verify_model: true,
        }
    }

    /// Create config from the environment.
    ///
    /// Resolution order:
    /// 1. the variable named by `var` (e.g. `API_KEY`)
    /// 2. `GEMINI_API_KEY`
    pub fn from_env(var: &str) -> Result<Self, AiError> {
        [var, FALLBACK_API_KEY_ENV]
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|key| !key.trim().is_empty())
            .map(|key| Self::new(key.trim()))
            .ok_or_else(|| {
                AiError::NotConfigured(format!(
                    "Gemini API key missing. Set {var} or {FALLBACK_API_KEY_ENV}."
                ))
            })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_verify_model(mut self, verify: bool) -> Self {
        self.verify_model = verify;
        self
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}
