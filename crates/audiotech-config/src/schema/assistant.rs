//! Assistant (remote model) configuration types.

use serde::{Deserialize, Serialize};

/// Remote model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub model: String,
    /// Sampling temperature (valid range: 0.0-2.0). Kept low for
    /// technical, repeatable answers.
    pub temperature: f64,
    /// Reply length cap (valid range: 1-65536).
    pub max_output_tokens: u32,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Look the model up on the remote service when the session is created.
    pub verify_model_on_init: bool,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".into(),
            temperature: 0.3,
            max_output_tokens: 4096,
            api_key_env: "API_KEY".into(),
            verify_model_on_init: true,
        }
    }
}
