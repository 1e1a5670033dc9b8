//! Terminal UI configuration types.

use serde::{Deserialize, Serialize};

/// Chat window behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Show the canned prompts while the conversation is empty.
    pub show_quick_actions: bool,
    /// Lines moved per PageUp/PageDown (valid range: 1-20).
    pub scroll_step: u32,
    /// Redraw tick for the loading animation, in ms (valid range: 16-1000).
    pub tick_ms: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_quick_actions: true,
            scroll_step: 3,
            tick_ms: 120,
        }
    }
}
