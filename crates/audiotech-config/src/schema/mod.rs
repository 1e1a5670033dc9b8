//! Configuration schema types for the support assistant.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod assistant;
mod system;
mod ui;

pub use assistant::*;
pub use system::*;
pub use ui::*;

use serde::{Deserialize, Serialize};

/// Root configuration.
///
/// All options have sensible defaults. Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct AudioTechConfig {
    pub assistant: AssistantConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================
