//! AudioTech assistant configuration system.
//!
//! Provides TOML-based configuration with full validation. All config
//! sections use sensible defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use audiotech_config::{load_config, config_to_json};
//!
//! let config = load_config(None).expect("failed to load config");
//! let json = config_to_json(&config);
//! println!("{json}");
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::AudioTechConfig;

use std::path::Path;

use audiotech_common::ConfigError;

/// Load config from an explicit path, or from the platform default path
/// (creating a commented default file there if none exists).
///
/// A file that parses but fails validation is an error; callers decide
/// whether to fall back to defaults.
pub fn load_config(path: Option<&Path>) -> Result<AudioTechConfig, ConfigError> {
    match path {
        Some(path) => toml_loader::load_from_path(path),
        None => toml_loader::load_default(),
    }
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &AudioTechConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
