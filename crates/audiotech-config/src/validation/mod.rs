//! Full configuration validation.
//!
//! Validates numeric ranges and required strings, collecting every
//! problem into a single `ConfigError`.

mod helpers;


use crate::schema::AudioTechConfig;
use audiotech_common::ConfigError;

use helpers::{validate_non_empty, validate_range, validate_range_f64};

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &AudioTechConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    // Assistant
    validate_non_empty(&mut errors, "assistant.model", &config.assistant.model);
    validate_non_empty(&mut errors, "assistant.api_key_env", &config.assistant.api_key_env);
    validate_range_f64(
        &mut errors,
        "assistant.temperature",
        config.assistant.temperature,
        0.0,
        2.0,
    );
    validate_range(
        &mut errors,
        "assistant.max_output_tokens",
        config.assistant.max_output_tokens,
        1,
        65536,
    );

    // UI
    validate_range(&mut errors, "ui.scroll_step", config.ui.scroll_step, 1, 20);
    validate_range(&mut errors, "ui.tick_ms", config.ui.tick_ms, 16, 1000);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
