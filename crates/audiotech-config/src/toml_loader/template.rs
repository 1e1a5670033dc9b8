//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r##"# AudioTech Pro Assistant Configuration
# Only override what you want to change -- missing fields use defaults.

[assistant]
# model = "gemini-2.5-flash"
# temperature = 0.3          # 0.0-2.0, low keeps answers technical
# max_output_tokens = 4096   # 1-65536
# api_key_env = "API_KEY"    # falls back to GEMINI_API_KEY
# verify_model_on_init = true

[ui]
# show_quick_actions = true
# scroll_step = 3            # 1-20
# tick_ms = 120              # 16-1000

[logging]
# level = "INFO"             # DEBUG, INFO, WARNING, ERROR
# file_logging = true
"##
}
