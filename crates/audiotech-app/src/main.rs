mod cli;
mod conversation;
mod crash;
mod dotenv;
mod logging;
mod oneshot;
mod paths;
mod quick_actions;
mod tui;

use std::process::ExitCode;
use std::sync::Arc;

use audiotech_ai::{
    GeminiClient, GeminiConfig, GenerationConfig, SessionManager, SessionSettings,
    SYSTEM_INSTRUCTION,
};
use audiotech_common::{AudioTechError, ConfigError};
use audiotech_config::AudioTechConfig;

use logging::LogTarget;

fn build_session_manager(config: &AudioTechConfig) -> Result<SessionManager, AudioTechError> {
    let assistant = &config.assistant;
    let gemini = match GeminiConfig::from_env(&assistant.api_key_env) {
        Ok(gemini) => gemini,
        Err(e) => {
            tracing::warn!("Gemini API key not configured, requests will fail until it is set: {e}");
            GeminiConfig::new("")
        }
    }
    .with_model(assistant.model.clone())
    .with_verify_model(assistant.verify_model_on_init);

    let client = GeminiClient::new(gemini).map_err(|e| AudioTechError::Ai(e.to_string()))?;
    let settings = SessionSettings {
        system_instruction: SYSTEM_INSTRUCTION.to_string(),
        generation: GenerationConfig {
            temperature: assistant.temperature,
            max_output_tokens: assistant.max_output_tokens,
        },
    };
    Ok(SessionManager::new(Arc::new(client), settings))
}

/// Load the config, or the defaults plus the load error. The caller logs
/// the error once the subscriber is installed.
fn load_config_or_default(
    path: Option<&std::path::Path>,
) -> (AudioTechConfig, Option<ConfigError>) {
    match audiotech_config::load_config(path) {
        Ok(config) => (config, None),
        Err(e) => (AudioTechConfig::default(), Some(e)),
    }
}

async fn run(args: cli::Args, config: AudioTechConfig) -> Result<ExitCode, AudioTechError> {
    let mut manager = build_session_manager(&config)?;

    if let Some(ref question) = args.ask {
        let answer = oneshot::ask(&mut manager, question, args.image.as_deref()).await?;
        manager.shutdown();
        println!("{}", answer.text);
        return Ok(if answer.failed {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        });
    }

    match tui::run(manager, config.ui.clone()).await? {
        Some(mut manager) => manager.shutdown(),
        None => tracing::info!("Exited with a request in flight"),
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    // Load .env file before anything else
    let dotenv_vars = dotenv::load_dotenv();

    crash::install_panic_hook();

    let args = cli::parse();

    let (config, config_error) = load_config_or_default(args.config.as_deref());

    if args.print_config {
        println!("{}", audiotech_config::config_to_json(&config));
        return ExitCode::SUCCESS;
    }

    // Initialize logging
    let directive = logging::resolve_directive(args.log_level.as_deref(), &config.logging);
    let target = if args.ask.is_some() {
        LogTarget::Stderr
    } else {
        if let Err(e) = paths::ensure_dirs() {
            eprintln!("Failed to create log directories: {e}");
        }
        logging::interactive_target(&config.logging, paths::log_file())
    };
    if let Err(e) = logging::init(&directive, &target) {
        eprintln!("Failed to initialize logging: {e}");
    }

    tracing::info!("AudioTech assistant v{} starting...", env!("CARGO_PKG_VERSION"));
    if dotenv_vars > 0 {
        tracing::debug!("Loaded {dotenv_vars} variables from .env");
    }
    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {}", path.display());
    }
    if let Some(e) = config_error {
        tracing::warn!("Invalid config, falling back to defaults: {e}");
    }
    tracing::info!(
        "Config loaded (model: {}, temperature: {})",
        config.assistant.model,
        config.assistant.temperature
    );

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to start async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    let code = match runtime.block_on(run(args, config)) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("Fatal error: {e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    };
    tracing::info!("Shutdown complete");
    code
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_config_falls_back_to_defaults_with_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[assistant]\ntemperature = 5.0\n").unwrap();

        let (config, error) = load_config_or_default(Some(&path));

        assert!(matches!(error, Some(ConfigError::ValidationError(_))));
        assert!((config.assistant.temperature - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn valid_config_loads_without_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[assistant]\ntemperature = 0.5\n").unwrap();

        let (config, error) = load_config_or_default(Some(&path));

        assert!(error.is_none());
        assert!((config.assistant.temperature - 0.5).abs() < f64::EPSILON);
    }
}
