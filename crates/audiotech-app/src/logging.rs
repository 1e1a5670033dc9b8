//! `tracing` subscriber setup.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use audiotech_config::schema::LoggingConfig;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_DIRECTIVE: &str = "audiotech=info";

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    /// The UI owns the terminal and file logging is disabled.
    Off,
}

/// Pick the filter directive: command line first, then config.
pub fn resolve_directive(cli: Option<&str>, config: &LoggingConfig) -> String {
    match cli {
        Some(directive) if !directive.trim().is_empty() => directive.trim().to_string(),
        _ => config.level.directive().to_string(),
    }
}

/// Pick the log target for the interactive UI.
pub fn interactive_target(config: &LoggingConfig, log_file: Option<PathBuf>) -> LogTarget {
    match log_file {
        Some(path) if config.file_logging => LogTarget::File(path),
        _ => LogTarget::Off,
    }
}

fn build_filter(directive: &str) -> EnvFilter {
    let filter = EnvFilter::from_default_env();
    match directive.parse::<Directive>().or_else(|_| DEFAULT_DIRECTIVE.parse()) {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Install the global subscriber.
pub fn init(directive: &str, target: &LogTarget) -> std::io::Result<()> {
    match target {
        LogTarget::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(build_filter(directive))
                .with_writer(std::io::stderr)
                .init();
        }
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(build_filter(directive))
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        LogTarget::Off => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use audiotech_config::schema::LogLevel;

    #[test]
    fn cli_directive_wins_over_config() {
        let config = LoggingConfig {
            level: LogLevel::Error,
            file_logging: true,
        };
        assert_eq!(
            resolve_directive(Some("audiotech=debug"), &config),
            "audiotech=debug"
        );
        assert_eq!(resolve_directive(None, &config), "audiotech=error");
        assert_eq!(resolve_directive(Some("  "), &config), "audiotech=error");
    }

    #[test]
    fn default_config_logs_at_info() {
        assert_eq!(
            resolve_directive(None, &LoggingConfig::default()),
            DEFAULT_DIRECTIVE
        );
    }

    #[test]
    fn interactive_target_respects_file_logging() {
        let path = PathBuf::from("/tmp/audiotech.log");
        let mut config = LoggingConfig::default();
        assert_eq!(
            interactive_target(&config, Some(path.clone())),
            LogTarget::File(path.clone())
        );
        assert_eq!(interactive_target(&config, None), LogTarget::Off);

        config.file_logging = false;
        assert_eq!(interactive_target(&config, Some(path)), LogTarget::Off);
    }
}
