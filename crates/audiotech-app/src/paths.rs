//! Platform directories for logs and crash reports.

use std::fs;
use std::path::PathBuf;

const APP_NAME: &str = "audiotech";

/// Returns the platform-specific data directory.
///
/// - macOS: `~/Library/Application Support/audiotech`
/// - Linux: `$XDG_DATA_HOME/audiotech` (defaults to `~/.local/share/audiotech`)
/// - Windows: `%APPDATA%\audiotech`
pub fn data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_NAME))
}

/// Located at `data_dir()/logs`.
pub fn log_dir() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("logs"))
}

/// Located at `log_dir()/audiotech.log`.
pub fn log_file() -> Option<PathBuf> {
    log_dir().map(|dir| dir.join("audiotech.log"))
}

/// Located at `log_dir()/crash-reports`.
pub fn crash_report_dir() -> Option<PathBuf> {
    log_dir().map(|dir| dir.join("crash-reports"))
}

/// Creates the log and crash report directories if they do not exist.
pub fn ensure_dirs() -> Result<(), std::io::Error> {
    if let Some(dir) = crash_report_dir() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_paths_nest_under_data_dir() {
        let (Some(data), Some(log), Some(crash)) = (data_dir(), log_file(), crash_report_dir())
        else {
            return;
        };
        assert!(data.ends_with("audiotech"));
        assert!(log.starts_with(&data));
        assert!(log.ends_with("logs/audiotech.log"));
        assert!(crash.starts_with(data.join("logs")));
    }
}
