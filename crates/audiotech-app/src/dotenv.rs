//! Minimal `.env` support (KEY=VALUE lines).

use std::path::Path;

/// Load `.env` from the working directory. Variables already set in the
/// environment win. Returns how many variables were applied.
pub fn load_dotenv() -> usize {
    load_dotenv_from(Path::new(".env"))
}

pub fn load_dotenv_from(path: &Path) -> usize {
    let Ok(contents) = std::fs::read_to_string(path) else {
        return 0;
    };

    let mut applied = 0;
    for (key, value) in parse_dotenv(&contents) {
        if std::env::var_os(&key).is_none() {
            std::env::set_var(&key, value);
            applied += 1;
        }
    }
    applied
}

/// Parse `.env` contents. Blank lines and `#` comments are skipped, an
/// optional `export ` prefix is dropped and surrounding quotes are removed.
pub fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let line = line.strip_prefix("export ").unwrap_or(line);
            let (key, value) = line.split_once('=')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            let value = value.trim().trim_matches('"').trim_matches('\'');
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}
