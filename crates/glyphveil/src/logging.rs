//! Log setup.
//!
//! The terminal belongs to the UI, so logs only go to a file, and only when
//! one is configured.

use std::{
    fs::OpenOptions,
    path::{Path, PathBuf},
    sync::Mutex,
};

use color_eyre::eyre::{WrapErr, eyre};
use tracing_subscriber::EnvFilter;

/// Environment variable naming the log file. Takes precedence over the config.
pub const LOG_FILE_ENV: &str = "GLYPHVEIL_LOG_FILE";
/// Environment variable holding the `EnvFilter` directives.
pub const LOG_FILTER_ENV: &str = "GLYPHVEIL_LOG";

/// Pick the log file from the environment or the config.
pub fn log_path(env_value: Option<PathBuf>, configured: Option<&Path>) -> Option<PathBuf> {
    env_value
        .filter(|p| !p.as_os_str().is_empty())
        .or_else(|| configured.map(Path::to_path_buf))
}

/// Install the global subscriber. Returns the log file in use, if any.
pub fn init(configured: Option<&Path>) -> color_eyre::Result<Option<PathBuf>> {
    let env_value = std::env::var_os(LOG_FILE_ENV).map(PathBuf::from);
    let Some(path) = log_path(env_value, configured) else {
        return Ok(None);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;

    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| eyre!("failed to install log subscriber: {e}"))?;

    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_overrides_config() {
        let path = log_path(
            Some(PathBuf::from("/tmp/env.log")),
            Some(Path::new("/tmp/config.log")),
        );
        assert_eq!(path, Some(PathBuf::from("/tmp/env.log")));
    }

    #[test]
    fn test_empty_env_falls_back() {
        let path = log_path(Some(PathBuf::new()), Some(Path::new("/tmp/config.log")));
        assert_eq!(path, Some(PathBuf::from("/tmp/config.log")));
        assert_eq!(log_path(None, None), None);
    }
}
