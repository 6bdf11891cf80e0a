//! Centralized configuration paths for doge-composer
//!
//! All config files live under:
//! - Unix/macOS: `~/.config/doge-composer/`
//! - Windows: `%APPDATA%\doge-composer\`

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "doge-composer";

/// Log file prefix; daily rotation appends `.YYYY-MM-DD`
pub const LOG_FILE_PREFIX: &str = "composer.log";

/// Base config directory for doge-composer
///
/// Unix/macOS:
///   - If XDG_CONFIG_HOME is set: `$XDG_CONFIG_HOME/doge-composer`
///   - Else: `~/.config/doge-composer`
///
/// Windows:
///   - `%APPDATA%\doge-composer`
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// `~/.config/doge-composer/config.yaml`
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

/// `~/.config/doge-composer/logs/`
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// Most recent rotated log file, or the unrotated name if none exist yet
pub fn log_file() -> Option<PathBuf> {
    let logs_dir = logs_dir()?;

    let mut log_files: Vec<PathBuf> = fs::read_dir(&logs_dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with(LOG_FILE_PREFIX))
                .unwrap_or(false)
        })
        .collect();

    // YYYY-MM-DD suffixes sort naturally
    log_files.sort_by(|a, b| b.cmp(a));

    log_files
        .into_iter()
        .next()
        .or_else(|| Some(logs_dir.join(LOG_FILE_PREFIX)))
}

fn ensure_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))
}

/// Ensure the base config dir exists, returning it
pub fn ensure_config_dir() -> Result<PathBuf, String> {
    let dir = config_dir().ok_or_else(|| "No config directory available".to_string())?;
    ensure_dir(&dir)?;
    Ok(dir)
}

/// Ensure logs dir exists, returning it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let config = ensure_config_dir()?;
    let logs = config.join("logs");
    ensure_dir(&logs)?;
    Ok(logs)
}
