//! Composer configuration persistence
//!
//! Stores user preferences in `~/.config/doge-composer/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::options::catalog::DEFAULT_PALETTE;

/// What the scanner does with marked nodes missing their identity attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionPolicy {
    /// Keep the region; it resolves to an empty option set
    #[default]
    Accept,
    /// Skip nodes without an edit type
    Reject,
}

/// Composer configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposerConfig {
    /// Colors cycled by the text and background color options
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
    /// Image URLs cycled by the image replace option
    #[serde(default)]
    pub image_library: Vec<String>,
    /// Maximum number of cached toolbelts (unbounded when absent)
    #[serde(default)]
    pub toolbelt_cache_capacity: Option<usize>,
    #[serde(default)]
    pub region_policy: RegionPolicy,
}

fn default_palette() -> Vec<String> {
    DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect()
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            palette: default_palette(),
            image_library: Vec::new(),
            toolbelt_cache_capacity: None,
            region_policy: RegionPolicy::default(),
        }
    }
}

impl ComposerConfig {
    /// Load config from the default location, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`, falling back to defaults on any problem
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let mut config: Self = serde_yaml::from_str(yaml).map_err(|e| e.to_string())?;
        if config.palette.is_empty() {
            tracing::warn!("Empty palette in config, using the default palette");
            config.palette = default_palette();
        }
        if config.toolbelt_cache_capacity == Some(0) {
            tracing::warn!("toolbelt_cache_capacity of 0 would evict the active toolbelt, ignoring");
            config.toolbelt_cache_capacity = None;
        }
        Ok(config)
    }

    /// Save config to `path`
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette_has_ten_colors() {
        let config = ComposerConfig::default();
        assert_eq!(config.palette.len(), 10);
        assert_eq!(config.palette[0], "white");
        assert_eq!(config.palette[9], "black");
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = ComposerConfig::from_yaml("region_policy: reject\n").unwrap();
        assert_eq!(config.region_policy, RegionPolicy::Reject);
        assert_eq!(config.palette, ComposerConfig::default().palette);
        assert_eq!(config.toolbelt_cache_capacity, None);
    }

    #[test]
    fn test_zero_capacity_is_ignored() {
        let config = ComposerConfig::from_yaml("toolbelt_cache_capacity: 0\n").unwrap();
        assert_eq!(config.toolbelt_cache_capacity, None);
    }

    #[test]
    fn test_empty_palette_is_replaced() {
        let config = ComposerConfig::from_yaml("palette: []\n").unwrap();
        assert!(!config.palette.is_empty());
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        assert!(ComposerConfig::from_yaml("palette: [unterminated").is_err());
    }
}
