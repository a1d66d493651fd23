//! Preview configuration persistence
//!
//! Stores user preferences in `~/.config/glimpse/config.yaml`

use serde::{Deserialize, Serialize};

/// Preview configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Quiet period after the last edit before a render starts (ms)
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Minimum Markdown signal score for content to classify as Markdown
    #[serde(default = "default_markdown_threshold")]
    pub markdown_signal_threshold: usize,
    /// Couple editor and preview scroll positions
    #[serde(default = "default_true")]
    pub sync_scroll: bool,
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_markdown_threshold() -> usize {
    1
}

fn default_true() -> bool {
    true
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            markdown_signal_threshold: default_markdown_threshold(),
            sync_scroll: default_true(),
        }
    }
}

impl PreviewConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => match serde_yaml::from_str(&content) {
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

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(&path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PreviewConfig::default();
        assert_eq!(config.debounce_ms, 500);
        assert_eq!(config.markdown_signal_threshold, 1);
        assert!(config.sync_scroll);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: PreviewConfig = serde_yaml::from_str("debounce_ms: 200\n").unwrap();
        assert_eq!(config.debounce_ms, 200);
        assert_eq!(config.markdown_signal_threshold, 1);
        assert!(config.sync_scroll);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = PreviewConfig {
            debounce_ms: 250,
            markdown_signal_threshold: 2,
            sync_scroll: false,
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        let loaded: PreviewConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(loaded, config);
    }
}
