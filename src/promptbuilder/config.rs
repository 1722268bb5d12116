//! # Configuration
//!
//! Settings live in `config.json` inside the data directory, next to the persisted
//! templates. Missing keys fall back to their defaults, and a missing file means
//! "all defaults".
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `default_locale` | `en` | Locale stamped on freshly bootstrapped templates |
//! | `min_goal_chars` | `10` | Minimum trimmed length the goal lint rule accepts |
//! | `export_dir` | unset | Where `export` writes; the working directory when unset |

use crate::error::{PromptError, Result};
use crate::lint::GOAL_MIN_CHARS;
use crate::model::Locale;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

pub const CONFIG_KEYS: &[&str] = &["default-locale", "min-goal-chars", "export-dir"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PromptConfig {
    #[serde(default)]
    pub default_locale: Locale,

    #[serde(default = "default_min_goal_chars")]
    pub min_goal_chars: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
}

fn default_min_goal_chars() -> usize {
    GOAL_MIN_CHARS
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            default_locale: Locale::En,
            min_goal_chars: GOAL_MIN_CHARS,
            export_dir: None,
        }
    }
}

impl PromptConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(PromptError::Io)?;
        let config: PromptConfig =
            serde_json::from_str(&content).map_err(PromptError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(PromptError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(PromptError::Serialization)?;
        fs::write(config_path, content).map_err(PromptError::Io)?;
        Ok(())
    }

    /// Current value of a key, formatted for display.
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "default-locale" => Ok(self.default_locale.to_string()),
            "min-goal-chars" => Ok(self.min_goal_chars.to_string()),
            "export-dir" => Ok(self
                .export_dir
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()),
            other => Err(PromptError::Api(format!("Unknown config key: {}", other))),
        }
    }

    /// Sets a key from its string form. An empty `export-dir` unsets it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "default-locale" => {
                self.default_locale = value.parse().map_err(PromptError::Api)?;
            }
            "min-goal-chars" => {
                self.min_goal_chars = value.trim().parse().map_err(|_| {
                    PromptError::Api(format!("min-goal-chars must be a number, got {}", value))
                })?;
            }
            "export-dir" => {
                let value = value.trim();
                self.export_dir = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            other => {
                return Err(PromptError::Api(format!("Unknown config key: {}", other)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PromptConfig::default();
        assert_eq!(config.default_locale, Locale::En);
        assert_eq!(config.min_goal_chars, 10);
        assert!(config.export_dir.is_none());
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = PromptConfig::load(dir.path()).unwrap();
        assert_eq!(config, PromptConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = PromptConfig::default();
        config.set("default-locale", "es").unwrap();
        config.set("min-goal-chars", "25").unwrap();
        config.save(dir.path()).unwrap();

        let loaded = PromptConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.default_locale, Locale::Es);
        assert_eq!(loaded.min_goal_chars, 25);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"default_locale":"es"}"#).unwrap();
        let loaded = PromptConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.default_locale, Locale::Es);
        assert_eq!(loaded.min_goal_chars, 10);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = PromptConfig::default();
        assert!(config.set("default-locale", "fr").is_err());
        assert!(config.set("min-goal-chars", "ten").is_err());
        assert!(config.set("colour", "blue").is_err());
        assert_eq!(config, PromptConfig::default());
    }

    #[test]
    fn test_export_dir_set_and_unset() {
        let mut config = PromptConfig::default();
        config.set("export-dir", "/tmp/out").unwrap();
        assert_eq!(config.get("export-dir").unwrap(), "/tmp/out");
        config.set("export-dir", "").unwrap();
        assert!(config.export_dir.is_none());
    }
}
