use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::vocab::{Language, WordType};

pub const MIN_SESSION_SIZE: usize = 1;
pub const MAX_SESSION_SIZE: usize = 200;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_target_language")]
    pub target_language: Language,
    #[serde(default = "default_base_language")]
    pub base_language: Language,
    /// Drill every conjugated form instead of only the second person present.
    #[serde(default)]
    pub full_conjugation: bool,
    #[serde(default = "default_word_types")]
    pub word_types: Vec<WordType>,
    #[serde(default = "default_session_size")]
    pub session_size: usize,
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Dead keys compose accented letters with the next key press.
    #[serde(default = "default_dead_keys")]
    pub dead_keys: bool,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_target_language() -> Language {
    Language::German
}
fn default_base_language() -> Language {
    Language::English
}
fn default_word_types() -> Vec<WordType> {
    vec![WordType::Noun, WordType::Verb]
}
fn default_session_size() -> usize {
    20
}
fn default_theme() -> String {
    "terminal-default".to_string()
}
fn default_dead_keys() -> bool {
    true
}
fn default_log_filter() -> String {
    "wortdrill=info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_language: default_target_language(),
            base_language: default_base_language(),
            full_conjugation: false,
            word_types: default_word_types(),
            session_size: default_session_size(),
            theme: default_theme(),
            dead_keys: default_dead_keys(),
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.validate();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wortdrill")
            .join("config.toml")
    }

    /// Repair values a hand-edited file may have broken. Call after
    /// deserialization and after applying command-line overrides.
    pub fn validate(&mut self) {
        self.session_size = self.session_size.clamp(MIN_SESSION_SIZE, MAX_SESSION_SIZE);

        let mut seen = Vec::with_capacity(self.word_types.len());
        self.word_types.retain(|t| {
            if seen.contains(t) {
                false
            } else {
                seen.push(*t);
                true
            }
        });
        if self.word_types.is_empty() {
            self.word_types = default_word_types();
        }

        // Drilling a language against itself shows no useful translation.
        if self.base_language == self.target_language {
            self.base_language = if self.target_language == Language::English {
                Language::German
            } else {
                Language::English
            };
        }

        if self.log_filter.trim().is_empty() {
            self.log_filter = default_log_filter();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.target_language, Language::German);
        assert!(config.dead_keys);
        assert!(!config.full_conjugation);
    }

    #[test]
    fn test_config_partial_file() {
        let toml_str = r#"
target_language = "no"
word_types = ["verb"]
theme = "catppuccin-mocha"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.target_language, Language::Norwegian);
        assert_eq!(config.word_types, vec![WordType::Verb]);
        assert_eq!(config.theme, "catppuccin-mocha");
        assert_eq!(config.session_size, 20);
    }

    #[test]
    fn test_config_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.target_language = Language::Spanish;
        config.full_conjugation = true;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let loaded = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_validate_clamps_session_size() {
        let mut config = Config::default();
        config.session_size = 0;
        config.validate();
        assert_eq!(config.session_size, MIN_SESSION_SIZE);

        config.session_size = 10_000;
        config.validate();
        assert_eq!(config.session_size, MAX_SESSION_SIZE);
    }

    #[test]
    fn test_validate_word_types() {
        let mut config = Config::default();
        config.word_types = vec![WordType::Verb, WordType::Verb];
        config.validate();
        assert_eq!(config.word_types, vec![WordType::Verb]);

        config.word_types.clear();
        config.validate();
        assert_eq!(config.word_types, default_word_types());
    }

    #[test]
    fn test_validate_base_differs_from_target() {
        let mut config = Config::default();
        config.target_language = Language::English;
        config.base_language = Language::English;
        config.validate();
        assert_eq!(config.base_language, Language::German);
    }

    #[test]
    fn test_unknown_language_is_an_error() {
        assert!(toml::from_str::<Config>(r#"target_language = "xx""#).is_err());
    }
}
