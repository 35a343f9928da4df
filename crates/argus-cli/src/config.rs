//! CLI configuration: file discovery, defaults, persistence

use crate::error::CliError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings for the Ollama completion provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaSettings {
    /// Ollama API endpoint
    pub endpoint: String,

    /// Model to use
    pub model: String,
}

impl Default for OllamaSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:11434".to_string(),
            model: "llama3".to_string(),
        }
    }
}

/// Persistent CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// SQLite database path
    pub db_path: PathBuf,

    /// Path to a JSON corpus file for the evidence search backend
    pub corpus_path: Option<PathBuf>,

    /// Colored output
    pub color: bool,

    /// Completion provider settings
    pub ollama: OllamaSettings,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            db_path: data_dir().join("argus.db"),
            corpus_path: None,
            color: true,
            ollama: OllamaSettings::default(),
        }
    }
}

fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("argus")
}

fn config_file() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("argus")
        .join("config.toml")
}

impl CliConfig {
    /// Load configuration from the default location, or a given path
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        let path = path.map(PathBuf::from).unwrap_or_else(config_file);
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| CliError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        toml::from_str(&contents)
            .map_err(|e| CliError::Config(format!("cannot parse {}: {}", path.display(), e)))
    }

    /// Load from the default location, falling back to defaults
    pub fn load_or_default(path: Option<&Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<(), CliError> {
        let path = config_file();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("cannot serialize config: {}", e)))?;
        std::fs::write(&path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert!(config.color);
        assert!(config.db_path.ends_with("argus.db"));
    }

    #[test]
    fn test_load_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = CliConfig {
            db_path: PathBuf::from("/tmp/test.db"),
            ..Default::default()
        };
        std::fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = CliConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded.db_path, PathBuf::from("/tmp/test.db"));
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let config = CliConfig::load_or_default(Some(Path::new("/nonexistent/config.toml")));
        assert!(config.color);
    }
}
