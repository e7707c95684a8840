use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use termynal_md_engine::TermynalOptions;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    Read {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    Parse {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Settings for the termynal preprocessor. Every field is defaulted, so a
/// partial (or absent) config file is never fatal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Terminal window title shown by the widget.
    #[serde(default = "default_title")]
    pub title: String,
    /// Prompt markers that open a command line.
    #[serde(default = "default_prompt_literal_start")]
    pub prompt_literal_start: Vec<String>,
    /// Progress-bar line prefix, in the entity form matched after escaping.
    #[serde(default = "default_progress_literal_start")]
    pub progress_literal_start: String,
    /// Comment line prefix.
    #[serde(default = "default_comment_literal_start")]
    pub comment_literal_start: String,
}

fn default_title() -> String {
    "bash".to_string()
}

fn default_prompt_literal_start() -> Vec<String> {
    vec!["$".to_string()]
}

fn default_progress_literal_start() -> String {
    "---&gt; 100%".to_string()
}

fn default_comment_literal_start() -> String {
    "# ".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: default_title(),
            prompt_literal_start: default_prompt_literal_start(),
            progress_literal_start: default_progress_literal_start(),
            comment_literal_start: default_comment_literal_start(),
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content =
            std::fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            config_path: config_path.to_path_buf(),
            source,
        })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/termynal-md");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Converts into the engine's per-instance options.
    pub fn options(&self) -> TermynalOptions {
        TermynalOptions {
            title: Some(self.title.clone()),
            prompt_literal_start: self.prompt_literal_start.clone(),
            progress_literal_start: self.progress_literal_start.clone(),
            comment_literal_start: self.comment_literal_start.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        // Should not contain tilde anymore
        assert!(!path_str.starts_with('~'));
        // Should contain the expected config file name
        assert!(path_str.ends_with(".config/termynal-md/config.toml"));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.title, "bash");
        assert_eq!(config.prompt_literal_start, vec!["$".to_string()]);
        assert_eq!(config.progress_literal_start, "---&gt; 100%");
        assert_eq!(config.comment_literal_start, "# ");
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let original = Config {
            title: "zsh".to_string(),
            prompt_literal_start: vec!["$".to_string(), ">>>".to_string()],
            ..Config::default()
        };

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(r#"title = "fish""#).unwrap();

        assert_eq!(config.title, "fish");
        assert_eq!(config.prompt_literal_start, vec!["$".to_string()]);
        assert_eq!(config.comment_literal_start, "# ");
    }

    #[test]
    fn test_empty_toml_is_all_defaults() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_invalid_toml_is_a_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "title = [not toml").unwrap();

        let result = Config::load_from_path(&config_file);

        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        let test_config = Config {
            title: "powershell".to_string(),
            prompt_literal_start: vec!["PS>".to_string()],
            ..Config::default()
        };

        // Test saving
        test_config.save_to_path(&config_file).unwrap();

        // Test loading
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_options_conversion() {
        let config = Config::default();
        let options = config.options();

        assert_eq!(options.title.as_deref(), Some("bash"));
        assert_eq!(options.prompt_literal_start, vec!["$".to_string()]);
        assert_eq!(options.progress_literal_start, "---&gt; 100%");
        assert_eq!(options.comment_literal_start, "# ");
    }
}
