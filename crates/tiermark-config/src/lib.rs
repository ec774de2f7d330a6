use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tiermark_html::HtmlOptions;
use tiermark_syntax::{ParseMode, ParserConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Settings read from `~/.config/tiermark/config.toml`.
///
/// Every section and key is optional:
///
/// ```toml
/// [parser]
/// mode = "lenient"
///
/// [html]
/// margin = 12
/// wrap_body = false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub parser: ParserSection,
    pub html: HtmlSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserSection {
    pub mode: Mode,
}

/// Parser mode as spelled in the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Strict,
    Lenient,
}

impl From<Mode> for ParseMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Strict => ParseMode::Strict,
            Mode::Lenient => ParseMode::Lenient,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HtmlSection {
    pub margin: u32,
    pub wrap_body: bool,
}

impl Default for HtmlSection {
    fn default() -> Self {
        let options = HtmlOptions::default();
        Self {
            margin: options.margin,
            wrap_body: options.wrap_body,
        }
    }
}

impl Config {
    /// Load the config at `config_path`, which may use `~` and `$VARS`.
    ///
    /// A missing file is not an error and gives `Ok(None)`.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        let config_path = Self::expand_path(config_path).unwrap_or_else(|| config_path.to_path_buf());
        if !config_path.exists() {
            log::debug!("no config file at {}", config_path.display());
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.clone(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.clone(),
                source,
            })?;

        log::debug!("loaded config from {}", config_path.display());
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
        let config_dir = shellexpand::tilde("~/.config/tiermark");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig {
            mode: self.parser.mode.into(),
            ..ParserConfig::default()
        }
    }

    pub fn html_options(&self) -> HtmlOptions {
        HtmlOptions {
            margin: self.html.margin,
            wrap_body: self.html.wrap_body,
        }
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        // Should not contain tilde anymore
        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/tiermark/config.toml"));
    }

    #[test]
    fn test_defaults_match_library_defaults() {
        let config = Config::default();
        assert_eq!(config.parser_config().mode, ParseMode::Strict);
        assert_eq!(config.html_options(), HtmlOptions::default());
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let original = Config {
            parser: ParserSection {
                mode: Mode::Lenient,
            },
            html: HtmlSection {
                margin: 4,
                wrap_body: false,
            },
        };

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = toml::from_str("[html]\nmargin = 8\n").unwrap();

        assert_eq!(config.parser.mode, Mode::Strict);
        assert_eq!(config.html.margin, 8);
        assert!(config.html.wrap_body);
    }

    #[test]
    fn test_mode_is_lowercase_in_toml() {
        let config: Config = toml::from_str("[parser]\nmode = \"lenient\"\n").unwrap();
        assert_eq!(config.parser_config().mode, ParseMode::Lenient);

        assert!(toml::from_str::<Config>("[parser]\nmode = \"Lenient\"\n").is_err());
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/test/path");
        let expanded = Config::expand_path(&path);

        assert!(expanded.is_some());
        let expanded = expanded.unwrap();
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("TIERMARK_TEST_VAR", "/test/env/path");
        }

        let path = PathBuf::from("$TIERMARK_TEST_VAR/subdir");
        let expanded = Config::expand_path(&path);

        assert!(expanded.is_some());
        let expanded = expanded.unwrap();
        assert_eq!(expanded, PathBuf::from("/test/env/path/subdir"));

        unsafe {
            env::remove_var("TIERMARK_TEST_VAR");
        }
    }

    #[test]
    fn test_expand_path_with_relative_path() {
        let path = PathBuf::from("relative/path");
        let expanded = Config::expand_path(&path).unwrap();

        assert_eq!(expanded, path);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_invalid_config_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "[html]\nmargin = \"wide\"\n").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested/dir/config.toml");
        let test_config = Config {
            parser: ParserSection {
                mode: Mode::Lenient,
            },
            html: HtmlSection {
                margin: 20,
                wrap_body: true,
            },
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_load_from_path_with_env_var() {
        let temp_dir = TempDir::new().unwrap();
        Config::default()
            .save_to_path(temp_dir.path().join("config.toml"))
            .unwrap();
        unsafe {
            env::set_var("TIERMARK_CONFIG_DIR", temp_dir.path());
        }

        let loaded = Config::load_from_path("$TIERMARK_CONFIG_DIR/config.toml").unwrap();

        assert_eq!(loaded, Some(Config::default()));
        unsafe {
            env::remove_var("TIERMARK_CONFIG_DIR");
        }
    }
}
