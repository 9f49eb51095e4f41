//! Configuration management for mdlive.
//!
//! Parses `mdlive.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [parser]
//! sanitize_html = true
//! allowed_tags = ["p", "h1", "strong", "em", "code", "pre"]
//!
//! [output]
//! format = "document"
//! title = "Release notes"
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the sanitize flag.
    pub sanitize_html: Option<bool>,
    /// Override output format.
    pub format: Option<OutputFormat>,
    /// Override document title.
    pub title: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdlive.toml";

/// Tags that may never appear in the allow-list.
const FORBIDDEN_TAGS: &[&str] = &["script", "style"];

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Parser configuration.
    pub parser: ParserSection,
    /// Output configuration.
    pub output: OutputConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Parser configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ParserSection {
    /// Whether rendered HTML goes through the sanitizer.
    pub sanitize_html: bool,
    /// Tags kept by the sanitizer. `None` uses the renderer's defaults.
    pub allowed_tags: Option<Vec<String>>,
}

impl Default for ParserSection {
    fn default() -> Self {
        Self {
            sanitize_html: true,
            allowed_tags: None,
        }
    }
}

/// Shape of the rendered output.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Bare HTML fragment.
    #[default]
    Fragment,
    /// Fragment wrapped in a minimal HTML5 document.
    Document,
}

/// Output configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format.
    pub format: OutputFormat,
    /// Title used for the `document` format.
    pub title: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Fragment,
            title: "Preview".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a tag name to be a plain ASCII alphanumeric element name.
fn require_tag_name(tag: &str) -> Result<(), ConfigError> {
    if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ConfigError::Validation(format!(
            "parser.allowed_tags contains invalid tag name {tag:?}"
        )));
    }
    if FORBIDDEN_TAGS.contains(&tag.to_ascii_lowercase().as_str()) {
        return Err(ConfigError::Validation(format!(
            "parser.allowed_tags cannot include <{tag}>"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdlive.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(sanitize_html) = settings.sanitize_html {
            self.parser.sanitize_html = sanitize_html;
        }
        if let Some(format) = settings.format {
            self.output.format = format;
        }
        if let Some(title) = &settings.title {
            self.output.title.clone_from(title);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_from(&current)
    }

    /// Search for config file starting at `start` and walking up.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_parser()?;
        self.validate_output()?;
        Ok(())
    }

    /// Validate parser configuration.
    fn validate_parser(&self) -> Result<(), ConfigError> {
        let Some(tags) = &self.parser.allowed_tags else {
            return Ok(());
        };

        // An empty allow-list strips every element, which is never what a
        // config file means while sanitizing is on
        if tags.is_empty() && self.parser.sanitize_html {
            return Err(ConfigError::Validation(
                "parser.allowed_tags cannot be empty while sanitize_html is enabled".to_owned(),
            ));
        }
        for tag in tags {
            require_tag_name(tag)?;
        }
        Ok(())
    }

    /// Validate output configuration.
    fn validate_output(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.output.title, "output.title")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.parser.sanitize_html);
        assert_eq!(config.parser.allowed_tags, None);
        assert_eq!(config.output.format, OutputFormat::Fragment);
        assert_eq!(config.output.title, "Preview");
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.parser.sanitize_html);
        assert_eq!(config.output.format, OutputFormat::Fragment);
    }

    #[test]
    fn test_parse_parser_config() {
        let toml = r#"
[parser]
sanitize_html = false
allowed_tags = ["p", "em"]
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(!config.parser.sanitize_html);
        assert_eq!(
            config.parser.allowed_tags,
            Some(vec!["p".to_owned(), "em".to_owned()])
        );
    }

    #[test]
    fn test_parse_output_config() {
        let toml = r#"
[output]
format = "document"
title = "Notes"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.output.format, OutputFormat::Document);
        assert_eq!(config.output.title, "Notes");
    }

    #[test]
    fn test_unknown_format_rejected() {
        let toml = r#"
[output]
format = "pdf"
"#;
        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn test_empty_allowed_tags_rejected_when_sanitizing() {
        let toml = r"
[parser]
allowed_tags = []
";
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        assert!(err.to_string().contains("allowed_tags"));
    }

    #[test]
    fn test_empty_allowed_tags_ok_without_sanitizing() {
        let toml = r"
[parser]
sanitize_html = false
allowed_tags = []
";
        let config: Config = toml::from_str(toml).unwrap();
        config.validate().unwrap();
    }

    #[test]
    fn test_invalid_tag_name_rejected() {
        let toml = r#"
[parser]
allowed_tags = ["p", "img onerror"]
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("img onerror"));
    }

    #[test]
    fn test_script_tag_rejected() {
        let toml = r#"
[parser]
allowed_tags = ["p", "SCRIPT"]
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("SCRIPT"));
    }

    #[test]
    fn test_empty_title_rejected() {
        let toml = r#"
[output]
title = "  "
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("output.title"));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default();
        let overrides = CliSettings {
            sanitize_html: Some(false),
            format: Some(OutputFormat::Document),
            title: Some("From CLI".to_owned()),
        };

        config.apply_cli_settings(&overrides);

        assert!(!config.parser.sanitize_html);
        assert_eq!(config.output.format, OutputFormat::Document);
        assert_eq!(config.output.title, "From CLI");
    }

    #[test]
    fn test_apply_cli_settings_none_keeps_values() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings::default());

        assert!(config.parser.sanitize_html);
        assert_eq!(config.output.format, OutputFormat::Fragment);
        assert_eq!(config.output.title, "Preview");
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[output]\ntitle = \"Custom\"\n").unwrap();

        let config = Config::load(Some(path.as_path()), None).unwrap();
        assert_eq!(config.output.title, "Custom");
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let err = Config::load(Some(path.as_path()), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[parser\n").unwrap();

        let err = Config::load(Some(path.as_path()), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_cli_settings_validated_after_apply() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mdlive.toml");
        std::fs::write(&path, "").unwrap();

        let overrides = CliSettings {
            title: Some(String::new()),
            ..Default::default()
        };
        let err = Config::load(Some(path.as_path()), Some(&overrides)).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_discover_from_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();

        let found = Config::discover_from(&nested).unwrap();
        assert_eq!(found, dir.path().join(CONFIG_FILENAME));
    }
}
