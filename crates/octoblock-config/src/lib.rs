//! Configuration management for octoblock.
//!
//! Parses `octoblock.toml` with serde and discovers it in the current
//! directory or its parents. CLI settings are applied on top of the file
//! via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String values support `${VAR}` (error if unset) and `${VAR:-default}`.
//!
//! Expanded fields:
//! - `gist.base_url`
//! - `render.prefix`
//! - `render.suffix`

mod expand;

use std::path::{Path, PathBuf};
use std::time::Duration;

use octoblock_gist::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "octoblock.toml";

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the gist host.
    pub base_url: Option<String>,
    /// Override whether code is syntax highlighted.
    pub highlight: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Gist download settings.
    pub gist: GistConfig,
    /// Codeblock rendering settings.
    pub render: RenderConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Gist download settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GistConfig {
    /// Gist host base URL.
    pub base_url: String,
    /// Global timeout for one download, in seconds.
    pub timeout_secs: u64,
}

impl Default for GistConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl GistConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Codeblock rendering settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Markup placed before every rendered figure.
    pub prefix: Option<String>,
    /// Markup placed after every rendered figure.
    pub suffix: Option<String>,
    /// Whether code is syntax highlighted.
    pub highlight: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            prefix: None,
            suffix: None,
            highlight: true,
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
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g. `gist.base_url`).
        field: String,
        /// Error message (e.g. `${GIST_HOST} not set`).
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `octoblock.toml` in the current directory and its parents, falling
    /// back to defaults when none exists.
    ///
    /// # Errors
    ///
    /// Returns error if an explicit `config_path` doesn't exist, or if
    /// reading, parsing, expansion or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_from(&cwd))
        {
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

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(base_url) = &settings.base_url {
            self.gist.base_url.clone_from(base_url);
        }
        if let Some(highlight) = settings.highlight {
            self.render.highlight = highlight;
        }
    }

    /// Search for the config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.exists())
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.gist.base_url, "gist.base_url")?;
        require_http_url(&self.gist.base_url, "gist.base_url")?;

        if self.gist.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "gist.timeout_secs must be greater than 0".to_owned(),
            ));
        }

        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.gist.base_url = expand::expand_env(&self.gist.base_url, "gist.base_url")?;

        if let Some(ref prefix) = self.render.prefix {
            self.render.prefix = Some(expand::expand_env(prefix, "render.prefix")?);
        }
        if let Some(ref suffix) = self.render.suffix {
            self.render.suffix = Some(expand::expand_env(suffix, "render.suffix")?);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILENAME);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.gist.base_url, "https://gist.github.com");
        assert_eq!(config.gist.timeout(), Duration::from_secs(30));
        assert_eq!(config.gist.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.gist.timeout(), DEFAULT_TIMEOUT);
        assert!(config.render.highlight);
        assert!(config.render.prefix.is_none());
        assert!(config.render.suffix.is_none());
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.gist.base_url, "https://gist.github.com");
        assert!(config.render.highlight);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[gist]
base_url = "http://localhost:8080"
timeout_secs = 5

[render]
prefix = "<div class='wrapper'>"
suffix = "</div>"
highlight = false
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.gist.base_url, "http://localhost:8080");
        assert_eq!(config.gist.timeout_secs, 5);
        assert_eq!(config.render.prefix.as_deref(), Some("<div class='wrapper'>"));
        assert_eq!(config.render.suffix.as_deref(), Some("</div>"));
        assert!(!config.render.highlight);
    }

    #[test]
    fn test_parse_rejects_unknown_types() {
        let result: Result<Config, _> = toml::from_str("[gist]\ntimeout_secs = \"soon\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[gist]\ntimeout_secs = 7\n");

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.gist.timeout_secs, 7);
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(ref p) if *p == path));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[gist\n");

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "got {err:?}");
    }

    #[test]
    fn test_load_validates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[gist]\nbase_url = \"gist.github.com\"\n");

        let err = Config::load(Some(&path), None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: gist.base_url must start with http:// or https://"
        );
    }

    #[test]
    fn test_load_expands_env_vars() {
        // SAFETY: no other test reads this variable
        unsafe {
            std::env::set_var("OCTOBLOCK_TEST_WRAPPER", "wrapper");
        }
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
[gist]
base_url = "${OCTOBLOCK_TEST_UNSET_HOST:-http://127.0.0.1:9000}"

[render]
prefix = "<div class='${OCTOBLOCK_TEST_WRAPPER}'>"
"#,
        );

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.gist.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.render.prefix.as_deref(), Some("<div class='wrapper'>"));
        unsafe {
            std::env::remove_var("OCTOBLOCK_TEST_WRAPPER");
        }
    }

    #[test]
    fn test_load_missing_env_var() {
        let dir = tempfile::tempdir().unwrap();
        let content = "[render]\nsuffix = \"${OCTOBLOCK_TEST_UNSET_SUFFIX}\"\n";
        let path = write_config(dir.path(), content);

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { ref field, .. } if field == "render.suffix"));
    }

    #[test]
    fn test_discover_in_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "");
        let nested = dir.path().join("posts").join("2013");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(Config::discover_from(&nested), Some(path));
    }

    #[test]
    fn test_discover_prefers_nearest() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "");
        let nested = dir.path().join("site");
        std::fs::create_dir_all(&nested).unwrap();
        let nearest = write_config(&nested, "");

        assert_eq!(Config::discover_from(&nested), Some(nearest));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings {
            base_url: Some("http://localhost:4000".to_owned()),
            highlight: Some(false),
        });

        assert_eq!(config.gist.base_url, "http://localhost:4000");
        assert!(!config.render.highlight);
        assert_eq!(config.gist.timeout_secs, 30);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.gist.base_url, "https://gist.github.com");
        assert!(config.render.highlight);
    }

    #[test]
    fn test_cli_settings_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[render]\nhighlight = true\n");
        let settings = CliSettings {
            highlight: Some(false),
            ..Default::default()
        };

        let config = Config::load(Some(&path), Some(&settings)).unwrap();
        assert!(!config.render.highlight);
    }

    #[test]
    fn test_cli_base_url_is_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "");
        let settings = CliSettings {
            base_url: Some("ftp://gists".to_owned()),
            ..Default::default()
        };

        let err = Config::load(Some(&path), Some(&settings)).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_validate_default_passes() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_base_url() {
        let mut config = Config::default();
        config.gist.base_url = String::new();
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: gist.base_url cannot be empty");
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = Config::default();
        config.gist.timeout_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("gist.timeout_secs"));
    }
}
