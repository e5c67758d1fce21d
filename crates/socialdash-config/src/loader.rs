//! Configuration loading with environment variable overrides.

use crate::schema::Config;
use crate::validator::ConfigValidator;
use socialdash_common::{DashError, Result as DashResult};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "SOCIALDASH_CONFIG";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// Unsupported file extension
    #[error("Unsupported configuration format '{0}', expected .yaml, .yml or .toml")]
    UnsupportedFormat(String),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParse {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for DashError {
    fn from(err: ConfigError) -> Self {
        DashError::config_with_source("failed to load configuration", err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Parse a configuration file, picking the format from its extension.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        match extension.as_str() {
            "yaml" | "yml" => Ok(serde_yaml::from_str(&content)?),
            "toml" => Ok(toml::from_str(&content)?),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Load, override from the environment and validate a specific file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> DashResult<Config> {
        let mut config = Self::parse_file(path.as_ref())?;
        Self::apply_env_overrides(&mut config)?;
        ConfigValidator::validate(&config)?;
        info!("Loaded configuration from {}", path.as_ref().display());
        Ok(config)
    }

    /// Resolve the configuration: an explicit path, then `SOCIALDASH_CONFIG`,
    /// then `socialdash.yaml`/`socialdash.toml` in the working directory, then defaults.
    pub fn load(explicit: Option<&Path>) -> DashResult<Config> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }

        if let Ok(path) = env::var(CONFIG_PATH_ENV) {
            return Self::load_from_file(path);
        }

        for candidate in ["socialdash.yaml", "socialdash.yml", "socialdash.toml"] {
            if Path::new(candidate).exists() {
                return Self::load_from_file(candidate);
            }
        }

        debug!("No configuration file found, using defaults");
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config)?;
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        if let Ok(users) = env::var("SOCIALDASH_USERS_URL") {
            config.sources.users = users;
        }

        if let Ok(friends) = env::var("SOCIALDASH_FRIENDS_URL") {
            config.sources.friends = friends;
        }

        if let Ok(posts) = env::var("SOCIALDASH_POSTS_URL") {
            config.sources.posts = posts;
        }

        if let Ok(reactions) = env::var("SOCIALDASH_REACTIONS_URL") {
            config.sources.reactions = reactions;
        }

        if let Ok(dir) = env::var("SOCIALDASH_OUTPUT_DIR") {
            config.output.dir = PathBuf::from(dir);
        }

        if let Ok(language) = env::var("SOCIALDASH_LANGUAGE") {
            config.dashboard.language = language;
        }

        if let Ok(level) = env::var("SOCIALDASH_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(timeout) = env::var("SOCIALDASH_HTTP_TIMEOUT") {
            config.http.timeout_secs = timeout.parse().map_err(|e| ConfigError::EnvParse {
                var: "SOCIALDASH_HTTP_TIMEOUT".to_string(),
                source: Box::new(e),
            })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_yaml_with_partial_sections() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "sources:\n  users: data/users.csv\noutput:\n  width: 1200\nlogging:\n  format: json"
        )
        .unwrap();

        let config = ConfigLoader::parse_file(file.path()).unwrap();
        assert_eq!(config.sources.users, "data/users.csv");
        assert!(config.sources.posts.ends_with("posts_table.csv"));
        assert_eq!(config.output.width, 1200);
        assert_eq!(config.output.height, 560);
        assert_eq!(
            config.logging.format,
            socialdash_common::logging::LogFormat::Json
        );
    }

    #[test]
    fn test_parse_toml() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[dashboard]\nlanguage = \"id-ID\"\n\n[output]\nexport_png = true"
        )
        .unwrap();

        let config = ConfigLoader::parse_file(file.path()).unwrap();
        assert_eq!(config.dashboard.language, "id-ID");
        assert!(config.output.export_png);
    }

    #[test]
    fn test_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
        let err = ConfigLoader::parse_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(ref ext) if ext == "ini"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ConfigLoader::parse_file("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_invalid_yaml_surfaces_as_dash_error() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        writeln!(file, "output: [unclosed").unwrap();

        let err = ConfigLoader::load_from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Configuration error"));
    }
}
