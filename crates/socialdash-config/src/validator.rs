//! Runtime validation of a loaded configuration.

use crate::schema::Config;
use socialdash_common::{DashError, Result};

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        for (field, location) in [
            ("sources.users", &config.sources.users),
            ("sources.friends", &config.sources.friends),
            ("sources.posts", &config.sources.posts),
            ("sources.reactions", &config.sources.reactions),
        ] {
            Self::validate_location(field, location)?;
        }

        if config.http.timeout_secs == 0 {
            return Err(DashError::validation_field(
                "HTTP timeout must be greater than 0",
                "http.timeout_secs",
            ));
        }

        if config.output.width < 200 || config.output.height < 150 {
            return Err(DashError::validation_field(
                "chart dimensions must be at least 200x150",
                "output",
            ));
        }

        if config.output.dir.as_os_str().is_empty() {
            return Err(DashError::validation_field(
                "output directory cannot be empty",
                "output.dir",
            ));
        }

        if config.dashboard.language.trim().is_empty() {
            return Err(DashError::validation_field(
                "language cannot be empty",
                "dashboard.language",
            ));
        }

        if !is_hex_color(&config.styling.background) {
            return Err(DashError::validation_field(
                format!("'{}' is not a #rrggbb colour", config.styling.background),
                "styling.background",
            ));
        }

        if config.styling.palette.is_empty() {
            return Err(DashError::validation_field(
                "palette needs at least one colour",
                "styling.palette",
            ));
        }

        if let Some(bad) = config.styling.palette.iter().find(|c| !is_hex_color(c)) {
            return Err(DashError::validation_field(
                format!("'{bad}' is not a #rrggbb colour"),
                "styling.palette",
            ));
        }

        if config.cache.max_capacity == 0 {
            return Err(DashError::validation_field(
                "cache capacity must be greater than 0",
                "cache.max_capacity",
            ));
        }

        Ok(())
    }

    fn validate_location(field: &str, location: &str) -> Result<()> {
        let location = location.trim();
        if location.is_empty() {
            return Err(DashError::validation_field(
                "source location cannot be empty",
                field,
            ));
        }

        if location.contains("://") {
            let url = url::Url::parse(location).map_err(|e| {
                DashError::validation_field(format!("invalid source URL '{location}': {e}"), field)
            })?;
            if !matches!(url.scheme(), "http" | "https" | "file") {
                return Err(DashError::validation_field(
                    format!("unsupported URL scheme '{}'", url.scheme()),
                    field,
                ));
            }
        }

        Ok(())
    }
}

/// Whether `value` is a `#rrggbb` colour.
pub fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}
