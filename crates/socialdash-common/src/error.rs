//! Error types and utilities for the dashboard

use thiserror::Error;

/// Result type alias for dashboard operations
pub type Result<T> = std::result::Result<T, DashError>;

/// Main error type for dashboard operations
#[derive(Error, Debug)]
pub enum DashError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Network related errors while fetching a source
    #[error("Network error: {message}")]
    Network {
        message: String,
        status_code: Option<u16>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A source could not be parsed into rows
    #[error("Parse error in {source_name} source: {message}")]
    Parse {
        source_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The loaded data has a shape the pipeline cannot work with
    #[error("Data shape error: {message}")]
    DataShape { message: String },

    /// Graph generation and plotting errors
    #[error("Graph error: {message}")]
    Graph {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internationalization and localization errors
    #[error("Localization error: {message}")]
    Localization {
        message: String,
        locale: Option<String>,
    },

    /// Validation errors for configuration values
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },
}

impl DashError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network {
            message: msg.into(),
            status_code: None,
            source: None,
        }
    }

    /// Create a new network error carrying the HTTP status
    pub fn network_with_status(msg: impl Into<String>, status: u16) -> Self {
        Self::Network {
            message: msg.into(),
            status_code: Some(status),
            source: None,
        }
    }

    /// Create a new network error with source
    pub fn network_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Network {
            message: msg.into(),
            status_code: None,
            source: Some(Box::new(source)),
        }
    }

    /// Create a new parse error for the named source
    pub fn parse(source_name: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Parse {
            source_name: source_name.into(),
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new parse error for the named source with the underlying cause
    pub fn parse_with_source(
        source_name: impl Into<String>,
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Parse {
            source_name: source_name.into(),
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new data shape error
    pub fn data_shape(msg: impl Into<String>) -> Self {
        Self::DataShape {
            message: msg.into(),
        }
    }

    /// Create a new graph error
    pub fn graph(msg: impl Into<String>) -> Self {
        Self::Graph {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new graph error with source
    pub fn graph_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Graph {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new localization error
    pub fn localization(msg: impl Into<String>) -> Self {
        Self::Localization {
            message: msg.into(),
            locale: None,
        }
    }

    /// Create a new localization error with locale
    pub fn localization_with_locale(msg: impl Into<String>, locale: impl Into<String>) -> Self {
        Self::Localization {
            message: msg.into(),
            locale: Some(locale.into()),
        }
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Whether this error stems from the shape of the loaded data
    pub const fn is_data_shape(&self) -> bool {
        matches!(self, Self::DataShape { .. })
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to DashError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for DashError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::graph_with_source("Graph rendering failed", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn test_error_creation() {
        let config_error = DashError::config("config issue");
        assert!(config_error.to_string().contains("Configuration error"));
        assert!(config_error.to_string().contains("config issue"));

        let network_error = DashError::network_with_status("not found", 404);
        assert!(network_error.to_string().contains("Network error"));
        assert!(matches!(
            network_error,
            DashError::Network {
                status_code: Some(404),
                ..
            }
        ));

        let parse_error = DashError::parse("users", "bad header");
        assert_eq!(
            parse_error.to_string(),
            "Parse error in users source: bad header"
        );

        let shape_error = DashError::data_shape("no posts");
        assert!(shape_error.is_data_shape());
        assert!(!parse_error.is_data_shape());
    }

    #[test]
    fn test_error_with_source() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let wrapped_error = DashError::network_with_source("Failed to load users source", io_error);

        assert!(wrapped_error
            .to_string()
            .contains("Network error: Failed to load users source"));
        assert!(wrapped_error.source().is_some());

        let parse_error = DashError::parse_with_source(
            "posts",
            "row 3",
            io::Error::new(io::ErrorKind::InvalidData, "broken"),
        );
        assert!(parse_error.source().is_some());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let dash_error: DashError = io_error.into();

        assert!(dash_error.to_string().contains("I/O error"));
        assert!(dash_error.source().is_some());
    }

    #[test]
    fn test_error_display_formatting() {
        let config_error = DashError::config("missing field");
        assert_eq!(
            format!("{config_error}"),
            "Configuration error: missing field"
        );

        let validation = DashError::validation_field("must be positive", "output.width");
        assert_eq!(format!("{validation}"), "Validation error: must be positive");
    }
}
