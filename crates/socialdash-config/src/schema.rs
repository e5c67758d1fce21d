//! Configuration schema definitions using serde.

use serde::{Deserialize, Serialize};
use socialdash_common::logging::LoggingConfig;
use std::path::PathBuf;

/// Main configuration structure for the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Locations of the four dataset files.
    pub sources: SourcesConfig,
    /// HTTP client configuration.
    pub http: HttpConfig,
    /// Output configuration.
    pub output: OutputConfig,
    /// Page configuration.
    pub dashboard: DashboardConfig,
    /// Chart styling configuration.
    pub styling: StylingConfig,
    /// Integration cache configuration.
    pub cache: CacheConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Locations (URLs or local paths) of the dataset files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Users table.
    pub users: String,
    /// Friendships table.
    pub friends: String,
    /// Posts table.
    pub posts: String,
    /// Reactions table.
    pub reactions: String,
}

/// HTTP client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// User agent sent with every request.
    pub user_agent: String,
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving `index.html` and optional PNG files.
    pub dir: PathBuf,
    /// Chart width in pixels.
    pub width: u32,
    /// Chart height in pixels.
    pub height: u32,
    /// Whether to also write each panel as a PNG file.
    pub export_png: bool,
}

/// Page configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Language code for page and chart text.
    pub language: String,
}

/// Chart styling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StylingConfig {
    /// Background colour of every chart.
    pub background: String,
    /// Categorical palette, cycled for bars, slices and lines.
    pub palette: Vec<String>,
    /// Font family used for chart text.
    pub font_family: String,
    /// Caption font size.
    pub title_font_size: u32,
    /// Axis and label font size.
    pub label_font_size: u32,
    /// Whether to draw grid lines.
    pub enable_grid: bool,
}

/// Integration cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of integrated datasets kept in memory.
    pub max_capacity: u64,
}
