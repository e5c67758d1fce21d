//! Default values for every configuration section.

use crate::schema::*;
use socialdash_common::logging::LoggingConfig;
use std::path::PathBuf;

const DATASET_BASE_URL: &str = "https://raw.githubusercontent.com/cayaaa14/data-real/refs/heads/main";

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: SourcesConfig::default(),
            http: HttpConfig::default(),
            output: OutputConfig::default(),
            dashboard: DashboardConfig::default(),
            styling: StylingConfig::default(),
            cache: CacheConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            users: format!("{DATASET_BASE_URL}/user_table.csv"),
            friends: format!("{DATASET_BASE_URL}/friends_table.csv"),
            posts: format!("{DATASET_BASE_URL}/posts_table.csv"),
            reactions: format!("{DATASET_BASE_URL}/reactions_table.csv"),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: concat!("socialdash/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("dashboard"),
            width: 960,
            height: 560,
            export_png: false,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            language: "en-US".to_string(),
        }
    }
}

impl Default for StylingConfig {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            palette: vec![
                "#636efa".to_string(),
                "#ef553b".to_string(),
                "#00cc96".to_string(),
                "#ab63fa".to_string(),
                "#ffa15a".to_string(),
                "#19d3f3".to_string(),
                "#ff6692".to_string(),
                "#b6e880".to_string(),
            ],
            font_family: "sans-serif".to_string(),
            title_font_size: 22,
            label_font_size: 14,
            enable_grid: true,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { max_capacity: 4 }
    }
}
