//! Integration tests for socialdash-config crate.

use socialdash_common::test_utils::create_temp_dir;
use socialdash_config::{Config, ConfigLoader, ConfigValidator};
use std::fs;

#[test]
fn test_default_config_validation() {
    let config = Config::default();
    assert!(ConfigValidator::validate(&config).is_ok());
    assert!(config.sources.users.starts_with("https://"));
    assert_eq!(config.dashboard.language, "en-US");
}

#[test]
fn test_invalid_values_are_rejected() {
    let mut config = Config::default();
    config.output.width = 10;
    assert!(ConfigValidator::validate(&config).is_err());

    let mut config = Config::default();
    config.styling.palette = vec!["#00ff00".to_string(), "red".to_string()];
    let err = ConfigValidator::validate(&config).unwrap_err();
    assert!(err.to_string().contains("'red' is not a #rrggbb colour"));

    let mut config = Config::default();
    config.sources.reactions = "   ".to_string();
    assert!(ConfigValidator::validate(&config).is_err());

    let mut config = Config::default();
    config.cache.max_capacity = 0;
    assert!(ConfigValidator::validate(&config).is_err());
}

#[test]
fn test_load_from_explicit_file() {
    let dir = create_temp_dir();
    let path = dir.path().join("socialdash.yaml");
    fs::write(
        &path,
        "sources:\n  users: fixtures/users.csv\n  friends: fixtures/friends.csv\n  posts: fixtures/posts.csv\n  reactions: fixtures/reactions.csv\nstyling:\n  enable_grid: false\n",
    )
    .unwrap();

    let config = ConfigLoader::load(Some(&path)).unwrap();
    assert_eq!(config.sources.friends, "fixtures/friends.csv");
    assert!(!config.styling.enable_grid);
    assert_eq!(config.styling.palette.len(), 8);
}

#[test]
fn test_invalid_file_content_fails_validation() {
    let dir = create_temp_dir();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[http]\ntimeout_secs = 0\n").unwrap();

    let err = ConfigLoader::load(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("HTTP timeout"));
}
