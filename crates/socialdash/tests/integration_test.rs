//! Integration tests for the dashboard pipeline.

use async_trait::async_trait;
use socialdash::Dashboard;
use socialdash_common::test_utils::csv_fixtures::*;
use socialdash_common::test_utils::{create_temp_dir, init_test_logging};
use socialdash_common::{DashError, Result};
use socialdash_config::{Config, SourcesConfig};
use socialdash_data::{SourceFetcher, SourceLocation};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Serves fixed contents keyed by location and counts fetches.
struct MemoryFetcher {
    files: HashMap<String, String>,
    fetches: Arc<AtomicUsize>,
}

impl MemoryFetcher {
    fn new(users: String, friends: String, posts: String, reactions: String) -> Self {
        let files = [
            ("users.csv", users),
            ("friends.csv", friends),
            ("posts.csv", posts),
            ("reactions.csv", reactions),
        ]
        .into_iter()
        .map(|(name, content)| (name.to_string(), content))
        .collect();
        Self {
            files,
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn fixtures() -> Self {
        Self::new(users_csv(), friends_csv(), posts_csv(), reactions_csv())
    }
}

#[async_trait]
impl SourceFetcher for MemoryFetcher {
    async fn fetch(&self, location: &SourceLocation) -> Result<Vec<u8>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.files
            .get(&location.to_string())
            .map(|content| content.clone().into_bytes())
            .ok_or_else(|| DashError::network(format!("{location} not found")))
    }
}

fn memory_config() -> Config {
    Config {
        sources: SourcesConfig {
            users: "users.csv".to_string(),
            friends: "friends.csv".to_string(),
            posts: "posts.csv".to_string(),
            reactions: "reactions.csv".to_string(),
        },
        ..Config::default()
    }
}

#[tokio::test]
async fn test_load_dataset_from_fetcher() {
    init_test_logging();
    let fetcher = MemoryFetcher::fixtures();
    let fetches = Arc::clone(&fetcher.fetches);
    let dashboard = Dashboard::with_fetcher(memory_config(), fetcher);

    let dataset = dashboard.load_dataset().await.unwrap();
    assert_eq!(dataset.user_count(), 5);
    assert_eq!(dataset.posts.len(), 4);
    assert_eq!(dataset.reactions.len(), 5);
    assert_eq!(fetches.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_unchanged_sources_integrate_once() {
    let dashboard = Dashboard::with_fetcher(memory_config(), MemoryFetcher::fixtures());

    let first = dashboard.load_dataset().await.unwrap();
    let second = dashboard.load_dataset().await.unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    let metrics = dashboard.cache().metrics();
    assert_eq!(metrics.misses.load(Ordering::Relaxed), 1);
    assert_eq!(metrics.hits.load(Ordering::Relaxed), 1);

    dashboard.cache().invalidate_all();
    let third = dashboard.load_dataset().await.unwrap();
    assert!(!Arc::ptr_eq(&first, &third));
    assert_eq!(*first, *third);
}

#[tokio::test]
async fn test_reactions_without_posts_fail() {
    let fetcher = MemoryFetcher::new(
        users_csv(),
        friends_csv(),
        header_only(POSTS_HEADER),
        reactions_csv(),
    );
    let dashboard = Dashboard::with_fetcher(memory_config(), fetcher);

    let err = dashboard.load_dataset().await.unwrap_err();
    assert!(err.is_data_shape(), "{err}");
}

#[tokio::test]
async fn test_missing_source_aborts_load() {
    let config = Config {
        sources: SourcesConfig {
            posts: "absent.csv".to_string(),
            ..memory_config().sources
        },
        ..Config::default()
    };
    let dashboard = Dashboard::with_fetcher(config, MemoryFetcher::fixtures());

    let err = dashboard.load_dataset().await.unwrap_err();
    assert!(err.to_string().contains("posts source"), "{err}");
}

#[tokio::test]
#[ignore = "requires system fonts"]
async fn test_build_writes_page() {
    let dir = create_temp_dir();
    let mut config = memory_config();
    config.output.dir = dir.path().join("site");
    config.output.export_png = true;
    let dashboard = Dashboard::with_fetcher(config, MemoryFetcher::fixtures());

    let path = dashboard.build().await.unwrap();
    assert_eq!(path, dir.path().join("site").join("index.html"));

    let html = std::fs::read_to_string(&path).unwrap();
    assert_eq!(html.matches("<section ").count(), 12);
    assert!(dir.path().join("site").join("panel-01-age-groups.png").exists());
}
