//! The load, integrate, render and write pipeline.

use crate::error::AppResult;
use crate::page::{render_page, PageContent, INDEX_FILE};
use chrono::Utc;
use socialdash_config::Config;
use socialdash_data::{
    fetch_all, IntegratedDataset, IntegrationCache, RoutingFetcher, SourceFetcher, SourceSet,
};
use socialdash_graphs::{ChartStyle, GraphManager};
use socialdash_i18n::Messages;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument};

/// One dashboard bound to a configuration.
///
/// The integration result is memoized for the lifetime of the value, so
/// building twice from unchanged sources integrates once.
pub struct Dashboard<F = RoutingFetcher> {
    config: Config,
    fetcher: F,
    cache: IntegrationCache,
}

impl Dashboard {
    /// Creates a dashboard reading remote sources over HTTP and local ones
    /// from disk.
    pub fn new(config: Config) -> AppResult<Self> {
        let fetcher = RoutingFetcher::new(&config.http)?;
        Ok(Self::with_fetcher(config, fetcher))
    }
}

impl<F: SourceFetcher> Dashboard<F> {
    /// Creates a dashboard loading its sources through `fetcher`.
    pub fn with_fetcher(config: Config, fetcher: F) -> Self {
        let cache = IntegrationCache::new(config.cache.max_capacity);
        Self {
            config,
            fetcher,
            cache,
        }
    }

    /// The configuration in use.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The integration cache.
    pub const fn cache(&self) -> &IntegrationCache {
        &self.cache
    }

    /// Fetches the four sources and integrates them, reusing a cached result
    /// for unchanged contents.
    #[instrument(skip(self))]
    pub async fn load_dataset(&self) -> AppResult<Arc<IntegratedDataset>> {
        let set = SourceSet::from_config(&self.config.sources)?;
        let raw = fetch_all(&self.fetcher, &set).await?;
        let dataset = self.cache.get_or_integrate(&raw).await?;
        info!(
            users = dataset.user_count(),
            posts = dataset.posts.len(),
            reactions = dataset.reactions.len(),
            "Dataset ready"
        );
        Ok(dataset)
    }

    /// Renders all panels and the page around them.
    #[instrument(skip_all)]
    pub fn render(&self, dataset: &IntegratedDataset) -> AppResult<String> {
        let messages = Messages::for_language(&self.config.dashboard.language);
        let style = ChartStyle::from_config(&self.config.styling, &self.config.output)?;
        let mut manager = GraphManager::new(style, messages);
        if self.config.output.export_png {
            manager = manager.with_png_dir(&self.config.output.dir);
        }

        let panels = manager.render_all(dataset)?;
        let content = PageContent::new(messages, dataset, &panels, Utc::now());
        Ok(render_page(&content))
    }

    /// Runs the whole pipeline and writes the page; returns its path.
    pub async fn build(&self) -> AppResult<PathBuf> {
        let dataset = self.load_dataset().await?;
        let html = self.render(&dataset)?;

        let dir = &self.config.output.dir;
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(INDEX_FILE);
        tokio::fs::write(&path, html).await?;

        info!("Dashboard written to {}", path.display());
        Ok(path)
    }
}
