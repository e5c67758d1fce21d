//! Memoization of integration results keyed by source contents.

use crate::dataset::IntegratedDataset;
use crate::integrator::DataIntegrator;
use crate::source::RawSources;
use moka::future::Cache;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use socialdash_common::Result;
use tracing::{debug, info, instrument};

/// Hash over the identifiers and contents of all four sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceKey(u64);

impl SourceKey {
    /// Computes the key of a set of fetched sources.
    pub fn of(sources: &RawSources) -> Self {
        let mut hasher = DefaultHasher::new();
        for source in sources.iter() {
            source.kind.name().hash(&mut hasher);
            source.identifier.hash(&mut hasher);
            source.content.hash(&mut hasher);
        }
        Self(hasher.finish())
    }
}

impl fmt::Display for SourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Cache hit and miss counters.
#[derive(Debug, Default)]
pub struct CacheMetrics {
    /// Lookups served from the cache.
    pub hits: AtomicU64,
    /// Lookups that ran the integration.
    pub misses: AtomicU64,
    /// Explicit invalidations.
    pub invalidations: AtomicU64,
}

impl CacheMetrics {
    fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    fn record_invalidation(&self) {
        self.invalidations.fetch_add(1, Ordering::Relaxed);
    }

    /// Hit rate over all lookups, 0 when nothing was looked up.
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits.load(Ordering::Relaxed);
        let total = hits + self.misses.load(Ordering::Relaxed);
        if total == 0 {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let rate = hits as f64 / total as f64;
            rate
        }
    }

    /// Snapshot of the counters by name.
    pub fn get_stats(&self) -> HashMap<String, u64> {
        let mut stats = HashMap::new();
        stats.insert("hits".to_string(), self.hits.load(Ordering::Relaxed));
        stats.insert("misses".to_string(), self.misses.load(Ordering::Relaxed));
        stats.insert(
            "invalidations".to_string(),
            self.invalidations.load(Ordering::Relaxed),
        );
        stats
    }
}

/// Integration results memoized by [`SourceKey`].
///
/// Identical inputs return the same `Arc` without running the integration
/// again. Entries live until evicted by capacity or invalidated explicitly.
#[derive(Debug, Clone)]
pub struct IntegrationCache {
    cache: Cache<SourceKey, Arc<IntegratedDataset>>,
    metrics: Arc<CacheMetrics>,
}

impl IntegrationCache {
    /// Creates a cache holding at most `max_capacity` results.
    pub fn new(max_capacity: u64) -> Self {
        info!("Creating integration cache with capacity {}", max_capacity);
        Self {
            cache: Cache::builder().max_capacity(max_capacity).build(),
            metrics: Arc::new(CacheMetrics::default()),
        }
    }

    /// Returns the memoized result for `sources`, integrating them on a miss.
    ///
    /// Failed integrations are not cached.
    #[instrument(skip_all)]
    pub async fn get_or_integrate(&self, sources: &RawSources) -> Result<Arc<IntegratedDataset>> {
        let key = SourceKey::of(sources);
        if let Some(dataset) = self.cache.get(&key).await {
            self.metrics.record_hit();
            debug!("Integration cache hit for {}", key);
            return Ok(dataset);
        }

        self.metrics.record_miss();
        debug!("Integration cache miss for {}", key);
        let dataset = Arc::new(DataIntegrator::integrate_sources(sources)?);
        self.cache.insert(key, Arc::clone(&dataset)).await;
        Ok(dataset)
    }

    /// Whether a result for `key` is cached.
    pub fn contains(&self, key: &SourceKey) -> bool {
        self.cache.contains_key(key)
    }

    /// Drops the result for `key`.
    pub async fn invalidate(&self, key: &SourceKey) {
        self.cache.invalidate(key).await;
        self.metrics.record_invalidation();
        debug!("Invalidated integration result {}", key);
    }

    /// Drops every cached result.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
        self.metrics.record_invalidation();
        info!("Invalidated all integration results");
    }

    /// Shared hit and miss counters.
    pub fn metrics(&self) -> Arc<CacheMetrics> {
        Arc::clone(&self.metrics)
    }
}
