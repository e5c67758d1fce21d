//! Data integration for the social media dashboard.
//!
//! This crate fetches the four dataset files (users, friendships, posts and
//! reactions), parses them into row tables, cleans and deduplicates them, and
//! joins them into one [`IntegratedRecord`] per user with derived features.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod cache;
pub mod cleaning;
pub mod dataset;
pub mod features;
pub mod integrator;
pub mod parser;
pub mod records;
pub mod source;

pub use cache::{CacheMetrics, IntegrationCache, SourceKey};
pub use dataset::{IntegratedDataset, IntegratedRecord, Post, Reaction};
pub use features::{ActivityLevel, AgeGroup};
pub use integrator::DataIntegrator;
pub use parser::RawTables;
pub use source::{
    fetch_all, FileFetcher, HttpFetcher, RawSource, RawSources, RoutingFetcher, SourceFetcher,
    SourceKind, SourceLocation, SourceSet,
};
