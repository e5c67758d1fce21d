//! # Socialdash
//!
//! Command line entry point of the social media dashboard: loads the four
//! source tables, integrates them once, renders the twelve chart panels and
//! writes a single self-contained HTML page.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod dashboard;
pub mod error;
pub mod page;

pub use cli::Cli;
pub use dashboard::Dashboard;
pub use error::*;
