//! # Socialdash Config
//!
//! Operator configuration for the social media dashboard: source locations,
//! output, styling, cache and logging settings.
//!
//! Analytical constants (bins, thresholds) are deliberately not configurable;
//! they live next to the code that uses them.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::*;
pub use schema::*;
pub use validator::*;
