//! # Socialdash I18n
//!
//! Localization of page and chart text using the Fluent localization system.
//!
//! Translations are embedded at compile time; English is the fallback for
//! unknown languages and missing messages.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod loader;
pub mod messages;

pub use fluent_bundle::FluentValue;
pub use loader::*;
pub use messages::*;
