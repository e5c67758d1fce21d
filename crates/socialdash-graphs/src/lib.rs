//! # Socialdash Graphs
//!
//! The twelve chart panels of the dashboard. Each panel aggregates the
//! integrated dataset into plain data (`prepare`) and draws it with plotters
//! (`draw`); [`GraphManager`] renders them all to SVG and optionally PNG.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod charts;
pub mod manager;
pub mod panel;
pub mod panels;
pub mod stats;
pub mod style;

pub use manager::{GraphManager, RenderedPanel};
pub use panel::{Panel, PanelId, RenderContext};
pub use style::{parse_color, ChartStyle, ColorScale};
