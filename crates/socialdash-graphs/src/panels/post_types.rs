//! Posts per post type.

use super::{heading, ranked_counts};
use crate::charts::{vertical_bars, BarChart};
use crate::panel::{Panel, PanelId, RenderContext};
use crate::style::ColorScale;
use plotters::coord::Shift;
use plotters::prelude::*;
use socialdash_common::Result;
use socialdash_data::IntegratedDataset;

/// Bars of post counts per type, shaded on a blue scale by count.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostTypesPanel;

impl Panel for PostTypesPanel {
    /// Count per type, most frequent first, ties by name. Untyped posts are skipped.
    type Data = Vec<(String, u64)>;

    fn id(&self) -> PanelId {
        PanelId::PostTypes
    }

    fn prepare(&self, dataset: &IntegratedDataset) -> Self::Data {
        ranked_counts(dataset.posts.iter().filter_map(|p| p.post_type.as_deref()))
    }

    fn draw<DB>(
        &self,
        data: &Self::Data,
        root: &DrawingArea<DB, Shift>,
        ctx: &RenderContext<'_>,
    ) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: std::error::Error + Send + Sync + 'static,
    {
        let max = data.first().map_or(1.0, |(_, count)| *count as f64);
        let bars = BarChart {
            title: heading(ctx, self.id()),
            category_desc: ctx.text("label-post-type"),
            value_desc: ctx.text("label-count"),
            labels: data.iter().map(|(name, _)| name.clone()).collect(),
            values: data.iter().map(|(_, count)| *count as f64).collect(),
            // Lightest shades are too pale on white.
            colors: data
                .iter()
                .map(|(_, count)| ColorScale::Blues.sample(0.3 + 0.7 * *count as f64 / max))
                .collect(),
            value_labels: true,
        };
        vertical_bars(root, ctx, &bars)
    }
}
