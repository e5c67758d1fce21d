//! Age against total activity.

use super::{heading, ScatterPoint};
use crate::charts::{bubbles, BubbleChart};
use crate::panel::{Panel, PanelId, RenderContext};
use crate::style::ColorScale;
use plotters::coord::Shift;
use plotters::prelude::*;
use socialdash_common::Result;
use socialdash_data::IntegratedDataset;

/// Scatter of age against total activity, coloured by friend count and sized
/// by post count.
#[derive(Debug, Clone, Copy, Default)]
pub struct AgeVsActivityPanel;

impl Panel for AgeVsActivityPanel {
    /// One point per user with a known age.
    type Data = Vec<ScatterPoint>;

    fn id(&self) -> PanelId {
        PanelId::AgeVsActivity
    }

    fn prepare(&self, dataset: &IntegratedDataset) -> Self::Data {
        dataset
            .records
            .iter()
            .filter_map(|r| {
                r.age.map(|age| ScatterPoint {
                    x: age,
                    y: r.total_activity as f64,
                    color: Some(r.friend_count as f64),
                    size: r.post_count as f64,
                })
            })
            .collect()
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
        let chart = BubbleChart {
            title: heading(ctx, self.id()),
            x_desc: ctx.text("label-age"),
            y_desc: ctx.text("label-total-activity"),
            color_desc: ctx.text("label-friend-count"),
            scale: ColorScale::Viridis,
            bubbles: data.iter().map(Into::into).collect(),
        };
        bubbles(root, ctx, &chart)
    }
}
