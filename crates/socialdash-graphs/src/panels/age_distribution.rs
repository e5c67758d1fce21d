//! Age histogram with a marginal box plot.

use super::heading;
use crate::charts::{histogram, no_data, HistogramChart};
use crate::panel::{Panel, PanelId, RenderContext};
use crate::stats::{BoxSummary, Histogram};
use plotters::coord::Shift;
use plotters::prelude::*;
use socialdash_common::Result;
use socialdash_data::IntegratedDataset;

const BINS: usize = 20;
const BAR_COLOR: RGBColor = RGBColor(78, 205, 196);

/// Histogram and box summary of all known ages.
#[derive(Debug, Clone, PartialEq)]
pub struct AgeDistribution {
    /// 20-bin histogram, `None` without ages.
    pub histogram: Option<Histogram>,
    /// Box summary, `None` without ages.
    pub summary: Option<BoxSummary>,
}

/// Age histogram with a box plot above it.
#[derive(Debug, Clone, Copy, Default)]
pub struct AgeDistributionPanel;

impl Panel for AgeDistributionPanel {
    type Data = AgeDistribution;

    fn id(&self) -> PanelId {
        PanelId::AgeDistribution
    }

    fn prepare(&self, dataset: &IntegratedDataset) -> Self::Data {
        let ages: Vec<f64> = dataset
            .records
            .iter()
            .filter_map(|r| r.age)
            .collect();
        AgeDistribution {
            histogram: Histogram::compute(&ages, BINS),
            summary: BoxSummary::compute(&ages),
        }
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
        let title = heading(ctx, self.id());
        let Some(hist) = &data.histogram else {
            return no_data(root, ctx, &title);
        };
        let plot = HistogramChart {
            title,
            value_desc: ctx.text("label-age"),
            count_desc: ctx.text("label-count"),
            histogram: hist.clone(),
            color: BAR_COLOR,
            summary: data.summary.clone(),
        };
        histogram(root, ctx, &plot)
    }
}
