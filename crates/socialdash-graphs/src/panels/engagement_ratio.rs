//! Engagement ratio histogram of posting users.

use super::heading;
use crate::charts::{histogram, no_data, HistogramChart};
use crate::panel::{Panel, PanelId, RenderContext};
use crate::stats::Histogram;
use plotters::coord::Shift;
use plotters::prelude::*;
use socialdash_common::Result;
use socialdash_data::IntegratedDataset;

const BINS: usize = 30;
const BAR_COLOR: RGBColor = RGBColor(255, 234, 167);

/// Histogram of the engagement ratio over users with at least one post.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngagementRatioPanel;

impl Panel for EngagementRatioPanel {
    /// 30-bin histogram, `None` when nobody posted.
    type Data = Option<Histogram>;

    fn id(&self) -> PanelId {
        PanelId::EngagementRatio
    }

    fn prepare(&self, dataset: &IntegratedDataset) -> Self::Data {
        let ratios: Vec<f64> = dataset
            .records
            .iter()
            .filter(|r| r.post_count > 0)
            .map(|r| r.engagement_ratio)
            .collect();
        Histogram::compute(&ratios, BINS)
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
        let Some(hist) = data else {
            return no_data(root, ctx, &title);
        };
        let plot = HistogramChart {
            title,
            value_desc: ctx.text("label-engagement-ratio"),
            count_desc: ctx.text("label-count"),
            histogram: hist.clone(),
            color: BAR_COLOR,
            summary: None,
        };
        histogram(root, ctx, &plot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fixture_dataset, users_only};
    use socialdash_common::test_utils::assert_approx_eq;

    #[test]
    fn test_only_posting_users_counted() {
        let hist = EngagementRatioPanel.prepare(&fixture_dataset()).unwrap();
        assert_eq!(hist.counts.iter().sum::<u64>(), 3);
        assert_approx_eq(hist.edges[0], 0.5, 1e-9);
        assert_approx_eq(hist.edges[BINS], 1.0, 1e-9);
        assert_eq!(hist.counts[0], 2);
        assert_eq!(hist.counts[BINS - 1], 1);
    }

    #[test]
    fn test_nobody_posted() {
        assert!(EngagementRatioPanel
            .prepare(&users_only(&["A,X,22,1577836800"]))
            .is_none());
    }
}
