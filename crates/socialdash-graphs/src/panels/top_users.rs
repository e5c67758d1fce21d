//! The ten most active users.

use super::heading;
use crate::charts::{horizontal_bars, BarChart};
use crate::panel::{Panel, PanelId, RenderContext};
use crate::style::ColorScale;
use plotters::coord::Shift;
use plotters::prelude::*;
use socialdash_common::Result;
use socialdash_data::IntegratedDataset;

const TOP_N: usize = 10;

/// A ranked user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopUser {
    /// Display name.
    pub name: String,
    /// Total activity.
    pub total_activity: u64,
}

/// Horizontal bars of the most active users, highest on top, coloured on a
/// teal scale by activity.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopUsersPanel;

impl Panel for TopUsersPanel {
    /// Up to ten users, most active first; ties keep table order.
    type Data = Vec<TopUser>;

    fn id(&self) -> PanelId {
        PanelId::TopUsers
    }

    fn prepare(&self, dataset: &IntegratedDataset) -> Self::Data {
        let mut ranked: Vec<_> = dataset.records.iter().collect();
        ranked.sort_by(|a, b| b.total_activity.cmp(&a.total_activity));
        ranked
            .into_iter()
            .take(TOP_N)
            .map(|r| TopUser {
                name: r.display_name(),
                total_activity: r.total_activity,
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
        let values: Vec<f64> = data.iter().map(|u| u.total_activity as f64).collect();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let bars = BarChart {
            title: heading(ctx, self.id()),
            category_desc: ctx.text("label-name"),
            value_desc: ctx.text("label-total-activity"),
            labels: data
                .iter()
                .map(|u| socialdash_common::utils::truncate_string(&u.name, 24))
                .collect(),
            colors: values
                .iter()
                .map(|&v| ColorScale::Teal.sample_range(v, min, max))
                .collect(),
            values,
            value_labels: true,
        };
        horizontal_bars(root, ctx, &bars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixture_dataset;

    #[test]
    fn test_ranking_keeps_table_order_on_ties() {
        let data = TopUsersPanel.prepare(&fixture_dataset());
        let ranked: Vec<(&str, u64)> = data
            .iter()
            .map(|u| (u.name.as_str(), u.total_activity))
            .collect();
        assert_eq!(
            ranked,
            vec![
                ("Ada Lovelace", 6),
                ("Budi Santoso", 4),
                ("Eko Prasetyo", 4),
                ("Citra Lestari", 2),
                ("Dewi Sartika", 1),
            ]
        );
    }

    #[test]
    fn test_at_most_ten() {
        let mut dataset = fixture_dataset();
        let template = dataset.records[0].clone();
        dataset.records = (0..15).map(|_| template.clone()).collect();
        assert_eq!(TopUsersPanel.prepare(&dataset).len(), 10);
    }
}
