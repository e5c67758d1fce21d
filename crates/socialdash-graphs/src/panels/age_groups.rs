//! Users per age group.

use super::heading;
use crate::charts::{vertical_bars, BarChart};
use crate::panel::{Panel, PanelId, RenderContext};
use plotters::coord::Shift;
use plotters::prelude::*;
use socialdash_common::Result;
use socialdash_data::{AgeGroup, IntegratedDataset};

/// Vertical bars of user counts per age group, counts printed above.
#[derive(Debug, Clone, Copy, Default)]
pub struct AgeGroupsPanel;

impl Panel for AgeGroupsPanel {
    /// Count per group, every group listed in age order.
    type Data = Vec<(AgeGroup, u64)>;

    fn id(&self) -> PanelId {
        PanelId::AgeGroups
    }

    fn prepare(&self, dataset: &IntegratedDataset) -> Self::Data {
        let mut counts = [0u64; AgeGroup::ALL.len()];
        for group in dataset.records.iter().filter_map(|r| r.age_group) {
            counts[group.index()] += 1;
        }
        AgeGroup::ALL.into_iter().zip(counts).collect()
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
        let bars = BarChart {
            title: heading(ctx, self.id()),
            category_desc: ctx.text("label-age-group"),
            value_desc: ctx.text("label-user-count"),
            labels: data.iter().map(|(group, _)| group.label().to_string()).collect(),
            values: data.iter().map(|(_, count)| *count as f64).collect(),
            colors: (0..data.len()).map(|i| ctx.style.color(i)).collect(),
            value_labels: true,
        };
        vertical_bars(root, ctx, &bars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fixture_dataset, users_only};

    #[test]
    fn test_one_user_per_group() {
        let data = AgeGroupsPanel.prepare(&fixture_dataset());
        assert_eq!(data.len(), 5);
        assert!(data.iter().all(|(_, count)| *count == 1));
        assert_eq!(data[0].0, AgeGroup::Under20);
    }

    #[test]
    fn test_empty_groups_listed_and_out_of_range_ignored() {
        let dataset = users_only(&[
            "A,X,22,1577836800",
            "B,X,29,1577836800",
            "C,X,0,1577836800",
            "D,X,130,1577836800",
            "E,X,,1577836800",
            "F,X,-1,1577836800",
            "G,X,30.5,1577836800",
        ]);
        let data = AgeGroupsPanel.prepare(&dataset);
        assert_eq!(
            data,
            vec![
                (AgeGroup::Under20, 0),
                (AgeGroup::Twenties, 2),
                (AgeGroup::Thirties, 1),
                (AgeGroup::Forties, 0),
                (AgeGroup::FiftyPlus, 0),
            ]
        );
    }
}
