//! Users per activity level.

use super::heading;
use crate::charts::donut;
use crate::panel::{Panel, PanelId, RenderContext};
use plotters::coord::Shift;
use plotters::prelude::*;
use socialdash_common::Result;
use socialdash_data::{ActivityLevel, IntegratedDataset};

/// Donut of activity level shares.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActivityLevelsPanel;

impl Panel for ActivityLevelsPanel {
    /// Count per level present, most frequent first, ties from least active.
    type Data = Vec<(ActivityLevel, u64)>;

    fn id(&self) -> PanelId {
        PanelId::ActivityLevels
    }

    fn prepare(&self, dataset: &IntegratedDataset) -> Self::Data {
        let mut counts = [0u64; ActivityLevel::ALL.len()];
        for record in &dataset.records {
            counts[record.activity_level as usize] += 1;
        }

        let mut data: Vec<(ActivityLevel, u64)> = ActivityLevel::ALL
            .into_iter()
            .zip(counts)
            .filter(|(_, count)| *count > 0)
            .collect();
        data.sort_by(|a, b| b.1.cmp(&a.1));
        data
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
        let slices: Vec<(String, u64)> = data
            .iter()
            .map(|(level, count)| (ctx.text(&format!("level-{}", level.slug())), *count))
            .collect();
        donut(root, ctx, &heading(ctx, self.id()), &slices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fixture_dataset, users_only};

    #[test]
    fn test_levels_present_most_frequent_first() {
        let data = ActivityLevelsPanel.prepare(&fixture_dataset());
        assert_eq!(
            data,
            vec![(ActivityLevel::Low, 4), (ActivityLevel::Medium, 1)]
        );
    }

    #[test]
    fn test_inactive_users() {
        let data = ActivityLevelsPanel.prepare(&users_only(&["A,X,22,1577836800", "B,X,41,1577836800"]));
        assert_eq!(data, vec![(ActivityLevel::Inactive, 2)]);
    }
}
