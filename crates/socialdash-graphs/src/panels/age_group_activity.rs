//! Mean aggregates per age group.

use super::heading;
use crate::charts::{grouped_lines, LineChart};
use crate::panel::{Panel, PanelId, RenderContext};
use crate::stats::mean;
use plotters::coord::Shift;
use plotters::prelude::*;
use socialdash_common::Result;
use socialdash_data::{AgeGroup, IntegratedDataset, IntegratedRecord};

const MEASURES: [(&str, fn(&IntegratedRecord) -> u64); 4] = [
    ("label-friend-count", |r| r.friend_count),
    ("label-post-count", |r| r.post_count),
    ("label-reactions-given", |r| r.reactions_given),
    ("label-reactions-received", |r| r.reactions_received),
];

/// Means of one age group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMeans {
    /// The age group.
    pub group: AgeGroup,
    /// Mean friend count, post count, reactions given and reactions
    /// received; `None` when the group is empty.
    pub means: Option<[f64; 4]>,
}

/// Four lines across the age groups, one per aggregate.
#[derive(Debug, Clone, Copy, Default)]
pub struct AgeGroupActivityPanel;

impl Panel for AgeGroupActivityPanel {
    /// One entry per age group, in label order.
    type Data = Vec<GroupMeans>;

    fn id(&self) -> PanelId {
        PanelId::AgeGroupActivity
    }

    fn prepare(&self, dataset: &IntegratedDataset) -> Self::Data {
        AgeGroup::ALL
            .into_iter()
            .map(|group| {
                let members: Vec<&IntegratedRecord> = dataset
                    .records
                    .iter()
                    .filter(|r| r.age_group == Some(group))
                    .collect();
                let column = |f: fn(&IntegratedRecord) -> u64| -> Option<f64> {
                    let values: Vec<f64> = members.iter().map(|r| f(r) as f64).collect();
                    mean(&values)
                };
                let means = match MEASURES.map(|(_, f)| column(f)) {
                    [Some(a), Some(b), Some(c), Some(d)] => Some([a, b, c, d]),
                    _ => None,
                };
                GroupMeans { group, means }
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
        let series = MEASURES
            .iter()
            .enumerate()
            .map(|(i, (key, _))| {
                let points = data.iter().map(|g| g.means.map(|m| m[i])).collect();
                (ctx.text(key), points)
            })
            .collect();
        let lines = LineChart {
            title: heading(ctx, self.id()),
            category_desc: ctx.text("label-age-group"),
            value_desc: ctx.text("label-average"),
            labels: data.iter().map(|g| g.group.label().to_string()).collect(),
            series,
        };
        grouped_lines(root, ctx, &lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fixture_dataset, users_only};

    #[test]
    fn test_fixture_means() {
        let data = AgeGroupActivityPanel.prepare(&fixture_dataset());
        assert_eq!(data.len(), 5);
        assert_eq!(data[0].group, AgeGroup::Under20);
        // Citra: one friend, no posts, one reaction given, none received.
        assert_eq!(data[0].means, Some([1.0, 0.0, 1.0, 0.0]));
        // Ada
        assert_eq!(data[1].means, Some([3.0, 2.0, 1.0, 3.0]));
    }

    #[test]
    fn test_empty_groups_have_no_means() {
        let dataset = users_only(&["A,X,22,1577836800", "B,X,28,1577836800"]);
        let data = AgeGroupActivityPanel.prepare(&dataset);
        assert_eq!(data[1].means, Some([0.0; 4]));
        assert!(data
            .iter()
            .filter(|g| g.group != AgeGroup::Twenties)
            .all(|g| g.means.is_none()));
    }
}
