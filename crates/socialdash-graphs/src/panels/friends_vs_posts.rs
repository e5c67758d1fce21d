//! Friend count against post count.

use super::{heading, ScatterPoint};
use crate::charts::{bubbles, BubbleChart};
use crate::panel::{Panel, PanelId, RenderContext};
use crate::style::ColorScale;
use plotters::coord::Shift;
use plotters::prelude::*;
use socialdash_common::Result;
use socialdash_data::IntegratedDataset;

/// Scatter of friends against posts, coloured by age and sized by total
/// activity.
#[derive(Debug, Clone, Copy, Default)]
pub struct FriendsVsPostsPanel;

impl Panel for FriendsVsPostsPanel {
    /// One point per user.
    type Data = Vec<ScatterPoint>;

    fn id(&self) -> PanelId {
        PanelId::FriendsVsPosts
    }

    fn prepare(&self, dataset: &IntegratedDataset) -> Self::Data {
        dataset
            .records
            .iter()
            .map(|r| ScatterPoint {
                x: r.friend_count as f64,
                y: r.post_count as f64,
                color: r.age,
                size: r.total_activity as f64,
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
            x_desc: ctx.text("label-friend-count"),
            y_desc: ctx.text("label-post-count"),
            color_desc: ctx.text("label-age"),
            scale: ColorScale::Viridis,
            bubbles: data.iter().map(Into::into).collect(),
        };
        bubbles(root, ctx, &chart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fixture_dataset, users_only};

    #[test]
    fn test_point_per_user() {
        let data = FriendsVsPostsPanel.prepare(&fixture_dataset());
        assert_eq!(data.len(), 5);
        assert_eq!(
            data[0],
            ScatterPoint {
                x: 3.0,
                y: 2.0,
                color: Some(25.0),
                size: 6.0
            }
        );
    }

    #[test]
    fn test_unknown_age_keeps_point() {
        let data = FriendsVsPostsPanel.prepare(&users_only(&["A,X,,1577836800"]));
        assert_eq!(data.len(), 1);
        assert_eq!(data[0].color, None);
    }
}
