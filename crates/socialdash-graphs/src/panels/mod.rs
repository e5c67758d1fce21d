//! The twelve dashboard panels.

mod activity_heatmap;
mod activity_levels;
mod age_distribution;
mod age_group_activity;
mod age_groups;
mod age_vs_activity;
mod correlation;
mod engagement_ratio;
mod friends_vs_posts;
mod post_types;
mod reaction_types;
mod top_users;

pub use activity_heatmap::{ActivityGrid, ActivityHeatmapPanel};
pub use activity_levels::ActivityLevelsPanel;
pub use age_distribution::{AgeDistribution, AgeDistributionPanel};
pub use age_group_activity::{AgeGroupActivityPanel, GroupMeans};
pub use age_groups::AgeGroupsPanel;
pub use age_vs_activity::AgeVsActivityPanel;
pub use correlation::{CorrelationMatrix, CorrelationPanel, CORRELATION_VARIABLES};
pub use engagement_ratio::EngagementRatioPanel;
pub use friends_vs_posts::FriendsVsPostsPanel;
pub use post_types::PostTypesPanel;
pub use reaction_types::ReactionTypesPanel;
pub use top_users::{TopUser, TopUsersPanel};

use crate::charts::Bubble;
use crate::panel::{PanelId, RenderContext};
use std::collections::BTreeMap;

/// A point of a scatter panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterPoint {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
    /// Value mapped to the marker colour; `None` draws a neutral marker.
    pub color: Option<f64>,
    /// Value mapped to the marker size.
    pub size: f64,
}

impl From<&ScatterPoint> for Bubble {
    fn from(point: &ScatterPoint) -> Self {
        Self {
            x: point.x,
            y: point.y,
            color_value: point.color,
            size_value: point.size,
        }
    }
}

/// Localized heading of a panel.
fn heading(ctx: &RenderContext<'_>, id: PanelId) -> String {
    ctx.text(&id.title_key())
}

/// Occurrences per value, most frequent first, ties by value.
fn ranked_counts<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, u64)> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }
    let mut ranked: Vec<(String, u64)> = counts
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect();
    // Stable sort keeps the alphabetical order among equal counts.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranked_counts_ties_alphabetical() {
        let ranked = ranked_counts(["love", "wow", "like", "wow", "haha"].into_iter());
        assert_eq!(
            ranked,
            vec![
                ("wow".to_string(), 2),
                ("haha".to_string(), 1),
                ("like".to_string(), 1),
                ("love".to_string(), 1),
            ]
        );
        assert!(ranked_counts(std::iter::empty()).is_empty());
    }
}
