//! The panel abstraction: pure aggregation followed by drawing.

use crate::style::ChartStyle;
use plotters::coord::Shift;
use plotters::prelude::*;
use socialdash_common::Result;
use socialdash_data::IntegratedDataset;
use socialdash_i18n::Messages;
use std::fmt;

/// The twelve dashboard panels, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PanelId {
    /// Users per age group.
    AgeGroups,
    /// Ten most active users.
    TopUsers,
    /// Reactions per reaction type.
    ReactionTypes,
    /// Users per activity level.
    ActivityLevels,
    /// Age histogram with box plot.
    AgeDistribution,
    /// Engagement ratio histogram.
    EngagementRatio,
    /// Posts per post type.
    PostTypes,
    /// Mean aggregates per age group.
    AgeGroupActivity,
    /// Friend count against post count.
    FriendsVsPosts,
    /// Age against total activity.
    AgeVsActivity,
    /// Correlation matrix.
    Correlation,
    /// Mean activity per age group and registration year.
    ActivityHeatmap,
}

impl PanelId {
    /// All panels in page order.
    pub const ALL: [Self; 12] = [
        Self::AgeGroups,
        Self::TopUsers,
        Self::ReactionTypes,
        Self::ActivityLevels,
        Self::AgeDistribution,
        Self::EngagementRatio,
        Self::PostTypes,
        Self::AgeGroupActivity,
        Self::FriendsVsPosts,
        Self::AgeVsActivity,
        Self::Correlation,
        Self::ActivityHeatmap,
    ];

    /// 1-based position on the page.
    pub const fn number(self) -> usize {
        self as usize + 1
    }

    /// Stable identifier used in file names and element ids.
    pub const fn slug(self) -> &'static str {
        match self {
            Self::AgeGroups => "age-groups",
            Self::TopUsers => "top-users",
            Self::ReactionTypes => "reaction-types",
            Self::ActivityLevels => "activity-levels",
            Self::AgeDistribution => "age-distribution",
            Self::EngagementRatio => "engagement-ratio",
            Self::PostTypes => "post-types",
            Self::AgeGroupActivity => "age-group-activity",
            Self::FriendsVsPosts => "friends-vs-posts",
            Self::AgeVsActivity => "age-vs-activity",
            Self::Correlation => "correlation",
            Self::ActivityHeatmap => "activity-heatmap",
        }
    }

    /// Message key of the panel heading.
    pub fn title_key(self) -> String {
        format!("panel-{}", self.slug())
    }

    /// File name of the PNG export, e.g. `panel-03-reaction-types.png`.
    pub fn png_file_name(self) -> String {
        format!("panel-{:02}-{}.png", self.number(), self.slug())
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.number(), self.slug())
    }
}

/// Everything a panel needs besides its data.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Resolved styling.
    pub style: &'a ChartStyle,
    /// Localized text.
    pub messages: &'a Messages,
}

impl RenderContext<'_> {
    /// Localized text of `key`.
    pub fn text(&self, key: &str) -> String {
        self.messages.get(key)
    }
}

/// One chart of the dashboard.
///
/// `prepare` is a pure aggregation over the dataset; `draw` renders the
/// prepared data on any plotters backend.
pub trait Panel {
    /// Aggregated data the chart is drawn from.
    type Data;

    /// Which panel this is.
    fn id(&self) -> PanelId;

    /// Aggregates the dataset.
    fn prepare(&self, dataset: &IntegratedDataset) -> Self::Data;

    /// Draws the prepared data on `root`.
    fn draw<DB>(
        &self,
        data: &Self::Data,
        root: &DrawingArea<DB, Shift>,
        ctx: &RenderContext<'_>,
    ) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: std::error::Error + Send + Sync + 'static;
}
