//! Reactions per reaction type.

use super::{heading, ranked_counts};
use crate::charts::donut;
use crate::panel::{Panel, PanelId, RenderContext};
use plotters::coord::Shift;
use plotters::prelude::*;
use socialdash_common::Result;
use socialdash_data::IntegratedDataset;

/// Donut of reaction type shares.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReactionTypesPanel;

impl Panel for ReactionTypesPanel {
    /// Count per type, most frequent first, ties by name.
    type Data = Vec<(String, u64)>;

    fn id(&self) -> PanelId {
        PanelId::ReactionTypes
    }

    fn prepare(&self, dataset: &IntegratedDataset) -> Self::Data {
        ranked_counts(dataset.reactions.iter().map(|r| r.reaction_type.as_str()))
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
        donut(root, ctx, &heading(ctx, self.id()), data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fixture_dataset, users_only};

    #[test]
    fn test_counts_after_cleaning() {
        let data = ReactionTypesPanel.prepare(&fixture_dataset());
        assert_eq!(
            data,
            vec![
                ("like".to_string(), 3),
                ("haha".to_string(), 1),
                ("love".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_no_reactions() {
        assert!(ReactionTypesPanel.prepare(&users_only(&["A,X,22,1577836800"])).is_empty());
    }
}
