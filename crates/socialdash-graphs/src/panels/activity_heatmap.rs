//! Mean total activity per age group and registration year.

use super::heading;
use crate::charts::{heatmap, HeatMap};
use crate::panel::{Panel, PanelId, RenderContext};
use crate::stats::mean;
use crate::style::ColorScale;
use plotters::coord::Shift;
use plotters::prelude::*;
use socialdash_common::Result;
use socialdash_data::{AgeGroup, IntegratedDataset};
use std::collections::BTreeSet;

/// Mean total activity on an age group by registration year grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityGrid {
    /// Distinct registration years present, ascending.
    pub years: Vec<i32>,
    /// One row per age group in label order, one cell per year; `None`
    /// where no user falls in the cell.
    pub cells: Vec<Vec<Option<f64>>>,
}

impl ActivityGrid {
    /// Smallest and largest cell value.
    pub fn range(&self) -> Option<(f64, f64)> {
        let mut present = self.cells.iter().flatten().flatten().copied();
        let first = present.next()?;
        Some(present.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

/// Heat-map with registration years across and age groups up.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActivityHeatmapPanel;

impl Panel for ActivityHeatmapPanel {
    type Data = ActivityGrid;

    fn id(&self) -> PanelId {
        PanelId::ActivityHeatmap
    }

    fn prepare(&self, dataset: &IntegratedDataset) -> Self::Data {
        let years: Vec<i32> = dataset
            .records
            .iter()
            .filter_map(|r| r.registration_year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let cells = AgeGroup::ALL
            .into_iter()
            .map(|group| {
                years
                    .iter()
                    .map(|&year| {
                        let values: Vec<f64> = dataset
                            .records
                            .iter()
                            .filter(|r| r.age_group == Some(group) && r.registration_year == Some(year))
                            .map(|r| r.total_activity as f64)
                            .collect();
                        mean(&values)
                    })
                    .collect()
            })
            .collect();

        ActivityGrid { years, cells }
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
        // Oldest group on top.
        let map = HeatMap {
            title: heading(ctx, self.id()),
            x_desc: ctx.text("label-registration-year"),
            y_desc: ctx.text("label-age-group"),
            x_labels: data.years.iter().map(ToString::to_string).collect(),
            y_labels: AgeGroup::ALL.iter().rev().map(|g| g.label().to_string()).collect(),
            cells: data.cells.iter().rev().cloned().collect(),
            scale: ColorScale::YlOrRd,
            range: data.range().unwrap_or((0.0, 1.0)),
            colorbar_desc: ctx.text("label-total-activity"),
            missing_text: String::new(),
        };
        heatmap(root, ctx, &map)
    }
}
