//! Pearson correlation matrix.

use super::heading;
use crate::charts::{heatmap, HeatMap};
use crate::panel::{Panel, PanelId, RenderContext};
use crate::stats::pearson;
use crate::style::ColorScale;
use plotters::coord::Shift;
use plotters::prelude::*;
use socialdash_common::Result;
use socialdash_data::{IntegratedDataset, IntegratedRecord};

type Variable = fn(&IntegratedRecord) -> Option<f64>;

/// Correlated variables as `(label key, accessor)`, in matrix order.
pub const CORRELATION_VARIABLES: [(&str, Variable); 5] = [
    ("label-age", |r| r.age),
    ("label-friend-count", |r| Some(r.friend_count as f64)),
    ("label-post-count", |r| Some(r.post_count as f64)),
    ("label-reactions-given", |r| Some(r.reactions_given as f64)),
    ("label-reactions-received", |r| Some(r.reactions_received as f64)),
];

/// Symmetric coefficient matrix; `None` where a coefficient is undefined.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    /// `values[row][column]` in [`CORRELATION_VARIABLES`] order.
    pub values: [[Option<f64>; 5]; 5],
}

impl CorrelationMatrix {
    /// Coefficients over pairwise complete observations.
    pub fn compute(records: &[IntegratedRecord]) -> Self {
        let mut values = [[None; 5]; 5];
        for (i, (_, x)) in CORRELATION_VARIABLES.iter().enumerate() {
            for (j, (_, y)) in CORRELATION_VARIABLES.iter().enumerate().skip(i) {
                let pairs: Vec<(f64, f64)> = records
                    .iter()
                    .filter_map(|r| Some((x(r)?, y(r)?)))
                    .collect();
                let r = pearson(&pairs);
                values[i][j] = r;
                values[j][i] = r;
            }
        }
        Self { values }
    }
}

/// Diverging heat-map of the correlation matrix with printed coefficients.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorrelationPanel;

impl Panel for CorrelationPanel {
    type Data = CorrelationMatrix;

    fn id(&self) -> PanelId {
        PanelId::Correlation
    }

    fn prepare(&self, dataset: &IntegratedDataset) -> Self::Data {
        CorrelationMatrix::compute(&dataset.records)
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
        let labels: Vec<String> = CORRELATION_VARIABLES
            .iter()
            .map(|(key, _)| ctx.text(key))
            .collect();
        let map = HeatMap {
            title: heading(ctx, self.id()),
            x_desc: String::new(),
            y_desc: String::new(),
            x_labels: labels.clone(),
            y_labels: labels,
            cells: data.values.iter().map(|row| row.to_vec()).collect(),
            scale: ColorScale::RdBu,
            range: (-1.0, 1.0),
            colorbar_desc: "r".to_string(),
            missing_text: ctx.text("label-not-available"),
        };
        heatmap(root, ctx, &map)
    }
}
