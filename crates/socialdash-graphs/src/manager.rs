//! Renders every panel of the dashboard.

use crate::panel::{Panel, PanelId, RenderContext};
use crate::panels::{
    ActivityHeatmapPanel, ActivityLevelsPanel, AgeDistributionPanel, AgeGroupActivityPanel,
    AgeGroupsPanel, AgeVsActivityPanel, CorrelationPanel, EngagementRatioPanel,
    FriendsVsPostsPanel, PostTypesPanel, ReactionTypesPanel, TopUsersPanel,
};
use crate::style::ChartStyle;
use plotters::prelude::*;
use socialdash_common::{DashError, Result};
use socialdash_data::IntegratedDataset;
use socialdash_i18n::Messages;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// One rendered panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPanel {
    /// Which panel.
    pub id: PanelId,
    /// Localized heading.
    pub title: String,
    /// The chart as a standalone SVG document.
    pub svg: String,
    /// Where the PNG copy was written, if exported.
    pub png_path: Option<PathBuf>,
}

/// Renders all twelve panels, one after another.
#[derive(Debug, Clone)]
pub struct GraphManager {
    style: ChartStyle,
    messages: Messages,
    png_dir: Option<PathBuf>,
}

impl GraphManager {
    /// Creates a manager rendering SVG only.
    pub const fn new(style: ChartStyle, messages: Messages) -> Self {
        Self {
            style,
            messages,
            png_dir: None,
        }
    }

    /// Additionally writes each panel as a PNG file into `dir`.
    #[must_use]
    pub fn with_png_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.png_dir = Some(dir.into());
        self
    }

    /// The styling in use.
    pub const fn style(&self) -> &ChartStyle {
        &self.style
    }

    /// Renders every panel in page order.
    ///
    /// Fails on the first panel that cannot be drawn; the error names the
    /// panel.
    #[instrument(skip_all, fields(users = dataset.user_count()))]
    pub fn render_all(&self, dataset: &IntegratedDataset) -> Result<Vec<RenderedPanel>> {
        if let Some(dir) = &self.png_dir {
            std::fs::create_dir_all(dir)?;
        }

        let panels = vec![
            self.render(&AgeGroupsPanel, dataset)?,
            self.render(&TopUsersPanel, dataset)?,
            self.render(&ReactionTypesPanel, dataset)?,
            self.render(&ActivityLevelsPanel, dataset)?,
            self.render(&AgeDistributionPanel, dataset)?,
            self.render(&EngagementRatioPanel, dataset)?,
            self.render(&PostTypesPanel, dataset)?,
            self.render(&AgeGroupActivityPanel, dataset)?,
            self.render(&FriendsVsPostsPanel, dataset)?,
            self.render(&AgeVsActivityPanel, dataset)?,
            self.render(&CorrelationPanel, dataset)?,
            self.render(&ActivityHeatmapPanel, dataset)?,
        ];

        info!(count = panels.len(), "Rendered all panels");
        Ok(panels)
    }

    /// Renders a single panel to SVG and, when configured, PNG.
    pub fn render<P: Panel>(&self, panel: &P, dataset: &IntegratedDataset) -> Result<RenderedPanel> {
        let id = panel.id();
        let ctx = RenderContext {
            style: &self.style,
            messages: &self.messages,
        };
        let data = panel.prepare(dataset);
        let fail = |err: DashError| {
            DashError::graph_with_source(format!("Failed to render panel {id}"), err)
        };

        let svg = self.render_svg(panel, &data, &ctx).map_err(fail)?;
        let png_path = match &self.png_dir {
            Some(dir) => Some(self.render_png(panel, &data, &ctx, dir).map_err(fail)?),
            None => None,
        };

        debug!(panel = %id, bytes = svg.len(), "Rendered panel");
        Ok(RenderedPanel {
            id,
            title: ctx.text(&id.title_key()),
            svg,
            png_path,
        })
    }

    fn render_svg<P: Panel>(
        &self,
        panel: &P,
        data: &P::Data,
        ctx: &RenderContext<'_>,
    ) -> Result<String> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, self.dimensions()).into_drawing_area();
            panel.draw(data, &root, ctx)?;
            root.present()?;
        }
        Ok(svg)
    }

    fn render_png<P: Panel>(
        &self,
        panel: &P,
        data: &P::Data,
        ctx: &RenderContext<'_>,
        dir: &Path,
    ) -> Result<PathBuf> {
        let path = dir.join(panel.id().png_file_name());
        {
            let root = BitMapBackend::new(&path, self.dimensions()).into_drawing_area();
            panel.draw(data, &root, ctx)?;
            root.present()?;
        }
        Ok(path)
    }

    const fn dimensions(&self) -> (u32, u32) {
        (self.style.width, self.style.height)
    }
}
