//! Chart shapes shared by the panels.
//!
//! Every function fills the background, draws a caption and renders one kind
//! of chart onto the given area. Categorical axes use `f64` coordinates with
//! one unit per category, so labels sit on integer positions.

use crate::panel::RenderContext;
use crate::stats::{BoxSummary, Histogram};
use crate::style::{contrast_text, ColorScale};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, TextStyle};
use socialdash_common::Result;
use std::f64::consts::{FRAC_PI_2, TAU};

const MARGIN: u32 = 16;
const X_LABEL_AREA: u32 = 56;
const Y_LABEL_AREA: u32 = 72;
const COLORBAR_WIDTH: u32 = 110;
const MISSING_CELL: RGBColor = RGBColor(235, 235, 235);
const NEUTRAL_MARKER: RGBColor = RGBColor(160, 160, 160);

pub(crate) fn caption_font<'a>(ctx: &RenderContext<'a>) -> FontDesc<'a> {
    (ctx.style.font_family.as_str(), f64::from(ctx.style.title_font_size)).into_font()
}

pub(crate) fn label_font<'a>(ctx: &RenderContext<'a>) -> FontDesc<'a> {
    (ctx.style.font_family.as_str(), f64::from(ctx.style.label_font_size)).into_font()
}

fn centered(style: TextStyle<'_>) -> TextStyle<'_> {
    style.pos(Pos::new(HPos::Center, VPos::Center))
}

/// Compact number formatting: whole numbers without decimals.
pub(crate) fn format_value(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

/// Label of the category at integer position `value`, empty between positions.
pub(crate) fn category_label(labels: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

/// Axis range around `min..max` with 5% padding on both sides.
pub(crate) fn padded_range(min: f64, max: f64) -> std::ops::Range<f64> {
    if max > min {
        let pad = (max - min) * 0.05;
        (min - pad)..(max + pad)
    } else {
        (min - 1.0)..(max + 1.0)
    }
}

fn value_axis_max(max: f64) -> f64 {
    if max > 0.0 {
        max * 1.15
    } else {
        1.0
    }
}

/// Caption plus a centred message, for panels without data.
pub(crate) fn no_data<DB>(
    root: &DrawingArea<DB, Shift>,
    ctx: &RenderContext<'_>,
    title: &str,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: std::error::Error + Send + Sync + 'static,
{
    root.fill(&ctx.style.background)?;
    let area = root.titled(title, caption_font(ctx))?;
    let (w, h) = area.dim_in_pixel();
    area.draw(&Text::new(
        ctx.text("label-no-data"),
        (w as i32 / 2, h as i32 / 2),
        centered(label_font(ctx).color(&NEUTRAL_MARKER)),
    ))?;
    Ok(())
}

/// A bar per category.
#[derive(Debug, Clone)]
pub(crate) struct BarChart {
    pub title: String,
    pub category_desc: String,
    pub value_desc: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub colors: Vec<RGBColor>,
    pub value_labels: bool,
}

impl BarChart {
    fn color(&self, index: usize) -> RGBColor {
        self.colors
            .get(index)
            .or_else(|| self.colors.last())
            .copied()
            .unwrap_or(NEUTRAL_MARKER)
    }

    fn max_value(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }
}

/// Vertical bars, categories left to right.
pub(crate) fn vertical_bars<DB>(
    root: &DrawingArea<DB, Shift>,
    ctx: &RenderContext<'_>,
    bars: &BarChart,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: std::error::Error + Send + Sync + 'static,
{
    if bars.values.is_empty() {
        return no_data(root, ctx, &bars.title);
    }
    root.fill(&ctx.style.background)?;

    let n = bars.values.len();
    let mut chart = ChartBuilder::on(root)
        .caption(&bars.title, caption_font(ctx))
        .margin(MARGIN)
        .x_label_area_size(X_LABEL_AREA)
        .y_label_area_size(Y_LABEL_AREA)
        .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..value_axis_max(bars.max_value()))?;

    let x_formatter = |v: &f64| category_label(&bars.labels, *v);
    {
        let mut mesh = chart.configure_mesh();
        mesh.x_labels(n)
            .x_label_formatter(&x_formatter)
            .x_desc(bars.category_desc.as_str())
            .y_desc(bars.value_desc.as_str())
            .label_style(label_font(ctx))
            .axis_desc_style(label_font(ctx))
            .disable_x_mesh();
        if !ctx.style.enable_grid {
            mesh.disable_y_mesh();
        }
        mesh.draw()?;
    }

    chart.draw_series(bars.values.iter().enumerate().map(|(i, &v)| {
        let x = i as f64;
        Rectangle::new([(x - 0.4, 0.0), (x + 0.4, v)], bars.color(i).filled())
    }))?;

    if bars.value_labels {
        let style = label_font(ctx)
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        chart.draw_series(
            bars.values
                .iter()
                .enumerate()
                .map(|(i, &v)| Text::new(format_value(v), (i as f64, v), style.clone())),
        )?;
    }

    Ok(())
}

/// Horizontal bars, the first category on top.
pub(crate) fn horizontal_bars<DB>(
    root: &DrawingArea<DB, Shift>,
    ctx: &RenderContext<'_>,
    bars: &BarChart,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: std::error::Error + Send + Sync + 'static,
{
    if bars.values.is_empty() {
        return no_data(root, ctx, &bars.title);
    }
    root.fill(&ctx.style.background)?;

    let n = bars.values.len();
    let row = |rank: usize| (n - 1 - rank) as f64;
    let mut chart = ChartBuilder::on(root)
        .caption(&bars.title, caption_font(ctx))
        .margin(MARGIN)
        .x_label_area_size(X_LABEL_AREA)
        .y_label_area_size(Y_LABEL_AREA * 2)
        .build_cartesian_2d(0f64..value_axis_max(bars.max_value()), -0.5f64..(n as f64 - 0.5))?;

    let reversed: Vec<String> = bars.labels.iter().rev().cloned().collect();
    let y_formatter = |v: &f64| category_label(&reversed, *v);
    {
        let mut mesh = chart.configure_mesh();
        mesh.y_labels(n)
            .y_label_formatter(&y_formatter)
            .x_desc(bars.value_desc.as_str())
            .y_desc(bars.category_desc.as_str())
            .label_style(label_font(ctx))
            .axis_desc_style(label_font(ctx))
            .disable_y_mesh();
        if !ctx.style.enable_grid {
            mesh.disable_x_mesh();
        }
        mesh.draw()?;
    }

    chart.draw_series(bars.values.iter().enumerate().map(|(rank, &v)| {
        let y = row(rank);
        Rectangle::new([(0.0, y - 0.4), (v, y + 0.4)], bars.color(rank).filled())
    }))?;

    if bars.value_labels {
        let style = label_font(ctx)
            .color(&BLACK)
            .pos(Pos::new(HPos::Left, VPos::Center));
        chart.draw_series(bars.values.iter().enumerate().map(|(rank, &v)| {
            Text::new(format!(" {}", format_value(v)), (v, row(rank)), style.clone())
        }))?;
    }

    Ok(())
}

/// A donut with percentage labels and a legend on the right.
pub(crate) fn donut<DB>(
    root: &DrawingArea<DB, Shift>,
    ctx: &RenderContext<'_>,
    title: &str,
    slices: &[(String, u64)],
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: std::error::Error + Send + Sync + 'static,
{
    let total: u64 = slices.iter().map(|(_, count)| count).sum();
    if total == 0 {
        return no_data(root, ctx, title);
    }
    root.fill(&ctx.style.background)?;

    let area = root.titled(title, caption_font(ctx))?;
    let (w, _) = area.dim_in_pixel();
    let legend_width = (w / 4).max(140).min(w / 2);
    let (pie_area, legend_area) = area.split_horizontally(w - legend_width);

    let (pw, ph) = pie_area.dim_in_pixel();
    let (cx, cy) = (f64::from(pw) / 2.0, f64::from(ph) / 2.0);
    let outer = f64::from(pw.min(ph)) * 0.42;
    let hole = outer * 0.4;
    let point = |angle: f64, radius: f64| {
        (
            (cx + radius * angle.cos()).round() as i32,
            (cy + radius * angle.sin()).round() as i32,
        )
    };

    let mut start = -FRAC_PI_2;
    for (i, (_, count)) in slices.iter().enumerate() {
        let share = *count as f64 / total as f64;
        let sweep = share * TAU;
        let steps = ((sweep / TAU) * 180.0).ceil().max(2.0) as usize;

        let mut wedge = vec![point(0.0, 0.0)];
        wedge.extend((0..=steps).map(|s| point(start + sweep * s as f64 / steps as f64, outer)));
        pie_area.draw(&Polygon::new(wedge, ctx.style.color(i).filled()))?;
        start += sweep;
    }
    pie_area.draw(&Circle::new(
        point(0.0, 0.0),
        hole.round() as i32,
        ctx.style.background.filled(),
    ))?;

    let mut start = -FRAC_PI_2;
    for (i, (_, count)) in slices.iter().enumerate() {
        let share = *count as f64 / total as f64;
        let mid = start + share * TAU / 2.0;
        if share >= 0.03 {
            pie_area.draw(&Text::new(
                format!("{:.1}%", share * 100.0),
                point(mid, (outer + hole) / 2.0),
                centered(label_font(ctx).color(&contrast_text(ctx.style.color(i)))),
            ))?;
        }
        start += share * TAU;
    }

    let line = ctx.style.label_font_size as i32 + 10;
    for (i, (label, count)) in slices.iter().enumerate() {
        let y = 20 + i as i32 * line;
        legend_area.draw(&Rectangle::new(
            [(4, y - 6), (16, y + 6)],
            ctx.style.color(i).filled(),
        ))?;
        legend_area.draw(&Text::new(
            format!("{label} ({count})"),
            (24, y),
            label_font(ctx)
                .color(&BLACK)
                .pos(Pos::new(HPos::Left, VPos::Center)),
        ))?;
    }

    Ok(())
}

/// A histogram, optionally with a horizontal box plot above it.
#[derive(Debug, Clone)]
pub(crate) struct HistogramChart {
    pub title: String,
    pub value_desc: String,
    pub count_desc: String,
    pub histogram: Histogram,
    pub color: RGBColor,
    pub summary: Option<BoxSummary>,
}

pub(crate) fn histogram<DB>(
    root: &DrawingArea<DB, Shift>,
    ctx: &RenderContext<'_>,
    plot: &HistogramChart,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: std::error::Error + Send + Sync + 'static,
{
    root.fill(&ctx.style.background)?;
    let area = root.titled(&plot.title, caption_font(ctx))?;

    let edges = &plot.histogram.edges;
    let x_range = edges[0]..edges[edges.len() - 1];

    let hist_area = if let Some(summary) = &plot.summary {
        let (_, h) = area.dim_in_pixel();
        let (box_area, hist_area) = area.split_vertically(h / 4);
        draw_box(&box_area, ctx, x_range.clone(), summary, plot.color)?;
        hist_area
    } else {
        area
    };

    let y_max = value_axis_max(plot.histogram.max_count() as f64);
    let mut chart = ChartBuilder::on(&hist_area)
        .margin(MARGIN)
        .x_label_area_size(X_LABEL_AREA)
        .y_label_area_size(Y_LABEL_AREA)
        .build_cartesian_2d(x_range, 0f64..y_max)?;

    {
        let mut mesh = chart.configure_mesh();
        mesh.x_desc(plot.value_desc.as_str())
            .y_desc(plot.count_desc.as_str())
            .label_style(label_font(ctx))
            .axis_desc_style(label_font(ctx));
        if !ctx.style.enable_grid {
            mesh.disable_mesh();
        }
        mesh.draw()?;
    }

    chart.draw_series(plot.histogram.bins().map(|(start, end, count)| {
        let mut bar = Rectangle::new([(start, 0.0), (end, count as f64)], plot.color.filled());
        bar.set_margin(0, 0, 1, 1);
        bar
    }))?;

    Ok(())
}

fn draw_box<DB>(
    area: &DrawingArea<DB, Shift>,
    ctx: &RenderContext<'_>,
    x_range: std::ops::Range<f64>,
    summary: &BoxSummary,
    color: RGBColor,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: std::error::Error + Send + Sync + 'static,
{
    let mut chart = ChartBuilder::on(area)
        .margin(MARGIN)
        .y_label_area_size(Y_LABEL_AREA)
        .build_cartesian_2d(x_range, 0f64..1f64)?;

    let stroke = color.stroke_width(2);
    chart.draw_series(std::iter::once(Rectangle::new(
        [(summary.q1, 0.3), (summary.q3, 0.7)],
        color.mix(0.35).filled(),
    )))?;
    chart.draw_series(std::iter::once(Rectangle::new(
        [(summary.q1, 0.3), (summary.q3, 0.7)],
        stroke,
    )))?;
    chart.draw_series(
        [
            vec![(summary.median, 0.3), (summary.median, 0.7)],
            vec![(summary.lower_whisker, 0.5), (summary.q1, 0.5)],
            vec![(summary.q3, 0.5), (summary.upper_whisker, 0.5)],
            vec![(summary.lower_whisker, 0.4), (summary.lower_whisker, 0.6)],
            vec![(summary.upper_whisker, 0.4), (summary.upper_whisker, 0.6)],
        ]
        .into_iter()
        .map(|points| PathElement::new(points, stroke)),
    )?;
    chart.draw_series(
        summary
            .outliers
            .iter()
            .map(|&v| Circle::new((v, 0.5), 3, color.stroke_width(1))),
    )?;

    let caption = format!(
        "Q1 {}  |  {}  |  Q3 {}",
        format_value(summary.q1),
        format_value(summary.median),
        format_value(summary.q3)
    );
    let (w, _) = area.dim_in_pixel();
    area.draw(&Text::new(
        caption,
        (w as i32 - MARGIN as i32, MARGIN as i32),
        label_font(ctx)
            .color(&NEUTRAL_MARKER)
            .pos(Pos::new(HPos::Right, VPos::Top)),
    ))?;
    Ok(())
}

/// Lines over categories; `None` points leave a gap.
#[derive(Debug, Clone)]
pub(crate) struct LineChart {
    pub title: String,
    pub category_desc: String,
    pub value_desc: String,
    pub labels: Vec<String>,
    /// `(legend label, one value per category)`.
    pub series: Vec<(String, Vec<Option<f64>>)>,
}

/// Contiguous runs of present points, as `(position, value)`.
fn present_runs(points: &[Option<f64>]) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for (i, point) in points.iter().enumerate() {
        match point {
            Some(v) => current.push((i as f64, *v)),
            None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

pub(crate) fn grouped_lines<DB>(
    root: &DrawingArea<DB, Shift>,
    ctx: &RenderContext<'_>,
    plot: &LineChart,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: std::error::Error + Send + Sync + 'static,
{
    let max = plot
        .series
        .iter()
        .flat_map(|(_, points)| points.iter().flatten())
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    if plot.labels.is_empty() || !max.is_finite() {
        return no_data(root, ctx, &plot.title);
    }
    root.fill(&ctx.style.background)?;

    let n = plot.labels.len();
    let mut chart = ChartBuilder::on(root)
        .caption(&plot.title, caption_font(ctx))
        .margin(MARGIN)
        .x_label_area_size(X_LABEL_AREA)
        .y_label_area_size(Y_LABEL_AREA)
        .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..value_axis_max(max))?;

    let x_formatter = |v: &f64| category_label(&plot.labels, *v);
    {
        let mut mesh = chart.configure_mesh();
        mesh.x_labels(n)
            .x_label_formatter(&x_formatter)
            .x_desc(plot.category_desc.as_str())
            .y_desc(plot.value_desc.as_str())
            .label_style(label_font(ctx))
            .axis_desc_style(label_font(ctx))
            .disable_x_mesh();
        if !ctx.style.enable_grid {
            mesh.disable_y_mesh();
        }
        mesh.draw()?;
    }

    for (i, (name, points)) in plot.series.iter().enumerate() {
        let color = ctx.style.color(i);
        for run in present_runs(points) {
            chart.draw_series(LineSeries::new(run, color.stroke_width(2)))?;
        }
        chart
            .draw_series(
                points
                    .iter()
                    .enumerate()
                    .filter_map(|(x, v)| v.map(|v| Circle::new((x as f64, v), 4, color.filled()))),
            )?
            .label(name.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font(label_font(ctx))
        .background_style(ctx.style.background.mix(0.85))
        .border_style(NEUTRAL_MARKER)
        .draw()?;

    Ok(())
}

/// One marker of a bubble chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Bubble {
    pub x: f64,
    pub y: f64,
    pub color_value: Option<f64>,
    pub size_value: f64,
}

/// Scatter with marker colour and size bound to two further variables.
#[derive(Debug, Clone)]
pub(crate) struct BubbleChart {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub color_desc: String,
    pub scale: ColorScale,
    pub bubbles: Vec<Bubble>,
}

const MIN_RADIUS: f64 = 3.0;
const MAX_RADIUS: f64 = 20.0;

/// Marker radius with area proportional to `value / max`.
pub(crate) fn bubble_radius(value: f64, max: f64) -> f64 {
    if max > 0.0 && value > 0.0 {
        MIN_RADIUS + (value / max).sqrt() * (MAX_RADIUS - MIN_RADIUS)
    } else {
        MIN_RADIUS
    }
}

pub(crate) fn bubbles<DB>(
    root: &DrawingArea<DB, Shift>,
    ctx: &RenderContext<'_>,
    plot: &BubbleChart,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: std::error::Error + Send + Sync + 'static,
{
    if plot.bubbles.is_empty() {
        return no_data(root, ctx, &plot.title);
    }
    root.fill(&ctx.style.background)?;

    let area = root.titled(&plot.title, caption_font(ctx))?;
    let (w, _) = area.dim_in_pixel();
    let (plot_area, bar_area) = area.split_horizontally(w.saturating_sub(COLORBAR_WIDTH));

    let extent = |f: fn(&Bubble) -> f64| {
        plot.bubbles.iter().map(f).fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        })
    };
    let (x_min, x_max) = extent(|b| b.x);
    let (y_min, y_max) = extent(|b| b.y);
    let max_size = plot.bubbles.iter().map(|b| b.size_value).fold(0.0, f64::max);
    let colored: Vec<f64> = plot.bubbles.iter().filter_map(|b| b.color_value).collect();
    let c_min = colored.iter().copied().fold(f64::INFINITY, f64::min);
    let c_max = colored.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let mut chart = ChartBuilder::on(&plot_area)
        .margin(MARGIN)
        .x_label_area_size(X_LABEL_AREA)
        .y_label_area_size(Y_LABEL_AREA)
        .build_cartesian_2d(padded_range(x_min, x_max), padded_range(y_min, y_max))?;
    {
        let mut mesh = chart.configure_mesh();
        mesh.x_desc(plot.x_desc.as_str())
            .y_desc(plot.y_desc.as_str())
            .label_style(label_font(ctx))
            .axis_desc_style(label_font(ctx));
        if !ctx.style.enable_grid {
            mesh.disable_mesh();
        }
        mesh.draw()?;
    }

    // Largest first so small markers stay visible.
    let mut ordered: Vec<&Bubble> = plot.bubbles.iter().collect();
    ordered.sort_by(|a, b| b.size_value.total_cmp(&a.size_value));
    chart.draw_series(ordered.into_iter().map(|b| {
        let radius = bubble_radius(b.size_value, max_size).round() as i32;
        let style = match b.color_value {
            Some(v) => plot.scale.sample_range(v, c_min, c_max).mix(0.75).filled(),
            None => NEUTRAL_MARKER.mix(0.75).filled(),
        };
        Circle::new((b.x, b.y), radius, style)
    }))?;

    if !colored.is_empty() {
        colorbar(&bar_area, ctx, plot.scale, (c_min, c_max), &plot.color_desc)?;
    }
    Ok(())
}

/// A matrix of coloured cells with printed values.
#[derive(Debug, Clone)]
pub(crate) struct HeatMap {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub x_labels: Vec<String>,
    /// Row labels, the first row drawn on top.
    pub y_labels: Vec<String>,
    /// `cells[row][column]`, `None` for cells without a value.
    pub cells: Vec<Vec<Option<f64>>>,
    pub scale: ColorScale,
    pub range: (f64, f64),
    pub colorbar_desc: String,
    pub missing_text: String,
}

pub(crate) fn heatmap<DB>(
    root: &DrawingArea<DB, Shift>,
    ctx: &RenderContext<'_>,
    plot: &HeatMap,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: std::error::Error + Send + Sync + 'static,
{
    let (nx, ny) = (plot.x_labels.len(), plot.y_labels.len());
    if nx == 0 || ny == 0 {
        return no_data(root, ctx, &plot.title);
    }
    root.fill(&ctx.style.background)?;

    let area = root.titled(&plot.title, caption_font(ctx))?;
    let (w, _) = area.dim_in_pixel();
    let (plot_area, bar_area) = area.split_horizontally(w.saturating_sub(COLORBAR_WIDTH));

    let mut chart = ChartBuilder::on(&plot_area)
        .margin(MARGIN)
        .x_label_area_size(X_LABEL_AREA)
        .y_label_area_size(Y_LABEL_AREA * 2)
        .build_cartesian_2d(-0.5f64..(nx as f64 - 0.5), -0.5f64..(ny as f64 - 0.5))?;

    let reversed_rows: Vec<String> = plot.y_labels.iter().rev().cloned().collect();
    let x_formatter = |v: &f64| category_label(&plot.x_labels, *v);
    let y_formatter = |v: &f64| category_label(&reversed_rows, *v);
    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(nx)
        .y_labels(ny)
        .x_label_formatter(&x_formatter)
        .y_label_formatter(&y_formatter)
        .x_desc(plot.x_desc.as_str())
        .y_desc(plot.y_desc.as_str())
        .label_style(label_font(ctx))
        .axis_desc_style(label_font(ctx))
        .draw()?;

    let (min, max) = plot.range;
    for (row, values) in plot.cells.iter().enumerate() {
        let y = (ny - 1 - row) as f64;
        for (column, value) in values.iter().enumerate() {
            let x = column as f64;
            let fill = value.map_or(MISSING_CELL, |v| plot.scale.sample_range(v, min, max));
            chart.draw_series(std::iter::once(Rectangle::new(
                [(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)],
                fill.filled(),
            )))?;

            let text = value.map_or_else(|| plot.missing_text.clone(), format_value);
            chart.draw_series(std::iter::once(Text::new(
                text,
                (x, y),
                centered(label_font(ctx).color(&contrast_text(fill))),
            )))?;
        }
    }

    colorbar(&bar_area, ctx, plot.scale, plot.range, &plot.colorbar_desc)?;
    Ok(())
}

/// A vertical colour bar, maximum on top.
fn colorbar<DB>(
    area: &DrawingArea<DB, Shift>,
    ctx: &RenderContext<'_>,
    scale: ColorScale,
    (min, max): (f64, f64),
    title: &str,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: std::error::Error + Send + Sync + 'static,
{
    const STEPS: i32 = 64;
    let (_, h) = area.dim_in_pixel();
    let (top, bottom) = (40, h as i32 - X_LABEL_AREA as i32);
    if bottom <= top {
        return Ok(());
    }

    area.draw(&Text::new(
        title.to_string(),
        (8, 12),
        label_font(ctx)
            .color(&BLACK)
            .pos(Pos::new(HPos::Left, VPos::Center)),
    ))?;

    let span = f64::from(bottom - top);
    for step in 0..STEPS {
        let y0 = top + (span * f64::from(step) / f64::from(STEPS)).round() as i32;
        let y1 = top + (span * f64::from(step + 1) / f64::from(STEPS)).round() as i32;
        let t = 1.0 - (f64::from(step) + 0.5) / f64::from(STEPS);
        area.draw(&Rectangle::new([(8, y0), (28, y1)], scale.sample(t).filled()))?;
    }

    let tick = label_font(ctx)
        .color(&BLACK)
        .pos(Pos::new(HPos::Left, VPos::Center));
    area.draw(&Text::new(format_value(max), (34, top), tick.clone()))?;
    area.draw(&Text::new(format_value(min), (34, bottom), tick))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(3.0), "3");
        assert_eq!(format_value(0.5), "0.50");
        assert_eq!(format_value(-0.123), "-0.12");
    }

    #[test]
    fn test_category_label_only_on_integers() {
        let labels = vec!["a".to_string(), "b".to_string()];
        assert_eq!(category_label(&labels, 0.0), "a");
        assert_eq!(category_label(&labels, 1.0000001), "b");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, -1.0), "");
        assert_eq!(category_label(&labels, 2.0), "");
    }

    #[test]
    fn test_padded_range() {
        assert_eq!(padded_range(0.0, 10.0), -0.5..10.5);
        assert_eq!(padded_range(3.0, 3.0), 2.0..4.0);
    }

    #[test]
    fn test_present_runs_split_on_gaps() {
        let runs = present_runs(&[Some(1.0), None, Some(2.0), Some(3.0), None]);
        assert_eq!(runs, vec![vec![(0.0, 1.0)], vec![(2.0, 2.0), (3.0, 3.0)]]);
        assert!(present_runs(&[None, None]).is_empty());
    }

    #[test]
    fn test_bubble_radius() {
        assert_eq!(bubble_radius(0.0, 10.0), MIN_RADIUS);
        assert_eq!(bubble_radius(10.0, 10.0), MAX_RADIUS);
        assert!(bubble_radius(2.5, 10.0) < bubble_radius(5.0, 10.0));
        assert_eq!(bubble_radius(5.0, 0.0), MIN_RADIUS);
    }
}
