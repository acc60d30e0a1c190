use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::core::{CartesianLayerModel, ChartEntry, Point, VerticalAxisPosition};
use crate::extensions::EntryLocationMap;
use crate::render::{
    BlendMode, ChartDrawContext, Color, PathPrimitive, RectPrimitive, RenderFrame,
};

/// Draws one layer of the chart model.
pub trait CartesianLayer: fmt::Debug {
    /// Projects `model` into pixel space and records where each drawn entry
    /// landed under `layer_index`.
    fn draw(
        &self,
        context: &mut ChartDrawContext<'_>,
        model: &CartesianLayerModel,
        layer_index: usize,
        locations: &mut EntryLocationMap,
    );
}

const DEFAULT_SERIES_COLOR: Color = Color::rgb(0.16, 0.38, 0.85);

fn series_color(colors: &[Color], series_index: usize) -> Color {
    if colors.is_empty() {
        DEFAULT_SERIES_COLOR
    } else {
        colors[series_index % colors.len()]
    }
}

/// Visible x range widened by one step on each side, so lines leaving the
/// chart edge are still drawn towards their off-screen neighbour.
fn drawn_x_range(context: &ChartDrawContext<'_>) -> RangeInclusive<f64> {
    let visible = context.visible_x_range();
    let step = context.chart_values().x_step();
    (visible.start() - step)..=(visible.end() + step)
}

/// Pixel y of zero, clamped into the group's range.
fn baseline_pixel(context: &ChartDrawContext<'_>, axis: Option<VerticalAxisPosition>) -> f64 {
    let range = context.chart_values().y_range(axis);
    context.y_to_pixel(0.0_f64.clamp(range.min_y, range.max_y), axis)
}

/// Only entries whose pixel x lies on the chart become marker candidates.
fn within_chart(context: &ChartDrawContext<'_>, x: f64) -> bool {
    let bounds = context.chart_bounds();
    bounds.left <= x && x <= bounds.right
}

fn visible_entries<'m>(
    series: &'m [ChartEntry],
    range: &'m RangeInclusive<f64>,
) -> impl Iterator<Item = &'m ChartEntry> + 'm {
    series.iter().filter(move |entry| range.contains(&entry.x))
}

/// Polyline per series, optionally with a translucent area down to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineLayer {
    pub colors: Vec<Color>,
    pub thickness: f64,
    /// Alpha of the area fill under each line; `None` draws no area.
    pub area_alpha: Option<f64>,
}

impl Default for LineLayer {
    fn default() -> Self {
        Self {
            colors: vec![DEFAULT_SERIES_COLOR],
            thickness: 2.0,
            area_alpha: None,
        }
    }
}

impl LineLayer {
    #[must_use]
    pub fn new(colors: Vec<Color>) -> Self {
        Self {
            colors,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }

    #[must_use]
    pub fn with_area(mut self, alpha: f64) -> Self {
        self.area_alpha = Some(alpha.clamp(0.0, 1.0));
        self
    }

    /// Area under the line, rendered off-screen and composited so overlapping
    /// series do not stack their alpha inside one fill.
    fn draw_area(
        &self,
        context: &mut ChartDrawContext<'_>,
        points: &[Point],
        baseline: f64,
        color: Color,
    ) {
        let (Some(alpha), Some(first), Some(last)) = (self.area_alpha, points.first(), points.last())
        else {
            return;
        };
        let mut polygon = Vec::with_capacity(points.len() + 2);
        polygon.extend_from_slice(points);
        polygon.push(Point::new(last.x, baseline));
        polygon.push(Point::new(first.x, baseline));

        let mut area = RenderFrame::new(context.chart_bounds());
        context.with_other_surface(&mut area, |offscreen| {
            offscreen
                .surface()
                .draw_path(PathPrimitive::filled(polygon, color.with_alpha(alpha)));
        });
        context.surface().composite(area, BlendMode::SourceOver);
    }
}

impl CartesianLayer for LineLayer {
    fn draw(
        &self,
        context: &mut ChartDrawContext<'_>,
        model: &CartesianLayerModel,
        layer_index: usize,
        locations: &mut EntryLocationMap,
    ) {
        let axis = model.target_axis();
        let range = drawn_x_range(context);
        let baseline = baseline_pixel(context, axis);

        for (series_index, series) in model.series().iter().enumerate() {
            let color = series_color(&self.colors, series_index);
            let mut points = Vec::new();
            for entry in visible_entries(series, &range) {
                let location = Point::new(context.x_to_pixel(entry.x), context.y_to_pixel(entry.y, axis));
                if within_chart(context, location.x) {
                    locations.insert(layer_index, *entry, location, color);
                }
                points.push(location);
            }
            if points.len() < 2 {
                continue;
            }
            self.draw_area(context, &points, baseline, color);
            if self.thickness > 0.0 {
                context
                    .surface()
                    .draw_path(PathPrimitive::stroked(points, self.thickness, color));
            }
        }
    }
}

/// Side-by-side columns growing from zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnLayer {
    pub colors: Vec<Color>,
    /// Unzoomed width of one column.
    pub column_width: f64,
    /// Unzoomed gap between the columns of one x value.
    pub series_gap: f64,
    pub corner_radius: f64,
}

impl Default for ColumnLayer {
    fn default() -> Self {
        Self {
            colors: vec![DEFAULT_SERIES_COLOR],
            column_width: 8.0,
            series_gap: 2.0,
            corner_radius: 0.0,
        }
    }
}

impl ColumnLayer {
    #[must_use]
    pub fn new(colors: Vec<Color>) -> Self {
        Self {
            colors,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_column_width(mut self, column_width: f64) -> Self {
        self.column_width = column_width;
        self
    }

    #[must_use]
    pub fn with_series_gap(mut self, series_gap: f64) -> Self {
        self.series_gap = series_gap;
        self
    }
}

impl CartesianLayer for ColumnLayer {
    fn draw(
        &self,
        context: &mut ChartDrawContext<'_>,
        model: &CartesianLayerModel,
        layer_index: usize,
        locations: &mut EntryLocationMap,
    ) {
        let axis = model.target_axis();
        let range = drawn_x_range(context);
        let baseline = baseline_pixel(context, axis);
        let zoom = context.zoom();
        let direction = context.measure().layout_direction_multiplier();
        let width = (self.column_width * zoom).max(0.0);
        let gap = (self.series_gap * zoom).max(0.0);
        let series_count = model.series().len();
        let group_width = series_count as f64 * width + series_count.saturating_sub(1) as f64 * gap;

        for (series_index, series) in model.series().iter().enumerate() {
            let color = series_color(&self.colors, series_index);
            // Series run from the start edge, mirrored for right-to-left.
            let offset = direction
                * (-0.5 * group_width + 0.5 * width + series_index as f64 * (width + gap));
            for entry in visible_entries(series, &range) {
                let center = context.x_to_pixel(entry.x) + offset;
                let top = context.y_to_pixel(entry.y, axis);
                if within_chart(context, center) {
                    locations.insert(layer_index, *entry, Point::new(center, top), color);
                }

                let height = (baseline - top).abs();
                if width <= 0.0 || height <= 0.0 {
                    continue;
                }
                context.surface().draw_rect(
                    RectPrimitive::new(center - 0.5 * width, top.min(baseline), width, height, color)
                        .with_corner_radius(self.corner_radius.min(0.5 * width)),
                );
            }
        }
    }
}
