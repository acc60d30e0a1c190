use tracing::trace;

use crate::core::placement::{GRID_EPSILON, restrict_to_one_extra};
use crate::core::{
    Bounds, HorizontalAxisItemPlacer, HorizontalDimensions, MeasureContext, TextSize,
};
use crate::error::ChartResult;
use crate::render::{ChartDrawContext, LinePrimitive, TextHAlign, TextPrimitive, TextVAlign};

use super::axis_config::{AxisStyle, HorizontalAxisConfig, HorizontalAxisPosition};

/// Measurement pass results of a horizontal axis for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HorizontalAxisMeasure {
    pub max_label_width: f64,
    pub max_label_height: f64,
    /// Vertical space the axis occupies.
    pub height: f64,
    pub start_inset: f64,
    pub end_inset: f64,
    /// Unscalable padding needed so the extreme labels are not clipped.
    pub start_label_reserve: f64,
    pub end_label_reserve: f64,
}

/// X axis drawn above or below the chart.
#[derive(Debug)]
pub struct HorizontalAxis {
    position: HorizontalAxisPosition,
    style: AxisStyle,
    placer: Box<dyn HorizontalAxisItemPlacer>,
}

impl HorizontalAxis {
    #[must_use]
    pub fn new(
        position: HorizontalAxisPosition,
        style: AxisStyle,
        placer: Box<dyn HorizontalAxisItemPlacer>,
    ) -> Self {
        Self {
            position,
            style,
            placer,
        }
    }

    pub fn from_config(
        position: HorizontalAxisPosition,
        config: &HorizontalAxisConfig,
    ) -> ChartResult<Self> {
        let placer = config.build_placer()?;
        Ok(Self::new(position, config.style.clone(), Box::new(placer)))
    }

    #[must_use]
    pub fn position(&self) -> HorizontalAxisPosition {
        self.position
    }

    #[must_use]
    pub fn style(&self) -> &AxisStyle {
        &self.style
    }

    fn label_size(&self, context: &MeasureContext, x: f64) -> TextSize {
        if self.style.label_font_size_px <= 0.0 {
            return TextSize::default();
        }
        context.measure_text(&self.style.formatter.format(x), self.style.label_font_size_px)
    }

    fn max_label_size(&self, context: &MeasureContext, values: &[f64]) -> TextSize {
        values
            .iter()
            .map(|x| self.label_size(context, *x))
            .fold(TextSize::default(), |acc, size| TextSize {
                width: acc.width.max(size.width),
                height: acc.height.max(size.height),
            })
    }

    /// Sizes the axis before anything is drawn.
    #[must_use]
    pub fn measure(
        &self,
        context: &MeasureContext,
        dimensions: HorizontalDimensions,
    ) -> HorizontalAxisMeasure {
        let full = dimensions.full_x_range(context.chart_values());
        let width_values = self
            .placer
            .width_measurement_label_values(context, dimensions, &full);
        let max_label_width = self.max_label_size(context, &width_values).width;
        let height_values = self.placer.height_measurement_label_values(
            context,
            dimensions,
            &full,
            max_label_width,
        );
        let max_label_height = self.max_label_size(context, &height_values).height;

        let label_band = if max_label_height > 0.0 {
            self.style.label_padding + max_label_height
        } else {
            0.0
        };
        let height = self.style.line_thickness + self.style.tick_length + label_band;

        let (start_label_reserve, end_label_reserve) = if context.horizontal_layout().is_segmented()
        {
            (0.0, 0.0)
        } else {
            let half_width = |value: Option<f64>| {
                value.map_or(0.0, |x| 0.5 * self.label_size(context, x).width)
            };
            (
                half_width(self.placer.first_label_value(context, max_label_width)),
                half_width(self.placer.last_label_value(context, max_label_width)),
            )
        };

        let measured = HorizontalAxisMeasure {
            max_label_width,
            max_label_height,
            height,
            start_inset: self.placer.start_axis_inset(
                context,
                dimensions,
                self.style.tick_thickness,
                max_label_width,
            ),
            end_inset: self.placer.end_axis_inset(
                context,
                dimensions,
                self.style.tick_thickness,
                max_label_width,
            ),
            start_label_reserve,
            end_label_reserve,
        };
        trace!(position = ?self.position, ?measured, "measured horizontal axis");
        measured
    }

    /// Label and line values for the current frame.
    fn items(&self, context: &ChartDrawContext<'_>, max_label_width: f64) -> (Vec<f64>, Vec<f64>) {
        let measure = context.measure();
        let visible = context.visible_x_range();
        let full = context.full_x_range();
        let labels = self
            .placer
            .label_values(measure, &visible, &full, max_label_width);
        let lines = self
            .placer
            .line_values(measure, &visible, &full, max_label_width)
            .unwrap_or_else(|| restrict_to_one_extra(&labels, &visible));
        (labels, lines)
    }

    /// Pixel positions of the ticks for `lines`.
    ///
    /// Segmented layouts put ticks on segment boundaries, so `max_x` gets one
    /// on each side. Shifted extreme ticks move outwards by half their
    /// thickness so they sit flush with the vertical axis lines.
    fn tick_positions(&self, context: &ChartDrawContext<'_>, lines: &[f64]) -> Vec<f64> {
        let measure = context.measure();
        let values = context.chart_values();
        let direction = measure.layout_direction_multiplier();
        let shift = if self.placer.shift_extreme_ticks(measure) {
            0.5 * self.style.tick_thickness
        } else {
            0.0
        };
        let half_segment = if measure.horizontal_layout().is_segmented() {
            0.5 * context.horizontal_dimensions().x_spacing
        } else {
            0.0
        };
        let is_close = |a: f64, b: f64| (a - b).abs() <= GRID_EPSILON * b.abs().max(1.0);

        let mut positions = Vec::with_capacity(lines.len() + 1);
        for &x in lines {
            let center = context.x_to_pixel(x);
            let at_min = is_close(x, values.min_x());
            let at_max = is_close(x, values.max_x());
            if half_segment > 0.0 {
                let before = center - direction * half_segment;
                positions.push(if at_min { before - direction * shift } else { before });
                if at_max {
                    positions.push(center + direction * (half_segment + shift));
                }
            } else if at_min {
                positions.push(center - direction * shift);
            } else if at_max {
                positions.push(center + direction * shift);
            } else {
                positions.push(center);
            }
        }
        positions
    }

    /// Guidelines, drawn before the layers.
    pub fn draw_behind_layers(
        &self,
        context: &mut ChartDrawContext<'_>,
        measured: &HorizontalAxisMeasure,
    ) {
        if self.style.guideline_thickness <= 0.0 {
            return;
        }
        let (_, lines) = self.items(context, measured.max_label_width);
        let bounds = context.chart_bounds();
        for x in self.tick_positions(context, &lines) {
            // Guidelines at the chart edges would cover the vertical axis lines.
            if x <= bounds.left || x >= bounds.right {
                continue;
            }
            context.surface().draw_line(LinePrimitive::vertical(
                x,
                bounds.top,
                bounds.bottom,
                self.style.guideline_thickness,
                self.style.guideline_color,
            ));
        }
    }

    /// Axis line, ticks and labels inside `axis_bounds`.
    pub fn draw_above_layers(
        &self,
        context: &mut ChartDrawContext<'_>,
        axis_bounds: Bounds,
        measured: &HorizontalAxisMeasure,
    ) {
        if !axis_bounds.is_valid() {
            return;
        }
        let (labels, lines) = self.items(context, measured.max_label_width);
        let ticks = self.tick_positions(context, &lines);
        let style = &self.style;
        let (line_y, tick_from, tick_to, label_y, v_align) = match self.position {
            HorizontalAxisPosition::Bottom => {
                let top = axis_bounds.top;
                (
                    top + 0.5 * style.line_thickness,
                    top,
                    top + style.line_thickness + style.tick_length,
                    top + style.line_thickness + style.tick_length + style.label_padding,
                    TextVAlign::Top,
                )
            }
            HorizontalAxisPosition::Top => {
                let bottom = axis_bounds.bottom;
                (
                    bottom - 0.5 * style.line_thickness,
                    bottom,
                    bottom - style.line_thickness - style.tick_length,
                    bottom - style.line_thickness - style.tick_length - style.label_padding,
                    TextVAlign::Bottom,
                )
            }
        };

        let surface = context.surface();
        surface.save();
        surface.clip_rect(axis_bounds);
        if style.line_thickness > 0.0 {
            surface.draw_line(LinePrimitive::horizontal(
                line_y,
                axis_bounds.left,
                axis_bounds.right,
                style.line_thickness,
                style.line_color,
            ));
        }
        if style.tick_thickness > 0.0 && style.tick_length > 0.0 {
            for x in ticks {
                surface.draw_line(LinePrimitive::vertical(
                    x,
                    tick_from.min(tick_to),
                    tick_from.max(tick_to),
                    style.tick_thickness,
                    style.line_color,
                ));
            }
        }
        surface.restore();

        if style.label_font_size_px <= 0.0 {
            return;
        }
        let pixels: Vec<f64> = labels.iter().map(|x| context.x_to_pixel(*x)).collect();
        let surface = context.surface();
        surface.save();
        surface.clip_rect(axis_bounds);
        for (x, pixel) in labels.into_iter().zip(pixels) {
            let text = style.formatter.format(x);
            if text.is_empty() {
                continue;
            }
            surface.draw_text(
                TextPrimitive::new(
                    text,
                    pixel,
                    label_y,
                    style.label_font_size_px,
                    style.label_color,
                    TextHAlign::Center,
                )
                .with_v_align(v_align),
            );
        }
        surface.restore();
    }
}
