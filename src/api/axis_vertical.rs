use tracing::trace;

use crate::core::placement::GRID_EPSILON;
use crate::core::{
    Bounds, MeasureContext, TextSize, VerticalAxisItemPlacer, VerticalAxisPosition,
    VerticalLabelPosition,
};
use crate::error::ChartResult;
use crate::render::{ChartDrawContext, LinePrimitive, TextHAlign, TextPrimitive, TextVAlign};

use super::axis_config::{AxisStyle, HorizontalLabelPosition, VerticalAxisConfig};

/// Measurement pass results of a vertical axis for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VerticalAxisMeasure {
    pub max_label_width: f64,
    pub max_label_height: f64,
    /// Horizontal space the axis occupies next to the chart.
    pub width: f64,
    pub top_inset: f64,
    pub bottom_inset: f64,
}

/// Y axis drawn at the start or end edge of the chart.
#[derive(Debug)]
pub struct VerticalAxis {
    position: VerticalAxisPosition,
    style: AxisStyle,
    label_position: VerticalLabelPosition,
    horizontal_label_position: HorizontalLabelPosition,
    placer: Box<dyn VerticalAxisItemPlacer>,
}

impl VerticalAxis {
    #[must_use]
    pub fn new(
        position: VerticalAxisPosition,
        style: AxisStyle,
        placer: Box<dyn VerticalAxisItemPlacer>,
    ) -> Self {
        Self {
            position,
            style,
            label_position: VerticalLabelPosition::default(),
            horizontal_label_position: HorizontalLabelPosition::default(),
            placer,
        }
    }

    pub fn from_config(
        position: VerticalAxisPosition,
        config: &VerticalAxisConfig,
    ) -> ChartResult<Self> {
        let placer = config.build_placer()?;
        Ok(Self::new(position, config.style.clone(), Box::new(placer))
            .with_label_position(config.label_position)
            .with_horizontal_label_position(config.horizontal_label_position))
    }

    #[must_use]
    pub fn with_label_position(mut self, label_position: VerticalLabelPosition) -> Self {
        self.label_position = label_position;
        self
    }

    #[must_use]
    pub fn with_horizontal_label_position(mut self, position: HorizontalLabelPosition) -> Self {
        self.horizontal_label_position = position;
        self
    }

    #[must_use]
    pub fn position(&self) -> VerticalAxisPosition {
        self.position
    }

    fn label_size(&self, context: &MeasureContext, y: f64) -> TextSize {
        if self.style.label_font_size_px <= 0.0 {
            return TextSize::default();
        }
        context.measure_text(&self.style.formatter.format(y), self.style.label_font_size_px)
    }

    fn max_label_size(&self, context: &MeasureContext, values: &[f64]) -> TextSize {
        values
            .iter()
            .map(|y| self.label_size(context, *y))
            .fold(TextSize::default(), |acc, size| TextSize {
                width: acc.width.max(size.width),
                height: acc.height.max(size.height),
            })
    }

    /// Tallest label, needed before the chart height is known.
    #[must_use]
    pub fn max_label_height(&self, context: &MeasureContext) -> f64 {
        let values = self
            .placer
            .height_measurement_label_values(context, self.position);
        self.max_label_size(context, &values).height
    }

    #[must_use]
    pub fn measure(&self, context: &MeasureContext, axis_height: f64) -> VerticalAxisMeasure {
        let max_label_height = self.max_label_height(context);
        let width_values = self.placer.width_measurement_label_values(
            context,
            axis_height,
            max_label_height,
            self.position,
        );
        let max_label_width = self.max_label_size(context, &width_values).width;

        let label_band = match self.horizontal_label_position {
            HorizontalLabelPosition::Outside if max_label_width > 0.0 => {
                self.style.label_padding + max_label_width
            }
            _ => 0.0,
        };
        let line_thickness = self.style.max_line_thickness();
        let measured = VerticalAxisMeasure {
            max_label_width,
            max_label_height,
            width: self.style.line_thickness + self.style.tick_length + label_band,
            top_inset: self.placer.top_axis_inset(
                context,
                self.label_position,
                max_label_height,
                line_thickness,
            ),
            bottom_inset: self.placer.bottom_axis_inset(
                context,
                self.label_position,
                max_label_height,
                line_thickness,
            ),
        };
        trace!(position = ?self.position, ?measured, "measured vertical axis");
        measured
    }

    fn items(&self, context: &ChartDrawContext<'_>, max_label_height: f64) -> (Vec<f64>, Vec<f64>) {
        let measure = context.measure();
        let axis_height = context.chart_bounds().height();
        let labels =
            self.placer
                .label_values(measure, axis_height, max_label_height, self.position);
        let lines = self
            .placer
            .line_values(measure, axis_height, max_label_height, self.position)
            .unwrap_or_else(|| labels.clone());
        (labels, lines)
    }

    /// Pixel y of a line at `y`; with `shift_top_lines` the top line is raised
    /// by half its thickness so it sits right above the chart.
    fn line_pixel(&self, context: &ChartDrawContext<'_>, y: f64, thickness: f64) -> f64 {
        let pixel = context.y_to_pixel(y, Some(self.position));
        let max_y = context.chart_values().y_range(Some(self.position)).max_y;
        let at_top = (y - max_y).abs() <= GRID_EPSILON * max_y.abs().max(1.0);
        if at_top && self.placer.shift_top_lines(context.measure()) {
            pixel - 0.5 * thickness
        } else {
            pixel
        }
    }

    /// Whether the axis is drawn on the left of the chart.
    fn is_left(&self, context: &ChartDrawContext<'_>) -> bool {
        (self.position == VerticalAxisPosition::Start) == context.measure().is_ltr()
    }

    /// Guidelines, drawn before the layers.
    pub fn draw_behind_layers(
        &self,
        context: &mut ChartDrawContext<'_>,
        measured: &VerticalAxisMeasure,
    ) {
        let thickness = self.style.guideline_thickness;
        if thickness <= 0.0 {
            return;
        }
        let (_, lines) = self.items(context, measured.max_label_height);
        let bounds = context.chart_bounds();
        let pixels: Vec<f64> = lines
            .into_iter()
            .map(|y| self.line_pixel(context, y, thickness))
            .collect();
        for y in pixels {
            context.surface().draw_line(LinePrimitive::horizontal(
                y,
                bounds.left,
                bounds.right,
                thickness,
                self.style.guideline_color,
            ));
        }
    }

    /// Axis line, ticks and labels. `axis_bounds` is the strip next to the chart.
    pub fn draw_above_layers(
        &self,
        context: &mut ChartDrawContext<'_>,
        axis_bounds: Bounds,
        measured: &VerticalAxisMeasure,
    ) {
        let style = &self.style;
        let chart = context.chart_bounds();
        let is_left = self.is_left(context);
        // Edge facing the chart, and the direction pointing away from it.
        let (edge, outward) = if is_left {
            (axis_bounds.right, -1.0)
        } else {
            (axis_bounds.left, 1.0)
        };

        let (labels, lines) = self.items(context, measured.max_label_height);
        let ticks: Vec<f64> = lines
            .into_iter()
            .map(|y| self.line_pixel(context, y, style.tick_thickness))
            .collect();
        let label_pixels: Vec<f64> = labels
            .iter()
            .map(|y| context.y_to_pixel(*y, Some(self.position)))
            .collect();

        let surface = context.surface();
        if style.line_thickness > 0.0 {
            surface.draw_line(LinePrimitive::vertical(
                edge + outward * 0.5 * style.line_thickness,
                chart.top,
                chart.bottom,
                style.line_thickness,
                style.line_color,
            ));
        }

        let (tick_a, tick_b) = match self.horizontal_label_position {
            HorizontalLabelPosition::Outside => (
                edge + outward * (style.line_thickness + style.tick_length),
                edge,
            ),
            HorizontalLabelPosition::Inside => (
                edge + outward * style.line_thickness,
                edge - outward * style.tick_length,
            ),
        };
        if style.tick_thickness > 0.0 && style.tick_length > 0.0 {
            for y in ticks {
                surface.draw_line(LinePrimitive::horizontal(
                    y,
                    tick_a.min(tick_b),
                    tick_a.max(tick_b),
                    style.tick_thickness,
                    style.line_color,
                ));
            }
        }

        if style.label_font_size_px <= 0.0 {
            return;
        }
        let (label_x, h_align) = match (self.horizontal_label_position, is_left) {
            (HorizontalLabelPosition::Outside, true) => (
                edge - (style.line_thickness + style.tick_length + style.label_padding),
                TextHAlign::Right,
            ),
            (HorizontalLabelPosition::Outside, false) => (
                edge + style.line_thickness + style.tick_length + style.label_padding,
                TextHAlign::Left,
            ),
            (HorizontalLabelPosition::Inside, true) => {
                (edge + style.tick_length + style.label_padding, TextHAlign::Left)
            }
            (HorizontalLabelPosition::Inside, false) => {
                (edge - style.tick_length - style.label_padding, TextHAlign::Right)
            }
        };
        let v_align = match self.label_position {
            VerticalLabelPosition::Center => TextVAlign::Center,
            VerticalLabelPosition::Top => TextVAlign::Bottom,
            VerticalLabelPosition::Bottom => TextVAlign::Top,
        };
        for (y, pixel) in labels.into_iter().zip(label_pixels) {
            let text = style.formatter.format(y);
            if text.is_empty() {
                continue;
            }
            surface.draw_text(
                TextPrimitive::new(
                    text,
                    label_x,
                    pixel,
                    style.label_font_size_px,
                    style.label_color,
                    h_align,
                )
                .with_v_align(v_align),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::VerticalAxis;
    use crate::api::axis_config::{AxisStyle, HorizontalLabelPosition};
    use crate::core::{
        Bounds, CartesianChartModel, CartesianLayerModel, ChartValues,
        DefaultVerticalAxisItemPlacer, HorizontalLayout, MeasureContext, VerticalAxisPosition,
    };

    fn context() -> MeasureContext {
        let layer = CartesianLayerModel::from_y_values(&[0.0, 100.0]).expect("layer");
        let values = ChartValues::from_model(&CartesianChartModel::new(vec![layer]));
        MeasureContext::new(Bounds::from_size(200.0, 200.0), values, HorizontalLayout::default())
    }

    fn axis(position: HorizontalLabelPosition) -> VerticalAxis {
        VerticalAxis::new(
            VerticalAxisPosition::Start,
            AxisStyle::default(),
            Box::new(DefaultVerticalAxisItemPlacer::count(Some(3), true)),
        )
        .with_horizontal_label_position(position)
    }

    #[test]
    fn outside_labels_widen_the_axis() {
        let context = context();
        let outside = axis(HorizontalLabelPosition::Outside).measure(&context, 150.0);
        let inside = axis(HorizontalLabelPosition::Inside).measure(&context, 150.0);
        // Widest label is "100": three 7.2px characters.
        assert!((outside.width - (1.0 + 4.0 + 4.0 + 21.6)).abs() < 1e-9);
        assert!((inside.width - 5.0).abs() < 1e-9);
    }

    #[test]
    fn centered_labels_reserve_half_a_label_above_and_below() {
        let measured = axis(HorizontalLabelPosition::Outside).measure(&context(), 150.0);
        assert!((measured.bottom_inset - 7.2).abs() < 1e-9);
        assert!((measured.top_inset - 7.7).abs() < 1e-9);
    }
}
