use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{ValueFormatter, VerticalAxisPosition};
use crate::render::{
    ChartDrawContext, Color, LinePrimitive, RectPrimitive, TextHAlign, TextPrimitive, TextVAlign,
};

/// Extra content drawn with the chart, either below or above the layers.
pub trait Decoration: fmt::Debug {
    fn draw_behind_layers(&self, _context: &mut ChartDrawContext<'_>) {}

    fn draw_above_layers(&self, _context: &mut ChartDrawContext<'_>) {}
}

/// Which end of the chart a decoration label hugs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DecorationLabelAlign {
    Start,
    #[default]
    End,
}

/// Text shown next to a decoration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecorationLabel {
    /// Fixed text; `None` formats the decoration's value.
    pub text: Option<String>,
    pub font_size_px: f64,
    pub color: Color,
    pub horizontal_padding: f64,
    pub align: DecorationLabelAlign,
    pub formatter: ValueFormatter,
}

impl Default for DecorationLabel {
    fn default() -> Self {
        Self {
            text: None,
            font_size_px: 12.0,
            color: Color::BLACK,
            horizontal_padding: 8.0,
            align: DecorationLabelAlign::End,
            formatter: ValueFormatter::default(),
        }
    }
}

impl DecorationLabel {
    fn draw(&self, context: &mut ChartDrawContext<'_>, value: f64, baseline_y: f64) {
        let text = self
            .text
            .clone()
            .unwrap_or_else(|| self.formatter.format(value));
        if text.is_empty() || self.font_size_px <= 0.0 {
            return;
        }
        let bounds = context.chart_bounds();
        let start_aligned = matches!(self.align, DecorationLabelAlign::Start) == context.measure().is_ltr();
        let (x, h_align) = if start_aligned {
            (bounds.left + self.horizontal_padding, TextHAlign::Left)
        } else {
            (bounds.right - self.horizontal_padding, TextHAlign::Right)
        };
        context.surface().draw_text(
            TextPrimitive::new(text, x, baseline_y, self.font_size_px, self.color, h_align)
                .with_v_align(TextVAlign::Bottom),
        );
    }
}

/// Threshold line across the chart at a fixed y value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizontalLine {
    pub y: f64,
    pub thickness: f64,
    pub color: Color,
    pub vertical_axis: Option<VerticalAxisPosition>,
    pub label: Option<DecorationLabel>,
}

impl HorizontalLine {
    #[must_use]
    pub fn new(y: f64, thickness: f64, color: Color) -> Self {
        Self {
            y,
            thickness,
            color,
            vertical_axis: None,
            label: Some(DecorationLabel::default()),
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: Option<DecorationLabel>) -> Self {
        self.label = label;
        self
    }

    #[must_use]
    pub fn with_vertical_axis(mut self, position: VerticalAxisPosition) -> Self {
        self.vertical_axis = Some(position);
        self
    }
}

impl Decoration for HorizontalLine {
    fn draw_above_layers(&self, context: &mut ChartDrawContext<'_>) {
        let bounds = context.chart_bounds();
        let y = context.y_to_pixel(self.y, self.vertical_axis);
        if self.thickness > 0.0 {
            context.surface().draw_line(LinePrimitive::horizontal(
                y,
                bounds.left,
                bounds.right,
                self.thickness,
                self.color,
            ));
        }
        if let Some(label) = &self.label {
            label.draw(context, self.y, y - 0.5 * self.thickness);
        }
    }
}

/// Shaded band between two y values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizontalBox {
    pub min_y: f64,
    pub max_y: f64,
    pub color: Color,
    pub vertical_axis: Option<VerticalAxisPosition>,
    pub label: Option<DecorationLabel>,
}

impl HorizontalBox {
    #[must_use]
    pub fn new(min_y: f64, max_y: f64, color: Color) -> Self {
        Self {
            min_y: min_y.min(max_y),
            max_y: min_y.max(max_y),
            color,
            vertical_axis: None,
            label: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: DecorationLabel) -> Self {
        self.label = Some(label);
        self
    }
}

impl Decoration for HorizontalBox {
    fn draw_above_layers(&self, context: &mut ChartDrawContext<'_>) {
        let bounds = context.chart_bounds();
        let top = context
            .y_to_pixel(self.max_y, self.vertical_axis)
            .clamp(bounds.top, bounds.bottom);
        let bottom = context
            .y_to_pixel(self.min_y, self.vertical_axis)
            .clamp(bounds.top, bounds.bottom);
        if bottom > top {
            context.surface().draw_rect(RectPrimitive::new(
                bounds.left,
                top,
                bounds.width(),
                bottom - top,
                self.color,
            ));
        }
        if let Some(label) = &self.label {
            label.draw(context, self.max_y, top);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Decoration, HorizontalBox, HorizontalLine};
    use crate::core::{
        Bounds, CartesianChartModel, CartesianLayerModel, ChartValues, HorizontalLayout,
        MeasureContext,
    };
    use crate::render::{ChartDrawContext, Color, RenderFrame};

    fn measure() -> MeasureContext {
        let layer = CartesianLayerModel::from_y_values(&[0.0, 4.0]).expect("layer");
        let values = ChartValues::from_model(&CartesianChartModel::new(vec![layer]));
        MeasureContext::new(Bounds::from_size(100.0, 100.0), values, HorizontalLayout::full_width())
    }

    #[test]
    fn threshold_line_spans_the_chart_at_its_value() {
        let measure = measure();
        let bounds = Bounds::from_size(100.0, 100.0);
        let dims = measure.horizontal_layout().dimensions(measure.chart_values(), 100.0);
        let mut frame = RenderFrame::new(bounds);
        {
            let mut context = ChartDrawContext::new(&mut frame, &measure, bounds, dims);
            HorizontalLine::new(1.0, 2.0, Color::BLACK).draw_above_layers(&mut context);
        }
        let line = frame.lines().next().expect("line");
        assert_eq!((line.x1, line.x2, line.y1), (0.0, 100.0, 75.0));
        assert_eq!(frame.texts().next().map(|text| text.text.as_str()), Some("1"));
    }

    #[test]
    fn box_is_clipped_to_the_chart() {
        let measure = measure();
        let bounds = Bounds::from_size(100.0, 100.0);
        let dims = measure.horizontal_layout().dimensions(measure.chart_values(), 100.0);
        let mut frame = RenderFrame::new(bounds);
        {
            let mut context = ChartDrawContext::new(&mut frame, &measure, bounds, dims);
            HorizontalBox::new(3.0, 9.0, Color::BLACK).draw_above_layers(&mut context);
        }
        let rect = frame.rects().next().expect("rect");
        assert_eq!((rect.y, rect.height), (0.0, 25.0));
    }
}
