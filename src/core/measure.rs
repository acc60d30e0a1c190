use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{Bounds, ChartValues, HorizontalDimensions, HorizontalLayout, LayoutDirection};

/// Pixel size of a laid-out piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextSize {
    pub width: f64,
    pub height: f64,
}

/// Text measurement capability supplied by the host's text stack.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font_size_px: f64) -> TextSize;
}

/// Measures text from per-character width and line-height ratios.
///
/// Good enough for layout in headless hosts and tests; real backends should
/// plug in their shaping engine instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimatedTextMeasurer {
    pub char_width_ratio: f64,
    pub line_height_ratio: f64,
}

impl Default for EstimatedTextMeasurer {
    fn default() -> Self {
        Self {
            char_width_ratio: 0.6,
            line_height_ratio: 1.2,
        }
    }
}

impl TextMeasurer for EstimatedTextMeasurer {
    fn measure(&self, text: &str, font_size_px: f64) -> TextSize {
        let lines = text.lines().count().max(1);
        let longest = text
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        TextSize {
            width: longest as f64 * font_size_px * self.char_width_ratio,
            height: lines as f64 * font_size_px * self.line_height_ratio,
        }
    }
}

/// Measurement facts shared by every layout computation of one frame.
#[derive(Clone)]
pub struct MeasureContext {
    canvas_bounds: Bounds,
    chart_values: ChartValues,
    horizontal_layout: HorizontalLayout,
    layout_direction: LayoutDirection,
    text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
}

impl fmt::Debug for MeasureContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeasureContext")
            .field("canvas_bounds", &self.canvas_bounds)
            .field("chart_values", &self.chart_values)
            .field("horizontal_layout", &self.horizontal_layout)
            .field("layout_direction", &self.layout_direction)
            .finish_non_exhaustive()
    }
}

impl MeasureContext {
    #[must_use]
    pub fn new(
        canvas_bounds: Bounds,
        chart_values: ChartValues,
        horizontal_layout: HorizontalLayout,
    ) -> Self {
        Self {
            canvas_bounds,
            chart_values,
            horizontal_layout,
            layout_direction: LayoutDirection::default(),
            text_measurer: Arc::new(EstimatedTextMeasurer::default()),
        }
    }

    #[must_use]
    pub fn with_layout_direction(mut self, layout_direction: LayoutDirection) -> Self {
        self.layout_direction = layout_direction;
        self
    }

    #[must_use]
    pub fn with_text_measurer(mut self, text_measurer: Arc<dyn TextMeasurer + Send + Sync>) -> Self {
        self.text_measurer = text_measurer;
        self
    }

    #[must_use]
    pub fn canvas_bounds(&self) -> Bounds {
        self.canvas_bounds
    }

    #[must_use]
    pub fn chart_values(&self) -> &ChartValues {
        &self.chart_values
    }

    #[must_use]
    pub fn horizontal_layout(&self) -> HorizontalLayout {
        self.horizontal_layout
    }

    #[must_use]
    pub fn layout_direction(&self) -> LayoutDirection {
        self.layout_direction
    }

    #[must_use]
    pub fn is_ltr(&self) -> bool {
        self.layout_direction.is_ltr()
    }

    #[must_use]
    pub fn layout_direction_multiplier(&self) -> f64 {
        self.layout_direction.multiplier()
    }

    #[must_use]
    pub fn measure_text(&self, text: &str, font_size_px: f64) -> TextSize {
        self.text_measurer.measure(text, font_size_px)
    }

    /// Largest scroll offset for content of `dimensions` inside `chart_width`.
    ///
    /// Positive for left-to-right layouts; right-to-left layouts scroll
    /// towards negative offsets, so the value is mirrored and clamped to `<= 0`.
    #[must_use]
    pub fn max_scroll_distance(&self, chart_width: f64, dimensions: HorizontalDimensions) -> f64 {
        let overflow = self.layout_direction_multiplier()
            * (dimensions.content_width(&self.chart_values) - chart_width);
        let clamped = if self.is_ltr() {
            overflow.max(0.0)
        } else {
            overflow.min(0.0)
        };
        clamped.ceil()
    }
}

#[cfg(test)]
mod tests {
    use super::{EstimatedTextMeasurer, MeasureContext, TextMeasurer};
    use crate::core::{Bounds, ChartValues, HorizontalLayout, LayoutDirection};

    #[test]
    fn estimated_measurer_uses_longest_line() {
        let size = EstimatedTextMeasurer::default().measure("ab\nabcd", 10.0);
        assert_eq!(size.width, 24.0);
        assert_eq!(size.height, 24.0);
    }

    #[test]
    fn right_to_left_max_scroll_is_mirrored() {
        let values = ChartValues::neutral();
        let layout = HorizontalLayout::segmented(100.0);
        let dims = layout.dimensions(&values, 50.0);
        let ltr = MeasureContext::new(Bounds::from_size(50.0, 50.0), values.clone(), layout);
        let rtl = ltr.clone().with_layout_direction(LayoutDirection::RightToLeft);

        assert_eq!(ltr.max_scroll_distance(50.0, dims), 150.0);
        assert_eq!(rtl.max_scroll_distance(50.0, dims), -150.0);
    }
}
