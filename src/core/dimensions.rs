use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::core::ChartValues;
use crate::error::{ChartError, ChartResult};

/// Horizontal pixel geometry of the chart content for one draw pass.
///
/// Scalable values grow with zoom; unscalable paddings stay fixed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HorizontalDimensions {
    pub x_spacing: f64,
    pub scalable_start_padding: f64,
    pub scalable_end_padding: f64,
    pub unscalable_start_padding: f64,
    pub unscalable_end_padding: f64,
}

impl HorizontalDimensions {
    #[must_use]
    pub fn start_padding(self) -> f64 {
        self.scalable_start_padding + self.unscalable_start_padding
    }

    #[must_use]
    pub fn end_padding(self) -> f64 {
        self.scalable_end_padding + self.unscalable_end_padding
    }

    #[must_use]
    pub fn padding(self) -> f64 {
        self.start_padding() + self.end_padding()
    }

    /// Total width of the chart content, paddings included.
    #[must_use]
    pub fn content_width(self, values: &ChartValues) -> f64 {
        self.x_spacing * values.x_step_count() + self.padding()
    }

    #[must_use]
    pub fn scaled(self, zoom: f64) -> Self {
        Self {
            x_spacing: self.x_spacing * zoom,
            scalable_start_padding: self.scalable_start_padding * zoom,
            scalable_end_padding: self.scalable_end_padding * zoom,
            ..self
        }
    }

    /// X range covered by the whole content, paddings included.
    ///
    /// Without spacing the paddings have no x equivalent and the range is
    /// just `min_x..=max_x`.
    #[must_use]
    pub fn full_x_range(self, values: &ChartValues) -> RangeInclusive<f64> {
        if self.x_spacing <= 0.0 {
            return values.min_x()..=values.max_x();
        }
        let per_pixel = values.x_step() / self.x_spacing;
        (values.min_x() - self.start_padding() * per_pixel)
            ..=(values.max_x() + self.end_padding() * per_pixel)
    }

    /// Zoom at which the content exactly fills `chart_width`.
    #[must_use]
    pub fn fit_zoom(self, chart_width: f64, values: &ChartValues) -> f64 {
        let scalable = self.x_spacing * values.x_step_count()
            + self.scalable_start_padding
            + self.scalable_end_padding;
        let available = chart_width - self.unscalable_start_padding - self.unscalable_end_padding;
        if scalable <= 0.0 || available <= 0.0 {
            return 1.0;
        }
        available / scalable
    }
}

/// Strategy for distributing x-axis pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HorizontalLayout {
    /// Every x value is centred in a segment of `segment_width` pixels.
    Segmented {
        segment_width: f64,
        start_padding: f64,
        end_padding: f64,
    },
    /// The content is stretched to the available width (at zoom `1.0`).
    FullWidth {
        scalable_start_padding: f64,
        scalable_end_padding: f64,
        unscalable_start_padding: f64,
        unscalable_end_padding: f64,
    },
}

impl Default for HorizontalLayout {
    fn default() -> Self {
        Self::segmented(32.0)
    }
}

impl HorizontalLayout {
    #[must_use]
    pub fn segmented(segment_width: f64) -> Self {
        Self::Segmented {
            segment_width,
            start_padding: 0.0,
            end_padding: 0.0,
        }
    }

    #[must_use]
    pub fn full_width() -> Self {
        Self::FullWidth {
            scalable_start_padding: 0.0,
            scalable_end_padding: 0.0,
            unscalable_start_padding: 0.0,
            unscalable_end_padding: 0.0,
        }
    }

    #[must_use]
    pub fn is_segmented(self) -> bool {
        matches!(self, Self::Segmented { .. })
    }

    pub fn validate(self) -> ChartResult<Self> {
        let paddings = match self {
            Self::Segmented {
                segment_width,
                start_padding,
                end_padding,
            } => {
                if !segment_width.is_finite() || segment_width <= 0.0 {
                    return Err(ChartError::InvalidConfig(
                        "segment width must be finite and > 0".to_owned(),
                    ));
                }
                [start_padding, end_padding, 0.0, 0.0]
            }
            Self::FullWidth {
                scalable_start_padding,
                scalable_end_padding,
                unscalable_start_padding,
                unscalable_end_padding,
            } => [
                scalable_start_padding,
                scalable_end_padding,
                unscalable_start_padding,
                unscalable_end_padding,
            ],
        };
        if paddings
            .iter()
            .any(|padding| !padding.is_finite() || *padding < 0.0)
        {
            return Err(ChartError::InvalidConfig(
                "horizontal layout paddings must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }

    #[must_use]
    pub fn dimensions(self, values: &ChartValues, available_width: f64) -> HorizontalDimensions {
        self.dimensions_reserving(values, available_width, 0.0, 0.0)
    }

    /// Computes dimensions while keeping at least `start_reserve`/`end_reserve`
    /// pixels of unscalable padding, e.g. so extreme labels are not clipped.
    #[must_use]
    pub fn dimensions_reserving(
        self,
        values: &ChartValues,
        available_width: f64,
        start_reserve: f64,
        end_reserve: f64,
    ) -> HorizontalDimensions {
        match self {
            Self::Segmented {
                segment_width,
                start_padding,
                end_padding,
            } => HorizontalDimensions {
                x_spacing: segment_width,
                scalable_start_padding: 0.5 * segment_width,
                scalable_end_padding: 0.5 * segment_width,
                unscalable_start_padding: start_padding.max(start_reserve),
                unscalable_end_padding: end_padding.max(end_reserve),
            },
            Self::FullWidth {
                scalable_start_padding,
                scalable_end_padding,
                unscalable_start_padding,
                unscalable_end_padding,
            } => {
                let unscalable_start_padding = unscalable_start_padding.max(start_reserve);
                let unscalable_end_padding = unscalable_end_padding.max(end_reserve);
                let inner = (available_width
                    - scalable_start_padding
                    - scalable_end_padding
                    - unscalable_start_padding
                    - unscalable_end_padding)
                    .max(0.0);
                let step_count = values.x_step_count();
                if step_count > 0.0 {
                    HorizontalDimensions {
                        x_spacing: inner / step_count,
                        scalable_start_padding,
                        scalable_end_padding,
                        unscalable_start_padding,
                        unscalable_end_padding,
                    }
                } else {
                    HorizontalDimensions {
                        x_spacing: 0.0,
                        scalable_start_padding: scalable_start_padding + 0.5 * inner,
                        scalable_end_padding: scalable_end_padding + 0.5 * inner,
                        unscalable_start_padding,
                        unscalable_end_padding,
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::HorizontalLayout;
    use crate::core::{CartesianChartModel, CartesianLayerModel, ChartValues};

    fn values(count: usize) -> ChartValues {
        let ys: Vec<f64> = (0..count).map(|i| i as f64).collect();
        let layer = CartesianLayerModel::from_y_values(&ys).expect("layer");
        ChartValues::from_model(&CartesianChartModel::new(vec![layer]))
    }

    #[test]
    fn segmented_content_is_one_segment_per_x() {
        let values = values(5);
        let dims = HorizontalLayout::segmented(10.0).dimensions(&values, 300.0);
        assert_eq!(dims.content_width(&values), 50.0);
    }

    #[test]
    fn full_width_fills_available_width() {
        let values = values(5);
        let dims = HorizontalLayout::full_width().dimensions(&values, 400.0);
        assert_eq!(dims.x_spacing, 100.0);
        assert_eq!(dims.content_width(&values), 400.0);
    }

    #[test]
    fn full_width_single_value_is_centred() {
        let values = values(1);
        let dims = HorizontalLayout::full_width().dimensions(&values, 200.0);
        assert_eq!(dims.start_padding(), 100.0);
        assert_eq!(dims.content_width(&values), 200.0);
    }

    #[test]
    fn negative_available_width_degrades_to_zero_spacing() {
        let values = values(3);
        let dims = HorizontalLayout::full_width().dimensions(&values, -20.0);
        assert_eq!(dims.x_spacing, 0.0);
    }

    #[test]
    fn layout_validation_rejects_non_positive_segment_width() {
        assert!(HorizontalLayout::segmented(0.0).validate().is_err());
        assert!(HorizontalLayout::full_width().validate().is_ok());
    }
}
