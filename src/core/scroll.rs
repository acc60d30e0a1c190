use serde::{Deserialize, Serialize};

use crate::core::{Bounds, HorizontalDimensions, MeasureContext};

/// Scroll request that resolves directly to a target scroll value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AbsoluteScroll {
    /// Scroll value zero.
    Start,
    /// The maximum scroll value.
    End,
    Pixels { pixels: f64 },
    /// Positions logical `x` between the start edge (`bias = 0`) and the end
    /// edge (`bias = 1`) of the chart.
    X { x: f64, bias: f64 },
}

impl AbsoluteScroll {
    #[must_use]
    pub fn x(x: f64) -> Self {
        Self::X { x, bias: 0.0 }
    }

    #[must_use]
    pub fn value(
        self,
        context: &MeasureContext,
        dimensions: HorizontalDimensions,
        bounds: Bounds,
        max_value: f64,
    ) -> f64 {
        match self {
            Self::Start => 0.0,
            Self::End => max_value,
            Self::Pixels { pixels } => pixels,
            Self::X { x, bias } => {
                let values = context.chart_values();
                context.layout_direction_multiplier()
                    * (dimensions.start_padding()
                        + (x - values.min_x()) / values.x_step() * dimensions.x_spacing
                        - bias * bounds.width())
            }
        }
    }
}

/// Scroll request that resolves to a signed delta.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RelativeScroll {
    Pixels { pixels: f64 },
    /// Scrolls by the pixel equivalent of a logical x distance.
    X { x: f64 },
}

impl RelativeScroll {
    #[must_use]
    pub fn delta(
        self,
        context: &MeasureContext,
        dimensions: HorizontalDimensions,
        _bounds: Bounds,
        _max_value: f64,
    ) -> f64 {
        match self {
            Self::Pixels { pixels } => pixels,
            Self::X { x } => {
                context.layout_direction_multiplier() * x / context.chart_values().x_step()
                    * dimensions.x_spacing
            }
        }
    }
}

/// A chart scroll value or delta.
///
/// Logical-x requests are mirrored for right-to-left layouts, whose scroll
/// values are `<= 0`. Resolution never clamps; the caller keeps the result
/// between zero and the maximum scroll value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "scroll", rename_all = "snake_case")]
pub enum Scroll {
    Absolute(AbsoluteScroll),
    Relative(RelativeScroll),
}

impl Scroll {
    pub const START: Self = Self::Absolute(AbsoluteScroll::Start);
    pub const END: Self = Self::Absolute(AbsoluteScroll::End);

    #[must_use]
    pub fn to_pixels(pixels: f64) -> Self {
        Self::Absolute(AbsoluteScroll::Pixels { pixels })
    }

    #[must_use]
    pub fn to_x(x: f64, bias: f64) -> Self {
        Self::Absolute(AbsoluteScroll::X { x, bias })
    }

    #[must_use]
    pub fn by_pixels(pixels: f64) -> Self {
        Self::Relative(RelativeScroll::Pixels { pixels })
    }

    #[must_use]
    pub fn by_x(x: f64) -> Self {
        Self::Relative(RelativeScroll::X { x })
    }

    /// Resolves the request to a delta from `current`.
    #[must_use]
    pub fn delta_from(
        self,
        context: &MeasureContext,
        dimensions: HorizontalDimensions,
        bounds: Bounds,
        max_value: f64,
        current: f64,
    ) -> f64 {
        match self {
            Self::Absolute(scroll) => {
                scroll.value(context, dimensions, bounds, max_value) - current
            }
            Self::Relative(scroll) => scroll.delta(context, dimensions, bounds, max_value),
        }
    }
}
