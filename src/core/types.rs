use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Axis-aligned rectangle in chart-local pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Bounds {
    #[must_use]
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[must_use]
    pub const fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.bottom - self.top
    }

    #[must_use]
    pub fn center_x(self) -> f64 {
        0.5 * (self.left + self.right)
    }

    /// Bounds are drawable when finite with a strictly positive area.
    #[must_use]
    pub fn is_valid(self) -> bool {
        [self.left, self.top, self.right, self.bottom]
            .iter()
            .all(|value| value.is_finite())
            && self.width() > 0.0
            && self.height() > 0.0
    }

    #[must_use]
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.top && point.y <= self.bottom
    }

    /// Shrinks the rectangle by the given insets.
    #[must_use]
    pub fn inset(self, start: f64, top: f64, end: f64, bottom: f64) -> Self {
        Self::new(
            self.left + start,
            self.top + top,
            self.right - end,
            self.bottom - bottom,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One logical data sample of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartEntry {
    pub x: f64,
    pub y: f64,
}

impl ChartEntry {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn from_decimal(x: Decimal, y: Decimal) -> ChartResult<Self> {
        Ok(Self {
            x: decimal_coordinate(x, "x")?,
            y: decimal_coordinate(y, "y")?,
        })
    }

    /// Builds an entry whose x is the unix timestamp of `time`, in seconds.
    pub fn from_time(time: DateTime<Utc>, y: Decimal) -> ChartResult<Self> {
        Ok(Self {
            x: time.timestamp_millis() as f64 / 1000.0,
            y: decimal_coordinate(y, "y")?,
        })
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

fn decimal_coordinate(value: Decimal, axis: &str) -> ChartResult<f64> {
    value
        .to_f64()
        .filter(|coordinate| coordinate.is_finite())
        .ok_or_else(|| ChartError::InvalidData(format!("{axis} cannot be represented as f64")))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LayoutDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

impl LayoutDirection {
    #[must_use]
    pub fn is_ltr(self) -> bool {
        matches!(self, Self::LeftToRight)
    }

    /// `1.0` for left-to-right layouts, `-1.0` for right-to-left.
    #[must_use]
    pub fn multiplier(self) -> f64 {
        if self.is_ltr() { 1.0 } else { -1.0 }
    }
}

/// Side of the chart a vertical axis (and the layers targeting it) lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerticalAxisPosition {
    Start,
    End,
}
