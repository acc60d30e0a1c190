//! Axis item placement: which values get labels, ticks and guidelines.
//!
//! Placers are stateless strategies. Every query is a pure function of the
//! measure context and its arguments, so they can be shared freely between
//! the measuring and drawing passes of a frame.

mod config;
mod horizontal;
mod vertical;

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::core::{HorizontalDimensions, MeasureContext, VerticalAxisPosition};

pub use config::{HorizontalPlacerConfig, VerticalPlacerConfig};
pub use horizontal::DefaultHorizontalAxisItemPlacer;
pub use vertical::{DefaultVerticalAxisItemPlacer, VerticalPlacerMode};

/// Upper bound on the number of items a placer emits for one query.
pub(crate) const MAX_ITEM_COUNT: i64 = 4_096;

/// Relative tolerance used when snapping values to a step grid.
pub(crate) const GRID_EPSILON: f64 = 1e-9;

/// Placement queries for horizontal axes.
pub trait HorizontalAxisItemPlacer: fmt::Debug {
    /// Whether ticks at `min_x`/`max_x` are moved to the edges of the content,
    /// where they line up with the vertical axes.
    fn shift_extreme_ticks(&self, _context: &MeasureContext) -> bool {
        true
    }

    /// When room must be reserved for the first label, returns its x value.
    fn first_label_value(&self, _context: &MeasureContext, _max_label_width: f64) -> Option<f64> {
        None
    }

    /// When room must be reserved for the last label, returns its x value.
    fn last_label_value(&self, _context: &MeasureContext, _max_label_width: f64) -> Option<f64> {
        None
    }

    /// Label x values, restricted to `visible` plus at most one value on each side.
    fn label_values(
        &self,
        context: &MeasureContext,
        visible: &RangeInclusive<f64>,
        full: &RangeInclusive<f64>,
        max_label_width: f64,
    ) -> Vec<f64>;

    /// Values whose labels are measured to find the widest label.
    fn width_measurement_label_values(
        &self,
        context: &MeasureContext,
        dimensions: HorizontalDimensions,
        full: &RangeInclusive<f64>,
    ) -> Vec<f64>;

    /// Values whose labels are measured to find the tallest label.
    fn height_measurement_label_values(
        &self,
        context: &MeasureContext,
        dimensions: HorizontalDimensions,
        full: &RangeInclusive<f64>,
        max_label_width: f64,
    ) -> Vec<f64>;

    /// Tick and guideline x values. `None` reuses the label values.
    fn line_values(
        &self,
        _context: &MeasureContext,
        _visible: &RangeInclusive<f64>,
        _full: &RangeInclusive<f64>,
        _max_label_width: f64,
    ) -> Option<Vec<f64>> {
        None
    }

    fn start_axis_inset(
        &self,
        context: &MeasureContext,
        dimensions: HorizontalDimensions,
        tick_thickness: f64,
        max_label_width: f64,
    ) -> f64;

    fn end_axis_inset(
        &self,
        context: &MeasureContext,
        dimensions: HorizontalDimensions,
        tick_thickness: f64,
        max_label_width: f64,
    ) -> f64;
}

/// Where a vertical axis label sits relative to its tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VerticalLabelPosition {
    #[default]
    Center,
    Top,
    Bottom,
}

/// Placement queries for vertical axes.
pub trait VerticalAxisItemPlacer: fmt::Debug {
    /// Whether lines at `max_y` are shifted to sit immediately above the chart.
    fn shift_top_lines(&self, _context: &MeasureContext) -> bool {
        true
    }

    fn label_values(
        &self,
        context: &MeasureContext,
        axis_height: f64,
        max_label_height: f64,
        position: VerticalAxisPosition,
    ) -> Vec<f64>;

    /// Values whose labels are measured to size the axis horizontally.
    fn width_measurement_label_values(
        &self,
        context: &MeasureContext,
        axis_height: f64,
        max_label_height: f64,
        position: VerticalAxisPosition,
    ) -> Vec<f64>;

    /// Values whose labels are measured to find the tallest label.
    fn height_measurement_label_values(
        &self,
        context: &MeasureContext,
        position: VerticalAxisPosition,
    ) -> Vec<f64>;

    /// Tick and guideline y values. `None` reuses the label values.
    fn line_values(
        &self,
        _context: &MeasureContext,
        _axis_height: f64,
        _max_label_height: f64,
        _position: VerticalAxisPosition,
    ) -> Option<Vec<f64>> {
        None
    }

    fn top_axis_inset(
        &self,
        context: &MeasureContext,
        label_position: VerticalLabelPosition,
        max_label_height: f64,
        max_line_thickness: f64,
    ) -> f64;

    fn bottom_axis_inset(
        &self,
        context: &MeasureContext,
        label_position: VerticalLabelPosition,
        max_label_height: f64,
        max_line_thickness: f64,
    ) -> f64;
}

/// Keeps the values inside `visible` plus the nearest value on each side.
///
/// `values` must be sorted ascending.
#[must_use]
pub fn restrict_to_one_extra(values: &[f64], visible: &RangeInclusive<f64>) -> Vec<f64> {
    let before = values.iter().copied().filter(|v| v < visible.start()).last();
    let after = values.iter().copied().find(|v| v > visible.end());
    before
        .into_iter()
        .chain(values.iter().copied().filter(|v| visible.contains(v)))
        .chain(after)
        .collect()
}

/// Returns `value` if it is a usable positive extent, `None` otherwise.
pub(crate) fn positive_extent(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Grid indices `i` such that `origin + i * step` lies inside `[lower, upper]`.
pub(crate) fn grid_indices(origin: f64, step: f64, lower: f64, upper: f64) -> Option<(i64, i64)> {
    if !step.is_finite() || step <= 0.0 || !(lower <= upper) {
        return None;
    }
    let first = ((lower - origin) / step - GRID_EPSILON).ceil();
    let last = ((upper - origin) / step + GRID_EPSILON).floor();
    if !first.is_finite() || !last.is_finite() || last < first {
        return None;
    }
    Some((first as i64, last as i64))
}

/// Values `origin + i * step` for `i` in `first..=last`.
///
/// Ranges longer than [`MAX_ITEM_COUNT`] are thinned with a constant stride
/// so the result still spans the whole interval.
pub(crate) fn grid_values(origin: f64, step: f64, first: i64, last: i64) -> Vec<f64> {
    if last < first {
        return Vec::new();
    }
    let count = (last as i128 - first as i128 + 1) as u128;
    let stride = count.div_ceil(MAX_ITEM_COUNT as u128).max(1);
    let stride = usize::try_from(stride).unwrap_or(usize::MAX);
    (first..=last)
        .step_by(stride)
        .map(|i| origin + i as f64 * step)
        .collect()
}
