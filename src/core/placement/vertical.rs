use crate::core::{MeasureContext, VerticalAxisPosition, YRange};
use crate::error::{ChartError, ChartResult};

use super::{
    GRID_EPSILON, MAX_ITEM_COUNT, VerticalAxisItemPlacer, VerticalLabelPosition, grid_indices,
    grid_values, positive_extent,
};

/// How a [`DefaultVerticalAxisItemPlacer`] picks its values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VerticalPlacerMode {
    /// Labels every `step` (a multiple of it when labels would overlap).
    /// `None` derives a 1/2/5 × 10ⁿ step from the available height.
    Step { step: Option<f64> },
    /// `count` evenly spaced labels, reduced when they would overlap.
    /// `None` shows as many as fit.
    Count { count: Option<usize> },
}

/// Standard vertical placer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefaultVerticalAxisItemPlacer {
    mode: VerticalPlacerMode,
    shift_top_lines: bool,
}

impl Default for DefaultVerticalAxisItemPlacer {
    fn default() -> Self {
        Self {
            mode: VerticalPlacerMode::Step { step: None },
            shift_top_lines: true,
        }
    }
}

impl DefaultVerticalAxisItemPlacer {
    pub fn step(step: Option<f64>, shift_top_lines: bool) -> ChartResult<Self> {
        if step.is_some_and(|step| !step.is_finite() || step <= 0.0) {
            return Err(ChartError::InvalidConfig(
                "vertical placer step must be finite and > 0".to_owned(),
            ));
        }
        Ok(Self {
            mode: VerticalPlacerMode::Step { step },
            shift_top_lines,
        })
    }

    #[must_use]
    pub fn count(count: Option<usize>, shift_top_lines: bool) -> Self {
        Self {
            mode: VerticalPlacerMode::Count { count },
            shift_top_lines,
        }
    }

    #[must_use]
    pub fn mode(self) -> VerticalPlacerMode {
        self.mode
    }

    fn values_for(self, range: YRange, axis_height: f64, max_label_height: f64) -> Vec<f64> {
        let (Some(axis_height), Some(max_label_height)) =
            (positive_extent(axis_height), positive_extent(max_label_height))
        else {
            return Vec::new();
        };
        match self.mode {
            VerticalPlacerMode::Count { count } => {
                count_values(range, axis_height, max_label_height, count)
            }
            VerticalPlacerMode::Step { step } => {
                step_values(range, axis_height, max_label_height, step)
            }
        }
    }

    fn top_line_shift(self, max_line_thickness: f64) -> f64 {
        if self.shift_top_lines {
            0.5 * max_line_thickness
        } else {
            0.0
        }
    }
}

/// Label centres must be at least one label height apart, so at most
/// `floor(axis_height / max_label_height) + 1` labels fit.
fn count_values(
    range: YRange,
    axis_height: f64,
    max_label_height: f64,
    count: Option<usize>,
) -> Vec<f64> {
    let fitting = ((axis_height / max_label_height).floor() as usize).saturating_add(1);
    let count = count
        .map_or(fitting, |requested| requested.min(fitting))
        .min(MAX_ITEM_COUNT as usize);
    if count == 0 {
        return Vec::new();
    }
    if count == 1 || range.length() <= 0.0 {
        return vec![range.min_y];
    }

    let step = range.length() / (count - 1) as f64;
    (0..count)
        .map(|i| {
            if i == count - 1 {
                range.max_y
            } else {
                range.min_y + i as f64 * step
            }
        })
        .collect()
}

/// Multiples of the (possibly enlarged) step inside the range, anchored at zero.
///
/// The step is multiplied by the smallest integer that keeps neighbouring
/// labels at least `max_label_height` apart.
fn step_values(
    range: YRange,
    axis_height: f64,
    max_label_height: f64,
    step: Option<f64>,
) -> Vec<f64> {
    let length = range.length();
    if length <= 0.0 {
        return vec![range.min_y];
    }

    let fitting = (axis_height / max_label_height).floor().max(1.0);
    let base = step.unwrap_or_else(|| nice_step(length / fitting));
    let min_delta = max_label_height * length / axis_height;
    let multiplier = (min_delta / base - GRID_EPSILON).ceil().max(1.0);
    let delta = base * multiplier;

    grid_indices(0.0, delta, range.min_y, range.max_y)
        .map(|(first, last)| grid_values(0.0, delta, first, last))
        .unwrap_or_default()
}

/// Smallest 1, 2 or 5 × 10ⁿ that is >= `raw`.
fn nice_step(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .map(|factor| factor * magnitude)
        .find(|candidate| *candidate >= raw * (1.0 - GRID_EPSILON))
        .unwrap_or(10.0 * magnitude)
}

impl VerticalAxisItemPlacer for DefaultVerticalAxisItemPlacer {
    fn shift_top_lines(&self, _context: &MeasureContext) -> bool {
        self.shift_top_lines
    }

    fn label_values(
        &self,
        context: &MeasureContext,
        axis_height: f64,
        max_label_height: f64,
        position: VerticalAxisPosition,
    ) -> Vec<f64> {
        let range = context.chart_values().y_range(Some(position));
        self.values_for(range, axis_height, max_label_height)
    }

    fn width_measurement_label_values(
        &self,
        context: &MeasureContext,
        axis_height: f64,
        max_label_height: f64,
        position: VerticalAxisPosition,
    ) -> Vec<f64> {
        self.label_values(context, axis_height, max_label_height, position)
    }

    fn height_measurement_label_values(
        &self,
        context: &MeasureContext,
        position: VerticalAxisPosition,
    ) -> Vec<f64> {
        let range = context.chart_values().y_range(Some(position));
        let mut samples = vec![
            range.min_y,
            range.min_y + 0.5 * range.length(),
            range.max_y,
        ];
        samples.dedup();
        samples
    }

    fn top_axis_inset(
        &self,
        _context: &MeasureContext,
        label_position: VerticalLabelPosition,
        max_label_height: f64,
        max_line_thickness: f64,
    ) -> f64 {
        let label = positive_extent(max_label_height).unwrap_or(0.0);
        let line = positive_extent(max_line_thickness).unwrap_or(0.0);
        let shift = self.top_line_shift(line);
        match label_position {
            VerticalLabelPosition::Top => label + 0.5 * line + shift,
            VerticalLabelPosition::Center => 0.5 * label.max(line) + shift,
            VerticalLabelPosition::Bottom => 0.5 * line + shift,
        }
    }

    fn bottom_axis_inset(
        &self,
        _context: &MeasureContext,
        label_position: VerticalLabelPosition,
        max_label_height: f64,
        max_line_thickness: f64,
    ) -> f64 {
        let label = positive_extent(max_label_height).unwrap_or(0.0);
        let line = positive_extent(max_line_thickness).unwrap_or(0.0);
        match label_position {
            VerticalLabelPosition::Top => 0.5 * line,
            VerticalLabelPosition::Center => 0.5 * label.max(line),
            VerticalLabelPosition::Bottom => label + 0.5 * line,
        }
    }
}
