use std::ops::RangeInclusive;

use crate::core::{HorizontalDimensions, HorizontalLayout, MeasureContext};
use crate::error::{ChartError, ChartResult};

use super::{HorizontalAxisItemPlacer, grid_indices, grid_values, positive_extent};

/// Standard horizontal placer.
///
/// Items are placed every `spacing` x steps, starting `offset` steps after
/// `min_x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultHorizontalAxisItemPlacer {
    spacing: usize,
    offset: usize,
    shift_extreme_ticks: bool,
    add_extreme_label_padding: bool,
}

impl Default for DefaultHorizontalAxisItemPlacer {
    fn default() -> Self {
        Self {
            spacing: 1,
            offset: 0,
            shift_extreme_ticks: true,
            add_extreme_label_padding: false,
        }
    }
}

impl DefaultHorizontalAxisItemPlacer {
    pub fn new(
        spacing: usize,
        offset: usize,
        shift_extreme_ticks: bool,
        add_extreme_label_padding: bool,
    ) -> ChartResult<Self> {
        if spacing == 0 {
            return Err(ChartError::InvalidConfig(
                "horizontal placer spacing must be >= 1".to_owned(),
            ));
        }
        Ok(Self {
            spacing,
            offset,
            shift_extreme_ticks,
            add_extreme_label_padding,
        })
    }

    #[must_use]
    pub fn spacing(self) -> usize {
        self.spacing
    }

    #[must_use]
    pub fn offset(self) -> usize {
        self.offset
    }

    /// First x value that may carry a label.
    fn origin(self, context: &MeasureContext) -> f64 {
        let values = context.chart_values();
        values.min_x() + self.offset as f64 * values.x_step()
    }

    fn label_step(self, context: &MeasureContext) -> f64 {
        context.chart_values().x_step() * self.spacing as f64
    }

    fn label_grid(self, context: &MeasureContext, lower: f64, upper: f64) -> Vec<f64> {
        let origin = self.origin(context);
        let step = self.label_step(context);
        grid_indices(origin, step, lower, upper)
            .map(|(first, last)| grid_values(origin, step, first.max(0), last))
            .unwrap_or_default()
    }

    /// First, middle and last label of the full grid.
    fn sample_values(self, context: &MeasureContext) -> Vec<f64> {
        let values = context.chart_values();
        let origin = self.origin(context);
        let step = self.label_step(context);
        let Some((first, last)) = grid_indices(origin, step, values.min_x(), values.max_x())
        else {
            return Vec::new();
        };
        let first = first.max(0);
        if last < first {
            return Vec::new();
        }
        let middle = first + (last - first + 1) / 2;
        let mut samples: Vec<f64> = [first, middle, last]
            .into_iter()
            .map(|i| origin + i as f64 * step)
            .collect();
        samples.dedup();
        samples
    }

    fn tick_space(self, tick_thickness: f64) -> f64 {
        let thickness = positive_extent(tick_thickness).unwrap_or(0.0);
        if self.shift_extreme_ticks {
            thickness
        } else {
            0.5 * thickness
        }
    }
}

impl HorizontalAxisItemPlacer for DefaultHorizontalAxisItemPlacer {
    fn shift_extreme_ticks(&self, _context: &MeasureContext) -> bool {
        self.shift_extreme_ticks
    }

    fn first_label_value(&self, context: &MeasureContext, _max_label_width: f64) -> Option<f64> {
        if !self.add_extreme_label_padding {
            return None;
        }
        self.sample_values(context).first().copied()
    }

    fn last_label_value(&self, context: &MeasureContext, _max_label_width: f64) -> Option<f64> {
        if !self.add_extreme_label_padding {
            return None;
        }
        self.sample_values(context).last().copied()
    }

    fn label_values(
        &self,
        context: &MeasureContext,
        visible: &RangeInclusive<f64>,
        full: &RangeInclusive<f64>,
        max_label_width: f64,
    ) -> Vec<f64> {
        if positive_extent(max_label_width).is_none() {
            return Vec::new();
        }
        let values = context.chart_values();
        let step = self.label_step(context);
        let lower = (visible.start() - step).max(*full.start()).max(values.min_x());
        let upper = (visible.end() + step).min(*full.end()).min(values.max_x());
        self.label_grid(context, lower, upper)
    }

    fn width_measurement_label_values(
        &self,
        context: &MeasureContext,
        _dimensions: HorizontalDimensions,
        _full: &RangeInclusive<f64>,
    ) -> Vec<f64> {
        self.sample_values(context)
    }

    fn height_measurement_label_values(
        &self,
        context: &MeasureContext,
        _dimensions: HorizontalDimensions,
        _full: &RangeInclusive<f64>,
        _max_label_width: f64,
    ) -> Vec<f64> {
        self.sample_values(context)
    }

    fn line_values(
        &self,
        context: &MeasureContext,
        visible: &RangeInclusive<f64>,
        full: &RangeInclusive<f64>,
        _max_label_width: f64,
    ) -> Option<Vec<f64>> {
        match context.horizontal_layout() {
            HorizontalLayout::Segmented { .. } => {
                let values = context.chart_values();
                let step = values.x_step();
                let lower = (visible.start() - step).max(*full.start()).max(values.min_x());
                let upper = (visible.end() + step).min(*full.end()).min(values.max_x());
                let origin = values.min_x();
                let lines = grid_indices(origin, step, lower, upper)
                    .map(|(first, last)| grid_values(origin, step, first.max(0), last))
                    .unwrap_or_default();
                Some(lines)
            }
            HorizontalLayout::FullWidth { .. } => None,
        }
    }

    fn start_axis_inset(
        &self,
        context: &MeasureContext,
        dimensions: HorizontalDimensions,
        tick_thickness: f64,
        _max_label_width: f64,
    ) -> f64 {
        let tick_space = self.tick_space(tick_thickness);
        match context.horizontal_layout() {
            HorizontalLayout::Segmented { .. } => tick_space,
            HorizontalLayout::FullWidth { .. } => {
                (tick_space - dimensions.unscalable_start_padding).max(0.0)
            }
        }
    }

    fn end_axis_inset(
        &self,
        context: &MeasureContext,
        dimensions: HorizontalDimensions,
        tick_thickness: f64,
        _max_label_width: f64,
    ) -> f64 {
        let tick_space = self.tick_space(tick_thickness);
        match context.horizontal_layout() {
            HorizontalLayout::Segmented { .. } => tick_space,
            HorizontalLayout::FullWidth { .. } => {
                (tick_space - dimensions.unscalable_end_padding).max(0.0)
            }
        }
    }
}
