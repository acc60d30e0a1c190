use tracing::{debug, trace};

use crate::core::{Bounds, HorizontalDimensions, HorizontalLayout, MeasureContext};
use crate::render::Renderer;

use super::{ChartEngine, HorizontalAxisMeasure, VerticalAxisMeasure, engine::FrameLayout};

/// Space reserved around the chart, in physical (left/right) terms.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Reserve {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

fn width_of(measured: Option<VerticalAxisMeasure>) -> f64 {
    measured.map_or(0.0, |axis| axis.width)
}

fn height_of(measured: Option<HorizontalAxisMeasure>) -> f64 {
    measured.map_or(0.0, |axis| axis.height)
}

impl<R: Renderer> ChartEngine<R> {
    /// Lays the chart out inside `bounds`.
    ///
    /// Degenerate bounds, or bounds too small to leave any chart area after
    /// the axes, clear the layout; the next draw then records an empty frame.
    pub fn measure(&mut self, bounds: Bounds) {
        self.canvas_bounds = bounds;
        self.layout = self.compute_layout(bounds);
        let Some(layout) = self.layout.as_ref() else {
            debug!(?bounds, "chart bounds leave no drawable area");
            return;
        };

        let values = layout.measure.chart_values();
        let chart_width = layout.chart_bounds.width();
        if matches!(self.config.horizontal_layout, HorizontalLayout::FullWidth { .. }) {
            self.zoom
                .ensure_min_zoom(layout.dimensions.fit_zoom(chart_width, values));
        }
        let zoomed = layout.dimensions.scaled(self.zoom.value());
        self.scroll
            .update_max_value(layout.measure.max_scroll_distance(chart_width, zoomed));
        if self.scroll.note_entry_count(self.model.entry_count()) {
            let initial = self.scroll.initial_scroll().scroll();
            self.scroll
                .scroll(initial, &layout.measure, zoomed, layout.chart_bounds);
        }
        debug!(
            chart_bounds = ?layout.chart_bounds,
            x_spacing = zoomed.x_spacing,
            scroll = self.scroll.value(),
            max_scroll = self.scroll.max_value(),
            zoom = self.zoom.value(),
            "measured chart"
        );
    }

    fn compute_layout(&self, bounds: Bounds) -> Option<FrameLayout> {
        if !bounds.is_valid() {
            return None;
        }
        let measure = MeasureContext::new(
            bounds,
            self.values.clone(),
            self.config.horizontal_layout,
        )
        .with_layout_direction(self.config.layout_direction)
        .with_text_measurer(self.text_measurer.clone());
        let axes = &self.axes;
        let is_ltr = measure.is_ltr();
        let layout = self.config.horizontal_layout;

        // First pass: vertical axes against the full height, to size the
        // horizontal space; horizontal axes then size the vertical space.
        let measure_vertical = |height: f64| {
            (
                axes.start.as_ref().map(|axis| axis.measure(&measure, height)),
                axes.end.as_ref().map(|axis| axis.measure(&measure, height)),
            )
        };
        let (start, end) = measure_vertical(bounds.height());
        let first_width = (bounds.width() - width_of(start) - width_of(end)).max(0.0);
        let first_dims = layout
            .dimensions(measure.chart_values(), first_width)
            .scaled(self.zoom.value());
        let measure_horizontal = |dimensions: HorizontalDimensions| {
            (
                axes.top.as_ref().map(|axis| axis.measure(&measure, dimensions)),
                axes.bottom.as_ref().map(|axis| axis.measure(&measure, dimensions)),
            )
        };
        let (top, bottom) = measure_horizontal(first_dims);

        let vertical_insets = [start, end].into_iter().flatten();
        let (top_inset, bottom_inset) = vertical_insets.fold((0.0_f64, 0.0_f64), |acc, axis| {
            (acc.0.max(axis.top_inset), acc.1.max(axis.bottom_inset))
        });
        let top_reserve = height_of(top).max(top_inset);
        let bottom_reserve = height_of(bottom).max(bottom_inset);
        let chart_height = bounds.height() - top_reserve - bottom_reserve;
        if chart_height <= 0.0 {
            return None;
        }

        // Second pass: vertical axes against the real chart height.
        let (start, end) = measure_vertical(chart_height);
        let (start_inset, end_inset) = [top, bottom].into_iter().flatten().fold(
            (0.0_f64, 0.0_f64),
            |acc, axis| (acc.0.max(axis.start_inset), acc.1.max(axis.end_inset)),
        );
        let start_reserve = width_of(start).max(start_inset);
        let end_reserve = width_of(end).max(end_inset);
        let reserve = if is_ltr {
            Reserve {
                left: start_reserve,
                top: top_reserve,
                right: end_reserve,
                bottom: bottom_reserve,
            }
        } else {
            Reserve {
                left: end_reserve,
                top: top_reserve,
                right: start_reserve,
                bottom: bottom_reserve,
            }
        };
        trace!(?reserve, "resolved axis reserves");
        let chart_bounds = bounds.inset(reserve.left, reserve.top, reserve.right, reserve.bottom);
        if !chart_bounds.is_valid() {
            return None;
        }

        let chart_width = chart_bounds.width();
        let (top, bottom) = measure_horizontal(
            layout
                .dimensions(measure.chart_values(), chart_width)
                .scaled(self.zoom.value()),
        );
        let (start_label_reserve, end_label_reserve) = [top, bottom]
            .into_iter()
            .flatten()
            .fold((0.0_f64, 0.0_f64), |acc, axis| {
                (
                    acc.0.max(axis.start_label_reserve),
                    acc.1.max(axis.end_label_reserve),
                )
            });
        let dimensions = layout.dimensions_reserving(
            measure.chart_values(),
            chart_width,
            start_label_reserve,
            end_label_reserve,
        );

        Some(FrameLayout {
            measure,
            chart_bounds,
            dimensions,
            start,
            end,
            top,
            bottom,
        })
    }
}
