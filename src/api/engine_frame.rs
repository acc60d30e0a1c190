use tracing::trace;

use crate::core::{Bounds, Point};
use crate::extensions::EntryLocationMap;
use crate::interaction::{MarkerEvent, MarkerVisibility, MarkerVisibilityChangeListener};
use crate::render::{ChartDrawContext, RenderFrame, Renderer};

use super::{ChartEngine, engine::FrameLayout};

/// Strips next to the chart that each axis draws into.
#[derive(Debug, Clone, Copy)]
struct AxisStrips {
    start: Bounds,
    end: Bounds,
    top: Bounds,
    bottom: Bounds,
}

impl AxisStrips {
    fn resolve(layout: &FrameLayout) -> Self {
        let chart = layout.chart_bounds;
        let is_ltr = layout.measure.is_ltr();
        let width = |axis: Option<super::VerticalAxisMeasure>| axis.map_or(0.0, |axis| axis.width);
        let left_strip = |width: f64| Bounds::new(chart.left - width, chart.top, chart.left, chart.bottom);
        let right_strip =
            |width: f64| Bounds::new(chart.right, chart.top, chart.right + width, chart.bottom);
        let (start, end) = if is_ltr {
            (left_strip(width(layout.start)), right_strip(width(layout.end)))
        } else {
            (right_strip(width(layout.start)), left_strip(width(layout.end)))
        };

        // Horizontal strips overhang the chart by the tick insets so shifted
        // extreme ticks are not clipped.
        let horizontal = |axis: Option<super::HorizontalAxisMeasure>, top: f64, bottom: f64| {
            let (start_inset, end_inset) = axis.map_or((0.0, 0.0), |axis| (axis.start_inset, axis.end_inset));
            let (left, right) = if is_ltr {
                (start_inset, end_inset)
            } else {
                (end_inset, start_inset)
            };
            Bounds::new(chart.left - left, top, chart.right + right, bottom)
        };
        let top_height = layout.top.map_or(0.0, |axis| axis.height);
        let bottom_height = layout.bottom.map_or(0.0, |axis| axis.height);
        Self {
            start,
            end,
            top: horizontal(layout.top, chart.top - top_height, chart.top),
            bottom: horizontal(layout.bottom, chart.bottom, chart.bottom + bottom_height),
        }
    }
}

impl<R: Renderer> ChartEngine<R> {
    /// Records one frame and advances the marker state.
    pub(super) fn compose_frame(
        &mut self,
        touch_point: Option<Point>,
    ) -> (RenderFrame, Option<MarkerEvent>) {
        let Some(layout) = self.layout.as_ref() else {
            trace!("no layout, recording empty frame");
            let listener = self
                .marker_listener
                .as_deref_mut()
                .map(|listener| listener as &mut dyn MarkerVisibilityChangeListener);
            let event = self.marker_tracker.update(None, listener);
            return (RenderFrame::new(self.canvas_bounds), event);
        };
        let mut frame = RenderFrame::new(layout.measure.canvas_bounds());
        let strips = AxisStrips::resolve(layout);
        let axes = &self.axes;
        let mut locations = EntryLocationMap::new();

        let mut context = ChartDrawContext::new(
            &mut frame,
            &layout.measure,
            layout.chart_bounds,
            layout.dimensions,
        )
        .with_scroll(self.scroll.value())
        .with_zoom(self.zoom.value())
        .with_marker_touch_point(touch_point);

        for decoration in &self.decorations {
            decoration.draw_behind_layers(&mut context);
        }
        if let (Some(axis), Some(measured)) = (&axes.start, &layout.start) {
            axis.draw_behind_layers(&mut context, measured);
        }
        if let (Some(axis), Some(measured)) = (&axes.end, &layout.end) {
            axis.draw_behind_layers(&mut context, measured);
        }
        if let (Some(axis), Some(measured)) = (&axes.top, &layout.top) {
            axis.draw_behind_layers(&mut context, measured);
        }
        if let (Some(axis), Some(measured)) = (&axes.bottom, &layout.bottom) {
            axis.draw_behind_layers(&mut context, measured);
        }

        context.surface().save();
        context.surface().clip_rect(layout.chart_bounds);
        for (index, (layer, model)) in self.layers.iter().zip(self.model.layers()).enumerate() {
            layer.draw(&mut context, model, index, &mut locations);
        }
        context.surface().restore();

        for decoration in &self.decorations {
            decoration.draw_above_layers(&mut context);
        }
        if let (Some(axis), Some(measured)) = (&axes.start, &layout.start) {
            axis.draw_above_layers(&mut context, strips.start, measured);
        }
        if let (Some(axis), Some(measured)) = (&axes.end, &layout.end) {
            axis.draw_above_layers(&mut context, strips.end, measured);
        }
        if let (Some(axis), Some(measured)) = (&axes.top, &layout.top) {
            axis.draw_above_layers(&mut context, strips.top, measured);
        }
        if let (Some(axis), Some(measured)) = (&axes.bottom, &layout.bottom) {
            axis.draw_above_layers(&mut context, strips.bottom, measured);
        }

        let marked = touch_point.and_then(|touch| locations.closest_entries(touch));
        let listener = self
            .marker_listener
            .as_deref_mut()
            .map(|listener| listener as &mut dyn MarkerVisibilityChangeListener);
        let event = self.marker_tracker.update(marked, listener);
        if let (MarkerVisibility::Visible, Some(marker)) =
            (self.marker_tracker.visibility(), &self.marker)
        {
            marker.draw(&mut context, self.marker_tracker.entries());
        }
        drop(context);
        (frame, event)
    }
}
