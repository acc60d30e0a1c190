use std::sync::Arc;

use tracing::debug;

use crate::core::{Bounds, CartesianChartModel, ChartValues, Scroll, TextMeasurer};
use crate::extensions::{Decoration, Marker};
use crate::interaction::{MarkerTracker, MarkerVisibilityChangeListener};
use crate::render::Renderer;

use super::{ChartEngine, ChartEngineConfig, layers::CartesianLayer};

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn config(&self) -> &ChartEngineConfig {
        &self.config
    }

    #[must_use]
    pub fn model(&self) -> &CartesianChartModel {
        &self.model
    }

    #[must_use]
    pub fn chart_values(&self) -> &ChartValues {
        &self.values
    }

    /// Chart area of the last successful measure pass.
    #[must_use]
    pub fn chart_bounds(&self) -> Option<Bounds> {
        self.layout.as_ref().map(|layout| layout.chart_bounds)
    }

    #[must_use]
    pub fn scroll_value(&self) -> f64 {
        self.scroll.value()
    }

    #[must_use]
    pub fn max_scroll_value(&self) -> f64 {
        self.scroll.max_value()
    }

    #[must_use]
    pub fn zoom_value(&self) -> f64 {
        self.zoom.value()
    }

    #[must_use]
    pub fn marker_tracker(&self) -> &MarkerTracker {
        &self.marker_tracker
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Layers are matched to model layers by index.
    pub fn add_layer(&mut self, layer: impl CartesianLayer + 'static) {
        self.layers.push(Box::new(layer));
    }

    pub fn add_decoration(&mut self, decoration: impl Decoration + 'static) {
        self.decorations.push(Box::new(decoration));
    }

    /// `None` hides the marker; marker events are still tracked.
    pub fn set_marker(&mut self, marker: Option<Box<dyn Marker>>) {
        self.marker = marker;
    }

    pub fn set_marker_listener(
        &mut self,
        listener: Option<Box<dyn MarkerVisibilityChangeListener>>,
    ) {
        self.marker_listener = listener;
    }

    /// Swaps the text measurer and re-measures, since label sizes change.
    pub fn set_text_measurer(&mut self, text_measurer: Arc<dyn TextMeasurer + Send + Sync>) {
        self.text_measurer = text_measurer;
        self.measure(self.canvas_bounds);
    }

    /// Applies `scroll` and returns the delta actually consumed.
    ///
    /// Returns `0.0` while there is no layout to scroll.
    pub fn scroll(&mut self, scroll: Scroll) -> f64 {
        let Some(layout) = self.layout.as_ref() else {
            return 0.0;
        };
        let dimensions = layout.dimensions.scaled(self.zoom.value());
        self.scroll
            .scroll(scroll, &layout.measure, dimensions, layout.chart_bounds)
    }

    /// Multiplies the zoom by `factor`, keeping the content under the
    /// chart-local pixel `focal_x` in place.
    pub fn zoom_by(&mut self, factor: f64, focal_x: f64) {
        let Some(layout) = self.layout.as_ref() else {
            return;
        };
        let chart = layout.chart_bounds;
        let direction = layout.measure.layout_direction_multiplier();
        let forward_focal = if layout.measure.is_ltr() {
            focal_x - chart.left
        } else {
            chart.right - focal_x
        };
        let forward_scroll = direction * self.scroll.value();
        let delta = self.zoom.zoom_by(
            factor,
            forward_focal,
            forward_scroll,
            layout.dimensions.unscalable_start_padding,
        );

        let dimensions = layout.dimensions.scaled(self.zoom.value());
        self.scroll
            .update_max_value(layout.measure.max_scroll_distance(chart.width(), dimensions));
        self.scroll.scroll(
            Scroll::by_pixels(direction * delta),
            &layout.measure,
            dimensions,
            chart,
        );
        debug!(
            zoom = self.zoom.value(),
            scroll = self.scroll.value(),
            "zoom applied"
        );
    }
}
