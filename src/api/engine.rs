use std::sync::Arc;

use tracing::{debug, trace};

use crate::core::{
    Bounds, CartesianChartModel, ChartValues, HorizontalDimensions, MeasureContext, Point,
    TextMeasurer,
};
use crate::error::ChartResult;
use crate::extensions::{Decoration, Marker};
use crate::interaction::{
    MarkerEvent, MarkerTracker, MarkerVisibilityChangeListener, ScrollState, ZoomState,
};
use crate::render::{RenderFrame, Renderer};

use super::{
    ChartEngineConfig, HorizontalAxis, HorizontalAxisMeasure, VerticalAxis, VerticalAxisMeasure,
    layers::CartesianLayer,
};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

/// Axes built from [`super::AxesConfig`]; absent axes take no space.
#[derive(Debug, Default)]
pub(super) struct ChartAxes {
    pub(super) start: Option<VerticalAxis>,
    pub(super) end: Option<VerticalAxis>,
    pub(super) top: Option<HorizontalAxis>,
    pub(super) bottom: Option<HorizontalAxis>,
}

/// Result of the last successful measure pass.
#[derive(Debug, Clone)]
pub(super) struct FrameLayout {
    pub(super) measure: MeasureContext,
    pub(super) chart_bounds: Bounds,
    /// Unzoomed; draw contexts apply the current zoom.
    pub(super) dimensions: HorizontalDimensions,
    pub(super) start: Option<VerticalAxisMeasure>,
    pub(super) end: Option<VerticalAxisMeasure>,
    pub(super) top: Option<HorizontalAxisMeasure>,
    pub(super) bottom: Option<HorizontalAxisMeasure>,
}

/// Host-facing adapter around the layout engine.
///
/// Hosts call [`Self::measure`] when their bounds change and [`Self::draw`]
/// on every repaint. Scroll, zoom and marker state live here between frames;
/// everything else is recomputed from the model for each frame.
pub struct ChartEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: ChartEngineConfig,
    pub(super) model: CartesianChartModel,
    pub(super) values: ChartValues,
    pub(super) layers: Vec<Box<dyn CartesianLayer>>,
    pub(super) decorations: Vec<Box<dyn Decoration>>,
    pub(super) marker: Option<Box<dyn Marker>>,
    pub(super) marker_listener: Option<Box<dyn MarkerVisibilityChangeListener>>,
    pub(super) text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
    pub(super) axes: ChartAxes,
    pub(super) canvas_bounds: Bounds,
    pub(super) scroll: ScrollState,
    pub(super) zoom: ZoomState,
    pub(super) marker_tracker: MarkerTracker,
    pub(super) layout: Option<FrameLayout>,
}

impl<R: Renderer> ChartEngine<R> {
    /// Replaces the model and re-measures against the current bounds.
    pub fn set_model(&mut self, model: CartesianChartModel) {
        self.values = ChartValues::from_model(&model);
        debug!(
            layers = model.layers().len(),
            entries = model.entry_count(),
            min_x = self.values.min_x(),
            max_x = self.values.max_x(),
            "chart model updated"
        );
        self.model = model;
        self.measure(self.canvas_bounds);
    }

    /// Draws one frame and returns the marker transition it caused.
    ///
    /// Without a drawable area nothing reaches the renderer.
    pub fn draw(&mut self, touch_point: Option<Point>) -> ChartResult<Option<MarkerEvent>> {
        let (frame, event) = self.compose_frame(touch_point);
        if self.layout.is_none() {
            trace!("skipping render without layout");
            return Ok(event);
        }
        self.renderer.render(&frame)?;
        Ok(event)
    }

    /// Records one frame without handing it to the renderer.
    ///
    /// Marker state still advances, exactly as in [`Self::draw`].
    pub fn build_render_frame(&mut self, touch_point: Option<Point>) -> RenderFrame {
        self.compose_frame(touch_point).0
    }

    /// Renders the frame into an external cairo context.
    #[cfg(feature = "cairo-backend")]
    pub fn draw_on_cairo_context(
        &mut self,
        context: &cairo::Context,
        touch_point: Option<Point>,
    ) -> ChartResult<Option<MarkerEvent>>
    where
        R: CairoContextRenderer,
    {
        let (frame, event) = self.compose_frame(touch_point);
        if self.layout.is_none() {
            return Ok(event);
        }
        self.renderer.render_on_cairo_context(context, &frame)?;
        Ok(event)
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
