use std::sync::Arc;

use tracing::debug;

use crate::core::{CartesianChartModel, ChartValues, EstimatedTextMeasurer, VerticalAxisPosition};
use crate::error::ChartResult;
use crate::extensions::DefaultMarker;
use crate::interaction::{MarkerTracker, ScrollState, ZoomState};
use crate::render::Renderer;

use super::{
    AxesConfig, ChartEngine, ChartEngineConfig, HorizontalAxis, HorizontalAxisConfig,
    HorizontalAxisPosition, VerticalAxis, VerticalAxisConfig, engine::ChartAxes,
};

impl ChartAxes {
    pub(super) fn from_config(config: &AxesConfig) -> ChartResult<Self> {
        let vertical = |position: VerticalAxisPosition, axis: &Option<VerticalAxisConfig>| {
            axis.as_ref()
                .map(|axis| VerticalAxis::from_config(position, axis))
                .transpose()
        };
        let horizontal = |position: HorizontalAxisPosition, axis: &Option<HorizontalAxisConfig>| {
            axis.as_ref()
                .map(|axis| HorizontalAxis::from_config(position, axis))
                .transpose()
        };
        Ok(Self {
            start: vertical(VerticalAxisPosition::Start, &config.start)?,
            end: vertical(VerticalAxisPosition::End, &config.end)?,
            top: horizontal(HorizontalAxisPosition::Top, &config.top)?,
            bottom: horizontal(HorizontalAxisPosition::Bottom, &config.bottom)?,
        })
    }
}

impl<R: Renderer> ChartEngine<R> {
    /// Creates an engine measured against `config.bounds`, with an empty model
    /// and the default marker.
    pub fn new(renderer: R, config: ChartEngineConfig) -> ChartResult<Self> {
        config.validate()?;
        let axes = ChartAxes::from_config(&config.axes)?;
        let zoom = ZoomState::new(config.min_zoom, config.max_zoom)?;
        let scroll = ScrollState::new(config.initial_scroll, config.auto_scroll_condition);
        debug!(
            bounds = ?config.bounds,
            layout = ?config.horizontal_layout,
            direction = ?config.layout_direction,
            "creating chart engine"
        );

        let mut engine = Self {
            renderer,
            canvas_bounds: config.bounds,
            config,
            model: CartesianChartModel::default(),
            values: ChartValues::neutral(),
            layers: Vec::new(),
            decorations: Vec::new(),
            marker: Some(Box::new(DefaultMarker::default())),
            marker_listener: None,
            text_measurer: Arc::new(EstimatedTextMeasurer::default()),
            axes,
            scroll,
            zoom,
            marker_tracker: MarkerTracker::new(),
            layout: None,
        };
        engine.measure(engine.canvas_bounds);
        Ok(engine)
    }
}
