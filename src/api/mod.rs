//! Host-facing layer: axes, data layers and the engine that ties a model,
//! its layout and the cross-frame interaction state together.

mod axis_config;
mod axis_horizontal;
mod axis_vertical;
mod engine;
mod engine_accessors;
mod engine_config;
mod engine_frame;
mod engine_init;
mod engine_layout;
pub mod layers;

pub use axis_config::{
    AxesConfig, AxisStyle, HorizontalAxisConfig, HorizontalAxisPosition, HorizontalLabelPosition,
    VerticalAxisConfig,
};
pub use axis_horizontal::{HorizontalAxis, HorizontalAxisMeasure};
pub use axis_vertical::{VerticalAxis, VerticalAxisMeasure};
pub use engine::ChartEngine;
pub use engine_config::ChartEngineConfig;
pub use layers::{CartesianLayer, ColumnLayer, LineLayer};
