pub mod dimensions;
pub mod format;
pub mod measure;
pub mod model;
pub mod placement;
pub mod scroll;
pub mod types;
pub mod values;

pub use dimensions::{HorizontalDimensions, HorizontalLayout};
pub use format::ValueFormatter;
pub use measure::{EstimatedTextMeasurer, MeasureContext, TextMeasurer, TextSize};
pub use model::{AxisValueOverride, CartesianChartModel, CartesianLayerModel};
pub use placement::{
    DefaultHorizontalAxisItemPlacer, DefaultVerticalAxisItemPlacer, HorizontalAxisItemPlacer,
    HorizontalPlacerConfig, VerticalAxisItemPlacer, VerticalLabelPosition, VerticalPlacerConfig,
    VerticalPlacerMode,
};
pub use scroll::{AbsoluteScroll, RelativeScroll, Scroll};
pub use types::{Bounds, ChartEntry, LayoutDirection, Point, VerticalAxisPosition};
pub use values::{ChartValues, YRange};
