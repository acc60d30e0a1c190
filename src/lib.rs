//! cartesian-rs: layout engine for Cartesian charts.
//!
//! The crate turns a chart model into value ranges, horizontal pixel
//! dimensions, axis labels and ticks, scroll offsets and marker hits, and
//! records the result as backend-agnostic drawing commands.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig};
pub use error::{ChartError, ChartResult};
