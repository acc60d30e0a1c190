mod draw_context;
mod frame;
mod null_renderer;
mod primitives;
mod surface;

pub use draw_context::{ChartDrawContext, MIN_ZOOM};
pub use frame::{DrawCommand, RenderFrame};
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, LinePrimitive, PathPrimitive, RectPrimitive, TextHAlign, TextPrimitive, TextVAlign,
};
pub use surface::{BlendMode, DrawingSurface};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully recorded `RenderFrame`, so rasterization stays
/// isolated from layout, scroll and marker logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
