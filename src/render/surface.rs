use serde::{Deserialize, Serialize};

use crate::core::Bounds;
use crate::render::{LinePrimitive, PathPrimitive, RectPrimitive, RenderFrame, TextPrimitive};

/// How an off-screen layer is combined with the surface below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BlendMode {
    #[default]
    SourceOver,
    /// Uses the layer as a mask: keeps only destination pixels the layer covers.
    DestinationIn,
    /// Erases destination pixels the layer covers.
    DestinationOut,
    Multiply,
}

/// Primitive drawing operations the layout engine issues.
///
/// Rasterization is the implementor's business; the engine only guarantees
/// that every `save` is matched by a `restore` within one draw pass.
pub trait DrawingSurface {
    fn draw_line(&mut self, line: LinePrimitive);
    fn draw_rect(&mut self, rect: RectPrimitive);
    fn draw_path(&mut self, path: PathPrimitive);
    fn draw_text(&mut self, text: TextPrimitive);
    fn save(&mut self);
    fn clip_rect(&mut self, bounds: Bounds);
    fn restore(&mut self);
    /// Draws a finished off-screen layer onto this surface.
    fn composite(&mut self, layer: RenderFrame, blend: BlendMode);
}
