use crate::error::ChartResult;
use crate::render::{DrawCommand, RenderFrame, Renderer};

/// Renderer that validates frames without rasterizing them.
///
/// Used by tests and headless hosts; invalid geometry still surfaces as an
/// error before a real backend ever sees it.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_line_count: usize,
    pub last_text_count: usize,
    pub last_composite_count: usize,
    pub last_frame: Option<RenderFrame>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_line_count = frame.lines().count();
        self.last_text_count = frame.texts().count();
        self.last_composite_count = frame
            .commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Composite { .. }))
            .count();
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
