use crate::core::Bounds;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    BlendMode, DrawingSurface, LinePrimitive, PathPrimitive, RectPrimitive, TextPrimitive,
};

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line(LinePrimitive),
    Rect(RectPrimitive),
    Path(PathPrimitive),
    Text(TextPrimitive),
    Save,
    ClipRect(Bounds),
    Restore,
    Composite { layer: RenderFrame, blend: BlendMode },
}

/// Backend-agnostic recording of one chart draw pass.
///
/// `RenderFrame` is itself a [`DrawingSurface`]: the engine draws into it and
/// a [`Renderer`](crate::render::Renderer) replays the commands in order.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub bounds: Bounds,
    pub commands: Vec<DrawCommand>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            commands: Vec::new(),
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &LinePrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Line(line) => Some(line),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectPrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Rect(rect) => Some(rect),
            _ => None,
        })
    }

    pub fn paths(&self) -> impl Iterator<Item = &PathPrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Path(path) => Some(path),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text(text) => Some(text),
            _ => None,
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.bounds.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.bounds.width(),
                height: self.bounds.height(),
            });
        }

        let mut depth = 0usize;
        for command in &self.commands {
            match command {
                DrawCommand::Line(line) => line.validate()?,
                DrawCommand::Rect(rect) => rect.validate()?,
                DrawCommand::Path(path) => path.validate()?,
                DrawCommand::Text(text) => text.validate()?,
                DrawCommand::Save => depth += 1,
                DrawCommand::Restore => {
                    depth = depth.checked_sub(1).ok_or_else(|| {
                        ChartError::InvalidData("restore without matching save".to_owned())
                    })?;
                }
                DrawCommand::ClipRect(_) => {}
                DrawCommand::Composite { layer, .. } => layer.validate()?,
            }
        }
        if depth != 0 {
            return Err(ChartError::InvalidData(format!(
                "{depth} save(s) without matching restore"
            )));
        }
        Ok(())
    }
}

impl DrawingSurface for RenderFrame {
    fn draw_line(&mut self, line: LinePrimitive) {
        self.commands.push(DrawCommand::Line(line));
    }

    fn draw_rect(&mut self, rect: RectPrimitive) {
        self.commands.push(DrawCommand::Rect(rect));
    }

    fn draw_path(&mut self, path: PathPrimitive) {
        self.commands.push(DrawCommand::Path(path));
    }

    fn draw_text(&mut self, text: TextPrimitive) {
        self.commands.push(DrawCommand::Text(text));
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn clip_rect(&mut self, bounds: Bounds) {
        self.commands.push(DrawCommand::ClipRect(bounds));
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn composite(&mut self, layer: RenderFrame, blend: BlendMode) {
        self.commands.push(DrawCommand::Composite { layer, blend });
    }
}

#[cfg(test)]
mod tests {
    use super::RenderFrame;
    use crate::core::Bounds;
    use crate::render::{Color, DrawingSurface, LinePrimitive};

    #[test]
    fn unbalanced_save_is_rejected() {
        let mut frame = RenderFrame::new(Bounds::from_size(10.0, 10.0));
        frame.save();
        assert!(frame.validate().is_err());
        frame.restore();
        assert!(frame.validate().is_ok());
    }

    #[test]
    fn recorded_lines_are_listed_in_order() {
        let mut frame = RenderFrame::new(Bounds::from_size(10.0, 10.0));
        frame.draw_line(LinePrimitive::horizontal(1.0, 0.0, 10.0, 1.0, Color::BLACK));
        frame.draw_line(LinePrimitive::horizontal(2.0, 0.0, 10.0, 1.0, Color::BLACK));
        let ys: Vec<f64> = frame.lines().map(|line| line.y1).collect();
        assert_eq!(ys, vec![1.0, 2.0]);
    }
}
