use cairo::{Context, Format, ImageSurface, Operator};
use pango::FontDescription;
use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::{ChartError, ChartResult};
use crate::render::{
    BlendMode, Color, DrawCommand, PathPrimitive, RectPrimitive, RenderFrame, Renderer,
    TextHAlign, TextPrimitive, TextVAlign,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub paths_drawn: usize,
    pub texts_drawn: usize,
    pub layers_composited: usize,
}

/// Renderers that can replay a frame onto a Cairo context owned by the host.
pub trait CairoContextRenderer {
    fn render_on_cairo_context(&mut self, context: &Context, frame: &RenderFrame)
    -> ChartResult<()>;
}

/// Cairo + Pango renderer replaying recorded draw commands.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidViewport {
                width: f64::from(width),
                height: f64::from(height),
            });
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::rgb(1.0, 1.0, 1.0),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn set_clear_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();
        replay(context, &frame.commands, &mut stats)?;
        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame)
    }
}

fn replay(
    context: &Context,
    commands: &[DrawCommand],
    stats: &mut CairoRenderStats,
) -> ChartResult<()> {
    for command in commands {
        match command {
            DrawCommand::Line(line) => {
                apply_color(context, line.color);
                context.set_line_width(line.stroke_width);
                context.move_to(line.x1, line.y1);
                context.line_to(line.x2, line.y2);
                context
                    .stroke()
                    .map_err(|err| map_backend_error("failed to stroke line", err))?;
                stats.lines_drawn += 1;
            }
            DrawCommand::Rect(rect) => {
                draw_rect(context, *rect)?;
                stats.rects_drawn += 1;
            }
            DrawCommand::Path(path) => {
                draw_path(context, path)?;
                stats.paths_drawn += 1;
            }
            DrawCommand::Text(text) => {
                draw_text(context, text);
                stats.texts_drawn += 1;
            }
            DrawCommand::Save => context
                .save()
                .map_err(|err| map_backend_error("failed to save state", err))?,
            DrawCommand::ClipRect(bounds) => {
                context.rectangle(bounds.left, bounds.top, bounds.width(), bounds.height());
                context.clip();
            }
            DrawCommand::Restore => context
                .restore()
                .map_err(|err| map_backend_error("failed to restore state", err))?,
            DrawCommand::Composite { layer, blend } => {
                context.push_group();
                replay(context, &layer.commands, stats)?;
                context
                    .pop_group_to_source()
                    .map_err(|err| map_backend_error("failed to finish layer", err))?;
                let previous = context.operator();
                context.set_operator(operator(*blend));
                let painted = context.paint();
                context.set_operator(previous);
                painted.map_err(|err| map_backend_error("failed to composite layer", err))?;
                stats.layers_composited += 1;
            }
        }
    }
    Ok(())
}

fn operator(blend: BlendMode) -> Operator {
    match blend {
        BlendMode::SourceOver => Operator::Over,
        BlendMode::DestinationIn => Operator::DestIn,
        BlendMode::DestinationOut => Operator::DestOut,
        BlendMode::Multiply => Operator::Multiply,
    }
}

fn draw_rect(context: &Context, rect: RectPrimitive) -> ChartResult<()> {
    append_rect_path(context, rect);
    apply_color(context, rect.fill_color);
    if rect.border_width > 0.0 {
        context
            .fill_preserve()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
        apply_color(context, rect.border_color);
        context.set_line_width(rect.border_width);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke rectangle border", err))
    } else {
        context
            .fill()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))
    }
}

fn draw_path(context: &Context, path: &PathPrimitive) -> ChartResult<()> {
    let mut points = path.points.iter();
    if let Some(first) = points.next() {
        context.move_to(first.x, first.y);
    }
    for point in points {
        context.line_to(point.x, point.y);
    }
    if path.closed {
        context.close_path();
    }
    if let Some(fill) = path.fill_color {
        apply_color(context, fill);
        context
            .fill_preserve()
            .map_err(|err| map_backend_error("failed to fill path", err))?;
    }
    if let Some(stroke) = path.stroke_color {
        apply_color(context, stroke);
        context.set_line_width(path.stroke_width);
        context
            .stroke_preserve()
            .map_err(|err| map_backend_error("failed to stroke path", err))?;
    }
    context.new_path();
    Ok(())
}

fn draw_text(context: &Context, text: &TextPrimitive) {
    let layout = pangocairo::functions::create_layout(context);
    let font_description = FontDescription::from_string(&format!("Sans {}", text.font_size_px));
    layout.set_font_description(Some(&font_description));
    layout.set_text(&text.text);

    let (width, height) = layout.pixel_size();
    let (width, height) = (f64::from(width), f64::from(height));
    let x = match text.h_align {
        TextHAlign::Left => text.x,
        TextHAlign::Center => text.x - 0.5 * width,
        TextHAlign::Right => text.x - width,
    };
    let y = match text.v_align {
        TextVAlign::Top => text.y,
        TextVAlign::Center => text.y - 0.5 * height,
        TextVAlign::Bottom => text.y - height,
    };

    apply_color(context, text.color);
    context.move_to(x, y);
    pangocairo::functions::show_layout(context, &layout);
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn append_rect_path(context: &Context, rect: RectPrimitive) {
    if rect.corner_radius <= 0.0 {
        context.rectangle(rect.x, rect.y, rect.width, rect.height);
        return;
    }

    let radius = rect
        .corner_radius
        .min(rect.width * 0.5)
        .min(rect.height * 0.5);
    let left = rect.x;
    let top = rect.y;
    let right = rect.x + rect.width;
    let bottom = rect.y + rect.height;

    context.new_sub_path();
    context.arc(right - radius, top + radius, radius, -FRAC_PI_2, 0.0);
    context.arc(right - radius, bottom - radius, radius, 0.0, FRAC_PI_2);
    context.arc(left + radius, bottom - radius, radius, FRAC_PI_2, PI);
    context.arc(left + radius, top + radius, radius, PI, PI + FRAC_PI_2);
    context.close_path();
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
