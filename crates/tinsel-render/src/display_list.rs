//! Recording surface: frames as replayable command streams

use crate::canvas::Canvas;
use std::sync::Arc;
use tinsel_asset::Bitmap;
use tinsel_core::{Color, Vec2};

/// One recorded canvas operation
#[derive(Clone, Debug)]
pub enum DrawCommand {
    Save,
    Restore,
    Translate { dx: f32, dy: f32 },
    Rotate { radians: f32 },
    Scale { sx: f32, sy: f32 },
    GlobalAlpha(f32),
    Fill(Color),
    Stroke { color: Color, width: f32 },
    Glow { blur: f32, color: Color },
    FillRect { x: f32, y: f32, width: f32, height: f32 },
    FillCircle { center: Vec2, radius: f32 },
    StrokeCircle { center: Vec2, radius: f32 },
    FillPolygon { points: Vec<Vec2> },
    StrokeSegment { from: Vec2, to: Vec2 },
    FillRadialGradient {
        inner: Vec2,
        inner_radius: f32,
        outer: Vec2,
        outer_radius: f32,
        stops: Vec<(f32, Color)>,
    },
    DrawBitmap {
        bitmap: Arc<Bitmap>,
        center: Vec2,
        width: f32,
        height: f32,
        smoothing: bool,
    },
}

/// A `Canvas` that records commands instead of rasterizing.
///
/// The engine clears it at the top of each frame, so after `frame()` the
/// list holds exactly that frame's paint stream; a backend adapter drains
/// it with `take_commands` and replays onto the real surface.
pub struct DisplayList {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
    save_depth: i32,
}

impl DisplayList {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
            save_depth: 0,
        }
    }

    /// The current frame's command stream
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the current frame's command stream for replay
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Net save/restore depth; 0 when every save was restored
    pub fn save_depth(&self) -> i32 {
        self.save_depth
    }
}

impl Canvas for DisplayList {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.commands.clear();
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.save_depth = 0;
    }

    fn save(&mut self) {
        self.save_depth += 1;
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.save_depth -= 1;
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.commands.push(DrawCommand::Translate { dx, dy });
    }

    fn rotate(&mut self, radians: f32) {
        self.commands.push(DrawCommand::Rotate { radians });
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.commands.push(DrawCommand::Scale { sx, sy });
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.commands.push(DrawCommand::GlobalAlpha(alpha));
    }

    fn set_fill(&mut self, color: Color) {
        self.commands.push(DrawCommand::Fill(color));
    }

    fn set_stroke(&mut self, color: Color, width: f32) {
        self.commands.push(DrawCommand::Stroke { color, width });
    }

    fn set_glow(&mut self, blur: f32, color: Color) {
        self.commands.push(DrawCommand::Glow { blur, color });
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        self.commands.push(DrawCommand::FillCircle { center, radius });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32) {
        self.commands
            .push(DrawCommand::StrokeCircle { center, radius });
    }

    fn fill_polygon(&mut self, points: &[Vec2]) {
        self.commands.push(DrawCommand::FillPolygon {
            points: points.to_vec(),
        });
    }

    fn stroke_segment(&mut self, from: Vec2, to: Vec2) {
        self.commands.push(DrawCommand::StrokeSegment { from, to });
    }

    fn fill_radial_gradient(
        &mut self,
        inner: Vec2,
        inner_radius: f32,
        outer: Vec2,
        outer_radius: f32,
        stops: &[(f32, Color)],
    ) {
        self.commands.push(DrawCommand::FillRadialGradient {
            inner,
            inner_radius,
            outer,
            outer_radius,
            stops: stops.to_vec(),
        });
    }

    fn draw_bitmap(
        &mut self,
        bitmap: &Arc<Bitmap>,
        center: Vec2,
        width: f32,
        height: f32,
        smoothing: bool,
    ) {
        self.commands.push(DrawCommand::DrawBitmap {
            bitmap: Arc::clone(bitmap),
            center,
            width,
            height,
            smoothing,
        });
    }
}
