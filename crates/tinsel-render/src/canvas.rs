//! The 2D drawing surface contract

use std::sync::Arc;
use tinsel_asset::Bitmap;
use tinsel_core::{Color, Vec2};

/// A 2D overlay surface the engine paints particles onto.
///
/// Transform, alpha, stroke, fill, and glow settings form a state stack:
/// `save` pushes the current state, `restore` pops it. Paint routines must
/// leave the stack balanced so sibling particles are unaffected.
pub trait Canvas {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Resynchronize pixel dimensions to the viewport. Existing content is
    /// dropped; nothing else changes.
    fn resize(&mut self, width: u32, height: u32);

    /// Wipe the surface at the start of a frame
    fn clear(&mut self);

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f32, dy: f32);
    fn rotate(&mut self, radians: f32);
    fn scale(&mut self, sx: f32, sy: f32);

    fn set_global_alpha(&mut self, alpha: f32);
    fn set_fill(&mut self, color: Color);
    fn set_stroke(&mut self, color: Color, width: f32);
    /// Soft shadow behind subsequent fills/strokes; blur 0 disables
    fn set_glow(&mut self, blur: f32, color: Color);

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32);
    fn stroke_circle(&mut self, center: Vec2, radius: f32);
    fn fill_polygon(&mut self, points: &[Vec2]);
    fn stroke_segment(&mut self, from: Vec2, to: Vec2);

    /// Fill the disc at `outer`/`outer_radius` with a radial gradient running
    /// from the `inner` circle to the `outer` one. Stops are
    /// `(offset in [0, 1], color)` pairs in ascending offset order.
    fn fill_radial_gradient(
        &mut self,
        inner: Vec2,
        inner_radius: f32,
        outer: Vec2,
        outer_radius: f32,
        stops: &[(f32, Color)],
    );

    /// Paint a bitmap centered at `center`, scaled to `width` x `height`,
    /// under the current transform and alpha. `smoothing` requests
    /// high-quality (bilinear) filtering.
    fn draw_bitmap(
        &mut self,
        bitmap: &Arc<Bitmap>,
        center: Vec2,
        width: f32,
        height: f32,
        smoothing: bool,
    );
}

impl<C: Canvas + ?Sized> Canvas for Box<C> {
    fn width(&self) -> u32 {
        (**self).width()
    }
    fn height(&self) -> u32 {
        (**self).height()
    }
    fn resize(&mut self, width: u32, height: u32) {
        (**self).resize(width, height);
    }
    fn clear(&mut self) {
        (**self).clear();
    }
    fn save(&mut self) {
        (**self).save();
    }
    fn restore(&mut self) {
        (**self).restore();
    }
    fn translate(&mut self, dx: f32, dy: f32) {
        (**self).translate(dx, dy);
    }
    fn rotate(&mut self, radians: f32) {
        (**self).rotate(radians);
    }
    fn scale(&mut self, sx: f32, sy: f32) {
        (**self).scale(sx, sy);
    }
    fn set_global_alpha(&mut self, alpha: f32) {
        (**self).set_global_alpha(alpha);
    }
    fn set_fill(&mut self, color: Color) {
        (**self).set_fill(color);
    }
    fn set_stroke(&mut self, color: Color, width: f32) {
        (**self).set_stroke(color, width);
    }
    fn set_glow(&mut self, blur: f32, color: Color) {
        (**self).set_glow(blur, color);
    }
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        (**self).fill_rect(x, y, width, height);
    }
    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        (**self).fill_circle(center, radius);
    }
    fn stroke_circle(&mut self, center: Vec2, radius: f32) {
        (**self).stroke_circle(center, radius);
    }
    fn fill_polygon(&mut self, points: &[Vec2]) {
        (**self).fill_polygon(points);
    }
    fn stroke_segment(&mut self, from: Vec2, to: Vec2) {
        (**self).stroke_segment(from, to);
    }
    fn fill_radial_gradient(
        &mut self,
        inner: Vec2,
        inner_radius: f32,
        outer: Vec2,
        outer_radius: f32,
        stops: &[(f32, Color)],
    ) {
        (**self).fill_radial_gradient(inner, inner_radius, outer, outer_radius, stops);
    }
    fn draw_bitmap(
        &mut self,
        bitmap: &Arc<Bitmap>,
        center: Vec2,
        width: f32,
        height: f32,
        smoothing: bool,
    ) {
        (**self).draw_bitmap(bitmap, center, width, height, smoothing);
    }
}
