//! Stateless particle paint routines
//!
//! Each routine draws one shape centered on `center` using the canvas's
//! current fill/alpha/transform, and restores any state it changes before
//! returning. Rotation is applied by the caller around the particle center.

use crate::canvas::Canvas;
use std::f32::consts::PI;
use tinsel_core::{Color, Vec2};

/// Five-point (or n-point) star: alternating outer/inner radius polygon
pub fn draw_star<C: Canvas + ?Sized>(canvas: &mut C, center: Vec2, size: f32, spikes: u32) {
    let spikes = spikes.max(2);
    let outer = size;
    let inner = size * 0.4;

    let mut points = Vec::with_capacity(spikes as usize * 2);
    for i in 0..spikes * 2 {
        let angle = i as f32 * PI / spikes as f32;
        let radius = if i % 2 == 0 { outer } else { inner };
        points.push(Vec2::new(
            center.x + angle.cos() * radius,
            center.y + angle.sin() * radius,
        ));
    }
    canvas.fill_polygon(&points);
}

/// Axis-aligned box centered on `center`
pub fn draw_rectangle<C: Canvas + ?Sized>(canvas: &mut C, center: Vec2, width: f32, height: f32) {
    canvas.fill_rect(center.x - width / 2.0, center.y - height / 2.0, width, height);
}

/// Six-armed snowflake: stroked arms with two short branch strokes each
pub fn draw_snowflake<C: Canvas + ?Sized>(canvas: &mut C, center: Vec2, size: f32, color: Color) {
    let branch_at = 0.6;
    let branch_len = size * 0.3;
    let branch_spread = 0.5; // radians off the arm

    canvas.save();
    canvas.set_stroke(color, (size * 0.15).max(1.0));
    canvas.set_glow(8.0, color);

    for arm in 0..6 {
        let angle = arm as f32 * PI / 3.0;
        let dir = Vec2::new(angle.cos(), angle.sin());
        let tip = center + dir * size;
        canvas.stroke_segment(center, tip);

        let base = center + dir * (size * branch_at);
        for side in [-1.0f32, 1.0] {
            let branch_angle = angle + side * branch_spread;
            let branch_dir = Vec2::new(branch_angle.cos(), branch_angle.sin());
            canvas.stroke_segment(base, base + branch_dir * branch_len);
        }
    }

    canvas.restore();
}

/// Soap bubble: gradient body, rim, then three highlights.
/// Layer order matters: base gradient, rim stroke, primary highlight,
/// secondary highlight, reflected-light dot.
pub fn draw_bubble<C: Canvas + ?Sized>(canvas: &mut C, center: Vec2, size: f32, color: Color) {
    canvas.save();

    let light = center + Vec2::new(-size * 0.3, -size * 0.3);
    canvas.fill_radial_gradient(
        light,
        size * 0.1,
        center,
        size,
        &[
            (0.0, Color::WHITE.with_alpha(0.4)),
            (0.7, color.with_alpha(0.15)),
            (1.0, color.with_alpha(0.45)),
        ],
    );

    canvas.set_stroke(color.with_alpha(0.8), (size * 0.08).max(1.0));
    canvas.stroke_circle(center, size);

    canvas.set_fill(Color::WHITE.with_alpha(0.8));
    canvas.fill_circle(center + Vec2::new(-size * 0.35, -size * 0.35), size * 0.25);

    canvas.set_fill(Color::WHITE.with_alpha(0.5));
    canvas.fill_circle(center + Vec2::new(-size * 0.1, -size * 0.55), size * 0.12);

    canvas.set_fill(Color::WHITE.with_alpha(0.25));
    canvas.fill_circle(center + Vec2::new(size * 0.4, size * 0.45), size * 0.08);

    canvas.restore();
}

/// Plus sign from two overlapping centered rectangles, strong glow
pub fn draw_cross<C: Canvas + ?Sized>(canvas: &mut C, center: Vec2, size: f32, color: Color) {
    let arm = size * 1.5;
    let thickness = size * 0.4;

    canvas.save();
    canvas.set_glow(15.0, color);
    canvas.fill_rect(center.x - thickness / 2.0, center.y - arm / 2.0, thickness, arm);
    canvas.fill_rect(center.x - arm / 2.0, center.y - thickness / 2.0, arm, thickness);
    canvas.restore();
}

/// Ellipse via non-uniform scale around the center, then a circular fill
pub fn draw_oval<C: Canvas + ?Sized>(
    canvas: &mut C,
    center: Vec2,
    size: f32,
    sx: f32,
    sy: f32,
) {
    canvas.save();
    canvas.translate(center.x, center.y);
    canvas.scale(sx, sy);
    canvas.fill_circle(Vec2::ZERO, size);
    canvas.restore();
}
