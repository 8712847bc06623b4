//! Particle state: per-frame physics and paint dispatch

use tinsel_asset::BitmapHandle;
use tinsel_core::{Color, FxRng, Vec2};
use tinsel_render::{primitives, Canvas};

/// Procedural particle shape. Image-backed particles bypass the shape when
/// their bitmap is ready.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Shape {
    #[default]
    Star,
    Rectangle,
    Circle,
    Snowflake,
    Bubble,
    Cross,
    Oval,
}

/// Horizontal oscillation for buoyant shapes
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wobble {
    pub amplitude: f32,
    pub speed: f32,
    pub phase: f32,
}

/// Spawn-time particle parameters. Every field except position is optional;
/// unset fields take the defaults below (velocity defaults are randomized,
/// the only randomness after construction-time jitter).
#[derive(Clone, Default)]
pub struct ParticleConfig {
    pub x: f32,
    pub y: f32,
    pub vx: Option<f32>,
    pub vy: Option<f32>,
    pub size: Option<f32>,
    pub color: Option<Color>,
    pub max_life: Option<u32>,
    pub gravity: Option<f32>,
    pub rotation: Option<f32>,
    pub rotation_speed: Option<f32>,
    pub shape: Option<Shape>,
    pub wobble: Option<Wobble>,
    pub wind_drift: Option<f32>,
    pub image: Option<BitmapHandle>,
}

/// A single simulated visual entity. Owned exclusively by the engine's
/// collection; mutated once per frame by `update` and nowhere else.
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub color: Color,
    /// Frames elapsed since spawn
    pub life: u32,
    /// Frames until death, fixed at creation
    pub max_life: u32,
    /// Per-frame vertical acceleration
    pub gravity: f32,
    /// Derived from life each frame, in [0, 1]
    pub opacity: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
    pub shape: Shape,
    pub wobble: Option<Wobble>,
    /// Magnitude of the multi-frequency horizontal sway; 0 disables
    pub wind_drift: f32,
    pub image: Option<BitmapHandle>,
}

impl Particle {
    pub fn new(config: ParticleConfig, rng: &mut FxRng) -> Self {
        let vx = config.vx.unwrap_or_else(|| rng.jitter(0.0, 4.0));
        let vy = config.vy.unwrap_or_else(|| rng.jitter(0.0, 4.0));
        Self {
            pos: Vec2::new(config.x, config.y),
            vel: Vec2::new(vx, vy),
            size: config.size.unwrap_or(3.0),
            color: config.color.unwrap_or(Color::WHITE),
            life: 0,
            max_life: config.max_life.unwrap_or(40),
            gravity: config.gravity.unwrap_or(0.1),
            opacity: 1.0,
            rotation: config.rotation.unwrap_or(0.0),
            rotation_speed: config.rotation_speed.unwrap_or(0.0),
            shape: config.shape.unwrap_or_default(),
            wobble: config.wobble,
            wind_drift: config.wind_drift.unwrap_or(0.0),
            image: config.image,
        }
    }

    /// Advance one discrete frame
    pub fn update(&mut self) {
        self.life += 1;
        self.vel.y += self.gravity;

        let mut dx = self.vel.x;
        if let Some(wobble) = self.wobble.as_mut() {
            dx += wobble.phase.sin() * wobble.amplitude;
            wobble.phase += wobble.speed;
        }
        if self.wind_drift != 0.0 {
            let t = self.life as f32;
            dx += (t * 0.05).sin() * self.wind_drift * 0.3
                + (t * 0.02).sin() * self.wind_drift * 0.7;
        }

        self.pos.x += dx;
        self.pos.y += self.vel.y;
        self.rotation += self.rotation_speed;
        self.opacity = (1.0 - self.life as f32 / self.max_life as f32).clamp(0.0, 1.0);
    }

    pub fn is_dead(&self) -> bool {
        self.life >= self.max_life
    }

    /// Paint the current visual state. Does not mutate simulation state,
    /// and leaves the canvas state stack balanced.
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        canvas.save();
        canvas.set_global_alpha(self.opacity);
        canvas.set_fill(self.color);

        if self.rotation != 0.0 {
            canvas.translate(self.pos.x, self.pos.y);
            canvas.rotate(self.rotation);
            canvas.translate(-self.pos.x, -self.pos.y);
        }

        if let Some(bitmap) = self.image.as_ref().and_then(BitmapHandle::get) {
            let edge = self.size * 2.5;
            canvas.draw_bitmap(&bitmap, self.pos, edge, edge, true);
        } else {
            match self.shape {
                Shape::Rectangle => {
                    primitives::draw_rectangle(canvas, self.pos, self.size, self.size * 1.5)
                }
                Shape::Circle => {
                    canvas.save();
                    canvas.set_glow(15.0, self.color);
                    canvas.fill_circle(self.pos, self.size);
                    canvas.restore();
                }
                Shape::Snowflake => {
                    primitives::draw_snowflake(canvas, self.pos, self.size, self.color)
                }
                Shape::Bubble => primitives::draw_bubble(canvas, self.pos, self.size, self.color),
                Shape::Cross => primitives::draw_cross(canvas, self.pos, self.size, self.color),
                Shape::Oval => primitives::draw_oval(canvas, self.pos, self.size, 1.0, 0.6),
                Shape::Star => primitives::draw_star(canvas, self.pos, self.size, 5),
            }
        }

        canvas.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tinsel_asset::Bitmap;
    use tinsel_render::{DisplayList, DrawCommand};

    fn particle(config: ParticleConfig) -> Particle {
        Particle::new(config, &mut FxRng::new(42))
    }

    #[test]
    fn dies_after_exactly_max_life_updates() {
        let mut p = particle(ParticleConfig {
            max_life: Some(10),
            ..Default::default()
        });
        for step in 1..=10 {
            assert!(!p.is_dead(), "dead too early at step {step}");
            p.update();
        }
        assert!(p.is_dead());
    }

    #[test]
    fn opacity_decreases_monotonically_to_zero() {
        let mut p = particle(ParticleConfig {
            max_life: Some(25),
            ..Default::default()
        });
        let mut last = p.opacity;
        for _ in 0..25 {
            p.update();
            assert!(p.opacity <= last);
            last = p.opacity;
        }
        assert_eq!(p.opacity, 0.0);
    }

    #[test]
    fn gravity_accumulates_into_velocity() {
        let mut p = particle(ParticleConfig {
            vx: Some(0.0),
            vy: Some(0.0),
            gravity: Some(0.1),
            max_life: Some(100),
            ..Default::default()
        });
        let mut prev_y = p.pos.y;
        for step in 1..=10 {
            p.update();
            if step >= 2 {
                assert!(p.pos.y > prev_y, "y not increasing at step {step}");
            }
            prev_y = p.pos.y;
        }
        assert!((p.vel.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn wind_drift_sways_horizontally() {
        let mut still = particle(ParticleConfig {
            vx: Some(0.0),
            vy: Some(0.0),
            gravity: Some(0.0),
            max_life: Some(300),
            ..Default::default()
        });
        let mut drifting = particle(ParticleConfig {
            vx: Some(0.0),
            vy: Some(0.0),
            gravity: Some(0.0),
            max_life: Some(300),
            wind_drift: Some(0.8),
            ..Default::default()
        });
        for _ in 0..30 {
            still.update();
            drifting.update();
        }
        assert_eq!(still.pos.x, 0.0);
        assert!(drifting.pos.x != 0.0);
    }

    #[test]
    fn wobble_oscillates_and_advances_phase() {
        let mut p = particle(ParticleConfig {
            vx: Some(0.0),
            vy: Some(0.0),
            gravity: Some(0.0),
            max_life: Some(1000),
            wobble: Some(Wobble {
                amplitude: 1.0,
                speed: 0.5,
                phase: 0.0,
            }),
            ..Default::default()
        });
        // First frame samples sin(0) = 0, then the phase starts moving
        p.update();
        assert_eq!(p.pos.x, 0.0);
        p.update();
        assert!(p.pos.x > 0.0);

        let mut min_x = f32::MAX;
        let mut max_x = f32::MIN;
        for _ in 0..100 {
            p.update();
            min_x = min_x.min(p.pos.x);
            max_x = max_x.max(p.pos.x);
        }
        assert!(min_x < max_x);
    }

    #[test]
    fn degenerate_zero_max_life_does_not_crash() {
        let mut p = particle(ParticleConfig {
            max_life: Some(0),
            ..Default::default()
        });
        assert!(p.is_dead());
        p.update();
        assert_eq!(p.opacity, 0.0);
    }

    #[test]
    fn draw_dispatches_on_shape_and_balances_state() {
        for shape in [
            Shape::Star,
            Shape::Rectangle,
            Shape::Circle,
            Shape::Snowflake,
            Shape::Bubble,
            Shape::Cross,
            Shape::Oval,
        ] {
            let p = particle(ParticleConfig {
                shape: Some(shape),
                ..Default::default()
            });
            let mut canvas = DisplayList::new(100, 100);
            p.draw(&mut canvas);
            assert!(!canvas.commands().is_empty());
            assert_eq!(canvas.save_depth(), 0, "unbalanced state for {shape:?}");
        }
    }

    #[test]
    fn rotation_wraps_draw_in_transform() {
        let p = particle(ParticleConfig {
            rotation: Some(1.0),
            shape: Some(Shape::Rectangle),
            ..Default::default()
        });
        let mut canvas = DisplayList::new(100, 100);
        p.draw(&mut canvas);
        assert!(canvas
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::Rotate { radians } if *radians == 1.0)));
    }

    #[test]
    fn ready_image_replaces_shape() {
        let bitmap = Arc::new(Bitmap::from_rgba(1, 1, vec![255; 4]).unwrap());
        let p = particle(ParticleConfig {
            size: Some(4.0),
            shape: Some(Shape::Bubble),
            image: Some(BitmapHandle::ready(bitmap)),
            ..Default::default()
        });
        let mut canvas = DisplayList::new(100, 100);
        p.draw(&mut canvas);

        let bitmaps: Vec<_> = canvas
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::DrawBitmap { .. }))
            .collect();
        assert_eq!(bitmaps.len(), 1);
        if let DrawCommand::DrawBitmap { width, smoothing, .. } = bitmaps[0] {
            assert_eq!(*width, 10.0); // size * 2.5
            assert!(*smoothing);
        }
        // No procedural bubble layers
        assert!(!canvas
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::FillRadialGradient { .. })));
    }

    #[test]
    fn pending_image_falls_back_to_shape() {
        let p = particle(ParticleConfig {
            shape: Some(Shape::Snowflake),
            image: Some(BitmapHandle::pending()),
            ..Default::default()
        });
        let mut canvas = DisplayList::new(100, 100);
        p.draw(&mut canvas);

        assert!(!canvas
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::DrawBitmap { .. })));
        assert!(canvas
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::StrokeSegment { .. })));
    }
}
