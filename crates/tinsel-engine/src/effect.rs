//! Effect variants: per-variant parameter tables over one shared spawn
//! algorithm
//!
//! An `Effect` is a pure factory: given a spawn point it produces a batch of
//! freshly jittered particles. Variants are data, not code paths: the only
//! behavioral extras (wobble, wind drift, image backing) are extra fields in
//! the profile.

use crate::particle::{Particle, ParticleConfig, Shape, Wobble};
use std::f32::consts::TAU;
use std::sync::Arc;
use std::time::Duration;
use tinsel_asset::{AssetKind, AssetLoader, BitmapHandle};
use tinsel_core::{Color, FxRng, Vec2};

const FAIRY_DUST_COLORS: [u32; 5] = [0xFFD700, 0xFFC700, 0xFFB700, 0xFFED4E, 0xF4E04D];
const SPARKLE_COLORS: [u32; 4] = [0xFFD700, 0xFF69B4, 0x00CED1, 0x9370DB];
const CONFETTI_COLORS: [u32; 8] = [
    0xFF6B6B, 0x4ECDC4, 0xFFE66D, 0x95E1D3, 0xF38181, 0xAA96DA, 0xFCBAD3, 0xA8D8EA,
];
const RETRO_CRT_COLORS: [u32; 4] = [0x00FF00, 0x33FF33, 0x00CC00, 0x00DD00];
const SNOW_COLORS: [u32; 4] = [0xFFFFFF, 0xF0F8FF, 0xE6F3FF, 0xF5F5F5];
const BUBBLE_COLORS: [u32; 5] = [0xADD8E6, 0x87CEEB, 0xB0E0E6, 0xAFEEEE, 0xE0FFFF];

/// The closed set of effect variants
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectKind {
    FairyDust,
    Sparkle,
    Confetti,
    RetroCrt,
    Snow,
    Bubble,
}

impl EffectKind {
    pub const ALL: [EffectKind; 6] = [
        EffectKind::FairyDust,
        EffectKind::Sparkle,
        EffectKind::Confetti,
        EffectKind::RetroCrt,
        EffectKind::Snow,
        EffectKind::Bubble,
    ];

    /// Factory key, e.g. `"fairyDust"`, `"retroCRT"`
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "fairyDust" => Some(EffectKind::FairyDust),
            "sparkle" => Some(EffectKind::Sparkle),
            "confetti" => Some(EffectKind::Confetti),
            "retroCRT" => Some(EffectKind::RetroCrt),
            "snow" => Some(EffectKind::Snow),
            "bubble" => Some(EffectKind::Bubble),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EffectKind::FairyDust => "fairyDust",
            EffectKind::Sparkle => "sparkle",
            EffectKind::Confetti => "confetti",
            EffectKind::RetroCrt => "retroCRT",
            EffectKind::Snow => "snow",
            EffectKind::Bubble => "bubble",
        }
    }
}

/// Effect configuration. Every field is optional; unset fields take the
/// variant default. Supplied values override unconditionally; degenerate
/// values (zero, negative) are accepted and produce degenerate visuals.
#[derive(Clone, Debug, Default)]
pub struct EffectOptions {
    pub colors: Option<Vec<Color>>,
    pub particle_count: Option<u32>,
    pub particle_size: Option<f32>,
    pub gravity: Option<f32>,
    pub max_life: Option<u32>,
    pub velocity: Option<f32>,
    /// Minimum milliseconds between spawns
    pub throttle: Option<u64>,
    /// Minimum pointer displacement (px) required to spawn
    pub min_move_distance: Option<f32>,
}

impl EffectOptions {
    /// Parse options from a TOML table. Unknown keys are ignored; colors
    /// that fail to parse are skipped.
    pub fn from_toml(table: &toml::value::Table) -> Self {
        let mut options = Self::default();

        if let Some(arr) = table.get("colors").and_then(|v| v.as_array()) {
            options.colors = Some(
                arr.iter()
                    .filter_map(|v| v.as_str())
                    .filter_map(|s| Color::parse(s).ok())
                    .collect(),
            );
        }
        if let Some(v) = table.get("particle_count") {
            options.particle_count = v.as_integer().map(|i| i.max(0) as u32);
        }
        if let Some(v) = table.get("particle_size") {
            options.particle_size = toml_f32(v);
        }
        if let Some(v) = table.get("gravity") {
            options.gravity = toml_f32(v);
        }
        if let Some(v) = table.get("max_life") {
            options.max_life = v.as_integer().map(|i| i.max(0) as u32);
        }
        if let Some(v) = table.get("velocity") {
            options.velocity = toml_f32(v);
        }
        if let Some(v) = table.get("throttle") {
            options.throttle = v.as_integer().map(|i| i.max(0) as u64);
        }
        if let Some(v) = table.get("min_move_distance") {
            options.min_move_distance = toml_f32(v);
        }

        options
    }
}

// Handles TOML integer/float coercion
fn toml_f32(v: &toml::Value) -> Option<f32> {
    v.as_float()
        .map(|f| f as f32)
        .or_else(|| v.as_integer().map(|i| i as f32))
}

/// Wobble parameter ranges rolled per particle at spawn
#[derive(Clone, Copy, Debug)]
pub struct WobbleRanges {
    pub amplitude: (f32, f32),
    pub speed: (f32, f32),
}

/// The resolved per-variant parameter table. One spawn algorithm reads it;
/// variants differ only in these values.
#[derive(Clone, Debug)]
pub struct SpawnProfile {
    pub colors: Vec<Color>,
    pub particle_count: u32,
    /// Jitter box around the pointer position
    pub spawn_spread: Vec2,
    pub size_floor: f32,
    pub size_jitter: f32,
    /// Horizontal launch spread (uniform around 0)
    pub velocity: f32,
    /// Vertical launch: uniform around `vertical_center`
    pub vertical_center: f32,
    pub vertical_spread: f32,
    pub gravity: f32,
    pub max_life: u32,
    pub life_jitter: u32,
    pub shape: Shape,
    /// Random initial rotation plus a spin speed drawn from
    /// `0 ± spin_speed_spread / 2`
    pub spin: bool,
    pub spin_speed_spread: f32,
    pub wobble: Option<WobbleRanges>,
    pub wind_drift: f32,
    pub image_kind: Option<AssetKind>,
}

fn resolve_profile(kind: EffectKind, options: &EffectOptions) -> SpawnProfile {
    let palette = |hexes: &[u32]| -> Vec<Color> {
        options
            .colors
            .clone()
            .unwrap_or_else(|| hexes.iter().copied().map(Color::from_hex).collect())
    };
    let neutral = SpawnProfile {
        colors: Vec::new(),
        particle_count: 0,
        spawn_spread: Vec2::ZERO,
        size_floor: 2.0,
        size_jitter: 0.0,
        velocity: 0.0,
        vertical_center: 0.0,
        vertical_spread: 0.0,
        gravity: 0.0,
        max_life: 0,
        life_jitter: 0,
        shape: Shape::Star,
        spin: false,
        spin_speed_spread: 0.0,
        wobble: None,
        wind_drift: 0.0,
        image_kind: None,
    };

    match kind {
        EffectKind::FairyDust => {
            let velocity = options.velocity.unwrap_or(3.0);
            SpawnProfile {
                colors: palette(&FAIRY_DUST_COLORS),
                particle_count: options.particle_count.unwrap_or(2),
                spawn_spread: Vec2::new(15.0, 15.0),
                size_jitter: options.particle_size.unwrap_or(4.0),
                velocity,
                // Slight upward launch bias for the magical float
                vertical_center: -1.0,
                vertical_spread: velocity,
                gravity: options.gravity.unwrap_or(-0.05),
                max_life: options.max_life.unwrap_or(40),
                life_jitter: 20,
                shape: Shape::Cross,
                ..neutral
            }
        }
        EffectKind::Sparkle => {
            let velocity = options.velocity.unwrap_or(4.0);
            SpawnProfile {
                colors: palette(&SPARKLE_COLORS),
                particle_count: options.particle_count.unwrap_or(1),
                spawn_spread: Vec2::new(10.0, 10.0),
                size_floor: 3.0,
                size_jitter: options.particle_size.unwrap_or(6.0),
                velocity,
                vertical_spread: velocity,
                gravity: options.gravity.unwrap_or(0.1),
                max_life: options.max_life.unwrap_or(20),
                life_jitter: 10,
                shape: Shape::Star,
                ..neutral
            }
        }
        EffectKind::Confetti => {
            let velocity = options.velocity.unwrap_or(6.0);
            SpawnProfile {
                colors: palette(&CONFETTI_COLORS),
                particle_count: options.particle_count.unwrap_or(3),
                spawn_spread: Vec2::new(20.0, 20.0),
                size_floor: 3.0,
                size_jitter: options.particle_size.unwrap_or(4.0),
                velocity,
                // Launch upward-only: uniform in [-velocity/2, 0]
                vertical_center: -velocity / 4.0,
                vertical_spread: velocity / 2.0,
                gravity: options.gravity.unwrap_or(0.3),
                max_life: options.max_life.unwrap_or(60),
                life_jitter: 20,
                shape: Shape::Rectangle,
                spin: true,
                spin_speed_spread: 0.2,
                ..neutral
            }
        }
        EffectKind::RetroCrt => {
            let velocity = options.velocity.unwrap_or(2.0);
            SpawnProfile {
                colors: palette(&RETRO_CRT_COLORS),
                particle_count: options.particle_count.unwrap_or(3),
                spawn_spread: Vec2::new(8.0, 8.0),
                size_jitter: options.particle_size.unwrap_or(3.0),
                velocity,
                vertical_spread: velocity,
                // Phosphor glows in place
                gravity: options.gravity.unwrap_or(0.0),
                max_life: options.max_life.unwrap_or(50),
                life_jitter: 15,
                shape: Shape::Circle,
                ..neutral
            }
        }
        EffectKind::Snow => SpawnProfile {
            colors: palette(&SNOW_COLORS),
            particle_count: options.particle_count.unwrap_or(1),
            spawn_spread: Vec2::new(30.0, 15.0),
            size_jitter: options.particle_size.unwrap_or(6.0),
            velocity: options.velocity.unwrap_or(0.3),
            // Barely moving downward; gravity and wind do the rest
            vertical_center: 0.1,
            vertical_spread: 0.1,
            gravity: options.gravity.unwrap_or(0.05),
            max_life: options.max_life.unwrap_or(200),
            life_jitter: 80,
            shape: Shape::Snowflake,
            spin: true,
            spin_speed_spread: 0.008,
            wind_drift: 0.8,
            image_kind: Some(AssetKind::Snowflake),
            ..neutral
        },
        EffectKind::Bubble => SpawnProfile {
            colors: palette(&BUBBLE_COLORS),
            particle_count: options.particle_count.unwrap_or(2),
            spawn_spread: Vec2::new(20.0, 10.0),
            size_jitter: options.particle_size.unwrap_or(6.0),
            velocity: options.velocity.unwrap_or(2.0),
            // Upward-only launch: uniform in [-2, 0]
            vertical_center: -1.0,
            vertical_spread: 2.0,
            gravity: options.gravity.unwrap_or(-0.08),
            max_life: options.max_life.unwrap_or(70),
            life_jitter: 20,
            shape: Shape::Bubble,
            wobble: Some(WobbleRanges {
                amplitude: (0.3, 0.8),
                speed: (0.02, 0.06),
            }),
            image_kind: Some(AssetKind::Bubble),
            ..neutral
        },
    }
}

/// Spawn-policy defaults for effects that should fire infrequently
fn default_policy(kind: EffectKind) -> (Option<Duration>, Option<f32>) {
    match kind {
        EffectKind::Snow => (Some(Duration::from_millis(120)), Some(12.0)),
        EffectKind::Bubble => (Some(Duration::from_millis(80)), Some(8.0)),
        _ => (None, None),
    }
}

/// A configured particle generator. Immutable after construction; holds
/// configuration only, never runtime state.
pub struct Effect {
    kind: EffectKind,
    profile: SpawnProfile,
    throttle: Option<Duration>,
    min_move_distance: Option<f32>,
    images: Option<Arc<AssetLoader>>,
}

impl Effect {
    pub fn new(kind: EffectKind, options: &EffectOptions) -> Self {
        let (default_throttle, default_min_move) = default_policy(kind);
        Self {
            kind,
            profile: resolve_profile(kind, options),
            throttle: options
                .throttle
                .map(Duration::from_millis)
                .or(default_throttle),
            min_move_distance: options.min_move_distance.or(default_min_move),
            images: None,
        }
    }

    /// Attach the shared sprite cache for image-backed particles. Effects
    /// treat every cache miss as "draw the procedural shape instead".
    pub fn with_images(mut self, loader: Arc<AssetLoader>) -> Self {
        self.images = Some(loader);
        self
    }

    pub fn kind(&self) -> EffectKind {
        self.kind
    }

    pub fn profile(&self) -> &SpawnProfile {
        &self.profile
    }

    /// Minimum interval between spawns; `None` means the engine default
    pub fn throttle(&self) -> Option<Duration> {
        self.throttle
    }

    /// Minimum pointer displacement; `None` means every event qualifies
    pub fn min_move_distance(&self) -> Option<f32> {
        self.min_move_distance
    }

    /// Spawn one batch of particles around `(x, y)`. Every numeric
    /// parameter is its profile base plus independent uniform jitter; the
    /// color is a uniform palette pick per particle.
    pub fn on_pointer_move(&self, x: f32, y: f32, rng: &mut FxRng) -> Vec<Particle> {
        let p = &self.profile;
        let mut batch = Vec::with_capacity(p.particle_count as usize);

        for _ in 0..p.particle_count {
            let mut config = ParticleConfig {
                x: rng.jitter(x, p.spawn_spread.x),
                y: rng.jitter(y, p.spawn_spread.y),
                vx: Some(rng.jitter(0.0, p.velocity)),
                vy: Some(rng.jitter(p.vertical_center, p.vertical_spread)),
                size: Some(p.size_floor + rng.next_f32() * p.size_jitter),
                color: rng.pick(&p.colors).copied(),
                max_life: Some(p.max_life + (rng.next_f32() * p.life_jitter as f32) as u32),
                gravity: Some(p.gravity),
                shape: Some(p.shape),
                ..Default::default()
            };

            if p.spin {
                config.rotation = Some(rng.range(0.0, TAU));
                config.rotation_speed = Some(rng.jitter(0.0, p.spin_speed_spread));
            }
            if let Some(ranges) = &p.wobble {
                config.wobble = Some(Wobble {
                    amplitude: rng.range(ranges.amplitude.0, ranges.amplitude.1),
                    speed: rng.range(ranges.speed.0, ranges.speed.1),
                    phase: rng.range(0.0, TAU),
                });
            }
            if p.wind_drift != 0.0 {
                config.wind_drift = Some(p.wind_drift);
            }
            if let (Some(kind), Some(loader)) = (p.image_kind, self.images.as_deref()) {
                config.image = loader.pick_random(kind).map(BitmapHandle::ready);
            }

            batch.push(Particle::new(config, rng));
        }

        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinsel_asset::Bitmap;

    fn rng() -> FxRng {
        FxRng::new(42)
    }

    #[test]
    fn variant_names_round_trip() {
        for kind in EffectKind::ALL {
            assert_eq!(EffectKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(EffectKind::from_name("glitter"), None);
    }

    #[test]
    fn spawns_particle_count_per_call() {
        let effect = Effect::new(EffectKind::Confetti, &EffectOptions::default());
        let batch = effect.on_pointer_move(100.0, 100.0, &mut rng());
        assert_eq!(batch.len(), 3);

        let effect = Effect::new(
            EffectKind::Confetti,
            &EffectOptions {
                particle_count: Some(7),
                ..Default::default()
            },
        );
        assert_eq!(effect.on_pointer_move(0.0, 0.0, &mut rng()).len(), 7);
    }

    #[test]
    fn spawn_jitters_around_pointer() {
        let effect = Effect::new(EffectKind::FairyDust, &EffectOptions::default());
        let mut rng = rng();
        for _ in 0..50 {
            for p in effect.on_pointer_move(200.0, 300.0, &mut rng) {
                assert!((p.pos.x - 200.0).abs() <= 7.5);
                assert!((p.pos.y - 300.0).abs() <= 7.5);
                assert!(p.size > 0.0);
                assert_eq!(p.shape, Shape::Cross);
            }
        }
    }

    #[test]
    fn gravity_signs_match_variants() {
        let mut rng = rng();
        let mut gravity_of = |kind| {
            Effect::new(kind, &EffectOptions::default())
                .on_pointer_move(0.0, 0.0, &mut rng)
                .pop()
                .unwrap()
                .gravity
        };
        assert!(gravity_of(EffectKind::FairyDust) < 0.0);
        assert!(gravity_of(EffectKind::Sparkle) > 0.0);
        assert!(gravity_of(EffectKind::Confetti) > 0.0);
        assert_eq!(gravity_of(EffectKind::RetroCrt), 0.0);
        assert!(gravity_of(EffectKind::Snow) > 0.0);
        assert!(gravity_of(EffectKind::Bubble) < 0.0);
    }

    #[test]
    fn confetti_spins_and_launches_upward() {
        let effect = Effect::new(EffectKind::Confetti, &EffectOptions::default());
        let mut rng = rng();
        for _ in 0..50 {
            for p in effect.on_pointer_move(0.0, 0.0, &mut rng) {
                assert_eq!(p.shape, Shape::Rectangle);
                assert!((0.0..TAU).contains(&p.rotation));
                assert!(p.vel.y <= 0.0 && p.vel.y >= -3.0);
            }
        }
    }

    #[test]
    fn snow_declares_throttled_spawn_policy() {
        let effect = Effect::new(EffectKind::Snow, &EffectOptions::default());
        assert_eq!(effect.throttle(), Some(Duration::from_millis(120)));
        assert_eq!(effect.min_move_distance(), Some(12.0));

        let p = effect
            .on_pointer_move(0.0, 0.0, &mut rng())
            .pop()
            .unwrap();
        assert_eq!(p.shape, Shape::Snowflake);
        assert_eq!(p.wind_drift, 0.8);
        assert!(p.vel.y >= 0.05 && p.vel.y <= 0.15);
    }

    #[test]
    fn bubble_wobbles_within_profile_ranges() {
        let effect = Effect::new(EffectKind::Bubble, &EffectOptions::default());
        let mut rng = rng();
        for _ in 0..50 {
            for p in effect.on_pointer_move(0.0, 0.0, &mut rng) {
                let wobble = p.wobble.expect("bubble particles wobble");
                assert!((0.3..0.8).contains(&wobble.amplitude));
                assert!((0.02..0.06).contains(&wobble.speed));
                assert!(p.vel.y <= 0.0 && p.vel.y >= -2.0);
            }
        }
        assert_eq!(effect.throttle(), Some(Duration::from_millis(80)));
    }

    #[test]
    fn options_override_unconditionally() {
        let options = EffectOptions {
            colors: Some(vec![Color::BLACK]),
            particle_count: Some(1),
            gravity: Some(-9.0),
            max_life: Some(0),
            velocity: Some(0.0),
            throttle: Some(5),
            min_move_distance: Some(100.0),
            ..Default::default()
        };
        let effect = Effect::new(EffectKind::Sparkle, &options);
        assert_eq!(effect.throttle(), Some(Duration::from_millis(5)));
        assert_eq!(effect.min_move_distance(), Some(100.0));

        let p = effect.on_pointer_move(0.0, 0.0, &mut rng()).pop().unwrap();
        assert_eq!(p.color, Color::BLACK);
        assert_eq!(p.gravity, -9.0);
        // Degenerate lifetime accepted: dead immediately, no crash
        assert!(p.max_life <= 10);
    }

    #[test]
    fn palette_pick_uses_supplied_colors_only() {
        let colors = vec![Color::from_hex(0x112233), Color::from_hex(0x445566)];
        let effect = Effect::new(
            EffectKind::FairyDust,
            &EffectOptions {
                colors: Some(colors.clone()),
                ..Default::default()
            },
        );
        let mut rng = rng();
        for _ in 0..30 {
            for p in effect.on_pointer_move(0.0, 0.0, &mut rng) {
                assert!(colors.contains(&p.color));
            }
        }
    }

    #[test]
    fn image_backing_is_best_effort() {
        let loader = Arc::new(AssetLoader::new());
        let effect =
            Effect::new(EffectKind::Bubble, &EffectOptions::default()).with_images(loader.clone());

        // Nothing cached yet: procedural fallback
        let p = effect.on_pointer_move(0.0, 0.0, &mut rng()).pop().unwrap();
        assert!(p.image.is_none());

        let bitmap = Arc::new(Bitmap::from_rgba(2, 2, vec![0; 16]).unwrap());
        loader.insert_ready("soap_bubble", AssetKind::Bubble, bitmap);
        let p = effect.on_pointer_move(0.0, 0.0, &mut rng()).pop().unwrap();
        assert!(p.image.is_some());
    }

    #[test]
    fn from_toml_parses_known_keys_and_ignores_junk() {
        let toml_str = r##"
colors = ["#FF0000", "nonsense", "#00FF0080"]
particle_count = 4
particle_size = 2
gravity = -0.5
max_life = 90
velocity = 1.5
throttle = 200
min_move_distance = 6
unknown_key = "ignored"
"##;
        let table: toml::value::Table = toml::from_str(toml_str).unwrap();
        let options = EffectOptions::from_toml(&table);

        assert_eq!(options.colors.as_ref().map(Vec::len), Some(2));
        assert_eq!(options.particle_count, Some(4));
        // Integer/float coercion
        assert_eq!(options.particle_size, Some(2.0));
        assert_eq!(options.gravity, Some(-0.5));
        assert_eq!(options.max_life, Some(90));
        assert_eq!(options.velocity, Some(1.5));
        assert_eq!(options.throttle, Some(200));
        assert_eq!(options.min_move_distance, Some(6.0));
    }

    #[test]
    fn from_toml_empty_table_is_all_defaults() {
        let table = toml::value::Table::new();
        let options = EffectOptions::from_toml(&table);
        assert!(options.colors.is_none());
        assert!(options.particle_count.is_none());
        assert!(options.throttle.is_none());
    }
}
