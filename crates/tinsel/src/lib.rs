//! Tinsel - Cursor-following particle effects
//!
//! Lightweight, ephemeral particle visuals (fairy dust, confetti, snow, …)
//! drawn to an overlay surface and driven by pointer movement. Adapter
//! authors construct an engine, pick an effect, and forward pointer events
//! and display ticks into it:
//!
//! ```
//! use tinsel::{create_effect, create_engine, EffectKind, EffectOptions, EngineOptions};
//!
//! let mut engine = create_engine(EngineOptions::default()).unwrap();
//! engine.start(create_effect(EffectKind::FairyDust, &EffectOptions::default()));
//! engine.pointer_moved(120.0, 80.0);
//! while engine.frame() {
//!     // replay engine.surface() onto the real backend, wait for vsync
//!     # break;
//! }
//! engine.destroy();
//! ```
//!
//! `init` bundles construction and start into one call and honors a
//! reduced-motion opt-out.

use std::sync::Arc;

pub use tinsel_asset::{AssetKind, AssetLoader, Bitmap, BitmapHandle};
pub use tinsel_core::{Color, FxRng, Result, TinselError, Vec2};
pub use tinsel_engine::{
    create_engine, Effect, EffectKind, EffectOptions, Engine, EngineOptions, EngineState,
    Particle, ParticleConfig, Shape, SurfaceProvider, Wobble, DEFAULT_MAX_PARTICLES,
    DEFAULT_SPAWN_INTERVAL_MS,
};
pub use tinsel_render::{primitives, Canvas, DisplayList, DrawCommand};

/// Environment variable that switches `init` into a no-op (the library-level
/// analog of `prefers-reduced-motion`). Checked once, at init only.
pub const REDUCED_MOTION_ENV: &str = "TINSEL_REDUCED_MOTION";

/// Construct a configured effect
pub fn create_effect(kind: EffectKind, options: &EffectOptions) -> Effect {
    Effect::new(kind, options)
}

/// Options for [`init`]
pub struct InitOptions {
    pub effect: EffectKind,
    pub options: EffectOptions,
    pub engine: EngineOptions,
    /// Shared sprite cache for image-backed effects (snow, bubble)
    pub assets: Option<Arc<AssetLoader>>,
    /// When true (the default), a set reduced-motion preference turns
    /// `init` into a no-op
    pub respect_reduced_motion: bool,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            effect: EffectKind::FairyDust,
            options: EffectOptions::default(),
            engine: EngineOptions::default(),
            assets: None,
            respect_reduced_motion: true,
        }
    }
}

/// A started engine, or an inert handle when reduced motion is preferred
pub struct FxInstance {
    engine: Option<Engine<Box<dyn Canvas>>>,
}

impl FxInstance {
    /// Whether an engine is actually running behind this handle
    pub fn is_active(&self) -> bool {
        self.engine.as_ref().is_some_and(Engine::is_running)
    }

    /// Host access for forwarding pointer events and frame ticks
    pub fn engine_mut(&mut self) -> Option<&mut Engine<Box<dyn Canvas>>> {
        self.engine.as_mut()
    }

    /// Tear everything down. Idempotent.
    pub fn destroy(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.destroy();
        }
        self.engine = None;
    }
}

impl Drop for FxInstance {
    fn drop(&mut self) {
        self.destroy();
    }
}

fn reduced_motion_active() -> bool {
    match std::env::var(REDUCED_MOTION_ENV) {
        Ok(value) => !matches!(value.as_str(), "" | "0" | "false" | "no"),
        Err(_) => false,
    }
}

/// Construct an engine, bind the chosen effect, and start it in one call.
/// Returns an inert instance when the reduced-motion preference is active;
/// the preference is not re-checked after init.
pub fn init(options: InitOptions) -> Result<FxInstance> {
    if options.respect_reduced_motion && reduced_motion_active() {
        log::debug!("reduced motion preferred, effects disabled");
        return Ok(FxInstance { engine: None });
    }

    let mut effect_options = options.options;
    // Trimmed spawn batches by default for the one-call entry point
    effect_options.particle_count.get_or_insert(2);

    let mut effect = create_effect(options.effect, &effect_options);
    if let Some(assets) = options.assets {
        effect = effect.with_images(assets);
    }

    let mut engine = create_engine(options.engine)?;
    engine.start(effect);
    Ok(FxInstance {
        engine: Some(engine),
    })
}
