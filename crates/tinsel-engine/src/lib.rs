//! Tinsel Engine - Cursor-following particle simulation
//!
//! Provides the particle lifecycle model and the runtime that drives it:
//! - Per-frame discrete physics (gravity, wobble, wind drift, spin, fade)
//! - Six effect profiles sharing one spawn algorithm, differing only in data
//! - The engine state machine: spawn gating, population bounds, frame loop

mod effect;
mod engine;
mod particle;

pub use effect::{Effect, EffectKind, EffectOptions, SpawnProfile, WobbleRanges};
pub use engine::{
    create_engine, Engine, EngineOptions, EngineState, SurfaceProvider, DEFAULT_MAX_PARTICLES,
    DEFAULT_SPAWN_INTERVAL_MS,
};
pub use particle::{Particle, ParticleConfig, Shape, Wobble};
