//! Tinsel Core - Foundational types for the Tinsel cursor-effect engine
//!
//! This crate provides the types every other Tinsel crate depends on:
//! - `Vec2` - Screen-space positions and velocities
//! - `Color` - RGBA colors with CSS-style hex parsing
//! - `FxRng` - The non-seeded particle jitter RNG
//! - Error types and Result alias

mod error;
mod rand;
mod types;

pub use error::{Result, TinselError};
pub use rand::FxRng;
pub use types::{Color, Vec2};
