//! Tinsel Render - Drawing surface abstraction and paint primitives
//!
//! The engine paints frames against the `Canvas` trait, a Canvas2D-shaped
//! contract covering exactly the operations the particle shapes need.
//! `DisplayList` is the built-in implementation: it records each frame as a
//! `DrawCommand` stream for a backend adapter (window, GPU, terminal) to
//! replay, and doubles as the assertion surface in tests.

mod canvas;
mod display_list;
pub mod primitives;

pub use canvas::Canvas;
pub use display_list::{DisplayList, DrawCommand};
