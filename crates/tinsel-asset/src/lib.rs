//! Tinsel Asset - Bitmap decoding and the shared sprite cache
//!
//! Image-backed particle shapes (bubble and snowflake sprites) read their
//! bitmaps from a process-wide cache that is populated asynchronously.
//! "Not loaded yet" is a normal state, not an error: effects fall back to
//! procedural drawing until a bitmap becomes ready.

mod bitmap;
mod loader;

pub use bitmap::{Bitmap, BitmapHandle};
pub use loader::{AssetKind, AssetLoader};
