//! Decoded bitmaps and the shared read-only handle to them

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use tinsel_core::{Result, TinselError};

/// A decoded RGBA bitmap. Immutable once constructed; always shared as
/// `Arc<Bitmap>`. Particles hold non-owning clones and never touch the pixels.
pub struct Bitmap {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl std::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Bitmap {
    /// Decode a bitmap from disk (any format the `image` crate supports)
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let decoded = image::open(path).map_err(|e| {
            TinselError::Asset(format!("failed to decode {}: {e}", path.display()))
        })?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            width,
            height,
            rgba: rgba.into_raw(),
        })
    }

    /// Build a bitmap from raw RGBA pixels (embedded sprites, tests)
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(TinselError::Asset(format!(
                "pixel buffer is {} bytes, expected {expected} for {width}x{height}",
                rgba.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }
}

/// A non-owning reference to a bitmap that may still be loading.
///
/// `get()` returns `None` until the decode worker fulfills the handle, and
/// forever after a failed load. Readers poll once per frame; the `OnceLock`
/// publish is the only synchronization involved.
#[derive(Clone)]
pub struct BitmapHandle {
    cell: Arc<BitmapCell>,
}

struct BitmapCell {
    slot: OnceLock<Arc<Bitmap>>,
    failed: AtomicBool,
}

impl BitmapHandle {
    /// A handle with no bitmap yet; fulfilled later by a decode worker
    pub fn pending() -> Self {
        Self {
            cell: Arc::new(BitmapCell {
                slot: OnceLock::new(),
                failed: AtomicBool::new(false),
            }),
        }
    }

    /// A handle that is ready immediately
    pub fn ready(bitmap: Arc<Bitmap>) -> Self {
        let handle = Self::pending();
        handle.fulfill(bitmap);
        handle
    }

    pub fn get(&self) -> Option<Arc<Bitmap>> {
        self.cell.slot.get().cloned()
    }

    pub fn is_ready(&self) -> bool {
        self.cell.slot.get().is_some()
    }

    pub fn has_failed(&self) -> bool {
        self.cell.failed.load(Ordering::Acquire)
    }

    pub(crate) fn fulfill(&self, bitmap: Arc<Bitmap>) {
        let _ = self.cell.slot.set(bitmap);
    }

    pub(crate) fn fail(&self) {
        self.cell.failed.store(true, Ordering::Release);
    }
}
