//! Process-wide bitmap cache with deduplicated background loading

use crate::bitmap::{Bitmap, BitmapHandle};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use tinsel_core::FxRng;

/// Sprite category, used to namespace `pick_random`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Bubble,
    Snowflake,
}

impl AssetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Bubble => "bubble",
            AssetKind::Snowflake => "snowflake",
        }
    }
}

struct Entry {
    kind: AssetKind,
    handle: BitmapHandle,
}

/// Shared bitmap cache. Wrap in `Arc` and hand clones to effects.
///
/// Loads run on background decode threads so the frame loop never blocks on
/// them; duplicate requests for the same path share one in-flight load and
/// one cached result. Decode failures are warnings, never errors: the
/// affected handle simply never becomes ready and particles keep their
/// procedural fallback.
pub struct AssetLoader {
    entries: Mutex<HashMap<String, Entry>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    rng: Mutex<FxRng>,
}

impl AssetLoader {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            workers: Mutex::new(Vec::new()),
            rng: Mutex::new(FxRng::from_entropy()),
        }
    }

    /// Request a bitmap. Returns immediately; the handle fills in when the
    /// decode worker finishes. Repeated calls for the same path return the
    /// same underlying handle, whatever its state.
    pub fn load(&self, path: &str, kind: AssetKind) -> BitmapHandle {
        let mut entries = self.entries.lock().expect("asset cache poisoned");
        if let Some(entry) = entries.get(path) {
            return entry.handle.clone();
        }

        let handle = BitmapHandle::pending();
        entries.insert(
            path.to_string(),
            Entry {
                kind,
                handle: handle.clone(),
            },
        );
        drop(entries);

        let worker_handle = handle.clone();
        let worker_path = path.to_string();
        let worker = std::thread::spawn(move || match Bitmap::from_path(&worker_path) {
            Ok(bitmap) => worker_handle.fulfill(Arc::new(bitmap)),
            Err(e) => {
                log::warn!("asset load failed, falling back to procedural drawing: {e}");
                worker_handle.fail();
            }
        });
        self.workers.lock().expect("asset cache poisoned").push(worker);

        handle
    }

    /// Best-effort batch load. Handles whose decode fails never become
    /// ready; the batch itself cannot fail.
    pub fn load_batch(&self, paths: &[&str], kind: AssetKind) -> Vec<BitmapHandle> {
        paths.iter().map(|path| self.load(path, kind)).collect()
    }

    /// Uniform choice among the bitmaps of `kind` that are ready right now.
    /// `None` while nothing is cached (e.g. during the loading window).
    pub fn pick_random(&self, kind: AssetKind) -> Option<Arc<Bitmap>> {
        let entries = self.entries.lock().expect("asset cache poisoned");
        let ready: Vec<Arc<Bitmap>> = entries
            .values()
            .filter(|e| e.kind == kind)
            .filter_map(|e| e.handle.get())
            .collect();
        drop(entries);

        let mut rng = self.rng.lock().expect("asset cache poisoned");
        rng.pick(&ready).cloned()
    }

    /// Insert an already-decoded bitmap (embedded sprites, tests)
    pub fn insert_ready(&self, key: &str, kind: AssetKind, bitmap: Arc<Bitmap>) {
        let mut entries = self.entries.lock().expect("asset cache poisoned");
        entries.insert(
            key.to_string(),
            Entry {
                kind,
                handle: BitmapHandle::ready(bitmap),
            },
        );
    }

    /// True once any bitmap has finished loading
    pub fn is_ready(&self) -> bool {
        let entries = self.entries.lock().expect("asset cache poisoned");
        entries.values().any(|e| e.handle.is_ready())
    }

    /// Number of ready bitmaps of the given kind
    pub fn ready_count(&self, kind: AssetKind) -> usize {
        let entries = self.entries.lock().expect("asset cache poisoned");
        entries
            .values()
            .filter(|e| e.kind == kind && e.handle.is_ready())
            .count()
    }

    /// Join all outstanding decode workers. Callers that want the
    /// best-effort result of a batch call this before inspecting handles.
    pub fn wait_idle(&self) {
        let workers: Vec<JoinHandle<()>> =
            self.workers.lock().expect("asset cache poisoned").drain(..).collect();
        for worker in workers {
            let _ = worker.join();
        }
    }

    /// Drop all cached and in-flight state
    pub fn reset(&self) {
        self.wait_idle();
        self.entries.lock().expect("asset cache poisoned").clear();
    }
}

impl Default for AssetLoader {
    fn default() -> Self {
        Self::new()
    }
}
