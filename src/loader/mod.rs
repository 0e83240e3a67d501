//! Font load management: each descriptor is fetched, decoded, and
//! registered exactly once, with per-descriptor state published over a
//! channel.
//!
//! `load_all` never blocks the caller: each descriptor gets a worker thread
//! that fetches and decodes on its own, catches its own failures, and joins
//! the shared registry when done. One font failing never blocks siblings.

mod decode;
mod fetch;
mod hints;
mod registry;

pub use decode::{DecodeError, FontFormat, sniff};
pub use fetch::{FetchError, FileFetcher, FontFetcher};
pub use hints::{CollectingSink, NoopSink, PreloadPlanner, PreloadSink};
pub use registry::{FontRegistry, FontResource, SharedRegistry};

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::mpsc;
use std::thread::JoinHandle;

use log::{debug, info, warn};
use parking_lot::Mutex;
use thiserror::Error;

use crate::typeface::FontFileDescriptor;

/// Per-descriptor load state. Transitions run forward only; `Failed` is
/// terminal for one attempt, and a later `load_all` over the same
/// descriptor starts a fresh attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Unloaded,
    Loading,
    Loaded,
    Failed,
}

/// A state transition for one descriptor, delivered on the update channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadEvent {
    pub id: String,
    pub state: LoadState,
}

/// Why a single descriptor's load attempt failed. Caught inside the worker
/// and converted to `LoadState::Failed`; never propagates to the caller.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

#[derive(Debug, Clone)]
struct Entry {
    family: String,
    state: LoadState,
}

/// Loads descriptors into the shared registry, tracking per-id state.
///
/// Created per typeface view; the registry it feeds outlives it. Dropping
/// the event receiver is safe: late worker completions still update the
/// registry but their events go nowhere.
pub struct FontLoadManager {
    registry: Arc<dyn FontRegistry>,
    fetcher: Arc<dyn FontFetcher>,
    states: Arc<Mutex<HashMap<String, Entry>>>,
    events: mpsc::Sender<LoadEvent>,
    hints: PreloadPlanner,
}

/// Handle to one `load_all` fan-out. Dropping it detaches the workers;
/// `wait()` joins them (tests and the CLI).
pub struct LoadBatch {
    handles: Vec<JoinHandle<()>>,
}

impl LoadBatch {
    pub fn wait(self) {
        for handle in self.handles {
            let _ = handle.join();
        }
    }
}

impl FontLoadManager {
    pub fn new(
        registry: Arc<dyn FontRegistry>,
        fetcher: Arc<dyn FontFetcher>,
    ) -> (Self, mpsc::Receiver<LoadEvent>) {
        let (tx, rx) = mpsc::channel();
        (
            Self {
                registry,
                fetcher,
                states: Arc::new(Mutex::new(HashMap::new())),
                events: tx,
                hints: PreloadPlanner::new(Arc::new(NoopSink)),
            },
            rx,
        )
    }

    /// Route preload hints somewhere useful instead of dropping them.
    #[must_use]
    pub fn with_preload_sink(mut self, sink: Arc<dyn PreloadSink>) -> Self {
        self.hints = PreloadPlanner::new(sink);
        self
    }

    /// Load every descriptor that is not already loaded or loading.
    ///
    /// Idempotent: a descriptor whose identity the registry already reports
    /// registered is marked `Loaded` without new work, so repeated calls
    /// with overlapping descriptor sets never re-fetch.
    pub fn load_all(&self, descriptors: &[FontFileDescriptor]) -> LoadBatch {
        let mut handles = Vec::new();

        for desc in descriptors {
            let Some(display_url) = desc.display_url.clone() else {
                // Source-only style: nothing to load for preview.
                debug!("loader: {} has no display url, skipping", desc.id);
                continue;
            };

            let identity = desc.identity();
            if self.registry.is_registered(&identity) {
                self.set_state(&desc.id, &desc.family, LoadState::Loaded);
                continue;
            }

            {
                let mut states = self.states.lock();
                match states.get(&desc.id).map(|e| e.state) {
                    // At most one concurrent attempt per id.
                    Some(LoadState::Loading) | Some(LoadState::Loaded) => continue,
                    _ => {
                        states.insert(
                            desc.id.clone(),
                            Entry {
                                family: desc.family.clone(),
                                state: LoadState::Loading,
                            },
                        );
                    }
                }
            }
            let _ = self.events.send(LoadEvent {
                id: desc.id.clone(),
                state: LoadState::Loading,
            });

            self.hints.hint(&display_url);

            let registry = Arc::clone(&self.registry);
            let fetcher = Arc::clone(&self.fetcher);
            let states = Arc::clone(&self.states);
            let events = self.events.clone();
            let id = desc.id.clone();

            let spawned = std::thread::Builder::new()
                .name("font-load".into())
                .spawn(move || {
                    let result = (|| -> Result<(), LoadError> {
                        let bytes = fetcher.fetch(&display_url)?;
                        let format = sniff(&bytes)?;
                        registry.register(
                            identity,
                            FontResource {
                                format,
                                bytes: Arc::new(bytes),
                            },
                        );
                        Ok(())
                    })();

                    let state = match result {
                        Ok(()) => {
                            info!("loader: loaded {id}");
                            LoadState::Loaded
                        }
                        Err(err) => {
                            warn!("loader: failed to load {id}: {err}");
                            LoadState::Failed
                        }
                    };
                    if let Some(entry) = states.lock().get_mut(&id) {
                        entry.state = state;
                    }
                    // Receiver may be gone (view unmounted); the registry
                    // update above already happened and stays valid.
                    let _ = events.send(LoadEvent { id, state });
                });

            match spawned {
                Ok(handle) => handles.push(handle),
                Err(err) => {
                    warn!("loader: could not spawn worker for {}: {err}", desc.id);
                    self.set_state(&desc.id, &desc.family, LoadState::Failed);
                }
            }
        }

        LoadBatch { handles }
    }

    /// Current state for a descriptor id.
    pub fn state(&self, id: &str) -> LoadState {
        self.states
            .lock()
            .get(id)
            .map(|e| e.state)
            .unwrap_or_default()
    }

    /// Whether any style of `family` has finished loading. This is the
    /// signal for switching away from the generic fallback family.
    pub fn is_loaded(&self, family: &str) -> bool {
        self.states
            .lock()
            .values()
            .any(|e| e.family == family && e.state == LoadState::Loaded)
    }

    /// Snapshot of every tracked descriptor's state.
    pub fn snapshot(&self) -> HashMap<String, LoadState> {
        self.states
            .lock()
            .iter()
            .map(|(id, e)| (id.clone(), e.state))
            .collect()
    }

    fn set_state(&self, id: &str, family: &str, state: LoadState) {
        self.states.lock().insert(
            id.to_owned(),
            Entry {
                family: family.to_owned(),
                state,
            },
        );
        let _ = self.events.send(LoadEvent {
            id: id.to_owned(),
            state,
        });
    }
}
