//! Cancellable background extraction for the glyph gallery.
//!
//! Navigating away from a typeface view drops (or cancels) the handle;
//! a completion arriving after that is a no-op, not an error.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread::JoinHandle;

use log::{debug, warn};

use crate::loader::FontFetcher;
use crate::typeface::FontUrl;

use super::{ExtractError, Glyph, extract};

/// Handle to one in-flight extraction.
pub struct ExtractionHandle {
    cancelled: Arc<AtomicBool>,
    results: mpsc::Receiver<Result<Vec<Glyph>, ExtractError>>,
    thread: Option<JoinHandle<()>>,
}

impl ExtractionHandle {
    /// Start extracting on a worker thread.
    pub fn spawn(fetcher: Arc<dyn FontFetcher>, url: FontUrl) -> Self {
        let cancelled = Arc::new(AtomicBool::new(false));
        let (tx, rx) = mpsc::channel();

        let flag = Arc::clone(&cancelled);
        let spawned = std::thread::Builder::new()
            .name("glyph-extract".into())
            .spawn(move || {
                let result = extract(fetcher.as_ref(), &url);
                if flag.load(Ordering::SeqCst) {
                    debug!("glyphs: extraction of {url} finished after cancel, dropping");
                    return;
                }
                // Receiver may already be gone; nothing else to clean up.
                let _ = tx.send(result);
            });

        let thread = match spawned {
            Ok(thread) => Some(thread),
            Err(err) => {
                warn!("glyphs: could not spawn extraction worker: {err}");
                None
            }
        };

        Self {
            cancelled,
            results: rx,
            thread,
        }
    }

    /// Mark the task cancelled. The worker's completion becomes a no-op.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Non-blocking poll for the result.
    pub fn try_result(&self) -> Option<Result<Vec<Glyph>, ExtractError>> {
        self.results.try_recv().ok()
    }

    /// Wait for the worker and return its result, unless cancelled.
    pub fn join(mut self) -> Option<Result<Vec<Glyph>, ExtractError>> {
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
        self.results.try_recv().ok()
    }
}

impl Drop for ExtractionHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
