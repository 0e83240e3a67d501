//! Optional early-fetch signaling for `.woff2` resources.
//!
//! A hint tells the presentation layer to warm the connection before the
//! full decode, trimming first-paint latency. Purely an optimization: the
//! default sink drops hints. Each URL is hinted at most once per manager.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::typeface::FontUrl;

/// Receives deduplicated preload hints.
pub trait PreloadSink: Send + Sync {
    fn preload(&self, url: &FontUrl);
}

/// Default sink: no preloading.
pub struct NoopSink;

impl PreloadSink for NoopSink {
    fn preload(&self, _url: &FontUrl) {}
}

/// Test/CLI sink that records every hint it receives.
#[derive(Default)]
pub struct CollectingSink {
    urls: Mutex<Vec<FontUrl>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hinted(&self) -> Vec<FontUrl> {
        self.urls.lock().clone()
    }
}

impl PreloadSink for CollectingSink {
    fn preload(&self, url: &FontUrl) {
        self.urls.lock().push(url.clone());
    }
}

/// Emits at most one hint per URL, and only for `.woff2` resources.
pub struct PreloadPlanner {
    sink: Arc<dyn PreloadSink>,
    seen: Mutex<HashSet<FontUrl>>,
}

impl PreloadPlanner {
    pub fn new(sink: Arc<dyn PreloadSink>) -> Self {
        Self {
            sink,
            seen: Mutex::new(HashSet::new()),
        }
    }

    pub fn hint(&self, url: &FontUrl) {
        if !url.is_woff2() {
            return;
        }
        if self.seen.lock().insert(url.clone()) {
            self.sink.preload(url);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn hints_deduplicated_per_url() {
        let sink = Arc::new(CollectingSink::new());
        let planner = PreloadPlanner::new(sink.clone());

        let url = FontUrl::normalize("//cdn/a.woff2");
        planner.hint(&url);
        planner.hint(&url);
        planner.hint(&FontUrl::normalize("//cdn/b.woff2"));

        let hinted = sink.hinted();
        assert_eq!(hinted.len(), 2);
        assert_eq!(hinted[0].as_str(), "https://cdn/a.woff2");
    }

    #[test]
    fn only_woff2_is_hinted() {
        let sink = Arc::new(CollectingSink::new());
        let planner = PreloadPlanner::new(sink.clone());

        planner.hint(&FontUrl::normalize("//cdn/a.ttf"));
        planner.hint(&FontUrl::normalize("//cdn/a.otf"));

        assert!(sink.hinted().is_empty());
    }
}
