//! Font resource fetching, kept behind a trait so the embedder picks the
//! transport.
//!
//! No transport is baked in: the embedder injects whatever fetches its URLs
//! (an HTTP client in a real deployment). [`FileFetcher`] covers local
//! manifests, `file:` URLs, and tests.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::typeface::FontUrl;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("fetch {url}: {source}")]
    Io {
        url: String,
        #[source]
        source: std::io::Error,
    },
    #[error("no transport for {url}")]
    UnsupportedScheme { url: String },
}

/// Fetches raw font bytes for a URL. Implementations must be shareable
/// across load workers.
pub trait FontFetcher: Send + Sync {
    fn fetch(&self, url: &FontUrl) -> Result<Vec<u8>, FetchError>;
}

/// Resolves URLs against a local directory. `file:` URLs are stripped of
/// their scheme; bare paths are joined to the root; remote schemes error.
pub struct FileFetcher {
    root: PathBuf,
}

impl FileFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, url: &FontUrl) -> Result<PathBuf, FetchError> {
        let raw = url.as_str();
        if let Some(path) = raw.strip_prefix("file://") {
            return Ok(PathBuf::from(path));
        }
        if raw.starts_with("http://") || raw.starts_with("https://") {
            return Err(FetchError::UnsupportedScheme {
                url: raw.to_owned(),
            });
        }
        let path = Path::new(raw);
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            Ok(self.root.join(path))
        }
    }
}

impl FontFetcher for FileFetcher {
    fn fetch(&self, url: &FontUrl) -> Result<Vec<u8>, FetchError> {
        let path = self.resolve(url)?;
        std::fs::read(&path).map_err(|source| FetchError::Io {
            url: url.as_str().to_owned(),
            source,
        })
    }
}
