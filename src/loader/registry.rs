//! Session-wide set of registered fonts.
//!
//! Registration is additive-only and idempotent by family+weight+style
//! identity; fonts are never unregistered during a session. The trait keeps
//! the registry injectable so tests can observe or fake it.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::typeface::FontIdentity;

use super::decode::FontFormat;

/// A decoded, registration-ready font resource.
#[derive(Debug, Clone)]
pub struct FontResource {
    pub format: FontFormat,
    pub bytes: Arc<Vec<u8>>,
}

/// The page-wide font registration set.
///
/// `is_registered` must query live registration state, not a consumer-local
/// cache: a font may have been registered by an earlier, unrelated caller.
pub trait FontRegistry: Send + Sync {
    fn is_registered(&self, identity: &FontIdentity) -> bool;

    /// Register a resource under an identity. A second registration for an
    /// identical identity is a no-op; the first resource wins.
    fn register(&self, identity: FontIdentity, resource: FontResource);
}

/// Process-wide registry backed by a `RwLock` map.
#[derive(Default)]
pub struct SharedRegistry {
    fonts: RwLock<HashMap<FontIdentity, FontResource>>,
}

impl SharedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered identities.
    pub fn len(&self) -> usize {
        self.fonts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.read().is_empty()
    }

    /// Fetch a clone of the registered resource, if any.
    pub fn get(&self, identity: &FontIdentity) -> Option<FontResource> {
        self.fonts.read().get(identity).cloned()
    }
}

impl FontRegistry for SharedRegistry {
    fn is_registered(&self, identity: &FontIdentity) -> bool {
        self.fonts.read().contains_key(identity)
    }

    fn register(&self, identity: FontIdentity, resource: FontResource) {
        self.fonts.write().entry(identity).or_insert(resource);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typeface::{FontStyle, FontWeight};

    fn identity() -> FontIdentity {
        FontIdentity {
            family: "F".into(),
            weight: FontWeight::Regular,
            style: FontStyle::Normal,
        }
    }

    fn resource(bytes: &[u8]) -> FontResource {
        FontResource {
            format: FontFormat::Sfnt,
            bytes: Arc::new(bytes.to_vec()),
        }
    }

    #[test]
    fn register_is_idempotent_first_wins() {
        let registry = SharedRegistry::new();
        assert!(!registry.is_registered(&identity()));

        registry.register(identity(), resource(b"first"));
        registry.register(identity(), resource(b"second"));

        assert!(registry.is_registered(&identity()));
        assert_eq!(registry.len(), 1);
        assert_eq!(&**registry.get(&identity()).unwrap().bytes, b"first");
    }
}
