//! Interactive typeface preview engine.
//!
//! Three subsystems around one data flow: content records resolve into
//! [`typeface::FontFileDescriptor`]s; the [`loader`] fetches, decodes, and
//! registers each one exactly once while publishing per-descriptor load
//! state; the [`caret`] engine turns live selection measurements into
//! custom caret geometry; and the [`glyphs`] pipeline parses a binary
//! outline font into an ordered, render-ready glyph list. The presentation
//! layer (external) consumes load states, caret overlays, and glyph
//! sequences; everything it needs to inject (transport, registry, preload
//! sinks) is a trait.

pub mod caret;
pub mod color;
pub mod config;
pub mod glyphs;
pub mod loader;
pub mod typeface;
