//! Normalizes the two capability shapes a parser backend may expose.
//!
//! Backends either push glyphs through a visitor callback or hand back a
//! complete listing. [`GlyphSource`] adapts both into one ordered sequence
//! so the pipeline never probes for capabilities ad hoc.

/// One glyph as produced by a backend, before filtering and ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphRecord {
    pub name: String,
    /// Assigned Unicode code point, if any.
    pub unicode: Option<u32>,
    /// Encoded outline in design units.
    pub path_data: String,
    /// Drawing commands in the outline; zero marks an empty placeholder.
    pub path_commands: usize,
    /// Horizontal advance in design units, when the glyph reports one.
    pub advance_width: Option<f32>,
}

/// Callback-enumeration capability.
pub trait EnumerateGlyphs {
    fn for_each_glyph(&self, visit: &mut dyn FnMut(GlyphRecord));
}

/// All-glyphs listing capability.
pub trait ListGlyphs {
    fn all_glyphs(&self) -> Vec<GlyphRecord>;
}

/// A glyph set viewed through whichever capability the backend has.
pub enum GlyphSource<'a> {
    Callback(&'a dyn EnumerateGlyphs),
    Listing(&'a dyn ListGlyphs),
}

impl GlyphSource<'_> {
    /// Normalize either capability into one ordered sequence, preserving
    /// the backend's enumeration order.
    pub fn collect(&self) -> Vec<GlyphRecord> {
        match self {
            Self::Callback(backend) => {
                let mut records = Vec::new();
                backend.for_each_glyph(&mut |record| records.push(record));
                records
            }
            Self::Listing(backend) => backend.all_glyphs(),
        }
    }
}
