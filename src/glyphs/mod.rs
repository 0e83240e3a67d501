//! Glyph extraction pipeline: a binary outline font in, an ordered list
//! of render-ready vector glyphs out.
//!
//! Unsupported source formats yield an empty list, not an error: many
//! styles legitimately have no inspectable source file. Parse failures
//! leave the list empty too, never partial output.

mod face;
mod outline;
mod source;
mod task;
#[cfg(test)]
mod tests;

pub use face::ParsedFace;
pub use outline::PathData;
pub use source::{EnumerateGlyphs, GlyphRecord, GlyphSource, ListGlyphs};
pub use task::ExtractionHandle;

use log::{debug, info};
use thiserror::Error;

use crate::loader::{FetchError, FontFetcher};
use crate::typeface::FontUrl;

/// One extracted glyph. Immutable; owned by the requesting view and
/// discarded wholesale when the active style changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub name: String,
    /// Assigned Unicode code point, if any.
    pub unicode: Option<u32>,
    /// Outline as SVG-style path data in design units, y-up.
    pub path_data: String,
    /// Horizontal advance in design units (falls back to units-per-em).
    pub advance_width: f32,
    /// Design-grid resolution, shared by every glyph of the font; the
    /// renderer needs it to establish a consistent viewBox scale.
    pub units_per_em: u16,
}

impl Glyph {
    /// The glyph's drawing box: `0,0` to `advance_width,units_per_em`.
    pub fn view_box(&self) -> String {
        format!("0 0 {} {}", self.advance_width, self.units_per_em)
    }
}

/// Render one glyph as a standalone SVG document at the given size.
///
/// Outline coordinates are y-up, so the shape is flipped vertically into
/// screen space and scaled uniformly.
pub fn svg_document(glyph: &Glyph, render_size: f32) -> String {
    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{vb}" "#,
            r#"width="{size}" height="{size}" preserveAspectRatio="xMidYMid meet">"#,
            r#"<g transform="translate(0 {upem}) scale(1 -1)"><path d="{d}"/></g></svg>"#,
        ),
        vb = glyph.view_box(),
        size = render_size,
        upem = glyph.units_per_em,
        d = glyph.path_data,
    )
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("source font fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("source font parse failed: {0}")]
    Parse(#[from] ttf_parser::FaceParsingError),
}

/// Fetch and parse a source font, returning its glyphs filtered, ordered,
/// and encoded for rendering.
pub fn extract(fetcher: &dyn FontFetcher, url: &FontUrl) -> Result<Vec<Glyph>, ExtractError> {
    if !url.has_outline_extension() {
        // Normal state: no glyph inspector for this style.
        debug!("glyphs: {url} is not an outline font, skipping extraction");
        return Ok(Vec::new());
    }

    let bytes = fetcher.fetch(url)?;
    let face = ParsedFace::parse(&bytes)?;
    let units_per_em = face.units_per_em();
    let glyphs = assemble(GlyphSource::Callback(&face).collect(), units_per_em);
    info!("glyphs: extracted {} glyphs from {url}", glyphs.len());
    Ok(glyphs)
}

/// Filter, order, and finalize raw records.
///
/// Empty placeholder outlines are dropped. Ordering is ascending by code
/// point; glyphs without one sort after all assigned glyphs, keeping their
/// relative enumeration order (stable sort).
fn assemble(records: Vec<GlyphRecord>, units_per_em: u16) -> Vec<Glyph> {
    let mut kept: Vec<GlyphRecord> = records
        .into_iter()
        .filter(|record| record.path_commands > 0)
        .collect();

    kept.sort_by(|a, b| match (a.unicode, b.unicode) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    kept.into_iter()
        .map(|record| Glyph {
            name: record.name,
            unicode: record.unicode,
            path_data: record.path_data,
            // A zero advance (combining marks) counts as absent; the
            // view box must never collapse to zero width.
            advance_width: match record.advance_width {
                Some(advance) if advance > 0.0 => advance,
                _ => f32::from(units_per_em),
            },
            units_per_em,
        })
        .collect()
}
