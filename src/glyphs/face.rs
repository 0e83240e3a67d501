//! ttf-parser backend that enumerates a parsed face as glyph records.

use std::collections::HashMap;

use ttf_parser::{Face, GlyphId};

use super::outline::PathData;
use super::source::{EnumerateGlyphs, GlyphRecord};

/// A parsed outline font plus its reverse character map.
pub struct ParsedFace<'a> {
    face: Face<'a>,
    unicode_by_glyph: HashMap<u16, u32>,
}

impl<'a> ParsedFace<'a> {
    pub fn parse(data: &'a [u8]) -> Result<Self, ttf_parser::FaceParsingError> {
        let face = Face::parse(data, 0)?;
        let unicode_by_glyph = reverse_cmap(&face);
        Ok(Self {
            face,
            unicode_by_glyph,
        })
    }

    /// The design-grid resolution all glyph coordinates share.
    pub fn units_per_em(&self) -> u16 {
        self.face.units_per_em()
    }
}

/// Invert the character map: glyph id to its first assigned code point.
fn reverse_cmap(face: &Face<'_>) -> HashMap<u16, u32> {
    let mut map = HashMap::new();
    let Some(cmap) = face.tables().cmap else {
        return map;
    };
    for subtable in cmap.subtables {
        if !subtable.is_unicode() {
            continue;
        }
        subtable.codepoints(|cp| {
            if let Some(glyph) = subtable.glyph_index(cp) {
                map.entry(glyph.0).or_insert(cp);
            }
        });
    }
    map
}

impl EnumerateGlyphs for ParsedFace<'_> {
    fn for_each_glyph(&self, visit: &mut dyn FnMut(GlyphRecord)) {
        for index in 0..self.face.number_of_glyphs() {
            let glyph = GlyphId(index);
            let mut path = PathData::new();
            // None means the glyph has no outline; the record still flows
            // through so the pipeline's empty-outline filter sees it.
            let _ = self.face.outline_glyph(glyph, &mut path);

            let name = self
                .face
                .glyph_name(glyph)
                .map(str::to_owned)
                .unwrap_or_else(|| format!("gid{index}"));

            visit(GlyphRecord {
                name,
                unicode: self.unicode_by_glyph.get(&index).copied(),
                path_commands: path.commands(),
                path_data: path.into_string(),
                advance_width: self.face.glyph_hor_advance(glyph).map(f32::from),
            });
        }
    }
}
