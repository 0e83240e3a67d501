use std::sync::Arc;
use std::time::Duration;

use super::*;
use crate::loader::{FetchError, FontFetcher};

struct FakeSet {
    records: Vec<GlyphRecord>,
}

impl EnumerateGlyphs for FakeSet {
    fn for_each_glyph(&self, visit: &mut dyn FnMut(GlyphRecord)) {
        for record in &self.records {
            visit(record.clone());
        }
    }
}

impl ListGlyphs for FakeSet {
    fn all_glyphs(&self) -> Vec<GlyphRecord> {
        self.records.clone()
    }
}

fn record(name: &str, unicode: Option<u32>, commands: usize) -> GlyphRecord {
    GlyphRecord {
        name: name.to_owned(),
        unicode,
        path_data: if commands > 0 { "M0 0Z".into() } else { String::new() },
        path_commands: commands,
        advance_width: Some(500.0),
    }
}

/// Fetcher that must never be reached.
struct PanicFetcher;

impl FontFetcher for PanicFetcher {
    fn fetch(&self, url: &FontUrl) -> Result<Vec<u8>, FetchError> {
        panic!("unexpected fetch of {url}");
    }
}

struct StaticFetcher(Vec<u8>);

impl FontFetcher for StaticFetcher {
    fn fetch(&self, _url: &FontUrl) -> Result<Vec<u8>, FetchError> {
        Ok(self.0.clone())
    }
}

fn be16(buf: &mut Vec<u8>, v: u16) {
    buf.extend_from_slice(&v.to_be_bytes());
}

fn bi16(buf: &mut Vec<u8>, v: i16) {
    buf.extend_from_slice(&v.to_be_bytes());
}

fn be32(buf: &mut Vec<u8>, v: u32) {
    buf.extend_from_slice(&v.to_be_bytes());
}

/// A minimal two-glyph TrueType font: an empty `.notdef` and a triangle
/// mapped to 'A', on a 1000-unit grid with advance 600.
fn sample_font() -> Vec<u8> {
    let mut head = Vec::new();
    be32(&mut head, 0x0001_0000); // version
    be32(&mut head, 0); // font revision
    be32(&mut head, 0); // checksum adjustment
    be32(&mut head, 0x5F0F_3CF5); // magic
    be16(&mut head, 0); // flags
    be16(&mut head, 1000); // units per em
    head.extend_from_slice(&[0; 16]); // created + modified
    for v in [0, 0, 700, 700] {
        bi16(&mut head, v); // font bbox
    }
    be16(&mut head, 0); // mac style
    be16(&mut head, 8); // lowest rec ppem
    bi16(&mut head, 2); // font direction hint
    bi16(&mut head, 0); // index-to-loc format: short
    bi16(&mut head, 0); // glyph data format

    let mut hhea = Vec::new();
    be32(&mut hhea, 0x0001_0000);
    bi16(&mut hhea, 800); // ascender
    bi16(&mut hhea, -200); // descender
    bi16(&mut hhea, 0); // line gap
    be16(&mut hhea, 600); // advance width max
    bi16(&mut hhea, 0); // min lsb
    bi16(&mut hhea, 0); // min rsb
    bi16(&mut hhea, 700); // x max extent
    bi16(&mut hhea, 1); // caret slope rise
    bi16(&mut hhea, 0); // caret slope run
    bi16(&mut hhea, 0); // caret offset
    hhea.extend_from_slice(&[0; 8]); // reserved
    bi16(&mut hhea, 0); // metric data format
    be16(&mut hhea, 2); // number of h-metrics

    let mut maxp = Vec::new();
    be32(&mut maxp, 0x0001_0000);
    be16(&mut maxp, 2); // glyph count
    maxp.extend_from_slice(&[0; 26]);

    let mut hmtx = Vec::new();
    be16(&mut hmtx, 500); // .notdef advance
    bi16(&mut hmtx, 0);
    be16(&mut hmtx, 600); // 'A' advance
    bi16(&mut hmtx, 0);

    // Format 4 subtable, Windows Unicode BMP, mapping U+0041 to glyph 1.
    let mut cmap = Vec::new();
    be16(&mut cmap, 0); // table version
    be16(&mut cmap, 1); // encoding record count
    be16(&mut cmap, 3); // platform: Windows
    be16(&mut cmap, 1); // encoding: Unicode BMP
    be32(&mut cmap, 12); // subtable offset
    be16(&mut cmap, 4); // format
    be16(&mut cmap, 32); // length
    be16(&mut cmap, 0); // language
    be16(&mut cmap, 4); // segCountX2
    be16(&mut cmap, 4); // search range
    be16(&mut cmap, 1); // entry selector
    be16(&mut cmap, 0); // range shift
    be16(&mut cmap, 0x0041); // end codes
    be16(&mut cmap, 0xFFFF);
    be16(&mut cmap, 0); // reserved pad
    be16(&mut cmap, 0x0041); // start codes
    be16(&mut cmap, 0xFFFF);
    be16(&mut cmap, 0xFFC0); // id delta: 0x41 + 0xFFC0 = glyph 1
    be16(&mut cmap, 1);
    be16(&mut cmap, 0); // id range offsets
    be16(&mut cmap, 0);

    // Glyph 1: one closed triangle, all points on-curve with i16 deltas.
    let mut glyf = Vec::new();
    bi16(&mut glyf, 1); // contour count
    for v in [0, 0, 700, 700] {
        bi16(&mut glyf, v); // glyph bbox
    }
    be16(&mut glyf, 2); // last point index
    be16(&mut glyf, 0); // instruction length
    glyf.extend_from_slice(&[1, 1, 1]); // on-curve flags
    for dx in [0, 500, 200] {
        bi16(&mut glyf, dx); // x: 0, 500, 700
    }
    for dy in [0, 700, -700] {
        bi16(&mut glyf, dy); // y: 0, 700, 0
    }
    glyf.push(0); // pad to even length

    let mut loca = Vec::new();
    be16(&mut loca, 0); // .notdef: empty
    be16(&mut loca, 0);
    be16(&mut loca, (glyf.len() / 2) as u16);

    let tables: [(&[u8; 4], &Vec<u8>); 7] = [
        (b"cmap", &cmap),
        (b"glyf", &glyf),
        (b"head", &head),
        (b"hhea", &hhea),
        (b"hmtx", &hmtx),
        (b"loca", &loca),
        (b"maxp", &maxp),
    ];

    let mut font = Vec::new();
    be32(&mut font, 0x0001_0000); // sfnt version
    be16(&mut font, 7); // table count
    be16(&mut font, 64); // search range
    be16(&mut font, 2); // entry selector
    be16(&mut font, 48); // range shift
    let mut offset = (12 + 16 * tables.len()) as u32;
    for (tag, data) in &tables {
        font.extend_from_slice(*tag);
        be32(&mut font, 0); // checksum, not verified
        be32(&mut font, offset);
        be32(&mut font, data.len() as u32);
        offset += data.len() as u32;
    }
    for (_, data) in &tables {
        font.extend_from_slice(data);
    }
    font
}

struct SlowFailingFetcher;

impl FontFetcher for SlowFailingFetcher {
    fn fetch(&self, url: &FontUrl) -> Result<Vec<u8>, FetchError> {
        std::thread::sleep(Duration::from_millis(30));
        Err(FetchError::Io {
            url: url.as_str().to_owned(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        })
    }
}

#[test]
fn glyph_ordering_assigned_then_unassigned() {
    let records = vec![
        record("A", Some(65), 2),
        record("X", None, 2),
        record("B", Some(66), 2),
        record("Y", None, 2),
    ];
    let glyphs = assemble(records, 1000);
    let names: Vec<&str> = glyphs.iter().map(|g| g.name.as_str()).collect();
    // Assigned ascending; unassigned appended last in enumeration order.
    assert_eq!(names, ["A", "B", "X", "Y"]);
    assert_eq!(glyphs[0].unicode, Some(65));
    assert_eq!(glyphs[2].unicode, None);
}

#[test]
fn unicode_order_beats_enumeration_order() {
    let records = vec![record("B", Some(66), 1), record("A", Some(65), 1)];
    let glyphs = assemble(records, 1000);
    assert_eq!(glyphs[0].name, "A");
    assert_eq!(glyphs[1].name, "B");
}

#[test]
fn empty_outlines_filtered_even_with_unicode() {
    let records = vec![
        record("space", Some(32), 0),
        record("A", Some(65), 3),
        record(".notdef", None, 0),
    ];
    let glyphs = assemble(records, 1000);
    assert_eq!(glyphs.len(), 1);
    assert_eq!(glyphs[0].name, "A");
}

#[test]
fn missing_advance_falls_back_to_units_per_em() {
    let mut r = record("A", Some(65), 1);
    r.advance_width = None;
    let glyphs = assemble(vec![r], 2048);
    assert_eq!(glyphs[0].advance_width, 2048.0);
    assert_eq!(glyphs[0].units_per_em, 2048);
}

#[test]
fn zero_advance_falls_back_to_units_per_em() {
    // Combining marks report a zero advance; the view box must keep a
    // nonzero width.
    let mut r = record("acutecomb", Some(0x0301), 1);
    r.advance_width = Some(0.0);
    let glyphs = assemble(vec![r], 1000);
    assert_eq!(glyphs[0].advance_width, 1000.0);
    assert_eq!(glyphs[0].view_box(), "0 0 1000 1000");
}

#[test]
fn capability_shapes_are_equivalent() {
    let set = FakeSet {
        records: vec![record("A", Some(65), 1), record("X", None, 1)],
    };
    let via_callback = GlyphSource::Callback(&set).collect();
    let via_listing = GlyphSource::Listing(&set).collect();
    assert_eq!(via_callback, via_listing);
}

#[test]
fn unsupported_extension_short_circuits() {
    let glyphs = extract(&PanicFetcher, &FontUrl::normalize("//cdn/f.svg")).unwrap();
    assert!(glyphs.is_empty());
    let glyphs = extract(&PanicFetcher, &FontUrl::normalize("//cdn/f.woff2")).unwrap();
    assert!(glyphs.is_empty());
}

#[test]
fn extracts_glyphs_from_binary_font() {
    let fetcher = StaticFetcher(sample_font());
    let glyphs = extract(&fetcher, &FontUrl::normalize("sample.ttf")).unwrap();

    // The empty .notdef is filtered; only the mapped triangle survives.
    assert_eq!(glyphs.len(), 1);
    let glyph = &glyphs[0];
    assert_eq!(glyph.unicode, Some(0x41));
    assert_eq!(glyph.advance_width, 600.0);
    assert_eq!(glyph.units_per_em, 1000);
    // No name table, so the glyph id fallback applies.
    assert_eq!(glyph.name, "gid1");
    assert_eq!(glyph.path_data, "M0 0L500 700L700 0Z");
}

#[test]
fn parse_failure_is_reported() {
    let fetcher = StaticFetcher(b"definitely not a font".to_vec());
    let err = extract(&fetcher, &FontUrl::normalize("f.ttf")).unwrap_err();
    assert!(matches!(err, ExtractError::Parse(_)));
}

#[test]
fn fetch_failure_is_reported() {
    let err = extract(&SlowFailingFetcher, &FontUrl::normalize("f.ttf")).unwrap_err();
    assert!(matches!(err, ExtractError::Fetch(_)));
}

#[test]
fn svg_document_flips_vertically() {
    let glyph = Glyph {
        name: "A".into(),
        unicode: Some(65),
        path_data: "M0 0L500 700Z".into(),
        advance_width: 500.0,
        units_per_em: 1000,
    };
    assert_eq!(glyph.view_box(), "0 0 500 1000");
    let svg = svg_document(&glyph, 48.0);
    assert!(svg.contains(r#"viewBox="0 0 500 1000""#));
    assert!(svg.contains("scale(1 -1)"));
    assert!(svg.contains(r#"d="M0 0L500 700Z""#));
}

#[test]
fn cancelled_extraction_is_a_no_op() {
    let handle = ExtractionHandle::spawn(
        Arc::new(SlowFailingFetcher),
        FontUrl::normalize("slow.ttf"),
    );
    handle.cancel();
    // Worker completes after the cancel and must not deliver a result.
    assert!(handle.join().is_none());
}

#[test]
fn uncancelled_extraction_delivers_result() {
    let handle = ExtractionHandle::spawn(
        Arc::new(StaticFetcher(b"garbage".to_vec())),
        FontUrl::normalize("f.ttf"),
    );
    match handle.join() {
        Some(Err(ExtractError::Parse(_))) => {}
        other => panic!("expected parse error, got {other:?}"),
    }
}
