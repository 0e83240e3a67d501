//! Resolves raw content records into canonical font references.

use super::FontFileRecord;
use super::url::FontUrl;

/// CSS-style font weight classes, inferred from a style name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum FontWeight {
    Thin = 100,
    ExtraLight = 200,
    Light = 300,
    Regular = 400,
    Medium = 500,
    SemiBold = 600,
    Bold = 700,
    ExtraBold = 800,
    Black = 900,
}

impl FontWeight {
    /// The numeric CSS weight value (100–900).
    pub fn value(self) -> u16 {
        self as u16
    }

    /// Infer a weight from a style name.
    ///
    /// Pure and total: unknown or blank names map to `Regular`. Keywords are
    /// checked most-specific-first so "ExtraBold" resolves to 800 rather
    /// than matching the "bold" substring.
    pub fn from_style_name(style_name: &str) -> Self {
        const KEYWORDS: &[(&str, FontWeight)] = &[
            ("extralight", FontWeight::ExtraLight),
            ("extra light", FontWeight::ExtraLight),
            ("extrabold", FontWeight::ExtraBold),
            ("extra bold", FontWeight::ExtraBold),
            ("semibold", FontWeight::SemiBold),
            ("semi bold", FontWeight::SemiBold),
            ("thin", FontWeight::Thin),
            ("light", FontWeight::Light),
            ("medium", FontWeight::Medium),
            ("bold", FontWeight::Bold),
            ("black", FontWeight::Black),
            ("heavy", FontWeight::Black),
            ("regular", FontWeight::Regular),
        ];

        let lower = style_name.to_lowercase();
        for (keyword, weight) in KEYWORDS {
            if lower.contains(keyword) {
                return *weight;
            }
        }
        FontWeight::Regular
    }
}

/// Upright or italic, inferred from a style name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

impl FontStyle {
    /// Any "italic" substring marks the style italic.
    pub fn from_style_name(style_name: &str) -> Self {
        if style_name.to_lowercase().contains("italic") {
            Self::Italic
        } else {
            Self::Normal
        }
    }
}

/// The identity a font is registered under: family + weight + style.
///
/// Registration in the shared registry is idempotent by this identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontIdentity {
    pub family: String,
    pub weight: FontWeight,
    pub style: FontStyle,
}

/// A resolved, immutable reference to one loadable font style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFileDescriptor {
    /// Composite key, unique within a typeface: `"{family}-{style_name}"`.
    pub id: String,
    pub family: String,
    pub style_name: String,
    /// Web-displayable font for live preview (`.woff2` preferred).
    pub display_url: Option<FontUrl>,
    /// Raw source font for glyph extraction, when one exists.
    pub source_url: Option<FontUrl>,
    pub weight: FontWeight,
    pub style: FontStyle,
    pub is_primary: bool,
}

impl FontFileDescriptor {
    /// The identity this descriptor registers under.
    pub fn identity(&self) -> FontIdentity {
        FontIdentity {
            family: self.family.clone(),
            weight: self.weight,
            style: self.style,
        }
    }
}

/// Resolve a raw content record into a descriptor.
///
/// Returns `None` when the record carries neither a displayable nor a
/// source font URL; that is a normal content state, not an error.
pub fn resolve(family: &str, record: &FontFileRecord) -> Option<FontFileDescriptor> {
    let display_url = record
        .web_font_url
        .as_deref()
        .filter(|s| !s.is_empty())
        .or(record.file_url.as_deref().filter(|s| !s.is_empty()))
        .map(FontUrl::normalize);
    let source_url = record
        .source_font_url
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(FontUrl::normalize);

    if display_url.is_none() && source_url.is_none() {
        return None;
    }

    let style_name = match record.style_name.as_deref().map(str::trim) {
        Some("") | None => "Regular".to_owned(),
        Some(name) => name.to_owned(),
    };
    let family = family.trim();

    Some(FontFileDescriptor {
        id: format!("{family}-{style_name}"),
        family: family.to_owned(),
        weight: FontWeight::from_style_name(&style_name),
        style: FontStyle::from_style_name(&style_name),
        style_name,
        display_url,
        source_url,
        is_primary: record.is_primary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(style: &str, web: Option<&str>) -> FontFileRecord {
        FontFileRecord {
            style_name: Some(style.to_owned()),
            file_url: None,
            web_font_url: web.map(str::to_owned),
            source_font_url: None,
            is_primary: false,
        }
    }

    #[test]
    fn weight_keyword_table() {
        let cases = [
            ("Thin", 100),
            ("ExtraLight", 200),
            ("Extra Light Italic", 200),
            ("Light", 300),
            ("Regular", 400),
            ("", 400),
            ("Medium", 500),
            ("SemiBold", 600),
            ("Semi Bold", 600),
            ("Bold", 700),
            ("ExtraBold", 800),
            ("Extra Bold", 800),
            ("Black", 900),
            ("Heavy", 900),
            ("Display", 400),
        ];
        for (name, expected) in cases {
            assert_eq!(
                FontWeight::from_style_name(name).value(),
                expected,
                "style {name:?}"
            );
        }
    }

    #[test]
    fn extrabold_not_shadowed_by_bold() {
        assert_eq!(FontWeight::from_style_name("ExtraBold"), FontWeight::ExtraBold);
        assert_eq!(FontWeight::from_style_name("SemiBold"), FontWeight::SemiBold);
    }

    #[test]
    fn italic_inference() {
        assert_eq!(FontStyle::from_style_name("Bold Italic"), FontStyle::Italic);
        assert_eq!(FontStyle::from_style_name("BoldItalic"), FontStyle::Italic);
        assert_eq!(FontStyle::from_style_name("Bold"), FontStyle::Normal);
    }

    #[test]
    fn missing_urls_skip_record() {
        let rec = record("Bold", None);
        assert!(resolve("Family", &rec).is_none());
    }

    #[test]
    fn blank_style_defaults_to_regular() {
        let rec = record("  ", Some("//cdn/f.woff2"));
        let desc = resolve("Family", &rec).unwrap();
        assert_eq!(desc.style_name, "Regular");
        assert_eq!(desc.id, "Family-Regular");
        assert_eq!(desc.weight, FontWeight::Regular);
    }

    #[test]
    fn resolve_normalizes_urls_and_trims_family() {
        let rec = record("Bold", Some("//cdn/f-bold.woff2"));
        let desc = resolve(" My Family ", &rec).unwrap();
        assert_eq!(desc.family, "My Family");
        assert_eq!(desc.id, "My Family-Bold");
        assert_eq!(
            desc.display_url.as_ref().unwrap().as_str(),
            "https://cdn/f-bold.woff2"
        );
    }

    #[test]
    fn source_only_record_resolves() {
        let rec = FontFileRecord {
            style_name: Some("Regular".into()),
            file_url: None,
            web_font_url: None,
            source_font_url: Some("fonts/f.ttf".into()),
            is_primary: false,
        };
        let desc = resolve("F", &rec).unwrap();
        assert!(desc.display_url.is_none());
        assert!(desc.source_url.is_some());
    }

    #[test]
    fn identity_ignores_style_name_spelling() {
        let a = resolve("F", &record("Bold", Some("a.woff2"))).unwrap();
        let b = resolve("F", &record("bold", Some("b.woff2"))).unwrap();
        assert_eq!(a.identity(), b.identity());
    }
}
