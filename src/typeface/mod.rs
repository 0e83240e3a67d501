//! Typeface content records and descriptor resolution.
//!
//! The content collaborator (a headless CMS) supplies raw records: a family
//! name, optional preview text and accent color, and a list of font files
//! with optional style names and URLs. `resolve()` turns each record into an
//! immutable [`FontFileDescriptor`]; records without any usable URL are
//! skipped, not errors.

mod descriptor;
mod url;

pub use descriptor::{FontFileDescriptor, FontIdentity, FontStyle, FontWeight, resolve};
pub use url::FontUrl;

use serde::Deserialize;

use crate::color::{self, Rgb};

/// Fallback preview text when the content record supplies none.
pub const DEFAULT_PREVIEW_TEXT: &str = "The quick brown fox jumps over the lazy dog. 0123456789";

/// One font file as delivered by the content collaborator.
///
/// Field aliases accept the collaborator's camelCase wire names.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FontFileRecord {
    #[serde(alias = "styleName")]
    pub style_name: Option<String>,
    #[serde(alias = "fileUrl")]
    pub file_url: Option<String>,
    #[serde(alias = "webFontUrl")]
    pub web_font_url: Option<String>,
    #[serde(alias = "sourceFontUrl")]
    pub source_font_url: Option<String>,
    #[serde(alias = "isPrimary")]
    pub is_primary: bool,
}

/// A typeface as delivered by the content collaborator.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TypefaceRecord {
    #[serde(alias = "familyName")]
    pub family_name: String,
    #[serde(alias = "previewText")]
    pub preview_text: Option<String>,
    /// Accent color as a "#RRGGBB" hex string.
    #[serde(alias = "accentColor")]
    pub accent_color: Option<String>,
    #[serde(alias = "fontFiles")]
    pub font_files: Vec<FontFileRecord>,
}

/// A typeface with its font files resolved into descriptors.
#[derive(Debug, Clone)]
pub struct Typeface {
    pub family: String,
    pub preview_text: String,
    pub accent: Rgb,
    /// Resolved styles, in record order. Unresolvable records are dropped.
    pub styles: Vec<FontFileDescriptor>,
}

impl Typeface {
    /// Resolve a content record into a typeface.
    pub fn from_record(record: &TypefaceRecord) -> Self {
        let family = record.family_name.trim().to_owned();
        let styles = record
            .font_files
            .iter()
            .filter_map(|file| resolve(&family, file))
            .collect();
        let accent = record
            .accent_color
            .as_deref()
            .and_then(color::parse_hex_color)
            .unwrap_or(color::BLACK);
        let preview_text = match record.preview_text.as_deref() {
            Some(text) if !text.is_empty() => text.to_owned(),
            _ => DEFAULT_PREVIEW_TEXT.to_owned(),
        };
        Self {
            family,
            preview_text,
            accent,
            styles,
        }
    }

    /// The style marked primary, or the first style when none is marked.
    pub fn primary(&self) -> Option<&FontFileDescriptor> {
        self.styles
            .iter()
            .find(|d| d.is_primary)
            .or_else(|| self.styles.first())
    }

    /// Look up a style by its style name.
    pub fn style(&self, style_name: &str) -> Option<&FontFileDescriptor> {
        self.styles.iter().find(|d| d.style_name == style_name)
    }
}
