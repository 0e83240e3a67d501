//! Font URL normalization and file-format detection.

use std::fmt;

/// A normalized reference to a remote font file.
///
/// Protocol-relative URLs (`//host/path`) are completed to `https://` at
/// construction; anything else passes through unchanged. Content records
/// routinely carry protocol-relative asset URLs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontUrl(String);

impl FontUrl {
    /// Normalize a raw URL string from a content record.
    pub fn normalize(raw: &str) -> Self {
        if let Some(rest) = raw.strip_prefix("//") {
            Self(format!("https://{rest}"))
        } else {
            Self(raw.to_owned())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The lowercased file extension, with any query or fragment stripped.
    pub fn extension(&self) -> Option<String> {
        let path = self.0.split(['?', '#']).next().unwrap_or(&self.0);
        let (_, ext) = path.rsplit_once('.')?;
        if ext.is_empty() || ext.contains('/') {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }

    /// Whether this points at a web-optimized WOFF2 resource.
    pub fn is_woff2(&self) -> bool {
        self.extension().as_deref() == Some("woff2")
    }

    /// Whether this points at a binary outline format the glyph pipeline
    /// can parse (`.ttf` / `.otf`, case-insensitive).
    pub fn has_outline_extension(&self) -> bool {
        matches!(self.extension().as_deref(), Some("ttf") | Some("otf"))
    }
}

impl fmt::Display for FontUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_relative_completed() {
        let url = FontUrl::normalize("//cdn.example.com/fonts/Foo.woff2");
        assert_eq!(url.as_str(), "https://cdn.example.com/fonts/Foo.woff2");
    }

    #[test]
    fn absolute_url_unchanged() {
        let url = FontUrl::normalize("https://cdn.example.com/Foo.ttf");
        assert_eq!(url.as_str(), "https://cdn.example.com/Foo.ttf");
        let path = FontUrl::normalize("fonts/Foo.ttf");
        assert_eq!(path.as_str(), "fonts/Foo.ttf");
    }

    #[test]
    fn extension_ignores_query() {
        let url = FontUrl::normalize("https://x/Foo.TTF?dl=1#frag");
        assert_eq!(url.extension().as_deref(), Some("ttf"));
        assert!(url.has_outline_extension());
    }

    #[test]
    fn extension_detection() {
        assert!(FontUrl::normalize("a/b.woff2").is_woff2());
        assert!(!FontUrl::normalize("a/b.woff").is_woff2());
        assert!(FontUrl::normalize("a/B.OTF").has_outline_extension());
        assert!(!FontUrl::normalize("a/b.svg").has_outline_extension());
        assert_eq!(FontUrl::normalize("no-extension").extension(), None);
        assert_eq!(FontUrl::normalize("dir.d/file").extension(), None);
    }
}
