//! Font container sniffing for fetched bytes.
//!
//! The registry consumes decoded font resources; this gate rejects payloads
//! that are not font containers at all (HTML error pages, truncated
//! downloads) so they never reach registration.

use thiserror::Error;

/// Recognized font container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFormat {
    /// TrueType/OpenType single font (`\0\x01\0\0`, `OTTO`, or `true`).
    Sfnt,
    /// TrueType collection (`ttcf`).
    Collection,
    Woff,
    Woff2,
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("font data truncated ({len} bytes)")]
    Truncated { len: usize },
    #[error("unrecognized font container (magic {magic:02x?})")]
    UnrecognizedMagic { magic: [u8; 4] },
}

/// Identify the container format from the leading magic bytes.
pub fn sniff(bytes: &[u8]) -> Result<FontFormat, DecodeError> {
    if bytes.len() < 4 {
        return Err(DecodeError::Truncated { len: bytes.len() });
    }
    let magic = [bytes[0], bytes[1], bytes[2], bytes[3]];
    match &magic {
        [0x00, 0x01, 0x00, 0x00] | b"OTTO" | b"true" => Ok(FontFormat::Sfnt),
        b"ttcf" => Ok(FontFormat::Collection),
        b"wOFF" => Ok(FontFormat::Woff),
        b"wOF2" => Ok(FontFormat::Woff2),
        _ => Err(DecodeError::UnrecognizedMagic { magic }),
    }
}
