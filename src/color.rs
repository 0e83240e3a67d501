//! Accent color parsing and contrast color selection.

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
pub const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};

impl Rgb {
    /// Perceived brightness on a 0–255 scale (ITU-R BT.601 luma weights).
    pub fn brightness(self) -> u32 {
        (u32::from(self.r) * 299 + u32::from(self.g) * 587 + u32::from(self.b) * 114) / 1000
    }

    /// Format as "#RRGGBB".
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Parse "#RRGGBB" or "#RGB" to [`Rgb`]. Returns `None` on invalid input.
pub fn parse_hex_color(s: &str) -> Option<Rgb> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    let bytes = hex.as_bytes();
    match bytes.len() {
        6 => {
            let r = u8::from_str_radix(std::str::from_utf8(&bytes[0..2]).ok()?, 16).ok()?;
            let g = u8::from_str_radix(std::str::from_utf8(&bytes[2..4]).ok()?, 16).ok()?;
            let b = u8::from_str_radix(std::str::from_utf8(&bytes[4..6]).ok()?, 16).ok()?;
            Some(Rgb { r, g, b })
        }
        3 => {
            let r = u8::from_str_radix(std::str::from_utf8(&bytes[0..1]).ok()?, 16).ok()?;
            let g = u8::from_str_radix(std::str::from_utf8(&bytes[1..2]).ok()?, 16).ok()?;
            let b = u8::from_str_radix(std::str::from_utf8(&bytes[2..3]).ok()?, 16).ok()?;
            Some(Rgb {
                r: r * 17,
                g: g * 17,
                b: b * 17,
            })
        }
        _ => None,
    }
}

/// Pick black or white text for display on top of `background`.
///
/// Bright accents (brightness > 150) get black text, dark ones get white.
pub fn contrast_color(background: Rgb) -> Rgb {
    if background.brightness() > 150 {
        BLACK
    } else {
        WHITE
    }
}
