//! Preview and caret presentation settings.

use serde::{Deserialize, Serialize};

use crate::caret::{Blink, CaretMode};

/// Font size slider bounds, in points.
pub const MIN_FONT_SIZE: f32 = 10.0;
pub const MAX_FONT_SIZE: f32 = 120.0;

/// Default preview font size, in points.
pub const FONT_SIZE: f32 = 36.0;

/// Top-level configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub preview: PreviewConfig,
    pub caret: CaretConfig,
}

/// Live preview surface configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Preview font size in points.
    pub font_size: f32,
    /// Glyph gallery cells are rendered at `font_size * glyph_cell_scale`.
    pub glyph_cell_scale: f32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            font_size: FONT_SIZE,
            glyph_cell_scale: 1.3,
        }
    }
}

impl PreviewConfig {
    /// Returns `font_size` clamped to the slider bounds.
    pub fn effective_font_size(&self) -> f32 {
        self.font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
    }
}

/// Caret overlay configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaretConfig {
    pub mode: CaretMode,
    pub blink_interval_ms: u64,
}

impl Default for CaretConfig {
    fn default() -> Self {
        Self {
            mode: CaretMode::Inline,
            blink_interval_ms: 1000,
        }
    }
}

impl CaretConfig {
    /// Blink descriptor for the configured interval (50% duty cycle).
    pub fn blink(&self) -> Blink {
        Blink {
            period: std::time::Duration::from_millis(self.blink_interval_ms.max(1)),
            duty: 0.5,
        }
    }
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}
