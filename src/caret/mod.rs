//! Caret position engine for editable preview surfaces.
//!
//! The engine is a small synchronous state machine: every triggering event
//! recomputes the caret in one turn (no suspension points, so no two
//! recomputations can interleave). The embedder supplies measured
//! rectangles via [`SelectionSnapshot`]; the engine owns the caret overlay
//! and nothing else may write to its geometry.

mod geometry;
mod overlay;

pub use geometry::{CARET_NUDGE, CaretState, Rect, caret_geometry};
pub use overlay::{Blink, CaretOverlay};

use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// Presentation mode. Each mode has one canonical cap-height ratio and one
/// overlay width formula.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaretMode {
    /// Inline tester strip: cap ratio 0.75, width `font_size/20` in 2–8 px.
    #[default]
    Inline,
    /// Large display surface: cap ratio 0.70, width `font_size/12` in 1–4 px.
    Display,
}

impl CaretMode {
    pub fn cap_ratio(self) -> f32 {
        match self {
            Self::Inline => 0.75,
            Self::Display => 0.70,
        }
    }

    /// Overlay width in pixels for the active font size.
    pub fn width(self, font_size: f32) -> f32 {
        match self {
            Self::Inline => (font_size / 20.0).clamp(2.0, 8.0),
            Self::Display => (font_size / 12.0).clamp(1.0, 4.0),
        }
    }
}

/// Engine states over the selection lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EngineState {
    /// No selection, or its anchor lies outside the editable surface.
    #[default]
    NoSelection,
    /// Selection reported but its rectangle has not stabilized yet
    /// (zero-width range right after a focus change). The update is
    /// skipped rather than publishing a zero-sized or stale caret.
    PendingMeasurement,
    ValidSelection,
}

/// What the runtime reports about the current selection, measured in
/// viewport coordinates.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionSnapshot {
    /// Whether the selection's anchor node lies within the surface subtree.
    pub anchor_inside: bool,
    /// Bounding rectangle of the selection's primary range, if one exists.
    pub range_rect: Option<Rect>,
}

/// The named events that drive recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretTrigger {
    TextInput,
    KeyUp,
    PointerUp,
    /// Font size changes move the measured rectangle without moving the
    /// selection, so it re-triggers too.
    FontSizeChanged,
    /// A click anywhere on the page. Outside the surface it only hides the
    /// overlay; the last computed caret numbers are preserved.
    GlobalClick { inside_surface: bool },
}

/// Owns the caret state and overlay for one editable surface.
pub struct CaretEngine {
    mode: CaretMode,
    accent: Rgb,
    font_size: f32,
    blink: Blink,
    surface: Rect,
    state: EngineState,
    caret: CaretState,
    overlay: Option<CaretOverlay>,
}

impl CaretEngine {
    pub fn new(mode: CaretMode, accent: Rgb, font_size: f32) -> Self {
        Self {
            mode,
            accent,
            font_size,
            blink: Blink::default(),
            surface: Rect::default(),
            state: EngineState::NoSelection,
            caret: CaretState::default(),
            overlay: None,
        }
    }

    /// Override the default blink timing (from [`crate::config::CaretConfig`]).
    #[must_use]
    pub fn with_blink(mut self, blink: Blink) -> Self {
        self.blink = blink;
        self
    }

    /// Update the editable surface's measured bounding rectangle.
    pub fn set_surface_rect(&mut self, surface: Rect) {
        self.surface = surface;
    }

    pub fn set_font_size(&mut self, font_size: f32) {
        self.font_size = font_size;
    }

    pub fn set_accent(&mut self, accent: Rgb) {
        self.accent = accent;
    }

    /// Handle a triggering event against the current selection snapshot.
    pub fn handle(&mut self, trigger: CaretTrigger, snapshot: &SelectionSnapshot) {
        match trigger {
            CaretTrigger::GlobalClick {
                inside_surface: false,
            } => {
                if let Some(overlay) = self.overlay.as_mut() {
                    overlay.hide();
                }
            }
            _ => self.recompute(snapshot),
        }
    }

    /// Recompute caret geometry from a selection snapshot. Synchronous;
    /// publishes a fresh `CaretState` or skips the update entirely.
    pub fn recompute(&mut self, snapshot: &SelectionSnapshot) {
        let rect = match snapshot.range_rect {
            Some(rect) if snapshot.anchor_inside => rect,
            _ => {
                self.state = EngineState::NoSelection;
                if let Some(overlay) = self.overlay.as_mut() {
                    overlay.hide();
                }
                return;
            }
        };

        if rect.width == 0.0 {
            // Collapsed cursor with no measurable geometry yet.
            self.state = EngineState::PendingMeasurement;
            return;
        }

        self.caret = caret_geometry(rect, self.surface, self.mode.cap_ratio());
        self.state = EngineState::ValidSelection;

        let width = self.mode.width(self.font_size);
        let accent = self.accent;
        let blink = self.blink;
        self.overlay
            .get_or_insert_with(|| CaretOverlay::new(accent, blink))
            .apply(self.caret, width, accent);
    }

    /// The last computed caret numbers. Preserved across hides.
    pub fn caret(&self) -> CaretState {
        self.caret
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// The overlay, if a valid selection has ever created it.
    pub fn overlay(&self) -> Option<&CaretOverlay> {
        self.overlay.as_ref()
    }

    /// Whether a caret is currently shown.
    pub fn visible(&self) -> bool {
        self.overlay.as_ref().is_some_and(CaretOverlay::is_visible)
    }
}
