//! The singleton presentational caret element owned by the engine.
//!
//! The overlay is created lazily on the first valid selection, mutated only
//! by its owning engine, and released when the engine drops. It is
//! non-interactive by contract: the presentation layer must render it
//! click-through. Blinking is purely presentational and never part of the
//! caret state contract.

use std::time::{Duration, Instant};

use crate::color::Rgb;

use super::geometry::{CaretState, Rect};

/// Blink timing: 50% duty cycle over a 1 s period by default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blink {
    pub period: Duration,
    pub duty: f32,
}

impl Default for Blink {
    fn default() -> Self {
        Self {
            period: Duration::from_millis(1000),
            duty: 0.5,
        }
    }
}

impl Blink {
    /// Whether the caret is in the visible half of the cycle at `elapsed`
    /// since the last blink reset.
    pub fn visible_at(&self, elapsed: Duration) -> bool {
        let period = self.period.as_millis().max(1);
        let phase = elapsed.as_millis() % period;
        (phase as f32) < self.duty * period as f32
    }
}

/// The caret overlay element: geometry, visibility, accent, blink phase.
#[derive(Debug, Clone)]
pub struct CaretOverlay {
    geometry: Rect,
    visible: bool,
    color: Rgb,
    blink: Blink,
    blink_reset: Instant,
}

impl CaretOverlay {
    pub fn new(color: Rgb, blink: Blink) -> Self {
        Self {
            geometry: Rect::default(),
            visible: false,
            color,
            blink,
            blink_reset: Instant::now(),
        }
    }

    /// Position the overlay for a newly published caret. Restarts the blink
    /// phase, matching the solid-then-blink behavior of a moved caret.
    pub fn apply(&mut self, caret: CaretState, width: f32, color: Rgb) {
        self.geometry = Rect::new(caret.x, caret.y, width, caret.height);
        self.color = color;
        self.visible = true;
        self.blink_reset = Instant::now();
    }

    /// Hide without touching geometry: visibility is a flag layered over
    /// the caret state, not a destructive reset.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn blink(&self) -> Blink {
        self.blink
    }

    /// Whether the blink cycle currently shows the caret. Meaningful only
    /// while visible.
    pub fn blink_on(&self) -> bool {
        self.blink.visible_at(self.blink_reset.elapsed())
    }
}
