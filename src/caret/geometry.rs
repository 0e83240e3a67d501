//! Maps viewport rectangles to surface-relative caret geometry.

/// An axis-aligned rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Caret geometry in the editable surface's coordinate space.
///
/// Fully replaced on each recomputation; never patched incrementally.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CaretState {
    pub x: f32,
    pub y: f32,
    pub height: f32,
}

/// Fixed optical nudge pulling the caret one unit left of the measured
/// range edge.
pub const CARET_NUDGE: f32 = 1.0;

/// Derive caret geometry from a selection-range rectangle and the editable
/// surface's rectangle, both in viewport coordinates.
///
/// The caret height is a cap-height approximation: a fixed proportion of
/// the measured line box rather than its full height.
pub fn caret_geometry(range: Rect, surface: Rect, cap_ratio: f32) -> CaretState {
    CaretState {
        x: range.left - surface.left - CARET_NUDGE,
        y: range.top - surface.top,
        height: range.height * cap_ratio,
    }
}
