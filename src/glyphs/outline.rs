//! Turns ttf-parser outline callbacks into SVG-style path data.
//!
//! Coordinates stay in the font's design units (y-up); the renderer applies
//! the vertical flip. Precision is fixed at two decimal places with
//! trailing zeros trimmed.

use std::fmt::Write;

/// Collects outline drawing commands into a path-data string.
#[derive(Debug, Default)]
pub struct PathData {
    buf: String,
    commands: usize,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of drawing commands recorded (including `Z`).
    pub fn commands(&self) -> usize {
        self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands == 0
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

/// Round to two decimals and render without trailing zeros ("1.50" → "1.5",
/// "2.00" → "2").
fn write_coord(buf: &mut String, value: f32) {
    let rounded = (f64::from(value) * 100.0).round() / 100.0;
    // f64 Display picks the shortest representation that round-trips, which
    // after rounding is at most two decimal places.
    let _ = write!(buf, "{rounded}");
}

fn write_pair(buf: &mut String, x: f32, y: f32) {
    write_coord(buf, x);
    buf.push(' ');
    write_coord(buf, y);
}

impl ttf_parser::OutlineBuilder for PathData {
    fn move_to(&mut self, x: f32, y: f32) {
        self.buf.push('M');
        write_pair(&mut self.buf, x, y);
        self.commands += 1;
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.buf.push('L');
        write_pair(&mut self.buf, x, y);
        self.commands += 1;
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.buf.push('Q');
        write_pair(&mut self.buf, x1, y1);
        self.buf.push(' ');
        write_pair(&mut self.buf, x, y);
        self.commands += 1;
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.buf.push('C');
        write_pair(&mut self.buf, x1, y1);
        self.buf.push(' ');
        write_pair(&mut self.buf, x2, y2);
        self.buf.push(' ');
        write_pair(&mut self.buf, x, y);
        self.commands += 1;
    }

    fn close(&mut self) {
        self.buf.push('Z');
        self.commands += 1;
    }
}
