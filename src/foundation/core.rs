use std::fmt;

pub use kurbo::{Point, Rect, Size};

/// Opaque 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Build a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS functional notation, e.g. `rgb(200, 210, 220)`.
    pub fn css(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Axis-aligned rectangle in viewport-percent units.
///
/// Values may be negative or exceed 100: placements are allowed to bleed off-screen.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PercentRect {
    /// Left edge, percent of viewport width.
    pub left: f64,
    /// Top edge, percent of viewport height.
    pub top: f64,
    /// Width, percent of viewport width.
    pub width: f64,
    /// Height, percent of viewport height.
    pub height: f64,
}

impl PercentRect {
    /// Right edge in percent.
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge in percent.
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    /// Resolve against a viewport size in pixels.
    pub fn to_px(self, viewport: Size) -> Rect {
        let sx = viewport.width / 100.0;
        let sy = viewport.height / 100.0;
        Rect::new(
            self.left * sx,
            self.top * sy,
            self.right() * sx,
            self.bottom() * sy,
        )
    }

}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
