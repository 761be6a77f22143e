//! Color utility functions for background animations.

use ratatui::style::Color;

/// An sRGB color with a straight (non-premultiplied) alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    /// Create a color, clamping alpha into `[0, 1]`.
    pub fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r,
            g,
            b,
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Opaque color from an RGB triple.
    pub fn opaque((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Color channels as floats in `[0, 1]`.
    pub fn channels(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }

    /// Composite this color over `dst` ("source-over").
    pub fn over(self, dst: [f32; 3]) -> [f32; 3] {
        let src = self.channels();
        let a = self.a;
        [
            src[0] * a + dst[0] * (1.0 - a),
            src[1] * a + dst[1] * (1.0 - a),
            src[2] * a + dst[2] * (1.0 - a),
        ]
    }
}

/// Convert float channels to a terminal color.
pub fn to_color(rgb: [f32; 3]) -> Color {
    let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::Rgb(q(rgb[0]), q(rgb[1]), q(rgb[2]))
}

/// Largest per-channel difference between two colors.
pub fn distance(a: [f32; 3], b: [f32; 3]) -> f32 {
    (a[0] - b[0])
        .abs()
        .max((a[1] - b[1]).abs())
        .max((a[2] - b[2]).abs())
}

/// Blend `fg` over the RGB triple `bg` by `alpha` and return a terminal color.
pub fn blend(fg: (u8, u8, u8), bg: (u8, u8, u8), alpha: f32) -> Color {
    to_color(Rgba::opaque(fg).with_alpha(alpha).over(Rgba::opaque(bg).channels()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_over_extremes() {
        let black = [0.0, 0.0, 0.0];
        let white = Rgba::new(255, 255, 255, 1.0);
        assert_eq!(white.over(black), [1.0, 1.0, 1.0]);
        assert_eq!(white.with_alpha(0.0).over(black), black);
    }

    #[test]
    fn test_alpha_is_clamped() {
        assert_eq!(Rgba::new(0, 0, 0, 1.5).a, 1.0);
        assert_eq!(Rgba::new(0, 0, 0, -0.5).a, 0.0);
    }

    #[test]
    fn test_blend_halfway() {
        assert_eq!(blend((255, 255, 255), (0, 0, 0), 0.5), Color::Rgb(128, 128, 128));
    }
}
