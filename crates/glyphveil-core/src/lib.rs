//! Core types shared across the glyphveil crates.

use ratatui::style::Color;
use serde::Deserialize;

/// Default alphabet of the falling glyphs. Repeats are intentional and
/// weight the draw toward `0`, `1`, `+`, `x` and `×`.
pub const RAIN_GLYPHS: &str = "01+x×ABCDEF0123456789+×01xABCDEF";

/// Extent of a drawing surface in logical units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Logical size of a terminal grid where each cell spans `cell_size` units.
    /// Saturates at `u32::MAX`.
    pub fn from_cells(cols: u16, rows: u16, cell_size: u32) -> Self {
        Self {
            width: u32::from(cols).saturating_mul(cell_size),
            height: u32::from(rows).saturating_mul(cell_size),
        }
    }
}

/// Light or dark page theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Switch between dark and light.
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Page background as an RGB triple.
    pub fn background_rgb(self) -> (u8, u8, u8) {
        match self {
            Theme::Dark => (9, 9, 11),      // zinc-950
            Theme::Light => (250, 250, 250), // zinc-50
        }
    }

    /// Color of the falling glyphs as an RGB triple.
    pub fn ink_rgb(self) -> (u8, u8, u8) {
        match self {
            Theme::Dark => (255, 255, 255),
            Theme::Light => (37, 99, 235), // blue-600
        }
    }

    /// Page background.
    pub fn background(self) -> Color {
        let (r, g, b) = self.background_rgb();
        Color::Rgb(r, g, b)
    }

    /// Primary text color.
    pub fn text(self) -> Color {
        match self {
            Theme::Dark => Color::Rgb(244, 244, 245),
            Theme::Light => Color::Rgb(24, 24, 27),
        }
    }

    /// Secondary text color.
    pub fn muted(self) -> Color {
        match self {
            Theme::Dark => Color::Rgb(161, 161, 170),
            Theme::Light => Color::Rgb(82, 82, 91),
        }
    }

    /// Border and card surface color.
    pub fn border(self) -> Color {
        match self {
            Theme::Dark => Color::Rgb(63, 63, 70),
            Theme::Light => Color::Rgb(212, 212, 216),
        }
    }

    /// Background of highlighted elements (active tab, selection).
    pub fn accent(self) -> Color {
        match self {
            Theme::Dark => Color::Rgb(244, 244, 245),
            Theme::Light => Color::Rgb(24, 24, 27),
        }
    }

    /// Text drawn on top of [`Theme::accent`].
    pub fn on_accent(self) -> Color {
        match self {
            Theme::Dark => Color::Rgb(24, 24, 27),
            Theme::Light => Color::Rgb(250, 250, 250),
        }
    }
}

/// Hero card tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    General,
    Help,
    Download,
}

impl Tab {
    /// All tabs in display order.
    pub const ALL: [Tab; 3] = [Tab::General, Tab::Help, Tab::Download];

    /// Label shown in the tab bar.
    pub fn label(self) -> &'static str {
        match self {
            Tab::General => "HOME",
            Tab::Help => "HELP",
            Tab::Download => "DOWNLOAD",
        }
    }

    /// Tab selected by a 1-based number key.
    pub fn from_number(n: u32) -> Option<Self> {
        match n {
            1 => Some(Tab::General),
            2 => Some(Tab::Help),
            3 => Some(Tab::Download),
            _ => None,
        }
    }
}

/// Which product branding the page shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Brand {
    #[default]
    Gie,
    Aiskoa,
}

impl Brand {
    /// Display name of the brand.
    pub fn name(self) -> &'static str {
        match self {
            Brand::Gie => "GIE",
            Brand::Aiskoa => "AISKOA",
        }
    }
}

/// Animation speed setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl AnimationSpeed {
    /// Cycle to the next speed.
    pub fn next(self) -> Self {
        match self {
            AnimationSpeed::Slow => AnimationSpeed::Medium,
            AnimationSpeed::Medium => AnimationSpeed::Fast,
            AnimationSpeed::Fast => AnimationSpeed::Slow,
        }
    }

    /// Multiplier applied to each particle's per-tick speed.
    pub fn rain_multiplier(self) -> f32 {
        match self {
            AnimationSpeed::Slow => 0.5,
            AnimationSpeed::Medium => 1.0,
            AnimationSpeed::Fast => 2.0,
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            AnimationSpeed::Slow => "slow",
            AnimationSpeed::Medium => "medium",
            AnimationSpeed::Fast => "fast",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_from_cells() {
        let size = Size::from_cells(10, 5, 14);
        assert_eq!(size, Size::new(140, 70));
    }

    #[test]
    fn test_size_from_cells_saturates() {
        let size = Size::from_cells(80, 24, 100_000_000);
        assert_eq!(size, Size::new(u32::MAX, u32::MAX));
        assert_eq!(Size::from_cells(u16::MAX, 0, u32::MAX), Size::new(u32::MAX, 0));
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
        assert_eq!(Theme::Dark.toggle().toggle(), Theme::Dark);
    }

    #[test]
    fn test_tab_from_number() {
        assert_eq!(Tab::from_number(1), Some(Tab::General));
        assert_eq!(Tab::from_number(3), Some(Tab::Download));
        assert_eq!(Tab::from_number(4), None);
    }

    #[test]
    fn test_speed_cycle() {
        assert_eq!(AnimationSpeed::default().rain_multiplier(), 1.0);
        assert_eq!(AnimationSpeed::Fast.next(), AnimationSpeed::Slow);
    }
}
