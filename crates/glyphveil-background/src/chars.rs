//! Character constants for background animations.

pub use glyphveil_core::RAIN_GLYPHS;

/// Character used for dissolve tiles.
pub const TILE_CHAR: char = '█';

/// Split an alphabet string into glyphs, falling back to [`RAIN_GLYPHS`]
/// when it contains nothing drawable.
pub fn glyph_set(alphabet: &str) -> Vec<char> {
    let glyphs: Vec<char> = alphabet.chars().filter(|c| !c.is_whitespace()).collect();
    if glyphs.is_empty() {
        RAIN_GLYPHS.chars().collect()
    } else {
        glyphs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_set_keeps_duplicates() {
        let glyphs = glyph_set(RAIN_GLYPHS);
        assert_eq!(glyphs.len(), 32);
        assert_eq!(glyphs.iter().filter(|&&c| c == '×').count(), 2);
    }

    #[test]
    fn test_glyph_set_fallback() {
        assert_eq!(glyph_set(" \t"), glyph_set(RAIN_GLYPHS));
        assert_eq!(glyph_set("a b"), vec!['a', 'b']);
    }
}
