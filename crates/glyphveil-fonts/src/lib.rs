//! Block letter fonts for the glyphveil hero banner.

/// Height of every glyph in lines.
pub const LETTER_HEIGHT: usize = 5;

/// Letter A
const LETTER_A: [&str; LETTER_HEIGHT] = [
    " ████ ",
    "██  ██",
    "██████",
    "██  ██",
    "██  ██",
];

/// Letter E
const LETTER_E: [&str; LETTER_HEIGHT] = [
    "██████",
    "██    ",
    "█████ ",
    "██    ",
    "██████",
];

/// Letter G
const LETTER_G: [&str; LETTER_HEIGHT] = [
    " █████",
    "██    ",
    "██ ███",
    "██  ██",
    " ████ ",
];

/// Letter I
const LETTER_I: [&str; LETTER_HEIGHT] = [
    "██████",
    "  ██  ",
    "  ██  ",
    "  ██  ",
    "██████",
];

/// Letter K
const LETTER_K: [&str; LETTER_HEIGHT] = [
    "██  ██",
    "██ ██ ",
    "████  ",
    "██ ██ ",
    "██  ██",
];

/// Letter O
const LETTER_O: [&str; LETTER_HEIGHT] = [
    " ████ ",
    "██  ██",
    "██  ██",
    "██  ██",
    " ████ ",
];

/// Letter S
const LETTER_S: [&str; LETTER_HEIGHT] = [
    " █████",
    "██    ",
    " ████ ",
    "    ██",
    "█████ ",
];

/// Blank used for spaces and characters without a glyph.
const BLANK: [&str; LETTER_HEIGHT] = ["      ", "      ", "      ", "      ", "      "];

/// Look up the block glyph for a character (case-insensitive).
pub fn letter(c: char) -> Option<&'static [&'static str; LETTER_HEIGHT]> {
    match c.to_ascii_uppercase() {
        'A' => Some(&LETTER_A),
        'E' => Some(&LETTER_E),
        'G' => Some(&LETTER_G),
        'I' => Some(&LETTER_I),
        'K' => Some(&LETTER_K),
        'O' => Some(&LETTER_O),
        'S' => Some(&LETTER_S),
        ' ' => Some(&BLANK),
        _ => None,
    }
}

/// Whether every character of `text` has a block glyph.
pub fn can_render(text: &str) -> bool {
    text.chars().all(|c| letter(c).is_some())
}

/// Build block letter art for `text`.
///
/// # Returns
/// A vector of [`LETTER_HEIGHT`] strings, one per line, with letters
/// separated by a single column. Characters without a glyph render blank.
pub fn build_banner(text: &str) -> Vec<String> {
    (0..LETTER_HEIGHT)
        .map(|row| {
            text.chars()
                .map(|c| letter(c).unwrap_or(&BLANK)[row])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Display width of a banner line for `text`.
pub fn banner_width(text: &str) -> usize {
    let n = text.chars().count();
    if n == 0 { 0 } else { n * 6 + (n - 1) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_shape() {
        let lines = build_banner("GIE");
        assert_eq!(lines.len(), LETTER_HEIGHT);
        for line in &lines {
            assert_eq!(line.chars().count(), banner_width("GIE"));
        }
        assert_eq!(lines[0], " █████ ██████ ██████");
    }

    #[test]
    fn test_brand_names_render() {
        assert!(can_render("GIE"));
        assert!(can_render("aiskoa"));
        assert!(!can_render("GIE 2"));
    }

    #[test]
    fn test_empty_banner() {
        assert_eq!(build_banner(""), vec![String::new(); LETTER_HEIGHT]);
        assert_eq!(banner_width(""), 0);
    }
}
