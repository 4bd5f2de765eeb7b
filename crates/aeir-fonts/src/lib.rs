//! Block-letter banner art for the AEIR logo.

/// Height of every glyph in lines.
pub const GLYPH_HEIGHT: usize = 7;

/// Letter A
pub const LETTER_A: [&str; GLYPH_HEIGHT] = [
    " ████ ",
    "██  ██",
    "██  ██",
    "██████",
    "██  ██",
    "██  ██",
    "██  ██",
];

/// Letter E
pub const LETTER_E: [&str; GLYPH_HEIGHT] = [
    "██████",
    "██    ",
    "██    ",
    "█████ ",
    "██    ",
    "██    ",
    "██████",
];

/// Letter I
pub const LETTER_I: [&str; GLYPH_HEIGHT] = [
    "████",
    " ██ ",
    " ██ ",
    " ██ ",
    " ██ ",
    " ██ ",
    "████",
];

/// Letter R
pub const LETTER_R: [&str; GLYPH_HEIGHT] = [
    "█████ ",
    "██  ██",
    "██  ██",
    "█████ ",
    "██ ██ ",
    "██  ██",
    "██  ██",
];

/// Blank glyph used for spaces and unsupported characters.
pub const BLANK: [&str; GLYPH_HEIGHT] = ["   "; GLYPH_HEIGHT];

/// Look up the glyph for a character (case-insensitive).
pub fn glyph(ch: char) -> &'static [&'static str; GLYPH_HEIGHT] {
    match ch.to_ascii_uppercase() {
        'A' => &LETTER_A,
        'E' => &LETTER_E,
        'I' => &LETTER_I,
        'R' => &LETTER_R,
        _ => &BLANK,
    }
}

/// Build banner art for `text`.
///
/// Returns [`GLYPH_HEIGHT`] lines with one column of spacing between glyphs.
pub fn build_banner(text: &str) -> Vec<String> {
    (0..GLYPH_HEIGHT)
        .map(|row| {
            text.chars()
                .map(|ch| glyph(ch)[row])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}
