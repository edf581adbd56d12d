use unicode_width::UnicodeWidthChar;

/// Display columns taken by `c`. Control characters take none.
pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

pub fn is_wide_char(c: char) -> bool {
    char_width(c) == 2
}

pub fn text_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

/// Finds the furthest offset in `text[from..to]` whose prefix fits in
/// `columns` display columns. Returns that offset and the prefix width.
///
/// Characters are never split, so a wide character that only half fits is
/// left out entirely.
pub fn text_pos(text: &str, from: usize, to: usize, columns: usize) -> (usize, usize) {
    let mut used = 0;
    for (i, c) in text[from..to].char_indices() {
        let w = char_width(c);
        if used + w > columns {
            return (from + i, used);
        }
        used += w;
    }
    (to, used)
}
