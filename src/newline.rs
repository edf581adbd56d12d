//! Newline scanning. `\n` and `\r` both end a line, and the two-character
//! pairs `\r\n` and `\n\r` count as a single newline.

/// Offset of the first `\n` or `\r` at or after `from`, or `text.len()` when
/// the rest of the text holds no newline.
pub fn find_newline(text: &str, from: usize) -> usize {
    let bytes = text.as_bytes();
    if from >= bytes.len() {
        return bytes.len();
    }
    memchr::memchr2(b'\n', b'\r', &bytes[from..]).map_or(bytes.len(), |i| from + i)
}

/// Number of bytes the newline at `at` occupies. The end of the text counts
/// as a one-byte terminator.
pub fn newline_len(text: &str, at: usize) -> usize {
    match text.as_bytes().get(at..at + 2) {
        Some(b"\r\n") | Some(b"\n\r") => 2,
        _ => 1,
    }
}

pub fn is_newline(byte: u8) -> bool {
    byte == b'\n' || byte == b'\r'
}
