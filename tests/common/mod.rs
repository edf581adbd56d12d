#![allow(dead_code)]

use code_layout::newline::{is_newline, newline_len};
use code_layout::{LayoutEngine, Row, Segment, WrapMode};

pub const ALL_WRAPS: [WrapMode; 3] = [WrapMode::Clip, WrapMode::Any, WrapMode::Space];

pub fn segments(text: &str, width: usize, wrap: WrapMode) -> Vec<Row> {
    LayoutEngine::default()
        .calculate_text_segments(text, width, wrap)
        .unwrap_or_else(|err| panic!("layout of {text:?} at width {width} failed: {err}"))
}

/// The offset each segment ends on: text end, tab or hint offset.
pub fn segment_end(segment: &Segment) -> Option<usize> {
    match *segment {
        Segment::Text { end, .. } => Some(end),
        Segment::Padding { offset, .. } => offset,
        Segment::Hint { offset } => Some(offset),
    }
}

/// Offset of the last segment of every row.
pub fn last_ends(rows: &[Row]) -> Vec<usize> {
    rows.iter()
        .map(|row| {
            row.segments()
                .last()
                .and_then(segment_end)
                .unwrap_or_else(|| panic!("row without a trailing offset: {row:?}"))
        })
        .collect()
}

/// Offsets of every segment, row by row.
pub fn all_ends(rows: &[Row]) -> Vec<Vec<usize>> {
    rows.iter()
        .map(|row| row.segments().iter().filter_map(segment_end).collect())
        .collect()
}

/// Checks that the segments walk the text from start to end without gaps or
/// overlaps. Hints and tab padding each stand for the character they mark,
/// a newline hint for the whole newline sequence.
pub fn assert_covers(text: &str, rows: &[Row]) {
    let bytes = text.as_bytes();
    let mut next = 0;
    for segment in rows.iter().flat_map(|row| row.segments()) {
        match *segment {
            Segment::Text { start, end, .. } => {
                assert_eq!(start, next, "gap before {segment} in {text:?}");
                assert!(end > start, "empty text segment {segment} in {text:?}");
                next = end;
            }
            Segment::Padding {
                offset: Some(offset),
                ..
            } => {
                assert_eq!(offset, next, "gap before {segment} in {text:?}");
                assert_eq!(bytes[offset], b'\t', "padding off a tab in {text:?}");
                next = offset + 1;
            }
            Segment::Padding { offset: None, .. } => {}
            Segment::Hint { offset } => {
                assert_eq!(offset, next, "gap before {segment} in {text:?}");
                next = if offset == text.len() {
                    offset + 1
                } else if is_newline(bytes[offset]) {
                    offset + newline_len(text, offset)
                } else {
                    assert_eq!(bytes[offset], b' ', "hint on a drawn character in {text:?}");
                    offset + 1
                };
            }
        }
    }
    assert_eq!(next, text.len() + 1, "layout of {text:?} stops early");
}

pub fn assert_width_bound(rows: &[Row], width: usize) {
    for row in rows {
        assert!(
            row.width() <= width,
            "row {row} is wider than {width} columns"
        );
    }
}
