//! Maps between screen coordinates and text offsets over a computed layout.
//! Hints take no columns, so both directions agree on every drawn cell.

use crate::model::{Row, Segment};
use crate::width::{text_pos, text_width};

/// Text offset drawn at column `x` of row `y`.
///
/// Columns inside alignment padding move to the text after it, a tab's
/// padding maps to the tab itself, and columns past the end of the row map
/// to the row's trailing hint (or its last character). Returns `None` when
/// the row does not exist or has no offsets.
pub fn calc_pos(text: &str, layout: &[Row], x: usize, y: usize) -> Option<usize> {
    let row = layout.get(y)?;
    let mut x = x;
    let mut column = 0;
    let mut row_end = None;

    for segment in row.segments() {
        match *segment {
            Segment::Padding {
                width,
                offset: None,
            } => {
                x = x.max(column + width);
                column += width;
            }
            Segment::Padding {
                width,
                offset: Some(offset),
            } => {
                if x < column + width {
                    return Some(offset);
                }
                column += width;
                row_end = Some(offset);
            }
            Segment::Text { width, start, end } => {
                if x < column + width {
                    return Some(text_pos(text, start, end, x - column).0);
                }
                column += width;
                // Past the end of a row that stops in text, settle on its
                // last character.
                row_end = Some(text_pos(text, start, end, width.saturating_sub(1)).0);
            }
            Segment::Hint { offset } => row_end = Some(offset),
        }
    }
    row_end
}

/// Screen coordinates `(x, y)` where offset `pos` is drawn. Offsets that are
/// not drawn resolve to the closest segment. An empty layout gives `(0, 0)`.
pub fn calc_coords(text: &str, layout: &[Row], pos: usize) -> (usize, usize) {
    // An offset inside a multi-byte character means that character.
    let mut pos = pos;
    while pos < text.len() && !text.is_char_boundary(pos) {
        pos -= 1;
    }
    let mut closest: Option<(usize, (usize, usize))> = None;

    for (y, row) in layout.iter().enumerate() {
        let mut x = 0;
        for segment in row.segments() {
            let (offset, end) = match *segment {
                Segment::Padding {
                    width,
                    offset: None,
                } => {
                    x += width;
                    continue;
                }
                Segment::Padding {
                    offset: Some(o), ..
                }
                | Segment::Hint { offset: o } => (o, None),
                Segment::Text { start, end, .. } => (start, Some(end)),
            };

            if offset == pos {
                return (x, y);
            }
            if let Some(end) = end {
                if offset < pos && pos < end {
                    return (x + text_width(&text[offset..pos]), y);
                }
            }

            let distance = match end {
                Some(end) if end < pos => pos - (end - 1),
                _ => offset.abs_diff(pos),
            };
            if closest.map_or(true, |(best, _)| distance < best) {
                closest = Some((distance, (x, y)));
            }
            x += segment.width();
        }
    }

    closest.map_or((0, 0), |(_, coords)| coords)
}
