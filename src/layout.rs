use tracing::{debug, trace};

use crate::errors::{LayoutError, LayoutResult};
use crate::model::{Align, Layout, Row, Segment, WrapMode};
use crate::newline::{find_newline, newline_len};
use crate::width::{char_width, is_wide_char, text_pos, text_width};

pub const DEFAULT_TAB_WIDTH: usize = 8;

/// Turns text into display rows for a fixed column width.
///
/// The engine only carries the tab width; every call computes a fresh layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutEngine {
    tab_width: usize,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(DEFAULT_TAB_WIDTH)
    }
}

impl LayoutEngine {
    pub fn new(tab_width: usize) -> Self {
        Self {
            tab_width: tab_width.max(1),
        }
    }

    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    pub fn supports_align_mode(&self, align: Align) -> bool {
        align == Align::Left
    }

    pub fn supports_wrap_mode(&self, wrap: WrapMode) -> bool {
        matches!(wrap, WrapMode::Clip | WrapMode::Any | WrapMode::Space)
    }

    /// Lays out `text` in `width` columns.
    ///
    /// Text that cannot be displayed at all (a wide character in a single
    /// column) yields one empty row instead of an error.
    pub fn layout(
        &self,
        text: &str,
        width: usize,
        align: Align,
        wrap: WrapMode,
    ) -> LayoutResult<Layout> {
        if !self.supports_align_mode(align) {
            return Err(LayoutError::UnsupportedAlign(align));
        }
        match self.calculate_text_segments(text, width, wrap) {
            Ok(rows) => self.align_layout(rows, width, align),
            Err(LayoutError::CannotDisplay { width, offset }) => {
                debug!(width, offset, "text cannot be displayed, using a blank layout");
                Ok(vec![Row::new()])
            }
            Err(err) => Err(err),
        }
    }

    /// Splits `text` into unaligned rows.
    pub fn calculate_text_segments(
        &self,
        text: &str,
        width: usize,
        wrap: WrapMode,
    ) -> LayoutResult<Layout> {
        if width == 0 {
            return Err(LayoutError::ZeroWidth);
        }
        match wrap {
            WrapMode::Clip => Ok(self.clip_rows(text)),
            WrapMode::Any | WrapMode::Space => {
                let mut wrapper = Wrapper {
                    engine: self,
                    text,
                    width,
                    wrap,
                    rows: Vec::new(),
                };
                wrapper.run()?;
                Ok(wrapper.rows)
            }
        }
    }

    /// Applies alignment padding. Only left alignment is supported, which
    /// leaves the rows untouched.
    pub fn align_layout(&self, rows: Layout, _width: usize, align: Align) -> LayoutResult<Layout> {
        if !self.supports_align_mode(align) {
            return Err(LayoutError::UnsupportedAlign(align));
        }
        Ok(rows)
    }

    /// Columns a tab at `column` expands to.
    pub fn tab_padding(&self, column: usize) -> usize {
        self.tab_width - column % self.tab_width
    }

    // One row per logical line, split only at tabs.
    fn clip_rows(&self, text: &str) -> Layout {
        let mut rows = Vec::new();
        let mut start = 0;
        while start <= text.len() {
            let newline = find_newline(text, start);
            let line = &text[start..newline];
            let mut row = Row::new();
            let mut column = 0;
            let mut pos = 0;

            while pos < line.len() {
                let tab = next_tab(line, pos);
                let end = tab.unwrap_or(line.len());
                let seg_width = text_width(&line[pos..end]);
                if end > pos {
                    row.push(Segment::text(seg_width, start + pos, start + end));
                }
                column += seg_width;
                if tab.is_some() {
                    let padding = self.tab_padding(column);
                    row.push(Segment::tab(padding, start + end));
                    column += padding;
                }
                pos = end + 1;
            }

            row.push(Segment::hint(newline));
            rows.push(row);
            start = newline + newline_len(text, newline);
        }
        rows
    }
}

enum Break {
    /// A space to drop at this offset.
    Space(usize),
    /// The end of a wide character.
    AfterWide(usize),
}

/// Wrapping state for one `calculate_text_segments` call. Rows are committed
/// to `rows`; the row being filled lives on the stack of `wrap_line`.
struct Wrapper<'a> {
    engine: &'a LayoutEngine,
    text: &'a str,
    width: usize,
    wrap: WrapMode,
    rows: Layout,
}

impl Wrapper<'_> {
    fn run(&mut self) -> LayoutResult<()> {
        let mut start = 0;
        while start <= self.text.len() {
            let newline = find_newline(self.text, start);
            self.wrap_line(start, newline)?;
            start = newline + newline_len(self.text, newline);
        }
        Ok(())
    }

    fn commit(&mut self, pending: &mut Row) {
        self.rows.push(std::mem::take(pending));
    }

    /// Wraps the logical line `text[start..newline]`. Positions inside are
    /// relative to `start`.
    fn wrap_line(&mut self, start: usize, newline: usize) -> LayoutResult<()> {
        let text = self.text;
        let line = &text[start..newline];
        let mut pending = Row::new();
        let mut column = 0;
        let mut pos = 0;

        while pos < line.len() {
            let tab = next_tab(line, pos);
            let end = tab.unwrap_or(line.len());
            let seg_width = text_width(&line[pos..end]);

            if column + seg_width <= self.width {
                if end > pos {
                    pending.push(Segment::text(seg_width, start + pos, start + end));
                }
                column += seg_width;
                match tab {
                    Some(_) => {
                        let padding = self.engine.tab_padding(column);
                        pending.push(Segment::tab(padding, start + end));
                        column += padding;
                    }
                    None => pending.push(Segment::hint(start + end)),
                }
                pos = end + 1;
                if column >= self.width {
                    // A tab expanded past the edge.
                    pending.shrink_trailing_padding(column - self.width);
                    self.commit(&mut pending);
                    column = 0;
                }
                continue;
            }

            let (fit, fit_width) = text_pos(line, pos, end, self.width - column);
            if fit == pos {
                if !pending.is_empty() {
                    self.commit(&mut pending);
                    column = 0;
                    continue;
                }
                return Err(LayoutError::CannotDisplay {
                    width: self.width,
                    offset: start + pos,
                });
            }

            if self.wrap == WrapMode::Any {
                pending.push(Segment::text(fit_width, start + pos, start + fit));
                self.commit(&mut pending);
                column = 0;
                pos = fit;
                continue;
            }

            // fit < end here, so there is a character at `fit`
            match line[fit..].chars().next() {
                Some(' ') => {
                    pending.push(Segment::text(fit_width, start + pos, start + fit));
                    pending.push(Segment::hint(start + fit));
                    self.commit(&mut pending);
                    column = 0;
                    pos = fit + 1;
                    continue;
                }
                Some(c) if is_wide_char(c) => {
                    pending.push(Segment::text(fit_width, start + pos, start + fit));
                    self.commit(&mut pending);
                    column = 0;
                    pos = fit;
                    continue;
                }
                _ => {}
            }

            match find_break(line, pos, fit) {
                Some(Break::Space(at)) => {
                    if at > pos {
                        let width = text_width(&line[pos..at]);
                        pending.push(Segment::text(width, start + pos, start + at));
                    }
                    pending.push(Segment::hint(start + at));
                    self.commit(&mut pending);
                    column = 0;
                    pos = at + 1;
                    continue;
                }
                Some(Break::AfterWide(at)) => {
                    let width = text_width(&line[pos..at]);
                    pending.push(Segment::text(width, start + pos, start + at));
                    self.commit(&mut pending);
                    column = 0;
                    pos = at;
                    continue;
                }
                None => {}
            }

            if column == 0 && pending.is_empty() {
                if let Some(resume) = self.reclaim_previous_row(start, line, end) {
                    pos = resume;
                    continue;
                }
            }

            if !pending.is_empty() {
                self.commit(&mut pending);
                column = 0;
                continue;
            }

            // No break opportunity anywhere, split the word.
            self.rows.push(Row::from(vec![Segment::text(
                fit_width,
                start + pos,
                start + fit,
            )]));
            pos = fit;
        }

        // pos lands past the line only when the last segment already
        // recorded the newline.
        if pos <= line.len() {
            pending.push(Segment::hint(newline));
        }
        if !pending.is_empty() {
            self.commit(&mut pending);
        }
        Ok(())
    }

    /// Refills the last committed row when it ended on a collapsed space with
    /// room to spare, so a long word starts filling that room instead of
    /// being split on a fresh row. Returns the line position to resume from.
    fn reclaim_previous_row(&mut self, start: usize, line: &str, end: usize) -> Option<usize> {
        let (resume, used, space) = match self.rows.last()?.segments() {
            [Segment::Text {
                width, start: from, ..
            }, Segment::Hint { offset }] => (*from, *width, *offset),
            [Segment::Hint { offset }] => (*offset, 0, *offset),
            _ => return None,
        };
        if used >= self.width || resume < start || self.text.as_bytes().get(space) != Some(&b' ')
        {
            return None;
        }

        let from = resume - start;
        let (fit, fit_width) = text_pos(line, from, end, self.width);
        if fit == from {
            return None;
        }

        self.rows.pop();
        trace!(offset = resume, "reclaiming previous row");
        let mut merged = Row::from(vec![Segment::text(fit_width, resume, start + fit)]);
        let mut pos = fit;
        if pos == line.len() || line.as_bytes()[pos] == b' ' {
            merged.push(Segment::hint(start + pos));
            pos += 1;
        }
        self.rows.push(merged);
        Some(pos)
    }
}

fn next_tab(line: &str, from: usize) -> Option<usize> {
    memchr::memchr(b'\t', &line.as_bytes()[from..]).map(|i| from + i)
}

/// Scans `line[from..to]` backwards for the nearest space or wide character.
fn find_break(line: &str, from: usize, to: usize) -> Option<Break> {
    line[from..to].char_indices().rev().find_map(|(i, c)| {
        if c == ' ' {
            Some(Break::Space(from + i))
        } else if char_width(c) == 2 {
            Some(Break::AfterWide(from + i + c.len_utf8()))
        } else {
            None
        }
    })
}
