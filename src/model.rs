use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::LayoutError;

/// One typed span of a display row. Offsets are byte offsets into the laid
/// out text and always sit on `char` boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Displayable text `start..end`, `width` columns wide.
    Text {
        width: usize,
        start: usize,
        end: usize,
    },
    /// Blank fill. `offset` is the tab character this padding expands, or
    /// `None` for fill with no backing text.
    Padding { width: usize, offset: Option<usize> },
    /// Zero-width marker for a character the layout consumed without drawing
    /// (a collapsed space or a newline).
    Hint { offset: usize },
}

impl Segment {
    pub const fn text(width: usize, start: usize, end: usize) -> Self {
        Segment::Text { width, start, end }
    }

    pub const fn tab(width: usize, offset: usize) -> Self {
        Segment::Padding {
            width,
            offset: Some(offset),
        }
    }

    pub const fn padding(width: usize) -> Self {
        Segment::Padding {
            width,
            offset: None,
        }
    }

    pub const fn hint(offset: usize) -> Self {
        Segment::Hint { offset }
    }

    pub fn width(&self) -> usize {
        match *self {
            Segment::Text { width, .. } | Segment::Padding { width, .. } => width,
            Segment::Hint { .. } => 0,
        }
    }

    /// First text offset this segment stands for, if any.
    pub fn start_offset(&self) -> Option<usize> {
        match *self {
            Segment::Text { start, .. } => Some(start),
            Segment::Padding { offset, .. } => offset,
            Segment::Hint { offset } => Some(offset),
        }
    }

    /// Offset just past the last character this segment stands for.
    pub fn end_offset(&self) -> Option<usize> {
        match *self {
            Segment::Text { end, .. } => Some(end),
            Segment::Padding { offset, .. } => offset.map(|o| o + 1),
            Segment::Hint { offset } => Some(offset),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Segment::Text { width, start, end } => write!(f, "({width}, {start}..{end})"),
            Segment::Padding {
                width,
                offset: Some(offset),
            } => write!(f, "({width}, tab@{offset})"),
            Segment::Padding {
                width,
                offset: None,
            } => write!(f, "({width}, pad)"),
            Segment::Hint { offset } => write!(f, "(0, @{offset})"),
        }
    }
}

/// A single display row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Row {
    segments: Vec<Segment>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Total display width, hints excluded.
    pub fn width(&self) -> usize {
        self.segments.iter().map(Segment::width).sum()
    }

    /// End offset of the last segment that carries one.
    pub fn end_offset(&self) -> Option<usize> {
        self.segments.iter().rev().find_map(Segment::end_offset)
    }

    /// Narrows a trailing padding segment by `by` columns. Used when a tab
    /// expansion runs past the right edge.
    pub(crate) fn shrink_trailing_padding(&mut self, by: usize) {
        if let Some(Segment::Padding { width, .. }) = self.segments.last_mut() {
            *width = width.saturating_sub(by);
        }
    }
}

impl From<Vec<Segment>> for Row {
    fn from(segments: Vec<Segment>) -> Self {
        Self { segments }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

pub type Layout = Vec<Row>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WrapMode {
    /// One row per logical line, overflow is truncated when drawn.
    Clip,
    /// Break at the last column that fits.
    Any,
    /// Prefer breaking at spaces, then after wide characters.
    Space,
}

impl WrapMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WrapMode::Clip => "clip",
            WrapMode::Any => "any",
            WrapMode::Space => "space",
        }
    }
}

impl fmt::Display for WrapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WrapMode {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "clip" => Ok(WrapMode::Clip),
            "any" => Ok(WrapMode::Any),
            "space" => Ok(WrapMode::Space),
            _ => Err(LayoutError::UnknownWrapMode(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    pub fn as_str(&self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

impl fmt::Display for Align {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Align {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(Align::Left),
            "center" => Ok(Align::Center),
            "right" => Ok(Align::Right),
            _ => Err(LayoutError::UnknownAlignMode(s.to_string())),
        }
    }
}
