use thiserror::Error;

use crate::model::Align;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Nothing at all fits on an empty row, typically a wide character in a
    /// one-column width.
    #[error("Cannot display text at offset {offset} in a width of {width} column(s)")]
    CannotDisplay { width: usize, offset: usize },

    #[error("Invalid width: layout needs at least one column")]
    ZeroWidth,

    #[error("Unsupported align mode: {0}")]
    UnsupportedAlign(Align),

    #[error("Unknown wrap mode: {0}")]
    UnknownWrapMode(String),

    #[error("Unknown align mode: {0}")]
    UnknownAlignMode(String),
}

pub type LayoutResult<T> = Result<T, LayoutError>;
