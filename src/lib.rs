pub mod config;
pub mod cursor;
pub mod errors;
pub mod layout;
pub mod model;
pub mod preview;

// Internal modules
pub mod cache;
pub mod newline;
pub mod width;

// Re-export commonly used types
pub use cache::LineCache;
pub use errors::{LayoutError, LayoutResult};
pub use layout::LayoutEngine;
pub use model::{Align, Layout, Row, Segment, WrapMode};
