//! WordprocessingML rendering.

mod numbering;
mod styles;
mod writer;

pub use writer::DocxWriter;

/// Body font applied as the document default.
pub const BODY_FONT: &str = "Calibri";
/// Body size in half-points (11pt).
pub const BODY_SIZE: usize = 22;
/// Monospace font for code spans and code blocks.
pub const CODE_FONT: &str = "Consolas";
/// Code size in half-points (10pt).
pub const CODE_SIZE: usize = 20;
/// Background fill behind code.
pub const CODE_SHADING: &str = "F0F0F0";
/// One inch in twentieths of a point.
pub const PAGE_MARGIN: i32 = 1440;
/// Usable text width of a Letter page with one-inch margins.
pub const TEXT_WIDTH: usize = 9360;
