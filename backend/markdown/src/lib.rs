//! Inline emphasis tokenizer and text renderers.
//!
//! Recognizes a fixed, small set of markdown-like markers inside a single text
//! field (`` `code` ``, `**bold**`, `__bold__`, `*italic*`, `_italic_`) and
//! renders blocks back to marker text for prompts.

pub mod inline;
pub mod renderer;

pub use inline::{Span, SpanStyle, strip_markers, tokenize};
pub use renderer::Renderer;
