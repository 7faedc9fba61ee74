//! Section refinement.
//!
//! The refine path is: locate the section or slide by exact title, have the
//! text generator rewrite it, splice the rewrite back with the section's
//! identity preserved, and append the result as a new version.

pub mod locator;
pub mod service;
pub mod splicer;

pub use locator::{locate_section, locate_slide, SectionSpan};
pub use service::RefinementService;
pub use splicer::{splice_section, splice_slide};
