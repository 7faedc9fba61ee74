//! `docsmith-core`: the canonical document model and its boundaries.
//!
//! Provides:
//! - The block/slide model and its JSON wire shape
//! - Validation of loosely-typed (LLM-produced) JSON into that model
//! - The error taxonomy shared by every crate
//! - Records and traits for the storage, identity and LLM collaborators

pub mod error;
pub mod model;
pub mod record;
pub mod traits;
pub mod validate;

pub use error::{DocError, DocResult, LookupKind, ValidationError};
pub use model::{Block, DocKind, Document, Presentation, Row, Slide, Snapshot};
pub use record::{Identity, Project, SectionFeedback, Version};
pub use traits::{
    FeedbackStore, IdentityProvider, LlmProvider, LlmRequest, LlmResponse, ProjectStore,
    VersionStore,
};
pub use validate::blocks_from_value;
