use thiserror::Error;

/// A malformed or missing field in an externally produced block/slide tree.
///
/// `field` is a JSON path into the input (`blocks[3].text`, `slides[1].bullets`).
/// When the input came from text generation, `raw` keeps the unparsed reply so
/// the caller can re-prompt by hand.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("invalid '{field}': {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub raw: Option<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            raw: None,
        }
    }

    /// Attach the raw generated text this error was produced from.
    pub fn with_raw(mut self, raw: impl Into<String>) -> Self {
        self.raw = Some(raw.into());
        self
    }
}

/// What a failed lookup was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Section,
    Slide,
    Project,
    Version,
}

impl std::fmt::Display for LookupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            LookupKind::Section => "section",
            LookupKind::Slide => "slide",
            LookupKind::Project => "project",
            LookupKind::Version => "version",
        };
        f.write_str(label)
    }
}

/// Top-level error type for docsmith.
///
/// Callers distinguish "bad input" (`Validation`), "nothing found" (`NotFound`)
/// and "dependency failure" (`Upstream`) to pick a retry strategy.
#[derive(Debug, Error)]
pub enum DocError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{kind} '{title}' not found")]
    NotFound { kind: LookupKind, title: String },

    #[error("upstream error ({service}): {message}")]
    Upstream { service: String, message: String },

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden: {0}")]
    Forbidden(String),
}

impl DocError {
    pub fn not_found(kind: LookupKind, title: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            title: title.into(),
        }
    }

    pub fn upstream(service: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Upstream {
            service: service.into(),
            message: message.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

pub type DocResult<T> = Result<T, DocError>;
