//! Structured logging for docsmith.
//!
//! Handles log redaction, console and rolling NDJSON file output, and the
//! document lifecycle event log.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{DocEvent, DocEventEntry, DocEventLogger};
pub use logger::init_logger;
pub use redact::redact_sensitive_data;
