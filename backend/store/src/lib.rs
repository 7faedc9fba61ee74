//! Implementations of the project, version and feedback store traits.
//!
//! - [`InMemoryStore`]: process-local, for tests and one-shot runs
//! - [`SqliteStore`]: a single SQLite file

pub mod memory;
pub mod sqlite;

pub use memory::InMemoryStore;
pub use sqlite::SqliteStore;

use docsmith_core::{DocResult, Project, Snapshot, ValidationError};

/// A project only accepts snapshots of its own kind.
pub(crate) fn check_kind(project: &Project, snapshot: &Snapshot) -> DocResult<()> {
    if project.kind == snapshot.kind() {
        Ok(())
    } else {
        Err(ValidationError::new(
            "snapshot",
            format!("project '{}' holds {} content, got {}", project.id, project.kind, snapshot.kind()),
        )
        .into())
    }
}
