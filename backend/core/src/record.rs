//! Persistent records exchanged with the storage and identity collaborators.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::model::{DocKind, Snapshot};

/// A user's document project. Its content lives in [`Version`]s.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Project {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    pub kind: DocKind,
    pub created_at: DateTime<Utc>,
}

impl Project {
    pub fn new(user_id: impl Into<String>, title: impl Into<String>, kind: DocKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            title: title.into(),
            kind,
            created_at: Utc::now(),
        }
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}

/// An immutable snapshot of a project's content.
///
/// `version_number` is assigned by the store and strictly increases per
/// project; `is_current` marks the most recently created version.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Version {
    pub id: Uuid,
    pub project_id: Uuid,
    pub version_number: i64,
    pub snapshot: Snapshot,
    pub is_current: bool,
    pub created_at: DateTime<Utc>,
}

/// Like/dislike and comment left by a user on one section of one version.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionFeedback {
    pub version_id: Uuid,
    pub user_id: String,
    pub section_title: String,
    pub liked: Option<bool>,
    pub comment: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// The caller behind a bearer credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub user_id: String,
    pub email: Option<String>,
}
