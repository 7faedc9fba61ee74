use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use docsmith_core::{
    DocError, DocKind, DocResult, FeedbackStore, LookupKind, Project, ProjectStore,
    SectionFeedback, Snapshot, Version, VersionStore,
};

use crate::check_kind;

type FeedbackKey = (Uuid, String, String);

#[derive(Default)]
struct Inner {
    /// Creation order.
    projects: Vec<Project>,
    /// Per project, creation order.
    versions: HashMap<Uuid, Vec<Version>>,
    feedback: BTreeMap<FeedbackKey, SectionFeedback>,
}

impl Inner {
    fn project(&self, project_id: Uuid) -> DocResult<&Project> {
        self.projects
            .iter()
            .find(|p| p.id == project_id)
            .ok_or_else(|| DocError::not_found(LookupKind::Project, project_id.to_string()))
    }

    fn version_exists(&self, version_id: Uuid) -> bool {
        self.versions
            .values()
            .any(|versions| versions.iter().any(|v| v.id == version_id))
    }

    fn upsert_feedback(
        &mut self,
        version_id: Uuid,
        user_id: &str,
        section_title: &str,
        update: impl FnOnce(&mut SectionFeedback),
    ) -> DocResult<SectionFeedback> {
        if !self.version_exists(version_id) {
            return Err(DocError::not_found(LookupKind::Version, version_id.to_string()));
        }
        let key = (version_id, user_id.to_string(), section_title.to_string());
        let entry = self.feedback.entry(key).or_insert_with(|| SectionFeedback {
            version_id,
            user_id: user_id.to_string(),
            section_title: section_title.to_string(),
            liked: None,
            comment: None,
            updated_at: Utc::now(),
        });
        update(entry);
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }
}

/// Process-local store. All three traits share one lock, so version creation
/// is atomic with respect to every other operation.
#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectStore for InMemoryStore {
    async fn create_project(&self, user_id: &str, title: &str, kind: DocKind) -> DocResult<Project> {
        let project = Project::new(user_id, title, kind);
        self.inner.write().await.projects.push(project.clone());
        Ok(project)
    }

    async fn get_project(&self, project_id: Uuid) -> DocResult<Project> {
        self.inner.read().await.project(project_id).cloned()
    }

    async fn list_projects(&self, user_id: &str) -> DocResult<Vec<Project>> {
        let inner = self.inner.read().await;
        Ok(inner
            .projects
            .iter()
            .rev()
            .filter(|p| p.is_owned_by(user_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl VersionStore for InMemoryStore {
    async fn create_version(&self, project_id: Uuid, snapshot: Snapshot) -> DocResult<Version> {
        let mut inner = self.inner.write().await;
        check_kind(inner.project(project_id)?, &snapshot)?;

        let versions = inner.versions.entry(project_id).or_default();
        let version_number = versions.iter().map(|v| v.version_number).max().unwrap_or(0) + 1;
        for previous in versions.iter_mut() {
            previous.is_current = false;
        }
        let version = Version {
            id: Uuid::new_v4(),
            project_id,
            version_number,
            snapshot,
            is_current: true,
            created_at: Utc::now(),
        };
        versions.push(version.clone());
        Ok(version)
    }

    async fn get_version(&self, project_id: Uuid, version_id: Uuid) -> DocResult<Version> {
        let inner = self.inner.read().await;
        inner
            .versions
            .get(&project_id)
            .and_then(|versions| versions.iter().find(|v| v.id == version_id))
            .cloned()
            .ok_or_else(|| DocError::not_found(LookupKind::Version, version_id.to_string()))
    }

    async fn list_versions(&self, project_id: Uuid) -> DocResult<Vec<Version>> {
        let inner = self.inner.read().await;
        inner.project(project_id)?;
        let mut versions = inner.versions.get(&project_id).cloned().unwrap_or_default();
        versions.sort_by(|a, b| b.version_number.cmp(&a.version_number));
        Ok(versions)
    }

    async fn current_version(&self, project_id: Uuid) -> DocResult<Option<Version>> {
        let inner = self.inner.read().await;
        inner.project(project_id)?;
        Ok(inner
            .versions
            .get(&project_id)
            .and_then(|versions| versions.iter().find(|v| v.is_current))
            .cloned())
    }
}

#[async_trait]
impl FeedbackStore for InMemoryStore {
    async fn set_reaction(
        &self,
        version_id: Uuid,
        user_id: &str,
        section_title: &str,
        liked: bool,
    ) -> DocResult<SectionFeedback> {
        self.inner
            .write()
            .await
            .upsert_feedback(version_id, user_id, section_title, |f| f.liked = Some(liked))
    }

    async fn set_comment(
        &self,
        version_id: Uuid,
        user_id: &str,
        section_title: &str,
        comment: &str,
    ) -> DocResult<SectionFeedback> {
        self.inner
            .write()
            .await
            .upsert_feedback(version_id, user_id, section_title, |f| {
                f.comment = Some(comment.to_string())
            })
    }

    async fn list_feedback(&self, version_id: Uuid, user_id: &str) -> DocResult<Vec<SectionFeedback>> {
        let inner = self.inner.read().await;
        Ok(inner
            .feedback
            .values()
            .filter(|f| f.version_id == version_id && f.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use docsmith_core::{Block, Document, Presentation, Slide};

    use super::*;

    fn doc(title: &str) -> Snapshot {
        Document::new(title, vec![Block::heading(1, title)]).into()
    }

    #[tokio::test]
    async fn test_version_numbers_and_current_flag() {
        let store = InMemoryStore::new();
        let project = store.create_project("u1", "Report", DocKind::Word).await.unwrap();

        let v1 = store.create_version(project.id, doc("one")).await.unwrap();
        let v2 = store.create_version(project.id, doc("two")).await.unwrap();
        assert_eq!((v1.version_number, v2.version_number), (1, 2));

        let versions = store.list_versions(project.id).await.unwrap();
        assert_eq!(versions.iter().map(|v| v.version_number).collect::<Vec<_>>(), vec![2, 1]);
        assert_eq!(versions.iter().filter(|v| v.is_current).count(), 1);

        let current = store.current_version(project.id).await.unwrap().unwrap();
        assert_eq!(current.id, v2.id);

        // The earlier version is still retrievable unchanged.
        let old = store.get_version(project.id, v1.id).await.unwrap();
        assert_eq!(old.snapshot, doc("one"));
        assert!(!old.is_current);
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_distinct_numbers() {
        let store = Arc::new(InMemoryStore::new());
        let project = store.create_project("u1", "Race", DocKind::Word).await.unwrap();

        let project_id = project.id;
        let mut handles = Vec::new();
        for i in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.create_version(project_id, doc(&format!("v{i}"))).await.unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let mut numbers: Vec<i64> = store
            .list_versions(project.id)
            .await
            .unwrap()
            .iter()
            .map(|v| v.version_number)
            .collect();
        numbers.sort();
        assert_eq!(numbers, (1..=8).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_kind_mismatch_rejected() {
        let store = InMemoryStore::new();
        let project = store.create_project("u1", "Deck", DocKind::Slides).await.unwrap();
        let err = store.create_version(project.id, doc("nope")).await.unwrap_err();
        assert!(err.is_validation());

        let pres: Snapshot = Presentation::new("Deck", vec![Slide::new("A", ["x"])]).into();
        assert!(store.create_version(project.id, pres).await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_records() {
        let store = InMemoryStore::new();
        let missing = Uuid::new_v4();
        assert!(store.get_project(missing).await.unwrap_err().is_not_found());
        assert!(store.create_version(missing, doc("x")).await.unwrap_err().is_not_found());

        let project = store.create_project("u1", "R", DocKind::Word).await.unwrap();
        assert!(store.get_version(project.id, missing).await.unwrap_err().is_not_found());
        assert!(store.current_version(project.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_projects_newest_first_per_user() {
        let store = InMemoryStore::new();
        let a = store.create_project("u1", "A", DocKind::Word).await.unwrap();
        store.create_project("u2", "other", DocKind::Word).await.unwrap();
        let b = store.create_project("u1", "B", DocKind::Slides).await.unwrap();

        let ids: Vec<Uuid> = store.list_projects("u1").await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![b.id, a.id]);
    }

    #[tokio::test]
    async fn test_feedback_fields_are_preserved() {
        let store = InMemoryStore::new();
        let project = store.create_project("u1", "R", DocKind::Word).await.unwrap();
        let version = store.create_version(project.id, doc("R")).await.unwrap();

        store.set_comment(version.id, "u1", "Body", "too long").await.unwrap();
        let fb = store.set_reaction(version.id, "u1", "Body", false).await.unwrap();
        assert_eq!(fb.liked, Some(false));
        assert_eq!(fb.comment.as_deref(), Some("too long"));

        let fb = store.set_comment(version.id, "u1", "Body", "better").await.unwrap();
        assert_eq!(fb.liked, Some(false));
        assert_eq!(fb.comment.as_deref(), Some("better"));

        store.set_reaction(version.id, "u2", "Body", true).await.unwrap();
        let mine = store.list_feedback(version.id, "u1").await.unwrap();
        assert_eq!(mine.len(), 1);

        let err = store.set_reaction(Uuid::new_v4(), "u1", "Body", true).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
