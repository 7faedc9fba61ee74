use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, info};
use uuid::Uuid;

use docsmith_core::{
    DocError, DocKind, DocResult, FeedbackStore, LookupKind, Project, ProjectStore,
    SectionFeedback, Snapshot, Version, VersionStore,
};

use crate::check_kind;

const SERVICE: &str = "sqlite";

fn db_err(e: impl std::fmt::Display) -> DocError {
    DocError::upstream(SERVICE, e)
}

fn parse_uuid(s: &str) -> DocResult<Uuid> {
    Uuid::parse_str(s).map_err(|e| db_err(format!("bad uuid '{s}': {e}")))
}

fn parse_time(s: &str) -> DocResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| db_err(format!("bad timestamp '{s}': {e}")))
}

fn parse_kind(code: i64) -> DocResult<DocKind> {
    DocKind::from_code(code).ok_or_else(|| db_err(format!("unknown doctype {code}")))
}

/// SQLite-backed store for projects, versions and section feedback.
///
/// Version creation runs in one transaction so the assigned number and the
/// `is_current` flag stay consistent under concurrent writers.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create the store at the given path.
    pub fn open(path: impl AsRef<Path>) -> DocResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(db_err)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        info!(path = %path.display(), "Store opened");
        Ok(store)
    }

    /// Create an in-memory store (for testing).
    pub fn in_memory() -> DocResult<Self> {
        let conn = Connection::open_in_memory().map_err(db_err)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn conn(&self) -> DocResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| db_err("connection lock poisoned"))
    }

    fn init_schema(&self) -> DocResult<()> {
        self.conn()?
            .execute_batch(
                "PRAGMA foreign_keys = ON;
                CREATE TABLE IF NOT EXISTS projects (
                    id TEXT PRIMARY KEY,
                    user_id TEXT NOT NULL,
                    title TEXT NOT NULL,
                    doctype INTEGER NOT NULL,
                    created_at TEXT NOT NULL
                );
                CREATE INDEX IF NOT EXISTS idx_projects_user_id ON projects(user_id);
                CREATE TABLE IF NOT EXISTS project_versions (
                    id TEXT PRIMARY KEY,
                    project_id TEXT NOT NULL REFERENCES projects(id),
                    version_number INTEGER NOT NULL,
                    config TEXT NOT NULL,
                    is_current INTEGER NOT NULL,
                    created_at TEXT NOT NULL,
                    UNIQUE (project_id, version_number)
                );
                CREATE TABLE IF NOT EXISTS section_feedback (
                    version_id TEXT NOT NULL REFERENCES project_versions(id),
                    user_id TEXT NOT NULL,
                    section_title TEXT NOT NULL,
                    liked INTEGER,
                    comment TEXT,
                    updated_at TEXT NOT NULL,
                    PRIMARY KEY (version_id, user_id, section_title)
                );",
            )
            .map_err(db_err)
    }

    fn load_project(conn: &Connection, project_id: Uuid) -> DocResult<Project> {
        let row = conn
            .query_row(
                "SELECT id, user_id, title, doctype, created_at FROM projects WHERE id = ?1",
                params![project_id.to_string()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, i64>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()
            .map_err(db_err)?;

        let Some((id, user_id, title, doctype, created_at)) = row else {
            return Err(DocError::not_found(LookupKind::Project, project_id.to_string()));
        };
        Ok(Project {
            id: parse_uuid(&id)?,
            user_id,
            title,
            kind: parse_kind(doctype)?,
            created_at: parse_time(&created_at)?,
        })
    }

    fn version_exists(conn: &Connection, version_id: Uuid) -> DocResult<bool> {
        conn.query_row(
            "SELECT 1 FROM project_versions WHERE id = ?1",
            params![version_id.to_string()],
            |_| Ok(()),
        )
        .optional()
        .map(|found| found.is_some())
        .map_err(db_err)
    }

    fn load_feedback(
        conn: &Connection,
        version_id: Uuid,
        user_id: &str,
        section_title: &str,
    ) -> DocResult<SectionFeedback> {
        let row = conn
            .query_row(
                &format!("{FEEDBACK_SELECT} WHERE version_id = ?1 AND user_id = ?2 AND section_title = ?3"),
                params![version_id.to_string(), user_id, section_title],
                FeedbackRow::read,
            )
            .map_err(db_err)?;
        row.into_feedback()
    }
}

const VERSION_SELECT: &str = "SELECT v.id, v.project_id, v.version_number, v.config, v.is_current, \
     v.created_at, p.doctype, p.title \
     FROM project_versions v JOIN projects p ON p.id = v.project_id";

const FEEDBACK_SELECT: &str =
    "SELECT version_id, user_id, section_title, liked, comment, updated_at FROM section_feedback";

struct VersionRow {
    id: String,
    project_id: String,
    version_number: i64,
    config: String,
    is_current: bool,
    created_at: String,
    doctype: i64,
    project_title: String,
}

impl VersionRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            project_id: row.get(1)?,
            version_number: row.get(2)?,
            config: row.get(3)?,
            is_current: row.get(4)?,
            created_at: row.get(5)?,
            doctype: row.get(6)?,
            project_title: row.get(7)?,
        })
    }

    fn into_version(self) -> DocResult<Version> {
        let value: serde_json::Value = serde_json::from_str(&self.config).map_err(db_err)?;
        let snapshot = Snapshot::from_value(parse_kind(self.doctype)?, &value, &self.project_title)
            .map_err(|e| db_err(format!("stored snapshot {} is malformed: {e}", self.id)))?;
        Ok(Version {
            id: parse_uuid(&self.id)?,
            project_id: parse_uuid(&self.project_id)?,
            version_number: self.version_number,
            snapshot,
            is_current: self.is_current,
            created_at: parse_time(&self.created_at)?,
        })
    }
}

struct FeedbackRow {
    version_id: String,
    user_id: String,
    section_title: String,
    liked: Option<bool>,
    comment: Option<String>,
    updated_at: String,
}

impl FeedbackRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            version_id: row.get(0)?,
            user_id: row.get(1)?,
            section_title: row.get(2)?,
            liked: row.get(3)?,
            comment: row.get(4)?,
            updated_at: row.get(5)?,
        })
    }

    fn into_feedback(self) -> DocResult<SectionFeedback> {
        Ok(SectionFeedback {
            version_id: parse_uuid(&self.version_id)?,
            user_id: self.user_id,
            section_title: self.section_title,
            liked: self.liked,
            comment: self.comment,
            updated_at: parse_time(&self.updated_at)?,
        })
    }
}

#[async_trait]
impl ProjectStore for SqliteStore {
    async fn create_project(&self, user_id: &str, title: &str, kind: DocKind) -> DocResult<Project> {
        let project = Project::new(user_id, title, kind);
        self.conn()?
            .execute(
                "INSERT INTO projects (id, user_id, title, doctype, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    project.id.to_string(),
                    project.user_id,
                    project.title,
                    project.kind.code(),
                    project.created_at.to_rfc3339(),
                ],
            )
            .map_err(db_err)?;
        debug!(project_id = %project.id, kind = %kind, "Project created");
        Ok(project)
    }

    async fn get_project(&self, project_id: Uuid) -> DocResult<Project> {
        Self::load_project(&*self.conn()?, project_id)
    }

    async fn list_projects(&self, user_id: &str) -> DocResult<Vec<Project>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT id FROM projects WHERE user_id = ?1 ORDER BY created_at DESC, rowid DESC",
            )
            .map_err(db_err)?;
        let ids = stmt
            .query_map(params![user_id], |row| row.get::<_, String>(0))
            .map_err(db_err)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(db_err)?;

        ids.iter()
            .map(|id| Self::load_project(&conn, parse_uuid(id)?))
            .collect()
    }
}

#[async_trait]
impl VersionStore for SqliteStore {
    async fn create_version(&self, project_id: Uuid, snapshot: Snapshot) -> DocResult<Version> {
        let mut conn = self.conn()?;
        check_kind(&Self::load_project(&conn, project_id)?, &snapshot)?;

        let config = serde_json::to_string(&snapshot).map_err(db_err)?;
        let id = Uuid::new_v4();
        let created_at = Utc::now();
        let pid = project_id.to_string();

        let tx = conn.transaction().map_err(db_err)?;
        let version_number: i64 = tx
            .query_row(
                "SELECT COALESCE(MAX(version_number), 0) + 1 FROM project_versions WHERE project_id = ?1",
                params![pid],
                |row| row.get(0),
            )
            .map_err(db_err)?;
        tx.execute(
            "UPDATE project_versions SET is_current = 0 WHERE project_id = ?1",
            params![pid],
        )
        .map_err(db_err)?;
        tx.execute(
            "INSERT INTO project_versions (id, project_id, version_number, config, is_current, created_at)
             VALUES (?1, ?2, ?3, ?4, 1, ?5)",
            params![id.to_string(), pid, version_number, config, created_at.to_rfc3339()],
        )
        .map_err(db_err)?;
        tx.commit().map_err(db_err)?;

        info!(project_id = %project_id, version_number, "Version created");
        Ok(Version {
            id,
            project_id,
            version_number,
            snapshot,
            is_current: true,
            created_at,
        })
    }

    async fn get_version(&self, project_id: Uuid, version_id: Uuid) -> DocResult<Version> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                &format!("{VERSION_SELECT} WHERE v.id = ?1 AND v.project_id = ?2"),
                params![version_id.to_string(), project_id.to_string()],
                VersionRow::read,
            )
            .optional()
            .map_err(db_err)?;
        match row {
            Some(row) => row.into_version(),
            None => Err(DocError::not_found(LookupKind::Version, version_id.to_string())),
        }
    }

    async fn list_versions(&self, project_id: Uuid) -> DocResult<Vec<Version>> {
        let conn = self.conn()?;
        Self::load_project(&conn, project_id)?;
        let mut stmt = conn
            .prepare(&format!(
                "{VERSION_SELECT} WHERE v.project_id = ?1 ORDER BY v.version_number DESC"
            ))
            .map_err(db_err)?;
        let rows = stmt
            .query_map(params![project_id.to_string()], VersionRow::read)
            .map_err(db_err)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(db_err)?;
        rows.into_iter().map(VersionRow::into_version).collect()
    }

    async fn current_version(&self, project_id: Uuid) -> DocResult<Option<Version>> {
        let conn = self.conn()?;
        Self::load_project(&conn, project_id)?;
        let row = conn
            .query_row(
                &format!(
                    "{VERSION_SELECT} WHERE v.project_id = ?1 AND v.is_current = 1 \
                     ORDER BY v.version_number DESC LIMIT 1"
                ),
                params![project_id.to_string()],
                VersionRow::read,
            )
            .optional()
            .map_err(db_err)?;
        row.map(VersionRow::into_version).transpose()
    }
}

#[async_trait]
impl FeedbackStore for SqliteStore {
    async fn set_reaction(
        &self,
        version_id: Uuid,
        user_id: &str,
        section_title: &str,
        liked: bool,
    ) -> DocResult<SectionFeedback> {
        let conn = self.conn()?;
        if !Self::version_exists(&conn, version_id)? {
            return Err(DocError::not_found(LookupKind::Version, version_id.to_string()));
        }
        conn.execute(
            "INSERT INTO section_feedback (version_id, user_id, section_title, liked, comment, updated_at)
             VALUES (?1, ?2, ?3, ?4, NULL, ?5)
             ON CONFLICT (version_id, user_id, section_title)
             DO UPDATE SET liked = excluded.liked, updated_at = excluded.updated_at",
            params![version_id.to_string(), user_id, section_title, liked, Utc::now().to_rfc3339()],
        )
        .map_err(db_err)?;
        Self::load_feedback(&conn, version_id, user_id, section_title)
    }

    async fn set_comment(
        &self,
        version_id: Uuid,
        user_id: &str,
        section_title: &str,
        comment: &str,
    ) -> DocResult<SectionFeedback> {
        let conn = self.conn()?;
        if !Self::version_exists(&conn, version_id)? {
            return Err(DocError::not_found(LookupKind::Version, version_id.to_string()));
        }
        conn.execute(
            "INSERT INTO section_feedback (version_id, user_id, section_title, liked, comment, updated_at)
             VALUES (?1, ?2, ?3, NULL, ?4, ?5)
             ON CONFLICT (version_id, user_id, section_title)
             DO UPDATE SET comment = excluded.comment, updated_at = excluded.updated_at",
            params![version_id.to_string(), user_id, section_title, comment, Utc::now().to_rfc3339()],
        )
        .map_err(db_err)?;
        Self::load_feedback(&conn, version_id, user_id, section_title)
    }

    async fn list_feedback(&self, version_id: Uuid, user_id: &str) -> DocResult<Vec<SectionFeedback>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(&format!(
                "{FEEDBACK_SELECT} WHERE version_id = ?1 AND user_id = ?2 ORDER BY section_title"
            ))
            .map_err(db_err)?;
        let rows = stmt
            .query_map(params![version_id.to_string(), user_id], FeedbackRow::read)
            .map_err(db_err)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(db_err)?;
        rows.into_iter().map(FeedbackRow::into_feedback).collect()
    }
}
