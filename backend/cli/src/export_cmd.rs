//! `docsmith export`: render a block/slide tree, from a JSON file or a stored
//! version, into a .docx or .pptx file.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::info;
use uuid::Uuid;

use docsmith_core::{DocKind, Snapshot, VersionStore};
use docsmith_export::{export_snapshot, Artifact};
use docsmith_logging::{DocEvent, DocEventLogger};

use crate::app::App;
use crate::terminal_output::note_success;

pub struct ExportArgs {
    pub input: Option<PathBuf>,
    pub kind: Option<DocKind>,
    pub project: Option<Uuid>,
    pub version: Option<Uuid>,
    pub out: Option<PathBuf>,
}

pub async fn run(app: &App, args: ExportArgs) -> Result<()> {
    let (snapshot, user_id) = match (&args.input, args.project, args.version) {
        (Some(input), _, _) => {
            let kind = args.kind.context("--kind is required when exporting a file")?;
            (read_snapshot(input, kind)?, app.config.local_user.clone())
        }
        (None, Some(project_id), Some(version_id)) => {
            let user = app.user().await?;
            let store = app.store()?;
            app.owned_project(&*store, &user, project_id).await?;
            let version = store.get_version(project_id, version_id).await?;
            (version.snapshot, user.user_id)
        }
        _ => bail!("give an input file, or both --project and --version"),
    };

    let kind = snapshot.kind();
    let artifact = export_snapshot(&snapshot)?;
    let path = write_artifact(&artifact, args.out.as_deref())?;

    DocEventLogger::log_event(
        &user_id,
        DocEvent::Exported {
            kind: kind.to_string(),
            filename: artifact.filename.clone(),
            bytes: artifact.data.len(),
        },
    );
    note_success(&format!(
        "Wrote {} ({} bytes, {})",
        path.display(),
        artifact.data.len(),
        artifact.media_type
    ));
    Ok(())
}

/// Parse a block/slide tree file. The title or topic defaults to the file
/// stem.
pub fn read_snapshot(path: &Path, kind: DocKind) -> Result<Snapshot> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;

    let default_title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Untitled");
    let snapshot = Snapshot::from_value(kind, &value, default_title)?;
    info!(path = %path.display(), kind = %kind, "Loaded input");
    Ok(snapshot)
}

/// Write to `out`, or to the artifact's own filename in the working directory.
/// An existing directory as `out` receives the artifact's filename.
pub fn write_artifact(artifact: &Artifact, out: Option<&Path>) -> Result<PathBuf> {
    let path = match out {
        Some(dir) if dir.is_dir() => dir.join(artifact.safe_filename()),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(artifact.safe_filename()),
    };
    std::fs::write(&path, &artifact.data)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}
