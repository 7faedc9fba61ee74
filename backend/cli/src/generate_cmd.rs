//! `docsmith generate` and `docsmith outline`: first drafts from a topic.

use anyhow::Result;
use tracing::info;

use docsmith_core::{DocKind, ProjectStore, Snapshot, VersionStore};
use docsmith_logging::{DocEvent, DocEventLogger};
use docsmith_planner::ContentService;

use crate::app::App;
use crate::terminal_output::{dim, note_info, note_success};

/// Generate a document or deck for `topic`, store it as version 1 of a new
/// project and print the ids. Without sections an outline is suggested first.
pub async fn generate(app: &App, kind: DocKind, topic: &str, sections: Vec<String>) -> Result<()> {
    let user = app.user().await?;
    let store = app.store()?;
    let content = ContentService::new(app.generator()?);

    let sections = if sections.is_empty() {
        let outline = content.suggest_outline(topic, kind).await?;
        note_info(&format!("Using suggested outline: {}", outline.join(", ")));
        outline
    } else {
        sections
    };

    let snapshot: Snapshot = match kind {
        DocKind::Word => content.generate_document(topic, &sections).await?.into(),
        DocKind::Slides => content.generate_presentation(topic, &sections).await?.into(),
    };

    let project = store.create_project(&user.user_id, topic, kind).await?;
    let version = store.create_version(project.id, snapshot).await?;
    info!(project_id = %project.id, version_id = %version.id, "Stored first draft");

    DocEventLogger::log_event(
        &user.user_id,
        DocEvent::Generated {
            kind: kind.to_string(),
            topic: topic.to_string(),
            project_id: project.id.to_string(),
            version_number: version.version_number,
        },
    );

    note_success(&format!("Generated {kind} project '{topic}'"));
    println!("  project  {}", project.id);
    println!("  version  {} {}", version.id, dim(&format!("(#{})", version.version_number)));
    Ok(())
}

/// Print suggested section headings or slide titles for `topic`.
pub async fn outline(app: &App, kind: DocKind, topic: &str) -> Result<()> {
    let content = ContentService::new(app.generator()?);
    let outline = content.suggest_outline(topic, kind).await?;
    for (i, entry) in outline.iter().enumerate() {
        println!("{:>2}. {entry}", i + 1);
    }
    Ok(())
}
