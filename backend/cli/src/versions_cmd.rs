//! `docsmith projects`, `docsmith versions` and `docsmith show`.

use anyhow::Result;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use docsmith_core::{Project, ProjectStore, Version, VersionStore};

use crate::app::App;
use crate::terminal_output::{note_info, render_table, Column};

pub async fn projects(app: &App) -> Result<()> {
    let user = app.user().await?;
    let projects = app.store()?.list_projects(&user.user_id).await?;
    if projects.is_empty() {
        note_info("No projects yet");
        return Ok(());
    }
    print!("{}", projects_table(&projects));
    Ok(())
}

pub async fn versions(app: &App, project_id: Uuid) -> Result<()> {
    let user = app.user().await?;
    let store = app.store()?;
    let project = app.owned_project(&*store, &user, project_id).await?;
    let versions = store.list_versions(project_id).await?;

    println!("{} ({})\n", project.title, project.kind);
    print!("{}", versions_table(&versions));
    Ok(())
}

/// Print one version's block/slide tree as JSON.
pub async fn show(app: &App, project_id: Uuid, version_id: Uuid) -> Result<()> {
    let user = app.user().await?;
    let store = app.store()?;
    app.owned_project(&*store, &user, project_id).await?;
    let version = store.get_version(project_id, version_id).await?;
    println!("{}", serde_json::to_string_pretty(&version.snapshot)?);
    Ok(())
}

fn timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

fn projects_table(projects: &[Project]) -> String {
    let columns = [
        Column::left("Project"),
        Column::left("Kind"),
        Column::left("Title").max_width(40),
        Column::left("Created"),
    ];
    let rows: Vec<Vec<String>> = projects
        .iter()
        .map(|p| {
            vec![
                p.id.to_string(),
                p.kind.to_string(),
                p.title.clone(),
                timestamp(&p.created_at),
            ]
        })
        .collect();
    render_table(&columns, &rows)
}

fn versions_table(versions: &[Version]) -> String {
    let columns = [
        Column::right("#"),
        Column::left("Version"),
        Column::left("Current"),
        Column::left("Created"),
    ];
    let rows: Vec<Vec<String>> = versions
        .iter()
        .map(|v| {
            vec![
                v.version_number.to_string(),
                v.id.to_string(),
                if v.is_current { "yes" } else { "" }.to_string(),
                timestamp(&v.created_at),
            ]
        })
        .collect();
    render_table(&columns, &rows)
}
