//! `docsmith refine`: rewrite one section or slide of a stored version.

use anyhow::Result;
use uuid::Uuid;

use docsmith_logging::{DocEvent, DocEventLogger};
use docsmith_refine::RefinementService;

use crate::app::App;
use crate::terminal_output::{dim, note_success};

pub async fn run(
    app: &App,
    project_id: Uuid,
    version_id: Uuid,
    section: &str,
    instruction: &str,
) -> Result<()> {
    let user = app.user().await?;
    let store = app.store()?;
    let service = RefinementService::new(app.generator()?, store.clone(), store);

    let version = service
        .refine(&user.user_id, project_id, version_id, section, instruction)
        .await?;

    DocEventLogger::log_event(
        &user.user_id,
        DocEvent::Refined {
            project_id: project_id.to_string(),
            section_title: section.to_string(),
            instruction: instruction.to_string(),
            version_number: version.version_number,
        },
    );

    note_success(&format!("Refined '{section}'"));
    println!("  version  {} {}", version.id, dim(&format!("(#{})", version.version_number)));
    Ok(())
}
