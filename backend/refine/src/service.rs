//! Refinement orchestration over the project and version stores.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use docsmith_core::{
    blocks_from_value, DocError, DocResult, ProjectStore, Snapshot, Version, VersionStore,
};
use docsmith_planner::{extract_json_array, extract_json_object, prompts, TextGenerator};

use crate::locator::{locate_section, locate_slide};
use crate::splicer::{splice_section, splice_slide};

pub struct RefinementService {
    generator: TextGenerator,
    projects: Arc<dyn ProjectStore>,
    versions: Arc<dyn VersionStore>,
}

impl RefinementService {
    pub fn new(
        generator: TextGenerator,
        projects: Arc<dyn ProjectStore>,
        versions: Arc<dyn VersionStore>,
    ) -> Self {
        Self {
            generator,
            projects,
            versions,
        }
    }

    /// Rewrite one section of a stored version and append the result as the
    /// project's new current version.
    ///
    /// Fails with `Forbidden` if `owner` does not own the project and with
    /// `NotFound` if the version or section does not exist. Neither case calls
    /// the generator or writes a version.
    pub async fn refine(
        &self,
        owner: &str,
        project_id: Uuid,
        version_id: Uuid,
        section_title: &str,
        instruction: &str,
    ) -> DocResult<Version> {
        let project = self.projects.get_project(project_id).await?;
        if !project.is_owned_by(owner) {
            warn!(project_id = %project_id, "Refinement rejected: caller does not own project");
            return Err(DocError::Forbidden(format!(
                "project '{project_id}' belongs to another user"
            )));
        }

        let base = self.versions.get_version(project_id, version_id).await?;
        let refined = self
            .refine_snapshot(&base.snapshot, section_title, instruction)
            .await?;

        let version = self.versions.create_version(project_id, refined).await?;
        info!(
            project_id = %project_id,
            base_version = base.version_number,
            version_number = version.version_number,
            section = %section_title,
            "Refined section"
        );
        Ok(version)
    }

    /// Rewrite one section of `snapshot` without touching any store.
    pub async fn refine_snapshot(
        &self,
        snapshot: &Snapshot,
        section_title: &str,
        instruction: &str,
    ) -> DocResult<Snapshot> {
        match snapshot {
            Snapshot::Document(doc) => {
                let span = locate_section(doc, section_title)?;
                let prompt = prompts::word_section_prompt(span.blocks(doc), instruction);
                let reply = self.generator.generate(&prompt).await?;

                let value = extract_json_array(&reply)?;
                let blocks =
                    blocks_from_value(&value, "blocks").map_err(|e| e.with_raw(reply.as_str()))?;
                Ok(splice_section(doc, span, blocks).into())
            }
            Snapshot::Presentation(pres) => {
                let index = locate_slide(pres, section_title)?;
                let prompt = prompts::slide_prompt(&pres.slides[index], instruction);
                let reply = self.generator.generate(&prompt).await?;

                let value = extract_json_object(&reply)?;
                let spliced =
                    splice_slide(pres, index, &value).map_err(|e| e.with_raw(reply.as_str()))?;
                Ok(spliced.into())
            }
        }
    }
}
