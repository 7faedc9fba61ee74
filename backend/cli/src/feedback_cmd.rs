//! `docsmith feedback`: like, dislike or comment on a section of a version,
//! or list the caller's feedback on it.

use anyhow::{Context, Result};
use uuid::Uuid;

use docsmith_core::{FeedbackStore, Identity, ProjectStore, SectionFeedback, VersionStore};

use crate::app::App;
use crate::terminal_output::{note_info, note_success, render_table, Column};

pub struct FeedbackArgs {
    pub project: Uuid,
    pub version: Uuid,
    pub section: Option<String>,
    pub liked: Option<bool>,
    pub comment: Option<String>,
}

enum Outcome {
    Listed(Vec<SectionFeedback>),
    Saved(String),
}

pub async fn run(app: &App, args: FeedbackArgs) -> Result<()> {
    let user = app.user().await?;
    let store = app.store()?;

    match record(app, &*store, &user, &args).await? {
        Outcome::Listed(feedback) if feedback.is_empty() => note_info("No feedback on this version"),
        Outcome::Listed(feedback) => print!("{}", feedback_table(&feedback)),
        Outcome::Saved(section) => note_success(&format!("Saved feedback on '{section}'")),
    }
    Ok(())
}

/// Apply or list feedback once the caller owns the project and the version
/// belongs to it.
async fn record<S>(app: &App, store: &S, user: &Identity, args: &FeedbackArgs) -> Result<Outcome>
where
    S: ProjectStore + VersionStore + FeedbackStore,
{
    app.owned_project(store, user, args.project).await?;
    store.get_version(args.project, args.version).await?;

    if args.liked.is_none() && args.comment.is_none() {
        let feedback = store.list_feedback(args.version, &user.user_id).await?;
        return Ok(Outcome::Listed(feedback));
    }

    let section = args
        .section
        .as_deref()
        .context("--section is required to leave feedback")?;

    if let Some(liked) = args.liked {
        store
            .set_reaction(args.version, &user.user_id, section, liked)
            .await?;
    }
    if let Some(comment) = &args.comment {
        store
            .set_comment(args.version, &user.user_id, section, comment)
            .await?;
    }
    Ok(Outcome::Saved(section.to_string()))
}

fn reaction(liked: Option<bool>) -> &'static str {
    match liked {
        Some(true) => "like",
        Some(false) => "dislike",
        None => "",
    }
}

fn feedback_table(feedback: &[SectionFeedback]) -> String {
    let columns = [
        Column::left("Section").max_width(32),
        Column::left("Reaction"),
        Column::left("Comment").max_width(60),
    ];
    let rows: Vec<Vec<String>> = feedback
        .iter()
        .map(|f| {
            vec![
                f.section_title.clone(),
                reaction(f.liked).to_string(),
                f.comment.clone().unwrap_or_default(),
            ]
        })
        .collect();
    render_table(&columns, &rows)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use docsmith_core::{Block, DocError, DocKind, Document, Snapshot};
    use docsmith_store::InMemoryStore;

    use super::*;
    use crate::config::Config;
    use crate::terminal_output::strip_ansi;

    fn user(id: &str) -> Identity {
        Identity {
            user_id: id.into(),
            email: None,
        }
    }

    fn doc(title: &str) -> Snapshot {
        Document::new(title, vec![Block::heading(1, title)]).into()
    }

    fn like(project: Uuid, version: Uuid) -> FeedbackArgs {
        FeedbackArgs {
            project,
            version,
            section: Some("Plan".into()),
            liked: Some(true),
            comment: None,
        }
    }

    #[tokio::test]
    async fn test_feedback_is_scoped_to_owned_project() {
        let store = InMemoryStore::new();
        let app = App::new(Config::default(), None);
        let plan = store.create_project("dana", "Plan", DocKind::Word).await.unwrap();
        let plan_v1 = store.create_version(plan.id, doc("Plan")).await.unwrap();
        let other = store.create_project("dana", "Other", DocKind::Word).await.unwrap();
        let other_v1 = store.create_version(other.id, doc("Other")).await.unwrap();

        let err = record(&app, &store, &user("eve"), &like(plan.id, plan_v1.id))
            .await
            .err()
            .unwrap();
        assert!(matches!(err.downcast_ref::<DocError>(), Some(DocError::Forbidden(_))));

        let err = record(&app, &store, &user("dana"), &like(plan.id, other_v1.id))
            .await
            .err()
            .unwrap();
        assert!(err.downcast_ref::<DocError>().is_some_and(DocError::is_not_found));

        // nothing was written by the rejected calls
        assert!(store.list_feedback(plan_v1.id, "eve").await.unwrap().is_empty());
        assert!(store.list_feedback(other_v1.id, "dana").await.unwrap().is_empty());

        let saved = record(&app, &store, &user("dana"), &like(plan.id, plan_v1.id))
            .await
            .unwrap();
        assert!(matches!(saved, Outcome::Saved(section) if section == "Plan"));

        let listing = FeedbackArgs {
            liked: None,
            section: None,
            ..like(plan.id, plan_v1.id)
        };
        match record(&app, &store, &user("dana"), &listing).await.unwrap() {
            Outcome::Listed(feedback) => {
                assert_eq!(feedback.len(), 1);
                assert_eq!(feedback[0].liked, Some(true));
            }
            Outcome::Saved(_) => panic!("expected a listing"),
        }
    }

    #[test]
    fn test_feedback_table() {
        let entry = |section: &str, liked, comment: Option<&str>| SectionFeedback {
            version_id: Uuid::nil(),
            user_id: "dana".into(),
            section_title: section.into(),
            liked,
            comment: comment.map(str::to_string),
            updated_at: Utc::now(),
        };
        let table = strip_ansi(&feedback_table(&[
            entry("Intro", Some(true), None),
            entry("Body", None, Some("too long")),
        ]));
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[2].contains("Intro") && lines[2].contains("like"));
        assert!(lines[3].contains("Body") && lines[3].contains("too long"));
        assert!(!lines[3].contains("like"));
    }
}
