mod app;
mod config;
mod export_cmd;
mod feedback_cmd;
mod generate_cmd;
mod refine_cmd;
mod terminal_output;
mod versions_cmd;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgGroup, Parser, Subcommand};
use tracing::{error, info};
use uuid::Uuid;

use docsmith_core::{DocError, DocKind, ValidationError};
use docsmith_logging::{init_logger, redact_sensitive_data, DocEvent, DocEventLogger};

use app::App;
use config::Config;
use export_cmd::ExportArgs;
use feedback_cmd::FeedbackArgs;

#[derive(Parser)]
#[command(name = "docsmith")]
#[command(about = "Generate, refine and export Word documents and slide decks")]
#[command(version)]
struct Cli {
    /// Bearer token identifying the caller (required when Supabase is configured)
    #[arg(long, global = true)]
    token: Option<String>,

    /// SQLite database path (overrides DOCSMITH_DB)
    #[arg(long, global = true)]
    db: Option<String>,

    /// Chat model (overrides MODEL_NAME)
    #[arg(long, global = true)]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a block/slide tree to .docx or .pptx
    Export {
        /// JSON file holding a document or presentation
        input: Option<PathBuf>,
        /// Kind of the input file: word or slides
        #[arg(short, long)]
        kind: Option<DocKind>,
        /// Export a stored version instead of a file
        #[arg(long, requires = "version", conflicts_with = "input")]
        project: Option<Uuid>,
        #[arg(long, requires = "project")]
        version: Option<Uuid>,
        /// Output file or directory
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Generate a first draft and store it as a new project
    Generate {
        #[arg(short, long)]
        kind: DocKind,
        #[arg(short, long)]
        topic: String,
        /// Section heading or slide title; repeat for each. Suggested when omitted.
        #[arg(short, long = "section")]
        sections: Vec<String>,
    },
    /// Suggest section headings or slide titles for a topic
    Outline {
        #[arg(short, long)]
        kind: DocKind,
        #[arg(short, long)]
        topic: String,
    },
    /// Rewrite one section or slide and store the result as a new version
    Refine {
        #[arg(long)]
        project: Uuid,
        #[arg(long)]
        version: Uuid,
        /// Exact section heading or slide title
        #[arg(long)]
        section: String,
        /// What to change
        #[arg(long)]
        prompt: String,
    },
    /// List your projects
    Projects,
    /// List the versions of a project, newest first
    Versions {
        #[arg(long)]
        project: Uuid,
    },
    /// Print a stored version as JSON
    Show {
        #[arg(long)]
        project: Uuid,
        #[arg(long)]
        version: Uuid,
    },
    /// Like, dislike or comment on a section; lists your feedback when no action is given
    #[command(group(ArgGroup::new("reaction").args(["like", "dislike"])))]
    Feedback {
        #[arg(long)]
        project: Uuid,
        #[arg(long)]
        version: Uuid,
        #[arg(long)]
        section: Option<String>,
        #[arg(long)]
        like: bool,
        #[arg(long)]
        dislike: bool,
        #[arg(long)]
        comment: Option<String>,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Export { .. } => "export",
            Commands::Generate { .. } => "generate",
            Commands::Outline { .. } => "outline",
            Commands::Refine { .. } => "refine",
            Commands::Projects => "projects",
            Commands::Versions { .. } => "versions",
            Commands::Show { .. } => "show",
            Commands::Feedback { .. } => "feedback",
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    if let Some(model) = cli.model {
        config.model = model;
    }

    let _guard = init_logger(&config.log_dir, &config.log_level);
    info!(db = %config.db_path, model = %config.model, "Starting docsmith");

    let app = App::new(config, cli.token);
    let operation = cli.command.name();

    if let Err(e) = run(&app, cli.command).await {
        error!(operation, error = %format!("{e:#}"), "Command failed");
        DocEventLogger::log_event(
            "unknown",
            DocEvent::Failed {
                operation: operation.to_string(),
                error_msg: format!("{e:#}"),
            },
        );
        terminal_output::note_error(&failure_message(&e));
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// What the user sees for a failed command. A rejected generated reply is
/// printed after the error, redacted, so it can be fixed up and re-prompted.
fn failure_message(e: &anyhow::Error) -> String {
    let message = format!("{e:#}");
    let raw = e.chain().find_map(|cause| {
        let validation = cause.downcast_ref::<ValidationError>().or_else(|| {
            match cause.downcast_ref::<DocError>() {
                Some(DocError::Validation(v)) => Some(v),
                _ => None,
            }
        });
        validation.and_then(|v| v.raw.as_deref())
    });
    match raw {
        Some(raw) => format!("{message}\n\nRaw reply:\n{}", redact_sensitive_data(raw)),
        None => message,
    }
}

async fn run(app: &App, command: Commands) -> Result<()> {
    match command {
        Commands::Export {
            input,
            kind,
            project,
            version,
            out,
        } => {
            export_cmd::run(
                app,
                ExportArgs {
                    input,
                    kind,
                    project,
                    version,
                    out,
                },
            )
            .await
        }
        Commands::Generate {
            kind,
            topic,
            sections,
        } => generate_cmd::generate(app, kind, &topic, sections).await,
        Commands::Outline { kind, topic } => generate_cmd::outline(app, kind, &topic).await,
        Commands::Refine {
            project,
            version,
            section,
            prompt,
        } => refine_cmd::run(app, project, version, &section, &prompt).await,
        Commands::Projects => versions_cmd::projects(app).await,
        Commands::Versions { project } => versions_cmd::versions(app, project).await,
        Commands::Show { project, version } => versions_cmd::show(app, project, version).await,
        Commands::Feedback {
            project,
            version,
            section,
            like,
            dislike,
            comment,
        } => {
            let liked = match (like, dislike) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            feedback_cmd::run(
                app,
                FeedbackArgs {
                    project,
                    version,
                    section,
                    liked,
                    comment,
                },
            )
            .await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use clap::CommandFactory;

    #[test]
    fn test_failure_message_shows_redacted_raw_reply() {
        let reply = "Sure! Here is the deck, key sk-abcdefghijklmnopqrstuvwxyz012345";
        let err: Result<()> = Err(DocError::from(
            ValidationError::new("$", "no JSON presentation found in reply").with_raw(reply),
        ))
        .context("generating draft");
        let message = failure_message(&err.unwrap_err());

        assert!(message.starts_with("generating draft: invalid '$'"));
        assert!(message.contains("Raw reply:\nSure! Here is the deck"));
        assert!(message.contains("[REDACTED_TOKEN]"));
        assert!(!message.contains("sk-abcdefghij"));

        let bare = anyhow::Error::new(ValidationError::new("$", "empty").with_raw("just text"));
        assert!(failure_message(&bare).ends_with("Raw reply:\njust text"));
    }

    #[test]
    fn test_failure_message_without_raw_is_unchanged() {
        let err = anyhow::Error::new(ValidationError::new("blocks[0].level", "not a number"));
        assert_eq!(failure_message(&err), "invalid 'blocks[0].level': not a number");

        let err = anyhow::Error::new(DocError::Forbidden("not your project".into()));
        assert_eq!(failure_message(&err), "forbidden: not your project");
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_refine() {
        let project = Uuid::new_v4();
        let version = Uuid::new_v4();
        let cli = Cli::try_parse_from([
            "docsmith",
            "refine",
            "--project",
            &project.to_string(),
            "--version",
            &version.to_string(),
            "--section",
            "Body",
            "--prompt",
            "shorter",
        ])
        .unwrap();
        match cli.command {
            Commands::Refine { section, .. } => assert_eq!(section, "Body"),
            _ => panic!("expected refine"),
        }
    }

    #[test]
    fn test_parse_generate_sections_and_kind() {
        let cli = Cli::try_parse_from([
            "docsmith", "generate", "--kind", "pptx", "--topic", "Rust", "-s", "Intro", "-s", "End",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate { kind, sections, .. } => {
                assert_eq!(kind, DocKind::Slides);
                assert_eq!(sections, vec!["Intro", "End"]);
            }
            _ => panic!("expected generate"),
        }
        assert!(Cli::try_parse_from(["docsmith", "outline", "--kind", "pdf", "--topic", "x"]).is_err());
    }

    #[test]
    fn test_like_and_dislike_conflict() {
        let project = Uuid::new_v4().to_string();
        let version = Uuid::new_v4().to_string();
        let result = Cli::try_parse_from([
            "docsmith", "feedback", "--project", &project, "--version", &version, "--section", "Intro",
            "--like", "--dislike",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_feedback_requires_project() {
        let project = Uuid::new_v4().to_string();
        let version = Uuid::new_v4().to_string();
        let without = Cli::try_parse_from(["docsmith", "feedback", "--version", &version, "--like"]);
        assert!(without.is_err());

        let cli = Cli::try_parse_from([
            "docsmith", "feedback", "--project", &project, "--version", &version,
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Feedback { project: p, .. } if p.to_string() == project));
    }
}
