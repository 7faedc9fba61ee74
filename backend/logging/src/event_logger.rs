//! Document Event Logger
//!
//! Lifecycle events (generated, exported, refined, failed) written through
//! `tracing` under the `doc_events` target, so the JSON file layer records
//! them as NDJSON.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::redact::redact_sensitive_data;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DocEvent {
    Generated {
        kind: String,
        topic: String,
        project_id: String,
        version_number: i64,
    },
    Exported {
        kind: String,
        filename: String,
        bytes: usize,
    },
    Refined {
        project_id: String,
        section_title: String,
        instruction: String,
        version_number: i64,
    },
    Failed {
        operation: String,
        error_msg: String,
    },
}

impl DocEvent {
    fn redact(&mut self) {
        match self {
            DocEvent::Generated { topic, .. } => *topic = redact_sensitive_data(topic),
            DocEvent::Exported { .. } => {}
            DocEvent::Refined { instruction, .. } => {
                *instruction = redact_sensitive_data(instruction);
            }
            DocEvent::Failed { error_msg, .. } => *error_msg = redact_sensitive_data(error_msg),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DocEventEntry {
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub event: DocEvent,
}

pub struct DocEventLogger;

impl DocEventLogger {
    /// Redact free-text fields and emit the event.
    pub fn log_event(user_id: &str, mut event: DocEvent) -> DocEventEntry {
        event.redact();

        let entry = DocEventEntry {
            user_id: user_id.into(),
            timestamp: Utc::now(),
            event,
        };

        let json = serde_json::to_string(&entry).unwrap_or_default();
        info!(target: "doc_events", event = %json, "Document event");
        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_text_is_redacted() {
        let entry = DocEventLogger::log_event(
            "u1",
            DocEvent::Refined {
                project_id: "p".into(),
                section_title: "Body".into(),
                instruction: "mention sk-abcdefghijklmnopqrstuvwxyz123456".into(),
                version_number: 2,
            },
        );
        match entry.event {
            DocEvent::Refined { instruction, .. } => {
                assert_eq!(instruction, "mention [REDACTED_TOKEN]");
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_event_tagging() {
        let event = DocEvent::Exported {
            kind: "word".into(),
            filename: "R.docx".into(),
            bytes: 10,
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "exported");
        assert_eq!(value["bytes"], 10);
    }
}
