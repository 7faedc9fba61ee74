//! First-draft generation: whole documents, whole decks and outlines.

use serde_json::Value;
use tracing::{info, warn};

use docsmith_core::{DocKind, DocResult, Document, Presentation, ValidationError};
use docsmith_markdown::strip_markers;

use crate::extract::{extract_json_array, extract_json_object};
use crate::generator::TextGenerator;
use crate::prompts;

/// Most entries kept from a plain-text outline reply.
pub const MAX_OUTLINE_LINES: usize = 8;

pub struct ContentService {
    generator: TextGenerator,
}

impl ContentService {
    pub fn new(generator: TextGenerator) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &TextGenerator {
        &self.generator
    }

    /// Generate a document for `topic` with the given section headings.
    pub async fn generate_document(&self, topic: &str, sections: &[String]) -> DocResult<Document> {
        let prompt = prompts::document_prompt(topic, sections);
        let reply = self.generator.generate(&prompt).await?;

        let value = extract_json_object(&reply)?;
        let doc = Document::from_value(&value, topic).map_err(|e| e.with_raw(reply.as_str()))?;

        info!(topic = %topic, blocks = doc.blocks.len(), "Generated document");
        Ok(doc)
    }

    /// Generate a presentation for `topic` with the given slide titles.
    pub async fn generate_presentation(
        &self,
        topic: &str,
        slide_titles: &[String],
    ) -> DocResult<Presentation> {
        let prompt = prompts::presentation_prompt(topic, slide_titles);
        let reply = self.generator.generate(&prompt).await?;

        let value = extract_json_object(&reply)?;
        let pres =
            Presentation::from_value(&value, topic).map_err(|e| e.with_raw(reply.as_str()))?;

        info!(topic = %topic, slides = pres.slides.len(), "Generated presentation");
        Ok(pres)
    }

    /// Suggest section headings (word) or slide titles (slides) for `topic`.
    pub async fn suggest_outline(&self, topic: &str, kind: DocKind) -> DocResult<Vec<String>> {
        let prompt = prompts::outline_prompt(topic, kind);
        let reply = self.generator.generate(&prompt).await?;
        let outline = parse_outline(&reply)?;
        info!(topic = %topic, kind = %kind, entries = outline.len(), "Suggested outline");
        Ok(outline)
    }
}

/// Parse an outline reply.
///
/// Accepts a JSON array of strings, an object with a `sections` or `slides`
/// array, or a plain-text list (one entry per line, list and emphasis markers
/// stripped, at most [`MAX_OUTLINE_LINES`]).
pub fn parse_outline(reply: &str) -> Result<Vec<String>, ValidationError> {
    if let Some(entries) = structured_outline(reply) {
        return Ok(entries);
    }

    warn!("Outline reply was not a JSON list, parsing as plain text");
    let lines: Vec<String> = reply
        .lines()
        .map(|line| {
            strip_markers(line.trim())
                .trim_start_matches(['-', ' ', '*'])
                .trim_start_matches(|c: char| c.is_ascii_digit() || c == '.')
                .trim()
                .to_string()
        })
        .filter(|line| !line.is_empty() && !line.starts_with('[') && !line.starts_with('{'))
        .take(MAX_OUTLINE_LINES)
        .collect();

    if lines.is_empty() {
        return Err(ValidationError::new("$", "no outline entries found in reply").with_raw(reply));
    }
    Ok(lines)
}

fn structured_outline(reply: &str) -> Option<Vec<String>> {
    let list = match extract_json_array(reply) {
        Ok(list) => list,
        Err(_) => {
            let object = extract_json_object(reply).ok()?;
            object.get("sections").or_else(|| object.get("slides"))?.clone()
        }
    };
    let items = list.as_array()?;
    let mut entries = Vec::with_capacity(items.len());
    for item in items {
        let Value::String(s) = item else {
            return None;
        };
        let s = s.trim();
        if !s.is_empty() {
            entries.push(s.to_string());
        }
    }
    Some(entries)
}
