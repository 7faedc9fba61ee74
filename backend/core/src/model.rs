//! Canonical block/slide model.
//!
//! A [`Document`] is an ordered list of [`Block`]s; a [`Presentation`] is an
//! ordered list of [`Slide`]s. Both serialize back to the loosely-typed JSON
//! wire shape they were accepted from (see `validate` for the inbound side).

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{json, Value};

pub const MIN_HEADING_LEVEL: u8 = 1;
pub const MAX_HEADING_LEVEL: u8 = 9;

/// One structural unit of a word-processing document.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading { level: u8, text: String },
    Paragraph { text: String },
    BulletList { items: Vec<String> },
    NumberedList { items: Vec<String> },
    Table { rows: Vec<Row> },
    Code { text: String },
    /// A block whose `type` tag was not recognized. The raw JSON is kept so the
    /// content is still rendered and round-trips unchanged.
    Fallback { raw: Value },
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Row {
    pub cells: Vec<String>,
}

impl Row {
    pub fn new<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }
}

impl Block {
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Block::Heading {
            level: clamp_level(level as i64),
            text: text.into(),
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph { text: text.into() }
    }

    pub fn is_heading(&self) -> bool {
        matches!(self, Block::Heading { .. })
    }

    /// Heading identity `(level, text)`, if this block is a heading.
    pub fn heading_identity(&self) -> Option<(u8, &str)> {
        match self {
            Block::Heading { level, text } => Some((*level, text.as_str())),
            _ => None,
        }
    }

    /// Wire tag for this block.
    pub fn type_tag(&self) -> &str {
        match self {
            Block::Heading { .. } => "heading",
            Block::Paragraph { .. } => "paragraph",
            Block::BulletList { .. } => "bullet_list",
            Block::NumberedList { .. } => "numbered_list",
            Block::Table { .. } => "table",
            Block::Code { .. } => "code",
            Block::Fallback { raw } => raw.get("type").and_then(Value::as_str).unwrap_or(""),
        }
    }

    /// Textual content of the block, without any styling.
    ///
    /// List items are newline-separated; table cells are tab-separated with
    /// one row per line.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading { text, .. } | Block::Paragraph { text } | Block::Code { text } => {
                text.clone()
            }
            Block::BulletList { items } | Block::NumberedList { items } => items.join("\n"),
            Block::Table { rows } => rows
                .iter()
                .map(|row| row.cells.join("\t"))
                .collect::<Vec<_>>()
                .join("\n"),
            Block::Fallback { raw } => fallback_text(raw),
        }
    }

    /// Serialize to the JSON wire shape.
    pub fn to_value(&self) -> Value {
        match self {
            Block::Heading { level, text } => json!({"type": "heading", "level": level, "text": text}),
            Block::Paragraph { text } => json!({"type": "paragraph", "text": text}),
            Block::BulletList { items } => json!({"type": "bullet_list", "items": items}),
            Block::NumberedList { items } => json!({"type": "numbered_list", "items": items}),
            Block::Table { rows } => json!({"type": "table", "rows": rows}),
            Block::Code { text } => json!({"type": "code", "text": text}),
            Block::Fallback { raw } => raw.clone(),
        }
    }
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

/// Best-effort text for an unrecognized block: `text`, then `content`, then the
/// stringified JSON.
pub fn fallback_text(raw: &Value) -> String {
    if let Value::String(s) = raw {
        return s.clone();
    }
    for key in ["text", "content"] {
        match raw.get(key) {
            Some(Value::String(s)) if !s.is_empty() => return s.clone(),
            Some(Value::String(_)) | Some(Value::Null) | None => {}
            Some(other) => return other.to_string(),
        }
    }
    raw.to_string()
}

/// Clamp an arbitrary heading level into `[1, 9]`.
pub fn clamp_level(level: i64) -> u8 {
    level.clamp(MIN_HEADING_LEVEL as i64, MAX_HEADING_LEVEL as i64) as u8
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub title: String,
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(title: impl Into<String>, blocks: Vec<Block>) -> Self {
        Self {
            title: title.into(),
            blocks,
        }
    }

    /// Heading identities in document order.
    pub fn headings(&self) -> Vec<(u8, &str)> {
        self.blocks.iter().filter_map(Block::heading_identity).collect()
    }

    pub fn to_value(&self) -> Value {
        json!({
            "title": self.title,
            "blocks": self.blocks.iter().map(Block::to_value).collect::<Vec<_>>(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    pub title: String,
    pub bullets: Vec<String>,
}

impl Slide {
    pub fn new<I, S>(title: impl Into<String>, bullets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: title.into(),
            bullets: bullets.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Presentation {
    pub topic: String,
    pub slides: Vec<Slide>,
}

impl Presentation {
    pub fn new(topic: impl Into<String>, slides: Vec<Slide>) -> Self {
        Self {
            topic: topic.into(),
            slides,
        }
    }

    pub fn to_value(&self) -> Value {
        json!({ "topic": self.topic, "slides": self.slides })
    }
}

/// Which container a project produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocKind {
    Word,
    Slides,
}

impl DocKind {
    /// Integer code used by the project store (1 = word, 0 = slides).
    pub fn code(self) -> i64 {
        match self {
            DocKind::Word => 1,
            DocKind::Slides => 0,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(DocKind::Word),
            0 => Some(DocKind::Slides),
            _ => None,
        }
    }
}

impl fmt::Display for DocKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocKind::Word => write!(f, "word"),
            DocKind::Slides => write!(f, "slides"),
        }
    }
}

impl std::str::FromStr for DocKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "word" | "docx" => Ok(DocKind::Word),
            "slides" | "ppt" | "pptx" => Ok(DocKind::Slides),
            other => Err(format!("unknown document kind '{other}'")),
        }
    }
}

/// The content of one version: a document or a presentation.
#[derive(Debug, Clone, PartialEq)]
pub enum Snapshot {
    Document(Document),
    Presentation(Presentation),
}

impl Snapshot {
    pub fn kind(&self) -> DocKind {
        match self {
            Snapshot::Document(_) => DocKind::Word,
            Snapshot::Presentation(_) => DocKind::Slides,
        }
    }

    /// Document title or presentation topic.
    pub fn title(&self) -> &str {
        match self {
            Snapshot::Document(doc) => &doc.title,
            Snapshot::Presentation(pres) => &pres.topic,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Snapshot::Document(doc) => doc.to_value(),
            Snapshot::Presentation(pres) => pres.to_value(),
        }
    }
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl From<Document> for Snapshot {
    fn from(doc: Document) -> Self {
        Snapshot::Document(doc)
    }
}

impl From<Presentation> for Snapshot {
    fn from(pres: Presentation) -> Self {
        Snapshot::Presentation(pres)
    }
}
