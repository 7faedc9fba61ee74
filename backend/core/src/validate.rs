//! Acceptance of externally produced JSON into the block model.
//!
//! The input is usually LLM output, so the rules are lenient where content can
//! be kept (unknown block types, out-of-range heading levels, scalar list
//! items) and strict where structure would be lost (missing `blocks`,
//! `slides`, slide `title` or `bullets`).

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::model::{
    clamp_level, fallback_text, Block, DocKind, Document, Presentation, Row, Slide, Snapshot,
};

/// Keys accepted as the block container, in priority order.
pub const BLOCK_CONTAINER_KEYS: [&str; 3] = ["blocks", "sections", "content"];

const DEFAULT_HEADING_LEVEL: i64 = 2;

impl Document {
    /// Validate a parsed JSON object into a document.
    ///
    /// `default_title` is used when the input has no `title` (normally the
    /// topic the document was generated for).
    pub fn from_value(value: &Value, default_title: &str) -> Result<Self, ValidationError> {
        let obj = expect_object(value, "$")?;

        let title = match obj.get("title") {
            None | Some(Value::Null) => default_title.to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(_) => return Err(ValidationError::new("title", "expected a string")),
        };

        let (key, items) = block_container(obj)?;
        let blocks = items
            .iter()
            .enumerate()
            .map(|(i, item)| Block::from_value(item, &format!("{key}[{i}]")))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Document { title, blocks })
    }
}

impl Snapshot {
    /// Validate stored or generated JSON as the given kind of snapshot.
    pub fn from_value(kind: DocKind, value: &Value, default_title: &str) -> Result<Self, ValidationError> {
        match kind {
            DocKind::Word => Document::from_value(value, default_title).map(Snapshot::Document),
            DocKind::Slides => Presentation::from_value(value, default_title).map(Snapshot::Presentation),
        }
    }
}

/// Pick the first non-empty block container among `blocks > sections > content`.
fn block_container(obj: &Map<String, Value>) -> Result<(&'static str, &Vec<Value>), ValidationError> {
    for key in BLOCK_CONTAINER_KEYS {
        match obj.get(key) {
            None | Some(Value::Null) => continue,
            Some(Value::Array(items)) if items.is_empty() => continue,
            Some(Value::Array(items)) => return Ok((key, items)),
            Some(_) => return Err(ValidationError::new(key, "expected an array of blocks")),
        }
    }
    Err(ValidationError::new("blocks", "missing or empty 'blocks' array"))
}

/// Validate a bare JSON array of blocks (e.g. a rewritten section).
pub fn blocks_from_value(value: &Value, path: &str) -> Result<Vec<Block>, ValidationError> {
    let Value::Array(items) = value else {
        return Err(ValidationError::new(path, "expected an array of blocks"));
    };
    items
        .iter()
        .enumerate()
        .map(|(i, item)| Block::from_value(item, &format!("{path}[{i}]")))
        .collect()
}

impl Block {
    /// Validate one block. `path` is used in error messages only.
    ///
    /// Non-object entries and unrecognized `type` tags become
    /// [`Block::Fallback`]; they are never dropped.
    pub fn from_value(value: &Value, path: &str) -> Result<Self, ValidationError> {
        let Some(obj) = value.as_object() else {
            return Ok(Block::Fallback { raw: value.clone() });
        };

        let tag = match obj.get("type") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.trim().to_ascii_lowercase(),
            Some(other) => other.to_string().to_ascii_lowercase(),
        };

        let block = match tag.as_str() {
            "heading" => {
                let level = heading_level(obj.get("level"), path)?;
                let text = text_field(obj).unwrap_or_default();
                Block::Heading { level, text }
            }
            "paragraph" | "text" => Block::Paragraph {
                text: text_field(obj).unwrap_or_default(),
            },
            // Untyped objects are paragraphs when they carry text.
            "" => match text_field(obj) {
                Some(text) => Block::Paragraph { text },
                None => Block::Fallback { raw: value.clone() },
            },
            "bullet_list" | "ul" | "bulletlist" => Block::BulletList {
                items: list_items(obj, path)?,
            },
            "numbered_list" | "ol" | "numberedlist" => Block::NumberedList {
                items: list_items(obj, path)?,
            },
            "table" => Block::Table {
                rows: table_rows(obj, path)?,
            },
            "code" => Block::Code {
                text: text_field(obj).unwrap_or_default(),
            },
            _ => Block::Fallback { raw: value.clone() },
        };
        Ok(block)
    }
}

impl Presentation {
    /// Validate a parsed JSON object into a presentation.
    pub fn from_value(value: &Value, default_topic: &str) -> Result<Self, ValidationError> {
        let obj = expect_object(value, "$")?;

        let topic = match obj.get("topic") {
            None | Some(Value::Null) => default_topic.to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(_) => return Err(ValidationError::new("topic", "expected a string")),
        };

        let Some(Value::Array(items)) = obj.get("slides") else {
            return Err(ValidationError::new("slides", "missing 'slides' array"));
        };

        let slides = items
            .iter()
            .enumerate()
            .map(|(i, item)| Slide::from_value(item, &format!("slides[{i}]")))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Presentation { topic, slides })
    }
}

impl Slide {
    /// Validate one slide: `title` is required, `bullets` must be an array
    /// (possibly empty).
    pub fn from_value(value: &Value, path: &str) -> Result<Self, ValidationError> {
        let obj = expect_object(value, path)?;

        let title = match obj.get("title") {
            Some(Value::String(s)) => s.clone(),
            None | Some(Value::Null) => {
                return Err(ValidationError::new(format!("{path}.title"), "slide has no title"))
            }
            Some(_) => return Err(ValidationError::new(format!("{path}.title"), "expected a string")),
        };

        let Some(Value::Array(bullets)) = obj.get("bullets") else {
            return Err(ValidationError::new(
                format!("{path}.bullets"),
                "missing 'bullets' array",
            ));
        };

        Ok(Slide {
            title,
            bullets: bullets.iter().map(item_text).collect(),
        })
    }
}

fn expect_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, ValidationError> {
    value
        .as_object()
        .ok_or_else(|| ValidationError::new(path, "expected a JSON object"))
}

fn heading_level(value: Option<&Value>, path: &str) -> Result<u8, ValidationError> {
    let level = match value {
        None | Some(Value::Null) => Some(DEFAULT_HEADING_LEVEL),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
        }
        Some(_) => None,
    };
    level
        .map(clamp_level)
        .ok_or_else(|| ValidationError::new(format!("{path}.level"), "expected a number"))
}

/// `text`, then `content`; scalars are stringified.
fn text_field(obj: &Map<String, Value>) -> Option<String> {
    ["text", "content"].iter().find_map(|key| match obj.get(*key)? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(_) | Value::Object(_) => None,
        other => Some(other.to_string()),
    })
}

/// A list item or table cell: a string, a `{ "text": ... }` object, or any
/// other value stringified.
fn item_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Object(_) => fallback_text(value),
        other => other.to_string(),
    }
}

fn list_items(obj: &Map<String, Value>, path: &str) -> Result<Vec<String>, ValidationError> {
    match obj.get("items") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items.iter().map(item_text).collect()),
        Some(_) => Err(ValidationError::new(format!("{path}.items"), "expected an array")),
    }
}

fn table_rows(obj: &Map<String, Value>, path: &str) -> Result<Vec<Row>, ValidationError> {
    let rows = match obj.get("rows") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(rows)) => rows,
        Some(_) => return Err(ValidationError::new(format!("{path}.rows"), "expected an array")),
    };

    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let cells = match row {
                Value::Array(cells) => cells,
                Value::Object(row) => match row.get("cells") {
                    None | Some(Value::Null) => return Ok(Row::default()),
                    Some(Value::Array(cells)) => cells,
                    Some(_) => {
                        return Err(ValidationError::new(
                            format!("{path}.rows[{i}].cells"),
                            "expected an array",
                        ))
                    }
                },
                _ => {
                    return Err(ValidationError::new(
                        format!("{path}.rows[{i}]"),
                        "expected an object with 'cells'",
                    ))
                }
            };
            Ok(Row {
                cells: cells.iter().map(item_text).collect(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_basic() {
        let value = json!({
            "title": "Rust",
            "blocks": [
                {"type": "heading", "level": 1, "text": "Rust"},
                {"type": "paragraph", "text": "Fast and safe."}
            ]
        });
        let doc = Document::from_value(&value, "fallback").unwrap();
        assert_eq!(doc.title, "Rust");
        assert_eq!(doc.blocks.len(), 2);
        assert_eq!(doc.blocks[1], Block::paragraph("Fast and safe."));
    }

    #[test]
    fn test_document_default_title() {
        let value = json!({"blocks": [{"type": "paragraph", "text": "x"}]});
        let doc = Document::from_value(&value, "Ownership").unwrap();
        assert_eq!(doc.title, "Ownership");
    }

    #[test]
    fn test_document_container_priority() {
        let value = json!({
            "sections": [{"type": "paragraph", "text": "from sections"}],
            "content": [{"type": "paragraph", "text": "from content"}]
        });
        let doc = Document::from_value(&value, "t").unwrap();
        assert_eq!(doc.blocks, vec![Block::paragraph("from sections")]);

        // An empty higher-priority container falls through.
        let value = json!({
            "blocks": [],
            "content": [{"type": "paragraph", "text": "from content"}]
        });
        let doc = Document::from_value(&value, "t").unwrap();
        assert_eq!(doc.blocks, vec![Block::paragraph("from content")]);
    }

    #[test]
    fn test_document_rejects_missing_blocks() {
        let err = Document::from_value(&json!({"title": "t"}), "t").unwrap_err();
        assert_eq!(err.field, "blocks");

        let err = Document::from_value(&json!({"blocks": "nope"}), "t").unwrap_err();
        assert_eq!(err.field, "blocks");

        let err = Document::from_value(&json!([1, 2]), "t").unwrap_err();
        assert_eq!(err.field, "$");
    }

    #[test]
    fn test_heading_level_clamped_and_defaulted() {
        let value = json!({"blocks": [
            {"type": "heading", "level": 0, "text": "a"},
            {"type": "heading", "level": 42, "text": "b"},
            {"type": "heading", "text": "c"},
            {"type": "heading", "level": "3", "text": "d"},
            {"type": "heading", "level": 4.7, "text": "e"}
        ]});
        let doc = Document::from_value(&value, "t").unwrap();
        assert_eq!(
            doc.headings(),
            vec![(1, "a"), (9, "b"), (2, "c"), (3, "d"), (4, "e")]
        );
    }

    #[test]
    fn test_heading_text_defaults_but_level_must_be_numeric() {
        let doc = Document::from_value(
            &json!({"blocks": [
                {"type": "heading", "level": 2},
                {"type": "heading", "level": 3, "text": ""}
            ]}),
            "t",
        )
        .unwrap();
        assert_eq!(doc.blocks, vec![Block::heading(2, ""), Block::heading(3, "")]);

        let err = Document::from_value(
            &json!({"blocks": [{"type": "heading", "level": "big", "text": "x"}]}),
            "t",
        )
        .unwrap_err();
        assert_eq!(err.field, "blocks[0].level");
    }

    #[test]
    fn test_type_tags_are_case_insensitive_with_aliases() {
        let value = json!({"blocks": [
            {"type": "Heading", "level": 2, "text": "h"},
            {"type": "TEXT", "content": "p"},
            {"type": "ul", "items": ["a", {"text": "b"}, 3]},
            {"type": "OL", "items": ["1"]},
            {"type": "Code", "text": "fn main() {}"}
        ]});
        let doc = Document::from_value(&value, "t").unwrap();
        assert_eq!(doc.blocks[0], Block::heading(2, "h"));
        assert_eq!(doc.blocks[1], Block::paragraph("p"));
        assert_eq!(
            doc.blocks[2],
            Block::BulletList {
                items: vec!["a".into(), "b".into(), "3".into()]
            }
        );
        assert_eq!(doc.blocks[3], Block::NumberedList { items: vec!["1".into()] });
        assert_eq!(doc.blocks[4], Block::Code { text: "fn main() {}".into() });
    }

    #[test]
    fn test_unknown_blocks_are_preserved() {
        let value = json!({"blocks": [
            {"type": "quote", "text": "kept"},
            "a bare string",
            {"author": "nobody"}
        ]});
        let doc = Document::from_value(&value, "t").unwrap();
        assert_eq!(doc.blocks.len(), 3);
        assert!(doc.blocks.iter().all(|b| matches!(b, Block::Fallback { .. })));
        assert_eq!(doc.blocks[0].plain_text(), "kept");
        assert_eq!(doc.blocks[1].plain_text(), "a bare string");
    }

    #[test]
    fn test_table_rows() {
        let value = json!({"blocks": [{"type": "table", "rows": [
            {"cells": ["h1", "h2"]},
            ["a", {"text": "b"}],
            {}
        ]}]});
        let doc = Document::from_value(&value, "t").unwrap();
        let Block::Table { rows } = &doc.blocks[0] else {
            panic!("expected a table");
        };
        assert_eq!(rows[0], Row::new(["h1", "h2"]));
        assert_eq!(rows[1], Row::new(["a", "b"]));
        assert!(rows[2].cells.is_empty());

        let err = Document::from_value(
            &json!({"blocks": [{"type": "table", "rows": [5]}]}),
            "t",
        )
        .unwrap_err();
        assert_eq!(err.field, "blocks[0].rows[0]");
    }

    #[test]
    fn test_presentation_valid() {
        let value = json!({
            "topic": "Ferris",
            "slides": [
                {"title": "Intro", "bullets": ["a", "b", "c"]},
                {"title": "Empty", "bullets": []}
            ]
        });
        let pres = Presentation::from_value(&value, "x").unwrap();
        assert_eq!(pres.topic, "Ferris");
        assert_eq!(pres.slides[0], Slide::new("Intro", ["a", "b", "c"]));
        assert!(pres.slides[1].bullets.is_empty());
    }

    #[test]
    fn test_presentation_rejects_missing_bullets() {
        let value = json!({"slides": [
            {"title": "Intro", "bullets": ["a"]},
            {"title": "Broken"}
        ]});
        let err = Presentation::from_value(&value, "x").unwrap_err();
        assert_eq!(err.field, "slides[1].bullets");

        let value = json!({"slides": [{"title": "Bad", "bullets": "a, b"}]});
        let err = Presentation::from_value(&value, "x").unwrap_err();
        assert_eq!(err.field, "slides[0].bullets");
    }

    #[test]
    fn test_presentation_rejects_missing_title_or_slides() {
        let err = Presentation::from_value(&json!({"slides": [{"bullets": []}]}), "x").unwrap_err();
        assert_eq!(err.field, "slides[0].title");

        let err = Presentation::from_value(&json!({"topic": "t"}), "x").unwrap_err();
        assert_eq!(err.field, "slides");
    }

    #[test]
    fn test_blocks_from_value() {
        let blocks = blocks_from_value(&json!([{"type": "paragraph", "text": "x"}]), "reply").unwrap();
        assert_eq!(blocks, vec![Block::paragraph("x")]);
        assert!(blocks_from_value(&json!([]), "reply").unwrap().is_empty());
        assert_eq!(blocks_from_value(&json!({}), "reply").unwrap_err().field, "reply");
    }
}
