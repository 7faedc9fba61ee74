//! Substitutes a rewritten section or slide back into its container.
//!
//! Identity rules: a word section keeps its heading `(level, text)` and a
//! slide keeps its title, whatever the rewrite returned. Everything outside
//! the replaced span is carried over unchanged and in order.

use serde_json::Value;

use docsmith_core::{Block, Document, Presentation, Slide, ValidationError};

use crate::locator::SectionSpan;

/// Replace `span` in `doc` with `replacement`.
///
/// - an empty replacement collapses the section to its heading
/// - a replacement not starting with a heading gets the original prepended
/// - a replacement starting with a heading has its level and text forced
///
/// Further headings inside the replacement are kept; they start new sections.
pub fn splice_section(doc: &Document, span: SectionSpan, mut replacement: Vec<Block>) -> Document {
    let identity = doc
        .blocks
        .get(span.start())
        .and_then(Block::heading_identity)
        .map(|(level, text)| (level, text.to_string()));

    if let Some((level, text)) = identity {
        match replacement.first_mut() {
            Some(Block::Heading {
                level: new_level,
                text: new_text,
            }) => {
                *new_level = level;
                *new_text = text;
            }
            _ => replacement.insert(0, Block::heading(level, text)),
        }
    }

    let mut blocks = Vec::with_capacity(doc.blocks.len() - span.len() + replacement.len());
    blocks.extend_from_slice(&doc.blocks[..span.start()]);
    blocks.extend(replacement);
    blocks.extend_from_slice(&doc.blocks[span.end()..]);

    Document {
        title: doc.title.clone(),
        blocks,
    }
}

/// Replace the slide at `index` with the slide described by `replacement`.
///
/// The title is forced to the original; `bullets` must be present and be an
/// array.
pub fn splice_slide(
    pres: &Presentation,
    index: usize,
    replacement: &Value,
) -> Result<Presentation, ValidationError> {
    let Some(original) = pres.slides.get(index) else {
        return Err(ValidationError::new("slide", format!("no slide at index {index}")));
    };
    let Value::Object(obj) = replacement else {
        return Err(ValidationError::new("slide", "expected a JSON object"));
    };

    let mut patched = obj.clone();
    patched.insert("title".to_string(), Value::String(original.title.clone()));
    let slide = Slide::from_value(&Value::Object(patched), "slide")?;

    let mut slides = pres.slides.clone();
    slides[index] = slide;
    Ok(Presentation {
        topic: pres.topic.clone(),
        slides,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::locator::locate_section;

    fn doc() -> Document {
        Document::new(
            "Report",
            vec![
                Block::heading(1, "Report"),
                Block::heading(2, "Intro"),
                Block::paragraph("intro text"),
                Block::heading(2, "Body"),
                Block::paragraph("body one"),
                Block::paragraph("body two"),
                Block::heading(2, "Conclusion"),
                Block::paragraph("the end"),
            ],
        )
    }

    #[test]
    fn test_heading_identity_is_forced() {
        let doc = doc();
        let span = locate_section(&doc, "Body").unwrap();
        let replacement = vec![Block::heading(4, "A Better Body"), Block::paragraph("new body")];

        let spliced = splice_section(&doc, span, replacement);
        assert_eq!(spliced.blocks[3], Block::heading(2, "Body"));
        assert_eq!(spliced.blocks[4], Block::paragraph("new body"));
    }

    #[test]
    fn test_missing_heading_is_prepended() {
        let doc = doc();
        let span = locate_section(&doc, "Body").unwrap();
        let spliced = splice_section(&doc, span, vec![Block::paragraph("only text")]);
        assert_eq!(spliced.blocks[3], Block::heading(2, "Body"));
        assert_eq!(spliced.blocks[4], Block::paragraph("only text"));
        assert_eq!(spliced.blocks[5], Block::heading(2, "Conclusion"));
    }

    #[test]
    fn test_empty_replacement_keeps_heading() {
        let doc = doc();
        let span = locate_section(&doc, "Body").unwrap();
        let spliced = splice_section(&doc, span, vec![]);
        assert_eq!(spliced.blocks.len(), doc.blocks.len() - 2);
        assert_eq!(spliced.blocks[3], Block::heading(2, "Body"));
    }

    #[test]
    fn test_count_invariant_and_outside_blocks_untouched() {
        let doc = doc();
        let span = locate_section(&doc, "Body").unwrap();
        let k = span.len();
        let replacement = vec![
            Block::heading(2, "Body"),
            Block::paragraph("p1"),
            Block::paragraph("p2"),
            Block::paragraph("p3"),
            Block::Code { text: "x".into() },
        ];
        let m = replacement.len();

        let spliced = splice_section(&doc, span, replacement);
        assert_eq!(spliced.blocks.len() as isize - doc.blocks.len() as isize, m as isize - k as isize);
        assert_eq!(spliced.blocks[..span.start()], doc.blocks[..span.start()]);
        assert_eq!(spliced.blocks[span.start() + m..], doc.blocks[span.end()..]);
        assert_eq!(spliced.title, doc.title);
    }

    #[test]
    fn test_last_section_splice() {
        let doc = doc();
        let span = locate_section(&doc, "Conclusion").unwrap();
        let spliced = splice_section(&doc, span, vec![Block::paragraph("fin")]);
        assert_eq!(
            spliced.blocks[6..],
            [Block::heading(2, "Conclusion"), Block::paragraph("fin")]
        );
    }

    fn pres() -> Presentation {
        Presentation::new(
            "Deck",
            vec![
                Slide::new("Intro", ["a", "b"]),
                Slide::new("Details", ["c"]),
                Slide::new("End", ["d"]),
            ],
        )
    }

    #[test]
    fn test_slide_title_is_forced() {
        let pres = pres();
        let replacement = json!({"title": "Deep Details", "bullets": ["x", "y", "z"]});
        let spliced = splice_slide(&pres, 1, &replacement).unwrap();
        assert_eq!(spliced.slides[1], Slide::new("Details", ["x", "y", "z"]));
        assert_eq!(spliced.slides[0], pres.slides[0]);
        assert_eq!(spliced.slides[2], pres.slides[2]);
    }

    #[test]
    fn test_slide_without_title_is_accepted() {
        let spliced = splice_slide(&pres(), 0, &json!({"bullets": []})).unwrap();
        assert_eq!(spliced.slides[0], Slide::new("Intro", Vec::<String>::new()));
    }

    #[test]
    fn test_slide_bullets_required() {
        let err = splice_slide(&pres(), 0, &json!({"title": "Intro"})).unwrap_err();
        assert_eq!(err.field, "slide.bullets");

        let err = splice_slide(&pres(), 0, &json!({"bullets": "one, two"})).unwrap_err();
        assert_eq!(err.field, "slide.bullets");

        assert!(splice_slide(&pres(), 0, &json!(["x"])).is_err());
    }
}
