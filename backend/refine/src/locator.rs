use std::ops::Range;

use docsmith_core::{Block, DocError, DocResult, Document, LookupKind, Presentation};

/// Half-open block range of a word section: the heading plus every block up
/// to the next heading or the end of the document.
///
/// Only [`locate_section`] builds one, so `start < end <= blocks.len()` holds
/// for the document it was located in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpan {
    start: usize,
    end: usize,
}

impl SectionSpan {
    /// Index of the section heading.
    pub fn start(&self) -> usize {
        self.start
    }

    /// One past the last block of the section.
    pub fn end(&self) -> usize {
        self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn blocks<'a>(&self, doc: &'a Document) -> &'a [Block] {
        &doc.blocks[self.range()]
    }
}

/// Find the first heading whose text equals `title` exactly.
pub fn locate_section(doc: &Document, title: &str) -> DocResult<SectionSpan> {
    let start = doc
        .blocks
        .iter()
        .position(|block| matches!(block, Block::Heading { text, .. } if text == title))
        .ok_or_else(|| DocError::not_found(LookupKind::Section, title))?;

    let end = doc.blocks[start + 1..]
        .iter()
        .position(Block::is_heading)
        .map_or(doc.blocks.len(), |offset| start + 1 + offset);

    Ok(SectionSpan { start, end })
}

/// Index of the first slide whose title equals `title` exactly.
pub fn locate_slide(pres: &Presentation, title: &str) -> DocResult<usize> {
    pres.slides
        .iter()
        .position(|slide| slide.title == title)
        .ok_or_else(|| DocError::not_found(LookupKind::Slide, title))
}

#[cfg(test)]
mod tests {
    use docsmith_core::Slide;

    use super::*;

    fn doc() -> Document {
        Document::new(
            "Report",
            vec![
                Block::heading(1, "Report"),
                Block::heading(2, "Intro"),
                Block::paragraph("intro text"),
                Block::heading(2, "Body"),
                Block::paragraph("body one"),
                Block::BulletList {
                    items: vec!["a".into()],
                },
                Block::heading(2, "Conclusion"),
                Block::paragraph("the end"),
            ],
        )
    }

    #[test]
    fn test_locate_middle_section() {
        let doc = doc();
        let span = locate_section(&doc, "Body").unwrap();
        assert_eq!(span, SectionSpan { start: 3, end: 6 });
        assert_eq!(span.blocks(&doc)[0], Block::heading(2, "Body"));
        assert_eq!(span.blocks(&doc).len(), 3);
    }

    #[test]
    fn test_last_section_runs_to_end() {
        let doc = doc();
        let span = locate_section(&doc, "Conclusion").unwrap();
        assert_eq!(span, SectionSpan { start: 6, end: 8 });
    }

    #[test]
    fn test_heading_followed_by_heading() {
        let doc = doc();
        let span = locate_section(&doc, "Report").unwrap();
        assert_eq!(span.len(), 1);
    }

    #[test]
    fn test_every_span_is_inside_the_document() {
        let doc = doc();
        for (level, title) in doc.headings() {
            let span = locate_section(&doc, title).unwrap();
            assert!(span.start() < span.end(), "{title}");
            assert!(span.end() <= doc.blocks.len(), "{title}");
            assert_eq!(span.range(), span.start()..span.end());
            assert_eq!(span.blocks(&doc)[0], Block::heading(level, title));
        }
    }

    #[test]
    fn test_exact_match_only() {
        let doc = doc();
        assert!(locate_section(&doc, "body").unwrap_err().is_not_found());
        assert!(locate_section(&doc, "Body ").unwrap_err().is_not_found());
        // Paragraph text never matches.
        assert!(locate_section(&doc, "body one").unwrap_err().is_not_found());
    }

    #[test]
    fn test_first_match_wins() {
        let doc = Document::new(
            "d",
            vec![
                Block::heading(2, "Notes"),
                Block::paragraph("first"),
                Block::heading(3, "Notes"),
                Block::paragraph("second"),
            ],
        );
        assert_eq!(locate_section(&doc, "Notes").unwrap(), SectionSpan { start: 0, end: 2 });
    }

    #[test]
    fn test_locate_slide() {
        let pres = Presentation::new(
            "Deck",
            vec![Slide::new("Intro", ["a"]), Slide::new("Details", ["b"])],
        );
        assert_eq!(locate_slide(&pres, "Details").unwrap(), 1);
        let err = locate_slide(&pres, "Nonexistent").unwrap_err();
        assert_eq!(err.to_string(), "slide 'Nonexistent' not found");
    }
}
