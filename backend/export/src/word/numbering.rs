//! List numbering definitions.
//!
//! One abstract definition per list flavor. Bullet lists share a single
//! numbering instance; every numbered list gets its own instance with a start
//! override so each list counts from 1.

use docx_rs::*;

const NUMBERED_ABSTRACT_ID: usize = 1;
const BULLET_ABSTRACT_ID: usize = 2;
const BULLET_NUMBERING_ID: usize = 2;
const FIRST_NUMBERED_ID: usize = 3;

#[derive(Debug, Default)]
pub(crate) struct DocxNumbering {
    numbered_lists: usize,
}

impl DocxNumbering {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn list_level(format: &str, text: &str, hanging: i32) -> Level {
        Level::new(
            0,
            Start::new(1),
            NumberFormat::new(format),
            LevelText::new(text),
            LevelJc::new("left"),
        )
        .indent(Some(720), Some(SpecialIndentType::Hanging(hanging)), None, None)
    }

    pub(crate) fn bullet_id(&self) -> usize {
        BULLET_NUMBERING_ID
    }

    /// Allocate a fresh instance for the next numbered list.
    pub(crate) fn next_numbered_id(&mut self) -> usize {
        let id = FIRST_NUMBERED_ID + self.numbered_lists;
        self.numbered_lists += 1;
        id
    }

    /// Register the definitions and every allocated instance.
    pub(crate) fn apply(&self, docx: Docx) -> Docx {
        let numbered = AbstractNumbering::new(NUMBERED_ABSTRACT_ID)
            .add_level(Self::list_level("decimal", "%1.", 420));
        let bullet = AbstractNumbering::new(BULLET_ABSTRACT_ID)
            .add_level(Self::list_level("bullet", "•", 360));

        let mut docx = docx
            .add_abstract_numbering(numbered)
            .add_abstract_numbering(bullet)
            .add_numbering(Numbering::new(BULLET_NUMBERING_ID, BULLET_ABSTRACT_ID));

        for offset in 0..self.numbered_lists {
            let numbering = Numbering::new(FIRST_NUMBERED_ID + offset, NUMBERED_ABSTRACT_ID)
                .add_override(LevelOverride::new(0).start(1));
            docx = docx.add_numbering(numbering);
        }
        docx
    }
}
