//! Renderers from the block model to marker text.
//!
//! Used wherever blocks are handed back to a text generator (refinement
//! prompts): inline markers are kept verbatim so the rewrite can preserve them.

use docsmith_core::{Block, Slide};

pub struct Renderer;

impl Renderer {
    /// Renders one block as markdown-like text.
    pub fn block_to_text(block: &Block) -> String {
        match block {
            Block::Heading { level, text } => {
                format!("{} {}", "#".repeat(*level as usize), text)
            }
            Block::Paragraph { text } => text.clone(),
            Block::BulletList { items } => items
                .iter()
                .map(|item| format!("- {item}"))
                .collect::<Vec<_>>()
                .join("\n"),
            Block::NumberedList { items } => items
                .iter()
                .enumerate()
                .map(|(i, item)| format!("{}. {item}", i + 1))
                .collect::<Vec<_>>()
                .join("\n"),
            Block::Table { rows } => rows
                .iter()
                .map(|row| format!("| {} |", row.cells.join(" | ")))
                .collect::<Vec<_>>()
                .join("\n"),
            Block::Code { text } => format!("```\n{text}\n```"),
            Block::Fallback { .. } => block.plain_text(),
        }
    }

    /// Renders the body of a section (everything except headings), one block
    /// per paragraph.
    pub fn section_body(blocks: &[Block]) -> String {
        blocks
            .iter()
            .filter(|block| !block.is_heading())
            .map(Self::block_to_text)
            .filter(|text| !text.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Renders a slide as a title line followed by its bullets.
    pub fn slide_to_text(slide: &Slide) -> String {
        let mut out = slide.title.clone();
        for bullet in &slide.bullets {
            out.push_str("\n- ");
            out.push_str(bullet);
        }
        out
    }
}
