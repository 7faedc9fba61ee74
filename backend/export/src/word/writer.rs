//! Document to `.docx` writer.

use std::io::Cursor;

use docx_rs::*;
use tracing::debug;

use docsmith_core::{Block, Document, Row};
use docsmith_markdown::{tokenize, SpanStyle};

use super::numbering::DocxNumbering;
use super::styles::{self, CODE_BLOCK_STYLE, LIST_BULLET_STYLE, LIST_NUMBER_STYLE, TABLE_GRID_STYLE};
use super::{BODY_SIZE, CODE_SHADING, CODE_SIZE, PAGE_MARGIN, TEXT_WIDTH};
use crate::{ExportError, Result};

/// Renders a [`Document`] into WordprocessingML bytes.
///
/// Block order is preserved and each heading block becomes exactly one heading
/// paragraph. Inline markers in paragraph, list, cell and fallback text become
/// styled runs.
#[derive(Debug, Default)]
pub struct DocxWriter {
    numbering: DocxNumbering,
}

impl DocxWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(mut self, doc: &Document) -> Result<Vec<u8>> {
        let mut docx = Docx::new()
            .default_fonts(styles::body_fonts())
            .default_size(BODY_SIZE)
            .page_margin(
                PageMargin::new()
                    .top(PAGE_MARGIN)
                    .bottom(PAGE_MARGIN)
                    .left(PAGE_MARGIN)
                    .right(PAGE_MARGIN),
            );
        docx = styles::apply(docx);

        for block in &doc.blocks {
            docx = self.process_block(docx, block);
        }

        docx = self.numbering.apply(docx);

        let mut buffer = Vec::new();
        docx.build()
            .pack(&mut Cursor::new(&mut buffer))
            .map_err(|e| ExportError::Pack(e.to_string()))?;

        debug!(title = %doc.title, blocks = doc.blocks.len(), bytes = buffer.len(), "rendered docx");
        Ok(buffer)
    }

    fn process_block(&mut self, docx: Docx, block: &Block) -> Docx {
        match block {
            Block::Heading { level, text } => docx.add_paragraph(heading_paragraph(*level, text)),
            Block::Paragraph { text } => {
                if text.is_empty() {
                    return docx;
                }
                docx.add_paragraph(rich_paragraph(Paragraph::new(), text))
            }
            Block::BulletList { items } => {
                let num_id = self.numbering.bullet_id();
                list_paragraphs(docx, items, LIST_BULLET_STYLE, num_id)
            }
            Block::NumberedList { items } => {
                if items.is_empty() {
                    return docx;
                }
                let num_id = self.numbering.next_numbered_id();
                list_paragraphs(docx, items, LIST_NUMBER_STYLE, num_id)
            }
            Block::Table { rows } => match table(rows) {
                Some(table) => docx.add_table(table),
                None => {
                    debug!("skipping table without columns");
                    docx
                }
            },
            Block::Code { text } => docx.add_paragraph(code_paragraph(text)),
            Block::Fallback { .. } => {
                let text = block.plain_text();
                if text.trim().is_empty() {
                    return docx;
                }
                docx.add_paragraph(rich_paragraph(Paragraph::new(), &text))
            }
        }
    }
}

fn heading_paragraph(level: u8, text: &str) -> Paragraph {
    let paragraph = Paragraph::new()
        .style(&styles::heading_style_id(level))
        .add_run(Run::new().add_text(text));
    if level <= 1 {
        paragraph.align(AlignmentType::Center)
    } else {
        paragraph
    }
}

fn list_paragraphs(mut docx: Docx, items: &[String], style: &str, num_id: usize) -> Docx {
    for item in items {
        let paragraph = Paragraph::new()
            .style(style)
            .numbering(NumberingId::new(num_id), IndentLevel::new(0));
        docx = docx.add_paragraph(rich_paragraph(paragraph, item));
    }
    docx
}

/// Appends one run per inline span of `text`.
fn rich_paragraph(mut paragraph: Paragraph, text: &str) -> Paragraph {
    for span in tokenize(text) {
        let run = Run::new().add_text(&span.text);
        let run = match span.style {
            SpanStyle::Plain => run,
            SpanStyle::Bold => run.bold(),
            SpanStyle::Italic => run.italic(),
            SpanStyle::Code => code_run(run),
        };
        paragraph = paragraph.add_run(run);
    }
    paragraph
}

fn code_run(run: Run) -> Run {
    run.fonts(styles::code_fonts())
        .size(CODE_SIZE)
        .shading(Shading::new().fill(CODE_SHADING))
}

/// A code block is one paragraph; embedded newlines become line breaks.
fn code_paragraph(text: &str) -> Paragraph {
    let mut run = Run::new();
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        run = run.add_text(line);
    }
    Paragraph::new().style(CODE_BLOCK_STYLE).add_run(code_run(run))
}

/// Column count comes from the first row. Longer rows are truncated and
/// shorter rows padded with empty cells.
fn table(rows: &[Row]) -> Option<Table> {
    let columns = rows.first()?.cells.len();
    if columns == 0 {
        return None;
    }

    let table_rows = rows
        .iter()
        .map(|row| {
            let cells = (0..columns)
                .map(|col| {
                    let text = row.cells.get(col).map(String::as_str).unwrap_or("");
                    TableCell::new().add_paragraph(rich_paragraph(Paragraph::new(), text))
                })
                .collect();
            TableRow::new(cells)
        })
        .collect();

    Some(
        Table::new(table_rows)
            .style(TABLE_GRID_STYLE)
            .set_grid(vec![TEXT_WIDTH / columns; columns]),
    )
}
