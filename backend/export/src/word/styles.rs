//! Paragraph styles referenced by the writer.

use docx_rs::*;

use super::{BODY_FONT, CODE_FONT, CODE_SIZE};

pub(crate) const TITLE_STYLE: &str = "Title";
pub(crate) const LIST_BULLET_STYLE: &str = "ListBullet";
pub(crate) const LIST_NUMBER_STYLE: &str = "ListNumber";
pub(crate) const CODE_BLOCK_STYLE: &str = "CodeBlock";
pub(crate) const TABLE_GRID_STYLE: &str = "TableGrid";

/// Style id for a heading level; level 1 is the document title.
pub(crate) fn heading_style_id(level: u8) -> String {
    if level <= 1 {
        TITLE_STYLE.to_string()
    } else {
        format!("Heading{level}")
    }
}

fn fonts(face: &str) -> RunFonts {
    RunFonts::new().ascii(face).hi_ansi(face).east_asia(face).cs(face)
}

/// Heading sizes in half-points, index 0 is level 2.
const HEADING_SIZES: [usize; 8] = [32, 28, 26, 24, 22, 22, 22, 22];

fn heading_style(level: u8, size: usize) -> Style {
    Style::new(heading_style_id(level), StyleType::Paragraph)
        .name(format!("Heading {level}"))
        .based_on("Normal")
        .next("Normal")
        .size(size)
        .bold()
}

pub(crate) fn apply(docx: Docx) -> Docx {
    let title = Style::new(TITLE_STYLE, StyleType::Paragraph)
        .name("Title")
        .based_on("Normal")
        .next("Normal")
        .fonts(fonts(BODY_FONT))
        .size(56)
        .align(AlignmentType::Center);

    let list_bullet = Style::new(LIST_BULLET_STYLE, StyleType::Paragraph)
        .name("List Bullet")
        .based_on("Normal");

    let list_number = Style::new(LIST_NUMBER_STYLE, StyleType::Paragraph)
        .name("List Number")
        .based_on("Normal");

    let code_block = Style::new(CODE_BLOCK_STYLE, StyleType::Paragraph)
        .name("Code Block")
        .based_on("Normal")
        .fonts(fonts(CODE_FONT))
        .size(CODE_SIZE);

    let table_grid = Style::new(TABLE_GRID_STYLE, StyleType::Table)
        .name("Table Grid")
        .table_align(TableAlignmentType::Left);

    let mut docx = docx
        .add_style(title)
        .add_style(list_bullet)
        .add_style(list_number)
        .add_style(code_block)
        .add_style(table_grid);

    for (offset, size) in HEADING_SIZES.iter().enumerate() {
        docx = docx.add_style(heading_style(offset as u8 + 2, *size));
    }
    docx
}

pub(crate) fn code_fonts() -> RunFonts {
    fonts(CODE_FONT)
}

pub(crate) fn body_fonts() -> RunFonts {
    fonts(BODY_FONT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_style_ids() {
        assert_eq!(heading_style_id(1), "Title");
        assert_eq!(heading_style_id(2), "Heading2");
        assert_eq!(heading_style_id(9), "Heading9");
    }
}
