//! Prompt builders for every generation call.
//!
//! Each builder asks for a bare JSON reply; replies are still run through
//! [`crate::extract`] because models do not always comply.

use docsmith_core::{Block, DocKind, Slide};
use docsmith_markdown::Renderer;

fn json_list(items: &[String]) -> String {
    serde_json::to_string_pretty(items).unwrap_or_else(|_| format!("{items:?}"))
}

/// Full document content for `topic` with one level-2 section per heading.
pub fn document_prompt(topic: &str, sections: &[String]) -> String {
    format!(
        r#"You are a structured document generator.

Reply with ONLY valid JSON describing the content of a Word document. No
explanation and no markdown code fences.

MAIN TOPIC:
{topic}

SECTION HEADINGS:
{sections}

REQUIREMENTS:
- A top-level "title" string.
- A "blocks" array; order matters.
- The first block is a level-1 heading with the main topic.
- For each section heading, in order:
    - a level-2 heading with exactly that text
    - one or more paragraphs (5-7 sentences in total)
- Paragraph text may use **bold**, *italic* and `code` markers.
- Allowed block types: heading, paragraph, bullet_list, numbered_list, table, code.

FORMAT EXAMPLE:
{{
  "title": "Document Title",
  "blocks": [
    {{"type": "heading", "level": 1, "text": "Main Topic"}},
    {{"type": "heading", "level": 2, "text": "Section Heading"}},
    {{"type": "paragraph", "text": "Section content..."}},
    {{"type": "bullet_list", "items": ["point", "point"]}}
  ]
}}
"#,
        sections = json_list(sections),
    )
}

/// Slide content for `topic`, one slide per title.
pub fn presentation_prompt(topic: &str, slide_titles: &[String]) -> String {
    format!(
        r#"You are a presentation generator.

Reply with ONLY valid JSON describing the content of a slide deck. No
explanation and no markdown.

PRESENTATION TOPIC:
{topic}

SLIDE TITLES:
{titles}

REQUIREMENTS:
- A "topic" string and a "slides" array, one entry per slide title, in order.
- Each slide has a "title" (exactly the given title) and "bullets": 3-6 short,
  clear bullet points.
- Keep the language simple and presentation-friendly.

FORMAT EXAMPLE:
{{
  "topic": "Sample Presentation",
  "slides": [
    {{"title": "Introduction", "bullets": ["Point one", "Point two", "Point three"]}}
  ]
}}
"#,
        titles = json_list(slide_titles),
    )
}

/// Suggested section headings (word) or slide titles (slides) for `topic`.
pub fn outline_prompt(topic: &str, kind: DocKind) -> String {
    let (count, unit, container, example) = match kind {
        DocKind::Word => (
            "5-7",
            "section headings for a Word document",
            "Sections",
            r#"["Introduction", "Background", "Main Analysis", "Key Findings", "Discussion", "Conclusion"]"#,
        ),
        DocKind::Slides => (
            "5-8",
            "slide titles for a presentation",
            "Slides",
            r#"["Introduction", "Overview", "Key Points", "Details", "Analysis", "Conclusion"]"#,
        ),
    };
    format!(
        r#"You help people outline documents.

Suggest {count} logical {unit}.

TOPIC: {topic}

REQUIREMENTS:
- {container} flow from introduction to conclusion.
- Each entry is a clear, concise title of 2-6 words.
- Reply with ONLY a JSON array of strings.

EXAMPLE:
{example}
"#
    )
}

/// Rewrite of one word section. `section` starts at the section heading (if
/// the document had one for it) and runs to the next heading.
pub fn word_section_prompt(section: &[Block], instruction: &str) -> String {
    let (level, heading) = section
        .first()
        .and_then(Block::heading_identity)
        .map(|(level, text)| (level, text.to_string()))
        .unwrap_or((2, String::new()));
    let heading_line = if heading.is_empty() {
        String::new()
    } else {
        format!("Heading: {heading}\n")
    };
    let body = Renderer::section_body(section);
    let heading_json = serde_json::to_string(&heading).unwrap_or_else(|_| format!("{heading:?}"));

    format!(
        r#"You refine sections of a document following the user's instruction.

CURRENT SECTION:
{heading_line}Content:
{body}

INSTRUCTION:
{instruction}

REQUIREMENTS:
- Rewrite only the section content according to the instruction.
- Keep the heading unchanged (same text, level {level}).
- Keep any **bold**, *italic* and `code` markers that still apply.
- Reply with ONLY a JSON array of blocks.

FORMAT EXAMPLE:
[
  {{"type": "heading", "level": {level}, "text": {heading_json}}},
  {{"type": "paragraph", "text": "refined paragraph content..."}}
]
"#
    )
}

/// Rewrite of one slide.
pub fn slide_prompt(slide: &Slide, instruction: &str) -> String {
    let title_json =
        serde_json::to_string(&slide.title).unwrap_or_else(|_| format!("{:?}", slide.title));
    format!(
        r#"You refine presentation slides following the user's instruction.

CURRENT SLIDE:
Title: {title}
Bullets:
{bullets}

INSTRUCTION:
{instruction}

REQUIREMENTS:
- Rewrite the slide content according to the instruction.
- Keep the title unchanged.
- Keep 3-6 bullet points.
- Reply with ONLY a JSON object.

FORMAT EXAMPLE:
{{"title": {title_json}, "bullets": ["refined bullet 1", "refined bullet 2"]}}
"#,
        title = slide.title,
        bullets = json_list(&slide.bullets),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_prompt_lists_sections() {
        let prompt = document_prompt("Rust", &["Intro".into(), "Ownership".into()]);
        assert!(prompt.contains("MAIN TOPIC:\nRust"));
        assert!(prompt.contains("\"Ownership\""));
        assert!(prompt.contains(r#"{"type": "heading", "level": 1, "text": "Main Topic"}"#));
    }

    #[test]
    fn test_outline_prompt_counts() {
        assert!(outline_prompt("Rust", DocKind::Word).contains("Suggest 5-7"));
        assert!(outline_prompt("Rust", DocKind::Slides).contains("Suggest 5-8"));
    }

    #[test]
    fn test_word_section_prompt_carries_heading_and_body() {
        let section = vec![
            Block::heading(3, "Say \"hi\""),
            Block::paragraph("Old **text**."),
        ];
        let prompt = word_section_prompt(&section, "make it shorter");
        assert!(prompt.contains("Heading: Say \"hi\"\nContent:\nOld **text**."));
        assert!(prompt.contains("level 3"));
        assert!(prompt.contains(r#""text": "Say \"hi\"""#));
        assert!(prompt.contains("INSTRUCTION:\nmake it shorter"));
    }

    #[test]
    fn test_slide_prompt() {
        let slide = Slide::new("Intro", ["a", "b"]);
        let prompt = slide_prompt(&slide, "more formal");
        assert!(prompt.contains("Title: Intro"));
        assert!(prompt.contains(r#"{"title": "Intro", "bullets""#));
    }
}
