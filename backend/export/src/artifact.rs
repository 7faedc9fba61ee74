//! Rendered containers ready to hand to a caller.

use bytes::Bytes;

pub const DOCX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const PPTX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

#[derive(Debug, Clone)]
pub struct Artifact {
    pub filename: String,
    pub media_type: &'static str,
    pub data: Bytes,
}

impl Artifact {
    pub fn docx(title: &str, data: Vec<u8>) -> Self {
        Self {
            filename: format!("{title}.docx"),
            media_type: DOCX_MEDIA_TYPE,
            data: Bytes::from(data),
        }
    }

    pub fn pptx(topic: &str, data: Vec<u8>) -> Self {
        Self {
            filename: format!("{topic}.pptx"),
            media_type: PPTX_MEDIA_TYPE,
            data: Bytes::from(data),
        }
    }

    /// `filename` with path separators and control characters replaced, for
    /// writing to a local directory.
    pub fn safe_filename(&self) -> String {
        let cleaned: String = self
            .filename
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
                c if c.is_control() => '_',
                c => c,
            })
            .collect();
        if cleaned.starts_with('.') {
            format!("_{cleaned}")
        } else {
            cleaned
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filenames_and_media_types() {
        let docx = Artifact::docx("Quarterly Report", vec![1, 2]);
        assert_eq!(docx.filename, "Quarterly Report.docx");
        assert_eq!(docx.media_type, DOCX_MEDIA_TYPE);
        assert_eq!(docx.data.len(), 2);

        let pptx = Artifact::pptx("Rust 101", vec![]);
        assert_eq!(pptx.filename, "Rust 101.pptx");
        assert_eq!(pptx.media_type, PPTX_MEDIA_TYPE);
    }

    #[test]
    fn test_safe_filename() {
        let artifact = Artifact::docx("a/b: c?", vec![]);
        assert_eq!(artifact.safe_filename(), "a_b_ c_.docx");

        let artifact = Artifact::pptx("../etc", vec![]);
        assert_eq!(artifact.safe_filename(), "_.._etc.pptx");
    }
}
