//! Renderers from the block model to binary office containers.
//!
//! - [`word`]: documents to WordprocessingML (`.docx`) via `docx-rs`
//! - [`slides`]: presentations to PresentationML (`.pptx`) parts in a zip package

pub mod artifact;
pub mod slides;
pub mod word;

use thiserror::Error;

use docsmith_core::Snapshot;

pub use artifact::{Artifact, DOCX_MEDIA_TYPE, PPTX_MEDIA_TYPE};
pub use slides::SlidesWriter;
pub use word::DocxWriter;

pub type Result<T> = std::result::Result<T, ExportError>;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to pack container: {0}")]
    Pack(String),

    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Render a snapshot into its container format.
pub fn export_snapshot(snapshot: &Snapshot) -> Result<Artifact> {
    match snapshot {
        Snapshot::Document(doc) => {
            let bytes = DocxWriter::new().render(doc)?;
            Ok(Artifact::docx(&doc.title, bytes))
        }
        Snapshot::Presentation(pres) => {
            let bytes = SlidesWriter::new().render(pres)?;
            Ok(Artifact::pptx(&pres.topic, bytes))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsmith_core::{Block, Document, Presentation, Slide};

    #[test]
    fn test_export_snapshot_picks_container() {
        let doc: Snapshot = Document::new("Plan", vec![Block::heading(1, "Plan")]).into();
        let artifact = export_snapshot(&doc).unwrap();
        assert_eq!(artifact.filename, "Plan.docx");
        assert_eq!(artifact.media_type, DOCX_MEDIA_TYPE);
        assert!(artifact.data.starts_with(b"PK"));

        let pres: Snapshot = Presentation::new("Pitch", vec![Slide::new("Hook", ["x"])]).into();
        let artifact = export_snapshot(&pres).unwrap();
        assert_eq!(artifact.filename, "Pitch.pptx");
        assert_eq!(artifact.media_type, PPTX_MEDIA_TYPE);
        assert!(artifact.data.starts_with(b"PK"));
    }
}
