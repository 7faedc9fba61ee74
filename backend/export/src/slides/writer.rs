//! Presentation to `.pptx` writer.

use chrono::Utc;
use tracing::debug;

use docsmith_core::Presentation;

use super::package::Package;
use super::parts;
use crate::Result;

/// Renders a [`Presentation`] into PresentationML bytes: one slide per
/// [`docsmith_core::Slide`], in order, each with its title and one body
/// paragraph per bullet.
#[derive(Debug, Default)]
pub struct SlidesWriter;

impl SlidesWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, pres: &Presentation) -> Result<Vec<u8>> {
        let count = pres.slides.len();
        let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();

        let mut package = Package::new();
        package.add_part(parts::CONTENT_TYPES, &parts::content_types(count))?;
        package.add_part(parts::ROOT_RELS, &parts::root_rels())?;
        package.add_part(parts::CORE_PROPS, &parts::core_props(&pres.topic, &timestamp))?;
        package.add_part(parts::APP_PROPS, &parts::app_props(count))?;
        package.add_part(parts::PRESENTATION, &parts::presentation(count))?;
        package.add_part(parts::PRESENTATION_RELS, &parts::presentation_rels(count))?;
        package.add_part(parts::PRES_PROPS, &parts::pres_props())?;
        package.add_part(parts::TABLE_STYLES, &parts::table_styles())?;
        package.add_part(parts::SLIDE_MASTER, &parts::slide_master())?;
        package.add_part(parts::SLIDE_MASTER_RELS, &parts::slide_master_rels())?;
        package.add_part(parts::SLIDE_LAYOUT, &parts::slide_layout())?;
        package.add_part(parts::SLIDE_LAYOUT_RELS, &parts::slide_layout_rels())?;
        package.add_part(parts::THEME, &parts::theme())?;

        for (index, slide) in pres.slides.iter().enumerate() {
            package.add_part(&parts::slide_part(index), &parts::slide(&slide.title, &slide.bullets))?;
            package.add_part(&parts::slide_rels_part(index), &parts::slide_rels())?;
        }

        let parts_written = package.part_count();
        let bytes = package.finish()?;
        debug!(topic = %pres.topic, slides = count, parts = parts_written, bytes = bytes.len(), "rendered pptx");
        Ok(bytes)
    }
}
