//! Zip-backed OPC package writer.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::Result;

/// Accumulates named parts and packs them into a zip archive.
pub struct Package {
    zip: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
    parts: usize,
}

impl Package {
    pub fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
            options: SimpleFileOptions::default().compression_method(CompressionMethod::Deflated),
            parts: 0,
        }
    }

    /// Add a part at `name` (no leading slash, e.g. `ppt/slides/slide1.xml`).
    pub fn add_part(&mut self, name: &str, content: &str) -> Result<()> {
        self.zip.start_file(name, self.options)?;
        self.zip.write_all(content.as_bytes())?;
        self.parts += 1;
        Ok(())
    }

    pub fn part_count(&self) -> usize {
        self.parts
    }

    pub fn finish(self) -> Result<Vec<u8>> {
        let cursor = self.zip.finish()?;
        Ok(cursor.into_inner())
    }
}

impl Default for Package {
    fn default() -> Self {
        Self::new()
    }
}
