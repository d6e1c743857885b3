//! Exporters that persist a finished sheet and its placement map.
//!
//! Encoders and map writers are chosen by output file extension through an
//! [`ExporterRegistry`] built once by the caller.

mod json;
mod png;
mod registry;
mod standard;
mod tpsheet;
mod txt;

use std::fs;
use std::path::Path;

use anyhow::Result;

use crate::error::SheetError;
use crate::packing::PlacementEntry;
use crate::sheet::Sheet;

pub use json::JsonMapWriter;
pub use png::PngEncoder;
pub use registry::ExporterRegistry;
pub use standard::StandardEncoder;
pub use tpsheet::TpsheetMapWriter;
pub use txt::TxtMapWriter;

/// Persists the sheet pixels in some encoded image format
pub trait ImageEncoder: Send + Sync {
    /// File extensions (lowercase, without dot) handled by this encoder
    fn extensions(&self) -> &[&'static str];

    fn save(&self, sheet: &Sheet, path: &Path) -> Result<()>;
}

/// Everything a map writer needs to describe a sheet
#[derive(Debug, Clone, Copy)]
pub struct SheetMap<'a> {
    /// Identifier of the sheet image (its packed name)
    pub image_name: &'a str,
    pub width: u32,
    pub height: u32,
    /// Unpadded sprite rectangles in input order
    pub entries: &'a [PlacementEntry],
}

/// Persists the placement map in some text or binary format
pub trait MapWriter: Send + Sync {
    /// File extensions (lowercase, without dot) handled by this writer
    fn extensions(&self) -> &[&'static str];

    fn render(&self, map: &SheetMap<'_>) -> Result<String>;

    fn save(&self, map: &SheetMap<'_>, path: &Path) -> Result<()> {
        let content = self.render(map)?;
        fs::write(path, content).map_err(|e| SheetError::MapWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(())
    }
}
