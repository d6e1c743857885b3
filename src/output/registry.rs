use std::path::Path;

use super::{
    ImageEncoder, JsonMapWriter, MapWriter, PngEncoder, StandardEncoder, TpsheetMapWriter,
    TxtMapWriter,
};
use crate::error::SheetError;

/// Encoders and map writers available to a run, looked up by file extension
#[derive(Default)]
pub struct ExporterRegistry {
    image_encoders: Vec<Box<dyn ImageEncoder>>,
    map_writers: Vec<Box<dyn MapWriter>>,
}

impl ExporterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in exporter; `png` configures PNG output
    pub fn with_defaults(png: PngEncoder) -> Self {
        let mut registry = Self::new();
        registry.register_image_encoder(Box::new(png));
        registry.register_image_encoder(Box::new(StandardEncoder::bmp()));
        registry.register_image_encoder(Box::new(StandardEncoder::tga()));
        registry.register_image_encoder(Box::new(StandardEncoder::tiff()));
        registry.register_image_encoder(Box::new(StandardEncoder::jpeg()));
        registry.register_map_writer(Box::new(TxtMapWriter));
        registry.register_map_writer(Box::new(TpsheetMapWriter));
        registry.register_map_writer(Box::new(JsonMapWriter));
        registry
    }

    /// Earlier registrations win when extensions overlap
    pub fn register_image_encoder(&mut self, encoder: Box<dyn ImageEncoder>) {
        self.image_encoders.push(encoder);
    }

    /// Earlier registrations win when extensions overlap
    pub fn register_map_writer(&mut self, writer: Box<dyn MapWriter>) {
        self.map_writers.push(writer);
    }

    pub fn image_encoder_for(&self, path: &Path) -> Result<&dyn ImageEncoder, SheetError> {
        let ext = extension_of(path);
        self.image_encoders
            .iter()
            .find(|e| e.extensions().contains(&ext.as_str()))
            .map(Box::as_ref)
            .ok_or(SheetError::UnknownImageFormat(ext))
    }

    pub fn map_writer_for(&self, path: &Path) -> Result<&dyn MapWriter, SheetError> {
        let ext = extension_of(path);
        self.map_writers
            .iter()
            .find(|w| w.extensions().contains(&ext.as_str()))
            .map(Box::as_ref)
            .ok_or(SheetError::UnknownMapFormat(ext))
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}
