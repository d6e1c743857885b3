use std::fs;
use std::io::Cursor;
use std::path::Path;

use anyhow::Result;
use image::ImageFormat;

use super::ImageEncoder;
use crate::cli::CompressionLevel;
use crate::error::SheetError;
use crate::sheet::Sheet;

/// PNG output, optionally opaque and optionally recompressed with oxipng
#[derive(Debug, Clone, Copy, Default)]
pub struct PngEncoder {
    /// Drop the alpha channel (write RGB)
    pub opaque: bool,
    pub compress: Option<CompressionLevel>,
}

impl PngEncoder {
    pub fn new(opaque: bool, compress: Option<CompressionLevel>) -> Self {
        Self { opaque, compress }
    }

    /// Encode the sheet to PNG bytes
    pub fn encode(&self, sheet: &Sheet, path: &Path) -> Result<Vec<u8>> {
        let mut png_data = Cursor::new(Vec::new());
        let written = if self.opaque {
            sheet.image.to_rgb8().write_to(&mut png_data, ImageFormat::Png)
        } else {
            sheet.image.write_to(&mut png_data, ImageFormat::Png)
        };
        written.map_err(|e| SheetError::ImageSave {
            path: path.to_path_buf(),
            source: e,
        })?;

        let Some(level) = self.compress else {
            return Ok(png_data.into_inner());
        };

        let opts = match level {
            CompressionLevel::Level(n) => oxipng::Options::from_preset(n),
            CompressionLevel::Max => oxipng::Options::max_compression(),
        };
        let optimized = oxipng::optimize_from_memory(&png_data.into_inner(), &opts).map_err(|e| {
            SheetError::PngCompress {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?;

        Ok(optimized)
    }
}

impl ImageEncoder for PngEncoder {
    fn extensions(&self) -> &[&'static str] {
        &["png"]
    }

    fn save(&self, sheet: &Sheet, path: &Path) -> Result<()> {
        let data = self.encode(sheet, path)?;

        fs::write(path, data).map_err(|e| SheetError::OutputWrite {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }
}
