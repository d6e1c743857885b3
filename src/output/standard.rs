use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::Result;
use image::{DynamicImage, ImageFormat};

use super::ImageEncoder;
use crate::error::SheetError;
use crate::sheet::Sheet;

/// Any other format the `image` crate can encode
#[derive(Debug, Clone, Copy)]
pub struct StandardEncoder {
    extensions: &'static [&'static str],
    format: ImageFormat,
}

impl StandardEncoder {
    pub fn new(format: ImageFormat, extensions: &'static [&'static str]) -> Self {
        Self { extensions, format }
    }

    pub fn bmp() -> Self {
        Self::new(ImageFormat::Bmp, &["bmp"])
    }

    pub fn tga() -> Self {
        Self::new(ImageFormat::Tga, &["tga"])
    }

    pub fn tiff() -> Self {
        Self::new(ImageFormat::Tiff, &["tif", "tiff"])
    }

    pub fn jpeg() -> Self {
        Self::new(ImageFormat::Jpeg, &["jpg", "jpeg"])
    }
}

impl ImageEncoder for StandardEncoder {
    fn extensions(&self) -> &[&'static str] {
        self.extensions
    }

    fn save(&self, sheet: &Sheet, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| SheetError::OutputWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut writer = BufWriter::new(file);

        // JPEG has no alpha channel
        let written = if self.format == ImageFormat::Jpeg {
            DynamicImage::ImageRgb8(sheet.image.to_rgb8()).write_to(&mut writer, self.format)
        } else {
            sheet.image.write_to(&mut writer, self.format)
        };

        written.map_err(|e| SheetError::ImageSave {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }
}
