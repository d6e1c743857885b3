use std::path::{Path, PathBuf};

use anyhow::Result;
use image::{DynamicImage, ImageReader};
use log::info;
use rayon::prelude::*;

use super::{ImageDescriptor, packed_name};
use crate::error::SheetError;

/// How decoded images are prepared for packing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Convert every image to RGBA8 so all sources share one pixel format
    pub normalize: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { normalize: true }
    }
}

/// Decode every path into an [`ImageDescriptor`], preserving input order.
///
/// Images are decoded in parallel. The first image that fails to decode
/// aborts the whole load.
pub fn load_descriptors(paths: &[PathBuf], options: LoadOptions) -> Result<Vec<ImageDescriptor>> {
    if paths.is_empty() {
        return Err(SheetError::NoImages.into());
    }

    info!("Loading {} images...", paths.len());

    let descriptors = paths
        .par_iter()
        .map(|path| load_descriptor(path, options))
        .collect::<Result<Vec<_>, SheetError>>()?;

    Ok(descriptors)
}

fn load_descriptor(path: &Path, options: LoadOptions) -> Result<ImageDescriptor, SheetError> {
    let image = ImageReader::open(path)
        .map_err(|e| SheetError::ImageLoad {
            path: path.to_path_buf(),
            source: e.into(),
        })?
        .with_guessed_format()
        .map_err(|e| SheetError::ImageLoad {
            path: path.to_path_buf(),
            source: e.into(),
        })?
        .decode()
        .map_err(|e| SheetError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })?;

    let image = if options.normalize {
        DynamicImage::ImageRgba8(image.into_rgba8())
    } else {
        image
    };

    Ok(ImageDescriptor::new(packed_name(path), path, image))
}
