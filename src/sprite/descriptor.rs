use std::path::PathBuf;

use image::{ColorType, DynamicImage};

use crate::packing::Packable;

/// A decoded source image, ready to be packed
#[derive(Debug, Clone)]
pub struct ImageDescriptor {
    /// Original file path
    pub path: PathBuf,
    /// Stable identifier used as the map key
    pub name: String,
    /// Decoded pixel data
    pub image: DynamicImage,
}

impl ImageDescriptor {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, image: DynamicImage) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            image,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn color(&self) -> ColorType {
        self.image.color()
    }
}

impl Packable for ImageDescriptor {
    fn name(&self) -> &str {
        &self.name
    }

    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }
}
