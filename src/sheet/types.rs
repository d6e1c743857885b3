use image::{ColorType, DynamicImage};

use crate::packing::PlacementEntry;

/// The composite output image
#[derive(Debug, Clone)]
pub struct Sheet {
    /// Sheet width
    pub width: u32,
    /// Sheet height
    pub height: u32,
    /// Rendered sheet pixels
    pub image: DynamicImage,
}

impl Sheet {
    /// Allocate a zeroed (fully transparent) sheet in the given pixel format
    pub fn new(width: u32, height: u32, color: ColorType) -> Self {
        Self {
            width,
            height,
            image: DynamicImage::new(width, height, color),
        }
    }

    pub fn color(&self) -> ColorType {
        self.image.color()
    }
}

/// Result of a successful run: the sheet and where every source image went
#[derive(Debug, Clone)]
pub struct PackedSheet {
    pub sheet: Sheet,
    /// Placements in input order
    pub entries: Vec<PlacementEntry>,
}
