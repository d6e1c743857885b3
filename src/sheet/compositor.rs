use image::imageops;
use image::{ColorType, DynamicImage};
use log::info;

use super::{PackedSheet, Sheet};
use crate::error::SheetError;
use crate::packing::{self, Layout, PackingConstraints};
use crate::sprite::ImageDescriptor;

/// Pack the descriptors and render the sheet in one go
pub fn build_sheet(
    descriptors: &[ImageDescriptor],
    constraints: &PackingConstraints,
) -> Result<PackedSheet, SheetError> {
    let layout = packing::pack(descriptors, constraints)?;
    let sheet = compose(&layout, descriptors)?;

    Ok(PackedSheet {
        sheet,
        entries: layout.entries,
    })
}

/// Copy every placed source image into a fresh sheet buffer.
///
/// Entries are matched to descriptors by position, since the layout lists
/// them in input order and identifiers need not be unique. Pixels are copied verbatim: no blending, scaling or color conversion. The
/// sheet takes the pixel format of the first descriptor and every other
/// descriptor must match it.
pub fn compose(layout: &Layout, descriptors: &[ImageDescriptor]) -> Result<Sheet, SheetError> {
    let color = descriptors
        .first()
        .map_or(ColorType::Rgba8, ImageDescriptor::color);

    check_allocation(layout.width, layout.height, color)?;
    let mut sheet = Sheet::new(layout.width, layout.height, color);

    for (index, entry) in layout.entries.iter().enumerate() {
        let source = descriptors
            .get(index)
            .filter(|d| d.name == entry.name)
            .ok_or_else(|| SheetError::MissingSprite(entry.name.clone()))?;

        if (source.width(), source.height()) != (entry.width, entry.height) {
            return Err(SheetError::SizeMismatch {
                name: entry.name.clone(),
                width: entry.width,
                height: entry.height,
                found_width: source.width(),
                found_height: source.height(),
            });
        }

        blit(&mut sheet.image, &source.image, entry.x, entry.y).map_err(|found| {
            SheetError::PixelFormatMismatch {
                name: entry.name.clone(),
                expected: color,
                found,
            }
        })?;
    }

    info!(
        "Composed {}x{} sheet from {} sprites",
        sheet.width,
        sheet.height,
        layout.entries.len()
    );

    Ok(sheet)
}

fn check_allocation(width: u32, height: u32, color: ColorType) -> Result<(), SheetError> {
    let bytes = usize::try_from(width)
        .ok()
        .zip(usize::try_from(height).ok())
        .and_then(|(w, h)| w.checked_mul(h))
        .and_then(|px| px.checked_mul(usize::from(color.bytes_per_pixel())));

    match bytes {
        Some(_) => Ok(()),
        None => Err(SheetError::SheetTooLarge { width, height }),
    }
}

/// Replace the sheet region at (x, y) with the source pixels.
/// Returns the source color type if it differs from the sheet's.
fn blit(sheet: &mut DynamicImage, source: &DynamicImage, x: u32, y: u32) -> Result<(), ColorType> {
    let (x, y) = (i64::from(x), i64::from(y));

    match (sheet, source) {
        (DynamicImage::ImageLuma8(dst), DynamicImage::ImageLuma8(src)) => {
            imageops::replace(dst, src, x, y)
        }
        (DynamicImage::ImageLumaA8(dst), DynamicImage::ImageLumaA8(src)) => {
            imageops::replace(dst, src, x, y)
        }
        (DynamicImage::ImageRgb8(dst), DynamicImage::ImageRgb8(src)) => {
            imageops::replace(dst, src, x, y)
        }
        (DynamicImage::ImageRgba8(dst), DynamicImage::ImageRgba8(src)) => {
            imageops::replace(dst, src, x, y)
        }
        (DynamicImage::ImageLuma16(dst), DynamicImage::ImageLuma16(src)) => {
            imageops::replace(dst, src, x, y)
        }
        (DynamicImage::ImageLumaA16(dst), DynamicImage::ImageLumaA16(src)) => {
            imageops::replace(dst, src, x, y)
        }
        (DynamicImage::ImageRgb16(dst), DynamicImage::ImageRgb16(src)) => {
            imageops::replace(dst, src, x, y)
        }
        (DynamicImage::ImageRgba16(dst), DynamicImage::ImageRgba16(src)) => {
            imageops::replace(dst, src, x, y)
        }
        (DynamicImage::ImageRgb32F(dst), DynamicImage::ImageRgb32F(src)) => {
            imageops::replace(dst, src, x, y)
        }
        (DynamicImage::ImageRgba32F(dst), DynamicImage::ImageRgba32F(src)) => {
            imageops::replace(dst, src, x, y)
        }
        (_, src) => return Err(src.color()),
    }

    Ok(())
}
