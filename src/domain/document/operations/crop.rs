// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/document/operations/crop.rs
//
// Crop operation: bounding-box pixel copy and re-encoding.

use std::io::Cursor;

use image::{DynamicImage, GenericImageView, ImageFormat};

use crate::constant::MIN_CROP_SIZE;
use crate::domain::document::core::error::{CropError, CropResult};
use crate::domain::document::core::file::ImageFile;
use crate::domain::document::core::geometry::{CropArea, QuadCropArea};
use crate::domain::document::types::raster::RasterDocument;

/// Crop region in whole pixel coordinates.
///
/// Pure domain model - the rectangle that is actually copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRegion {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Pixel rectangle for `area`: origin floored, size truncated, clamped to the image.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_area(area: &CropArea, img_width: u32, img_height: u32) -> Self {
        let x = (area.x.max(0.0).floor() as u32).min(img_width);
        let y = (area.y.max(0.0).floor() as u32).min(img_height);
        let width = (area.width.max(0.0) as u32).min(img_width - x);
        let height = (area.height.max(0.0) as u32).min(img_height - y);
        Self::new(x, y, width, height)
    }

    /// Check if region has valid dimensions.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Everything produced by a confirmed crop.
#[derive(Debug, Clone)]
pub struct CropOutcome {
    /// The untouched input file.
    pub original: ImageFile,
    /// The encoded crop, named with the output prefix.
    pub cropped: ImageFile,
    /// Bounding box of the quad that was cropped.
    pub area: CropArea,
}

/// Reject selections whose bounding box is too thin to produce an image.
pub fn validate_area(area: &CropArea) -> CropResult<()> {
    if area.width > MIN_CROP_SIZE && area.height > MIN_CROP_SIZE {
        Ok(())
    } else {
        Err(CropError::DegenerateSelection {
            width: area.width,
            height: area.height,
        })
    }
}

/// Copy the pixels of `region` into a new image at origin (0, 0).
pub fn crop_pixels(image: &DynamicImage, region: CropRegion) -> DynamicImage {
    image.crop_imm(region.x, region.y, region.width, region.height)
}

/// Encode `image` in `format`.
///
/// JPEG has no alpha channel, so RGBA input is flattened to RGB first.
pub fn encode(image: &DynamicImage, format: ImageFormat, name: &str) -> CropResult<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    match format {
        ImageFormat::Jpeg if image.color().has_alpha() => {
            DynamicImage::ImageRgb8(image.to_rgb8()).write_to(&mut buf, format)?;
        }
        _ => image.write_to(&mut buf, format)?,
    }

    let bytes = buf.into_inner();
    if bytes.is_empty() {
        return Err(CropError::EmptyEncoding(name.to_string()));
    }
    Ok(bytes)
}

/// Crop `document` to the bounding box of `quad` and encode the result in
/// the original format as `<prefix><original-name>`.
pub fn crop_document(
    document: &RasterDocument,
    quad: &QuadCropArea,
    prefix: &str,
) -> CropResult<CropOutcome> {
    let area = quad.bounding_box();
    validate_area(&area)?;

    let (img_width, img_height) = document.dimensions();
    let region = CropRegion::from_area(&area, img_width, img_height);
    if !region.is_valid() {
        return Err(CropError::DegenerateSelection {
            width: area.width,
            height: area.height,
        });
    }

    let original = document.file().clone();
    let name = format!("{prefix}{}", original.name);
    let cropped_image = crop_pixels(document.image(), region);
    let bytes = encode(&cropped_image, original.format, &name)?;

    let (w, h) = cropped_image.dimensions();
    log::info!(
        "Cropped {} to {}x{} at ({}, {}) -> {} ({} bytes)",
        original.name,
        w,
        h,
        region.x,
        region.y,
        name,
        bytes.len()
    );

    Ok(CropOutcome {
        cropped: ImageFile {
            name,
            format: original.format,
            bytes,
        },
        original,
        area,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::core::geometry::Point;
    use image::{Rgba, RgbaImage};

    fn gradient_document(name: &str, format: ImageFormat) -> RasterDocument {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_fn(200, 100, |x, y| {
            Rgba([x as u8, y as u8, 7, 255])
        }));
        let file = ImageFile {
            name: name.to_string(),
            format,
            bytes: Vec::new(),
        };
        RasterDocument::new(file, image).unwrap()
    }

    #[test]
    fn region_from_fractional_area() {
        let area = CropArea {
            x: 10.7,
            y: 5.2,
            width: 50.9,
            height: 20.5,
        };
        assert_eq!(CropRegion::from_area(&area, 200, 100), CropRegion::new(10, 5, 50, 20));
    }

    #[test]
    fn region_is_clamped_to_image() {
        let area = CropArea {
            x: 180.0,
            y: 90.0,
            width: 50.0,
            height: 50.0,
        };
        assert_eq!(CropRegion::from_area(&area, 200, 100), CropRegion::new(180, 90, 20, 10));
    }

    #[test]
    fn crop_copies_bounding_box_pixels() {
        let doc = gradient_document("receipt.png", ImageFormat::Png);
        let quad = QuadCropArea {
            top_left: Point::new(10.0, 20.0),
            top_right: Point::new(90.0, 15.0),
            bottom_left: Point::new(12.0, 80.0),
            bottom_right: Point::new(95.0, 75.0),
        };

        let outcome = crop_document(&doc, &quad, "cropped_").unwrap();
        assert_eq!(outcome.cropped.name, "cropped_receipt.png");
        assert_eq!(outcome.cropped.format, ImageFormat::Png);
        assert_eq!(outcome.original.name, "receipt.png");
        assert_eq!(
            outcome.area,
            CropArea {
                x: 10.0,
                y: 15.0,
                width: 85.0,
                height: 65.0
            }
        );

        let decoded = image::load_from_memory(&outcome.cropped.bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (85, 65));
        assert_eq!(decoded.get_pixel(0, 0).0, [10, 15, 7, 255]);
        assert_eq!(decoded.get_pixel(84, 64).0, [94, 79, 7, 255]);
    }

    #[test]
    fn jpeg_output_drops_alpha() {
        let doc = gradient_document("receipt.jpg", ImageFormat::Jpeg);
        let quad = QuadCropArea::from_bounds(0.0, 0.0, 64.0, 32.0);
        let outcome = crop_document(&doc, &quad, "cropped_").unwrap();

        assert_eq!(outcome.cropped.mime_type(), "image/jpeg");
        let decoded = image::load_from_memory(&outcome.cropped.bytes).unwrap();
        assert_eq!(decoded.dimensions(), (64, 32));
    }

    #[test]
    fn degenerate_quad_is_rejected() {
        let doc = gradient_document("receipt.png", ImageFormat::Png);
        let point = Point::new(50.0, 50.0);
        let quad = QuadCropArea {
            top_left: point,
            top_right: point,
            bottom_left: point,
            bottom_right: point,
        };
        let err = crop_document(&doc, &quad, "cropped_").unwrap_err();
        assert!(matches!(err, CropError::DegenerateSelection { .. }));

        let sliver = QuadCropArea::from_bounds(10.0, 10.0, 90.0, 11.0);
        assert!(crop_document(&doc, &sliver, "cropped_").is_err());
    }
}
