// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/document/types/raster.rs
//
// Decoded raster document owned by a crop session.

use std::io::Cursor;
use std::path::Path;

use image::metadata::Orientation;
use image::{DynamicImage, GenericImageView, ImageDecoder, ImageReader, ImageResult};

use crate::domain::document::core::error::{CropError, CropResult};
use crate::domain::document::core::file::ImageFile;

/// A decoded raster image (PNG, JPEG, WebP, ...) together with the file it came from.
pub struct RasterDocument {
    /// The file as supplied by the caller.
    file: ImageFile,
    /// The decoded image document.
    document: DynamicImage,
}

impl RasterDocument {
    /// Decode an in-memory image file, applying its EXIF orientation.
    pub fn from_file(file: ImageFile) -> CropResult<Self> {
        let document = decode_upright(&file).map_err(|source| CropError::Decode {
            name: file.name.clone(),
            source,
        })?;
        Self::new(file, document)
    }

    /// Load and decode a raster document from disk.
    pub fn open(path: &Path) -> CropResult<Self> {
        Self::from_file(ImageFile::open(path)?)
    }

    /// Pair an already decoded image with its file.
    pub fn new(file: ImageFile, document: DynamicImage) -> CropResult<Self> {
        let (width, height) = document.dimensions();
        if width == 0 || height == 0 {
            return Err(CropError::EmptyImage(file.name));
        }
        log::debug!("Loaded {} ({}x{}, {})", file.name, width, height, file.mime_type());
        Ok(Self { file, document })
    }

    /// Returns the native pixel dimensions (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        self.document.dimensions()
    }

    pub fn image(&self) -> &DynamicImage {
        &self.document
    }

    pub fn file(&self) -> &ImageFile {
        &self.file
    }
}

/// Decode `file` and rotate/flip the pixels so they display upright.
fn decode_upright(file: &ImageFile) -> ImageResult<DynamicImage> {
    let mut decoder = ImageReader::with_format(Cursor::new(&file.bytes), file.format).into_decoder()?;
    let orientation = decoder.orientation()?;
    let mut document = DynamicImage::from_decoder(decoder)?;
    if orientation != Orientation::NoTransforms {
        log::debug!("Applying EXIF orientation {orientation:?} to {}", file.name);
        document.apply_orientation(orientation);
    }
    Ok(document)
}

impl std::fmt::Debug for RasterDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (w, h) = self.dimensions();
        write!(f, "RasterDocument({}, {w}x{h})", self.file.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::png::PngEncoder;
    use image::{ExtendedColorType, ImageEncoder, ImageFormat, Rgba, RgbaImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([9, 9, 9, 255])));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn decodes_png_file() {
        let file = ImageFile::from_bytes("scan.png", png_bytes(40, 30)).unwrap();
        let doc = RasterDocument::from_file(file).unwrap();
        assert_eq!(doc.dimensions(), (40, 30));
        assert_eq!(doc.file().name, "scan.png");
    }

    #[test]
    fn exif_orientation_is_applied() {
        // Little-endian TIFF header with a single Orientation = 6 (rotate 90° CW) entry.
        let exif = vec![
            0x49, 0x49, 0x2a, 0x00, 0x08, 0x00, 0x00, 0x00, // header, IFD at 8
            0x01, 0x00, // one entry
            0x12, 0x01, 0x03, 0x00, 0x01, 0x00, 0x00, 0x00, 0x06, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, // no next IFD
        ];
        let img = RgbaImage::from_fn(40, 30, |x, y| {
            if x == 0 && y == 0 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([9, 9, 9, 255])
            }
        });
        let mut bytes = Vec::new();
        let mut encoder = PngEncoder::new(&mut bytes);
        encoder.set_exif_metadata(exif).unwrap();
        encoder
            .write_image(img.as_raw(), 40, 30, ExtendedColorType::Rgba8)
            .unwrap();

        let file = ImageFile::from_bytes("phone.png", bytes).unwrap();
        let doc = RasterDocument::from_file(file).unwrap();
        assert_eq!(doc.dimensions(), (30, 40));
        // The stored top-left pixel ends up top-right.
        assert_eq!(doc.image().get_pixel(29, 0), Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn corrupt_data_reports_decode_error() {
        let file = ImageFile::from_bytes("scan.png", vec![0x89, b'P', b'N', b'G']).unwrap();
        let err = RasterDocument::from_file(file).unwrap_err();
        assert!(matches!(err, CropError::Decode { .. }));
    }

    #[test]
    fn empty_image_is_rejected() {
        let file = ImageFile::from_bytes("empty.png", Vec::new()).unwrap();
        let err = RasterDocument::new(file, DynamicImage::new_rgba8(0, 0)).unwrap_err();
        assert!(matches!(err, CropError::EmptyImage(_)));
    }
}
