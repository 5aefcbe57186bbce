// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/document/operations/detect.rs
//
// Automatic receipt bounds detection by brightness thresholding.

use image::{DynamicImage, GenericImageView};

use crate::constant::{LUMA_BLUE, LUMA_GREEN, LUMA_RED};
use crate::domain::document::core::geometry::QuadCropArea;

/// Tuning for [`detect_document_bounds`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionParams {
    /// Luma strictly above this value counts as document.
    pub brightness_threshold: u8,
    /// Bright pixels must exceed this share of the image.
    pub min_bright_ratio: f64,
    /// Outward margin relative to the detected box size.
    pub margin: f64,
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            brightness_threshold: 200,
            min_bright_ratio: 0.10,
            margin: 0.05,
        }
    }
}

/// Perceived brightness of an RGB triple.
pub fn luma(r: u8, g: u8, b: u8) -> f32 {
    LUMA_RED * f32::from(r) + LUMA_GREEN * f32::from(g) + LUMA_BLUE * f32::from(b)
}

/// Guess the bounds of a light document on a darker background.
///
/// Returns `None` when too few bright pixels exist for a confident guess;
/// callers fall back to [`QuadCropArea::inset`].
pub fn detect_document_bounds(image: &DynamicImage, params: &DetectionParams) -> Option<QuadCropArea> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return None;
    }

    let threshold = f32::from(params.brightness_threshold);
    let rgba = image.to_rgba8();

    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0u32;
    let mut max_y = 0u32;
    let mut bright: u64 = 0;

    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, _] = pixel.0;
        if luma(r, g, b) > threshold {
            bright += 1;
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
    }

    let total = u64::from(width) * u64::from(height);
    #[allow(clippy::cast_precision_loss)]
    let ratio = bright as f64 / total as f64;
    if bright == 0 || ratio <= params.min_bright_ratio {
        log::info!(
            "No receipt detected ({:.1}% bright pixels, need > {:.1}%)",
            ratio * 100.0,
            params.min_bright_ratio * 100.0
        );
        return None;
    }

    let (min_x, max_x) = (f64::from(min_x), f64::from(max_x));
    let (min_y, max_y) = (f64::from(min_y), f64::from(max_y));
    let margin_x = (max_x - min_x) * params.margin;
    let margin_y = (max_y - min_y) * params.margin;
    let (w, h) = (f64::from(width), f64::from(height));

    let quad = QuadCropArea::from_bounds(
        (min_x - margin_x).max(0.0),
        (min_y - margin_y).max(0.0),
        (max_x + margin_x).min(w),
        (max_y + margin_y).min(h),
    );

    log::info!("Receipt detected automatically: {quad}");
    Some(quad)
}

/// Detected bounds, or the inset rectangle when detection fails.
pub fn initial_quad(image: &DynamicImage, params: &DetectionParams, default_inset: f64) -> QuadCropArea {
    detect_document_bounds(image, params).unwrap_or_else(|| {
        let (width, height) = image.dimensions();
        log::warn!(
            "Automatic detection failed, using {:.0}% inset",
            default_inset * 100.0
        );
        QuadCropArea::inset(f64::from(width), f64::from(height), default_inset)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::core::geometry::Point;
    use image::{Rgba, RgbaImage};

    const EPS: f64 = 1e-9;

    fn dark_with_bright_rect(
        width: u32,
        height: u32,
        left: u32,
        top: u32,
        right: u32,
        bottom: u32,
    ) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
            if (left..right).contains(&x) && (top..bottom).contains(&y) {
                Rgba([250, 250, 245, 255])
            } else {
                Rgba([30, 30, 40, 255])
            }
        }))
    }

    fn assert_point(actual: Point, x: f64, y: f64) {
        assert!(
            (actual.x - x).abs() < EPS && (actual.y - y).abs() < EPS,
            "expected ({x}, {y}), got ({}, {})",
            actual.x,
            actual.y
        );
    }

    #[test]
    fn luma_weights() {
        assert!((luma(255, 255, 255) - 255.0).abs() < 0.01);
        assert_eq!(luma(0, 0, 0), 0.0);
        assert!((luma(100, 0, 0) - 29.9).abs() < 0.001);
    }

    #[test]
    fn all_dark_image_fails_and_falls_back_to_inset() {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(1000, 800, Rgba([128, 128, 128, 255])));
        let params = DetectionParams::default();
        assert!(detect_document_bounds(&image, &params).is_none());

        let quad = initial_quad(&image, &params, 0.10);
        assert_point(quad.top_left, 100.0, 80.0);
        assert_point(quad.top_right, 900.0, 80.0);
        assert_point(quad.bottom_left, 100.0, 720.0);
        assert_point(quad.bottom_right, 900.0, 720.0);
    }

    #[test]
    fn bright_rectangle_is_found_with_margin() {
        let image = dark_with_bright_rect(1000, 800, 200, 150, 800, 650);
        let quad = detect_document_bounds(&image, &DetectionParams::default()).unwrap();

        // Tight box: x 200..=799, y 150..=649.
        let margin_x = 599.0 * 0.05;
        let margin_y = 499.0 * 0.05;
        assert_point(quad.top_left, 200.0 - margin_x, 150.0 - margin_y);
        assert_point(quad.top_right, 799.0 + margin_x, 150.0 - margin_y);
        assert_point(quad.bottom_left, 200.0 - margin_x, 649.0 + margin_y);
        assert_point(quad.bottom_right, 799.0 + margin_x, 649.0 + margin_y);
    }

    #[test]
    fn margin_is_clamped_to_image() {
        let image = dark_with_bright_rect(100, 100, 0, 0, 100, 60);
        let quad = detect_document_bounds(&image, &DetectionParams::default()).unwrap();
        assert_point(quad.top_left, 0.0, 0.0);
        assert_point(quad.top_right, 100.0, 0.0);
        assert!((quad.bottom_left.y - (59.0 + 59.0 * 0.05)).abs() < EPS);
    }

    #[test]
    fn small_bright_spot_is_not_enough() {
        // 10x10 bright square on 100x100 is exactly 1%.
        let image = dark_with_bright_rect(100, 100, 40, 40, 50, 50);
        assert!(detect_document_bounds(&image, &DetectionParams::default()).is_none());
    }

    #[test]
    fn ratio_must_strictly_exceed_minimum() {
        // 10 of 100 rows bright = exactly 10%.
        let image = dark_with_bright_rect(100, 100, 0, 0, 100, 10);
        assert!(detect_document_bounds(&image, &DetectionParams::default()).is_none());
        let image = dark_with_bright_rect(100, 100, 0, 0, 100, 11);
        assert!(detect_document_bounds(&image, &DetectionParams::default()).is_some());
    }

    #[test]
    fn grey_between_thresholds_is_not_bright() {
        // Luma 160 would pass a 128 cut but not the unified 200 cut.
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(50, 50, Rgba([160, 160, 160, 255])));
        assert!(detect_document_bounds(&image, &DetectionParams::default()).is_none());

        let lenient = DetectionParams {
            brightness_threshold: 128,
            ..DetectionParams::default()
        };
        assert!(detect_document_bounds(&image, &lenient).is_some());
    }

    #[test]
    fn detection_is_repeatable() {
        let image = dark_with_bright_rect(300, 200, 50, 40, 250, 170);
        let params = DetectionParams::default();
        let first = detect_document_bounds(&image, &params);
        let second = detect_document_bounds(&image, &params);
        assert!(first.is_some());
        assert_eq!(first, second);
    }
}
