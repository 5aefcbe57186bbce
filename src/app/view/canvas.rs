// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/view/canvas.rs
//
// Display scaling of the editor canvas.

use crate::domain::document::core::geometry::Point;

/// Maps between image pixel space and canvas display space.
///
/// The image is fitted into the maximum display envelope, preserving the
/// aspect ratio and never upscaling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    img_width: f64,
    img_height: f64,
    scale: f64,
    device_pixel_ratio: f64,
}

impl Viewport {
    pub fn new(img_width: u32, img_height: u32, max_width: f64, max_height: f64) -> Self {
        let img_width = f64::from(img_width);
        let img_height = f64::from(img_height);
        let scale = (max_width / img_width).min(max_height / img_height).min(1.0);
        Self {
            img_width,
            img_height,
            scale,
            device_pixel_ratio: 1.0,
        }
    }

    #[must_use]
    pub fn with_device_pixel_ratio(mut self, ratio: f64) -> Self {
        self.device_pixel_ratio = ratio;
        self
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    /// Image dimensions in pixels.
    pub fn image_size(&self) -> (f64, f64) {
        (self.img_width, self.img_height)
    }

    /// Canvas size in display units.
    pub fn display_size(&self) -> (f64, f64) {
        (self.img_width * self.scale, self.img_height * self.scale)
    }

    /// Size of the backing pixel buffer (display size times device pixel ratio).
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn frame_size(&self) -> (u32, u32) {
        let (w, h) = self.display_size();
        let ratio = self.device_pixel_ratio;
        (((w * ratio).round() as u32).max(1), ((h * ratio).round() as u32).max(1))
    }

    pub fn image_to_display(&self, point: Point) -> Point {
        point.scaled(self.scale)
    }

    pub fn display_to_image(&self, point: Point) -> Point {
        point.scaled(1.0 / self.scale)
    }

    /// Convert a display-space distance to image space.
    pub fn display_delta_to_image(&self, dx: f64, dy: f64) -> (f64, f64) {
        (dx / self.scale, dy / self.scale)
    }
}
