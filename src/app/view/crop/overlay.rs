// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/view/crop/overlay.rs
//
// Editor frame rendering: scaled image, darkened surroundings, quad outline and handles.

use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, Luma, Rgba, RgbaImage};
use imageproc::drawing::{
    draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut, draw_polygon_mut,
};
use imageproc::point::Point as PixelPoint;
use imageproc::rect::Rect;

use crate::app::view::canvas::Viewport;
use crate::app::view::crop::selection::CropSelection;
use crate::constant::{ACCENT_COLOR, HANDLE_BORDER_COLOR, HANDLE_BORDER_WIDTH, OUTLINE_WIDTH};
use crate::domain::document::core::geometry::Point;

/// Visual parameters of the overlay, in display pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    pub overlay_alpha: f32,
    pub handle_size: f64,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            overlay_alpha: 0.5,
            handle_size: 12.0,
        }
    }
}

/// Render the crop editor into a new RGBA frame of [`Viewport::frame_size`].
pub fn render_frame(
    image: &DynamicImage,
    selection: &CropSelection,
    viewport: &Viewport,
    style: &OverlayStyle,
) -> RgbaImage {
    let mut frame = scale_to_frame(image, viewport);
    paint_selection(&mut frame, selection, viewport, style);
    paint_handles(&mut frame, selection, viewport, style);
    frame
}

/// The image resized to the viewport's frame size, without any overlay.
pub fn scale_to_frame(image: &DynamicImage, viewport: &Viewport) -> RgbaImage {
    let (frame_w, frame_h) = viewport.frame_size();
    imageops::resize(&image.to_rgba8(), frame_w, frame_h, FilterType::Triangle)
}

/// Darken the frame outside the quad and stroke its outline.
pub fn paint_selection(
    frame: &mut RgbaImage,
    selection: &CropSelection,
    viewport: &Viewport,
    style: &OverlayStyle,
) {
    let px_scale = viewport.scale() * viewport.device_pixel_ratio();
    let outline = selection.quad.scaled(px_scale).outline();
    darken_outside(frame, &outline, style.overlay_alpha);
    #[allow(clippy::cast_possible_truncation)]
    draw_outline(frame, &outline, OUTLINE_WIDTH * viewport.device_pixel_ratio() as f32);
}

/// Draw the four corner handles.
fn paint_handles(
    frame: &mut RgbaImage,
    selection: &CropSelection,
    viewport: &Viewport,
    style: &OverlayStyle,
) {
    let px_scale = viewport.scale() * viewport.device_pixel_ratio();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let handle_px = ((style.handle_size * viewport.device_pixel_ratio()).round() as u32).max(1);
    for corner in selection.quad.scaled(px_scale).corners() {
        draw_handle(frame, corner, handle_px);
    }
}

/// Darken every pixel outside `polygon`.
fn darken_outside(frame: &mut RgbaImage, polygon: &[Point; 4], alpha: f32) {
    let keep = 1.0 - alpha.clamp(0.0, 1.0);
    let mut mask = GrayImage::new(frame.width(), frame.height());
    let vertices = polygon_vertices(polygon);
    if vertices.len() >= 3 {
        draw_polygon_mut(&mut mask, &vertices, Luma([u8::MAX]));
    }

    for (pixel, inside) in frame.pixels_mut().zip(mask.pixels()) {
        if inside.0[0] == 0 {
            let [r, g, b, a] = pixel.0;
            *pixel = Rgba([shade(r, keep), shade(g, keep), shade(b, keep), a]);
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn shade(channel: u8, keep: f32) -> u8 {
    (f32::from(channel) * keep).round() as u8
}

/// Pixel vertices of `polygon` without repeats; the fill panics on a closed path.
#[allow(clippy::cast_possible_truncation)]
fn polygon_vertices(polygon: &[Point; 4]) -> Vec<PixelPoint<i32>> {
    let mut vertices: Vec<PixelPoint<i32>> = Vec::with_capacity(polygon.len());
    for p in polygon {
        let vertex = PixelPoint::new(p.x.round() as i32, p.y.round() as i32);
        if vertices.last() != Some(&vertex) {
            vertices.push(vertex);
        }
    }
    while vertices.len() > 1 && vertices.first() == vertices.last() {
        vertices.pop();
    }
    vertices
}

/// Stroke each edge of `polygon` as a filled band `width` pixels wide.
#[allow(clippy::cast_possible_truncation)]
fn draw_outline(frame: &mut RgbaImage, polygon: &[Point; 4], width: f32) {
    let color = Rgba(ACCENT_COLOR);
    let half = f64::from(width.max(1.0)) / 2.0;

    for (i, a) in polygon.iter().enumerate() {
        let b = polygon[(i + 1) % polygon.len()];
        let (dx, dy) = (b.x - a.x, b.y - a.y);
        let length = dx.hypot(dy);
        if length < 1.0 {
            continue;
        }
        let (nx, ny) = (-dy / length * half, dx / length * half);
        let band = [
            Point::new(a.x + nx, a.y + ny),
            Point::new(b.x + nx, b.y + ny),
            Point::new(b.x - nx, b.y - ny),
            Point::new(a.x - nx, a.y - ny),
        ];
        let vertices = polygon_vertices(&band);
        if vertices.len() >= 3 {
            draw_polygon_mut(frame, &vertices, color);
        } else {
            draw_line_segment_mut(
                frame,
                (a.x as f32, a.y as f32),
                (b.x as f32, b.y as f32),
                color,
            );
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn draw_handle(frame: &mut RgbaImage, centre: Point, size: u32) {
    let half = f64::from(size) / 2.0;
    let left = (centre.x - half).round() as i32;
    let top = (centre.y - half).round() as i32;

    draw_filled_rect_mut(frame, Rect::at(left, top).of_size(size, size), Rgba(ACCENT_COLOR));
    for inset in 0..HANDLE_BORDER_WIDTH.min(size / 2) {
        let edge = size - 2 * inset;
        let offset = inset as i32;
        draw_hollow_rect_mut(
            frame,
            Rect::at(left + offset, top + offset).of_size(edge, edge),
            Rgba(HANDLE_BORDER_COLOR),
        );
    }
}
