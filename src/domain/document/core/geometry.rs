// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/document/core/geometry.rs
//
// Points, crop quads and their bounding boxes in image pixel space.

use std::fmt;

/// A point in original-image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamp into `[0, width] x [0, height]`.
    #[must_use]
    pub fn clamped(self, width: f64, height: f64) -> Self {
        Self {
            x: self.x.max(0.0).min(width),
            y: self.y.max(0.0).min(height),
        }
    }

    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

/// Identity of one of the four quad corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// All corners in hit-test order.
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TopLeft => write!(f, "top-left"),
            Self::TopRight => write!(f, "top-right"),
            Self::BottomLeft => write!(f, "bottom-left"),
            Self::BottomRight => write!(f, "bottom-right"),
        }
    }
}

/// Four independently movable corners of a crop selection.
///
/// Nothing enforces convexity or left/right ordering; only the bounding box
/// of the corners is used when cropping.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct QuadCropArea {
    pub top_left: Point,
    pub top_right: Point,
    pub bottom_left: Point,
    pub bottom_right: Point,
}

impl QuadCropArea {
    /// Axis-aligned quad spanning `(left, top)` to `(right, bottom)`.
    pub fn from_bounds(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            top_left: Point::new(left, top),
            top_right: Point::new(right, top),
            bottom_left: Point::new(left, bottom),
            bottom_right: Point::new(right, bottom),
        }
    }

    /// Rectangle inset from every image edge by `inset` of the image size.
    pub fn inset(width: f64, height: f64, inset: f64) -> Self {
        let margin_x = width * inset;
        let margin_y = height * inset;
        Self::from_bounds(margin_x, margin_y, width - margin_x, height - margin_y)
    }

    pub fn corner(&self, corner: Corner) -> Point {
        match corner {
            Corner::TopLeft => self.top_left,
            Corner::TopRight => self.top_right,
            Corner::BottomLeft => self.bottom_left,
            Corner::BottomRight => self.bottom_right,
        }
    }

    pub fn corner_mut(&mut self, corner: Corner) -> &mut Point {
        match corner {
            Corner::TopLeft => &mut self.top_left,
            Corner::TopRight => &mut self.top_right,
            Corner::BottomLeft => &mut self.bottom_left,
            Corner::BottomRight => &mut self.bottom_right,
        }
    }

    /// Corners in [`Corner::ALL`] order.
    pub fn corners(&self) -> [Point; 4] {
        Corner::ALL.map(|c| self.corner(c))
    }

    /// Corners in outline order: top-left, top-right, bottom-right, bottom-left.
    pub fn outline(&self) -> [Point; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    /// Move a single corner and clamp it to the image.
    pub fn move_corner(&mut self, corner: Corner, dx: f64, dy: f64, width: f64, height: f64) {
        let point = self.corner_mut(corner);
        *point = point.offset(dx, dy).clamped(width, height);
    }

    /// Move every corner by the same delta.
    ///
    /// The delta is limited once so that no corner leaves the image, which
    /// keeps the shape intact when dragging against an edge.
    pub fn translate(&mut self, dx: f64, dy: f64, width: f64, height: f64) {
        let (dx, dy) = self.clamp_delta(dx, dy, width, height);
        for corner in Corner::ALL {
            let point = self.corner_mut(corner);
            *point = point.offset(dx, dy).clamped(width, height);
        }
    }

    /// Largest part of `(dx, dy)` that keeps all corners inside the image.
    pub fn clamp_delta(&self, dx: f64, dy: f64, width: f64, height: f64) -> (f64, f64) {
        let corners = self.corners();
        let min_dx = corners.iter().map(|p| -p.x).fold(f64::NEG_INFINITY, f64::max);
        let max_dx = corners.iter().map(|p| width - p.x).fold(f64::INFINITY, f64::min);
        let min_dy = corners.iter().map(|p| -p.y).fold(f64::NEG_INFINITY, f64::max);
        let max_dy = corners.iter().map(|p| height - p.y).fold(f64::INFINITY, f64::min);

        // max/min rather than clamp: no panic if a corner already sits outside.
        (dx.max(min_dx).min(max_dx), dy.max(min_dy).min(max_dy))
    }

    /// Clamp every corner into the image.
    #[must_use]
    pub fn clamped(self, width: f64, height: f64) -> Self {
        Self {
            top_left: self.top_left.clamped(width, height),
            top_right: self.top_right.clamped(width, height),
            bottom_left: self.bottom_left.clamped(width, height),
            bottom_right: self.bottom_right.clamped(width, height),
        }
    }

    /// Same quad in another coordinate space.
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            top_left: self.top_left.scaled(factor),
            top_right: self.top_right.scaled(factor),
            bottom_left: self.bottom_left.scaled(factor),
            bottom_right: self.bottom_right.scaled(factor),
        }
    }

    /// Axis-aligned bounding box of the four corners.
    pub fn bounding_box(&self) -> CropArea {
        let corners = self.corners();
        let min_x = corners.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let max_x = corners.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
        let min_y = corners.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max_y = corners.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

        CropArea {
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    /// Bounding-box containment; not an exact point-in-quadrilateral test.
    pub fn bbox_contains(&self, point: Point) -> bool {
        self.bounding_box().contains(point)
    }
}

impl fmt::Display for QuadCropArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [tl, tr, bl, br] = self.corners();
        write!(
            f,
            "TL({:.1}, {:.1}) TR({:.1}, {:.1}) BL({:.1}, {:.1}) BR({:.1}, {:.1})",
            tl.x, tl.y, tr.x, tr.y, bl.x, bl.y, br.x, br.y
        )
    }
}

/// Axis-aligned crop rectangle in image pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CropArea {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropArea {
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Human readable size, e.g. `85 × 165 px`.
    pub fn size_label(&self) -> String {
        format!("{} × {} px", self.width.round(), self.height.round())
    }
}

impl fmt::Display for CropArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x={:.1} y={:.1} width={:.1} height={:.1}",
            self.x, self.y, self.width, self.height
        )
    }
}
