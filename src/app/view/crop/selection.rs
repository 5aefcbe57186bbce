// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/view/crop/selection.rs
//
// Quad selection state and the pointer drag state machine.

use crate::app::view::canvas::Viewport;
use crate::domain::document::core::geometry::{Corner, Point, QuadCropArea};

/// What a pointer-down at a given position would grab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragHandle {
    None,
    Corner(Corner),
    Move,
}

/// Drag gesture in progress. `last` is the previous pointer position in
/// display space; deltas are accumulated incrementally from it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    DraggingCorner { corner: Corner, last: Point },
    DraggingShape { last: Point },
}

#[derive(Debug, Clone, Default)]
pub struct CropSelection {
    pub quad: QuadCropArea,
    pub drag: DragState,
}

impl CropSelection {
    pub fn new(quad: QuadCropArea) -> Self {
        Self {
            quad,
            drag: DragState::Idle,
        }
    }

    pub fn is_dragging(&self) -> bool {
        !matches!(self.drag, DragState::Idle)
    }

    /// Corner within `tolerance` display pixels (per axis) of `pos`, else the
    /// bounding box for a whole-shape move.
    pub fn hit_test(&self, viewport: &Viewport, pos: Point, tolerance: f64) -> DragHandle {
        for corner in Corner::ALL {
            let handle = viewport.image_to_display(self.quad.corner(corner));
            if (pos.x - handle.x).abs() < tolerance && (pos.y - handle.y).abs() < tolerance {
                return DragHandle::Corner(corner);
            }
        }

        if self.quad.bbox_contains(viewport.display_to_image(pos)) {
            return DragHandle::Move;
        }

        DragHandle::None
    }

    /// Begin a gesture at display position `pos`. Returns what was grabbed.
    pub fn pointer_down(&mut self, viewport: &Viewport, pos: Point, tolerance: f64) -> DragHandle {
        let handle = self.hit_test(viewport, pos, tolerance);
        self.drag = match handle {
            DragHandle::Corner(corner) => DragState::DraggingCorner { corner, last: pos },
            DragHandle::Move => DragState::DraggingShape { last: pos },
            DragHandle::None => DragState::Idle,
        };
        handle
    }

    /// Apply the pointer movement since the last processed event.
    ///
    /// Returns `false` without touching the quad when no gesture is active.
    pub fn pointer_move(&mut self, viewport: &Viewport, pos: Point) -> bool {
        let (img_width, img_height) = viewport.image_size();

        match self.drag {
            DragState::Idle => false,
            DragState::DraggingCorner { corner, last } => {
                let (dx, dy) = viewport.display_delta_to_image(pos.x - last.x, pos.y - last.y);
                self.quad.move_corner(corner, dx, dy, img_width, img_height);
                self.drag = DragState::DraggingCorner { corner, last: pos };
                true
            }
            DragState::DraggingShape { last } => {
                let (dx, dy) = viewport.display_delta_to_image(pos.x - last.x, pos.y - last.y);
                self.quad.translate(dx, dy, img_width, img_height);
                self.drag = DragState::DraggingShape { last: pos };
                true
            }
        }
    }

    pub fn end_drag(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Replace the quad, abandoning any gesture.
    pub fn reset(&mut self, quad: QuadCropArea) {
        self.quad = quad;
        self.drag = DragState::Idle;
    }
}
