// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/view/crop/mod.rs
//
// Crop editor module: quad selection state and the rendered overlay.

mod overlay;
mod selection;

pub use overlay::{OverlayStyle, paint_selection, render_frame, scale_to_frame};
pub use selection::{CropSelection, DragHandle, DragState};
