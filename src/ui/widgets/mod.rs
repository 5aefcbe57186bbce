// SPDX-License-Identifier: GPL-3.0-or-later
// src/ui/widgets/mod.rs
//
// Custom widgets for the editor window.

pub mod crop_overlay;

pub use crop_overlay::{CropOverlay, crop_overlay};
