// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/message.rs
//
// Crop session messages: pointer events and user actions.

/// Pointer coordinates are in canvas display space, relative to the
/// canvas' top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppMessage {
    // Pointer.
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    PointerLeave,

    // Actions.
    Redetect,
    Confirm,
    Cancel,
}
