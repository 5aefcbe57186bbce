// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/view/mod.rs
//
// View layer: canvas scaling and the crop editor.

pub mod canvas;
pub mod crop;
