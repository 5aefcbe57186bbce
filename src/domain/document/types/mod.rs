// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/document/types/mod.rs
//
// Concrete document types.

pub mod raster;
