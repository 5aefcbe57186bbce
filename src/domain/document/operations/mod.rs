// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/document/operations/mod.rs
//
// Operations on raster documents.

pub mod crop;
pub mod detect;
