// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/document/core/mod.rs
//
// Core document types: files, geometry and errors.

pub mod error;
pub mod file;
pub mod geometry;
