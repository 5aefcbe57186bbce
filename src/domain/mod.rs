// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/mod.rs
//
// Domain layer: documents and the operations on them, free of UI concerns.

pub mod document;
