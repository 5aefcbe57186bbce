// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/mod.rs
//
// Application layer: crop session model, messages and update loop.

pub mod message;
pub mod model;
pub mod update;
pub mod view;
pub mod writer;

pub use message::AppMessage;
pub use model::AppModel;
pub use update::{CropHandler, update};
pub use writer::{FileWriter, WriteOutcome};
