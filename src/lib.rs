// SPDX-License-Identifier: GPL-3.0-or-later
// src/lib.rs
//
// quadcrop: receipt cropping with automatic bounds detection and a four-corner editor.

pub mod app;
pub mod config;
pub mod constant;
pub mod domain;
#[cfg(feature = "gui")]
pub mod ui;

pub use app::{AppMessage, AppModel, CropHandler, update};
pub use config::AppConfig;
pub use domain::document::core::error::{CropError, CropResult};
pub use domain::document::core::file::ImageFile;
pub use domain::document::core::geometry::{Corner, CropArea, Point, QuadCropArea};
pub use domain::document::operations::crop::{CropOutcome, CropRegion};
pub use domain::document::operations::detect::{DetectionParams, detect_document_bounds};
pub use domain::document::types::raster::RasterDocument;
