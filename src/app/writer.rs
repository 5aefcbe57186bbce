// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/writer.rs
//
// Crop handler that writes confirmed crops to disk.

use std::path::{Path, PathBuf};

use crate::app::update::CropHandler;
use crate::domain::document::core::error::{CropError, CropResult};
use crate::domain::document::core::file::ImageFile;
use crate::domain::document::core::geometry::CropArea;

/// How a session handed to a [`FileWriter`] ended.
#[derive(Debug)]
pub enum WriteOutcome {
    Written { path: PathBuf, area: CropArea },
    Failed { name: String, error: CropError },
    Cancelled,
}

/// Saves each confirmed crop into `output_dir` under its output name.
#[derive(Debug)]
pub struct FileWriter {
    output_dir: PathBuf,
    outcome: Option<WriteOutcome>,
}

impl FileWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            outcome: None,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Result of the last finished session, if any.
    pub fn take_outcome(&mut self) -> Option<WriteOutcome> {
        self.outcome.take()
    }

    fn save(&self, cropped: &ImageFile) -> CropResult<PathBuf> {
        log::debug!("Writing {} ({} bytes)", cropped.name, cropped.bytes.len());
        cropped.save_in(&self.output_dir)
    }
}

impl CropHandler for FileWriter {
    fn on_crop_complete(&mut self, original: ImageFile, cropped: ImageFile, area: CropArea) {
        log::debug!("Original {} ({})", original.name, original.mime_type());
        self.outcome = Some(match self.save(&cropped) {
            Ok(path) => {
                log::info!("Saved {}", path.display());
                WriteOutcome::Written { path, area }
            }
            Err(error) => {
                log::error!("Failed to write {}: {error}", cropped.name);
                WriteOutcome::Failed {
                    name: cropped.name,
                    error,
                }
            }
        });
    }

    fn on_cancel(&mut self) {
        self.outcome = Some(WriteOutcome::Cancelled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{AppMessage, AppModel, update};
    use crate::config::AppConfig;
    use crate::domain::document::types::raster::RasterDocument;
    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

    fn document() -> RasterDocument {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(120, 80, Rgba([240, 240, 240, 255])));
        let file = ImageFile {
            name: "till.png".to_string(),
            format: ImageFormat::Png,
            bytes: Vec::new(),
        };
        RasterDocument::new(file, image).unwrap()
    }

    #[test]
    fn confirmed_crop_is_written_to_output_dir() {
        let dir = std::env::temp_dir().join(format!("quadcrop-writer-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let mut model = AppModel::new(AppConfig::default());
        model.open(document());
        let mut writer = FileWriter::new(&dir);
        update(&mut model, AppMessage::Confirm, &mut writer).unwrap();

        let outcome = writer.take_outcome();
        let written = match outcome {
            Some(WriteOutcome::Written { path, .. }) => path,
            other => panic!("unexpected outcome {other:?}"),
        };
        assert_eq!(written, dir.join("cropped_till.png"));
        let decoded = image::open(&written).unwrap();
        let _ = std::fs::remove_dir_all(&dir);
        assert!(decoded.width() > 0);
        assert!(writer.take_outcome().is_none());
    }

    #[test]
    fn missing_output_dir_is_reported() {
        let dir = std::env::temp_dir().join(format!("quadcrop-writer-missing-{}", std::process::id()));
        let mut model = AppModel::new(AppConfig::default());
        model.open(document());
        let mut writer = FileWriter::new(dir.join("nope"));
        update(&mut model, AppMessage::Confirm, &mut writer).unwrap();

        assert!(matches!(
            writer.take_outcome(),
            Some(WriteOutcome::Failed { ref name, .. }) if name == "cropped_till.png"
        ));
    }

    #[test]
    fn cancel_is_recorded() {
        let mut model = AppModel::new(AppConfig::default());
        model.open(document());
        let mut writer = FileWriter::new(".");
        update(&mut model, AppMessage::Cancel, &mut writer).unwrap();
        assert!(matches!(writer.take_outcome(), Some(WriteOutcome::Cancelled)));
    }
}
