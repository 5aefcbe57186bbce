// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/update.rs
//
// Message handling for the crop session.

use crate::app::message::AppMessage;
use crate::app::model::AppModel;
use crate::domain::document::core::error::{CropError, CropResult};
use crate::domain::document::core::file::ImageFile;
use crate::domain::document::core::geometry::{CropArea, Point};
use crate::domain::document::operations::crop::crop_document;

/// Receives the result of a crop session.
pub trait CropHandler {
    /// Called exactly once per successful confirm.
    fn on_crop_complete(&mut self, original: ImageFile, cropped: ImageFile, area: CropArea);

    /// Called when the user aborts without cropping.
    fn on_cancel(&mut self);
}

/// Apply `message` to `model`.
///
/// Pointer messages without an active session or gesture are no-ops. A
/// failed confirm keeps the session open and records the error on the model.
pub fn update(
    model: &mut AppModel,
    message: AppMessage,
    handler: &mut dyn CropHandler,
) -> CropResult<()> {
    match message {
        AppMessage::PointerDown { x, y } => {
            let Some(session) = model.session.as_ref() else {
                return Ok(());
            };
            let handle = model.selection.pointer_down(
                &session.viewport,
                Point::new(x, y),
                model.config.handle_hit_tolerance,
            );
            log::debug!("Pointer down at ({x:.1}, {y:.1}): {handle:?}");
        }

        AppMessage::PointerMove { x, y } => {
            if !model.selection.is_dragging() {
                return Ok(());
            }
            if let Some(session) = model.session.as_ref() {
                model.selection.pointer_move(&session.viewport, Point::new(x, y));
            }
        }

        AppMessage::PointerUp | AppMessage::PointerLeave => {
            if model.selection.is_dragging() {
                log::debug!("Drag ended: {}", model.selection.quad);
            }
            model.selection.end_drag();
        }

        AppMessage::Redetect => {
            let Some(session) = model.session.as_ref() else {
                return Err(CropError::NoSession);
            };
            let quad = model.initial_quad(&session.document);
            model.selection.reset(quad);
            model.clear_error();
        }

        AppMessage::Confirm => {
            let Some(session) = model.session.as_ref() else {
                return Err(CropError::NoSession);
            };
            model.selection.end_drag();

            match crop_document(
                &session.document,
                &model.selection.quad,
                &model.config.output_prefix,
            ) {
                Ok(outcome) => {
                    model.close();
                    model.clear_error();
                    handler.on_crop_complete(outcome.original, outcome.cropped, outcome.area);
                }
                Err(e) => {
                    log::error!("Crop failed: {e}");
                    model.set_error(e.to_string());
                    return Err(e);
                }
            }
        }

        AppMessage::Cancel => {
            if model.close().is_none() {
                return Err(CropError::NoSession);
            }
            log::info!("Crop cancelled");
            handler.on_cancel();
        }
    }

    Ok(())
}
