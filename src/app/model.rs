// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/model.rs
//
// Crop session state.

use image::RgbaImage;

use crate::app::view::canvas::Viewport;
use crate::app::view::crop::{CropSelection, OverlayStyle, render_frame};
use crate::config::AppConfig;
use crate::domain::document::core::geometry::{CropArea, QuadCropArea};
use crate::domain::document::operations::detect::initial_quad;
use crate::domain::document::types::raster::RasterDocument;

/// Image and viewport of the active session.
#[derive(Debug)]
pub struct Session {
    pub document: RasterDocument,
    pub viewport: Viewport,
}

pub struct AppModel {
    pub config: AppConfig,

    // Document.
    pub session: Option<Session>,

    // Tools.
    pub selection: CropSelection,

    // UI state.
    pub error: Option<String>,
}

impl AppModel {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            session: None,
            selection: CropSelection::default(),
            error: None,
        }
    }

    /// Start a session for `document`, seeding the quad by detection.
    pub fn open(&mut self, document: RasterDocument) {
        let (width, height) = document.dimensions();
        let viewport = Viewport::new(
            width,
            height,
            self.config.max_display_width,
            self.config.max_display_height,
        )
        .with_device_pixel_ratio(self.config.device_pixel_ratio);

        let quad = self.initial_quad(&document);
        log::debug!(
            "Crop session for {} at display scale {:.3}",
            document.file().name,
            viewport.scale()
        );

        self.selection.reset(quad);
        self.session = Some(Session { document, viewport });
        self.clear_error();
    }

    /// Detected quad for `document`, or the configured inset.
    pub fn initial_quad(&self, document: &RasterDocument) -> QuadCropArea {
        initial_quad(
            document.image(),
            &self.config.detection(),
            self.config.default_inset,
        )
    }

    /// End the session and drop its state.
    pub fn close(&mut self) -> Option<Session> {
        self.selection.end_drag();
        self.session.take()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Bounding box of the current quad.
    pub fn crop_area(&self) -> CropArea {
        self.selection.quad.bounding_box()
    }

    /// Size readout shown beneath the canvas.
    pub fn crop_size_label(&self) -> String {
        self.crop_area().size_label()
    }

    pub fn overlay_style(&self) -> OverlayStyle {
        OverlayStyle {
            overlay_alpha: self.config.overlay_alpha,
            handle_size: self.config.handle_size,
        }
    }

    /// Render the editor frame for the current state.
    pub fn frame(&self) -> Option<RgbaImage> {
        let session = self.session.as_ref()?;
        Some(render_frame(
            session.document.image(),
            &self.selection,
            &session.viewport,
            &self.overlay_style(),
        ))
    }

    pub fn set_error<S: Into<String>>(&mut self, msg: S) {
        self.error = Some(msg.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}
