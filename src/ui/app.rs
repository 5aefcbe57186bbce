// SPDX-License-Identifier: GPL-3.0-or-later
// src/ui/app.rs
//
// COSMIC application wiring for the crop editor window.

use std::path::PathBuf;

use cosmic::app::Core;
use cosmic::iced::keyboard::{self, Key, Modifiers, key::Named};
use cosmic::iced::widget::image::{Handle as ImageHandle, Image};
use cosmic::iced::{Length, Subscription};
use cosmic::iced_widget::{column, row, stack};
use cosmic::widget::{button, container, text};
use cosmic::{Action, Element, Task};
use image::RgbaImage;

use crate::app::view::crop::{paint_selection, scale_to_frame};
use crate::app::{AppMessage, AppModel, FileWriter, WriteOutcome, update};
use crate::config::AppConfig;
use crate::domain::document::types::raster::RasterDocument;
use crate::ui::widgets::crop_overlay;

/// Flags passed from `main` into the application.
#[derive(Debug, Clone)]
pub enum Flags {
    Open {
        config: AppConfig,
        file: PathBuf,
        output_dir: PathBuf,
    },
}

/// Main application type.
pub struct QuadCropApp {
    core: Core,
    pub model: AppModel,
    writer: FileWriter,
    // Image scaled to the canvas, before any overlay.
    base: Option<RgbaImage>,
    // Base with the darkened surroundings and quad outline.
    frame: Option<ImageHandle>,
    // Shown once the session has ended.
    status: Option<String>,
}

impl cosmic::Application for QuadCropApp {
    type Executor = cosmic::SingleThreadExecutor;
    type Flags = Flags;
    type Message = AppMessage;

    const APP_ID: &'static str = "org.codeberg.wfx.QuadCrop";

    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn init(core: Core, flags: Self::Flags) -> (Self, Task<Action<Self::Message>>) {
        let Flags::Open {
            config,
            file,
            output_dir,
        } = flags;

        let mut model = AppModel::new(config);
        match RasterDocument::open(&file) {
            Ok(document) => model.open(document),
            Err(e) => {
                log::error!("Failed to open {}: {e}", file.display());
                model.set_error(format!("Failed to open {}: {e}", file.display()));
            }
        }

        let mut app = Self {
            core,
            model,
            writer: FileWriter::new(output_dir),
            base: None,
            frame: None,
            status: None,
        };
        app.base = app
            .model
            .session
            .as_ref()
            .map(|session| scale_to_frame(session.document.image(), &session.viewport));
        app.refresh_frame();

        (app, Task::none())
    }

    fn update(&mut self, message: Self::Message) -> Task<Action<Self::Message>> {
        let before = self.model.selection.quad;

        // Crop failures are also recorded on the model and shown in the view.
        if let Err(e) = update(&mut self.model, message, &mut self.writer) {
            log::warn!("{message:?}: {e}");
        }

        if let Some(outcome) = self.writer.take_outcome() {
            self.status = Some(match outcome {
                WriteOutcome::Written { path, area } => {
                    format!("Saved {} ({})", path.display(), area.size_label())
                }
                WriteOutcome::Failed { name, error } => format!("Failed to write {name}: {error}"),
                WriteOutcome::Cancelled => "Crop cancelled".to_string(),
            });
            self.base = None;
            self.frame = None;
        } else if self.model.selection.quad != before {
            self.refresh_frame();
        }

        Task::none()
    }

    fn view(&self) -> Element<'_, Self::Message> {
        let Some(session) = self.model.session.as_ref() else {
            let message = self
                .status
                .as_deref()
                .or(self.model.error.as_deref())
                .unwrap_or("No image loaded");
            return container(text(message.to_string()))
                .width(Length::Fill)
                .height(Length::Fill)
                .center(Length::Fill)
                .into();
        };

        let (width, height) = session.viewport.display_size();
        let overlay = crop_overlay(
            &self.model.selection,
            session.viewport,
            self.model.config.handle_size,
            self.model.config.handle_hit_tolerance,
        );
        let canvas: Element<'_, AppMessage> = match &self.frame {
            Some(handle) => stack![
                Image::new(handle.clone())
                    .width(Length::Fixed(width as f32))
                    .height(Length::Fixed(height as f32)),
                overlay,
            ]
            .into(),
            None => overlay.into(),
        };

        let controls = row![
            button::standard("Re-detect").on_press(AppMessage::Redetect),
            button::standard("Cancel").on_press(AppMessage::Cancel),
            button::suggested("Crop").on_press(AppMessage::Confirm),
        ]
        .spacing(8);

        let mut content = column![
            container(canvas).center(Length::Fill),
            text(self.model.crop_size_label()),
        ]
        .spacing(12)
        .padding(16);
        if let Some(error) = &self.model.error {
            content = content.push(text(error.clone()));
        }

        content.push(controls).into()
    }

    fn subscription(&self) -> Subscription<Self::Message> {
        keyboard::on_key_press(handle_key_press)
    }
}

impl QuadCropApp {
    /// Repaint the overlay onto the cached base image.
    fn refresh_frame(&mut self) {
        self.frame = match (&self.base, &self.model.session) {
            (Some(base), Some(session)) => {
                let mut frame = base.clone();
                paint_selection(
                    &mut frame,
                    &self.model.selection,
                    &session.viewport,
                    &self.model.overlay_style(),
                );
                let (width, height) = frame.dimensions();
                Some(ImageHandle::from_rgba(width, height, frame.into_raw()))
            }
            _ => None,
        };
    }
}

/// Enter confirms, Escape cancels, R re-detects.
fn handle_key_press(key: Key, modifiers: Modifiers) -> Option<AppMessage> {
    if modifiers.command() || modifiers.alt() || modifiers.logo() || modifiers.control() {
        return None;
    }

    match key.as_ref() {
        Key::Named(Named::Enter) => Some(AppMessage::Confirm),
        Key::Named(Named::Escape) => Some(AppMessage::Cancel),
        Key::Character(ch) if ch.eq_ignore_ascii_case("r") => Some(AppMessage::Redetect),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortcuts_map_to_actions() {
        let none = Modifiers::empty();
        assert_eq!(
            handle_key_press(Key::Named(Named::Enter), none),
            Some(AppMessage::Confirm)
        );
        assert_eq!(
            handle_key_press(Key::Named(Named::Escape), none),
            Some(AppMessage::Cancel)
        );
        assert_eq!(
            handle_key_press(Key::Character("R".into()), Modifiers::SHIFT),
            Some(AppMessage::Redetect)
        );
        assert_eq!(handle_key_press(Key::Character("r".into()), Modifiers::CTRL), None);
    }
}
