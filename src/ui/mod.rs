// SPDX-License-Identifier: GPL-3.0-or-later
// src/ui/mod.rs
//
// COSMIC editor window.

pub mod app;
pub mod widgets;

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use cosmic::iced::Size;

use crate::config::AppConfig;
pub use app::{Flags, QuadCropApp};

/// Window chrome around the canvas: padding, size readout and buttons.
const CHROME_WIDTH: f32 = 64.0;
const CHROME_HEIGHT: f32 = 160.0;

/// Open the editor for `file` and block until the window is closed.
pub fn run(config: AppConfig, file: PathBuf, output_dir: PathBuf) -> Result<()> {
    let size = Size::new(
        config.max_display_width as f32 + CHROME_WIDTH,
        config.max_display_height as f32 + CHROME_HEIGHT,
    );
    let settings = cosmic::app::Settings::default().size(size);

    cosmic::app::run::<QuadCropApp>(
        settings,
        Flags::Open {
            config,
            file,
            output_dir,
        },
    )
    .map_err(|e| anyhow!("Editor window failed: {e}"))
}
