// SPDX-License-Identifier: GPL-3.0-or-later
// src/constant.rs
//
// Application constants that should not be changed by the user.

/// Luma weight of the red channel (ITU-R BT.601).
pub const LUMA_RED: f32 = 0.299;

/// Luma weight of the green channel (ITU-R BT.601).
pub const LUMA_GREEN: f32 = 0.587;

/// Luma weight of the blue channel (ITU-R BT.601).
pub const LUMA_BLUE: f32 = 0.114;

/// Smallest crop edge in image pixels that is still accepted on confirm.
pub const MIN_CROP_SIZE: f64 = 1.0;

/// Width of the quad outline in display pixels.
pub const OUTLINE_WIDTH: f32 = 2.0;

/// Width of the handle border in display pixels.
pub const HANDLE_BORDER_WIDTH: u32 = 2;

/// Quad outline and handle fill (`#3b82f6`).
pub const ACCENT_COLOR: [u8; 4] = [0x3b, 0x82, 0xf6, 0xff];

/// Handle border color.
pub const HANDLE_BORDER_COLOR: [u8; 4] = [0xff, 0xff, 0xff, 0xff];

/// Config directory name below the platform config dir.
pub const CONFIG_DIR: &str = "quadcrop";

/// Config file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.toml";
