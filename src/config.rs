// SPDX-License-Identifier: GPL-3.0-or-later
// src/config.rs
//
// Global configuration for the application, persisted as TOML.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::constant::{CONFIG_DIR, CONFIG_FILE};
use crate::domain::document::operations::detect::DetectionParams;

/// Global configuration for the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Maximum width of the editor canvas in display pixels.
    pub max_display_width: f64,
    /// Maximum height of the editor canvas in display pixels.
    pub max_display_height: f64,
    /// Physical pixels per display pixel for the rendered frame.
    pub device_pixel_ratio: f64,
    /// Edge length of the drawn corner handles in display pixels.
    pub handle_size: f64,
    /// Per-axis grab distance around a corner in display pixels.
    pub handle_hit_tolerance: f64,
    /// Luma above which a pixel counts as part of the document.
    pub brightness_threshold: u8,
    /// Share of bright pixels needed for detection to succeed (0.0 - 1.0).
    pub min_bright_ratio: f64,
    /// Outward margin added to the detected box, relative to its size.
    pub detection_margin: f64,
    /// Inset of the fallback quad, relative to the image size.
    pub default_inset: f64,
    /// Opacity of the darkening overlay outside the quad (0.0 - 1.0).
    pub overlay_alpha: f32,
    /// File name prefix of cropped output.
    pub output_prefix: String,
    /// Directory for cropped output. `None` writes next to the input file.
    pub output_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_display_width: 1000.0,
            max_display_height: 600.0,
            device_pixel_ratio: 1.0,
            handle_size: 12.0,
            handle_hit_tolerance: 20.0,
            brightness_threshold: 200,
            min_bright_ratio: 0.10,
            detection_margin: 0.05,
            default_inset: 0.10,
            overlay_alpha: 0.5,
            output_prefix: "cropped_".to_string(),
            output_dir: None,
        }
    }
}

impl AppConfig {
    /// Default location of the config file, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Parse and validate a config from TOML text.
    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw).context("Failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config from `path`.
    ///
    /// A missing file yields the defaults (first run).
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("Config file {} does not exist; using defaults", path.display());
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_toml(&raw)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from `path` (or the default location), falling back to defaults on any error.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path.map(Path::to_path_buf).or_else(Self::default_path) else {
            return Self::default();
        };

        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{e:#}; using default config");
                Self::default()
            }
        }
    }

    /// Write this config to `path` as TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        let raw = toml::to_string_pretty(self).context("Failed to serialize config")?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, raw)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        log::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Reject values the editor cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(self.max_display_width > 0.0 && self.max_display_height > 0.0) {
            bail!(
                "max display size must be positive, got {}x{}",
                self.max_display_width,
                self.max_display_height
            );
        }
        if !(self.device_pixel_ratio > 0.0) {
            bail!("device_pixel_ratio must be positive, got {}", self.device_pixel_ratio);
        }
        if !(self.handle_size > 0.0 && self.handle_hit_tolerance > 0.0) {
            bail!("handle sizes must be positive");
        }
        if !(self.min_bright_ratio > 0.0 && self.min_bright_ratio <= 1.0) {
            bail!("min_bright_ratio must be in (0, 1], got {}", self.min_bright_ratio);
        }
        if !(0.0..=1.0).contains(&self.detection_margin) {
            bail!("detection_margin must be in [0, 1], got {}", self.detection_margin);
        }
        if !(0.0..0.5).contains(&self.default_inset) {
            bail!("default_inset must be in [0, 0.5), got {}", self.default_inset);
        }
        if !(0.0..=1.0).contains(&self.overlay_alpha) {
            bail!("overlay_alpha must be in [0, 1], got {}", self.overlay_alpha);
        }
        Ok(())
    }

    /// Where crops of `input` are written: the configured directory, else
    /// next to the input.
    pub fn output_dir_for(&self, input: &Path) -> PathBuf {
        self.output_dir
            .clone()
            .or_else(|| input.parent().map(Path::to_path_buf))
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Detection parameters derived from this config.
    pub fn detection(&self) -> DetectionParams {
        DetectionParams {
            brightness_threshold: self.brightness_threshold,
            min_bright_ratio: self.min_bright_ratio,
            margin: self.detection_margin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.brightness_threshold, 200);
        assert_eq!(config.output_prefix, "cropped_");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml("max_display_width = 800.0\n").unwrap();
        assert_eq!(config.max_display_width, 800.0);
        assert_eq!(config.max_display_height, 600.0);
        assert_eq!(config.default_inset, 0.10);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(AppConfig::from_toml("min_bright_ratio = 0.0\n").is_err());
        assert!(AppConfig::from_toml("default_inset = 0.5\n").is_err());
        assert!(AppConfig::from_toml("max_display_height = -1.0\n").is_err());
        assert!(AppConfig::from_toml("overlay_alpha = 2.0\n").is_err());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("quadcrop-no-such-config.toml");
        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn broken_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!("quadcrop-broken-{}.toml", std::process::id()));
        fs::write(&path, "max_display_width = \"wide\"").unwrap();
        let config = AppConfig::load_or_default(Some(&path));
        let _ = fs::remove_file(&path);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = std::env::temp_dir().join(format!("quadcrop-save-{}", std::process::id()));
        let path = dir.join("nested").join(CONFIG_FILE);
        let config = AppConfig {
            output_prefix: "receipt_".to_string(),
            output_dir: Some(PathBuf::from("/tmp/out")),
            ..AppConfig::default()
        };
        config.save(&path).unwrap();
        let loaded = AppConfig::load(&path).unwrap();
        let _ = fs::remove_dir_all(&dir);
        assert_eq!(loaded, config);
    }

    #[test]
    fn output_dir_defaults_to_input_dir() {
        let mut config = AppConfig::default();
        assert_eq!(config.output_dir_for(Path::new("/scans/r.jpg")), PathBuf::from("/scans"));
        assert_eq!(config.output_dir_for(Path::new("r.jpg")), PathBuf::from("."));

        config.output_dir = Some(PathBuf::from("/out"));
        assert_eq!(config.output_dir_for(Path::new("/scans/r.jpg")), PathBuf::from("/out"));
    }

    #[test]
    fn detection_params_follow_config() {
        let config = AppConfig {
            brightness_threshold: 180,
            ..AppConfig::default()
        };
        let params = config.detection();
        assert_eq!(params.brightness_threshold, 180);
        assert_eq!(params.min_bright_ratio, 0.10);
        assert_eq!(params.margin, 0.05);
    }
}
