// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/document/core/file.rs
//
// In-memory image file: name, format and encoded bytes.

use std::fmt;
use std::fs;
use std::path::Path;

use image::ImageFormat;

use super::error::{CropError, CropResult};

/// An encoded image file as handed in by the caller or produced by a crop.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub name: String,
    pub format: ImageFormat,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageFile")
            .field("name", &self.name)
            .field("format", &self.format)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl ImageFile {
    /// Wrap encoded bytes. The format is taken from the file name, then
    /// sniffed from the content.
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> CropResult<Self> {
        let name = name.into();
        let format = ImageFormat::from_path(&name)
            .or_else(|_| image::guess_format(&bytes))
            .map_err(|_| CropError::UnsupportedFormat(name.clone()))?;

        Ok(Self {
            name,
            format,
            bytes,
        })
    }

    /// Read a file from disk.
    pub fn open(path: &Path) -> CropResult<Self> {
        let bytes = fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_bytes(name, bytes)
    }

    /// MIME type of the encoded data, e.g. `image/png`.
    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }

    /// Write the encoded bytes into `dir` under this file's name.
    pub fn save_in(&self, dir: &Path) -> CropResult<std::path::PathBuf> {
        let path = dir.join(&self.name);
        fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}
