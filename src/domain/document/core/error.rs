// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/document/core/error.rs
//
// Error type for loading, cropping and encoding documents.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CropError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode {name}: {source}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },

    #[error("unsupported image format for {0}")]
    UnsupportedFormat(String),

    #[error("image {0} has no pixels")]
    EmptyImage(String),

    #[error("failed to encode cropped image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("encoder produced no data for {0}")]
    EmptyEncoding(String),

    #[error("crop area {width:.1}x{height:.1} is too small")]
    DegenerateSelection { width: f64, height: f64 },

    #[error("no crop session is active")]
    NoSession,
}

pub type CropResult<T> = Result<T, CropError>;
