//! Format gate: extension allow-set and re-encoding to the engine's native format.
//!
//! The gate runs in two steps. [`check_extension`] rejects unsupported targets
//! before anything is downloaded; [`normalize`] runs on the acquired file and
//! converts it when the engine cannot read it directly.

mod error;

#[cfg(test)]
mod tests;

pub use error::FormatError;

use std::path::{Path, PathBuf};

use image::ImageFormat;
use tracing::info;

use crate::constants::NATIVE_EXTENSION;
use crate::model::decode_rgb;

/// Accepted target encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    /// Converted to jpg before inference.
    Png,
    /// Passed to the engine unchanged.
    Jpg,
}

impl ImageKind {
    /// Extensions in the allow-set. Matching is case-sensitive.
    pub const ALLOWED_EXTENSIONS: [&'static str; 2] = ["png", "jpg"];

    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "png" => Some(Self::Png),
            "jpg" => Some(Self::Jpg),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpg => "jpg",
        }
    }

    pub fn needs_conversion(self) -> bool {
        self.extension() != NATIVE_EXTENSION
    }
}

/// Returns the text after the last `.` of `file_name`, or the whole name if it has none.
pub fn extension_of(file_name: &str) -> &str {
    file_name.rsplit('.').next().unwrap_or(file_name)
}

/// Checks a target's file name against the allow-set.
pub fn check_extension(file_name: &str) -> Result<ImageKind, FormatError> {
    let extension = extension_of(file_name);
    ImageKind::from_extension(extension).ok_or_else(|| FormatError::Unsupported {
        extension: extension.to_string(),
    })
}

/// Path the converted image is written to: same directory and stem, native extension.
pub fn converted_path(path: &Path) -> PathBuf {
    path.with_extension(NATIVE_EXTENSION)
}

/// Returns a path the engine can read, converting the acquired file if needed.
pub fn normalize(path: &Path, kind: ImageKind, max_pixels: u64) -> Result<PathBuf, FormatError> {
    if kind.needs_conversion() {
        convert_to_native(path, max_pixels)
    } else {
        Ok(path.to_path_buf())
    }
}

/// Re-encodes `path` as 3-channel jpg next to the original. Alpha is dropped.
pub fn convert_to_native(path: &Path, max_pixels: u64) -> Result<PathBuf, FormatError> {
    let target = converted_path(path);
    info!(source = %path.display(), target = %target.display(), "Converting image to jpg");

    let conversion_err = |reason: String| FormatError::Conversion {
        path: path.to_path_buf(),
        reason,
    };

    let rgb = decode_rgb(path, max_pixels).map_err(|e| conversion_err(e.to_string()))?;
    rgb.save_with_format(&target, ImageFormat::Jpeg)
        .map_err(|e| conversion_err(e.to_string()))?;

    Ok(target)
}
