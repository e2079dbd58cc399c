//! Image decoding and tensor preparation for the signature model.

use std::path::Path;

use candle_core::{DType, Device, Tensor};
use image::{ImageReader, RgbImage};

use super::error::EngineError;

/// Decodes an image file to 8-bit RGB, refusing anything above `max_pixels`.
///
/// Dimensions are read from the header first so oversized images are rejected
/// before any pixel buffer is allocated.
pub fn decode_rgb(path: &Path, max_pixels: u64) -> Result<RgbImage, EngineError> {
    let decode_err = |reason: String| EngineError::ImageDecodeFailed {
        path: path.to_path_buf(),
        reason,
    };

    let (width, height) = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| decode_err(e.to_string()))?
        .into_dimensions()
        .map_err(|e| decode_err(e.to_string()))?;

    let pixels = u64::from(width) * u64::from(height);
    if pixels > max_pixels {
        return Err(EngineError::ImageTooLarge {
            path: path.to_path_buf(),
            pixels,
            max: max_pixels,
        });
    }

    let mut reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| decode_err(e.to_string()))?;
    reader.no_limits();

    let image = reader.decode().map_err(|e| decode_err(e.to_string()))?;
    Ok(image.to_rgb8())
}

/// A decoded image laid out for the model: `[1, H, W, 3]`, `f32`, raw 0-255 values.
#[derive(Debug, Clone)]
pub struct ModelInput {
    tensor: Tensor,
    width: u32,
    height: u32,
}

impl ModelInput {
    /// Moves an RGB image onto `device` as a batch of one.
    pub fn from_rgb(image: RgbImage, device: &Device) -> Result<Self, EngineError> {
        let (width, height) = image.dimensions();
        let tensor = Tensor::from_vec(
            image.into_raw(),
            (height as usize, width as usize, 3),
            device,
        )?
        .to_dtype(DType::F32)?
        .unsqueeze(0)?;

        Ok(Self {
            tensor,
            width,
            height,
        })
    }

    /// Decodes `path` and prepares it for `device`.
    pub fn load(path: &Path, max_pixels: u64, device: &Device) -> Result<Self, EngineError> {
        Self::from_rgb(decode_rgb(path, max_pixels)?, device)
    }

    pub fn tensor(&self) -> &Tensor {
        &self.tensor
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}
