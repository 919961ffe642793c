//! Aspect-preserving scaling to the sticker bounding box.
//!
//! The scaler always produces an image whose dominant axis equals the bound,
//! scaling smaller sources *up* as well as larger sources down. Resampling
//! uses bilinear (triangle) interpolation.

use image::imageops::FilterType;
use thiserror::Error;

use crate::decode::{PixelFormat, RasterImage};

/// Error types for scaling operations.
#[derive(Debug, Error)]
pub enum ScaleError {
    /// Source image has a zero dimension. The decoder never produces one;
    /// this guards direct callers.
    #[error("invalid image: zero-area source ({width}x{height})")]
    InvalidImage { width: u32, height: u32 },

    /// Pixel buffer length does not match the header dimensions.
    #[error("pixel buffer does not match {width}x{height} dimensions")]
    BufferMismatch { width: u32, height: u32 },
}

/// Compute the dimensions that fit `width` x `height` into a square of side
/// `bound` while preserving aspect ratio.
///
/// The dominant axis becomes `bound`; the other axis is scaled with *floor*
/// rounding so it can never exceed the bound. The floor can undershoot the
/// conventional midpoint by one pixel (511 instead of 512 for some ratios);
/// keep the floor, do not switch to rounding. An axis floored all the way
/// to zero is clamped to 1.
pub fn fit_dimensions(width: u32, height: u32, bound: u32) -> (u32, u32) {
    if width <= height {
        // Portrait or square: constrain by height.
        let target_width =
            (f64::from(bound) * f64::from(width) / f64::from(height)).floor() as u32;
        (target_width.max(1), bound)
    } else {
        // Landscape: constrain by width.
        let target_height =
            (f64::from(bound) * f64::from(height) / f64::from(width)).floor() as u32;
        (bound, target_height.max(1))
    }
}

/// Resample `image` so it fits within a square of side `bound`, preserving
/// aspect ratio and pixel format.
///
/// # Errors
///
/// Returns [`ScaleError::InvalidImage`] for a zero-area source and
/// [`ScaleError::BufferMismatch`] if the pixel buffer is inconsistent with
/// the header dimensions.
pub fn scale_to_fit(image: &RasterImage, bound: u32) -> Result<RasterImage, ScaleError> {
    if image.width == 0 || image.height == 0 {
        return Err(ScaleError::InvalidImage {
            width: image.width,
            height: image.height,
        });
    }

    let (target_width, target_height) = fit_dimensions(image.width, image.height, bound);

    // Fast path: already at target size.
    if image.width == target_width && image.height == target_height {
        return Ok(image.clone());
    }

    let mismatch = ScaleError::BufferMismatch {
        width: image.width,
        height: image.height,
    };

    match image.format {
        PixelFormat::Rgb8 => {
            let buffer = image::RgbImage::from_raw(image.width, image.height, image.pixels.clone())
                .ok_or(mismatch)?;
            let resized =
                image::imageops::resize(&buffer, target_width, target_height, FilterType::Triangle);
            Ok(RasterImage::new(
                target_width,
                target_height,
                PixelFormat::Rgb8,
                resized.into_raw(),
            ))
        }
        PixelFormat::Rgba8 => {
            let buffer =
                image::RgbaImage::from_raw(image.width, image.height, image.pixels.clone())
                    .ok_or(mismatch)?;
            let resized =
                image::imageops::resize(&buffer, target_width, target_height, FilterType::Triangle);
            Ok(RasterImage::new(
                target_width,
                target_height,
                PixelFormat::Rgba8,
                resized.into_raw(),
            ))
        }
    }
}
