//! PNG encoding with a forced alpha channel.
//!
//! Sticker consumers expect every output PNG to carry an alpha chunk, even
//! when the source had no transparency. The encoder therefore composites
//! onto an RGBA canvas and declares the RGBA8 color type unconditionally,
//! instead of letting an opaque-image optimization strip the channel.

use std::io::Write;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use thiserror::Error;

use crate::decode::{PixelFormat, RasterImage};

/// Errors that can occur during PNG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// The sink rejected a write. The sink may hold a partial PNG and must
    /// be discarded.
    #[error("png encoding failed: {0}")]
    WriteFailed(String),
}

/// Encode `image` as a PNG with an alpha channel, writing to `sink`.
///
/// The source is copied source-over onto a zeroed, fully transparent RGBA
/// canvas of the same dimensions, then serialized as RGBA8. Opaque sources
/// get an all-0xFF alpha channel rather than no channel at all.
///
/// # Errors
///
/// Returns [`EncodeError::InvalidPixelData`] when the buffer is inconsistent
/// with the dimensions, and [`EncodeError::WriteFailed`] when the sink
/// rejects a write.
pub fn encode_png<W: Write>(image: &RasterImage, sink: W) -> Result<(), EncodeError> {
    let expected = image.width as usize * image.height as usize * image.format.channels();
    if image.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }

    // Source-over onto a fully transparent canvas reduces to a plain copy.
    let mut canvas = vec![0u8; image.width as usize * image.height as usize * 4];
    match image.format {
        PixelFormat::Rgba8 => canvas.copy_from_slice(&image.pixels),
        PixelFormat::Rgb8 => {
            for (dst, src) in canvas
                .chunks_exact_mut(4)
                .zip(image.pixels.chunks_exact(3))
            {
                dst[..3].copy_from_slice(src);
                dst[3] = 0xFF;
            }
        }
    }

    PngEncoder::new(sink)
        .write_image(&canvas, image.width, image.height, ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::WriteFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "sink closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn rgb_image(width: u32, height: u32) -> RasterImage {
        RasterImage::new(
            width,
            height,
            PixelFormat::Rgb8,
            vec![100u8; (width * height * 3) as usize],
        )
    }

    #[test]
    fn test_encode_produces_png_magic() {
        let img = rgb_image(16, 8);
        let mut out = Vec::new();

        encode_png(&img, &mut out).unwrap();
        assert_eq!(&out[..8], PNG_MAGIC);
    }

    #[test]
    fn test_encode_opaque_source_still_has_alpha() {
        let img = rgb_image(10, 10);
        let mut out = Vec::new();
        encode_png(&img, &mut out).unwrap();

        let decoded = image::load_from_memory(&out).unwrap();
        assert!(decoded.color().has_alpha());
        assert_eq!(decoded.color(), image::ColorType::Rgba8);

        // Every pixel of an opaque source is fully opaque in the output.
        let rgba = decoded.into_rgba8();
        assert!(rgba.pixels().all(|p| p.0[3] == 0xFF));
    }

    #[test]
    fn test_encode_preserves_transparency() {
        let img = RasterImage::new(
            2,
            2,
            PixelFormat::Rgba8,
            vec![
                255, 0, 0, 128, // semi-transparent red
                0, 255, 0, 255, // opaque green
                0, 0, 255, 0, // invisible blue
                9, 9, 9, 77,
            ],
        );
        let mut out = Vec::new();
        encode_png(&img, &mut out).unwrap();

        let rgba = image::load_from_memory(&out).unwrap().into_rgba8();
        assert_eq!(rgba.get_pixel(0, 0).0, [255, 0, 0, 128]);
        assert_eq!(rgba.get_pixel(1, 0).0, [0, 255, 0, 255]);
        assert_eq!(rgba.get_pixel(0, 1).0, [0, 0, 255, 0]);
    }

    #[test]
    fn test_encode_roundtrip_dimensions() {
        let img = rgb_image(33, 21);
        let mut out = Cursor::new(Vec::new());
        encode_png(&img, &mut out).unwrap();

        let decoded = image::load_from_memory(&out.into_inner()).unwrap();
        assert_eq!(decoded.width(), 33);
        assert_eq!(decoded.height(), 21);
    }

    #[test]
    fn test_encode_buffer_mismatch_error() {
        // Bypass the constructor's size assertion on purpose.
        let img = RasterImage {
            width: 10,
            height: 10,
            format: PixelFormat::Rgb8,
            pixels: vec![0u8; 17],
        };
        let result = encode_png(&img, Vec::new());

        match result {
            Err(EncodeError::InvalidPixelData { expected, actual }) => {
                assert_eq!(expected, 300);
                assert_eq!(actual, 17);
            }
            other => panic!("Expected InvalidPixelData, got: {:?}", other),
        }
    }

    #[test]
    fn test_encode_write_failure() {
        let img = rgb_image(8, 8);
        let result = encode_png(&img, FailingSink);

        assert!(matches!(result, Err(EncodeError::WriteFailed(_))));
    }
}
