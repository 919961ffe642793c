//! Image decoding for the sticker pipeline.
//!
//! Format detection is a registry of sniff-tagged codec entries tried in a
//! fixed priority order (PNG, JPEG, GIF). Adding a format means registering
//! a new codec entry, not growing a type hierarchy.
//!
//! Decoding reads the input bytes and nothing else; animated GIFs are
//! reduced to their first frame.

mod types;

pub use types::{DecodeError, ImageKind, PixelFormat, RasterImage};

/// A registry entry: a container format plus the magic-byte check for it.
struct Codec {
    kind: ImageKind,
    sniff: fn(&[u8]) -> bool,
}

/// Tried in order; first match wins.
const CODECS: &[Codec] = &[
    Codec {
        kind: ImageKind::Png,
        sniff: sniff_png,
    },
    Codec {
        kind: ImageKind::Jpeg,
        sniff: sniff_jpeg,
    },
    Codec {
        kind: ImageKind::Gif,
        sniff: sniff_gif,
    },
];

fn sniff_png(bytes: &[u8]) -> bool {
    bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A])
}

fn sniff_jpeg(bytes: &[u8]) -> bool {
    // SOI marker followed by any APPn/marker byte.
    bytes.starts_with(&[0xFF, 0xD8, 0xFF])
}

fn sniff_gif(bytes: &[u8]) -> bool {
    bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a")
}

/// Identify the container format of `bytes`, if any registered codec
/// recognizes it.
pub fn detect_format(bytes: &[u8]) -> Option<ImageKind> {
    CODECS
        .iter()
        .find(|codec| (codec.sniff)(bytes))
        .map(|codec| codec.kind)
}

/// Decode an image from bytes into a [`RasterImage`].
///
/// Supports PNG, JPEG, and GIF (first frame only). Returns the decoded
/// pixel buffer together with the detected format.
///
/// # Errors
///
/// Returns [`DecodeError::UnsupportedFormat`] if no registered codec
/// recognizes the bytes, and [`DecodeError::Corrupted`] if the stream is
/// recognized but truncated or otherwise undecodable.
pub fn decode_image(bytes: &[u8]) -> Result<(RasterImage, ImageKind), DecodeError> {
    let kind = detect_format(bytes).ok_or(DecodeError::UnsupportedFormat)?;

    let img = image::load_from_memory_with_format(bytes, kind.to_image_format()).map_err(|e| {
        DecodeError::Corrupted {
            kind,
            reason: e.to_string(),
        }
    })?;

    Ok((RasterImage::from_dynamic(img), kind))
}
