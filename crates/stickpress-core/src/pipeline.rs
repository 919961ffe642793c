//! The normalize pipeline: decode, scale, re-encode.

use std::io::{Read, Write};

use thiserror::Error;

use crate::decode::{self, DecodeError};
use crate::encode::{self, EncodeError};
use crate::scale::{self, ScaleError};

/// Side length of the square bounding box sticker images must fit.
pub const STICKER_BOUND: u32 = 512;

/// Error for a single pipeline invocation. Each variant is terminal; the
/// pipeline never retries and never logs.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// Reading the source stream failed. The caller owns the stream and may
    /// re-fetch and re-invoke.
    #[error("failed to read input stream: {0}")]
    Input(#[source] std::io::Error),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Scale(#[from] ScaleError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Normalize one image: read `source` to exhaustion, decode it, scale it to
/// fit [`STICKER_BOUND`], and write it to `sink` as an alpha-carrying PNG.
///
/// The stages run in sequence and short-circuit on the first error,
/// propagating its kind unchanged. Nothing is written to the sink unless
/// decoding and scaling both succeeded; a failed *encode* may leave a
/// partial PNG behind, which the caller must discard.
///
/// Identical input bytes produce byte-identical output.
pub fn normalize<R: Read, W: Write>(mut source: R, sink: W) -> Result<(), NormalizeError> {
    let mut bytes = Vec::new();
    source
        .read_to_end(&mut bytes)
        .map_err(NormalizeError::Input)?;
    normalize_bytes(&bytes, sink)
}

/// [`normalize`] over an in-memory byte slice.
pub fn normalize_bytes<W: Write>(bytes: &[u8], sink: W) -> Result<(), NormalizeError> {
    let (decoded, _kind) = decode::decode_image(bytes)?;
    let scaled = scale::scale_to_fit(&decoded, STICKER_BOUND)?;
    encode::encode_png(&scaled, sink)?;
    Ok(())
}
