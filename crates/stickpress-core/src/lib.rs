//! Stickpress Core - Image normalization library
//!
//! This crate turns user-submitted raster images (PNG, JPEG, or GIF) into
//! sticker-ready PNGs: decoded, scaled to fit a 512x512 bounding box while
//! preserving aspect ratio, and re-encoded with a guaranteed alpha channel.
//!
//! The pipeline is a pure function from an input byte stream to an output
//! byte stream. It holds no process-wide state, performs no I/O beyond the
//! caller-supplied streams, and never logs; callers decide how failures are
//! reported. Concurrent invocations only need independent streams.
//!
//! Memory usage is bounded by the source resolution. Callers that accept
//! untrusted input should cap the input size before invoking the pipeline.

pub mod decode;
pub mod encode;
pub mod pipeline;
pub mod scale;

pub use decode::{decode_image, DecodeError, ImageKind, PixelFormat, RasterImage};
pub use encode::{encode_png, EncodeError};
pub use pipeline::{normalize, normalize_bytes, NormalizeError, STICKER_BOUND};
pub use scale::{fit_dimensions, scale_to_fit, ScaleError};
