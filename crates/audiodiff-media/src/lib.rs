//! Media collaborators for audiodiff.
//!
//! The diff engine treats decoding, tag parsing and raw file comparison as
//! opaque services. This crate provides the production implementations:
//!
//! - [`StreamDecoder`] / [`FfmpegDecoder`] -- Decode to canonical PCM through
//!   `ffmpeg` and digest the stream
//! - [`TagReader`] / [`TagCodec`] / [`CodecRegistry`] -- Normalized tags, one
//!   codec per container format
//! - [`files_equal`] -- Whole-file byte comparison

pub mod binary;
pub mod error;
pub mod stream;
pub mod tags;

pub use binary::files_equal;
pub use error::{MediaError, MediaResult};
pub use stream::{digest_reader, FfmpegDecoder, StreamDecoder, StreamDigest};
pub use tags::{CodecRegistry, Freeform, TagCodec, TagReader};
