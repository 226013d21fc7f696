//! Raw DEFLATE framing over in-memory buffers.
//!
//! Every call builds its own encoder or inflater, drives it to the end of the
//! stream, and drops it before returning. Nothing is shared between calls, so
//! separate buffers can be processed concurrently.
//!
//! Decompression is strict: a stream that ends before its final block is
//! reported as [`CodecError::Truncated`] instead of yielding the bytes decoded
//! so far.

use std::io::{Read, Write};

use flate2::write::DeflateEncoder;
use flate2::{Compression, Decompress, FlushDecompress, Status};
use thiserror::Error;

/// Output growth step while inflating.
const INFLATE_CHUNK: usize = 32 * 1024;

/// Errors from [`compress`] and [`decompress`].
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("invalid compression level {0} (expected 0..=9)")]
    InvalidLevel(u32),

    #[error("compressed stream ended before its final block")]
    Truncated,

    #[error("corrupt deflate stream: {0}")]
    Corrupt(#[from] flate2::DecompressError),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// A validated DEFLATE level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompressionLevel(u32);

impl CompressionLevel {
    /// Stored blocks only.
    pub const NONE: Self = Self(0);
    /// Fastest real compression.
    pub const FAST: Self = Self(1);
    /// Smallest output.
    pub const BEST: Self = Self(9);

    pub fn new(level: u32) -> Result<Self, CodecError> {
        if level <= 9 {
            Ok(Self(level))
        } else {
            Err(CodecError::InvalidLevel(level))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        Self::BEST
    }
}

impl TryFrom<u32> for CompressionLevel {
    type Error = CodecError;

    fn try_from(level: u32) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl From<CompressionLevel> for Compression {
    fn from(level: CompressionLevel) -> Self {
        Compression::new(level.0)
    }
}

impl std::fmt::Display for CompressionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Compression
// ---------------------------------------------------------------------------

/// Compress `data` as a raw DEFLATE stream at `level` (0..=9).
///
/// Levels above 9 are rejected, not clamped.
pub fn compress(data: &[u8], level: u32) -> Result<Vec<u8>, CodecError> {
    let level = CompressionLevel::new(level)?;
    compress_to(data, Vec::with_capacity(data.len() / 2 + 16), level)
}

/// Compress at [`CompressionLevel::BEST`].
pub fn compress_bytes(data: &[u8]) -> Result<Vec<u8>, CodecError> {
    compress_to(data, Vec::with_capacity(data.len() / 2 + 16), CompressionLevel::BEST)
}

/// Compress `src` into `dest` and hand `dest` back once the stream is finished.
pub fn compress_to<W: Write>(
    src: &[u8],
    dest: W,
    level: CompressionLevel,
) -> Result<W, CodecError> {
    let mut encoder = DeflateEncoder::new(dest, level.into());
    encoder.write_all(src)?;
    Ok(encoder.finish()?)
}

// ---------------------------------------------------------------------------
// Decompression
// ---------------------------------------------------------------------------

/// Inflate a raw DEFLATE stream produced at any level.
///
/// Bytes after the end of the stream are ignored.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut inflater = Decompress::new(false);
    let mut out = Vec::with_capacity(data.len().saturating_mul(2).clamp(64, INFLATE_CHUNK));

    loop {
        if out.len() == out.capacity() {
            out.reserve(INFLATE_CHUNK);
        }
        let in_before = inflater.total_in();
        let out_before = inflater.total_out();
        let offset = usize::try_from(in_before).unwrap_or(data.len()).min(data.len());

        let status = inflater.decompress_vec(&data[offset..], &mut out, FlushDecompress::None)?;
        if status == Status::StreamEnd {
            return Ok(out);
        }

        let stalled = inflater.total_in() == in_before && inflater.total_out() == out_before;
        if stalled && out.len() < out.capacity() {
            // Room to write and nothing left to read: the final block never came.
            return Err(CodecError::Truncated);
        }
    }
}

/// Inflate at any level; alias kept alongside [`compress_bytes`].
pub fn decompress_bytes(data: &[u8]) -> Result<Vec<u8>, CodecError> {
    decompress(data)
}

/// Read a whole compressed stream from `src`, inflate it, and write the
/// plaintext to `dest`. Returns the number of plaintext bytes written.
pub fn decompress_from<R: Read, W: Write>(mut src: R, mut dest: W) -> Result<u64, CodecError> {
    let mut compressed = Vec::new();
    src.read_to_end(&mut compressed)?;
    let plain = decompress(&compressed)?;
    dest.write_all(&plain)?;
    dest.flush()?;
    log::trace!(
        "inflated {} bytes into {} bytes",
        compressed.len(),
        plain.len()
    );
    Ok(plain.len() as u64)
}
