// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Error types for GLB parsing and encoding.

use thiserror::Error;

/// Errors that can occur while reading or writing a GLB container.
#[derive(Debug, Error)]
pub enum GlbError {
    /// Input data is too short or a chunk runs past the end of the file.
    #[error("unexpected end of GLB data")]
    UnexpectedEof,
    /// Missing `glTF` magic at the start of the file.
    #[error("missing glTF magic (not a GLB file)")]
    InvalidMagic,
    /// Only container version 2 is supported.
    #[error("unsupported GLB version: {0}")]
    UnsupportedVersion(u32),
    /// Header length field disagrees with the actual data length.
    #[error("GLB length field says {declared} bytes, data has {actual}")]
    LengthMismatch { declared: usize, actual: usize },
    /// First chunk is not a JSON chunk.
    #[error("first GLB chunk must be JSON, found type 0x{0:08X}")]
    MissingJsonChunk(u32),
    /// The JSON chunk is not a valid glTF document.
    #[error("invalid glTF JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    /// An index in the document points past the end of its array.
    #[error("{kind} index {index} out of range")]
    IndexOutOfRange { kind: &'static str, index: usize },
    /// An accessor or buffer view refers to bytes outside its buffer.
    #[error("{0} extends past the end of its buffer")]
    OutOfBounds(&'static str),
    /// The accessor data does not live in the embedded BIN chunk.
    #[error("buffer {0} is not the embedded GLB binary chunk")]
    ExternalBuffer(usize),
    /// The accessor has no buffer view (sparse-only or zero-filled).
    #[error("accessor {0} has no buffer view")]
    NoBufferView(usize),
    /// Reading the file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GlbError>;
