// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! GLB header and chunk framing.
//!
//! ```text
//! [4 bytes] magic "glTF" (0x46546C67 LE)
//! [4 bytes] version (2)
//! [4 bytes] total length
//! then chunks:
//! [4 bytes] chunk length (LE u32, excludes this 8-byte chunk header)
//! [4 bytes] chunk type ("JSON" or "BIN\0")
//! [N bytes] chunk data
//! ```
//!
//! The first chunk must be JSON. An optional BIN chunk follows. Any other
//! chunks are kept verbatim so a load/save round trip is byte-exact.

use super::error::{GlbError, Result};

pub const MAGIC: u32 = 0x4654_6C67;
pub const VERSION: u32 = 2;
pub const CHUNK_JSON: u32 = 0x4E4F_534A;
pub const CHUNK_BIN: u32 = 0x004E_4942;

const HEADER_LEN: usize = 12;
const CHUNK_HEADER_LEN: usize = 8;

/// A chunk the watermark does not interpret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawChunk {
    pub chunk_type: u32,
    pub data: Vec<u8>,
}

/// The chunks of a GLB file, split but not interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunks {
    /// JSON chunk data exactly as stored (including trailing pad spaces).
    pub json: Vec<u8>,
    /// BIN chunk data, if the file has one.
    pub bin: Option<Vec<u8>>,
    /// Any further chunks, in file order.
    pub extra: Vec<RawChunk>,
}

fn read_u32(data: &[u8], pos: usize) -> Result<u32> {
    let bytes = data.get(pos..pos + 4).ok_or(GlbError::UnexpectedEof)?;
    Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Split a GLB byte stream into its chunks.
pub fn split_chunks(data: &[u8]) -> Result<Chunks> {
    if data.len() < HEADER_LEN {
        return Err(GlbError::UnexpectedEof);
    }
    if read_u32(data, 0)? != MAGIC {
        return Err(GlbError::InvalidMagic);
    }
    let version = read_u32(data, 4)?;
    if version != VERSION {
        return Err(GlbError::UnsupportedVersion(version));
    }
    let declared = read_u32(data, 8)? as usize;
    if declared != data.len() {
        return Err(GlbError::LengthMismatch { declared, actual: data.len() });
    }

    let mut raw = Vec::new();
    let mut pos = HEADER_LEN;
    while pos < data.len() {
        let len = read_u32(data, pos)? as usize;
        let chunk_type = read_u32(data, pos + 4)?;
        let start = pos + CHUNK_HEADER_LEN;
        let end = start.checked_add(len).ok_or(GlbError::UnexpectedEof)?;
        let body = data.get(start..end).ok_or(GlbError::UnexpectedEof)?;
        raw.push(RawChunk { chunk_type, data: body.to_vec() });
        pos = end;
    }

    let mut iter = raw.into_iter();
    let json = match iter.next() {
        Some(c) if c.chunk_type == CHUNK_JSON => c.data,
        Some(c) => return Err(GlbError::MissingJsonChunk(c.chunk_type)),
        None => return Err(GlbError::UnexpectedEof),
    };

    let mut bin = None;
    let mut extra = Vec::new();
    for chunk in iter {
        if chunk.chunk_type == CHUNK_BIN && bin.is_none() && extra.is_empty() {
            bin = Some(chunk.data);
        } else {
            extra.push(chunk);
        }
    }

    Ok(Chunks { json, bin, extra })
}

/// Pad to a 4-byte boundary with `fill`.
fn push_chunk(out: &mut Vec<u8>, chunk_type: u32, data: &[u8], fill: u8) {
    let padded = (data.len() + 3) & !3;
    out.extend_from_slice(&(padded as u32).to_le_bytes());
    out.extend_from_slice(&chunk_type.to_le_bytes());
    out.extend_from_slice(data);
    out.resize(out.len() + (padded - data.len()), fill);
}

/// Assemble a GLB byte stream. JSON is padded with spaces, everything
/// else with zero bytes, as the container format requires.
pub fn join_chunks(chunks: &Chunks) -> Vec<u8> {
    let bin_len = chunks.bin.as_ref().map_or(0, |b| b.len() + 3 + CHUNK_HEADER_LEN);
    let mut out = Vec::with_capacity(HEADER_LEN + CHUNK_HEADER_LEN + chunks.json.len() + 3 + bin_len);

    out.extend_from_slice(&MAGIC.to_le_bytes());
    out.extend_from_slice(&VERSION.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // patched below

    push_chunk(&mut out, CHUNK_JSON, &chunks.json, b' ');
    if let Some(bin) = &chunks.bin {
        push_chunk(&mut out, CHUNK_BIN, bin, 0);
    }
    for chunk in &chunks.extra {
        push_chunk(&mut out, chunk.chunk_type, &chunk.data, 0);
    }

    let total = out.len() as u32;
    out[8..12].copy_from_slice(&total.to_le_bytes());
    out
}
