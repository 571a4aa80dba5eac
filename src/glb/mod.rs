// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Minimal binary glTF (GLB) container.
//!
//! Reads and writes GLB 2.0 files, exposing the glTF document as typed
//! structs and the BIN chunk as a mutable byte slice. This is the carrier
//! for the watermark, which operates entirely on raw vertex component bits.
//!
//! Supports:
//! - GLB version 2 with a JSON chunk and an optional BIN chunk
//! - Interleaved and tightly packed accessors
//! - Byte-for-byte round trip: the JSON chunk and any unknown chunks are
//!   written back exactly as read
//!
//! Does NOT support:
//! - `.gltf` text files, external `.bin` buffers or data URIs
//! - Sparse accessors

pub mod chunk;
pub mod document;
pub mod error;
pub mod view;

use std::path::Path;

use chunk::Chunks;
use document::Document;
use error::Result;
use view::VertexView;

/// A parsed GLB file.
///
/// Created with [`GlbModel::from_bytes`] or [`GlbModel::load`]. After
/// modifying vertex bytes through [`GlbModel::bin_mut`], call
/// [`GlbModel::to_bytes`] or [`GlbModel::save`] to serialize.
#[derive(Debug, Clone)]
pub struct GlbModel {
    chunks: Chunks,
    document: Document,
}

impl GlbModel {
    /// Parse a GLB byte stream.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let chunks = chunk::split_chunks(data)?;
        let document = Document::from_json(&chunks.json)?;
        Ok(Self { chunks, document })
    }

    /// Assemble a model from a JSON document and BIN chunk payload.
    pub fn from_parts(json: Vec<u8>, bin: Option<Vec<u8>>) -> Result<Self> {
        let document = Document::from_json(&json)?;
        Ok(Self {
            chunks: Chunks { json, bin, extra: Vec::new() },
            document,
        })
    }

    /// Serialize to GLB bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        chunk::join_chunks(&self.chunks)
    }

    /// Read and parse a GLB file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Write the model to `path`, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        std::fs::write(path, self.to_bytes())
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Raw JSON chunk bytes.
    pub fn json(&self) -> &[u8] {
        &self.chunks.json
    }

    /// BIN chunk bytes (empty if the file has none).
    pub fn bin(&self) -> &[u8] {
        self.chunks.bin.as_deref().unwrap_or(&[])
    }

    /// Mutable BIN chunk bytes (empty if the file has none).
    pub fn bin_mut(&mut self) -> &mut [u8] {
        self.chunks.bin.as_deref_mut().unwrap_or(&mut [])
    }

    /// Resolve the byte layout of an accessor inside the BIN chunk.
    pub fn vertex_view(&self, accessor_index: usize) -> Result<VertexView> {
        VertexView::resolve(&self.document, accessor_index, self.bin().len())
    }

    /// Resolve an accessor view, then hand out the view with mutable bytes.
    pub fn vertex_view_mut(&mut self, accessor_index: usize) -> Result<(VertexView, &mut [u8])> {
        let view = self.vertex_view(accessor_index)?;
        Ok((view, self.bin_mut()))
    }
}
