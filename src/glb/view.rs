// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Byte-level addressing of accessor elements inside the BIN chunk.
//!
//! A [`VertexView`] resolves the accessor → buffer view → buffer chain once
//! and then locates component `c` of vertex `v` at
//! `offset + v * stride + c * component_size`. It never owns or reallocates
//! the bytes; callers pass the BIN slice in.

use super::document::Document;
use super::error::{GlbError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexView {
    /// Absolute byte offset of element 0 within the BIN chunk.
    offset: usize,
    /// Distance in bytes between consecutive elements.
    stride: usize,
    /// Components per element (3 for VEC3).
    components: usize,
    /// Bytes per component.
    component_size: usize,
    /// Number of elements.
    count: usize,
    /// glTF `componentType` of the accessor.
    component_type: u32,
}

impl VertexView {
    /// Resolve the view for `accessor_index`, checking every byte it can
    /// address lies inside the `bin_len`-byte BIN chunk.
    pub fn resolve(doc: &Document, accessor_index: usize, bin_len: usize) -> Result<Self> {
        let accessor = doc.accessor(accessor_index)?;
        let view_index = accessor.buffer_view.ok_or(GlbError::NoBufferView(accessor_index))?;
        let view = doc.buffer_view(view_index)?;

        // In a GLB only buffer 0 without a uri is backed by the BIN chunk.
        let buffer = doc.buffer(view.buffer)?;
        if view.buffer != 0 || buffer.uri.is_some() {
            return Err(GlbError::ExternalBuffer(view.buffer));
        }

        let element_size = accessor
            .element_size()
            .ok_or(GlbError::OutOfBounds("accessor with unknown component type"))?;
        let components = accessor.element_type.components();
        let component_size = element_size / components;
        let stride = view.byte_stride.unwrap_or(element_size);

        let view_end = view
            .byte_offset
            .checked_add(view.byte_length)
            .ok_or(GlbError::OutOfBounds("buffer view"))?;
        if view_end > bin_len {
            return Err(GlbError::OutOfBounds("buffer view"));
        }

        if accessor.count > 0 {
            let last = accessor
                .byte_offset
                .checked_add((accessor.count - 1).checked_mul(stride).ok_or(GlbError::OutOfBounds("accessor"))?)
                .and_then(|o| o.checked_add(element_size))
                .ok_or(GlbError::OutOfBounds("accessor"))?;
            if last > view.byte_length {
                return Err(GlbError::OutOfBounds("accessor"));
            }
        }

        Ok(Self {
            offset: view.byte_offset + accessor.byte_offset,
            stride,
            components,
            component_size,
            count: accessor.count,
            component_type: accessor.component_type,
        })
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn components(&self) -> usize {
        self.components
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn component_type(&self) -> u32 {
        self.component_type
    }

    fn byte_index(&self, vertex: usize, component: usize) -> usize {
        debug_assert!(vertex < self.count, "vertex {vertex} >= {}", self.count);
        debug_assert!(component < self.components, "component {component} >= {}", self.components);
        debug_assert_eq!(self.component_size, 4, "bit access needs 32-bit components");
        self.offset + vertex * self.stride + component * self.component_size
    }

    /// Raw 32-bit pattern of one component (little-endian in the buffer).
    pub fn bits(&self, bin: &[u8], vertex: usize, component: usize) -> u32 {
        let i = self.byte_index(vertex, component);
        u32::from_le_bytes([bin[i], bin[i + 1], bin[i + 2], bin[i + 3]])
    }

    /// Overwrite the raw 32-bit pattern of one component.
    pub fn set_bits(&self, bin: &mut [u8], vertex: usize, component: usize, bits: u32) {
        let i = self.byte_index(vertex, component);
        bin[i..i + 4].copy_from_slice(&bits.to_le_bytes());
    }

    /// Component value as `f32`.
    pub fn get(&self, bin: &[u8], vertex: usize, component: usize) -> f32 {
        f32::from_bits(self.bits(bin, vertex, component))
    }

    /// Store a component value as `f32`.
    pub fn set(&self, bin: &mut [u8], vertex: usize, component: usize, value: f32) {
        self.set_bits(bin, vertex, component, value.to_bits());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(json: &str) -> Document {
        Document::from_json(json.as_bytes()).unwrap()
    }

    /// Two interleaved VEC3 float attributes, 4 vertices, stride 24.
    const INTERLEAVED: &str = r#"{
        "accessors": [
            {"bufferView": 0, "componentType": 5126, "count": 4, "type": "VEC3"},
            {"bufferView": 0, "byteOffset": 12, "componentType": 5126, "count": 4, "type": "VEC3"}
        ],
        "bufferViews": [{"buffer": 0, "byteOffset": 8, "byteLength": 96, "byteStride": 24}],
        "buffers": [{"byteLength": 104}]
    }"#;

    #[test]
    fn interleaved_addressing() {
        let d = doc(INTERLEAVED);
        let pos = VertexView::resolve(&d, 0, 104).unwrap();
        let nrm = VertexView::resolve(&d, 1, 104).unwrap();
        assert_eq!(pos.stride(), 24);
        assert_eq!(pos.count(), 4);
        assert_eq!(pos.components(), 3);

        let mut bin = vec![0u8; 104];
        pos.set(&mut bin, 2, 1, 1.5);
        nrm.set(&mut bin, 2, 1, -0.25);
        assert_eq!(pos.get(&bin, 2, 1), 1.5);
        assert_eq!(nrm.get(&bin, 2, 1), -0.25);
        // vertex 2, component 1 of POSITION: 8 + 2*24 + 4 = 60
        assert_eq!(&bin[60..64], &1.5f32.to_le_bytes());
        // same vertex, NORMAL: 8 + 12 + 2*24 + 4 = 72
        assert_eq!(&bin[72..76], &(-0.25f32).to_le_bytes());
    }

    #[test]
    fn tightly_packed_default_stride() {
        let d = doc(r#"{
            "accessors": [{"bufferView": 0, "componentType": 5126, "count": 2, "type": "VEC2"}],
            "bufferViews": [{"buffer": 0, "byteLength": 16}],
            "buffers": [{"byteLength": 16}]
        }"#);
        let v = VertexView::resolve(&d, 0, 16).unwrap();
        assert_eq!(v.stride(), 8);
        let mut bin = vec![0u8; 16];
        v.set_bits(&mut bin, 1, 1, 0xDEAD_BEEF);
        assert_eq!(v.bits(&bin, 1, 1), 0xDEAD_BEEF);
        assert_eq!(&bin[12..16], &0xDEAD_BEEFu32.to_le_bytes());
    }

    #[test]
    fn view_past_bin_rejected() {
        let d = doc(INTERLEAVED);
        assert!(matches!(VertexView::resolve(&d, 0, 64), Err(GlbError::OutOfBounds("buffer view"))));
    }

    #[test]
    fn accessor_past_view_rejected() {
        let d = doc(r#"{
            "accessors": [{"bufferView": 0, "componentType": 5126, "count": 5, "type": "VEC3"}],
            "bufferViews": [{"buffer": 0, "byteLength": 48}],
            "buffers": [{"byteLength": 48}]
        }"#);
        assert!(matches!(VertexView::resolve(&d, 0, 48), Err(GlbError::OutOfBounds("accessor"))));
    }

    #[test]
    fn external_buffer_rejected() {
        let d = doc(r#"{
            "accessors": [{"bufferView": 0, "componentType": 5126, "count": 1, "type": "VEC3"}],
            "bufferViews": [{"buffer": 0, "byteLength": 12}],
            "buffers": [{"byteLength": 12, "uri": "mesh.bin"}]
        }"#);
        assert!(matches!(VertexView::resolve(&d, 0, 12), Err(GlbError::ExternalBuffer(0))));
    }

    #[test]
    fn missing_buffer_view_rejected() {
        let d = doc(r#"{"accessors": [{"componentType": 5126, "count": 1, "type": "VEC3"}]}"#);
        assert!(matches!(VertexView::resolve(&d, 0, 0), Err(GlbError::NoBufferView(0))));
        assert!(matches!(
            VertexView::resolve(&d, 3, 0),
            Err(GlbError::IndexOutOfRange { kind: "accessor", index: 3 })
        ));
    }

    #[test]
    fn non_float_layout() {
        // u16 VEC4 (JOINTS_0 style): 8-byte elements, type kept for the caller.
        let d = doc(r#"{
            "accessors": [{"bufferView": 0, "componentType": 5123, "count": 3, "type": "VEC4"}],
            "bufferViews": [{"buffer": 0, "byteLength": 24}],
            "buffers": [{"byteLength": 24}]
        }"#);
        let v = VertexView::resolve(&d, 0, 24).unwrap();
        assert_eq!(v.component_type(), 5123);
        assert_eq!(v.stride(), 8);
        assert_eq!(v.components(), 4);
    }

    #[test]
    fn unknown_component_type_rejected() {
        let d = doc(r#"{
            "accessors": [{"bufferView": 0, "componentType": 9999, "count": 1, "type": "VEC3"}],
            "bufferViews": [{"buffer": 0, "byteLength": 12}],
            "buffers": [{"byteLength": 12}]
        }"#);
        assert!(matches!(VertexView::resolve(&d, 0, 12), Err(GlbError::OutOfBounds(_))));
    }
}
