// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Typed view of the glTF JSON document.
//!
//! Only the parts of the schema the watermark reads are modelled: meshes,
//! primitives with their attribute maps, accessors, buffer views and
//! buffers. Everything else in the JSON is ignored here and survives
//! untouched because the JSON chunk itself is never rewritten.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::error::{GlbError, Result};

/// `componentType` value for 32-bit IEEE floats.
pub const COMPONENT_FLOAT: u32 = 5126;

/// Byte size of one component of the given `componentType`, if known.
pub fn component_size(component_type: u32) -> Option<usize> {
    match component_type {
        5120 | 5121 => Some(1), // BYTE, UNSIGNED_BYTE
        5122 | 5123 => Some(2), // SHORT, UNSIGNED_SHORT
        5125 | 5126 => Some(4), // UNSIGNED_INT, FLOAT
        _ => None,
    }
}

/// Accessor element type (`"SCALAR"`, `"VEC3"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ElementType {
    #[serde(rename = "SCALAR")]
    Scalar,
    #[serde(rename = "VEC2")]
    Vec2,
    #[serde(rename = "VEC3")]
    Vec3,
    #[serde(rename = "VEC4")]
    Vec4,
    #[serde(rename = "MAT2")]
    Mat2,
    #[serde(rename = "MAT3")]
    Mat3,
    #[serde(rename = "MAT4")]
    Mat4,
}

impl ElementType {
    /// Number of components per element.
    pub fn components(self) -> usize {
        match self {
            Self::Scalar => 1,
            Self::Vec2 => 2,
            Self::Vec3 => 3,
            Self::Vec4 | Self::Mat2 => 4,
            Self::Mat3 => 9,
            Self::Mat4 => 16,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub meshes: Vec<Mesh>,
    #[serde(default)]
    pub accessors: Vec<Accessor>,
    #[serde(default)]
    pub buffer_views: Vec<BufferView>,
    #[serde(default)]
    pub buffers: Vec<Buffer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Mesh {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub primitives: Vec<Primitive>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Primitive {
    /// Attribute semantic (e.g. `POSITION`) to accessor index.
    #[serde(default)]
    pub attributes: BTreeMap<String, usize>,
}

impl Primitive {
    pub fn attribute(&self, name: &str) -> Option<usize> {
        self.attributes.get(name).copied()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accessor {
    #[serde(default)]
    pub buffer_view: Option<usize>,
    #[serde(default)]
    pub byte_offset: usize,
    pub component_type: u32,
    pub count: usize,
    #[serde(rename = "type")]
    pub element_type: ElementType,
}

impl Accessor {
    /// Size in bytes of one packed element.
    pub fn element_size(&self) -> Option<usize> {
        component_size(self.component_type).map(|s| s * self.element_type.components())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BufferView {
    pub buffer: usize,
    #[serde(default)]
    pub byte_offset: usize,
    pub byte_length: usize,
    #[serde(default)]
    pub byte_stride: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buffer {
    pub byte_length: usize,
    #[serde(default)]
    pub uri: Option<String>,
}

impl Document {
    pub fn from_json(json: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(json)?)
    }

    pub fn mesh(&self, index: usize) -> Result<&Mesh> {
        self.meshes.get(index).ok_or(GlbError::IndexOutOfRange { kind: "mesh", index })
    }

    pub fn accessor(&self, index: usize) -> Result<&Accessor> {
        self.accessors.get(index).ok_or(GlbError::IndexOutOfRange { kind: "accessor", index })
    }

    pub fn buffer_view(&self, index: usize) -> Result<&BufferView> {
        self.buffer_views.get(index).ok_or(GlbError::IndexOutOfRange { kind: "bufferView", index })
    }

    pub fn buffer(&self, index: usize) -> Result<&Buffer> {
        self.buffers.get(index).ok_or(GlbError::IndexOutOfRange { kind: "buffer", index })
    }
}
