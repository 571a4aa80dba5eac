// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Synthetic GLB models for integration tests.

#![allow(dead_code)]

use meshmark_core::GlbModel;
use serde_json::{json, Value};

const FLOAT: u32 = 5126;
const UNSIGNED_SHORT: u32 = 5123;

/// Builds small GLB files with one bufferView per attribute.
#[derive(Default)]
pub struct ModelBuilder {
    bin: Vec<u8>,
    views: Vec<Value>,
    accessors: Vec<Value>,
    meshes: Vec<Value>,
}

fn element_type(components: usize) -> &'static str {
    match components {
        1 => "SCALAR",
        2 => "VEC2",
        3 => "VEC3",
        4 => "VEC4",
        n => panic!("no element type with {n} components"),
    }
}

/// Deterministic, non-trivial coordinate for vertex `v`, component `c`.
pub fn coordinate(v: usize, c: usize) -> f32 {
    let x = ((v * 7919 + c * 104_729) % 10_007) as f32;
    x / 1000.0 - 5.0 + 0.123_456_7
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_view(&mut self, bytes: Vec<u8>) -> usize {
        while self.bin.len() % 4 != 0 {
            self.bin.push(0);
        }
        let offset = self.bin.len();
        self.views.push(json!({
            "buffer": 0,
            "byteOffset": offset,
            "byteLength": bytes.len(),
        }));
        self.bin.extend_from_slice(&bytes);
        self.views.len() - 1
    }

    fn push_accessor(&mut self, view: usize, component_type: u32, count: usize, components: usize) -> usize {
        self.accessors.push(json!({
            "bufferView": view,
            "componentType": component_type,
            "count": count,
            "type": element_type(components),
        }));
        self.accessors.len() - 1
    }

    /// Tightly packed f32 attribute. Returns the accessor index.
    pub fn float_attribute(&mut self, count: usize, components: usize) -> usize {
        let mut bytes = Vec::with_capacity(count * components * 4);
        for v in 0..count {
            for c in 0..components {
                bytes.extend_from_slice(&coordinate(v, c).to_le_bytes());
            }
        }
        let view = self.push_view(bytes);
        self.push_accessor(view, FLOAT, count, components)
    }

    /// Tightly packed u16 attribute. Returns the accessor index.
    pub fn ushort_attribute(&mut self, count: usize, components: usize) -> usize {
        let mut bytes = Vec::with_capacity(count * components * 2);
        for i in 0..count * components {
            bytes.extend_from_slice(&(i as u16).to_le_bytes());
        }
        let view = self.push_view(bytes);
        self.push_accessor(view, UNSIGNED_SHORT, count, components)
    }

    /// Add a mesh; each primitive is a list of `(semantic, accessor)` pairs.
    pub fn mesh(&mut self, primitives: &[&[(&str, usize)]]) -> &mut Self {
        let primitives: Vec<Value> = primitives
            .iter()
            .map(|attrs| {
                let map: serde_json::Map<String, Value> =
                    attrs.iter().map(|(name, index)| (name.to_string(), json!(index))).collect();
                json!({ "attributes": map })
            })
            .collect();
        self.meshes.push(json!({ "primitives": primitives }));
        self
    }

    pub fn json(&self) -> Value {
        json!({
            "asset": { "version": "2.0", "generator": "meshmark tests" },
            "meshes": self.meshes,
            "accessors": self.accessors,
            "bufferViews": self.views,
            "buffers": [{ "byteLength": self.bin.len() }],
        })
    }

    pub fn build(&self) -> Vec<u8> {
        let json = serde_json::to_vec(&self.json()).unwrap();
        GlbModel::from_parts(json, Some(self.bin.clone())).unwrap().to_bytes()
    }
}

/// One mesh, one primitive with `POSITION` and `NORMAL` (both VEC3 floats).
pub fn single_mesh(vertices: usize) -> Vec<u8> {
    let mut b = ModelBuilder::new();
    let pos = b.float_attribute(vertices, 3);
    let nrm = b.float_attribute(vertices, 3);
    b.mesh(&[&[("POSITION", pos), ("NORMAL", nrm)]]);
    b.build()
}

/// Re-serialize the JSON chunk with different formatting, keeping the
/// document and BIN chunk unchanged.
pub fn reexport_pretty(glb: &[u8]) -> Vec<u8> {
    let model = GlbModel::from_bytes(glb).unwrap();
    let value: Value = serde_json::from_slice(model.json()).unwrap();
    let json = serde_json::to_vec_pretty(&value).unwrap();
    GlbModel::from_parts(json, Some(model.bin().to_vec())).unwrap().to_bytes()
}
