// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Carrier mesh selection.
//!
//! The mark always lives in the mesh with the most `POSITION` elements
//! (`count * components` summed over its primitives). Sizing uses
//! `POSITION` regardless of which attribute carries the mark.

use tracing::debug;

use crate::glb::document::Document;
use crate::glb::error::GlbError;
use crate::mark::error::MarkError;
use crate::mark::SIZING_ATTRIBUTE;

/// The chosen carrier mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshSelection {
    pub mesh_index: usize,
    /// Sum over primitives of `POSITION` count × components.
    pub element_count: usize,
}

/// Element count of one mesh. Primitives without `POSITION` contribute nothing.
pub fn element_count(doc: &Document, mesh_index: usize) -> Result<usize, GlbError> {
    let mesh = doc.mesh(mesh_index)?;
    let mut total = 0usize;
    for primitive in &mesh.primitives {
        if let Some(accessor_index) = primitive.attribute(SIZING_ATTRIBUTE) {
            let accessor = doc.accessor(accessor_index)?;
            total = accessor
                .count
                .checked_mul(accessor.element_type.components())
                .and_then(|n| total.checked_add(n))
                .ok_or(GlbError::OutOfBounds("accessor"))?;
        }
    }
    Ok(total)
}

/// Pick the mesh with the largest element count. Ties go to the first mesh.
///
/// # Errors
/// - [`MarkError::NoMesh`] if no mesh has any `POSITION` data.
/// - [`MarkError::ParseFailure`] if a `POSITION` accessor index is out of range
///   or its element count overflows.
pub fn select_mesh(doc: &Document) -> Result<MeshSelection, MarkError> {
    let mut best: Option<MeshSelection> = None;
    for mesh_index in 0..doc.meshes.len() {
        let count = element_count(doc, mesh_index)?;
        if count > best.map_or(0, |b| b.element_count) {
            best = Some(MeshSelection { mesh_index, element_count: count });
        }
    }
    let selection = best.ok_or(MarkError::NoMesh)?;
    debug!(
        mesh = selection.mesh_index,
        elements = selection.element_count,
        meshes = doc.meshes.len(),
        "selected carrier mesh"
    );
    Ok(selection)
}
