// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Marking and verification pipelines.
//!
//! Marking:
//! 1. Select the carrier mesh and check capacity
//! 2. Resolve the target accessor and the keyed slot order
//! 3. Zero the embedding area and serialize
//! 4. HMAC-SHA512 the serialized bytes
//! 5. Reload, embed the digest, serialize again
//!
//! Verification runs `Loaded → DigestExtracted → Zeroed → Serialized →
//! DigestRecomputed → Compared`, strictly in that order: the embedded digest
//! is read first, zeroing then erases it to recreate the pre-embedding
//! baseline, and the digest of that baseline must equal what was read.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::glb::document::COMPONENT_FLOAT;
use crate::glb::GlbModel;
use crate::mark::bits::{self, SlotOrder};
use crate::mark::capacity;
use crate::mark::digest;
use crate::mark::error::MarkError;
use crate::mark::key::KeySpec;
use crate::mark::permute;
use crate::mark::select;

/// Outcome of a verification run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    /// The embedded digest matches: the file is unmodified since marking.
    Intact,
    /// The digest does not match: the file was modified, re-marked or re-exported.
    Tampered,
}

impl Verification {
    pub fn is_intact(self) -> bool {
        self == Self::Intact
    }
}

/// Where a mark was placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkSummary {
    pub mesh_index: usize,
    pub accessor_index: usize,
    /// Vertices the accessor offers to the permutation.
    pub vertex_count: usize,
    /// Minimum vertices the capacity guard asked for.
    pub required_vertices: usize,
}

/// Carrier resolved from a model and key.
struct Carrier {
    order: SlotOrder,
    summary: MarkSummary,
}

/// Resolve the carrier accessor and slot order, validating everything
/// before any byte is touched.
fn locate_carrier(model: &GlbModel, key: &KeySpec) -> Result<Carrier, MarkError> {
    let doc = model.document();
    let selection = select::select_mesh(doc)?;
    let required_vertices = capacity::check_capacity(selection.element_count, key.bit_density())?;

    // Every primitive must carry the attribute; a partially markable mesh
    // could never verify. The mark itself lives in the first primitive.
    let mesh = doc.mesh(selection.mesh_index)?;
    let mut target = None;
    for (primitive, p) in mesh.primitives.iter().enumerate() {
        let accessor = p.attribute(key.attribute()).ok_or_else(|| MarkError::MissingAttribute {
            mesh: selection.mesh_index,
            primitive,
            attribute: key.attribute().to_owned(),
        })?;
        target.get_or_insert(accessor);
    }
    let accessor_index = target.ok_or(MarkError::NoMesh)?;

    let view = model.vertex_view(accessor_index)?;
    if view.component_type() != COMPONENT_FLOAT {
        return Err(MarkError::UnsupportedAccessor {
            accessor: accessor_index,
            component_type: view.component_type(),
        });
    }
    let vertices = permute::generate(key.seed(), view.count())?;
    debug!(
        accessor = accessor_index,
        vertices = view.count(),
        components = view.components(),
        bit_density = key.bit_density(),
        "resolved carrier accessor"
    );

    Ok(Carrier {
        summary: MarkSummary {
            mesh_index: selection.mesh_index,
            accessor_index,
            vertex_count: view.count(),
            required_vertices,
        },
        order: SlotOrder::new(view, vertices, key.bit_density()),
    })
}

/// Zero the embedding area of `model` in place and return the carrier.
fn zero_model(model: &mut GlbModel, key: &KeySpec) -> Result<Carrier, MarkError> {
    let carrier = locate_carrier(model, key)?;
    bits::zero_slots(&carrier.order, model.bin_mut());
    Ok(carrier)
}

/// Embed `digest` into a model whose embedding area is already zeroed.
fn embed_model(model: &mut GlbModel, key: &KeySpec, digest: &digest::Digest) -> Result<Carrier, MarkError> {
    let carrier = locate_carrier(model, key)?;
    bits::embed_digest(&carrier.order, model.bin_mut(), digest);
    Ok(carrier)
}

/// Mark a GLB byte stream in memory.
///
/// Identical to [`mark_file`] with the file round trips replaced by
/// [`GlbModel::to_bytes`]; both produce the same output bytes.
pub fn mark_bytes(glb: &[u8], key: &KeySpec) -> Result<Vec<u8>, MarkError> {
    let mut model = GlbModel::from_bytes(glb)?;
    zero_model(&mut model, key)?;
    let baseline = model.to_bytes();
    let digest = digest::keyed_digest(&baseline, key.digest_key());

    let mut marked = GlbModel::from_bytes(&baseline)?;
    let carrier = embed_model(&mut marked, key, &digest)?;
    debug!(mesh = carrier.summary.mesh_index, "embedded digest");
    Ok(marked.to_bytes())
}

/// Verify a GLB byte stream in memory.
pub fn verify_bytes(glb: &[u8], key: &KeySpec) -> Result<Verification, MarkError> {
    let model = GlbModel::from_bytes(glb)?;
    verify_model(model, key, |m| Ok(m.to_bytes()))
}

/// Shared verification protocol. `serialize` turns the zeroed model into
/// the bytes that get hashed.
fn verify_model(
    mut model: GlbModel,
    key: &KeySpec,
    serialize: impl FnOnce(&GlbModel) -> Result<Vec<u8>, MarkError>,
) -> Result<Verification, MarkError> {
    let carrier = locate_carrier(&model, key)?;

    let embedded = bits::extract_digest(&carrier.order, model.bin());
    debug!("stage: digest extracted");

    bits::zero_slots(&carrier.order, model.bin_mut());
    debug!("stage: zeroed");

    let baseline = serialize(&model)?;
    debug!(bytes = baseline.len(), "stage: serialized");

    let intact = digest::verify_digest(&baseline, key.digest_key(), &embedded);
    debug!(intact, "stage: digest recomputed and compared");

    Ok(if intact { Verification::Intact } else { Verification::Tampered })
}

/// Output path for a marked file: `_marked` inserted before the last `.` of
/// the file name, or `_marked.glb` appended when the name has no `.`.
///
/// `models/ship.glb` → `models/ship_marked.glb`, `ship` → `ship_marked.glb`,
/// `.glb` → `_marked.glb`. Dots in directory names are ignored.
pub fn marked_path(input: &Path) -> PathBuf {
    let name = input.file_name().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let marked = match name.rfind('.') {
        Some(dot) => format!("{}_marked{}", &name[..dot], &name[dot..]),
        None => format!("{name}_marked.glb"),
    };
    input.with_file_name(marked)
}

fn load(path: &Path) -> Result<GlbModel, MarkError> {
    GlbModel::load(path).map_err(|e| MarkError::from_load(path, e))
}

fn save(model: &GlbModel, path: &Path) -> Result<(), MarkError> {
    model.save(path).map_err(|source| MarkError::SaveFailure { path: path.to_path_buf(), source })
}

/// Mark `input` and write the result to `output`.
///
/// The zeroed baseline is written to `output`, hashed from disk, reloaded,
/// marked, and written to `output` again.
///
/// # Errors
/// - [`MarkError::FileNotFound`] / [`MarkError::ParseFailure`] for a bad input
/// - [`MarkError::NoMesh`], [`MarkError::InsufficientCapacity`],
///   [`MarkError::InsufficientVertices`], [`MarkError::TooManyVertices`],
///   [`MarkError::MissingAttribute`], [`MarkError::UnsupportedAccessor`] if
///   the model cannot carry the mark
/// - [`MarkError::SaveFailure`] if `output` cannot be written
pub fn mark_file(input: &Path, output: &Path, key: &KeySpec) -> Result<MarkSummary, MarkError> {
    let mut model = load(input)?;
    zero_model(&mut model, key)?;
    save(&model, output)?;

    let baseline = std::fs::read(output)?;
    let digest = digest::keyed_digest(&baseline, key.digest_key());

    let mut marked = load(output)?;
    let carrier = embed_model(&mut marked, key, &digest)?;
    save(&marked, output)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        mesh = carrier.summary.mesh_index,
        accessor = carrier.summary.accessor_index,
        "model marked"
    );
    Ok(carrier.summary)
}

/// Verify that `path` is unmodified since it was marked with `key`.
///
/// The zeroed baseline is serialized to a scratch file in the system temp
/// directory, so the candidate's own directory may be read-only. The
/// scratch file is deleted when this function returns, whether
/// verification succeeded, failed or errored.
pub fn verify_file(path: &Path, key: &KeySpec) -> Result<Verification, MarkError> {
    let model = load(path)?;
    let verdict = verify_model(model, key, |zeroed| {
        let scratch = tempfile::Builder::new()
            .prefix("meshmark-")
            .suffix(".glb")
            .tempfile()
            .map_err(|source| MarkError::SaveFailure { path: std::env::temp_dir(), source })?;
        save(zeroed, scratch.path())?;
        let bytes = std::fs::read(scratch.path())?;
        drop(scratch);
        Ok(bytes)
    })?;

    match verdict {
        Verification::Intact => info!(path = %path.display(), "watermark verified"),
        Verification::Tampered => warn!(path = %path.display(), "watermark mismatch"),
    }
    Ok(verdict)
}

/// Like [`verify_file`], but a mismatch is reported as
/// [`MarkError::DigestMismatch`].
pub fn ensure_intact(path: &Path, key: &KeySpec) -> Result<(), MarkError> {
    match verify_file(path, key)? {
        Verification::Intact => Ok(()),
        Verification::Tampered => Err(MarkError::DigestMismatch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marked_path_inserts_suffix() {
        assert_eq!(marked_path(Path::new("ship.glb")), PathBuf::from("ship_marked.glb"));
        assert_eq!(marked_path(Path::new("models/ship.glb")), PathBuf::from("models/ship_marked.glb"));
        assert_eq!(marked_path(Path::new("a.b.glb")), PathBuf::from("a.b_marked.glb"));
    }

    #[test]
    fn marked_path_without_extension() {
        assert_eq!(marked_path(Path::new("ship")), PathBuf::from("ship_marked.glb"));
        assert_eq!(marked_path(Path::new("dir.v2/ship")), PathBuf::from("dir.v2/ship_marked.glb"));
    }

    #[test]
    fn marked_path_for_dotfiles() {
        assert_eq!(marked_path(Path::new(".glb")), PathBuf::from("_marked.glb"));
        assert_eq!(marked_path(Path::new("models/.glb")), PathBuf::from("models/_marked.glb"));
        assert_eq!(marked_path(Path::new(".hidden")), PathBuf::from("_marked.hidden"));
        assert_eq!(marked_path(Path::new("ship.")), PathBuf::from("ship_marked."));
    }

    #[test]
    fn verification_flag() {
        assert!(Verification::Intact.is_intact());
        assert!(!Verification::Tampered.is_intact());
    }
}
