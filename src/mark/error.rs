// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Error types for the watermarking pipeline.
//!
//! [`MarkError`] covers all failure modes from key parsing through GLB
//! parsing, capacity checks, embedding and verification. Every variant is
//! terminal for the current run.

use std::path::PathBuf;

use thiserror::Error;

use crate::glb::error::GlbError;

/// Errors that can occur while marking or verifying a model.
#[derive(Debug, Error)]
pub enum MarkError {
    /// The key string does not match `BB<seed>*<attribute>*<digestKey>`.
    #[error("malformed key: {0}")]
    MalformedKey(String),
    /// The input file does not exist.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    /// Reading an input or scratch file failed for a reason other than absence.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The file could not be parsed as a GLB container.
    #[error("failed to parse model: {0}")]
    ParseFailure(#[source] GlbError),
    /// Writing the output or scratch file failed.
    #[error("failed to save model to {}: {source}", path.display())]
    SaveFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The model contains no mesh with position data.
    #[error("model has no mesh with POSITION data")]
    NoMesh,
    /// The selected mesh cannot carry the payload at this bit density.
    #[error("mesh too small: {required} vertices required, {available} available")]
    InsufficientCapacity { required: usize, available: usize },
    /// The target accessor has fewer vertices than the permutation length.
    #[error("accessor has {available} vertices, permutation needs {required}")]
    InsufficientVertices { available: usize, required: usize },
    /// The target accessor has more vertices than the portable `u32`
    /// shuffle can address.
    #[error("accessor has {available} vertices, at most {limit} are supported")]
    TooManyVertices { available: usize, limit: usize },
    /// A primitive of the selected mesh lacks the target attribute.
    #[error("mesh {mesh} primitive {primitive} has no {attribute} attribute")]
    MissingAttribute {
        mesh: usize,
        primitive: usize,
        attribute: String,
    },
    /// The target accessor is not 32-bit float data.
    #[error("accessor {accessor} has component type {component_type}, expected FLOAT (5126)")]
    UnsupportedAccessor { accessor: usize, component_type: u32 },
    /// The embedded digest does not match the recomputed one.
    #[error("watermark mismatch: model was modified after marking")]
    DigestMismatch,
}

impl MarkError {
    /// Map a container load error, separating a missing file from a bad one.
    pub(crate) fn from_load(path: &std::path::Path, err: GlbError) -> Self {
        match err {
            GlbError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Self::FileNotFound(path.to_path_buf())
            }
            GlbError::Io(e) => Self::Io(e),
            other => Self::ParseFailure(other),
        }
    }
}

impl From<GlbError> for MarkError {
    fn from(e: GlbError) -> Self {
        match e {
            GlbError::Io(io) => Self::Io(io),
            other => Self::ParseFailure(other),
        }
    }
}
