// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! # meshmark-core
//!
//! Fragile, keyed watermarking for binary glTF (GLB) models. A keyed
//! HMAC-SHA512 digest of the file is hidden in the least significant
//! mantissa bits of float vertex components; verification recomputes it and
//! detects any modification made after marking.
//!
//! - `glb`: minimal GLB container codec and typed vertex access. Reads and
//!   writes files byte-exactly, so an unmodified model round-trips unchanged.
//! - `mark`: key parsing, vertex permutation, bit embedding and the
//!   mark/verify pipelines.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use meshmark_core::{mark_bytes, verify_bytes, KeySpec, Verification};
//!
//! let key: KeySpec = "0242*POSITION*s3cret".parse().unwrap();
//! let model = std::fs::read("ship.glb").unwrap();
//! let marked = mark_bytes(&model, &key).unwrap();
//! assert_eq!(verify_bytes(&marked, &key).unwrap(), Verification::Intact);
//! ```

pub mod glb;
pub mod mark;

pub use glb::error::{GlbError, Result as GlbResult};
pub use glb::GlbModel;
pub use mark::{ensure_intact, mark_bytes, mark_file, marked_path, verify_bytes, verify_file};
pub use mark::{KeySpec, MarkError, MarkSummary, Verification};
