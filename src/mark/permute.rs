// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Vertex index permutation.
//!
//! Shuffles the vertex indices `0..max_index` with a Fisher-Yates shuffle
//! driven by a ChaCha20 PRNG seeded from the key's numeric seed, then keeps
//! the first [`PERMUTATION_LEN`] entries. Marker and verifier regenerate the
//! same sequence from the key alone; no index list is ever stored, so the
//! order is the canonical bit-assignment order for both sides.
//!
//! # Cross-platform portability
//!
//! The shuffle draws `u32` ranges (not `usize`) so the PRNG consumes the same
//! entropy per step on 32-bit and 64-bit targets.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::mark::error::MarkError;
use crate::mark::PERMUTATION_LEN;

/// Apply Fisher-Yates shuffle using `u32` for portable cross-platform behavior.
fn shuffle_portable(indices: &mut [usize], seed: u64) {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let n = indices.len();
    for i in (1..n).rev() {
        let j = rng.gen_range(0..=(i as u32)) as usize;
        indices.swap(i, j);
    }
}

/// Generate the keyed vertex order for a vertex range `0..max_index`.
///
/// Returns exactly [`PERMUTATION_LEN`] distinct indices, each `< max_index`.
/// Same `(seed, max_index)` always yields the same sequence.
///
/// # Errors
/// - [`MarkError::InsufficientVertices`] if `max_index < PERMUTATION_LEN`.
/// - [`MarkError::TooManyVertices`] if `max_index` does not fit the portable
///   `u32` shuffle range.
pub fn generate(seed: u64, max_index: usize) -> Result<Vec<usize>, MarkError> {
    if max_index < PERMUTATION_LEN {
        return Err(MarkError::InsufficientVertices {
            available: max_index,
            required: PERMUTATION_LEN,
        });
    }
    if max_index > u32::MAX as usize {
        return Err(MarkError::TooManyVertices {
            available: max_index,
            limit: u32::MAX as usize,
        });
    }
    let mut indices: Vec<usize> = (0..max_index).collect();
    shuffle_portable(&mut indices, seed);
    indices.truncate(PERMUTATION_LEN);
    Ok(indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        let a = generate(42, 2000).unwrap();
        let b = generate(42, 2000).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn exact_length_distinct_in_range() {
        let perm = generate(7, 1000).unwrap();
        assert_eq!(perm.len(), PERMUTATION_LEN);
        let mut sorted = perm.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), PERMUTATION_LEN);
        assert!(perm.iter().all(|&i| i < 1000));
    }

    #[test]
    fn minimum_bound_is_a_full_permutation() {
        let perm = generate(3, PERMUTATION_LEN).unwrap();
        let mut sorted = perm.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..PERMUTATION_LEN).collect::<Vec<_>>());
        assert_ne!(perm, sorted, "shuffle left identity order");
    }

    #[test]
    fn too_few_vertices() {
        match generate(1, PERMUTATION_LEN - 1) {
            Err(MarkError::InsufficientVertices { available, required }) => {
                assert_eq!(available, PERMUTATION_LEN - 1);
                assert_eq!(required, PERMUTATION_LEN);
            }
            other => panic!("expected InsufficientVertices, got {other:?}"),
        }
        assert!(generate(1, 0).is_err());
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn beyond_u32_range() {
        let max_index = u32::MAX as usize + 1;
        match generate(1, max_index) {
            Err(MarkError::TooManyVertices { available, limit }) => {
                assert_eq!(available, max_index);
                assert_eq!(limit, u32::MAX as usize);
            }
            other => panic!("expected TooManyVertices, got {:?}", other.map(|v| v.len())),
        }
    }

    #[test]
    fn different_seeds_differ() {
        assert_ne!(generate(1, 4096).unwrap(), generate(2, 4096).unwrap());
    }

    #[test]
    fn bound_changes_order() {
        // The shuffle walks from the top index down, so the bound is part of the key.
        assert_ne!(generate(9, 1000).unwrap(), generate(9, 1001).unwrap());
    }
}
