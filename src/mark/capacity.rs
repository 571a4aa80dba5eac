// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Capacity guard.
//!
//! The payload occupies [`EMBED_BUDGET_BITS`] slots. Each vertex offers
//! `bit_density` slots per component, and sizing assumes
//! [`SIZING_COMPONENTS`] (3) components per vertex, so a mesh needs
//! `ceil(payload_bits / bit_density / 3)` vertices.

use crate::mark::error::MarkError;
use crate::mark::{EMBED_BUDGET_BITS, SIZING_COMPONENTS};

/// Vertices needed to carry `payload_bits` at `bit_density` bits per component.
pub fn required_vertices(payload_bits: usize, bit_density: u8) -> usize {
    let per_vertex = bit_density as usize * SIZING_COMPONENTS;
    payload_bits.div_ceil(per_vertex)
}

/// Check that a mesh with `element_count` addressable elements can carry the
/// full embedding budget.
///
/// # Errors
/// [`MarkError::InsufficientCapacity`] if `element_count` is below
/// [`required_vertices`].
pub fn check_capacity(element_count: usize, bit_density: u8) -> Result<usize, MarkError> {
    let required = required_vertices(EMBED_BUDGET_BITS, bit_density);
    if element_count < required {
        return Err(MarkError::InsufficientCapacity {
            required,
            available: element_count,
        });
    }
    Ok(required)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rounds_up() {
        // 512 / 3 = 170.67
        assert_eq!(required_vertices(512, 1), 171);
        // 512 / 6 = 85.33
        assert_eq!(required_vertices(512, 2), 86);
        // 512 / 12 = 42.67
        assert_eq!(required_vertices(512, 4), 43);
        // exact division does not round
        assert_eq!(required_vertices(24, 8), 1);
    }

    #[test]
    fn boundary() {
        for density in [1u8, 2, 3, 8, 23] {
            let required = required_vertices(EMBED_BUDGET_BITS, density);
            match check_capacity(required - 1, density) {
                Err(MarkError::InsufficientCapacity { required: r, available }) => {
                    assert_eq!(r, required);
                    assert_eq!(available, required - 1);
                }
                other => panic!("density {density}: expected InsufficientCapacity, got {other:?}"),
            }
            assert_eq!(check_capacity(required, density).unwrap(), required);
        }
    }
}
