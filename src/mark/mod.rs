// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Fragile keyed watermarking of GLB meshes.
//!
//! A key of the form `DD<seed>*<attribute>*<digest key>` selects how many
//! low-order bits per float component are used (`DD`), which vertices carry
//! them (a ChaCha20 permutation seeded by `seed`) and which vertex attribute
//! holds them. The embedded payload is the HMAC-SHA512 of the whole GLB file
//! with those bits zeroed, so any change to the file after marking (geometry,
//! JSON, even a re-export with identical content) breaks verification.
//!
//! Entry points are [`mark_file`] / [`verify_file`] and their in-memory
//! counterparts [`mark_bytes`] / [`verify_bytes`].

pub mod error;
pub mod key;
pub mod permute;
pub mod capacity;
pub mod select;
pub mod digest;
pub mod bits;
mod pipeline;

pub use error::MarkError;
pub use key::KeySpec;

/// Number of slots that carry the payload: exactly one HMAC-SHA512 digest.
pub const EMBED_BUDGET_BITS: usize = 512;

/// Length of the keyed vertex permutation.
pub const PERMUTATION_LEN: usize = 512;

/// HMAC-SHA512 output length in bytes.
pub const DIGEST_LEN: usize = 64;

/// Components per vertex assumed by the capacity guard.
pub const SIZING_COMPONENTS: usize = 3;

/// Largest usable bit density: the f32 mantissa width. Higher densities
/// would overwrite exponent bits.
pub const MAX_BIT_DENSITY: u8 = 23;

/// Attribute whose element counts drive mesh selection and capacity.
pub const SIZING_ATTRIBUTE: &str = "POSITION";

pub use pipeline::{
    ensure_intact, mark_bytes, mark_file, marked_path, verify_bytes, verify_file, MarkSummary,
    Verification,
};

#[cfg(test)]
mod constant_tests {
    use super::*;

    #[test]
    fn budget_holds_one_digest() {
        assert_eq!(EMBED_BUDGET_BITS, DIGEST_LEN * 8);
        assert!(PERMUTATION_LEN * SIZING_COMPONENTS >= EMBED_BUDGET_BITS);
    }

    #[test]
    fn density_stays_in_mantissa() {
        // Clearing the low MAX_BIT_DENSITY bits of 1.0 leaves it unchanged.
        let mask = (1u32 << MAX_BIT_DENSITY) - 1;
        assert_eq!(f32::from_bits(1.0f32.to_bits() & !mask), 1.0);
        assert_eq!(1.0f32.to_bits() & mask, 0);
    }
}
