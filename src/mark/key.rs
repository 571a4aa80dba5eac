// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Watermark key parsing.
//!
//! A key is a single line of the form
//!
//! ```text
//! BB<seed>*<attribute>*<digestKey>
//! ```
//!
//! - `BB`: two-digit, zero-padded bit density (`01`..`23`)
//! - `seed`: decimal seed for the vertex permutation
//! - `attribute`: glTF attribute semantic to carry the mark (e.g. `POSITION`)
//! - `digestKey`: HMAC key, everything after the second `*` (may contain `*`)
//!
//! Example: `021*POSITION*mysecret` → density 2, seed 1.

use core::fmt;
use core::str::FromStr;

use zeroize::Zeroizing;

use crate::mark::error::MarkError;
use crate::mark::MAX_BIT_DENSITY;

/// Parsed watermark key.
#[derive(Clone)]
pub struct KeySpec {
    bit_density: u8,
    seed: u64,
    attribute: String,
    digest_key: Zeroizing<String>,
}

fn malformed(msg: &str) -> MarkError {
    MarkError::MalformedKey(msg.to_owned())
}

fn is_decimal(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

impl KeySpec {
    /// Build a key from its parts, applying the same checks as [`KeySpec::parse`].
    pub fn new(bit_density: u8, seed: u64, attribute: &str, digest_key: &str) -> Result<Self, MarkError> {
        if bit_density == 0 || bit_density > MAX_BIT_DENSITY {
            return Err(MarkError::MalformedKey(format!(
                "bit density {bit_density} outside 1..={MAX_BIT_DENSITY}"
            )));
        }
        if attribute.is_empty() {
            return Err(malformed("empty attribute name"));
        }
        Ok(Self {
            bit_density,
            seed,
            attribute: attribute.to_owned(),
            digest_key: Zeroizing::new(digest_key.to_owned()),
        })
    }

    /// Parse a key line. A trailing line terminator is ignored.
    ///
    /// # Errors
    /// [`MarkError::MalformedKey`] if the density prefix is not two decimal
    /// digits in range, a `*` delimiter is missing, the seed is not a
    /// non-negative decimal integer, or the attribute is empty.
    pub fn parse(line: &str) -> Result<Self, MarkError> {
        let line = line.trim_end_matches(&['\r', '\n'][..]);

        let density = line.get(..2).filter(|d| is_decimal(d)).ok_or_else(|| malformed("missing two-digit bit density"))?;
        let bit_density: u8 = density.parse().map_err(|_| malformed("bad bit density"))?;

        let (seed, rest) = line[2..].split_once('*').ok_or_else(|| malformed("missing '*' after seed"))?;
        if !is_decimal(seed) {
            return Err(malformed("seed is not a decimal integer"));
        }
        let seed: u64 = seed.parse().map_err(|_| malformed("seed out of range"))?;

        let (attribute, digest_key) = rest
            .split_once('*')
            .ok_or_else(|| malformed("missing '*' after attribute"))?;

        Self::new(bit_density, seed, attribute, digest_key)
    }

    /// Low-order bits used per float component.
    pub fn bit_density(&self) -> u8 {
        self.bit_density
    }

    /// Seed for the vertex permutation.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Attribute semantic that carries the mark.
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// HMAC key bytes.
    pub fn digest_key(&self) -> &[u8] {
        self.digest_key.as_bytes()
    }
}

impl FromStr for KeySpec {
    type Err = MarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for KeySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeySpec")
            .field("bit_density", &self.bit_density)
            .field("seed", &self.seed)
            .field("attribute", &self.attribute)
            .field("digest_key", &"<redacted>")
            .finish()
    }
}
