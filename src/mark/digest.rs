// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Keyed digest over the serialized model.
//!
//! HMAC-SHA512 over the entire GLB byte stream (header, JSON, BIN and any
//! other chunks). The input must already have the embedding slots zeroed
//! so marker and verifier hash the same pre-image.

use hmac::{Hmac, Mac};
use sha2::Sha512;

use crate::mark::DIGEST_LEN;

type HmacSha512 = Hmac<Sha512>;

/// A keyed digest as embedded in the vertex bits.
pub type Digest = [u8; DIGEST_LEN];

fn mac_over(file_bytes: &[u8], key: &[u8]) -> HmacSha512 {
    let mut mac = HmacSha512::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(file_bytes);
    mac
}

/// Compute HMAC-SHA512 of `file_bytes` under `key`.
pub fn keyed_digest(file_bytes: &[u8], key: &[u8]) -> Digest {
    let mut out = [0u8; DIGEST_LEN];
    out.copy_from_slice(&mac_over(file_bytes, key).finalize().into_bytes());
    out
}

/// Recompute the digest of `file_bytes` and compare it with `expected` in
/// constant time.
pub fn verify_digest(file_bytes: &[u8], key: &[u8], expected: &Digest) -> bool {
    mac_over(file_bytes, key).verify_slice(expected).is_ok()
}
