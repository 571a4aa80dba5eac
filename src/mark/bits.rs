// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Low-order bit zeroing, embedding and extraction.
//!
//! A *slot* is one `(vertex, component, bit)` triple. Slots are visited in
//! a fixed order: permuted vertex by permuted vertex, each component in
//! turn, bits `0..bit_density` within the component. The first
//! [`EMBED_BUDGET_BITS`] slots form the embedding area. Zeroing, embedding
//! and extraction all walk this same sequence, so bit `n` of the digest
//! (MSB-first within each byte) always lands in slot `n`.
//!
//! Components are handled as their raw little-endian `u32` bit patterns
//! through [`VertexView::bits`], never through pointer casts.

use crate::glb::view::VertexView;
use crate::mark::digest::Digest;
use crate::mark::{DIGEST_LEN, EMBED_BUDGET_BITS, MAX_BIT_DENSITY};

/// One embedding position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub vertex: usize,
    pub component: usize,
    /// Bit index within the component's 32-bit pattern (0 = LSB).
    pub bit: u32,
}

/// The keyed slot sequence over one accessor.
#[derive(Debug, Clone)]
pub struct SlotOrder {
    view: VertexView,
    vertices: Vec<usize>,
    bit_density: u8,
}

impl SlotOrder {
    /// `vertices` is the keyed permutation; every entry must be `< view.count()`.
    pub fn new(view: VertexView, vertices: Vec<usize>, bit_density: u8) -> Self {
        debug_assert!(vertices.iter().all(|&v| v < view.count()));
        debug_assert!((1..=MAX_BIT_DENSITY).contains(&bit_density));
        Self { view, vertices, bit_density }
    }

    pub fn view(&self) -> &VertexView {
        &self.view
    }

    /// The embedding area: at most [`EMBED_BUDGET_BITS`] slots in canonical order.
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        let components = self.view.components();
        let density = u32::from(self.bit_density);
        self.vertices
            .iter()
            .flat_map(move |&vertex| {
                (0..components).flat_map(move |component| {
                    (0..density).map(move |bit| Slot { vertex, component, bit })
                })
            })
            .take(EMBED_BUDGET_BITS)
    }
}

/// Digest bit `n`, most significant bit of each byte first.
fn payload_bit(payload: &[u8], n: usize) -> u32 {
    u32::from((payload[n / 8] >> (7 - n % 8)) & 1)
}

/// Clear every slot of the embedding area. Idempotent.
pub fn zero_slots(order: &SlotOrder, bin: &mut [u8]) {
    let view = order.view();
    for slot in order.slots() {
        let bits = view.bits(bin, slot.vertex, slot.component);
        view.set_bits(bin, slot.vertex, slot.component, bits & !(1u32 << slot.bit));
    }
}

/// XOR `payload` bits into the (already zeroed) embedding area.
///
/// Stops after `payload.len() * 8` slots; any remaining slots are left as
/// they are. Returns the number of bits written.
pub fn embed_payload(order: &SlotOrder, bin: &mut [u8], payload: &[u8]) -> usize {
    let view = order.view();
    let total = (payload.len() * 8).min(EMBED_BUDGET_BITS);
    let mut written = 0;
    for (n, slot) in order.slots().take(total).enumerate() {
        let bits = view.bits(bin, slot.vertex, slot.component);
        view.set_bits(bin, slot.vertex, slot.component, bits ^ (payload_bit(payload, n) << slot.bit));
        written += 1;
    }
    written
}

/// Read slot bits back into `out`, MSB-first per byte. `out` is cleared
/// first; bits past the end of the embedding area stay zero.
pub fn extract_payload(order: &SlotOrder, bin: &[u8], out: &mut [u8]) -> usize {
    out.fill(0);
    let view = order.view();
    let total = out.len() * 8;
    let mut read = 0;
    for (n, slot) in order.slots().take(total).enumerate() {
        let bit = (view.bits(bin, slot.vertex, slot.component) >> slot.bit) & 1;
        out[n / 8] |= (bit as u8) << (7 - n % 8);
        read += 1;
    }
    read
}

/// Embed a full keyed digest.
pub fn embed_digest(order: &SlotOrder, bin: &mut [u8], digest: &Digest) {
    embed_payload(order, bin, digest);
}

/// Extract a full keyed digest.
pub fn extract_digest(order: &SlotOrder, bin: &[u8]) -> Digest {
    let mut digest = [0u8; DIGEST_LEN];
    extract_payload(order, bin, &mut digest);
    digest
}
