// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Slot hash function

/// Seed used when no other seed is configured
pub const DEFAULT_SEED: i32 = 23;

/// Hashes a key using a shift-add-xor rolling mix.
///
/// Bytes are sign-extended and all arithmetic wraps, so the result is
/// identical to the classic `int`-based formulation on platforms with a
/// signed `char`.
#[must_use]
pub fn hash(bytes: &[u8], seed: i32) -> i32 {
    bytes.iter().fold(seed, |h, &byte| {
        #[expect(
            clippy::cast_possible_wrap,
            reason = "bytes are deliberately mixed in as signed chars"
        )]
        let byte = i32::from(byte as i8);

        h ^ (h << 5).wrapping_add(h >> 2).wrapping_add(byte)
    })
}

/// Maps a key to its slot in a table of `slot_count` slots.
///
/// `slot_count` must be a power of two.
#[must_use]
pub fn slot_index(bytes: &[u8], seed: i32, slot_count: usize) -> usize {
    debug_assert!(slot_count.is_power_of_two(), "slot count must be a power of two");

    #[expect(
        clippy::cast_sign_loss,
        reason = "reinterpreting the bits, the mask keeps the index in range"
    )]
    let h = hash(bytes, seed) as u32;

    (h as usize) & (slot_count - 1)
}
