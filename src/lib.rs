// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! A packed hash set for short strings.
//!
//! ##### NOTE
//!
//! > This crate only provides the leaf bucket of a burst trie, not the trie itself.
//!
//! ##### About
//!
//! This crate exports an `ArrayHash` that supports inserting, looking up
//! and iterating over unique strings.
//!
//! Instead of storing every key in its own allocation and chaining colliding
//! keys with pointers, every slot of the table is a single, exactly-sized
//! byte buffer that holds all of its keys back to back as
//! length-prefixed, zero-terminated records.
//! This keeps the per-key overhead at three bytes, and lookups scan
//! contiguous memory.
//!
//! The price is paid on insertion: appending a key to a populated slot
//! reallocates and copies that slot. A burst trie keeps its buckets small,
//! so this is cheap in practice.
//!
//! Keys are limited to 32766 bytes, and may not contain zero bytes.
//! Keys cannot be removed.
//!
//! ```
//! use array_hash::ArrayHash;
//!
//! let mut set: ArrayHash = ArrayHash::new();
//!
//! for word in ["cat", "car", "dog", "cat"] {
//!     set.insert(word)?;
//! }
//!
//! assert_eq!(3, set.size());
//! assert!(set.find("cat"));
//! assert!(!set.find("bird"));
//!
//! // Keys are ordered by slot, not lexicographically
//! let keys = set.iter().collect::<Vec<_>>();
//! assert_eq!(vec![&b"dog"[..], &b"cat"[..], &b"car"[..]], keys);
//! #
//! # Ok::<(), array_hash::Error>(())
//! ```

#![deny(clippy::all, missing_docs, clippy::cargo)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::indexing_slicing)]
#![warn(clippy::pedantic, clippy::nursery)]
#![warn(clippy::expect_used)]
#![allow(clippy::missing_const_for_fn)]
#![warn(clippy::multiple_crate_versions)]
#![allow(clippy::option_if_let_else)]
#![warn(clippy::redundant_feature_names)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod config;
mod error;

#[doc(hidden)]
pub mod hash;

mod iter;

#[doc(hidden)]
pub mod record;

mod slot;
mod table;

pub use {
    config::Config,
    error::{Error, Result},
    hash::DEFAULT_SEED,
    iter::{Cursor, Iter},
    record::MAX_KEY_LEN,
    table::{ArrayHash, DEFAULT_SLOT_COUNT},
};
