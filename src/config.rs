// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::{hash::DEFAULT_SEED, ArrayHash};

/// Array hash configuration builder
///
/// The slot count is not part of the configuration, it is a const
/// parameter of [`ArrayHash`] itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Hash seed
    #[doc(hidden)]
    pub seed: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self { seed: DEFAULT_SEED }
    }
}

impl Config {
    /// Initializes a new config.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the seed of the slot hash function.
    ///
    /// Tables with different seeds distribute the same keys
    /// over different slots.
    ///
    /// Defaults to 23.
    #[must_use]
    pub fn seed(mut self, seed: i32) -> Self {
        self.seed = seed;
        self
    }

    /// Creates an empty array hash with this configuration.
    #[must_use]
    pub fn build<const SLOT_COUNT: usize>(self) -> ArrayHash<SLOT_COUNT> {
        ArrayHash::with_config(self)
    }
}
