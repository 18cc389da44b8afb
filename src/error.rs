// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

/// Represents errors that can occur when inserting into an array hash
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Key does not fit into a record's 16-bit length field (key length)
    KeyTooLong(usize),

    /// Key contains a zero byte, which is reserved as record terminator (position)
    InteriorNul(usize),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ArrayHashError: {self:?}")
    }
}

impl std::error::Error for Error {}

/// Array hash result
pub type Result<T> = std::result::Result<T, Error>;
