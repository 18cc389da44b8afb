// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Packed record layout of a slot buffer.
//!
//! ## Format
//!
//! \[len: i16 LE\] \[key bytes\] \[0x00\] ... \[0: i16 LE\]
//!
//! `len` counts the key bytes plus the trailing zero byte, so a stored
//! record always has `len >= 1`. A length field of `0` terminates the
//! record stream.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::Write;

/// Length field of a record
pub type LengthField = i16;

/// Size of a length field in bytes
pub const LENGTH_FIELD_SIZE: usize = std::mem::size_of::<LengthField>();

/// Length field value that ends the record stream
pub const TERMINATOR: LengthField = 0;

/// Longest key that can be stored, in bytes
#[expect(clippy::cast_sign_loss, reason = "i16::MAX is positive")]
pub const MAX_KEY_LEN: usize = LengthField::MAX as usize - 1;

/// Returns the number of bytes a record of the given key occupies.
#[must_use]
pub const fn record_size(key_len: usize) -> usize {
    LENGTH_FIELD_SIZE + key_len + 1
}

/// Checks whether a key can be stored as a record.
pub fn validate(key: &[u8]) -> crate::Result<()> {
    if key.len() > MAX_KEY_LEN {
        return Err(crate::Error::KeyTooLong(key.len()));
    }

    if let Some(pos) = key.iter().position(|&byte| byte == 0) {
        return Err(crate::Error::InteriorNul(pos));
    }

    Ok(())
}

/// Appends a record (length field, key bytes, zero byte) to a writer.
///
/// The key needs to be validated beforehand.
pub fn write_record<W: Write>(writer: &mut W, key: &[u8]) -> std::io::Result<()> {
    debug_assert!(validate(key).is_ok(), "key should be validated");

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        reason = "validated keys are at most MAX_KEY_LEN bytes"
    )]
    let len = (key.len() + 1) as LengthField;

    writer.write_i16::<LittleEndian>(len)?;
    writer.write_all(key)?;
    writer.write_u8(0)?;

    Ok(())
}

/// Appends the terminator to a writer.
pub fn write_terminator<W: Write>(writer: &mut W) -> std::io::Result<()> {
    writer.write_i16::<LittleEndian>(TERMINATOR)
}

/// A record borrowed from a slot buffer
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Record<'a> {
    /// Byte offset of the record's length field
    pub offset: usize,

    /// Key bytes plus the trailing zero byte
    payload: &'a [u8],
}

impl<'a> Record<'a> {
    /// Returns the key, without the trailing zero byte.
    #[must_use]
    pub fn key(&self) -> &'a [u8] {
        self.payload
            .split_last()
            .map_or(self.payload, |(_, key)| key)
    }

    /// Returns the key including its trailing zero byte.
    #[must_use]
    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }

    /// Returns the value of the length field.
    #[must_use]
    pub fn stored_len(&self) -> usize {
        self.payload.len()
    }

    /// Returns the number of bytes the record occupies.
    #[must_use]
    pub fn size(&self) -> usize {
        LENGTH_FIELD_SIZE + self.payload.len()
    }

    /// Checks whether the record stores exactly `key`.
    #[must_use]
    pub fn matches(&self, key: &[u8]) -> bool {
        self.stored_len() == key.len() + 1 && self.key() == key
    }
}

/// Walks the record stream of a slot buffer up to its terminator
#[derive(Clone, Debug)]
pub struct Records<'a> {
    bytes: &'a [u8],
    offset: usize,
    done: bool,
}

impl<'a> Records<'a> {
    /// Starts walking at the first record.
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::starting_at(bytes, 0)
    }

    /// Starts walking at the record whose length field is at `offset`.
    #[must_use]
    pub fn starting_at(bytes: &'a [u8], offset: usize) -> Self {
        Self {
            bytes,
            offset,
            done: false,
        }
    }

    /// Returns the offset of the next length field.
    ///
    /// Once the walk is exhausted, this is the terminator's offset, which
    /// equals the byte span of all records before it.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    fn read_next(&self) -> Option<Record<'a>> {
        let mut reader = self.bytes.get(self.offset..)?;
        let len = reader.read_i16::<LittleEndian>().ok()?;

        debug_assert!(len >= 0, "negative record length");

        if len <= TERMINATOR {
            return None;
        }

        #[expect(clippy::cast_sign_loss, reason = "len is positive")]
        let payload = reader.get(..len as usize)?;

        Some(Record {
            offset: self.offset,
            payload,
        })
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = Record<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let Some(record) = self.read_next() else {
            self.done = true;
            return None;
        };

        self.offset += record.size();

        Some(record)
    }
}

impl std::iter::FusedIterator for Records<'_> {}
