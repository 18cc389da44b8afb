// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::record::{record_size, write_record, write_terminator, Records, LENGTH_FIELD_SIZE};

/// Outcome of looking up a key in the table
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Probe {
    /// Key is stored
    Found,

    /// The key's slot has no buffer
    AbsentNoBuffer,

    /// Key is not in its slot; carries the byte span of the slot's records
    AbsentWithSize(usize),
}

/// An exactly-sized slot buffer, holding at least one record and the terminator
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slot(Box<[u8]>);

impl std::ops::Deref for Slot {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Slot {
    /// Allocates a slot holding just `key`.
    #[must_use]
    pub fn with_key(key: &[u8]) -> Self {
        Self::build(&[], key)
    }

    /// Builds the slot that results from appending `key` to this one.
    ///
    /// `span` is the byte span of the existing records, as reported by [`Slot::probe`].
    #[must_use]
    pub fn appended(&self, span: usize, key: &[u8]) -> Self {
        debug_assert_eq!(span + LENGTH_FIELD_SIZE, self.0.len(), "span mismatch");

        #[expect(
            clippy::indexing_slicing,
            reason = "span is the terminator offset of this slot"
        )]
        let prefix = &self.0[..span];

        Self::build(prefix, key)
    }

    fn build(prefix: &[u8], key: &[u8]) -> Self {
        let size = prefix.len() + record_size(key.len()) + LENGTH_FIELD_SIZE;

        let mut buf = Vec::with_capacity(size);
        buf.extend_from_slice(prefix);

        #[expect(clippy::expect_used, reason = "writing into a Vec cannot fail")]
        {
            write_record(&mut buf, key).expect("cannot fail");
            write_terminator(&mut buf).expect("cannot fail");
        }

        debug_assert_eq!(size, buf.len());

        Self(buf.into_boxed_slice())
    }

    /// Walks the slot's records.
    #[must_use]
    pub fn records(&self) -> Records<'_> {
        Records::new(&self.0)
    }

    /// Searches the slot for `key`.
    ///
    /// Never returns [`Probe::AbsentNoBuffer`].
    #[must_use]
    pub fn probe(&self, key: &[u8]) -> Probe {
        let mut records = self.records();

        if records.by_ref().any(|record| record.matches(key)) {
            Probe::Found
        } else {
            Probe::AbsentWithSize(records.offset())
        }
    }

    /// Returns the number of records in the slot.
    #[cfg(test)]
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.records().count()
    }
}
