// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::{record::Records, slot::Slot};
use std::ffi::CStr;

/// Read-only position inside an array hash
///
/// A cursor points either at a record of an allocated slot, or
/// one past the last record (see [`ArrayHash::end`](crate::ArrayHash::end)).
/// Slots are visited in ascending index order; records inside a slot in
/// insertion order.
#[derive(Copy, Clone)]
pub struct Cursor<'a> {
    slots: &'a [Option<Slot>],
    slot: usize,
    offset: Option<usize>,
}

impl<'a> Cursor<'a> {
    pub(crate) fn begin(slots: &'a [Option<Slot>]) -> Self {
        Self::seek_occupied(slots, 0)
    }

    pub(crate) fn end(slots: &'a [Option<Slot>]) -> Self {
        Self {
            slots,
            slot: slots.len(),
            offset: None,
        }
    }

    /// Positions at the first record of the first allocated slot at or after `from`.
    fn seek_occupied(slots: &'a [Option<Slot>], from: usize) -> Self {
        slots
            .iter()
            .enumerate()
            .skip(from)
            .find(|(_, slot)| slot.is_some())
            .map_or_else(
                || Self::end(slots),
                |(idx, _)| Self {
                    slots,
                    slot: idx,
                    offset: Some(0),
                },
            )
    }

    fn current_slot(&self) -> Option<&'a Slot> {
        self.slots.get(self.slot).and_then(Option::as_ref)
    }

    fn current(&self) -> Option<crate::record::Record<'a>> {
        let offset = self.offset?;
        let slot = self.current_slot()?;
        Records::starting_at(slot, offset).next()
    }

    /// Returns the index of the slot the cursor is in.
    ///
    /// Equals the slot count for the end cursor.
    #[must_use]
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Returns `true` if the cursor is past the last record.
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.offset.is_none()
    }

    /// Returns the key the cursor points at, or `None` for the end cursor.
    #[must_use]
    pub fn get(&self) -> Option<&'a [u8]> {
        self.current().map(|record| record.key())
    }

    /// Returns the key the cursor points at as a zero-terminated string.
    #[must_use]
    pub fn get_cstr(&self) -> Option<&'a CStr> {
        self.current()
            .and_then(|record| CStr::from_bytes_with_nul(record.payload()).ok())
    }

    /// Moves the cursor to the next record.
    ///
    /// Advancing the end cursor does nothing.
    pub fn advance(&mut self) -> &mut Self {
        let Some(record) = self.current() else {
            *self = Self::end(self.slots);
            return self;
        };

        let next = record.offset + record.size();

        let has_next = self
            .current_slot()
            .is_some_and(|slot| Records::starting_at(slot, next).next().is_some());

        if has_next {
            self.offset = Some(next);
        } else {
            *self = Self::seek_occupied(self.slots, self.slot + 1);
        }

        self
    }
}

impl PartialEq for Cursor<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.slots, other.slots)
            && self.slot == other.slot
            && self.offset == other.offset
    }
}

impl Eq for Cursor<'_> {}

impl std::fmt::Debug for Cursor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.offset {
            Some(offset) => write!(f, "Cursor({}:{offset})", self.slot),
            None => write!(f, "Cursor(end)"),
        }
    }
}

/// Iterator over the keys of an array hash
///
/// Created by [`ArrayHash::iter`](crate::ArrayHash::iter).
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    cursor: Cursor<'a>,
    remaining: usize,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(cursor: Cursor<'a>, len: usize) -> Self {
        Self {
            cursor,
            remaining: len,
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.cursor.get()?;
        self.cursor.advance();
        self.remaining = self.remaining.saturating_sub(1);
        Some(key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl std::iter::FusedIterator for Iter<'_> {}
