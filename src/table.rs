// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::{
    hash::slot_index,
    iter::{Cursor, Iter},
    record::validate,
    slot::{Probe, Slot},
    Config,
};
use std::ffi::CStr;

/// Default number of slots
pub const DEFAULT_SLOT_COUNT: usize = 2_048;

/// A hash set of short strings, packed into exactly-sized slot buffers
///
/// Every slot stores its keys back to back as length-prefixed,
/// zero-terminated records. There is no spare capacity: appending
/// to a slot reallocates it to the exact new size.
///
/// `SLOT_COUNT` needs to be a power of two, which is checked at compile time.
///
/// # Examples
///
/// ```
/// use array_hash::ArrayHash;
///
/// let mut set: ArrayHash = ArrayHash::new();
/// set.insert("cat")?;
/// set.insert("car")?;
/// set.insert("cat")?;
///
/// assert_eq!(2, set.size());
/// assert!(set.find("car"));
/// assert!(!set.find("dog"));
/// # Ok::<(), array_hash::Error>(())
/// ```
///
/// A slot count that is not a power of two does not compile:
///
/// ```compile_fail
/// use array_hash::ArrayHash;
///
/// let set: ArrayHash<3> = ArrayHash::new();
/// ```
///
/// ```compile_fail
/// use array_hash::ArrayHash;
///
/// let set: ArrayHash<0> = ArrayHash::new();
/// ```
#[derive(Clone)]
pub struct ArrayHash<const SLOT_COUNT: usize = DEFAULT_SLOT_COUNT> {
    slots: Box<[Option<Slot>]>,
    len: usize,
    seed: i32,
}

impl<const SLOT_COUNT: usize> Default for ArrayHash<SLOT_COUNT> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const SLOT_COUNT: usize> ArrayHash<SLOT_COUNT> {
    const SLOT_COUNT_IS_POWER_OF_TWO: () = assert!(
        SLOT_COUNT.is_power_of_two(),
        "slot count must be a power of two"
    );

    /// Creates an empty array hash.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty array hash using the given configuration.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        // NOTE: Evaluates the power of two check at compile time
        let () = Self::SLOT_COUNT_IS_POWER_OF_TWO;

        Self {
            slots: std::iter::repeat_with(|| None).take(SLOT_COUNT).collect(),
            len: 0,
            seed: config.seed,
        }
    }

    /// Returns the number of slots.
    #[must_use]
    pub const fn slot_count(&self) -> usize {
        SLOT_COUNT
    }

    /// Returns the hash seed.
    #[must_use]
    pub fn seed(&self) -> i32 {
        self.seed
    }

    /// Returns the slot a key is (or would be) stored in.
    #[must_use]
    pub fn slot_of<K: AsRef<[u8]>>(&self, key: K) -> usize {
        slot_index(key.as_ref(), self.seed, SLOT_COUNT)
    }

    /// Looks up a key, reporting where and how it is (not) stored.
    fn locate(&self, key: &[u8]) -> (usize, Probe) {
        let idx = self.slot_of(key);

        let probe = self
            .slots
            .get(idx)
            .and_then(Option::as_ref)
            .map_or(Probe::AbsentNoBuffer, |slot| slot.probe(key));

        (idx, probe)
    }

    /// Inserts a key.
    ///
    /// Returns `true` if the key was not stored before.
    /// Inserting a stored key does not modify the set.
    ///
    /// # Errors
    ///
    /// Returns error if the key is longer than [`MAX_KEY_LEN`](crate::MAX_KEY_LEN)
    /// or contains a zero byte. The set is left untouched in that case.
    pub fn insert<K: AsRef<[u8]>>(&mut self, key: K) -> crate::Result<bool> {
        let key = key.as_ref();

        if let Err(e) = validate(key) {
            log::warn!("Rejecting key of {} bytes: {e}", key.len());
            return Err(e);
        }

        let (idx, probe) = self.locate(key);

        #[expect(
            clippy::indexing_slicing,
            reason = "slot index is masked by SLOT_COUNT - 1"
        )]
        let entry = &mut self.slots[idx];

        let slot = match (probe, entry.as_ref()) {
            (Probe::Found, _) => return Ok(false),
            (Probe::AbsentWithSize(span), Some(slot)) => {
                log::trace!("Growing slot {idx} from {} bytes", slot.len());
                slot.appended(span, key)
            }
            (Probe::AbsentNoBuffer | Probe::AbsentWithSize(_), _) => {
                log::trace!("Allocating slot {idx}");
                Slot::with_key(key)
            }
        };

        // NOTE: The new buffer is complete at this point, the old one is dropped here
        *entry = Some(slot);
        self.len += 1;

        Ok(true)
    }

    /// Inserts a zero-terminated string.
    ///
    /// # Errors
    ///
    /// Returns error if the string is longer than [`MAX_KEY_LEN`](crate::MAX_KEY_LEN).
    pub fn insert_cstr(&mut self, key: &CStr) -> crate::Result<bool> {
        self.insert(key.to_bytes())
    }

    /// Returns `true` if the key is stored.
    ///
    /// Keys that cannot be stored (too long, or containing a zero byte)
    /// are never found.
    #[must_use]
    pub fn find<K: AsRef<[u8]>>(&self, key: K) -> bool {
        matches!(self.locate(key.as_ref()).1, Probe::Found)
    }

    /// Returns `true` if the key is stored.
    ///
    /// Same as [`ArrayHash::find`].
    #[must_use]
    pub fn contains<K: AsRef<[u8]>>(&self, key: K) -> bool {
        self.find(key)
    }

    /// Returns `true` if the zero-terminated string is stored.
    #[must_use]
    pub fn find_cstr(&self, key: &CStr) -> bool {
        self.find(key.to_bytes())
    }

    /// Returns the number of stored keys.
    #[must_use]
    pub fn size(&self) -> usize {
        self.len
    }

    /// Returns the number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no key is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots that have a buffer.
    #[must_use]
    pub fn occupied_slots(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Returns the total size of all slot buffers in bytes.
    #[must_use]
    pub fn allocated_bytes(&self) -> usize {
        self.slots.iter().flatten().map(|slot| slot.len()).sum()
    }

    /// Returns a cursor at the first key.
    ///
    /// Equals [`ArrayHash::end`] if the set is empty.
    #[must_use]
    pub fn begin(&self) -> Cursor<'_> {
        Cursor::begin(&self.slots)
    }

    /// Returns a cursor one past the last key.
    #[must_use]
    pub fn end(&self) -> Cursor<'_> {
        Cursor::end(&self.slots)
    }

    /// Returns an iterator over all keys.
    ///
    /// Keys are yielded by ascending slot, and in insertion order inside a slot.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self.begin(), self.len)
    }

    /// Inserts all keys of an iterator, stopping at the first rejected key.
    ///
    /// Returns the number of keys that were not stored before.
    ///
    /// # Errors
    ///
    /// Returns error if a key cannot be stored, see [`ArrayHash::insert`].
    pub fn try_extend<K: AsRef<[u8]>, I: IntoIterator<Item = K>>(
        &mut self,
        iter: I,
    ) -> crate::Result<usize> {
        let mut inserted = 0;

        for key in iter {
            if self.insert(key)? {
                inserted += 1;
            }
        }

        Ok(inserted)
    }
}

impl<'a, const SLOT_COUNT: usize> IntoIterator for &'a ArrayHash<SLOT_COUNT> {
    type Item = &'a [u8];
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: AsRef<[u8]>, const SLOT_COUNT: usize> Extend<K> for ArrayHash<SLOT_COUNT> {
    /// # Panics
    ///
    /// Panics if a key cannot be stored, see [`ArrayHash::insert`].
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        #[expect(clippy::expect_used, reason = "Extend cannot report errors")]
        self.try_extend(iter).expect("key should be storable");
    }
}

impl<K: AsRef<[u8]>, const SLOT_COUNT: usize> FromIterator<K> for ArrayHash<SLOT_COUNT> {
    /// # Panics
    ///
    /// Panics if a key cannot be stored, see [`ArrayHash::insert`].
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<const SLOT_COUNT: usize> std::fmt::Debug for ArrayHash<SLOT_COUNT> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set()
            .entries(self.iter().map(String::from_utf8_lossy))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{record_size, LENGTH_FIELD_SIZE, MAX_KEY_LEN};
    use test_log::test;

    #[test]
    fn table_empty() {
        let table: ArrayHash = ArrayHash::new();

        assert_eq!(0, table.size());
        assert!(table.is_empty());
        assert_eq!(DEFAULT_SLOT_COUNT, table.slot_count());
        assert_eq!(0, table.occupied_slots());
        assert_eq!(0, table.allocated_bytes());
        assert_eq!(table.begin(), table.end());
        assert!(!table.find(""));
        assert!(!table.find("a"));
    }

    #[test]
    fn table_insert_find() -> crate::Result<()> {
        let mut table: ArrayHash = ArrayHash::new();

        assert!(table.insert("cat")?);
        assert!(table.insert("car")?);
        assert!(table.insert("dog")?);
        assert!(!table.insert("cat")?);

        assert_eq!(3, table.size());
        assert!(table.find("cat"));
        assert!(table.find(b"car"));
        assert!(table.contains(String::from("dog")));
        assert!(!table.find("bird"));
        assert!(!table.find(""));
        assert!(!table.find("ca"));
        assert!(!table.find("cats"));

        Ok(())
    }

    #[test]
    fn table_empty_key() -> crate::Result<()> {
        let mut table: ArrayHash = ArrayHash::new();

        assert!(!table.find(""));
        assert!(table.insert("")?);
        assert!(table.find(""));
        assert!(!table.insert("")?);
        assert_eq!(1, table.size());

        assert_eq!(vec![&b""[..]], table.iter().collect::<Vec<_>>());

        Ok(())
    }

    #[test]
    fn table_rejects_interior_nul() -> crate::Result<()> {
        let mut table: ArrayHash = ArrayHash::new();
        table.insert("a")?;

        assert_eq!(Err(crate::Error::InteriorNul(1)), table.insert(b"a\0b"));
        assert_eq!(Err(crate::Error::InteriorNul(0)), table.insert(b"\0"));
        assert_eq!(1, table.size());
        assert!(!table.find(b"a\0b"));
        assert!(!table.find(b"a\0"));
        assert!(table.find("a"));

        Ok(())
    }

    #[test]
    fn table_rejects_long_key() -> crate::Result<()> {
        let mut table: ArrayHash = ArrayHash::new();

        let longest = vec![b'x'; MAX_KEY_LEN];
        assert!(table.insert(&longest)?);
        assert!(table.find(&longest));

        let too_long = vec![b'x'; MAX_KEY_LEN + 1];
        assert_eq!(
            Err(crate::Error::KeyTooLong(MAX_KEY_LEN + 1)),
            table.insert(&too_long)
        );
        assert!(!table.find(&too_long));
        assert_eq!(1, table.size());

        Ok(())
    }

    #[test]
    fn table_cstr() -> crate::Result<()> {
        let mut table: ArrayHash = ArrayHash::new();

        assert!(table.insert_cstr(c"hello")?);
        assert!(table.find_cstr(c"hello"));
        assert!(table.find("hello"));
        assert!(!table.find_cstr(c"hell"));

        assert_eq!(Some(c"hello"), table.begin().get_cstr());

        Ok(())
    }

    #[test]
    fn table_allocated_bytes() {
        let mut table: ArrayHash = ArrayHash::new();

        table.extend(["cat", "car", "dog", "cat"]);

        assert_eq!(3, table.occupied_slots());
        assert_eq!(
            3 * record_size(3) + 3 * LENGTH_FIELD_SIZE,
            table.allocated_bytes()
        );
    }

    #[test]
    fn table_small_slot_count() -> crate::Result<()> {
        let mut table: ArrayHash<1> = ArrayHash::new();

        for key in ["a", "bb", "ccc", "bb", "dddd"] {
            table.insert(key)?;
        }

        assert_eq!(1, table.occupied_slots());
        assert_eq!(4, table.size());
        assert_eq!(
            vec![&b"a"[..], &b"bb"[..], &b"ccc"[..], &b"dddd"[..]],
            table.iter().collect::<Vec<_>>()
        );

        Ok(())
    }

    #[test]
    fn table_try_extend_stops_at_error() {
        let mut table: ArrayHash<16> = ArrayHash::new();

        let result = table.try_extend([&b"a"[..], &b"b"[..], &b"c\0"[..], &b"d"[..]]);

        assert_eq!(Err(crate::Error::InteriorNul(1)), result);
        assert_eq!(2, table.size());
        assert!(!table.find("d"));
    }

    #[test]
    fn table_try_extend_counts_new_keys() -> crate::Result<()> {
        let mut table: ArrayHash<16> = ArrayHash::new();

        assert_eq!(3, table.try_extend(["a", "b", "a", "c"])?);
        assert_eq!(1, table.try_extend(["a", "d"])?);
        assert_eq!(4, table.size());

        Ok(())
    }

    #[test]
    fn table_clone_is_deep() -> crate::Result<()> {
        let mut table: ArrayHash<8> = ArrayHash::new();
        table.insert("a")?;

        let mut copy = table.clone();
        copy.insert("b")?;

        assert!(!table.find("b"));
        assert!(copy.find("a"));
        assert!(copy.find("b"));
        assert_eq!(1, table.size());
        assert_eq!(2, copy.size());
        assert_ne!(table.begin(), copy.begin());

        Ok(())
    }

    #[test]
    fn table_debug() -> crate::Result<()> {
        let mut table: ArrayHash<1> = ArrayHash::new();
        table.insert("a")?;
        table.insert("b")?;

        assert_eq!(r#"{"a", "b"}"#, format!("{table:?}"));

        Ok(())
    }

    #[test]
    fn table_from_iter() {
        let table: ArrayHash<32> = ["x", "y", "x"].into_iter().collect();
        assert_eq!(2, table.len());

        let mut seen = (&table).into_iter().collect::<Vec<_>>();
        seen.sort_unstable();
        assert_eq!(vec![&b"x"[..], &b"y"[..]], seen);
    }

    #[test]
    fn table_seed_changes_placement() -> crate::Result<()> {
        let default: ArrayHash = ArrayHash::new();
        let seeded: ArrayHash = Config::new().seed(1_000_003).build();

        let moved = (0..100)
            .map(|i| format!("key-{i}"))
            .filter(|key| default.slot_of(key) != seeded.slot_of(key))
            .count();
        assert!(moved > 0);

        let mut seeded = seeded;
        seeded.insert("cat")?;
        assert!(seeded.find("cat"));

        Ok(())
    }

    #[test]
    fn table_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}

        assert_send_sync::<ArrayHash>();
        assert_send_sync::<ArrayHash<1>>();
    }
}
