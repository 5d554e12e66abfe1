use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::hash::BuildHasher;

use mu_utils::hash::FixedHashState;
use mu_utils::hash::hashbrown::HashTable;

use crate::Nested;

#[inline]
fn hash_key(key: &str) -> u64 {
    FixedHashState.hash_one(key)
}

/// String-keyed values kept in insertion order.
///
/// Shared storage of `DynamicObject` and `DynamicMap`.
/// `indices` maps the hash of a key to its position in `values`.
#[derive(Default)]
pub(crate) struct Entries {
    values: Vec<(String, Box<dyn Nested>)>,
    indices: HashTable<usize>,
}

impl Entries {
    #[inline]
    pub(crate) fn new() -> Self {
        Self {
            values: Vec::new(),
            indices: HashTable::new(),
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    pub(crate) fn index_of(&self, key: &str) -> Option<usize> {
        self.indices
            .find(hash_key(key), |&index| self.values[index].0 == key)
            .copied()
    }

    #[inline]
    pub(crate) fn get(&self, key: &str) -> Option<&dyn Nested> {
        let index = self.index_of(key)?;
        Some(&*self.values[index].1)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut dyn Nested> {
        let index = self.index_of(key)?;
        Some(&mut *self.values[index].1)
    }

    #[inline]
    pub(crate) fn key_at(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(|(key, _)| key.as_str())
    }

    #[inline]
    pub(crate) fn value_at(&self, index: usize) -> Option<&dyn Nested> {
        self.values.get(index).map(|(_, value)| &**value)
    }

    /// Inserts or replaces the value at `key`, returning the replaced value.
    ///
    /// A replaced value keeps its original position.
    pub(crate) fn insert(&mut self, key: &str, value: Box<dyn Nested>) -> Option<Box<dyn Nested>> {
        if let Some(index) = self.index_of(key) {
            return Some(core::mem::replace(&mut self.values[index].1, value));
        }

        let index = self.values.len();
        self.values.push((String::from(key), value));
        let values = &self.values;
        self.indices
            .insert_unique(hash_key(key), index, |&index| hash_key(&values[index].0));
        None
    }

    /// Removes the value at `key`, shifting later entries down by one.
    pub(crate) fn remove(&mut self, key: &str) -> Option<Box<dyn Nested>> {
        let values = &self.values;
        let entry = self
            .indices
            .find_entry(hash_key(key), |&index| values[index].0 == key)
            .ok()?;
        let (removed, _) = entry.remove();

        for index in self.indices.iter_mut() {
            if *index > removed {
                *index -= 1;
            }
        }

        let (_, value) = self.values.remove(removed);
        Some(value)
    }

    #[inline]
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &dyn Nested)> {
        self.values.iter().map(|(key, value)| (key.as_str(), &**value))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::Entries;
    use crate::Nested;
    use alloc::vec::Vec;

    #[test]
    fn keeps_insertion_order() {
        let mut entries = Entries::new();
        entries.insert("b", 1_i32.into_boxed_nested());
        entries.insert("a", 2_i32.into_boxed_nested());
        entries.insert("b", 3_i32.into_boxed_nested());

        let keys: Vec<&str> = entries.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, ["b", "a"]);
        assert_eq!(entries.get("b").and_then(<dyn Nested>::downcast_ref::<i32>), Some(&3_i32));
    }

    #[test]
    fn remove_reindexes_later_entries() {
        let mut entries = Entries::new();
        for (key, value) in [("x", 1_i32), ("y", 2), ("z", 3)] {
            entries.insert(key, value.into_boxed_nested());
        }

        let removed = entries.remove("x").and_then(|value| value.take::<i32>().ok());
        assert_eq!(removed, Some(1));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries.index_of("z"), Some(1));
        assert_eq!(entries.get("z").and_then(<dyn Nested>::downcast_ref::<i32>), Some(&3_i32));
        assert!(entries.remove("x").is_none());
    }
}
