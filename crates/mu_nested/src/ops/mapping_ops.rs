use alloc::boxed::Box;
use core::fmt;

use crate::ops::entries::Entries;
use crate::ops::{NestedMut, NestedRef, WriteError};
use crate::{IntoNested, Nested};

// -----------------------------------------------------------------------------
// Mapping

/// A string-keyed collection, reached with `[key]`.
///
/// Implemented for [`DynamicMap`], `BTreeMap<String, V>`,
/// `hashbrown::HashMap<String, V, S>` and, with the `std` feature,
/// `std::collections::HashMap<String, V, S>`.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use mu_nested::{Nested, ops::Mapping};
///
/// let mut map = BTreeMap::<String, i32>::new();
/// Mapping::insert(&mut map, "x", Box::new(5_i32)).unwrap();
///
/// assert_eq!(Mapping::len(&map), 1);
/// assert_eq!(Mapping::get(&map, "x").and_then(<dyn Nested>::downcast_ref::<i32>), Some(&5));
/// ```
pub trait Mapping: Nested {
    /// Returns a reference to the value at `key`.
    fn get(&self, key: &str) -> Option<&dyn Nested>;

    /// Returns a mutable reference to the value at `key`.
    fn get_mut(&mut self, key: &str) -> Option<&mut dyn Nested>;

    /// Inserts `value` at `key`, returning the replaced value if any.
    ///
    /// Missing keys are created. Typed maps reject values of another type
    /// with [`WriteError::MismatchedType`].
    fn insert(
        &mut self,
        key: &str,
        value: Box<dyn Nested>,
    ) -> Result<Option<Box<dyn Nested>>, WriteError>;

    /// Returns the number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the mapping has no entries.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the mapping has an entry at `key`.
    #[inline]
    fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns an iterator over `(key, value)` pairs.
    ///
    /// The order is the iteration order of the underlying collection.
    fn iter(&self) -> Box<dyn Iterator<Item = (&str, &dyn Nested)> + '_>;
}

// -----------------------------------------------------------------------------
// Dynamic Map

/// A string-keyed map holding values of any [`Nested`] type.
///
/// Entries keep their insertion order. Writes accept any value type.
///
/// # Examples
///
/// ```
/// use mu_nested::{Nested, ops::{DynamicMap, Mapping}};
///
/// let mut map = DynamicMap::new();
/// map.extend("x", 5_i64).extend("y", "text");
///
/// assert_eq!(map.len(), 2);
/// assert_eq!(map.get("y").and_then(<dyn Nested>::downcast_ref::<&str>), Some(&"text"));
/// ```
#[derive(Default)]
pub struct DynamicMap {
    entries: Entries,
}

impl DynamicMap {
    /// Creates an empty `DynamicMap`.
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: Entries::new(),
        }
    }

    /// Inserts or replaces an entry.
    ///
    /// Returns `self` for chaining.
    #[inline]
    pub fn extend(&mut self, key: &str, value: impl IntoNested) -> &mut Self {
        self.entries.insert(key, value.into_nested());
        self
    }

    /// Removes an entry, returning its value.
    #[inline]
    pub fn remove(&mut self, key: &str) -> Option<Box<dyn Nested>> {
        self.entries.remove(key)
    }
}

impl<S: AsRef<str>, V: IntoNested> FromIterator<(S, V)> for DynamicMap {
    fn from_iter<I: IntoIterator<Item = (S, V)>>(entries: I) -> Self {
        let mut map = Self::new();
        for (key, value) in entries {
            map.extend(key.as_ref(), value);
        }
        map
    }
}

impl Nested for DynamicMap {
    #[inline]
    fn nested_ref(&self) -> NestedRef<'_> {
        NestedRef::Mapping(self)
    }

    #[inline]
    fn nested_mut(&mut self) -> NestedMut<'_> {
        NestedMut::Mapping(self)
    }
}

impl Mapping for DynamicMap {
    #[inline]
    fn get(&self, key: &str) -> Option<&dyn Nested> {
        self.entries.get(key)
    }

    #[inline]
    fn get_mut(&mut self, key: &str) -> Option<&mut dyn Nested> {
        self.entries.get_mut(key)
    }

    #[inline]
    fn insert(
        &mut self,
        key: &str,
        value: Box<dyn Nested>,
    ) -> Result<Option<Box<dyn Nested>>, WriteError> {
        Ok(self.entries.insert(key, value))
    }

    #[inline]
    fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    fn iter(&self) -> Box<dyn Iterator<Item = (&str, &dyn Nested)> + '_> {
        Box::new(self.entries.iter())
    }
}

impl fmt::Debug for DynamicMap {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.nested_debug(f)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{DynamicMap, Mapping};
    use crate::Nested;
    use alloc::boxed::Box;
    use alloc::format;

    #[test]
    fn insert_returns_replaced_value() {
        let mut map = DynamicMap::new();
        assert!(map.insert("x", Box::new(1_i32)).unwrap().is_none());

        let old = map.insert("x", Box::new(2_u8)).unwrap().unwrap();
        assert_eq!(old.take::<i32>().ok(), Some(1));
        assert_eq!(map.get("x").and_then(<dyn Nested>::downcast_ref::<u8>), Some(&2));
    }

    #[test]
    fn remove_and_contains() {
        let mut map: DynamicMap = [("a", 1_i32), ("b", 2)].into_iter().collect();
        assert!(map.contains_key("a"));
        assert!(map.remove("a").is_some());
        assert!(!map.contains_key("a"));
        assert_eq!(map.len(), 1);
        assert!(!map.is_empty());
    }

    #[test]
    fn debug_prints_as_map() {
        let mut map = DynamicMap::new();
        map.extend("x", 5_i32);
        assert_eq!(format!("{map:?}"), r#"{"x": 5}"#);
    }
}
