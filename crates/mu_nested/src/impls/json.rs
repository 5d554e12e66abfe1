//! `serde_json` documents: objects are mappings, arrays are sequences and
//! every other variant is an opaque leaf.
//!
//! Typed writes into a document only accept [`Value`].

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

use serde_json::{Map, Value};

use crate::Nested;
use crate::ops::{Mapping, NestedMut, NestedRef, WriteError, take_value};

impl Nested for Value {
    fn nested_ref(&self) -> NestedRef<'_> {
        match self {
            Value::Object(map) => NestedRef::Mapping(map),
            Value::Array(list) => NestedRef::Sequence(list),
            _ => NestedRef::Opaque(self),
        }
    }

    fn nested_mut(&mut self) -> NestedMut<'_> {
        match self {
            Value::Object(map) => NestedMut::Mapping(map),
            Value::Array(list) => NestedMut::Sequence(list),
            _ => NestedMut::Opaque(self),
        }
    }

    #[inline]
    fn nested_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }

    fn nested_partial_eq(&self, other: &dyn Nested) -> Option<bool> {
        if let Some(other) = other.downcast_ref::<Value>() {
            return Some(self == other);
        }
        match self.nested_ref() {
            NestedRef::Mapping(map) => crate::impls::mapping_partial_eq(map, other),
            NestedRef::Sequence(seq) => crate::impls::sequence_partial_eq(seq, other),
            _ => None,
        }
    }
}

impl Nested for Map<String, Value> {
    #[inline]
    fn nested_ref(&self) -> NestedRef<'_> {
        NestedRef::Mapping(self)
    }

    #[inline]
    fn nested_mut(&mut self) -> NestedMut<'_> {
        NestedMut::Mapping(self)
    }
}

impl Mapping for Map<String, Value> {
    #[inline]
    fn get(&self, key: &str) -> Option<&dyn Nested> {
        Map::get(self, key).map(|value| value as &dyn Nested)
    }

    #[inline]
    fn get_mut(&mut self, key: &str) -> Option<&mut dyn Nested> {
        Map::get_mut(self, key).map(|value| value as &mut dyn Nested)
    }

    fn insert(
        &mut self,
        key: &str,
        value: Box<dyn Nested>,
    ) -> Result<Option<Box<dyn Nested>>, WriteError> {
        let value = take_value::<Value>(value)?;
        Ok(Map::insert(self, String::from(key), value).map(|old| old.into_boxed_nested()))
    }

    #[inline]
    fn len(&self) -> usize {
        Map::len(self)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&str, &dyn Nested)> + '_> {
        Box::new(Map::iter(self).map(|(key, value)| (key.as_str(), value as &dyn Nested)))
    }
}

// -----------------------------------------------------------------------------
// Tests
