//! Provide [`Nested`] implementations for foreign types, and the helpers
//! used by the default methods of [`Nested`].
//!
//! - `xxx_debug`: used by [`Nested::nested_debug`] (e.g. [`object_debug`]).
//! - `xxx_partial_eq`: used by [`Nested::nested_partial_eq`] (e.g. [`object_partial_eq`]).
//!
//! ## Implemented Menu
//!
//! - opaque:
//!     - `bool`, `char`, `()`
//!     - `i8`-`i128`, `u8`-`u128`, `isize`, `usize`, `f32`, `f64`
//!     - `String`, `&'static str`
//! - sequence:
//!     - `Vec<T>`, `VecDeque<T>`, `[T; N]`
//! - mapping (string keys only):
//!     - `BTreeMap<String, V>`
//!     - `hashbrown::HashMap<String, V, S>`
//!     - `std::collections::HashMap<String, V, S>` ("std" feature)
//! - serde_json ("json" feature):
//!     - `Value` (mapping, sequence or opaque depending on the variant)
//!     - `Map<String, Value>`

use core::fmt;

use crate::Nested;
use crate::ops::{Mapping, NestedRef, Object, Sequence};

// -----------------------------------------------------------------------------
// Modules

mod collections;
mod hash;
mod primitives;

#[cfg(feature = "json")]
mod json;

// -----------------------------------------------------------------------------
// Debug

/// Returns the type name without its module path.
fn short_type_name(name: &'static str) -> &'static str {
    let end = name.find('<').unwrap_or(name.len());
    match name[..end].rfind("::") {
        Some(index) => &name[index + 2..],
        None => name,
    }
}

/// Formats an [`Object`] as `Name { attr: value, .. }`.
pub fn object_debug(obj: &dyn Object, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut debug = f.debug_struct(short_type_name(obj.type_name()));
    for (name, value) in obj.attrs() {
        debug.field(name, &value);
    }
    debug.finish()
}

/// Formats a [`Mapping`] as `{"key": value, ..}`.
pub fn mapping_debug(map: &dyn Mapping, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_map().entries(map.iter()).finish()
}

/// Formats a [`Sequence`] as `[value, ..]`.
pub fn sequence_debug(seq: &dyn Sequence, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(seq.items()).finish()
}

// -----------------------------------------------------------------------------
// PartialEq

/// Compares an [`Object`] with `other` attribute by attribute.
///
/// Attribute order is ignored; `other` must be an object with the same names.
pub fn object_partial_eq(obj: &dyn Object, other: &dyn Nested) -> Option<bool> {
    let NestedRef::Object(other) = other.nested_ref() else {
        return Some(false);
    };
    if obj.attr_len() != other.attr_len() {
        return Some(false);
    }
    for (name, value) in obj.attrs() {
        let Some(other_value) = other.attr(name) else {
            return Some(false);
        };
        match value.nested_partial_eq(other_value) {
            Some(true) => {}
            result => return result,
        }
    }
    Some(true)
}

/// Compares a [`Mapping`] with `other` entry by entry.
pub fn mapping_partial_eq(map: &dyn Mapping, other: &dyn Nested) -> Option<bool> {
    let NestedRef::Mapping(other) = other.nested_ref() else {
        return Some(false);
    };
    if map.len() != other.len() {
        return Some(false);
    }
    for (key, value) in map.iter() {
        let Some(other_value) = other.get(key) else {
            return Some(false);
        };
        match value.nested_partial_eq(other_value) {
            Some(true) => {}
            result => return result,
        }
    }
    Some(true)
}

/// Compares a [`Sequence`] with `other` element by element.
pub fn sequence_partial_eq(seq: &dyn Sequence, other: &dyn Nested) -> Option<bool> {
    let NestedRef::Sequence(other) = other.nested_ref() else {
        return Some(false);
    };
    if seq.len() != other.len() {
        return Some(false);
    }
    for (value, other_value) in seq.items().zip(other.items()) {
        match value.nested_partial_eq(other_value) {
            Some(true) => {}
            result => return result,
        }
    }
    Some(true)
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::short_type_name;
    use crate::ops::{DynamicList, DynamicMap, DynamicObject};
    use crate::Nested;
    use alloc::vec;

    #[test]
    fn short_names() {
        assert_eq!(short_type_name("a::b::Point"), "Point");
        assert_eq!(short_type_name("Point"), "Point");
        assert_eq!(
            short_type_name("a::Wrapper<alloc::string::String>"),
            "Wrapper<alloc::string::String>"
        );
    }

    #[test]
    fn structural_eq_across_types() {
        let list: DynamicList = [1_i32, 2].into_iter().collect();
        assert!(<dyn Nested>::nested_eq(&list, &vec![1_i32, 2]));
        assert!(!<dyn Nested>::nested_eq(&list, &vec![1_i32]));
        assert!(!<dyn Nested>::nested_eq(&list, &vec![1_i64, 2]));

        let map: DynamicMap = [("a", 1_u8)].into_iter().collect();
        let obj: DynamicObject = [("a", 1_u8)].into_iter().collect();
        assert!(!<dyn Nested>::nested_eq(&map, &obj));
        assert!(<dyn Nested>::nested_eq(&obj, &obj));
    }
}
