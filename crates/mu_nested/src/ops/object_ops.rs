use alloc::boxed::Box;
use core::fmt;

use crate::ops::entries::Entries;
use crate::ops::{NestedMut, NestedRef, WriteError};
use crate::{IntoNested, Nested};

// -----------------------------------------------------------------------------
// Object

/// A value with named attributes, reached with `.name`.
///
/// Implemented by [`DynamicObject`] and by structs deriving
/// [`Nested`](derive@crate::Nested).
///
/// # Examples
///
/// ```
/// use mu_nested::{Nested, ops::Object};
///
/// #[derive(Nested)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let mut point = Point { x: 1, y: 2 };
///
/// assert_eq!(point.attr_len(), 2);
/// assert_eq!(point.name_at(1), Some("y"));
/// assert_eq!(point.attr("x").and_then(<dyn Nested>::downcast_ref::<i32>), Some(&1));
///
/// point.set_attr("x", Box::new(5_i32)).unwrap();
/// assert_eq!(point.x, 5);
///
/// assert!(point.set_attr("z", Box::new(0_i32)).is_err());
/// ```
pub trait Object: Nested {
    /// Returns a reference to the attribute called `name`.
    fn attr(&self, name: &str) -> Option<&dyn Nested>;

    /// Returns a mutable reference to the attribute called `name`.
    fn attr_mut(&mut self, name: &str) -> Option<&mut dyn Nested>;

    /// Writes `value` to the attribute called `name`.
    ///
    /// Objects with a fixed set of attributes reject unknown names with
    /// [`WriteError::MissingAttribute`] and values of the wrong type with
    /// [`WriteError::MismatchedType`]. Open objects create the attribute.
    fn set_attr(&mut self, name: &str, value: Box<dyn Nested>) -> Result<(), WriteError>;

    /// Returns the number of attributes.
    fn attr_len(&self) -> usize;

    /// Returns the name of the attribute at `index`.
    fn name_at(&self, index: usize) -> Option<&str>;

    /// Returns a reference to the attribute at `index`.
    fn attr_at(&self, index: usize) -> Option<&dyn Nested>;

    /// Returns `true` if an attribute called `name` exists.
    #[inline]
    fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Returns an iterator over `(name, value)` pairs.
    #[inline]
    fn iter_attrs(&self) -> ObjectAttrIter<'_>
    where
        Self: Sized,
    {
        ObjectAttrIter::new(self)
    }
}

impl dyn Object {
    /// Returns an iterator over `(name, value)` pairs.
    #[inline]
    pub fn attrs(&self) -> ObjectAttrIter<'_> {
        ObjectAttrIter::new(self)
    }
}

// -----------------------------------------------------------------------------
// Iterator

/// An iterator over the attributes of an [`Object`].
pub struct ObjectAttrIter<'a> {
    object: &'a dyn Object,
    index: usize,
}

impl<'a> ObjectAttrIter<'a> {
    /// Creates a new iterator starting at the first attribute.
    #[inline(always)]
    pub const fn new(object: &'a dyn Object) -> Self {
        Self { object, index: 0 }
    }
}

impl<'a> Iterator for ObjectAttrIter<'a> {
    type Item = (&'a str, &'a dyn Nested);

    fn next(&mut self) -> Option<Self::Item> {
        let name = self.object.name_at(self.index)?;
        let value = self.object.attr_at(self.index)?;
        self.index += 1;
        Some((name, value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.object.attr_len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ObjectAttrIter<'_> {}

// -----------------------------------------------------------------------------
// Dynamic Object

/// An open attribute namespace.
///
/// Attributes keep their insertion order, can hold values of any
/// [`Nested`] type and can be created or replaced with any type on write.
///
/// # Examples
///
/// ```
/// use mu_nested::{Nested, ops::{DynamicObject, Object}};
///
/// let mut obj = DynamicObject::new();
/// obj.extend("x", 5_i64);
///
/// obj.set_attr("y", Box::new(String::from("new"))).unwrap();
/// obj.set_attr("x", Box::new(true)).unwrap();
///
/// assert_eq!(obj.attr_len(), 2);
/// assert_eq!(obj.attr("x").and_then(<dyn Nested>::downcast_ref::<bool>), Some(&true));
/// ```
#[derive(Default)]
pub struct DynamicObject {
    attrs: Entries,
}

impl DynamicObject {
    /// Creates an empty `DynamicObject`.
    #[inline]
    pub fn new() -> Self {
        Self {
            attrs: Entries::new(),
        }
    }

    /// Inserts or replaces an attribute.
    ///
    /// Returns `self` for chaining.
    ///
    /// # Examples
    ///
    /// ```
    /// use mu_nested::ops::{DynamicObject, Object};
    ///
    /// let mut obj = DynamicObject::new();
    /// obj.extend("a", 1_u8).extend("b", 2_u8);
    /// assert_eq!(obj.attr_len(), 2);
    /// ```
    #[inline]
    pub fn extend(&mut self, name: &str, value: impl IntoNested) -> &mut Self {
        self.attrs.insert(name, value.into_nested());
        self
    }

    /// Removes an attribute, returning its value.
    #[inline]
    pub fn remove_attr(&mut self, name: &str) -> Option<Box<dyn Nested>> {
        self.attrs.remove(name)
    }
}

impl<S: AsRef<str>, V: IntoNested> FromIterator<(S, V)> for DynamicObject {
    fn from_iter<I: IntoIterator<Item = (S, V)>>(attrs: I) -> Self {
        let mut obj = Self::new();
        for (name, value) in attrs {
            obj.extend(name.as_ref(), value);
        }
        obj
    }
}

impl Nested for DynamicObject {
    #[inline]
    fn nested_ref(&self) -> NestedRef<'_> {
        NestedRef::Object(self)
    }

    #[inline]
    fn nested_mut(&mut self) -> NestedMut<'_> {
        NestedMut::Object(self)
    }
}

impl Object for DynamicObject {
    #[inline]
    fn attr(&self, name: &str) -> Option<&dyn Nested> {
        self.attrs.get(name)
    }

    #[inline]
    fn attr_mut(&mut self, name: &str) -> Option<&mut dyn Nested> {
        self.attrs.get_mut(name)
    }

    #[inline]
    fn set_attr(&mut self, name: &str, value: Box<dyn Nested>) -> Result<(), WriteError> {
        self.attrs.insert(name, value);
        Ok(())
    }

    #[inline]
    fn attr_len(&self) -> usize {
        self.attrs.len()
    }

    #[inline]
    fn name_at(&self, index: usize) -> Option<&str> {
        self.attrs.key_at(index)
    }

    #[inline]
    fn attr_at(&self, index: usize) -> Option<&dyn Nested> {
        self.attrs.value_at(index)
    }
}

impl fmt::Debug for DynamicObject {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.nested_debug(f)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{DynamicObject, Object};
    use alloc::boxed::Box;
    use alloc::format;
    use alloc::vec::Vec;

    #[test]
    fn attrs_iterate_in_insertion_order() {
        let obj: DynamicObject = [("z", 1_i32), ("a", 2), ("m", 3)].into_iter().collect();
        let names: Vec<&str> = obj.iter_attrs().map(|(name, _)| name).collect();
        assert_eq!(names, ["z", "a", "m"]);
        assert_eq!(obj.iter_attrs().len(), 3);
    }

    #[test]
    fn set_attr_replaces_with_any_type() {
        let mut obj = DynamicObject::new();
        obj.extend("x", 1_i32);
        obj.set_attr("x", Box::new("text")).unwrap();

        let value = obj.attr("x").unwrap();
        assert_eq!(value.downcast_ref::<&str>(), Some(&"text"));
        assert!(obj.remove_attr("x").is_some());
        assert!(!obj.has_attr("x"));
    }

    #[test]
    fn debug_lists_attrs() {
        let mut obj = DynamicObject::new();
        obj.extend("x", 5_i32).extend("y", true);
        assert_eq!(format!("{obj:?}"), "DynamicObject { x: 5, y: true }");
    }
}
