use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::ops::{NestedMut, NestedRef};

// -----------------------------------------------------------------------------
// Kind

/// A pure enumeration of the capability a [`Nested`] value exposes.
///
/// See [`NestedRef`] and [`NestedMut`] for the borrowed forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NestedKind {
    /// Named attributes, reached with `.name`.
    Object,
    /// String keys, reached with `[name]`.
    Mapping,
    /// Integer positions, reached with `#index`.
    Sequence,
    /// A leaf value without any nested content.
    Opaque,
}

impl fmt::Display for NestedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object => f.write_str("object"),
            Self::Mapping => f.write_str("mapping"),
            Self::Sequence => f.write_str("sequence"),
            Self::Opaque => f.write_str("opaque value"),
        }
    }
}

// -----------------------------------------------------------------------------
// Nested

/// A value that can take part in path traversal.
///
/// Each implementation declares which capability it exposes through
/// [`nested_ref`] and [`nested_mut`]; path accessors match on that capability
/// instead of guessing from the concrete type.
///
/// - [`Object`]: attribute access, e.g. structs deriving [`Nested`](derive@crate::Nested)
///   or [`DynamicObject`].
/// - [`Mapping`]: string-keyed access, e.g. `BTreeMap<String, V>` or [`DynamicMap`].
/// - [`Sequence`]: integer-indexed access, e.g. `Vec<T>` or [`DynamicList`].
/// - Opaque: leaves such as numbers and strings.
///
/// # Examples
///
/// ```
/// use mu_nested::{Nested, NestedKind};
///
/// let list = vec![1_i32, 2, 3];
/// assert_eq!(list.nested_kind(), NestedKind::Sequence);
///
/// let value: &dyn Nested = &list;
/// assert_eq!(value.downcast_ref::<Vec<i32>>(), Some(&list));
/// ```
///
/// [`nested_ref`]: Nested::nested_ref
/// [`nested_mut`]: Nested::nested_mut
/// [`Object`]: crate::ops::Object
/// [`Mapping`]: crate::ops::Mapping
/// [`Sequence`]: crate::ops::Sequence
/// [`DynamicObject`]: crate::ops::DynamicObject
/// [`DynamicMap`]: crate::ops::DynamicMap
/// [`DynamicList`]: crate::ops::DynamicList
pub trait Nested: Any {
    /// Casts this type to a boxed nested value.
    #[inline(always)]
    fn into_boxed_nested(self) -> Box<dyn Nested>
    where
        Self: Sized,
    {
        Box::new(self)
    }

    /// Returns the name of the underlying type, used in error messages.
    #[inline]
    fn type_name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }

    /// Returns the [`TypeId`] of the underlying type.
    ///
    /// `Box<dyn Nested>::type_id` returns the id of the box itself,
    /// this method always returns the id of the boxed value.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Returns the capability of this value.
    #[inline]
    fn nested_kind(&self) -> NestedKind {
        self.nested_ref().kind()
    }

    /// Returns an immutable view of the capability of this value.
    fn nested_ref(&self) -> NestedRef<'_>;

    /// Returns a mutable view of the capability of this value.
    fn nested_mut(&mut self) -> NestedMut<'_>;

    /// Formats this value, used by the `Debug` impl of `dyn Nested`.
    ///
    /// Containers are printed through their capability; opaque values
    /// fall back to their type name unless the implementation overrides this.
    fn nested_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.nested_ref() {
            NestedRef::Object(obj) => crate::impls::object_debug(obj, f),
            NestedRef::Mapping(map) => crate::impls::mapping_debug(map, f),
            NestedRef::Sequence(seq) => crate::impls::sequence_debug(seq, f),
            NestedRef::Opaque(_) => f.write_str(self.type_name()),
        }
    }

    /// Compares this value with another one structurally.
    ///
    /// Returns `None` when the comparison is not supported, which is the
    /// default for opaque values.
    fn nested_partial_eq(&self, other: &dyn Nested) -> Option<bool> {
        match self.nested_ref() {
            NestedRef::Object(obj) => crate::impls::object_partial_eq(obj, other),
            NestedRef::Mapping(map) => crate::impls::mapping_partial_eq(map, other),
            NestedRef::Sequence(seq) => crate::impls::sequence_partial_eq(seq, other),
            NestedRef::Opaque(_) => None,
        }
    }
}

impl dyn Nested {
    /// Returns `true` if the underlying value is of type `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    /// Downcasts the value to type `T` by reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use mu_nested::Nested;
    ///
    /// let x: Box<dyn Nested> = 10_i32.into_boxed_nested();
    /// assert_eq!(x.downcast_ref::<i32>(), Some(&10));
    /// assert_eq!(x.downcast_ref::<u32>(), None);
    /// ```
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    /// Downcasts the value to type `T` by mutable reference.
    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }

    /// Downcasts the boxed value to `Box<T>`, giving the box back on failure.
    pub fn downcast<T: Any>(self: Box<dyn Nested>) -> Result<Box<T>, Box<dyn Nested>> {
        if self.is::<T>() {
            let any: Box<dyn Any> = self;
            Ok(any
                .downcast::<T>()
                .unwrap_or_else(|_| unreachable!("type id was checked above")))
        } else {
            Err(self)
        }
    }

    /// Moves the value out of the box as type `T`, giving the box back on failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use mu_nested::Nested;
    ///
    /// let x: Box<dyn Nested> = String::from("hi").into_boxed_nested();
    /// let x = x.take::<i32>().unwrap_err();
    /// assert_eq!(x.take::<String>().unwrap(), "hi");
    /// ```
    #[inline]
    pub fn take<T: Any>(self: Box<dyn Nested>) -> Result<T, Box<dyn Nested>> {
        self.downcast::<T>().map(|value| *value)
    }

    /// Structural equality, see [`Nested::nested_partial_eq`].
    #[inline]
    pub fn nested_eq(&self, other: &dyn Nested) -> bool {
        self.nested_partial_eq(other).unwrap_or(false)
    }
}

impl fmt::Debug for dyn Nested {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.nested_debug(f)
    }
}

// -----------------------------------------------------------------------------
// Conversion

/// A value that can be written through a path.
///
/// Implemented for every [`Nested`] type and for `Box<dyn Nested>`,
/// so callers can pass either a plain value or an already boxed one.
pub trait IntoNested {
    /// Converts this into a boxed nested value.
    fn into_nested(self) -> Box<dyn Nested>;
}

impl<T: Nested> IntoNested for T {
    #[inline]
    fn into_nested(self) -> Box<dyn Nested> {
        Box::new(self)
    }
}

impl IntoNested for Box<dyn Nested> {
    #[inline]
    fn into_nested(self) -> Box<dyn Nested> {
        self
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{IntoNested, Nested, NestedKind};
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::vec;

    #[test]
    fn kind_of_std_values() {
        assert_eq!(5_i64.nested_kind(), NestedKind::Opaque);
        assert_eq!(vec![1_u8].nested_kind(), NestedKind::Sequence);
        assert_eq!(alloc::format!("{}", NestedKind::Mapping), "mapping");
    }

    #[test]
    fn take_gives_back_on_mismatch() {
        let value: Box<dyn Nested> = 3_u32.into_nested();
        let value = value.take::<String>().unwrap_err();
        assert!(value.is::<u32>());
        assert_eq!(value.take::<u32>().ok(), Some(3));
    }

    #[test]
    fn boxed_value_is_not_boxed_twice() {
        let boxed: Box<dyn Nested> = Box::new(1_i8);
        let again = boxed.into_nested();
        assert!(again.is::<i8>());
    }
}
