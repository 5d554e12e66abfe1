use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::ops::{NestedMut, NestedRef, WriteError};
use crate::{IntoNested, Nested};

// -----------------------------------------------------------------------------
// Sequence

/// An ordered collection, reached with `#index`.
///
/// Implemented for [`DynamicList`], `Vec<T>`, `VecDeque<T>` and `[T; N]`.
///
/// Positions are plain `usize` here; negative path indexes are resolved
/// against [`len`](Sequence::len) before these methods are called.
///
/// # Examples
///
/// ```
/// use mu_nested::{Nested, ops::Sequence};
///
/// let mut list = vec![5_i32, 3];
/// Sequence::set(&mut list, 1, Box::new(4_i32)).unwrap();
///
/// assert_eq!(list, [5, 4]);
/// assert_eq!(Sequence::get(&list, 0).and_then(<dyn Nested>::downcast_ref::<i32>), Some(&5));
/// assert!(Sequence::set(&mut list, 2, Box::new(0_i32)).is_err());
/// ```
pub trait Sequence: Nested {
    /// Returns a reference to the element at `index`.
    fn get(&self, index: usize) -> Option<&dyn Nested>;

    /// Returns a mutable reference to the element at `index`.
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Nested>;

    /// Replaces the element at `index` with `value`.
    ///
    /// The index must already exist ([`WriteError::IndexOutOfRange`]);
    /// typed sequences reject values of another type with
    /// [`WriteError::MismatchedType`].
    fn set(&mut self, index: usize, value: Box<dyn Nested>) -> Result<(), WriteError>;

    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns `true` if the sequence has no elements.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over the elements.
    #[inline]
    fn iter_items(&self) -> SequenceItemIter<'_>
    where
        Self: Sized,
    {
        SequenceItemIter::new(self)
    }
}

impl dyn Sequence {
    /// Returns an iterator over the elements.
    #[inline]
    pub fn items(&self) -> SequenceItemIter<'_> {
        SequenceItemIter::new(self)
    }
}

/// Returns the error for writing at `index` into a sequence of length `len`.
#[inline]
pub(crate) fn out_of_range(index: usize, len: usize) -> WriteError {
    WriteError::IndexOutOfRange { index, len }
}

// -----------------------------------------------------------------------------
// Iterator

/// An iterator over the elements of a [`Sequence`].
pub struct SequenceItemIter<'a> {
    sequence: &'a dyn Sequence,
    index: usize,
}

impl<'a> SequenceItemIter<'a> {
    /// Creates a new iterator starting at the first element.
    #[inline(always)]
    pub const fn new(sequence: &'a dyn Sequence) -> Self {
        Self { sequence, index: 0 }
    }
}

impl<'a> Iterator for SequenceItemIter<'a> {
    type Item = &'a dyn Nested;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.sequence.get(self.index)?;
        self.index += 1;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.sequence.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SequenceItemIter<'_> {}

// -----------------------------------------------------------------------------
// Dynamic List

/// A list holding values of any [`Nested`] type.
///
/// Writes replace the element with a value of any type.
///
/// # Examples
///
/// ```
/// use mu_nested::{Nested, ops::{DynamicList, Sequence}};
///
/// let mut list = DynamicList::new();
/// list.extend(5_i64).extend("three");
///
/// list.set(1, Box::new(3_i64)).unwrap();
/// assert_eq!(list.get(1).and_then(<dyn Nested>::downcast_ref::<i64>), Some(&3));
/// ```
#[derive(Default)]
pub struct DynamicList {
    values: Vec<Box<dyn Nested>>,
}

impl DynamicList {
    /// Creates an empty `DynamicList`.
    #[inline]
    pub const fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Creates an empty `DynamicList` with at least the specified capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    /// Appends a value to the end of the list.
    ///
    /// Returns `self` for chaining.
    #[inline]
    pub fn extend(&mut self, value: impl IntoNested) -> &mut Self {
        self.values.push(value.into_nested());
        self
    }

    /// Removes the last element and returns it.
    #[inline]
    pub fn pop(&mut self) -> Option<Box<dyn Nested>> {
        self.values.pop()
    }
}

impl<V: IntoNested> FromIterator<V> for DynamicList {
    fn from_iter<I: IntoIterator<Item = V>>(values: I) -> Self {
        Self {
            values: values.into_iter().map(IntoNested::into_nested).collect(),
        }
    }
}

impl Nested for DynamicList {
    #[inline]
    fn nested_ref(&self) -> NestedRef<'_> {
        NestedRef::Sequence(self)
    }

    #[inline]
    fn nested_mut(&mut self) -> NestedMut<'_> {
        NestedMut::Sequence(self)
    }
}

impl Sequence for DynamicList {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Nested> {
        self.values.as_slice().get(index).map(|value| &**value)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Nested> {
        self.values
            .as_mut_slice()
            .get_mut(index)
            .map(|value| &mut **value)
    }

    fn set(&mut self, index: usize, value: Box<dyn Nested>) -> Result<(), WriteError> {
        let len = self.values.len();
        match self.values.as_mut_slice().get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(out_of_range(index, len)),
        }
    }

    #[inline]
    fn len(&self) -> usize {
        self.values.len()
    }
}

impl fmt::Debug for DynamicList {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.nested_debug(f)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{DynamicList, Sequence};
    use crate::ops::WriteError;
    use alloc::boxed::Box;
    use alloc::format;

    #[test]
    fn set_requires_existing_index() {
        let mut list: DynamicList = [1_i32, 2].into_iter().collect();
        assert_eq!(
            list.set(2, Box::new(3_i32)),
            Err(WriteError::IndexOutOfRange { index: 2, len: 2 })
        );
        assert!(list.set(1, Box::new("two")).is_ok());
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn items_and_debug() {
        let mut list = DynamicList::with_capacity(2);
        list.extend(1_u8).extend(true);
        assert_eq!(list.iter_items().count(), 2);
        assert_eq!(format!("{list:?}"), "[1, true]");
        assert!(list.pop().is_some());
        assert!(!list.is_empty());
    }
}
