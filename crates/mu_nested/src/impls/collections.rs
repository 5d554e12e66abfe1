use alloc::boxed::Box;
use alloc::collections::{BTreeMap, VecDeque};
use alloc::string::String;
use alloc::vec::Vec;

use crate::Nested;
use crate::ops::{Mapping, NestedMut, NestedRef, Sequence, WriteError, out_of_range, take_value};

// -----------------------------------------------------------------------------
// Sequences

impl<T: Nested> Nested for Vec<T> {
    #[inline]
    fn nested_ref(&self) -> NestedRef<'_> {
        NestedRef::Sequence(self)
    }

    #[inline]
    fn nested_mut(&mut self) -> NestedMut<'_> {
        NestedMut::Sequence(self)
    }
}

impl<T: Nested> Sequence for Vec<T> {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Nested> {
        self.as_slice().get(index).map(|value| value as &dyn Nested)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Nested> {
        self.as_mut_slice()
            .get_mut(index)
            .map(|value| value as &mut dyn Nested)
    }

    fn set(&mut self, index: usize, value: Box<dyn Nested>) -> Result<(), WriteError> {
        let len = Vec::len(self);
        let slot = self
            .as_mut_slice()
            .get_mut(index)
            .ok_or(out_of_range(index, len))?;
        *slot = take_value::<T>(value)?;
        Ok(())
    }

    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }
}

impl<T: Nested> Nested for VecDeque<T> {
    #[inline]
    fn nested_ref(&self) -> NestedRef<'_> {
        NestedRef::Sequence(self)
    }

    #[inline]
    fn nested_mut(&mut self) -> NestedMut<'_> {
        NestedMut::Sequence(self)
    }
}

impl<T: Nested> Sequence for VecDeque<T> {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Nested> {
        VecDeque::get(self, index).map(|value| value as &dyn Nested)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Nested> {
        VecDeque::get_mut(self, index).map(|value| value as &mut dyn Nested)
    }

    fn set(&mut self, index: usize, value: Box<dyn Nested>) -> Result<(), WriteError> {
        let len = VecDeque::len(self);
        let slot = VecDeque::get_mut(self, index).ok_or(out_of_range(index, len))?;
        *slot = take_value::<T>(value)?;
        Ok(())
    }

    #[inline]
    fn len(&self) -> usize {
        VecDeque::len(self)
    }
}

impl<T: Nested, const N: usize> Nested for [T; N] {
    #[inline]
    fn nested_ref(&self) -> NestedRef<'_> {
        NestedRef::Sequence(self)
    }

    #[inline]
    fn nested_mut(&mut self) -> NestedMut<'_> {
        NestedMut::Sequence(self)
    }
}

impl<T: Nested, const N: usize> Sequence for [T; N] {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Nested> {
        self.as_slice().get(index).map(|value| value as &dyn Nested)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Nested> {
        self.as_mut_slice()
            .get_mut(index)
            .map(|value| value as &mut dyn Nested)
    }

    fn set(&mut self, index: usize, value: Box<dyn Nested>) -> Result<(), WriteError> {
        let slot = self
            .as_mut_slice()
            .get_mut(index)
            .ok_or(out_of_range(index, N))?;
        *slot = take_value::<T>(value)?;
        Ok(())
    }

    #[inline]
    fn len(&self) -> usize {
        N
    }
}

// -----------------------------------------------------------------------------
// Mappings

impl<V: Nested> Nested for BTreeMap<String, V> {
    #[inline]
    fn nested_ref(&self) -> NestedRef<'_> {
        NestedRef::Mapping(self)
    }

    #[inline]
    fn nested_mut(&mut self) -> NestedMut<'_> {
        NestedMut::Mapping(self)
    }
}

impl<V: Nested> Mapping for BTreeMap<String, V> {
    #[inline]
    fn get(&self, key: &str) -> Option<&dyn Nested> {
        BTreeMap::get(self, key).map(|value| value as &dyn Nested)
    }

    #[inline]
    fn get_mut(&mut self, key: &str) -> Option<&mut dyn Nested> {
        BTreeMap::get_mut(self, key).map(|value| value as &mut dyn Nested)
    }

    fn insert(
        &mut self,
        key: &str,
        value: Box<dyn Nested>,
    ) -> Result<Option<Box<dyn Nested>>, WriteError> {
        let value = take_value::<V>(value)?;
        Ok(BTreeMap::insert(self, String::from(key), value).map(|old| old.into_boxed_nested()))
    }

    #[inline]
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&str, &dyn Nested)> + '_> {
        Box::new(BTreeMap::iter(self).map(|(key, value)| (key.as_str(), value as &dyn Nested)))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::ops::{Mapping, Sequence, WriteError};
    use crate::Nested;
    use alloc::boxed::Box;
    use alloc::collections::{BTreeMap, VecDeque};
    use alloc::format;
    use alloc::string::String;
    use alloc::vec;

    #[test]
    fn typed_sequence_rejects_other_types() {
        let mut list = vec![1_i32, 2];
        let err = Sequence::set(&mut list, 0, Box::new(1_u64)).unwrap_err();
        assert!(matches!(err, WriteError::MismatchedType { expected: "i32", found: "u64" }));
        assert_eq!(list, [1, 2]);
    }

    #[test]
    fn array_and_deque() {
        let mut array = [0_u8; 3];
        Sequence::set(&mut array, 2, Box::new(7_u8)).unwrap();
        assert_eq!(array, [0, 0, 7]);
        assert_eq!(Sequence::len(&array), 3);
        assert_eq!(
            Sequence::set(&mut array, 3, Box::new(7_u8)),
            Err(WriteError::IndexOutOfRange { index: 3, len: 3 })
        );

        let mut deque = VecDeque::from([1_i64, 2]);
        deque.push_front(0);
        assert_eq!(Sequence::get(&deque, 0).and_then(<dyn Nested>::downcast_ref::<i64>), Some(&0));
    }

    #[test]
    fn btree_map_entries() {
        let mut map = BTreeMap::new();
        map.insert(String::from("b"), 2_i32);
        map.insert(String::from("a"), 1_i32);

        let old = Mapping::insert(&mut map, "a", Box::new(10_i32)).unwrap();
        assert_eq!(old.and_then(|old| old.take::<i32>().ok()), Some(1));
        assert_eq!(format!("{:?}", &map as &dyn Nested), r#"{"a": 10, "b": 2}"#);
    }
}
