use alloc::boxed::Box;
use alloc::string::String;
use core::hash::BuildHasher;

use mu_utils::hash::hashbrown;

use crate::Nested;
use crate::ops::{Mapping, NestedMut, NestedRef, WriteError, take_value};

macro_rules! impl_nested_hash_map {
    ($map:ident) => {
        impl<V: Nested, S: BuildHasher + 'static> Nested for $map<String, V, S> {
            #[inline]
            fn nested_ref(&self) -> NestedRef<'_> {
                NestedRef::Mapping(self)
            }

            #[inline]
            fn nested_mut(&mut self) -> NestedMut<'_> {
                NestedMut::Mapping(self)
            }
        }

        impl<V: Nested, S: BuildHasher + 'static> Mapping for $map<String, V, S> {
            #[inline]
            fn get(&self, key: &str) -> Option<&dyn Nested> {
                $map::get(self, key).map(|value| value as &dyn Nested)
            }

            #[inline]
            fn get_mut(&mut self, key: &str) -> Option<&mut dyn Nested> {
                $map::get_mut(self, key).map(|value| value as &mut dyn Nested)
            }

            fn insert(
                &mut self,
                key: &str,
                value: Box<dyn Nested>,
            ) -> Result<Option<Box<dyn Nested>>, WriteError> {
                let value = take_value::<V>(value)?;
                Ok($map::insert(self, String::from(key), value).map(|old| old.into_boxed_nested()))
            }

            #[inline]
            fn len(&self) -> usize {
                $map::len(self)
            }

            fn iter(&self) -> Box<dyn Iterator<Item = (&str, &dyn Nested)> + '_> {
                Box::new($map::iter(self).map(|(key, value)| (key.as_str(), value as &dyn Nested)))
            }
        }
    };
}

use hashbrown::HashMap as HashbrownMap;

impl_nested_hash_map!(HashbrownMap);

#[cfg(feature = "std")]
use std::collections::HashMap as StdHashMap;

#[cfg(feature = "std")]
impl_nested_hash_map!(StdHashMap);

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::ops::{Mapping, WriteError};
    use crate::Nested;
    use alloc::boxed::Box;
    use alloc::string::String;
    use mu_utils::hash::HashMap;

    #[test]
    fn hashbrown_map_entries() {
        let mut map: HashMap<String, i32> = HashMap::default();
        assert!(Mapping::insert(&mut map, "a", Box::new(1_i32)).unwrap().is_none());
        assert_eq!(Mapping::get(&map, "a").and_then(<dyn Nested>::downcast_ref::<i32>), Some(&1));
        assert_eq!(Mapping::len(&map), 1);
        assert!(matches!(
            Mapping::insert(&mut map, "b", Box::new("two")),
            Err(WriteError::MismatchedType { .. })
        ));
        assert!(!Mapping::contains_key(&map, "b"));
    }

    #[cfg(feature = "std")]
    #[test]
    fn std_map_entries() {
        let mut map = std::collections::HashMap::<String, u8>::new();
        map.insert(String::from("k"), 4);
        let value = Mapping::get_mut(&mut map, "k").and_then(<dyn Nested>::downcast_mut::<u8>);
        *value.unwrap() += 1;
        assert_eq!(map["k"], 5);
    }
}
