//! Provide multi-layer path accessing support

use alloc::boxed::Box;
use core::any::Any;
use core::fmt;
use core::str::FromStr;

use mu_utils::vec::FastVec;

use crate::access::{AccessError, AccessPath, Accessor, OffsetAccessor, ParseError};
use crate::{IntoNested, Nested};

// -----------------------------------------------------------------------------
// Error

/// An error returned from a failed path access.
///
/// Parse errors are reported before the value is touched, so a failed
/// [`set`] or [`update`] never leaves a partial write behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError<'a> {
    /// A path string that could not be parsed.
    /// See [`ParseError`] for details.
    Parse(ParseError<'a>),
    /// Access failed after parsing.
    /// See [`AccessError`] for details.
    Access(AccessError<'a>),
    /// The value at the path is not of the requested type.
    InvalidDowncast,
}

impl fmt::Display for PathError<'_> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => fmt::Display::fmt(err, f),
            Self::Access(err) => fmt::Display::fmt(err, f),
            Self::InvalidDowncast => {
                f.write_str("can't downcast the result of access to the given type")
            }
        }
    }
}

impl core::error::Error for PathError<'_> {}

impl<'a> From<ParseError<'a>> for PathError<'a> {
    #[inline]
    fn from(value: ParseError<'a>) -> Self {
        Self::Parse(value)
    }
}

impl<'a> From<AccessError<'a>> for PathError<'a> {
    #[inline]
    fn from(value: AccessError<'a>) -> Self {
        Self::Access(value)
    }
}

impl PathError<'_> {
    /// Converts this into an "owned" value.
    pub fn into_owned(self) -> PathError<'static> {
        match self {
            Self::Parse(err) => PathError::Parse(err.into_owned()),
            Self::Access(err) => PathError::Access(err.into_owned()),
            Self::InvalidDowncast => PathError::InvalidDowncast,
        }
    }
}

// -----------------------------------------------------------------------------
// Traversal

/// Drains the parser, so that no value is touched if any segment is invalid.
fn collect_accessors<'a>(
    path: &impl AccessPath<'a>,
) -> Result<Box<[OffsetAccessor<'a>]>, ParseError<'a>> {
    let mut vec: FastVec<OffsetAccessor<'a>, 8> = FastVec::new();
    let data = vec.data();

    for res in path.parse_to_accessor() {
        data.push(res?);
    }

    Ok(vec.into_boxed_slice())
}

#[inline(never)]
fn walk<'r, 'a>(
    root: &'r dyn Nested,
    accessors: &[OffsetAccessor<'a>],
) -> Result<&'r dyn Nested, AccessError<'a>> {
    let mut it = root;
    for accessor in accessors {
        it = accessor.access(it)?;
    }
    Ok(it)
}

#[inline(never)]
fn walk_mut<'r, 'a>(
    root: &'r mut dyn Nested,
    accessors: &[OffsetAccessor<'a>],
) -> Result<&'r mut dyn Nested, AccessError<'a>> {
    let mut it = root;
    for accessor in accessors {
        it = accessor.access_mut(it)?;
    }
    Ok(it)
}

/// Splits a parsed path into its parent segments and its final segment.
#[inline]
fn split_last<'p, 'a>(
    accessors: &'p [OffsetAccessor<'a>],
) -> (&'p [OffsetAccessor<'a>], &'p OffsetAccessor<'a>) {
    let (last, parents) = accessors
        .split_last()
        .expect("a parsed path is never empty");
    (parents, last)
}

#[inline(never)]
fn write<'a>(
    root: &mut dyn Nested,
    accessors: &[OffsetAccessor<'a>],
    value: Box<dyn Nested>,
) -> Result<(), AccessError<'a>> {
    let (parents, last) = split_last(accessors);
    let parent = walk_mut(root, parents)?;
    last.write(parent, value)
}

fn update_with<'a, V: IntoNested>(
    root: &mut dyn Nested,
    accessors: &[OffsetAccessor<'a>],
    transform: impl FnOnce(UpdateContext<'_>) -> V,
) -> Result<(), AccessError<'a>> {
    let (parents, last) = split_last(accessors);
    let parent = walk_mut(root, parents)?;

    let value = {
        let parent: &dyn Nested = parent;
        let ctx = UpdateContext {
            value: last.access(parent)?,
            accessor: &last.accessor,
            parent,
        };
        log::trace!("updating `{}` in `{}`", last.accessor, parent.type_name());
        transform(ctx).into_nested()
    };

    last.write(parent, value)
}

// -----------------------------------------------------------------------------
// Update context

/// What an [`update`] transform gets to see.
///
/// All references are shared, so the parent can not change while the
/// transform runs.
#[derive(Debug, Clone, Copy)]
pub struct UpdateContext<'a> {
    /// The current value at the path.
    pub value: &'a dyn Nested,
    /// The final accessor of the path, which reached `value` from `parent`.
    pub accessor: &'a Accessor<'a>,
    /// The container holding `value`.
    pub parent: &'a dyn Nested,
}

impl<'a> UpdateContext<'a> {
    /// Returns the current value as a `T`, if it is one.
    #[inline]
    pub fn value_as<T: Any>(&self) -> Option<&'a T> {
        self.value.downcast_ref::<T>()
    }
}

// -----------------------------------------------------------------------------
// Once multi-layer accessing

/// Returns a reference to the value at `path`.
///
/// The path is parsed completely before `root` is accessed.
///
/// # Examples
///
/// ```
/// use mu_nested::{Nested, access};
/// use mu_nested::ops::DynamicMap;
///
/// let mut inner = DynamicMap::new();
/// inner.extend("y", 6_i32);
/// let mut root = DynamicMap::new();
/// root.extend("x", inner);
///
/// let value = access::get(&root, "[x][y]").unwrap();
/// assert_eq!(value.downcast_ref::<i32>(), Some(&6));
///
/// let err = access::get(&root, "[x][z]").unwrap_err();
/// assert!(matches!(err, access::PathError::Access(_)));
/// ```
pub fn get<'r, 'a>(
    root: &'r dyn Nested,
    path: impl AccessPath<'a>,
) -> Result<&'r dyn Nested, PathError<'a>> {
    let accessors = collect_accessors(&path)?;
    Ok(walk(root, &accessors)?)
}

/// Returns a mutable reference to the value at `path`.
pub fn get_mut<'r, 'a>(
    root: &'r mut dyn Nested,
    path: impl AccessPath<'a>,
) -> Result<&'r mut dyn Nested, PathError<'a>> {
    let accessors = collect_accessors(&path)?;
    Ok(walk_mut(root, &accessors)?)
}

/// Returns a typed reference to the value at `path`.
///
/// # Examples
///
/// ```
/// use mu_nested::access;
///
/// let root = vec![vec![1_u8, 2], vec![3]];
/// assert_eq!(access::get_as::<u8>(&root, "#0#-1"), Ok(&2));
/// assert_eq!(access::get_as::<u16>(&root, "#1#0"), Err(access::PathError::InvalidDowncast));
/// ```
#[inline]
pub fn get_as<'r, 'a, T: Any>(
    root: &'r dyn Nested,
    path: impl AccessPath<'a>,
) -> Result<&'r T, PathError<'a>> {
    get(root, path)?
        .downcast_ref::<T>()
        .ok_or(PathError::InvalidDowncast)
}

/// Returns a mutable typed reference to the value at `path`.
///
/// # Examples
///
/// ```
/// use mu_nested::access;
///
/// let mut root = vec![[1_i32, 2], [3, 4]];
/// *access::get_mut_as::<i32>(&mut root, "#1#0").unwrap() += 10;
/// assert_eq!(root[1], [13, 4]);
/// ```
#[inline]
pub fn get_mut_as<'r, 'a, T: Any>(
    root: &'r mut dyn Nested,
    path: impl AccessPath<'a>,
) -> Result<&'r mut T, PathError<'a>> {
    get_mut(root, path)?
        .downcast_mut::<T>()
        .ok_or(PathError::InvalidDowncast)
}

/// Writes `value` at `path`.
///
/// Every segment but the last is walked, then the last one writes into its
/// parent: attributes may be created by open objects, keys are inserted if
/// missing and indexes must already exist.
///
/// # Examples
///
/// ```
/// use mu_nested::access;
/// use mu_nested::ops::{DynamicList, DynamicObject};
///
/// let mut root = DynamicObject::new();
/// root.extend("items", DynamicList::from_iter([1_i32, 2]));
///
/// access::set(&mut root, ".items#-1", 5_i32).unwrap();
/// access::set(&mut root, ".count", 2_usize).unwrap();
///
/// assert_eq!(access::get_as::<i32>(&root, ".items#1"), Ok(&5));
/// assert_eq!(access::get_as::<usize>(&root, ".count"), Ok(&2));
/// assert!(access::set(&mut root, ".items#2", 0_i32).is_err());
/// ```
pub fn set<'a>(
    root: &mut dyn Nested,
    path: impl AccessPath<'a>,
    value: impl IntoNested,
) -> Result<(), PathError<'a>> {
    let accessors = collect_accessors(&path)?;
    Ok(write(root, &accessors, value.into_nested())?)
}

/// Replaces the value at `path` with the result of `transform`.
///
/// The value must already exist. The result is written as in [`set`].
///
/// # Examples
///
/// ```
/// use mu_nested::access;
/// use mu_nested::ops::DynamicObject;
///
/// let mut root = DynamicObject::new();
/// root.extend("x", 5_i64);
///
/// access::update(&mut root, ".x", |ctx| ctx.value_as::<i64>().copied().unwrap_or(0) + 3).unwrap();
/// assert_eq!(access::get_as::<i64>(&root, ".x"), Ok(&8));
/// ```
pub fn update<'a, V: IntoNested>(
    root: &mut dyn Nested,
    path: impl AccessPath<'a>,
    transform: impl FnOnce(UpdateContext<'_>) -> V,
) -> Result<(), PathError<'a>> {
    let accessors = collect_accessors(&path)?;
    Ok(update_with(root, &accessors, transform)?)
}

// -----------------------------------------------------------------------------
// Reusable Multi-layer accessor

/// Reusable path accessor, a thin wrapper over `Box<[OffsetAccessor]>`.
///
/// [`OffsetAccessor`] and [`Accessor`] only reach a single level,
/// while this type holds a complete, non-empty path.
///
/// Unlike the free functions of this module, this container parses the path
/// string only once. For non-static strings, it requires copying for storage.
///
/// # Examples
///
/// ```
/// use mu_nested::access::PathAccessor;
///
/// let mut data = vec![vec![1_u8, 2, 3], vec![4]];
///
/// let accessor = PathAccessor::parse_static("#0#2").unwrap();
/// assert_eq!(accessor.get_as::<u8>(&data), Ok(&3));
///
/// data[0] = vec![10, 11, 12];
/// assert_eq!(accessor.get_as::<u8>(&data), Ok(&12));
///
/// accessor.set(&mut data, 20_u8).unwrap();
/// assert_eq!(data[0], [10, 11, 20]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PathAccessor(Box<[OffsetAccessor<'static>]>);

impl PathAccessor {
    /// Parses the path string and creates a [`PathAccessor`].
    /// Returns [`ParseError`] if parsing fails.
    ///
    /// This function will create a [`String`] for each path segment.
    /// For `&'static str`, consider using [`parse_static`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use mu_nested::access::PathAccessor;
    /// let s = String::from(".field#1[key]");
    /// let accessor = PathAccessor::parse(s.as_str()).unwrap();
    /// assert_eq!(accessor.len(), 3);
    /// ```
    ///
    /// [`String`]: alloc::string::String
    /// [`parse_static`]: PathAccessor::parse_static
    pub fn parse<'a>(path: impl AccessPath<'a>) -> Result<Self, ParseError<'a>> {
        let mut vec: FastVec<OffsetAccessor, 8> = FastVec::new();
        let data = vec.data();

        for res in path.parse_to_accessor() {
            data.push(res?.into_owned());
        }

        Ok(Self(vec.into_boxed_slice()))
    }

    /// Parses the path and creates a [`PathAccessor`].
    /// Returns [`ParseError`] if parsing fails.
    ///
    /// Stores string references without creating additional [`String`]s.
    ///
    /// [`String`]: alloc::string::String
    pub fn parse_static(path: impl AccessPath<'static>) -> Result<Self, ParseError<'static>> {
        Ok(Self(collect_accessors(&path)?))
    }

    /// Returns the number of segments, which is never zero.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mu_nested::access::PathAccessor;
    /// let accessor = PathAccessor::parse_static(".data#0[3]").unwrap();
    /// assert_eq!(accessor.len(), 3);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the parsed segments in traversal order.
    #[inline]
    pub fn accessors(&self) -> &[OffsetAccessor<'static>] {
        &self.0
    }

    /// Returns a reference to the value specified by this path.
    #[inline]
    pub fn get<'r>(&self, root: &'r dyn Nested) -> Result<&'r dyn Nested, PathError<'static>> {
        Ok(walk(root, &self.0)?)
    }

    /// Returns a mutable reference to the value specified by this path.
    #[inline]
    pub fn get_mut<'r>(
        &self,
        root: &'r mut dyn Nested,
    ) -> Result<&'r mut dyn Nested, PathError<'static>> {
        Ok(walk_mut(root, &self.0)?)
    }

    /// Returns a typed reference to the value specified by this path.
    #[inline]
    pub fn get_as<'r, T: Any>(&self, root: &'r dyn Nested) -> Result<&'r T, PathError<'static>> {
        self.get(root)?
            .downcast_ref::<T>()
            .ok_or(PathError::InvalidDowncast)
    }

    /// Returns a mutable typed reference to the value specified by this path.
    #[inline]
    pub fn get_mut_as<'r, T: Any>(
        &self,
        root: &'r mut dyn Nested,
    ) -> Result<&'r mut T, PathError<'static>> {
        self.get_mut(root)?
            .downcast_mut::<T>()
            .ok_or(PathError::InvalidDowncast)
    }

    /// Writes `value` at this path, see [`set`].
    #[inline]
    pub fn set(&self, root: &mut dyn Nested, value: impl IntoNested) -> Result<(), PathError<'static>> {
        Ok(write(root, &self.0, value.into_nested())?)
    }

    /// Replaces the value at this path with the result of `transform`, see [`update`].
    #[inline]
    pub fn update<V: IntoNested>(
        &self,
        root: &mut dyn Nested,
        transform: impl FnOnce(UpdateContext<'_>) -> V,
    ) -> Result<(), PathError<'static>> {
        Ok(update_with(root, &self.0, transform)?)
    }

    /// Concat two `PathAccessor`.
    ///
    /// Note that this will not modify the `offset`,
    /// so the error message may not be as expected.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mu_nested::access::PathAccessor;
    /// let a1 = PathAccessor::parse_static("[x]#1").unwrap();
    /// let a2 = PathAccessor::parse_static(".y").unwrap();
    /// let a = a1.concat(a2);
    /// assert_eq!(a.len(), 3);
    /// assert_eq!(a.to_string(), "[x]#1.y");
    /// ```
    pub fn concat(self, other: PathAccessor) -> Self {
        let mut vec: FastVec<OffsetAccessor, 12> = FastVec::new();
        let data = vec.data();
        data.extend(self.0);
        data.extend(other.0);
        Self(vec.into_boxed_slice())
    }
}

impl fmt::Display for PathAccessor {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for it in &self.0 {
            fmt::Display::fmt(&it.accessor, f)?;
        }
        Ok(())
    }
}

impl FromStr for PathAccessor {
    type Err = ParseError<'static>;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).map_err(ParseError::into_owned)
    }
}

// -----------------------------------------------------------------------------
// Serde

#[cfg(feature = "serde")]
mod serde_impls {
    use alloc::string::String;
    use core::fmt;

    use serde_core::de::{Error, Visitor};
    use serde_core::{Deserialize, Deserializer, Serialize, Serializer};

    use super::PathAccessor;

    impl Serialize for PathAccessor {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }

    struct PathAccessorVisitor;

    impl<'de> Visitor<'de> for PathAccessorVisitor {
        type Value = PathAccessor;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a nested path string")
        }

        fn visit_str<E: Error>(self, v: &str) -> Result<Self::Value, E> {
            PathAccessor::parse(v).map_err(E::custom)
        }

        fn visit_string<E: Error>(self, v: String) -> Result<Self::Value, E> {
            self.visit_str(&v)
        }
    }

    impl<'de> Deserialize<'de> for PathAccessor {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_str(PathAccessorVisitor)
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{PathAccessor, PathError, get, get_as, get_mut_as, set, update};
    use crate::access::{AccessErrorKind, Accessor, AccessorKind, ParseErrorKind};
    use crate::ops::{DynamicList, DynamicMap, DynamicObject};
    use crate::NestedKind;
    use alloc::string::{String, ToString};
    use alloc::vec;
    use alloc::vec::Vec;

    /// `{"x": [5, [Obj(y={"z": 9})]]}`
    fn sample() -> DynamicMap {
        let mut z = DynamicMap::new();
        z.extend("z", 9_i64);

        let mut obj = DynamicObject::new();
        obj.extend("y", z);

        let inner: DynamicList = [obj].into_iter().collect();
        let mut list = DynamicList::new();
        list.extend(5_i64).extend(inner);

        let mut root = DynamicMap::new();
        root.extend("x", list);
        root
    }

    fn access_kind(err: PathError<'_>) -> AccessErrorKind {
        match err {
            PathError::Access(err) => err.kind().clone(),
            other => panic!("expected an access error, found {other:?}"),
        }
    }

    fn parse_kind(err: PathError<'_>) -> ParseErrorKind {
        match err {
            PathError::Parse(err) => err.kind,
            other => panic!("expected a parse error, found {other:?}"),
        }
    }

    #[test]
    fn reads_each_accessor_kind() {
        let mut obj = DynamicObject::new();
        obj.extend("x", 5_i32);
        assert_eq!(get_as::<i32>(&obj, ".x"), Ok(&5));

        let mut map = DynamicMap::new();
        map.extend("x", 5_i32);
        assert_eq!(get_as::<i32>(&map, "[x]"), Ok(&5));

        let mut nested = DynamicMap::new();
        nested.extend("x", [("y", 6_i32)].into_iter().collect::<DynamicMap>());
        assert_eq!(get_as::<i32>(&nested, "[x][y]"), Ok(&6));

        let list = vec![5_i32, 3];
        assert_eq!(get_as::<i32>(&list, "#0"), Ok(&5));
        assert_eq!(get_as::<i32>(&list, "#1"), Ok(&3));
        assert_eq!(get_as::<i32>(&list, "#-2"), Ok(&5));
    }

    #[test]
    fn reads_mixed_path() {
        let root = sample();
        assert_eq!(get_as::<i64>(&root, "[x]#1#0.y[z]"), Ok(&9));
        assert_eq!(get(&root, "[x]#1#0.y").unwrap().nested_kind(), NestedKind::Mapping);
    }

    #[test]
    fn read_after_write() {
        let mut root = sample();
        for (path, value) in [("[x]#1#0.y[z]", 10_i64), ("[x]#0", 1), ("[x]#1#0.y[new]", 2), ("[w]", 3)] {
            set(&mut root, path, value).unwrap();
            assert_eq!(get_as::<i64>(&root, path), Ok(&value));
        }
        assert_eq!(get_as::<i64>(&root, "[x]#-1#0.y[z]"), Ok(&10));
    }

    #[test]
    fn missing_key_is_an_access_error() {
        let mut nested = DynamicMap::new();
        nested.extend("x", [("y", 6_i32)].into_iter().collect::<DynamicMap>());

        let err = get(&nested, "[x][z]").unwrap_err();
        assert_eq!(access_kind(err), AccessErrorKind::MissingKey);

        let err = get(&sample(), "[x]#1#0.q").unwrap_err();
        assert_eq!(access_kind(err), AccessErrorKind::MissingAttribute);
    }

    #[test]
    fn traversal_errors() {
        let root = sample();
        assert_eq!(
            access_kind(get(&root, "[x]#2").unwrap_err()),
            AccessErrorKind::IndexOutOfRange { index: 2, len: 2 }
        );
        assert_eq!(
            access_kind(get(&root, "[x]#one").unwrap_err()),
            AccessErrorKind::InvalidIndex
        );
        assert_eq!(
            access_kind(get(&root, "[x][0]").unwrap_err()),
            AccessErrorKind::IncompatibleKinds {
                expected: NestedKind::Mapping,
                actual: NestedKind::Sequence,
            }
        );
        assert_eq!(
            access_kind(get(&root, "[x]#0.real").unwrap_err()),
            AccessErrorKind::IncompatibleKinds {
                expected: NestedKind::Object,
                actual: NestedKind::Opaque,
            }
        );
    }

    #[test]
    fn errors_convert_and_display() {
        fn first_kind(root: &DynamicMap, path: &'static str) -> Result<NestedKind, PathError<'static>> {
            let accessor = PathAccessor::parse_static(path)?;
            let value = accessor.accessors()[0].access(root)?;
            Ok(value.nested_kind())
        }

        assert_eq!(first_kind(&sample(), "[x]#0"), Ok(NestedKind::Sequence));
        assert_eq!(
            parse_kind(first_kind(&sample(), "[x").unwrap_err()),
            ParseErrorKind::MissingCloseOperator(AccessorKind::Key)
        );
        assert_eq!(
            access_kind(first_kind(&sample(), "[y]").unwrap_err()),
            AccessErrorKind::MissingKey
        );

        let root = sample();
        let err: &dyn core::error::Error = &get(&root, "[nope]").unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot access `[nope]` (offset 0): the mapping has no such key"
        );
        assert_eq!(
            get_as::<u8>(&root, "[x]#0").unwrap_err().to_string(),
            "can't downcast the result of access to the given type"
        );
        assert_eq!(
            access_kind(get(&root, "[x]#99999999999999999999999").unwrap_err()),
            AccessErrorKind::IndexOutOfRange { index: isize::MAX, len: 2 }
        );
    }

    #[test]
    fn error_offset_points_at_segment() {
        let PathError::Access(err) = get(&sample(), "[x]#1#0.y[q]").unwrap_err() else {
            panic!("expected an access error");
        };
        assert_eq!(err.offset(), Some(9));
        assert_eq!(err.accessor(), &Accessor::Key("q".into()));
    }

    #[test]
    fn parse_errors_win_and_leave_root_untouched() {
        let mut root = sample();
        assert_eq!(
            parse_kind(set(&mut root, "[x]#0]", 1_i64).unwrap_err()),
            ParseErrorKind::UnexpectedCloseOperator(']')
        );
        // the first segments are valid, but nothing is written
        assert_eq!(get_as::<i64>(&root, "[x]#0"), Ok(&5));

        // a parse error is reported even when traversal would fail first
        assert!(matches!(get(&root, "[missing]x"), Err(PathError::Parse(_))));
        assert!(matches!(get(&root, ""), Err(PathError::Parse(_))));
    }

    #[test]
    fn typed_containers_reject_other_types() {
        let mut root = vec![1_i32, 2];
        let err = set(&mut root, "#0", "one").unwrap_err();
        assert!(matches!(
            access_kind(err),
            AccessErrorKind::MismatchedType { expected: "i32", .. }
        ));
        assert_eq!(root, [1, 2]);
    }

    #[test]
    fn update_adds_three() {
        let mut root = DynamicObject::new();
        root.extend("x", 4_i64);

        update(&mut root, ".x", |ctx| ctx.value_as::<i64>().copied().unwrap_or(0) + 3).unwrap();
        assert_eq!(get_as::<i64>(&root, ".x"), Ok(&7));
    }

    #[test]
    fn update_sees_accessor_and_parent() {
        let mut root = sample();
        let mut seen = Vec::new();

        update(&mut root, "[x]#-1", |ctx| {
            seen.push(ctx.accessor.to_string());
            seen.push(ctx.parent.nested_kind().to_string());
            let inner = ctx.value;
            assert_eq!(inner.nested_kind(), NestedKind::Sequence);
            String::from("replaced")
        })
        .unwrap();

        assert_eq!(seen, ["#-1", "sequence"]);
        assert_eq!(get_as::<String>(&root, "[x]#1").map(String::as_str), Ok("replaced"));
    }

    #[test]
    fn update_requires_existing_value() {
        let mut root = DynamicMap::new();
        let err = update(&mut root, "[x]", |_| 1_i32).unwrap_err();
        assert_eq!(access_kind(err), AccessErrorKind::MissingKey);
        assert!(get(&root, "[x]").is_err());
    }

    #[test]
    fn get_mut_as_modifies_in_place() {
        let mut root = sample();
        *get_mut_as::<i64>(&mut root, "[x]#0").unwrap() *= 2;
        assert_eq!(get_as::<i64>(&root, "[x]#0"), Ok(&10));
    }

    #[test]
    fn path_accessor_reuse() {
        let accessor = PathAccessor::parse_static("[x]#1#0.y[z]").unwrap();
        let mut first = sample();
        let second = sample();

        accessor.set(&mut first, 1_i64).unwrap();
        assert_eq!(accessor.get_as::<i64>(&first), Ok(&1));
        assert_eq!(accessor.get_as::<i64>(&second), Ok(&9));

        accessor.update(&mut first, |ctx| ctx.value_as::<i64>().copied().unwrap_or(0) - 1).unwrap();
        assert_eq!(accessor.get_as::<i64>(&first), Ok(&0));
        assert_eq!(accessor.get_as::<u8>(&first), Err(PathError::InvalidDowncast));
    }

    #[test]
    fn path_accessor_display_and_from_str() {
        let accessor: PathAccessor = "[a b]#-1.c".parse().unwrap();
        assert_eq!(accessor.to_string(), "[a b]#-1.c");
        assert_eq!(accessor.accessors()[1].offset, Some(5));

        let again: PathAccessor = accessor.to_string().parse().unwrap();
        assert_eq!(again, accessor);

        let err = "[x".parse::<PathAccessor>().unwrap_err();
        assert_eq!(err.path, "[x");
    }

    #[test]
    fn owned_errors_outlive_path() {
        let root = sample();
        let err = {
            let path = String::from("[nope]");
            get(&root, path.as_str()).unwrap_err().into_owned()
        };
        assert_eq!(
            err.to_string(),
            "cannot access `[nope]` (offset 0): the mapping has no such key"
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_as_path_string() {
        let accessor = PathAccessor::parse_static("[x]#1.y").unwrap();
        let json = serde_json::to_string(&accessor).unwrap();
        assert_eq!(json, r#""[x]#1.y""#);

        let back: PathAccessor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, accessor);
        assert!(serde_json::from_str::<PathAccessor>(r#""[x""#).is_err());
    }
}
