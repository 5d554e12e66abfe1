//! Provide single-layer path accessing support

use alloc::borrow::Cow;
use alloc::boxed::Box;
use core::fmt;
use core::num::IntErrorKind;

use thiserror::Error;

use crate::ops::{NestedMut, NestedRef, WriteError};
use crate::{Nested, NestedKind};

// -----------------------------------------------------------------------------
// Accessor kind

/// The three ways a path segment can reach into a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AccessorKind {
    /// `.name`, applies to an [`Object`](crate::ops::Object).
    Attribute,
    /// `[name]`, applies to a [`Mapping`](crate::ops::Mapping).
    Key,
    /// `#number`, applies to a [`Sequence`](crate::ops::Sequence).
    Index,
}

impl AccessorKind {
    /// Returns the operator that opens a segment of this kind.
    #[inline]
    pub const fn open_char(self) -> char {
        match self {
            Self::Attribute => '.',
            Self::Key => '[',
            Self::Index => '#',
        }
    }

    /// Returns the operator that closes a segment of this kind, if it needs one.
    ///
    /// # Examples
    ///
    /// ```
    /// use mu_nested::access::AccessorKind;
    ///
    /// assert_eq!(AccessorKind::Key.close_char(), Some(']'));
    /// assert_eq!(AccessorKind::Index.close_char(), None);
    /// ```
    #[inline]
    pub const fn close_char(self) -> Option<char> {
        match self {
            Self::Key => Some(']'),
            Self::Attribute | Self::Index => None,
        }
    }

    /// Returns the kind opened by `c`, if `c` is an opening operator.
    #[inline]
    pub const fn from_open(c: char) -> Option<Self> {
        match c {
            '.' => Some(Self::Attribute),
            '[' => Some(Self::Key),
            '#' => Some(Self::Index),
            _ => None,
        }
    }

    /// Returns `true` if `c` is any operator character.
    #[inline]
    pub const fn is_operator(c: char) -> bool {
        matches!(c, '.' | '[' | '#' | ']')
    }

    /// Returns the capability a value needs for this accessor to apply.
    #[inline]
    pub const fn expected(self) -> NestedKind {
        match self {
            Self::Attribute => NestedKind::Object,
            Self::Key => NestedKind::Mapping,
            Self::Index => NestedKind::Sequence,
        }
    }
}

impl fmt::Display for AccessorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attribute => f.write_str("attribute"),
            Self::Key => f.write_str("key"),
            Self::Index => f.write_str("index"),
        }
    }
}

// -----------------------------------------------------------------------------
// Single layer accessor

/// A **singular** element access within a path.
///
/// The text is kept raw. Index text is only interpreted as an integer
/// when the accessor is applied, so `#x` parses but fails on access.
///
/// # Examples
///
/// ```
/// use mu_nested::Nested;
/// use mu_nested::access::Accessor;
/// use mu_nested::ops::DynamicMap;
///
/// let list = vec![10_i32, 20, 30];
///
/// let accessor = Accessor::Index("1".into());
/// let elem = accessor.access(&list, None).unwrap();
/// assert_eq!(elem.downcast_ref::<i32>(), Some(&20));
///
/// // negative indexes count from the end
/// let accessor = Accessor::Index("-1".into());
/// let elem = accessor.access(&list, None).unwrap();
/// assert_eq!(elem.downcast_ref::<i32>(), Some(&30));
///
/// let mut map = DynamicMap::new();
/// map.extend("a", true);
///
/// let accessor = Accessor::Key("a".into());
/// assert_eq!(accessor.to_string(), "[a]");
/// assert!(accessor.access(&map, None).unwrap().is::<bool>());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Accessor<'a> {
    /// A named attribute on an object.
    ///
    /// Example: the `id` of `.id`
    Attribute(Cow<'a, str>),
    /// A string key in a mapping.
    ///
    /// Example: the `id` of `[id]`
    Key(Cow<'a, str>),
    /// A position in a sequence, kept as raw text.
    ///
    /// Example: the `-1` of `#-1`
    Index(Cow<'a, str>),
}

impl fmt::Display for Accessor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attribute(name) => write!(f, ".{name}"),
            Self::Key(key) => write!(f, "[{key}]"),
            Self::Index(index) => write!(f, "#{index}"),
        }
    }
}

/// Resolves index `text` against a sequence of length `len`.
fn resolve_index(text: &str, len: usize) -> Result<usize, AccessErrorKind> {
    // integers too large for `isize` are valid but can never be in range
    let index: isize = match text.trim().parse() {
        Ok(index) => index,
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => isize::MAX,
            IntErrorKind::NegOverflow => isize::MIN,
            _ => return Err(AccessErrorKind::InvalidIndex),
        },
    };

    let resolved = if index < 0 {
        len.checked_sub(index.unsigned_abs())
    } else {
        Some(index.unsigned_abs()).filter(|&index| index < len)
    };

    resolved.ok_or(AccessErrorKind::IndexOutOfRange { index, len })
}

// -----------------------------------------------------------------------------
// Accessor implementation

impl<'a> Accessor<'a> {
    /// Creates an accessor of the given kind.
    #[inline]
    pub fn new(kind: AccessorKind, text: impl Into<Cow<'a, str>>) -> Self {
        let text = text.into();
        match kind {
            AccessorKind::Attribute => Self::Attribute(text),
            AccessorKind::Key => Self::Key(text),
            AccessorKind::Index => Self::Index(text),
        }
    }

    /// Returns the kind of this accessor.
    #[inline]
    pub fn kind(&self) -> AccessorKind {
        match self {
            Self::Attribute(_) => AccessorKind::Attribute,
            Self::Key(_) => AccessorKind::Key,
            Self::Index(_) => AccessorKind::Index,
        }
    }

    /// Returns the raw text of this accessor, without operators.
    #[inline]
    pub fn text(&self) -> &str {
        match self {
            Self::Attribute(text) | Self::Key(text) | Self::Index(text) => text,
        }
    }

    /// Converts this into an "owned" value.
    #[inline]
    pub fn into_owned(self) -> Accessor<'static> {
        match self {
            Self::Attribute(text) => Accessor::Attribute(Cow::Owned(text.into_owned())),
            Self::Key(text) => Accessor::Key(Cow::Owned(text.into_owned())),
            Self::Index(text) => Accessor::Index(Cow::Owned(text.into_owned())),
        }
    }

    #[inline]
    fn error(&self, kind: AccessErrorKind, offset: Option<usize>) -> AccessError<'a> {
        AccessError {
            kind,
            accessor: self.clone(),
            offset,
        }
    }

    #[inline]
    fn incompatible(&self, actual: NestedKind) -> AccessErrorKind {
        AccessErrorKind::IncompatibleKinds {
            expected: self.kind().expected(),
            actual,
        }
    }

    /// Dynamically accesses a value; on success returns a shared reference.
    pub fn access<'r>(
        &self,
        base: &'r dyn Nested,
        offset: Option<usize>, // use for error info
    ) -> Result<&'r dyn Nested, AccessError<'a>> {
        let res: Result<&'r dyn Nested, AccessErrorKind> = match (self, base.nested_ref()) {
            (Self::Attribute(name), NestedRef::Object(obj)) => {
                obj.attr(name).ok_or(AccessErrorKind::MissingAttribute)
            }
            (Self::Key(key), NestedRef::Mapping(map)) => {
                map.get(key).ok_or(AccessErrorKind::MissingKey)
            }
            (Self::Index(text), NestedRef::Sequence(seq)) => {
                resolve_index(text, seq.len()).and_then(|index| {
                    seq.get(index)
                        .ok_or(AccessErrorKind::IndexOutOfRange {
                            index: index as isize,
                            len: seq.len(),
                        })
                })
            }
            (_, actual) => Err(self.incompatible(actual.kind())),
        };

        res.map_err(|kind| self.error(kind, offset))
    }

    /// Dynamically accesses a value; on success returns a mutable reference.
    pub fn access_mut<'r>(
        &self,
        base: &'r mut dyn Nested,
        offset: Option<usize>, // use for error info
    ) -> Result<&'r mut dyn Nested, AccessError<'a>> {
        let res: Result<&'r mut dyn Nested, AccessErrorKind> = match (self, base.nested_mut()) {
            (Self::Attribute(name), NestedMut::Object(obj)) => {
                obj.attr_mut(name).ok_or(AccessErrorKind::MissingAttribute)
            }
            (Self::Key(key), NestedMut::Mapping(map)) => {
                map.get_mut(key).ok_or(AccessErrorKind::MissingKey)
            }
            (Self::Index(text), NestedMut::Sequence(seq)) => {
                let len = seq.len();
                match resolve_index(text, len) {
                    Ok(index) => seq.get_mut(index).ok_or(AccessErrorKind::IndexOutOfRange {
                        index: index as isize,
                        len,
                    }),
                    Err(kind) => Err(kind),
                }
            }
            (_, actual) => Err(self.incompatible(actual.kind())),
        };

        res.map_err(|kind| self.error(kind, offset))
    }

    /// Writes `value` into `base` through this accessor.
    ///
    /// - Attribute: [`Object::set_attr`], which may create the attribute.
    /// - Key: [`Mapping::insert`], missing keys are inserted.
    /// - Index: [`Sequence::set`], the index must already exist.
    ///
    /// [`Object::set_attr`]: crate::ops::Object::set_attr
    /// [`Mapping::insert`]: crate::ops::Mapping::insert
    /// [`Sequence::set`]: crate::ops::Sequence::set
    pub fn write(
        &self,
        base: &mut dyn Nested,
        value: Box<dyn Nested>,
        offset: Option<usize>, // use for error info
    ) -> Result<(), AccessError<'a>> {
        log::trace!(
            "writing `{}` through `{self}` on `{}`",
            value.type_name(),
            base.type_name(),
        );

        let res: Result<(), AccessErrorKind> = match (self, base.nested_mut()) {
            (Self::Attribute(name), NestedMut::Object(obj)) => {
                obj.set_attr(name, value).map_err(AccessErrorKind::from)
            }
            (Self::Key(key), NestedMut::Mapping(map)) => map
                .insert(key, value)
                .map(drop)
                .map_err(AccessErrorKind::from),
            (Self::Index(text), NestedMut::Sequence(seq)) => resolve_index(text, seq.len())
                .and_then(|index| seq.set(index, value).map_err(AccessErrorKind::from)),
            (_, actual) => Err(self.incompatible(actual.kind())),
        };

        res.map_err(|kind| self.error(kind, offset))
    }
}

// -----------------------------------------------------------------------------
// Error

/// The kind of [`AccessError`], along with some kind-specific information.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AccessErrorKind {
    #[error("the object has no such attribute")]
    MissingAttribute,

    #[error("the mapping has no such key")]
    MissingKey,

    #[error("index {index} is out of range for a sequence of length {len}")]
    IndexOutOfRange { index: isize, len: usize },

    #[error("the index is not an integer")]
    InvalidIndex,

    #[error("expected {expected}, found {actual}")]
    IncompatibleKinds {
        expected: NestedKind,
        actual: NestedKind,
    },

    #[error("expected a value of type `{expected}`, found `{found}`")]
    MismatchedType {
        expected: &'static str,
        found: &'static str,
    },
}

impl From<WriteError> for AccessErrorKind {
    fn from(value: WriteError) -> Self {
        match value {
            WriteError::MismatchedType { expected, found } => {
                Self::MismatchedType { expected, found }
            }
            WriteError::MissingAttribute => Self::MissingAttribute,
            WriteError::IndexOutOfRange { index, len } => Self::IndexOutOfRange {
                index: index as isize,
                len,
            },
        }
    }
}

/// An error originating from an [`Accessor`] applied to a value.
///
/// Use the `Display` impl of this type to get information on the error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessError<'a> {
    kind: AccessErrorKind,
    accessor: Accessor<'a>,
    offset: Option<usize>,
}

impl<'a> AccessError<'a> {
    /// Returns the kind of [`AccessError`].
    #[inline]
    pub fn kind(&self) -> &AccessErrorKind {
        &self.kind
    }

    /// Returns the [`Accessor`] that this [`AccessError`] occurred in.
    #[inline]
    pub fn accessor(&self) -> &Accessor<'a> {
        &self.accessor
    }

    /// If the [`Accessor`] was created with a parser or an offset was manually provided,
    /// returns the offset of the [`Accessor`] in its path string.
    #[inline]
    pub fn offset(&self) -> Option<usize> {
        self.offset
    }

    /// Converts this into an "owned" value.
    #[inline]
    pub fn into_owned(self) -> AccessError<'static> {
        AccessError {
            kind: self.kind,
            accessor: self.accessor.into_owned(),
            offset: self.offset,
        }
    }
}

impl fmt::Display for AccessError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let AccessError {
            kind,
            accessor,
            offset,
        } = self;

        write!(f, "cannot access `{accessor}`")?;
        if let Some(offset) = offset {
            write!(f, " (offset {offset})")?;
        }
        write!(f, ": {kind}")
    }
}

impl core::error::Error for AccessError<'_> {}

// -----------------------------------------------------------------------------
// Single layer accessor with offset

/// An [`Accessor`] combined with an `offset` for more helpful error reporting.
///
/// `offset` is the byte position of the opening operator in the parsed path.
/// It is only used to display error messages, unrelated to access.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OffsetAccessor<'a> {
    pub accessor: Accessor<'a>,
    /// only used to display error messages
    pub offset: Option<usize>,
}

impl<'a> From<Accessor<'a>> for OffsetAccessor<'a> {
    #[inline]
    fn from(accessor: Accessor<'a>) -> Self {
        Self {
            accessor,
            offset: None,
        }
    }
}

impl<'a> OffsetAccessor<'a> {
    /// Converts this into an "owned" value.
    #[inline]
    pub fn into_owned(self) -> OffsetAccessor<'static> {
        OffsetAccessor {
            accessor: self.accessor.into_owned(),
            offset: self.offset,
        }
    }

    /// Dynamically accesses a value; on success returns a shared reference.
    #[inline]
    pub fn access<'r>(&self, base: &'r dyn Nested) -> Result<&'r dyn Nested, AccessError<'a>> {
        self.accessor.access(base, self.offset)
    }

    /// Dynamically accesses a value; on success returns a mutable reference.
    #[inline]
    pub fn access_mut<'r>(
        &self,
        base: &'r mut dyn Nested,
    ) -> Result<&'r mut dyn Nested, AccessError<'a>> {
        self.accessor.access_mut(base, self.offset)
    }

    /// Writes `value` into `base`, see [`Accessor::write`].
    #[inline]
    pub fn write(&self, base: &mut dyn Nested, value: Box<dyn Nested>) -> Result<(), AccessError<'a>> {
        self.accessor.write(base, value, self.offset)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{AccessErrorKind, Accessor, AccessorKind, resolve_index};
    use crate::NestedKind;
    use crate::ops::{DynamicList, DynamicObject, Object};
    use alloc::boxed::Box;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn index_resolution() {
        assert_eq!(resolve_index("0", 2), Ok(0));
        assert_eq!(resolve_index(" 1 ", 2), Ok(1));
        assert_eq!(resolve_index("+1", 2), Ok(1));
        assert_eq!(resolve_index("-2", 2), Ok(0));
        assert_eq!(
            resolve_index("-3", 2),
            Err(AccessErrorKind::IndexOutOfRange { index: -3, len: 2 })
        );
        assert_eq!(
            resolve_index("2", 2),
            Err(AccessErrorKind::IndexOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(
            resolve_index("99999999999999999999999", 2),
            Err(AccessErrorKind::IndexOutOfRange { index: isize::MAX, len: 2 })
        );
        assert_eq!(
            resolve_index("-99999999999999999999999", 2),
            Err(AccessErrorKind::IndexOutOfRange { index: isize::MIN, len: 2 })
        );
        assert_eq!(resolve_index("one", 2), Err(AccessErrorKind::InvalidIndex));
        assert_eq!(resolve_index("", 2), Err(AccessErrorKind::InvalidIndex));
    }

    #[test]
    fn kind_mismatch_reports_both_kinds() {
        let list = vec![1_u8];
        let err = Accessor::Attribute("x".into())
            .access(&list, Some(4))
            .unwrap_err();

        assert_eq!(
            err.kind(),
            &AccessErrorKind::IncompatibleKinds {
                expected: NestedKind::Object,
                actual: NestedKind::Sequence,
            }
        );
        assert_eq!(err.offset(), Some(4));
        assert_eq!(
            err.to_string(),
            "cannot access `.x` (offset 4): expected object, found sequence"
        );
    }

    #[test]
    fn write_through_each_kind() {
        let mut obj = DynamicObject::new();
        Accessor::new(AccessorKind::Attribute, "a")
            .write(&mut obj, Box::new(1_i32), None)
            .unwrap();
        assert!(obj.has_attr("a"));

        let mut list: DynamicList = [0_i32, 0].into_iter().collect();
        Accessor::new(AccessorKind::Index, "-1")
            .write(&mut list, Box::new(9_i32), None)
            .unwrap();
        let last = Accessor::Index("1".into()).access(&list, None).unwrap();
        assert_eq!(last.downcast_ref::<i32>(), Some(&9));

        let err = Accessor::Index("2".into())
            .write(&mut list, Box::new(9_i32), None)
            .unwrap_err();
        assert_eq!(err.kind(), &AccessErrorKind::IndexOutOfRange { index: 2, len: 2 });
    }

    #[test]
    fn display_and_text() {
        let accessor = Accessor::new(AccessorKind::Key, "a b");
        assert_eq!(accessor.to_string(), "[a b]");
        assert_eq!(accessor.text(), "a b");
        assert_eq!(accessor.kind(), AccessorKind::Key);
        assert_eq!(AccessorKind::from_open(']'), None);
        assert!(AccessorKind::is_operator(']'));
    }
}
