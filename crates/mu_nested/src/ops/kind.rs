use crate::{Nested, NestedKind};
use crate::ops::{Mapping, Object, Sequence};

/// An immutable enumeration of the capability of a [`Nested`] value.
///
/// Returned by [`Nested::nested_ref`].
#[derive(Clone, Copy)]
pub enum NestedRef<'a> {
    Object(&'a dyn Object),
    Mapping(&'a dyn Mapping),
    Sequence(&'a dyn Sequence),
    Opaque(&'a dyn Nested),
}

/// A mutable enumeration of the capability of a [`Nested`] value.
///
/// Returned by [`Nested::nested_mut`].
pub enum NestedMut<'a> {
    Object(&'a mut dyn Object),
    Mapping(&'a mut dyn Mapping),
    Sequence(&'a mut dyn Sequence),
    Opaque(&'a mut dyn Nested),
}

impl<'a> NestedRef<'a> {
    /// Returns the [`NestedKind`] of this view.
    #[inline]
    pub fn kind(&self) -> NestedKind {
        match self {
            Self::Object(_) => NestedKind::Object,
            Self::Mapping(_) => NestedKind::Mapping,
            Self::Sequence(_) => NestedKind::Sequence,
            Self::Opaque(_) => NestedKind::Opaque,
        }
    }

    /// Returns the object view, if this is one.
    #[inline]
    pub fn as_object(self) -> Option<&'a dyn Object> {
        match self {
            Self::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Returns the mapping view, if this is one.
    #[inline]
    pub fn as_mapping(self) -> Option<&'a dyn Mapping> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the sequence view, if this is one.
    #[inline]
    pub fn as_sequence(self) -> Option<&'a dyn Sequence> {
        match self {
            Self::Sequence(seq) => Some(seq),
            _ => None,
        }
    }
}

impl<'a> NestedMut<'a> {
    /// Returns the [`NestedKind`] of this view.
    #[inline]
    pub fn kind(&self) -> NestedKind {
        match self {
            Self::Object(_) => NestedKind::Object,
            Self::Mapping(_) => NestedKind::Mapping,
            Self::Sequence(_) => NestedKind::Sequence,
            Self::Opaque(_) => NestedKind::Opaque,
        }
    }

    /// Returns the object view, if this is one.
    #[inline]
    pub fn as_object(self) -> Option<&'a mut dyn Object> {
        match self {
            Self::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Returns the mapping view, if this is one.
    #[inline]
    pub fn as_mapping(self) -> Option<&'a mut dyn Mapping> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the sequence view, if this is one.
    #[inline]
    pub fn as_sequence(self) -> Option<&'a mut dyn Sequence> {
        match self {
            Self::Sequence(seq) => Some(seq),
            _ => None,
        }
    }
}
