use alloc::boxed::Box;
use core::any::Any;

use thiserror::Error;

use crate::Nested;

/// Why a container rejected a write.
///
/// Returned by [`Object::set_attr`], [`Mapping::insert`] and [`Sequence::set`].
///
/// [`Object::set_attr`]: crate::ops::Object::set_attr
/// [`Mapping::insert`]: crate::ops::Mapping::insert
/// [`Sequence::set`]: crate::ops::Sequence::set
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WriteError {
    #[error("expected a value of type `{expected}`, found `{found}`")]
    MismatchedType {
        expected: &'static str,
        found: &'static str,
    },

    #[error("the object does not accept new attributes")]
    MissingAttribute,

    #[error("index {index} is out of range for a sequence of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Moves a boxed value out as `T`, for containers that store concrete types.
///
/// # Examples
///
/// ```
/// use mu_nested::{IntoNested, ops::{WriteError, take_value}};
///
/// assert_eq!(take_value::<i32>(5_i32.into_nested()), Ok(5));
/// assert!(matches!(
///     take_value::<i32>("five".into_nested()),
///     Err(WriteError::MismatchedType { .. }),
/// ));
/// ```
pub fn take_value<T: Any>(value: Box<dyn Nested>) -> Result<T, WriteError> {
    value.take::<T>().map_err(|value| WriteError::MismatchedType {
        expected: core::any::type_name::<T>(),
        found: value.type_name(),
    })
}
