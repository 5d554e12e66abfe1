//! Provide the capability traits and dynamic containers used by traversal.
//!
//! ## Menu
//!
//! ### Interface
//!
//! The following are subtraits of [`Nested`], one per capability a path
//! accessor can use.
//!
//! - [`Object`]: named attributes, reached with `.name`.
//! - [`Mapping`]: string keys, reached with `[name]`.
//! - [`Sequence`]: integer positions, reached with `#index`.
//!
//! ### Dynamic Type
//!
//! Dynamic containers hold values of any [`Nested`] type and accept any type
//! on write, which makes them suitable for building heterogeneous graphs.
//!
//! - [`DynamicObject`]: an open attribute namespace, ordered by insertion.
//! - [`DynamicMap`]: a string-keyed map, ordered by insertion.
//! - [`DynamicList`]: a list, similar to `Vec<Box<dyn Nested>>`.
//!
//! [`Nested`]: crate::Nested

// -----------------------------------------------------------------------------
// Modules

mod entries;
mod kind;
mod mapping_ops;
mod object_ops;
mod sequence_ops;
mod write_error;

// -----------------------------------------------------------------------------
// Exports

pub use kind::{NestedMut, NestedRef};
pub use write_error::{WriteError, take_value};

pub use mapping_ops::{DynamicMap, Mapping};
pub use object_ops::{DynamicObject, Object, ObjectAttrIter};
pub use sequence_ops::{DynamicList, Sequence, SequenceItemIter};

pub(crate) use sequence_ops::out_of_range;
