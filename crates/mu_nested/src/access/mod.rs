//! Provide path-based access to nested values.
//!
//! A path is a compact string such as `"[x]#1#0.y[z]"`, parsed into a list
//! of single-layer [`Accessor`]s that are applied in order, starting from a
//! root value. Two complementary APIs are exposed here:
//!
//! - [`get`], [`get_mut`], [`get_as`], [`get_mut_as`], [`set`] and [`update`]:
//!   parse the path on each call, without copying it.
//! - [`PathAccessor`]: a parsed, reusable path. Use this when the same path
//!   is applied many times.
//!
//! Both report [`PathError`], which keeps parse errors ([`ParseError`]) and
//! traversal errors ([`AccessError`]) apart.
//!
//! # Syntax
//!
//! - Attribute: `.name`, reads an [`Object`] attribute.
//! - Key: `[name]`, reads a [`Mapping`] entry.
//! - Index: `#number`, reads a [`Sequence`] element. Negative numbers count
//!   from the end.
//!
//! Operator characters (`.`, `[`, `#`, `]`) can not appear inside a segment.
//!
//! # Examples
//!
//! ```
//! use mu_nested::{Nested, access};
//! use mu_nested::ops::{DynamicList, DynamicObject};
//!
//! #[derive(Nested)]
//! struct Config {
//!     name: String,
//!     ports: Vec<u16>,
//! }
//!
//! let mut root = DynamicObject::new();
//! root.extend("config", Config { name: "web".into(), ports: vec![80, 443] });
//! root.extend("tags", DynamicList::new());
//!
//! assert_eq!(access::get_as::<u16>(&root, ".config.ports#-1"), Ok(&443));
//!
//! access::set(&mut root, ".config.ports#0", 8080_u16).unwrap();
//! access::update(&mut root, ".config.name", |ctx| {
//!     format!("{}-1", ctx.value_as::<String>().unwrap())
//! })
//! .unwrap();
//!
//! let config = access::get_as::<Config>(&root, ".config").unwrap();
//! assert_eq!(config.ports, [8080, 443]);
//! assert_eq!(config.name, "web-1");
//! ```
//!
//! [`Object`]: crate::ops::Object
//! [`Mapping`]: crate::ops::Mapping
//! [`Sequence`]: crate::ops::Sequence

// -----------------------------------------------------------------------------
// Modules

mod accessor;
mod path;
mod path_access;

// -----------------------------------------------------------------------------
// Exports

pub use accessor::{AccessError, AccessErrorKind};
pub use accessor::{Accessor, AccessorKind, OffsetAccessor};
pub use path::{AccessPath, ParseError, ParseErrorKind};
pub use path_access::{PathAccessor, PathError, UpdateContext};
pub use path_access::{get, get_as, get_mut, get_mut_as, set, update};
