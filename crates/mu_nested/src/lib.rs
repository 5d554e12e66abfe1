#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Extern Self

// `#[derive(Nested)]` expands to `::mu_nested::...` paths, which must also
// resolve inside this crate's own tests.
extern crate self as mu_nested;

// -----------------------------------------------------------------------------
// no_std support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod nested;

pub mod access;
pub mod impls;
pub mod ops;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use mu_nested_derive::Nested;
pub use nested::{IntoNested, Nested, NestedKind};

// -----------------------------------------------------------------------------
// Macro exports

/// Items used by `#[derive(Nested)]`, which must resolve in `no_std` crates.
#[doc(hidden)]
pub mod __macro_exports {
    pub use alloc::boxed::Box;
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::access;
    use crate::ops::{Object, WriteError};
    use crate::{Nested, NestedKind};
    use alloc::boxed::Box;
    use alloc::format;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    #[derive(Nested)]
    struct Point {
        x: i32,
        #[nested(rename = "y-axis")]
        y: i32,
        #[nested(skip)]
        #[expect(dead_code, reason = "skipped attribute")]
        label: core::cell::Cell<u8>,
    }

    #[derive(Nested)]
    struct Shape<T> {
        points: Vec<T>,
        r#type: String,
    }

    fn shape() -> Shape<Point> {
        let point = |x, y| Point {
            x,
            y,
            label: core::cell::Cell::new(0),
        };
        Shape {
            points: vec![point(1, 2), point(3, 4)],
            r#type: String::from("line"),
        }
    }

    #[test]
    fn derived_attributes() {
        let shape = shape();
        assert_eq!(shape.nested_kind(), NestedKind::Object);
        assert_eq!(shape.attr_len(), 2);
        assert_eq!(shape.name_at(1), Some("type"));

        let point = &shape.points[0];
        assert_eq!(point.attr_len(), 2);
        assert!(point.has_attr("y-axis"));
        assert!(!point.has_attr("y"));
        assert!(!point.has_attr("label"));
        assert_eq!(format!("{:?}", point as &dyn Nested), "Point { x: 1, y-axis: 2 }");
    }

    #[test]
    fn derived_writes() {
        let mut shape = shape();
        assert_eq!(
            shape.set_attr("color", Box::new(String::new())),
            Err(WriteError::MissingAttribute)
        );
        assert!(matches!(
            shape.set_attr("type", Box::new(1_i32)),
            Err(WriteError::MismatchedType { .. })
        ));
        shape.set_attr("type", Box::new(String::from("polygon"))).unwrap();
        assert_eq!(shape.r#type, "polygon");
    }

    #[test]
    fn traverse_derived_structs() {
        let mut shape = shape();
        assert_eq!(access::get_as::<i32>(&shape, ".points#-1.y-axis"), Ok(&4));

        access::set(&mut shape, ".points#0.x", 10_i32).unwrap();
        access::update(&mut shape, ".points#1.x", |ctx| {
            ctx.value_as::<i32>().copied().unwrap_or_default() * 2
        })
        .unwrap();

        assert_eq!(shape.points[0].x, 10);
        assert_eq!(shape.points[1].x, 6);
        assert!(access::set(&mut shape, ".points#0.z", 0_i32).is_err());
        assert!(access::set(&mut shape, ".points#0.x", 0_i64).is_err());
        assert_eq!(shape.points[0].x, 10);
    }

    #[cfg(feature = "json")]
    #[test]
    fn traverse_json() {
        let mut value = serde_json::json!({"x": [5, [{"y": {"z": 9}}]]});
        assert_eq!(
            access::get_as::<serde_json::Value>(&value, "[x]#1#0[y][z]"),
            Ok(&serde_json::json!(9))
        );

        access::set(&mut value, "[x]#0", serde_json::json!("five")).unwrap();
        assert_eq!(value["x"][0], "five");
        assert!(access::set(&mut value, "[x]#0", 5_i32).is_err());
    }
}
