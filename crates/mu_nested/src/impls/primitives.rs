use alloc::string::String;
use core::fmt;

use crate::Nested;
use crate::ops::{NestedMut, NestedRef};

macro_rules! impl_nested_opaque {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Nested for $ty {
                #[inline]
                fn nested_ref(&self) -> NestedRef<'_> {
                    NestedRef::Opaque(self)
                }

                #[inline]
                fn nested_mut(&mut self) -> NestedMut<'_> {
                    NestedMut::Opaque(self)
                }

                #[inline]
                fn nested_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    fmt::Debug::fmt(self, f)
                }

                #[inline]
                fn nested_partial_eq(&self, other: &dyn Nested) -> Option<bool> {
                    Some(other.downcast_ref::<Self>().is_some_and(|other| self == other))
                }
            }
        )*
    };
}

impl_nested_opaque!(
    bool, char, (),
    i8, i16, i32, i64, i128, isize,
    u8, u16, u32, u64, u128, usize,
    f32, f64,
    String, &'static str,
);

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::{Nested, NestedKind};
    use alloc::format;
    use alloc::string::String;

    #[test]
    fn opaque_values() {
        assert_eq!(String::from("a").nested_kind(), NestedKind::Opaque);
        assert!(<dyn Nested>::nested_eq(&3_u16, &3_u16));
        assert!(!<dyn Nested>::nested_eq(&3_u16, &3_u32));
        assert_eq!(f64::NAN.nested_partial_eq(&f64::NAN), Some(false));

        let value: &dyn Nested = &"quoted";
        assert_eq!(format!("{value:?}"), r#""quoted""#);
    }
}
