//! Fixed-width integer domains.

use crate::constant::{ConstantKind, ConstantValue};
use crate::domain::NumericDomain;
use crate::error::ValueSetError;
use rand::Rng;

macro_rules! integral_domain {
    ($(#[$doc:meta])* $domain:ident, $int:ty, $variant:ident, $name:literal) => {
        $(#[$doc])*
        #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
        pub struct $domain;

        impl NumericDomain for $domain {
            type Value = $int;

            const NAME: &'static str = $name;

            fn min_value() -> $int {
                <$int>::MIN
            }

            fn max_value() -> $int {
                <$int>::MAX
            }

            fn zero() -> $int {
                0
            }

            fn next(value: $int) -> $int {
                match value.checked_add(1) {
                    Some(next) => next,
                    None => panic!("{}: no successor for the maximum value {}", $name, value),
                }
            }

            fn prev(value: $int) -> $int {
                match value.checked_sub(1) {
                    Some(prev) => prev,
                    None => panic!("{}: no predecessor for the minimum value {}", $name, value),
                }
            }

            fn partition(min: $int, max: $int) -> ($int, $int) {
                debug_assert!(min < max);
                let mid = (min as i128 + (max as i128 - min as i128) / 2) as $int;
                (mid, mid + 1)
            }

            fn from_constant(constant: &ConstantValue) -> Result<$int, ValueSetError> {
                match constant {
                    ConstantValue::$variant(value) => Ok(*value),
                    other => Err(ValueSetError::ConstantKind {
                        expected: ConstantKind::$variant,
                        found: other.kind(),
                    }),
                }
            }

            fn to_constant(value: $int) -> ConstantValue {
                ConstantValue::$variant(value)
            }

            fn random<R: Rng + ?Sized>(rng: &mut R) -> $int {
                rng.random::<$int>()
            }

            fn display(value: $int) -> String {
                value.to_string()
            }
        }
    };
}

integral_domain!(SByteDomain, i8, SByte, "sbyte");
integral_domain!(ByteDomain, u8, Byte, "byte");
integral_domain!(Int16Domain, i16, Int16, "short");
integral_domain!(UInt16Domain, u16, UInt16, "ushort");
integral_domain!(Int32Domain, i32, Int32, "int");
integral_domain!(UInt32Domain, u32, UInt32, "uint");
integral_domain!(Int64Domain, i64, Int64, "long");
integral_domain!(UInt64Domain, u64, UInt64, "ulong");
integral_domain!(
    /// The 32-bit window of native-width signed integers, whose constants are `nint`.
    NIntDomain,
    i32,
    NInt,
    "nint"
);
integral_domain!(
    /// The 32-bit window of native-width unsigned integers, whose constants are `nuint`.
    NUIntDomain,
    u32,
    NUInt,
    "nuint"
);
