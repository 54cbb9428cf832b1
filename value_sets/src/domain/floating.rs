//! IEEE-754 domains.
//!
//! Successors are computed on the bit pattern: finite values are mapped to a signed integer key
//! (the magnitude bits, negated for negative numbers) that is increasing and contiguous, with both
//! zeros sharing the key `0`.

use crate::constant::{ConstantKind, ConstantValue};
use crate::domain::{FloatingDomain, NumericDomain};
use crate::error::ValueSetError;
use crate::relation::Relation;
use rand::Rng;

/// Renders a number with at most `precision` significant digits, independently of the locale:
/// `NaN`, `Inf` and `-Inf` for special values, scientific notation for very small or large
/// exponents and trailing zeros removed.
pub fn format_general(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Inf" } else { "-Inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }
    let precision = precision.max(1);
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    if exponent < -5 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}E{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{value:.decimals$}"))
    }
}

fn trim_fraction(number: &str) -> String {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        number.to_string()
    }
}

macro_rules! floating_domain {
    ($domain:ident, $float:ty, $bits:ty, $variant:ident, $name:literal, $precision:literal) => {
        #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
        pub struct $domain;

        impl $domain {
            const SIGN: $bits = 1 << (<$bits>::BITS - 1);

            fn key(value: $float) -> i64 {
                debug_assert!(!value.is_nan());
                let bits = value.to_bits();
                let magnitude = (bits & !Self::SIGN) as i64;
                if bits & Self::SIGN != 0 {
                    -magnitude
                } else {
                    magnitude
                }
            }

            fn from_key(key: i64) -> $float {
                if key < 0 {
                    <$float>::from_bits(Self::SIGN | key.unsigned_abs() as $bits)
                } else {
                    <$float>::from_bits(key as $bits)
                }
            }
        }

        impl NumericDomain for $domain {
            type Value = $float;

            const NAME: &'static str = $name;

            fn min_value() -> $float {
                <$float>::MIN
            }

            fn max_value() -> $float {
                <$float>::MAX
            }

            fn zero() -> $float {
                0.0
            }

            fn related(relation: Relation, left: $float, right: $float) -> bool {
                match relation {
                    // NaNs are equal to each other for the purpose of the analysis
                    Relation::Equal => left == right || (left.is_nan() && right.is_nan()),
                    Relation::LessThan => left < right,
                    Relation::LessThanOrEqual => left <= right,
                    Relation::GreaterThan => left > right,
                    Relation::GreaterThanOrEqual => left >= right,
                }
            }

            fn next(value: $float) -> $float {
                assert!(
                    value.is_finite() && value != <$float>::MAX,
                    "{}: no finite successor for {}",
                    $name,
                    value
                );
                Self::from_key(Self::key(value) + 1)
            }

            fn prev(value: $float) -> $float {
                -Self::next(-value)
            }

            fn partition(min: $float, max: $float) -> ($float, $float) {
                let (lo, hi) = (Self::key(min) as i128, Self::key(max) as i128);
                debug_assert!(lo < hi);
                let mid = (lo + (hi - lo) / 2) as i64;
                (Self::from_key(mid), Self::from_key(mid + 1))
            }

            fn from_constant(constant: &ConstantValue) -> Result<$float, ValueSetError> {
                match constant {
                    // a single zero is tracked, with a positive sign
                    ConstantValue::$variant(value) if *value == 0.0 => Ok(0.0),
                    ConstantValue::$variant(value) => Ok(*value),
                    other => Err(ValueSetError::ConstantKind {
                        expected: ConstantKind::$variant,
                        found: other.kind(),
                    }),
                }
            }

            fn to_constant(value: $float) -> ConstantValue {
                ConstantValue::$variant(value)
            }

            fn random<R: Rng + ?Sized>(rng: &mut R) -> $float {
                match rng.random_range(0..16) {
                    0 => <$float>::MIN,
                    1 => <$float>::MAX,
                    2 => 0.0,
                    _ => rng.random_range(-100.0..100.0),
                }
            }

            fn display(value: $float) -> String {
                format_general(value as f64, $precision)
            }
        }

        impl FloatingDomain for $domain {
            fn nan() -> $float {
                <$float>::NAN
            }

            fn positive_infinity() -> $float {
                <$float>::INFINITY
            }

            fn negative_infinity() -> $float {
                <$float>::NEG_INFINITY
            }

            fn is_nan(value: $float) -> bool {
                value.is_nan()
            }
        }
    };
}

floating_domain!(F32Domain, f32, u32, Single, "float", 9);
floating_domain!(F64Domain, f64, u64, Double, "double", 17);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successors_walk_bit_patterns() {
        let tiny = f64::from_bits(1);
        assert_eq!(F64Domain::next(0.0), tiny);
        assert_eq!(F64Domain::next(-0.0), tiny);
        assert_eq!(F64Domain::prev(0.0), -tiny);
        // the negative zero is skipped
        assert_eq!(F64Domain::next(-tiny).to_bits(), 0.0f64.to_bits());
        assert_eq!(F64Domain::next(1.0), 1.0 + f64::EPSILON);
        assert_eq!(F64Domain::prev(f64::MAX), f64::from_bits(f64::MAX.to_bits() - 1));
        assert_eq!(F64Domain::next(f64::MIN), -F64Domain::prev(f64::MAX));
        assert_eq!(F32Domain::next(1.0), 1.0 + f32::EPSILON);
        for v in [-3.5f32, -1e-40, 0.0, 2.0, 1e30] {
            assert_eq!(F32Domain::prev(F32Domain::next(v)), v);
        }
    }

    #[test]
    #[should_panic]
    fn no_finite_successor_of_max() {
        F32Domain::next(f32::MAX);
    }

    #[test]
    fn partition_is_contiguous() {
        for (min, max) in [(f64::MIN, f64::MAX), (-1.0, 1.0), (0.0, F64Domain::next(0.0)), (2.0, 3.0)] {
            let (left_max, right_min) = F64Domain::partition(min, max);
            assert!(min <= left_max && left_max < max);
            assert_eq!(F64Domain::next(left_max), right_min);
        }
    }

    #[test]
    fn nan_is_equal_to_itself() {
        assert!(F64Domain::related(Relation::Equal, f64::NAN, f64::NAN));
        assert!(!F64Domain::related(Relation::LessThanOrEqual, f64::NAN, f64::NAN));
        assert!(!F32Domain::related(Relation::GreaterThan, f32::NAN, 0.0));
        assert!(F32Domain::related(Relation::Equal, -0.0, 0.0));
    }

    #[test]
    fn general_format() {
        assert_eq!(format_general(0.1, 17), "0.10000000000000001");
        assert_eq!(format_general(0.5, 17), "0.5");
        assert_eq!(format_general(-42.0, 17), "-42");
        assert_eq!(format_general(1e20, 17), "1E+20");
        assert_eq!(format_general(2.5e-7, 3), "2.5E-07");
        assert_eq!(F32Domain::display(0.1), "0.100000001");
        assert_eq!(F32Domain::display(f32::NEG_INFINITY), "-Inf");
        assert_eq!(F64Domain::display(f64::NAN), "NaN");
    }

    #[test]
    fn constants_drop_negative_zero() {
        let zero = F64Domain::from_constant(&ConstantValue::Double(-0.0)).unwrap();
        assert!(zero.is_sign_positive());
    }
}
