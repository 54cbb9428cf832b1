//! The 128-bit decimal domain: a sign, a 96-bit unsigned mantissa and a scale in `0..=28`.
//!
//! The same number has many representations (`1.0 == 1.00`). Successors are computed on the
//! *normalized* representation, the one with the largest scale, which is the finest grid a value can
//! be expressed on. Ordering is numeric and does not depend on the representation.

use crate::constant::{ConstantKind, ConstantValue};
use crate::domain::NumericDomain;
use crate::error::ValueSetError;
use rand::Rng;
use rust_decimal::Decimal;

const MAX_SCALE: u32 = 28;
const MAX_MANTISSA: u128 = (1 << 96) - 1;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct DecimalDomain;

/// Unpacked decimal, with the mantissa as a single integer.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct DecimalRep {
    negative: bool,
    mantissa: u128,
    scale: u32,
}

impl DecimalRep {
    const ZERO: DecimalRep = DecimalRep {
        negative: false,
        mantissa: 0,
        scale: 0,
    };

    fn of(value: Decimal) -> DecimalRep {
        DecimalRep {
            negative: value.is_sign_negative(),
            mantissa: value.mantissa().unsigned_abs(),
            scale: value.scale(),
        }
    }

    /// Moves to the largest scale at which the mantissa still fits in 96 bits.
    fn normalize(self) -> DecimalRep {
        if self.mantissa == 0 {
            return DecimalRep::ZERO;
        }
        let mut rep = self;
        while rep.scale < MAX_SCALE && rep.mantissa * 10 <= MAX_MANTISSA {
            rep.mantissa *= 10;
            rep.scale += 1;
        }
        rep
    }

    fn to_decimal(self) -> Decimal {
        debug_assert!(self.mantissa <= MAX_MANTISSA && self.scale <= MAX_SCALE);
        let lo = self.mantissa as u32;
        let mid = (self.mantissa >> 32) as u32;
        let hi = (self.mantissa >> 64) as u32;
        Decimal::from_parts(lo, mid, hi, self.negative && self.mantissa != 0, self.scale)
    }

    /// Next representable magnitude, for a normalized non-zero representation.
    fn away_from_zero(self) -> DecimalRep {
        if self.mantissa < MAX_MANTISSA {
            DecimalRep {
                mantissa: self.mantissa + 1,
                ..self
            }
        } else {
            // saturated mantissa: continue on the coarser grid
            assert!(self.scale > 0, "decimal: no successor for the maximum magnitude");
            DecimalRep {
                mantissa: self.mantissa / 10 + 1,
                scale: self.scale - 1,
                ..self
            }
        }
    }

    /// Previous representable magnitude, for a normalized non-zero representation.
    fn toward_zero(self) -> DecimalRep {
        debug_assert!(self.mantissa > 0);
        if self.scale < MAX_SCALE && (self.mantissa - 1) * 10 <= MAX_MANTISSA {
            // the largest mantissa on the finer grid is above `mantissa - 1` on this one
            DecimalRep {
                mantissa: MAX_MANTISSA,
                scale: self.scale + 1,
                ..self
            }
        } else if self.mantissa == 1 {
            DecimalRep::ZERO
        } else {
            DecimalRep {
                mantissa: self.mantissa - 1,
                ..self
            }
        }
    }
}

fn canonical_zero(value: Decimal) -> Decimal {
    if value.is_zero() {
        Decimal::ZERO
    } else {
        value
    }
}

impl NumericDomain for DecimalDomain {
    type Value = Decimal;

    const NAME: &'static str = "decimal";

    fn min_value() -> Decimal {
        Decimal::MIN
    }

    fn max_value() -> Decimal {
        Decimal::MAX
    }

    fn zero() -> Decimal {
        Decimal::ZERO
    }

    fn next(value: Decimal) -> Decimal {
        assert!(value != Decimal::MAX, "decimal: no successor for the maximum value");
        let rep = DecimalRep::of(value).normalize();
        let next = if rep.mantissa == 0 {
            DecimalRep {
                negative: false,
                mantissa: 1,
                scale: MAX_SCALE,
            }
        } else if rep.negative {
            rep.toward_zero()
        } else {
            rep.away_from_zero()
        };
        next.to_decimal()
    }

    fn prev(value: Decimal) -> Decimal {
        canonical_zero(-Self::next(-value))
    }

    fn partition(min: Decimal, max: Decimal) -> (Decimal, Decimal) {
        debug_assert!(min < max);
        let two = Decimal::TWO;
        let mid = match (min / two).checked_add(max / two) {
            Some(mid) if min <= mid && mid < max => mid,
            // rounding left no room between the bounds
            _ => min,
        };
        (mid, Self::next(mid))
    }

    fn from_constant(constant: &ConstantValue) -> Result<Decimal, ValueSetError> {
        match constant {
            ConstantValue::Decimal(d) => Ok(canonical_zero(*d)),
            other => Err(ValueSetError::ConstantKind {
                expected: ConstantKind::Decimal,
                found: other.kind(),
            }),
        }
    }

    fn to_constant(value: Decimal) -> ConstantValue {
        ConstantValue::Decimal(value)
    }

    fn random<R: Rng + ?Sized>(rng: &mut R) -> Decimal {
        match rng.random_range(0..10) {
            0 => Decimal::MIN,
            1 => Decimal::MAX,
            2 => Decimal::ZERO,
            3..=5 => Decimal::from_parts(
                rng.random(),
                rng.random(),
                rng.random(),
                rng.random(),
                rng.random_range(0..=MAX_SCALE),
            ),
            _ => Decimal::new(rng.random_range(-1000..1000), rng.random_range(0..3)),
        }
    }

    fn display(value: Decimal) -> String {
        value.normalize().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn max_at_scale(scale: u32) -> Decimal {
        Decimal::from_parts(u32::MAX, u32::MAX, u32::MAX, false, scale)
    }

    #[test]
    fn steps_around_zero() {
        let tiny = Decimal::new(1, 28);
        assert_eq!(DecimalDomain::next(Decimal::ZERO), tiny);
        assert_eq!(DecimalDomain::prev(Decimal::ZERO), -tiny);
        assert_eq!(DecimalDomain::next(-tiny), Decimal::ZERO);
        assert!(!DecimalDomain::next(-tiny).is_sign_negative());
        assert_eq!(DecimalDomain::prev(tiny), Decimal::ZERO);
    }

    #[test]
    fn steps_use_finest_scale() {
        let one = Decimal::new(1, 0);
        let after_one = Decimal::from_i128_with_scale(10i128.pow(28) + 1, 28);
        assert_eq!(DecimalDomain::next(one), after_one);
        assert_eq!(DecimalDomain::prev(after_one), one);

        let before_minus_one = Decimal::from_i128_with_scale(-(10i128.pow(28) - 1), 28);
        assert_eq!(DecimalDomain::next(-one), before_minus_one);
    }

    #[test]
    fn saturated_mantissa_is_rescaled() {
        let saturated = max_at_scale(28);
        let next = DecimalDomain::next(saturated);
        assert_eq!(next, Decimal::from_i128_with_scale(7922816251426433759354395034, 27));
        assert!(next > saturated);
        assert_eq!(DecimalDomain::prev(next), saturated);
        assert_eq!(DecimalDomain::prev(-saturated), -next);
    }

    #[test]
    #[should_panic]
    fn no_successor_of_max() {
        DecimalDomain::next(Decimal::MAX);
    }

    #[test]
    fn random_round_trips() {
        let mut rng = SmallRng::seed_from_u64(0);
        for _ in 0..1000 {
            let value = DecimalDomain::random(&mut rng);
            if value != Decimal::MAX {
                let next = DecimalDomain::next(value);
                assert!(next > value, "{value} {next}");
                assert_eq!(DecimalDomain::prev(next), value, "{value}");
            }
            if value != Decimal::MIN {
                let prev = DecimalDomain::prev(value);
                assert!(prev < value, "{value} {prev}");
                assert_eq!(DecimalDomain::next(prev), value, "{value}");
            }
        }
    }

    #[test]
    fn partition_is_contiguous() {
        let bounds = [
            (Decimal::MIN, Decimal::MAX),
            (Decimal::new(1, 0), Decimal::new(2, 0)),
            (Decimal::MAX - Decimal::ONE, Decimal::MAX),
            (Decimal::ZERO, Decimal::new(1, 28)),
        ];
        for (min, max) in bounds {
            let (left_max, right_min) = DecimalDomain::partition(min, max);
            assert!(min <= left_max && left_max < max);
            assert_eq!(DecimalDomain::next(left_max), right_min);
            assert!(right_min <= max);
        }
    }
}
