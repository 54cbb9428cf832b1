use crate::constant::{ConstantKind, ConstantValue};
use crate::domain::NumericDomain;
use crate::error::ValueSetError;
use rand::Rng;

/// UTF-16 code units. Every value in `0..=0xFFFF` is a member, lone surrogates included.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct CharDomain;

/// Renders a code unit as a quoted character literal. Surrogates, which have no `char`
/// counterpart, are rendered with a `\u{..}` escape.
pub fn render_code_unit(unit: u16) -> String {
    match char::from_u32(u32::from(unit)) {
        Some(c) => format!("{c:?}"),
        None => format!("'\\u{{{unit:x}}}'"),
    }
}

impl NumericDomain for CharDomain {
    type Value = u16;

    const NAME: &'static str = "char";

    fn min_value() -> u16 {
        0
    }

    fn max_value() -> u16 {
        u16::MAX
    }

    fn zero() -> u16 {
        0
    }

    fn next(value: u16) -> u16 {
        match value.checked_add(1) {
            Some(next) => next,
            None => panic!("char: no successor for the maximum value {}", render_code_unit(value)),
        }
    }

    fn prev(value: u16) -> u16 {
        match value.checked_sub(1) {
            Some(prev) => prev,
            None => panic!("char: no predecessor for the minimum value {}", render_code_unit(value)),
        }
    }

    fn partition(min: u16, max: u16) -> (u16, u16) {
        debug_assert!(min < max);
        let mid = min + (max - min) / 2;
        (mid, mid + 1)
    }

    fn from_constant(constant: &ConstantValue) -> Result<u16, ValueSetError> {
        match constant {
            ConstantValue::Char(unit) => Ok(*unit),
            other => Err(ValueSetError::ConstantKind {
                expected: ConstantKind::Char,
                found: other.kind(),
            }),
        }
    }

    fn to_constant(value: u16) -> ConstantValue {
        ConstantValue::Char(value)
    }

    fn random<R: Rng + ?Sized>(rng: &mut R) -> u16 {
        rng.random::<u16>()
    }

    fn display(value: u16) -> String {
        render_code_unit(value)
    }
}
