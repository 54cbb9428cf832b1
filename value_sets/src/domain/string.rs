use crate::constant::{ConstantKind, ConstantValue};
use crate::domain::EquatableDomain;
use crate::error::ValueSetError;
use hashbrown::HashSet;
use rand::Rng;
use std::sync::Arc;

/// Strings, only compared for equality.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct StringDomain;

impl EquatableDomain for StringDomain {
    type Value = Arc<str>;

    const NAME: &'static str = "string";

    fn from_constant(constant: &ConstantValue) -> Result<Arc<str>, ValueSetError> {
        match constant {
            ConstantValue::String(s) => Ok(s.clone()),
            other => Err(ValueSetError::ConstantKind {
                expected: ConstantKind::String,
                found: other.kind(),
            }),
        }
    }

    fn to_constant(value: Arc<str>) -> ConstantValue {
        ConstantValue::String(value)
    }

    /// Short strings over a small alphabet, so that independently drawn values often collide.
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Arc<str> {
        let len = rng.random_range(0..=2);
        let s: String = (0..len).map(|_| rng.random_range('a'..='d')).collect();
        Arc::from(s)
    }

    fn display(value: &Arc<str>) -> String {
        format!("{value:?}")
    }

    fn fresh_value(excluded: &HashSet<Arc<str>>) -> Arc<str> {
        let simple = std::iter::once(String::new()).chain(('A'..='Z').chain('a'..='z').map(String::from));
        for candidate in simple {
            if !excluded.contains(candidate.as_str()) {
                return Arc::from(candidate);
            }
        }
        // all short candidates are excluded, one of the `excluded.len() + 1` first strings of `A`s is not
        let mut candidate = String::from("A");
        while excluded.contains(candidate.as_str()) {
            candidate.push('A');
        }
        Arc::from(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_values_avoid_exclusions() {
        let mut excluded: HashSet<Arc<str>> = HashSet::new();
        assert_eq!(&*StringDomain::fresh_value(&excluded), "");
        excluded.insert(Arc::from(""));
        assert_eq!(&*StringDomain::fresh_value(&excluded), "A");
        for c in ('A'..='Z').chain('a'..='z') {
            excluded.insert(Arc::from(c.to_string()));
        }
        excluded.insert(Arc::from("AA"));
        assert_eq!(&*StringDomain::fresh_value(&excluded), "AAA");
    }

    #[test]
    fn constants() {
        let value = StringDomain::from_constant(&ConstantValue::from("abc")).unwrap();
        assert_eq!(&*value, "abc");
        assert!(StringDomain::from_constant(&ConstantValue::Char(u16::from(b'a'))).is_err());
    }
}
