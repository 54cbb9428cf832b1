use crate::domain::{F32Domain, F64Domain, FloatingDomain, NumericDomain};
use crate::relation::Relation;
use crate::sets::numeric::NumericValueSet;
use rand::Rng;
use std::fmt::{Display, Formatter};

/// A set of floating point numbers: an interval set over the finite values, plus flags for NaN and
/// the two infinities, which lie outside of the ordered finite domain.
#[derive(Clone, Debug, PartialEq)]
pub struct FloatingValueSet<D: FloatingDomain> {
    has_nan: bool,
    has_minus_inf: bool,
    has_plus_inf: bool,
    numbers: NumericValueSet<D>,
}

pub type SingleValueSet = FloatingValueSet<F32Domain>;
pub type DoubleValueSet = FloatingValueSet<F64Domain>;

impl<D: FloatingDomain> FloatingValueSet<D> {
    pub fn new(has_nan: bool, has_minus_inf: bool, numbers: NumericValueSet<D>, has_plus_inf: bool) -> Self {
        FloatingValueSet {
            has_nan,
            has_minus_inf,
            has_plus_inf,
            numbers,
        }
    }

    pub fn all_values() -> Self {
        Self::new(true, true, NumericValueSet::all_values(), true)
    }

    pub fn no_values() -> Self {
        Self::new(false, false, NumericValueSet::no_values(), false)
    }

    /// The set of all values `v` such that `v <relation> value`, where `value` may be NaN or infinite.
    pub fn related(relation: Relation, value: D::Value) -> Self {
        if D::is_nan(value) {
            let nan_only = matches!(
                relation,
                Relation::Equal | Relation::LessThanOrEqual | Relation::GreaterThanOrEqual
            );
            return Self::new(nan_only, false, NumericValueSet::no_values(), false);
        }
        Self::new(
            false,
            D::related(relation, D::negative_infinity(), value),
            NumericValueSet::related(relation, value),
            D::related(relation, D::positive_infinity(), value),
        )
    }

    pub fn random<R: Rng + ?Sized>(expected_size: usize, rng: &mut R) -> Self {
        Self::new(
            rng.random(),
            rng.random(),
            NumericValueSet::random(expected_size, rng),
            rng.random(),
        )
    }

    pub fn has_nan(&self) -> bool {
        self.has_nan
    }

    pub fn has_minus_inf(&self) -> bool {
        self.has_minus_inf
    }

    pub fn has_plus_inf(&self) -> bool {
        self.has_plus_inf
    }

    /// The finite members of the set.
    pub fn numbers(&self) -> &NumericValueSet<D> {
        &self.numbers
    }

    pub fn is_empty(&self) -> bool {
        !self.has_nan && !self.has_minus_inf && !self.has_plus_inf && self.numbers.is_empty()
    }

    /// The special members of the set, each paired with its flag.
    fn specials(&self) -> [(bool, D::Value); 3] {
        [
            (self.has_nan, D::nan()),
            (self.has_minus_inf, D::negative_infinity()),
            (self.has_plus_inf, D::positive_infinity()),
        ]
    }

    pub fn any(&self, relation: Relation, value: D::Value) -> bool {
        self.specials()
            .into_iter()
            .any(|(present, special)| present && D::related(relation, special, value))
            || self.numbers.any(relation, value)
    }

    pub fn all(&self, relation: Relation, value: D::Value) -> bool {
        self.specials()
            .into_iter()
            .all(|(present, special)| !present || D::related(relation, special, value))
            && self.numbers.all(relation, value)
    }

    pub fn complement(&self) -> Self {
        Self::new(
            !self.has_nan,
            !self.has_minus_inf,
            self.numbers.complement(),
            !self.has_plus_inf,
        )
    }

    pub fn intersect(&self, other: &Self) -> Self {
        Self::new(
            self.has_nan && other.has_nan,
            self.has_minus_inf && other.has_minus_inf,
            self.numbers.intersect(&other.numbers),
            self.has_plus_inf && other.has_plus_inf,
        )
    }

    pub fn union(&self, other: &Self) -> Self {
        Self::new(
            self.has_nan || other.has_nan,
            self.has_minus_inf || other.has_minus_inf,
            self.numbers.union(&other.numbers),
            self.has_plus_inf || other.has_plus_inf,
        )
    }

    /// A member of the set, finite numbers first, then `+Inf`, `-Inf` and `NaN`.
    pub fn sample(&self) -> Option<D::Value> {
        if let Some(number) = self.numbers.sample() {
            Some(number)
        } else if self.has_plus_inf {
            Some(D::positive_infinity())
        } else if self.has_minus_inf {
            Some(D::negative_infinity())
        } else if self.has_nan {
            Some(D::nan())
        } else {
            None
        }
    }
}

impl<D: FloatingDomain> Display for FloatingValueSet<D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::with_capacity(4);
        if self.has_nan {
            parts.push("NaN".to_string());
        }
        if self.has_minus_inf {
            parts.push("-Inf".to_string());
        }
        if !self.numbers.is_empty() {
            parts.push(self.numbers.to_string());
        }
        if self.has_plus_inf {
            parts.push("Inf".to_string());
        }
        write!(f, "{}", parts.join(","))
    }
}
