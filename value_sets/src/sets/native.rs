//! Native-width integers (`nint`, `nuint`).
//!
//! Their width depends on the platform, so the compiler only materializes 32-bit witnesses. The
//! values that a 64-bit platform adds below and above the 32-bit window are tracked by two
//! undifferentiated flags.

use crate::domain::{NIntDomain, NUIntDomain};
use crate::relation::Relation;
use crate::sets::numeric::NumericValueSet;
use rand::Rng;
use std::fmt::{Display, Formatter};

/// A set of signed native integers.
#[derive(Clone, Debug, PartialEq)]
pub struct NintValueSet {
    /// Some values below `i32::MIN` are included.
    has_small: bool,
    values: NumericValueSet<NIntDomain>,
    /// Some values above `i32::MAX` are included.
    has_large: bool,
}

impl NintValueSet {
    pub fn new(has_small: bool, values: NumericValueSet<NIntDomain>, has_large: bool) -> Self {
        NintValueSet {
            has_small,
            values,
            has_large,
        }
    }

    pub fn all_values() -> Self {
        Self::new(true, NumericValueSet::all_values(), true)
    }

    pub fn no_values() -> Self {
        Self::new(false, NumericValueSet::no_values(), false)
    }

    pub fn related(relation: Relation, value: i32) -> Self {
        Self::new(relation.looks_down(), NumericValueSet::related(relation, value), relation.looks_up())
    }

    pub fn random<R: Rng + ?Sized>(expected_size: usize, rng: &mut R) -> Self {
        Self::new(rng.random(), NumericValueSet::random(expected_size, rng), rng.random())
    }

    pub fn has_small(&self) -> bool {
        self.has_small
    }

    pub fn has_large(&self) -> bool {
        self.has_large
    }

    /// Members of the set that fit in 32 bits.
    pub fn values(&self) -> &NumericValueSet<NIntDomain> {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        !self.has_small && !self.has_large && self.values.is_empty()
    }

    pub fn any(&self, relation: Relation, value: i32) -> bool {
        if self.has_small && relation.looks_down() {
            return true;
        }
        if self.has_large && relation.looks_up() {
            return true;
        }
        self.values.any(relation, value)
    }

    pub fn all(&self, relation: Relation, value: i32) -> bool {
        if self.has_small && !relation.looks_down() {
            return false;
        }
        if self.has_large && !relation.looks_up() {
            return false;
        }
        self.values.all(relation, value)
    }

    pub fn complement(&self) -> Self {
        Self::new(!self.has_small, self.values.complement(), !self.has_large)
    }

    pub fn intersect(&self, other: &Self) -> Self {
        Self::new(
            self.has_small && other.has_small,
            self.values.intersect(&other.values),
            self.has_large && other.has_large,
        )
    }

    pub fn union(&self, other: &Self) -> Self {
        Self::new(
            self.has_small || other.has_small,
            self.values.union(&other.values),
            self.has_large || other.has_large,
        )
    }

    /// A 32-bit member of the set. Members outside of the window have no witness: a set made only
    /// of them has no sample.
    pub fn sample(&self) -> Option<i32> {
        self.values.sample()
    }
}

impl Display for NintValueSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::with_capacity(3);
        if self.has_small {
            parts.push("Small".to_string());
        }
        if !self.values.is_empty() {
            parts.push(self.values.to_string());
        }
        if self.has_large {
            parts.push("Large".to_string());
        }
        write!(f, "{}", parts.join(","))
    }
}

/// A set of unsigned native integers. No value lies below the 32-bit window.
#[derive(Clone, Debug, PartialEq)]
pub struct NuintValueSet {
    values: NumericValueSet<NUIntDomain>,
    /// Some values above `u32::MAX` are included.
    has_large: bool,
}

impl NuintValueSet {
    pub fn new(values: NumericValueSet<NUIntDomain>, has_large: bool) -> Self {
        NuintValueSet { values, has_large }
    }

    pub fn all_values() -> Self {
        Self::new(NumericValueSet::all_values(), true)
    }

    pub fn no_values() -> Self {
        Self::new(NumericValueSet::no_values(), false)
    }

    pub fn related(relation: Relation, value: u32) -> Self {
        Self::new(NumericValueSet::related(relation, value), relation.looks_up())
    }

    pub fn random<R: Rng + ?Sized>(expected_size: usize, rng: &mut R) -> Self {
        Self::new(NumericValueSet::random(expected_size, rng), rng.random())
    }

    pub fn has_large(&self) -> bool {
        self.has_large
    }

    pub fn values(&self) -> &NumericValueSet<NUIntDomain> {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        !self.has_large && self.values.is_empty()
    }

    pub fn any(&self, relation: Relation, value: u32) -> bool {
        if self.has_large && relation.looks_up() {
            return true;
        }
        self.values.any(relation, value)
    }

    pub fn all(&self, relation: Relation, value: u32) -> bool {
        if self.has_large && !relation.looks_up() {
            return false;
        }
        self.values.all(relation, value)
    }

    pub fn complement(&self) -> Self {
        Self::new(self.values.complement(), !self.has_large)
    }

    pub fn intersect(&self, other: &Self) -> Self {
        Self::new(self.values.intersect(&other.values), self.has_large && other.has_large)
    }

    pub fn union(&self, other: &Self) -> Self {
        Self::new(self.values.union(&other.values), self.has_large || other.has_large)
    }

    pub fn sample(&self) -> Option<u32> {
        self.values.sample()
    }
}

impl Display for NuintValueSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (self.values.is_empty(), self.has_large) {
            (_, false) => write!(f, "{}", self.values),
            (true, true) => write!(f, "Large"),
            (false, true) => write!(f, "{},Large", self.values),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_the_window() {
        let negative = NintValueSet::related(Relation::LessThan, 0);
        assert!(negative.has_small() && !negative.has_large());
        assert_eq!(negative.values().intervals(), &[(i32::MIN, -1)]);
        // answered by the flag alone
        let only_small = NintValueSet::new(true, NumericValueSet::no_values(), false);
        assert!(only_small.any(Relation::LessThan, i32::MIN));
        assert!(negative.any(Relation::LessThan, i32::MIN));
        assert!(!negative.any(Relation::GreaterThan, -1));
        assert!(negative.all(Relation::LessThan, 0));
        assert!(!negative.all(Relation::LessThan, -1));
    }

    #[test]
    fn flags_break_equality() {
        let all = NintValueSet::all_values();
        assert!(!all.all(Relation::Equal, 0));
        assert!(!all.all(Relation::GreaterThanOrEqual, i32::MIN));
        assert!(all.any(Relation::GreaterThan, i32::MAX));
        let one = NintValueSet::related(Relation::Equal, 1);
        assert!(one.all(Relation::Equal, 1));
        assert!(one.intersect(&NintValueSet::related(Relation::GreaterThan, 1)).is_empty());
    }

    #[test]
    fn complements() {
        let set = NintValueSet::related(Relation::GreaterThanOrEqual, 10);
        let rest = set.complement();
        assert!(rest.has_small() && !rest.has_large());
        assert_eq!(rest, NintValueSet::related(Relation::LessThan, 10));
        assert_eq!(set.union(&rest), NintValueSet::all_values());
        assert_eq!(set.to_string(), "[10..2147483647],Large");
        assert_eq!(rest.to_string(), "Small,[-2147483648..9]");
    }

    #[test]
    fn unsigned() {
        let large = NuintValueSet::related(Relation::GreaterThan, u32::MAX);
        assert!(!large.is_empty() && large.values().is_empty());
        assert_eq!(large.sample(), None);
        assert_eq!(large.to_string(), "Large");
        let small = NuintValueSet::related(Relation::LessThanOrEqual, 3);
        assert!(!small.has_large());
        assert!(small.all(Relation::LessThan, 4));
        assert_eq!(small.complement(), NuintValueSet::related(Relation::GreaterThan, 3));
        assert!(NuintValueSet::all_values().any(Relation::GreaterThan, u32::MAX));
        assert!(!NuintValueSet::all_values().all(Relation::LessThanOrEqual, u32::MAX));
    }
}
