use crate::relation::Relation;
use std::fmt::{Display, Formatter};

/// A set of booleans: one of the four subsets of `{false, true}`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct BoolValueSet {
    has_false: bool,
    has_true: bool,
}

impl BoolValueSet {
    pub const NONE: BoolValueSet = BoolValueSet::new(false, false);
    pub const ONLY_FALSE: BoolValueSet = BoolValueSet::new(true, false);
    pub const ONLY_TRUE: BoolValueSet = BoolValueSet::new(false, true);
    pub const ALL: BoolValueSet = BoolValueSet::new(true, true);

    pub const fn new(has_false: bool, has_true: bool) -> Self {
        BoolValueSet { has_false, has_true }
    }

    pub fn all_values() -> Self {
        Self::ALL
    }

    pub fn no_values() -> Self {
        Self::NONE
    }

    /// The set `{ v | v == value }`.
    /// Booleans are unordered: any other relation leaves all values possible.
    pub fn related(relation: Relation, value: bool) -> Self {
        if relation != Relation::Equal {
            tracing::debug!("bool value set: unsupported relation {relation}, assuming all values");
            return Self::ALL;
        }
        Self::new(!value, value)
    }

    pub fn has_false(&self) -> bool {
        self.has_false
    }

    pub fn has_true(&self) -> bool {
        self.has_true
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }

    fn contains(&self, value: bool) -> bool {
        if value {
            self.has_true
        } else {
            self.has_false
        }
    }

    pub fn any(&self, relation: Relation, value: bool) -> bool {
        check_relation(relation);
        self.contains(value)
    }

    pub fn all(&self, relation: Relation, value: bool) -> bool {
        check_relation(relation);
        !self.contains(!value)
    }

    pub fn complement(&self) -> Self {
        Self::new(!self.has_false, !self.has_true)
    }

    pub fn intersect(&self, other: &Self) -> Self {
        Self::new(self.has_false & other.has_false, self.has_true & other.has_true)
    }

    pub fn union(&self, other: &Self) -> Self {
        Self::new(self.has_false | other.has_false, self.has_true | other.has_true)
    }

    pub fn sample(&self) -> Option<bool> {
        if self.has_false {
            Some(false)
        } else if self.has_true {
            Some(true)
        } else {
            None
        }
    }
}

fn check_relation(relation: Relation) {
    assert_eq!(relation, Relation::Equal, "bool value set: unsupported relation {relation}");
}

impl Display for BoolValueSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (self.has_false, self.has_true) {
            (false, false) => write!(f, "{{}}"),
            (true, false) => write!(f, "{{false}}"),
            (false, true) => write!(f, "{{true}}"),
            (true, true) => write!(f, "{{false,true}}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATES: [BoolValueSet; 4] = [
        BoolValueSet::NONE,
        BoolValueSet::ONLY_FALSE,
        BoolValueSet::ONLY_TRUE,
        BoolValueSet::ALL,
    ];

    #[test]
    fn algebra() {
        for a in STATES {
            assert_eq!(a.complement().complement(), a);
            assert_eq!(a.union(&a.complement()), BoolValueSet::ALL);
            assert!(a.intersect(&a.complement()).is_empty());
            for b in STATES {
                assert_eq!(a.union(&b), b.union(&a));
                assert_eq!(a.intersect(&b).complement(), a.complement().union(&b.complement()));
            }
        }
    }

    #[test]
    fn queries() {
        let t = BoolValueSet::related(Relation::Equal, true);
        assert_eq!(t, BoolValueSet::ONLY_TRUE);
        assert!(t.any(Relation::Equal, true) && t.all(Relation::Equal, true));
        assert!(!t.any(Relation::Equal, false) && !t.all(Relation::Equal, false));
        assert!(BoolValueSet::ALL.any(Relation::Equal, false));
        assert!(!BoolValueSet::ALL.all(Relation::Equal, false));
        assert!(BoolValueSet::NONE.all(Relation::Equal, true));
        assert_eq!(BoolValueSet::ALL.sample(), Some(false));
        assert_eq!(t.sample(), Some(true));
        assert_eq!(BoolValueSet::NONE.sample(), None);
        assert_eq!(BoolValueSet::related(Relation::GreaterThan, false), BoolValueSet::ALL);
    }

    #[test]
    fn rendering() {
        let rendered: Vec<String> = STATES.iter().map(|s| s.to_string()).collect();
        assert_eq!(rendered, ["{}", "{false}", "{true}", "{false,true}"]);
    }

    #[test]
    #[should_panic]
    fn booleans_are_unordered() {
        BoolValueSet::ALL.any(Relation::LessThan, true);
    }
}
