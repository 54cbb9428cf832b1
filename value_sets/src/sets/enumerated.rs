use crate::domain::{EquatableDomain, StringDomain};
use crate::relation::Relation;
use hashbrown::HashSet;
use itertools::Itertools;
use rand::Rng;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

/// A set of values of an unordered domain, kept either as the list of its members (`included`) or
/// as the list of the values it lacks (`!included`), so that infinite domains such as strings can
/// have a universal set.
#[derive(Clone, Debug, PartialEq)]
pub struct EnumeratedValueSet<D: EquatableDomain> {
    included: bool,
    members: HashSet<D::Value>,
    _domain: PhantomData<D>,
}

pub type StringValueSet = EnumeratedValueSet<StringDomain>;

impl<D: EquatableDomain> EnumeratedValueSet<D> {
    fn new(included: bool, members: HashSet<D::Value>) -> Self {
        EnumeratedValueSet {
            included,
            members,
            _domain: PhantomData,
        }
    }

    pub fn all_values() -> Self {
        Self::new(false, HashSet::new())
    }

    pub fn no_values() -> Self {
        Self::new(true, HashSet::new())
    }

    pub fn including(value: D::Value) -> Self {
        Self::new(true, HashSet::from_iter([value]))
    }

    /// The set `{ v | v == value }`. Other relations are meaningless on an unordered domain and
    /// leave all values possible.
    pub fn related(relation: Relation, value: D::Value) -> Self {
        if relation != Relation::Equal {
            tracing::debug!("{} value set: unsupported relation {relation}, assuming all values", D::NAME);
            return Self::all_values();
        }
        Self::including(value)
    }

    pub fn random<R: Rng + ?Sized>(expected_size: usize, rng: &mut R) -> Self {
        let members = (0..expected_size).map(|_| D::random(rng)).collect();
        Self::new(rng.random(), members)
    }

    /// True if the set is made of the listed members, false if it is made of everything else.
    pub fn is_included(&self) -> bool {
        self.included
    }

    pub fn members(&self) -> &HashSet<D::Value> {
        &self.members
    }

    pub fn is_empty(&self) -> bool {
        self.included && self.members.is_empty()
    }

    pub fn contains(&self, value: &D::Value) -> bool {
        self.members.contains(value) == self.included
    }

    /// # Panic
    /// Panics on any relation other than [`Relation::Equal`].
    pub fn any(&self, relation: Relation, value: &D::Value) -> bool {
        check_relation::<D>(relation);
        self.contains(value)
    }

    /// # Panic
    /// Panics on any relation other than [`Relation::Equal`].
    pub fn all(&self, relation: Relation, value: &D::Value) -> bool {
        check_relation::<D>(relation);
        if !self.included {
            // a complement set over an unbounded domain always has several members
            return false;
        }
        self.members.iter().all(|m| m == value)
    }

    pub fn complement(&self) -> Self {
        Self::new(!self.included, self.members.clone())
    }

    pub fn intersect(&self, other: &Self) -> Self {
        let (larger, smaller) = order_by_size(self, other);
        match (larger.included, smaller.included) {
            (true, true) => Self::new(true, larger.members.intersection(&smaller.members).cloned().collect()),
            (true, false) => Self::new(true, larger.members.difference(&smaller.members).cloned().collect()),
            (false, true) => Self::new(true, smaller.members.difference(&larger.members).cloned().collect()),
            (false, false) => Self::new(false, larger.members.union(&smaller.members).cloned().collect()),
        }
    }

    pub fn union(&self, other: &Self) -> Self {
        let (larger, smaller) = order_by_size(self, other);
        match (larger.included, smaller.included) {
            (false, false) => Self::new(false, larger.members.intersection(&smaller.members).cloned().collect()),
            (false, true) => Self::new(false, larger.members.difference(&smaller.members).cloned().collect()),
            (true, false) => Self::new(false, smaller.members.difference(&larger.members).cloned().collect()),
            (true, true) => Self::new(true, larger.members.union(&smaller.members).cloned().collect()),
        }
    }

    /// The smallest member of the set, or a value outside of the excluded members for a
    /// complement set.
    pub fn sample(&self) -> Option<D::Value> {
        if self.included {
            self.members.iter().min().cloned()
        } else {
            Some(D::fresh_value(&self.members))
        }
    }
}

/// Orders two sets so that the first one has the most members.
fn order_by_size<'a, D: EquatableDomain>(
    a: &'a EnumeratedValueSet<D>,
    b: &'a EnumeratedValueSet<D>,
) -> (&'a EnumeratedValueSet<D>, &'a EnumeratedValueSet<D>) {
    if a.members.len() >= b.members.len() {
        (a, b)
    } else {
        (b, a)
    }
}

fn check_relation<D: EquatableDomain>(relation: Relation) {
    assert_eq!(relation, Relation::Equal, "{} value set: unsupported relation {relation}", D::NAME);
}

impl<D: EquatableDomain> Display for EnumeratedValueSet<D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if !self.included {
            write!(f, "~")?;
        }
        let members = self.members.iter().sorted().map(D::display).join(",");
        write!(f, "{{{members}}}")
    }
}
