//! Derivation of the set of values satisfying a single relational test, by partitioning the domain.
//!
//! [`Interval::build`] recursively splits `[min, max]` until each part is either entirely inside or
//! entirely outside the set `{ v | v <relation> pivot }`. The result is a small proof tree (its size
//! is linear in the depth of the partition) that only relies on [`NumericDomain::related`] and
//! [`NumericDomain::partition`]: no closed-form per type is needed, and pivots outside of
//! `[min, max]` (e.g. infinities for the finite part of a floating domain) are handled naturally.

use crate::domain::NumericDomain;
use crate::relation::Relation;
use crate::sets::numeric::{push_merged, NumericValueSet};
use smallvec::SmallVec;

#[derive(Clone, Debug, PartialEq)]
pub enum Interval<D: NumericDomain> {
    /// All values of the range are part of the set.
    Included,
    /// No value of the range is part of the set.
    Excluded,
    /// The range is split in `[.., left_max]` and `[right_min, ..]`.
    Mixed {
        left_max: D::Value,
        right_min: D::Value,
        left: Box<Interval<D>>,
        right: Box<Interval<D>>,
    },
}

/// Decides whether all or none of the values of `[min, max]` are related to the pivot, without
/// enumerating them. Returns `None` if the range must be split.
fn decide<D: NumericDomain>(relation: Relation, pivot: D::Value, min: D::Value, max: D::Value) -> Option<bool> {
    let rel = |r: Relation, a: D::Value, b: D::Value| D::related(r, a, b);
    use Relation::*;
    match relation {
        Equal if rel(LessThan, pivot, min) || rel(GreaterThan, pivot, max) => Some(false),
        Equal => None,
        LessThan | LessThanOrEqual if rel(relation, max, pivot) => Some(true),
        LessThan | LessThanOrEqual if !rel(relation, min, pivot) => Some(false),
        GreaterThan | GreaterThanOrEqual if rel(relation, min, pivot) => Some(true),
        GreaterThan | GreaterThanOrEqual if !rel(relation, max, pivot) => Some(false),
        _ => None,
    }
}

impl<D: NumericDomain> Interval<D> {
    fn leaf(included: bool) -> Self {
        if included {
            Interval::Included
        } else {
            Interval::Excluded
        }
    }

    /// Builds the tree of `{ v in [min, max] | v <relation> pivot }`.
    pub fn build(relation: Relation, pivot: D::Value, min: D::Value, max: D::Value) -> Self {
        debug_assert!(D::related(Relation::LessThanOrEqual, min, max));
        if D::related(Relation::Equal, min, max) {
            return Self::leaf(D::related(relation, min, pivot));
        }
        if let Some(included) = decide::<D>(relation, pivot, min, max) {
            return Self::leaf(included);
        }
        let (left_max, right_min) = D::partition(min, max);
        let left = Self::build(relation, pivot, min, left_max);
        let right = Self::build(relation, pivot, right_min, max);
        match (left, right) {
            (Interval::Included, Interval::Included) => Interval::Included,
            (Interval::Excluded, Interval::Excluded) => Interval::Excluded,
            (left, right) => Interval::Mixed {
                left_max,
                right_min,
                left: Box::new(left),
                right: Box::new(right),
            },
        }
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        match self {
            Interval::Included | Interval::Excluded => 1,
            Interval::Mixed { left, right, .. } => 1 + left.size() + right.size(),
        }
    }

    fn collect(&self, min: D::Value, max: D::Value, out: &mut SmallVec<[(D::Value, D::Value); 2]>) {
        match self {
            Interval::Included => push_merged::<D>(out, min, max),
            Interval::Excluded => {}
            Interval::Mixed {
                left_max,
                right_min,
                left,
                right,
            } => {
                left.collect(min, *left_max, out);
                right.collect(*right_min, max, out);
            }
        }
    }

    /// Flattens the tree built over `[min, max]` into the sorted interval representation.
    pub fn to_value_set(&self, min: D::Value, max: D::Value) -> NumericValueSet<D> {
        let mut intervals = SmallVec::new();
        self.collect(min, max, &mut intervals);
        NumericValueSet::from_intervals(intervals)
    }
}
