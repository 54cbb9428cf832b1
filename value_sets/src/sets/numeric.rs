use crate::domain::{DecimalDomain, NumericDomain};
use crate::interval::Interval;
use crate::params::CHECK_INVARIANTS;
use crate::relation::Relation;
use itertools::Itertools;
use rand::Rng;
use smallvec::{smallvec, SmallVec};
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

pub(crate) type Intervals<V> = SmallVec<[(V, V); 2]>;

/// A set of values of a totally ordered domain, represented as a sorted list of disjoint closed
/// intervals `[first, last]`.
///
/// Invariant: intervals are non-empty, sorted and never adjacent, i.e. for two consecutive
/// intervals `a` and `b`, `next(a.last) < b.first`. Hence every set has a single representation.
#[derive(Clone, Debug, PartialEq)]
pub struct NumericValueSet<D: NumericDomain> {
    intervals: Intervals<D::Value>,
    _domain: PhantomData<D>,
}

/// Decimals are ordered like integers, consecutive values being one unit of the finest scale apart.
pub type DecimalValueSet = NumericValueSet<DecimalDomain>;

/// Appends the interval `[first, last]` to a sorted list, merging it with the last interval if they
/// overlap or are adjacent. `first` must not be lower than the first value of the last interval.
pub(crate) fn push_merged<D: NumericDomain>(intervals: &mut Intervals<D::Value>, first: D::Value, last: D::Value) {
    debug_assert!(D::related(Relation::LessThanOrEqual, first, last));
    if let Some(previous) = intervals.last_mut() {
        debug_assert!(D::related(Relation::LessThanOrEqual, previous.0, first));
        if D::related(Relation::Equal, D::min_value(), first)
            || D::related(Relation::GreaterThanOrEqual, previous.1, D::prev(first))
        {
            previous.1 = D::max(previous.1, last);
            return;
        }
    }
    intervals.push((first, last));
}

impl<D: NumericDomain> NumericValueSet<D> {
    pub(crate) fn from_intervals(intervals: Intervals<D::Value>) -> Self {
        let set = NumericValueSet {
            intervals,
            _domain: PhantomData,
        };
        if cfg!(debug_assertions) || CHECK_INVARIANTS.get() {
            set.check_invariants();
        }
        set
    }

    /// Panics if the representation invariant does not hold.
    pub fn check_invariants(&self) {
        for &(first, last) in &self.intervals {
            assert!(
                D::related(Relation::LessThanOrEqual, first, last),
                "{}: reversed interval [{}..{}]",
                D::NAME,
                D::display(first),
                D::display(last)
            );
        }
        for (a, b) in self.intervals.iter().tuple_windows() {
            assert!(
                D::related(Relation::LessThan, a.1, b.0) && D::related(Relation::LessThan, D::next(a.1), b.0),
                "{}: unsorted or adjacent intervals in {}",
                D::NAME,
                self
            );
        }
    }

    pub fn all_values() -> Self {
        Self::including(D::min_value(), D::max_value())
    }

    pub fn no_values() -> Self {
        Self::from_intervals(SmallVec::new())
    }

    /// The set of all values in `[first, last]`.
    pub fn including(first: D::Value, last: D::Value) -> Self {
        Self::from_intervals(smallvec![(first, last)])
    }

    /// The set of all values `v` such that `v <relation> value`.
    pub fn related(relation: Relation, value: D::Value) -> Self {
        let (min, max) = (D::min_value(), D::max_value());
        Interval::<D>::build(relation, value, min, max).to_value_set(min, max)
    }

    /// A random set made of roughly `expected_size` intervals, for testing.
    pub fn random<R: Rng + ?Sized>(expected_size: usize, rng: &mut R) -> Self {
        let mut values: Vec<D::Value> = (0..expected_size * 2).map(|_| D::random(rng)).collect();
        values.sort_by(|a, b| D::compare(*a, *b));
        let mut intervals = SmallVec::new();
        for (a, b) in values.into_iter().tuples() {
            push_merged::<D>(&mut intervals, D::min(a, b), D::max(a, b));
        }
        Self::from_intervals(intervals)
    }

    pub fn intervals(&self) -> &[(D::Value, D::Value)] {
        &self.intervals
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn is_all(&self) -> bool {
        match self.intervals.as_slice() {
            [(first, last)] => {
                D::related(Relation::Equal, *first, D::min_value())
                    && D::related(Relation::Equal, *last, D::max_value())
            }
            _ => false,
        }
    }

    /// Returns true if the set contains `value`.
    fn contains(&self, value: D::Value) -> bool {
        // index of the first interval whose last value is not below `value`
        let candidate = self
            .intervals
            .partition_point(|&(_, last)| D::related(Relation::LessThan, last, value));
        match self.intervals.get(candidate) {
            Some(&(first, _)) => D::related(Relation::GreaterThanOrEqual, value, first),
            None => false,
        }
    }

    /// Returns true if at least one value `v` of the set satisfies `v <relation> value`.
    pub fn any(&self, relation: Relation, value: D::Value) -> bool {
        match (relation, self.intervals.first(), self.intervals.last()) {
            (Relation::Equal, _, _) => self.contains(value),
            (_, None, _) | (_, _, None) => false,
            (Relation::LessThan | Relation::LessThanOrEqual, Some(&(first, _)), _) => {
                D::related(relation, first, value)
            }
            (Relation::GreaterThan | Relation::GreaterThanOrEqual, _, Some(&(_, last))) => {
                D::related(relation, last, value)
            }
        }
    }

    /// Returns true if every value `v` of the set satisfies `v <relation> value`.
    /// This is vacuously true for the empty set.
    pub fn all(&self, relation: Relation, value: D::Value) -> bool {
        match (relation, self.intervals.first(), self.intervals.last()) {
            (_, None, _) | (_, _, None) => true,
            (Relation::Equal, _, _) => match self.intervals.as_slice() {
                [(first, last)] => {
                    D::related(Relation::Equal, *first, value) && D::related(Relation::Equal, *last, value)
                }
                _ => false,
            },
            (Relation::LessThan | Relation::LessThanOrEqual, _, Some(&(_, last))) => D::related(relation, last, value),
            (Relation::GreaterThan | Relation::GreaterThanOrEqual, Some(&(first, _)), _) => {
                D::related(relation, first, value)
            }
        }
    }

    pub fn complement(&self) -> Self {
        let (Some(&(first, _)), Some(&(_, last))) = (self.intervals.first(), self.intervals.last()) else {
            return Self::all_values();
        };
        let mut gaps = SmallVec::new();
        if D::related(Relation::LessThan, D::min_value(), first) {
            gaps.push((D::min_value(), D::prev(first)));
        }
        for (a, b) in self.intervals.iter().tuple_windows() {
            gaps.push((D::next(a.1), D::prev(b.0)));
        }
        if D::related(Relation::LessThan, last, D::max_value()) {
            gaps.push((D::next(last), D::max_value()));
        }
        Self::from_intervals(gaps)
    }

    pub fn intersect(&self, other: &Self) -> Self {
        let (left, right) = (&self.intervals, &other.intervals);
        let mut result = SmallVec::new();
        let (mut l, mut r) = (0, 0);
        while l < left.len() && r < right.len() {
            let (left_first, left_last) = left[l];
            let (right_first, right_last) = right[r];
            if D::related(Relation::LessThan, left_last, right_first) {
                l += 1;
            } else if D::related(Relation::LessThan, right_last, left_first) {
                r += 1;
            } else {
                push_merged::<D>(
                    &mut result,
                    D::max(left_first, right_first),
                    D::min(left_last, right_last),
                );
                // advance past the interval that ends first
                match D::compare(left_last, right_last) {
                    std::cmp::Ordering::Less => l += 1,
                    std::cmp::Ordering::Greater => r += 1,
                    std::cmp::Ordering::Equal => {
                        l += 1;
                        r += 1;
                    }
                }
            }
        }
        Self::from_intervals(result)
    }

    pub fn union(&self, other: &Self) -> Self {
        let merged = self
            .intervals
            .iter()
            .merge_by(other.intervals.iter(), |a, b| D::related(Relation::LessThan, a.0, b.0));
        let mut result = SmallVec::new();
        for &(first, last) in merged {
            push_merged::<D>(&mut result, first, last);
        }
        Self::from_intervals(result)
    }

    /// A member of the set, preferring non-negative values. Returns `None` for the empty set.
    pub fn sample(&self) -> Option<D::Value> {
        let non_negative = Self::related(Relation::GreaterThanOrEqual, D::zero());
        match self.intersect(&non_negative).intervals.first() {
            Some(&(first, _)) => Some(first),
            None => self.intervals.last().map(|&(_, last)| last),
        }
    }
}

impl<D: NumericDomain> Display for NumericValueSet<D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let formatted = self
            .intervals
            .iter()
            .format_with(",", |&(first, last), f| f(&format_args!("[{}..{}]", D::display(first), D::display(last))));
        write!(f, "{formatted}")
    }
}
