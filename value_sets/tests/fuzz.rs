//! Differential testing of the interval algebra against an explicit enumeration of small domains.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::cmp::Ordering;
use std::marker::PhantomData;
use value_sets::domain::{ByteDomain, CharDomain, NumericDomain};
use value_sets::params::{FUZZ_ROUNDS, FUZZ_SEED};
use value_sets::sets::NumericValueSet;
use value_sets::Relation;

/// Every value of a domain, in increasing order.
struct Universe<D: NumericDomain> {
    values: Vec<D::Value>,
    _domain: PhantomData<D>,
}

impl<D: NumericDomain> Universe<D> {
    fn new(values: Vec<D::Value>) -> Self {
        assert!(values.first().is_some_and(|&v| D::compare(v, D::min_value()) == Ordering::Equal));
        assert!(values.last().is_some_and(|&v| D::compare(v, D::max_value()) == Ordering::Equal));
        Universe {
            values,
            _domain: PhantomData,
        }
    }

    fn position(&self, value: D::Value) -> usize {
        let pos = self.values.partition_point(|&v| D::compare(v, value) == Ordering::Less);
        assert!(pos < self.values.len(), "{value:?} is not a value of {}", D::NAME);
        pos
    }

    /// Membership of every value, read from the intervals of the set.
    fn members(&self, set: &NumericValueSet<D>) -> Vec<bool> {
        let mut members = vec![false; self.values.len()];
        for &(first, last) in set.intervals() {
            members[self.position(first)..=self.position(last)].fill(true);
        }
        members
    }

    fn assert_same(&self, expected: &[bool], actual: &NumericValueSet<D>, operation: &str) {
        let members = self.members(actual);
        if let Some(i) = (0..expected.len()).find(|&i| expected[i] != members[i]) {
            panic!(
                "{operation}: {:?} should {}be a member of {actual}",
                self.values[i],
                if expected[i] { "" } else { "not " }
            );
        }
    }

    /// Checks `any` and `all` for every relation, with the value at each of the given positions.
    fn check_queries(&self, set: &NumericValueSet<D>, members: &[bool], pivots: impl IntoIterator<Item = usize>) {
        // below[i] is the number of members lower than values[i]
        let mut below = Vec::with_capacity(members.len() + 1);
        below.push(0usize);
        for &m in members {
            below.push(below.last().copied().unwrap_or(0) + usize::from(m));
        }
        let total = below[members.len()];

        for p in pivots {
            let value = self.values[p];
            for relation in Relation::ALL {
                let count = match relation {
                    Relation::Equal => usize::from(members[p]),
                    Relation::LessThan => below[p],
                    Relation::LessThanOrEqual => below[p + 1],
                    Relation::GreaterThan => total - below[p + 1],
                    Relation::GreaterThanOrEqual => total - below[p],
                };
                assert_eq!(set.any(relation, value), count > 0, "{set} any {relation} {value:?}");
                assert_eq!(set.all(relation, value), count == total, "{set} all {relation} {value:?}");
            }
        }
    }

    fn check_round(&self, rng: &mut SmallRng, pivots: impl Fn(&NumericValueSet<D>, &mut SmallRng) -> Vec<usize>) {
        let a = NumericValueSet::<D>::random(rng.random_range(0..6), rng);
        let b = NumericValueSet::<D>::random(rng.random_range(0..6), rng);
        let ma = self.members(&a);
        let mb = self.members(&b);

        let not_a: Vec<bool> = ma.iter().map(|m| !m).collect();
        self.assert_same(&not_a, &a.complement(), &format!("complement of {a}"));
        let both: Vec<bool> = ma.iter().zip(&mb).map(|(x, y)| *x && *y).collect();
        self.assert_same(&both, &a.intersect(&b), &format!("{a} inter {b}"));
        let either: Vec<bool> = ma.iter().zip(&mb).map(|(x, y)| *x || *y).collect();
        self.assert_same(&either, &a.union(&b), &format!("{a} union {b}"));

        assert_eq!(a.is_empty(), !ma.contains(&true), "{a}");
        assert_eq!(a.is_all(), !ma.contains(&false), "{a}");
        if let Some(sample) = a.sample() {
            assert!(ma[self.position(sample)], "sample {sample:?} of {a}");
        }

        let pivots = pivots(&a, rng);
        self.check_queries(&a, &ma, pivots);
    }
}

#[test]
fn bytes() {
    let universe = Universe::<ByteDomain>::new((u8::MIN..=u8::MAX).collect());
    let mut rng = SmallRng::seed_from_u64(FUZZ_SEED.get());
    for _ in 0..FUZZ_ROUNDS.get() {
        universe.check_round(&mut rng, |_, _| (0..=255).collect());
    }
}

#[test]
fn chars() {
    let universe = Universe::<CharDomain>::new((u16::MIN..=u16::MAX).collect());
    let mut rng = SmallRng::seed_from_u64(FUZZ_SEED.get());
    for _ in 0..FUZZ_ROUNDS.get() {
        universe.check_round(&mut rng, |_, _| (0..=usize::from(u16::MAX)).collect());
    }
}

#[test]
fn chars_include_surrogates() {
    let universe = Universe::<CharDomain>::new((u16::MIN..=u16::MAX).collect());
    let around = NumericValueSet::<CharDomain>::including(0xD7FF, 0xE000);
    assert_eq!(universe.members(&around).iter().filter(|m| **m).count(), 0x802);
    assert_eq!(around.complement().intervals(), [(0, 0xD7FE), (0xE001, u16::MAX)]);
    let up_to_last = NumericValueSet::<CharDomain>::related(Relation::LessThanOrEqual, u16::MAX);
    assert!(up_to_last.is_all());
}
