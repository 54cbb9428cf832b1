//! Per-type adapters ("type classes") that the generic set algebra is written against.
//!
//! Each primitive domain is represented by a zero-sized marker type implementing [`NumericDomain`]
//! (totally ordered domains), [`FloatingDomain`] (ordered domains with NaN and infinities) or
//! [`EquatableDomain`] (domains only supporting equality).
//! Markers rather than the value types themselves carry the implementation, so that two domains may
//! share a representation (e.g. `int` and `nint` both use `i32`).

use crate::constant::ConstantValue;
use crate::error::ValueSetError;
use crate::relation::Relation;
use hashbrown::HashSet;
use rand::Rng;
use std::cmp::Ordering;
use std::fmt::Debug;
use std::hash::Hash;

pub mod character;
pub mod decimal;
pub mod floating;
pub mod integral;
pub mod string;

pub use character::CharDomain;
pub use decimal::DecimalDomain;
pub use floating::{F32Domain, F64Domain};
pub use integral::*;
pub use string::StringDomain;

/// A totally ordered domain with a finite number of values between [`NumericDomain::min_value`]
/// and [`NumericDomain::max_value`].
pub trait NumericDomain: Copy + Clone + Debug + Default + Eq + PartialEq + Hash + Send + Sync + 'static {
    type Value: Copy + PartialOrd + Debug + Send + Sync + 'static;

    /// Name of the domain, as it appears in the source language.
    const NAME: &'static str;

    fn min_value() -> Self::Value;
    fn max_value() -> Self::Value;
    fn zero() -> Self::Value;

    /// Evaluates `left <relation> right`.
    fn related(relation: Relation, left: Self::Value, right: Self::Value) -> bool {
        related_ordered(relation, left, right)
    }

    /// The smallest value strictly greater than `value`.
    ///
    /// # Panic
    /// `value` must not be the maximum of the domain.
    fn next(value: Self::Value) -> Self::Value;

    /// The largest value strictly lower than `value`.
    ///
    /// # Panic
    /// `value` must not be the minimum of the domain.
    fn prev(value: Self::Value) -> Self::Value;

    /// Splits the non-singleton range `[min, max]` into `[min, left_max]` and `[right_min, max]`
    /// where `right_min == next(left_max)`. Both parts are non-empty.
    fn partition(min: Self::Value, max: Self::Value) -> (Self::Value, Self::Value);

    fn from_constant(constant: &ConstantValue) -> Result<Self::Value, ValueSetError>;
    fn to_constant(value: Self::Value) -> ConstantValue;

    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self::Value;

    /// Locale-independent rendering of a value.
    fn display(value: Self::Value) -> String;

    fn compare(left: Self::Value, right: Self::Value) -> Ordering {
        if Self::related(Relation::LessThan, left, right) {
            Ordering::Less
        } else if Self::related(Relation::LessThan, right, left) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    fn min(left: Self::Value, right: Self::Value) -> Self::Value {
        if Self::related(Relation::LessThan, right, left) {
            right
        } else {
            left
        }
    }

    fn max(left: Self::Value, right: Self::Value) -> Self::Value {
        if Self::related(Relation::GreaterThan, right, left) {
            right
        } else {
            left
        }
    }
}

/// A numeric domain whose finite values are complemented by NaN and two infinities.
///
/// The [`NumericDomain`] part only covers the finite values: `min_value` and `max_value` are the
/// extreme finite numbers. Note that [`NumericDomain::related`] considers two NaNs equal, which is
/// required for the analysis to be deterministic.
pub trait FloatingDomain: NumericDomain {
    fn nan() -> Self::Value;
    fn positive_infinity() -> Self::Value;
    fn negative_infinity() -> Self::Value;
    fn is_nan(value: Self::Value) -> bool;
}

/// A domain only supporting equality tests, typically unbounded (strings).
pub trait EquatableDomain: Copy + Clone + Debug + Default + Eq + PartialEq + Hash + Send + Sync + 'static {
    type Value: Clone + Eq + Ord + Hash + Debug + Send + Sync + 'static;

    const NAME: &'static str;

    fn from_constant(constant: &ConstantValue) -> Result<Self::Value, ValueSetError>;
    fn to_constant(value: Self::Value) -> ConstantValue;
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self::Value;
    fn display(value: &Self::Value) -> String;

    /// Returns a value that is not part of `excluded`.
    fn fresh_value(excluded: &HashSet<Self::Value>) -> Self::Value;
}

/// Evaluates a relation with the natural order of the values.
pub fn related_ordered<T: PartialOrd>(relation: Relation, left: T, right: T) -> bool {
    match relation {
        Relation::Equal => left == right,
        Relation::LessThan => left < right,
        Relation::LessThanOrEqual => left <= right,
        Relation::GreaterThan => left > right,
        Relation::GreaterThanOrEqual => left >= right,
    }
}

/// Extracts the payload of a constant that is known to belong to the domain `D`.
///
/// # Panic
/// Panics if the constant is of another kind: the caller mixed domains.
pub(crate) fn expect_value<D: NumericDomain>(constant: &ConstantValue) -> D::Value {
    match D::from_constant(constant) {
        Ok(value) => value,
        Err(err) => panic!("{} value set: {err}", D::NAME),
    }
}

/// Same as [`expect_value`] for unordered domains.
pub(crate) fn expect_member<D: EquatableDomain>(constant: &ConstantValue) -> D::Value {
    match D::from_constant(constant) {
        Ok(value) => value,
        Err(err) => panic!("{} value set: {err}", D::NAME),
    }
}
