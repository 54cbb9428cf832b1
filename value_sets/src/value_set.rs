use crate::constant::ConstantValue;
use crate::domain::{
    expect_member, expect_value, ByteDomain, CharDomain, EquatableDomain, F32Domain, F64Domain, FloatingDomain,
    Int16Domain, Int32Domain, Int64Domain, NIntDomain, NUIntDomain, NumericDomain, SByteDomain, StringDomain,
    UInt16Domain, UInt32Domain, UInt64Domain,
};
use crate::relation::Relation;
use crate::sets::{
    BoolValueSet, DecimalValueSet, Diagnostics, EnumeratedValueSet, FloatingValueSet, NintValueSet, NuintValueSet,
    NumericValueSet, TypeId, TypeMatch, TypeUnionValueSet,
};
use derive_more::derive::Display;
use std::fmt::{Debug, Display, Formatter};

/// Operations shared by every value set representation.
///
/// Sets are immutable: every operation returns a new set. Combining two sets requires them to be
/// over the same domain.
pub trait ValueSetOps: Clone + Debug + Display {
    /// The type of the members of the set.
    type Value;

    fn is_empty(&self) -> bool;

    /// Returns true if some member `v` of the set satisfies `v <relation> value`.
    fn any(&self, relation: Relation, value: &Self::Value) -> bool;

    /// Returns true if every member `v` of the set satisfies `v <relation> value`, which always
    /// holds for the empty set.
    fn all(&self, relation: Relation, value: &Self::Value) -> bool;

    fn complement(&self) -> Self;
    fn intersect(&self, other: &Self) -> Self;
    fn union(&self, other: &Self) -> Self;

    /// A member of the set, `None` if the set is empty or has no member that can be materialized.
    fn sample(&self) -> Option<Self::Value>;
}

/// Forwards the trait to the inherent methods of a representation.
macro_rules! forward_ops {
    (impl[$($generics:tt)*] $set:ty, $value:ty, |$v:ident| $arg:expr) => {
        impl<$($generics)*> ValueSetOps for $set {
            type Value = $value;

            fn is_empty(&self) -> bool {
                <$set>::is_empty(self)
            }

            fn any(&self, relation: Relation, $v: &$value) -> bool {
                <$set>::any(self, relation, $arg)
            }

            fn all(&self, relation: Relation, $v: &$value) -> bool {
                <$set>::all(self, relation, $arg)
            }

            fn complement(&self) -> Self {
                <$set>::complement(self)
            }

            fn intersect(&self, other: &Self) -> Self {
                <$set>::intersect(self, other)
            }

            fn union(&self, other: &Self) -> Self {
                <$set>::union(self, other)
            }

            fn sample(&self) -> Option<$value> {
                <$set>::sample(self)
            }
        }
    };
}

forward_ops!(impl[] BoolValueSet, bool, |value| *value);
forward_ops!(impl[D: NumericDomain] NumericValueSet<D>, D::Value, |value| *value);
forward_ops!(impl[D: FloatingDomain] FloatingValueSet<D>, D::Value, |value| *value);
forward_ops!(impl[D: EquatableDomain] EnumeratedValueSet<D>, D::Value, |value| value);
forward_ops!(impl[] NintValueSet, i32, |value| *value);
forward_ops!(impl[] NuintValueSet, u32, |value| *value);

/// Members of a type union are designated by their candidate type, or `None` for null.
/// Only [`Relation::Equal`] is meaningful.
impl ValueSetOps for TypeUnionValueSet {
    type Value = Option<TypeId>;

    fn is_empty(&self) -> bool {
        TypeUnionValueSet::is_empty(self)
    }

    fn any(&self, relation: Relation, value: &Option<TypeId>) -> bool {
        check_type_relation(relation);
        self.eval(*value, &mut Diagnostics::discarding()) != TypeMatch::False
    }

    fn all(&self, relation: Relation, value: &Option<TypeId>) -> bool {
        check_type_relation(relation);
        let mut discard = Diagnostics::discarding();
        std::iter::once(None)
            .chain(self.candidates().iter().copied().map(Some))
            .all(|input| input == *value || self.eval(input, &mut discard) == TypeMatch::False)
    }

    fn complement(&self) -> Self {
        TypeUnionValueSet::complement(self)
    }

    fn intersect(&self, other: &Self) -> Self {
        TypeUnionValueSet::intersect(self, other)
    }

    fn union(&self, other: &Self) -> Self {
        TypeUnionValueSet::union(self, other)
    }

    fn sample(&self) -> Option<Option<TypeId>> {
        match self.sample_type() {
            Some(tpe) => Some(Some(tpe)),
            None if self.includes_null() => Some(None),
            None => None,
        }
    }
}

fn check_type_relation(relation: Relation) {
    assert_eq!(relation, Relation::Equal, "type union value set: unsupported relation {relation}");
}

/// Conversion of constants to the members of a representation.
trait ConstantMembers: ValueSetOps {
    /// # Panic
    /// Panics if the constant does not belong to the domain of the set.
    fn read(constant: &ConstantValue) -> Self::Value;

    fn sample_constant(&self) -> Option<ConstantValue>;
}

impl ConstantMembers for BoolValueSet {
    fn read(constant: &ConstantValue) -> bool {
        match constant {
            ConstantValue::Bool(b) => *b,
            other => panic!("bool value set: unexpected {} constant", other.kind()),
        }
    }

    fn sample_constant(&self) -> Option<ConstantValue> {
        self.sample().map(ConstantValue::Bool)
    }
}

impl<D: NumericDomain> ConstantMembers for NumericValueSet<D> {
    fn read(constant: &ConstantValue) -> D::Value {
        expect_value::<D>(constant)
    }

    fn sample_constant(&self) -> Option<ConstantValue> {
        self.sample().map(D::to_constant)
    }
}

impl<D: FloatingDomain> ConstantMembers for FloatingValueSet<D> {
    fn read(constant: &ConstantValue) -> D::Value {
        expect_value::<D>(constant)
    }

    fn sample_constant(&self) -> Option<ConstantValue> {
        self.sample().map(D::to_constant)
    }
}

impl<D: EquatableDomain> ConstantMembers for EnumeratedValueSet<D> {
    fn read(constant: &ConstantValue) -> D::Value {
        expect_member::<D>(constant)
    }

    fn sample_constant(&self) -> Option<ConstantValue> {
        self.sample().map(D::to_constant)
    }
}

impl ConstantMembers for NintValueSet {
    fn read(constant: &ConstantValue) -> i32 {
        expect_value::<NIntDomain>(constant)
    }

    fn sample_constant(&self) -> Option<ConstantValue> {
        self.sample().map(NIntDomain::to_constant)
    }
}

impl ConstantMembers for NuintValueSet {
    fn read(constant: &ConstantValue) -> u32 {
        expect_value::<NUIntDomain>(constant)
    }

    fn sample_constant(&self) -> Option<ConstantValue> {
        self.sample().map(NUIntDomain::to_constant)
    }
}

impl ConstantMembers for TypeUnionValueSet {
    /// Only `null` can be written as a constant.
    fn read(constant: &ConstantValue) -> Option<TypeId> {
        match constant {
            ConstantValue::Null => None,
            other => panic!("type union value set: unexpected {} constant", other.kind()),
        }
    }

    fn sample_constant(&self) -> Option<ConstantValue> {
        self.includes_null().then_some(ConstantValue::Null)
    }
}

fn any_constant<S: ConstantMembers>(set: &S, relation: Relation, constant: &ConstantValue) -> bool {
    set.any(relation, &S::read(constant))
}

fn all_constant<S: ConstantMembers>(set: &S, relation: Relation, constant: &ConstantValue) -> bool {
    set.all(relation, &S::read(constant))
}

/// The domain a value set ranges over.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Display)]
pub enum DomainKind {
    #[display("bool")]
    Bool,
    #[display("sbyte")]
    SByte,
    #[display("byte")]
    Byte,
    #[display("short")]
    Int16,
    #[display("ushort")]
    UInt16,
    #[display("int")]
    Int32,
    #[display("uint")]
    UInt32,
    #[display("long")]
    Int64,
    #[display("ulong")]
    UInt64,
    #[display("nint")]
    NInt,
    #[display("nuint")]
    NUInt,
    #[display("char")]
    Char,
    #[display("float")]
    Single,
    #[display("double")]
    Double,
    #[display("decimal")]
    Decimal,
    #[display("string")]
    String,
    #[display("type union")]
    TypeUnion,
}

/// A value set of any domain.
#[derive(Clone, Debug, PartialEq)]
pub enum ValueSet {
    Bool(BoolValueSet),
    SByte(NumericValueSet<SByteDomain>),
    Byte(NumericValueSet<ByteDomain>),
    Int16(NumericValueSet<Int16Domain>),
    UInt16(NumericValueSet<UInt16Domain>),
    Int32(NumericValueSet<Int32Domain>),
    UInt32(NumericValueSet<UInt32Domain>),
    Int64(NumericValueSet<Int64Domain>),
    UInt64(NumericValueSet<UInt64Domain>),
    NInt(NintValueSet),
    NUInt(NuintValueSet),
    Char(NumericValueSet<CharDomain>),
    Single(FloatingValueSet<F32Domain>),
    Double(FloatingValueSet<F64Domain>),
    Decimal(DecimalValueSet),
    String(EnumeratedValueSet<StringDomain>),
    TypeUnion(TypeUnionValueSet),
}

/// Applies the same expression to the representation of a set, whatever its domain.
macro_rules! dispatch {
    ($set:expr, |$s:ident| $body:expr) => {
        match $set {
            ValueSet::Bool($s) => $body,
            ValueSet::SByte($s) => $body,
            ValueSet::Byte($s) => $body,
            ValueSet::Int16($s) => $body,
            ValueSet::UInt16($s) => $body,
            ValueSet::Int32($s) => $body,
            ValueSet::UInt32($s) => $body,
            ValueSet::Int64($s) => $body,
            ValueSet::UInt64($s) => $body,
            ValueSet::NInt($s) => $body,
            ValueSet::NUInt($s) => $body,
            ValueSet::Char($s) => $body,
            ValueSet::Single($s) => $body,
            ValueSet::Double($s) => $body,
            ValueSet::Decimal($s) => $body,
            ValueSet::String($s) => $body,
            ValueSet::TypeUnion($s) => $body,
        }
    };
}

/// Same as [`dispatch`] for an operation producing a set of the same domain.
macro_rules! dispatch_map {
    ($set:expr, |$s:ident| $body:expr) => {
        match $set {
            ValueSet::Bool($s) => ValueSet::Bool($body),
            ValueSet::SByte($s) => ValueSet::SByte($body),
            ValueSet::Byte($s) => ValueSet::Byte($body),
            ValueSet::Int16($s) => ValueSet::Int16($body),
            ValueSet::UInt16($s) => ValueSet::UInt16($body),
            ValueSet::Int32($s) => ValueSet::Int32($body),
            ValueSet::UInt32($s) => ValueSet::UInt32($body),
            ValueSet::Int64($s) => ValueSet::Int64($body),
            ValueSet::UInt64($s) => ValueSet::UInt64($body),
            ValueSet::NInt($s) => ValueSet::NInt($body),
            ValueSet::NUInt($s) => ValueSet::NUInt($body),
            ValueSet::Char($s) => ValueSet::Char($body),
            ValueSet::Single($s) => ValueSet::Single($body),
            ValueSet::Double($s) => ValueSet::Double($body),
            ValueSet::Decimal($s) => ValueSet::Decimal($body),
            ValueSet::String($s) => ValueSet::String($body),
            ValueSet::TypeUnion($s) => ValueSet::TypeUnion($body),
        }
    };
}

/// Combines two sets of the same domain.
///
/// # Panic
/// Panics if the two sets range over different domains.
macro_rules! dispatch_pair {
    ($left:expr, $right:expr, |$a:ident, $b:ident| $body:expr) => {
        match ($left, $right) {
            (ValueSet::Bool($a), ValueSet::Bool($b)) => ValueSet::Bool($body),
            (ValueSet::SByte($a), ValueSet::SByte($b)) => ValueSet::SByte($body),
            (ValueSet::Byte($a), ValueSet::Byte($b)) => ValueSet::Byte($body),
            (ValueSet::Int16($a), ValueSet::Int16($b)) => ValueSet::Int16($body),
            (ValueSet::UInt16($a), ValueSet::UInt16($b)) => ValueSet::UInt16($body),
            (ValueSet::Int32($a), ValueSet::Int32($b)) => ValueSet::Int32($body),
            (ValueSet::UInt32($a), ValueSet::UInt32($b)) => ValueSet::UInt32($body),
            (ValueSet::Int64($a), ValueSet::Int64($b)) => ValueSet::Int64($body),
            (ValueSet::UInt64($a), ValueSet::UInt64($b)) => ValueSet::UInt64($body),
            (ValueSet::NInt($a), ValueSet::NInt($b)) => ValueSet::NInt($body),
            (ValueSet::NUInt($a), ValueSet::NUInt($b)) => ValueSet::NUInt($body),
            (ValueSet::Char($a), ValueSet::Char($b)) => ValueSet::Char($body),
            (ValueSet::Single($a), ValueSet::Single($b)) => ValueSet::Single($body),
            (ValueSet::Double($a), ValueSet::Double($b)) => ValueSet::Double($body),
            (ValueSet::Decimal($a), ValueSet::Decimal($b)) => ValueSet::Decimal($body),
            (ValueSet::String($a), ValueSet::String($b)) => ValueSet::String($body),
            (ValueSet::TypeUnion($a), ValueSet::TypeUnion($b)) => ValueSet::TypeUnion($body),
            (a, b) => panic!("cannot combine a {} value set with a {} value set", a.domain(), b.domain()),
        }
    };
}

impl ValueSet {
    pub fn domain(&self) -> DomainKind {
        match self {
            ValueSet::Bool(_) => DomainKind::Bool,
            ValueSet::SByte(_) => DomainKind::SByte,
            ValueSet::Byte(_) => DomainKind::Byte,
            ValueSet::Int16(_) => DomainKind::Int16,
            ValueSet::UInt16(_) => DomainKind::UInt16,
            ValueSet::Int32(_) => DomainKind::Int32,
            ValueSet::UInt32(_) => DomainKind::UInt32,
            ValueSet::Int64(_) => DomainKind::Int64,
            ValueSet::UInt64(_) => DomainKind::UInt64,
            ValueSet::NInt(_) => DomainKind::NInt,
            ValueSet::NUInt(_) => DomainKind::NUInt,
            ValueSet::Char(_) => DomainKind::Char,
            ValueSet::Single(_) => DomainKind::Single,
            ValueSet::Double(_) => DomainKind::Double,
            ValueSet::Decimal(_) => DomainKind::Decimal,
            ValueSet::String(_) => DomainKind::String,
            ValueSet::TypeUnion(_) => DomainKind::TypeUnion,
        }
    }

    /// Returns true if both sets have the same members. Type-union sets are compared by the
    /// outcome of their predicate on every input, other sets by their canonical representation.
    ///
    /// # Panic
    /// Panics if the two sets range over different domains.
    pub fn equivalent(&self, other: &ValueSet) -> bool {
        match (self, other) {
            (ValueSet::TypeUnion(a), ValueSet::TypeUnion(b)) => a.equivalent(b),
            (a, b) => {
                assert_eq!(
                    a.domain(),
                    b.domain(),
                    "cannot compare a {} value set with a {} value set",
                    a.domain(),
                    b.domain()
                );
                a == b
            }
        }
    }
}

/// Constants are read with the type of the set's domain. A bad constant is the result of an
/// earlier error: queries about it answer `true` so that no further diagnostic is derived from it.
impl ValueSetOps for ValueSet {
    type Value = ConstantValue;

    fn is_empty(&self) -> bool {
        dispatch!(self, |s| ValueSetOps::is_empty(s))
    }

    /// # Panic
    /// Panics if the constant is not of the set's domain, or if the relation is an ordering
    /// relation over an unordered domain.
    fn any(&self, relation: Relation, value: &ConstantValue) -> bool {
        if value.is_bad() {
            return true;
        }
        dispatch!(self, |s| any_constant(s, relation, value))
    }

    /// # Panic
    /// Panics if the constant is not of the set's domain, or if the relation is an ordering
    /// relation over an unordered domain.
    fn all(&self, relation: Relation, value: &ConstantValue) -> bool {
        if value.is_bad() {
            return true;
        }
        dispatch!(self, |s| all_constant(s, relation, value))
    }

    fn complement(&self) -> Self {
        dispatch_map!(self, |s| ValueSetOps::complement(s))
    }

    fn intersect(&self, other: &Self) -> Self {
        dispatch_pair!(self, other, |a, b| ValueSetOps::intersect(a, b))
    }

    fn union(&self, other: &Self) -> Self {
        dispatch_pair!(self, other, |a, b| ValueSetOps::union(a, b))
    }

    fn sample(&self) -> Option<ConstantValue> {
        dispatch!(self, |s| s.sample_constant())
    }
}

impl Display for ValueSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        dispatch!(self, |s| write!(f, "{s}"))
    }
}

macro_rules! from_set {
    ($($variant:ident($set:ty)),* $(,)?) => {
        $(
            impl From<$set> for ValueSet {
                fn from(set: $set) -> Self {
                    ValueSet::$variant(set)
                }
            }
        )*
    };
}

from_set!(
    Bool(BoolValueSet),
    SByte(NumericValueSet<SByteDomain>),
    Byte(NumericValueSet<ByteDomain>),
    Int16(NumericValueSet<Int16Domain>),
    UInt16(NumericValueSet<UInt16Domain>),
    Int32(NumericValueSet<Int32Domain>),
    UInt32(NumericValueSet<UInt32Domain>),
    Int64(NumericValueSet<Int64Domain>),
    UInt64(NumericValueSet<UInt64Domain>),
    NInt(NintValueSet),
    NUInt(NuintValueSet),
    Char(NumericValueSet<CharDomain>),
    Single(FloatingValueSet<F32Domain>),
    Double(FloatingValueSet<F64Domain>),
    Decimal(DecimalValueSet),
    String(EnumeratedValueSet<StringDomain>),
    TypeUnion(TypeUnionValueSet),
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::TypeHierarchy;
    use std::sync::Arc;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn shareable_between_threads() {
        assert_send_sync::<ValueSet>();
    }

    #[test]
    fn constant_queries() {
        let set = ValueSet::from(NumericValueSet::<Int16Domain>::including(1, 3));
        assert_eq!(set.domain(), DomainKind::Int16);
        assert!(set.any(Relation::Equal, &ConstantValue::Int16(2)));
        assert!(!set.all(Relation::GreaterThan, &ConstantValue::Int16(1)));
        assert!(set.any(Relation::GreaterThan, &ConstantValue::Bad));
        assert!(set.all(Relation::LessThan, &ConstantValue::Bad));
        assert_eq!(set.sample(), Some(ConstantValue::Int16(1)));
        assert_eq!(set.complement().complement(), set);
    }

    #[test]
    fn strings() {
        let set = ValueSet::from(EnumeratedValueSet::<StringDomain>::including(Arc::from("a")));
        assert!(set.all(Relation::Equal, &ConstantValue::from("a")));
        assert_eq!(set.complement().sample(), Some(ConstantValue::from("")));
        assert_eq!(set.to_string(), r#"{"a"}"#);
    }

    #[test]
    fn type_unions() {
        let ts = Arc::new(TypeHierarchy::new(vec![("A", None), ("B", None)]).unwrap());
        let candidates: Arc<[TypeId]> = ts.types().collect();
        let a = ts.id_of("A").unwrap();
        let set = ValueSet::from(TypeUnionValueSet::from_null_match(candidates.clone(), ts.clone()));
        assert!(set.any(Relation::Equal, &ConstantValue::Null));
        assert!(set.all(Relation::Equal, &ConstantValue::Null));
        assert_eq!(set.sample(), Some(ConstantValue::Null));
        let is_a = TypeUnionValueSet::from_type_match(a, candidates, ts);
        assert_eq!(ValueSetOps::sample(&is_a), Some(Some(a)));
        assert!(ValueSetOps::all(&is_a, Relation::Equal, &Some(a)));
        assert!(!ValueSetOps::any(&is_a, Relation::Equal, &None));
        let not_a = ValueSet::from(is_a.clone()).complement();
        assert!(not_a.equivalent(&ValueSet::from(is_a).complement()));
        assert_eq!(not_a.sample(), Some(ConstantValue::Null));
    }

    #[test]
    #[should_panic]
    fn mixed_domains() {
        let bytes = ValueSet::from(NumericValueSet::<ByteDomain>::all_values());
        let bools = ValueSet::from(BoolValueSet::ALL);
        let _ = bytes.union(&bools);
    }

    #[test]
    #[should_panic]
    fn constant_of_another_domain() {
        let bytes = ValueSet::from(NumericValueSet::<ByteDomain>::all_values());
        bytes.any(Relation::Equal, &ConstantValue::Int32(0));
    }
}
