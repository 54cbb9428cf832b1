//! Creation of value sets, and the registry mapping the types of the tested values to their
//! factory.
//!
//! Factories are stateless singletons, except for type unions whose factory carries the list of
//! candidate types.

use crate::constant::ConstantValue;
use crate::domain::{
    expect_member, expect_value, ByteDomain, CharDomain, DecimalDomain, EquatableDomain, F32Domain, F64Domain,
    FloatingDomain, Int16Domain, Int32Domain, Int64Domain, NIntDomain, NUIntDomain, NumericDomain, SByteDomain,
    StringDomain, UInt16Domain, UInt32Domain, UInt64Domain,
};
use crate::error::ValueSetError;
use crate::relation::Relation;
use crate::sets::{
    BoolValueSet, EnumeratedValueSet, FloatingValueSet, NintValueSet, NuintValueSet, NumericValueSet, TypeId,
    TypeOracle, TypeUnionValueSet,
};
use crate::value_set::{DomainKind, ValueSet};
use derive_more::derive::Display;
use rand::{Rng, RngCore};
use std::marker::PhantomData;
use std::str::FromStr;
use std::sync::Arc;

/// Creates the value sets of a single domain.
///
/// Constants handed to a factory must belong to its domain, with the exception of
/// [`ConstantValue::Bad`] which stands for an erroneous expression: it yields the unconstrained set,
/// so that no "always/never" diagnostic can be derived from an error.
pub trait ValueSetFactory: Send + Sync {
    fn domain(&self) -> DomainKind;

    fn all_values(&self) -> ValueSet;

    fn no_values(&self) -> ValueSet;

    /// The set of all values `v` such that `v <relation> value`.
    fn related(&self, relation: Relation, value: &ConstantValue) -> ValueSet;

    /// A random set made of about `expected_size` parts, for testing.
    fn random(&self, expected_size: usize, rng: &mut dyn RngCore) -> ValueSet;

    /// A random value of the domain, for testing.
    fn random_value(&self, rng: &mut dyn RngCore) -> ConstantValue;

    /// Evaluates `left <relation> right`. Answers `true` when either constant is bad.
    fn related_values(&self, relation: Relation, left: &ConstantValue, right: &ConstantValue) -> bool;
}

fn unconstrained(factory: &dyn ValueSetFactory, relation: Relation) -> ValueSet {
    tracing::trace!("{} value set: bad constant in `{relation}` test, assuming all values", factory.domain());
    factory.all_values()
}

pub struct NumericValueSetFactory<D: NumericDomain> {
    kind: DomainKind,
    _domain: PhantomData<D>,
}

impl<D: NumericDomain> NumericValueSetFactory<D> {
    const fn new(kind: DomainKind) -> Self {
        NumericValueSetFactory {
            kind,
            _domain: PhantomData,
        }
    }
}

impl<D: NumericDomain> ValueSetFactory for NumericValueSetFactory<D>
where
    ValueSet: From<NumericValueSet<D>>,
{
    fn domain(&self) -> DomainKind {
        self.kind
    }

    fn all_values(&self) -> ValueSet {
        NumericValueSet::<D>::all_values().into()
    }

    fn no_values(&self) -> ValueSet {
        NumericValueSet::<D>::no_values().into()
    }

    fn related(&self, relation: Relation, value: &ConstantValue) -> ValueSet {
        if value.is_bad() {
            return unconstrained(self, relation);
        }
        NumericValueSet::<D>::related(relation, expect_value::<D>(value)).into()
    }

    fn random(&self, expected_size: usize, rng: &mut dyn RngCore) -> ValueSet {
        NumericValueSet::<D>::random(expected_size, rng).into()
    }

    fn random_value(&self, rng: &mut dyn RngCore) -> ConstantValue {
        D::to_constant(D::random(rng))
    }

    fn related_values(&self, relation: Relation, left: &ConstantValue, right: &ConstantValue) -> bool {
        if left.is_bad() || right.is_bad() {
            return true;
        }
        D::related(relation, expect_value::<D>(left), expect_value::<D>(right))
    }
}

pub struct FloatingValueSetFactory<D: FloatingDomain> {
    kind: DomainKind,
    _domain: PhantomData<D>,
}

impl<D: FloatingDomain> FloatingValueSetFactory<D> {
    const fn new(kind: DomainKind) -> Self {
        FloatingValueSetFactory {
            kind,
            _domain: PhantomData,
        }
    }
}

impl<D: FloatingDomain> ValueSetFactory for FloatingValueSetFactory<D>
where
    ValueSet: From<FloatingValueSet<D>>,
{
    fn domain(&self) -> DomainKind {
        self.kind
    }

    fn all_values(&self) -> ValueSet {
        FloatingValueSet::<D>::all_values().into()
    }

    fn no_values(&self) -> ValueSet {
        FloatingValueSet::<D>::no_values().into()
    }

    fn related(&self, relation: Relation, value: &ConstantValue) -> ValueSet {
        if value.is_bad() {
            return unconstrained(self, relation);
        }
        FloatingValueSet::<D>::related(relation, expect_value::<D>(value)).into()
    }

    fn random(&self, expected_size: usize, rng: &mut dyn RngCore) -> ValueSet {
        FloatingValueSet::<D>::random(expected_size, rng).into()
    }

    /// Finite values, with the occasional NaN or infinity.
    fn random_value(&self, rng: &mut dyn RngCore) -> ConstantValue {
        let value = match rng.random_range(0..20) {
            0 => D::nan(),
            1 => D::negative_infinity(),
            2 => D::positive_infinity(),
            _ => D::random(rng),
        };
        D::to_constant(value)
    }

    fn related_values(&self, relation: Relation, left: &ConstantValue, right: &ConstantValue) -> bool {
        if left.is_bad() || right.is_bad() {
            return true;
        }
        D::related(relation, expect_value::<D>(left), expect_value::<D>(right))
    }
}

pub struct EnumeratedValueSetFactory<D: EquatableDomain> {
    kind: DomainKind,
    _domain: PhantomData<D>,
}

impl<D: EquatableDomain> EnumeratedValueSetFactory<D> {
    const fn new(kind: DomainKind) -> Self {
        EnumeratedValueSetFactory {
            kind,
            _domain: PhantomData,
        }
    }
}

impl<D: EquatableDomain> ValueSetFactory for EnumeratedValueSetFactory<D>
where
    ValueSet: From<EnumeratedValueSet<D>>,
{
    fn domain(&self) -> DomainKind {
        self.kind
    }

    fn all_values(&self) -> ValueSet {
        EnumeratedValueSet::<D>::all_values().into()
    }

    fn no_values(&self) -> ValueSet {
        EnumeratedValueSet::<D>::no_values().into()
    }

    fn related(&self, relation: Relation, value: &ConstantValue) -> ValueSet {
        if value.is_bad() {
            return unconstrained(self, relation);
        }
        EnumeratedValueSet::<D>::related(relation, expect_member::<D>(value)).into()
    }

    fn random(&self, expected_size: usize, rng: &mut dyn RngCore) -> ValueSet {
        EnumeratedValueSet::<D>::random(expected_size, rng).into()
    }

    fn random_value(&self, rng: &mut dyn RngCore) -> ConstantValue {
        D::to_constant(D::random(rng))
    }

    /// # Panic
    /// Panics on ordering relations, which are meaningless for unordered domains.
    fn related_values(&self, relation: Relation, left: &ConstantValue, right: &ConstantValue) -> bool {
        if left.is_bad() || right.is_bad() {
            return true;
        }
        assert_eq!(relation, Relation::Equal, "{} value set: unsupported relation {relation}", D::NAME);
        expect_member::<D>(left) == expect_member::<D>(right)
    }
}

pub struct BoolValueSetFactory;

fn expect_bool(constant: &ConstantValue) -> bool {
    match constant {
        ConstantValue::Bool(b) => *b,
        other => panic!("bool value set: unexpected {} constant", other.kind()),
    }
}

impl ValueSetFactory for BoolValueSetFactory {
    fn domain(&self) -> DomainKind {
        DomainKind::Bool
    }

    fn all_values(&self) -> ValueSet {
        BoolValueSet::ALL.into()
    }

    fn no_values(&self) -> ValueSet {
        BoolValueSet::NONE.into()
    }

    fn related(&self, relation: Relation, value: &ConstantValue) -> ValueSet {
        if value.is_bad() {
            return unconstrained(self, relation);
        }
        BoolValueSet::related(relation, expect_bool(value)).into()
    }

    fn random(&self, _expected_size: usize, rng: &mut dyn RngCore) -> ValueSet {
        BoolValueSet::new(rng.random(), rng.random()).into()
    }

    fn random_value(&self, rng: &mut dyn RngCore) -> ConstantValue {
        ConstantValue::Bool(rng.random())
    }

    /// # Panic
    /// Panics on ordering relations.
    fn related_values(&self, relation: Relation, left: &ConstantValue, right: &ConstantValue) -> bool {
        if left.is_bad() || right.is_bad() {
            return true;
        }
        assert_eq!(relation, Relation::Equal, "bool value set: unsupported relation {relation}");
        expect_bool(left) == expect_bool(right)
    }
}

pub struct NintValueSetFactory;

impl ValueSetFactory for NintValueSetFactory {
    fn domain(&self) -> DomainKind {
        DomainKind::NInt
    }

    fn all_values(&self) -> ValueSet {
        NintValueSet::all_values().into()
    }

    fn no_values(&self) -> ValueSet {
        NintValueSet::no_values().into()
    }

    fn related(&self, relation: Relation, value: &ConstantValue) -> ValueSet {
        if value.is_bad() {
            return unconstrained(self, relation);
        }
        NintValueSet::related(relation, expect_value::<NIntDomain>(value)).into()
    }

    fn random(&self, expected_size: usize, rng: &mut dyn RngCore) -> ValueSet {
        NintValueSet::random(expected_size, rng).into()
    }

    fn random_value(&self, rng: &mut dyn RngCore) -> ConstantValue {
        NIntDomain::to_constant(NIntDomain::random(rng))
    }

    fn related_values(&self, relation: Relation, left: &ConstantValue, right: &ConstantValue) -> bool {
        if left.is_bad() || right.is_bad() {
            return true;
        }
        NIntDomain::related(relation, expect_value::<NIntDomain>(left), expect_value::<NIntDomain>(right))
    }
}

pub struct NuintValueSetFactory;

impl ValueSetFactory for NuintValueSetFactory {
    fn domain(&self) -> DomainKind {
        DomainKind::NUInt
    }

    fn all_values(&self) -> ValueSet {
        NuintValueSet::all_values().into()
    }

    fn no_values(&self) -> ValueSet {
        NuintValueSet::no_values().into()
    }

    fn related(&self, relation: Relation, value: &ConstantValue) -> ValueSet {
        if value.is_bad() {
            return unconstrained(self, relation);
        }
        NuintValueSet::related(relation, expect_value::<NUIntDomain>(value)).into()
    }

    fn random(&self, expected_size: usize, rng: &mut dyn RngCore) -> ValueSet {
        NuintValueSet::random(expected_size, rng).into()
    }

    fn random_value(&self, rng: &mut dyn RngCore) -> ConstantValue {
        NUIntDomain::to_constant(NUIntDomain::random(rng))
    }

    fn related_values(&self, relation: Relation, left: &ConstantValue, right: &ConstantValue) -> bool {
        if left.is_bad() || right.is_bad() {
            return true;
        }
        NUIntDomain::related(relation, expect_value::<NUIntDomain>(left), expect_value::<NUIntDomain>(right))
    }
}

/// Factory of the value sets of one type union. The only constant of a union is `null`.
#[derive(Clone)]
pub struct TypeUnionValueSetFactory {
    candidates: Arc<[TypeId]>,
    oracle: Arc<dyn TypeOracle>,
}

impl TypeUnionValueSetFactory {
    pub fn new(candidates: impl Into<Arc<[TypeId]>>, oracle: Arc<dyn TypeOracle>) -> Self {
        TypeUnionValueSetFactory {
            candidates: candidates.into(),
            oracle,
        }
    }

    pub fn from_type_match(&self, pattern: TypeId) -> ValueSet {
        TypeUnionValueSet::from_type_match(pattern, self.candidates.clone(), self.oracle.clone()).into()
    }

    pub fn from_null_match(&self) -> ValueSet {
        TypeUnionValueSet::from_null_match(self.candidates.clone(), self.oracle.clone()).into()
    }

    pub fn from_non_null_match(&self) -> ValueSet {
        TypeUnionValueSet::from_non_null_match(self.candidates.clone(), self.oracle.clone()).into()
    }
}

impl ValueSetFactory for TypeUnionValueSetFactory {
    fn domain(&self) -> DomainKind {
        DomainKind::TypeUnion
    }

    fn all_values(&self) -> ValueSet {
        TypeUnionValueSet::all_values(self.candidates.clone(), self.oracle.clone()).into()
    }

    fn no_values(&self) -> ValueSet {
        TypeUnionValueSet::no_values(self.candidates.clone(), self.oracle.clone()).into()
    }

    /// `== null` selects the null value; any other test leaves all values possible.
    fn related(&self, relation: Relation, value: &ConstantValue) -> ValueSet {
        match (relation, value) {
            (Relation::Equal, ConstantValue::Null) => self.from_null_match(),
            (_, ConstantValue::Bad) => unconstrained(self, relation),
            _ => {
                tracing::debug!("type union value set: unsupported test `{relation} {value}`, assuming all values");
                self.all_values()
            }
        }
    }

    fn random(&self, expected_size: usize, rng: &mut dyn RngCore) -> ValueSet {
        TypeUnionValueSet::random(expected_size, self.candidates.clone(), self.oracle.clone(), rng).into()
    }

    fn random_value(&self, _rng: &mut dyn RngCore) -> ConstantValue {
        ConstantValue::Null
    }

    fn related_values(&self, relation: Relation, left: &ConstantValue, right: &ConstantValue) -> bool {
        if left.is_bad() || right.is_bad() {
            return true;
        }
        assert_eq!(relation, Relation::Equal, "type union value set: unsupported relation {relation}");
        matches!((left, right), (ConstantValue::Null, ConstantValue::Null))
    }
}

pub static BOOL: BoolValueSetFactory = BoolValueSetFactory;
pub static SBYTE: NumericValueSetFactory<SByteDomain> = NumericValueSetFactory::new(DomainKind::SByte);
pub static BYTE: NumericValueSetFactory<ByteDomain> = NumericValueSetFactory::new(DomainKind::Byte);
pub static SHORT: NumericValueSetFactory<Int16Domain> = NumericValueSetFactory::new(DomainKind::Int16);
pub static USHORT: NumericValueSetFactory<UInt16Domain> = NumericValueSetFactory::new(DomainKind::UInt16);
pub static INT: NumericValueSetFactory<Int32Domain> = NumericValueSetFactory::new(DomainKind::Int32);
pub static UINT: NumericValueSetFactory<UInt32Domain> = NumericValueSetFactory::new(DomainKind::UInt32);
pub static LONG: NumericValueSetFactory<Int64Domain> = NumericValueSetFactory::new(DomainKind::Int64);
pub static ULONG: NumericValueSetFactory<UInt64Domain> = NumericValueSetFactory::new(DomainKind::UInt64);
pub static NINT: NintValueSetFactory = NintValueSetFactory;
pub static NUINT: NuintValueSetFactory = NuintValueSetFactory;
pub static CHAR: NumericValueSetFactory<CharDomain> = NumericValueSetFactory::new(DomainKind::Char);
pub static FLOAT: FloatingValueSetFactory<F32Domain> = FloatingValueSetFactory::new(DomainKind::Single);
pub static DOUBLE: FloatingValueSetFactory<F64Domain> = FloatingValueSetFactory::new(DomainKind::Double);
pub static DECIMAL: NumericValueSetFactory<DecimalDomain> = NumericValueSetFactory::new(DomainKind::Decimal);
pub static STRING: EnumeratedValueSetFactory<StringDomain> = EnumeratedValueSetFactory::new(DomainKind::String);

/// Every singleton factory.
pub static ALL_FACTORIES: [&dyn ValueSetFactory; 16] = [
    &BOOL, &SBYTE, &BYTE, &SHORT, &USHORT, &INT, &UINT, &LONG, &ULONG, &NINT, &NUINT, &CHAR, &FLOAT, &DOUBLE, &DECIMAL,
    &STRING,
];

/// Primitive types known to the compiler.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Display)]
pub enum SpecialType {
    #[display("bool")]
    Boolean,
    #[display("char")]
    Char,
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
    #[display("System.IntPtr")]
    IntPtr,
    #[display("System.UIntPtr")]
    UIntPtr,
    #[display("float")]
    Single,
    #[display("double")]
    Double,
    #[display("decimal")]
    Decimal,
    #[display("string")]
    String,
    #[display("object")]
    Object,
}

impl FromStr for SpecialType {
    type Err = ValueSetError;

    /// Accepts keywords (`int`) as well as qualified names (`System.Int32`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tpe = match s {
            "bool" | "System.Boolean" => SpecialType::Boolean,
            "char" | "System.Char" => SpecialType::Char,
            "sbyte" | "System.SByte" => SpecialType::SByte,
            "byte" | "System.Byte" => SpecialType::Byte,
            "short" | "System.Int16" => SpecialType::Int16,
            "ushort" | "System.UInt16" => SpecialType::UInt16,
            "int" | "System.Int32" => SpecialType::Int32,
            "uint" | "System.UInt32" => SpecialType::UInt32,
            "long" | "System.Int64" => SpecialType::Int64,
            "ulong" | "System.UInt64" => SpecialType::UInt64,
            "nint" | "System.IntPtr" => SpecialType::IntPtr,
            "nuint" | "System.UIntPtr" => SpecialType::UIntPtr,
            "float" | "System.Single" => SpecialType::Single,
            "double" | "System.Double" => SpecialType::Double,
            "decimal" | "System.Decimal" => SpecialType::Decimal,
            "string" | "System.String" => SpecialType::String,
            "object" | "System.Object" => SpecialType::Object,
            _ => return Err(ValueSetError::UnknownSpecialType(s.to_string())),
        };
        Ok(tpe)
    }
}

/// The type of a tested value, as far as the choice of a factory is concerned.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TypeDescriptor {
    Special(SpecialType),
    /// An enumeration, whose values are those of its underlying integral type.
    Enum { underlying: SpecialType },
    /// A span of characters, matched against string constants.
    CharSpan,
    Other,
}

/// Returns the factory of the values of type `tpe`, or `None` if values of that type are not
/// tracked. `is_native_width` tells native-width integers (`nint`, `nuint`) apart from the
/// pointer types they are represented with.
pub fn factory_for(tpe: &TypeDescriptor, is_native_width: bool) -> Option<&'static dyn ValueSetFactory> {
    let special = match tpe {
        TypeDescriptor::Special(special) | TypeDescriptor::Enum { underlying: special } => *special,
        TypeDescriptor::CharSpan => return Some(&STRING),
        TypeDescriptor::Other => {
            tracing::debug!("no value set factory for {tpe:?}");
            return None;
        }
    };
    let factory: &'static dyn ValueSetFactory = match (special, is_native_width) {
        (SpecialType::IntPtr, true) => &NINT,
        (SpecialType::UIntPtr, true) => &NUINT,
        (SpecialType::Boolean, _) => &BOOL,
        (SpecialType::Char, _) => &CHAR,
        (SpecialType::SByte, _) => &SBYTE,
        (SpecialType::Byte, _) => &BYTE,
        (SpecialType::Int16, _) => &SHORT,
        (SpecialType::UInt16, _) => &USHORT,
        (SpecialType::Int32, _) => &INT,
        (SpecialType::UInt32, _) => &UINT,
        (SpecialType::Int64, _) => &LONG,
        (SpecialType::UInt64, _) => &ULONG,
        (SpecialType::Single, _) => &FLOAT,
        (SpecialType::Double, _) => &DOUBLE,
        (SpecialType::Decimal, _) => &DECIMAL,
        (SpecialType::String, _) => &STRING,
        (SpecialType::IntPtr | SpecialType::UIntPtr | SpecialType::Object, _) => {
            tracing::debug!("no value set factory for {tpe:?} (native width: {is_native_width})");
            return None;
        }
    };
    Some(factory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::TypeHierarchy;
    use crate::value_set::ValueSetOps;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn special(name: &str) -> TypeDescriptor {
        TypeDescriptor::Special(name.parse().unwrap())
    }

    #[test]
    fn registry() {
        let domain = |tpe: &TypeDescriptor, native| factory_for(tpe, native).map(|f| f.domain());
        assert_eq!(domain(&special("int"), false), Some(DomainKind::Int32));
        assert_eq!(domain(&special("int"), true), Some(DomainKind::Int32));
        assert_eq!(domain(&special("uint"), true), Some(DomainKind::UInt32));
        assert_eq!(domain(&special("nint"), true), Some(DomainKind::NInt));
        assert_eq!(domain(&special("System.UIntPtr"), true), Some(DomainKind::NUInt));
        assert_eq!(domain(&special("nint"), false), None);
        assert_eq!(domain(&special("object"), false), None);
        assert_eq!(domain(&TypeDescriptor::Other, false), None);
        assert_eq!(domain(&TypeDescriptor::CharSpan, false), Some(DomainKind::String));
        let enumeration = TypeDescriptor::Enum {
            underlying: SpecialType::Byte,
        };
        assert_eq!(domain(&enumeration, false), Some(DomainKind::Byte));
        assert_eq!("Int".parse::<SpecialType>(), Err(ValueSetError::UnknownSpecialType("Int".to_string())));
    }

    #[test]
    fn factories_report_their_domain() {
        for factory in ALL_FACTORIES {
            assert_eq!(factory.all_values().domain(), factory.domain());
            assert_eq!(factory.no_values().domain(), factory.domain());
            assert!(factory.no_values().is_empty());
            assert!(!factory.all_values().is_empty());
        }
    }

    #[test]
    fn bad_constants_constrain_nothing() {
        for factory in ALL_FACTORIES {
            for relation in Relation::ALL {
                assert_eq!(factory.related(relation, &ConstantValue::Bad), factory.all_values());
            }
            let value = factory.random_value(&mut SmallRng::seed_from_u64(0));
            assert!(factory.related_values(Relation::Equal, &ConstantValue::Bad, &value));
            assert!(factory.no_values().any(Relation::Equal, &ConstantValue::Bad));
        }
    }

    #[test]
    fn seeded_sets_contain_their_pivot() {
        let mut rng = SmallRng::seed_from_u64(crate::params::FUZZ_SEED.get());
        for factory in ALL_FACTORIES {
            for _ in 0..20 {
                let value = factory.random_value(&mut rng);
                let set = factory.related(Relation::Equal, &value);
                assert!(set.any(Relation::Equal, &value), "{} {value}", factory.domain());
                assert!(set.all(Relation::Equal, &value), "{} {value}", factory.domain());
                assert!(factory.related_values(Relation::Equal, &value, &value));
                assert!(!set.complement().any(Relation::Equal, &value), "{} {value}", factory.domain());
            }
        }
    }

    #[test]
    fn relations_between_constants() {
        assert!(INT.related_values(Relation::LessThan, &ConstantValue::Int32(1), &ConstantValue::Int32(2)));
        let nan = ConstantValue::Double(f64::NAN);
        assert!(!DOUBLE.related_values(Relation::LessThanOrEqual, &nan, &nan));
        assert!(DOUBLE.related_values(Relation::Equal, &nan, &nan));
        assert!(!STRING.related_values(Relation::Equal, &ConstantValue::from("a"), &ConstantValue::from("b")));
        assert!(BOOL.related_values(Relation::Equal, &ConstantValue::Bool(true), &ConstantValue::Bool(true)));
    }

    #[test]
    fn chars_are_code_units() {
        let up_to_last = CHAR.related(Relation::LessThanOrEqual, &ConstantValue::Char(0xFFFF));
        assert_eq!(up_to_last, CHAR.all_values());
        assert!(up_to_last.complement().is_empty());
        assert_eq!(up_to_last.complement().sample(), None);

        let surrogate = ConstantValue::Char(0xD800);
        let set = CHAR.related(Relation::Equal, &surrogate);
        assert_eq!(set.sample(), Some(surrogate.clone()));
        assert_eq!(set.to_string(), "['\\u{d800}'..'\\u{d800}']");
        assert!(CHAR.related_values(Relation::LessThan, &ConstantValue::Char(0xD7FF), &surrogate));
    }

    #[test]
    fn native_width() {
        let negative = NINT.related(Relation::LessThan, &ConstantValue::NInt(0));
        let ValueSet::NInt(set) = &negative else { panic!("{negative:?}") };
        assert!(set.has_small() && !set.has_large());
        assert!(negative.any(Relation::LessThan, &ConstantValue::NInt(i32::MIN)));
        assert_eq!(negative.to_string(), "Small,[-2147483648..-1]");
    }

    #[test]
    fn type_unions() {
        let ts = Arc::new(TypeHierarchy::new(vec![("A", None), ("B", None)]).unwrap());
        let a = ts.id_of("A").unwrap();
        let b = ts.id_of("B").unwrap();
        let factory = TypeUnionValueSetFactory::new(vec![a, b], ts);
        let is_a = factory.from_type_match(a);
        let is_b = factory.from_type_match(b);
        assert!(is_a.intersect(&is_b).is_empty());
        assert_eq!(factory.related(Relation::Equal, &ConstantValue::Null), factory.from_null_match());
        assert!(factory.related(Relation::Equal, &ConstantValue::Bad).equivalent(&factory.all_values()));
        let rest = is_a.union(&is_b).union(&factory.from_null_match()).complement();
        assert!(rest.is_empty());
        assert!(factory.from_non_null_match().complement().equivalent(&factory.from_null_match()));
    }
}
