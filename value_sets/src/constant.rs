use derive_more::derive::Display;
use rust_decimal::Decimal;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// A typed scalar produced by the constant folder of the compiler.
///
/// The value sets never build constants out of thin air: they receive them from the decision-DAG
/// builder and only hand some back as samples. A [`ConstantValue::Bad`] constant stands for an
/// expression that failed to bind; sets must answer conservatively when they see one.
#[derive(Clone, Debug, PartialEq)]
pub enum ConstantValue {
    Bad,
    Null,
    Bool(bool),
    SByte(i8),
    Byte(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    /// Native-width signed integer. Only a 32-bit witness is ever materialized at compile time.
    NInt(i32),
    /// Native-width unsigned integer. Only a 32-bit witness is ever materialized at compile time.
    NUInt(u32),
    /// A UTF-16 code unit.
    Char(u16),
    Single(f32),
    Double(f64),
    Decimal(Decimal),
    String(Arc<str>),
}

/// Discriminant of a [`ConstantValue`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Display)]
pub enum ConstantKind {
    #[display("bad")]
    Bad,
    #[display("null")]
    Null,
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
}

impl ConstantValue {
    /// Returns true if the constant is the result of a binding error.
    pub fn is_bad(&self) -> bool {
        matches!(self, ConstantValue::Bad)
    }

    pub fn kind(&self) -> ConstantKind {
        match self {
            ConstantValue::Bad => ConstantKind::Bad,
            ConstantValue::Null => ConstantKind::Null,
            ConstantValue::Bool(_) => ConstantKind::Bool,
            ConstantValue::SByte(_) => ConstantKind::SByte,
            ConstantValue::Byte(_) => ConstantKind::Byte,
            ConstantValue::Int16(_) => ConstantKind::Int16,
            ConstantValue::UInt16(_) => ConstantKind::UInt16,
            ConstantValue::Int32(_) => ConstantKind::Int32,
            ConstantValue::UInt32(_) => ConstantKind::UInt32,
            ConstantValue::Int64(_) => ConstantKind::Int64,
            ConstantValue::UInt64(_) => ConstantKind::UInt64,
            ConstantValue::NInt(_) => ConstantKind::NInt,
            ConstantValue::NUInt(_) => ConstantKind::NUInt,
            ConstantValue::Char(_) => ConstantKind::Char,
            ConstantValue::Single(_) => ConstantKind::Single,
            ConstantValue::Double(_) => ConstantKind::Double,
            ConstantValue::Decimal(_) => ConstantKind::Decimal,
            ConstantValue::String(_) => ConstantKind::String,
        }
    }

    pub fn string(s: &str) -> ConstantValue {
        ConstantValue::String(Arc::from(s))
    }
}

impl From<bool> for ConstantValue {
    fn from(value: bool) -> Self {
        ConstantValue::Bool(value)
    }
}

impl From<&str> for ConstantValue {
    fn from(value: &str) -> Self {
        ConstantValue::string(value)
    }
}

impl Display for ConstantValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConstantValue::Bad => write!(f, "<bad>"),
            ConstantValue::Null => write!(f, "null"),
            ConstantValue::Bool(b) => write!(f, "{b}"),
            ConstantValue::SByte(v) => write!(f, "{v}"),
            ConstantValue::Byte(v) => write!(f, "{v}"),
            ConstantValue::Int16(v) => write!(f, "{v}"),
            ConstantValue::UInt16(v) => write!(f, "{v}"),
            ConstantValue::Int32(v) => write!(f, "{v}"),
            ConstantValue::UInt32(v) => write!(f, "{v}"),
            ConstantValue::Int64(v) => write!(f, "{v}"),
            ConstantValue::UInt64(v) => write!(f, "{v}"),
            ConstantValue::NInt(v) => write!(f, "{v}"),
            ConstantValue::NUInt(v) => write!(f, "{v}"),
            ConstantValue::Char(unit) => write!(f, "{}", crate::domain::character::render_code_unit(*unit)),
            ConstantValue::Single(v) => write!(f, "{}", crate::domain::floating::format_general(*v as f64, 9)),
            ConstantValue::Double(v) => write!(f, "{}", crate::domain::floating::format_general(*v, 17)),
            ConstantValue::Decimal(d) => write!(f, "{}", d.normalize()),
            ConstantValue::String(s) => write!(f, "{s:?}"),
        }
    }
}
