//! Module that re-export most commonly used types and traits to ease import.

pub use crate::constant::ConstantValue;
pub use crate::factory::{factory_for, SpecialType, TypeDescriptor, ValueSetFactory};
pub use crate::relation::Relation;
pub use crate::value_set::{ValueSet, ValueSetOps};
