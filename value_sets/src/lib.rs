//! Sets of values over a single primitive domain, used by a pattern-matching compiler to decide
//! whether the values still reaching a test are empty (the test is impossible), full (the test is
//! redundant) or neither.
//!
//! Each domain (booleans, integers of every width, characters, floating point numbers, decimals,
//! strings, native-width integers and the cases of a type union) has a dedicated immutable
//! representation. All representations are grouped in the closed [`ValueSet`] enum, and are created
//! through the singleton factories returned by [`factory_for`].
//!
//! ```
//! use value_sets::prelude::*;
//!
//! let int = factory_for(&TypeDescriptor::Special(SpecialType::Int32), false).unwrap();
//! let small = int.related(Relation::LessThan, &ConstantValue::Int32(5));
//! let large = int.related(Relation::GreaterThanOrEqual, &ConstantValue::Int32(10));
//! let remaining = small.union(&large).complement();
//! assert_eq!(remaining.to_string(), "[5..9]");
//! assert_eq!(remaining.sample(), Some(ConstantValue::Int32(5)));
//! ```

pub mod constant;
pub mod domain;
pub mod error;
pub mod factory;
pub mod hierarchy;
pub mod interval;
pub mod params;
pub mod prelude;
pub mod relation;
pub mod sets;
pub mod value_set;

pub use constant::{ConstantKind, ConstantValue};
pub use error::ValueSetError;
pub use factory::{factory_for, SpecialType, TypeDescriptor, ValueSetFactory};
pub use relation::Relation;
pub use value_set::{DomainKind, ValueSet, ValueSetOps};
