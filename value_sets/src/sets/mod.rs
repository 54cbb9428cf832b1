//! Concrete value set representations, one per family of domains.

pub mod boolean;
pub mod enumerated;
pub mod floating;
pub mod native;
pub mod numeric;
pub mod type_union;

pub use boolean::BoolValueSet;
pub use enumerated::EnumeratedValueSet;
pub use floating::FloatingValueSet;
pub use native::{NintValueSet, NuintValueSet};
pub use numeric::{DecimalValueSet, NumericValueSet};
pub use type_union::{Diagnostics, TypeId, TypeMatch, TypeOracle, TypeUnionValueSet};
