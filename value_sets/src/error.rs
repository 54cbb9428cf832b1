use crate::constant::ConstantKind;
use thiserror::Error;

/// Failures of the conversions happening at the boundary of the crate.
///
/// Set operations themselves never fail: unknown or erroneous inputs are answered conservatively,
/// and misuse (e.g. mixing domains) is a programming error that panics.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum ValueSetError {
    #[error("a constant of kind {found} cannot be read as {expected}")]
    ConstantKind { expected: ConstantKind, found: ConstantKind },
    #[error("unknown relation operator `{0}`")]
    UnknownRelation(String),
    #[error("unknown special type `{0}`")]
    UnknownSpecialType(String),
    #[error("following types are not reachable from any root type: {0:?}")]
    UnreachableFromRoot(Vec<String>),
    #[error("duplicated type name `{0}`")]
    DuplicatedType(String),
}
