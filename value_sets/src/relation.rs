use crate::error::ValueSetError;
use derive_more::derive::Display;
use std::str::FromStr;

/// A comparison that a pattern test applies between the tested value and a constant.
///
/// Only [`Relation::Equal`] is meaningful for unordered domains (strings, booleans).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Display)]
pub enum Relation {
    #[display("==")]
    Equal,
    #[display("<")]
    LessThan,
    #[display("<=")]
    LessThanOrEqual,
    #[display(">")]
    GreaterThan,
    #[display(">=")]
    GreaterThanOrEqual,
}

impl Relation {
    pub const ALL: [Relation; 5] = [
        Relation::Equal,
        Relation::LessThan,
        Relation::LessThanOrEqual,
        Relation::GreaterThan,
        Relation::GreaterThanOrEqual,
    ];

    /// Returns true for the four ordering relations.
    pub const fn is_ordering(self) -> bool {
        !matches!(self, Relation::Equal)
    }

    /// True if the relation holds for values below the pivot (`<` and `<=`).
    pub const fn looks_down(self) -> bool {
        matches!(self, Relation::LessThan | Relation::LessThanOrEqual)
    }

    /// True if the relation holds for values above the pivot (`>` and `>=`).
    pub const fn looks_up(self) -> bool {
        matches!(self, Relation::GreaterThan | Relation::GreaterThanOrEqual)
    }
}

impl FromStr for Relation {
    type Err = ValueSetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "==" | "=" => Ok(Relation::Equal),
            "<" => Ok(Relation::LessThan),
            "<=" => Ok(Relation::LessThanOrEqual),
            ">" => Ok(Relation::GreaterThan),
            ">=" => Ok(Relation::GreaterThanOrEqual),
            other => Err(ValueSetError::UnknownRelation(other.to_string())),
        }
    }
}
