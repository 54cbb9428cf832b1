//! A nominal single-inheritance type system, usable as the oracle of type-union value sets.

use crate::error::ValueSetError;
use crate::sets::type_union::{Diagnostics, TypeId, TypeMatch, TypeOracle};
use hashbrown::HashMap;
use std::sync::Arc;

/// Types are numbered in depth-first order from a hidden top type, so that the subtypes of a type
/// form a contiguous range of identifiers starting at the type itself.
#[derive(Clone, Debug)]
pub struct TypeHierarchy {
    names: Vec<Arc<str>>,
    ids: HashMap<Arc<str>, TypeId>,
    last_subtype: Vec<TypeId>,
}

const TOP_TYPE: &str = "★any★";

impl TypeHierarchy {
    /// Constructs the type hierarchy from a set of (type, optional-parent) tuples.
    pub fn new<S: AsRef<str>>(types: impl IntoIterator<Item = (S, Option<S>)>) -> Result<Self, ValueSetError> {
        let mut pending: Vec<(Arc<str>, Arc<str>)> = Vec::new();
        for (name, parent) in types {
            let parent = parent.map_or(Arc::from(TOP_TYPE), |p| Arc::from(p.as_ref()));
            pending.push((Arc::from(name.as_ref()), parent));
        }
        let mut sys = TypeHierarchy {
            names: Vec::new(),
            ids: HashMap::new(),
            last_subtype: Vec::new(),
        };
        sys.push(Arc::from(TOP_TYPE))?;

        let mut trace: Vec<TypeId> = vec![TypeId::from(0)];
        while let Some(&parent) = trace.last() {
            let parent_name = &sys.names[usize::from(parent)];
            match pending.iter().position(|(_, p)| p == parent_name) {
                Some(pos_of_child) => {
                    let (child, _) = pending.remove(pos_of_child);
                    let child = sys.push(child)?;
                    // start looking for its children
                    trace.push(child);
                }
                None => {
                    // before removing from trace, record the id of the last child.
                    sys.last_subtype[usize::from(parent)] = TypeId::from(sys.names.len() - 1);
                    trace.pop();
                }
            }
        }
        if pending.is_empty() {
            Ok(sys)
        } else {
            Err(ValueSetError::UnreachableFromRoot(
                pending.into_iter().map(|(name, _)| name.to_string()).collect(),
            ))
        }
    }

    fn push(&mut self, name: Arc<str>) -> Result<TypeId, ValueSetError> {
        let id = TypeId::from(self.names.len());
        if self.ids.insert(name.clone(), id).is_some() {
            return Err(ValueSetError::DuplicatedType(name.to_string()));
        }
        self.names.push(name);
        self.last_subtype.push(id);
        Ok(id)
    }

    pub fn top_type(&self) -> TypeId {
        TypeId::from(0)
    }

    pub fn id_of(&self, name: &str) -> Option<TypeId> {
        self.ids.get(name).copied()
    }

    pub fn name_of(&self, tid: TypeId) -> &str {
        &self.names[usize::from(tid)]
    }

    pub fn is_subtype(&self, tpe: TypeId, possible_subtype: TypeId) -> bool {
        tpe <= possible_subtype && possible_subtype <= self.last_subtype[usize::from(tpe)]
    }

    /// Returns true if the two types may have common values
    pub fn are_compatible(&self, t1: TypeId, t2: TypeId) -> bool {
        t1 == t2 || self.is_subtype(t1, t2) || self.is_subtype(t2, t1)
    }

    /// Iterator on all user types by increasing identifier.
    pub fn types(&self) -> impl Iterator<Item = TypeId> + '_ {
        (1..self.names.len()).map(TypeId::from)
    }
}

impl TypeOracle for TypeHierarchy {
    fn matches(&self, candidate: TypeId, pattern: TypeId, diagnostics: &mut Diagnostics) -> TypeMatch {
        if self.is_subtype(pattern, candidate) {
            TypeMatch::True
        } else if self.are_compatible(candidate, pattern) {
            diagnostics.report(|| {
                format!(
                    "a {} may or may not be a {}",
                    self.name_of(candidate),
                    self.name_of(pattern)
                )
            });
            TypeMatch::Unknown
        } else {
            TypeMatch::False
        }
    }

    fn type_name(&self, tpe: TypeId) -> String {
        self.name_of(tpe).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sets::type_union::TypeUnionValueSet;

    fn hierarchy() -> TypeHierarchy {
        TypeHierarchy::new(vec![
            ("A", None),
            ("B", None),
            ("A1", Some("A")),
            ("A11", Some("A1")),
            ("A2", Some("A")),
            ("A12", Some("A1")),
        ])
        .unwrap()
    }

    #[test]
    fn type_system() {
        let ts = hierarchy();
        let types = ["A", "B", "A1", "A11", "A12", "A2"];
        let ids: Vec<TypeId> = types.iter().map(|name| ts.id_of(name).unwrap()).collect();
        let [a, b, a1, a11, a12, a2] = *ids else { unreachable!() };
        assert!(ts.is_subtype(a, a));
        assert!(ts.is_subtype(a, a1));
        assert!(ts.is_subtype(a, a11));
        assert!(ts.is_subtype(a, a12));
        assert!(ts.is_subtype(a, a2));

        assert!(ts.is_subtype(a1, a11));
        assert!(ts.is_subtype(a1, a12));
        assert!(!ts.is_subtype(a1, a));
        assert!(!ts.is_subtype(a1, a2));

        assert!(!ts.is_subtype(a, b));
        assert!(!ts.is_subtype(b, a));

        assert!(ts.are_compatible(a, a11));
        assert!(ts.are_compatible(a11, a));
        assert!(!ts.are_compatible(a, b));
        assert!(!ts.are_compatible(a2, a1));
        assert!(ts.is_subtype(ts.top_type(), b));
        assert_eq!(ts.types().count(), 6);
    }

    #[test]
    fn invalid_hierarchies() {
        let orphan = TypeHierarchy::new(vec![("A", None), ("C", Some("Z"))]);
        assert_eq!(orphan.unwrap_err(), ValueSetError::UnreachableFromRoot(vec!["C".to_string()]));
        let duplicated = TypeHierarchy::new(vec![("A", None), ("A", None)]);
        assert_eq!(duplicated.unwrap_err(), ValueSetError::DuplicatedType("A".to_string()));
    }

    #[test]
    fn oracle() {
        let ts = hierarchy();
        let id = |name: &str| ts.id_of(name).unwrap();
        let mut diagnostics = Diagnostics::collecting();
        assert_eq!(ts.matches(id("A11"), id("A"), &mut diagnostics), TypeMatch::True);
        assert_eq!(ts.matches(id("A2"), id("A1"), &mut diagnostics), TypeMatch::False);
        assert_eq!(ts.matches(id("A"), id("A1"), &mut diagnostics), TypeMatch::Unknown);
        assert_eq!(diagnostics.messages(), ["a A may or may not be a A1"]);
    }

    #[test]
    fn union_of_cases() {
        let ts = Arc::new(hierarchy());
        let a1 = ts.id_of("A1").unwrap();
        let a2 = ts.id_of("A2").unwrap();
        let b = ts.id_of("B").unwrap();
        let candidates: Arc<[TypeId]> = Arc::from(vec![a1, a2, b]);
        let oracle: Arc<dyn TypeOracle> = ts.clone();

        let is_a1 = TypeUnionValueSet::from_type_match(a1, candidates.clone(), oracle.clone());
        let is_b = TypeUnionValueSet::from_type_match(b, candidates.clone(), oracle.clone());
        assert!(is_a1.intersect(&is_b).is_empty());

        let is_a = TypeUnionValueSet::from_type_match(ts.id_of("A").unwrap(), candidates.clone(), oracle.clone());
        let rest = is_a.union(&is_b).complement();
        assert!(rest.includes_null());
        assert!(!rest.might_include_non_null(&mut Diagnostics::discarding()));
        assert_eq!(rest.to_string(), "!(A || B)");
    }
}
