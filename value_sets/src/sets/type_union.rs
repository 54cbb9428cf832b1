//! Sets of values of a type union, described by the tests they passed.
//!
//! A value of a union is either null or an instance of one of a fixed list of candidate case types.
//! Since a candidate may have subtypes, a type test cannot always be decided from the candidate
//! alone: the set is kept as a logical predicate over the value, evaluated in three-valued logic
//! against each candidate with the help of a [`TypeOracle`].

use crate::params::TYPE_UNION_DEPTH_WARNING;
use derive_more::derive::Display;
use hashbrown::HashMap;
use rand::Rng;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

#[derive(Debug, Copy, Clone, Eq, Ord, PartialOrd, PartialEq, Hash, Display)]
#[display("#{_0}")]
pub struct TypeId(usize);

impl From<TypeId> for usize {
    fn from(t: TypeId) -> Self {
        t.0
    }
}
impl From<usize> for TypeId {
    fn from(id: usize) -> Self {
        TypeId(id)
    }
}

/// Outcome of a three-valued test.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Display)]
pub enum TypeMatch {
    #[display("true")]
    True,
    #[display("false")]
    False,
    #[display("unknown")]
    Unknown,
}

impl TypeMatch {
    pub fn not(self) -> TypeMatch {
        match self {
            TypeMatch::True => TypeMatch::False,
            TypeMatch::False => TypeMatch::True,
            TypeMatch::Unknown => TypeMatch::Unknown,
        }
    }

    pub fn and(self, other: TypeMatch) -> TypeMatch {
        match (self, other) {
            (TypeMatch::False, _) | (_, TypeMatch::False) => TypeMatch::False,
            (TypeMatch::True, TypeMatch::True) => TypeMatch::True,
            _ => TypeMatch::Unknown,
        }
    }

    pub fn or(self, other: TypeMatch) -> TypeMatch {
        match (self, other) {
            (TypeMatch::True, _) | (_, TypeMatch::True) => TypeMatch::True,
            (TypeMatch::False, TypeMatch::False) => TypeMatch::False,
            _ => TypeMatch::Unknown,
        }
    }
}

impl From<bool> for TypeMatch {
    fn from(value: bool) -> Self {
        if value {
            TypeMatch::True
        } else {
            TypeMatch::False
        }
    }
}

/// Sink for the messages produced while deciding type tests (e.g. conversions the decision relied
/// on). Membership queries that only need an answer use a discarding sink.
#[derive(Clone, Debug, Default)]
pub struct Diagnostics {
    collecting: bool,
    messages: Vec<String>,
}

impl Diagnostics {
    pub fn collecting() -> Self {
        Diagnostics {
            collecting: true,
            messages: Vec::new(),
        }
    }

    pub fn discarding() -> Self {
        Diagnostics {
            collecting: false,
            messages: Vec::new(),
        }
    }

    pub fn is_collecting(&self) -> bool {
        self.collecting
    }

    /// Records a message. The message is only built when collecting.
    pub fn report(&mut self, message: impl FnOnce() -> String) {
        if self.collecting {
            self.messages.push(message());
        }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

/// Decides whether a value whose type is a given candidate passes a type test.
pub trait TypeOracle: Send + Sync {
    /// Returns [`TypeMatch::True`] if every instance of `candidate` is an instance of `pattern`,
    /// [`TypeMatch::False`] if none is and [`TypeMatch::Unknown`] otherwise.
    fn matches(&self, candidate: TypeId, pattern: TypeId, diagnostics: &mut Diagnostics) -> TypeMatch;

    fn type_name(&self, tpe: TypeId) -> String {
        tpe.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Node {
    True,
    False,
    IsNull,
    IsType(TypeId),
    Not(Arc<Node>),
    And(Arc<Node>, Arc<Node>),
    Or(Arc<Node>, Arc<Node>),
}

/// Evaluation of a shared expression tree for a single input.
/// Subtrees reachable through several parents are only evaluated once.
struct Evaluation<'a> {
    input: Option<TypeId>,
    oracle: &'a dyn TypeOracle,
    diagnostics: &'a mut Diagnostics,
    known: HashMap<*const Node, TypeMatch>,
}

impl Evaluation<'_> {
    fn shared(&mut self, node: &Arc<Node>) -> TypeMatch {
        let key = Arc::as_ptr(node);
        if let Some(&known) = self.known.get(&key) {
            return known;
        }
        let result = self.eval(node);
        self.known.insert(key, result);
        result
    }

    /// Evaluates the predicate for a value of type `input`, or for `null` if `input` is `None`.
    fn eval(&mut self, node: &Node) -> TypeMatch {
        match node {
            Node::True => TypeMatch::True,
            Node::False => TypeMatch::False,
            Node::IsNull => self.input.is_none().into(),
            Node::IsType(pattern) => match self.input {
                Some(candidate) => self.oracle.matches(candidate, *pattern, &mut *self.diagnostics),
                None => TypeMatch::False,
            },
            Node::Not(n) => self.shared(n).not(),
            Node::And(l, r) => match self.shared(l) {
                TypeMatch::False => TypeMatch::False,
                left => left.and(self.shared(r)),
            },
            Node::Or(l, r) => match self.shared(l) {
                TypeMatch::True => TypeMatch::True,
                left => left.or(self.shared(r)),
            },
        }
    }
}

fn eval(root: &Node, input: Option<TypeId>, oracle: &dyn TypeOracle, diagnostics: &mut Diagnostics) -> TypeMatch {
    let mut evaluation = Evaluation {
        input,
        oracle,
        diagnostics,
        known: HashMap::new(),
    };
    evaluation.eval(root)
}

/// The set of values of a union that satisfy a predicate built from null tests and type tests.
#[derive(Clone)]
pub struct TypeUnionValueSet {
    root: Arc<Node>,
    candidates: Arc<[TypeId]>,
    oracle: Arc<dyn TypeOracle>,
    depth: usize,
    includes_null: bool,
    might_include_non_null: bool,
}

impl TypeUnionValueSet {
    /// `depth` is the depth of the tree rooted at `root`, leaves having depth 1.
    fn with_root(root: Node, depth: usize, candidates: Arc<[TypeId]>, oracle: Arc<dyn TypeOracle>) -> Self {
        let root = Arc::new(root);
        let limit = TYPE_UNION_DEPTH_WARNING.get();
        if depth == limit + 1 {
            tracing::warn!(depth, "type union value set: expression tree exceeds {limit} levels");
        }
        let mut discard = Diagnostics::discarding();
        let includes_null = eval(&root, None, oracle.as_ref(), &mut discard) != TypeMatch::False;
        let might_include_non_null = candidates
            .iter()
            .any(|&c| eval(&root, Some(c), oracle.as_ref(), &mut discard) != TypeMatch::False);
        TypeUnionValueSet {
            root,
            candidates,
            oracle,
            depth,
            includes_null,
            might_include_non_null,
        }
    }

    fn derive(&self, root: Node, depth: usize) -> Self {
        Self::with_root(root, depth, self.candidates.clone(), self.oracle.clone())
    }

    pub fn all_values(candidates: Arc<[TypeId]>, oracle: Arc<dyn TypeOracle>) -> Self {
        Self::with_root(Node::True, 1, candidates, oracle)
    }

    pub fn no_values(candidates: Arc<[TypeId]>, oracle: Arc<dyn TypeOracle>) -> Self {
        Self::with_root(Node::False, 1, candidates, oracle)
    }

    /// The values that are instances of `pattern`.
    pub fn from_type_match(pattern: TypeId, candidates: Arc<[TypeId]>, oracle: Arc<dyn TypeOracle>) -> Self {
        Self::with_root(Node::IsType(pattern), 1, candidates, oracle)
    }

    /// The null value.
    pub fn from_null_match(candidates: Arc<[TypeId]>, oracle: Arc<dyn TypeOracle>) -> Self {
        Self::with_root(Node::IsNull, 1, candidates, oracle)
    }

    /// All values but null.
    pub fn from_non_null_match(candidates: Arc<[TypeId]>, oracle: Arc<dyn TypeOracle>) -> Self {
        Self::with_root(Node::Not(Arc::new(Node::IsNull)), 2, candidates, oracle)
    }

    /// A random predicate with about `expected_size` tests, for testing.
    pub fn random<R: Rng + ?Sized>(
        expected_size: usize,
        candidates: Arc<[TypeId]>,
        oracle: Arc<dyn TypeOracle>,
        rng: &mut R,
    ) -> Self {
        let (root, depth) = random_node(expected_size.max(1), &candidates, rng);
        Self::with_root(root, depth, candidates, oracle)
    }

    pub fn candidates(&self) -> &[TypeId] {
        &self.candidates
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn includes_null(&self) -> bool {
        self.includes_null
    }

    /// Returns true unless the predicate is known to be false for every candidate type.
    /// The messages the oracle produced are reported to `diagnostics` when it is collecting.
    pub fn might_include_non_null(&self, diagnostics: &mut Diagnostics) -> bool {
        if !diagnostics.is_collecting() {
            return self.might_include_non_null;
        }
        let mut found = false;
        for &candidate in self.candidates.iter() {
            if self.eval(Some(candidate), diagnostics) != TypeMatch::False {
                found = true;
            }
        }
        found
    }

    /// Evaluates the predicate for a value of type `input`, or for `null`.
    pub fn eval(&self, input: Option<TypeId>, diagnostics: &mut Diagnostics) -> TypeMatch {
        eval(&self.root, input, self.oracle.as_ref(), diagnostics)
    }

    pub fn is_empty(&self) -> bool {
        !self.includes_null && !self.might_include_non_null
    }

    /// A candidate type whose values may be part of the set.
    pub fn sample_type(&self) -> Option<TypeId> {
        let mut discard = Diagnostics::discarding();
        self.candidates
            .iter()
            .copied()
            .find(|&c| self.eval(Some(c), &mut discard) != TypeMatch::False)
    }

    pub fn complement(&self) -> Self {
        match self.root.as_ref() {
            Node::True => self.derive(Node::False, 1),
            Node::False => self.derive(Node::True, 1),
            Node::Not(inner) => self.derive(inner.as_ref().clone(), self.depth - 1),
            _ => self.derive(Node::Not(self.root.clone()), self.depth + 1),
        }
    }

    pub fn intersect(&self, other: &Self) -> Self {
        self.check_compatible(other);
        match (self.root.as_ref(), other.root.as_ref()) {
            (Node::True, _) | (_, Node::False) => other.clone(),
            (_, Node::True) | (Node::False, _) => self.clone(),
            _ => self.derive(Node::And(self.root.clone(), other.root.clone()), 1 + self.depth.max(other.depth)),
        }
    }

    pub fn union(&self, other: &Self) -> Self {
        self.check_compatible(other);
        match (self.root.as_ref(), other.root.as_ref()) {
            (Node::False, _) | (_, Node::True) => other.clone(),
            (_, Node::False) | (Node::True, _) => self.clone(),
            _ => self.derive(Node::Or(self.root.clone(), other.root.clone()), 1 + self.depth.max(other.depth)),
        }
    }

    /// Returns true if both predicates evaluate identically on null and every candidate.
    pub fn equivalent(&self, other: &Self) -> bool {
        self.check_compatible(other);
        let mut discard = Diagnostics::discarding();
        std::iter::once(None)
            .chain(self.candidates.iter().copied().map(Some))
            .all(|input| self.eval(input, &mut discard) == other.eval(input, &mut discard))
    }

    fn check_compatible(&self, other: &Self) {
        assert!(
            Arc::ptr_eq(&self.candidates, &other.candidates) || self.candidates == other.candidates,
            "type union value sets over different candidate types: {:?} and {:?}",
            self.candidates,
            other.candidates
        );
    }

    fn fmt_node(&self, node: &Node, f: &mut Formatter<'_>) -> std::fmt::Result {
        match node {
            Node::True => write!(f, "true"),
            Node::False => write!(f, "false"),
            Node::IsNull => write!(f, "null"),
            Node::IsType(t) => write!(f, "{}", self.oracle.type_name(*t)),
            Node::Not(n) => {
                write!(f, "!")?;
                self.fmt_node(n, f)
            }
            Node::And(l, r) => {
                write!(f, "(")?;
                self.fmt_node(l, f)?;
                write!(f, " && ")?;
                self.fmt_node(r, f)?;
                write!(f, ")")
            }
            Node::Or(l, r) => {
                write!(f, "(")?;
                self.fmt_node(l, f)?;
                write!(f, " || ")?;
                self.fmt_node(r, f)?;
                write!(f, ")")
            }
        }
    }
}

/// A random tree with about `size` leaves, together with its depth.
fn random_node<R: Rng + ?Sized>(size: usize, candidates: &[TypeId], rng: &mut R) -> (Node, usize) {
    if size <= 1 {
        let leaf = match rng.random_range(0..8) {
            0 => Node::True,
            1 => Node::False,
            2 => Node::IsNull,
            _ if candidates.is_empty() => Node::IsNull,
            _ => Node::IsType(candidates[rng.random_range(0..candidates.len())]),
        };
        return (leaf, 1);
    }
    if rng.random_range(0..4) == 0 {
        let (inner, depth) = random_node(size, candidates, rng);
        return (Node::Not(Arc::new(inner)), depth + 1);
    }
    let left_size = rng.random_range(1..size);
    let (left, left_depth) = random_node(left_size, candidates, rng);
    let (right, right_depth) = random_node(size - left_size, candidates, rng);
    let (left, right) = (Arc::new(left), Arc::new(right));
    let depth = 1 + left_depth.max(right_depth);
    if rng.random() {
        (Node::And(left, right), depth)
    } else {
        (Node::Or(left, right), depth)
    }
}

impl PartialEq for TypeUnionValueSet {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root && self.candidates == other.candidates && Arc::ptr_eq(&self.oracle, &other.oracle)
    }
}

impl Debug for TypeUnionValueSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeUnionValueSet")
            .field("root", &self.root)
            .field("candidates", &self.candidates)
            .finish_non_exhaustive()
    }
}

impl Display for TypeUnionValueSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.fmt_node(&self.root, f)
    }
}
