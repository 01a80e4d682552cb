//! Deferred constraint rules
//!
//! A rule quantifies a relation over the document's shapes: either every
//! shape, or every ordered pair of distinct shapes. The arity is a tagged
//! variant fixed by the registration call site (`when_each` / `when_pairs`),
//! never inferred from a callable. Rules expand into flat constraints at
//! solve time; a panic in a predicate or producer propagates before the
//! solver is invoked, so a partially expanded set is never solved.

use crate::constraint::Constraint;
use crate::document::Document;
use crate::shape::Shape;

type EachPredicate = Box<dyn Fn(&Shape) -> bool>;
type EachProducer = Box<dyn Fn(&Shape) -> Constraint>;
type PairsPredicate = Box<dyn Fn(&Shape, &Shape) -> bool>;
type PairsProducer = Box<dyn Fn(&Shape, &Shape) -> Constraint>;

/// A registered deferred rule. `then` fires where the predicate holds,
/// `otherwise` where it does not; both are optional, and a rule with
/// neither is legal and inert.
pub(crate) enum Rule {
    Each {
        when: EachPredicate,
        then: Option<EachProducer>,
        otherwise: Option<EachProducer>,
    },
    Pairs {
        when: PairsPredicate,
        then: Option<PairsProducer>,
        otherwise: Option<PairsProducer>,
    },
}

impl Rule {
    /// Expand this rule against the final shape list, in insertion order.
    /// Ordered pairs visit both `(a, b)` and `(b, a)`; self-pairs are
    /// excluded, giving N*(N-1) evaluations for N shapes.
    pub(crate) fn expand(&self, shapes: &[Shape], out: &mut Vec<Constraint>) {
        match self {
            Rule::Each {
                when,
                then,
                otherwise,
            } => {
                for shape in shapes {
                    if when(shape) {
                        if let Some(produce) = then {
                            out.push(produce(shape));
                        }
                    } else if let Some(produce) = otherwise {
                        out.push(produce(shape));
                    }
                }
            }
            Rule::Pairs {
                when,
                then,
                otherwise,
            } => {
                for (i, a) in shapes.iter().enumerate() {
                    for (j, b) in shapes.iter().enumerate() {
                        if i == j {
                            continue;
                        }
                        if when(a, b) {
                            if let Some(produce) = then {
                                out.push(produce(a, b));
                            }
                        } else if let Some(produce) = otherwise {
                            out.push(produce(a, b));
                        }
                    }
                }
            }
        }
    }
}

/// Fluent handle to a per-shape rule, returned by [`Document::when_each`].
pub struct EachRule<'a> {
    doc: &'a mut Document,
    index: usize,
}

impl<'a> EachRule<'a> {
    pub(crate) fn new(doc: &'a mut Document, index: usize) -> Self {
        EachRule { doc, index }
    }

    /// Constraint to add for every shape the predicate accepts.
    pub fn then(self, produce: impl Fn(&Shape) -> Constraint + 'static) -> Self {
        if let Rule::Each { then, .. } = &mut self.doc.rules[self.index] {
            *then = Some(Box::new(produce));
        }
        self
    }

    /// Constraint to add for every shape the predicate rejects.
    pub fn otherwise(self, produce: impl Fn(&Shape) -> Constraint + 'static) -> Self {
        if let Rule::Each { otherwise, .. } = &mut self.doc.rules[self.index] {
            *otherwise = Some(Box::new(produce));
        }
        self
    }
}

/// Fluent handle to an ordered-pair rule, returned by
/// [`Document::when_pairs`].
pub struct PairsRule<'a> {
    doc: &'a mut Document,
    index: usize,
}

impl<'a> PairsRule<'a> {
    pub(crate) fn new(doc: &'a mut Document, index: usize) -> Self {
        PairsRule { doc, index }
    }

    /// Constraint to add for every ordered pair the predicate accepts.
    pub fn then(self, produce: impl Fn(&Shape, &Shape) -> Constraint + 'static) -> Self {
        if let Rule::Pairs { then, .. } = &mut self.doc.rules[self.index] {
            *then = Some(Box::new(produce));
        }
        self
    }

    /// Constraint to add for every ordered pair the predicate rejects.
    pub fn otherwise(self, produce: impl Fn(&Shape, &Shape) -> Constraint + 'static) -> Self {
        if let Rule::Pairs { otherwise, .. } = &mut self.doc.rules[self.index] {
            *otherwise = Some(Box::new(produce));
        }
        self
    }
}
