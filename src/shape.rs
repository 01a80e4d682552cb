//! Shapes and their symbolic attribute accessors
//!
//! A shape owns no geometry. Its accessors resolve `(id, attribute)` pairs
//! through the attribute namespace; which values those variables take is
//! entirely a function of the constraints the document accumulates.

use std::collections::BTreeMap;

use crate::constraint::{Expr, Var};

/// The geometric kind of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Rect,
    Circle,
}

/// A caller-defined classification value attached to a shape, read by
/// deferred-rule predicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelValue {
    Int(i64),
    Text(String),
}

impl LabelValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            LabelValue::Int(v) => Some(*v),
            LabelValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            LabelValue::Int(_) => None,
            LabelValue::Text(s) => Some(s),
        }
    }
}

impl From<i64> for LabelValue {
    fn from(value: i64) -> Self {
        LabelValue::Int(value)
    }
}

impl From<&str> for LabelValue {
    fn from(value: &str) -> Self {
        LabelValue::Text(value.to_string())
    }
}

impl From<String> for LabelValue {
    fn from(value: String) -> Self {
        LabelValue::Text(value)
    }
}

/// A typed geometric entity registered in a document. Immutable after
/// creation; fill and labels are fixed at the factory call.
#[derive(Debug, Clone)]
pub struct Shape {
    id: String,
    kind: ShapeKind,
    fill: String,
    labels: BTreeMap<String, LabelValue>,
}

impl Shape {
    pub(crate) fn new(
        id: String,
        kind: ShapeKind,
        fill: String,
        labels: BTreeMap<String, LabelValue>,
    ) -> Self {
        Shape {
            id,
            kind,
            fill,
            labels,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn fill(&self) -> &str {
        &self.fill
    }

    pub fn labels(&self) -> &BTreeMap<String, LabelValue> {
        &self.labels
    }

    pub fn label(&self, key: &str) -> Option<&LabelValue> {
        self.labels.get(key)
    }

    /// Integer label shortcut for the common tier/rank predicates.
    pub fn label_int(&self, key: &str) -> Option<i64> {
        self.labels.get(key).and_then(LabelValue::as_int)
    }

    /// Resolve an attribute of this shape to its namespace variable.
    pub fn attr(&self, attribute: &str) -> Var {
        Var::attr(&self.id, attribute)
    }

    fn sym(&self, attribute: &str) -> Expr {
        Expr::Var(self.attr(attribute))
    }

    pub fn left(&self) -> Expr {
        self.sym("left")
    }

    pub fn right(&self) -> Expr {
        self.sym("right")
    }

    pub fn top(&self) -> Expr {
        self.sym("top")
    }

    pub fn bottom(&self) -> Expr {
        self.sym("bottom")
    }

    pub fn x(&self) -> Expr {
        self.sym("x")
    }

    pub fn y(&self) -> Expr {
        self.sym("y")
    }

    pub fn width(&self) -> Expr {
        self.sym("width")
    }

    pub fn height(&self) -> Expr {
        self.sym("height")
    }

    pub fn center_x(&self) -> Expr {
        self.sym("center_x")
    }

    pub fn center_y(&self) -> Expr {
        self.sym("center_y")
    }

    pub fn radius(&self) -> Expr {
        self.sym("radius")
    }
}
