//! Symbolic constraint vocabulary
//!
//! Shapes never hold concrete coordinates; every geometric attribute is a
//! symbolic integer variable named through the attribute namespace. This
//! module provides the variables, the expression tree built over them, and
//! the equality/inequality constraints the solver consumes.

use std::fmt;
use std::ops::{Add, Mul, Sub};

/// Separator composing `(shape_id, attribute)` into a globally unique
/// variable name. Shape ids containing it are rejected at registration so
/// distinct pairs can never collide.
pub const ATTR_SEPARATOR: &str = "__";

/// A symbolic integer variable, identified by its composed name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Var {
    name: String,
}

impl Var {
    /// Resolve `(shape_id, attribute)` to its variable. Pure and
    /// deterministic: identical pairs always yield the same variable.
    pub fn attr(shape_id: &str, attribute: &str) -> Self {
        Var {
            name: format!("{shape_id}{ATTR_SEPARATOR}{attribute}"),
        }
    }

    /// The composed, globally unique variable name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// An integer-valued symbolic expression.
///
/// `Min` and `Max` are binary select nodes (`select-if-less` /
/// `select-if-greater`); the bound folds below chain them left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Var(Var),
    Const(i64),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(i64, Box<Expr>),
    Min(Box<Expr>, Box<Expr>),
    Max(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// `self == rhs`
    pub fn eq(self, rhs: impl Into<Expr>) -> Constraint {
        Constraint::new(self, Relation::Eq, rhs.into())
    }

    /// `self <= rhs`
    pub fn le(self, rhs: impl Into<Expr>) -> Constraint {
        Constraint::new(self, Relation::Le, rhs.into())
    }

    /// `self >= rhs`
    pub fn ge(self, rhs: impl Into<Expr>) -> Constraint {
        Constraint::new(self, Relation::Ge, rhs.into())
    }

    /// Binary select-if-less node.
    pub fn min(self, other: impl Into<Expr>) -> Expr {
        Expr::Min(Box::new(self), Box::new(other.into()))
    }

    /// Binary select-if-greater node.
    pub fn max(self, other: impl Into<Expr>) -> Expr {
        Expr::Max(Box::new(self), Box::new(other.into()))
    }

    /// Left-fold a sequence into a symbolic minimum. A one-element sequence
    /// is returned as-is, with no comparison node; an empty one is `None`.
    pub fn fold_min(items: impl IntoIterator<Item = Expr>) -> Option<Expr> {
        let mut items = items.into_iter();
        let first = items.next()?;
        Some(items.fold(first, |acc, item| acc.min(item)))
    }

    /// Left-fold a sequence into a symbolic maximum; same edge behavior as
    /// [`Expr::fold_min`].
    pub fn fold_max(items: impl IntoIterator<Item = Expr>) -> Option<Expr> {
        let mut items = items.into_iter();
        let first = items.next()?;
        Some(items.fold(first, |acc, item| acc.max(item)))
    }

    /// Visit every variable mentioned in this expression.
    pub fn visit_vars(&self, visit: &mut impl FnMut(&Var)) {
        match self {
            Expr::Var(v) => visit(v),
            Expr::Const(_) => {}
            Expr::Mul(_, e) => e.visit_vars(visit),
            Expr::Add(a, b) | Expr::Sub(a, b) | Expr::Min(a, b) | Expr::Max(a, b) => {
                a.visit_vars(visit);
                b.visit_vars(visit);
            }
        }
    }
}

impl From<Var> for Expr {
    fn from(var: Var) -> Self {
        Expr::Var(var)
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Expr::Const(value)
    }
}

impl Add for Expr {
    type Output = Expr;
    fn add(self, rhs: Expr) -> Expr {
        Expr::Add(Box::new(self), Box::new(rhs))
    }
}

impl Add<i64> for Expr {
    type Output = Expr;
    fn add(self, rhs: i64) -> Expr {
        Expr::Add(Box::new(self), Box::new(Expr::Const(rhs)))
    }
}

impl Sub for Expr {
    type Output = Expr;
    fn sub(self, rhs: Expr) -> Expr {
        Expr::Sub(Box::new(self), Box::new(rhs))
    }
}

impl Sub<i64> for Expr {
    type Output = Expr;
    fn sub(self, rhs: i64) -> Expr {
        Expr::Sub(Box::new(self), Box::new(Expr::Const(rhs)))
    }
}

impl Mul<Expr> for i64 {
    type Output = Expr;
    fn mul(self, rhs: Expr) -> Expr {
        Expr::Mul(self, Box::new(rhs))
    }
}

impl Mul<i64> for Expr {
    type Output = Expr;
    fn mul(self, rhs: i64) -> Expr {
        Expr::Mul(rhs, Box::new(self))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Var(v) => write!(f, "{v}"),
            Expr::Const(c) => write!(f, "{c}"),
            Expr::Add(a, b) => write!(f, "({a} + {b})"),
            Expr::Sub(a, b) => write!(f, "({a} - {b})"),
            Expr::Mul(k, e) => write!(f, "{k}*{e}"),
            Expr::Min(a, b) => write!(f, "min({a}, {b})"),
            Expr::Max(a, b) => write!(f, "max({a}, {b})"),
        }
    }
}

/// The comparison relating the two sides of a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Eq,
    Le,
    Ge,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Relation::Eq => "==",
            Relation::Le => "<=",
            Relation::Ge => ">=",
        })
    }
}

/// One equality or inequality over symbolic expressions. The document's
/// constraint set is an unordered conjunction of these; redundant or
/// contradictory members are legal input and only surface at solve time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub lhs: Expr,
    pub rel: Relation,
    pub rhs: Expr,
}

impl Constraint {
    pub fn new(lhs: Expr, rel: Relation, rhs: Expr) -> Self {
        Constraint { lhs, rel, rhs }
    }

    /// Visit every variable mentioned on either side.
    pub fn visit_vars(&self, visit: &mut impl FnMut(&Var)) {
        self.lhs.visit_vars(visit);
        self.rhs.visit_vars(visit);
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.rel, self.rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_composition_is_deterministic() {
        assert_eq!(Var::attr("box", "left"), Var::attr("box", "left"));
        assert_eq!(Var::attr("box", "left").name(), "box__left");
    }

    #[test]
    fn test_distinct_pairs_never_collide() {
        assert_ne!(Var::attr("a", "left"), Var::attr("b", "left"));
        assert_ne!(Var::attr("box", "left"), Var::attr("box", "right"));
    }

    #[test]
    fn test_fold_of_single_element_is_the_element() {
        let left = Expr::from(Var::attr("only", "left"));
        let folded = Expr::fold_min(vec![left.clone()]).unwrap();
        assert_eq!(folded, left);
    }

    #[test]
    fn test_fold_is_left_associative() {
        let a = Expr::from(Var::attr("a", "right"));
        let b = Expr::from(Var::attr("b", "right"));
        let c = Expr::from(Var::attr("c", "right"));
        let folded = Expr::fold_max(vec![a.clone(), b.clone(), c.clone()]).unwrap();
        assert_eq!(folded, a.max(b).max(c));
    }

    #[test]
    fn test_fold_of_empty_sequence_is_none() {
        assert!(Expr::fold_max(Vec::new()).is_none());
    }

    #[test]
    fn test_constraint_display() {
        let c = (Expr::from(Var::attr("b", "left")) + 10).eq(Var::attr("a", "right"));
        assert_eq!(c.to_string(), "(b__left + 10) == a__right");
    }

    #[test]
    fn test_visit_vars_covers_both_sides() {
        let c = Expr::from(Var::attr("a", "x"))
            .max(Expr::from(Var::attr("b", "x")))
            .ge(Expr::from(Var::attr("c", "x")) - 5);
        let mut seen = Vec::new();
        c.visit_vars(&mut |v| seen.push(v.name().to_string()));
        assert_eq!(seen, vec!["a__x", "b__x", "c__x"]);
    }
}
