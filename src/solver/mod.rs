//! The solver seam
//!
//! The constraint-model layer only needs three operations from a solver:
//! accumulate constraints, check feasibility, and expose one concrete
//! integer per variable on success. Keeping that surface narrow lets the
//! expansion logic be unit-tested against a recording fake while the real
//! decision procedure stays an external concern.

mod cassowary;

pub use cassowary::CassowarySolver;

use std::collections::HashMap;

use thiserror::Error;

use crate::constraint::{Constraint, Var};

/// Outcome of a feasibility check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feasibility {
    Satisfiable,
    /// The conjunction admits no assignment; `reason` names a constraint
    /// that could not be reconciled with the rest of the set.
    Unsatisfiable { reason: String },
}

/// A satisfying assignment: one concrete integer per variable, keyed by the
/// variable's composed name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Model {
    values: HashMap<String, i64>,
}

impl Model {
    pub fn from_values(values: HashMap<String, i64>) -> Self {
        Model { values }
    }

    /// Value assigned to a namespace variable.
    pub fn value(&self, var: &Var) -> Option<i64> {
        self.values.get(var.name()).copied()
    }

    /// Value assigned to a variable by composed name.
    pub fn get(&self, name: &str) -> Option<i64> {
        self.values.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Errors from a solver adapter. Infeasibility is not an error; it is the
/// `Unsatisfiable` feasibility outcome.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("no model available: check() has not reported a satisfiable system")]
    ModelUnavailable,

    #[error("internal solver error: {0}")]
    Internal(String),
}

/// The narrow interface the document solves against.
pub trait Solver {
    /// Accumulate one constraint. Redundant and contradictory constraints
    /// are legal input; conflicts surface from [`Solver::check`].
    fn add(&mut self, constraint: Constraint);

    /// Decide feasibility of everything added so far.
    fn check(&mut self) -> Result<Feasibility, SolverError>;

    /// The model from the last satisfiable check.
    fn model(&self) -> Result<Model, SolverError>;
}
