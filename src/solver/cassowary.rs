//! Cassowary-backed solver adapter
//!
//! Lowers the integer expression tree onto the kasuari solver. All document
//! constraints become required kasuari constraints; a `Min`/`Max` select
//! node becomes a fresh auxiliary variable bounded on the correct side of
//! both operands by required constraints, with weak pulls that let the
//! optimizer pin it to the exact extremum. kasuari computes over `f64`; the
//! model rounds to `i64` at extraction, which is exact for the
//! integer-coefficient systems the document layer emits.

use std::collections::HashMap;

use kasuari::{
    AddConstraintError, Constraint as KasuariConstraint, Expression,
    Solver as KasuariSolver, Strength, Variable as KasuariVariable, WeightedRelation,
    WeightedRelation::*,
};

use super::{Feasibility, Model, Solver, SolverError};
use crate::constraint::{Constraint, Expr, Relation};

/// The bundled [`Solver`] implementation.
#[derive(Default)]
pub struct CassowarySolver {
    pending: Vec<Constraint>,
    model: Option<Model>,
}

impl CassowarySolver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Solver for CassowarySolver {
    fn add(&mut self, constraint: Constraint) {
        self.model = None;
        self.pending.push(constraint);
    }

    fn check(&mut self) -> Result<Feasibility, SolverError> {
        let mut lowering = Lowering::new();
        for constraint in &self.pending {
            match lowering.add(constraint) {
                Ok(()) => {}
                Err(LoweringError::Unsatisfiable(reason)) => {
                    self.model = None;
                    return Ok(Feasibility::Unsatisfiable { reason });
                }
                Err(LoweringError::Internal(message)) => {
                    self.model = None;
                    return Err(SolverError::Internal(message));
                }
            }
        }
        self.model = Some(lowering.into_model());
        Ok(Feasibility::Satisfiable)
    }

    fn model(&self) -> Result<Model, SolverError> {
        self.model.clone().ok_or(SolverError::ModelUnavailable)
    }
}

enum LoweringError {
    Unsatisfiable(String),
    Internal(String),
}

/// One lowering pass over the pending set. Rebuilt per check so repeated
/// checks never accumulate stale kasuari state.
struct Lowering {
    solver: KasuariSolver,
    variables: HashMap<String, KasuariVariable>,
}

impl Lowering {
    fn new() -> Self {
        Lowering {
            solver: KasuariSolver::new(),
            variables: HashMap::new(),
        }
    }

    fn variable(&mut self, name: &str) -> KasuariVariable {
        if let Some(&var) = self.variables.get(name) {
            var
        } else {
            let var = KasuariVariable::new();
            self.variables.insert(name.to_string(), var);
            var
        }
    }

    fn add(&mut self, constraint: &Constraint) -> Result<(), LoweringError> {
        let lhs = self.lower(&constraint.lhs)?;
        let rhs = self.lower(&constraint.rhs)?;
        let relation = match constraint.rel {
            Relation::Eq => EQ(Strength::REQUIRED),
            Relation::Le => LE(Strength::REQUIRED),
            Relation::Ge => GE(Strength::REQUIRED),
        };
        self.install(lhs | relation | rhs, &constraint.to_string())
    }

    fn install(
        &mut self,
        constraint: KasuariConstraint,
        description: &str,
    ) -> Result<(), LoweringError> {
        match self.solver.add_constraint(constraint) {
            Ok(()) => Ok(()),
            // The flat set is a conjunction; a byte-identical repeat changes
            // nothing and is legal input.
            Err(AddConstraintError::DuplicateConstraint) => Ok(()),
            Err(AddConstraintError::UnsatisfiableConstraint) => Err(LoweringError::Unsatisfiable(
                format!("cannot satisfy {description}"),
            )),
            Err(AddConstraintError::InternalSolverError(message)) => Err(LoweringError::Internal(
                format!("{message} while adding {description}"),
            )),
        }
    }

    fn lower(&mut self, expr: &Expr) -> Result<Expression, LoweringError> {
        match expr {
            Expr::Var(var) => Ok(self.variable(var.name()).into()),
            Expr::Const(value) => Ok(Expression::from_constant(*value as f64)),
            Expr::Add(a, b) => Ok(self.lower(a)? + self.lower(b)?),
            Expr::Sub(a, b) => Ok(self.lower(a)? - self.lower(b)?),
            Expr::Mul(k, e) => Ok(self.lower(e)? * (*k as f64)),
            Expr::Max(a, b) => self.select(expr, a, b, true),
            Expr::Min(a, b) => self.select(expr, a, b, false),
        }
    }

    /// Lower a binary select node to an auxiliary variable. For a maximum
    /// the auxiliary is required to sit at or above both operands and weakly
    /// pulled down onto them; minima are mirrored. The optimum is the exact
    /// extremum.
    fn select(
        &mut self,
        node: &Expr,
        a: &Expr,
        b: &Expr,
        greater: bool,
    ) -> Result<Expression, LoweringError> {
        let a = self.lower(a)?;
        let b = self.lower(b)?;
        let aux = Expression::from(KasuariVariable::new());
        let description = node.to_string();

        type Rel = fn(Strength) -> WeightedRelation;
        let (bound, pull): (Rel, Rel) = if greater { (GE, LE) } else { (LE, GE) };
        self.install(
            aux.clone() | bound(Strength::REQUIRED) | a.clone(),
            &description,
        )?;
        self.install(
            aux.clone() | bound(Strength::REQUIRED) | b.clone(),
            &description,
        )?;
        self.install(aux.clone() | pull(Strength::WEAK) | a, &description)?;
        self.install(aux.clone() | pull(Strength::WEAK) | b, &description)?;
        Ok(aux)
    }

    fn into_model(mut self) -> Model {
        // Variables kasuari never moved stay at 0 and are not reported by
        // fetch_changes, so seed every named variable first.
        let mut values: HashMap<String, i64> = self
            .variables
            .keys()
            .map(|name| (name.clone(), 0))
            .collect();
        for (changed, value) in self.solver.fetch_changes() {
            for (name, var) in &self.variables {
                if var == changed {
                    values.insert(name.clone(), value.round() as i64);
                    break;
                }
            }
        }
        Model::from_values(values)
    }
}
