//! Solver backends for optimization problems

pub mod clarabel;

use thiserror::Error;

use crate::optimize::problem::Problem;
use crate::optimize::ProblemSolution;

/// A backend able to solve linear optimization problems
pub trait LinearSolver {
    /// Solve the problem, returning the solution or a solver failure
    fn solve(&self, problem: &Problem) -> Result<ProblemSolution, SolverError>;
}

/// Errors raised by solver backends
#[derive(Error, Debug, Clone)]
pub enum SolverError {
    /// The backend only handles continuous variables
    #[error("variable {0} is not continuous")]
    UnsupportedVariableType(String),
    /// The problem has no variables to solve for
    #[error("the problem contains no variables")]
    EmptyProblem,
}
