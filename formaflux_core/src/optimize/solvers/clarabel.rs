//! Implements a solver interface for Clarabel
//!
//! The problem is flattened into Clarabel's conic form, minimize `q'x`
//! subject to `Ax + s = b` with `s` in a product of cones: equality
//! constraints land in the zero cone, inequality constraints and finite
//! variable bounds in the nonnegative cone. Maximization is handled by
//! negating the objective.

use clarabel::algebra::CscMatrix as ClarabelCsc;
use clarabel::solver::{
    DefaultSettingsBuilder, DefaultSolver, IPSolver, SolverStatus, SupportedConeT,
};
use indexmap::IndexMap;
use nalgebra_sparse::{CooMatrix, CscMatrix};

use crate::configuration::CONFIGURATION;
use crate::optimize::constraint::Constraint;
use crate::optimize::objective::ObjectiveSense;
use crate::optimize::problem::Problem;
use crate::optimize::solvers::{LinearSolver, SolverError};
use crate::optimize::variable::VariableType;
use crate::optimize::{OptimizationStatus, ProblemSolution};

/// Solver backend delegating to the Clarabel interior point solver
#[derive(Debug, Clone, Default)]
pub struct ClarabelSolver {
    /// Print solver progress to stdout
    pub verbose: bool,
}

impl LinearSolver for ClarabelSolver {
    fn solve(&self, problem: &Problem) -> Result<ProblemSolution, SolverError> {
        let num_variables = problem.num_variables();
        if num_variables == 0 {
            return Err(SolverError::EmptyProblem);
        }
        for (id, variable) in &problem.variables {
            if variable.read().unwrap().variable_type != VariableType::Continuous {
                return Err(SolverError::UnsupportedVariableType(id.clone()));
            }
        }

        // Clarabel minimizes, so a maximization objective is negated going
        // in and its optimal value negated coming back out.
        let sign = match problem.objective.sense() {
            ObjectiveSense::Minimize => 1.0,
            ObjectiveSense::Maximize => -1.0,
        };
        let mut q = vec![0.0; num_variables];
        for term in problem.objective.terms() {
            q[term.variable.read().unwrap().index] += sign * term.coefficient;
        }

        // Rows are laid out zero cone first: equality constraints, then
        // inequality constraints (two rows each), then finite variable
        // bounds.
        let mut triplets: Vec<(usize, usize, f64)> = Vec::new();
        let mut b: Vec<f64> = Vec::new();
        let mut equality_ids: Vec<String> = Vec::new();
        let mut row = 0usize;

        for (_, constraint) in &problem.constraints {
            let constraint = constraint.read().unwrap();
            if let Constraint::Equality { id, terms, equals } = &*constraint {
                for term in terms {
                    triplets.push((row, term.variable.read().unwrap().index, term.coefficient));
                }
                b.push(*equals);
                equality_ids.push(id.clone());
                row += 1;
            }
        }
        let zero_cone_rows = row;

        for (_, constraint) in &problem.constraints {
            let constraint = constraint.read().unwrap();
            if let Constraint::Inequality {
                terms,
                lower_bound,
                upper_bound,
                ..
            } = &*constraint
            {
                for term in terms {
                    let index = term.variable.read().unwrap().index;
                    triplets.push((row, index, term.coefficient));
                    triplets.push((row + 1, index, -term.coefficient));
                }
                b.push(*upper_bound);
                b.push(-*lower_bound);
                row += 2;
            }
        }

        for (_, variable) in &problem.variables {
            let variable = variable.read().unwrap();
            if variable.upper_bound.is_finite() {
                triplets.push((row, variable.index, 1.0));
                b.push(variable.upper_bound);
                row += 1;
            }
            if variable.lower_bound.is_finite() {
                triplets.push((row, variable.index, -1.0));
                b.push(-variable.lower_bound);
                row += 1;
            }
        }
        let nonneg_cone_rows = row - zero_cone_rows;

        let mut coo = CooMatrix::new(row, num_variables);
        for (r, c, v) in triplets {
            coo.push(r, c, v);
        }
        let a = to_clarabel_csc(&CscMatrix::from(&coo));
        let p = ClarabelCsc::zeros((num_variables, num_variables));

        let mut cones: Vec<SupportedConeT<f64>> = Vec::new();
        if zero_cone_rows > 0 {
            cones.push(SupportedConeT::ZeroConeT(zero_cone_rows));
        }
        if nonneg_cone_rows > 0 {
            cones.push(SupportedConeT::NonnegativeConeT(nonneg_cone_rows));
        }

        let tolerance = CONFIGURATION.read().unwrap().tolerance;
        let settings = DefaultSettingsBuilder::default()
            .verbose(self.verbose)
            .tol_feas(tolerance)
            .build()
            .unwrap();

        log::debug!(
            "solving linear problem with {} variables and {} constraint rows",
            num_variables,
            row
        );
        let mut solver = DefaultSolver::new(&p, &q, &a, &b, &cones, settings);
        solver.solve();

        let status = convert_status(solver.solution.status);
        log::debug!("solver finished with status {:?}", status);
        if status != OptimizationStatus::Optimal && status != OptimizationStatus::AlmostOptimal {
            return Ok(ProblemSolution {
                status,
                objective_value: None,
                variable_values: None,
                dual_values: None,
            });
        }

        let mut variable_values = IndexMap::new();
        for (id, variable) in &problem.variables {
            variable_values.insert(id.clone(), solver.solution.x[variable.read().unwrap().index]);
        }
        let mut dual_values = IndexMap::new();
        for (i, id) in equality_ids.iter().enumerate() {
            dual_values.insert(id.clone(), solver.solution.z[i]);
        }
        Ok(ProblemSolution {
            status,
            objective_value: Some(sign * solver.solution.obj_val),
            variable_values: Some(variable_values),
            dual_values: Some(dual_values),
        })
    }
}

/// Convert a nalgebra CSC matrix into Clarabel's CSC representation
fn to_clarabel_csc(matrix: &CscMatrix<f64>) -> ClarabelCsc<f64> {
    ClarabelCsc::new(
        matrix.nrows(),
        matrix.ncols(),
        matrix.col_offsets().to_vec(),
        matrix.row_indices().to_vec(),
        matrix.values().to_vec(),
    )
}

/// Map Clarabel's solver status onto the crate's optimization status
fn convert_status(status: SolverStatus) -> OptimizationStatus {
    match status {
        SolverStatus::Solved => OptimizationStatus::Optimal,
        SolverStatus::AlmostSolved => OptimizationStatus::AlmostOptimal,
        SolverStatus::PrimalInfeasible | SolverStatus::AlmostPrimalInfeasible => {
            OptimizationStatus::Infeasible
        }
        SolverStatus::DualInfeasible | SolverStatus::AlmostDualInfeasible => {
            OptimizationStatus::Unbounded
        }
        SolverStatus::MaxIterations
        | SolverStatus::MaxTime
        | SolverStatus::InsufficientProgress => OptimizationStatus::SolverHalted,
        _ => OptimizationStatus::NumericalError,
    }
}
