//! Provides struct representing an optimization problem

use std::sync::{Arc, RwLock};

use indexmap::IndexMap;
use thiserror::Error;

use crate::optimize::constraint::Constraint;
use crate::optimize::objective::{Objective, ObjectiveSense, ObjectiveTerm};
use crate::optimize::solvers::{LinearSolver, SolverError};
use crate::optimize::variable::{Variable, VariableBuilder, VariableType};
use crate::optimize::{OptimizationStatus, ProblemSolution};

/// An optimization problem
#[derive(Debug, Clone)]
pub struct Problem {
    /// Objective to optimize
    pub(crate) objective: Objective,
    /// Variables of the optimization problem
    pub(crate) variables: IndexMap<String, Arc<RwLock<Variable>>>,
    /// Constraints of the optimization problem
    pub(crate) constraints: IndexMap<String, Arc<RwLock<Constraint>>>,
    /// Status of the most recent solve
    status: OptimizationStatus,
    /// Current number of variables in the problem
    num_variables: usize,
}

impl Problem {
    // region Creation Functions
    /// Create a new optimization problem
    pub fn new(objective_sense: ObjectiveSense) -> Self {
        Self {
            objective: Objective::new(objective_sense),
            variables: IndexMap::new(),
            constraints: IndexMap::new(),
            status: OptimizationStatus::Unoptimized,
            num_variables: 0,
        }
    }

    /// Create a new maximization problem
    pub fn new_maximization() -> Self {
        Self::new(ObjectiveSense::Maximize)
    }

    /// Create a new minimization problem
    pub fn new_minimization() -> Self {
        Self::new(ObjectiveSense::Minimize)
    }
    // endregion Creation Functions

    /// Update the objective sense of the problem
    pub fn update_objective_sense(&mut self, sense: ObjectiveSense) {
        self.objective.set_sense(sense);
    }

    // region Adding Variables
    /// Add a variable to the optimization problem
    pub fn add_variable(&mut self, variable: Arc<RwLock<Variable>>) -> Result<(), ProblemError> {
        self.validate_variable(variable.clone())?;
        // The index ties the variable to its column in the assembled
        // problem
        variable.write().unwrap().index = self.num_variables;
        self.num_variables += 1;
        let variable_id = variable.read().unwrap().id.clone();
        self.variables.insert(variable_id, variable);
        Ok(())
    }

    /// Create a new variable and add it to the optimization problem
    pub fn add_new_variable(
        &mut self,
        id: &str,
        name: Option<&str>,
        variable_type: VariableType,
        lower_bound: f64,
        upper_bound: f64,
    ) -> Result<(), ProblemError> {
        let new_variable = match name {
            Some(name) => VariableBuilder::default()
                .id(id)
                .name(name)
                .variable_type(variable_type)
                .lower_bound(lower_bound)
                .upper_bound(upper_bound)
                .build()
                .unwrap()
                .wrap(),
            None => VariableBuilder::default()
                .id(id)
                .variable_type(variable_type)
                .lower_bound(lower_bound)
                .upper_bound(upper_bound)
                .build()
                .unwrap()
                .wrap(),
        };
        self.add_variable(new_variable)
    }
    // endregion Adding Variables

    // region Adding Constraints
    /// Add a constraint to the problem
    pub fn add_constraint(
        &mut self,
        constraint: Arc<RwLock<Constraint>>,
    ) -> Result<(), ProblemError> {
        self.validate_constraint(constraint.clone())?;
        self.constraints
            .insert(constraint.read().unwrap().id(), constraint.clone());
        Ok(())
    }

    /// Create a new equality constraint and add it to the problem
    pub fn add_new_equality_constraint(
        &mut self,
        id: &str,
        variables: &[Arc<RwLock<Variable>>],
        coefficients: &[f64],
        equals: f64,
    ) -> Result<(), ProblemError> {
        let new_constraint = Constraint::new_equality(id, variables, coefficients, equals).wrap();
        self.add_constraint(new_constraint)
    }

    /// Create a new equality constraint using variable ids rather than
    /// variable references, and add it to the problem
    pub fn add_new_equality_constraint_by_id(
        &mut self,
        id: &str,
        variables: &[&str],
        coefficients: &[f64],
        equals: f64,
    ) -> Result<(), ProblemError> {
        let variables = self.resolve_variables(variables)?;
        self.add_new_equality_constraint(id, &variables, coefficients, equals)
    }

    /// Create a new inequality constraint and add it to the problem
    pub fn add_new_inequality_constraint(
        &mut self,
        id: &str,
        variables: &[Arc<RwLock<Variable>>],
        coefficients: &[f64],
        lower_bound: f64,
        upper_bound: f64,
    ) -> Result<(), ProblemError> {
        let new_constraint =
            Constraint::new_inequality(id, variables, coefficients, lower_bound, upper_bound)
                .wrap();
        self.add_constraint(new_constraint)
    }

    /// Create a new inequality constraint using variable ids rather than
    /// variable references, and add it to the problem
    pub fn add_new_inequality_constraint_by_id(
        &mut self,
        id: &str,
        variables: &[&str],
        coefficients: &[f64],
        lower_bound: f64,
        upper_bound: f64,
    ) -> Result<(), ProblemError> {
        let variables = self.resolve_variables(variables)?;
        self.add_new_inequality_constraint(id, &variables, coefficients, lower_bound, upper_bound)
    }
    // endregion Adding Constraints

    // region Adding Objective Terms
    /// Add a new linear term to the objective
    pub fn add_new_linear_objective_term(
        &mut self,
        variable: Arc<RwLock<Variable>>,
        coefficient: f64,
    ) -> Result<(), ProblemError> {
        let term = ObjectiveTerm::new(variable, coefficient);
        self.validate_objective_term(&term)?;
        self.objective.add_term(term);
        Ok(())
    }

    /// Add a new linear term to the objective using the variable id
    pub fn add_new_linear_objective_term_by_id(
        &mut self,
        variable_id: &str,
        coefficient: f64,
    ) -> Result<(), ProblemError> {
        let variable = match self.variables.get(variable_id) {
            Some(variable) => variable.clone(),
            None => return Err(ProblemError::NonExistentVariablesInObjective),
        };
        self.add_new_linear_objective_term(variable, coefficient)
    }
    // endregion Adding Objective Terms

    /// Update the bounds of a variable
    pub fn update_variable_bounds(
        &mut self,
        id: &str,
        lower_bound: f64,
        upper_bound: f64,
    ) -> Result<(), ProblemError> {
        if lower_bound > upper_bound {
            return Err(ProblemError::InvalidVariableBounds);
        }
        match self.variables.get(id) {
            Some(variable) => {
                let mut variable = variable.write().unwrap();
                variable.lower_bound = lower_bound;
                variable.upper_bound = upper_bound;
            }
            None => return Err(ProblemError::NonExistentVariable),
        };
        Ok(())
    }

    /// Solve the problem with the given solver, recording the status
    pub fn solve<S: LinearSolver>(&mut self, solver: &S) -> Result<ProblemSolution, SolverError> {
        let solution = solver.solve(self)?;
        self.status = solution.status;
        Ok(solution)
    }

    /// Status of the most recent solve
    pub fn status(&self) -> OptimizationStatus {
        self.status
    }

    /// Number of variables in the problem
    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    /// Number of constraints in the problem
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Look up a variable by id
    pub fn variable(&self, id: &str) -> Option<Arc<RwLock<Variable>>> {
        self.variables.get(id).cloned()
    }

    /// Resolve a slice of variable ids into variable references
    fn resolve_variables(
        &self,
        ids: &[&str],
    ) -> Result<Vec<Arc<RwLock<Variable>>>, ProblemError> {
        ids.iter()
            .map(|variable_id| {
                self.variables
                    .get(*variable_id)
                    .cloned()
                    .ok_or(ProblemError::NonExistentVariable)
            })
            .collect()
    }

    // region Validation Functions
    /// Check that a variable is valid to add to this problem
    fn validate_variable(&self, variable: Arc<RwLock<Variable>>) -> Result<(), ProblemError> {
        if self.variables.contains_key(&variable.read().unwrap().id) {
            return Err(ProblemError::VariableIdAlreadyExists);
        };
        let lower_bound = variable.read().unwrap().lower_bound;
        let upper_bound = variable.read().unwrap().upper_bound;
        if lower_bound > upper_bound {
            return Err(ProblemError::InvalidVariableBounds);
        }
        Ok(())
    }

    /// Check that a constraint is valid to add to this problem
    fn validate_constraint(&self, constraint: Arc<RwLock<Constraint>>) -> Result<(), ProblemError> {
        if self.constraints.contains_key(&constraint.read().unwrap().id()) {
            return Err(ProblemError::ConstraintAlreadyExists);
        }
        if let Constraint::Inequality {
            lower_bound,
            upper_bound,
            ..
        } = *constraint.read().unwrap()
        {
            if lower_bound > upper_bound {
                return Err(ProblemError::InvalidConstraintBounds);
            }
        }
        // The constraint must only reference variables owned by this
        // problem
        for variable in constraint.read().unwrap().variables() {
            match self.variables.get(&variable.read().unwrap().id) {
                Some(problem_variable) if Arc::ptr_eq(&variable, problem_variable) => {}
                _ => return Err(ProblemError::NonExistentVariablesInConstraint),
            }
        }
        Ok(())
    }

    /// Check that an objective term is valid to add to this problem
    fn validate_objective_term(&self, term: &ObjectiveTerm) -> Result<(), ProblemError> {
        match self.variables.get(&term.variable.read().unwrap().id) {
            Some(problem_variable) if Arc::ptr_eq(&term.variable, problem_variable) => Ok(()),
            _ => Err(ProblemError::NonExistentVariablesInObjective),
        }
    }
    // endregion Validation Functions
}

/// Errors associated with the Problem
#[derive(Error, Debug, Clone)]
pub enum ProblemError {
    /// Error when trying to add a variable with the same id as an existing
    /// variable
    #[error("Tried to add a variable with the same id as an existing variable")]
    VariableIdAlreadyExists,
    /// Error when trying to add a variable with invalid bounds
    #[error("Tried to add a variable with lower_bound > upper_bound")]
    InvalidVariableBounds,
    /// Error when trying to add a constraint with the same id as an
    /// existing constraint
    #[error("Tried to add a constraint with the same id as an existing constraint")]
    ConstraintAlreadyExists,
    /// Error when trying to add a constraint with invalid bounds
    #[error("Tried to add an inequality constraint with lower_bound > upper_bound")]
    InvalidConstraintBounds,
    /// Error when trying to add a constraint that contains variables not in
    /// the problem
    #[error("Tried to add a constraint with variables not in the problem")]
    NonExistentVariablesInConstraint,
    /// Error when trying to add an objective term which includes variables
    /// not in the problem
    #[error("Tried adding an objective term with variables not in the problem")]
    NonExistentVariablesInObjective,
    /// Error when trying to access a variable that doesn't exist
    #[error("Tried to access a variable that doesn't exist")]
    NonExistentVariable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_problem() {
        let max_problem = Problem::new_maximization();
        assert_eq!(max_problem.objective.sense(), ObjectiveSense::Maximize);
        assert_eq!(max_problem.status(), OptimizationStatus::Unoptimized);

        let min_problem = Problem::new_minimization();
        assert_eq!(min_problem.objective.sense(), ObjectiveSense::Minimize);
    }

    #[test]
    fn update_objective_sense() {
        let mut problem = Problem::new(ObjectiveSense::Maximize);
        problem.update_objective_sense(ObjectiveSense::Minimize);
        assert_eq!(problem.objective.sense(), ObjectiveSense::Minimize);
        problem.update_objective_sense(ObjectiveSense::Maximize);
        assert_eq!(problem.objective.sense(), ObjectiveSense::Maximize);
    }

    #[test]
    fn add_variables() {
        let mut problem = Problem::new(ObjectiveSense::Maximize);

        problem
            .add_new_variable("x", None, VariableType::Continuous, 64., 100.)
            .unwrap();
        let x = problem.variable("x").expect("variable not added");
        assert_eq!(x.read().unwrap().variable_type, VariableType::Continuous);
        assert_eq!(x.read().unwrap().index, 0);
        assert!(
            (x.read().unwrap().lower_bound - 64.0).abs() < 1e-12,
            "Variable added with incorrect lower bound"
        );
        assert!(
            (x.read().unwrap().upper_bound - 100.0).abs() < 1e-12,
            "Variable added with incorrect upper bound"
        );

        problem
            .add_new_variable("y", Some("second"), VariableType::Continuous, 0., 10.)
            .unwrap();
        let y = problem.variable("y").expect("variable not added");
        assert_eq!(y.read().unwrap().index, 1);
        assert_eq!(y.read().unwrap().name.as_deref(), Some("second"));
        assert_eq!(problem.num_variables(), 2);
    }

    #[test]
    fn add_bad_variable() {
        let mut problem = Problem::new(ObjectiveSense::Maximize);

        let res = problem.add_new_variable("x", None, VariableType::Continuous, 100., 64.);
        if let Err(ProblemError::InvalidVariableBounds) = res {
            // Intentionally blank
        } else {
            panic!("Invalid variable bounds not caught")
        }

        problem
            .add_new_variable("x", None, VariableType::Continuous, 0., 1.)
            .unwrap();
        let res = problem.add_new_variable("x", None, VariableType::Continuous, 0., 1.);
        if let Err(ProblemError::VariableIdAlreadyExists) = res {
            // Intentionally blank
        } else {
            panic!("Duplicate variable id not caught")
        }
    }

    #[test]
    fn add_constraint() {
        let mut problem = Problem::new(ObjectiveSense::Maximize);

        problem
            .add_new_variable("x", None, VariableType::Continuous, 64., 100.)
            .unwrap();
        problem
            .add_new_variable("y", None, VariableType::Continuous, 64., 100.)
            .unwrap();

        problem
            .add_new_equality_constraint_by_id("equality", &["x", "y"], &[2., 3.], 200.)
            .unwrap();
        let constraint = problem.constraints.get("equality").unwrap();
        match *constraint.read().unwrap() {
            Constraint::Equality { equals, .. } => {
                assert!((equals - 200.).abs() < 1e-12)
            }
            Constraint::Inequality { .. } => panic!("Incorrect constraint type added"),
        }

        problem
            .add_new_inequality_constraint_by_id("inequality", &["x", "y"], &[2., 3.], 100., 200.)
            .unwrap();
        let constraint = problem.constraints.get("inequality").unwrap();
        match *constraint.read().unwrap() {
            Constraint::Inequality {
                lower_bound,
                upper_bound,
                ..
            } => {
                assert!((lower_bound - 100.).abs() < 1e-12);
                assert!((upper_bound - 200.).abs() < 1e-12);
            }
            Constraint::Equality { .. } => panic!("Incorrect constraint type added"),
        }
        assert_eq!(problem.num_constraints(), 2);
    }

    #[test]
    fn add_bad_constraint() {
        let mut problem = Problem::new(ObjectiveSense::Maximize);

        problem
            .add_new_variable("x", None, VariableType::Continuous, 64., 100.)
            .unwrap();
        problem
            .add_new_variable("y", None, VariableType::Continuous, 64., 100.)
            .unwrap();

        if let Err(ProblemError::InvalidConstraintBounds) = problem
            .add_new_inequality_constraint_by_id("bad_constraint", &["x", "y"], &[2., 3.], 200., 100.)
        {
        } else {
            panic!("Invalid constraint bounds not caught")
        }

        if let Err(ProblemError::NonExistentVariable) =
            problem.add_new_equality_constraint_by_id("missing", &["x", "z"], &[2., 3.], 0.)
        {
        } else {
            panic!("Unknown variable in constraint not caught")
        }

        problem
            .add_new_equality_constraint_by_id("fine", &["x", "y"], &[2., 3.], 0.)
            .unwrap();
        if let Err(ProblemError::ConstraintAlreadyExists) =
            problem.add_new_equality_constraint_by_id("fine", &["x", "y"], &[2., 3.], 0.)
        {
        } else {
            panic!("Duplicate constraint id not caught")
        }
    }

    #[test]
    fn objective_term_for_unknown_variable() {
        let mut problem = Problem::new(ObjectiveSense::Maximize);
        if let Err(ProblemError::NonExistentVariablesInObjective) =
            problem.add_new_linear_objective_term_by_id("x", 1.0)
        {
        } else {
            panic!("Unknown objective variable not caught")
        }
    }

    #[test]
    fn update_variable_bounds() {
        let mut problem = Problem::new(ObjectiveSense::Maximize);
        problem
            .add_new_variable("x", None, VariableType::Continuous, 0., 10.)
            .unwrap();
        problem.update_variable_bounds("x", 1., 5.).unwrap();
        let x = problem.variable("x").unwrap();
        assert!((x.read().unwrap().lower_bound - 1.0).abs() < 1e-12);
        assert!((x.read().unwrap().upper_bound - 5.0).abs() < 1e-12);

        if let Err(ProblemError::InvalidVariableBounds) =
            problem.update_variable_bounds("x", 5., 1.)
        {
        } else {
            panic!("Invalid variable bounds not caught")
        }
    }
}
