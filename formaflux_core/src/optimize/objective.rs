//! Provides struct for representing an optimization problem's objective

use std::sync::{Arc, RwLock};

use crate::optimize::variable::Variable;

/// Represents the objective of an optimization problem
#[derive(Debug, Clone)]
pub struct Objective {
    /// Linear terms summed into the objective (see [`ObjectiveTerm`])
    terms: Vec<ObjectiveTerm>,
    /// Sense of the objective (maximize or minimize), see
    /// [`ObjectiveSense`]
    sense: ObjectiveSense,
}

impl Objective {
    /// Create a new empty objective with a given sense
    pub fn new(sense: ObjectiveSense) -> Self {
        Self {
            terms: Vec::new(),
            sense,
        }
    }

    /// Create a new empty maximization objective
    pub fn new_maximize() -> Self {
        Self::new(ObjectiveSense::Maximize)
    }

    /// Create a new empty minimization objective
    pub fn new_minimize() -> Self {
        Self::new(ObjectiveSense::Minimize)
    }

    /// Change the sense of the objective
    pub fn set_sense(&mut self, sense: ObjectiveSense) {
        self.sense = sense;
    }

    /// The sense of the objective
    pub fn sense(&self) -> ObjectiveSense {
        self.sense
    }

    /// Add a new term to the objective
    pub fn add_term(&mut self, term: ObjectiveTerm) {
        self.terms.push(term);
    }

    /// Add a new linear term to the objective
    pub fn add_linear_term(&mut self, variable: Arc<RwLock<Variable>>, coefficient: f64) {
        self.terms.push(ObjectiveTerm::new(variable, coefficient));
    }

    /// The terms currently in the objective
    pub fn terms(&self) -> &[ObjectiveTerm] {
        &self.terms
    }
}

/// Represents the sense of the objective, whether it should be maximized or
/// minimized
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ObjectiveSense {
    /// The objective should be minimized
    Minimize,
    /// The objective should be maximized
    Maximize,
}

/// A linear term `coefficient * variable` in the objective
#[derive(Debug, Clone)]
pub struct ObjectiveTerm {
    /// Variable in the objective term
    pub(crate) variable: Arc<RwLock<Variable>>,
    /// Coefficient for the term
    pub(crate) coefficient: f64,
}

impl ObjectiveTerm {
    /// Create a new linear objective term
    pub fn new(variable: Arc<RwLock<Variable>>, coefficient: f64) -> Self {
        ObjectiveTerm {
            variable,
            coefficient,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimize::variable::VariableBuilder;

    #[test]
    fn sense_round_trip() {
        let mut objective = Objective::new_maximize();
        assert_eq!(objective.sense(), ObjectiveSense::Maximize);
        objective.set_sense(ObjectiveSense::Minimize);
        assert_eq!(objective.sense(), ObjectiveSense::Minimize);
    }

    #[test]
    fn add_terms() {
        let mut objective = Objective::new_minimize();
        let x = VariableBuilder::default().id("x").build().unwrap().wrap();
        let y = VariableBuilder::default().id("y").build().unwrap().wrap();
        objective.add_linear_term(x, 2.0);
        objective.add_term(ObjectiveTerm::new(y, -1.0));
        assert_eq!(objective.terms().len(), 2);
        assert!((objective.terms()[0].coefficient - 2.0).abs() < 1e-12);
        assert!((objective.terms()[1].coefficient + 1.0).abs() < 1e-12);
    }
}
