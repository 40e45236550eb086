//! This module provides the Model struct for representing an entire
//! metabolic model, together with its translation into a flux balance
//! optimization problem.

use indexmap::IndexMap;
use thiserror::Error;

use crate::metabolic_model::gene::Gene;
use crate::metabolic_model::metabolite::Metabolite;
use crate::metabolic_model::reaction::Reaction;
use crate::optimize::problem::{Problem, ProblemError};
use crate::optimize::solvers::clarabel::ClarabelSolver;
use crate::optimize::solvers::SolverError;
use crate::optimize::variable::VariableType;
use crate::optimize::{OptimizationStatus, ProblemSolution};

/// Represents a genome scale metabolic model
#[derive(Clone, Debug, Default)]
pub struct Model {
    /// Map of reaction ids to Reaction objects, in model order
    pub reactions: IndexMap<String, Reaction>,
    /// Map of gene ids to Gene objects
    pub genes: IndexMap<String, Gene>,
    /// Map of metabolite ids to Metabolite objects
    pub metabolites: IndexMap<String, Metabolite>,
    /// Map of reaction ids to objective function coefficients
    pub objective: IndexMap<String, f64>,
    /// Id associated with the model
    pub id: Option<String>,
    /// Compartments in the model
    ///
    /// An IndexMap<String, String> of {short name: long name}
    pub compartments: Option<IndexMap<String, String>>,
    /// A version identifier for the model, stored as a string
    pub version: Option<String>,
}

impl Model {
    /// Create an empty model
    pub fn new_empty() -> Self {
        Model::default()
    }

    /// Add a reaction to the model
    ///
    /// Every metabolite the reaction references must already be part of the
    /// model.
    ///
    /// # Examples
    /// ```rust
    /// use formaflux_core::metabolic_model::metabolite::MetaboliteBuilder;
    /// use formaflux_core::metabolic_model::model::Model;
    /// use formaflux_core::metabolic_model::reaction::ReactionBuilder;
    /// let mut model = Model::new_empty();
    /// let thf = MetaboliteBuilder::default()
    ///     .id("thf_c".to_string())
    ///     .build()
    ///     .unwrap();
    /// model.add_metabolite(thf);
    /// let mut reaction = ReactionBuilder::default()
    ///     .id("THFS".to_string())
    ///     .build()
    ///     .unwrap();
    /// reaction.metabolites.insert("thf_c".to_string(), 1.0);
    /// model.add_reaction(reaction).unwrap();
    /// ```
    pub fn add_reaction(&mut self, reaction: Reaction) -> Result<(), ModelError> {
        if self.reactions.contains_key(&reaction.id) {
            return Err(ModelError::DuplicateReaction(reaction.id.clone()));
        }
        for metabolite_id in reaction.metabolites.keys() {
            if !self.metabolites.contains_key(metabolite_id) {
                return Err(ModelError::MetaboliteNotFound {
                    reaction: reaction.id.clone(),
                    metabolite: metabolite_id.clone(),
                });
            }
        }
        self.reactions.insert(reaction.id.clone(), reaction);
        Ok(())
    }

    /// Add a metabolite to the model
    pub fn add_metabolite(&mut self, metabolite: Metabolite) {
        self.metabolites.insert(metabolite.id.clone(), metabolite);
    }

    /// Add a gene to the model
    pub fn add_gene(&mut self, gene: Gene) {
        self.genes.insert(gene.id.clone(), gene);
    }

    /// Look up a reaction by id
    pub fn reaction(&self, id: &str) -> Result<&Reaction, ModelError> {
        self.reactions
            .get(id)
            .ok_or_else(|| ModelError::ReactionNotFound(id.to_string()))
    }

    fn reaction_mut(&mut self, id: &str) -> Result<&mut Reaction, ModelError> {
        self.reactions
            .get_mut(id)
            .ok_or_else(|| ModelError::ReactionNotFound(id.to_string()))
    }

    /// Replace the flux bounds of a reaction
    pub fn set_reaction_bounds(
        &mut self,
        id: &str,
        lower_bound: f64,
        upper_bound: f64,
    ) -> Result<(), ModelError> {
        if lower_bound > upper_bound {
            return Err(ModelError::InvalidBounds {
                reaction: id.to_string(),
                lower_bound,
                upper_bound,
            });
        }
        let reaction = self.reaction_mut(id)?;
        reaction.lower_bound = lower_bound;
        reaction.upper_bound = upper_bound;
        Ok(())
    }

    /// Knock a reaction out so that it can carry no flux
    pub fn knock_out_reaction(&mut self, id: &str) -> Result<(), ModelError> {
        self.reaction_mut(id)?.knock_out();
        Ok(())
    }

    /// Make a single reaction the optimization objective, replacing any
    /// objective loaded from the model file
    pub fn set_objective(&mut self, id: &str) -> Result<(), ModelError> {
        if !self.reactions.contains_key(id) {
            return Err(ModelError::ReactionNotFound(id.to_string()));
        }
        self.objective.clear();
        self.objective.insert(id.to_string(), 1.0);
        Ok(())
    }

    /// Translate the model into a linear optimization problem
    ///
    /// Every reaction becomes a forward and a reverse variable with
    /// nonnegative bounds, every metabolite a steady state equality
    /// constraint over the variables of the reactions touching it. The
    /// model's objective coefficients are maximized.
    pub fn build_problem(&self) -> Result<Problem, ModelError> {
        let mut problem = Problem::new_maximization();

        for (_, reaction) in &self.reactions {
            problem.add_new_variable(
                &reaction.forward_id(),
                reaction.name.as_deref(),
                VariableType::Continuous,
                reaction.forward_lower_bound(),
                reaction.forward_upper_bound(),
            )?;
            problem.add_new_variable(
                &reaction.reverse_id(),
                reaction.name.as_deref(),
                VariableType::Continuous,
                reaction.reverse_lower_bound(),
                reaction.reverse_upper_bound(),
            )?;
        }

        // Accumulate the mass balance terms metabolite by metabolite; net
        // flux through a reaction is forward minus reverse.
        let mut balances: IndexMap<String, (Vec<String>, Vec<f64>)> = IndexMap::new();
        for metabolite_id in self.metabolites.keys() {
            balances.insert(metabolite_id.clone(), (Vec::new(), Vec::new()));
        }
        for (_, reaction) in &self.reactions {
            let forward_id = reaction.forward_id();
            let reverse_id = reaction.reverse_id();
            for (metabolite_id, coefficient) in &reaction.metabolites {
                let (variables, coefficients) = balances.get_mut(metabolite_id).ok_or_else(|| {
                    ModelError::MetaboliteNotFound {
                        reaction: reaction.id.clone(),
                        metabolite: metabolite_id.clone(),
                    }
                })?;
                variables.push(forward_id.clone());
                coefficients.push(*coefficient);
                variables.push(reverse_id.clone());
                coefficients.push(-coefficient);
            }
        }
        for (metabolite_id, (variables, coefficients)) in &balances {
            if variables.is_empty() {
                continue;
            }
            let variable_ids: Vec<&str> = variables.iter().map(String::as_str).collect();
            problem.add_new_equality_constraint_by_id(
                metabolite_id,
                &variable_ids,
                coefficients,
                0.0,
            )?;
        }

        for (reaction_id, coefficient) in &self.objective {
            let reaction = self.reaction(reaction_id)?;
            problem.add_new_linear_objective_term_by_id(&reaction.forward_id(), *coefficient)?;
            problem.add_new_linear_objective_term_by_id(&reaction.reverse_id(), -coefficient)?;
        }

        Ok(problem)
    }

    /// Build the flux balance problem and solve it
    pub fn optimize(&self) -> Result<Solution, ModelError> {
        let mut problem = self.build_problem()?;
        let solution = problem.solve(&ClarabelSolver::default())?;
        Ok(self.unpack_solution(&solution))
    }

    /// Relabel a problem level solution in terms of reaction fluxes and
    /// metabolite shadow prices
    fn unpack_solution(&self, solution: &ProblemSolution) -> Solution {
        let mut fluxes = IndexMap::new();
        if let Some(ref values) = solution.variable_values {
            for (id, reaction) in &self.reactions {
                let forward = values.get(&reaction.forward_id()).copied().unwrap_or(0.0);
                let reverse = values.get(&reaction.reverse_id()).copied().unwrap_or(0.0);
                fluxes.insert(id.clone(), forward - reverse);
            }
        }
        let mut shadow_prices = IndexMap::new();
        if let Some(ref duals) = solution.dual_values {
            for metabolite_id in self.metabolites.keys() {
                if let Some(dual) = duals.get(metabolite_id) {
                    shadow_prices.insert(metabolite_id.clone(), *dual);
                }
            }
        }
        Solution {
            status: solution.status,
            objective_value: solution.objective_value,
            fluxes,
            shadow_prices,
        }
    }
}

/// Result of one flux balance solve
#[derive(Clone, Debug)]
pub struct Solution {
    /// Solver status for the underlying linear program
    pub status: OptimizationStatus,
    /// Value of the objective at the optimum
    pub objective_value: Option<f64>,
    /// Reaction id to flux, in model order; empty unless the solve
    /// succeeded
    pub fluxes: IndexMap<String, f64>,
    /// Metabolite id to dual value of its mass balance constraint
    pub shadow_prices: IndexMap<String, f64>,
}

impl Solution {
    /// Flux carried by a reaction, if the solve produced one
    pub fn flux(&self, reaction_id: &str) -> Option<f64> {
        self.fluxes.get(reaction_id).copied()
    }
}

/// Errors raised by model mutation and solving
#[derive(Error, Debug)]
pub enum ModelError {
    /// A reaction id was looked up but is not part of the model
    #[error("reaction {0} is not part of the model")]
    ReactionNotFound(String),
    /// A reaction references a metabolite that is not part of the model
    #[error("reaction {reaction} references metabolite {metabolite} which is not part of the model")]
    MetaboliteNotFound {
        reaction: String,
        metabolite: String,
    },
    /// A reaction with the same id is already part of the model
    #[error("reaction {0} is already part of the model")]
    DuplicateReaction(String),
    /// Bounds with lower above upper were requested for a reaction
    #[error("invalid bounds [{lower_bound}, {upper_bound}] for reaction {reaction}")]
    InvalidBounds {
        reaction: String,
        lower_bound: f64,
        upper_bound: f64,
    },
    /// The optimization problem could not be assembled
    #[error("failed to assemble the optimization problem")]
    Problem(#[from] ProblemError),
    /// The solver backend failed
    #[error("the solver failed")]
    Solver(#[from] SolverError),
}
