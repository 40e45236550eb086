//! This module provides a struct for representing reactions

use derive_builder::Builder;
use indexmap::IndexMap;

use crate::configuration::CONFIGURATION;

/// Represents a reaction in the metabolic model
///
/// Stoichiometric coefficients are signed: negative for consumed
/// metabolites, positive for produced ones.
#[derive(Builder, Debug, Clone)]
pub struct Reaction {
    /// Used to identify the reaction
    pub id: String,
    /// Metabolite stoichiometry of the reaction, keyed by metabolite id
    #[builder(default = "IndexMap::new()")]
    pub metabolites: IndexMap<String, f64>,
    /// Human readable reaction name
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Gene protein reaction rule, kept as written in the model file
    #[builder(default = "None")]
    pub gene_reaction_rule: Option<String>,
    /// Lower flux bound
    #[builder(default = "CONFIGURATION.read().unwrap().lower_bound")]
    pub lower_bound: f64,
    /// Upper flux bound
    #[builder(default = "CONFIGURATION.read().unwrap().upper_bound")]
    pub upper_bound: f64,
    /// Reaction subsystem
    #[builder(default = "None")]
    pub subsystem: Option<String>,
    /// Notes about the reaction
    #[builder(default = "None")]
    pub notes: Option<String>,
    /// Reaction annotations
    #[builder(default = "None")]
    pub annotation: Option<String>,
    /// Whether the reaction may carry flux
    #[builder(default = "ReactionActivity::Active")]
    pub activity: ReactionActivity,
}

impl Reaction {
    /// Id of the variable carrying this reaction's forward flux in the
    /// optimization problem.
    pub fn forward_id(&self) -> String {
        format!("{}_forward", &self.id)
    }

    /// Id of the variable carrying this reaction's reverse flux in the
    /// optimization problem.
    pub fn reverse_id(&self) -> String {
        format!("{}_reverse", &self.id)
    }

    /// The stored flux bounds as a (lower, upper) pair.
    pub fn bounds(&self) -> (f64, f64) {
        (self.lower_bound, self.upper_bound)
    }

    /// Disable the reaction without touching its stored bounds.
    pub fn knock_out(&mut self) {
        self.activity = ReactionActivity::Inactive;
    }

    /// Upper bound of the variable associated with the forward reaction
    pub(crate) fn forward_upper_bound(&self) -> f64 {
        match self.activity {
            ReactionActivity::Active => self.upper_bound.max(0.0),
            ReactionActivity::Inactive => 0.0,
        }
    }

    /// Lower bound of the variable associated with the forward reaction
    pub(crate) fn forward_lower_bound(&self) -> f64 {
        match self.activity {
            ReactionActivity::Active => self.lower_bound.max(0.0),
            ReactionActivity::Inactive => 0.0,
        }
    }

    /// Upper bound of the variable associated with the reverse reaction
    pub(crate) fn reverse_upper_bound(&self) -> f64 {
        match self.activity {
            ReactionActivity::Active => (-self.lower_bound).max(0.0),
            ReactionActivity::Inactive => 0.0,
        }
    }

    /// Lower bound of the variable associated with the reverse reaction
    pub(crate) fn reverse_lower_bound(&self) -> f64 {
        match self.activity {
            ReactionActivity::Active => (-self.upper_bound).max(0.0),
            ReactionActivity::Inactive => 0.0,
        }
    }
}

/// Whether a Reaction is active or inactive
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReactionActivity {
    /// The reaction is active and can carry flux between its bounds
    Active,
    /// The reaction is knocked out and can't carry flux
    Inactive,
}
