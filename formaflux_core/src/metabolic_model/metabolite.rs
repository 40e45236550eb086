//! This module provides the Metabolite struct representing a chemical species

use derive_builder::Builder;

/// Represents a metabolite
///
/// Reactions reference metabolites by id; the model owns the canonical
/// instances.
#[derive(Builder, Debug, Clone)]
pub struct Metabolite {
    /// Used to identify the metabolite (must be unique)
    pub id: String,
    /// Human readable name of the metabolite
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Which compartment the metabolite is in
    #[builder(default = "None")]
    pub compartment: Option<String>,
    /// Electrical charge of the metabolite
    #[builder(default = "0")]
    pub charge: i32,
    /// Chemical formula of the metabolite
    #[builder(default = "None")]
    pub formula: Option<String>,
    /// Notes about the metabolite
    #[builder(default = "None")]
    pub notes: Option<String>,
    /// Metabolite annotations
    #[builder(default = "None")]
    pub annotation: Option<String>,
}
