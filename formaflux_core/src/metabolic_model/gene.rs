//! This module provides the Gene struct representing a gene
//!
//! Genes are carried for model completeness; gene protein reaction rules
//! stay attached to reactions as opaque strings and are never evaluated
//! here.

use derive_builder::Builder;

/// Represents a gene
#[derive(Builder, Clone, Debug, Eq, PartialEq)]
pub struct Gene {
    /// Used to identify the gene
    pub id: String,
    /// Human readable gene name
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Whether this gene is currently active (see [`GeneActivity`])
    #[builder(default = "GeneActivity::Active")]
    pub activity: GeneActivity,
    /// Notes about the gene
    #[builder(default = "None")]
    pub notes: Option<String>,
    /// Gene annotations
    #[builder(default = "None")]
    pub annotation: Option<String>,
}

/// Whether a gene is active or not
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GeneActivity {
    /// Gene is considered active
    Active,
    /// Gene is considered inactive
    Inactive,
}
