//! Module providing JSON IO for Models
//!
//! Reads genome scale models in the COBRA JSON interchange format, arrays
//! of metabolites, reactions, and genes.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::metabolic_model::gene::{Gene, GeneActivity};
use crate::metabolic_model::metabolite::Metabolite;
use crate::metabolic_model::model::{Model, ModelError};
use crate::metabolic_model::reaction::{ReactionBuilder, ReactionBuilderError};

// region JSON Model
/// Represents a JSON serialized model, used for reading models in json
/// format
#[derive(Deserialize)]
struct JsonModel {
    metabolites: Vec<JsonMetabolite>,
    reactions: Vec<JsonReaction>,
    genes: Vec<JsonGene>,
    id: Option<String>,
    compartments: Option<IndexMap<String, String>>,
    version: Option<String>,
}

#[derive(Deserialize)]
struct JsonMetabolite {
    id: String,
    name: Option<String>,
    compartment: Option<String>,
    charge: Option<i32>,
    formula: Option<String>,
    notes: Option<Value>,
    annotation: Option<Value>,
}

#[derive(Deserialize)]
struct JsonReaction {
    id: String,
    name: Option<String>,
    metabolites: IndexMap<String, f64>,
    lower_bound: f64,
    upper_bound: f64,
    gene_reaction_rule: String,
    objective_coefficient: Option<f64>,
    subsystem: Option<String>,
    notes: Option<Value>,
    annotation: Option<Value>,
}

#[derive(Deserialize)]
struct JsonGene {
    id: String,
    name: Option<String>,
    notes: Option<Value>,
    annotation: Option<Value>,
}
// endregion JSON Model

// region Conversions
impl From<JsonGene> for Gene {
    fn from(g: JsonGene) -> Self {
        /* The notes and annotations are kept as JSON strings; the data is
        too loosely structured to be worth unpacking further. */
        Self {
            id: g.id,
            name: g.name,
            activity: GeneActivity::Active, // All genes start as active
            notes: g.notes.map(|v| v.to_string()),
            annotation: g.annotation.map(|v| v.to_string()),
        }
    }
}

impl From<JsonMetabolite> for Metabolite {
    fn from(m: JsonMetabolite) -> Self {
        Self {
            id: m.id,
            name: m.name,
            compartment: m.compartment,
            charge: m.charge.unwrap_or_default(),
            formula: m.formula,
            notes: m.notes.map(|v| v.to_string()),
            annotation: m.annotation.map(|v| v.to_string()),
        }
    }
}

impl Model {
    /// Read a model from a COBRA JSON file
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Model, JsonError> {
        let model_str = fs::read_to_string(path)
            .map_err(|err| JsonError::UnableToRead(err.to_string()))?;
        let json_model = serde_json::from_str::<JsonModel>(&model_str)
            .map_err(|err| JsonError::UnableToParse(err.to_string()))?;
        Model::from_json(json_model)
    }

    fn from_json(json_model: JsonModel) -> Result<Self, JsonError> {
        let mut model = Model::new_empty();
        model.id = json_model.id;
        model.compartments = json_model.compartments;
        model.version = json_model.version;

        // Genes and metabolites convert directly; reactions go through the
        // model so their metabolite references are validated.
        json_model.genes.into_iter().for_each(|g| {
            model.add_gene(Gene::from(g));
        });
        json_model.metabolites.into_iter().for_each(|m| {
            model.add_metabolite(Metabolite::from(m));
        });
        for rxn in json_model.reactions {
            let rule = if rxn.gene_reaction_rule.is_empty() {
                None
            } else {
                Some(rxn.gene_reaction_rule)
            };
            let new_reaction = ReactionBuilder::default()
                .id(rxn.id.clone())
                .metabolites(rxn.metabolites)
                .name(rxn.name)
                .gene_reaction_rule(rule)
                .lower_bound(rxn.lower_bound)
                .upper_bound(rxn.upper_bound)
                .subsystem(rxn.subsystem)
                .notes(rxn.notes.map(|v| v.to_string()))
                .annotation(rxn.annotation.map(|v| v.to_string()))
                .build()?;
            model.add_reaction(new_reaction)?;
            if let Some(coefficient) = rxn.objective_coefficient {
                if coefficient != 0.0 {
                    model.objective.insert(rxn.id, coefficient);
                }
            }
        }
        log::info!(
            "loaded model {} with {} reactions, {} metabolites, {} genes",
            model.id.as_deref().unwrap_or("<unnamed>"),
            model.reactions.len(),
            model.metabolites.len(),
            model.genes.len()
        );
        Ok(model)
    }
}

/// Errors raised while reading a JSON model
#[derive(Error, Debug)]
pub enum JsonError {
    /// The model file could not be read
    #[error("unable to read model file: {0}")]
    UnableToRead(String),
    /// The file contents are not valid model JSON
    #[error("unable to parse model JSON: {0}")]
    UnableToParse(String),
    /// A reaction entry could not be turned into a Reaction
    #[error("unable to build reaction")]
    UnableToBuildReaction(#[from] ReactionBuilderError),
    /// The file describes an inconsistent model
    #[error("model file is inconsistent")]
    InconsistentModel(#[from] ModelError),
}
// endregion Conversions
