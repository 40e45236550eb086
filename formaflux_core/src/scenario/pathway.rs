//! Reductive glycine pathway graft

use indexmap::IndexMap;

use crate::metabolic_model::model::{Model, ModelError};
use crate::metabolic_model::reaction::ReactionBuilder;

/// Add the two step formate assimilation bypass to the model
///
/// Formate is loaded onto tetrahydrofolate by the ligase `Ftl` and
/// cyclized to 5,10 methenyl THF by the cyclohydrolase `Fch`. Both
/// reactions are irreversible.
pub fn add_reductive_glycine_pathway(model: &mut Model) -> Result<(), ModelError> {
    let ftl_metabolites: IndexMap<String, f64> = IndexMap::from([
        ("for_c".to_string(), -1.0),
        ("thf_c".to_string(), -1.0),
        ("atp_c".to_string(), -1.0),
        ("adp_c".to_string(), 1.0),
        ("pi_c".to_string(), 1.0),
        ("10fthf_c".to_string(), 1.0),
    ]);
    let ftl = ReactionBuilder::default()
        .id("Ftl".to_string())
        .name(Some("Formate THF ligase".to_string()))
        .subsystem(Some("One carbon metabolism".to_string()))
        .metabolites(ftl_metabolites)
        .lower_bound(0.0)
        .upper_bound(1000.0)
        .build()
        .unwrap();
    model.add_reaction(ftl)?;

    let fch_metabolites: IndexMap<String, f64> = IndexMap::from([
        ("10fthf_c".to_string(), -1.0),
        ("h_c".to_string(), -1.0),
        ("methf_c".to_string(), 1.0),
        ("h2o_c".to_string(), 1.0),
    ]);
    let fch = ReactionBuilder::default()
        .id("Fch".to_string())
        .name(Some("Methenyl THF cyclohydrolase".to_string()))
        .subsystem(Some("One carbon metabolism".to_string()))
        .metabolites(fch_metabolites)
        .lower_bound(0.0)
        .upper_bound(1000.0)
        .build()
        .unwrap();
    model.add_reaction(fch)
}
