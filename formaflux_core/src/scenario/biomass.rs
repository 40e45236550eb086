//! Replacement biomass reaction with fitted maintenance coefficients

use indexmap::IndexMap;

use crate::metabolic_model::model::{Model, ModelError};
use crate::metabolic_model::reaction::ReactionBuilder;

use super::BIOMASS_REACTION;

/// Macromolecule composition of one gram of biomass, independent of the
/// maintenance fit
const COMPOSITION: &[(&str, f64)] = &[
    ("PHOSPHOLIPID_c", -0.0495),
    ("DNA_c", -0.031),
    ("PEPTIDO_c", -0.06),
    ("CAV_c", -0.03),
    ("RNA_c", -0.06),
    ("LPS_c", -0.034),
    ("PROTEIN_c", -0.68),
    ("CARBO_c", -0.055),
    ("BIOMASS_c", 1.0),
];

/// Add the `new_biomass` reaction to the model
///
/// ATP and water consumption and phosphate, proton, and ADP production are
/// all scaled by the fitted growth associated maintenance `gam`; the
/// macromolecule coefficients are fixed.
pub fn add_maintenance_biomass(model: &mut Model, gam: f64) -> Result<(), ModelError> {
    let mut metabolites: IndexMap<String, f64> = COMPOSITION
        .iter()
        .map(|(id, coefficient)| (id.to_string(), *coefficient))
        .collect();
    metabolites.insert("atp_c".to_string(), -gam);
    metabolites.insert("h2o_c".to_string(), -gam);
    metabolites.insert("pi_c".to_string(), gam);
    metabolites.insert("h_c".to_string(), gam);
    metabolites.insert("adp_c".to_string(), gam);

    let reaction = ReactionBuilder::default()
        .id(BIOMASS_REACTION.to_string())
        .name(Some("Biomass synthesis reaction".to_string()))
        .subsystem(Some("Biomass".to_string()))
        .metabolites(metabolites)
        .lower_bound(0.0)
        .upper_bound(1000.0)
        .build()
        .unwrap();
    model.add_reaction(reaction)
}
