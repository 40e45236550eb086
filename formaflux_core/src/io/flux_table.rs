//! Tab separated flux output

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::metabolic_model::model::{Model, Solution};

/// Write one `<reaction id>\t<flux>` line per model reaction, in model
/// order, to `path`
pub fn write_flux_table<P: AsRef<Path>>(
    path: P,
    model: &Model,
    solution: &Solution,
) -> Result<(), FluxTableError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for id in model.reactions.keys() {
        let flux = solution
            .flux(id)
            .ok_or_else(|| FluxTableError::MissingFlux(id.clone()))?;
        writeln!(writer, "{}\t{}", id, flux)?;
    }
    writer.flush()?;
    Ok(())
}

/// Errors raised while writing the flux table
#[derive(Error, Debug)]
pub enum FluxTableError {
    /// The output file could not be written
    #[error("unable to write flux table")]
    Io(#[from] std::io::Error),
    /// The solution carries no flux for a model reaction
    #[error("solution carries no flux for reaction {0}")]
    MissingFlux(String),
}
