//! Calculate the metabolic fluxes and biomass yield obtained with the
//! fitted GAM/NGAM values and the experimentally retrieved growth rate for
//! the reductive glycine pathway scenario.

use std::error::Error;
use std::fs;
use std::path::Path;
use std::process;

use log::{error, info, LevelFilter};
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};

use formaflux_core::io::flux_table::write_flux_table;
use formaflux_core::metabolic_model::model::Model;
use formaflux_core::scenario::{self, Scenario};

/// COBRA JSON export of the RehMBEL1391 genome scale model
const MODEL_PATH: &str = "data/RehMBEL1391.json";
/// Flux table written after the solve
const FLUX_TABLE_PATH: &str = "results/fluxes_WT_rGlyP.txt";

fn main() {
    init_logging();
    if let Err(err) = run() {
        error!("{err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut model = Model::read_json(MODEL_PATH)?;
    Scenario::ReductiveGlycine.configure(&mut model)?;

    let solution = scenario::solve(&model)?;
    let biomass_yield = scenario::biomass_yield(&solution)?;
    println!("The biomass yield at 14 dt is: {biomass_yield:.2}");

    if let Some(parent) = Path::new(FLUX_TABLE_PATH).parent() {
        fs::create_dir_all(parent)?;
    }
    write_flux_table(FLUX_TABLE_PATH, &model, &solution)?;
    info!(
        "wrote {} fluxes to {}",
        solution.fluxes.len(),
        FLUX_TABLE_PATH
    );
    Ok(())
}

fn init_logging() {
    let stdout = ConsoleAppender::builder().build();
    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(LevelFilter::Info))
        .unwrap();
    log4rs::init_config(config).unwrap();
}
