//! Core crate of formaflux, flux balance analysis of formatotrophic growth
//! under experimentally fitted maintenance costs.

pub mod io;
pub mod metabolic_model;
pub mod optimize;
pub mod scenario;

mod configuration;
