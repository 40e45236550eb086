use std::sync::{LazyLock, RwLock};

pub static CONFIGURATION: LazyLock<RwLock<Configuration>> =
    LazyLock::new(|| RwLock::new(Configuration::default()));

/// Numeric defaults shared by model construction and the solver bridge.
pub struct Configuration {
    /// Lower flux bound assumed when a reaction does not specify one
    pub lower_bound: f64,
    /// Upper flux bound assumed when a reaction does not specify one
    pub upper_bound: f64,
    /// Feasibility tolerance handed to the solver
    pub tolerance: f64,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            lower_bound: -1000.,
            upper_bound: 1000.,
            tolerance: 1e-07,
        }
    }
}
