//! Module providing representation of optimization problem variables

use std::fmt::{Display, Formatter};
use std::sync::{Arc, RwLock};

use derive_builder::Builder;

/// A variable in an optimization problem
#[derive(Builder, Debug, Clone)]
pub struct Variable {
    /// Used to identify the variable (must be unique within a problem)
    #[builder(setter(into))]
    pub id: String,
    /// Human readable name of the variable
    #[builder(default = "None", setter(into, strip_option))]
    pub name: Option<String>,
    /// Type of the variable (see [`VariableType`])
    #[builder(default = "VariableType::Continuous")]
    pub variable_type: VariableType,
    /// Lower variable bound
    #[builder(default = "0.0")]
    pub lower_bound: f64,
    /// Upper variable bound
    #[builder(default = "f64::INFINITY")]
    pub upper_bound: f64,
    /// Column index of the variable in the assembled problem
    #[builder(default = "0")]
    pub index: usize,
}

impl Variable {
    /// Wrap the variable for shared ownership between the problem, its
    /// constraints, and its objective
    pub fn wrap(self) -> Arc<RwLock<Variable>> {
        Arc::new(RwLock::new(self))
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}:{}", name, self.variable_type),
            None => write!(f, "{}:{}", self.id, self.variable_type),
        }
    }
}

/// Represents the type of variable in an optimization problem
///
/// # Notes:
/// The Clarabel backend only supports Continuous variables
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum VariableType {
    /// Continuous variable
    Continuous,
    /// Integer variable
    Integer,
    /// Binary variable
    Binary,
}

impl Display for VariableType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            VariableType::Continuous => write!(f, "CONTINUOUS"),
            VariableType::Integer => write!(f, "INTEGER"),
            VariableType::Binary => write!(f, "BINARY"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let unnamed = VariableBuilder::default()
            .id("x")
            .lower_bound(0.0)
            .upper_bound(10.0)
            .build()
            .unwrap();
        assert_eq!(format!("{}", unnamed), "x:CONTINUOUS");

        let named = VariableBuilder::default()
            .id("y")
            .name("flux through y")
            .variable_type(VariableType::Integer)
            .build()
            .unwrap();
        assert_eq!(format!("{}", named), "flux through y:INTEGER");
    }

    #[test]
    fn builder_defaults() {
        let variable = VariableBuilder::default().id("v").build().unwrap();
        assert_eq!(variable.variable_type, VariableType::Continuous);
        assert!((variable.lower_bound - 0.0).abs() < 1e-12);
        assert!(variable.upper_bound.is_infinite());
        assert_eq!(variable.index, 0);
    }
}
