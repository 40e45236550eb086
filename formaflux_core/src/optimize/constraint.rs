//! Provides struct for representing a constraint in an optimization problem

use std::fmt::{Display, Formatter};
use std::sync::{Arc, RwLock};

use crate::optimize::variable::Variable;

/// Represents a linear constraint in an optimization problem
#[derive(Debug, Clone)]
pub enum Constraint {
    /// Represents an equality constraint, where `terms` = `equals`
    Equality {
        /// Used to identify the constraint (must be unique within a problem)
        id: String,
        /// Linear terms which are added together, see [`ConstraintTerm`]
        terms: Vec<ConstraintTerm>,
        /// The right hand side of the equality constraint
        equals: f64,
    },
    /// Represents a two sided inequality constraint
    Inequality {
        /// Used to identify the constraint (must be unique within a problem)
        id: String,
        /// Linear terms which are added together, see [`ConstraintTerm`]
        terms: Vec<ConstraintTerm>,
        /// The lowest value the sum of the terms can take
        lower_bound: f64,
        /// The highest value the sum of the terms can take
        upper_bound: f64,
    },
}

impl Constraint {
    /// Create a new equality constraint
    ///
    /// # Parameters
    /// - `id`: Identifier for the constraint
    /// - `variables`: A slice of wrapped variables
    /// - `coefficients`: A slice of coefficients for the variables
    /// - `equals`: The right hand side of the equality
    ///
    /// # Examples
    /// ```rust
    /// use formaflux_core::optimize::constraint::Constraint;
    /// use formaflux_core::optimize::variable::VariableBuilder;
    /// let x = VariableBuilder::default()
    ///     .id("x")
    ///     .lower_bound(0.0)
    ///     .upper_bound(20.)
    ///     .build()
    ///     .unwrap()
    ///     .wrap();
    /// let y = VariableBuilder::default()
    ///     .id("y")
    ///     .lower_bound(3.0)
    ///     .upper_bound(7.0)
    ///     .build()
    ///     .unwrap()
    ///     .wrap();
    /// // Create a constraint representing 3*x + 2*y = 6
    /// let balance = Constraint::new_equality("balance", &[x, y], &[3.0, 2.0], 6.);
    /// ```
    pub fn new_equality(
        id: &str,
        variables: &[Arc<RwLock<Variable>>],
        coefficients: &[f64],
        equals: f64,
    ) -> Self {
        Constraint::Equality {
            id: id.to_string(),
            terms: Constraint::zip_into_terms(variables, coefficients),
            equals,
        }
    }

    /// Create a new inequality constraint representing
    /// `lower_bound` <= terms <= `upper_bound`
    pub fn new_inequality(
        id: &str,
        variables: &[Arc<RwLock<Variable>>],
        coefficients: &[f64],
        lower_bound: f64,
        upper_bound: f64,
    ) -> Self {
        Constraint::Inequality {
            id: id.to_string(),
            terms: Constraint::zip_into_terms(variables, coefficients),
            lower_bound,
            upper_bound,
        }
    }

    /// Wrap the constraint for shared ownership
    pub fn wrap(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Identifier of the constraint
    pub fn id(&self) -> String {
        match self {
            Constraint::Equality { id, .. } => id.clone(),
            Constraint::Inequality { id, .. } => id.clone(),
        }
    }

    /// The variables referenced by the constraint
    pub fn variables(&self) -> Vec<Arc<RwLock<Variable>>> {
        self.terms()
            .iter()
            .map(|term| term.variable.clone())
            .collect()
    }

    /// The linear terms of the constraint
    pub(crate) fn terms(&self) -> &[ConstraintTerm] {
        match self {
            Constraint::Equality { terms, .. } => terms,
            Constraint::Inequality { terms, .. } => terms,
        }
    }

    /// Take a slice of variable references and a slice of coefficients and
    /// zip them together into a vec of ConstraintTerms
    fn zip_into_terms(
        variables: &[Arc<RwLock<Variable>>],
        coefficients: &[f64],
    ) -> Vec<ConstraintTerm> {
        variables
            .iter()
            .zip(coefficients)
            .map(|(variable, coefficient)| ConstraintTerm {
                variable: variable.clone(),
                coefficient: *coefficient,
            })
            .collect()
    }

    /// Convert a slice of terms into a String representation
    fn terms_to_string(terms: &[ConstraintTerm]) -> String {
        if terms.is_empty() {
            return "0".to_string();
        }
        let mut str_rep = String::new();
        for term in &terms[..terms.len() - 1] {
            str_rep.push_str(format!("{} + ", term).as_str());
        }
        str_rep.push_str(format!("{}", terms[terms.len() - 1]).as_str());
        str_rep
    }
}

impl Display for Constraint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Constraint::Equality { terms, equals, .. } => {
                write!(f, "{} = {}", Self::terms_to_string(terms), equals)
            }
            Constraint::Inequality {
                terms,
                lower_bound,
                upper_bound,
                ..
            } => {
                write!(
                    f,
                    "{} <= {} <= {}",
                    lower_bound,
                    Self::terms_to_string(terms),
                    upper_bound
                )
            }
        }
    }
}

/// Represents a single term in a constraint, specifically the
/// multiplication of the `variable` by the `coefficient`
#[derive(Debug, Clone)]
pub struct ConstraintTerm {
    /// A reference to a [`Variable`]
    pub(crate) variable: Arc<RwLock<Variable>>,
    /// The coefficient for the variable
    pub(crate) coefficient: f64,
}

impl Display for ConstraintTerm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}*{}",
            self.coefficient,
            self.variable.read().unwrap().id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimize::variable::VariableBuilder;

    #[test]
    fn display() {
        let x = VariableBuilder::default().id("x").build().unwrap().wrap();
        let y = VariableBuilder::default().id("y").build().unwrap().wrap();

        let equality = Constraint::new_equality("eq", &[x.clone(), y.clone()], &[3.0, 2.0], 6.);
        assert_eq!(format!("{}", equality), "3*x + 2*y = 6");

        let inequality = Constraint::new_inequality("ineq", &[x, y], &[1.0, -1.0], 0., 5.);
        assert_eq!(format!("{}", inequality), "0 <= 1*x + -1*y <= 5");
    }

    #[test]
    fn variables_are_shared() {
        let x = VariableBuilder::default().id("x").build().unwrap().wrap();
        let constraint = Constraint::new_equality("eq", &[x.clone()], &[1.0], 0.);
        let held = constraint.variables();
        assert_eq!(held.len(), 1);
        assert!(Arc::ptr_eq(&held[0], &x));
    }
}
