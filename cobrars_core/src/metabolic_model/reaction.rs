//! This module provides a struct for representing reactions
use crate::configuration::CONFIGURATION;
use derive_builder::Builder;
use indexmap::IndexMap;
use thiserror::Error;

/// Represents a reaction in the metabolic model
#[derive(Builder, Debug, Clone)]
pub struct Reaction {
    /// Used to identify the reaction
    pub id: String,
    /// Metabolite stoichiometry of the reaction, keyed by metabolite id
    #[builder(default = "IndexMap::new()")]
    pub metabolites: IndexMap<String, f64>,
    /// Human-readable reaction name
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Lower flux bound
    #[builder(default = "CONFIGURATION.read().unwrap().lower_bound")]
    pub lower_bound: f64,
    /// Upper flux bound
    #[builder(default = "CONFIGURATION.read().unwrap().upper_bound")]
    pub upper_bound: f64,
    /// Reaction subsystem
    #[builder(default = "None")]
    pub subsystem: Option<String>,
    /// Notes about the reaction
    #[builder(default = "None")]
    pub notes: Option<String>,
    /// Reaction Annotations
    #[builder(default = "None")]
    pub annotation: Option<String>,
}

impl Reaction {
    /// Add metabolites to the reaction
    ///
    /// Coefficients are combined with any already present for the same metabolite,
    /// metabolites whose coefficient ends up at zero are dropped from the reaction.
    ///
    /// # Examples
    /// ```rust
    /// use cobrars_core::metabolic_model::reaction::ReactionBuilder;
    /// use indexmap::IndexMap;
    /// let mut reaction = ReactionBuilder::default().id("EX_glc__D_e".to_string()).build().unwrap();
    /// reaction.add_metabolites(IndexMap::from([("glc__D_e".to_string(), -1.0)]));
    /// assert_eq!(reaction.metabolites["glc__D_e"], -1.0);
    /// ```
    pub fn add_metabolites(&mut self, stoichiometry: IndexMap<String, f64>) {
        for (met_id, coefficient) in stoichiometry {
            let combined = self.metabolites.get(&met_id).copied().unwrap_or(0.) + coefficient;
            if combined == 0. {
                // shift_remove keeps the stoichiometry in insertion order
                self.metabolites.shift_remove(&met_id);
            } else {
                self.metabolites.insert(met_id, combined);
            }
        }
    }

    /// Get the (lower, upper) flux bounds
    pub fn bounds(&self) -> (f64, f64) {
        (self.lower_bound, self.upper_bound)
    }

    /// Set both flux bounds at once
    ///
    /// Fails without changing the reaction if either bound is NaN, or if the lower bound is
    /// greater than the upper bound.
    pub fn set_bounds(&mut self, lower_bound: f64, upper_bound: f64) -> Result<(), ReactionError> {
        if lower_bound.is_nan() || upper_bound.is_nan() || lower_bound > upper_bound {
            return Err(ReactionError::InvalidBounds {
                lower_bound,
                upper_bound,
            });
        }
        self.lower_bound = lower_bound;
        self.upper_bound = upper_bound;
        Ok(())
    }

    /// Whether the reaction crosses the system boundary (it involves a single metabolite)
    pub fn is_boundary(&self) -> bool {
        self.metabolites.len() == 1
    }

    /// Whether the reaction can carry flux in both directions
    pub fn is_reversible(&self) -> bool {
        self.lower_bound < 0. && self.upper_bound > 0.
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ReactionError {
    #[error("Invalid bounds, lower bound {lower_bound} must not exceed upper bound {upper_bound}")]
    InvalidBounds { lower_bound: f64, upper_bound: f64 },
}
