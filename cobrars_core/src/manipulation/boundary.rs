//! Module providing boundary (exchange, demand, and sink) reactions
//!
//! A boundary reaction takes a single metabolite out of the system, with stoichiometry
//! `{metabolite: -1}`. Whether flux can enter the system, leave it, or both is controlled
//! only by the reaction's bounds, which are set according to the [`BoundaryType`].
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use derive_builder::Builder;
use indexmap::IndexMap;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::configuration::CONFIGURATION;
use crate::metabolic_model::metabolite::Metabolite;
use crate::metabolic_model::model::{Model, ModelError};
use crate::metabolic_model::reaction::{
    Reaction, ReactionBuilder, ReactionBuilderError, ReactionError,
};

/// Kinds of boundary reaction
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub enum BoundaryType {
    /// Metabolite can only leave the system, bounds are (0, magnitude)
    Demand,
    /// Metabolite can only enter the system, bounds are (-magnitude, 0)
    Sink,
    /// Metabolite can flow in either direction, bounds are (-magnitude, magnitude)
    Exchange,
}

impl BoundaryType {
    pub const ALL: [BoundaryType; 3] = [
        BoundaryType::Demand,
        BoundaryType::Sink,
        BoundaryType::Exchange,
    ];

    /// Tag naming the boundary type, also used as the prefix of the reaction name
    pub fn tag(&self) -> &'static str {
        match self {
            BoundaryType::Demand => "demand",
            BoundaryType::Sink => "sink",
            BoundaryType::Exchange => "exchange",
        }
    }

    /// Prefix of the reaction id when no other prefix is given
    pub fn default_prefix(&self) -> &'static str {
        match self {
            BoundaryType::Demand => "DM_",
            BoundaryType::Sink => "SK_",
            BoundaryType::Exchange => "EX_",
        }
    }

    /// (lower, upper) flux bounds for a boundary reaction of this type
    pub fn bounds(&self, magnitude: f64) -> (f64, f64) {
        match self {
            BoundaryType::Demand => (0., magnitude),
            BoundaryType::Sink => (-magnitude, 0.),
            BoundaryType::Exchange => (-magnitude, magnitude),
        }
    }

    /// Systems Biology Ontology term describing this type of reaction
    pub fn sbo_term(&self) -> &'static str {
        match self {
            BoundaryType::Demand => "SBO:0000628",
            BoundaryType::Sink => "SBO:0000632",
            BoundaryType::Exchange => "SBO:0000627",
        }
    }
}

impl Display for BoundaryType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for BoundaryType {
    type Err = BoundaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BoundaryType::ALL
            .into_iter()
            .find(|boundary_type| boundary_type.tag() == s)
            .ok_or_else(|| BoundaryError::UnknownBoundaryType(s.to_string()))
    }
}

/// Description of a boundary reaction to create for a metabolite
///
/// # Examples
/// ```rust
/// use cobrars_core::manipulation::boundary::{BoundarySpecBuilder, BoundaryType};
/// let spec = BoundarySpecBuilder::default()
///     .boundary_type(BoundaryType::Demand)
///     .magnitude(10.)
///     .build()
///     .unwrap();
/// assert_eq!(spec.bounds().unwrap(), (0., 10.));
/// ```
#[derive(Builder, Clone, Debug, PartialEq)]
pub struct BoundarySpec {
    /// Kind of boundary reaction (see [`BoundaryType`])
    #[builder(default = "BoundaryType::Demand")]
    pub boundary_type: BoundaryType,
    /// Flux magnitude the bounds are derived from, must be non-negative
    #[builder(default = "CONFIGURATION.read().unwrap().boundary_magnitude")]
    pub magnitude: f64,
    /// Prefix of the reaction id, replacing the default prefix of the boundary type
    #[builder(default = "None", setter(into, strip_option))]
    pub prefix: Option<String>,
    /// Explicit lower bound, replacing the one derived from the magnitude
    #[builder(default = "None", setter(strip_option))]
    pub lower_bound: Option<f64>,
    /// Explicit upper bound, replacing the one derived from the magnitude
    #[builder(default = "None", setter(strip_option))]
    pub upper_bound: Option<f64>,
}

impl BoundarySpec {
    /// Spec for a boundary type with the default magnitude and prefix
    pub fn new(boundary_type: BoundaryType) -> Self {
        BoundarySpec {
            boundary_type,
            magnitude: CONFIGURATION.read().unwrap().boundary_magnitude,
            prefix: None,
            lower_bound: None,
            upper_bound: None,
        }
    }

    /// Prefix used for the reaction id
    pub fn prefix(&self) -> &str {
        self.prefix
            .as_deref()
            .unwrap_or(self.boundary_type.default_prefix())
    }

    /// Id of the boundary reaction for `metabolite`, the prefix followed directly by the
    /// metabolite id
    pub fn reaction_id(&self, metabolite: &Metabolite) -> String {
        format!("{}{}", self.prefix(), metabolite.id)
    }

    /// Name of the boundary reaction for `metabolite`, "{boundary type}_{metabolite name}"
    ///
    /// A metabolite without a name contributes its id instead, so the name never ends in a
    /// bare "_".
    pub fn reaction_name(&self, metabolite: &Metabolite) -> String {
        format!("{}_{}", self.boundary_type, metabolite.display_name())
    }

    /// Resolve the (lower, upper) flux bounds
    pub fn bounds(&self) -> Result<(f64, f64), BoundaryError> {
        if self.magnitude.is_nan() || self.magnitude < 0. {
            return Err(BoundaryError::InvalidMagnitude(self.magnitude));
        }
        let (default_lower, default_upper) = self.boundary_type.bounds(self.magnitude);
        Ok((
            self.lower_bound.unwrap_or(default_lower),
            self.upper_bound.unwrap_or(default_upper),
        ))
    }

    /// Build the boundary reaction for `metabolite` without adding it to a model
    pub fn build_reaction(&self, metabolite: &Metabolite) -> Result<Reaction, BoundaryError> {
        let (lower_bound, upper_bound) = self.bounds()?;
        let mut reaction = ReactionBuilder::default()
            .id(self.reaction_id(metabolite))
            .name(Some(self.reaction_name(metabolite)))
            .annotation(Some(
                json!({ "sbo": self.boundary_type.sbo_term() }).to_string(),
            ))
            .build()?;
        reaction.add_metabolites(IndexMap::from([(metabolite.id.clone(), -1.)]));
        reaction.set_bounds(lower_bound, upper_bound)?;
        Ok(reaction)
    }
}

impl Model {
    /// Add a boundary reaction for a metabolite to the model
    ///
    /// The metabolite is added to the model as well if it is not already part of it. Only the
    /// reaction id is checked for conflicts, so a metabolite can have several boundary reactions
    /// as long as their prefixes differ. On error the model is unchanged.
    ///
    /// # Examples
    /// ```rust
    /// use cobrars_core::manipulation::boundary::{BoundarySpec, BoundaryType};
    /// use cobrars_core::metabolic_model::metabolite::MetaboliteBuilder;
    /// use cobrars_core::metabolic_model::model::Model;
    /// let mut model = Model::new_empty();
    /// let glucose = MetaboliteBuilder::default()
    ///     .id("glc__D_e".to_string())
    ///     .name(Some("D-Glucose".to_string()))
    ///     .build()
    ///     .unwrap();
    /// let reaction = model
    ///     .add_boundary(&glucose, &BoundarySpec::new(BoundaryType::Exchange))
    ///     .unwrap();
    /// assert_eq!(reaction.id, "EX_glc__D_e");
    /// assert_eq!(reaction.bounds(), (-1000., 1000.));
    /// ```
    pub fn add_boundary(
        &mut self,
        metabolite: &Metabolite,
        spec: &BoundarySpec,
    ) -> Result<&Reaction, BoundaryError> {
        let reaction = spec.build_reaction(metabolite)?;
        if self.contains_reaction(&reaction.id) {
            debug!(
                reaction = %reaction.id,
                metabolite = %metabolite.id,
                "boundary reaction already exists"
            );
            return Err(BoundaryError::AlreadyExists(reaction.id));
        }
        if !self.metabolites.contains_key(&metabolite.id) {
            let mut new_metabolite = metabolite.clone();
            new_metabolite.reactions.clear();
            self.add_metabolites(vec![new_metabolite])?;
        }
        let reaction_id = reaction.id.clone();
        debug!(
            reaction = %reaction_id,
            metabolite = %metabolite.id,
            boundary_type = %spec.boundary_type,
            lower_bound = reaction.lower_bound,
            upper_bound = reaction.upper_bound,
            "adding boundary reaction"
        );
        self.add_reactions(vec![reaction])?;
        self.reactions
            .get(&reaction_id)
            .ok_or_else(|| ModelError::ReactionNotFound(reaction_id.clone()).into())
    }
}

/// Add a boundary reaction for a metabolite to a model
///
/// `boundary_type` is one of "demand", "sink", or "exchange". The reaction bounds are
/// derived from `magnitude`: demand gets (0, magnitude), sink gets (-magnitude, 0), and
/// exchange gets (-magnitude, magnitude). When `prefix` is None the reaction id is prefixed
/// with "DM_", "SK_", or "EX_" respectively.
pub fn add_boundary<'m>(
    model: &'m mut Model,
    metabolite: &Metabolite,
    boundary_type: &str,
    magnitude: f64,
    prefix: Option<&str>,
) -> Result<&'m Reaction, BoundaryError> {
    let spec = BoundarySpec {
        boundary_type: boundary_type.parse()?,
        magnitude,
        prefix: prefix.map(str::to_string),
        lower_bound: None,
        upper_bound: None,
    };
    model.add_boundary(metabolite, &spec)
}

#[derive(Debug, Error)]
pub enum BoundaryError {
    #[error("Unknown boundary type {0}, expected one of demand, sink, or exchange")]
    UnknownBoundaryType(String),
    #[error("Invalid boundary magnitude {0}, must be non-negative")]
    InvalidMagnitude(f64),
    #[error("Invalid boundary bounds: {0}")]
    InvalidBounds(#[from] ReactionError),
    #[error("Unable to build boundary reaction")]
    UnableToBuildReaction(#[from] ReactionBuilderError),
    #[error("The metabolite already has a boundary reaction with id {0}")]
    AlreadyExists(String),
    #[error("Unable to add boundary reaction to the model")]
    Model(#[from] ModelError),
}

impl BoundaryError {
    /// Whether the error comes from invalid arguments (rather than the state of the model)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            BoundaryError::UnknownBoundaryType(_)
                | BoundaryError::InvalidMagnitude(_)
                | BoundaryError::InvalidBounds(_)
        )
    }

    /// Whether the error is due to a reaction with the same id already being in the model
    pub fn is_conflict(&self) -> bool {
        matches!(self, BoundaryError::AlreadyExists(_))
    }
}
