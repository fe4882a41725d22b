//! This module provides the Model struct for representing an entire metabolic model
use crate::metabolic_model::metabolite::Metabolite;
use crate::metabolic_model::reaction::Reaction;

use indexmap::{IndexMap, IndexSet};
use thiserror::Error;
use tracing::trace;

/// Represents a Genome Scale Metabolic Model
#[derive(Clone, Debug)]
pub struct Model {
    /// Map of reaction ids to Reaction Objects
    pub reactions: IndexMap<String, Reaction>,
    /// Map of metabolite ids to Metabolite Objects
    pub metabolites: IndexMap<String, Metabolite>,
    /// Id associated with the Model
    pub id: Option<String>,
}

impl Model {
    pub fn new_empty() -> Self {
        Model {
            reactions: IndexMap::new(),
            metabolites: IndexMap::new(),
            id: None,
        }
    }

    /// Check whether a reaction with the given id is part of the model
    pub fn contains_reaction(&self, reaction_id: &str) -> bool {
        self.reactions.contains_key(reaction_id)
    }

    /// Add metabolites to the model
    ///
    /// Either all the metabolites are added, or (if any id is already present in the model or
    /// repeated in `metabolites`) none are.
    ///
    /// # Examples
    /// ```rust
    /// use cobrars_core::metabolic_model::metabolite::MetaboliteBuilder;
    /// use cobrars_core::metabolic_model::model::Model;
    /// let mut model = Model::new_empty();
    /// let glucose = MetaboliteBuilder::default().id("glc__D_e".to_string()).build().unwrap();
    /// model.add_metabolites(vec![glucose]).unwrap();
    /// assert!(model.metabolites.contains_key("glc__D_e"));
    /// ```
    pub fn add_metabolites(&mut self, metabolites: Vec<Metabolite>) -> Result<(), ModelError> {
        self.check_new_metabolites(&metabolites)?;
        for met in metabolites {
            self.metabolites.insert(met.id.clone(), met);
        }
        Ok(())
    }

    /// Add a reaction to the model, see [`Model::add_reactions`]
    pub fn add_reaction(&mut self, reaction: Reaction) -> Result<(), ModelError> {
        self.add_reactions(vec![reaction])
    }

    /// Add reactions to the model
    ///
    /// Every reaction id must be new to the model (and unique within `reactions`), and every
    /// metabolite a reaction references must already be part of the model. If any reaction fails
    /// these checks, the model is left unchanged. Otherwise each reaction is inserted and
    /// registered with the metabolites it references.
    ///
    /// # Examples
    /// ```rust
    /// use cobrars_core::metabolic_model::model::Model;
    /// use cobrars_core::metabolic_model::reaction::{Reaction, ReactionBuilder};
    /// let mut model = Model::new_empty();
    /// let new_reaction = ReactionBuilder::default().id("new_reaction".to_string()).build().unwrap();
    /// model.add_reactions(vec![new_reaction]).unwrap();
    /// assert!(model.contains_reaction("new_reaction"));
    /// ```
    pub fn add_reactions(&mut self, reactions: Vec<Reaction>) -> Result<(), ModelError> {
        self.check_new_reactions(&reactions)?;
        for rxn in reactions {
            for met_id in rxn.metabolites.keys() {
                if let Some(met) = self.metabolites.get_mut(met_id) {
                    met.reactions.insert(rxn.id.clone());
                }
            }
            trace!(reaction = %rxn.id, "added reaction to model");
            self.reactions.insert(rxn.id.clone(), rxn);
        }
        Ok(())
    }

    fn check_new_metabolites(&self, metabolites: &[Metabolite]) -> Result<(), ModelError> {
        let mut seen = IndexSet::new();
        for met in metabolites {
            if self.metabolites.contains_key(&met.id) || !seen.insert(met.id.as_str()) {
                return Err(ModelError::DuplicateMetabolite(met.id.clone()));
            }
        }
        Ok(())
    }

    fn check_new_reactions(&self, reactions: &[Reaction]) -> Result<(), ModelError> {
        let mut seen = IndexSet::new();
        for rxn in reactions {
            if self.contains_reaction(&rxn.id) || !seen.insert(rxn.id.as_str()) {
                return Err(ModelError::DuplicateReaction(rxn.id.clone()));
            }
            if let Some(missing) = rxn
                .metabolites
                .keys()
                .find(|met_id| !self.metabolites.contains_key(*met_id))
            {
                return Err(ModelError::MetaboliteNotFound {
                    reaction: rxn.id.clone(),
                    metabolite: missing.clone(),
                });
            }
        }
        Ok(())
    }

    /// Remove a reaction from the model, returning it
    ///
    /// The reaction is also removed from the reaction sets of its metabolites.
    pub fn remove_reaction(&mut self, reaction_id: &str) -> Result<Reaction, ModelError> {
        let rxn = self
            .reactions
            .shift_remove(reaction_id)
            .ok_or_else(|| ModelError::ReactionNotFound(reaction_id.to_string()))?;
        for met_id in rxn.metabolites.keys() {
            if let Some(met) = self.metabolites.get_mut(met_id) {
                met.reactions.shift_remove(reaction_id);
            }
        }
        trace!(reaction = %reaction_id, "removed reaction from model");
        Ok(rxn)
    }

    /// Iterate over the reactions which cross the system boundary
    pub fn boundary_reactions(&self) -> impl Iterator<Item = &Reaction> {
        self.reactions.values().filter(|rxn| rxn.is_boundary())
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("Reaction {0} is already present in the model")]
    DuplicateReaction(String),
    #[error("Metabolite {0} is already present in the model")]
    DuplicateMetabolite(String),
    #[error("Reaction {reaction} references metabolite {metabolite} which is not in the model")]
    MetaboliteNotFound { reaction: String, metabolite: String },
    #[error("Reaction {0} is not present in the model")]
    ReactionNotFound(String),
}

#[cfg(test)]
mod model_tests {
    use super::*;
    use crate::metabolic_model::metabolite::MetaboliteBuilder;
    use crate::metabolic_model::reaction::ReactionBuilder;

    fn metabolite(id: &str) -> Metabolite {
        MetaboliteBuilder::default()
            .id(id.to_string())
            .build()
            .unwrap()
    }

    fn reaction(id: &str, metabolites: &[(&str, f64)]) -> Reaction {
        ReactionBuilder::default()
            .id(id.to_string())
            .metabolites(
                metabolites
                    .iter()
                    .map(|(m, c)| (m.to_string(), *c))
                    .collect(),
            )
            .build()
            .unwrap()
    }

    fn setup_model() -> Model {
        let mut model = Model::new_empty();
        model
            .add_metabolites(vec![
                metabolite("atp_c"),
                metabolite("adp_c"),
                metabolite("pi_c"),
            ])
            .unwrap();
        model
    }

    #[test]
    fn add_reactions_wires_metabolites() {
        let mut model = setup_model();
        model
            .add_reactions(vec![reaction(
                "ATPM",
                &[("atp_c", -1.), ("adp_c", 1.), ("pi_c", 1.)],
            )])
            .unwrap();
        assert!(model.contains_reaction("ATPM"));
        for met_id in ["atp_c", "adp_c", "pi_c"] {
            assert!(model.metabolites[met_id].reactions().contains("ATPM"));
        }
    }

    #[test]
    fn add_reactions_duplicate_is_atomic() {
        let mut model = setup_model();
        model
            .add_reaction(reaction("ATPM", &[("atp_c", -1.)]))
            .unwrap();
        let err = model
            .add_reactions(vec![
                reaction("NEW", &[("adp_c", 1.)]),
                reaction("ATPM", &[("pi_c", 1.)]),
            ])
            .unwrap_err();
        assert_eq!(err, ModelError::DuplicateReaction("ATPM".to_string()));
        assert_eq!(model.reactions.len(), 1);
        assert!(model.metabolites["adp_c"].reactions().is_empty());

        // Repeats within a single batch are rejected too
        let err = model
            .add_reactions(vec![
                reaction("A", &[("adp_c", 1.)]),
                reaction("A", &[("pi_c", 1.)]),
            ])
            .unwrap_err();
        assert_eq!(err, ModelError::DuplicateReaction("A".to_string()));
        assert_eq!(model.reactions.len(), 1);
    }

    #[test]
    fn add_reactions_missing_metabolite() {
        let mut model = setup_model();
        let err = model
            .add_reaction(reaction("GLCt", &[("glc__D_e", -1.)]))
            .unwrap_err();
        assert_eq!(
            err,
            ModelError::MetaboliteNotFound {
                reaction: "GLCt".to_string(),
                metabolite: "glc__D_e".to_string(),
            }
        );
        assert!(model.reactions.is_empty());
    }

    #[test]
    fn duplicate_metabolites() {
        let mut model = setup_model();
        let err = model
            .add_metabolites(vec![metabolite("h_c"), metabolite("atp_c")])
            .unwrap_err();
        assert_eq!(err, ModelError::DuplicateMetabolite("atp_c".to_string()));
        assert!(!model.metabolites.contains_key("h_c"));
    }

    #[test]
    fn remove_reaction_unwires() {
        let mut model = setup_model();
        model
            .add_reaction(reaction("ATPM", &[("atp_c", -1.), ("adp_c", 1.)]))
            .unwrap();
        let removed = model.remove_reaction("ATPM").unwrap();
        assert_eq!(removed.id, "ATPM");
        assert!(!model.contains_reaction("ATPM"));
        assert!(model.metabolites["atp_c"].reactions().is_empty());
        assert_eq!(
            model.remove_reaction("ATPM").unwrap_err(),
            ModelError::ReactionNotFound("ATPM".to_string())
        );
    }

    #[test]
    fn boundary_reactions() {
        let mut model = setup_model();
        model
            .add_reactions(vec![
                reaction("ATPM", &[("atp_c", -1.), ("adp_c", 1.)]),
                reaction("EX_pi_c", &[("pi_c", -1.)]),
            ])
            .unwrap();
        let boundary: Vec<&str> = model.boundary_reactions().map(|r| r.id.as_str()).collect();
        assert_eq!(boundary, vec!["EX_pi_c"]);
    }
}
