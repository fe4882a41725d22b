//! This module provides the metabolite struct representing a metabolite

use derive_builder::Builder;
use indexmap::IndexSet;

/// Represents a metabolite
#[derive(Builder, Debug, Clone)]
pub struct Metabolite {
    /// Used to identify the metabolite (must be unique)
    pub id: String,
    /// Human Readable name of the metabolite
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Which compartment the metabolite is in
    #[builder(default = "None")]
    pub compartment: Option<String>,
    /// Electrical charge of the Metabolite
    #[builder(default = "0")]
    pub charge: i32,
    /// Chemical Formula of the metabolite
    #[builder(default = "None")]
    pub formula: Option<String>,
    /// Notes about the metabolite
    #[builder(default = "None")]
    pub notes: Option<String>,
    /// Metabolite annotations
    #[builder(default = "None")]
    pub annotation: Option<String>,
    /// Ids of the reactions this metabolite participates in
    ///
    /// ### Note
    /// This is kept in sync by the [`Model`](crate::metabolic_model::model::Model) when
    /// reactions are added or removed, and should not be edited by hand.
    #[builder(default = "IndexSet::new()")]
    pub(crate) reactions: IndexSet<String>,
}

impl Metabolite {
    /// Name used when displaying the metabolite, falls back to the id when the metabolite
    /// has no name
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Ids of the reactions this metabolite participates in
    pub fn reactions(&self) -> &IndexSet<String> {
        &self.reactions
    }
}
