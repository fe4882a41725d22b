//! Core rust implementation of Cobra.rs, a crate for constraint based metabolic modeling.

pub mod configuration;
pub mod manipulation;
pub mod metabolic_model;
