//! Module for modifying the contents of a Model
pub mod boundary;
