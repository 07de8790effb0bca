//! Bill-of-materials tree projection library
//!
//! Builds an in-memory composition tree from parent/child records, projects
//! dynamically added attribute columns over it and keeps expand state, searches
//! and row colours across full rebuilds.

pub mod build;
pub mod column;
pub mod config;
pub mod edit;
pub mod error;
pub mod model;
pub mod repository;
pub mod resolve;
pub mod view;

mod tree;

pub use tree::*;
