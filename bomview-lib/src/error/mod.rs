//! Error types

mod build;
mod model;
mod repository;
mod resolve;

pub use build::*;
pub use model::*;
pub use repository::*;
pub use resolve::*;
