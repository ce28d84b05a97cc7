//! Catalog data model and loading.

mod catalog;
mod loader;

pub use catalog::*;
pub use loader::*;
