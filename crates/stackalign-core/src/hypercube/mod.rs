//! Conversion between flattened tables and dense (frame, row, col) stacks.

mod build;
mod extract;
pub mod linspace;

pub use build::build_table;
pub use extract::get_hypercube;
