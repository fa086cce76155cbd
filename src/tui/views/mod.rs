//! Per-region renderers

pub mod detail;
pub mod notes;
pub mod tree;
