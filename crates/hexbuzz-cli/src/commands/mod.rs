//! CLI command implementations

pub mod assets;
pub mod check;
pub mod generate;
