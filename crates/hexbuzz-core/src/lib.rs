//! HexBuzz Core - shared types for the HexBuzz asset tooling
//!
//! Provides the error taxonomy and `Result` alias used across the
//! asset pipeline, plus `ContentHash` for reporting what was written.

mod error;
mod hash;

pub use error::{Error, Result};
pub use hash::ContentHash;
