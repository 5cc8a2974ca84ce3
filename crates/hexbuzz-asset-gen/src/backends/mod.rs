//! Backend registry
//!
//! Maps backend names to concrete implementations.

pub mod automatic1111;
pub mod mock;

use crate::backend::GenerationBackend;
use crate::config::HexbuzzConfig;
use hexbuzz_core::{Error, Result};

/// Create a backend by name with configuration
pub fn create_backend(name: &str, config: &HexbuzzConfig) -> Result<Box<dyn GenerationBackend>> {
    match name {
        "a1111" => Ok(Box::new(automatic1111::A1111Backend::new(
            &config.backend.api_url,
            config.backend.timeout_secs,
        ))),
        "mock" => Ok(Box::new(mock::MockBackend::new())),
        _ => Err(Error::Config(format!(
            "Unknown backend '{}'. Available: a1111, mock",
            name
        ))),
    }
}

/// List all available backend names
pub fn available_backends() -> Vec<&'static str> {
    vec!["a1111", "mock"]
}
