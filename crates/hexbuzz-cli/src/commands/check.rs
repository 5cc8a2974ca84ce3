//! Backend health command
//!
//! The model switch is optimistic (no read-back after switching), so
//! this is the manual way to confirm what checkpoint is actually
//! active.

use anyhow::Result;
use hexbuzz_asset_gen::{backends, GenerationBackend, HexbuzzConfig};

pub fn run(backend_name: &str, api_url: Option<&str>) -> Result<()> {
    let mut config = HexbuzzConfig::load()?;
    if let Some(url) = api_url {
        config.backend.api_url = url.to_string();
    }

    let backend = backends::create_backend(backend_name, &config)?;
    let active = backend.active_model()?;

    if active.is_empty() {
        println!("Backend '{}' is reachable; no model loaded", backend.name());
    } else {
        println!("Backend '{}' active model: {}", backend.name(), active);
    }

    if active.contains(&config.backend.model) {
        println!("Required model {} is active", config.backend.model);
    } else {
        println!(
            "Required model {} is not active; 'hexbuzz generate' will switch to it",
            config.backend.model
        );
    }

    Ok(())
}
