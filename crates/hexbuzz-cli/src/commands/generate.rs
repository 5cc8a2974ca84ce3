//! Batch generation command

use anyhow::Result;
use hexbuzz_asset_gen::{backends, run_batch, AssetRegistry, BackgroundRemoval, HexbuzzConfig};
use std::path::Path;

pub struct GenerateArgs {
    pub backend: String,
    pub registry: Option<String>,
    pub output: Option<String>,
    pub api_url: Option<String>,
    pub model: Option<String>,
    pub only: Option<String>,
    pub no_remove_bg: bool,
}

pub fn run(args: GenerateArgs) -> Result<()> {
    let mut config = HexbuzzConfig::load()?;
    if let Some(url) = args.api_url {
        config.backend.api_url = url;
    }
    if let Some(model) = args.model {
        config.backend.model = model;
    }
    if let Some(dir) = args.output {
        config.output_dir = dir;
    }

    let mut registry = match &args.registry {
        Some(path) => AssetRegistry::load_from_file(Path::new(path))?,
        None => AssetRegistry::builtin(),
    };

    if let Some(only) = &args.only {
        let ids: Vec<String> = only.split(',').map(|s| s.trim().to_string()).collect();
        for id in &ids {
            if registry.get(id).is_none() {
                anyhow::bail!("Unknown asset id '{}'", id);
            }
        }
        registry = registry.filtered(&ids);
    }

    if registry.is_empty() {
        anyhow::bail!("Registry is empty, nothing to generate");
    }

    let backend = backends::create_backend(&args.backend, &config)?;
    let background = if args.no_remove_bg {
        BackgroundRemoval::disabled()
    } else {
        BackgroundRemoval::detect()
    };

    // Individual asset failures are reported in the summary; the run
    // itself only fails if the model guard does.
    run_batch(
        &registry,
        &config.generation,
        backend.as_ref(),
        &background,
        &config.backend.model,
        Path::new(&config.output_dir),
    )?;
    Ok(())
}
