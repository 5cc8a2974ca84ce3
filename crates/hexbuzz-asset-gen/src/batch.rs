//! Batch orchestration
//!
//! Runs the full pipeline: model guard once, then one asset at a time
//! in registry order. Each asset's resolve/generate/post-process/write
//! sequence is caught at the asset boundary so a failure there never
//! aborts the rest of the batch. Execution is strictly sequential; the
//! backend is a singleton resource that is never hit concurrently.

use crate::backend::{ensure_model, GenerationBackend};
use crate::postprocess::BackgroundRemoval;
use crate::resolve::{resolve, GenerationDefaults};
use crate::spec::{AssetRegistry, AssetSpec};
use hexbuzz_core::{ContentHash, Error, Result};
use std::path::{Path, PathBuf};

/// Per-asset status for the terminal summary
#[derive(Debug)]
pub struct AssetOutcome {
    pub id: String,
    pub error: Option<Error>,
}

impl AssetOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Run the batch: guard the model state once, then generate every
/// registry entry in order, recording per-asset outcomes.
///
/// A guard failure is fatal and nothing is attempted. Individual asset
/// failures are recorded and the loop continues, so the returned list
/// always covers the whole registry.
pub fn run_batch(
    registry: &AssetRegistry,
    defaults: &GenerationDefaults,
    backend: &dyn GenerationBackend,
    background: &BackgroundRemoval,
    required_model: &str,
    output_dir: &Path,
) -> Result<Vec<AssetOutcome>> {
    std::fs::create_dir_all(output_dir)?;

    ensure_model(backend, required_model)?;

    let total = registry.len();
    let mut outcomes = Vec::with_capacity(total);

    for (i, spec) in registry.iter().enumerate() {
        println!("\n[{}/{}] Generating {}...", i + 1, total, spec.id);

        match process_asset(spec, defaults, backend, background, output_dir) {
            Ok(path) => {
                outcomes.push(AssetOutcome {
                    id: spec.id.clone(),
                    error: None,
                });
                println!("    Saved: {}", path.display());
            }
            Err(e) => {
                println!("    ERROR: {}", e);
                outcomes.push(AssetOutcome {
                    id: spec.id.clone(),
                    error: Some(e),
                });
            }
        }
    }

    print_summary(&outcomes, output_dir);
    Ok(outcomes)
}

/// One asset's resolve -> generate -> post-process -> persist sequence.
///
/// Generation failure persists nothing. A missing post-processing
/// capability persists the pre-transform bytes and still succeeds; a
/// post-processing failure fails the asset like a generation error.
fn process_asset(
    spec: &AssetSpec,
    defaults: &GenerationDefaults,
    backend: &dyn GenerationBackend,
    background: &BackgroundRemoval,
    output_dir: &Path,
) -> Result<PathBuf> {
    let request = resolve(defaults, spec)?;
    let mut image_bytes = backend.txt2img(&request)?;

    if spec.remove_bg {
        println!("    Removing background...");
        match background.remove_background(&image_bytes) {
            Ok(stripped) => image_bytes = stripped,
            Err(Error::CapabilityUnavailable(msg)) => {
                println!("    Warning: {}. Keeping original background.", msg);
            }
            Err(e) => return Err(e),
        }
    }

    let output_path = output_dir.join(&spec.id);
    std::fs::write(&output_path, &image_bytes)?;
    println!("    sha256 {}", ContentHash::from_bytes(&image_bytes));

    Ok(output_path)
}

fn print_summary(outcomes: &[AssetOutcome], output_dir: &Path) {
    let succeeded = outcomes.iter().filter(|o| o.succeeded()).count();
    let failed: Vec<&AssetOutcome> = outcomes.iter().filter(|o| !o.succeeded()).collect();

    println!(
        "\nGenerated {}/{} assets in {}",
        succeeded,
        outcomes.len(),
        output_dir.display()
    );

    if !failed.is_empty() {
        println!("Failed:");
        for outcome in failed {
            if let Some(e) = &outcome.error {
                println!("  {}: {}", outcome.id, e);
            }
        }
    }
}
