//! Registry listing command

use anyhow::Result;
use hexbuzz_asset_gen::{AssetRegistry, AssetSpec};
use std::path::Path;

pub fn run(registry_path: Option<&str>, format: &str) -> Result<()> {
    let registry = match registry_path {
        Some(path) => AssetRegistry::load_from_file(Path::new(path))?,
        None => AssetRegistry::builtin(),
    };

    match format {
        "json" => {
            let specs: Vec<&AssetSpec> = registry.iter().collect();
            println!("{}", serde_json::to_string_pretty(&specs)?);
        }
        "text" => {
            for spec in registry.iter() {
                let dims = match (spec.width, spec.height) {
                    (Some(w), Some(h)) => format!("{}x{}", w, h),
                    _ => "default".to_string(),
                };
                let bg = if spec.remove_bg { "remove-bg" } else { "" };
                println!("{:<26} {:>9}  {}", spec.id, dims, bg);
            }
            println!("\n{} assets", registry.len());
        }
        _ => anyhow::bail!("Unknown format: {} (use 'text' or 'json')", format),
    }

    Ok(())
}
