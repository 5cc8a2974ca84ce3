//! Layered configuration
//!
//! Config is loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `HEXBUZZ_API_URL`, `HEXBUZZ_MODEL`
//! 2. Project-local: `.hexbuzz/config.toml`
//! 3. Global: `~/.hexbuzz/config.toml`
//!
//! Every field defaults to the values the pipeline shipped with, so an
//! empty config is a valid one.

use crate::backends::automatic1111::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use crate::resolve::GenerationDefaults;
use hexbuzz_core::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_MODEL: &str = "dreamshaperXL_lightningDPMSDE.safetensors";
const DEFAULT_OUTPUT_DIR: &str = "assets/images";

/// Backend connection settings
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub api_url: String,
    /// Required model checkpoint; the guard switches to it before the batch
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Resolved configuration with all layers applied
#[derive(Debug, Clone)]
pub struct HexbuzzConfig {
    pub backend: BackendConfig,
    pub generation: GenerationDefaults,
    pub output_dir: String,
}

impl Default for HexbuzzConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            generation: GenerationDefaults::default(),
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
        }
    }
}

/// One config file's contents; all fields optional so layers only
/// override what they mention
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    backend: BackendOverlay,
    #[serde(default)]
    generation: GenerationOverlay,
    #[serde(default)]
    output: OutputOverlay,
}

#[derive(Debug, Default, Deserialize)]
struct BackendOverlay {
    api_url: Option<String>,
    model: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct GenerationOverlay {
    negative_prompt: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    steps: Option<u32>,
    cfg_scale: Option<f64>,
    sampler_name: Option<String>,
    scheduler: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct OutputOverlay {
    dir: Option<String>,
}

impl ConfigFile {
    fn apply(self, config: &mut HexbuzzConfig) {
        let ConfigFile {
            backend,
            generation,
            output,
        } = self;

        if let Some(v) = backend.api_url {
            config.backend.api_url = v;
        }
        if let Some(v) = backend.model {
            config.backend.model = v;
        }
        if let Some(v) = backend.timeout_secs {
            config.backend.timeout_secs = v;
        }

        if let Some(v) = generation.negative_prompt {
            config.generation.negative_prompt = v;
        }
        if let Some(v) = generation.width {
            config.generation.width = v;
        }
        if let Some(v) = generation.height {
            config.generation.height = v;
        }
        if let Some(v) = generation.steps {
            config.generation.steps = v;
        }
        if let Some(v) = generation.cfg_scale {
            config.generation.cfg_scale = v;
        }
        if let Some(v) = generation.sampler_name {
            config.generation.sampler_name = v;
        }
        if let Some(v) = generation.scheduler {
            config.generation.scheduler = v;
        }

        if let Some(v) = output.dir {
            config.output_dir = v;
        }
    }
}

impl HexbuzzConfig {
    /// Load config with layered precedence: global < project < env vars
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                Self::load_file(&global_path)?.apply(&mut config);
            }
        }

        let local_path = PathBuf::from(".hexbuzz/config.toml");
        if local_path.exists() {
            Self::load_file(&local_path)?.apply(&mut config);
        }

        Self::apply_env_overrides(&mut config);
        Ok(config)
    }

    /// Load config from a specific file path only (for testing)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let mut config = Self::default();
        Self::load_file(path)?.apply(&mut config);
        Self::apply_env_overrides(&mut config);
        Ok(config)
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".hexbuzz").join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<ConfigFile> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config {}: {}", path.display(), e)))
    }

    fn apply_env_overrides(config: &mut HexbuzzConfig) {
        if let Ok(url) = std::env::var("HEXBUZZ_API_URL") {
            config.backend.api_url = url;
        }
        if let Ok(model) = std::env::var("HEXBUZZ_MODEL") {
            config.backend.model = model;
        }
    }
}
