//! Request resolution
//!
//! Merges a single asset's overrides onto the global generation
//! defaults, producing the exact parameter set sent to the backend.

use crate::spec::AssetSpec;
use hexbuzz_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default negative prompt applied to every asset without its own
const DEFAULT_NEGATIVE_PROMPT: &str = "blurry, low quality, distorted, ugly, bad anatomy, text, watermark, signature, jpeg artifacts, noise";

/// Global generation defaults, tuned once for the whole run.
///
/// The defaults match DreamShaper XL Lightning: 4 steps and a low
/// guidance scale, DPM++ SDE with the Karras scheduler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationDefaults {
    #[serde(default = "default_negative_prompt")]
    pub negative_prompt: String,
    #[serde(default = "default_dimension")]
    pub width: u32,
    #[serde(default = "default_dimension")]
    pub height: u32,
    #[serde(default = "default_steps")]
    pub steps: u32,
    #[serde(default = "default_cfg_scale")]
    pub cfg_scale: f64,
    #[serde(default = "default_sampler")]
    pub sampler_name: String,
    #[serde(default = "default_scheduler")]
    pub scheduler: String,
}

fn default_negative_prompt() -> String {
    DEFAULT_NEGATIVE_PROMPT.to_string()
}
fn default_dimension() -> u32 {
    512
}
fn default_steps() -> u32 {
    4
}
fn default_cfg_scale() -> f64 {
    2.0
}
fn default_sampler() -> String {
    "DPM++ SDE".to_string()
}
fn default_scheduler() -> String {
    "Karras".to_string()
}

impl Default for GenerationDefaults {
    fn default() -> Self {
        Self {
            negative_prompt: default_negative_prompt(),
            width: default_dimension(),
            height: default_dimension(),
            steps: default_steps(),
            cfg_scale: default_cfg_scale(),
            sampler_name: default_sampler(),
            scheduler: default_scheduler(),
        }
    }
}

/// The resolved parameter set for one generation call.
///
/// Field names are the Automatic1111 txt2img JSON keys; the struct
/// serializes directly into the request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub negative_prompt: String,
    pub steps: u32,
    pub cfg_scale: f64,
    pub width: u32,
    pub height: u32,
    pub sampler_name: String,
    pub scheduler: String,
    pub batch_size: u32,
    pub n_iter: u32,
}

/// Merge an asset spec onto the global defaults.
///
/// Dimensions are taken from the spec only when both are set; a single
/// overridden dimension falls back to the default pair so a typo can't
/// produce an unintended canvas shape. Steps, cfg scale, sampler and
/// scheduler are never overridable per asset.
pub fn resolve(defaults: &GenerationDefaults, spec: &AssetSpec) -> Result<GenerationRequest> {
    if spec.prompt.trim().is_empty() {
        return Err(Error::InvalidSpec(format!(
            "asset '{}' has an empty prompt",
            spec.id
        )));
    }

    let negative_prompt = match &spec.negative {
        Some(n) if !n.trim().is_empty() => n.clone(),
        _ => defaults.negative_prompt.clone(),
    };

    let (width, height) = match (spec.width, spec.height) {
        (Some(w), Some(h)) => (w, h),
        _ => (defaults.width, defaults.height),
    };

    Ok(GenerationRequest {
        prompt: spec.prompt.clone(),
        negative_prompt,
        steps: defaults.steps,
        cfg_scale: defaults.cfg_scale,
        width,
        height,
        sampler_name: defaults.sampler_name.clone(),
        scheduler: defaults.scheduler.clone(),
        batch_size: 1,
        n_iter: 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(id: &str) -> AssetSpec {
        AssetSpec {
            id: id.to_string(),
            prompt: "a golden hexagon".to_string(),
            negative: None,
            width: None,
            height: None,
            remove_bg: false,
        }
    }

    #[test]
    fn test_no_overrides_uses_defaults_exactly() {
        let defaults = GenerationDefaults::default();
        let request = resolve(&defaults, &spec("a.png")).unwrap();

        assert_eq!(request.negative_prompt, defaults.negative_prompt);
        assert_eq!(request.width, 512);
        assert_eq!(request.height, 512);
        assert_eq!(request.steps, 4);
        assert_eq!(request.cfg_scale, 2.0);
        assert_eq!(request.sampler_name, "DPM++ SDE");
        assert_eq!(request.scheduler, "Karras");
        assert_eq!(request.batch_size, 1);
        assert_eq!(request.n_iter, 1);
    }

    #[test]
    fn test_both_dimensions_overridden() {
        let mut s = spec("banner.png");
        s.width = Some(1024);
        s.height = Some(256);
        let request = resolve(&GenerationDefaults::default(), &s).unwrap();
        assert_eq!((request.width, request.height), (1024, 256));
    }

    #[test]
    fn test_partial_dimension_falls_back_to_default_pair() {
        let mut s = spec("typo.png");
        s.width = Some(1024);
        let request = resolve(&GenerationDefaults::default(), &s).unwrap();
        // Not a 1024x512 mix
        assert_eq!((request.width, request.height), (512, 512));

        let mut s = spec("typo2.png");
        s.height = Some(64);
        let request = resolve(&GenerationDefaults::default(), &s).unwrap();
        assert_eq!((request.width, request.height), (512, 512));
    }

    #[test]
    fn test_negative_override() {
        let mut s = spec("a.png");
        s.negative = Some("no bees".to_string());
        let request = resolve(&GenerationDefaults::default(), &s).unwrap();
        assert_eq!(request.negative_prompt, "no bees");
    }

    #[test]
    fn test_empty_negative_falls_back_to_default() {
        let mut s = spec("a.png");
        s.negative = Some("   ".to_string());
        let defaults = GenerationDefaults::default();
        let request = resolve(&defaults, &s).unwrap();
        assert_eq!(request.negative_prompt, defaults.negative_prompt);
    }

    #[test]
    fn test_empty_prompt_is_invalid() {
        let mut s = spec("a.png");
        s.prompt = String::new();
        let result = resolve(&GenerationDefaults::default(), &s);
        assert!(matches!(result, Err(hexbuzz_core::Error::InvalidSpec(_))));
    }

    #[test]
    fn test_request_serializes_with_api_field_names() {
        let request = resolve(&GenerationDefaults::default(), &spec("a.png")).unwrap();
        let json = serde_json::to_value(&request).unwrap();
        for key in [
            "prompt",
            "negative_prompt",
            "steps",
            "cfg_scale",
            "width",
            "height",
            "sampler_name",
            "scheduler",
            "batch_size",
            "n_iter",
        ] {
            assert!(json.get(key).is_some(), "missing key {}", key);
        }
    }
}
