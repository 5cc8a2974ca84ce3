//! Mock backend for dry runs and testing
//!
//! Produces a deterministic solid-colour PNG per prompt without any
//! network calls, and keeps its "active model" in process so the model
//! guard behaves exactly as it would against a live backend.

use crate::backend::GenerationBackend;
use crate::resolve::GenerationRequest;
use hexbuzz_core::{Error, Result};
use std::io::Cursor;
use std::sync::Mutex;

/// A backend that generates placeholder images locally
#[derive(Default)]
pub struct MockBackend {
    model: Mutex<String>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GenerationBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    fn active_model(&self) -> Result<String> {
        Ok(self.model.lock().expect("mock model lock").clone())
    }

    fn set_model(&self, model: &str) -> Result<()> {
        *self.model.lock().expect("mock model lock") = model.to_string();
        Ok(())
    }

    fn txt2img(&self, request: &GenerationRequest) -> Result<Vec<u8>> {
        // Derive a colour from the prompt for visual interest
        let hash_val = request
            .prompt
            .bytes()
            .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32));
        let r = ((hash_val >> 16) & 0xFF) as u8;
        let g = ((hash_val >> 8) & 0xFF) as u8;
        let b = (hash_val & 0xFF) as u8;

        let img =
            image::RgbaImage::from_pixel(request.width, request.height, image::Rgba([r, g, b, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .map_err(|e| Error::Generation(format!("failed to encode placeholder PNG: {}", e)))?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ensure_model;
    use crate::resolve::{resolve, GenerationDefaults};
    use crate::spec::AssetSpec;

    fn request(prompt: &str, width: u32, height: u32) -> GenerationRequest {
        let spec = AssetSpec {
            id: "test.png".to_string(),
            prompt: prompt.to_string(),
            negative: None,
            width: Some(width),
            height: Some(height),
            remove_bg: false,
        };
        resolve(&GenerationDefaults::default(), &spec).unwrap()
    }

    #[test]
    fn test_output_is_a_png_of_requested_size() {
        let backend = MockBackend::new();
        let bytes = backend.txt2img(&request("honeycomb", 64, 32)).unwrap();
        let img = image::load_from_memory(&bytes).unwrap();
        assert_eq!((img.width(), img.height()), (64, 32));
    }

    #[test]
    fn test_same_prompt_same_bytes() {
        let backend = MockBackend::new();
        let a = backend.txt2img(&request("bee", 8, 8)).unwrap();
        let b = backend.txt2img(&request("bee", 8, 8)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_model_guard_switches_fresh_mock_once() {
        let backend = MockBackend::new();
        ensure_model(&backend, "dreamshaperXL_lightningDPMSDE.safetensors").unwrap();
        assert_eq!(
            backend.active_model().unwrap(),
            "dreamshaperXL_lightningDPMSDE.safetensors"
        );
    }
}
