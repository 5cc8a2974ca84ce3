//! Automatic1111 Stable Diffusion backend
//!
//! Talks to a local A1111 web UI over its `/sdapi/v1` HTTP API. The
//! generation endpoint is synchronous: each call blocks until the
//! backend responds or the agent's global timeout fires. No retries
//! are performed here; the orchestrator treats each call as one shot.

use crate::backend::GenerationBackend;
use crate::resolve::GenerationRequest;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use hexbuzz_core::{Error, Result};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:7860";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Backend driving a Stable Diffusion Automatic1111 web UI
pub struct A1111Backend {
    api_url: String,
    agent: ureq::Agent,
}

#[derive(Deserialize)]
struct OptionsResponse {
    #[serde(default)]
    sd_model_checkpoint: Option<String>,
}

#[derive(Deserialize)]
struct Txt2ImgResponse {
    #[serde(default)]
    images: Vec<String>,
}

impl A1111Backend {
    pub fn new(api_url: &str, timeout_secs: u64) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(timeout_secs)))
            .build();
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            agent: config.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/sdapi/v1/{}", self.api_url, path)
    }
}

impl GenerationBackend for A1111Backend {
    fn name(&self) -> &str {
        "a1111"
    }

    fn active_model(&self) -> Result<String> {
        let mut response = self
            .agent
            .get(&self.endpoint("options"))
            .call()
            .map_err(|e| transport_error("options query failed", e))?;

        let options: OptionsResponse = response
            .body_mut()
            .read_json()
            .map_err(|e| Error::MalformedResponse(format!("failed to parse options: {}", e)))?;

        // A missing checkpoint field reads as empty, which never
        // matches a required model and so triggers a switch.
        Ok(options.sd_model_checkpoint.unwrap_or_default())
    }

    fn set_model(&self, model: &str) -> Result<()> {
        self.agent
            .post(&self.endpoint("options"))
            .send_json(serde_json::json!({ "sd_model_checkpoint": model }))
            .map_err(|e| transport_error("model switch failed", e))?;
        Ok(())
    }

    fn txt2img(&self, request: &GenerationRequest) -> Result<Vec<u8>> {
        let mut response = self
            .agent
            .post(&self.endpoint("txt2img"))
            .send_json(request)
            .map_err(|e| transport_error("txt2img request failed", e))?;

        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| Error::MalformedResponse(format!("failed to read txt2img body: {}", e)))?;

        decode_txt2img_response(&body)
    }
}

fn transport_error(context: &str, e: ureq::Error) -> Error {
    match e {
        ureq::Error::StatusCode(code) => {
            Error::BackendUnavailable(format!("{}: HTTP {}", context, code))
        }
        other => Error::BackendUnavailable(format!("{}: {}", context, other)),
    }
}

/// Decode a txt2img response body into raw image bytes.
///
/// Takes the first entry of the `images` list only; the pipeline
/// always requests batch_size = 1 even though the response shape
/// supports many.
pub fn decode_txt2img_response(body: &str) -> Result<Vec<u8>> {
    let response: Txt2ImgResponse = serde_json::from_str(body)
        .map_err(|e| Error::MalformedResponse(format!("invalid txt2img JSON: {}", e)))?;

    let payload = response
        .images
        .first()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| Error::MalformedResponse("no image in txt2img response".to_string()))?;

    let bytes = BASE64
        .decode(payload)
        .map_err(|e| Error::Decode(format!("image payload base64 decode failed: {}", e)))?;

    // Reject payloads the image crate can't read; a truncated or
    // non-image payload should fail this asset, not get persisted.
    image::load_from_memory(&bytes)
        .map_err(|e| Error::Decode(format!("image payload is not a valid image: {}", e)))?;

    Ok(bytes)
}
