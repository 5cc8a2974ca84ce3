//! HexBuzz Asset Gen - batch visual-asset generation pipeline
//!
//! Drives a Stable Diffusion Automatic1111 backend to produce the
//! game's images: ensures the right model checkpoint is active, merges
//! per-asset overrides onto global generation defaults, optionally
//! strips backgrounds for icons, and isolates per-asset failures so a
//! single bad prompt never aborts the batch.

pub mod backend;
pub mod backends;
pub mod batch;
pub mod config;
pub mod postprocess;
pub mod resolve;
pub mod spec;

pub use backend::{ensure_model, GenerationBackend};
pub use batch::{run_batch, AssetOutcome};
pub use config::HexbuzzConfig;
pub use postprocess::BackgroundRemoval;
pub use resolve::{resolve, GenerationDefaults, GenerationRequest};
pub use spec::{AssetRegistry, AssetSpec};
