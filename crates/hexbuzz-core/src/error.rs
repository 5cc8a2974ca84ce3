//! Error types for the HexBuzz asset pipeline

use thiserror::Error;

/// The main error type for asset pipeline operations
#[derive(Debug, Error)]
pub enum Error {
    /// Bad static configuration; indicates a programming error in the
    /// registry rather than a runtime condition.
    #[error("Invalid asset spec: {0}")]
    InvalidSpec(String),

    /// Transport/HTTP failure talking to the generation backend.
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The backend replied but without the expected image data.
    #[error("Malformed backend response: {0}")]
    MalformedResponse(String),

    /// An image payload could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// An optional capability (background removal) is missing in the
    /// running environment. Non-fatal: the orchestrator downgrades
    /// this to a warning.
    #[error("Capability unavailable: {0}")]
    CapabilityUnavailable(String),

    /// Post-processing ran and failed. Fails the asset like a
    /// generation error.
    #[error("Post-processing error: {0}")]
    PostProcess(String),

    /// Catch-all for anything else raised while processing one asset.
    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for asset pipeline operations
pub type Result<T> = std::result::Result<T, Error>;
