//! Generation backend trait and model-state guard

use crate::resolve::GenerationRequest;
use hexbuzz_core::Result;

/// Trait implemented by each generation backend (Automatic1111, Mock)
pub trait GenerationBackend: Send {
    /// Backend name (e.g. "a1111", "mock")
    fn name(&self) -> &str;

    /// The backend's currently active model checkpoint identifier
    fn active_model(&self) -> Result<String>;

    /// Switch the backend to the given model checkpoint
    fn set_model(&self, model: &str) -> Result<()>;

    /// Run one synchronous generation, returning decoded image bytes
    fn txt2img(&self, request: &GenerationRequest) -> Result<Vec<u8>>;
}

/// Ensure the required model checkpoint is active, called once before
/// the batch.
///
/// Backends report checkpoints with extra path/version decoration, so
/// the match is a substring test. The switch is optimistic: no
/// verification read-back is performed, and the switch is assumed to
/// have succeeded if the request did not fail. Any transport error
/// here is fatal for the whole batch.
pub fn ensure_model(backend: &dyn GenerationBackend, required: &str) -> Result<()> {
    println!("Checking current model...");
    let current = backend.active_model()?;

    if current.contains(required) {
        println!("Already using {}", required);
    } else {
        println!("Switching to {}...", required);
        backend.set_model(required)?;
        println!("Model switched.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexbuzz_core::Error;
    use std::sync::Mutex;

    /// Fake backend recording guard traffic
    struct RecordingBackend {
        model: Mutex<String>,
        switches: Mutex<u32>,
        query_fails: bool,
    }

    impl RecordingBackend {
        fn with_model(model: &str) -> Self {
            Self {
                model: Mutex::new(model.to_string()),
                switches: Mutex::new(0),
                query_fails: false,
            }
        }

        fn switch_count(&self) -> u32 {
            *self.switches.lock().unwrap()
        }
    }

    impl GenerationBackend for RecordingBackend {
        fn name(&self) -> &str {
            "recording"
        }

        fn active_model(&self) -> Result<String> {
            if self.query_fails {
                return Err(Error::BackendUnavailable("connection refused".to_string()));
            }
            Ok(self.model.lock().unwrap().clone())
        }

        fn set_model(&self, model: &str) -> Result<()> {
            *self.model.lock().unwrap() = model.to_string();
            *self.switches.lock().unwrap() += 1;
            Ok(())
        }

        fn txt2img(&self, _request: &GenerationRequest) -> Result<Vec<u8>> {
            unreachable!("guard never generates");
        }
    }

    #[test]
    fn test_switches_when_model_differs() {
        let backend = RecordingBackend::with_model("sd15_base.safetensors");
        ensure_model(&backend, "dreamshaperXL_lightningDPMSDE.safetensors").unwrap();
        assert_eq!(backend.switch_count(), 1);
        assert_eq!(
            backend.active_model().unwrap(),
            "dreamshaperXL_lightningDPMSDE.safetensors"
        );
    }

    #[test]
    fn test_no_switch_on_decorated_match() {
        // Backends report checkpoints with path and hash decoration
        let backend = RecordingBackend::with_model(
            "models/dreamshaperXL_lightningDPMSDE.safetensors [a1b2c3d4]",
        );
        ensure_model(&backend, "dreamshaperXL_lightningDPMSDE.safetensors").unwrap();
        assert_eq!(backend.switch_count(), 0);
    }

    #[test]
    fn test_guard_is_idempotent_across_runs() {
        let backend = RecordingBackend::with_model("something_else.ckpt");
        ensure_model(&backend, "dreamshaperXL_lightningDPMSDE.safetensors").unwrap();
        ensure_model(&backend, "dreamshaperXL_lightningDPMSDE.safetensors").unwrap();
        // At most one switch across two consecutive runs
        assert_eq!(backend.switch_count(), 1);
    }

    #[test]
    fn test_query_failure_propagates() {
        let backend = RecordingBackend {
            model: Mutex::new(String::new()),
            switches: Mutex::new(0),
            query_fails: true,
        };
        let result = ensure_model(&backend, "dreamshaperXL_lightningDPMSDE.safetensors");
        assert!(matches!(result, Err(Error::BackendUnavailable(_))));
        assert_eq!(backend.switch_count(), 0);
    }
}
