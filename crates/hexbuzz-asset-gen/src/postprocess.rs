//! Background removal post-processing
//!
//! Icons are generated on solid backgrounds and stripped to
//! transparent PNGs with the external `rembg` tool. Availability is
//! probed once at startup so the whole batch behaves consistently; if
//! the tool is missing the stage degrades, keeping the solid
//! background, rather than failing the asset.

use hexbuzz_core::{Error, Result};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::process::Command;

const TOOL_NAME: &str = "rembg";

/// Background-removal stage with startup feature detection
pub struct BackgroundRemoval {
    tool: Option<PathBuf>,
}

impl BackgroundRemoval {
    /// Probe the environment once for the `rembg` executable
    pub fn detect() -> Self {
        let tool = find_in_path(TOOL_NAME);
        if tool.is_none() {
            println!(
                "Warning: {} not found on PATH. Icons will keep their backgrounds.",
                TOOL_NAME
            );
        }
        Self { tool }
    }

    /// A stage that never strips backgrounds (opt-out and tests)
    pub fn disabled() -> Self {
        Self { tool: None }
    }

    /// A stage using a specific tool path
    pub fn with_tool(tool: PathBuf) -> Self {
        Self { tool: Some(tool) }
    }

    pub fn available(&self) -> bool {
        self.tool.is_some()
    }

    /// Strip the background, returning a transparency-preserving PNG.
    ///
    /// Returns `CapabilityUnavailable` when the tool is missing; the
    /// orchestrator downgrades that to a warning and keeps the input
    /// bytes. Any other failure fails the asset.
    pub fn remove_background(&self, image_bytes: &[u8]) -> Result<Vec<u8>> {
        let tool = self.tool.as_ref().ok_or_else(|| {
            Error::CapabilityUnavailable(format!("{} is not installed", TOOL_NAME))
        })?;

        let work_dir = std::env::temp_dir();
        let token = uuid::Uuid::new_v4();
        let input_path = work_dir.join(format!("hexbuzz-bg-{}-in.png", token));
        let output_path = work_dir.join(format!("hexbuzz-bg-{}-out.png", token));

        std::fs::write(&input_path, image_bytes)?;
        let result = run_tool(tool, &input_path, &output_path);
        std::fs::remove_file(&input_path).ok();

        let stripped = match result {
            Ok(()) => std::fs::read(&output_path),
            Err(e) => {
                std::fs::remove_file(&output_path).ok();
                return Err(e);
            }
        };
        std::fs::remove_file(&output_path).ok();

        reencode_rgba_png(&stripped?)
    }
}

fn run_tool(tool: &Path, input: &Path, output: &Path) -> Result<()> {
    let result = Command::new(tool)
        .arg("i")
        .arg(input)
        .arg(output)
        .output()
        .map_err(|e| Error::PostProcess(format!("failed to run {}: {}", TOOL_NAME, e)))?;

    if !result.status.success() {
        return Err(Error::PostProcess(format!(
            "{} exited with {}: {}",
            TOOL_NAME,
            result.status,
            String::from_utf8_lossy(&result.stderr).trim()
        )));
    }
    Ok(())
}

/// Re-encode tool output as RGBA PNG so the alpha channel is always present
fn reencode_rgba_png(bytes: &[u8]) -> Result<Vec<u8>> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| Error::PostProcess(format!("{} produced unreadable output: {}", TOOL_NAME, e)))?;
    let rgba = decoded.to_rgba8();

    let mut out = Vec::new();
    rgba.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .map_err(|e| Error::PostProcess(format!("failed to encode transparent PNG: {}", e)))?;
    Ok(out)
}

fn find_in_path(name: &str) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_stage_signals_capability_error() {
        let stage = BackgroundRemoval::disabled();
        assert!(!stage.available());
        let result = stage.remove_background(b"anything");
        assert!(matches!(result, Err(Error::CapabilityUnavailable(_))));
    }

    #[test]
    fn test_bogus_tool_is_a_post_process_error() {
        let stage = BackgroundRemoval::with_tool(PathBuf::from("/nonexistent/rembg"));
        assert!(stage.available());
        let result = stage.remove_background(b"anything");
        assert!(matches!(result, Err(Error::PostProcess(_))));
    }

    #[test]
    fn test_reencode_preserves_alpha() {
        let img = image::RgbaImage::from_pixel(3, 3, image::Rgba([10, 20, 30, 0]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let out = reencode_rgba_png(&bytes).unwrap();
        let decoded = image::load_from_memory(&out).unwrap();
        assert_eq!(decoded.color(), image::ColorType::Rgba8);
        assert_eq!(decoded.to_rgba8().get_pixel(1, 1).0[3], 0);
    }

    #[test]
    fn test_reencode_rejects_non_image() {
        let result = reencode_rgba_png(b"not an image");
        assert!(matches!(result, Err(Error::PostProcess(_))));
    }
}
