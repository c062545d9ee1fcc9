//! External vector rasterization.
//!
//! SVG inputs are rasterized by a command-line tool before packing. The
//! boundary is a trait so the conversion logic can run against an
//! in-process substitute.

use crate::error::{PackerError, Result};
use std::path::Path;
use std::process::Command;

/// Produces PNG bytes for a vector input file.
pub trait Rasterizer {
    /// Rasterize `input` and return the PNG bytes.
    fn rasterize(&self, input: &Path) -> Result<Vec<u8>>;
}

/// Rasterizer backed by an external command-line tool.
///
/// Invokes `<program> <input> -o <temp.png>` and reads the temp file back;
/// the temp file is removed afterwards. A missing tool or non-zero exit
/// aborts the conversion.
#[derive(Debug, Clone)]
pub struct CommandRasterizer {
    program: String,
}

impl CommandRasterizer {
    /// Create a rasterizer invoking `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Rasterizer for CommandRasterizer {
    fn rasterize(&self, input: &Path) -> Result<Vec<u8>> {
        let temp = tempfile::Builder::new().suffix(".png").tempfile()?;

        let status = Command::new(&self.program)
            .arg(input)
            .arg("-o")
            .arg(temp.path())
            .status()
            .map_err(|e| {
                PackerError::Rasterize(format!("failed to run {}: {}", self.program, e))
            })?;
        if !status.success() {
            return Err(PackerError::Rasterize(format!(
                "{} exited with {}",
                self.program, status
            )));
        }

        Ok(std::fs::read(temp.path())?)
    }
}
