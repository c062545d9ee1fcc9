//! Pixel dump parsing.
//!
//! The MSDF generator writes the atlas bitmap as a plaintext grid of
//! decimal byte values, one raster row per line, bottom row last.

use crate::error::{PackerError, Result};

/// Pixel rows from a plaintext dump, held in emission order.
///
/// The dump stores rows bottom-to-top; the generated buffer is top-down,
/// so rows are reversed on load.
#[derive(Debug, Clone)]
pub struct PixelDump {
    rows: Vec<Vec<u8>>,
}

impl PixelDump {
    /// Parse a dump from text.
    pub fn parse(text: &str) -> Result<Self> {
        let mut rows = Vec::new();
        for line in text.lines() {
            if line.trim().is_empty() {
                continue;
            }
            let row = line
                .split_whitespace()
                .map(|token| {
                    token.parse::<u8>().map_err(|_| {
                        PackerError::PixelDump(format!("invalid byte value '{}'", token))
                    })
                })
                .collect::<Result<Vec<u8>>>()?;
            rows.push(row);
        }
        rows.reverse();
        Ok(Self { rows })
    }

    /// Rows in emission order (top row first).
    pub fn rows(&self) -> &[Vec<u8>] {
        &self.rows
    }

    /// Total number of byte values across all rows.
    pub fn byte_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }
}
