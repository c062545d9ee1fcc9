//! Font atlas packing.
//!
//! Pairs an MSDF glyph-metrics descriptor with its plaintext pixel dump
//! and emits a C++ source unit embedding the packed bitmap and glyph
//! table.

mod descriptor;
mod dump;
mod packer;

pub use descriptor::{AtlasBounds, AtlasDescriptor, AtlasInfo, FontMetrics, Glyph, PlaneBounds};
pub use dump::PixelDump;
pub use packer::{pack_directory, render_unit, FontVariant, GlyphFields};
