//! # Asset Packer
//!
//! Build-time converters that turn font atlases and images into C++
//! source units embedding the data as static byte arrays, for direct
//! linkage into the graphics runtime.
//!
//! ## Overview
//!
//! Two independent converters:
//!
//! - **Font atlas packer**: pairs an MSDF glyph-metrics descriptor
//!   (`<name>.msdf.json`) with its plaintext pixel dump
//!   (`<name>.msdf.txt`), emits `<name>.cpp` defining the packed bitmap
//!   and glyph table, and deletes both inputs.
//! - **Image packer**: reads a PNG (or rasterizes an SVG through an
//!   external tool), premultiplies alpha, and emits a source unit
//!   defining a named pixel buffer. Inputs are kept.
//!
//! ## Quick Start
//!
//! ```ignore
//! use asset_packer::{font, image, AlphaPolicy, CommandRasterizer, FontVariant};
//!
//! // Convert every descriptor/dump pair in the fonts directory
//! let written = font::pack_directory(Path::new("fonts"), FontVariant::FixedPoint)?;
//!
//! // Convert a single image
//! let rasterizer = CommandRasterizer::new("inkscape");
//! image::pack_image(
//!     "../common/ui2d/icons",
//!     "close.png",
//!     Path::new("close.cpp"),
//!     AlphaPolicy::Straight,
//!     &rasterizer,
//! )?;
//! ```

pub mod error;
pub mod font;
pub mod image;

// Re-export main types for convenience
pub use error::{PackerError, Result};
pub use font::{AtlasDescriptor, FontVariant, GlyphFields, PixelDump};
pub use self::image::{AlphaPolicy, CommandRasterizer, DecodedImage, Rasterizer};
