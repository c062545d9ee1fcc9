//! Image packing.
//!
//! Converts raster (PNG) or vector (SVG, via an external rasterizer)
//! images into C++ source units embedding a premultiplied-alpha RGBA
//! buffer.

mod packer;
mod rasterizer;

pub use packer::{
    image_identifier, image_namespace, pack_image, render_unit, AlphaPolicy, DecodedImage,
};
pub use rasterizer::{CommandRasterizer, Rasterizer};
