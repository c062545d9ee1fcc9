//! Image packing.
//!
//! Decodes a raster image, premultiplies alpha, and emits a C++ source
//! unit defining a named pixel buffer.

use crate::error::Result;
use crate::image::rasterizer::Rasterizer;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Directory prefix that is dropped when deriving the namespace.
const NAMESPACE_STRIP_PREFIX: &str = "../common/ui2d";

/// Namespace all generated buffers live under.
const NAMESPACE_ROOT: &str = "ui2d::image";

/// Alpha channel storage policy.
///
/// Color channels are always premultiplied; the policy only selects how
/// the alpha channel itself is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlphaPolicy {
    /// Store alpha unchanged.
    Straight,
    /// Store `255 - alpha`.
    Inverted,
}

impl AlphaPolicy {
    fn apply(self, alpha: u8) -> u8 {
        match self {
            AlphaPolicy::Straight => alpha,
            AlphaPolicy::Inverted => 255 - alpha,
        }
    }
}

/// Decoded RGBA8 image with an explicit row stride.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Bytes per source row; may exceed `width * 4`.
    pub stride: usize,
    /// Source pixel data, `stride * height` bytes.
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Decode a PNG from raw bytes.
    pub fn from_png_bytes(data: &[u8]) -> Result<Self> {
        let image =
            image::load_from_memory_with_format(data, image::ImageFormat::Png)?.into_rgba8();
        let (width, height) = image.dimensions();
        Ok(Self {
            width,
            height,
            stride: width as usize * 4,
            pixels: image.into_raw(),
        })
    }

    /// Premultiply every pixel's color channels by its alpha and repack
    /// into tight `width * 4` rows, storing alpha per `policy`.
    pub fn premultiply(&self, policy: AlphaPolicy) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.width as usize * self.height as usize * 4);
        for y in 0..self.height as usize {
            for x in 0..self.width as usize {
                // Source rows are indexed by stride, not width.
                let i = y * self.stride + x * 4;
                let alpha = self.pixels[i + 3];
                out.push(premultiply_channel(self.pixels[i], alpha));
                out.push(premultiply_channel(self.pixels[i + 1], alpha));
                out.push(premultiply_channel(self.pixels[i + 2], alpha));
                out.push(policy.apply(alpha));
            }
        }
        out
    }
}

/// `channel * alpha / 255`, truncating.
fn premultiply_channel(channel: u8, alpha: u8) -> u8 {
    (u16::from(channel) * u16::from(alpha) / 255) as u8
}

/// Identifier for the generated buffer: the file name minus its final
/// extension, every non-alphanumeric character replaced with `_`.
pub fn image_identifier(file_name: &str) -> String {
    let base = file_name
        .rsplit_once('.')
        .map_or(file_name, |(base, _)| base);
    base.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Namespace for the generated buffer, derived from the asset directory.
///
/// The leading `../common/ui2d` segment is dropped; the remaining path
/// components become nested namespaces under `ui2d::image`.
pub fn image_namespace(dir: &str) -> String {
    let relative = if dir == NAMESPACE_STRIP_PREFIX {
        ""
    } else if let Some(rest) = dir.strip_prefix(NAMESPACE_STRIP_PREFIX) {
        rest.strip_prefix('/').unwrap_or(dir)
    } else {
        dir
    };

    if relative.is_empty() {
        NAMESPACE_ROOT.to_string()
    } else {
        format!("{}::{}", NAMESPACE_ROOT, relative.replace('/', "::"))
    }
}

/// Render the generated C++ unit for a decoded image.
pub fn render_unit(
    namespace: &str,
    identifier: &str,
    image: &DecodedImage,
    policy: AlphaPolicy,
) -> String {
    let pixels = image.premultiply(policy);

    let mut out = String::with_capacity(pixels.len() * 4 + 256);
    out.push_str("#include <common/graphics2d/Buffer.hpp>\n");
    out.push('\n');
    writeln!(out, "namespace {} {{", namespace).unwrap();
    out.push_str("\tnamespace {\n");
    write!(out, "\t\tU8 data[{}] = {{", image.width * image.height * 4).unwrap();
    for (i, byte) in pixels.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write!(out, "{}", byte).unwrap();
    }
    out.push_str("};\n");
    out.push_str("\t}\n");
    writeln!(
        out,
        "\tgraphics2d::Buffer {}{{data, {}, {}, {}, graphics2d::BufferFormat::rgba8, graphics2d::BufferFormatOrder::argb}};",
        identifier,
        image.width * 4,
        image.width,
        image.height
    )
    .unwrap();
    out.push_str("}\n");

    out
}

/// Convert one image into a generated C++ unit at `output_path`.
///
/// `dir` is the asset directory (also the namespace source) and
/// `image_name` the file name within it. Vector inputs go through
/// `rasterizer` first; raster inputs are read directly. The source image
/// is left in place.
pub fn pack_image(
    dir: &str,
    image_name: &str,
    output_path: &Path,
    policy: AlphaPolicy,
    rasterizer: &dyn Rasterizer,
) -> Result<()> {
    let image_path = Path::new(dir).join(image_name);

    let is_vector = image_path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
    let png = if is_vector {
        rasterizer.rasterize(&image_path)?
    } else {
        fs::read(&image_path)?
    };

    let image = DecodedImage::from_png_bytes(&png)?;
    let unit = render_unit(
        &image_namespace(dir),
        &image_identifier(image_name),
        &image,
        policy,
    );
    fs::write(output_path, unit)?;

    Ok(())
}
