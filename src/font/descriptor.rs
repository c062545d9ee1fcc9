//! Glyph atlas descriptor parsing.
//!
//! The descriptor is the JSON document written by the MSDF atlas generator:
//! atlas dimensions, the font's vertical metrics, and one record per glyph.

use crate::error::Result;
use serde::Deserialize;

/// A parsed glyph atlas descriptor.
#[derive(Debug, Clone, Deserialize)]
pub struct AtlasDescriptor {
    /// Atlas bitmap dimensions and nominal glyph size.
    pub atlas: AtlasInfo,
    /// Vertical font metrics.
    pub metrics: FontMetrics,
    /// Glyph records, in generator order.
    pub glyphs: Vec<Glyph>,
}

impl AtlasDescriptor {
    /// Parse a descriptor from JSON text.
    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Atlas bitmap dimensions.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AtlasInfo {
    /// Bitmap width in pixels.
    pub width: u32,
    /// Bitmap height in pixels.
    pub height: u32,
    /// Nominal glyph size in pixels per em.
    pub size: f64,
}

/// Vertical font metrics in em units.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontMetrics {
    pub line_height: f64,
    pub ascender: f64,
    pub descender: f64,
    pub underline_y: f64,
    pub underline_thickness: f64,
}

/// One glyph record.
///
/// Whitespace glyphs carry neither plane nor atlas bounds.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Glyph {
    /// Unicode code point.
    pub unicode: u32,
    /// Horizontal advance in em units.
    pub advance: f64,
    /// Glyph outline offset in em units.
    #[serde(default)]
    pub plane_bounds: Option<PlaneBounds>,
    /// Glyph rectangle within the atlas bitmap, in pixels.
    #[serde(default)]
    pub atlas_bounds: Option<AtlasBounds>,
}

/// Glyph outline bounding-box offset in font design units.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PlaneBounds {
    pub left: f64,
    pub top: f64,
}

/// Glyph rectangle within the atlas bitmap, y-up pixel coordinates.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AtlasBounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_descriptor() {
        let json = r#"{
            "atlas": {"width": 208, "height": 208, "size": 32},
            "metrics": {
                "lineHeight": 1.32,
                "ascender": 1.006,
                "descender": -0.314,
                "underlineY": -0.1,
                "underlineThickness": 0.05
            },
            "glyphs": [
                {"unicode": 32, "advance": 0.25},
                {
                    "unicode": 65,
                    "advance": 0.571,
                    "planeBounds": {"left": -0.028, "top": 0.737, "right": 0.6, "bottom": -0.01},
                    "atlasBounds": {"left": 112.5, "top": 60.5, "right": 134.5, "bottom": 36.5}
                }
            ]
        }"#;

        let descriptor = AtlasDescriptor::parse(json).unwrap();
        assert_eq!(descriptor.atlas.width, 208);
        assert_eq!(descriptor.atlas.height, 208);
        assert_eq!(descriptor.metrics.line_height, 1.32);
        assert_eq!(descriptor.glyphs.len(), 2);

        // Whitespace glyph: no bounds at all
        let space = &descriptor.glyphs[0];
        assert_eq!(space.unicode, 32);
        assert!(space.plane_bounds.is_none());
        assert!(space.atlas_bounds.is_none());

        let a = &descriptor.glyphs[1];
        assert_eq!(a.unicode, 65);
        assert_eq!(a.plane_bounds.unwrap().left, -0.028);
        assert_eq!(a.atlas_bounds.unwrap().top, 60.5);
    }

    #[test]
    fn test_parse_rejects_malformed_document() {
        assert!(AtlasDescriptor::parse("{\"atlas\": {}}").is_err());
        assert!(AtlasDescriptor::parse("not json").is_err());
    }
}
