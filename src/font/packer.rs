//! Font atlas packing.
//!
//! Pairs a glyph-metrics descriptor with its pixel dump and emits a C++
//! source unit defining the packed bitmap and the glyph table.

use crate::error::Result;
use crate::font::descriptor::{AtlasDescriptor, Glyph};
use crate::font::dump::PixelDump;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Output variant of the font packer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontVariant {
    /// Advance and plane offsets wrapped in `FixedI16::fraction(..)`,
    /// glyph extents rounded up.
    FixedPoint,
    /// Bare integer fields, glyph extents rounded to nearest.
    Integer,
}

impl FontVariant {
    /// Extension of the metrics document, including the leading dot.
    pub fn metrics_extension(self) -> &'static str {
        match self {
            FontVariant::FixedPoint => ".msdf.json",
            FontVariant::Integer => ".json",
        }
    }

    /// Extension of the companion pixel dump.
    pub fn dump_extension(self) -> &'static str {
        match self {
            FontVariant::FixedPoint => ".msdf.txt",
            FontVariant::Integer => ".txt",
        }
    }

    fn data_array(self) -> &'static str {
        match self {
            FontVariant::FixedPoint => "msdfData",
            FontVariant::Integer => "bufferData",
        }
    }

    fn round_extent(self, v: f64) -> i64 {
        match self {
            FontVariant::FixedPoint => v.ceil() as i64,
            FontVariant::Integer => round_half_up(v),
        }
    }
}

/// Round half toward positive infinity.
///
/// The glyph tables were generated with this rounding; `f64::round` rounds
/// half away from zero and disagrees on negative halves, which plane-bound
/// offsets routinely produce.
fn round_half_up(v: f64) -> i64 {
    (v + 0.5).floor() as i64
}

/// Integer glyph fields as they appear in the generated table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphFields {
    pub unicode: u32,
    /// Advance width, 8.8 fixed point.
    pub advance: i64,
    /// Outline offset, 8.8 fixed point. Zero without plane bounds.
    pub plane_left: i64,
    pub plane_top: i64,
    /// Atlas rectangle in pixels, y flipped to top-down. All four fields
    /// are zero without atlas bounds.
    pub atlas_left: i64,
    pub atlas_top: i64,
    pub atlas_width: i64,
    pub atlas_height: i64,
}

impl GlyphFields {
    /// Derive the emitted fields for one glyph.
    pub fn derive(glyph: &Glyph, atlas_height: u32, variant: FontVariant) -> Self {
        let (plane_left, plane_top) = match glyph.plane_bounds {
            Some(bounds) => (
                round_half_up(bounds.left * 256.0),
                round_half_up(bounds.top * 256.0),
            ),
            None => (0, 0),
        };

        let (atlas_left, atlas_top, atlas_width, atlas_height) = match glyph.atlas_bounds {
            Some(bounds) => (
                round_half_up(bounds.left - 0.5),
                round_half_up(f64::from(atlas_height) - bounds.top - 0.5),
                variant.round_extent(bounds.right - bounds.left),
                variant.round_extent(bounds.top - bounds.bottom),
            ),
            None => (0, 0, 0, 0),
        };

        Self {
            unicode: glyph.unicode,
            advance: round_half_up(glyph.advance * 256.0),
            plane_left,
            plane_top,
            atlas_left,
            atlas_top,
            atlas_width,
            atlas_height,
        }
    }
}

/// Identifier for the generated `Font`: the base file name with its first
/// character lower-cased.
fn font_identifier(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Render the generated C++ unit for one descriptor/dump pair.
pub fn render_unit(
    name: &str,
    descriptor: &AtlasDescriptor,
    dump: &PixelDump,
    variant: FontVariant,
) -> String {
    let atlas = descriptor.atlas;
    let metrics = descriptor.metrics;
    let data = variant.data_array();

    // Pre-size: 4 chars per dump byte plus the glyph table and framing.
    let capacity = dump.byte_count() * 4 + descriptor.glyphs.len() * 96 + 512;
    let mut out = String::with_capacity(capacity);

    out.push_str("#include \"../Font.hpp\"\n");
    out.push('\n');
    out.push_str("namespace graphics2d {\n");
    out.push_str("\tnamespace font {\n");
    out.push_str("\t\tnamespace {\n");

    // String-literal concatenation leaves a trailing NUL, hence the +1.
    writeln!(out, "\t\t\tU8 {}[{}+1] =", data, atlas.width * atlas.height * 3).unwrap();
    for row in dump.rows() {
        out.push_str("\t\t\t\t\"");
        for byte in row {
            write!(out, "\\x{:02x}", byte).unwrap();
        }
        out.push_str("\"\n");
    }
    out.push_str("\t\t\t;\n");

    writeln!(out, "\t\t\tFontCharacter characters[{}] = {{", descriptor.glyphs.len()).unwrap();
    for glyph in &descriptor.glyphs {
        let fields = GlyphFields::derive(glyph, atlas.height, variant);
        match variant {
            FontVariant::FixedPoint => writeln!(
                out,
                "\t\t\t\t{{{}, FixedI16::fraction({}), FixedI16::fraction({}), FixedI16::fraction({}), {}, {}, {}, {}}},",
                fields.unicode,
                fields.advance,
                fields.plane_left,
                fields.plane_top,
                fields.atlas_left,
                fields.atlas_top,
                fields.atlas_width,
                fields.atlas_height
            )
            .unwrap(),
            FontVariant::Integer => writeln!(
                out,
                "\t\t\t\t{{{}, {}, {}, {}, {}, {}, {}, {}}},",
                fields.unicode,
                fields.advance,
                fields.plane_left,
                fields.plane_top,
                fields.atlas_left,
                fields.atlas_top,
                fields.atlas_width,
                fields.atlas_height
            )
            .unwrap(),
        }
    }
    out.push_str("\t\t\t};\n");
    out.push_str("\t\t}\n");
    out.push('\n');

    writeln!(out, "\t\tFont {} = {{", font_identifier(name)).unwrap();
    match variant {
        FontVariant::FixedPoint => writeln!(
            out,
            "\t\t\t{{{}, {}, {}, {}, graphics2d::BufferFormat::rgb8, graphics2d::BufferFormatOrder::argb}},",
            data,
            atlas.width * 3,
            atlas.width,
            atlas.height
        )
        .unwrap(),
        FontVariant::Integer => writeln!(
            out,
            "\t\t\t{{{}, {}, {}, {}, FramebufferFormat::rgb8}},",
            data,
            atlas.width * atlas.height * 3,
            atlas.width,
            atlas.height
        )
        .unwrap(),
    }
    writeln!(out, "\t\t\t{},", atlas.size).unwrap();
    writeln!(out, "\t\t\t{},", metrics.line_height).unwrap();
    writeln!(out, "\t\t\t{},", metrics.ascender).unwrap();
    writeln!(out, "\t\t\t{},", metrics.descender).unwrap();
    writeln!(out, "\t\t\t{},", metrics.underline_y).unwrap();
    writeln!(out, "\t\t\t{},", metrics.underline_thickness).unwrap();
    out.push_str("\t\t\tsizeof(characters)/sizeof(characters[0]),\n");
    out.push_str("\t\t\tcharacters\n");
    out.push_str("\t\t};\n");
    out.push_str("\t}\n");
    out.push_str("}\n");

    out
}

/// Scan `dir` for descriptor/dump pairs and convert each complete pair.
///
/// Candidates are discovered by the variant's metrics extension; a
/// candidate missing its companion dump is skipped. Both inputs are
/// deleted once the generated unit is on disk. Returns the written paths.
pub fn pack_directory(dir: &Path, variant: FontVariant) -> Result<Vec<PathBuf>> {
    // Phase one: collect candidate base names.
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            continue;
        };
        if let Some(base) = file_name.strip_suffix(variant.metrics_extension()) {
            if !base.is_empty() {
                names.push(base.to_string());
            }
        }
    }
    names.sort();

    // Phase two: probe for both inputs, then convert.
    let mut written = Vec::new();
    for name in names {
        let metrics_path = dir.join(format!("{}{}", name, variant.metrics_extension()));
        let dump_path = dir.join(format!("{}{}", name, variant.dump_extension()));
        if !metrics_path.exists() || !dump_path.exists() {
            continue;
        }

        let descriptor = AtlasDescriptor::parse(&fs::read_to_string(&metrics_path)?)?;
        let dump = PixelDump::parse(&fs::read_to_string(&dump_path)?)?;

        let out_path = dir.join(format!("{}.cpp", name));
        fs::write(&out_path, render_unit(&name, &descriptor, &dump, variant))?;

        // The inputs are single-use intermediates; remove them once the
        // unit is written. No rollback if the write itself failed earlier.
        fs::remove_file(&metrics_path)?;
        fs::remove_file(&dump_path)?;

        written.push(out_path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::descriptor::{AtlasBounds, PlaneBounds};

    fn glyph(unicode: u32, advance: f64) -> Glyph {
        Glyph {
            unicode,
            advance,
            plane_bounds: None,
            atlas_bounds: None,
        }
    }

    #[test]
    fn test_round_half_up_matches_generator() {
        assert_eq!(round_half_up(0.5), 1);
        assert_eq!(round_half_up(-0.5), 0);
        assert_eq!(round_half_up(-0.6), -1);
        assert_eq!(round_half_up(59.2), 59);
    }

    #[test]
    fn test_missing_atlas_bounds_zeroes_all_atlas_fields() {
        let fields = GlyphFields::derive(&glyph(32, 0.25), 208, FontVariant::FixedPoint);
        assert_eq!(fields.atlas_left, 0);
        assert_eq!(fields.atlas_top, 0);
        assert_eq!(fields.atlas_width, 0);
        assert_eq!(fields.atlas_height, 0);
        assert_eq!(fields.advance, 64);
    }

    #[test]
    fn test_atlas_top_is_flipped() {
        let mut g = glyph(65, 0.5);
        g.atlas_bounds = Some(AtlasBounds {
            left: 10.5,
            top: 40.3,
            right: 30.5,
            bottom: 16.3,
        });
        for variant in [FontVariant::FixedPoint, FontVariant::Integer] {
            let fields = GlyphFields::derive(&g, 100, variant);
            assert_eq!(fields.atlas_top, 59, "variant {:?}", variant);
            assert_eq!(fields.atlas_left, 10);
        }
    }

    #[test]
    fn test_extent_rounding_differs_per_variant() {
        let mut g = glyph(65, 0.5);
        g.atlas_bounds = Some(AtlasBounds {
            left: 0.0,
            top: 22.2,
            right: 4.2,
            bottom: 0.0,
        });
        let fixed = GlyphFields::derive(&g, 100, FontVariant::FixedPoint);
        assert_eq!(fixed.atlas_width, 5);
        assert_eq!(fixed.atlas_height, 23);

        let integer = GlyphFields::derive(&g, 100, FontVariant::Integer);
        assert_eq!(integer.atlas_width, 4);
        assert_eq!(integer.atlas_height, 22);
    }

    #[test]
    fn test_plane_bounds_are_fixed_point() {
        let mut g = glyph(65, 0.571);
        g.plane_bounds = Some(PlaneBounds {
            left: -0.028,
            top: 0.737,
        });
        let fields = GlyphFields::derive(&g, 100, FontVariant::FixedPoint);
        assert_eq!(fields.advance, 146);
        assert_eq!(fields.plane_left, -7);
        assert_eq!(fields.plane_top, 189);
    }

    fn one_glyph_descriptor() -> AtlasDescriptor {
        AtlasDescriptor::parse(
            r#"{
                "atlas": {"width": 2, "height": 2, "size": 32},
                "metrics": {
                    "lineHeight": 1.32,
                    "ascender": 1.0,
                    "descender": -0.3,
                    "underlineY": -0.1,
                    "underlineThickness": 0.05
                },
                "glyphs": [{"unicode": 65, "advance": 0.5}]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_render_emits_rows_in_reverse_file_order() {
        let descriptor = one_glyph_descriptor();
        // Row A first in the file, row B last: B is the top row.
        let dump = PixelDump::parse("17 17 17 17 17 17\n34 34 34 34 34 34\n").unwrap();
        let unit = render_unit("Test", &descriptor, &dump, FontVariant::FixedPoint);

        let b_at = unit.find("\\x22").unwrap();
        let a_at = unit.find("\\x11").unwrap();
        assert!(b_at < a_at, "top row must be emitted first:\n{}", unit);
    }

    #[test]
    fn test_render_fixed_point_unit_shape() {
        let descriptor = one_glyph_descriptor();
        let dump = PixelDump::parse("0 0 0 0 0 0\n0 0 0 0 0 0\n").unwrap();
        let unit = render_unit("OpenSans", &descriptor, &dump, FontVariant::FixedPoint);

        assert!(unit.starts_with("#include \"../Font.hpp\"\n"));
        assert!(unit.contains("U8 msdfData[12+1] ="));
        assert!(unit.contains("FontCharacter characters[1] = {"));
        assert!(unit.contains("{65, FixedI16::fraction(128), FixedI16::fraction(0), FixedI16::fraction(0), 0, 0, 0, 0},"));
        assert!(unit.contains("Font openSans = {"));
        assert!(unit.contains("{msdfData, 6, 2, 2, graphics2d::BufferFormat::rgb8, graphics2d::BufferFormatOrder::argb},"));
        assert!(unit.contains("sizeof(characters)/sizeof(characters[0]),"));
    }

    #[test]
    fn test_render_integer_unit_shape() {
        let descriptor = one_glyph_descriptor();
        let dump = PixelDump::parse("0 0 0 0 0 0\n0 0 0 0 0 0\n").unwrap();
        let unit = render_unit("Console", &descriptor, &dump, FontVariant::Integer);

        assert!(unit.contains("U8 bufferData[12+1] ="));
        assert!(unit.contains("{65, 128, 0, 0, 0, 0, 0, 0},"));
        assert!(unit.contains("Font console = {"));
        assert!(unit.contains("{bufferData, 12, 2, 2, FramebufferFormat::rgb8},"));
    }

    #[test]
    fn test_pack_directory_converts_and_deletes_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let metrics_path = dir.path().join("Sans.msdf.json");
        let dump_path = dir.path().join("Sans.msdf.txt");
        fs::write(
            &metrics_path,
            r#"{
                "atlas": {"width": 1, "height": 1, "size": 32},
                "metrics": {
                    "lineHeight": 1.0,
                    "ascender": 0.8,
                    "descender": -0.2,
                    "underlineY": -0.1,
                    "underlineThickness": 0.05
                },
                "glyphs": [{
                    "unicode": 65,
                    "advance": 0.5,
                    "atlasBounds": {"left": 0, "top": 1, "right": 1, "bottom": 0}
                }]
            }"#,
        )
        .unwrap();
        fs::write(&dump_path, "1 2 3\n").unwrap();

        let written = pack_directory(dir.path(), FontVariant::FixedPoint).unwrap();
        assert_eq!(written, vec![dir.path().join("Sans.cpp")]);

        let unit = fs::read_to_string(&written[0]).unwrap();
        assert!(unit.contains("FixedI16::fraction(128)"));
        assert!(!metrics_path.exists());
        assert!(!dump_path.exists());
    }

    #[test]
    fn test_pack_directory_skips_candidate_without_dump() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Lonely.msdf.json"), "{}").unwrap();

        let written = pack_directory(dir.path(), FontVariant::FixedPoint).unwrap();
        assert!(written.is_empty());
        // The unmatched descriptor is left untouched.
        assert!(dir.path().join("Lonely.msdf.json").exists());
    }

    #[test]
    fn test_pack_directory_aborts_on_malformed_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Bad.msdf.json"), "{not json").unwrap();
        fs::write(dir.path().join("Bad.msdf.txt"), "0 0 0\n").unwrap();

        assert!(pack_directory(dir.path(), FontVariant::FixedPoint).is_err());
    }
}
