//! Asset Packer CLI
//!
//! Convert font atlases and images into embeddable C++ source units.

use asset_packer::font::{self, FontVariant};
use asset_packer::image::{pack_image, AlphaPolicy, CommandRasterizer};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "asset-packer")]
#[command(author, version, about = "Convert font atlases and images into embeddable C++ source", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert every glyph-metrics/pixel-dump pair found in a directory
    Font {
        /// Directory to scan for descriptor/dump pairs
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Output variant
        #[arg(short, long, value_enum, default_value = "fixed-point")]
        variant: VariantArg,
    },

    /// Convert a single image into an embeddable pixel buffer
    Image {
        /// Asset directory (also determines the namespace)
        #[arg(short, long)]
        dir: String,

        /// Image file name within the asset directory (PNG or SVG)
        #[arg(short, long)]
        image: String,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Store the alpha channel inverted (255 - alpha)
        #[arg(long)]
        invert_alpha: bool,

        /// External rasterizer command for SVG inputs
        #[arg(long, default_value = "inkscape")]
        rasterizer: String,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum VariantArg {
    /// FixedI16-wrapped metrics, glyph extents rounded up
    FixedPoint,
    /// Bare integer metrics, glyph extents rounded to nearest
    Integer,
}

impl From<VariantArg> for FontVariant {
    fn from(value: VariantArg) -> Self {
        match value {
            VariantArg::FixedPoint => FontVariant::FixedPoint,
            VariantArg::Integer => FontVariant::Integer,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Font { dir, variant } => {
            let written = font::pack_directory(&dir, variant.into())?;
            for path in &written {
                println!("Written {}", path.display());
            }
            if written.is_empty() {
                println!("No descriptor/dump pairs found in {}", dir.display());
            }
        }
        Commands::Image {
            dir,
            image,
            output,
            invert_alpha,
            rasterizer,
        } => {
            let policy = if invert_alpha {
                AlphaPolicy::Inverted
            } else {
                AlphaPolicy::Straight
            };
            let rasterizer = CommandRasterizer::new(rasterizer);
            pack_image(&dir, &image, &output, policy, &rasterizer)?;
            println!("Written {}", output.display());
        }
    }

    Ok(())
}
