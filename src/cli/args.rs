use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "sheetpack")]
#[command(version, about = "Sprite sheet packer", long_about = None)]
pub struct CliArgs {
    /// Input image files or directories
    pub input: Vec<PathBuf>,

    /// Output sheet image; the extension picks the encoder (png, bmp, tga, tif, jpg)
    #[arg(short, long, required_unless_present = "config")]
    pub image: Option<PathBuf>,

    /// Output map file; the extension picks the writer (txt, tpsheet, json)
    #[arg(short, long)]
    pub map: Option<PathBuf>,

    /// Text file listing input images, one path per line
    #[arg(short = 'l', long, value_name = "FILE")]
    pub input_list: Option<PathBuf>,

    /// Load settings from a .sheetpack config file
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Force power-of-two sheet dimensions
    #[arg(long)]
    pub pow2: bool,

    /// Force a square sheet
    #[arg(long)]
    pub square: bool,

    /// Maximum sheet width in pixels [default: 4096]
    #[arg(long)]
    pub max_width: Option<u32>,

    /// Maximum sheet height in pixels [default: 4096]
    #[arg(long)]
    pub max_height: Option<u32>,

    /// Padding between images in pixels [default: 1]
    #[arg(short, long)]
    pub padding: Option<u32>,

    /// Output RGB instead of RGBA (opaque PNG)
    #[arg(long)]
    pub opaque: bool,

    /// Keep each image's decoded pixel format instead of converting to RGBA8
    #[arg(long)]
    pub keep_format: bool,

    /// Compress PNG output (0-6 or 'max'). Default level is 2 if flag is present without value.
    #[arg(long, value_name = "LEVEL", default_missing_value = "2", num_args = 0..=1)]
    pub compress: Option<CompressionLevel>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// PNG compression level (0-6 or max)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionLevel {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression
    Max,
}

impl std::str::FromStr for CompressionLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("max") {
            Ok(CompressionLevel::Max)
        } else {
            s.parse::<u8>()
                .map_err(|_e| format!("invalid compression level: {}", s))
                .and_then(|n| {
                    if n <= 6 {
                        Ok(CompressionLevel::Level(n))
                    } else {
                        Err(format!("compression level must be 0-6 or 'max', got {}", n))
                    }
                })
        }
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        CompressionLevel::Level(2)
    }
}
