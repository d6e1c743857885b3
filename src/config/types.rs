use serde::{Deserialize, Serialize};

use crate::packing::{DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH, DEFAULT_PADDING};

/// PNG compression level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompressConfig {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression ("max")
    Max(String),
}

/// Sheetpack project file structure.
///
/// All paths in the config are relative to the config file location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// Config file version (currently 1)
    pub version: u32,
    /// Input file paths or glob patterns
    pub input: Vec<String>,
    /// Text file listing more inputs, one per line
    pub input_list: Option<String>,
    /// Output sheet image path
    pub image: Option<String>,
    /// Output map path
    pub map: Option<String>,
    /// Maximum sheet width in pixels
    pub max_width: u32,
    /// Maximum sheet height in pixels
    pub max_height: u32,
    /// Padding between images in pixels
    pub padding: u32,
    /// Force power-of-two sheet dimensions
    pub pow2: bool,
    /// Force a square sheet
    pub square: bool,
    /// Output RGB instead of RGBA (opaque sheet)
    pub opaque: bool,
    /// Keep decoded pixel formats instead of converting to RGBA8
    pub keep_format: bool,
    /// PNG compression configuration (optional)
    pub compress: Option<CompressConfig>,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            version: 1,
            input: Vec::new(),
            input_list: None,
            image: None,
            map: None,
            max_width: DEFAULT_MAX_WIDTH,
            max_height: DEFAULT_MAX_HEIGHT,
            padding: DEFAULT_PADDING,
            pow2: false,
            square: false,
            opaque: false,
            keep_format: false,
            compress: None,
        }
    }
}
