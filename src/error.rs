use std::path::PathBuf;

use image::ColorType;
use thiserror::Error;

/// Broad category of a failure, used for exit codes and user-facing reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Input discovery problems (missing paths, no images, name collisions)
    Input,
    /// A source image could not be decoded
    Load,
    /// No arrangement satisfies the size constraints
    Pack,
    /// The sheet buffer could not be built
    Composite,
    /// The sheet image could not be persisted
    ImageExport,
    /// The placement map could not be persisted
    MapExport,
}

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Failed to load image '{path}': {source}")]
    ImageLoad {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to save image '{path}': {source}")]
    ImageSave {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("No images to pack")]
    NoImages,

    #[error("Two images have the same name '{name}': {first} = {second}")]
    NameCollision {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Sprite '{name}' has an empty dimension ({width}x{height})")]
    EmptySprite { name: String, width: u32, height: u32 },

    #[error(
        "Sprite '{name}' ({width}x{height}) exceeds maximum sheet size ({max_width}x{max_height})"
    )]
    SpriteTooLarge {
        name: String,
        width: u32,
        height: u32,
        max_width: u32,
        max_height: u32,
    },

    #[error(
        "Cannot place sprite '{name}': sheet would need {required_width}x{required_height}, \
         maximum is {max_width}x{max_height}"
    )]
    SheetOverflow {
        name: String,
        required_width: u32,
        required_height: u32,
        max_width: u32,
        max_height: u32,
    },

    #[error("Sprite '{name}' has pixel format {found:?}, sheet uses {expected:?}")]
    PixelFormatMismatch {
        name: String,
        expected: ColorType,
        found: ColorType,
    },

    #[error(
        "Sprite '{name}' is {found_width}x{found_height} but was placed as {width}x{height}"
    )]
    SizeMismatch {
        name: String,
        width: u32,
        height: u32,
        found_width: u32,
        found_height: u32,
    },

    #[error("No pixel data for placed sprite '{0}'")]
    MissingSprite(String),

    #[error("Sheet buffer of {width}x{height} cannot be allocated")]
    SheetTooLarge { width: u32, height: u32 },

    #[error("Failed to write output file '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write map file '{path}': {source}")]
    MapWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to compress PNG '{path}': {message}")]
    PngCompress { path: PathBuf, message: String },

    #[error("No image encoder for extension '{0}'")]
    UnknownImageFormat(String),

    #[error("No map writer for extension '{0}'")]
    UnknownMapFormat(String),

    #[error("Failed to read input list '{path}': {source}")]
    InputListRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Input path does not exist: {0}")]
    InputNotFound(PathBuf),
}

impl SheetError {
    pub fn kind(&self) -> FailureKind {
        match self {
            SheetError::ImageLoad { .. } => FailureKind::Load,
            SheetError::EmptySprite { .. }
            | SheetError::SpriteTooLarge { .. }
            | SheetError::SheetOverflow { .. } => FailureKind::Pack,
            SheetError::PixelFormatMismatch { .. }
            | SheetError::SizeMismatch { .. }
            | SheetError::MissingSprite(_)
            | SheetError::SheetTooLarge { .. } => FailureKind::Composite,
            SheetError::ImageSave { .. }
            | SheetError::OutputWrite { .. }
            | SheetError::PngCompress { .. } => FailureKind::ImageExport,
            SheetError::MapWrite { .. } => FailureKind::MapExport,
            SheetError::NoImages
            | SheetError::NameCollision { .. }
            | SheetError::UnknownImageFormat(_)
            | SheetError::UnknownMapFormat(_)
            | SheetError::InputListRead { .. }
            | SheetError::InputNotFound(_) => FailureKind::Input,
        }
    }

    /// Process exit code reported by the command-line tool
    pub fn exit_code(&self) -> i32 {
        match self {
            SheetError::UnknownImageFormat(_) => 2,
            SheetError::UnknownMapFormat(_) => 3,
            SheetError::NoImages => 4,
            SheetError::NameCollision { .. } => 5,
            SheetError::InputNotFound(_) | SheetError::InputListRead { .. } => 1,
            other => other.kind().exit_code(),
        }
    }
}

impl FailureKind {
    pub fn exit_code(self) -> i32 {
        match self {
            FailureKind::Input => 1,
            FailureKind::Load => 6,
            FailureKind::Pack => 7,
            FailureKind::Composite => 8,
            FailureKind::ImageExport => 9,
            FailureKind::MapExport => 10,
        }
    }
}
