pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod packing;
pub mod sheet;
pub mod sprite;

pub use error::{FailureKind, SheetError};
pub use packing::{Layout, PackingConstraints, PlacementEntry, Rect, pack};
pub use sheet::{PackedSheet, Sheet, build_sheet, compose};
pub use sprite::{ImageDescriptor, LoadOptions, load_descriptors};
