mod compositor;
mod types;

pub use compositor::{build_sheet, compose};
pub use types::{PackedSheet, Sheet};
