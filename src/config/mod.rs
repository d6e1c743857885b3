mod load;
mod types;

pub use load::{CONFIG_VERSION, LoadedConfig};
pub use types::{CompressConfig, SheetConfig};
