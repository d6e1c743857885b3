mod descriptor;
mod discover;
mod loader;
mod name;

pub use descriptor::ImageDescriptor;
pub use discover::{collect_image_paths, is_supported_image};
pub use loader::{LoadOptions, load_descriptors};
pub use name::{check_name_collisions, packed_name};
