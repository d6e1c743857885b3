mod constraints;
mod engine;
mod layout;
mod rect;
mod tree;

pub use constraints::{
    DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH, DEFAULT_PADDING, PackingConstraints, next_power_of_two,
};
pub use engine::{Packable, pack, packing_order};
pub use layout::{Layout, PlacementEntry};
pub use rect::Rect;
pub use tree::{GrowDirection, NodeId, PlacementTree};
