pub mod assets;
pub mod map_view;
pub mod markers;

pub use map_view::{MapAction, MapView};
