mod geometry;
mod projection;
mod renderer;
mod spatial;

pub use projection::{Viewport, MAX_ZOOM, MIN_ZOOM, TILE_SIZE};
pub use renderer::{marker_dots, DisplaySettings, LineString, Lod, MapLayers, MapRenderer};
pub use spatial::SpatialGrid;
