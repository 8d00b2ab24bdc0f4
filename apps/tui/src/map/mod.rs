pub mod geometry;
pub mod overlay;

pub use geometry::{fit_bounds, sky_path_midpoint, Bounds, LatLon};
pub use overlay::{MapOverlay, Marker, PathKind, PathLine};
