pub mod map_surface;
pub mod marker_renderer;

pub use map_surface::{Bounds, MapSurface, Marker, MarkerLayer};
pub use marker_renderer::{marker_label, MarkerRenderer, RenderSummary};
