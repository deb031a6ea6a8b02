use crate::models::LatLng;
use crate::processors::{ColorToken, PopupContent};
use serde::Serialize;

/// Geographic bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    pub fn from_point(point: LatLng) -> Self {
        Self {
            south: point.lat,
            west: point.lng,
            north: point.lat,
            east: point.lng,
        }
    }

    /// Smallest box containing every point, `None` for no points
    pub fn from_points(points: impl IntoIterator<Item = LatLng>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = Self::from_point(iter.next()?);
        Some(iter.fold(first, |bounds, point| bounds.extend(point)))
    }

    pub fn extend(self, point: LatLng) -> Self {
        Self {
            south: self.south.min(point.lat),
            west: self.west.min(point.lng),
            north: self.north.max(point.lat),
            east: self.east.max(point.lng),
        }
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south + self.north) / 2.0,
            (self.west + self.east) / 2.0,
        )
    }
}

/// A placed map marker. `record_index` points into the active file's records
/// and is what a selection resolves to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub position: LatLng,
    pub color: ColorToken,
    pub label: Option<String>,
    pub popup: PopupContent,
    pub record_index: usize,
}

/// The map collaborator. The marker renderer is its only writer.
pub trait MapSurface {
    /// Drop every marker, whether attached directly or through the cluster layer
    fn clear_markers(&mut self);

    /// Attach either the cluster layer or plain markers to the map
    fn set_clustering(&mut self, enabled: bool);

    fn add_marker(&mut self, marker: Marker);

    fn fit_bounds(&mut self, bounds: Bounds);
}

/// In-memory map state, exported by the HTML and GeoJSON writers
#[derive(Debug, Clone, Default, Serialize)]
pub struct MarkerLayer {
    direct: Vec<Marker>,
    clustered: Vec<Marker>,
    clustering: bool,
    viewport: Option<Bounds>,
    redraws: usize,
}

impl MarkerLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Markers currently on the map, whichever layer holds them
    pub fn markers(&self) -> &[Marker] {
        if self.clustering {
            &self.clustered
        } else {
            &self.direct
        }
    }

    pub fn marker_count(&self) -> usize {
        self.direct.len() + self.clustered.len()
    }

    pub fn is_clustering(&self) -> bool {
        self.clustering
    }

    pub fn viewport(&self) -> Option<Bounds> {
        self.viewport
    }

    /// Number of full clear-and-rebuild passes seen so far
    pub fn redraws(&self) -> usize {
        self.redraws
    }
}

impl MapSurface for MarkerLayer {
    fn clear_markers(&mut self) {
        self.direct.clear();
        self.clustered.clear();
        self.redraws += 1;
    }

    fn set_clustering(&mut self, enabled: bool) {
        self.clustering = enabled;
    }

    fn add_marker(&mut self, marker: Marker) {
        if self.clustering {
            self.clustered.push(marker);
        } else {
            self.direct.push(marker);
        }
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        self.viewport = Some(bounds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_from_points() {
        let bounds = Bounds::from_points([
            LatLng::new(10.0, 20.0),
            LatLng::new(-5.0, 40.0),
            LatLng::new(30.0, -10.0),
        ])
        .unwrap();

        assert_eq!(bounds.south, -5.0);
        assert_eq!(bounds.north, 30.0);
        assert_eq!(bounds.west, -10.0);
        assert_eq!(bounds.east, 40.0);
        assert_eq!(bounds.center(), LatLng::new(12.5, 15.0));
    }

    #[test]
    fn test_no_points_no_bounds() {
        assert!(Bounds::from_points(Vec::new()).is_none());
    }
}
