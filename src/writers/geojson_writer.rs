use crate::error::Result;
use crate::models::DisplayOptions;
use crate::render::{Marker, MarkerLayer};
use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde_json::json;
use std::fs;
use std::path::Path;
use tracing::info;

/// Exports the rendered marker layer as a GeoJSON feature collection
pub struct GeoJsonWriter {
    pretty: bool,
}

impl GeoJsonWriter {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn with_pretty(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Build the feature collection; one point feature per marker
    pub fn to_collection(&self, layer: &MarkerLayer, options: &DisplayOptions) -> FeatureCollection {
        let features = layer.markers().iter().map(marker_feature).collect();

        let bbox = layer
            .viewport()
            .map(|b| vec![b.west, b.south, b.east, b.north]);

        let mut foreign_members = JsonObject::new();
        foreign_members.insert("clustering".to_string(), json!(layer.is_clustering()));
        foreign_members.insert("language".to_string(), json!(options.language.code()));

        FeatureCollection {
            bbox,
            features,
            foreign_members: Some(foreign_members),
        }
    }

    pub fn to_json(&self, layer: &MarkerLayer, options: &DisplayOptions) -> Result<String> {
        let collection = self.to_collection(layer, options);
        let text = if self.pretty {
            serde_json::to_string_pretty(&collection)?
        } else {
            serde_json::to_string(&collection)?
        };
        Ok(text)
    }

    pub fn write(&self, layer: &MarkerLayer, options: &DisplayOptions, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json(layer, options)?)?;
        info!(
            "Wrote {} features to {}",
            layer.markers().len(),
            path.display()
        );
        Ok(())
    }
}

impl Default for GeoJsonWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn marker_feature(marker: &Marker) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("title".to_string(), json!(marker.popup.title));
    properties.insert("color".to_string(), json!(marker.color.as_str()));
    if let Some(label) = &marker.label {
        properties.insert("label".to_string(), json!(label));
    }
    for row in &marker.popup.rows {
        properties.insert(row.label.clone(), json!(row.value));
    }

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![
            marker.position.lng,
            marker.position.lat,
        ]))),
        id: Some(Id::Number(marker.record_index.into())),
        properties: Some(properties),
        foreign_members: None,
    }
}
