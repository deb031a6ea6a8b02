use crate::models::{AgeRange, DisplayOptions, LabelField, LatLng, Record};
use crate::processors::field_resolver::resolve;
use crate::processors::{ColorMapper, PopupContent};
use crate::render::map_surface::{Bounds, MapSurface, Marker};
use crate::utils::coordinates::format_lat_lng;
use std::borrow::Cow;
use tracing::debug;

/// Outcome of one render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderSummary {
    pub placed: usize,
    pub unmappable: usize,
}

/// Rebuilds the marker set of a map from the filtered records
pub struct MarkerRenderer {
    color_mapper: ColorMapper,
}

impl MarkerRenderer {
    pub fn new() -> Self {
        Self {
            color_mapper: ColorMapper::new(),
        }
    }

    pub fn with_color_mapper(color_mapper: ColorMapper) -> Self {
        Self { color_mapper }
    }

    pub fn color_mapper(&self) -> &ColorMapper {
        &self.color_mapper
    }

    /// Clear the map and place one marker per mappable record.
    ///
    /// `indices` selects the filtered subset of `records`; colors are scaled
    /// over `age_range`. The viewport is fitted only when something was placed.
    pub fn render<M: MapSurface>(
        &self,
        map: &mut M,
        records: &[Record],
        indices: &[usize],
        age_range: AgeRange,
        options: &DisplayOptions,
    ) -> RenderSummary {
        map.clear_markers();
        map.set_clustering(options.clustering_enabled);

        let mut summary = RenderSummary::default();
        let mut bounds: Option<Bounds> = None;

        for &record_index in indices {
            let Some(record) = records.get(record_index) else {
                continue;
            };

            let fields = resolve(record);
            let Some(position) = fields.position else {
                summary.unmappable += 1;
                continue;
            };

            let marker = Marker {
                position,
                color: self.color_mapper.color_for(fields.age, age_range),
                label: marker_label(record, position, &options.label_field),
                popup: PopupContent::from_fields(&fields, options.language),
                record_index,
            };

            map.add_marker(marker);
            summary.placed += 1;
            bounds = Some(match bounds {
                Some(b) => b.extend(position),
                None => Bounds::from_point(position),
            });
        }

        if let Some(bounds) = bounds {
            map.fit_bounds(bounds);
        }

        debug!(
            "Rendered {} markers ({} unmappable, clustering={})",
            summary.placed, summary.unmappable, options.clustering_enabled
        );

        summary
    }
}

impl Default for MarkerRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Text drawn next to a marker for the chosen label field
pub fn marker_label(record: &Record, position: LatLng, label_field: &LabelField) -> Option<String> {
    match label_field {
        LabelField::None => None,
        LabelField::LatLng => Some(format_lat_lng(position.lat, position.lng)),
        LabelField::Column(column) => record.text(column).map(Cow::into_owned),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fields::AGE_COLUMNS;
    use crate::models::CellValue;
    use crate::processors::ColorToken;
    use crate::render::MarkerLayer;

    fn record(lat: &str, lng: &str, age: &str, group: &str) -> Record {
        Record::from_pairs([
            ("Lat.", CellValue::from_text(lat)),
            ("Long.", CellValue::from_text(lng)),
            (AGE_COLUMNS[0], CellValue::from_text(age)),
            ("Group ID", CellValue::from_text(group)),
        ])
    }

    fn scenario() -> Vec<Record> {
        vec![
            record("10", "20", "5000", "Russia_Samara"),
            record("11", "", "4000", "Russia_Yamnaya"),
            record("12", "22", "0", "England_BA"),
        ]
    }

    #[test]
    fn test_unmappable_records_are_skipped() {
        let records = scenario();
        let mut map = MarkerLayer::new();
        let summary = MarkerRenderer::new().render(
            &mut map,
            &records,
            &[0, 1, 2],
            AgeRange::new(4000.0, 5000.0),
            &DisplayOptions::default(),
        );

        assert_eq!(summary, RenderSummary { placed: 2, unmappable: 1 });
        assert_eq!(map.markers().len(), 2);
        assert_eq!(map.markers()[1].color, ColorToken::UNKNOWN);
        assert_eq!(map.markers()[1].record_index, 2);
    }

    #[test]
    fn test_rerender_replaces_markers() {
        let records = scenario();
        let renderer = MarkerRenderer::new();
        let range = AgeRange::new(4000.0, 5000.0);
        let mut map = MarkerLayer::new();

        renderer.render(&mut map, &records, &[0, 2], range, &DisplayOptions::default());
        let options = DisplayOptions {
            clustering_enabled: false,
            ..DisplayOptions::default()
        };
        renderer.render(&mut map, &records, &[0], range, &options);

        assert_eq!(map.marker_count(), 1);
        assert!(!map.is_clustering());
        assert_eq!(map.redraws(), 2);
    }

    #[test]
    fn test_empty_set_keeps_viewport() {
        let records = scenario();
        let renderer = MarkerRenderer::new();
        let range = AgeRange::new(4000.0, 5000.0);
        let mut map = MarkerLayer::new();

        renderer.render(&mut map, &records, &[0], range, &DisplayOptions::default());
        let before = map.viewport();
        let summary = renderer.render(&mut map, &records, &[], range, &DisplayOptions::default());

        assert_eq!(summary.placed, 0);
        assert_eq!(map.marker_count(), 0);
        assert_eq!(map.viewport(), before);
    }

    #[test]
    fn test_viewport_covers_markers() {
        let records = scenario();
        let mut map = MarkerLayer::new();
        MarkerRenderer::new().render(
            &mut map,
            &records,
            &[0, 1, 2],
            AgeRange::new(4000.0, 5000.0),
            &DisplayOptions::default(),
        );

        let viewport = map.viewport().unwrap();
        assert_eq!((viewport.south, viewport.north), (10.0, 12.0));
        assert_eq!((viewport.west, viewport.east), (20.0, 22.0));
    }

    #[test]
    fn test_labels() {
        let records = scenario();
        let position = LatLng::new(10.0, 20.0);

        assert_eq!(marker_label(&records[0], position, &LabelField::None), None);
        assert_eq!(
            marker_label(&records[0], position, &LabelField::LatLng).as_deref(),
            Some("10.0000, 20.0000")
        );
        assert_eq!(
            marker_label(&records[0], position, &LabelField::Column("Group ID".into())).as_deref(),
            Some("Russia_Samara")
        );
        assert_eq!(
            marker_label(&records[0], position, &LabelField::Column("Missing".into())),
            None
        );
    }
}
