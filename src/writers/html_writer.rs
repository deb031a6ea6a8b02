use crate::error::Result;
use crate::models::{AgeRange, DisplayOptions, FileSummary, FilterCriteria, PageSize, Theme};
use crate::processors::{ColorToken, InfoRow, LegendEntry};
use crate::render::MarkerLayer;
use crate::utils::constants::{DEFAULT_MAP_CENTER, DEFAULT_MAP_ZOOM, DEFAULT_TILE_URL, TILE_ATTRIBUTION};
use crate::utils::translations::{tr, MessageKey};
use askama::Template;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const CLUSTER_CSS: &str = "https://unpkg.com/leaflet.markercluster@1.5.3/dist/MarkerCluster.Default.css";
const CLUSTER_BASE_CSS: &str = "https://unpkg.com/leaflet.markercluster@1.5.3/dist/MarkerCluster.css";
const CLUSTER_JS: &str = "https://unpkg.com/leaflet.markercluster@1.5.3/dist/leaflet.markercluster.js";

/// Everything besides the markers that the page shows
pub struct PageContext<'a> {
    pub options: &'a DisplayOptions,
    pub files: &'a [FileSummary],
    pub criteria: Option<&'a FilterCriteria>,
    pub age_range: Option<AgeRange>,
    pub legend: &'a [LegendEntry],
    pub filtered_count: usize,
}

#[derive(Template)]
#[template(path = "popup.html")]
struct PopupTemplate<'a> {
    title: &'a str,
    rows: &'a [InfoRow],
}

struct FileView<'a> {
    name: &'a str,
    active: bool,
    details: String,
}

struct FilterView<'a> {
    title: &'a str,
    search_term: &'a str,
    bounds: String,
    counts: String,
    empty_message: Option<&'a str>,
}

struct LegendView {
    color: ColorToken,
    range: String,
}

#[derive(Template)]
#[template(path = "map.html")]
struct MapPageTemplate<'a> {
    lang: &'a str,
    title: &'a str,
    clustering: bool,
    dark: bool,
    page_size: &'a str,
    leaflet_css: &'a str,
    leaflet_js: &'a str,
    cluster_css: &'a str,
    cluster_base_css: &'a str,
    cluster_js: &'a str,
    loaded_files_title: &'a str,
    files: Vec<FileView<'a>>,
    filter: Option<&'a FilterView<'a>>,
    welcome_title: &'a str,
    welcome_text: &'a str,
    legend: Vec<LegendView>,
    unknown_color: ColorToken,
    unknown_label: &'a str,
    age_domain: Option<&'a str>,
    markers_json: String,
    bounds_json: String,
    center_lat: f64,
    center_lng: f64,
    zoom: u8,
    tile_url_json: String,
    attribution_json: String,
}

#[derive(Serialize)]
struct MarkerJs<'a> {
    lat: f64,
    lng: f64,
    color: &'a str,
    label: Option<&'a str>,
    popup: String,
}

/// Renders a self-contained Leaflet page for the current marker layer
pub struct HtmlWriter {
    tile_url: String,
    page_size: PageSize,
}

impl HtmlWriter {
    pub fn new() -> Self {
        Self {
            tile_url: DEFAULT_TILE_URL.to_string(),
            page_size: PageSize::default(),
        }
    }

    pub fn with_tile_url(mut self, tile_url: impl Into<String>) -> Self {
        self.tile_url = tile_url.into();
        self
    }

    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Build the complete HTML document
    pub fn render_page(&self, layer: &MarkerLayer, context: &PageContext<'_>) -> Result<String> {
        let language = context.options.language;
        let records_label = tr(language, MessageKey::Records);

        let markers = layer
            .markers()
            .iter()
            .map(|m| {
                Ok(MarkerJs {
                    lat: m.position.lat,
                    lng: m.position.lng,
                    color: m.color.as_str(),
                    label: m.label.as_deref(),
                    popup: popup_html(&m.popup.title, &m.popup.rows)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let bounds_json = match layer.viewport() {
            Some(b) => format!("[[{}, {}], [{}, {}]]", b.south, b.west, b.north, b.east),
            None => "null".to_string(),
        };

        let files = context
            .files
            .iter()
            .map(|file| FileView {
                name: &file.name,
                active: file.active,
                details: format!(
                    "{} {} | {}-{} BP",
                    file.record_count, records_label, file.min_age, file.max_age
                ),
            })
            .collect();

        let filter = context.criteria.map(|criteria| FilterView {
            title: tr(language, MessageKey::SearchTitle),
            search_term: &criteria.search_term,
            bounds: format!(
                "{}: {}-{}",
                tr(language, MessageKey::AgeFilterTitle),
                criteria.min_age.round() as i64,
                criteria.max_age.round() as i64
            ),
            counts: format!(
                "{} {} / {} {}",
                context.filtered_count,
                records_label,
                layer.markers().len(),
                tr(language, MessageKey::Mappable)
            ),
            empty_message: (context.filtered_count == 0).then(|| tr(language, MessageKey::NoMarkers)),
        });

        let legend = context
            .legend
            .iter()
            .map(|entry| LegendView {
                color: entry.color,
                range: format!(
                    "{}-{} BP",
                    entry.from_age.round() as i64,
                    entry.to_age.round() as i64
                ),
            })
            .collect();

        let age_domain = context
            .age_range
            .map(|range| format!("{}-{} BP", range.min.round() as i64, range.max.round() as i64));

        let page = MapPageTemplate {
            lang: language.code(),
            title: tr(language, MessageKey::Title),
            clustering: layer.is_clustering(),
            dark: context.options.theme == Theme::Dark,
            page_size: self.page_size.css(),
            leaflet_css: LEAFLET_CSS,
            leaflet_js: LEAFLET_JS,
            cluster_css: CLUSTER_CSS,
            cluster_base_css: CLUSTER_BASE_CSS,
            cluster_js: CLUSTER_JS,
            loaded_files_title: tr(language, MessageKey::LoadedFiles),
            files,
            filter: filter.as_ref(),
            welcome_title: tr(language, MessageKey::WelcomeTitle),
            welcome_text: tr(language, MessageKey::WelcomeText),
            legend,
            unknown_color: ColorToken::UNKNOWN,
            unknown_label: tr(language, MessageKey::UnknownAge),
            age_domain: age_domain.as_deref(),
            markers_json: script_safe(&serde_json::to_string(&markers)?),
            bounds_json,
            center_lat: DEFAULT_MAP_CENTER.0,
            center_lng: DEFAULT_MAP_CENTER.1,
            zoom: DEFAULT_MAP_ZOOM,
            tile_url_json: script_safe(&serde_json::to_string(&self.tile_url)?),
            attribution_json: script_safe(&serde_json::to_string(TILE_ATTRIBUTION)?),
        };

        Ok(page.render()?)
    }

    pub fn write(&self, layer: &MarkerLayer, context: &PageContext<'_>, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.render_page(layer, context)?)?;
        info!(
            "Wrote map page with {} markers to {}",
            layer.markers().len(),
            path.display()
        );
        Ok(())
    }
}

impl Default for HtmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Popup markup: title heading plus one labelled paragraph per row
pub fn popup_html(title: &str, rows: &[InfoRow]) -> Result<String> {
    Ok(PopupTemplate { title, rows }.render()?)
}

/// Keep embedded JSON from closing the surrounding script element
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}
