pub mod geojson_writer;
pub mod html_writer;

pub use geojson_writer::GeoJsonWriter;
pub use html_writer::{popup_html, HtmlWriter, PageContext};
