use adna_viewer::error::{Result, ViewerError};
use adna_viewer::models::{DisplayOptionsPatch, LabelField, Language};
use adna_viewer::processors::{ColorMapper, LoadReporter};
use adna_viewer::readers::RecordLoader;
use adna_viewer::session::{LoadOutcome, Session};
use adna_viewer::writers::{GeoJsonWriter, HtmlWriter, PageContext};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const SAMPLES_CSV: &str = "\
Genetic ID,Master ID,Group ID,Locality,Lat.,Long.,Date mean in BP in years before 1950 CE
I0001,M1,England_Neolithic,Stonehenge,51.17,-1.82,4500
I0002,M2,Germany_BA,Leipzig,51.34,12.37,3500
I0003,M3,Spain_Mesolithic,La Brana,42.9,-5.7,7800
I0004,M4,England_IA,Danebury,..,..,2300
I0005,M5,Italy_Imperial,Rome,41.9,12.5,..
";

fn write_samples(dir: &TempDir, name: &str, content: &str) -> Result<PathBuf> {
    let path = dir.path().join(name);
    fs::write(&path, content)?;
    Ok(path)
}

async fn loaded_session(dir: &TempDir) -> Result<Session> {
    let path = write_samples(dir, "samples.csv", SAMPLES_CSV)?;
    let parsed = RecordLoader::load_async(path).await?;

    let mut session = Session::new();
    let outcome = session.load_file(parsed.name, parsed.records)?;
    assert!(matches!(outcome, LoadOutcome::Loaded { index: 0, .. }));

    Ok(session)
}

#[tokio::test]
async fn test_load_filters_and_renders_active_file() -> Result<()> {
    let dir = TempDir::new()?;
    let session = loaded_session(&dir).await?;

    let entry = session.active_file().unwrap();
    assert_eq!(entry.name, "samples.csv");
    assert_eq!(entry.age_range.min, 2300.0);
    assert_eq!(entry.age_range.max, 7800.0);

    // Every row is kept after a load, including the unknown age of I0005
    assert_eq!(session.filtered_indices(), &[0, 1, 2, 3, 4]);
    assert_eq!(session.criteria().min_age, 0.0);
    assert_eq!(session.criteria().max_age, 7800.0);

    let rendered = session.last_render();
    assert_eq!(rendered.placed, 4);
    assert_eq!(rendered.unmappable, 1);

    let colors: Vec<&str> = session
        .map()
        .markers()
        .iter()
        .map(|m| m.color.as_str())
        .collect();
    assert_eq!(colors, ["#d9ef8b", "#91cf60", "#fc8d59", "#808080"]);

    Ok(())
}

#[tokio::test]
async fn test_search_and_age_bounds() -> Result<()> {
    let dir = TempDir::new()?;
    let mut session = loaded_session(&dir).await?;

    assert_eq!(session.set_age_bounds(2300.0, 7800.0)?, 4);
    assert_eq!(session.set_search_term("england")?, 2);
    assert_eq!(session.last_render().placed, 1);

    assert_eq!(session.set_age_bounds(0.0, 4000.0)?, 1);
    let ids: Vec<String> = session
        .filtered_records()
        .iter()
        .map(|r| r.text("Genetic ID").map(|t| t.into_owned()).unwrap_or_default())
        .collect();
    assert_eq!(ids, ["I0004"]);

    // A lower bound of zero lets the unknown-age sample back in
    session.set_search_term("")?;
    assert_eq!(session.set_age_bounds(0.0, 100_000.0)?, 5);

    Ok(())
}

#[tokio::test]
async fn test_rejected_file_keeps_previous_state() -> Result<()> {
    let dir = TempDir::new()?;
    let mut session = loaded_session(&dir).await?;
    session.set_search_term("spain")?;

    let bad = write_samples(&dir, "no_coords.csv", "Genetic ID,Locality\nI9,Nowhere\n")?;
    let parsed = RecordLoader::load(&bad)?;
    let result = session.load_file(parsed.name, parsed.records);

    assert!(matches!(
        result,
        Err(ViewerError::MissingCoordinateColumns { .. })
    ));
    assert_eq!(session.files().len(), 1);
    assert_eq!(session.criteria().search_term, "spain");
    assert_eq!(session.filtered_indices(), &[2]);

    Ok(())
}

#[tokio::test]
async fn test_switching_files_resets_criteria() -> Result<()> {
    let dir = TempDir::new()?;
    let mut session = loaded_session(&dir).await?;

    let second = write_samples(
        &dir,
        "second.csv",
        "Genetic ID,Lat,Long,Date mean in BP in years before 1950 CE\nX1,10,20,100\nX2,11,21,900\n",
    )?;
    let parsed = RecordLoader::load(&second)?;
    session.load_file(parsed.name, parsed.records)?;
    assert_eq!(session.active_index(), Some(1));
    assert_eq!(session.criteria().max_age, 900.0);

    session.set_search_term("X2")?;
    assert!(session.switch_file(0));
    assert_eq!(session.criteria().search_term, "");
    assert_eq!(session.criteria().min_age, 0.0);
    assert_eq!(session.filtered_indices(), &[0, 1, 2, 3, 4]);

    let summaries = session.file_summaries();
    assert_eq!(summaries.len(), 2);
    assert!(summaries[0].active);
    assert!(!summaries[1].active);

    Ok(())
}

#[tokio::test]
async fn test_stale_load_is_discarded() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_samples(&dir, "samples.csv", SAMPLES_CSV)?;

    let mut session = Session::new();
    let first = session.begin_load();
    let second = session.begin_load();

    let late = RecordLoader::load_async(path.clone()).await?;
    let early = RecordLoader::load_async(path).await?;

    let outcome = session.finish_load(second, "second.csv", early.records)?;
    assert!(matches!(outcome, LoadOutcome::Loaded { .. }));

    let outcome = session.finish_load(first, "first.csv", late.records)?;
    assert_eq!(
        outcome,
        LoadOutcome::Discarded {
            generation: first.generation()
        }
    );
    assert_eq!(session.files().len(), 1);
    assert_eq!(session.active_file().unwrap().name, "second.csv");

    Ok(())
}

#[tokio::test]
async fn test_select_and_inspect_sample() -> Result<()> {
    let dir = TempDir::new()?;
    let mut session = loaded_session(&dir).await?;
    session.set_display_options(DisplayOptionsPatch::default().language(Language::Zh));

    let index = session.find_by_genetic_id("I0003").unwrap();
    assert_eq!(index, 2);

    let info = session.select(index)?;
    let text = info.to_text();
    assert!(text.contains("La Brana"));
    assert!(text.contains("7800"));

    assert!(matches!(
        session.select(99),
        Err(ViewerError::RecordNotFound(_))
    ));

    Ok(())
}

#[tokio::test]
async fn test_html_export() -> Result<()> {
    let dir = TempDir::new()?;
    let mut session = loaded_session(&dir).await?;
    session.set_display_options(
        DisplayOptionsPatch::default()
            .label_field(LabelField::LatLng)
            .clustering(false),
    );

    let range = session.active_file().unwrap().age_range;
    let legend = ColorMapper::new().legend(range);
    let files = session.file_summaries();
    let context = PageContext {
        options: session.options(),
        files: &files,
        criteria: Some(session.criteria()),
        age_range: Some(range),
        legend: &legend,
        filtered_count: session.filtered_indices().len(),
    };

    let output = dir.path().join("out").join("map.html");
    HtmlWriter::new().write(session.map(), &context, &output)?;

    let html = fs::read_to_string(&output)?;
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("samples.csv"));
    assert!(html.contains("51.1700, -1.8200"));
    assert!(html.contains("L.layerGroup()"));
    assert!(!html.contains("markercluster"));

    Ok(())
}

#[tokio::test]
async fn test_geojson_export() -> Result<()> {
    let dir = TempDir::new()?;
    let session = loaded_session(&dir).await?;

    let output = dir.path().join("map.geojson");
    GeoJsonWriter::new().write(session.map(), session.options(), &output)?;

    let parsed: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output)?)?;
    let features = parsed["features"].as_array().unwrap();
    assert_eq!(features.len(), 4);
    assert_eq!(features[2]["properties"]["title"], "I0003");
    assert_eq!(features[2]["geometry"]["coordinates"][0], -5.7);

    Ok(())
}

#[test]
fn test_load_report_counts() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_samples(&dir, "samples.csv", SAMPLES_CSV)?;
    let parsed = RecordLoader::load(&path)?;

    let reporter = LoadReporter::new();
    let report = reporter.inspect(&parsed.name, &parsed.records);

    assert_eq!(report.total_records, 5);
    assert_eq!(report.mappable_records, 4);
    assert_eq!(report.unknown_age_records, 1);
    assert!(report.has_coordinate_columns());
    assert!(reporter.generate_summary(&report).contains("samples.csv"));

    Ok(())
}

#[test]
fn test_unsupported_extension() {
    let result = RecordLoader::load(std::path::Path::new("samples.txt"));
    assert!(matches!(result, Err(ViewerError::UnsupportedFormat(_))));
}
