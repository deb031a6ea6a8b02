use crate::cli::args::{Cli, Commands, OutputFormat};
use crate::error::{Result, ViewerError};
use crate::models::{DisplayOptionsPatch, FilterCriteria, Language};
use crate::processors::field_resolver::resolve;
use crate::processors::LoadReporter;
use crate::readers::RecordLoader;
use crate::session::{LoadOutcome, Session};
use crate::settings::ViewerSettings;
use crate::utils::filename::generate_default_map_filename;
use crate::utils::progress::ProgressReporter;
use crate::utils::translations::{tr, MessageKey};
use crate::writers::{GeoJsonWriter, HtmlWriter, PageContext};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info, warn, Level};

/// Install the tracing subscriber; logs go to stderr or the given file
pub fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let builder = tracing_subscriber::fmt().with_max_level(level).with_target(false);

    let installed = match log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    // Only fails when a global subscriber is already in place
    if let Err(e) = installed {
        debug!("Keeping the existing tracing subscriber: {}", e);
    }

    Ok(())
}

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    let settings = ViewerSettings::load(cli.config.as_deref())?;
    let quiet = cli.quiet;

    match cli.command {
        Commands::Render {
            inputs,
            output_file,
            format,
            active,
            search,
            min_age,
            max_age,
            label_field,
            cluster,
            lang,
            theme,
            page_size,
        } => {
            let mut session = Session::new()
                .with_options(settings.display_options())
                .with_calculator(settings.age_calculator())
                .with_renderer(crate::render::MarkerRenderer::with_color_mapper(
                    settings.color_mapper(),
                ));

            let mut patch = DisplayOptionsPatch::default().label_field(label_field);
            if let Some(cluster) = cluster {
                patch = patch.clustering(cluster);
            }
            if let Some(lang) = lang {
                patch = patch.language(lang);
            }
            if let Some(theme) = theme {
                patch = patch.theme(theme);
            }
            session.set_display_options(patch);

            let language = session.options().language;
            for input in &inputs {
                load_into_session(&mut session, input, language, quiet).await?;
            }

            if session.active_file().is_none() {
                return Err(ViewerError::NoActiveFile);
            }

            if let Some(index) = active {
                if index >= session.files().len() {
                    return Err(ViewerError::InvalidOption(format!(
                        "--active {} is out of range ({} files loaded)",
                        index,
                        session.files().len()
                    )));
                }
                session.switch_file(index);
            }

            let range = session
                .active_file()
                .map(|entry| entry.age_range)
                .ok_or(ViewerError::NoActiveFile)?;
            let defaults = session.criteria().clone();
            let criteria = FilterCriteria::new(
                search,
                min_age.unwrap_or(defaults.min_age),
                max_age.unwrap_or(defaults.max_age),
            );
            let matched = session.set_filter_criteria(criteria)?;

            println!("{}:", tr(language, MessageKey::LoadedFiles));
            for summary in session.file_summaries() {
                println!("{}", summary.line(tr(language, MessageKey::Records)));
            }
            let rendered = session.last_render();
            println!(
                "{} {} matched, {} markers placed, {} without coordinates",
                matched,
                tr(language, MessageKey::Records),
                rendered.placed,
                rendered.unmappable
            );
            if matched == 0 {
                println!("{}", tr(language, MessageKey::NoMarkers));
            }

            let output_file: PathBuf = output_file
                .unwrap_or_else(|| generate_default_map_filename(format.extension()));

            match format {
                OutputFormat::Html => {
                    let legend = settings.color_mapper().legend(range);
                    let files = session.file_summaries();
                    let context = PageContext {
                        options: session.options(),
                        files: &files,
                        criteria: Some(session.criteria()),
                        age_range: Some(range),
                        legend: &legend,
                        filtered_count: matched,
                    };
                    HtmlWriter::new()
                        .with_tile_url(settings.tile_url.clone())
                        .with_page_size(page_size.unwrap_or(settings.page_size))
                        .write(session.map(), &context, &output_file)?;
                }
                OutputFormat::Geojson => {
                    GeoJsonWriter::new().write(session.map(), session.options(), &output_file)?;
                }
            }

            println!("Map written to {}", output_file.display());
        }

        Commands::Info { input, sample } => {
            let progress =
                ProgressReporter::for_file(&input, tr(settings.language, MessageKey::Loading), quiet);
            let parsed = RecordLoader::load_async(input.clone()).await?;
            progress.finish_with_message(&format!("Read {} records", parsed.records.len()));

            let reporter = LoadReporter::with_calculator(settings.age_calculator());
            let report = reporter.inspect(&parsed.name, &parsed.records);
            println!("\n{}", reporter.generate_summary(&report));

            if sample > 0 {
                println!("Sample Records (showing up to {}):", sample);
                for (i, record) in parsed.records.iter().take(sample).enumerate() {
                    let fields = resolve(record);
                    let position = fields
                        .position
                        .map(|p| format!("{:.4}, {:.4}", p.lat, p.lng))
                        .unwrap_or_else(|| "unmappable".to_string());
                    println!(
                        "{}. {} | {} | {} | {} BP | {}",
                        i + 1,
                        fields.genetic_id,
                        fields.group_id,
                        fields.locality,
                        fields.age,
                        position
                    );
                }
            }
        }

        Commands::Validate { input } => {
            let mut session = Session::new().with_calculator(settings.age_calculator());
            let language = settings.language;
            load_into_session(&mut session, &input, language, quiet).await?;

            let reporter = LoadReporter::new();
            let report = match session.active_file() {
                Some(entry) => reporter.inspect(&entry.name, &entry.records),
                None => return Err(ViewerError::NoActiveFile),
            };

            println!(
                "✅ {} passed validation: {} {}, {} {}",
                report.file_name,
                report.total_records,
                tr(language, MessageKey::Records),
                report.mappable_records,
                tr(language, MessageKey::Mappable)
            );
            if report.mappable_records < report.total_records {
                println!(
                    "⚠️  {} records have no usable coordinates",
                    report.unmappable_records()
                );
            }
        }

        Commands::Inspect { input, id, lang } => {
            let language = lang.unwrap_or(settings.language);
            let options = DisplayOptionsPatch::default().language(language);

            let mut session = Session::new().with_calculator(settings.age_calculator());
            session.set_display_options(options);
            load_into_session(&mut session, &input, language, quiet).await?;

            let index = session
                .find_by_genetic_id(&id)
                .ok_or_else(|| ViewerError::RecordNotFound(id.clone()))?;
            let info = session.select(index)?;

            println!("{}", info.to_text());
        }
    }

    Ok(())
}

/// Parse a file off the async thread and commit it to the session
async fn load_into_session(
    session: &mut Session,
    path: &Path,
    language: Language,
    quiet: bool,
) -> Result<()> {
    let progress = ProgressReporter::for_file(path, tr(language, MessageKey::Loading), quiet);
    let ticket = session.begin_load();

    let parsed = match RecordLoader::load_async(path.to_path_buf()).await {
        Ok(parsed) => parsed,
        Err(e) => {
            progress.abandon();
            return Err(e);
        }
    };

    match session.finish_load(ticket, parsed.name, parsed.records) {
        Ok(LoadOutcome::Loaded { index, rendered }) => {
            progress.finish_with_message(&format!(
                "Loaded {} ({} markers)",
                path.display(),
                rendered.placed
            ));
            info!("File {} is now active", index);
            Ok(())
        }
        Ok(LoadOutcome::Discarded { generation }) => {
            progress.abandon();
            warn!("Load generation {} was superseded", generation);
            Ok(())
        }
        Err(e) => {
            progress.abandon();
            let message = match &e {
                ViewerError::EmptyFile { .. } => tr(language, MessageKey::EmptyFile),
                ViewerError::MissingCoordinateColumns { .. } => {
                    tr(language, MessageKey::MissingCoordinates)
                }
                _ => "",
            };
            if !message.is_empty() {
                eprintln!("{}: {}", path.display(), message);
            }
            Err(e)
        }
    }
}
