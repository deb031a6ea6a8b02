use crate::models::{LabelField, Language, PageSize, Theme};
use crate::error::ViewerError;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::str::FromStr;

/// clap value parser for the option enums shared with the settings file
fn parse_option<T: FromStr<Err = ViewerError>>(value: &str) -> Result<T, String> {
    value.parse().map_err(|e: ViewerError| e.to_string())
}

#[derive(Parser)]
#[command(name = "adna-viewer")]
#[command(about = "Ancient DNA sample viewer: filter spreadsheet records and map them by age")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Hide progress spinners")]
    pub quiet: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true, help = "Settings file (TOML, JSON or YAML)")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Html,
    Geojson,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Geojson => "geojson",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load data files, filter them and render the active one as a map
    Render {
        #[arg(short, long = "input", required = true, num_args = 1.., help = "CSV or Excel files, loaded in order")]
        inputs: Vec<PathBuf>,

        #[arg(
            short,
            long,
            help = "Output file path [default: output/adna-map-{YYMMDD}.{html|geojson}]"
        )]
        output_file: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "html")]
        format: OutputFormat,

        #[arg(long, help = "Index of the file to show [default: last loaded]")]
        active: Option<usize>,

        #[arg(short, long, default_value = "", help = "Case-insensitive search text")]
        search: String,

        #[arg(long, help = "Lower age bound in years BP [default: 0, so unknown ages are shown]")]
        min_age: Option<f64>,

        #[arg(long, help = "Upper age bound in years BP [default: file maximum]")]
        max_age: Option<f64>,

        #[arg(long, default_value = "none", value_parser = parse_option::<LabelField>, help = "Marker label: none, latlng or a column name")]
        label_field: LabelField,

        #[arg(long, help = "Group nearby markers [default: from settings]")]
        cluster: Option<bool>,

        #[arg(long, value_parser = parse_option::<Language>, help = "Label language: en or zh")]
        lang: Option<Language>,

        #[arg(long, value_parser = parse_option::<Theme>, help = "Page theme: light or dark")]
        theme: Option<Theme>,

        #[arg(long, value_parser = parse_option::<PageSize>, help = "Print page size: a4, a3, letter or legal")]
        page_size: Option<PageSize>,
    },

    /// Show a load report for a data file
    Info {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long, default_value = "5")]
        sample: usize,
    },

    /// Check that a data file can be loaded
    Validate {
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Print every field of one sample
    Inspect {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(long, help = "Genetic ID of the sample")]
        id: String,

        #[arg(long, value_parser = parse_option::<Language>, help = "Label language: en or zh")]
        lang: Option<Language>,
    },
}

impl Commands {
    /// Subcommand name as typed on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Render { .. } => "render",
            Commands::Info { .. } => "info",
            Commands::Validate { .. } => "validate",
            Commands::Inspect { .. } => "inspect",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_name_after_global_flags() {
        let cli = Cli::try_parse_from(["adna-viewer", "-v", "--quiet", "render", "-i", "a.csv"])
            .unwrap();

        assert!(cli.verbose);
        assert!(cli.quiet);
        assert_eq!(cli.command.name(), "render");
    }

    #[test]
    fn test_render_option_values() {
        let cli = Cli::try_parse_from([
            "adna-viewer",
            "render",
            "-i",
            "a.csv",
            "-i",
            "b.xlsx",
            "--label-field",
            "latlng",
            "--lang",
            "zh",
            "--cluster",
            "false",
        ])
        .unwrap();

        match cli.command {
            Commands::Render {
                inputs,
                label_field,
                lang,
                cluster,
                ..
            } => {
                assert_eq!(inputs.len(), 2);
                assert_eq!(label_field, LabelField::LatLng);
                assert_eq!(lang, Some(Language::Zh));
                assert_eq!(cluster, Some(false));
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn test_bad_language_is_rejected() {
        let result = Cli::try_parse_from(["adna-viewer", "inspect", "-i", "a.csv", "--id", "I1", "--lang", "fr"]);
        assert!(result.is_err());
    }
}
