//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod distance;
pub mod extract;
pub mod geocode;
pub mod highlight;
pub mod plan;
pub mod serve;
pub mod status;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::extract::openai::OpenAiExtractor;
use crate::geo::{get_geocoder, GeocoderBackend};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Travel notes to places on a map
#[derive(Parser)]
#[command(name = "trip-atlas")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Debug logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract, geocode and format places from trip notes
    Plan(plan::PlanArgs),

    /// Extract places from notes without geocoding
    Extract(extract::ExtractArgs),

    /// Geocode a single query
    Geocode(geocode::GeocodeArgs),

    /// Link place names in notes (HTML output)
    Highlight(highlight::HighlightArgs),

    /// Great-circle distance between two points
    Distance(distance::DistanceArgs),

    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// Manage configuration
    Config(config::ConfigArgs),

    /// Show backend and server status
    Status(status::StatusArgs),
}

/// Run the CLI
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.command {
        Commands::Serve(_) => "info",
        _ => "warn",
    };
    init_logging(default_level, cli.verbose);

    let config_path = cli.config;
    match cli.command {
        Commands::Plan(args) => plan::run(args, load_config(config_path)?).await,
        Commands::Extract(args) => extract::run(args, load_config(config_path)?).await,
        Commands::Geocode(args) => geocode::run(args, load_config(config_path)?).await,
        Commands::Highlight(args) => highlight::run(args),
        Commands::Distance(args) => distance::run(args),
        Commands::Serve(args) => serve::run(args, load_config(config_path)?).await,
        Commands::Config(args) => config::run(args, config_path),
        Commands::Status(args) => status::run(args, load_config(config_path)?).await,
    }
}

/// Initialise tracing; `RUST_LOG` wins over the default level
pub fn init_logging(default_level: &str, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };

    // a second init (tests, embedding) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Explicit config file, else the default location
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(&path),
        None => Config::load(),
    }
}

/// Notes from `--text`, a file, or stdin (`-` or no file)
pub fn read_notes(file: Option<&str>, text: Option<String>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }

    match file {
        Some(path) if path != "-" => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

pub fn build_extractor(config: &Config) -> Result<OpenAiExtractor> {
    OpenAiExtractor::from_config(&config.extraction, &config.api_keys.openai_key())
}

pub fn build_geocoder(config: &Config) -> Result<GeocoderBackend> {
    get_geocoder(&config.geocoding, &config.api_keys.google_maps_key())
}

/// Write to `path` if given, else stdout
pub fn emit(output: &str, path: Option<&str>) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, output)?;
            eprintln!("Output written to {}", path);
        }
        None => println!("{}", output),
    }
    Ok(())
}

pub(crate) fn positive_km(value: Option<f64>) -> Result<Option<f64>> {
    match value {
        Some(km) if !km.is_finite() || km <= 0.0 => Err(Error::Config(format!(
            "Distance must be a positive number of kilometers: {}",
            km
        ))),
        other => Ok(other),
    }
}
