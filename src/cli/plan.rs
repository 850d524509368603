//! Plan command handler
//!
//! Runs the full extraction → geocoding pipeline over trip notes.

use crate::cli::{build_extractor, build_geocoder, emit, positive_km, read_notes};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter};
use crate::trip::pipeline::{plan_trip, GeocodeOptions};
use clap::Args;

/// Plan command arguments
#[derive(Args)]
pub struct PlanArgs {
    /// Notes file ("-" or omitted for stdin)
    pub file: Option<String>,

    /// Notes given inline
    #[arg(long, short = 't', conflicts_with = "file")]
    pub text: Option<String>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// Drop places farther than this from the destination (km)
    #[arg(long)]
    pub max_distance: Option<f64>,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

/// Run the plan command
pub async fn run(args: PlanArgs, config: Config) -> Result<()> {
    if args.list_formats {
        list_formats();
        return Ok(());
    }

    let format = args.format.unwrap_or(config.output.format.clone());
    let formatter = get_formatter(&format)
        .ok_or_else(|| Error::Config(format!("Unknown format: {}", format)))?;

    let mut options = GeocodeOptions::from_config(&config.geocoding);
    if let Some(km) = positive_km(args.max_distance)? {
        options = options.with_max_distance(km);
    }

    let notes = read_notes(args.file.as_deref(), args.text)?;
    let extractor = build_extractor(&config)?;
    let geocoder = build_geocoder(&config)?;

    let plan = plan_trip(&extractor, &geocoder, &notes, options).await?;

    if format != "text" {
        if let Some(summary) = plan.unresolved_summary() {
            eprintln!("{}", summary);
        }
    }

    let output = formatter.format(&plan)?;
    emit(&output, args.output.as_deref())
}

/// Print available output formats
fn list_formats() {
    println!("Available output formats:");
    for format in available_formats() {
        println!("  {:6} - {}", format.name, format.description);
    }
}
