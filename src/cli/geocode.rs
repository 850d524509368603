//! Geocode command handler
//!
//! Resolves one query with the configured backend.

use crate::cli::build_geocoder;
use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::geo::{search_query, Geocoder};
use clap::Args;

/// Geocode command arguments
#[derive(Args)]
pub struct GeocodeArgs {
    /// Place to look up
    pub query: String,

    /// Qualify the query with a destination ("Tokyo, Japan")
    #[arg(long, short = 'd')]
    pub destination: Option<String>,

    /// Prefer results near LAT,LNG
    #[arg(long, allow_hyphen_values = true)]
    pub near: Option<String>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Run the geocode command
pub async fn run(args: GeocodeArgs, config: Config) -> Result<()> {
    let bias = match &args.near {
        Some(near) => {
            let coords: Coordinates = near.parse().map_err(Error::InvalidCoordinates)?;
            coords.validate()?;
            Some(coords)
        }
        None => None,
    };

    let geocoder = build_geocoder(&config)?;
    let query = search_query(&args.query, args.destination.as_deref());

    let hit = geocoder.resolve(&query, bias).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&hit)?);
    } else {
        println!("{}", hit.address);
        println!("{:.6}, {:.6}", hit.coords.lat, hit.coords.lng);
    }
    Ok(())
}
