//! Status command handler
//!
//! Shows the configured backends, whether their keys are set, and
//! optionally whether the server is reachable.

use crate::config::Config;
use crate::error::Result;
use crate::geo::available_backends;
use clap::Args;

/// Status command arguments
#[derive(Args)]
pub struct StatusArgs {
    /// Check if server is running (tries to connect)
    #[arg(long)]
    pub server: bool,
}

fn configured(key: &str) -> &'static str {
    if key.is_empty() {
        "missing"
    } else {
        "configured"
    }
}

/// Run the status command
pub async fn run(args: StatusArgs, config: Config) -> Result<()> {
    // Check server status if requested
    if args.server {
        check_server_status(&config).await;
    }

    println!("trip-atlas v{}", env!("CARGO_PKG_VERSION"));
    println!();

    println!(
        "Extraction: {} via {}",
        config.extraction.model, config.extraction.base_url
    );
    println!("  API key: {}", configured(&config.api_keys.openai_key()));
    println!();

    println!("Geocoding: {}", config.geocoding.backend);
    for backend in available_backends() {
        let marker = if backend.name == config.geocoding.backend.to_lowercase() {
            "*"
        } else {
            " "
        };
        let key = if backend.requires_key {
            format!(" (key {})", configured(&config.api_keys.google_maps_key()))
        } else {
            String::new()
        };
        println!(
            "  {} {:10} {}{}",
            marker, backend.name, backend.description, key
        );
    }
    println!(
        "  Max distance from destination: {} km",
        config.geocoding.max_distance_km
    );

    Ok(())
}

/// Check if the server is running
async fn check_server_status(config: &Config) {
    let url = format!("http://{}/api/status", config.server_addr());

    match reqwest::get(&url).await {
        Ok(response) => {
            if response.status().is_success() {
                println!("Server: RUNNING on {}", config.server_addr());
                if let Ok(body) = response.text().await {
                    if let Ok(status) = serde_json::from_str::<serde_json::Value>(&body) {
                        if let Some(version) = status.get("version").and_then(|v| v.as_str()) {
                            println!("  Version: {}", version);
                        }
                        if let Some(geocoder) = status.get("geocoder").and_then(|v| v.as_str()) {
                            println!("  Geocoder: {}", geocoder);
                        }
                    }
                }
            } else {
                println!("Server: ERROR (status {})", response.status());
            }
        }
        Err(_) => {
            println!("Server: NOT RUNNING on {}", config.server_addr());
        }
    }
    println!();
}
