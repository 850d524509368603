//! trip-atlas CLI entry point
//!
//! Travel notes place mapper - CLI + web app

use trip_atlas::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
