//! Config command handler
//!
//! View and modify configuration settings.

use crate::config::Config;
use crate::error::{Error, Result};
use clap::Args;
use std::path::PathBuf;

/// Config command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration key (e.g., "geocoding.backend")
    pub key: Option<String>,

    /// Value to set (if not provided, shows current value)
    pub value: Option<String>,

    /// Show config file path
    #[arg(long)]
    pub path: bool,

    /// Reset config to defaults
    #[arg(long)]
    pub reset: bool,
}

/// Run the config command against `file` (default location when None)
pub fn run(args: ConfigArgs, file: Option<PathBuf>) -> Result<()> {
    let path = match file {
        Some(path) => path,
        None => Config::config_path()?,
    };

    // Show path
    if args.path {
        println!("{}", path.display());
        return Ok(());
    }

    // Reset config
    if args.reset {
        Config::default().save_to(&path)?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut config = if path.exists() {
        Config::load_from(&path)?
    } else {
        Config::default()
    };

    match (&args.key, &args.value) {
        // No arguments: show all config
        (None, None) => {
            show_all_config(&config);
        }

        // Key only: show that value
        (Some(key), None) => {
            if let Some(value) = config.get(key) {
                println!("{}", value);
            } else {
                eprintln!("Unknown config key: {}", key);
                eprintln!("\nAvailable keys:");
                for k in Config::available_keys() {
                    eprintln!("  {}", k);
                }
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        // Key and value: set the value
        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save_to(&path)?;
            if key.starts_with("api_keys.") {
                println!("{} = \"***\"", key);
            } else {
                println!("{} = {}", key, value);
            }
        }

        // Value without key: not valid
        (None, Some(_)) => {
            return Err(Error::Config(
                "Must specify a key to set a value".to_string(),
            ));
        }
    }

    Ok(())
}

fn key_status(value: &str) -> &'static str {
    if value.trim().is_empty() {
        "\"\" # not configured"
    } else {
        "\"***\" # configured"
    }
}

/// Display all configuration values
fn show_all_config(config: &Config) {
    println!("[extraction]");
    println!("base_url = \"{}\"", config.extraction.base_url);
    println!("model = \"{}\"", config.extraction.model);
    println!("temperature = {}", config.extraction.temperature);
    println!("max_tokens = {}", config.extraction.max_tokens);
    println!("timeout_secs = {}", config.extraction.timeout_secs);
    println!();

    println!("[geocoding]");
    println!("backend = \"{}\"", config.geocoding.backend);
    println!("google_url = \"{}\"", config.geocoding.google_url);
    println!("nominatim_url = \"{}\"", config.geocoding.nominatim_url);
    println!("bias_radius_meters = {}", config.geocoding.bias_radius_meters);
    println!("max_distance_km = {}", config.geocoding.max_distance_km);
    println!("concurrency = {}", config.geocoding.concurrency);
    println!("timeout_secs = {}", config.geocoding.timeout_secs);
    println!();

    println!("[server]");
    println!("host = \"{}\"", config.server.host);
    println!("port = {}", config.server.port);
    println!();

    println!("[output]");
    println!("format = \"{}\"", config.output.format);
    println!();

    println!("[api_keys]");
    println!("openai = {}", key_status(&config.api_keys.openai));
    println!("google_maps = {}", key_status(&config.api_keys.google_maps));
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(key: Option<&str>, value: Option<&str>) -> ConfigArgs {
        ConfigArgs {
            key: key.map(str::to_string),
            value: value.map(str::to_string),
            path: false,
            reset: false,
        }
    }

    #[test]
    fn test_set_writes_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        run(
            args(Some("geocoding.max_distance_km"), Some("25")),
            Some(path.clone()),
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.geocoding.max_distance_km, 25.0);
    }

    #[test]
    fn test_unknown_key_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        assert!(run(args(Some("nope.key"), None), Some(path.clone())).is_err());
        assert!(run(args(None, Some("value")), Some(path)).is_err());
    }

    #[test]
    fn test_key_status_masks_value() {
        assert_eq!(key_status("sk-secret"), "\"***\" # configured");
        assert_eq!(key_status(""), "\"\" # not configured");
    }
}
