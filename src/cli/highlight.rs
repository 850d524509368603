//! Highlight command handler
//!
//! Links place names in a notes file. Places come from a JSON file holding
//! either a list of places or a whole plan (as written by `plan -f json`).

use crate::cli::emit;
use crate::error::{Error, Result};
use crate::highlight::{highlight, HighlightPlace};
use clap::Args;
use serde_json::Value;

/// Highlight command arguments
#[derive(Args)]
pub struct HighlightArgs {
    /// Notes file
    pub notes: String,

    /// JSON file with places or a plan
    #[arg(long, short = 'p')]
    pub places: String,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,
}

/// Run the highlight command
pub fn run(args: HighlightArgs) -> Result<()> {
    let notes = std::fs::read_to_string(&args.notes)?;
    let places = parse_places(&std::fs::read_to_string(&args.places)?)?;

    emit(&highlight(&notes, &places), args.output.as_deref())
}

/// Read place names from a list or a plan's `places`
///
/// Entries with an explicit `index` keep it; others use their position.
pub fn parse_places(json: &str) -> Result<Vec<HighlightPlace>> {
    let value: Value = serde_json::from_str(json)?;
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("places") {
            Some(Value::Array(items)) => items,
            _ => return Err(Error::Config("Plan JSON has no places list".to_string())),
        },
        _ => {
            return Err(Error::Config(
                "Expected a list of places or a plan".to_string(),
            ))
        }
    };

    Ok(items
        .iter()
        .enumerate()
        .filter_map(|(position, item)| {
            let name = item.get("name")?.as_str()?;
            let index = item
                .get("index")
                .and_then(Value::as_u64)
                .map(|i| i as usize)
                .unwrap_or(position);
            Some(HighlightPlace::new(name, index))
        })
        .collect())
}
