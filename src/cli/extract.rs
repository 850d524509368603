//! Extract command handler
//!
//! Prints the extractor's destination and place list as JSON.

use crate::cli::{build_extractor, emit, read_notes};
use crate::config::Config;
use crate::error::Result;
use crate::extract::Extractor;
use clap::Args;

/// Extract command arguments
#[derive(Args)]
pub struct ExtractArgs {
    /// Notes file ("-" or omitted for stdin)
    pub file: Option<String>,

    /// Notes given inline
    #[arg(long, short = 't', conflicts_with = "file")]
    pub text: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,
}

/// Run the extract command
pub async fn run(args: ExtractArgs, config: Config) -> Result<()> {
    let notes = read_notes(args.file.as_deref(), args.text)?;
    let extractor = build_extractor(&config)?;

    let extraction = extractor.extract(&notes).await?;

    emit(
        &serde_json::to_string_pretty(&extraction)?,
        args.output.as_deref(),
    )
}
