//! navmap-metrics - markdown performance report from xcresult JSON.
//!
//! Reads the JSON form of an xcresult bundle (as produced by
//! `xcrun xcresulttool get --format json`) and prints the aggregated
//! performance summary to stdout, ready to paste into a PR comment.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;

use navmap_core::summarize_performance;

#[derive(Parser, Debug)]
#[command(author, version, about = "Markdown performance report from xcresult JSON")]
struct Cli {
    /// Path to the xcresult JSON document
    results: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let content = fs::read_to_string(&cli.results)
        .with_context(|| format!("Failed to read results file: {}", cli.results))?;
    let data: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse results JSON: {}", cli.results))?;

    // The report carries its own trailing newline.
    print!("{}", summarize_performance(&data));
    Ok(())
}
