//! navmap CLI - SwiftUI navigation graph mapper.
//!
//! Features:
//! - Recursive .swift file discovery with build-directory exclusions
//! - Rayon-powered parallel pattern extraction
//! - Mermaid and Graphviz DOT diagram output
//! - JSON data dump and plain-text report artifacts
//! - navmap.toml configuration with CLI override

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

use navmap_core::{
    generate_dot, generate_mermaid, init_structured_logging, load_config, Navmap, NavmapConfig,
};

/// Artifacts land here unless `--out-dir` or navmap.toml says otherwise.
const DEFAULT_OUT_DIR: &str = "navigation_analysis";

#[derive(Parser, Debug)]
#[command(author, version, about = "SwiftUI navigation graph mapper")]
pub struct Cli {
    /// Path to the root of the SwiftUI project
    #[arg(default_value = ".")]
    path: String,

    /// Directory the analysis artifacts are written into
    #[arg(long, value_name = "DIR")]
    out_dir: Option<String>,

    /// View names or patterns to ignore (supports * prefix/suffix wildcards)
    #[arg(long, num_args = 1..)]
    ignore: Vec<String>,

    /// Print a JSON summary instead of the text report
    #[arg(long)]
    json: bool,

    /// Print the Graphviz DOT graph to stdout and write nothing
    #[arg(long)]
    dot: bool,

    /// Print the Mermaid flowchart to stdout and write nothing
    #[arg(long)]
    mermaid: bool,

    /// Suppress the report on stdout (artifacts are still written)
    #[arg(long)]
    quiet: bool,
}

/// Output directory precedence: flag, then navmap.toml, then the default.
fn resolve_out_dir<'a>(flag: Option<&'a str>, config: &'a NavmapConfig) -> &'a str {
    flag.or_else(|| config.output_dir()).unwrap_or(DEFAULT_OUT_DIR)
}

/// Ignore patterns from the command line and navmap.toml both apply.
fn merge_ignore_patterns(flag: &[String], config: &NavmapConfig) -> Vec<String> {
    let mut merged = flag.to_vec();
    merged.extend(config.ignore_patterns().iter().cloned());
    merged
}

/// Security: validates the output directory before anything is written.
///
/// Rejects NUL bytes, absolute paths, and `..` components so a flag or a
/// config file cannot direct artifacts outside the working directory.
fn validate_output_path(path: &str) -> Result<PathBuf> {
    if path.contains('\0') {
        return Err(anyhow!("Output path contains NUL bytes"));
    }

    let candidate = PathBuf::from(path);
    if candidate.is_absolute() {
        return Err(anyhow!(
            "Output path must be relative, not absolute: {}",
            path
        ));
    }
    if candidate
        .components()
        .any(|c| matches!(c, std::path::Component::ParentDir))
    {
        return Err(anyhow!(
            "Path traversal (..) not allowed in output paths: {}",
            path
        ));
    }

    // Backslash separators are opaque to Components on Unix.
    let normalized = path.replace('\\', "/");
    if normalized.starts_with("../") || normalized.contains("/../") {
        return Err(anyhow!(
            "Path traversal (..) not allowed in output paths: {}",
            path
        ));
    }

    Ok(candidate)
}

fn main() {
    // Global panic guard: keep raw backtrace spew away from users.
    std::panic::set_hook(Box::new(|info| {
        eprintln!("[PANIC] navmap internal error: {}", info);
        eprintln!("[PANIC] This is a bug in navmap, not in the scanned project.");
    }));

    // Structured JSON logging to stderr, filtered by RUST_LOG.
    init_structured_logging();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("[ERROR] {:#}", e);
        std::process::exit(2);
    }
}

fn run(cli: Cli) -> Result<()> {
    // 1. Load navmap.toml from the scan root. A malformed config is fatal:
    //    the user wrote it deliberately.
    let config = load_config(Path::new(&cli.path))
        .context("Failed to load navmap.toml")?
        .unwrap_or_default();

    // 2. Merge settings. The flag wins over config for the output
    //    directory; ignore patterns from both sources apply.
    let out_dir = resolve_out_dir(cli.out_dir.as_deref(), &config);
    let ignore = merge_ignore_patterns(&cli.ignore, &config);

    // 3. Scan, extract, fold, analyze.
    let result = Navmap::new(&cli.path)
        .ignore_patterns(ignore)
        .analyze()
        .with_context(|| format!("Analysis failed for: {}", cli.path))?;

    // 4. Per-file diagnostics are warnings, never fatal.
    for skipped in result.graph.skipped() {
        eprintln!(
            "[WARN] Skipped {}: {}",
            skipped.path.display(),
            skipped.reason
        );
    }

    // 5. Single-artifact stdout modes write no files.
    if cli.dot {
        print!("{}", generate_dot(&result.graph));
        return Ok(());
    }
    if cli.mermaid {
        print!("{}", generate_mermaid(&result.graph));
        return Ok(());
    }

    // 6. Write the four artifacts, overwriting previous runs.
    let out_path = validate_output_path(out_dir)
        .with_context(|| format!("Invalid output path: {}", out_dir))?;
    let written = result
        .write_artifacts(&out_path)
        .with_context(|| format!("Failed to write artifacts to: {}", out_path.display()))?;

    // 7. Report results.
    if cli.json {
        let stats = &result.analysis.stats;
        let json_output = serde_json::json!({
            "files_scanned": stats.files_scanned,
            "files_skipped": stats.files_skipped,
            "views": stats.view_count,
            "edges": stats.edge_count,
            "breakdown": {
                "nav": stats.link_count,
                "sheet": stats.sheet_count,
                "fullscreen": stats.fullscreen_count,
                "nav_dest": stats.destination_count,
                "tab": stats.tab_count,
            },
            "top_views": &result.analysis.ranking,
            "roots": &result.analysis.roots,
            "orphans": &result.analysis.orphans,
            "skipped": result.graph.skipped(),
            "artifacts": written.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&json_output)?);
    } else if !cli.quiet {
        print!("{}", result.report());
        println!();
        println!("Artifacts written to: {}", out_path.display());
    }

    Ok(())
}
