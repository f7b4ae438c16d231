//! Structured logging for analysis runs using **tracing**.
//!
//! Performance characteristics:
//! - Non-blocking: tracing macros push events to a queue, not directly to I/O
//! - Async-compatible: works efficiently with Rayon's parallel workers
//! - Rich context: automatically captures level, timestamp, target, and thread ID
//!
//! The JSON subscriber provides machine-readable output for observability platforms.

/// Initializes the global tracing collector (subscriber).
///
/// This should be called *once* at the beginning of the application's runtime.
/// It configures structured JSON output to stderr.
///
/// # Environment Variables
/// - `RUST_LOG`: Controls log filtering (e.g., `RUST_LOG=navmap=debug`)
pub fn init_structured_logging() {
    tracing_subscriber::fmt()
        .json() // Output logs in JSON format
        .with_ansi(false) // Disable ANSI codes in JSON output
        .with_level(true) // Include the log level field
        .with_target(true) // Include the module path (target)
        .with_current_span(true) // Include tracing span context
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG env var
        .with_writer(std::io::stderr) // Write to stderr (keeps stdout clean for tool output)
        .init();
}
