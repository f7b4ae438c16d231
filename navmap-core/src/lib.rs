//! navmap-core: SwiftUI navigation graph extraction and analysis
//!
//! This library provides modular components for scanning, extracting, and
//! analyzing the navigation structure of SwiftUI codebases without compiling
//! them.
//!
//! # Features
//!
//! - **View discovery**: Find `View` structs and UIKit controller classes
//! - **Edge extraction**: Five navigation edge kinds (push links, sheets,
//!   full-screen covers, navigation destinations, tab members)
//! - **Graph folding**: Deterministic, insertion-ordered multigraph
//! - **Analysis**: Edge statistics, fan-out ranking, root and orphan detection
//! - **Exporters**: Mermaid and DOT diagrams, JSON data dump, text report
//! - **Metrics tooling**: xcresult performance summary with letter grading
//!
//! # Quick Start
//!
//! Use the [`prelude`] module for convenient imports:
//!
//! ```rust,ignore
//! use navmap_core::prelude::*;
//!
//! let result = Navmap::new("/path/to/app")
//!     .ignore_patterns(["*Tests"])
//!     .analyze()?;
//!
//! for (view, fan_out) in &result.analysis.ranking {
//!     println!("{}: {} connections", view, fan_out);
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`scan`]: Parallel file discovery
//! - [`extract`]: Pattern-based view and edge extraction
//! - [`graph`]: Navigation graph folding
//! - [`analyze`]: Statistics, ranking, roots and orphans
//! - [`visualize`]: DOT exporter
//! - [`report`]: Text report exporter
//! - [`builder`]: Fluent builder API for configuration
//! - [`error`]: Typed error handling
//!
//! # Cargo Features
//!
//! - `mermaid` (default): Enable the Mermaid diagram exporter
//! - `metrics` (default): Enable the xcresult performance summarizer
//! - `full`: Enable all optional features

// Core modules (always available)
pub mod analyze;
pub mod builder;
pub mod config;
pub mod error;
pub mod extract;
pub mod graph;
pub mod logging;
pub mod prelude;
pub mod report;
pub mod scan;
pub mod visualize;

// Feature-gated modules
#[cfg(feature = "mermaid")]
pub mod visualize_mermaid;

#[cfg(feature = "metrics")]
pub mod metrics;

// ============================================================================
// Explicit Re-exports (avoiding glob imports for clear API surface)
// ============================================================================

// Error types
pub use error::{IoResultExt, NavmapError, NavmapResult};

// Builder API
pub use builder::{Navmap, ScanResult, DATA_FILE, DOT_FILE, REPORT_FILE};

// Extraction
pub use extract::{
    edge_rules, extract_edges, extract_file, extract_navigation, extract_views,
    EdgeKind, EdgeRule, ExtractOutcome, FileExtraction, NavEdge,
};

// Graph building
pub use graph::{NavGraph, NavigationData, SkippedFile};

// Analysis
pub use analyze::{NavAnalysis, NavStats};

// Configuration
pub use config::{load_config, NavmapConfig, OutputConfig};

// Logging
pub use logging::init_structured_logging;

// Reporting
pub use report::generate_report;

// File scanning
pub use scan::{gather_swift_files, gather_swift_files_with_excludes, SOURCE_EXTENSION};

// Visualization
pub use visualize::generate_dot;

// Feature-gated re-exports
#[cfg(feature = "mermaid")]
pub use builder::MERMAID_FILE;
#[cfg(feature = "mermaid")]
pub use visualize_mermaid::generate_mermaid;

#[cfg(feature = "metrics")]
pub use metrics::{
    extract_metrics, generate_metrics_report, performance_grade, summarize_performance,
    MetricsBundle,
};

#[cfg(test)]
mod tests;
