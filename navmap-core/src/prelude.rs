//! Prelude module for convenient imports.
//!
//! Import commonly used types with a single line:
//!
//! ```rust,ignore
//! use navmap_core::prelude::*;
//! ```
//!
//! This provides the most commonly needed types for navigation analysis
//! without polluting the namespace with rarely-used items.

// Core error types
pub use crate::error::{NavmapError, NavmapResult};

// Extraction
pub use crate::extract::{extract_file, EdgeKind, ExtractOutcome, FileExtraction, NavEdge};

// Graph building
pub use crate::graph::{NavGraph, SkippedFile};

// Analysis
pub use crate::analyze::{NavAnalysis, NavStats};

// File scanning
pub use crate::scan::{gather_swift_files, gather_swift_files_with_excludes};

// Exporters
pub use crate::report::generate_report;
pub use crate::visualize::generate_dot;
#[cfg(feature = "mermaid")]
pub use crate::visualize_mermaid::generate_mermaid;

// Configuration
pub use crate::config::{load_config, NavmapConfig};

// Builder API
pub use crate::builder::{Navmap, ScanResult};

// Performance metrics tooling
#[cfg(feature = "metrics")]
pub use crate::metrics::{extract_metrics, summarize_performance, MetricsBundle};
