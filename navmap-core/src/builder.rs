//! Builder pattern API for navigation analysis.
//!
//! Provides a fluent interface for configuring and running a scan:
//!
//! ```rust,ignore
//! use navmap_core::prelude::*;
//!
//! let result = Navmap::new("/path/to/app")
//!     .exclude_dirs(["Generated"])
//!     .ignore_patterns(["*Preview"])
//!     .analyze()?;
//!
//! println!("Navigation edges: {}", result.graph.edge_count());
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::analyze::NavAnalysis;
use crate::error::{IoResultExt, NavmapError};
use crate::extract::{extract_file, ExtractOutcome};
use crate::graph::NavGraph;
use crate::report::generate_report;
use crate::scan::gather_swift_files_with_excludes;
use crate::visualize::generate_dot;
#[cfg(feature = "mermaid")]
use crate::visualize_mermaid::generate_mermaid;

/// Diagram artifact file name.
#[cfg(feature = "mermaid")]
pub const MERMAID_FILE: &str = "navigation.mmd";

/// DOT artifact file name.
pub const DOT_FILE: &str = "navigation.dot";

/// Structured data artifact file name.
pub const DATA_FILE: &str = "navigation_data.json";

/// Text report artifact file name.
pub const REPORT_FILE: &str = "report.txt";

/// Builder for configuring a navigation scan.
///
/// # Example
///
/// ```rust,ignore
/// let result = Navmap::new("/my/app")
///     .ignore_patterns(["*Tests"])
///     .analyze()?;
/// ```
#[derive(Debug, Clone)]
pub struct Navmap {
    /// Root path of the source tree to analyze
    root: PathBuf,

    /// Custom excluded directories (added to the built-in set)
    excluded_dirs: Vec<String>,

    /// File-stem patterns to skip entirely
    ignored_patterns: Vec<String>,

    /// Whether to extract files on the Rayon pool
    parallel: bool,
}

impl Navmap {
    /// Create a new scan builder for the given path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            excluded_dirs: Vec::new(),
            ignored_patterns: Vec::new(),
            parallel: true,
        }
    }

    /// Add directories to exclude from scanning.
    pub fn exclude_dirs(mut self, dirs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.excluded_dirs.extend(dirs.into_iter().map(Into::into));
        self
    }

    /// Add patterns for file stems to ignore.
    ///
    /// Patterns support a leading or trailing `*` wildcard; a bare pattern
    /// matches as an exact name or substring.
    pub fn ignore_patterns(mut self, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.ignored_patterns.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Enable or disable parallel file extraction.
    ///
    /// Either way the result is identical: extraction order is pinned to
    /// scan order before folding.
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Run the scan and return the graph with its analysis.
    pub fn analyze(&self) -> Result<ScanResult> {
        if !self.root.exists() {
            return Err(NavmapError::invalid_argument(format!(
                "path does not exist: {}",
                self.root.display()
            ))
            .into());
        }

        // 1. Gather source files (sorted, excluded dirs pruned)
        let excludes: Vec<&str> = self.excluded_dirs.iter().map(String::as_str).collect();
        let files = gather_swift_files_with_excludes(&self.root, &excludes)
            .context("Failed to gather .swift files")?;

        // 2. Drop files whose stem matches an ignored pattern
        let files: Vec<PathBuf> = files
            .into_iter()
            .filter(|path| !self.is_ignored_path(path))
            .collect();

        // 3. Extract views and edges per file. Both branches preserve input
        //    order, so the fold below always sees files in scan order.
        let outcomes: Vec<ExtractOutcome> = if self.parallel {
            files.par_iter().map(|path| extract_file(path)).collect()
        } else {
            files.iter().map(|path| extract_file(path)).collect()
        };

        // 4. Fold into the graph and analyze
        let graph = NavGraph::build(outcomes);
        let analysis = graph.analyze();

        Ok(ScanResult { graph, analysis })
    }

    fn is_ignored_path(&self, path: &Path) -> bool {
        path.file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|stem| self.is_ignored(stem))
    }

    /// Check if a file stem matches any ignored pattern.
    fn is_ignored(&self, name: &str) -> bool {
        for pattern in &self.ignored_patterns {
            if pattern.ends_with('*') {
                let prefix = &pattern[..pattern.len() - 1];
                if name.starts_with(prefix) {
                    return true;
                }
            } else if let Some(suffix) = pattern.strip_prefix('*') {
                if name.ends_with(suffix) {
                    return true;
                }
            } else if name == pattern || name.contains(pattern) {
                return true;
            }
        }
        false
    }
}

/// Result of running a navigation scan.
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// The folded navigation graph
    pub graph: NavGraph,

    /// Statistics, fan-out ranking, roots and orphans
    pub analysis: NavAnalysis,
}

impl ScanResult {
    /// Check if the scan found any views or edges at all.
    pub fn has_navigation(&self) -> bool {
        !self.graph.is_empty()
    }

    /// Render the human-readable text report.
    pub fn report(&self) -> String {
        generate_report(&self.graph, &self.analysis)
    }

    /// Render the structured data dump as pretty-printed JSON.
    ///
    /// Key order follows insertion order, so the output is byte-identical
    /// across runs over an unchanged tree.
    pub fn data_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.graph.data_dump())
            .context("Failed to serialize navigation data")
    }

    /// Write every enabled artifact into `out_dir`, creating it if needed.
    ///
    /// Returns the paths written, in write order. Any write failure is
    /// fatal; artifacts are not best-effort.
    pub fn write_artifacts(&self, out_dir: &Path) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(out_dir).with_output_path(out_dir)?;

        let mut written = Vec::with_capacity(4);

        #[cfg(feature = "mermaid")]
        {
            let path = out_dir.join(MERMAID_FILE);
            fs::write(&path, generate_mermaid(&self.graph)).with_output_path(&path)?;
            written.push(path);
        }

        let path = out_dir.join(DOT_FILE);
        fs::write(&path, generate_dot(&self.graph)).with_output_path(&path)?;
        written.push(path);

        let path = out_dir.join(DATA_FILE);
        fs::write(&path, self.data_json()?).with_output_path(&path)?;
        written.push(path);

        let path = out_dir.join(REPORT_FILE);
        fs::write(&path, self.report()).with_output_path(&path)?;
        written.push(path);

        Ok(written)
    }
}
