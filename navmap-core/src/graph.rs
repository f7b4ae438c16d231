//! Navigation graph construction: a single fold over per-file extractions.
//!
//! Performance characteristics:
//! - Build: O(files + edges), one pass, no lookups beyond the bucket map
//! - The graph is append-only during the fold and immutable afterwards
//!
//! All mutation lives in [`NavGraph::build`]; extraction itself is pure,
//! which keeps the parallel fan-out in the builder trivially safe.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Serialize;

use crate::extract::{ExtractOutcome, FileExtraction, NavEdge};

/// A file that could not be analyzed, with the reason it was skipped.
///
/// Skips are diagnostics, not failures: the run continues without the file.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// The directed navigation multigraph for one analysis run.
///
/// Buckets are keyed by source (file stem) in first-insertion order, and
/// each bucket holds that source's edges in extraction order. The same
/// (source, destination, kind) triple may appear more than once; nothing
/// is deduplicated or resolved against declared views.
#[derive(Debug, Clone, Default)]
pub struct NavGraph {
    /// file name -> declared view names (files without views are absent)
    views: IndexMap<String, Vec<String>>,
    /// source -> outgoing edges (sources without edges are absent)
    nav: IndexMap<String, Vec<NavEdge>>,
    files_scanned: usize,
    skipped: Vec<SkippedFile>,
}

impl NavGraph {
    /// Folds per-file extraction outcomes into one graph.
    ///
    /// Outcomes must arrive in scan order; bucket order and dump order are
    /// derived from it. Skipped files are recorded and logged, nothing more.
    pub fn build(outcomes: impl IntoIterator<Item = ExtractOutcome>) -> Self {
        let mut graph = NavGraph::default();
        for outcome in outcomes {
            match outcome {
                ExtractOutcome::Ok(extraction) => graph.absorb(extraction),
                ExtractOutcome::Skipped(path, reason) => {
                    tracing::warn!(path = %path.display(), %reason, "skipping file");
                    graph.skipped.push(SkippedFile { path, reason });
                }
            }
        }
        graph
    }

    fn absorb(&mut self, extraction: FileExtraction) {
        self.files_scanned += 1;
        if !extraction.views.is_empty() {
            // Same-named files overwrite (last writer wins, position kept),
            // matching plain map-assignment semantics in the dump format.
            self.views.insert(extraction.file_name, extraction.views);
        }
        if !extraction.edges.is_empty() {
            self.nav
                .entry(extraction.source)
                .or_default()
                .extend(extraction.edges);
        }
    }

    /// Declared views per file name, in first-seen file order.
    pub fn views(&self) -> &IndexMap<String, Vec<String>> {
        &self.views
    }

    /// Outgoing edges per source, in first-seen source order.
    pub fn navigation(&self) -> &IndexMap<String, Vec<NavEdge>> {
        &self.nav
    }

    /// Files successfully read and scanned (pattern-free files count too).
    pub fn files_scanned(&self) -> usize {
        self.files_scanned
    }

    /// Files skipped with their reasons.
    pub fn skipped(&self) -> &[SkippedFile] {
        &self.skipped
    }

    /// Total number of edges across all buckets.
    pub fn edge_count(&self) -> usize {
        self.nav.values().map(Vec::len).sum()
    }

    /// Total number of declared views across all files.
    pub fn view_count(&self) -> usize {
        self.views.values().map(Vec::len).sum()
    }

    /// Every edge destination, bucket by bucket.
    pub fn destinations(&self) -> impl Iterator<Item = &str> {
        self.nav
            .values()
            .flatten()
            .map(|edge| edge.destination.as_str())
    }

    /// True when no file produced any views or edges.
    pub fn is_empty(&self) -> bool {
        self.views.is_empty() && self.nav.is_empty()
    }

    /// Borrowing view of the graph in the structured dump shape.
    ///
    /// Serializes as `{ "views": {...}, "navigation": {...} }` with key
    /// order preserved, so dump output is byte-identical across runs on
    /// an unchanged tree.
    pub fn data_dump(&self) -> NavigationData<'_> {
        NavigationData {
            views: &self.views,
            navigation: &self.nav,
        }
    }
}

/// Serializable projection of a [`NavGraph`].
#[derive(Debug, Serialize)]
pub struct NavigationData<'a> {
    pub views: &'a IndexMap<String, Vec<String>>,
    pub navigation: &'a IndexMap<String, Vec<NavEdge>>,
}
