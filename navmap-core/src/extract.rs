//! Pattern extraction over raw Swift text - mission critical.
//!
//! Fully deterministic, error-resilient, no AST construction.
//!
//! Extraction is intentionally shallow:
//! - Rules run over the whole file text, not per declaration
//! - An edge found anywhere in a file is attributed to that file's stem
//! - False positives/negatives from unusual formatting are accepted
//!
//! Performance characteristics:
//! - Pre-compiled regex patterns (compile once, use many)
//! - Parallel-safe (stateless operations)

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::NavmapError;

/// Maximum file size to scan (10 MB).
/// Files larger than this are skipped to prevent memory issues.
const MAX_FILE_SIZE: usize = 10_000_000;

/// The navigation mechanism an edge was extracted from.
///
/// Exactly five kinds exist; exporters and the analyzer rely on this set
/// being closed. The two syntactic `NavigationLink` forms (destination
/// argument vs trailing closure) intentionally collapse into [`Link`].
///
/// [`Link`]: EdgeKind::Link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    /// `NavigationLink` push navigation
    #[serde(rename = "nav")]
    Link,
    /// `.sheet` modal presentation
    #[serde(rename = "sheet")]
    Sheet,
    /// `.fullScreenCover` modal presentation
    #[serde(rename = "fullscreen")]
    FullScreenCover,
    /// `.navigationDestination` route registration
    #[serde(rename = "nav_dest")]
    NavigationDestination,
    /// Membership in a `TabView` container
    #[serde(rename = "tab")]
    TabItem,
}

impl EdgeKind {
    /// All kinds, in extraction-rule order.
    pub const ALL: [EdgeKind; 5] = [
        EdgeKind::Link,
        EdgeKind::Sheet,
        EdgeKind::FullScreenCover,
        EdgeKind::NavigationDestination,
        EdgeKind::TabItem,
    ];

    /// Short name used in the structured data dump (`type` field).
    pub fn wire_name(&self) -> &'static str {
        match self {
            EdgeKind::Link => "nav",
            EdgeKind::Sheet => "sheet",
            EdgeKind::FullScreenCover => "fullscreen",
            EdgeKind::NavigationDestination => "nav_dest",
            EdgeKind::TabItem => "tab",
        }
    }

    /// Human-readable label used on diagram edges.
    pub fn label(&self) -> &'static str {
        match self {
            EdgeKind::Link => "nav",
            EdgeKind::Sheet => "sheet",
            EdgeKind::FullScreenCover => "fullscreen",
            EdgeKind::NavigationDestination => "destination",
            EdgeKind::TabItem => "tab",
        }
    }
}

impl std::fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

/// One directed navigation transition.
///
/// The source is implicit: edges live in a per-source bucket keyed by the
/// scanned file's stem. The destination is the captured token verbatim and
/// may be "dangling" (no declared view of that name anywhere in the tree).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavEdge {
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    pub destination: String,
}

impl NavEdge {
    pub fn new(kind: EdgeKind, destination: impl Into<String>) -> Self {
        Self {
            kind,
            destination: destination.into(),
        }
    }
}

/// Everything extracted from a single file.
#[derive(Debug, Clone)]
pub struct FileExtraction {
    /// File name including extension (key of the views map)
    pub file_name: String,
    /// File stem; the `source` of every edge below
    pub source: String,
    /// Declared view names, in declaration order
    pub views: Vec<String>,
    /// Navigation edges, in rule order
    pub edges: Vec<NavEdge>,
}

impl FileExtraction {
    /// Creates an empty extraction with names derived from the path.
    pub fn new(path: &Path) -> Self {
        let file_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let source = path
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        Self {
            file_name,
            source,
            views: Vec::with_capacity(4),
            edges: Vec::with_capacity(8),
        }
    }

    /// True when the file contributed neither views nor edges.
    pub fn is_empty(&self) -> bool {
        self.views.is_empty() && self.edges.is_empty()
    }
}

/// Result of scanning a single file - used for granular parallel control.
#[derive(Debug)]
pub enum ExtractOutcome {
    /// Successfully scanned file
    Ok(FileExtraction),
    /// Read failed (logged, can be skipped)
    Skipped(PathBuf, String),
}

// ============================================================================
// View declaration patterns
// ============================================================================

/// Pre-compiled patterns for view-like declarations.
/// Uses OnceLock for thread-safe lazy initialization.
struct EntityPatterns {
    /// `struct Name: ..., View {`
    value_decl: Regex,
    /// `class Name: UIViewController` / `class Name: UIView`
    reference_decl: Regex,
}

fn entity_patterns() -> &'static EntityPatterns {
    static PATTERNS: OnceLock<EntityPatterns> = OnceLock::new();
    // These patterns are hardcoded and validated at compile-test time.
    PATTERNS.get_or_init(|| EntityPatterns {
        value_decl: Regex::new(r"struct\s+(\w+)\s*:\s*(?:.*\s+)?View\s*\{")
            .expect("Hardcoded regex pattern is valid"),
        reference_decl: Regex::new(r"class\s+(\w+)\s*:\s*(?:.*\s+)?(?:UIViewController|UIView)")
            .expect("Hardcoded regex pattern is valid"),
    })
}

/// Extracts declared view names from file content.
///
/// Two rule classes: SwiftUI `View`-conforming structs, then UIKit
/// controller/view subclasses. The distinction is not retained downstream;
/// both produce plain entity names.
pub fn extract_views(content: &str) -> Vec<String> {
    let patterns = entity_patterns();
    let mut views: Vec<String> = patterns
        .value_decl
        .captures_iter(content)
        .map(|cap| cap[1].to_string())
        .collect();
    views.extend(
        patterns
            .reference_decl
            .captures_iter(content)
            .map(|cap| cap[1].to_string()),
    );
    views
}

// ============================================================================
// Navigation edge rules
// ============================================================================

/// How a rule locates destinations in file text.
enum Matcher {
    /// Regex with the destination in capture group 1.
    Capture(Regex),
    /// `TabView { ... }` block scan: every `*View(` token inside each
    /// balanced brace block following a marker.
    TabBlocks,
}

/// One extraction rule. Rules are independent and additive: each runs over
/// the whole file text, and their results are concatenated in rule order
/// with duplicates retained (the graph is a multigraph).
pub struct EdgeRule {
    pub kind: EdgeKind,
    matcher: Matcher,
}

impl EdgeRule {
    fn capture(kind: EdgeKind, pattern: &str) -> Self {
        // These patterns are hardcoded and validated at compile-test time.
        Self {
            kind,
            matcher: Matcher::Capture(
                Regex::new(pattern).expect("Hardcoded regex pattern is valid"),
            ),
        }
    }

    /// Runs this rule over file text, returning destinations in match order.
    pub fn find_destinations(&self, content: &str) -> Vec<String> {
        match &self.matcher {
            Matcher::Capture(re) => re
                .captures_iter(content)
                .map(|cap| cap[1].to_string())
                .collect(),
            Matcher::TabBlocks => tab_member_destinations(content),
        }
    }
}

/// The ordered rule catalogue.
///
/// Order matters: it fixes the relative position of edges of different
/// kinds within one file's bucket. New directive forms get appended here
/// without touching the extraction loop.
pub fn edge_rules() -> &'static [EdgeRule] {
    static RULES: OnceLock<Vec<EdgeRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            // NavigationLink(destination: SomeView(...))
            EdgeRule::capture(
                EdgeKind::Link,
                r"NavigationLink\s*\(\s*destination\s*:\s*(\w+)\s*\(",
            ),
            // NavigationLink { SomeView(...) }
            EdgeRule::capture(EdgeKind::Link, r"NavigationLink\s*\{[^}]*?(\w+View)\s*\("),
            // NavigationLink("Label", destination: SomeView(...))
            EdgeRule::capture(
                EdgeKind::Link,
                r"NavigationLink\s*\([^,]+,\s*destination\s*:\s*(\w+)\s*\(",
            ),
            // .sheet(isPresented: ...) { SomeView(...) }
            // Also matches the item: form, so item-sheets report twice.
            EdgeRule::capture(EdgeKind::Sheet, r"\.sheet\s*\([^)]+\)\s*\{[^}]*?(\w+View)\s*\("),
            // .sheet(item: ...) { SomeView(...) }
            EdgeRule::capture(
                EdgeKind::Sheet,
                r"\.sheet\s*\(item:[^)]+\)\s*\{[^}]*?(\w+View)\s*\(",
            ),
            // .fullScreenCover(...) { SomeView(...) }
            EdgeRule::capture(
                EdgeKind::FullScreenCover,
                r"\.fullScreenCover\s*\([^)]+\)\s*\{[^}]*?(\w+View)\s*\(",
            ),
            // .navigationDestination(for: ...) { value in SomeView(...) }
            EdgeRule::capture(
                EdgeKind::NavigationDestination,
                r"\.navigationDestination\s*\([^)]+\)\s*\{[^}]*?(\w+View)\s*\(",
            ),
            // TabView { Tab1View() Tab2View() ... }
            EdgeRule {
                kind: EdgeKind::TabItem,
                matcher: Matcher::TabBlocks,
            },
        ]
    })
}

/// Marker locating the opening brace of a `TabView` body.
fn tab_marker_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"TabView\s*\{").expect("Hardcoded regex pattern is valid"))
}

/// `SomethingView(` call-shaped token.
fn view_call_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(\w+View)\s*\(").expect("Hardcoded regex pattern is valid"))
}

/// Returns the text between an opening brace and its balanced closing brace.
///
/// `open` must index the opening `{`. Returns None for unbalanced text
/// (truncated file), in which case the block contributes nothing.
fn balanced_block(text: &str, open: usize) -> Option<&str> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    for (i, b) in bytes.iter().enumerate().skip(open) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    // Brace bytes are ASCII, so both indices sit on
                    // character boundaries.
                    return Some(&text[open + 1..i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Collects every view-convention token inside every `TabView` body.
///
/// Multiple `TabView` occurrences all contribute; duplicate tokens inside
/// a body produce duplicate edges.
fn tab_member_destinations(content: &str) -> Vec<String> {
    let mut found = Vec::new();
    for marker in tab_marker_regex().find_iter(content) {
        // The marker match ends exactly at the opening brace.
        let Some(block) = balanced_block(content, marker.end() - 1) else {
            continue;
        };
        for cap in view_call_regex().captures_iter(block) {
            found.push(cap[1].to_string());
        }
    }
    found
}

/// Runs every edge rule over file content, concatenating results in rule
/// order with the destination tokens kept verbatim.
pub fn extract_edges(content: &str) -> Vec<NavEdge> {
    let mut edges = Vec::new();
    for rule in edge_rules() {
        for destination in rule.find_destinations(content) {
            edges.push(NavEdge::new(rule.kind, destination));
        }
    }
    edges
}

// ============================================================================
// Per-file entry points
// ============================================================================

/// Extracts views and edges from already-read file content.
///
/// Pure function over `(path, content)`; the path only contributes the
/// file name and stem.
pub fn extract_navigation(path: &Path, content: &str) -> FileExtraction {
    let mut extraction = FileExtraction::new(path);
    extraction.views = extract_views(content);
    extraction.edges = extract_edges(content);
    extraction
}

/// Reads and scans a single file. This is the atomic unit of work for
/// parallel processing. Returns an `ExtractOutcome` so the caller decides
/// the error handling strategy; unreadable files never abort a run.
pub fn extract_file(path: &Path) -> ExtractOutcome {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            // Non-UTF-8 content surfaces as InvalidData; everything else is
            // a plain read failure. Both are per-file skips.
            let err = if e.kind() == std::io::ErrorKind::InvalidData {
                NavmapError::decode(path, e.to_string())
            } else {
                NavmapError::read(path, e)
            };
            return ExtractOutcome::Skipped(path.to_path_buf(), err.to_string());
        }
    };

    if content.len() > MAX_FILE_SIZE {
        return ExtractOutcome::Skipped(
            path.to_path_buf(),
            format!(
                "File too large ({} bytes, max {})",
                content.len(),
                MAX_FILE_SIZE
            ),
        );
    }

    ExtractOutcome::Ok(extract_navigation(path, &content))
}
