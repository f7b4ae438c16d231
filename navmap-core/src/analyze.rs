//! Graph statistics: per-kind totals, fan-out ranking, roots, orphans.
//!
//! Everything here is a pure read over a finished [`NavGraph`]; nothing
//! mutates the graph or looks back at the filesystem.
//!
//! Performance characteristics:
//! - Stats and ranking: O(|V| + |E|) single pass plus one stable sort
//! - Orphan detection: O(|V| + |E|) multi-source BFS

use std::collections::{BTreeSet, HashSet, VecDeque};

use petgraph::graphmap::DiGraphMap;
use serde::Serialize;

use crate::extract::EdgeKind;
use crate::graph::NavGraph;

/// Entries kept in the fan-out ranking.
const TOP_FAN_OUT: usize = 10;

/// Aggregate counters for one analysis run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NavStats {
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub view_count: usize,
    pub edge_count: usize,
    pub link_count: usize,
    pub sheet_count: usize,
    pub fullscreen_count: usize,
    pub destination_count: usize,
    pub tab_count: usize,
}

impl NavStats {
    /// Counter for one edge kind.
    pub fn count_for(&self, kind: EdgeKind) -> usize {
        match kind {
            EdgeKind::Link => self.link_count,
            EdgeKind::Sheet => self.sheet_count,
            EdgeKind::FullScreenCover => self.fullscreen_count,
            EdgeKind::NavigationDestination => self.destination_count,
            EdgeKind::TabItem => self.tab_count,
        }
    }

    /// All per-kind counters in rule order. Their sum equals `edge_count`.
    pub fn per_kind(&self) -> [(EdgeKind, usize); 5] {
        EdgeKind::ALL.map(|kind| (kind, self.count_for(kind)))
    }
}

/// Result of analyzing a navigation graph.
#[derive(Debug, Clone, Serialize)]
pub struct NavAnalysis {
    /// Aggregate counters
    pub stats: NavStats,
    /// (source, outgoing edge count), descending; ties keep the graph's
    /// key-insertion order; truncated to the top 10
    pub ranking: Vec<(String, usize)>,
    /// Sources never appearing as any edge's destination, sorted
    pub roots: Vec<String>,
    /// Declared views not reachable from any root, sorted
    pub orphans: Vec<String>,
}

impl NavGraph {
    /// Computes the full analysis for this graph.
    pub fn analyze(&self) -> NavAnalysis {
        let mut stats = NavStats {
            files_scanned: self.files_scanned(),
            files_skipped: self.skipped().len(),
            view_count: self.view_count(),
            ..NavStats::default()
        };

        for edge in self.navigation().values().flatten() {
            stats.edge_count += 1;
            match edge.kind {
                EdgeKind::Link => stats.link_count += 1,
                EdgeKind::Sheet => stats.sheet_count += 1,
                EdgeKind::FullScreenCover => stats.fullscreen_count += 1,
                EdgeKind::NavigationDestination => stats.destination_count += 1,
                EdgeKind::TabItem => stats.tab_count += 1,
            }
        }

        // Stable sort: equal counts keep first-insertion order, which is
        // scan order by construction.
        let mut ranking: Vec<(String, usize)> = self
            .navigation()
            .iter()
            .map(|(source, edges)| (source.clone(), edges.len()))
            .collect();
        ranking.sort_by(|a, b| b.1.cmp(&a.1));
        ranking.truncate(TOP_FAN_OUT);

        let destinations: HashSet<&str> = self.destinations().collect();
        let mut roots: Vec<String> = self
            .navigation()
            .keys()
            .filter(|source| !destinations.contains(source.as_str()))
            .cloned()
            .collect();
        roots.sort();

        let orphans = self.find_orphans(&roots);

        NavAnalysis {
            stats,
            ranking,
            roots,
            orphans,
        }
    }

    /// Declared views with no path from any root.
    ///
    /// Builds the edge relation as a `DiGraphMap` (parallel edges collapse,
    /// which is fine for reachability) and walks it breadth-first from all
    /// roots at once. When the graph has no roots at all (every source is
    /// also somebody's destination), nothing is reachable and every
    /// declared view is reported.
    fn find_orphans(&self, roots: &[String]) -> Vec<String> {
        let mut relation: DiGraphMap<&str, ()> = DiGraphMap::new();
        for (source, edges) in self.navigation() {
            relation.add_node(source.as_str());
            for edge in edges {
                relation.add_edge(source.as_str(), edge.destination.as_str(), ());
            }
        }

        let reachable = reachable_from_roots(&relation, roots.iter().map(String::as_str));

        let orphans: BTreeSet<&str> = self
            .views()
            .values()
            .flatten()
            .map(String::as_str)
            .filter(|view| !reachable.contains(view))
            .collect();
        orphans.into_iter().map(str::to_string).collect()
    }
}

/// Multi-source BFS over the navigation relation.
///
/// Single unified traversal: O(|V| + |E|) regardless of the number of
/// roots, with each node and edge visited at most once.
fn reachable_from_roots<'a>(
    relation: &DiGraphMap<&'a str, ()>,
    roots: impl IntoIterator<Item = &'a str>,
) -> HashSet<&'a str> {
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();

    for root in roots {
        // Roots are graph keys, so they are always present as nodes.
        if relation.contains_node(root) && visited.insert(root) {
            queue.push_back(root);
        }
    }

    while let Some(node) = queue.pop_front() {
        for next in relation.neighbors(node) {
            if visited.insert(next) {
                queue.push_back(next);
            }
        }
    }

    visited
}
