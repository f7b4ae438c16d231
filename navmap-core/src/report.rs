//! Text report formatting.
//!
//! Renders the analysis as the plain-text artifact written next to the
//! diagrams. Section order is fixed: totals, per-kind breakdown, fan-out
//! ranking, roots, then orphans; the last two appear only when non-empty.

use std::fmt::Write;

use crate::analyze::NavAnalysis;
use crate::graph::NavGraph;

/// Width of the title separator line.
const RULE_WIDTH: usize = 50;

/// Generate the plain-text analysis report.
pub fn generate_report(graph: &NavGraph, analysis: &NavAnalysis) -> String {
    let mut report = String::with_capacity(512 + analysis.ranking.len() * 48);

    if let Err(e) = write_report_content(&mut report, graph, analysis) {
        eprintln!("[ERROR] Failed to generate report string: {}", e);
        return "SwiftUI Navigation Analysis Report\n".to_string();
    }

    report
}

/// Internal function to write report content using the Write trait.
fn write_report_content(
    out: &mut String,
    graph: &NavGraph,
    analysis: &NavAnalysis,
) -> std::fmt::Result {
    let stats = &analysis.stats;

    writeln!(out, "SwiftUI Navigation Analysis Report")?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "Total Swift files analyzed: {}", stats.files_scanned)?;
    writeln!(out, "Total views found: {}", stats.view_count)?;
    writeln!(out, "Total navigation connections: {}", graph.edge_count())?;
    writeln!(out)?;

    writeln!(out, "Navigation breakdown:")?;
    for (kind, count) in stats.per_kind() {
        if count > 0 {
            writeln!(out, "  - {}: {}", kind.wire_name(), count)?;
        }
    }
    writeln!(out)?;

    writeln!(out, "Top source views (most outgoing connections):")?;
    for (source, count) in &analysis.ranking {
        writeln!(out, "  - {}: {} connections", source, count)?;
    }

    if !analysis.roots.is_empty() {
        writeln!(out)?;
        writeln!(out, "Potential root views (no incoming connections):")?;
        for root in &analysis.roots {
            writeln!(out, "  - {}", root)?;
        }
    }

    if !analysis.orphans.is_empty() {
        writeln!(out)?;
        writeln!(out, "Orphan views (not reachable from any root):")?;
        for orphan in &analysis.orphans {
            writeln!(out, "  - {}", orphan)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{EdgeKind, ExtractOutcome, FileExtraction, NavEdge};
    use std::path::Path;

    fn sample_graph() -> NavGraph {
        let mut content = FileExtraction::new(Path::new("app/ContentView.swift"));
        content.views = vec!["ContentView".to_string()];
        content.edges = vec![
            NavEdge::new(EdgeKind::Link, "ItemsListView"),
            NavEdge::new(EdgeKind::Sheet, "AddItemView"),
        ];

        let mut items = FileExtraction::new(Path::new("app/ItemsListView.swift"));
        items.views = vec!["ItemsListView".to_string()];
        items.edges = vec![NavEdge::new(EdgeKind::Link, "ItemDetailView")];

        let mut legacy = FileExtraction::new(Path::new("app/LegacyView.swift"));
        legacy.views = vec!["LegacyView".to_string()];

        NavGraph::build([
            ExtractOutcome::Ok(content),
            ExtractOutcome::Ok(items),
            ExtractOutcome::Ok(legacy),
        ])
    }

    #[test]
    fn test_report_totals_and_breakdown() {
        let graph = sample_graph();
        let analysis = graph.analyze();
        let report = generate_report(&graph, &analysis);

        assert!(report.starts_with("SwiftUI Navigation Analysis Report\n"));
        assert!(report.contains("Total Swift files analyzed: 3"));
        assert!(report.contains("Total views found: 3"));
        assert!(report.contains("Total navigation connections: 3"));
        assert!(report.contains("  - nav: 2"));
        assert!(report.contains("  - sheet: 1"));
        // No fullscreen edges, so no fullscreen line.
        assert!(!report.contains("fullscreen"));
    }

    #[test]
    fn test_report_ranking_and_roots() {
        let graph = sample_graph();
        let analysis = graph.analyze();
        let report = generate_report(&graph, &analysis);

        assert!(report.contains("Top source views (most outgoing connections):"));
        assert!(report.contains("  - ContentView: 2 connections"));
        assert!(report.contains("Potential root views (no incoming connections):"));
        assert!(report.contains("  - ContentView\n"));
    }

    #[test]
    fn test_report_orphan_section() {
        let graph = sample_graph();
        let analysis = graph.analyze();
        let report = generate_report(&graph, &analysis);

        assert!(report.contains("Orphan views (not reachable from any root):"));
        assert!(report.contains("  - LegacyView"));
    }

    #[test]
    fn test_report_section_order() {
        let graph = sample_graph();
        let analysis = graph.analyze();
        let report = generate_report(&graph, &analysis);

        let breakdown = report.find("Navigation breakdown:").unwrap();
        let ranking = report.find("Top source views").unwrap();
        let roots = report.find("Potential root views").unwrap();
        let orphans = report.find("Orphan views").unwrap();
        assert!(breakdown < ranking);
        assert!(ranking < roots);
        assert!(roots < orphans);
    }

    #[test]
    fn test_report_empty_graph_keeps_headers() {
        let graph = NavGraph::build(std::iter::empty::<ExtractOutcome>());
        let analysis = graph.analyze();
        let report = generate_report(&graph, &analysis);

        assert!(report.contains("Total Swift files analyzed: 0"));
        assert!(report.contains("Navigation breakdown:"));
        assert!(report.contains("Top source views"));
        assert!(!report.contains("Potential root views"));
        assert!(!report.contains("Orphan views"));
    }
}
