//! Graphviz DOT output for navigation graphs.
//!
//! Optimized for memory efficiency with pre-allocated buffers
//! and the `std::fmt::Write` trait for clean string formatting.

use std::fmt::Write;

use crate::extract::EdgeKind;
use crate::graph::NavGraph;

/// Generate a Graphviz DOT representation of the navigation graph.
///
/// One edge statement per navigation transition, styled by kind:
/// - sheets are dashed orange
/// - full-screen covers are bold red
/// - push links are blue, destination routes darkgreen, tabs dotted purple
///
/// Nodes are left implicit; the `node` default gives every view the same
/// rounded box. Graphviz renders this on all platforms without layout hints.
pub fn generate_dot(graph: &NavGraph) -> String {
    // Estimate capacity: ~64 bytes/edge + 180 bytes header/footer
    let estimated_capacity = (graph.edge_count() * 64) + 180;

    let mut dot = String::with_capacity(estimated_capacity);

    // Build DOT string using Write trait for efficient formatting
    if let Err(e) = write_dot_content(&mut dot, graph) {
        eprintln!("[ERROR] Failed to generate DOT string: {}", e);
        return "digraph NavigationFlow {\n}\n".to_string();
    }

    dot
}

/// Internal function to write DOT content using the Write trait.
fn write_dot_content(dot: &mut String, graph: &NavGraph) -> std::fmt::Result {
    writeln!(dot, "digraph NavigationFlow {{")?;
    writeln!(dot, "    rankdir=TB;")?;
    writeln!(
        dot,
        "    node [shape=box, style=\"rounded,filled\", fillcolor=lightblue];"
    )?;
    writeln!(dot, "    edge [fontsize=10];")?;
    writeln!(dot)?;

    for (source, edges) in graph.navigation() {
        for edge in edges {
            writeln!(
                dot,
                "    \"{}\" -> \"{}\" [{}];",
                source,
                edge.destination,
                edge_attributes(edge.kind)
            )?;
        }
    }

    writeln!(dot, "}}")?;
    Ok(())
}

/// DOT attribute list for one edge kind.
fn edge_attributes(kind: EdgeKind) -> &'static str {
    match kind {
        EdgeKind::Link => "label=\"nav\", color=blue",
        EdgeKind::Sheet => "label=\"sheet\", style=dashed, color=orange",
        EdgeKind::FullScreenCover => "label=\"fullscreen\", style=bold, color=red",
        EdgeKind::NavigationDestination => "label=\"destination\", color=darkgreen",
        EdgeKind::TabItem => "label=\"tab\", style=dotted, color=purple",
    }
}
