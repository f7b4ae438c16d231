//! Mermaid flowchart output for navigation graphs.
//!
//! Emits `graph TD` definition text suitable for direct embedding in
//! markdown. Same buffer discipline as the DOT exporter: pre-allocated
//! string, `std::fmt::Write`, graceful fallback on formatting errors.

use std::fmt::Write;

use crate::extract::EdgeKind;
use crate::graph::NavGraph;

/// Generate a Mermaid flowchart of the navigation graph.
///
/// Arrow shapes carry the kind: sheets use dotted arrows, full-screen
/// covers thick arrows, everything else plain arrows with a kind label.
/// Sheet, push and tab destinations also get a `class` line so the
/// rendered nodes pick up the legend colors.
pub fn generate_mermaid(graph: &NavGraph) -> String {
    // Estimate capacity: ~56 bytes/edge (+class line) + 260 bytes header
    let estimated_capacity = (graph.edge_count() * 56) + 260;

    let mut mmd = String::with_capacity(estimated_capacity);

    if let Err(e) = write_mermaid_content(&mut mmd, graph) {
        eprintln!("[ERROR] Failed to generate Mermaid string: {}", e);
        return "graph TD\n".to_string();
    }

    mmd
}

/// Internal function to write Mermaid content using the Write trait.
fn write_mermaid_content(mmd: &mut String, graph: &NavGraph) -> std::fmt::Result {
    writeln!(mmd, "graph TD")?;
    writeln!(mmd, "    %% Define node styles")?;
    writeln!(
        mmd,
        "    classDef default fill:#f9f9f9,stroke:#333,stroke-width:2px;"
    )?;
    writeln!(
        mmd,
        "    classDef sheet fill:#ffe4b5,stroke:#ff8c00,stroke-width:2px;"
    )?;
    writeln!(
        mmd,
        "    classDef nav fill:#e6f3ff,stroke:#4169e1,stroke-width:2px;"
    )?;
    writeln!(
        mmd,
        "    classDef tab fill:#e8f8e8,stroke:#2e8b57,stroke-width:2px;"
    )?;
    writeln!(mmd)?;

    for (source, edges) in graph.navigation() {
        for edge in edges {
            let dst = edge.destination.as_str();
            match edge.kind {
                EdgeKind::Sheet => {
                    writeln!(mmd, "    {} -.->|sheet| {}", source, dst)?;
                    writeln!(mmd, "    class {} sheet;", dst)?;
                }
                EdgeKind::FullScreenCover => {
                    writeln!(mmd, "    {} ==>|fullscreen| {}", source, dst)?;
                }
                EdgeKind::TabItem => {
                    writeln!(mmd, "    {} -->|tab| {}", source, dst)?;
                    writeln!(mmd, "    class {} tab;", dst)?;
                }
                EdgeKind::Link | EdgeKind::NavigationDestination => {
                    writeln!(mmd, "    {} -->|{}| {}", source, edge.kind.label(), dst)?;
                    writeln!(mmd, "    class {} nav;", dst)?;
                }
            }
        }
    }

    Ok(())
}
