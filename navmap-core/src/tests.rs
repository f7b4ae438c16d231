//! End-to-end test suite for navmap-core.

use crate::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

fn write_file(file: &Path, content: &str) {
    fs::create_dir_all(file.parent().unwrap()).unwrap();
    fs::write(file, content).unwrap();
}

fn setup_temp_project() -> PathBuf {
    let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir()
        .join("navmap_tests")
        .join(format!("{}_{}", timestamp, id));

    if dir.exists() {
        fs::remove_dir_all(&dir).ok();
    }
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// A small but complete SwiftUI app: a tab root, a pushed detail flow, a
/// sheet, a full-screen cover, a declarative destination, one helper file
/// with no views, and one view nothing links to.
fn write_sample_app(root: &Path) {
    write_file(
        &root.join("AppRootView.swift"),
        r#"
struct AppRootView: View {
    var body: some View {
        TabView {
            HomeView()
                .tabItem { Label("Home", systemImage: "house") }
            ProfileView()
                .tabItem { Label("Profile", systemImage: "person") }
        }
    }
}
"#,
    );
    write_file(
        &root.join("HomeView.swift"),
        r#"
struct HomeView: View {
    @State private var showAddItem = false

    var body: some View {
        NavigationStack {
            List(items) { item in
                NavigationLink(destination: ItemDetailView()) {
                    ItemRow(item: item)
                }
            }
            .sheet(isPresented: $showAddItem) {
                AddItemView()
            }
        }
    }
}
"#,
    );
    write_file(
        &root.join("ProfileView.swift"),
        r#"
struct ProfileView: View {
    @State private var showOnboarding = false

    var body: some View {
        VStack {
            SettingsRow()
        }
        .fullScreenCover(isPresented: $showOnboarding) {
            OnboardingView()
        }
    }
}
"#,
    );
    write_file(
        &root.join("ItemDetailView.swift"),
        r#"
struct ItemDetailView: View {
    var body: some View {
        Text(item.name)
            .navigationDestination(isPresented: $showEdit) {
                EditItemView()
            }
    }
}
"#,
    );
    write_file(
        &root.join("AddItemView.swift"),
        r#"
struct AddItemView: View {
    var body: some View {
        Form {
            TextField("Name", text: $name)
        }
    }
}
"#,
    );
    write_file(
        &root.join("Helpers.swift"),
        r#"
import Foundation

enum ItemFormatter {
    static func label(for count: Int) -> String {
        return "\(count) items"
    }
}
"#,
    );
    write_file(
        &root.join("UnusedView.swift"),
        r#"
struct UnusedView: View {
    var body: some View {
        Text("nothing links here")
    }
}
"#,
    );
}

// Core Test 1: one file with a sheet and a push link
#[test]
fn test_sheet_and_link_in_one_file() {
    let root = setup_temp_project();
    write_file(
        &root.join("A.swift"),
        r#"
struct A: View {
    var body: some View {
        VStack {
            Text("home")
                .sheet(isPresented: $show) { BView() }
            NavigationLink(destination: CView()) { Text("go") }
        }
    }
}
"#,
    );

    let result = Navmap::new(&root).analyze().unwrap();
    let edges = &result.graph.navigation()["A"];

    assert_eq!(edges.len(), 2);
    assert!(edges
        .iter()
        .any(|e| e.kind == EdgeKind::Sheet && e.destination == "BView"));
    assert!(edges
        .iter()
        .any(|e| e.kind == EdgeKind::Link && e.destination == "CView"));

    assert_eq!(result.analysis.stats.sheet_count, 1);
    assert_eq!(result.analysis.stats.link_count, 1);
    assert_eq!(result.analysis.roots, ["A"]);

    fs::remove_dir_all(&root).ok();
}

// Core Test 2: tab container membership, duplicates retained
#[test]
fn test_tab_members_with_duplicates() {
    let root = setup_temp_project();
    write_file(
        &root.join("Root.swift"),
        r#"
struct Root: View {
    var body: some View {
        TabView {
            XView()
                .tabItem { Label("X", systemImage: "1.circle") }
            YView()
                .tabItem { Label("Y", systemImage: "2.circle") }
            YView()
                .tabItem { Label("Y again", systemImage: "3.circle") }
        }
    }
}
"#,
    );

    let result = Navmap::new(&root).analyze().unwrap();
    let edges = &result.graph.navigation()["Root"];

    assert_eq!(edges.len(), 3, "duplicate tab members must be kept");
    assert!(edges.iter().all(|e| e.kind == EdgeKind::TabItem));
    let destinations: Vec<&str> = edges.iter().map(|e| e.destination.as_str()).collect();
    assert_eq!(destinations, ["XView", "YView", "YView"]);

    fs::remove_dir_all(&root).ok();
}

// Core Test 3: an unreadable file does not abort the run
#[test]
fn test_unreadable_file_among_five() {
    let root = setup_temp_project();
    write_file(
        &root.join("AView.swift"),
        "struct AView: View {\n    var body: some View {\n        NavigationLink(destination: BView()) { Text(\"b\") }\n    }\n}\n",
    );
    write_file(&root.join("BView.swift"), "struct BView: View {\n}\n");
    write_file(
        &root.join("CView.swift"),
        "struct CView: View {\n    var body: some View {\n        Text(\"c\").sheet(isPresented: $s) { DView() }\n    }\n}\n",
    );
    write_file(&root.join("DView.swift"), "struct DView: View {\n}\n");
    // Invalid UTF-8: read_to_string fails, the file becomes a diagnostic.
    fs::write(root.join("Corrupt.swift"), [0xFFu8, 0xFE, 0x80, 0x00]).unwrap();

    let result = Navmap::new(&root).analyze().unwrap();

    assert_eq!(result.graph.files_scanned(), 4);
    assert_eq!(result.graph.skipped().len(), 1);
    assert!(result.graph.skipped()[0].path.ends_with("Corrupt.swift"));
    assert_eq!(result.graph.view_count(), 4);
    assert_eq!(result.graph.edge_count(), 2);
    assert_eq!(result.analysis.stats.files_skipped, 1);

    // The run still produces every artifact.
    let out_dir = root.join("navigation_analysis");
    let written = result.write_artifacts(&out_dir).unwrap();
    assert!(written.len() >= 3);
    assert!(out_dir.join(DATA_FILE).exists());
    assert!(out_dir.join(DOT_FILE).exists());
    assert!(out_dir.join(REPORT_FILE).exists());

    fs::remove_dir_all(&root).ok();
}

// Core Test 4: pattern-free files contribute nothing
#[test]
fn test_pattern_free_file_produces_nothing() {
    let root = setup_temp_project();
    write_file(
        &root.join("PriceFormatter.swift"),
        r#"
import Foundation

enum PriceFormatter {
    static func format(_ value: Decimal) -> String {
        return "\(value)"
    }
}
"#,
    );

    let result = Navmap::new(&root).analyze().unwrap();

    assert_eq!(result.graph.files_scanned(), 1);
    assert!(result.graph.is_empty());
    assert!(!result.has_navigation());
    assert_eq!(result.analysis.stats.edge_count, 0);

    fs::remove_dir_all(&root).ok();
}

// ============================================================================
// FULL-APP PIPELINE TESTS
// ============================================================================

#[test]
fn test_sample_app_statistics() {
    let root = setup_temp_project();
    write_sample_app(&root);

    let result = Navmap::new(&root).analyze().unwrap();
    let stats = &result.analysis.stats;

    assert_eq!(stats.files_scanned, 7);
    assert_eq!(stats.view_count, 6);
    assert_eq!(stats.edge_count, 6);
    assert_eq!(stats.link_count, 1);
    assert_eq!(stats.sheet_count, 1);
    assert_eq!(stats.fullscreen_count, 1);
    assert_eq!(stats.destination_count, 1);
    assert_eq!(stats.tab_count, 2);

    fs::remove_dir_all(&root).ok();
}

#[test]
fn test_per_kind_counts_sum_to_total() {
    let root = setup_temp_project();
    write_sample_app(&root);

    let result = Navmap::new(&root).analyze().unwrap();
    let stats = &result.analysis.stats;

    let summed: usize = stats.per_kind().iter().map(|(_, count)| count).sum();
    assert_eq!(summed, stats.edge_count);
    assert_eq!(summed, result.graph.edge_count());

    fs::remove_dir_all(&root).ok();
}

#[test]
fn test_sample_app_roots_and_orphans() {
    let root = setup_temp_project();
    write_sample_app(&root);

    let result = Navmap::new(&root).analyze().unwrap();

    // Only the tab root is never a destination; the unused view is
    // declared but unreachable from it.
    assert_eq!(result.analysis.roots, ["AppRootView"]);
    assert_eq!(result.analysis.orphans, ["UnusedView"]);

    fs::remove_dir_all(&root).ok();
}

#[test]
fn test_sample_app_ranking_order() {
    let root = setup_temp_project();
    write_sample_app(&root);

    let result = Navmap::new(&root).analyze().unwrap();
    let ranking = &result.analysis.ranking;

    // AppRootView and HomeView tie at two edges; AppRootView.swift is
    // scanned first so it ranks first.
    assert_eq!(ranking[0], ("AppRootView".to_string(), 2));
    assert_eq!(ranking[1], ("HomeView".to_string(), 2));
    assert_eq!(ranking.len(), 4);

    fs::remove_dir_all(&root).ok();
}

#[test]
fn test_structured_dump_is_idempotent() {
    let root = setup_temp_project();
    write_sample_app(&root);

    let first = Navmap::new(&root).analyze().unwrap().data_json().unwrap();
    let second = Navmap::new(&root).analyze().unwrap().data_json().unwrap();

    assert_eq!(first, second, "dump must be byte-identical across runs");

    fs::remove_dir_all(&root).ok();
}

#[test]
fn test_sample_app_artifacts_cover_graph() {
    let root = setup_temp_project();
    write_sample_app(&root);

    let result = Navmap::new(&root).analyze().unwrap();
    let out_dir = root.join("navigation_analysis");
    result.write_artifacts(&out_dir).unwrap();

    let dot = fs::read_to_string(out_dir.join(DOT_FILE)).unwrap();
    assert!(dot.starts_with("digraph NavigationFlow {"));
    assert!(dot.contains("\"HomeView\" -> \"ItemDetailView\" [label=\"nav\", color=blue];"));
    assert!(dot.contains("\"AppRootView\" -> \"HomeView\" [label=\"tab\", style=dotted, color=purple];"));

    #[cfg(feature = "mermaid")]
    {
        let mmd = fs::read_to_string(out_dir.join(MERMAID_FILE)).unwrap();
        assert!(mmd.starts_with("graph TD\n"));
        assert!(mmd.contains("    HomeView -.->|sheet| AddItemView"));
        assert!(mmd.contains("    ProfileView ==>|fullscreen| OnboardingView"));
    }

    let report = fs::read_to_string(out_dir.join(REPORT_FILE)).unwrap();
    assert!(report.contains("Total Swift files analyzed: 7"));
    assert!(report.contains("Total views found: 6"));
    assert!(report.contains("Total navigation connections: 6"));
    assert!(report.contains("  - AppRootView: 2 connections"));
    assert!(report.contains("  - UnusedView"));

    let data: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out_dir.join(DATA_FILE)).unwrap()).unwrap();
    assert_eq!(data["views"].as_object().unwrap().len(), 6);
    assert_eq!(data["navigation"]["AppRootView"].as_array().unwrap().len(), 2);
    assert_eq!(
        data["navigation"]["HomeView"][0]["type"].as_str(),
        Some("nav")
    );
    assert_eq!(
        data["navigation"]["HomeView"][0]["destination"].as_str(),
        Some("ItemDetailView")
    );

    fs::remove_dir_all(&root).ok();
}

// ============================================================================
// ORDERING AND DETERMINISM
// ============================================================================

#[test]
fn test_ranking_tie_breaks_by_scan_order() {
    let root = setup_temp_project();
    // GammaView has three edges; AlphaView and BetaView tie at two.
    // Write order is deliberately shuffled: scan order is sorted paths.
    write_file(
        &root.join("GammaView.swift"),
        "struct GammaView: View {\n    var body: some View {\n        NavigationLink(destination: P1View()) { Text(\"1\") }\n        NavigationLink(destination: P2View()) { Text(\"2\") }\n        NavigationLink(destination: P3View()) { Text(\"3\") }\n    }\n}\n",
    );
    write_file(
        &root.join("BetaView.swift"),
        "struct BetaView: View {\n    var body: some View {\n        NavigationLink(destination: Q1View()) { Text(\"1\") }\n        NavigationLink(destination: Q2View()) { Text(\"2\") }\n    }\n}\n",
    );
    write_file(
        &root.join("AlphaView.swift"),
        "struct AlphaView: View {\n    var body: some View {\n        NavigationLink(destination: R1View()) { Text(\"1\") }\n        NavigationLink(destination: R2View()) { Text(\"2\") }\n    }\n}\n",
    );

    let result = Navmap::new(&root).analyze().unwrap();
    let ranking = &result.analysis.ranking;

    assert_eq!(ranking[0], ("GammaView".to_string(), 3));
    assert_eq!(ranking[1], ("AlphaView".to_string(), 2));
    assert_eq!(ranking[2], ("BetaView".to_string(), 2));

    fs::remove_dir_all(&root).ok();
}

#[test]
fn test_roots_exclude_referenced_sources() {
    let root = setup_temp_project();
    write_file(
        &root.join("AView.swift"),
        "struct AView: View {\n    var body: some View {\n        NavigationLink(destination: BView()) { Text(\"b\") }\n    }\n}\n",
    );
    write_file(
        &root.join("BView.swift"),
        "struct BView: View {\n    var body: some View {\n        NavigationLink(destination: CView()) { Text(\"c\") }\n    }\n}\n",
    );

    let result = Navmap::new(&root).analyze().unwrap();

    // BView initiates an edge but is itself AView's destination, so only
    // AView qualifies as a root.
    assert_eq!(result.analysis.roots, ["AView"]);

    fs::remove_dir_all(&root).ok();
}

// ============================================================================
// ROBUSTNESS
// ============================================================================

#[test]
fn test_unicode_content() {
    let root = setup_temp_project();
    write_file(
        &root.join("GreetingView.swift"),
        r#"
// ナビゲーションのテスト 🎉
struct GreetingView: View {
    var body: some View {
        Text("こんにちは 世界")
            .sheet(isPresented: $показ) {
                DetailsView()
            }
    }
}
"#,
    );

    let result = Navmap::new(&root).analyze().unwrap();

    assert_eq!(result.graph.views()["GreetingView.swift"], ["GreetingView"]);
    assert_eq!(
        result.graph.navigation()["GreetingView"][0].destination,
        "DetailsView"
    );

    fs::remove_dir_all(&root).ok();
}

#[test]
fn test_empty_and_whitespace_files() {
    let root = setup_temp_project();
    write_file(&root.join("Empty.swift"), "");
    write_file(&root.join("Blank.swift"), "   \n\n\t\t\n   ");

    let result = Navmap::new(&root).analyze().unwrap();

    assert_eq!(result.graph.files_scanned(), 2);
    assert!(result.graph.is_empty());
    assert!(result.graph.skipped().is_empty());

    fs::remove_dir_all(&root).ok();
}

#[test]
fn test_nested_directories_and_shared_stems() {
    let root = setup_temp_project();
    // Same file name in two feature directories: both files' edges land
    // in the one ContentView bucket, scan order first.
    write_file(
        &root.join("FeatureA/ContentView.swift"),
        "struct ContentView: View {\n    var body: some View {\n        NavigationLink(destination: AlphaView()) { Text(\"a\") }\n    }\n}\n",
    );
    write_file(
        &root.join("FeatureB/ContentView.swift"),
        "struct ContentView: View {\n    var body: some View {\n        NavigationLink(destination: BetaView()) { Text(\"b\") }\n    }\n}\n",
    );

    let result = Navmap::new(&root).analyze().unwrap();
    let bucket = &result.graph.navigation()["ContentView"];

    assert_eq!(bucket.len(), 2);
    assert_eq!(bucket[0].destination, "AlphaView");
    assert_eq!(bucket[1].destination, "BetaView");
    // Last writer wins for the views map entry.
    assert_eq!(result.graph.views().len(), 1);

    fs::remove_dir_all(&root).ok();
}

// ============================================================================
// STRESS
// ============================================================================

#[test]
fn test_parallel_heavy_file_load() {
    let root = setup_temp_project();
    for i in 0..200u32 {
        write_file(
            &root.join(format!("Screen{}View.swift", i)),
            &format!(
                "struct Screen{i}View: View {{\n    var body: some View {{\n        NavigationLink(destination: Next{i}View()) {{ Text(\"n\") }}\n    }}\n}}\n"
            ),
        );
    }

    let result = Navmap::new(&root).analyze().unwrap();

    assert_eq!(result.graph.files_scanned(), 200);
    assert_eq!(result.graph.view_count(), 200);
    assert_eq!(result.graph.edge_count(), 200);
    assert_eq!(result.analysis.ranking.len(), 10, "ranking truncates to ten");
    assert!(result.analysis.ranking.iter().all(|(_, count)| *count == 1));

    fs::remove_dir_all(&root).ok();
}

#[test]
fn test_repeated_runs_are_deterministic() {
    let root = setup_temp_project();
    for i in 0..50u32 {
        write_file(
            &root.join(format!("Flow{}View.swift", i)),
            &format!(
                "struct Flow{i}View: View {{\n    var body: some View {{\n        Text(\"x\").sheet(isPresented: $s) {{ Modal{i}View() }}\n    }}\n}}\n"
            ),
        );
    }

    let first = Navmap::new(&root).analyze().unwrap().data_json().unwrap();
    let second = Navmap::new(&root).analyze().unwrap().data_json().unwrap();
    let third = Navmap::new(&root).analyze().unwrap().data_json().unwrap();

    assert_eq!(first, second);
    assert_eq!(second, third);

    fs::remove_dir_all(&root).ok();
}
