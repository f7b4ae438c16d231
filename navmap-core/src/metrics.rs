//! Performance test summarizer for xcresult JSON exports.
//!
//! Walks the deeply nested document Xcode produces (`xcrun xcresulttool get
//! --format json`), buckets every measurement by metric class, and renders a
//! markdown summary with aggregate statistics and a letter grade.
//!
//! The walk is tolerant by construction: any missing or misshapen key yields
//! an empty bucket, never an error. Only reading or parsing the input file
//! itself can fail, and that happens in the caller.

use std::fmt::Write;

use serde_json::Value;

/// Measurements bucketed by metric class, unit-converted at ingest.
#[derive(Debug, Clone, Default)]
pub struct MetricsBundle {
    /// App launch times in milliseconds
    pub launch_time: Vec<f64>,
    /// Memory footprint in megabytes
    pub memory_usage: Vec<f64>,
    /// CPU load as a percentage
    pub cpu_usage: Vec<f64>,
    /// Disk write volume in megabytes
    pub disk_writes: Vec<f64>,
    /// Operation durations in milliseconds
    pub response_time: Vec<f64>,
}

impl MetricsBundle {
    /// Route one raw measurement into its bucket, converting units.
    ///
    /// The identifier is matched by substring, first hit wins. Launch times
    /// arrive in ms already; memory and disk arrive in bytes; CPU arrives as
    /// a 0..1 fraction; durations arrive in seconds. Unrecognized
    /// identifiers are dropped.
    fn classify(&mut self, identifier: &str, value: f64) {
        if identifier.contains("launch") {
            self.launch_time.push(value);
        } else if identifier.contains("memory") {
            self.memory_usage.push(value / 1024.0 / 1024.0);
        } else if identifier.contains("cpu") {
            self.cpu_usage.push(value * 100.0);
        } else if identifier.contains("disk") {
            self.disk_writes.push(value / 1024.0 / 1024.0);
        } else if identifier.contains("duration") {
            self.response_time.push(value * 1000.0);
        }
    }

    /// Total number of classified measurements.
    pub fn sample_count(&self) -> usize {
        self.launch_time.len()
            + self.memory_usage.len()
            + self.cpu_usage.len()
            + self.disk_writes.len()
            + self.response_time.len()
    }

    /// True when no measurement was classified.
    pub fn is_empty(&self) -> bool {
        self.sample_count() == 0
    }
}

/// Iterate an xcresult array node.
///
/// The xcresult encoding wraps every array in `{"_values": [...]}`; a
/// missing or non-array node iterates as empty.
fn values_of<'a>(node: Option<&'a Value>) -> impl Iterator<Item = &'a Value> {
    node.and_then(|n| n.get("_values"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
}

/// Pull one measurement value out of its wrapper object.
///
/// xcresult emits `_value` either as a JSON number or as a stringified
/// number depending on the exporting Xcode version; anything else counts
/// as zero.
fn measurement_value(measurement: &Value) -> f64 {
    let raw = measurement.get("_value");
    raw.and_then(Value::as_f64)
        .or_else(|| raw.and_then(Value::as_str).and_then(|s| s.parse().ok()))
        .unwrap_or(0.0)
}

/// Extract every performance measurement from a parsed xcresult document.
///
/// Follows the path `actions._values[].actionResult.testsRef._values[]
/// .subtests._values[].performanceMetrics._values[]` and buckets each
/// measurement by its metric identifier.
pub fn extract_metrics(data: &Value) -> MetricsBundle {
    let mut bundle = MetricsBundle::default();

    for action in values_of(data.get("actions")) {
        if let Some(result) = action.get("actionResult") {
            collect_action_result(result, &mut bundle);
        }
    }

    bundle
}

fn collect_action_result(result: &Value, bundle: &mut MetricsBundle) {
    for test in values_of(result.get("testsRef")) {
        for subtest in values_of(test.get("subtests")) {
            collect_performance_test(subtest, bundle);
        }
    }
}

fn collect_performance_test(test: &Value, bundle: &mut MetricsBundle) {
    for metric in values_of(test.get("performanceMetrics")) {
        let identifier = metric
            .get("identifier")
            .and_then(|id| id.get("_value"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_ascii_lowercase();

        for measurement in values_of(metric.get("measurements")) {
            bundle.classify(&identifier, measurement_value(measurement));
        }
    }
}

// ============================================================================
// Statistics
// ============================================================================

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn min_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

fn max_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

/// Sample standard deviation (n - 1 denominator); zero below two samples.
fn sample_stdev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

/// P50/P90/P99 by rank selection: `sorted[floor(n * q)]`, clamped to the
/// last element.
fn percentiles(values: &[f64]) -> (f64, f64, f64) {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    (
        pick(&sorted, 0.5),
        pick(&sorted, 0.9),
        pick(&sorted, 0.99),
    )
}

fn pick(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = (sorted.len() as f64 * q) as usize;
    sorted[idx.min(sorted.len() - 1)]
}

// ============================================================================
// Grading
// ============================================================================

/// Score the run and map it to a letter grade.
///
/// Starts at 100 and deducts per threshold: mean launch over 1000ms costs
/// 20, peak memory over 200MB costs 15, mean CPU over 50% costs 15, P90
/// response over 100ms costs 10. Empty buckets deduct nothing.
pub fn performance_grade(bundle: &MetricsBundle) -> &'static str {
    let mut score: i32 = 100;

    if !bundle.launch_time.is_empty() && mean(&bundle.launch_time) > 1000.0 {
        score -= 20;
    }
    if !bundle.memory_usage.is_empty() && max_of(&bundle.memory_usage) > 200.0 {
        score -= 15;
    }
    if !bundle.cpu_usage.is_empty() && mean(&bundle.cpu_usage) > 50.0 {
        score -= 15;
    }
    if !bundle.response_time.is_empty() {
        let (_, p90, _) = percentiles(&bundle.response_time);
        if p90 > 100.0 {
            score -= 10;
        }
    }

    match score {
        s if s >= 90 => "A ✅",
        s if s >= 80 => "B 👍",
        s if s >= 70 => "C ⚠️",
        s if s >= 60 => "D 🚨",
        _ => "F ❌",
    }
}

/// Improvement suggestions for every threshold the run blew through.
fn recommendations(bundle: &MetricsBundle) -> Vec<&'static str> {
    let mut recs = Vec::new();

    if !bundle.launch_time.is_empty() && mean(&bundle.launch_time) > 1000.0 {
        recs.push("⚡ Optimize app launch time - consider lazy loading and reducing initial work");
    }
    if !bundle.memory_usage.is_empty() && max_of(&bundle.memory_usage) > 200.0 {
        recs.push("💾 High memory usage detected - review image caching and data structures");
    }
    if !bundle.cpu_usage.is_empty() && mean(&bundle.cpu_usage) > 50.0 {
        recs.push("🔥 High CPU usage - profile and optimize compute-intensive operations");
    }
    if !bundle.response_time.is_empty() {
        let (_, p90, _) = percentiles(&bundle.response_time);
        if p90 > 100.0 {
            recs.push(
                "⏱️ Slow response times - consider optimizing database queries and network calls",
            );
        }
    }

    recs
}

// ============================================================================
// Rendering
// ============================================================================

/// Render the markdown summary for a bundle of measurements.
///
/// Sections appear only for non-empty buckets; the grade heading is always
/// present. An empty bundle therefore grades A with a bare summary.
pub fn generate_metrics_report(bundle: &MetricsBundle) -> String {
    let mut out = String::with_capacity(640);
    if let Err(e) = write_metrics_content(bundle, &mut out) {
        eprintln!("[ERROR] Failed to generate metrics report: {}", e);
        return String::from("# Performance Test Results\n");
    }
    out
}

/// Parse an xcresult document and render its markdown summary in one step.
pub fn summarize_performance(data: &Value) -> String {
    generate_metrics_report(&extract_metrics(data))
}

fn write_metrics_content(bundle: &MetricsBundle, out: &mut String) -> std::fmt::Result {
    writeln!(out, "# Performance Test Results")?;
    writeln!(out)?;
    writeln!(out, "## Summary")?;
    writeln!(out)?;

    if !bundle.launch_time.is_empty() {
        writeln!(
            out,
            "- **Average Launch Time**: {:.2}ms",
            mean(&bundle.launch_time)
        )?;
        writeln!(out, "  - Min: {:.2}ms", min_of(&bundle.launch_time))?;
        writeln!(out, "  - Max: {:.2}ms", max_of(&bundle.launch_time))?;
        writeln!(out, "  - Std Dev: {:.2}ms", sample_stdev(&bundle.launch_time))?;
        writeln!(out)?;
    }

    if !bundle.memory_usage.is_empty() {
        writeln!(
            out,
            "- **Average Memory Usage**: {:.1}MB",
            mean(&bundle.memory_usage)
        )?;
        writeln!(out, "  - Peak: {:.1}MB", max_of(&bundle.memory_usage))?;
        writeln!(out)?;
    }

    if !bundle.cpu_usage.is_empty() {
        writeln!(
            out,
            "- **Average CPU Usage**: {:.1}%",
            mean(&bundle.cpu_usage)
        )?;
        writeln!(out, "  - Peak: {:.1}%", max_of(&bundle.cpu_usage))?;
        writeln!(out)?;
    }

    if !bundle.response_time.is_empty() {
        let (p50, p90, p99) = percentiles(&bundle.response_time);
        writeln!(out, "- **Response Time**:")?;
        writeln!(out, "  - P50: {:.2}ms", p50)?;
        writeln!(out, "  - P90: {:.2}ms", p90)?;
        writeln!(out, "  - P99: {:.2}ms", p99)?;
        writeln!(out)?;
    }

    writeln!(
        out,
        "## Overall Performance Grade: {}",
        performance_grade(bundle)
    )?;
    writeln!(out)?;

    let recs = recommendations(bundle);
    if !recs.is_empty() {
        writeln!(out, "## Recommendations")?;
        writeln!(out)?;
        for rec in recs {
            writeln!(out, "- {}", rec)?;
        }
    }

    Ok(())
}
