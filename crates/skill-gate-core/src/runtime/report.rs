// crates/skill-gate-core/src/runtime/report.rs
// ============================================================================
// Module: Skill Gate Comparison Report
// Description: Markdown rendering of baseline comparisons.
// Purpose: Produce the reviewer-facing regression report.
// Dependencies: time
// ============================================================================

//! ## Overview
//! The comparison report is a short Markdown document: a title, the
//! generation date, a summary table with one row per tracked metric, a
//! regression verdict, and a merge recommendation. Rendering is pure; the
//! caller supplies the generation time.

// ============================================================================
// SECTION: Imports
// ============================================================================

use time::OffsetDateTime;

use crate::runtime::baseline::Comparison;
use crate::runtime::baseline::MetricComparison;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Summary table header row.
const TABLE_HEADER: &str = "| Metric | Baseline | Current | Delta | Status |";
/// Summary table separator row.
const TABLE_SEPARATOR: &str = "|--------|----------|---------|-------|--------|";
/// Placeholder for a metric missing from the baseline.
const MISSING_VALUE: &str = "N/A";

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders the Markdown comparison report.
#[must_use]
pub fn render_comparison_report(
    comparison: &Comparison,
    title: &str,
    generated_at: OffsetDateTime,
) -> String {
    let mut lines = vec![
        format!("# {title}\n"),
        format!("**Date:** {}\n", format_report_date(generated_at)),
        "\n## Summary\n".to_string(),
        TABLE_HEADER.to_string(),
        TABLE_SEPARATOR.to_string(),
    ];
    lines.extend(comparison.metrics.iter().map(summary_row));

    let passed = comparison.all_passed();
    lines.push("\n## Regression Check\n".to_string());
    lines.push(if passed {
        "- ✅ All metrics within acceptable range".to_string()
    } else {
        "- ❌ Some metrics outside acceptable range".to_string()
    });
    lines.push("\n## Recommendations\n".to_string());
    lines.push(if passed {
        "No issues detected. Safe to merge.".to_string()
    } else {
        "Review changes before merging.".to_string()
    });
    lines.join("\n")
}

/// Formats the report date as `YYYY-MM-DD HH:MM:SS`.
fn format_report_date(at: OffsetDateTime) -> String {
    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
        at.year(),
        u8::from(at.month()),
        at.day(),
        at.hour(),
        at.minute(),
        at.second()
    )
}

/// Renders one summary table row.
fn summary_row(comparison: &MetricComparison) -> String {
    let baseline =
        comparison.baseline.map_or_else(|| MISSING_VALUE.to_string(), |value| value.to_string());
    let delta = if comparison.delta > 0 {
        format!("+{}", comparison.delta)
    } else {
        comparison.delta.to_string()
    };
    format!(
        "| {} | {} | {} | {} | {} |",
        comparison.metric.as_str(),
        baseline,
        comparison.current,
        delta,
        comparison.status.symbol()
    )
}

// ============================================================================
// SECTION: Tests
// ============================================================================
