// crates/skill-gate-core/src/runtime/suites/regression.rs
// ============================================================================
// Module: Regression Suite
// Description: Baseline regression checks inside the check catalog.
// Purpose: Surface baseline comparison verdicts alongside structural checks.
// Dependencies: crate::core, crate::runtime::baseline
// ============================================================================

//! ## Overview
//! Uses the same per-metric evaluation as the comparison report. A missing
//! skill file measures as one line. Without a baseline both checks skip.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::document::line_count;
use crate::core::metrics::to_u64;
use crate::runtime::baseline::MetricComparison;
use crate::runtime::baseline::TrackedMetric;
use crate::runtime::baseline::evaluate_metric;
use crate::runtime::checks::CheckId;
use crate::runtime::checks::CheckOutcome;
use crate::runtime::checks::Finding;
use crate::runtime::suites::CheckContext;

// ============================================================================
// SECTION: Evaluation
// ============================================================================

/// Evaluates the regression suite.
pub(super) fn evaluate(context: &CheckContext<'_>) -> Vec<CheckOutcome> {
    let Some(baseline) = context.baseline else {
        return [CheckId::RegressionSkillMdLines, CheckId::RegressionRuleFileCount]
            .into_iter()
            .map(|id| CheckOutcome::skipped(id, "no baseline found"))
            .collect();
    };
    let growth = context.policy.baseline.max_line_growth_percent;
    let skill_lines = to_u64(
        context.skill_md.as_ref().map_or_else(|| line_count(""), |document| document.line_count()),
    );
    let rule_count = to_u64(context.rules.len());

    [
        (CheckId::RegressionSkillMdLines, TrackedMetric::SkillMdLines, skill_lines),
        (CheckId::RegressionRuleFileCount, TrackedMetric::RuleFileCount, rule_count),
    ]
    .into_iter()
    .map(|(id, metric, current)| {
        let comparison = evaluate_metric(metric, current, baseline.value(metric), growth);
        CheckOutcome::from_findings(id, findings(&comparison, growth))
    })
    .collect()
}

/// Describes a failed comparison.
fn findings(comparison: &MetricComparison, growth: u32) -> Vec<Finding> {
    if comparison.status.is_pass() {
        return Vec::new();
    }
    let baseline = comparison.baseline.unwrap_or_default();
    let message = match comparison.metric {
        TrackedMetric::SkillMdLines => format!(
            "increased from {baseline} to {} lines (more than {growth}%)",
            comparison.current
        ),
        TrackedMetric::RuleFileCount => {
            format!("decreased from {baseline} to {}", comparison.current)
        }
    };
    vec![Finding::new(comparison.metric.as_str(), message)]
}
