// crates/skill-gate-core/tests/proptest_comparator.rs
// ============================================================================
// Module: Comparator Property-Based Tests
// Description: Property tests for baseline metric evaluation.
// Purpose: Pin tolerance boundaries and delta arithmetic across wide ranges.
// ============================================================================

//! Property-based tests for metric comparison invariants.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use proptest::prelude::*;
use skill_gate_core::MetricStatus;
use skill_gate_core::TrackedMetric;
use skill_gate_core::evaluate_metric;

proptest! {
    #[test]
    fn line_growth_passes_exactly_up_to_tolerance(base in 0u64 .. 1_000_000, growth in 0u32 .. 200) {
        let limit = base * (100 + u64::from(growth)) / 100;
        let at_limit = evaluate_metric(TrackedMetric::SkillMdLines, limit, Some(base), growth);
        prop_assert_eq!(at_limit.status, MetricStatus::Pass);

        let over = evaluate_metric(TrackedMetric::SkillMdLines, limit + 1, Some(base), growth);
        prop_assert_eq!(over.status, MetricStatus::Fail);
    }

    #[test]
    fn line_shrink_always_passes(base in 0u64 .. u64::MAX, current in 0u64 .. u64::MAX) {
        prop_assume!(current <= base);
        let result = evaluate_metric(TrackedMetric::SkillMdLines, current, Some(base), 0);
        prop_assert_eq!(result.status, MetricStatus::Pass);
    }

    #[test]
    fn rule_count_fails_only_on_decrease(base in any::<u64>(), current in any::<u64>()) {
        let result = evaluate_metric(TrackedMetric::RuleFileCount, current, Some(base), 10);
        prop_assert_eq!(result.status.is_pass(), current >= base);
    }

    #[test]
    fn delta_matches_signed_difference(base in 0u64 .. 1 << 62, current in 0u64 .. 1 << 62) {
        let result = evaluate_metric(TrackedMetric::RuleFileCount, current, Some(base), 10);
        prop_assert_eq!(i128::from(result.delta), i128::from(current) - i128::from(base));
        prop_assert_eq!(result.baseline, Some(base));
    }

    #[test]
    fn missing_baseline_always_passes(current in any::<u64>(), growth in any::<u32>()) {
        for metric in TrackedMetric::ALL {
            let result = evaluate_metric(metric, current, None, growth);
            prop_assert_eq!(result.status, MetricStatus::Pass);
            prop_assert_eq!(result.delta, 0);
            prop_assert_eq!(result.baseline, None);
        }
    }
}

#[test]
fn default_tolerance_boundary_matches_ten_percent() {
    let pass = evaluate_metric(TrackedMetric::SkillMdLines, 110, Some(100), 10);
    let fail = evaluate_metric(TrackedMetric::SkillMdLines, 111, Some(100), 10);
    assert_eq!(pass.status, MetricStatus::Pass);
    assert_eq!(fail.status, MetricStatus::Fail);
    assert_eq!(fail.delta, 11);
}
