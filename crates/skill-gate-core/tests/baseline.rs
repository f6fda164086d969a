// crates/skill-gate-core/tests/baseline.rs
// ============================================================================
// Module: Baseline Store Tests
// Description: Baseline persistence, comparison, and report output.
// ============================================================================
//! ## Overview
//! Drives the results directory through a create-then-compare cycle.

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
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use std::fs;

use common::BundleFixture;
use serde_json::Value;
use skill_gate_core::BaselineError;
use skill_gate_core::BaselinePolicy;
use skill_gate_core::BaselineRecord;
use skill_gate_core::BaselineStore;
use skill_gate_core::MetricStatus;
use skill_gate_core::TrackedMetric;
use skill_gate_core::collect_metrics;
use skill_gate_core::compare_metrics;
use skill_gate_core::render_comparison_report;
use skill_gate_core::runtime::BASELINE_FILE_NAME;
use time::macros::datetime;

#[test]
fn missing_baseline_loads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = BaselineStore::new(dir.path().join("results"));
    assert!(store.load().unwrap().is_none());
    assert!(!store.dir().exists());
}

#[test]
fn saved_baseline_round_trips_and_compares_clean() {
    let fixture = BundleFixture::healthy();
    let bundle = fixture.open();
    let metrics = collect_metrics(&bundle, datetime!(2026-10-19 08:00:00 UTC), "1.0").unwrap();
    let store = BaselineStore::new(bundle.results_dir());

    let path = store.save(&BaselineRecord::from(&metrics)).unwrap();
    assert!(path.ends_with(BASELINE_FILE_NAME));
    assert!(fs::read_to_string(&path).unwrap().ends_with("}\n"));

    let loaded = store.load().unwrap().unwrap();
    assert_eq!(loaded.skill_md_lines, Some(metrics.skill_md_lines));
    assert_eq!(loaded.bundle_digest.as_deref(), Some(metrics.bundle_digest.as_str()));

    let comparison = compare_metrics(&metrics, &loaded, &BaselinePolicy::default());
    assert!(comparison.all_passed());
    assert!(comparison.metrics.iter().all(|metric| metric.delta == 0));
}

#[test]
fn growth_and_rule_loss_fail_comparison() {
    let fixture = BundleFixture::healthy();
    let bundle = fixture.open();
    let before = collect_metrics(&bundle, datetime!(2026-10-19 08:00:00 UTC), "1.0").unwrap();
    let baseline = BaselineRecord::from(&before);

    fixture.write("SKILL.md", &format!("{}{}", common::HEALTHY_SKILL_MD, "extra\n".repeat(20)));
    fixture.remove("rules/scaffold/scaffold-generate-code.md");
    let after = collect_metrics(&bundle, datetime!(2026-10-19 09:00:00 UTC), "1.0").unwrap();

    let comparison = compare_metrics(&after, &baseline, &BaselinePolicy::default());
    let failed: Vec<TrackedMetric> = comparison.failed().iter().map(|m| m.metric).collect();
    assert_eq!(failed, vec![TrackedMetric::SkillMdLines, TrackedMetric::RuleFileCount]);
    assert_eq!(comparison.metrics[0].delta, 20);
    assert_eq!(comparison.metrics[1].delta, -1);
    assert_ne!(after.bundle_digest, before.bundle_digest);
}

#[test]
fn legacy_baseline_fields_are_accepted() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join(BASELINE_FILE_NAME),
        r#"{"skill_md_lines": 120, "created_at": "2025-01-01T00:00:00", "notes": "x"}"#,
    )
    .unwrap();
    let record = BaselineStore::new(dir.path()).load().unwrap().unwrap();
    assert_eq!(record.skill_md_lines, Some(120));
    assert_eq!(record.rule_file_count, None);
    assert_eq!(record.timestamp.as_deref(), Some("2025-01-01T00:00:00"));
}

#[test]
fn corrupt_or_oversized_baseline_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(BASELINE_FILE_NAME), "{not json").unwrap();
    let err = BaselineStore::new(dir.path()).load().unwrap_err();
    assert!(matches!(err, BaselineError::Parse { .. }));

    fs::write(dir.path().join(BASELINE_FILE_NAME), r#"{"skill_md_lines": 1}"#).unwrap();
    let err = BaselineStore::new(dir.path()).with_max_bytes(4).load().unwrap_err();
    assert!(matches!(err, BaselineError::Parse { .. }));
}

#[test]
fn current_metrics_and_report_are_written_to_results() {
    let fixture = BundleFixture::healthy();
    let bundle = fixture.open();
    let metrics = collect_metrics(&bundle, datetime!(2026-10-19 08:05:09 UTC), "1.0").unwrap();
    let store = BaselineStore::new(bundle.results_dir());
    let baseline = BaselineRecord {
        skill_md_lines: Some(1),
        ..BaselineRecord::default()
    };

    let current = store.save_current(&metrics).unwrap();
    let written: Value = serde_json::from_str(&fs::read_to_string(current).unwrap()).unwrap();
    assert_eq!(written["timestamp"], "2026-10-19T08:05:09Z");
    assert_eq!(written["version"], "1.0");

    let comparison = compare_metrics(&metrics, &baseline, &BaselinePolicy::default());
    assert_eq!(comparison.metrics[0].status, MetricStatus::Fail);
    let report =
        render_comparison_report(&comparison, "Demo Report", datetime!(2026-10-19 08:05:09 UTC));
    let path = store.save_report(&report).unwrap();
    let saved = fs::read_to_string(path).unwrap();
    assert!(saved.starts_with("# Demo Report\n"));
    assert!(saved.contains("| rule_file_count | N/A |"));
    assert!(saved.contains("| skill_md_lines | 1 |"));
    assert!(saved.contains("- ❌ Some metrics outside acceptable range"));
    assert!(saved.ends_with("Review changes before merging."));
}
