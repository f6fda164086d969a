// crates/skill-gate-core/src/runtime/mod.rs
// ============================================================================
// Module: Skill Gate Runtime
// Description: Check evaluation, baseline comparison, and report rendering.
// Purpose: Turn a loaded bundle and policy into verdicts and artifacts.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The runtime evaluates the check catalog against a bundle, compares
//! measured metrics with a stored baseline, and renders the comparison
//! report. Evaluation is synchronous and single-threaded.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod baseline;
pub mod checks;
pub mod report;
mod suites;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use baseline::BASELINE_FILE_NAME;
pub use baseline::BaselineError;
pub use baseline::BaselineRecord;
pub use baseline::BaselineStore;
pub use baseline::CURRENT_FILE_NAME;
pub use baseline::Comparison;
pub use baseline::MetricComparison;
pub use baseline::MetricStatus;
pub use baseline::REPORT_FILE_NAME;
pub use baseline::TrackedMetric;
pub use baseline::compare_metrics;
pub use baseline::evaluate_metric;
pub use checks::CheckError;
pub use checks::CheckId;
pub use checks::CheckOutcome;
pub use checks::CheckReport;
pub use checks::CheckRunner;
pub use checks::CheckStatus;
pub use checks::CheckSuite;
pub use checks::Finding;
pub use report::render_comparison_report;
