// crates/skill-gate-core/src/lib.rs
// ============================================================================
// Module: Skill Gate Core Library
// Description: Public API surface for the Skill Gate core.
// Purpose: Expose bundle types, check runtime, baseline comparison, and audit sinks.
// Dependencies: crate::{audit, core, runtime}
// ============================================================================

//! ## Overview
//! Skill Gate core inspects a skill documentation bundle (a `SKILL.md`, rule
//! files, YAML scenarios, and reference documents) and evaluates it against a
//! [`GatePolicy`]. It provides the structural check catalog, size metrics,
//! baseline comparison, and Markdown regression reports. It performs no
//! config-file parsing and writes nothing outside the bundle's results
//! directory.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod core;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;

pub use audit::AuditEvent;
pub use audit::AuditSink;
pub use audit::BaselineSaveReason;
pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use runtime::BaselineError;
pub use runtime::BaselineRecord;
pub use runtime::BaselineStore;
pub use runtime::CheckError;
pub use runtime::CheckId;
pub use runtime::CheckOutcome;
pub use runtime::CheckReport;
pub use runtime::CheckRunner;
pub use runtime::CheckStatus;
pub use runtime::CheckSuite;
pub use runtime::Comparison;
pub use runtime::Finding;
pub use runtime::MetricComparison;
pub use runtime::MetricStatus;
pub use runtime::TrackedMetric;
pub use runtime::compare_metrics;
pub use runtime::evaluate_metric;
pub use runtime::render_comparison_report;
