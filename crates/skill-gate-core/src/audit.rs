// crates/skill-gate-core/src/audit.rs
// ============================================================================
// Module: Skill Gate Audit Logging
// Description: Structured audit events for check runs and baseline updates.
// Purpose: Emit JSON-lines run records without a logging framework dependency.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Every gate run emits one structured event: a check run summary, a
//! baseline write, or a baseline comparison. Events serialize as one JSON
//! object per line with an `event` tag and a millisecond timestamp. Sinks
//! never fail the run; a write error drops the event.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::runtime::baseline::Comparison;
use crate::runtime::baseline::MetricStatus;
use crate::runtime::baseline::TrackedMetric;
use crate::runtime::checks::CheckReport;
use crate::runtime::checks::CheckSuite;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Why a baseline was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BaselineSaveReason {
    /// Explicitly requested by the caller.
    Requested,
    /// Created because no baseline existed.
    Missing,
}

/// Per-metric status recorded in comparison events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricAuditEntry {
    /// Compared metric.
    pub metric: TrackedMetric,
    /// Comparison outcome.
    pub status: MetricStatus,
}

/// Audit event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AuditEvent {
    /// Check catalog run summary.
    CheckRun {
        /// Event timestamp (milliseconds since epoch).
        timestamp_ms: u128,
        /// Bundle name.
        bundle: String,
        /// Evaluated suites.
        suites: Vec<CheckSuite>,
        /// Passing checks.
        passed: usize,
        /// Failing checks.
        failed: usize,
        /// Skipped checks.
        skipped: usize,
    },
    /// Baseline file written.
    BaselineSaved {
        /// Event timestamp (milliseconds since epoch).
        timestamp_ms: u128,
        /// Bundle name.
        bundle: String,
        /// Baseline file path.
        path: String,
        /// Why the baseline was written.
        reason: BaselineSaveReason,
    },
    /// Current metrics compared with the baseline.
    BaselineCompared {
        /// Event timestamp (milliseconds since epoch).
        timestamp_ms: u128,
        /// Bundle name.
        bundle: String,
        /// True when every metric is within tolerance.
        passed: bool,
        /// Per-metric outcomes.
        metrics: Vec<MetricAuditEntry>,
    },
}

impl AuditEvent {
    /// Builds a check run event from a report.
    #[must_use]
    pub fn check_run(report: &CheckReport) -> Self {
        Self::CheckRun {
            timestamp_ms: now_ms(),
            bundle: report.bundle.clone(),
            suites: report.suites.clone(),
            passed: report.passed,
            failed: report.failed,
            skipped: report.skipped,
        }
    }

    /// Builds a baseline write event.
    #[must_use]
    pub fn baseline_saved(bundle: &str, path: &Path, reason: BaselineSaveReason) -> Self {
        Self::BaselineSaved {
            timestamp_ms: now_ms(),
            bundle: bundle.to_string(),
            path: path.display().to_string(),
            reason,
        }
    }

    /// Builds a comparison event.
    #[must_use]
    pub fn baseline_compared(bundle: &str, comparison: &Comparison) -> Self {
        Self::BaselineCompared {
            timestamp_ms: now_ms(),
            bundle: bundle.to_string(),
            passed: comparison.all_passed(),
            metrics: comparison
                .metrics
                .iter()
                .map(|metric| MetricAuditEntry {
                    metric: metric.metric,
                    status: metric.status,
                })
                .collect(),
        }
    }
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Destination for audit events.
pub trait AuditSink: Send + Sync {
    /// Records one event.
    fn record(&self, event: &AuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl AuditSink for StderrAuditSink {
    fn record(&self, event: &AuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that appends JSON lines to a file.
pub struct FileAuditSink {
    /// Open log file.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens (or creates) the log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl AuditSink for FileAuditSink {
    fn record(&self, event: &AuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _event: &AuditEvent) {}
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns milliseconds since the Unix epoch.
fn now_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only assertions are permitted."
    )]

    use std::fs;

    use serde_json::Value;

    use super::AuditEvent;
    use super::AuditSink;
    use super::BaselineSaveReason;
    use super::FileAuditSink;

    #[test]
    fn file_sink_appends_tagged_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let sink = FileAuditSink::new(&path).unwrap();
        sink.record(&AuditEvent::baseline_saved(
            "demo",
            &dir.path().join("baseline.json"),
            BaselineSaveReason::Missing,
        ));
        sink.record(&AuditEvent::baseline_saved(
            "demo",
            &dir.path().join("baseline.json"),
            BaselineSaveReason::Requested,
        ));

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<Value> =
            content.lines().map(|line| serde_json::from_str(line).unwrap()).collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["event"], "baseline_saved");
        assert_eq!(lines[0]["reason"], "missing");
        assert_eq!(lines[1]["reason"], "requested");
        assert!(lines[0]["timestamp_ms"].is_u64());
    }
}
