// crates/skill-gate-core/src/runtime/baseline.rs
// ============================================================================
// Module: Skill Gate Baseline
// Description: Baseline persistence and regression comparison.
// Purpose: Store size metrics between revisions and judge growth against them.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A baseline is the metrics snapshot of an accepted bundle revision, stored
//! as pretty JSON in the results directory. Comparisons are evaluated per
//! tracked metric in a fixed order:
//! - `skill_md_lines` may grow by at most the configured percentage;
//! - `rule_file_count` may not shrink.
//!
//! ## Invariants
//! - Growth is evaluated with integer arithmetic:
//!   `current * 100 <= baseline * (100 + percent)`.
//! - A metric missing from the baseline passes with a zero delta.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::bundle::BundleError;
use crate::core::bundle::DEFAULT_MAX_FILE_BYTES;
use crate::core::bundle::read_text_with_limit;
use crate::core::metrics::BundleMetrics;
use crate::core::policy::BaselinePolicy;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Baseline file name.
pub const BASELINE_FILE_NAME: &str = "baseline.json";
/// Current metrics file name.
pub const CURRENT_FILE_NAME: &str = "current.json";
/// Comparison report file name.
pub const REPORT_FILE_NAME: &str = "comparison_report.md";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while reading or writing results.
#[derive(Debug, Error)]
pub enum BaselineError {
    /// Filesystem error on a results path.
    #[error("results io error at {path}: {message}")]
    Io {
        /// Path that failed.
        path: String,
        /// Error detail.
        message: String,
    },
    /// Baseline file content is not a valid record.
    #[error("baseline parse error at {path}: {message}")]
    Parse {
        /// Path that failed.
        path: String,
        /// Error detail.
        message: String,
    },
    /// Record serialization failed.
    #[error("baseline serialization error: {0}")]
    Serialize(String),
}

// ============================================================================
// SECTION: Baseline Record
// ============================================================================

/// Stored baseline metrics. Every field is optional on load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaselineRecord {
    /// Skill file line count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_md_lines: Option<u64>,
    /// Number of non-template rule files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_file_count: Option<u64>,
    /// Mean rule file line count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_rule_lines: Option<f64>,
    /// Bundle digest at baseline time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle_digest: Option<String>,
    /// Creation timestamp.
    #[serde(default, alias = "created_at", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Record format version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl From<&BundleMetrics> for BaselineRecord {
    fn from(metrics: &BundleMetrics) -> Self {
        Self {
            skill_md_lines: Some(metrics.skill_md_lines),
            rule_file_count: Some(metrics.rule_file_count),
            avg_rule_lines: Some(metrics.avg_rule_lines),
            bundle_digest: Some(metrics.bundle_digest.clone()),
            timestamp: Some(metrics.timestamp.clone()),
            version: Some(metrics.version.clone()),
        }
    }
}

impl BaselineRecord {
    /// Returns the stored value of a tracked metric.
    #[must_use]
    pub const fn value(&self, metric: TrackedMetric) -> Option<u64> {
        match metric {
            TrackedMetric::SkillMdLines => self.skill_md_lines,
            TrackedMetric::RuleFileCount => self.rule_file_count,
        }
    }
}

// ============================================================================
// SECTION: Baseline Store
// ============================================================================

/// Results directory holding the baseline, current metrics, and report.
#[derive(Debug, Clone)]
pub struct BaselineStore {
    /// Results directory.
    dir: PathBuf,
    /// Maximum baseline file size.
    max_bytes: usize,
}

impl BaselineStore {
    /// Creates a store over `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            max_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }

    /// Sets the maximum baseline file size.
    #[must_use]
    pub const fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Returns the results directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the baseline file path.
    #[must_use]
    pub fn baseline_path(&self) -> PathBuf {
        self.dir.join(BASELINE_FILE_NAME)
    }

    /// Returns the current metrics file path.
    #[must_use]
    pub fn current_path(&self) -> PathBuf {
        self.dir.join(CURRENT_FILE_NAME)
    }

    /// Returns the report file path.
    #[must_use]
    pub fn report_path(&self) -> PathBuf {
        self.dir.join(REPORT_FILE_NAME)
    }

    /// Loads the baseline, `None` when no baseline file exists.
    ///
    /// # Errors
    ///
    /// Returns [`BaselineError`] when the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Option<BaselineRecord>, BaselineError> {
        let path = self.baseline_path();
        if !path.is_file() {
            return Ok(None);
        }
        let content = read_text_with_limit(&path, self.max_bytes).map_err(|err| match err {
            BundleError::Io {
                path,
                message,
            } => BaselineError::Io {
                path,
                message,
            },
            other => BaselineError::Parse {
                path: path.display().to_string(),
                message: other.to_string(),
            },
        })?;
        serde_json::from_str(&content).map(Some).map_err(|err| BaselineError::Parse {
            path: path.display().to_string(),
            message: err.to_string(),
        })
    }

    /// Writes the baseline record.
    ///
    /// # Errors
    ///
    /// Returns [`BaselineError`] when the record cannot be serialized or written.
    pub fn save(&self, record: &BaselineRecord) -> Result<PathBuf, BaselineError> {
        self.write_json(&self.baseline_path(), record)
    }

    /// Writes the current metrics record.
    ///
    /// # Errors
    ///
    /// Returns [`BaselineError`] when the record cannot be serialized or written.
    pub fn save_current(&self, metrics: &BundleMetrics) -> Result<PathBuf, BaselineError> {
        self.write_json(&self.current_path(), metrics)
    }

    /// Writes the comparison report.
    ///
    /// # Errors
    ///
    /// Returns [`BaselineError`] when the report cannot be written.
    pub fn save_report(&self, report: &str) -> Result<PathBuf, BaselineError> {
        let path = self.report_path();
        self.write_bytes(&path, report.as_bytes())?;
        Ok(path)
    }

    /// Serializes `value` as pretty JSON and writes it to `path`.
    fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<PathBuf, BaselineError> {
        let mut payload = serde_json::to_string_pretty(value)
            .map_err(|err| BaselineError::Serialize(err.to_string()))?;
        payload.push('\n');
        self.write_bytes(path, payload.as_bytes())?;
        Ok(path.to_path_buf())
    }

    /// Creates the results directory and writes `bytes` to `path`.
    fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<(), BaselineError> {
        fs::create_dir_all(&self.dir).map_err(|err| BaselineError::Io {
            path: self.dir.display().to_string(),
            message: err.to_string(),
        })?;
        fs::write(path, bytes).map_err(|err| BaselineError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        })
    }
}

// ============================================================================
// SECTION: Comparison
// ============================================================================

/// Metric tracked for regressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackedMetric {
    /// Skill file line count.
    SkillMdLines,
    /// Number of non-template rule files.
    RuleFileCount,
}

impl TrackedMetric {
    /// Tracked metrics in report order.
    pub const ALL: [Self; 2] = [Self::SkillMdLines, Self::RuleFileCount];

    /// Returns the metric key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SkillMdLines => "skill_md_lines",
            Self::RuleFileCount => "rule_file_count",
        }
    }

    /// Returns the metric value from a metrics record.
    #[must_use]
    pub const fn current(self, metrics: &BundleMetrics) -> u64 {
        match self {
            Self::SkillMdLines => metrics.skill_md_lines,
            Self::RuleFileCount => metrics.rule_file_count,
        }
    }
}

/// Outcome of one metric comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricStatus {
    /// Within tolerance.
    Pass,
    /// Outside tolerance.
    Fail,
}

impl MetricStatus {
    /// Returns the report symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Pass => "✅",
            Self::Fail => "❌",
        }
    }

    /// Returns true for [`MetricStatus::Pass`].
    #[must_use]
    pub const fn is_pass(self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// Comparison of one metric against the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricComparison {
    /// Compared metric.
    pub metric: TrackedMetric,
    /// Baseline value when recorded.
    pub baseline: Option<u64>,
    /// Current value.
    pub current: u64,
    /// Current minus baseline; zero when the baseline value is missing.
    pub delta: i64,
    /// Tolerance outcome.
    pub status: MetricStatus,
}

/// Comparison of every tracked metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison {
    /// Per-metric comparisons in report order.
    pub metrics: Vec<MetricComparison>,
}

impl Comparison {
    /// Returns true when every metric is within tolerance.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.metrics.iter().all(|metric| metric.status.is_pass())
    }

    /// Returns the metrics outside tolerance.
    #[must_use]
    pub fn failed(&self) -> Vec<&MetricComparison> {
        self.metrics.iter().filter(|metric| !metric.status.is_pass()).collect()
    }
}

/// Compares current metrics with a baseline record.
#[must_use]
pub fn compare_metrics(
    current: &BundleMetrics,
    baseline: &BaselineRecord,
    policy: &BaselinePolicy,
) -> Comparison {
    Comparison {
        metrics: TrackedMetric::ALL
            .iter()
            .map(|metric| {
                evaluate_metric(
                    *metric,
                    metric.current(current),
                    baseline.value(*metric),
                    policy.max_line_growth_percent,
                )
            })
            .collect(),
    }
}

/// Evaluates a single metric against its baseline value.
#[must_use]
pub fn evaluate_metric(
    metric: TrackedMetric,
    current: u64,
    baseline: Option<u64>,
    max_growth_percent: u32,
) -> MetricComparison {
    let Some(base) = baseline else {
        return MetricComparison {
            metric,
            baseline: None,
            current,
            delta: 0,
            status: MetricStatus::Pass,
        };
    };
    let within = match metric {
        TrackedMetric::SkillMdLines => {
            u128::from(current) * 100 <= u128::from(base) * (100 + u128::from(max_growth_percent))
        }
        TrackedMetric::RuleFileCount => current >= base,
    };
    MetricComparison {
        metric,
        baseline: Some(base),
        current,
        delta: signed_delta(current, base),
        status: if within { MetricStatus::Pass } else { MetricStatus::Fail },
    }
}

/// Returns `current - base` clamped to the `i64` range.
fn signed_delta(current: u64, base: u64) -> i64 {
    let delta = i128::from(current) - i128::from(base);
    i64::try_from(delta).unwrap_or(if delta < 0 { i64::MIN } else { i64::MAX })
}

// ============================================================================
// SECTION: Tests
// ============================================================================
