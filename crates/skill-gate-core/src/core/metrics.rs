// crates/skill-gate-core/src/core/metrics.rs
// ============================================================================
// Module: Skill Gate Metrics
// Description: Size metrics measured from a skill bundle.
// Purpose: Produce the numbers that baselines record and comparisons judge.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! Metrics are measured from the skill file and the non-template rule files.
//! A missing skill file measures as empty content, which is one line. The
//! bundle digest covers the same files, in sorted order, so two bundles with
//! equal digests produce equal metrics.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;

use crate::core::bundle::BundleError;
use crate::core::bundle::SkillBundle;
use crate::core::document::line_count;
use crate::core::hashing::ContentHasher;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Baseline record format version.
pub const BASELINE_FORMAT_VERSION: &str = "1.0";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Raw measurements of a bundle, without run metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct BundleMeasurement {
    /// Skill file line count.
    pub skill_md_lines: u64,
    /// Number of non-template rule files.
    pub rule_file_count: u64,
    /// Mean line count over non-template rule files.
    pub avg_rule_lines: f64,
    /// Lowercase hex SHA-256 over the measured files.
    pub bundle_digest: String,
}

/// Metrics record for one run, as written to `current.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleMetrics {
    /// Skill file line count.
    pub skill_md_lines: u64,
    /// Number of non-template rule files.
    pub rule_file_count: u64,
    /// Mean line count over non-template rule files.
    pub avg_rule_lines: f64,
    /// Lowercase hex SHA-256 over the measured files.
    pub bundle_digest: String,
    /// RFC 3339 timestamp of the run.
    pub timestamp: String,
    /// Record format version.
    pub version: String,
}

impl BundleMeasurement {
    /// Attaches run metadata to the measurement.
    #[must_use]
    pub fn into_metrics(self, timestamp: String, version: String) -> BundleMetrics {
        BundleMetrics {
            skill_md_lines: self.skill_md_lines,
            rule_file_count: self.rule_file_count,
            avg_rule_lines: self.avg_rule_lines,
            bundle_digest: self.bundle_digest,
            timestamp,
            version,
        }
    }
}

// ============================================================================
// SECTION: Measurement
// ============================================================================

/// Measures the skill file and non-template rule files of a bundle.
///
/// # Errors
///
/// Returns [`BundleError`] when a measured file cannot be read.
pub fn measure_bundle(bundle: &SkillBundle) -> Result<BundleMeasurement, BundleError> {
    let mut hasher = ContentHasher::new();
    let skill_content =
        bundle.skill_md()?.map(|document| document.content().to_string()).unwrap_or_default();
    hasher.update_entry(&bundle.layout().skill_file, skill_content.as_bytes());

    let mut rule_count = 0usize;
    let mut total_lines = 0usize;
    for rule in bundle.rule_files()?.into_iter().filter(|rule| !rule.is_template) {
        let document = bundle.load_document(&rule.path)?;
        rule_count += 1;
        total_lines += document.line_count();
        hasher.update_entry(&rule.relative, document.content().as_bytes());
    }

    Ok(BundleMeasurement {
        skill_md_lines: to_u64(line_count(&skill_content)),
        rule_file_count: to_u64(rule_count),
        avg_rule_lines: mean(total_lines, rule_count),
        bundle_digest: hasher.finalize_hex(),
    })
}

/// Measures a bundle and stamps the result with the run time and version.
///
/// # Errors
///
/// Returns [`BundleError`] when a measured file cannot be read.
pub fn collect_metrics(
    bundle: &SkillBundle,
    run_at: OffsetDateTime,
    version: &str,
) -> Result<BundleMetrics, BundleError> {
    Ok(measure_bundle(bundle)?.into_metrics(format_run_timestamp(run_at), version.to_string()))
}

/// Formats a run time as an RFC 3339 timestamp with second precision.
///
/// UTC renders with a `Z` suffix; other offsets render as `+HH:MM`.
fn format_run_timestamp(at: OffsetDateTime) -> String {
    let offset = at.offset();
    let zone = if offset.is_utc() {
        "Z".to_string()
    } else {
        let sign = if offset.is_negative() { '-' } else { '+' };
        let hours = offset.whole_hours().unsigned_abs();
        let minutes = offset.minutes_past_hour().unsigned_abs();
        format!("{sign}{hours:02}:{minutes:02}")
    };
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}{zone}",
        at.year(),
        u8::from(at.month()),
        at.day(),
        at.hour(),
        at.minute(),
        at.second()
    )
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Converts a count to `u64`, saturating on overflow.
pub(crate) fn to_u64(value: usize) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

/// Computes a mean, zero when there are no samples.
#[allow(clippy::cast_precision_loss, reason = "Line totals stay far below 2^52.")]
fn mean(total: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    total as f64 / count as f64
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::format_run_timestamp;

    #[test]
    fn utc_run_timestamp_uses_z_suffix() {
        let at = datetime!(2026-10-19 08:05:09 UTC);
        assert_eq!(format_run_timestamp(at), "2026-10-19T08:05:09Z");
    }

    #[test]
    fn local_run_timestamp_keeps_offset() {
        assert_eq!(
            format_run_timestamp(datetime!(2026-01-02 03:04:05 +08:00)),
            "2026-01-02T03:04:05+08:00"
        );
        assert_eq!(
            format_run_timestamp(datetime!(2026-01-02 03:04:05 -05:30)),
            "2026-01-02T03:04:05-05:30"
        );
    }
}
