//! Config load validation tests for skill-gate-config.
// crates/skill-gate-config/tests/load_validation.rs
// =============================================================================
// Module: Config Load Validation Tests
// Description: Validate config loading guards and resolution order.
// Purpose: Ensure config input handling is strict and fail-closed.
// =============================================================================

use std::fs;
use std::io::Write;
use std::path::Path;

use common::TestResult;
use common::assert_invalid;
use skill_gate_config::DEFAULT_CONFIG_NAME;
use skill_gate_config::SkillGateConfig;
use tempfile::NamedTempFile;

mod common;

#[test]
fn load_rejects_path_too_long() -> TestResult {
    let long_path = "a".repeat(5_000);
    assert_invalid(SkillGateConfig::load(Some(Path::new(&long_path))), "config path exceeds max length")
}

#[test]
fn load_rejects_path_component_too_long() -> TestResult {
    let long_component = "a".repeat(300);
    assert_invalid(
        SkillGateConfig::load(Some(Path::new(&long_component))),
        "config path component too long",
    )
}

#[test]
fn load_rejects_oversized_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    let payload = vec![b'#'; 1_048_577];
    file.write_all(&payload).map_err(|err| err.to_string())?;
    assert_invalid(SkillGateConfig::load(Some(file.path())), "config file exceeds size limit")
}

#[test]
fn load_rejects_non_utf8_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(&[0xFF, 0xFE, 0xFF]).map_err(|err| err.to_string())?;
    assert_invalid(SkillGateConfig::load(Some(file.path())), "config file must be utf-8")
}

#[test]
fn load_reports_missing_file_as_io_error() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let missing = dir.path().join("absent.toml");
    assert_invalid(SkillGateConfig::load(Some(&missing)), "config io error")
}

#[test]
fn load_rejects_unknown_keys() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(b"[skill]\nmax_line = 10\n").map_err(|err| err.to_string())?;
    assert_invalid(SkillGateConfig::load(Some(file.path())), "config parse error")?;

    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(b"[server]\nbind = \"x\"\n").map_err(|err| err.to_string())?;
    assert_invalid(SkillGateConfig::load(Some(file.path())), "config parse error")
}

#[test]
fn load_records_source_path() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(b"[skill]\nmax_lines = 150\n").map_err(|err| err.to_string())?;
    let config = SkillGateConfig::load(Some(file.path())).map_err(|err| err.to_string())?;
    if config.skill.max_lines != 150 {
        return Err(format!("expected max_lines 150, got {}", config.skill.max_lines));
    }
    if config.source.as_deref() != Some(file.path()) {
        return Err("source path not recorded".to_string());
    }
    Ok(())
}

#[test]
fn bundle_config_is_used_when_present() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    fs::write(dir.path().join(DEFAULT_CONFIG_NAME), "[baseline]\nreport_title = \"Bundle Report\"\n")
        .map_err(|err| err.to_string())?;
    let config =
        SkillGateConfig::load_for_bundle(None, dir.path()).map_err(|err| err.to_string())?;
    if config.baseline.report_title != "Bundle Report" {
        return Err(format!("unexpected title {}", config.baseline.report_title));
    }
    Ok(())
}

#[test]
fn explicit_path_overrides_bundle_config() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    fs::write(dir.path().join(DEFAULT_CONFIG_NAME), "[baseline]\nreport_title = \"Bundle\"\n")
        .map_err(|err| err.to_string())?;
    let explicit = dir.path().join("explicit.toml");
    fs::write(&explicit, "[baseline]\nreport_title = \"Explicit\"\n")
        .map_err(|err| err.to_string())?;
    let config = SkillGateConfig::load_for_bundle(Some(&explicit), dir.path())
        .map_err(|err| err.to_string())?;
    if config.baseline.report_title != "Explicit" {
        return Err(format!("unexpected title {}", config.baseline.report_title));
    }
    Ok(())
}

#[test]
fn invalid_bundle_config_fails_closed() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    fs::write(dir.path().join(DEFAULT_CONFIG_NAME), "[limits]\nmax_scenarios = 0\n")
        .map_err(|err| err.to_string())?;
    assert_invalid(
        SkillGateConfig::load_for_bundle(None, dir.path()),
        "limits.max_scenarios must be greater than zero",
    )
}
