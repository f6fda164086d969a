//! Config artifact validation tests for skill-gate-config.
// crates/skill-gate-config/tests/config_artifacts.rs
// ============================================================================
// Module: Config Artifact Validation Tests
// Description: Validate the canonical example profile.
// Purpose: Prevent drift between the config model and the example profile.
// Dependencies: skill-gate-config, skill-gate-core
// ============================================================================

use skill_gate_config::SkillGateConfig;
use skill_gate_config::config_toml_example;

type TestResult = Result<(), String>;

#[test]
fn example_profile_parses_and_validates() -> TestResult {
    let config =
        SkillGateConfig::from_toml_str(&config_toml_example()).map_err(|err| err.to_string())?;
    let policy = config.policy();
    if policy.skill.name.as_deref() != Some("qscmf-backend") {
        return Err("example should pin the skill name".to_string());
    }
    if policy.baseline.report_title != "QSCMF Skill Test Report" {
        return Err(format!("unexpected report title {}", policy.baseline.report_title));
    }
    Ok(())
}

#[test]
fn example_profile_carries_bundle_contracts() -> TestResult {
    let policy = SkillGateConfig::from_toml_str(&config_toml_example())
        .map_err(|err| err.to_string())?
        .policy();

    let [group] = policy.rule_groups.as_slice() else {
        return Err(format!("expected one rule group, got {}", policy.rule_groups.len()));
    };
    if group.required_files.len() != 3 || group.conditional.len() != 1 {
        return Err("scaffold group incomplete".to_string());
    }
    if group.cross_links.as_ref().map(|set| set.term_count()) != Some(4) {
        return Err("scaffold cross links incomplete".to_string());
    }

    let ids: Vec<&str> = policy.documents.iter().map(|doc| doc.id.as_str()).collect();
    if ids
        != ["transaction-rule", "testing-reference", "development-standards", "version-detector"]
    {
        return Err(format!("unexpected document contracts {}", ids.join(", ")));
    }
    let detector = &policy.documents[3];
    if detector.require.last().map(|set| (set.term_count(), set.min)) != Some((5, 3)) {
        return Err("detector method set should need 3 of 5".to_string());
    }

    let scaffold = &policy.scenario_contracts[0];
    if scaffold.min_items.get("validation_criteria") != Some(&3) {
        return Err("scaffold scenario contract should need 3 criteria".to_string());
    }
    if policy.scenario_contracts[1].any_keys.len() != 2 {
        return Err("transaction scenario contract incomplete".to_string());
    }
    Ok(())
}

#[test]
fn example_thresholds_match_built_in_defaults() -> TestResult {
    let example = SkillGateConfig::from_toml_str(&config_toml_example())
        .map_err(|err| err.to_string())?;
    let defaults = SkillGateConfig::default();
    if example.layout != defaults.layout
        || example.limits != defaults.limits
        || example.rules != defaults.rules
        || example.structure != defaults.structure
        || example.scenarios != defaults.scenarios
    {
        return Err("example thresholds drifted from defaults".to_string());
    }
    Ok(())
}
