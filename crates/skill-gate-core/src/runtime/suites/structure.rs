// crates/skill-gate-core/src/runtime/suites/structure.rs
// ============================================================================
// Module: Structure Suite
// Description: Checks on required directories and version configuration files.
// Purpose: Keep the bundle's directory skeleton and version configs intact.
// Dependencies: serde_json, serde_yaml, crate::core
// ============================================================================

//! ## Overview
//! Version configuration files are YAML mappings; each must define every
//! configured top-level key.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

use crate::runtime::checks::CheckError;
use crate::runtime::checks::CheckId;
use crate::runtime::checks::CheckOutcome;
use crate::runtime::checks::Finding;
use crate::runtime::suites::CheckContext;

// ============================================================================
// SECTION: Evaluation
// ============================================================================

/// Evaluates the structure suite.
pub(super) fn evaluate(context: &CheckContext<'_>) -> Result<Vec<CheckOutcome>, CheckError> {
    let bundle = context.bundle;
    let policy = &context.policy.structure;

    let required_dirs = policy
        .required_dirs
        .iter()
        .filter(|dir| !bundle.exists(dir))
        .map(|dir| Finding::new(dir.as_str(), "directory not found"))
        .collect();

    let mut outcomes = vec![
        CheckOutcome::from_findings(CheckId::StructureRequiredDirs, required_dirs),
        CheckOutcome::from_findings(CheckId::StructureVersionConfigPresent, presence(context)),
    ];

    if policy.version_configs.is_empty() {
        outcomes.push(CheckOutcome::skipped(
            CheckId::StructureVersionConfigs,
            "no version configs configured",
        ));
        outcomes.push(CheckOutcome::skipped(
            CheckId::StructureVersionConfigFields,
            "no version configs configured",
        ));
        return Ok(outcomes);
    }

    let missing = policy
        .version_configs
        .iter()
        .filter(|config| !bundle.exists(config))
        .map(|config| Finding::new(config.as_str(), "version config not found"))
        .collect();
    outcomes.push(CheckOutcome::from_findings(CheckId::StructureVersionConfigs, missing));

    let mut field_findings = Vec::new();
    for config in &policy.version_configs {
        let Some(document) = bundle.read_document(config)? else {
            continue;
        };
        match serde_yaml::from_str::<Value>(document.content()) {
            Ok(Value::Object(map)) => {
                field_findings.extend(
                    policy
                        .version_config_fields
                        .iter()
                        .filter(|field| !map.contains_key(field.as_str()))
                        .map(|field| Finding::new(config.as_str(), format!("missing `{field}`"))),
                );
            }
            Ok(_) => field_findings.push(Finding::new(config.as_str(), "not a yaml mapping")),
            Err(err) => field_findings.push(Finding::new(config.as_str(), format!("invalid yaml: {err}"))),
        }
    }
    outcomes.push(CheckOutcome::from_findings(CheckId::StructureVersionConfigFields, field_findings));
    Ok(outcomes)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Requires the version config directory and at least one version config.
fn presence(context: &CheckContext<'_>) -> Vec<Finding> {
    let bundle = context.bundle;
    let policy = &context.policy.structure;
    if !bundle.exists(&policy.version_config_dir) {
        return vec![Finding::new(policy.version_config_dir.as_str(), "directory not found")];
    }
    if !policy.version_configs.is_empty()
        && !policy.version_configs.iter().any(|config| bundle.exists(config))
    {
        return vec![Finding::new(
            policy.version_config_dir.as_str(),
            "at least one version config is required",
        )];
    }
    Vec::new()
}
