// crates/skill-gate-core/src/runtime/suites/scenarios.rs
// ============================================================================
// Module: Scenario Suite
// Description: Checks on YAML test scenarios and scenario contracts.
// Purpose: Keep scenario coverage, tool budgets, and metadata complete.
// Dependencies: serde_json, crate::core
// ============================================================================

//! ## Overview
//! Files that fail to parse are reported once by `scenarios.schema` and are
//! left out of the per-scenario checks.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;

use crate::core::policy::ScenarioContract;
use crate::core::scenario::ScenarioDocument;
use crate::core::scenario::scenario_schema_violations;
use crate::runtime::checks::CheckError;
use crate::runtime::checks::CheckId;
use crate::runtime::checks::CheckOutcome;
use crate::runtime::checks::Finding;
use crate::runtime::suites::CheckContext;

// ============================================================================
// SECTION: Evaluation
// ============================================================================

/// Evaluates the scenario suite.
pub(super) fn evaluate(context: &CheckContext<'_>) -> Result<Vec<CheckOutcome>, CheckError> {
    let policy = &context.policy.scenarios;
    let scenarios_dir = context.policy.layout.scenarios_dir.as_str();
    let count = context.scenarios.len();

    let count_findings = if count < policy.min_count {
        vec![Finding::new(
            scenarios_dir,
            format!("only {count} scenarios found, need at least {}", policy.min_count),
        )]
    } else {
        Vec::new()
    };

    let mut outcomes = vec![
        CheckOutcome::from_findings(CheckId::ScenariosCount, count_findings),
        CheckOutcome::from_findings(CheckId::ScenariosSchema, schema_findings(context)?),
        CheckOutcome::from_findings(
            CheckId::ScenariosSimplePresent,
            marker_findings(context, &policy.simple_markers, "no simple scenario found"),
        ),
        CheckOutcome::from_findings(
            CheckId::ScenariosComplexPresent,
            marker_findings(context, &policy.complex_markers, "no complex scenario found"),
        ),
        CheckOutcome::from_findings(
            CheckId::ScenariosToolCount,
            per_scenario(context, |document| {
                let tools = document.scenario.expected_tools.len();
                if tools == 0 {
                    Some("has no expected_tools defined".to_string())
                } else if tools >= policy.max_tools {
                    Some(format!(
                        "expects {tools} tools, limit is {}",
                        policy.max_tools.saturating_sub(1)
                    ))
                } else {
                    None
                }
            }),
        ),
        CheckOutcome::from_findings(CheckId::ScenariosToolsResolve, tool_findings(context)?),
        CheckOutcome::from_findings(
            CheckId::ScenariosComplexity,
            per_scenario(context, |document| {
                let valid = document
                    .scenario
                    .complexity
                    .as_ref()
                    .is_some_and(|level| policy.complexity_levels.contains(level));
                (!valid).then(|| "missing valid complexity rating".to_string())
            }),
        ),
        CheckOutcome::from_findings(
            CheckId::ScenariosMaxTokens,
            per_scenario(context, |document| match document.scenario.max_tokens() {
                None => Some("missing max_tokens in metrics".to_string()),
                Some(tokens) if tokens <= 0 => Some(format!("has invalid max_tokens: {tokens}")),
                Some(_) => None,
            }),
        ),
    ];

    let contracts = &context.policy.scenario_contracts;
    outcomes.push(if contracts.is_empty() {
        CheckOutcome::skipped(CheckId::ScenariosContracts, "no scenario contracts configured")
    } else {
        CheckOutcome::from_findings(
            CheckId::ScenariosContracts,
            contracts.iter().flat_map(|contract| contract_findings(context, contract)).collect(),
        )
    });
    Ok(outcomes)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Runs `probe` over every parsed scenario and collects findings.
fn per_scenario<F>(context: &CheckContext<'_>, probe: F) -> Vec<Finding>
where
    F: Fn(&ScenarioDocument) -> Option<String>,
{
    context
        .scenarios
        .iter()
        .filter_map(|file| {
            let document = file.parsed()?;
            probe(document).map(|message| Finding::new(file.display_name(), message))
        })
        .collect()
}

/// Reports parse failures and schema violations.
fn schema_findings(context: &CheckContext<'_>) -> Result<Vec<Finding>, CheckError> {
    let mut findings = Vec::new();
    for file in &context.scenarios {
        match &file.document {
            Err(message) => findings.push(Finding::new(file.file_name.as_str(), message.as_str())),
            Ok(document) => findings.extend(
                scenario_schema_violations(&document.raw)?
                    .into_iter()
                    .map(|violation| Finding::new(file.file_name.as_str(), violation)),
            ),
        }
    }
    Ok(findings)
}

/// Requires some scenario file name to contain one of `markers`.
fn marker_findings(context: &CheckContext<'_>, markers: &[String], message: &str) -> Vec<Finding> {
    let found = context.scenarios.iter().any(|file| {
        let name = file.file_name.to_lowercase();
        markers.iter().any(|marker| name.contains(&marker.to_lowercase()))
    });
    if found {
        Vec::new()
    } else {
        vec![Finding::new(context.policy.layout.scenarios_dir.as_str(), message)]
    }
}

/// Reports expected tools that do not resolve to a rule file.
fn tool_findings(context: &CheckContext<'_>) -> Result<Vec<Finding>, CheckError> {
    let mut findings = Vec::new();
    for file in &context.scenarios {
        let Some(document) = file.parsed() else {
            continue;
        };
        for tool in &document.scenario.expected_tools {
            if context.bundle.find_rule(tool)?.is_none() {
                findings.push(Finding::new(
                    file.display_name(),
                    format!("tool `{tool}` not found under {}", context.policy.layout.rules_dir),
                ));
            }
        }
    }
    Ok(findings)
}

/// Evaluates one scenario contract.
fn contract_findings(context: &CheckContext<'_>, contract: &ScenarioContract) -> Vec<Finding> {
    let subject = contract.file.as_str();
    let Some(file) = context.scenarios.iter().find(|file| file.file_name == contract.file) else {
        return vec![Finding::new(subject, "scenario file not found")];
    };
    let map = match &file.document {
        Ok(document) => match &document.raw {
            Value::Object(map) => map,
            _ => return vec![Finding::new(subject, "scenario is not a mapping")],
        },
        Err(message) => return vec![Finding::new(subject, format!("cannot evaluate: {message}"))],
    };

    let mut findings: Vec<Finding> = contract
        .required_keys
        .iter()
        .filter(|key| !map.contains_key(key.as_str()))
        .map(|key| Finding::new(subject, format!("missing `{key}`")))
        .collect();
    for (key, min) in &contract.min_items {
        let items = list_len(map, key);
        if items < *min {
            findings.push(Finding::new(
                subject,
                format!("`{key}` has {items} items, need at least {min}"),
            ));
        }
    }
    if !contract.any_keys.is_empty()
        && !contract.any_keys.iter().any(|key| map.contains_key(key.as_str()))
    {
        findings.push(Finding::new(
            subject,
            format!("needs one of {}", contract.any_keys.join(", ")),
        ));
    }
    findings
}

/// Returns the length of a list value, zero when absent or not a list.
fn list_len(map: &Map<String, Value>, key: &str) -> usize {
    map.get(key).and_then(Value::as_array).map_or(0, Vec::len)
}
