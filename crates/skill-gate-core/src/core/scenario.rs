// crates/skill-gate-core/src/core/scenario.rs
// ============================================================================
// Module: Skill Gate Scenarios
// Description: YAML test scenarios, their typed view, and shape validation.
// Purpose: Parse scenario files and check them against the scenario schema.
// Dependencies: jsonschema, serde, serde_json, serde_yaml, thiserror
// ============================================================================

//! ## Overview
//! A scenario describes one agent task: its complexity, the rule files an
//! agent is expected to retrieve, and token metrics. Files are parsed from
//! YAML into a JSON value first so the raw document can be validated against
//! an embedded JSON Schema (draft 2020-12) and probed by contracts, then
//! projected into a typed [`Scenario`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::sync::OnceLock;

use jsonschema::Draft;
use jsonschema::Validator;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while validating scenario shape.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The embedded scenario schema failed to compile.
    #[error("invalid scenario schema: {0}")]
    Schema(String),
}

// ============================================================================
// SECTION: Types
// ============================================================================

/// Typed view of the scenario fields the gate inspects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Complexity rating.
    #[serde(default)]
    pub complexity: Option<String>,
    /// Rule files an agent should retrieve.
    #[serde(default)]
    pub expected_tools: Vec<String>,
    /// Token metrics.
    #[serde(default)]
    pub metrics: Option<ScenarioMetrics>,
}

/// Token metrics declared by a scenario.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioMetrics {
    /// Token ceiling for the scenario.
    #[serde(default)]
    pub max_tokens: Option<i64>,
}

/// Parsed scenario: raw mapping plus typed view.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioDocument {
    /// Raw YAML mapping as JSON.
    pub raw: Value,
    /// Typed projection of the raw mapping.
    pub scenario: Scenario,
}

/// Scenario file with its parse outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioFile {
    /// Path on disk.
    pub path: PathBuf,
    /// File name.
    pub file_name: String,
    /// Parsed document, or the parse failure message.
    pub document: Result<ScenarioDocument, String>,
}

impl Scenario {
    /// Returns the declared token ceiling.
    #[must_use]
    pub fn max_tokens(&self) -> Option<i64> {
        self.metrics.as_ref().and_then(|metrics| metrics.max_tokens)
    }
}

impl ScenarioFile {
    /// Returns the scenario name, falling back to the file stem.
    #[must_use]
    pub fn display_name(&self) -> String {
        if let Ok(document) = &self.document
            && let Some(name) = &document.scenario.name
        {
            return name.clone();
        }
        self.path
            .file_stem()
            .map_or_else(|| self.file_name.clone(), |stem| stem.to_string_lossy().into_owned())
    }

    /// Returns the parsed document when parsing succeeded.
    #[must_use]
    pub fn parsed(&self) -> Option<&ScenarioDocument> {
        self.document.as_ref().ok()
    }

    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Parses scenario YAML into a raw mapping and a typed view.
///
/// # Errors
///
/// Returns a message when the YAML is malformed, is not a mapping, or has
/// fields of the wrong type.
pub fn parse_scenario(content: &str) -> Result<ScenarioDocument, String> {
    let raw: Value =
        serde_yaml::from_str(content).map_err(|err| format!("invalid yaml: {err}"))?;
    if !raw.is_object() {
        return Err("scenario must be a yaml mapping".to_string());
    }
    let scenario: Scenario = serde_json::from_value(raw.clone())
        .map_err(|err| format!("invalid scenario fields: {err}"))?;
    Ok(ScenarioDocument {
        raw,
        scenario,
    })
}

// ============================================================================
// SECTION: Schema
// ============================================================================

/// Returns the JSON Schema describing scenario shape.
#[must_use]
pub fn scenario_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": "Skill scenario",
        "type": "object",
        "properties": {
            "name": { "type": "string", "minLength": 1 },
            "description": { "type": "string" },
            "complexity": { "type": "string" },
            "expected_tools": {
                "type": "array",
                "items": { "type": "string", "minLength": 1 }
            },
            "metrics": {
                "type": "object",
                "properties": {
                    "max_tokens": { "type": "integer" }
                }
            },
            "validation_criteria": { "type": "array" }
        },
        "additionalProperties": true
    })
}

/// Returns schema violations for a raw scenario mapping.
///
/// # Errors
///
/// Returns [`ScenarioError::Schema`] when the embedded schema cannot compile.
pub fn scenario_schema_violations(raw: &Value) -> Result<Vec<String>, ScenarioError> {
    let validator = scenario_validator()?;
    Ok(validator.iter_errors(raw).map(|err| err.to_string()).collect())
}

/// Returns the compiled scenario validator.
fn scenario_validator() -> Result<&'static Validator, ScenarioError> {
    static VALIDATOR: OnceLock<Result<Validator, String>> = OnceLock::new();
    VALIDATOR
        .get_or_init(|| {
            jsonschema::options()
                .with_draft(Draft::Draft202012)
                .build(&scenario_schema())
                .map_err(|err| err.to_string())
        })
        .as_ref()
        .map_err(|err| ScenarioError::Schema(err.clone()))
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

    use serde_json::json;

    use super::parse_scenario;
    use super::scenario_schema_violations;

    #[test]
    fn parses_typed_fields_and_keeps_raw_mapping() {
        let document = parse_scenario(
            "name: Search list\ncomplexity: simple\nexpected_tools:\n  - crud/crud-list.md\n\
             metrics:\n  max_tokens: 2000\nextra: kept\n",
        )
        .unwrap();
        assert_eq!(document.scenario.name.as_deref(), Some("Search list"));
        assert_eq!(document.scenario.expected_tools, vec!["crud/crud-list.md"]);
        assert_eq!(document.scenario.max_tokens(), Some(2000));
        assert_eq!(document.raw["extra"], json!("kept"));
    }

    #[test]
    fn rejects_non_mapping_documents() {
        assert!(parse_scenario("- a\n- b\n").is_err());
        assert!(parse_scenario("").is_err());
        assert!(parse_scenario("name: [unclosed").is_err());
    }

    #[test]
    fn rejects_wrongly_typed_fields() {
        let err = parse_scenario("expected_tools: not-a-list\n").unwrap_err();
        assert!(err.contains("invalid scenario fields"));
    }

    #[test]
    fn schema_accepts_minimal_scenario() {
        let violations = scenario_schema_violations(&json!({"name": "x"})).unwrap();
        assert!(violations.is_empty());
    }

    #[test]
    fn schema_reports_empty_tool_names() {
        let violations =
            scenario_schema_violations(&json!({"expected_tools": ["ok.md", ""]})).unwrap();
        assert_eq!(violations.len(), 1);
    }
}
