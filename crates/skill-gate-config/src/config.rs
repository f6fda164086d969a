// crates/skill-gate-config/src/config.rs
// ============================================================================
// Module: Skill Gate Configuration
// Description: Configuration loading and validation for Skill Gate.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: skill-gate-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Every section is optional and defaults to the built-in policy. Invalid
//! configuration fails closed with a message naming the offending field.
//!
//! Resolution order: explicit path, then `SKILL_GATE_CONFIG`, then
//! `skill-gate.toml` inside the bundle, then built-in defaults.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use skill_gate_core::BaselinePolicy;
use skill_gate_core::BundleLayout;
use skill_gate_core::BundleLimits;
use skill_gate_core::DocumentContract;
use skill_gate_core::GatePolicy;
use skill_gate_core::MatchSet;
use skill_gate_core::RuleGroupContract;
use skill_gate_core::RulePolicy;
use skill_gate_core::ScenarioContract;
use skill_gate_core::ScenarioPolicy;
use skill_gate_core::SkillPolicy;
use skill_gate_core::StructurePolicy;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Configuration filename looked up inside the bundle.
pub const DEFAULT_CONFIG_NAME: &str = "skill-gate.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "SKILL_GATE_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum allowed skill file growth over the baseline, in percent.
pub(crate) const MAX_LINE_GROWTH_PERCENT: u32 = 1000;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Skill Gate configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SkillGateConfig {
    /// Bundle layout.
    pub layout: BundleLayout,
    /// Loading limits.
    pub limits: BundleLimits,
    /// Skill file policy.
    pub skill: SkillPolicy,
    /// Rule file policy.
    pub rules: RulePolicy,
    /// Directory structure policy.
    pub structure: StructurePolicy,
    /// Scenario policy.
    pub scenarios: ScenarioPolicy,
    /// Baseline comparison policy.
    pub baseline: BaselinePolicy,
    /// Rule group contracts.
    pub rule_groups: Vec<RuleGroupContract>,
    /// Document contracts.
    pub documents: Vec<DocumentContract>,
    /// Scenario file contracts.
    pub scenario_contracts: Vec<ScenarioContract>,
    /// Audit logging configuration.
    pub logging: LoggingConfig,
    /// Path the configuration was loaded from (not serialized).
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl SkillGateConfig {
    /// Loads configuration from an explicit path, `SKILL_GATE_CONFIG`, or
    /// `skill-gate.toml` in the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        Self::load_file(&resolved)
    }

    /// Loads configuration for a bundle, falling back to the bundle's own
    /// `skill-gate.toml` and then to built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a resolved file cannot be loaded or is invalid.
    pub fn load_for_bundle(path: Option<&Path>, bundle_root: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load_file(path);
        }
        if let Some(env_path) = env_path()? {
            return Self::load_file(&env_path);
        }
        let bundle_config = bundle_root.join(DEFAULT_CONFIG_NAME);
        if bundle_config.is_file() {
            return Self::load_file(&bundle_config);
        }
        let config = Self::default();
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates one configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file is unreadable, oversized, not
    /// UTF-8, malformed, or invalid.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        validate_path(path)?;
        let bytes = fs::read(path)
            .map_err(|err| ConfigError::Io(format!("{}: {err}", path.display())))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let mut config = Self::from_toml_str(content)?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parses and validates configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the TOML is malformed or invalid.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_layout(&self.layout)?;
        validate_limits(&self.limits)?;
        validate_skill(&self.skill)?;
        validate_rules(&self.rules)?;
        validate_structure(&self.structure)?;
        validate_scenarios(&self.scenarios)?;
        validate_baseline(&self.baseline)?;
        validate_rule_groups(&self.rule_groups)?;
        validate_documents(&self.documents)?;
        validate_scenario_contracts(&self.scenario_contracts)?;
        self.logging.validate()
    }

    /// Returns the policy evaluated by the check runner.
    #[must_use]
    pub fn policy(&self) -> GatePolicy {
        GatePolicy {
            layout: self.layout.clone(),
            limits: self.limits,
            skill: self.skill.clone(),
            rules: self.rules.clone(),
            structure: self.structure.clone(),
            scenarios: self.scenarios.clone(),
            baseline: self.baseline.clone(),
            rule_groups: self.rule_groups.clone(),
            documents: self.documents.clone(),
            scenario_contracts: self.scenario_contracts.clone(),
        }
    }
}

// ============================================================================
// SECTION: Logging
// ============================================================================

/// Destination of audit events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSinkKind {
    /// JSON lines on stderr.
    #[default]
    Stderr,
    /// JSON lines appended to `logging.path`.
    File,
    /// Audit events are dropped.
    #[serde(rename = "none")]
    Disabled,
}

/// Audit logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Sink selection.
    pub sink: AuditSinkKind,
    /// Log file path for the file sink.
    pub path: Option<String>,
}

impl LoggingConfig {
    /// Validates logging configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        match (self.sink, &self.path) {
            (AuditSinkKind::File, None) => Err(ConfigError::Invalid(
                "logging.path is required when logging.sink = \"file\"".to_string(),
            )),
            (AuditSinkKind::File, Some(path)) => validate_path_string("logging.path", path),
            (_, Some(_)) => Err(ConfigError::Invalid(
                "logging.path is only valid when logging.sink = \"file\"".to_string(),
            )),
            (_, None) => Ok(()),
        }
    }
}

// ============================================================================
// SECTION: Section Validation
// ============================================================================

/// Validates bundle layout paths.
fn validate_layout(layout: &BundleLayout) -> Result<(), ConfigError> {
    validate_relative_path("layout.skill_file", &layout.skill_file)?;
    validate_relative_path("layout.rules_dir", &layout.rules_dir)?;
    validate_relative_path("layout.scenarios_dir", &layout.scenarios_dir)?;
    validate_relative_path("layout.results_dir", &layout.results_dir)
}

/// Validates loading limits.
fn validate_limits(limits: &BundleLimits) -> Result<(), ConfigError> {
    require_positive("limits.max_file_bytes", limits.max_file_bytes)?;
    require_positive("limits.max_scenarios", limits.max_scenarios)?;
    require_positive("limits.max_rule_files", limits.max_rule_files)
}

/// Validates the skill file policy.
fn validate_skill(skill: &SkillPolicy) -> Result<(), ConfigError> {
    if let Some(name) = &skill.name {
        validate_term("skill.name", name)?;
    }
    require_positive("skill.max_lines", skill.max_lines)?;
    if skill.guideline_max_lines < skill.max_lines {
        return Err(ConfigError::Invalid(
            "skill.guideline_max_lines must be >= skill.max_lines".to_string(),
        ));
    }
    require_positive("skill.max_table_rows", skill.max_table_rows)?;
    validate_terms("skill.required_fields", &skill.required_fields)?;
    validate_terms("skill.required_sections", &skill.required_sections)?;
    validate_terms("skill.code_example_sections", &skill.code_example_sections)?;
    validate_terms("skill.checked_link_prefixes", &skill.checked_link_prefixes)
}

/// Validates the rule file policy.
fn validate_rules(rules: &RulePolicy) -> Result<(), ConfigError> {
    require_positive("rules.max_lines", rules.max_lines)?;
    validate_match_set("rules.title", &rules.title)?;
    validate_match_set("rules.impact", &rules.impact)?;
    require_non_empty("rules.categories", &rules.categories)?;
    validate_terms("rules.categories", &rules.categories)
}

/// Validates the directory structure policy.
fn validate_structure(structure: &StructurePolicy) -> Result<(), ConfigError> {
    for (index, dir) in structure.required_dirs.iter().enumerate() {
        validate_relative_path(&format!("structure.required_dirs[{index}]"), dir)?;
    }
    validate_relative_path("structure.version_config_dir", &structure.version_config_dir)?;
    for (index, config) in structure.version_configs.iter().enumerate() {
        validate_relative_path(&format!("structure.version_configs[{index}]"), config)?;
    }
    validate_terms("structure.version_config_fields", &structure.version_config_fields)
}

/// Validates the scenario policy.
fn validate_scenarios(scenarios: &ScenarioPolicy) -> Result<(), ConfigError> {
    if scenarios.max_tools < 2 {
        return Err(ConfigError::Invalid("scenarios.max_tools must be at least 2".to_string()));
    }
    require_non_empty("scenarios.complexity_levels", &scenarios.complexity_levels)?;
    validate_terms("scenarios.complexity_levels", &scenarios.complexity_levels)?;
    require_non_empty("scenarios.simple_markers", &scenarios.simple_markers)?;
    validate_terms("scenarios.simple_markers", &scenarios.simple_markers)?;
    require_non_empty("scenarios.complex_markers", &scenarios.complex_markers)?;
    validate_terms("scenarios.complex_markers", &scenarios.complex_markers)
}

/// Validates the baseline policy.
fn validate_baseline(baseline: &BaselinePolicy) -> Result<(), ConfigError> {
    if baseline.max_line_growth_percent > MAX_LINE_GROWTH_PERCENT {
        return Err(ConfigError::Invalid(format!(
            "baseline.max_line_growth_percent must be <= {MAX_LINE_GROWTH_PERCENT}"
        )));
    }
    validate_term("baseline.report_title", &baseline.report_title)
}

/// Validates rule group contracts.
fn validate_rule_groups(groups: &[RuleGroupContract]) -> Result<(), ConfigError> {
    validate_unique_ids("rule_groups", groups.iter().map(|group| group.id.as_str()))?;
    for (index, group) in groups.iter().enumerate() {
        let field = format!("rule_groups[{index}]");
        validate_relative_path(&format!("{field}.dir"), &group.dir)?;
        for (file_index, file) in group.required_files.iter().enumerate() {
            validate_relative_path(&format!("{field}.required_files[{file_index}]"), file)?;
        }
        for (term_index, term) in group.conditional.iter().enumerate() {
            let term_field = format!("{field}.conditional[{term_index}]");
            validate_term(&format!("{term_field}.trigger"), &term.trigger)?;
            validate_match_set(&format!("{term_field}.requires"), &term.requires)?;
        }
        if let Some(set) = &group.cross_links {
            validate_match_set(&format!("{field}.cross_links"), set)?;
        }
    }
    Ok(())
}

/// Validates document contracts.
fn validate_documents(documents: &[DocumentContract]) -> Result<(), ConfigError> {
    validate_unique_ids("documents", documents.iter().map(|document| document.id.as_str()))?;
    for (index, document) in documents.iter().enumerate() {
        let field = format!("documents[{index}]");
        validate_relative_path(&format!("{field}.path"), &document.path)?;
        validate_terms(&format!("{field}.all"), &document.all)?;
        if document.all.is_empty() && document.require.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "{field} must declare `all` terms or `require` sets"
            )));
        }
        for (set_index, set) in document.require.iter().enumerate() {
            validate_match_set(&format!("{field}.require[{set_index}]"), set)?;
        }
    }
    Ok(())
}

/// Validates scenario contracts.
fn validate_scenario_contracts(contracts: &[ScenarioContract]) -> Result<(), ConfigError> {
    for (index, contract) in contracts.iter().enumerate() {
        let field = format!("scenario_contracts[{index}]");
        validate_term(&format!("{field}.file"), &contract.file)?;
        if contract.file.contains(['/', '\\']) {
            return Err(ConfigError::Invalid(format!("{field}.file must be a file name")));
        }
        validate_terms(&format!("{field}.required_keys"), &contract.required_keys)?;
        validate_terms(&format!("{field}.any_keys"), &contract.any_keys)?;
        for (key, min) in &contract.min_items {
            validate_term(&format!("{field}.min_items"), key)?;
            require_positive(&format!("{field}.min_items.{key}"), *min)?;
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    Ok(env_path()?.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_NAME)))
}

/// Returns the config path named by the environment, if set.
fn env_path() -> Result<Option<PathBuf>, ConfigError> {
    match env::var(CONFIG_ENV_VAR) {
        Ok(env_path) if env_path.len() > MAX_TOTAL_PATH_LENGTH => {
            Err(ConfigError::Invalid("config path exceeds max length".to_string()))
        }
        Ok(env_path) if !env_path.trim().is_empty() => Ok(Some(PathBuf::from(env_path))),
        _ => Ok(None),
    }
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    let path = Path::new(trimmed);
    for component in path.components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Validates a bundle-relative path that must stay inside the bundle.
fn validate_relative_path(field: &str, value: &str) -> Result<(), ConfigError> {
    validate_path_string(field, value)?;
    let path = Path::new(value.trim());
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {
                return Err(ConfigError::Invalid(format!("{field} must be a relative path")));
            }
            Component::ParentDir => {
                return Err(ConfigError::Invalid(format!("{field} must not contain `..`")));
            }
            Component::CurDir | Component::Normal(_) => {}
        }
    }
    Ok(())
}

/// Rejects zero values.
fn require_positive(field: &str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::Invalid(format!("{field} must be greater than zero")));
    }
    Ok(())
}

/// Rejects empty lists.
fn require_non_empty(field: &str, values: &[String]) -> Result<(), ConfigError> {
    if values.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must list at least one entry")));
    }
    Ok(())
}

/// Rejects blank terms.
fn validate_term(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    Ok(())
}

/// Rejects blank terms in a list.
fn validate_terms(field: &str, values: &[String]) -> Result<(), ConfigError> {
    for (index, value) in values.iter().enumerate() {
        validate_term(&format!("{field}[{index}]"), value)?;
    }
    Ok(())
}

/// Validates a match set: non-blank terms and a reachable minimum.
fn validate_match_set(field: &str, set: &MatchSet) -> Result<(), ConfigError> {
    validate_terms(&format!("{field}.any"), &set.any)?;
    validate_terms(&format!("{field}.any_ci"), &set.any_ci)?;
    let terms = set.term_count();
    if terms == 0 {
        return Err(ConfigError::Invalid(format!("{field} must list at least one term")));
    }
    if set.min == 0 || set.min > terms {
        return Err(ConfigError::Invalid(format!(
            "{field}.min must be between 1 and {terms}"
        )));
    }
    Ok(())
}

/// Rejects blank or duplicate contract identifiers.
fn validate_unique_ids<'a>(
    field: &str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), ConfigError> {
    let mut seen = BTreeSet::new();
    for (index, id) in ids.enumerate() {
        validate_term(&format!("{field}[{index}].id"), id)?;
        if !seen.insert(id) {
            return Err(ConfigError::Invalid(format!("{field} id `{id}` is duplicated")));
        }
    }
    Ok(())
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

    use skill_gate_core::MatchSet;

    use super::validate_match_set;
    use super::validate_path_string;
    use super::validate_relative_path;

    #[test]
    fn validate_path_string_rejects_whitespace_only() {
        let err = validate_path_string("logging.path", "   ").unwrap_err();
        assert!(err.to_string().contains("logging.path must be non-empty"));
    }

    #[test]
    fn relative_paths_accept_nested_and_dot_segments() {
        validate_relative_path("layout.rules_dir", "rules").unwrap();
        validate_relative_path("layout.results_dir", "./tests/results").unwrap();
    }

    #[test]
    fn relative_paths_reject_absolute_and_parent_segments() {
        let err = validate_relative_path("layout.results_dir", "/tmp/results").unwrap_err();
        assert!(err.to_string().contains("layout.results_dir must be a relative path"));
        let err = validate_relative_path("layout.rules_dir", "rules/../../etc").unwrap_err();
        assert!(err.to_string().contains("must not contain `..`"));
    }

    #[test]
    fn match_set_minimum_must_be_reachable() {
        let set = MatchSet::any_of("tools", &["phpstan", "phpunit"]);
        validate_match_set("documents[0].require[0]", &set).unwrap();
        let err = validate_match_set("documents[0].require[0]", &set.clone().with_min(3))
            .unwrap_err();
        assert!(err.to_string().contains("documents[0].require[0].min must be between 1 and 2"));
        let err = validate_match_set("x", &MatchSet::any_of("empty", &[])).unwrap_err();
        assert!(err.to_string().contains("x must list at least one term"));
    }
}
