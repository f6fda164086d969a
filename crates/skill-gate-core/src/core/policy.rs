// crates/skill-gate-core/src/core/policy.rs
// ============================================================================
// Module: Skill Gate Policy
// Description: Thresholds, required terms, and file contracts for bundle checks.
// Purpose: Describe what a healthy skill bundle looks like as plain data.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! [`GatePolicy`] gathers every threshold and term list the check catalog
//! reads. Defaults match the conventions the gate was built for: a 200-line
//! skill file, 500-line rule files, fewer than 10 expected tools per
//! scenario, and a 10% growth allowance for the skill file. Bundle-specific
//! file contracts default to empty and are supplied through configuration.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::core::bundle::BundleLayout;
use crate::core::bundle::BundleLimits;
use crate::core::document::MatchSet;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default ceiling for skill file lines.
pub const DEFAULT_SKILL_MAX_LINES: usize = 200;
/// Default guideline ceiling for skill file lines.
pub const DEFAULT_SKILL_GUIDELINE_MAX_LINES: usize = 500;
/// Default ceiling for routing table rows (exclusive).
pub const DEFAULT_MAX_TABLE_ROWS: usize = 50;
/// Default ceiling for rule file lines.
pub const DEFAULT_RULE_MAX_LINES: usize = 500;
/// Default minimum number of scenarios.
pub const DEFAULT_MIN_SCENARIOS: usize = 3;
/// Default ceiling for expected tools per scenario (exclusive).
pub const DEFAULT_MAX_TOOLS: usize = 10;
/// Default allowed skill file growth over the baseline, in percent.
pub const DEFAULT_MAX_LINE_GROWTH_PERCENT: u32 = 10;
/// Default report title.
pub const DEFAULT_REPORT_TITLE: &str = "Skill Test Report";

// ============================================================================
// SECTION: Gate Policy
// ============================================================================

/// Complete policy evaluated by the check runner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GatePolicy {
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
}

// ============================================================================
// SECTION: Skill File
// ============================================================================

/// Requirements on the skill file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SkillPolicy {
    /// Expected `name:` value; defaults to the bundle directory name.
    pub name: Option<String>,
    /// Hard line ceiling.
    pub max_lines: usize,
    /// Guideline line ceiling.
    pub guideline_max_lines: usize,
    /// Frontmatter fields that must appear as `<field>:`.
    pub required_fields: Vec<String>,
    /// Section names that must appear.
    pub required_sections: Vec<String>,
    /// Sections that must contain a fenced code block when present.
    pub code_example_sections: Vec<String>,
    /// Table row ceiling (exclusive).
    pub max_table_rows: usize,
    /// Link target prefixes whose targets must exist.
    pub checked_link_prefixes: Vec<String>,
}

impl Default for SkillPolicy {
    fn default() -> Self {
        Self {
            name: None,
            max_lines: DEFAULT_SKILL_MAX_LINES,
            guideline_max_lines: DEFAULT_SKILL_GUIDELINE_MAX_LINES,
            required_fields: strings(&["description"]),
            required_sections: strings(&["Iron Laws", "Quick Start", "Intent Routing"]),
            code_example_sections: strings(&["Quick Start"]),
            max_table_rows: DEFAULT_MAX_TABLE_ROWS,
            checked_link_prefixes: strings(&["rules/"]),
        }
    }
}

// ============================================================================
// SECTION: Rule Files
// ============================================================================

/// Requirements on every non-template rule file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RulePolicy {
    /// Line ceiling per rule.
    pub max_lines: usize,
    /// Terms that indicate a title.
    pub title: MatchSet,
    /// Terms that indicate an impact level.
    pub impact: MatchSet,
    /// Allowed category directory names.
    pub categories: Vec<String>,
}

impl Default for RulePolicy {
    fn default() -> Self {
        Self {
            max_lines: DEFAULT_RULE_MAX_LINES,
            title: MatchSet::any_of("title", &["## "]).with_ci(&["title:"]),
            impact: MatchSet::any_of("impact level", &["CRITICAL", "HIGH", "MEDIUM", "LOW"])
                .with_ci(&["impact:"]),
            categories: strings(&["workflow", "scaffold", "crud", "api", "test", "pattern"]),
        }
    }
}

// ============================================================================
// SECTION: Structure
// ============================================================================

/// Required directories and version configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StructurePolicy {
    /// Directories that must exist.
    pub required_dirs: Vec<String>,
    /// Directory holding version configuration files.
    pub version_config_dir: String,
    /// Version configuration files, bundle-relative.
    pub version_configs: Vec<String>,
    /// Top-level keys every version configuration must define.
    pub version_config_fields: Vec<String>,
}

impl Default for StructurePolicy {
    fn default() -> Self {
        Self {
            required_dirs: strings(&[
                "_shared",
                "rules",
                "_shared/templates",
                "_shared/templates/common",
            ]),
            version_config_dir: "_shared/config".to_string(),
            version_configs: strings(&["_shared/config/v13.yaml", "_shared/config/v14.yaml"]),
            version_config_fields: strings(&["version", "php_requirement"]),
        }
    }
}

// ============================================================================
// SECTION: Scenarios
// ============================================================================

/// Requirements on scenario files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioPolicy {
    /// Minimum number of scenario files.
    pub min_count: usize,
    /// Expected tool ceiling (exclusive).
    pub max_tools: usize,
    /// Accepted complexity ratings.
    pub complexity_levels: Vec<String>,
    /// File name markers of simple scenarios.
    pub simple_markers: Vec<String>,
    /// File name markers of complex scenarios.
    pub complex_markers: Vec<String>,
}

impl Default for ScenarioPolicy {
    fn default() -> Self {
        Self {
            min_count: DEFAULT_MIN_SCENARIOS,
            max_tools: DEFAULT_MAX_TOOLS,
            complexity_levels: strings(&["simple", "medium", "complex"]),
            simple_markers: strings(&["simple", "search"]),
            complex_markers: strings(&["complex", "module", "create"]),
        }
    }
}

// ============================================================================
// SECTION: Baseline
// ============================================================================

/// Regression tolerance and report settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BaselinePolicy {
    /// Allowed skill file growth over the baseline, in percent.
    pub max_line_growth_percent: u32,
    /// Title of the comparison report.
    pub report_title: String,
}

impl Default for BaselinePolicy {
    fn default() -> Self {
        Self {
            max_line_growth_percent: DEFAULT_MAX_LINE_GROWTH_PERCENT,
            report_title: DEFAULT_REPORT_TITLE.to_string(),
        }
    }
}

// ============================================================================
// SECTION: Contracts
// ============================================================================

/// Requirements on a group of rule files sharing a directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleGroupContract {
    /// Group identifier used in findings.
    pub id: String,
    /// Directory under the rules directory.
    pub dir: String,
    /// Files that must exist in the group directory.
    #[serde(default)]
    pub required_files: Vec<String>,
    /// Terms that, when mentioned, demand further terms.
    #[serde(default)]
    pub conditional: Vec<ConditionalTerm>,
    /// Terms every rule in the group must use to reference related rules.
    #[serde(default)]
    pub cross_links: Option<MatchSet>,
}

/// Trigger term that requires a match set to hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConditionalTerm {
    /// Case-insensitive trigger.
    pub trigger: String,
    /// Terms required when the trigger occurs.
    pub requires: MatchSet,
}

/// Requirements on one bundle document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentContract {
    /// Contract identifier used in findings.
    pub id: String,
    /// Bundle-relative document path.
    pub path: String,
    /// Terms that must all occur verbatim.
    #[serde(default)]
    pub all: Vec<String>,
    /// Match sets that must all hold.
    #[serde(default)]
    pub require: Vec<MatchSet>,
}

/// Requirements on one scenario file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioContract {
    /// Scenario file name inside the scenario directory.
    pub file: String,
    /// Keys that must be present.
    #[serde(default)]
    pub required_keys: Vec<String>,
    /// Keys that must hold lists of at least the given length.
    #[serde(default)]
    pub min_items: BTreeMap<String, usize>,
    /// Keys of which at least one must be present.
    #[serde(default)]
    pub any_keys: Vec<String>,
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Converts string literals to owned strings.
fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}
