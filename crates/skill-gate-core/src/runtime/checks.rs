// crates/skill-gate-core/src/runtime/checks.rs
// ============================================================================
// Module: Skill Gate Check Runner
// Description: Check catalog, outcomes, and suite-driven evaluation.
// Purpose: Evaluate a bundle against a policy and summarize every finding.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Every check has a stable [`CheckId`] (for example `skill_md.line_limit`)
//! and belongs to one [`CheckSuite`]. The [`CheckRunner`] loads what the
//! selected suites need, evaluates each check, and records one
//! [`CheckOutcome`] per check.
//!
//! ## Invariants
//! - Checks never stop at the first offending item; each offending file or
//!   value is recorded as its own [`Finding`].
//! - A check whose input is unavailable (no skill file, no baseline, no
//!   configured contracts) is [`CheckStatus::Skip`], never a silent pass.
//! - Outcomes are ordered by suite and then by catalog order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use serde::Serializer;
use thiserror::Error;

use crate::core::bundle::BundleError;
use crate::core::bundle::SkillBundle;
use crate::core::document::DocumentError;
use crate::core::policy::GatePolicy;
use crate::core::scenario::ScenarioError;
use crate::runtime::baseline::BaselineRecord;
use crate::runtime::suites;
use crate::runtime::suites::CheckContext;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors that abort a check run.
#[derive(Debug, Error)]
pub enum CheckError {
    /// A bundle file could not be loaded.
    #[error(transparent)]
    Bundle(#[from] BundleError),
    /// A document scan failed.
    #[error(transparent)]
    Document(#[from] DocumentError),
    /// Scenario validation could not run.
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
}

// ============================================================================
// SECTION: Suites
// ============================================================================

/// Group of related checks selectable as a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckSuite {
    /// Skill file checks.
    SkillMd,
    /// Rule file checks.
    Rules,
    /// Directory structure checks.
    Structure,
    /// Scenario checks.
    Scenarios,
    /// Rule group contract checks.
    RuleGroups,
    /// Document contract checks.
    Documents,
    /// Baseline regression checks.
    Regression,
}

impl CheckSuite {
    /// Every suite in evaluation order.
    pub const ALL: [Self; 7] = [
        Self::SkillMd,
        Self::Rules,
        Self::Structure,
        Self::Scenarios,
        Self::RuleGroups,
        Self::Documents,
        Self::Regression,
    ];

    /// Returns the suite identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SkillMd => "skill_md",
            Self::Rules => "rules",
            Self::Structure => "structure",
            Self::Scenarios => "scenarios",
            Self::RuleGroups => "rule_groups",
            Self::Documents => "documents",
            Self::Regression => "regression",
        }
    }

    /// Parses a suite identifier.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|suite| suite.as_str() == value)
    }
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Stable identifier of a catalog check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckId {
    /// Skill file exists.
    SkillMdExists,
    /// Skill file within the hard line ceiling.
    SkillMdLineLimit,
    /// Skill file within the guideline line ceiling.
    SkillMdGuidelineLimit,
    /// Skill file opens with frontmatter.
    SkillMdFrontmatter,
    /// Skill file declares its name.
    SkillMdName,
    /// Skill file declares required frontmatter fields.
    SkillMdFrontmatterFields,
    /// Skill file contains required sections.
    SkillMdSections,
    /// Example sections contain code blocks.
    SkillMdCodeExamples,
    /// Routing table stays small.
    SkillMdRoutingTable,
    /// Checked links resolve.
    SkillMdLinks,
    /// At least one rule file exists.
    RulesPresent,
    /// Rule files within the line ceiling.
    RulesLineLimit,
    /// Rule files open with frontmatter.
    RulesFrontmatter,
    /// Rule files carry a title.
    RulesTitle,
    /// Rule files carry an impact level.
    RulesImpact,
    /// Rule files live in known categories.
    RulesCategories,
    /// Required directories exist.
    StructureRequiredDirs,
    /// Version config directory and at least one config exist.
    StructureVersionConfigPresent,
    /// Every version config exists.
    StructureVersionConfigs,
    /// Version configs define required keys.
    StructureVersionConfigFields,
    /// Enough scenario files exist.
    ScenariosCount,
    /// Scenarios parse and match the scenario schema.
    ScenariosSchema,
    /// A simple scenario exists.
    ScenariosSimplePresent,
    /// A complex scenario exists.
    ScenariosComplexPresent,
    /// Scenarios expect a bounded, non-zero number of tools.
    ScenariosToolCount,
    /// Expected tools resolve to rule files.
    ScenariosToolsResolve,
    /// Scenarios carry a known complexity rating.
    ScenariosComplexity,
    /// Scenarios carry a positive token ceiling.
    ScenariosMaxTokens,
    /// Scenario contracts hold.
    ScenariosContracts,
    /// Rule group files exist.
    RuleGroupsRequiredFiles,
    /// Rule group conditional terms hold.
    RuleGroupsConditionalTerms,
    /// Rule group members reference related rules.
    RuleGroupsCrossLinks,
    /// Document contracts hold.
    DocumentsContracts,
    /// Skill file growth within tolerance.
    RegressionSkillMdLines,
    /// Rule count not below the baseline.
    RegressionRuleFileCount,
}

impl CheckId {
    /// Every check in catalog order.
    pub const ALL: [Self; 35] = [
        Self::SkillMdExists,
        Self::SkillMdLineLimit,
        Self::SkillMdGuidelineLimit,
        Self::SkillMdFrontmatter,
        Self::SkillMdName,
        Self::SkillMdFrontmatterFields,
        Self::SkillMdSections,
        Self::SkillMdCodeExamples,
        Self::SkillMdRoutingTable,
        Self::SkillMdLinks,
        Self::RulesPresent,
        Self::RulesLineLimit,
        Self::RulesFrontmatter,
        Self::RulesTitle,
        Self::RulesImpact,
        Self::RulesCategories,
        Self::StructureRequiredDirs,
        Self::StructureVersionConfigPresent,
        Self::StructureVersionConfigs,
        Self::StructureVersionConfigFields,
        Self::ScenariosCount,
        Self::ScenariosSchema,
        Self::ScenariosSimplePresent,
        Self::ScenariosComplexPresent,
        Self::ScenariosToolCount,
        Self::ScenariosToolsResolve,
        Self::ScenariosComplexity,
        Self::ScenariosMaxTokens,
        Self::ScenariosContracts,
        Self::RuleGroupsRequiredFiles,
        Self::RuleGroupsConditionalTerms,
        Self::RuleGroupsCrossLinks,
        Self::DocumentsContracts,
        Self::RegressionSkillMdLines,
        Self::RegressionRuleFileCount,
    ];

    /// Returns the dotted check identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SkillMdExists => "skill_md.exists",
            Self::SkillMdLineLimit => "skill_md.line_limit",
            Self::SkillMdGuidelineLimit => "skill_md.guideline_limit",
            Self::SkillMdFrontmatter => "skill_md.frontmatter",
            Self::SkillMdName => "skill_md.name",
            Self::SkillMdFrontmatterFields => "skill_md.frontmatter_fields",
            Self::SkillMdSections => "skill_md.sections",
            Self::SkillMdCodeExamples => "skill_md.code_examples",
            Self::SkillMdRoutingTable => "skill_md.routing_table",
            Self::SkillMdLinks => "skill_md.links",
            Self::RulesPresent => "rules.present",
            Self::RulesLineLimit => "rules.line_limit",
            Self::RulesFrontmatter => "rules.frontmatter",
            Self::RulesTitle => "rules.title",
            Self::RulesImpact => "rules.impact",
            Self::RulesCategories => "rules.categories",
            Self::StructureRequiredDirs => "structure.required_dirs",
            Self::StructureVersionConfigPresent => "structure.version_config_present",
            Self::StructureVersionConfigs => "structure.version_configs",
            Self::StructureVersionConfigFields => "structure.version_config_fields",
            Self::ScenariosCount => "scenarios.count",
            Self::ScenariosSchema => "scenarios.schema",
            Self::ScenariosSimplePresent => "scenarios.simple_present",
            Self::ScenariosComplexPresent => "scenarios.complex_present",
            Self::ScenariosToolCount => "scenarios.tool_count",
            Self::ScenariosToolsResolve => "scenarios.tools_resolve",
            Self::ScenariosComplexity => "scenarios.complexity",
            Self::ScenariosMaxTokens => "scenarios.max_tokens",
            Self::ScenariosContracts => "scenarios.contracts",
            Self::RuleGroupsRequiredFiles => "rule_groups.required_files",
            Self::RuleGroupsConditionalTerms => "rule_groups.conditional_terms",
            Self::RuleGroupsCrossLinks => "rule_groups.cross_links",
            Self::DocumentsContracts => "documents.contracts",
            Self::RegressionSkillMdLines => "regression.skill_md_lines",
            Self::RegressionRuleFileCount => "regression.rule_file_count",
        }
    }

    /// Returns the suite the check belongs to.
    #[must_use]
    pub const fn suite(self) -> CheckSuite {
        match self {
            Self::SkillMdExists
            | Self::SkillMdLineLimit
            | Self::SkillMdGuidelineLimit
            | Self::SkillMdFrontmatter
            | Self::SkillMdName
            | Self::SkillMdFrontmatterFields
            | Self::SkillMdSections
            | Self::SkillMdCodeExamples
            | Self::SkillMdRoutingTable
            | Self::SkillMdLinks => CheckSuite::SkillMd,
            Self::RulesPresent
            | Self::RulesLineLimit
            | Self::RulesFrontmatter
            | Self::RulesTitle
            | Self::RulesImpact
            | Self::RulesCategories => CheckSuite::Rules,
            Self::StructureRequiredDirs
            | Self::StructureVersionConfigPresent
            | Self::StructureVersionConfigs
            | Self::StructureVersionConfigFields => CheckSuite::Structure,
            Self::ScenariosCount
            | Self::ScenariosSchema
            | Self::ScenariosSimplePresent
            | Self::ScenariosComplexPresent
            | Self::ScenariosToolCount
            | Self::ScenariosToolsResolve
            | Self::ScenariosComplexity
            | Self::ScenariosMaxTokens
            | Self::ScenariosContracts => CheckSuite::Scenarios,
            Self::RuleGroupsRequiredFiles
            | Self::RuleGroupsConditionalTerms
            | Self::RuleGroupsCrossLinks => CheckSuite::RuleGroups,
            Self::DocumentsContracts => CheckSuite::Documents,
            Self::RegressionSkillMdLines | Self::RegressionRuleFileCount => CheckSuite::Regression,
        }
    }

    /// Returns a one-line description of the check.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::SkillMdExists => "skill file exists",
            Self::SkillMdLineLimit => "skill file stays within skill.max_lines",
            Self::SkillMdGuidelineLimit => "skill file stays within skill.guideline_max_lines",
            Self::SkillMdFrontmatter => "skill file opens with YAML frontmatter",
            Self::SkillMdName => "skill file declares `name: <skill>`",
            Self::SkillMdFrontmatterFields => "skill file declares every required field",
            Self::SkillMdSections => "skill file contains every required section",
            Self::SkillMdCodeExamples => "example sections contain a fenced code block",
            Self::SkillMdRoutingTable => "table rows stay below skill.max_table_rows",
            Self::SkillMdLinks => "checked links point at existing files",
            Self::RulesPresent => "at least one rule file exists",
            Self::RulesLineLimit => "rule files stay within rules.max_lines",
            Self::RulesFrontmatter => "rule files open with YAML frontmatter",
            Self::RulesTitle => "rule files carry a title",
            Self::RulesImpact => "rule files carry an impact level",
            Self::RulesCategories => "rule files live in a known category directory",
            Self::StructureRequiredDirs => "required directories exist",
            Self::StructureVersionConfigPresent => {
                "version config directory and at least one version config exist"
            }
            Self::StructureVersionConfigs => "every version config exists",
            Self::StructureVersionConfigFields => "version configs define every required key",
            Self::ScenariosCount => "enough scenario files exist",
            Self::ScenariosSchema => "scenarios parse and match the scenario schema",
            Self::ScenariosSimplePresent => "a simple scenario exists",
            Self::ScenariosComplexPresent => "a complex scenario exists",
            Self::ScenariosToolCount => "scenarios expect between 1 and max_tools - 1 tools",
            Self::ScenariosToolsResolve => "expected tools resolve to rule files",
            Self::ScenariosComplexity => "scenarios carry a known complexity rating",
            Self::ScenariosMaxTokens => "scenarios declare a positive metrics.max_tokens",
            Self::ScenariosContracts => "scenario contracts hold",
            Self::RuleGroupsRequiredFiles => "rule group files exist",
            Self::RuleGroupsConditionalTerms => "rule group conditional terms hold",
            Self::RuleGroupsCrossLinks => "rule group members reference related rules",
            Self::DocumentsContracts => "document contracts hold",
            Self::RegressionSkillMdLines => "skill file growth stays within tolerance",
            Self::RegressionRuleFileCount => "rule count does not drop below the baseline",
        }
    }
}

impl Serialize for CheckId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Status of one evaluated check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    /// No findings.
    Pass,
    /// At least one finding.
    Fail,
    /// Not evaluated because its input is unavailable.
    Skip,
}

impl CheckStatus {
    /// Returns the status label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Skip => "skip",
        }
    }
}

/// One offending item reported by a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// File, scenario, or value the finding concerns.
    pub subject: String,
    /// What is wrong.
    pub message: String,
}

impl Finding {
    /// Creates a finding.
    #[must_use]
    pub fn new(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            message: message.into(),
        }
    }
}

/// Result of one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    /// Check identifier.
    pub check_id: CheckId,
    /// Owning suite.
    pub suite: CheckSuite,
    /// Evaluated status.
    pub status: CheckStatus,
    /// Offending items.
    pub findings: Vec<Finding>,
    /// Reason a check was skipped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl CheckOutcome {
    /// Builds an outcome that fails when any finding is present.
    #[must_use]
    pub fn from_findings(check_id: CheckId, findings: Vec<Finding>) -> Self {
        let status = if findings.is_empty() { CheckStatus::Pass } else { CheckStatus::Fail };
        Self {
            check_id,
            suite: check_id.suite(),
            status,
            findings,
            note: None,
        }
    }

    /// Builds a skipped outcome.
    #[must_use]
    pub fn skipped(check_id: CheckId, note: impl Into<String>) -> Self {
        Self {
            check_id,
            suite: check_id.suite(),
            status: CheckStatus::Skip,
            findings: Vec::new(),
            note: Some(note.into()),
        }
    }
}

/// Summary of a check run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    /// Bundle name.
    pub bundle: String,
    /// Evaluated suites.
    pub suites: Vec<CheckSuite>,
    /// Number of passing checks.
    pub passed: usize,
    /// Number of failing checks.
    pub failed: usize,
    /// Number of skipped checks.
    pub skipped: usize,
    /// Per-check outcomes.
    pub outcomes: Vec<CheckOutcome>,
}

impl CheckReport {
    /// Builds a report and tallies statuses.
    #[must_use]
    pub fn new(bundle: String, suites: Vec<CheckSuite>, outcomes: Vec<CheckOutcome>) -> Self {
        let count = |status: CheckStatus| outcomes.iter().filter(|o| o.status == status).count();
        Self {
            bundle,
            suites,
            passed: count(CheckStatus::Pass),
            failed: count(CheckStatus::Fail),
            skipped: count(CheckStatus::Skip),
            outcomes,
        }
    }

    /// Returns true when no check failed.
    #[must_use]
    pub const fn is_passing(&self) -> bool {
        self.failed == 0
    }

    /// Returns the outcome for a check, when it was evaluated.
    #[must_use]
    pub fn outcome(&self, check_id: CheckId) -> Option<&CheckOutcome> {
        self.outcomes.iter().find(|outcome| outcome.check_id == check_id)
    }
}

// ============================================================================
// SECTION: Runner
// ============================================================================

/// Evaluates the check catalog for one bundle.
#[derive(Debug, Clone, Copy)]
pub struct CheckRunner<'a> {
    /// Bundle under evaluation.
    bundle: &'a SkillBundle,
    /// Policy to evaluate against.
    policy: &'a GatePolicy,
    /// Baseline for regression checks.
    baseline: Option<&'a BaselineRecord>,
}

impl<'a> CheckRunner<'a> {
    /// Creates a runner without a baseline.
    #[must_use]
    pub const fn new(bundle: &'a SkillBundle, policy: &'a GatePolicy) -> Self {
        Self {
            bundle,
            policy,
            baseline: None,
        }
    }

    /// Attaches a baseline for regression checks.
    #[must_use]
    pub const fn with_baseline(mut self, baseline: Option<&'a BaselineRecord>) -> Self {
        self.baseline = baseline;
        self
    }

    /// Runs the selected suites; an empty selection runs every suite.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError`] when bundle content cannot be loaded or scanned.
    pub fn run(&self, selection: &[CheckSuite]) -> Result<CheckReport, CheckError> {
        let selected: Vec<CheckSuite> = CheckSuite::ALL
            .into_iter()
            .filter(|suite| selection.is_empty() || selection.contains(suite))
            .collect();
        let context = CheckContext::load(self.bundle, self.policy, self.baseline, &selected)?;
        let mut outcomes = Vec::new();
        for suite in &selected {
            outcomes.extend(suites::evaluate_suite(*suite, &context)?);
        }
        Ok(CheckReport::new(self.bundle.name(), selected, outcomes))
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
