// crates/skill-gate-core/src/runtime/suites/mod.rs
// ============================================================================
// Module: Skill Gate Check Suites
// Description: Shared evaluation context and per-suite dispatch.
// Purpose: Load bundle content once and route each suite to its evaluator.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! [`CheckContext`] holds the bundle content the selected suites need. Only
//! the inputs a suite reads are loaded, so a run restricted to `structure`
//! never opens rule or scenario files.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod contracts;
mod regression;
mod rules;
mod scenarios;
mod skill_md;
mod structure;

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::bundle::RuleFile;
use crate::core::bundle::SkillBundle;
use crate::core::document::TextDocument;
use crate::core::policy::GatePolicy;
use crate::core::scenario::ScenarioFile;
use crate::runtime::baseline::BaselineRecord;
use crate::runtime::checks::CheckError;
use crate::runtime::checks::CheckOutcome;
use crate::runtime::checks::CheckSuite;

// ============================================================================
// SECTION: Context
// ============================================================================

/// Rule file with its loaded content.
pub(crate) struct LoadedRule {
    /// Discovered rule file.
    pub(crate) file: RuleFile,
    /// Loaded content.
    pub(crate) document: TextDocument,
}

/// Bundle content shared by every suite in a run.
pub(crate) struct CheckContext<'a> {
    /// Bundle under evaluation.
    pub(crate) bundle: &'a SkillBundle,
    /// Policy to evaluate against.
    pub(crate) policy: &'a GatePolicy,
    /// Baseline for regression checks.
    pub(crate) baseline: Option<&'a BaselineRecord>,
    /// Skill file, when present.
    pub(crate) skill_md: Option<TextDocument>,
    /// Every discovered rule file, templates included.
    pub(crate) rule_files: Vec<RuleFile>,
    /// Loaded non-template rules.
    pub(crate) rules: Vec<LoadedRule>,
    /// Parsed scenarios.
    pub(crate) scenarios: Vec<ScenarioFile>,
}

impl<'a> CheckContext<'a> {
    /// Loads the content needed by `suites`.
    pub(crate) fn load(
        bundle: &'a SkillBundle,
        policy: &'a GatePolicy,
        baseline: Option<&'a BaselineRecord>,
        suites: &[CheckSuite],
    ) -> Result<Self, CheckError> {
        let needs = |wanted: &[CheckSuite]| suites.iter().any(|suite| wanted.contains(suite));
        let skill_md = if needs(&[CheckSuite::SkillMd, CheckSuite::Regression]) {
            bundle.skill_md()?
        } else {
            None
        };
        let mut rule_files = Vec::new();
        let mut rules = Vec::new();
        if needs(&[CheckSuite::Rules, CheckSuite::RuleGroups, CheckSuite::Regression]) {
            rule_files = bundle.rule_files()?;
            for file in rule_files.iter().filter(|file| !file.is_template) {
                rules.push(LoadedRule {
                    document: bundle.load_document(&file.path)?,
                    file: file.clone(),
                });
            }
        }
        let scenarios =
            if needs(&[CheckSuite::Scenarios]) { bundle.scenarios()? } else { Vec::new() };
        Ok(Self {
            bundle,
            policy,
            baseline,
            skill_md,
            rule_files,
            rules,
            scenarios,
        })
    }
}

// ============================================================================
// SECTION: Dispatch
// ============================================================================

/// Evaluates every check in `suite`.
pub(crate) fn evaluate_suite(
    suite: CheckSuite,
    context: &CheckContext<'_>,
) -> Result<Vec<CheckOutcome>, CheckError> {
    match suite {
        CheckSuite::SkillMd => skill_md::evaluate(context),
        CheckSuite::Rules => Ok(rules::evaluate(context)),
        CheckSuite::Structure => structure::evaluate(context),
        CheckSuite::Scenarios => scenarios::evaluate(context),
        CheckSuite::RuleGroups => Ok(contracts::evaluate_rule_groups(context)),
        CheckSuite::Documents => contracts::evaluate_documents(context),
        CheckSuite::Regression => Ok(regression::evaluate(context)),
    }
}
