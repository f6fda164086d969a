// crates/skill-gate-core/src/runtime/suites/contracts.rs
// ============================================================================
// Module: Contract Suites
// Description: Rule group and document contract checks.
// Purpose: Enforce bundle-specific file and term requirements from configuration.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Contracts are configured per bundle. A rule group covers the non-template
//! rules directly inside `rules/<dir>/`; a document contract covers one
//! bundle-relative file. With no contracts configured the checks are skipped.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::document::MatchSet;
use crate::core::document::TextDocument;
use crate::core::policy::DocumentContract;
use crate::core::policy::RuleGroupContract;
use crate::runtime::checks::CheckError;
use crate::runtime::checks::CheckId;
use crate::runtime::checks::CheckOutcome;
use crate::runtime::checks::Finding;
use crate::runtime::suites::CheckContext;
use crate::runtime::suites::LoadedRule;

// ============================================================================
// SECTION: Rule Groups
// ============================================================================

/// Evaluates the rule group suite.
pub(super) fn evaluate_rule_groups(context: &CheckContext<'_>) -> Vec<CheckOutcome> {
    let groups = &context.policy.rule_groups;
    if groups.is_empty() {
        return [
            CheckId::RuleGroupsRequiredFiles,
            CheckId::RuleGroupsConditionalTerms,
            CheckId::RuleGroupsCrossLinks,
        ]
        .into_iter()
        .map(|id| CheckOutcome::skipped(id, "no rule groups configured"))
        .collect();
    }

    let mut required = Vec::new();
    let mut conditional = Vec::new();
    let mut cross_links = Vec::new();
    for group in groups {
        required.extend(required_file_findings(context, group));
        for rule in members(context, group) {
            for term in &group.conditional {
                if rule.document.contains_ci(&term.trigger)
                    && !term.requires.is_satisfied_by(&rule.document)
                {
                    conditional.push(Finding::new(
                        &rule.file.relative,
                        format!("mentions `{}` but lacks {}", term.trigger, term.requires.describe()),
                    ));
                }
            }
            if let Some(set) = &group.cross_links
                && !set.is_satisfied_by(&rule.document)
            {
                cross_links.push(Finding::new(
                    &rule.file.relative,
                    format!("does not reference related rules ({})", set.describe()),
                ));
            }
        }
    }

    vec![
        CheckOutcome::from_findings(CheckId::RuleGroupsRequiredFiles, required),
        CheckOutcome::from_findings(CheckId::RuleGroupsConditionalTerms, conditional),
        CheckOutcome::from_findings(CheckId::RuleGroupsCrossLinks, cross_links),
    ]
}

/// Reports group files missing from the group directory.
fn required_file_findings(context: &CheckContext<'_>, group: &RuleGroupContract) -> Vec<Finding> {
    let dir = context.bundle.rules_dir().join(group_dir(group));
    group
        .required_files
        .iter()
        .filter(|file| !dir.join(file.as_str()).exists())
        .map(|file| {
            Finding::new(
                format!("{}/{file}", group_dir(group)),
                format!("required by rule group `{}`", group.id),
            )
        })
        .collect()
}

/// Returns the loaded rules directly inside the group directory.
fn members<'c>(
    context: &'c CheckContext<'_>,
    group: &RuleGroupContract,
) -> impl Iterator<Item = &'c LoadedRule> {
    let dir = group_dir(group).to_string();
    context.rules.iter().filter(move |rule| {
        rule.file.relative.rsplit_once('/').is_some_and(|(parent, _)| parent == dir)
    })
}

/// Returns the group directory without surrounding slashes.
fn group_dir(group: &RuleGroupContract) -> &str {
    group.dir.trim_matches('/')
}

// ============================================================================
// SECTION: Documents
// ============================================================================

/// Evaluates the document contract suite.
pub(super) fn evaluate_documents(
    context: &CheckContext<'_>,
) -> Result<Vec<CheckOutcome>, CheckError> {
    let contracts = &context.policy.documents;
    if contracts.is_empty() {
        return Ok(vec![CheckOutcome::skipped(
            CheckId::DocumentsContracts,
            "no document contracts configured",
        )]);
    }
    let mut findings = Vec::new();
    for contract in contracts {
        match context.bundle.read_document(&contract.path)? {
            None => findings.push(Finding::new(
                contract.path.as_str(),
                format!("document not found (contract `{}`)", contract.id),
            )),
            Some(document) => findings.extend(document_findings(contract, &document)),
        }
    }
    Ok(vec![CheckOutcome::from_findings(CheckId::DocumentsContracts, findings)])
}

/// Reports missing terms and unsatisfied match sets in a document.
fn document_findings(contract: &DocumentContract, document: &TextDocument) -> Vec<Finding> {
    let subject = contract.path.as_str();
    let missing_terms = contract
        .all
        .iter()
        .filter(|term| !document.contains(term))
        .map(|term| Finding::new(subject, format!("missing `{term}`")));
    let unmet_sets = contract
        .require
        .iter()
        .filter(|set| !set.is_satisfied_by(document))
        .map(|set| Finding::new(subject, unmet_message(set, document)));
    missing_terms.chain(unmet_sets).collect()
}

/// Describes an unsatisfied match set.
fn unmet_message(set: &MatchSet, document: &TextDocument) -> String {
    format!(
        "missing {}: found {} of required {}",
        set.describe(),
        set.count_matches(document),
        set.min
    )
}
