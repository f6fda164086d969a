// crates/skill-gate-core/src/runtime/suites/rules.rs
// ============================================================================
// Module: Rule File Suite
// Description: Checks on every non-template rule file.
// Purpose: Enforce size, frontmatter, title, impact, and category conventions.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Template rules (names starting with `_`) are never evaluated here.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::document::MatchSet;
use crate::runtime::checks::CheckId;
use crate::runtime::checks::CheckOutcome;
use crate::runtime::checks::Finding;
use crate::runtime::suites::CheckContext;
use crate::runtime::suites::LoadedRule;

// ============================================================================
// SECTION: Evaluation
// ============================================================================

/// Evaluates the rule file suite.
pub(super) fn evaluate(context: &CheckContext<'_>) -> Vec<CheckOutcome> {
    let policy = &context.policy.rules;
    let present = if context.rule_files.is_empty() {
        vec![Finding::new(context.policy.layout.rules_dir.as_str(), "no rule files found")]
    } else {
        Vec::new()
    };

    vec![
        CheckOutcome::from_findings(CheckId::RulesPresent, present),
        CheckOutcome::from_findings(
            CheckId::RulesLineLimit,
            collect(context, |rule| {
                let lines = rule.document.line_count();
                (lines > policy.max_lines)
                    .then(|| format!("has {lines} lines, limit is {}", policy.max_lines))
            }),
        ),
        CheckOutcome::from_findings(
            CheckId::RulesFrontmatter,
            collect(context, |rule| {
                (!rule.document.has_frontmatter()).then(|| "missing frontmatter".to_string())
            }),
        ),
        CheckOutcome::from_findings(
            CheckId::RulesTitle,
            collect(context, |rule| missing_terms(rule, &policy.title)),
        ),
        CheckOutcome::from_findings(
            CheckId::RulesImpact,
            collect(context, |rule| missing_terms(rule, &policy.impact)),
        ),
        CheckOutcome::from_findings(
            CheckId::RulesCategories,
            collect(context, |rule| {
                (!policy.categories.contains(&rule.file.category))
                    .then(|| format!("in invalid category `{}`", rule.file.category))
            }),
        ),
    ]
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Runs `probe` over every loaded rule and collects its messages as findings.
fn collect<F>(context: &CheckContext<'_>, probe: F) -> Vec<Finding>
where
    F: Fn(&LoadedRule) -> Option<String>,
{
    context
        .rules
        .iter()
        .filter_map(|rule| probe(rule).map(|message| Finding::new(&rule.file.relative, message)))
        .collect()
}

/// Reports an unsatisfied match set.
fn missing_terms(rule: &LoadedRule, set: &MatchSet) -> Option<String> {
    (!set.is_satisfied_by(&rule.document)).then(|| format!("missing {}", set.describe()))
}
