// crates/skill-gate-core/src/runtime/suites/skill_md.rs
// ============================================================================
// Module: Skill File Suite
// Description: Checks on the bundle's skill file.
// Purpose: Enforce size, frontmatter, section, table, and link conventions.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! When the skill file is missing, `skill_md.exists` fails and every other
//! check in the suite is skipped.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::document::CODE_FENCE;
use crate::core::document::TextDocument;
use crate::runtime::checks::CheckError;
use crate::runtime::checks::CheckId;
use crate::runtime::checks::CheckOutcome;
use crate::runtime::checks::Finding;
use crate::runtime::suites::CheckContext;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Checks that read skill file content.
const CONTENT_CHECKS: [CheckId; 9] = [
    CheckId::SkillMdLineLimit,
    CheckId::SkillMdGuidelineLimit,
    CheckId::SkillMdFrontmatter,
    CheckId::SkillMdName,
    CheckId::SkillMdFrontmatterFields,
    CheckId::SkillMdSections,
    CheckId::SkillMdCodeExamples,
    CheckId::SkillMdRoutingTable,
    CheckId::SkillMdLinks,
];

// ============================================================================
// SECTION: Evaluation
// ============================================================================

/// Evaluates the skill file suite.
pub(super) fn evaluate(context: &CheckContext<'_>) -> Result<Vec<CheckOutcome>, CheckError> {
    let subject = context.policy.layout.skill_file.as_str();
    let Some(document) = context.skill_md.as_ref() else {
        let mut outcomes = vec![CheckOutcome::from_findings(
            CheckId::SkillMdExists,
            vec![Finding::new(subject, "file not found")],
        )];
        outcomes.extend(
            CONTENT_CHECKS
                .into_iter()
                .map(|id| CheckOutcome::skipped(id, format!("{subject} not found"))),
        );
        return Ok(outcomes);
    };

    let policy = &context.policy.skill;
    let lines = document.line_count();
    let expected_name =
        policy.name.clone().unwrap_or_else(|| context.bundle.name());

    Ok(vec![
        CheckOutcome::from_findings(CheckId::SkillMdExists, Vec::new()),
        CheckOutcome::from_findings(
            CheckId::SkillMdLineLimit,
            line_limit_findings(subject, lines, policy.max_lines),
        ),
        CheckOutcome::from_findings(
            CheckId::SkillMdGuidelineLimit,
            line_limit_findings(subject, lines, policy.guideline_max_lines),
        ),
        CheckOutcome::from_findings(
            CheckId::SkillMdFrontmatter,
            require(document.has_frontmatter(), subject, "missing YAML frontmatter"),
        ),
        CheckOutcome::from_findings(
            CheckId::SkillMdName,
            require(
                document.contains(&format!("name: {expected_name}")),
                subject,
                &format!("missing `name: {expected_name}`"),
            ),
        ),
        CheckOutcome::from_findings(
            CheckId::SkillMdFrontmatterFields,
            policy
                .required_fields
                .iter()
                .filter(|field| !document.contains(&format!("{field}:")))
                .map(|field| Finding::new(subject, format!("missing `{field}:` field")))
                .collect(),
        ),
        CheckOutcome::from_findings(
            CheckId::SkillMdSections,
            policy
                .required_sections
                .iter()
                .filter(|section| !document.contains(section))
                .map(|section| Finding::new(subject, format!("missing {section} section")))
                .collect(),
        ),
        CheckOutcome::from_findings(
            CheckId::SkillMdCodeExamples,
            code_example_findings(subject, document, &policy.code_example_sections)?,
        ),
        CheckOutcome::from_findings(
            CheckId::SkillMdRoutingTable,
            routing_table_findings(subject, document, policy.max_table_rows),
        ),
        CheckOutcome::from_findings(CheckId::SkillMdLinks, link_findings(context, document)?),
    ])
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns a finding when `ok` is false.
fn require(ok: bool, subject: &str, message: &str) -> Vec<Finding> {
    if ok { Vec::new() } else { vec![Finding::new(subject, message)] }
}

/// Reports a line count above `limit`.
fn line_limit_findings(subject: &str, lines: usize, limit: usize) -> Vec<Finding> {
    require(lines <= limit, subject, &format!("has {lines} lines, limit is {limit}"))
}

/// Reports example sections that lack a fenced code block.
fn code_example_findings(
    subject: &str,
    document: &TextDocument,
    sections: &[String],
) -> Result<Vec<Finding>, CheckError> {
    let mut findings = Vec::new();
    for heading in sections {
        if let Some(body) = document.section_body(heading)?
            && !body.contains(CODE_FENCE)
        {
            findings.push(Finding::new(subject, format!("{heading} section has no code example")));
        }
    }
    Ok(findings)
}

/// Reports a table with too many rows.
fn routing_table_findings(subject: &str, document: &TextDocument, max_rows: usize) -> Vec<Finding> {
    let rows = document.table_rows().len();
    require(
        rows < max_rows,
        subject,
        &format!("has {rows} table rows, limit is {}", max_rows.saturating_sub(1)),
    )
}

/// Reports checked links whose target does not exist.
fn link_findings(
    context: &CheckContext<'_>,
    document: &TextDocument,
) -> Result<Vec<Finding>, CheckError> {
    let prefixes = &context.policy.skill.checked_link_prefixes;
    Ok(document
        .markdown_links()?
        .into_iter()
        .filter(|link| prefixes.iter().any(|prefix| link.target.starts_with(prefix.as_str())))
        .filter(|link| !context.bundle.path(&link.target).exists())
        .map(|link| Finding::new(link.target, format!("broken link `[{}]`", link.text)))
        .collect())
}
