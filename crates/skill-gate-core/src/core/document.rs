// crates/skill-gate-core/src/core/document.rs
// ============================================================================
// Module: Skill Gate Text Documents
// Description: Loaded text files with substring, section, link, and table scanning.
// Purpose: Give checks a single text-scanning surface over bundle files.
// Dependencies: regex, serde, thiserror
// ============================================================================

//! ## Overview
//! A [`TextDocument`] is the content of one bundle file plus the scanning
//! helpers the checks need. Scanning is plain text: substrings, newline
//! counts, `##` headings, `[text](target)` links, and `|` table rows. No
//! Markdown tree is ever built.
//!
//! ## Invariants
//! - Line count is the number of `\n` characters plus one, so empty content
//!   counts as one line.
//! - Case-insensitive matching lowercases both sides before comparing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Delimiter that opens YAML frontmatter.
pub const FRONTMATTER_DELIMITER: &str = "---";

/// Fence marker for Markdown code blocks.
pub const CODE_FENCE: &str = "```";

/// Marker that identifies a table separator row.
const TABLE_SEPARATOR: &str = "---";

/// Pattern for inline Markdown links.
const LINK_PATTERN: &str = r"\[([^\]]+)\]\(([^)]+)\)";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while scanning document text.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// A scanning pattern failed to compile.
    #[error("document pattern error: {0}")]
    Pattern(String),
}

// ============================================================================
// SECTION: Types
// ============================================================================

/// Loaded text file from a skill bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDocument {
    /// Absolute or bundle-relative path of the file.
    path: PathBuf,
    /// UTF-8 file content.
    content: String,
}

/// Inline Markdown link found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownLink {
    /// Link text between the brackets.
    pub text: String,
    /// Link target between the parentheses.
    pub target: String,
}

/// Group of terms of which at least `min` must occur in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatchSet {
    /// Human-readable label used in findings.
    #[serde(default)]
    pub label: String,
    /// Case-sensitive terms.
    #[serde(default)]
    pub any: Vec<String>,
    /// Case-insensitive terms.
    #[serde(default)]
    pub any_ci: Vec<String>,
    /// Minimum number of distinct terms that must occur.
    #[serde(default = "default_match_min")]
    pub min: usize,
}

// ============================================================================
// SECTION: Text Document
// ============================================================================

impl TextDocument {
    /// Creates a document from its path and content.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Returns the document path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the document content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the file name component, or the full path when there is none.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.path.file_name().map_or_else(
            || self.path.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        )
    }

    /// Returns the line count (newlines plus one).
    #[must_use]
    pub fn line_count(&self) -> usize {
        line_count(&self.content)
    }

    /// Returns true when the content opens with YAML frontmatter.
    #[must_use]
    pub fn has_frontmatter(&self) -> bool {
        self.content.starts_with(FRONTMATTER_DELIMITER)
    }

    /// Returns true when `term` occurs verbatim.
    #[must_use]
    pub fn contains(&self, term: &str) -> bool {
        self.content.contains(term)
    }

    /// Returns true when `term` occurs ignoring case.
    #[must_use]
    pub fn contains_ci(&self, term: &str) -> bool {
        self.content.to_lowercase().contains(&term.to_lowercase())
    }

    /// Returns the text following the first `## <heading>` up to the next
    /// `##` marker or the end of the document. Heading match ignores case.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Pattern`] when the section pattern cannot be built.
    pub fn section_body(&self, heading: &str) -> Result<Option<&str>, DocumentError> {
        let marker = regex::escape(&format!("## {heading}"));
        let pattern = Regex::new(&format!(r"(?is){marker}(.*?)(?:##|\z)"))
            .map_err(|err| DocumentError::Pattern(err.to_string()))?;
        Ok(pattern
            .captures(&self.content)
            .and_then(|captures| captures.get(1))
            .map(|body| body.as_str()))
    }

    /// Returns every inline `[text](target)` link in document order.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Pattern`] when the link pattern cannot be built.
    pub fn markdown_links(&self) -> Result<Vec<MarkdownLink>, DocumentError> {
        let pattern = link_pattern()?;
        Ok(pattern
            .captures_iter(&self.content)
            .map(|captures| MarkdownLink {
                text: captures.get(1).map_or_else(String::new, |m| m.as_str().to_string()),
                target: captures.get(2).map_or_else(String::new, |m| m.as_str().to_string()),
            })
            .collect())
    }

    /// Returns table data rows: lines containing `|` that are neither
    /// headings nor separator rows.
    #[must_use]
    pub fn table_rows(&self) -> Vec<&str> {
        self.content
            .split('\n')
            .filter(|line| {
                line.contains('|')
                    && !line.trim().starts_with('#')
                    && !line.contains(TABLE_SEPARATOR)
            })
            .collect()
    }
}

// ============================================================================
// SECTION: Match Sets
// ============================================================================

impl MatchSet {
    /// Creates a match set satisfied by any one case-sensitive term.
    #[must_use]
    pub fn any_of(label: &str, terms: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            any: terms.iter().map(|term| (*term).to_string()).collect(),
            any_ci: Vec::new(),
            min: 1,
        }
    }

    /// Adds case-insensitive terms.
    #[must_use]
    pub fn with_ci(mut self, terms: &[&str]) -> Self {
        self.any_ci.extend(terms.iter().map(|term| (*term).to_string()));
        self
    }

    /// Sets the minimum number of terms required.
    #[must_use]
    pub const fn with_min(mut self, min: usize) -> Self {
        self.min = min;
        self
    }

    /// Returns the total number of configured terms.
    #[must_use]
    pub fn term_count(&self) -> usize {
        self.any.len() + self.any_ci.len()
    }

    /// Counts the configured terms that occur in `document`.
    #[must_use]
    pub fn count_matches(&self, document: &TextDocument) -> usize {
        let sensitive = self.any.iter().filter(|term| document.contains(term)).count();
        if self.any_ci.is_empty() {
            return sensitive;
        }
        let lowered = document.content().to_lowercase();
        let insensitive =
            self.any_ci.iter().filter(|term| lowered.contains(&term.to_lowercase())).count();
        sensitive + insensitive
    }

    /// Returns true when at least `min` terms occur.
    #[must_use]
    pub fn is_satisfied_by(&self, document: &TextDocument) -> bool {
        self.count_matches(document) >= self.min
    }

    /// Returns the label, or the joined terms when no label is set.
    #[must_use]
    pub fn describe(&self) -> String {
        if !self.label.is_empty() {
            return self.label.clone();
        }
        self.any.iter().chain(self.any_ci.iter()).cloned().collect::<Vec<_>>().join(" | ")
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Counts lines as newlines plus one.
#[must_use]
pub fn line_count(text: &str) -> usize {
    text.bytes().filter(|byte| *byte == b'\n').count() + 1
}

/// Default minimum for match sets.
const fn default_match_min() -> usize {
    1
}

/// Returns the compiled link pattern.
fn link_pattern() -> Result<&'static Regex, DocumentError> {
    static PATTERN: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(LINK_PATTERN))
        .as_ref()
        .map_err(|err| DocumentError::Pattern(err.to_string()))
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

    use super::MatchSet;
    use super::TextDocument;
    use super::line_count;

    /// Builds an in-memory SKILL.md document.
    fn doc(content: &str) -> TextDocument {
        TextDocument::new("SKILL.md", content)
    }

    #[test]
    fn line_count_is_newlines_plus_one() {
        assert_eq!(line_count(""), 1);
        assert_eq!(line_count("a"), 1);
        assert_eq!(line_count("a\n"), 2);
        assert_eq!(line_count("a\nb\nc"), 3);
    }

    #[test]
    fn frontmatter_requires_leading_delimiter() {
        assert!(doc("---\nname: x\n---\n").has_frontmatter());
        assert!(!doc("\n---\nname: x\n").has_frontmatter());
    }

    #[test]
    fn section_body_stops_at_next_heading() {
        let document = doc("# T\n## quick start\n```bash\nrun\n```\n## Next\nno fence");
        let body = document.section_body("Quick Start").unwrap().unwrap();
        assert!(body.contains("```"));
        assert!(!body.contains("no fence"));
    }

    #[test]
    fn section_body_runs_to_end_without_next_heading() {
        let document = doc("## Quick Start\ntext only");
        assert_eq!(document.section_body("Quick Start").unwrap(), Some("\ntext only"));
        assert_eq!(document.section_body("Missing").unwrap(), None);
    }

    #[test]
    fn markdown_links_capture_text_and_target() {
        let document = doc("see [crud](rules/crud/a.md) and [web](https://x.test)");
        let links = document.markdown_links().unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].text, "crud");
        assert_eq!(links[0].target, "rules/crud/a.md");
        assert_eq!(links[1].target, "https://x.test");
    }

    #[test]
    fn table_rows_skip_headings_and_separators() {
        let document = doc("# a | b\n| Intent | Rule |\n|---|---|\n| list | r.md |\ntext");
        assert_eq!(document.table_rows(), vec!["| Intent | Rule |", "| list | r.md |"]);
    }

    #[test]
    fn match_set_counts_distinct_terms() {
        let set = MatchSet::any_of("transaction", &["startTrans", "commit", "rollback"])
            .with_ci(&["checklist"])
            .with_min(3);
        let document = doc("startTrans then commit\n## CHECKLIST");
        assert_eq!(set.count_matches(&document), 3);
        assert!(set.is_satisfied_by(&document));
        assert!(!set.is_satisfied_by(&doc("commit")));
    }

    #[test]
    fn match_set_describe_falls_back_to_terms() {
        let set = MatchSet::any_of("", &["a", "b"]);
        assert_eq!(set.describe(), "a | b");
    }
}
