// crates/skill-gate-core/src/core/bundle.rs
// ============================================================================
// Module: Skill Gate Bundle
// Description: On-disk layout of a skill bundle and bounded file loading.
// Purpose: Resolve well-known bundle paths and load documents, rules, and scenarios.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! A [`SkillBundle`] is a skill root directory interpreted through a
//! [`BundleLayout`]. It resolves the skill file, the rules tree, the scenario
//! directory, and the results directory, and it loads files with hard size
//! limits.
//!
//! ## Invariants
//! - Rule discovery is recursive, sorted, skips symlinks, and visits each
//!   canonical directory once.
//! - Rule files whose name starts with `_` are templates.
//! - Every read is bounded by [`BundleLimits::max_file_bytes`].
//!
//! Security posture: bundle content is untrusted input; reads are size-capped
//! and directory walks cannot loop through symlinks.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashSet;
use std::fs;
use std::fs::File;
use std::io::Read;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::document::TextDocument;
use crate::core::scenario::ScenarioFile;
use crate::core::scenario::parse_scenario;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default skill file name at the bundle root.
pub const DEFAULT_SKILL_FILE: &str = "SKILL.md";
/// Default rules directory.
pub const DEFAULT_RULES_DIR: &str = "rules";
/// Default scenario directory.
pub const DEFAULT_SCENARIOS_DIR: &str = "tests/fixtures/scenarios";
/// Default results directory.
pub const DEFAULT_RESULTS_DIR: &str = "tests/results";
/// Default maximum size of a single bundle file.
pub const DEFAULT_MAX_FILE_BYTES: usize = 1024 * 1024;
/// Default maximum number of scenario files.
pub const DEFAULT_MAX_SCENARIOS: usize = 1024;
/// Default maximum number of rule files.
pub const DEFAULT_MAX_RULE_FILES: usize = 4096;
/// Prefix that marks a rule file as a template.
pub const TEMPLATE_PREFIX: char = '_';
/// Extension of rule files.
const RULE_EXTENSION: &str = "md";
/// Extension of scenario files.
const SCENARIO_EXTENSION: &str = "yaml";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while loading bundle files.
#[derive(Debug, Error)]
pub enum BundleError {
    /// The bundle root is missing or not a directory.
    #[error("bundle root is not a directory: {0}")]
    NotADirectory(String),
    /// Filesystem error on a bundle path.
    #[error("bundle io error at {path}: {message}")]
    Io {
        /// Path that failed.
        path: String,
        /// Error detail.
        message: String,
    },
    /// File exceeds the configured size limit.
    #[error("bundle file {path} is {size} bytes (limit {limit})")]
    TooLarge {
        /// Path that exceeded the limit.
        path: String,
        /// Actual size in bytes.
        size: u64,
        /// Configured limit in bytes.
        limit: usize,
    },
    /// File content is not valid UTF-8.
    #[error("bundle file is not utf-8: {0}")]
    NotUtf8(String),
    /// A discovery limit was exceeded.
    #[error("bundle limit exceeded: {0}")]
    LimitExceeded(String),
}

// ============================================================================
// SECTION: Layout
// ============================================================================

/// Bundle-relative locations of the well-known files and directories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BundleLayout {
    /// Skill file at the bundle root.
    pub skill_file: String,
    /// Rules directory.
    pub rules_dir: String,
    /// Scenario directory (non-recursive).
    pub scenarios_dir: String,
    /// Results directory for baselines and reports.
    pub results_dir: String,
}

impl Default for BundleLayout {
    fn default() -> Self {
        Self {
            skill_file: DEFAULT_SKILL_FILE.to_string(),
            rules_dir: DEFAULT_RULES_DIR.to_string(),
            scenarios_dir: DEFAULT_SCENARIOS_DIR.to_string(),
            results_dir: DEFAULT_RESULTS_DIR.to_string(),
        }
    }
}

/// Resource limits applied while loading a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BundleLimits {
    /// Maximum size of any single file in bytes.
    pub max_file_bytes: usize,
    /// Maximum number of scenario files.
    pub max_scenarios: usize,
    /// Maximum number of rule files.
    pub max_rule_files: usize,
}

impl Default for BundleLimits {
    fn default() -> Self {
        Self {
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            max_scenarios: DEFAULT_MAX_SCENARIOS,
            max_rule_files: DEFAULT_MAX_RULE_FILES,
        }
    }
}

// ============================================================================
// SECTION: Rule Files
// ============================================================================

/// Rule file discovered under the rules directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleFile {
    /// Full path on disk.
    pub path: PathBuf,
    /// Path relative to the rules directory, `/`-separated.
    pub relative: String,
    /// File name.
    pub file_name: String,
    /// Name of the directory that directly contains the file.
    pub category: String,
    /// True when the file name marks a template.
    pub is_template: bool,
}

// ============================================================================
// SECTION: Bundle
// ============================================================================

/// Skill bundle rooted at a directory.
#[derive(Debug, Clone)]
pub struct SkillBundle {
    /// Canonical bundle root.
    root: PathBuf,
    /// Bundle layout.
    layout: BundleLayout,
    /// Loading limits.
    limits: BundleLimits,
}

impl SkillBundle {
    /// Opens a bundle rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::NotADirectory`] when `root` is not a directory.
    pub fn open(root: &Path, layout: BundleLayout) -> Result<Self, BundleError> {
        if !root.is_dir() {
            return Err(BundleError::NotADirectory(root.display().to_string()));
        }
        let root = root.canonicalize().map_err(|err| io_error(root, &err))?;
        Ok(Self {
            root,
            layout,
            limits: BundleLimits::default(),
        })
    }

    /// Replaces the loading limits.
    #[must_use]
    pub const fn with_limits(mut self, limits: BundleLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Returns the canonical bundle root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the bundle layout.
    #[must_use]
    pub const fn layout(&self) -> &BundleLayout {
        &self.layout
    }

    /// Returns the loading limits.
    #[must_use]
    pub const fn limits(&self) -> &BundleLimits {
        &self.limits
    }

    /// Returns the bundle directory name.
    #[must_use]
    pub fn name(&self) -> String {
        self.root
            .file_name()
            .map_or_else(|| self.root.display().to_string(), |name| name.to_string_lossy().into_owned())
    }

    /// Resolves a bundle-relative path.
    #[must_use]
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Returns the rules directory path.
    #[must_use]
    pub fn rules_dir(&self) -> PathBuf {
        self.path(&self.layout.rules_dir)
    }

    /// Returns the scenario directory path.
    #[must_use]
    pub fn scenarios_dir(&self) -> PathBuf {
        self.path(&self.layout.scenarios_dir)
    }

    /// Returns the results directory path.
    #[must_use]
    pub fn results_dir(&self) -> PathBuf {
        self.path(&self.layout.results_dir)
    }

    /// Returns true when the bundle-relative path exists.
    #[must_use]
    pub fn exists(&self, relative: &str) -> bool {
        self.path(relative).exists()
    }

    /// Loads a bundle-relative text file, `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError`] when the file exists but cannot be read.
    pub fn read_document(&self, relative: &str) -> Result<Option<TextDocument>, BundleError> {
        let path = self.path(relative);
        if !path.is_file() {
            return Ok(None);
        }
        self.load_document(&path).map(Some)
    }

    /// Loads the skill file, `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError`] when the file exists but cannot be read.
    pub fn skill_md(&self) -> Result<Option<TextDocument>, BundleError> {
        self.read_document(&self.layout.skill_file)
    }

    /// Loads a text file by absolute path with the size limit applied.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError`] on I/O failure, oversize content, or invalid UTF-8.
    pub fn load_document(&self, path: &Path) -> Result<TextDocument, BundleError> {
        let content = read_text_with_limit(path, self.limits.max_file_bytes)?;
        Ok(TextDocument::new(path, content))
    }

    /// Lists every Markdown rule file under the rules directory.
    ///
    /// Templates are included and flagged. A missing rules directory yields
    /// an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError`] on I/O failure or when the rule limit is exceeded.
    pub fn rule_files(&self) -> Result<Vec<RuleFile>, BundleError> {
        let rules_dir = self.rules_dir();
        if !rules_dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut paths = Vec::new();
        let mut visited = HashSet::new();
        collect_files(&rules_dir, &mut paths, &mut visited, &is_rule_file)?;
        if paths.len() > self.limits.max_rule_files {
            return Err(BundleError::LimitExceeded(format!(
                "{} rule files found (limit {})",
                paths.len(),
                self.limits.max_rule_files
            )));
        }
        Ok(paths.into_iter().map(|path| rule_file(&rules_dir, path)).collect())
    }

    /// Lists every `*.yaml` file directly inside the scenario directory.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError`] on I/O failure or when the scenario limit is exceeded.
    pub fn scenario_paths(&self) -> Result<Vec<PathBuf>, BundleError> {
        let dir = self.scenarios_dir();
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut paths = Vec::new();
        for entry in fs::read_dir(&dir).map_err(|err| io_error(&dir, &err))? {
            let entry = entry.map_err(|err| io_error(&dir, &err))?;
            let file_type = entry.file_type().map_err(|err| io_error(&entry.path(), &err))?;
            let path = entry.path();
            if file_type.is_file() && has_extension(&path, SCENARIO_EXTENSION) {
                paths.push(path);
            }
        }
        paths.sort();
        if paths.len() > self.limits.max_scenarios {
            return Err(BundleError::LimitExceeded(format!(
                "{} scenario files found (limit {})",
                paths.len(),
                self.limits.max_scenarios
            )));
        }
        Ok(paths)
    }

    /// Loads and parses every scenario file.
    ///
    /// Parse failures are carried in [`ScenarioFile::document`] rather than
    /// aborting the load.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError`] when a scenario file cannot be read.
    pub fn scenarios(&self) -> Result<Vec<ScenarioFile>, BundleError> {
        let mut scenarios = Vec::new();
        for path in self.scenario_paths()? {
            let content = read_text_with_limit(&path, self.limits.max_file_bytes)?;
            scenarios.push(ScenarioFile {
                file_name: file_name_of(&path),
                document: parse_scenario(&content),
                path,
            });
        }
        Ok(scenarios)
    }

    /// Resolves an expected tool to a file under the rules directory.
    ///
    /// A direct `rules/<tool>` path wins; otherwise any file whose relative
    /// path ends with the tool's path components matches.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError`] on I/O failure while searching.
    pub fn find_rule(&self, tool: &str) -> Result<Option<PathBuf>, BundleError> {
        let rules_dir = self.rules_dir();
        let direct = rules_dir.join(tool);
        if direct.exists() {
            return Ok(Some(direct));
        }
        if !rules_dir.is_dir() {
            return Ok(None);
        }
        let wanted: Vec<&str> = tool.split('/').filter(|part| !part.is_empty()).collect();
        if wanted.is_empty() {
            return Ok(None);
        }
        let mut paths = Vec::new();
        let mut visited = HashSet::new();
        collect_files(&rules_dir, &mut paths, &mut visited, &|_| true)?;
        Ok(paths.into_iter().find(|path| {
            let relative = relative_components(&rules_dir, path);
            relative.len() >= wanted.len()
                && relative[relative.len() - wanted.len()..]
                    .iter()
                    .zip(&wanted)
                    .all(|(have, want)| have == want)
        }))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads a UTF-8 file while enforcing a hard size limit.
///
/// # Errors
///
/// Returns [`BundleError`] on I/O failure, oversize content, or invalid UTF-8.
pub fn read_text_with_limit(path: &Path, max_bytes: usize) -> Result<String, BundleError> {
    let file = File::open(path).map_err(|err| io_error(path, &err))?;
    let size = file.metadata().map_err(|err| io_error(path, &err))?.len();
    let too_large = |size: u64| BundleError::TooLarge {
        path: path.display().to_string(),
        size,
        limit: max_bytes,
    };
    let limit = u64::try_from(max_bytes).map_err(|_| too_large(size))?;
    if size > limit {
        return Err(too_large(size));
    }
    let mut bytes = Vec::new();
    file.take(limit.saturating_add(1))
        .read_to_end(&mut bytes)
        .map_err(|err| io_error(path, &err))?;
    if bytes.len() > max_bytes {
        return Err(too_large(u64::try_from(bytes.len()).unwrap_or(u64::MAX)));
    }
    String::from_utf8(bytes).map_err(|_| BundleError::NotUtf8(path.display().to_string()))
}

/// Recursively collects files accepted by `accept`, sorted per directory.
fn collect_files(
    dir: &Path,
    out: &mut Vec<PathBuf>,
    visited: &mut HashSet<PathBuf>,
    accept: &dyn Fn(&Path) -> bool,
) -> Result<(), BundleError> {
    let canonical = dir.canonicalize().map_err(|err| io_error(dir, &err))?;
    if !visited.insert(canonical) {
        return Ok(());
    }
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(|err| io_error(dir, &err))? {
        let entry = entry.map_err(|err| io_error(dir, &err))?;
        let file_type = entry.file_type().map_err(|err| io_error(&entry.path(), &err))?;
        entries.push((entry.path(), file_type));
    }
    entries.sort_by(|(left, _), (right, _)| left.cmp(right));

    for (path, file_type) in entries {
        if file_type.is_symlink() {
            continue;
        }
        if file_type.is_dir() {
            collect_files(&path, out, visited, accept)?;
            continue;
        }
        if file_type.is_file() && accept(&path) {
            out.push(path);
        }
    }
    Ok(())
}

/// Builds a [`RuleFile`] from a path under the rules directory.
fn rule_file(rules_dir: &Path, path: PathBuf) -> RuleFile {
    let file_name = file_name_of(&path);
    let category = path
        .parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    RuleFile {
        relative: relative_components(rules_dir, &path).join("/"),
        is_template: file_name.starts_with(TEMPLATE_PREFIX),
        file_name,
        category,
        path,
    }
}

/// Returns the normal path components of `path` below `base`.
fn relative_components(base: &Path, path: &Path) -> Vec<String> {
    path.strip_prefix(base)
        .unwrap_or(path)
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}

/// Returns true for Markdown rule files.
fn is_rule_file(path: &Path) -> bool {
    has_extension(path, RULE_EXTENSION)
}

/// Returns true when the path has the given extension.
fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|ext| ext == extension)
}

/// Returns the file name of a path as a string.
fn file_name_of(path: &Path) -> String {
    path.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default()
}

/// Maps an I/O error to a bundle error.
fn io_error(path: &Path, err: &std::io::Error) -> BundleError {
    BundleError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    }
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

    use std::fs;
    use std::path::Path;

    use super::BundleError;
    use super::BundleLayout;
    use super::BundleLimits;
    use super::SkillBundle;
    use super::read_text_with_limit;

    /// Writes a file under `root`, creating parents.
    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn open_rejects_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let err = SkillBundle::open(&dir.path().join("missing"), BundleLayout::default())
            .unwrap_err();
        assert!(matches!(err, BundleError::NotADirectory(_)));
    }

    #[test]
    fn rule_files_are_sorted_recursive_and_flag_templates() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "rules/crud/crud-list.md", "x");
        write(dir.path(), "rules/api/_template.md", "x");
        write(dir.path(), "rules/api/nested/api-auth.md", "x");
        write(dir.path(), "rules/api/notes.txt", "x");
        let bundle = SkillBundle::open(dir.path(), BundleLayout::default()).unwrap();

        let rules = bundle.rule_files().unwrap();
        let relative: Vec<&str> = rules.iter().map(|rule| rule.relative.as_str()).collect();
        assert_eq!(relative, ["api/_template.md", "api/nested/api-auth.md", "crud/crud-list.md"]);
        assert!(rules[0].is_template);
        assert_eq!(rules[1].category, "nested");
        assert_eq!(rules[2].category, "crud");
    }

    #[test]
    fn find_rule_matches_direct_paths_and_suffixes() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "rules/crud/crud-list.md", "x");
        let bundle = SkillBundle::open(dir.path(), BundleLayout::default()).unwrap();

        assert!(bundle.find_rule("crud/crud-list.md").unwrap().is_some());
        assert!(bundle.find_rule("crud-list.md").unwrap().is_some());
        assert!(bundle.find_rule("api/crud-list.md").unwrap().is_none());
        assert!(bundle.find_rule("missing.md").unwrap().is_none());
    }

    #[test]
    fn rule_limit_is_enforced() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "rules/a/one.md", "x");
        write(dir.path(), "rules/a/two.md", "x");
        let limits = BundleLimits {
            max_rule_files: 1,
            ..BundleLimits::default()
        };
        let bundle =
            SkillBundle::open(dir.path(), BundleLayout::default()).unwrap().with_limits(limits);
        assert!(matches!(bundle.rule_files().unwrap_err(), BundleError::LimitExceeded(_)));
    }

    #[test]
    fn bounded_reads_reject_oversize_and_non_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let big = dir.path().join("big.md");
        fs::write(&big, "12345").unwrap();
        assert!(matches!(
            read_text_with_limit(&big, 4).unwrap_err(),
            BundleError::TooLarge { size: 5, limit: 4, .. }
        ));
        assert_eq!(read_text_with_limit(&big, 5).unwrap(), "12345");

        let binary = dir.path().join("binary.md");
        fs::write(&binary, [0xff, 0xfe]).unwrap();
        assert!(matches!(read_text_with_limit(&binary, 16).unwrap_err(), BundleError::NotUtf8(_)));
    }

    #[test]
    fn missing_skill_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = SkillBundle::open(dir.path(), BundleLayout::default()).unwrap();
        assert!(bundle.skill_md().unwrap().is_none());
        assert!(bundle.scenarios().unwrap().is_empty());
    }
}
