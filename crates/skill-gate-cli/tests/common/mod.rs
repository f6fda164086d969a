// crates/skill-gate-cli/tests/common/mod.rs
// =============================================================================
// Module: CLI Test Helpers
// Description: Scratch bundles and binary invocation helpers.
// Purpose: Drive the `skill-gate` binary against temporary skill bundles.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test fixtures use unwraps for clarity."
)]

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Output;

use tempfile::TempDir;

/// Directory name of fixture bundles; doubles as the expected skill name.
pub const SKILL_NAME: &str = "demo-skill";

/// Skill file that satisfies the default policy.
pub const HEALTHY_SKILL_MD: &str = "---
name: demo-skill
description: Demo skill for CLI tests
---
# Demo Skill

## Iron Laws
1. Never skip validation.

## Quick Start
```bash
composer install
```

## Intent Routing
| Intent | Rule |
|--------|------|
| list page | [crud list](rules/crud/crud-list.md) |
| scaffold | [generate](rules/scaffold/scaffold-generate-code.md) |
";

/// Rule file that satisfies the default policy.
pub const HEALTHY_RULE: &str = "---
title: Rule
impact: HIGH
---
## Rule
Body text.

See Also: [related](../crud/crud-list.md)
";

/// Scratch bundle rooted in a temporary directory.
pub struct Bundle {
    /// Owns the temporary directory.
    dir: TempDir,
    /// Bundle root.
    root: PathBuf,
}

impl Bundle {
    /// Creates an empty bundle directory.
    pub fn empty() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join(SKILL_NAME);
        fs::create_dir_all(&root).unwrap();
        Self {
            dir,
            root,
        }
    }

    /// Creates a bundle that passes every default check.
    pub fn healthy() -> Self {
        let bundle = Self::empty();
        bundle.write("SKILL.md", HEALTHY_SKILL_MD);
        bundle.write("rules/crud/crud-list.md", HEALTHY_RULE);
        bundle.write("rules/crud/_template.md", "template\n");
        bundle.write("rules/scaffold/scaffold-generate-code.md", HEALTHY_RULE);
        fs::create_dir_all(bundle.root.join("_shared/templates/common")).unwrap();
        bundle.write("_shared/config/v13.yaml", "version: '1.3'\nphp_requirement: '>=7.2'\n");
        bundle.write("_shared/config/v14.yaml", "version: '1.4'\nphp_requirement: '>=8.0'\n");
        bundle.write(
            "tests/fixtures/scenarios/simple_search.yaml",
            &scenario("Search list", "simple", &["crud-list.md"]),
        );
        bundle.write(
            "tests/fixtures/scenarios/complex_module.yaml",
            &scenario("Create module", "complex", &["crud/crud-list.md", "scaffold-generate-code.md"]),
        );
        bundle.write(
            "tests/fixtures/scenarios/medium_api.yaml",
            &scenario("Api endpoint", "medium", &["crud/crud-list.md"]),
        );
        bundle
    }

    /// Returns the bundle root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns a scratch path next to the bundle.
    pub fn outside(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Returns a path under the default results directory.
    pub fn result(&self, name: &str) -> PathBuf {
        self.root.join("tests/results").join(name)
    }

    /// Writes a bundle-relative file, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    /// Removes a bundle-relative file.
    pub fn remove(&self, relative: &str) {
        fs::remove_file(self.root.join(relative)).unwrap();
    }

    /// Runs a bundle command with `--bundle` pointing at this bundle.
    pub fn run(&self, command: &str, extra: &[&str]) -> Output {
        let bundle = self.root.display().to_string();
        let mut args = vec![command, "--bundle", bundle.as_str()];
        args.extend_from_slice(extra);
        skill_gate(&args)
    }
}

/// Renders a scenario file.
pub fn scenario(name: &str, complexity: &str, tools: &[&str]) -> String {
    let mut out = format!("name: {name}\ncomplexity: {complexity}\nexpected_tools:\n");
    for tool in tools {
        out.push_str(&format!("  - {tool}\n"));
    }
    out.push_str("metrics:\n  max_tokens: 2000\n");
    out
}

/// Runs the binary with a clean environment for config and locale overrides.
pub fn skill_gate(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_skill-gate"))
        .args(args)
        .env_remove("SKILL_GATE_CONFIG")
        .env_remove("SKILL_GATE_LANG")
        .output()
        .expect("run skill-gate")
}

/// Returns stdout as UTF-8 text.
pub fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

/// Returns stderr as UTF-8 text.
pub fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}
