// crates/skill-gate-core/tests/common/mod.rs
// =============================================================================
// Module: Core Test Helpers
// Description: Scratch skill bundles for integration tests.
// Purpose: Build healthy bundles on disk and mutate them per test.
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

use skill_gate_core::BundleLayout;
use skill_gate_core::SkillBundle;
use tempfile::TempDir;

/// Directory name of fixture bundles; doubles as the expected skill name.
pub const SKILL_NAME: &str = "demo-skill";

/// Skill file that satisfies the default policy.
pub const HEALTHY_SKILL_MD: &str = "---
name: demo-skill
description: Demo skill for tests
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
pub struct BundleFixture {
    /// Owns the temporary directory.
    _dir: TempDir,
    /// Bundle root.
    root: PathBuf,
}

impl BundleFixture {
    /// Creates an empty bundle directory.
    pub fn empty() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join(SKILL_NAME);
        fs::create_dir_all(&root).unwrap();
        Self {
            _dir: dir,
            root,
        }
    }

    /// Creates a bundle that passes every default check.
    pub fn healthy() -> Self {
        let fixture = Self::empty();
        fixture.write("SKILL.md", HEALTHY_SKILL_MD);
        fixture.write("rules/crud/crud-list.md", HEALTHY_RULE);
        fixture.write("rules/crud/_template.md", "template without frontmatter\n");
        fixture.write("rules/scaffold/scaffold-generate-code.md", HEALTHY_RULE);
        fixture.mkdir("_shared/templates/common");
        fixture.write("_shared/config/v13.yaml", "version: '1.3'\nphp_requirement: '>=7.2'\n");
        fixture.write("_shared/config/v14.yaml", "version: '1.4'\nphp_requirement: '>=8.0'\n");
        fixture.write(
            "tests/fixtures/scenarios/simple_search.yaml",
            &scenario("Search list", "simple", &["crud-list.md"]),
        );
        fixture.write(
            "tests/fixtures/scenarios/complex_module.yaml",
            &scenario("Create module", "complex", &["crud/crud-list.md", "scaffold-generate-code.md"]),
        );
        fixture.write(
            "tests/fixtures/scenarios/medium_api.yaml",
            &scenario("Api endpoint", "medium", &["crud/crud-list.md"]),
        );
        fixture
    }

    /// Returns the bundle root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes a bundle-relative file, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    /// Creates a bundle-relative directory.
    pub fn mkdir(&self, relative: &str) {
        fs::create_dir_all(self.root.join(relative)).unwrap();
    }

    /// Removes a bundle-relative file.
    pub fn remove(&self, relative: &str) {
        fs::remove_file(self.root.join(relative)).unwrap();
    }

    /// Opens the bundle with the default layout.
    pub fn open(&self) -> SkillBundle {
        SkillBundle::open(&self.root, BundleLayout::default()).unwrap()
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
