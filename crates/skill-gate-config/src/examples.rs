// crates/skill-gate-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payloads.
// Purpose: Deterministic example profile for docs and tooling.
// Dependencies: std
// ============================================================================

//! ## Overview
//! The example profile configures the gate for the `qscmf-backend` skill
//! bundle: built-in thresholds plus the scaffold rule group, the transaction,
//! testing, standards and version-detector document contracts, and the
//! scaffold and transaction scenario contracts.

/// Returns a canonical example `skill-gate.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r###"[layout]
skill_file = "SKILL.md"
rules_dir = "rules"
scenarios_dir = "tests/fixtures/scenarios"
results_dir = "tests/results"

[limits]
max_file_bytes = 1048576
max_scenarios = 1024
max_rule_files = 4096

[skill]
name = "qscmf-backend"
max_lines = 200
guideline_max_lines = 500
required_fields = ["description"]
required_sections = ["Iron Laws", "Quick Start", "Intent Routing"]
code_example_sections = ["Quick Start"]
max_table_rows = 50
checked_link_prefixes = ["rules/"]

[rules]
max_lines = 500
categories = ["workflow", "scaffold", "crud", "api", "test", "pattern"]

[rules.title]
label = "title"
any = ["## "]
any_ci = ["title:"]

[rules.impact]
label = "impact level"
any = ["CRITICAL", "HIGH", "MEDIUM", "LOW"]
any_ci = ["impact:"]

[structure]
required_dirs = ["_shared", "rules", "_shared/templates", "_shared/templates/common"]
version_config_dir = "_shared/config"
version_configs = ["_shared/config/v13.yaml", "_shared/config/v14.yaml"]
version_config_fields = ["version", "php_requirement"]

[scenarios]
min_count = 3
max_tools = 10
complexity_levels = ["simple", "medium", "complex"]
simple_markers = ["simple", "search"]
complex_markers = ["complex", "module", "create"]

[baseline]
max_line_growth_percent = 10
report_title = "QSCMF Skill Test Report"

[logging]
sink = "stderr"

[[rule_groups]]
id = "scaffold"
dir = "scaffold"
required_files = [
    "scaffold-generate-code.md",
    "scaffold-parse-metadata.md",
    "scaffold-infer-types.md",
]

[[rule_groups.conditional]]
trigger = "metadata"

[rule_groups.conditional.requires]
label = "@title/@type annotations"
any = ["@title", "@type"]

[rule_groups.cross_links]
label = "related rule links"
any = ["See Also", "相关文档", "]("]
any_ci = ["[scaffold-"]

[[documents]]
id = "transaction-rule"
path = "rules/test/test-transaction.md"
all = ["```php"]

[[documents.require]]
label = "transaction concepts"
any = ["startTrans", "commit", "rollback", "beginTransaction"]
min = 2

[[documents.require]]
label = "checklist"
any = ["检查清单", "[ ]"]
any_ci = ["checklist"]

[[documents]]
id = "testing-reference"
path = "references/testing.md"
all = ["API", "Mock", "PHPUnit", "vendor/bin/phpunit"]

[[documents]]
id = "development-standards"
path = "references/development-standards.md"

[[documents.require]]
label = "auto-validation section"
any = ["自动化验证"]
any_ci = ["auto"]

[[documents.require]]
label = "validation tools"
any_ci = ["php-cs-fixer", "phpstan", "phpunit"]
min = 2

[[documents.require]]
label = "verification checklist"
any = ["检查清单", "验证"]
any_ci = ["verification"]

[[documents]]
id = "version-detector"
path = "_shared/detect-version.php"
all = ["class", "confidence"]

[[documents.require]]
label = "detector class"
any = ["VersionDetectionResult", "VersionDetector"]

[[documents.require]]
label = "detection methods"
any = [
    "detectFromComposer",
    "detectFromDirectory",
    "detectFromEnvironment",
    "detectFromConfig",
    "detectFromFeatures",
]
min = 3

[[scenario_contracts]]
file = "scaffold_generate.yaml"
required_keys = ["validation_criteria"]
min_items = { validation_criteria = 3 }

[[scenario_contracts]]
file = "transaction_test.yaml"
any_keys = ["test_scenarios", "expected_outputs"]
"###,
    )
}
