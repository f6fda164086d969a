// crates/skill-gate-core/src/core/mod.rs
// ============================================================================
// Module: Skill Gate Core Types
// Description: Bundle layout, text documents, scenarios, metrics, and policy.
// Purpose: Provide the stable types every check and comparison is built on.
// Dependencies: serde, serde_json, serde_yaml
// ============================================================================

//! ## Overview
//! Core types describe what a skill bundle looks like on disk and what the
//! gate expects of it. Everything here is read-only with respect to the
//! bundle: loading documents, scanning text, and measuring size.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod bundle;
pub mod document;
pub mod hashing;
pub mod metrics;
pub mod policy;
pub mod scenario;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use bundle::BundleError;
pub use bundle::BundleLayout;
pub use bundle::BundleLimits;
pub use bundle::RuleFile;
pub use bundle::SkillBundle;
pub use bundle::read_text_with_limit;
pub use document::DocumentError;
pub use document::MarkdownLink;
pub use document::MatchSet;
pub use document::TextDocument;
pub use document::line_count;
pub use hashing::ContentHasher;
pub use hashing::hex_encode;
pub use metrics::BASELINE_FORMAT_VERSION;
pub use metrics::BundleMeasurement;
pub use metrics::BundleMetrics;
pub use metrics::collect_metrics;
pub use metrics::measure_bundle;
pub use policy::BaselinePolicy;
pub use policy::DEFAULT_REPORT_TITLE;
pub use policy::ConditionalTerm;
pub use policy::DocumentContract;
pub use policy::GatePolicy;
pub use policy::RuleGroupContract;
pub use policy::RulePolicy;
pub use policy::ScenarioContract;
pub use policy::ScenarioPolicy;
pub use policy::SkillPolicy;
pub use policy::StructurePolicy;
pub use scenario::Scenario;
pub use scenario::ScenarioDocument;
pub use scenario::ScenarioError;
pub use scenario::ScenarioFile;
pub use scenario::ScenarioMetrics;
pub use scenario::parse_scenario;
pub use scenario::scenario_schema;
pub use scenario::scenario_schema_violations;
