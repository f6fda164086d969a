// crates/skill-gate-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared config builders for validation tests.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use skill_gate_config::ConfigError;
use skill_gate_config::SkillGateConfig;

/// Test result alias.
pub type TestResult = Result<(), String>;

/// Returns the built-in default configuration.
pub fn default_config() -> SkillGateConfig {
    SkillGateConfig::default()
}

/// Parses configuration text, mapping errors to strings.
pub fn parse(content: &str) -> Result<SkillGateConfig, String> {
    SkillGateConfig::from_toml_str(content).map_err(|err| err.to_string())
}

/// Asserts that a result is an error whose message contains `needle`.
pub fn assert_invalid<T>(result: Result<T, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error '{message}' did not contain '{needle}'"))
            }
        }
        Ok(_) => Err("expected invalid config".to_string()),
    }
}
