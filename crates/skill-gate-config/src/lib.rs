// crates/skill-gate-config/src/lib.rs
// ============================================================================
// Module: Skill Gate Config Library
// Description: Canonical config model, validation, and example profile.
// Purpose: Single source of truth for skill-gate.toml semantics.
// Dependencies: skill-gate-core, serde, toml
// ============================================================================

//! ## Overview
//! `skill-gate-config` defines the `skill-gate.toml` model. Loading is strict
//! and fail-closed: unknown keys, zero limits, empty terms, and paths that
//! escape the bundle are rejected. A validated config converts into the
//! [`skill_gate_core::GatePolicy`] evaluated by the check runner.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
