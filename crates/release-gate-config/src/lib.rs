// crates/release-gate-config/src/lib.rs
// ============================================================================
// Module: Release Gate Config Library
// Description: Canonical config model, validation, and input loading.
// Purpose: Single source of truth for release-gate.toml semantics.
// Dependencies: release-gate-core, serde, toml
// ============================================================================

//! ## Overview
//! `release-gate-config` defines the canonical configuration model for the
//! release gate runner: the TOML runner config, the promotion-policy loader,
//! the receipt environment channel, and the authorization decision engines.
//! Validation is strict and fail-closed.
//!
//! Security posture: config inputs are untrusted; every loader applies size
//! and path limits before parsing.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod engine;
pub mod policy_file;
pub mod receipt_env;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use engine::*;
pub use policy_file::load_promotion_policy;
pub use receipt_env::RECEIPT_ENV_VAR;
pub use receipt_env::parse_receipt_value;
pub use receipt_env::receipt_from_env;
