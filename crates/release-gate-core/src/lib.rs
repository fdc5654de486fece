// crates/release-gate-core/src/lib.rs
// ============================================================================
// Module: Release Gate Core Library
// Description: Public API surface for the Release Gate core.
// Purpose: Expose core types, interfaces, and runtime pipelines.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Release Gate core implements two deterministic decision pipelines: cluster
//! health classification with a policy-driven production gate, and a
//! capability-receipt authorization gate in front of an external decision
//! point. The core is pure logic: hosts thread in file contents, policies,
//! and timestamps, and perform all writes themselves.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::DecisionPoint;
pub use interfaces::DecisionPointError;
pub use runtime::AuthzError;
pub use runtime::LoadedStatus;
pub use runtime::classify;
pub use runtime::emit;
pub use runtime::evaluate_gate;
pub use runtime::load_status_document;
pub use runtime::require_allowed;
