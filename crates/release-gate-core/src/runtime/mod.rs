// crates/release-gate-core/src/runtime/mod.rs
// ============================================================================
// Module: Release Gate Runtime
// Description: Loader, classifier, gate evaluator, emitter, and authz gate.
// Purpose: Execute both decision pipelines over the core data model.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Runtime modules implement the two Release Gate pipelines. The promotion
//! pipeline runs loader, classifier, gate evaluator, and emitter in one
//! direction with no feedback; the authorization pipeline validates a receipt
//! and delegates to the decision point. Every external surface must call into
//! these functions rather than reimplementing the rules.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod authz;
pub mod classifier;
pub mod emitter;
pub mod gate;
pub mod loader;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use authz::AuthzError;
pub use authz::require_allowed;
pub use classifier::ABSENT_STATUS_ISSUE;
pub use classifier::UNATTRIBUTED_REPO;
pub use classifier::classify;
pub use emitter::emit;
pub use gate::REASON_ABSENT_ALLOWED;
pub use gate::REASON_ABSENT_BLOCKED;
pub use gate::REASON_ALL_HEALTHY;
pub use gate::evaluate_gate;
pub use loader::DEFAULT_MAX_STATUS_BYTES;
pub use loader::LoadedStatus;
pub use loader::load_status_document;
