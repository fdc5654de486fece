// crates/release-gate-core/src/core/mod.rs
// ============================================================================
// Module: Release Gate Core Types
// Description: Canonical Release Gate data model.
// Purpose: Provide stable, serializable types for status, policy, and receipts.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Core types define the dependency-status document, promotion policy,
//! cluster-state machine, capability receipts, and the published global-status
//! artifact. These types are the canonical source of truth for any derived
//! surface (CLI output, stored artifacts, decision-point adapters).

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod global;
pub mod policy;
pub mod receipt;
pub mod state;
pub mod status;
pub mod time;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use global::ArtifactError;
pub use global::ClusterReport;
pub use global::GateVerdict;
pub use global::GlobalStatus;
pub use global::SourceProvenance;
pub use policy::PromotionPolicy;
pub use receipt::ActionIntent;
pub use receipt::Decision;
pub use receipt::ReceiptError;
pub use receipt::Verdict;
pub use receipt::VerifiedReceipt;
pub use state::Classification;
pub use state::ClusterState;
pub use state::PublishedState;
pub use status::AbsenceReason;
pub use status::Issue;
pub use status::REPO_STATUS_OK;
pub use status::RepoStatus;
pub use status::Severity;
pub use status::StatusDocument;
pub use status::StatusSnapshot;
pub use time::TimeError;
pub use time::Timestamp;
