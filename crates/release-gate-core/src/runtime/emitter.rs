// crates/release-gate-core/src/runtime/emitter.rs
// ============================================================================
// Module: Release Gate Status Emitter
// Description: Assembles the published global-status artifact.
// Purpose: Apply the publish-boundary state mapping exactly once.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The emitter is pure assembly: it folds the classification, gate verdict,
//! and provenance into one [`GlobalStatus`] record and applies the
//! unknown-to-broken mapping at this single boundary. The host performs the
//! one atomic write of the rendered artifact; callers must not assume
//! partial or append semantics.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::global::ClusterReport;
use crate::core::global::GateVerdict;
use crate::core::global::GlobalStatus;
use crate::core::global::SourceProvenance;
use crate::core::state::Classification;
use crate::core::state::PublishedState;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Emitter
// ============================================================================

/// Assembles the durable global-status record for one run.
///
/// # Invariants
/// - The published state is never the literal `unknown`; conversion to
///   [`PublishedState`] maps it to `broken` here and nowhere else.
/// - Identical inputs, including `generated_at`, yield an identical record.
#[must_use]
pub fn emit(
    classification: Classification,
    verdict: GateVerdict,
    provenance: SourceProvenance,
    generated_at: Timestamp,
) -> GlobalStatus {
    GlobalStatus {
        generated_at,
        sources: provenance,
        cluster: ClusterReport {
            state: PublishedState::from(classification.state),
            affected_repos: classification.affected_repos,
            issues: classification.issues,
        },
        prod_gate: verdict,
    }
}
