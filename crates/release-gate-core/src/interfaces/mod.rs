// crates/release-gate-core/src/interfaces/mod.rs
// ============================================================================
// Module: Release Gate Interfaces
// Description: Backend-agnostic interface to the external decision point.
// Purpose: Define the contract surface the authorization gate delegates to.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The decision point is an external policy function: the gate hands it a
//! receipt and an intent and receives a verdict. Implementations must be
//! deterministic for a given input pair and fail closed on missing or
//! invalid data.
//!
//! Security posture: decision-point implementations consume caller-controlled
//! intents; they must not widen access on unrecognized input.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::receipt::ActionIntent;
use crate::core::receipt::Decision;
use crate::core::receipt::VerifiedReceipt;

// ============================================================================
// SECTION: Decision Point
// ============================================================================

/// Decision point errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum DecisionPointError {
    /// Decision point could not produce a verdict.
    #[error("decision point error: {0}")]
    Evaluation(String),
}

/// External policy decision function.
///
/// The receipt may be absent for anonymous callers; the implementation alone
/// decides whether that suffices for the requested intent.
pub trait DecisionPoint {
    /// Produces a verdict for the intent under the presented receipt.
    ///
    /// # Errors
    ///
    /// Returns [`DecisionPointError`] when no verdict could be produced.
    /// An error is not a verdict; callers must treat it as a refusal.
    fn decide(
        &self,
        receipt: Option<&VerifiedReceipt>,
        intent: &ActionIntent,
    ) -> Result<Decision, DecisionPointError>;
}
