// crates/release-gate-core/src/runtime/authz.rs
// ============================================================================
// Module: Release Gate Authorization Gate
// Description: Temporal receipt enforcement in front of the decision point.
// Purpose: Guarantee no delegation happens on an expired or future receipt.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! The authorization gate sits between protected actions and the external
//! decision point. It enforces the receipt's temporal envelope before any
//! delegation, then requires an explicit `ALLOW` verdict; everything else,
//! including decision-point failures, surfaces as a typed denial. The gate
//! never retries and never caches; every protected action re-requests a
//! decision.
//!
//! Security posture: an invalid receipt must short-circuit. Letting the
//! decision point see an expired receipt would shift temporal enforcement
//! onto code this crate does not control.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::receipt::ActionIntent;
use crate::core::receipt::Decision;
use crate::core::receipt::VerifiedReceipt;
use crate::core::time::Timestamp;
use crate::interfaces::DecisionPoint;
use crate::interfaces::DecisionPointError;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Authorization gate failures.
///
/// # Invariants
/// - [`AuthzError::Denied`] carries the full decision so callers can log the
///   verdict and reason code without re-deriving them.
#[derive(Debug, Error)]
pub enum AuthzError {
    /// Receipt expired at or before the evaluation instant.
    #[error("authorization gate: receipt {receipt_id} expired at {expires_at}")]
    ReceiptExpired {
        /// Identifier of the rejected receipt.
        receipt_id: String,
        /// Declared expiry instant.
        expires_at: Timestamp,
    },
    /// Receipt issuance lies after the evaluation instant.
    #[error("authorization gate: receipt {receipt_id} not valid until {issued_at}")]
    ReceiptNotYetValid {
        /// Identifier of the rejected receipt.
        receipt_id: String,
        /// Declared issuance instant.
        issued_at: Timestamp,
    },
    /// Decision point returned a non-allow verdict.
    #[error("authorization gate: denied by decision point: {} {}", .decision.verdict, .decision.reason_code)]
    Denied {
        /// Full decision as produced by the decision point.
        decision: Decision,
    },
    /// Decision point could not produce a verdict.
    #[error("authorization gate: {0}")]
    DecisionPoint(#[from] DecisionPointError),
}

// ============================================================================
// SECTION: Authorization Gate
// ============================================================================

/// Requires an explicit allow verdict for the intent at `now`.
///
/// An absent receipt is passed through explicitly; the decision point alone
/// decides whether an anonymous caller suffices for the intent.
///
/// # Invariants
/// - An expired or not-yet-valid receipt returns before any delegation.
/// - Only a literal `ALLOW` verdict returns `Ok`; unrecognized verdict
///   labels deny.
///
/// # Errors
///
/// Returns [`AuthzError::ReceiptExpired`] or [`AuthzError::ReceiptNotYetValid`]
/// when the receipt fails its temporal envelope, [`AuthzError::Denied`] when
/// the decision point returns a non-allow verdict, and
/// [`AuthzError::DecisionPoint`] when no verdict could be produced.
pub fn require_allowed<D>(
    decision_point: &D,
    receipt: Option<&VerifiedReceipt>,
    intent: &ActionIntent,
    now: Timestamp,
) -> Result<Decision, AuthzError>
where
    D: DecisionPoint + ?Sized,
{
    if let Some(receipt) = receipt {
        if receipt.is_expired_at(now) {
            return Err(AuthzError::ReceiptExpired {
                receipt_id: receipt.receipt_id.clone(),
                expires_at: receipt.expires_at,
            });
        }
        if receipt.is_not_yet_valid_at(now) {
            return Err(AuthzError::ReceiptNotYetValid {
                receipt_id: receipt.receipt_id.clone(),
                issued_at: receipt.issued_at,
            });
        }
    }

    let decision = decision_point.decide(receipt, intent)?;
    if decision.is_allow() {
        Ok(decision)
    } else {
        Err(AuthzError::Denied {
            decision,
        })
    }
}
