// crates/release-gate-core/src/core/receipt.rs
// ============================================================================
// Module: Release Gate Capability Receipts
// Description: Verified receipt, action intent, and decision wire types.
// Purpose: Define the authorization boundary shared with the decision point.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A verified receipt is a capability token whose cryptographic proof was
//! checked upstream; the core enforces only the declared temporal and scope
//! envelope. Receipts are parsed fresh per authorization check and never
//! cached.
//!
//! Security posture: unrecognized verdict labels deserialize to a non-allow
//! variant so a decision point cannot grant access through a novel label.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Verified Receipt
// ============================================================================

/// Capability token presented by a caller.
///
/// # Invariants
/// - `proof` is opaque verification material; the core never interprets it.
/// - Temporal fields are well-formed RFC3339 or parsing fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedReceipt {
    /// Unique receipt identifier.
    pub receipt_id: String,
    /// Class of actor the receipt was issued to.
    pub actor_class: String,
    /// Granted scopes; empty when the issuer granted none.
    #[serde(default)]
    pub scopes: Vec<String>,
    /// Instant the receipt became valid.
    pub issued_at: Timestamp,
    /// Instant the receipt stops being valid.
    pub expires_at: Timestamp,
    /// Issuer-assigned assurance level; zero when unstated.
    #[serde(default)]
    pub assurance_level: u32,
    /// Contextual signals recorded at issuance, forwarded uninterpreted.
    #[serde(default)]
    pub signals: Vec<String>,
    /// Opaque verification material.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof: Option<Value>,
}

impl VerifiedReceipt {
    /// Parses a receipt from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::Parse`] when required fields are absent or
    /// timestamps are not well-formed RFC3339.
    pub fn from_json_str(raw: &str) -> Result<Self, ReceiptError> {
        serde_json::from_str(raw).map_err(|err| ReceiptError::Parse(err.to_string()))
    }

    /// Parses a receipt from an already-decoded JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::Parse`] when the value does not match the
    /// receipt shape.
    pub fn from_value(value: Value) -> Result<Self, ReceiptError> {
        serde_json::from_value(value).map_err(|err| ReceiptError::Parse(err.to_string()))
    }

    /// Returns true when the receipt is expired at `now`.
    ///
    /// Expiry is inclusive: a receipt is unusable from the exact instant of
    /// `expires_at`.
    #[must_use]
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        now >= self.expires_at
    }

    /// Returns true when the receipt is not yet valid at `now`.
    #[must_use]
    pub fn is_not_yet_valid_at(&self, now: Timestamp) -> bool {
        now < self.issued_at
    }
}

// ============================================================================
// SECTION: Action Intent
// ============================================================================

/// Action a caller is requesting authorization for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionIntent {
    /// Verb being requested.
    pub action: String,
    /// Resource the action targets.
    pub resource: String,
    /// Scope the action executes under.
    pub scope: String,
    /// Auxiliary context, opaque to the gate.
    #[serde(default)]
    pub parameters: BTreeMap<String, Value>,
}

impl ActionIntent {
    /// Creates an intent with empty parameters.
    #[must_use]
    pub const fn new(action: String, resource: String, scope: String) -> Self {
        Self {
            action,
            resource,
            scope,
            parameters: BTreeMap::new(),
        }
    }

    /// Replaces the auxiliary parameters.
    #[must_use]
    pub fn with_parameters(mut self, parameters: BTreeMap<String, Value>) -> Self {
        self.parameters = parameters;
        self
    }
}

// ============================================================================
// SECTION: Decision
// ============================================================================

/// Verdict labels a decision point may return.
///
/// Deserialization maps any label other than `ALLOW`/`DENY` to
/// [`Verdict::Unrecognized`], which the gate treats as non-allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    /// Action may proceed.
    Allow,
    /// Action is refused.
    Deny,
    /// Any verdict label this version does not know.
    #[serde(other)]
    Unrecognized,
}

impl Verdict {
    /// Returns the wire label for this verdict.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Allow => "ALLOW",
            Self::Deny => "DENY",
            Self::Unrecognized => "UNRECOGNIZED",
        }
    }

    /// Returns true only for the explicit allow verdict.
    #[must_use]
    pub const fn is_allow(self) -> bool {
        matches!(self, Self::Allow)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decision produced by a decision point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Verdict label.
    pub verdict: Verdict,
    /// Machine-readable explanation code.
    pub reason_code: String,
}

impl Decision {
    /// Creates a decision.
    #[must_use]
    pub const fn new(verdict: Verdict, reason_code: String) -> Self {
        Self {
            verdict,
            reason_code,
        }
    }

    /// Creates an allow decision with the provided reason code.
    #[must_use]
    pub fn allow(reason_code: &str) -> Self {
        Self::new(Verdict::Allow, reason_code.to_string())
    }

    /// Creates a deny decision with the provided reason code.
    #[must_use]
    pub fn deny(reason_code: &str) -> Self {
        Self::new(Verdict::Deny, reason_code.to_string())
    }

    /// Returns true only for the explicit allow verdict.
    #[must_use]
    pub const fn is_allow(&self) -> bool {
        self.verdict.is_allow()
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when parsing receipts.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Receipt JSON was missing required fields or malformed.
    #[error("receipt parse: {0}")]
    Parse(String),
}
