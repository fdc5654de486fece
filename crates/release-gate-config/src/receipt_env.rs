// crates/release-gate-config/src/receipt_env.rs
// ============================================================================
// Module: Receipt Environment Loading
// Description: Bounded receipt parsing from the process environment.
// Purpose: Surface the caller's verified receipt to the authorization gate.
// Dependencies: release-gate-core
// ============================================================================

//! ## Overview
//! Upstream verification hands the receipt to the runner through the
//! `RELEASE_GATE_RECEIPT_JSON` environment variable. An unset or blank
//! variable means the caller is anonymous; a present but malformed payload is
//! a loud error rather than a silent downgrade to anonymous.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;

use release_gate_core::VerifiedReceipt;

use crate::config::ConfigError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable carrying the verified receipt JSON.
pub const RECEIPT_ENV_VAR: &str = "RELEASE_GATE_RECEIPT_JSON";

// ============================================================================
// SECTION: Loading
// ============================================================================

/// Reads the caller's receipt from the environment.
///
/// # Errors
///
/// Returns [`ConfigError`] when the variable is set but oversized, not valid
/// UTF-8, or not a well-formed receipt. Absence is not an error.
pub fn receipt_from_env(max_bytes: usize) -> Result<Option<VerifiedReceipt>, ConfigError> {
    match env::var(RECEIPT_ENV_VAR) {
        Ok(raw) => parse_receipt_value(&raw, max_bytes),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::Invalid(format!(
            "{RECEIPT_ENV_VAR} must be utf-8"
        ))),
    }
}

/// Parses a receipt payload taken from the environment.
///
/// Blank payloads are treated the same as an unset variable.
///
/// # Errors
///
/// Returns [`ConfigError`] when the payload is oversized or malformed.
pub fn parse_receipt_value(
    raw: &str,
    max_bytes: usize,
) -> Result<Option<VerifiedReceipt>, ConfigError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    if raw.len() > max_bytes {
        return Err(ConfigError::Invalid(format!(
            "{RECEIPT_ENV_VAR} exceeds {max_bytes} byte limit"
        )));
    }
    let receipt = VerifiedReceipt::from_json_str(raw)
        .map_err(|err| ConfigError::Parse(format!("{RECEIPT_ENV_VAR}: {err}")))?;
    Ok(Some(receipt))
}

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test fixtures use explicit asserts and unwraps for clarity."
    )]

    use super::ConfigError;
    use super::parse_receipt_value;

    const RECEIPT: &str = r#"{
        "receipt_id": "r-1",
        "actor_class": "ci",
        "scopes": ["deploy"],
        "issued_at": "2026-01-01T00:00:00Z",
        "expires_at": "2026-01-02T00:00:00Z"
    }"#;

    #[test]
    fn blank_payload_is_anonymous() {
        assert!(parse_receipt_value("", 1024).expect("parse").is_none());
        assert!(parse_receipt_value("   \n", 1024).expect("parse").is_none());
    }

    #[test]
    fn well_formed_payload_parses() {
        let receipt = parse_receipt_value(RECEIPT, 1024).expect("parse").expect("some");
        assert_eq!(receipt.receipt_id, "r-1");
        assert_eq!(receipt.actor_class, "ci");
    }

    #[test]
    fn malformed_payload_is_a_loud_error() {
        let err = parse_receipt_value("{not json", 1024).expect_err("must fail");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn oversized_payload_is_rejected() {
        let err = parse_receipt_value(RECEIPT, 16).expect_err("must fail");
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("byte limit"));
    }
}
