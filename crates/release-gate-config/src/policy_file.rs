// crates/release-gate-config/src/policy_file.rs
// ============================================================================
// Module: Promotion Policy Loading
// Description: Bounded loading of the promotion-policy JSON document.
// Purpose: Distinguish an absent policy (defaults) from a malformed one.
// Dependencies: release-gate-core, serde_json
// ============================================================================

//! ## Overview
//! The promotion policy is trusted operator input with one deliberate
//! asymmetry: a missing file yields the fail-closed defaults, while a present
//! but unreadable or malformed file is a loud configuration error. Silently
//! defaulting over a corrupt policy would let a typo widen the gate.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use release_gate_core::PromotionPolicy;

use crate::config::ConfigError;

// ============================================================================
// SECTION: Loading
// ============================================================================

/// Loads the promotion policy from `path` with a byte cap.
///
/// # Errors
///
/// Returns [`ConfigError`] when the file exists but cannot be read, exceeds
/// `max_bytes`, fails to parse, or fails policy validation. A missing file is
/// not an error and yields [`PromotionPolicy::default`].
pub fn load_promotion_policy(
    path: &Path,
    max_bytes: usize,
) -> Result<PromotionPolicy, ConfigError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Ok(PromotionPolicy::default());
        }
        Err(err) => {
            return Err(ConfigError::Io(format!("{}: {err}", path.display())));
        }
    };
    if bytes.len() > max_bytes {
        return Err(ConfigError::Invalid(format!(
            "{}: policy exceeds {max_bytes} byte limit",
            path.display()
        )));
    }
    let policy: PromotionPolicy = serde_json::from_slice(&bytes)
        .map_err(|err| ConfigError::Parse(format!("{}: {err}", path.display())))?;
    policy
        .validate()
        .map_err(|err| ConfigError::Invalid(format!("{}: {err}", path.display())))?;
    Ok(policy)
}
