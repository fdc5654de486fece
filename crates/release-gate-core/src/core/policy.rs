// crates/release-gate-core/src/core/policy.rs
// ============================================================================
// Module: Release Gate Promotion Policy
// Description: Production-gating thresholds supplied by operators.
// Purpose: Define the trusted policy document consumed by the gate evaluator.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The promotion policy is trusted operator configuration: a missing policy
//! file yields these defaults, while a malformed one is a loud configuration
//! error handled by the config crate. Defaults are fail-closed, so unknown
//! cluster state blocks promotion unless explicitly overridden.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Promotion Policy
// ============================================================================

/// Production-gating thresholds.
///
/// # Invariants
/// - Never mutated after load; each run reads a fresh copy.
/// - `required_repos_for_prod` order is the gate's check order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionPolicy {
    /// Permit promotion when no status document is available.
    #[serde(default)]
    pub allow_prod_if_unknown: bool,
    /// Repos that must each report a healthy status, checked in order.
    #[serde(default)]
    pub required_repos_for_prod: Vec<String>,
    /// Floor on `aggregated_records` before promotion is considered.
    #[serde(default = "default_min_aggregated_records")]
    pub min_aggregated_records: u64,
}

impl Default for PromotionPolicy {
    fn default() -> Self {
        Self {
            allow_prod_if_unknown: false,
            required_repos_for_prod: Vec::new(),
            min_aggregated_records: default_min_aggregated_records(),
        }
    }
}

impl PromotionPolicy {
    /// Validates policy contents for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns a message when a required repo name is empty or duplicated.
    pub fn validate(&self) -> Result<(), String> {
        for (idx, name) in self.required_repos_for_prod.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(format!("required repo at index {idx} must not be empty"));
            }
            if self.required_repos_for_prod[..idx].contains(name) {
                return Err(format!("required repo {name} listed more than once"));
            }
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Returns the default aggregated-record floor.
///
/// One record means an empty-but-present document still fails the floor until
/// real data has flowed.
const fn default_min_aggregated_records() -> u64 {
    1
}
