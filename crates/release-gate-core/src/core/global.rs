// crates/release-gate-core/src/core/global.rs
// ============================================================================
// Module: Release Gate Global Status Artifact
// Description: Durable output record published after each evaluation run.
// Purpose: Define the stable shape downstream dashboards and automations read.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The global status artifact is the only persisted product of a run. Field
//! order is the serialization order, so identical inputs produce
//! byte-identical output. The artifact carries a [`PublishedState`], which
//! cannot represent `unknown` by construction.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::state::PublishedState;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Provenance
// ============================================================================

/// Where the run's inputs came from and what backed them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceProvenance {
    /// Whether a well-formed status document was loaded.
    pub dependency_status_present: bool,
    /// Path the status document was loaded from, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependency_status_path: Option<String>,
    /// Aggregated record count observed in the document; zero when absent.
    pub aggregated_records: u64,
    /// Lowercase hex SHA-256 of the raw source bytes, when a file was read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_digest_sha256: Option<String>,
}

// ============================================================================
// SECTION: Cluster Report
// ============================================================================

/// Published health section of the artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterReport {
    /// Publish-boundary health state.
    pub state: PublishedState,
    /// Sorted, duplicate-free repos named by attributing issues.
    pub affected_repos: Vec<String>,
    /// Issue messages in document order.
    pub issues: Vec<String>,
}

// ============================================================================
// SECTION: Gate Verdict
// ============================================================================

/// Production-gate outcome.
///
/// A denial is a normal outcome, not an error; the reason is always
/// human-readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateVerdict {
    /// Whether promotion is permitted.
    pub allowed: bool,
    /// Human-readable explanation for the outcome.
    pub reason: String,
}

impl GateVerdict {
    /// Creates an allowing verdict.
    #[must_use]
    pub fn allowed(reason: &str) -> Self {
        Self {
            allowed: true,
            reason: reason.to_string(),
        }
    }

    /// Creates a denying verdict.
    #[must_use]
    pub fn denied(reason: &str) -> Self {
        Self {
            allowed: false,
            reason: reason.to_string(),
        }
    }
}

// ============================================================================
// SECTION: Global Status
// ============================================================================

/// Durable, externally-published record of one evaluation run.
///
/// # Invariants
/// - `cluster.state` is never the literal `unknown`.
/// - Replaced whole on every run; never partially updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalStatus {
    /// Instant the run evaluated, supplied by the host.
    pub generated_at: Timestamp,
    /// Input provenance.
    pub sources: SourceProvenance,
    /// Published health section.
    pub cluster: ClusterReport,
    /// Production-gate outcome.
    pub prod_gate: GateVerdict,
}

impl GlobalStatus {
    /// Renders the canonical artifact bytes: pretty JSON, struct field order,
    /// a single trailing newline.
    ///
    /// Identical records render to identical bytes, which keeps reruns
    /// diff-friendly and makes the artifact safe to compare byte-for-byte.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::Serialization`] when serialization fails.
    pub fn to_canonical_json(&self) -> Result<String, ArtifactError> {
        let mut rendered = serde_json::to_string_pretty(self)
            .map_err(|err| ArtifactError::Serialization(err.to_string()))?;
        rendered.push('\n');
        Ok(rendered)
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when rendering the global status artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// Artifact JSON serialization failed.
    #[error("global status serialization: {0}")]
    Serialization(String),
}

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test fixtures use explicit asserts and unwraps for clarity."
    )]

    use super::ClusterReport;
    use super::GateVerdict;
    use super::GlobalStatus;
    use super::SourceProvenance;
    use crate::core::state::PublishedState;
    use crate::core::time::Timestamp;

    fn sample() -> GlobalStatus {
        GlobalStatus {
            generated_at: Timestamp::parse("2026-02-01T00:00:00Z").expect("ts"),
            sources: SourceProvenance {
                dependency_status_present: true,
                dependency_status_path: Some("meta/dependency_status.json".to_string()),
                aggregated_records: 12,
                source_digest_sha256: None,
            },
            cluster: ClusterReport {
                state: PublishedState::Ok,
                affected_repos: Vec::new(),
                issues: Vec::new(),
            },
            prod_gate: GateVerdict::allowed("all required repos healthy; promotion allowed"),
        }
    }

    #[test]
    fn canonical_rendering_is_stable() {
        let first = sample().to_canonical_json().expect("render");
        let second = sample().to_canonical_json().expect("render");
        assert_eq!(first, second);
        assert!(first.ends_with('\n'));
    }

    #[test]
    fn field_order_starts_with_generated_at() {
        let rendered = sample().to_canonical_json().expect("render");
        let generated = rendered.find("\"generated_at\"").expect("generated_at");
        let sources = rendered.find("\"sources\"").expect("sources");
        let cluster = rendered.find("\"cluster\"").expect("cluster");
        let gate = rendered.find("\"prod_gate\"").expect("prod_gate");
        assert!(generated < sources && sources < cluster && cluster < gate);
    }
}
