// crates/release-gate-core/src/core/state.rs
// ============================================================================
// Module: Release Gate Cluster State
// Description: Health-state enumerations and classification record.
// Purpose: Provide the canonical state machine shared by classifier, gate, and emitter.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Cluster health is a four-state machine internally (`ok`, `degraded`,
//! `broken`, `unknown`) and a three-state machine at the publish boundary:
//! [`PublishedState`] cannot represent `unknown`, so conversion maps it to
//! `broken`. Downstream consumers therefore never observe the literal
//! `unknown` in a published artifact.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Cluster State
// ============================================================================

/// Internal health verdict derived from a status snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterState {
    /// Tracking service reports healthy with no open issues.
    Ok,
    /// At least one issue is open or the service withheld its verdict.
    Degraded,
    /// Cluster is known-bad.
    Broken,
    /// No usable status document was available.
    Unknown,
}

impl ClusterState {
    /// Returns the wire label for this state.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Degraded => "degraded",
            Self::Broken => "broken",
            Self::Unknown => "unknown",
        }
    }

    /// Returns true when the state permits promotion checks to continue.
    #[must_use]
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl fmt::Display for ClusterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Published State
// ============================================================================

/// Publish-boundary health verdict.
///
/// # Invariants
/// - Cannot represent `unknown`; [`From<ClusterState>`] maps it to `broken`
///   so the published artifact fails closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishedState {
    /// Cluster is healthy.
    Ok,
    /// Cluster has open issues.
    Degraded,
    /// Cluster is known-bad or its health could not be determined.
    Broken,
}

impl PublishedState {
    /// Returns the wire label for this state.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Degraded => "degraded",
            Self::Broken => "broken",
        }
    }
}

impl From<ClusterState> for PublishedState {
    fn from(state: ClusterState) -> Self {
        match state {
            ClusterState::Ok => Self::Ok,
            ClusterState::Degraded => Self::Degraded,
            ClusterState::Broken | ClusterState::Unknown => Self::Broken,
        }
    }
}

impl fmt::Display for PublishedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Classification
// ============================================================================

/// Classifier output: a state plus the evidence that justifies it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Derived health state.
    pub state: ClusterState,
    /// Sorted, duplicate-free repos named by attributing issues.
    pub affected_repos: Vec<String>,
    /// Issue messages in document order.
    pub issues: Vec<String>,
}
