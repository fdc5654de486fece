// crates/release-gate-core/src/core/status.rs
// ============================================================================
// Module: Release Gate Status Document Model
// Description: Typed dependency-status snapshot consumed by classifier and gate.
// Purpose: Centralize JSON defaulting for the external tracking-service report.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The dependency-status document is produced by an external tracking service
//! and materialized locally before a run. It is partially trusted: absence and
//! malformed content are expected states, so the loader maps them to an
//! explicit [`StatusSnapshot::Absent`] instead of raising. All defaulting for
//! missing fields lives in these types and nowhere else.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Issue Records
// ============================================================================

/// Severity of a reported issue.
///
/// Unrecognized wire values deserialize to [`Severity::Unrecognized`] so a
/// single unexpected label cannot invalidate the whole document. Only
/// `warning` and `error` attribute repos to the affected set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Non-blocking problem worth surfacing.
    Warning,
    /// Blocking problem in the reporting repo.
    Error,
    /// Any severity label this version does not know.
    #[serde(other)]
    Unrecognized,
}

impl Default for Severity {
    fn default() -> Self {
        Self::Unrecognized
    }
}

impl Severity {
    /// Returns true when the severity attributes a repo to the affected set.
    #[must_use]
    pub const fn is_attributing(self) -> bool {
        matches!(self, Self::Warning | Self::Error)
    }
}

/// Single issue entry in the dependency-status document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Repo the issue is attributed to; empty when the source omitted it.
    #[serde(default)]
    pub repo: String,
    /// Reported severity; defaults to unrecognized when omitted.
    #[serde(default)]
    pub severity: Severity,
    /// Human-readable description; empty when the source omitted it.
    #[serde(default)]
    pub message: String,
}

// ============================================================================
// SECTION: Per-Repo Status
// ============================================================================

/// Status value a healthy repo must report.
pub const REPO_STATUS_OK: &str = "ok";

/// Per-repo entry in the dependency map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoStatus {
    /// Reported status string; `None` when the entry carried no status field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl RepoStatus {
    /// Returns true when the repo reports the healthy status.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status.as_deref() == Some(REPO_STATUS_OK)
    }
}

// ============================================================================
// SECTION: Status Document
// ============================================================================

/// Last known dependency-health snapshot of the cluster.
///
/// # Invariants
/// - Immutable once loaded; classifier and gate only read it.
/// - `global_ok` is tri-valued: absent means "unknown", not "false".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDocument {
    /// Tracking service's own overall verdict when it published one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_ok: Option<bool>,
    /// Reported issues in document order.
    #[serde(default)]
    pub issues: Vec<Issue>,
    /// Count of ingested data points backing this snapshot.
    #[serde(default)]
    pub aggregated_records: u64,
    /// Per-repo status map, ordered for deterministic serialization.
    #[serde(default)]
    pub repos: BTreeMap<String, RepoStatus>,
}

// ============================================================================
// SECTION: Snapshot
// ============================================================================

/// Why no usable status document was available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsenceReason {
    /// No file existed at the expected path.
    Missing,
    /// A file existed but could not be read or parsed as a status document.
    Unreadable,
}

/// Loader output: a present document or an explicit, reasoned absence.
///
/// Treating malformed content as absence keeps the downstream pipeline on a
/// single fail-closed path: both cases classify as `unknown` and publish as
/// `broken`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSnapshot {
    /// A well-formed document was loaded.
    Present(StatusDocument),
    /// No usable document was available.
    Absent(AbsenceReason),
}

impl StatusSnapshot {
    /// Returns the document when present.
    #[must_use]
    pub const fn document(&self) -> Option<&StatusDocument> {
        match self {
            Self::Present(doc) => Some(doc),
            Self::Absent(_) => None,
        }
    }

    /// Returns true when a well-formed document was loaded.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }
}
