// crates/release-gate-core/src/runtime/classifier.rs
// ============================================================================
// Module: Release Gate Cluster Classifier
// Description: Maps a status snapshot to a health state with justification.
// Purpose: Provide the single canonical classification used by gate and emitter.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Classification is a pure function of the snapshot: identical input yields
//! identical output. An absent snapshot classifies as `unknown` and is turned
//! into `broken` later, at the publish boundary, so the fail-closed mapping
//! happens exactly once.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use crate::core::state::Classification;
use crate::core::state::ClusterState;
use crate::core::status::StatusDocument;
use crate::core::status::StatusSnapshot;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Issue message recorded when no usable status document was available.
pub const ABSENT_STATUS_ISSUE: &str = "dependency status missing or unreadable";

/// Placeholder repo name for attributing issues that named no repo.
pub const UNATTRIBUTED_REPO: &str = "_unknown";

// ============================================================================
// SECTION: Classifier
// ============================================================================

/// Classifies a status snapshot into a health state with justification.
///
/// # Invariants
/// - Absent snapshots classify as `unknown`, never as healthy.
/// - `affected_repos` is sorted and duplicate-free.
/// - Issue messages keep document order.
#[must_use]
pub fn classify(snapshot: &StatusSnapshot) -> Classification {
    match snapshot {
        StatusSnapshot::Absent(_) => Classification {
            state: ClusterState::Unknown,
            affected_repos: Vec::new(),
            issues: vec![ABSENT_STATUS_ISSUE.to_string()],
        },
        StatusSnapshot::Present(doc) => classify_document(doc),
    }
}

/// Classifies a present, well-formed document.
fn classify_document(doc: &StatusDocument) -> Classification {
    let affected_repos = collect_affected_repos(doc);

    if doc.global_ok == Some(true) && doc.issues.is_empty() {
        return Classification {
            state: ClusterState::Ok,
            affected_repos,
            issues: Vec::new(),
        };
    }

    Classification {
        state: ClusterState::Degraded,
        affected_repos,
        issues: doc.issues.iter().map(|issue| issue.message.clone()).collect(),
    }
}

/// Collects the sorted, duplicate-free set of repos named by attributing issues.
fn collect_affected_repos(doc: &StatusDocument) -> Vec<String> {
    let mut repos = BTreeSet::new();
    for issue in &doc.issues {
        if !issue.severity.is_attributing() {
            continue;
        }
        if issue.repo.is_empty() {
            repos.insert(UNATTRIBUTED_REPO.to_string());
        } else {
            repos.insert(issue.repo.clone());
        }
    }
    repos.into_iter().collect()
}
