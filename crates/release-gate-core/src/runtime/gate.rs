// crates/release-gate-core/src/runtime/gate.rs
// ============================================================================
// Module: Release Gate Promotion Gate
// Description: Policy-driven allow/deny evaluation for production promotion.
// Purpose: Produce a single gate verdict with the most structural failing reason.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The gate applies its rules in a fixed order and the first match
//! short-circuits: absent data, then cluster state, then the aggregated-record
//! floor, then each required repo in policy order. Structural failures must
//! outrank resource-specific ones, so operators always see the most
//! load-bearing reason first. The ordering is a pinned contract.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::global::GateVerdict;
use crate::core::policy::PromotionPolicy;
use crate::core::state::ClusterState;
use crate::core::status::StatusSnapshot;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Reason reported when no status document exists but policy permits promotion.
pub const REASON_ABSENT_ALLOWED: &str =
    "dependency status missing; policy allows promotion in unknown state";

/// Reason reported when no status document exists and policy blocks promotion.
pub const REASON_ABSENT_BLOCKED: &str = "dependency status missing; promotion blocked";

/// Reason reported when every gate rule passes.
pub const REASON_ALL_HEALTHY: &str = "all required repos healthy; promotion allowed";

// ============================================================================
// SECTION: Gate Evaluator
// ============================================================================

/// Evaluates the production gate for one run.
///
/// # Invariants
/// - Rules run in a fixed order and the first match wins; a document that is
///   both below the record floor and missing a required repo reports the
///   record-count failure.
/// - The first failing required repo determines the reason; later failures
///   are not aggregated.
/// - Pure function of its inputs; a denial is a normal outcome, not an error.
#[must_use]
pub fn evaluate_gate(
    state: ClusterState,
    snapshot: &StatusSnapshot,
    policy: &PromotionPolicy,
) -> GateVerdict {
    let Some(doc) = snapshot.document() else {
        return if policy.allow_prod_if_unknown {
            GateVerdict::allowed(REASON_ABSENT_ALLOWED)
        } else {
            GateVerdict::denied(REASON_ABSENT_BLOCKED)
        };
    };

    if !state.is_ok() {
        return GateVerdict::denied(&format!("cluster state is {state}; promotion blocked"));
    }

    if doc.aggregated_records < policy.min_aggregated_records {
        return GateVerdict::denied(&format!(
            "only {} aggregated records; minimum {} required",
            doc.aggregated_records, policy.min_aggregated_records
        ));
    }

    for name in &policy.required_repos_for_prod {
        let Some(repo) = doc.repos.get(name) else {
            return GateVerdict::denied(&format!(
                "required repo {name} missing from dependency map"
            ));
        };
        if !repo.is_ok() {
            let reported = repo.status.as_deref().unwrap_or("unreported");
            return GateVerdict::denied(&format!(
                "required repo {name} status is {reported}; promotion blocked"
            ));
        }
    }

    GateVerdict::allowed(REASON_ALL_HEALTHY)
}

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test fixtures use explicit asserts and unwraps for clarity."
    )]

    use std::collections::BTreeMap;

    use super::REASON_ABSENT_ALLOWED;
    use super::REASON_ALL_HEALTHY;
    use super::evaluate_gate;
    use crate::core::policy::PromotionPolicy;
    use crate::core::state::ClusterState;
    use crate::core::status::AbsenceReason;
    use crate::core::status::RepoStatus;
    use crate::core::status::StatusDocument;
    use crate::core::status::StatusSnapshot;

    fn healthy_document() -> StatusDocument {
        let mut repos = BTreeMap::new();
        repos.insert(
            "svc-a".to_string(),
            RepoStatus {
                status: Some("ok".to_string()),
            },
        );
        StatusDocument {
            global_ok: Some(true),
            issues: Vec::new(),
            aggregated_records: 50,
            repos,
        }
    }

    fn strict_policy() -> PromotionPolicy {
        PromotionPolicy {
            allow_prod_if_unknown: false,
            required_repos_for_prod: vec!["svc-a".to_string()],
            min_aggregated_records: 10,
        }
    }

    #[test]
    fn absent_snapshot_follows_unknown_policy() {
        let snapshot = StatusSnapshot::Absent(AbsenceReason::Missing);
        let denied = evaluate_gate(ClusterState::Unknown, &snapshot, &strict_policy());
        assert!(!denied.allowed);
        assert!(denied.reason.contains("missing"));

        let permissive = PromotionPolicy {
            allow_prod_if_unknown: true,
            ..strict_policy()
        };
        let allowed = evaluate_gate(ClusterState::Unknown, &snapshot, &permissive);
        assert!(allowed.allowed);
        assert_eq!(allowed.reason, REASON_ABSENT_ALLOWED);
    }

    #[test]
    fn unhealthy_state_outranks_record_floor() {
        let mut doc = healthy_document();
        doc.aggregated_records = 0;
        let snapshot = StatusSnapshot::Present(doc);
        let verdict = evaluate_gate(ClusterState::Degraded, &snapshot, &strict_policy());
        assert!(!verdict.allowed);
        assert!(verdict.reason.contains("degraded"));
        assert!(!verdict.reason.contains("aggregated"));
    }

    #[test]
    fn record_floor_outranks_required_repos() {
        let mut doc = healthy_document();
        doc.aggregated_records = 3;
        doc.repos.clear();
        let snapshot = StatusSnapshot::Present(doc);
        let verdict = evaluate_gate(ClusterState::Ok, &snapshot, &strict_policy());
        assert!(!verdict.allowed);
        assert!(verdict.reason.contains("only 3 aggregated records"));
        assert!(verdict.reason.contains("minimum 10"));
    }

    #[test]
    fn first_failing_required_repo_wins() {
        let mut doc = healthy_document();
        doc.repos.clear();
        let snapshot = StatusSnapshot::Present(doc);
        let policy = PromotionPolicy {
            allow_prod_if_unknown: false,
            required_repos_for_prod: vec!["svc-b".to_string(), "svc-a".to_string()],
            min_aggregated_records: 10,
        };
        let verdict = evaluate_gate(ClusterState::Ok, &snapshot, &policy);
        assert!(!verdict.allowed);
        assert!(verdict.reason.contains("svc-b"));
        assert!(!verdict.reason.contains("svc-a"));
    }

    #[test]
    fn unhealthy_required_repo_cites_actual_status() {
        let mut doc = healthy_document();
        doc.repos.insert(
            "svc-a".to_string(),
            RepoStatus {
                status: Some("degraded".to_string()),
            },
        );
        let snapshot = StatusSnapshot::Present(doc);
        let verdict = evaluate_gate(ClusterState::Ok, &snapshot, &strict_policy());
        assert!(!verdict.allowed);
        assert!(verdict.reason.contains("svc-a"));
        assert!(verdict.reason.contains("degraded"));
    }

    #[test]
    fn missing_status_field_reads_as_unreported() {
        let mut doc = healthy_document();
        doc.repos.insert("svc-a".to_string(), RepoStatus { status: None });
        let snapshot = StatusSnapshot::Present(doc);
        let verdict = evaluate_gate(ClusterState::Ok, &snapshot, &strict_policy());
        assert!(!verdict.allowed);
        assert!(verdict.reason.contains("unreported"));
    }

    #[test]
    fn healthy_inputs_allow_promotion() {
        let snapshot = StatusSnapshot::Present(healthy_document());
        let verdict = evaluate_gate(ClusterState::Ok, &snapshot, &strict_policy());
        assert!(verdict.allowed);
        assert_eq!(verdict.reason, REASON_ALL_HEALTHY);
    }
}
