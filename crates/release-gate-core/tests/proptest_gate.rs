// crates/release-gate-core/tests/proptest_gate.rs
// ============================================================================
// Module: Gate Property-Based Tests
// Description: Property tests for classifier and gate invariants.
// Purpose: Detect determinism and fail-closed violations across wide inputs.
// ============================================================================

//! Property-based tests for classifier and promotion-gate invariants.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use proptest::prelude::*;
use release_gate_core::AbsenceReason;
use release_gate_core::ClusterState;
use release_gate_core::Issue;
use release_gate_core::PromotionPolicy;
use release_gate_core::PublishedState;
use release_gate_core::RepoStatus;
use release_gate_core::Severity;
use release_gate_core::StatusDocument;
use release_gate_core::StatusSnapshot;
use release_gate_core::runtime::classify;
use release_gate_core::runtime::evaluate_gate;

fn severity_strategy() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Warning),
        Just(Severity::Error),
        Just(Severity::Unrecognized),
    ]
}

fn issue_strategy() -> impl Strategy<Value = Issue> {
    ("[a-d]{0,1}", severity_strategy(), "[a-z ]{0,12}").prop_map(|(repo, severity, message)| {
        Issue {
            repo: if repo.is_empty() { String::new() } else { format!("svc-{repo}") },
            severity,
            message,
        }
    })
}

fn repo_status_strategy() -> impl Strategy<Value = RepoStatus> {
    proptest::option::of(prop_oneof![
        Just("ok".to_string()),
        Just("degraded".to_string()),
        Just("broken".to_string()),
    ])
    .prop_map(|status| RepoStatus {
        status,
    })
}

fn document_strategy() -> impl Strategy<Value = StatusDocument> {
    (
        proptest::option::of(any::<bool>()),
        prop::collection::vec(issue_strategy(), 0 .. 6),
        0u64 .. 100,
        prop::collection::btree_map(
            "[a-d]{1}".prop_map(|s| format!("svc-{s}")),
            repo_status_strategy(),
            0 .. 4,
        ),
    )
        .prop_map(|(global_ok, issues, aggregated_records, repos)| StatusDocument {
            global_ok,
            issues,
            aggregated_records,
            repos,
        })
}

fn policy_strategy() -> impl Strategy<Value = PromotionPolicy> {
    (
        any::<bool>(),
        prop::collection::vec("[a-d]{1}".prop_map(|s| format!("svc-{s}")), 0 .. 4),
        0u64 .. 50,
    )
        .prop_map(|(allow_prod_if_unknown, required_repos_for_prod, min_aggregated_records)| {
            PromotionPolicy {
                allow_prod_if_unknown,
                required_repos_for_prod,
                min_aggregated_records,
            }
        })
}

proptest! {
    #[test]
    fn classification_is_deterministic(doc in document_strategy()) {
        let snapshot = StatusSnapshot::Present(doc);
        prop_assert_eq!(classify(&snapshot), classify(&snapshot));
    }

    #[test]
    fn affected_repos_are_sorted_and_unique(doc in document_strategy()) {
        let snapshot = StatusSnapshot::Present(doc);
        let classification = classify(&snapshot);
        let mut expected = classification.affected_repos.clone();
        expected.sort();
        expected.dedup();
        prop_assert_eq!(classification.affected_repos, expected);
    }

    #[test]
    fn ok_requires_global_ok_and_no_issues(doc in document_strategy()) {
        let should_be_ok = doc.global_ok == Some(true) && doc.issues.is_empty();
        let snapshot = StatusSnapshot::Present(doc);
        let classification = classify(&snapshot);
        prop_assert_eq!(classification.state == ClusterState::Ok, should_be_ok);
    }

    #[test]
    fn gate_is_deterministic(doc in document_strategy(), policy in policy_strategy()) {
        let snapshot = StatusSnapshot::Present(doc);
        let classification = classify(&snapshot);
        let first = evaluate_gate(classification.state, &snapshot, &policy);
        let second = evaluate_gate(classification.state, &snapshot, &policy);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn allow_requires_healthy_state(doc in document_strategy(), policy in policy_strategy()) {
        let snapshot = StatusSnapshot::Present(doc);
        let classification = classify(&snapshot);
        let verdict = evaluate_gate(classification.state, &snapshot, &policy);
        if verdict.allowed {
            prop_assert_eq!(classification.state, ClusterState::Ok);
        }
    }

    #[test]
    fn absent_snapshot_fails_closed(
        unreadable in any::<bool>(),
        policy in policy_strategy(),
    ) {
        let reason = if unreadable { AbsenceReason::Unreadable } else { AbsenceReason::Missing };
        let snapshot = StatusSnapshot::Absent(reason);
        let classification = classify(&snapshot);
        prop_assert_eq!(classification.state, ClusterState::Unknown);
        prop_assert_eq!(PublishedState::from(classification.state), PublishedState::Broken);
        let verdict = evaluate_gate(classification.state, &snapshot, &policy);
        prop_assert_eq!(verdict.allowed, policy.allow_prod_if_unknown);
    }
}
