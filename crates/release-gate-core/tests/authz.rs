// crates/release-gate-core/tests/authz.rs
// ============================================================================
// Module: Authorization Gate Tests
// Description: Receipt envelope enforcement and decision delegation behavior.
// Purpose: Prove invalid receipts never reach the decision point.
// Dependencies: release-gate-core
// ============================================================================

//! ## Overview
//! Drives the authorization gate with a scripted decision point that counts
//! delegations, pinning the no-delegation guarantee for invalid receipts and
//! the pass-through of denial decisions.

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
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;

use release_gate_core::ActionIntent;
use release_gate_core::Decision;
use release_gate_core::DecisionPoint;
use release_gate_core::DecisionPointError;
use release_gate_core::Timestamp;
use release_gate_core::Verdict;
use release_gate_core::VerifiedReceipt;
use release_gate_core::runtime::AuthzError;
use release_gate_core::runtime::require_allowed;

// ============================================================================
// SECTION: Helpers
// ============================================================================

struct ScriptedDecisionPoint {
    decision: Decision,
    calls: Arc<Mutex<u64>>,
}

impl ScriptedDecisionPoint {
    fn new(decision: Decision) -> Self {
        Self {
            decision,
            calls: Arc::new(Mutex::new(0)),
        }
    }

    fn call_count(&self) -> u64 {
        self.calls.lock().map_or(0, |calls| *calls)
    }
}

impl DecisionPoint for ScriptedDecisionPoint {
    fn decide(
        &self,
        _receipt: Option<&VerifiedReceipt>,
        _intent: &ActionIntent,
    ) -> Result<Decision, DecisionPointError> {
        let mut guard = self
            .calls
            .lock()
            .map_err(|_| DecisionPointError::Evaluation("call count lock poisoned".to_string()))?;
        *guard = guard.saturating_add(1);
        drop(guard);
        Ok(self.decision.clone())
    }
}

fn parse_receipt(issued_at: &str, expires_at: &str) -> VerifiedReceipt {
    let raw = format!(
        r#"{{
            "receipt_id": "r-42",
            "actor_class": "ci",
            "scopes": ["deploy", "release"],
            "issued_at": "{issued_at}",
            "expires_at": "{expires_at}",
            "assurance_level": 2,
            "signals": ["mfa"]
        }}"#
    );
    VerifiedReceipt::from_json_str(&raw).expect("parse receipt")
}

fn deploy_intent() -> ActionIntent {
    ActionIntent::new(
        "deploy".to_string(),
        "prod-cluster".to_string(),
        "release".to_string(),
    )
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn expired_receipt_never_reaches_decision_point() {
    let point = ScriptedDecisionPoint::new(Decision::allow("RULE_MATCHED"));
    let receipt = parse_receipt("2026-01-01T00:00:00Z", "2026-01-02T00:00:00Z");
    let now = Timestamp::parse("2026-01-03T00:00:00Z").expect("ts");

    let err = require_allowed(&point, Some(&receipt), &deploy_intent(), now).expect_err("deny");
    assert!(matches!(err, AuthzError::ReceiptExpired { .. }));
    assert_eq!(point.call_count(), 0);
}

#[test]
fn not_yet_valid_receipt_never_reaches_decision_point() {
    let point = ScriptedDecisionPoint::new(Decision::allow("RULE_MATCHED"));
    let receipt = parse_receipt("2026-01-01T00:00:00Z", "2026-01-02T00:00:00Z");
    let now = Timestamp::parse("2025-12-31T00:00:00Z").expect("ts");

    let err = require_allowed(&point, Some(&receipt), &deploy_intent(), now).expect_err("deny");
    assert!(matches!(err, AuthzError::ReceiptNotYetValid { .. }));
    assert_eq!(point.call_count(), 0);
}

#[test]
fn denial_preserves_verdict_and_reason_code() {
    let point = ScriptedDecisionPoint::new(Decision::deny("SCOPE_MISMATCH"));
    let receipt = parse_receipt("2026-01-01T00:00:00Z", "2026-01-02T00:00:00Z");
    let now = Timestamp::parse("2026-01-01T12:00:00Z").expect("ts");

    let err = require_allowed(&point, Some(&receipt), &deploy_intent(), now).expect_err("deny");
    match err {
        AuthzError::Denied {
            decision,
        } => {
            assert_eq!(decision.verdict, Verdict::Deny);
            assert_eq!(decision.reason_code, "SCOPE_MISMATCH");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(point.call_count(), 1);
}

#[test]
fn valid_receipt_allows_when_decision_point_allows() {
    let point = ScriptedDecisionPoint::new(Decision::allow("RULE_MATCHED"));
    let receipt = parse_receipt("2026-01-01T00:00:00Z", "2026-01-02T00:00:00Z");
    let now = Timestamp::parse("2026-01-01T12:00:00Z").expect("ts");

    let decision =
        require_allowed(&point, Some(&receipt), &deploy_intent(), now).expect("allow");
    assert_eq!(decision.verdict, Verdict::Allow);
    assert_eq!(decision.reason_code, "RULE_MATCHED");
    assert_eq!(point.call_count(), 1);
}

#[test]
fn every_check_requests_a_fresh_decision() {
    let point = ScriptedDecisionPoint::new(Decision::allow("RULE_MATCHED"));
    let receipt = parse_receipt("2026-01-01T00:00:00Z", "2026-01-02T00:00:00Z");
    let now = Timestamp::parse("2026-01-01T12:00:00Z").expect("ts");

    for _ in 0 .. 3 {
        require_allowed(&point, Some(&receipt), &deploy_intent(), now).expect("allow");
    }
    assert_eq!(point.call_count(), 3);
}

#[test]
fn anonymous_caller_is_passed_through_explicitly() {
    let point = ScriptedDecisionPoint::new(Decision::deny("ANONYMOUS_FORBIDDEN"));
    let now = Timestamp::parse("2026-01-01T12:00:00Z").expect("ts");

    let err = require_allowed(&point, None, &deploy_intent(), now).expect_err("deny");
    match err {
        AuthzError::Denied {
            decision,
        } => assert_eq!(decision.reason_code, "ANONYMOUS_FORBIDDEN"),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(point.call_count(), 1);
}
