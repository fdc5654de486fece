// crates/release-gate-config/src/engine.rs
// ============================================================================
// Module: Decision Engine Adapters
// Description: Deterministic decision engines for promotion authorization.
// Purpose: Provide swappable, fail-closed decision evaluation for the gate.
// Dependencies: release-gate-core, serde
// ============================================================================

//! ## Overview
//! Decision engine adapters used to authorize gated actions with
//! deterministic, fail-closed decisions. Rules are evaluated in order; the
//! first match wins. Anonymous callers only match rules that opt in.
//!
//! Security posture: decision evaluation is a trust boundary; absence of a
//! matching rule never grants access.

// ============================================================================
// SECTION: Imports
// ============================================================================

use release_gate_core::ActionIntent;
use release_gate_core::Decision;
use release_gate_core::DecisionPoint;
use release_gate_core::DecisionPointError;
use release_gate_core::Verdict;
use release_gate_core::VerifiedReceipt;
use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Reason Codes
// ============================================================================

/// Reason code emitted by the allow-all engine.
pub const REASON_ALLOW_ALL: &str = "ALLOW_ALL_ENGINE";
/// Reason code emitted by the deny-all engine.
pub const REASON_DENY_ALL: &str = "DENY_ALL_ENGINE";
/// Reason code emitted when no static rule matched.
pub const REASON_NO_MATCHING_RULE: &str = "NO_MATCHING_RULE";
/// Reason code emitted when an anonymous caller matched no rule.
pub const REASON_ANONYMOUS_FORBIDDEN: &str = "ANONYMOUS_FORBIDDEN";

// ============================================================================
// SECTION: Engine Model
// ============================================================================

/// Decision engine selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    /// Allow every request.
    AllowAll,
    /// Deny every request.
    #[default]
    DenyAll,
    /// Evaluate deterministic static rules.
    Static,
}

/// Static rules configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StaticRulesConfig {
    /// Default effect when no rule matches an identified caller.
    #[serde(default = "default_rule_effect")]
    pub default: RuleEffect,
    /// Ordered list of authorization rules.
    #[serde(default)]
    pub rules: Vec<AuthzRule>,
}

impl Default for StaticRulesConfig {
    fn default() -> Self {
        Self {
            default: default_rule_effect(),
            rules: Vec::new(),
        }
    }
}

impl StaticRulesConfig {
    /// Validates static rules configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when any rule is invalid.
    pub fn validate(&self) -> Result<(), String> {
        for (idx, rule) in self.rules.iter().enumerate() {
            rule.validate().map_err(|err| format!("authz.static.rules[{idx}]: {err}"))?;
        }
        Ok(())
    }

    /// Evaluates the rules for an authorization request.
    ///
    /// Rules are checked in order; the first match decides. Anonymous callers
    /// that match no rule are denied regardless of the default effect.
    fn evaluate(&self, receipt: Option<&VerifiedReceipt>, intent: &ActionIntent) -> Decision {
        for rule in &self.rules {
            if rule.matches(receipt, intent) {
                return rule.decision();
            }
        }
        if receipt.is_none() {
            return Decision::deny(REASON_ANONYMOUS_FORBIDDEN);
        }
        self.default.to_decision(REASON_NO_MATCHING_RULE)
    }
}

/// Rule effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleEffect {
    /// Allow the request.
    Allow,
    /// Deny the request.
    Deny,
}

impl RuleEffect {
    /// Converts the effect into a concrete decision.
    fn to_decision(self, reason_code: &str) -> Decision {
        match self {
            Self::Allow => Decision::allow(reason_code),
            Self::Deny => Decision::deny(reason_code),
        }
    }

    /// Returns the verdict corresponding to this effect.
    const fn verdict(self) -> Verdict {
        match self {
            Self::Allow => Verdict::Allow,
            Self::Deny => Verdict::Deny,
        }
    }
}

/// Authorization rule for static evaluation.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthzRule {
    /// Effect to apply when the rule matches.
    pub effect: RuleEffect,
    /// Reason code reported with the decision.
    pub reason_code: String,
    /// Allowed action verbs; empty matches any action.
    #[serde(default)]
    pub actions: Vec<String>,
    /// Allowed resources; empty matches any resource.
    #[serde(default)]
    pub resources: Vec<String>,
    /// Allowed intent scopes; empty matches any scope.
    #[serde(default)]
    pub scopes: Vec<String>,
    /// Allowed actor classes; empty matches any actor.
    #[serde(default)]
    pub actor_classes: Vec<String>,
    /// Scopes the receipt must carry, all of them.
    #[serde(default)]
    pub require_scopes: Vec<String>,
    /// Minimum receipt assurance level.
    #[serde(default)]
    pub min_assurance_level: Option<u32>,
    /// Whether the rule may match callers without a receipt.
    #[serde(default)]
    pub allow_anonymous: bool,
}

impl AuthzRule {
    /// Validates rule configuration for internal consistency.
    fn validate(&self) -> Result<(), String> {
        if self.reason_code.trim().is_empty() {
            return Err("rule requires a non-empty reason_code".to_string());
        }
        let has_selector = !self.actions.is_empty()
            || !self.resources.is_empty()
            || !self.scopes.is_empty()
            || !self.actor_classes.is_empty()
            || !self.require_scopes.is_empty()
            || self.min_assurance_level.is_some();
        if !has_selector {
            return Err("rule must include at least one match criterion".to_string());
        }
        Ok(())
    }

    /// Returns true when the rule matches the receipt and intent.
    fn matches(&self, receipt: Option<&VerifiedReceipt>, intent: &ActionIntent) -> bool {
        if !matches_selector(&self.actions, &intent.action) {
            return false;
        }
        if !matches_selector(&self.resources, &intent.resource) {
            return false;
        }
        if !matches_selector(&self.scopes, &intent.scope) {
            return false;
        }
        match receipt {
            Some(receipt) => {
                if !matches_selector(&self.actor_classes, &receipt.actor_class) {
                    return false;
                }
                if !self
                    .require_scopes
                    .iter()
                    .all(|scope| receipt.scopes.iter().any(|granted| granted == scope))
                {
                    return false;
                }
                if let Some(min) = self.min_assurance_level
                    && receipt.assurance_level < min
                {
                    return false;
                }
                true
            }
            None => {
                if !self.allow_anonymous {
                    return false;
                }
                if !self.actor_classes.is_empty() || !self.require_scopes.is_empty() {
                    return false;
                }
                if self.min_assurance_level.is_some_and(|min| min > 0) {
                    return false;
                }
                true
            }
        }
    }

    /// Builds the decision this rule produces on match.
    fn decision(&self) -> Decision {
        Decision::new(self.effect.verdict(), self.reason_code.clone())
    }
}

/// Returns the default effect for unmatched identified callers.
const fn default_rule_effect() -> RuleEffect {
    RuleEffect::Deny
}

// ============================================================================
// SECTION: Decision Point Adapter
// ============================================================================

/// Runtime decision engine for promotion authorization.
#[derive(Debug, Clone)]
pub enum DecisionEngine {
    /// Allow every request.
    AllowAll,
    /// Deny every request.
    DenyAll,
    /// Static rule evaluation.
    Static(StaticRulesConfig),
}

impl DecisionPoint for DecisionEngine {
    fn decide(
        &self,
        receipt: Option<&VerifiedReceipt>,
        intent: &ActionIntent,
    ) -> Result<Decision, DecisionPointError> {
        match self {
            Self::AllowAll => Ok(Decision::allow(REASON_ALLOW_ALL)),
            Self::DenyAll => Ok(Decision::deny(REASON_DENY_ALL)),
            Self::Static(rules) => Ok(rules.evaluate(receipt, intent)),
        }
    }
}

/// Returns true when the candidate matches the selector list.
///
/// An empty selector list matches any candidate.
fn matches_selector(selector: &[String], candidate: &str) -> bool {
    selector.is_empty() || selector.iter().any(|item| item == candidate)
}
