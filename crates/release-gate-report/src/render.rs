// crates/release-gate-report/src/render.rs
// ============================================================================
// Module: Report Rendering
// Description: Markdown comment and result-line rendering for scan findings.
// Purpose: Produce the advisory report document published to reviewers.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The report document pairs a markdown `comment` with the ordered `results`
//! lines it was built from. The comment carries a version header and an
//! advisory footer; the report is warn-only and never blocks anything. Empty
//! scans are reported explicitly so reviewers can tell "nothing eligible"
//! from "nothing ran".

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::allowlist::ALLOWLIST_FILENAME;
use crate::scan::Finding;
use crate::scan::ReportError;
use crate::scan::ScanOutcome;

// ============================================================================
// SECTION: Report Document
// ============================================================================

/// Advisory report published after a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportDocument {
    /// Markdown summary suitable for a review comment.
    pub comment: String,
    /// Ordered finding lines the comment was built from.
    pub results: Vec<String>,
}

impl ReportDocument {
    /// Serializes the report with stable formatting and a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Serialization`] when encoding fails.
    pub fn to_canonical_json(&self) -> Result<String, ReportError> {
        let mut rendered = serde_json::to_string_pretty(self)
            .map_err(|err| ReportError::Serialization(err.to_string()))?;
        rendered.push('\n');
        Ok(rendered)
    }
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Builds the report document from a scan outcome.
#[must_use]
pub fn render_report(
    outcome: &ScanOutcome,
    tool_version: &str,
    catalog_version: &str,
) -> ReportDocument {
    let mut results: Vec<String> = outcome.findings.iter().map(render_finding).collect();
    if results.is_empty() {
        results.push(empty_scan_line(outcome));
    }

    let mut lines = vec![
        "### \u{1f6e1}\u{fe0f} Release Gate Report".to_string(),
        format!("- release-gate: `{tool_version}`"),
        format!("- schema catalog: `{catalog_version}`"),
        String::new(),
    ];
    lines.extend(results.iter().cloned());
    lines.push(String::new());
    lines.push(
        "> Policy: advisory only (warn-only). No merges are blocked by this report.".to_string(),
    );

    ReportDocument {
        comment: lines.join("\n"),
        results,
    }
}

/// Renders a single finding line.
fn render_finding(finding: &Finding) -> String {
    match finding {
        Finding::Valid {
            path,
            schema_name,
        } => {
            format!("\u{2705} `{path}` valid against `{schema_name}`")
        }
        Finding::Invalid {
            path,
            message,
        } => {
            format!("\u{274c} `{path}` failed validation: {message}")
        }
        Finding::SchemaMissing {
            path,
            schema_name,
        } => {
            format!("\u{26a0}\u{fe0f} `{path}`: no matching schema `{schema_name}` in catalog.")
        }
        Finding::Unreadable {
            path,
            message,
        } => {
            format!("\u{274c} `{path}` error: {message}")
        }
    }
}

/// Renders the explicit line for a scan that matched nothing.
fn empty_scan_line(outcome: &ScanOutcome) -> String {
    if outcome.eligibility.is_explicit() {
        format!(
            "\u{2139}\u{fe0f} No eligible JSON found (allowlist `{ALLOWLIST_FILENAME}` matched nothing)."
        )
    } else {
        "\u{2139}\u{fe0f} No eligible JSON found (validates only under examples/demo/meta by default)."
            .to_string()
    }
}
