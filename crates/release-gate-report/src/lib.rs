// crates/release-gate-report/src/lib.rs
// ============================================================================
// Module: Release Gate Report Library
// Description: Advisory schema-validation reporting for repository JSON.
// Purpose: Validate repository documents against a schema catalog and render
//          the warn-only report published to reviewers.
// Dependencies: jsonschema, serde, serde_json
// ============================================================================

//! ## Overview
//! `release-gate-report` scans a repository for JSON documents, validates each
//! against a matching schema in a catalog directory, and renders an advisory
//! report. Eligibility comes from an optional allowlist file; findings are
//! deterministic and ordered. The report is warn-only: it never gates
//! anything on its own.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod allowlist;
pub mod render;
pub mod scan;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use allowlist::ALLOWLIST_FILENAME;
pub use allowlist::Eligibility;
pub use render::ReportDocument;
pub use render::render_report;
pub use scan::Finding;
pub use scan::MAX_JSON_BYTES;
pub use scan::ReportError;
pub use scan::ScanOutcome;
pub use scan::scan_repository;
