// crates/release-gate-report/src/scan.rs
// ============================================================================
// Module: Repository Schema Scan
// Description: Deterministic scan of repository JSON against a schema catalog.
// Purpose: Produce ordered per-file findings for the advisory report.
// Dependencies: jsonschema, serde_json
// ============================================================================

//! ## Overview
//! The scan walks the target root for `*.json` in sorted order, skipping
//! anything under a `.github` directory, and pairs each eligible document with
//! `<stem>.schema.json` in the schema catalog. Validation uses compiled JSON
//! Schema Draft 2020-12 validators. Every outcome becomes a finding; scan
//! failures never abort the walk, only infrastructure errors do.
//!
//! Security posture: scanned documents are untrusted; reads are size-capped
//! and a malformed document degrades to an unreadable finding.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;

use jsonschema::Draft;
use jsonschema::Validator;
use serde_json::Value;
use thiserror::Error;

use crate::allowlist::Eligibility;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum size of any scanned document or schema in bytes.
pub const MAX_JSON_BYTES: usize = 10 * 1024 * 1024;
/// Directory name excluded from the walk.
const EXCLUDED_DIR: &str = ".github";

// ============================================================================
// SECTION: Findings
// ============================================================================

/// Per-file outcome of the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    /// Document validated against its schema.
    Valid {
        /// Root-relative posix path of the document.
        path: String,
        /// Schema filename the document validated against.
        schema_name: String,
    },
    /// Document failed schema validation.
    Invalid {
        /// Root-relative posix path of the document.
        path: String,
        /// First validation error message.
        message: String,
    },
    /// No matching schema exists in the catalog; advisory only.
    SchemaMissing {
        /// Root-relative posix path of the document.
        path: String,
        /// Schema filename that was looked up.
        schema_name: String,
    },
    /// Document or schema could not be read, parsed, or compiled.
    Unreadable {
        /// Root-relative posix path of the document.
        path: String,
        /// Failure description.
        message: String,
    },
}

/// Result of scanning a repository root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Ordered findings, one per eligible document.
    pub findings: Vec<Finding>,
    /// Eligibility rules that selected the documents.
    pub eligibility: Eligibility,
}

// ============================================================================
// SECTION: Scan
// ============================================================================

/// Scans `root` for eligible JSON documents and validates each against the
/// schema catalog in `schema_dir`.
///
/// # Errors
///
/// Returns [`ReportError`] when the walk itself fails or the allowlist cannot
/// be read. Per-file problems become findings, not errors.
pub fn scan_repository(root: &Path, schema_dir: &Path) -> Result<ScanOutcome, ReportError> {
    let eligibility = Eligibility::load(root)?;
    let mut files = Vec::new();
    collect_json_files(root, "", &mut files)?;
    files.sort();

    let mut findings = Vec::new();
    for relative in files {
        if !eligibility.is_eligible(&relative) {
            continue;
        }
        findings.push(check_document(root, schema_dir, &relative));
    }
    Ok(ScanOutcome {
        findings,
        eligibility,
    })
}

/// Validates a single eligible document and classifies the outcome.
fn check_document(root: &Path, schema_dir: &Path, relative: &str) -> Finding {
    let Some(schema_name) = schema_name_for(relative) else {
        return Finding::Unreadable {
            path: relative.to_string(),
            message: "document name has no .json suffix".to_string(),
        };
    };
    let schema_path = schema_dir.join(&schema_name);
    if !schema_path.exists() {
        return Finding::SchemaMissing {
            path: relative.to_string(),
            schema_name,
        };
    }

    let schema_value = match read_json(&schema_path) {
        Ok(value) => value,
        Err(message) => {
            return Finding::Unreadable {
                path: relative.to_string(),
                message: format!("schema {schema_name}: {message}"),
            };
        }
    };
    let validator = match compile_schema(&schema_value) {
        Ok(validator) => validator,
        Err(message) => {
            return Finding::Unreadable {
                path: relative.to_string(),
                message: format!("schema {schema_name}: {message}"),
            };
        }
    };

    let document = match read_json(&root.join(relative)) {
        Ok(value) => value,
        Err(message) => {
            return Finding::Unreadable {
                path: relative.to_string(),
                message,
            };
        }
    };

    match validator.iter_errors(&document).next() {
        None => Finding::Valid {
            path: relative.to_string(),
            schema_name,
        },
        Some(err) => Finding::Invalid {
            path: relative.to_string(),
            message: err.to_string(),
        },
    }
}

/// Derives the catalog schema filename for a document path.
fn schema_name_for(relative: &str) -> Option<String> {
    let name = relative.rsplit('/').next()?;
    let stem = name.strip_suffix(".json")?;
    Some(format!("{stem}.schema.json"))
}

/// Recursively collects root-relative posix paths of `*.json` files.
fn collect_json_files(
    dir: &Path,
    prefix: &str,
    files: &mut Vec<String>,
) -> Result<(), ReportError> {
    let entries =
        fs::read_dir(dir).map_err(|err| ReportError::Io(format!("{}: {err}", dir.display())))?;
    for entry in entries {
        let entry =
            entry.map_err(|err| ReportError::Io(format!("{}: {err}", dir.display())))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name == EXCLUDED_DIR {
            continue;
        }
        let relative = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}/{name}")
        };
        let file_type = entry
            .file_type()
            .map_err(|err| ReportError::Io(format!("{}: {err}", entry.path().display())))?;
        if file_type.is_dir() {
            collect_json_files(&entry.path(), &relative, files)?;
        } else if file_type.is_file() && name.ends_with(".json") {
            files.push(relative);
        }
    }
    Ok(())
}

/// Reads and parses a JSON file with a size cap.
fn read_json(path: &Path) -> Result<Value, String> {
    let bytes = fs::read(path).map_err(|err| err.to_string())?;
    if bytes.len() > MAX_JSON_BYTES {
        return Err(format!("exceeds {MAX_JSON_BYTES} byte limit"));
    }
    serde_json::from_slice(&bytes).map_err(|err| err.to_string())
}

/// Compiles a JSON Schema for validation.
fn compile_schema(schema: &Value) -> Result<Validator, String> {
    jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(schema)
        .map_err(|err| format!("invalid schema: {err}"))
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors that abort the scan outright.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Walk or allowlist I/O failure.
    #[error("report scan: {0}")]
    Io(String),
    /// Report document serialization failure.
    #[error("report render: {0}")]
    Serialization(String),
}
