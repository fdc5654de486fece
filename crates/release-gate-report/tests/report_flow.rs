//! End-to-end scan and render tests for release-gate-report.
// crates/release-gate-report/tests/report_flow.rs
// =============================================================================
// Module: Report Flow Tests
// Description: Scan a fixture repository and render the advisory report.
// Purpose: Ensure the full scan-to-report pipeline stays deterministic.
// =============================================================================

use std::fs;
use std::path::Path;

use release_gate_report::render_report;
use release_gate_report::scan_repository;
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

const STATUS_SCHEMA: &str = r#"{
    "type": "object",
    "properties": {
        "global_ok": {"type": "boolean"},
        "aggregated_records": {"type": "integer", "minimum": 0}
    },
    "required": ["global_ok"]
}"#;

fn write(root: &Path, relative: &str, content: &str) -> TestResult {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

#[test]
fn mixed_repository_produces_a_full_report() -> TestResult {
    let repo = TempDir::new()?;
    let schemas = TempDir::new()?;
    write(schemas.path(), "dependency_status.schema.json", STATUS_SCHEMA)?;
    write(
        repo.path(),
        "meta/dependency_status.json",
        r#"{"global_ok": true, "aggregated_records": 12}"#,
    )?;
    write(repo.path(), "demo/sample.json", r#"{"anything": 1}"#)?;
    write(repo.path(), "src/internal.json", "{}")?;

    let outcome = scan_repository(repo.path(), schemas.path())?;
    let report = render_report(&outcome, "0.1.0", "v1");

    if report.results.len() != 2 {
        return Err(format!("expected 2 results, got {:?}", report.results).into());
    }
    if !report.results[0].contains("`demo/sample.json`") {
        return Err(format!("unexpected first result: {}", report.results[0]).into());
    }
    if !report.results[0].contains("no matching schema `sample.schema.json`") {
        return Err(format!("expected schema-missing line: {}", report.results[0]).into());
    }
    if !report.results[1].contains("`meta/dependency_status.json` valid against") {
        return Err(format!("expected valid line: {}", report.results[1]).into());
    }
    if report.comment.contains("src/internal.json") {
        return Err("ineligible file leaked into the report".into());
    }

    let rendered = report.to_canonical_json()?;
    let reparsed: serde_json::Value = serde_json::from_str(&rendered)?;
    let results = reparsed
        .get("results")
        .and_then(serde_json::Value::as_array)
        .ok_or("results array missing")?;
    if results.len() != 2 {
        return Err("reparsed results length mismatch".into());
    }
    Ok(())
}

#[test]
fn rescans_are_byte_identical() -> TestResult {
    let repo = TempDir::new()?;
    let schemas = TempDir::new()?;
    write(schemas.path(), "a.schema.json", STATUS_SCHEMA)?;
    write(repo.path(), "meta/a.json", r#"{"global_ok": false}"#)?;
    write(repo.path(), "meta/b.json", r#"{"global_ok": 3}"#)?;

    let first = scan_repository(repo.path(), schemas.path())?;
    let second = scan_repository(repo.path(), schemas.path())?;
    if first != second {
        return Err("scan outcomes differ between runs".into());
    }

    let first_doc = render_report(&first, "0.1.0", "v1").to_canonical_json()?;
    let second_doc = render_report(&second, "0.1.0", "v1").to_canonical_json()?;
    if first_doc != second_doc {
        return Err("rendered reports differ between runs".into());
    }
    Ok(())
}

#[test]
fn invalid_document_reports_first_validation_message() -> TestResult {
    let repo = TempDir::new()?;
    let schemas = TempDir::new()?;
    write(schemas.path(), "doc.schema.json", STATUS_SCHEMA)?;
    write(
        repo.path(),
        "meta/doc.json",
        r#"{"global_ok": "yes", "aggregated_records": -1}"#,
    )?;

    let outcome = scan_repository(repo.path(), schemas.path())?;
    let report = render_report(&outcome, "0.1.0", "v1");
    if report.results.len() != 1 {
        return Err("expected a single finding".into());
    }
    if !report.results[0].contains("`meta/doc.json` failed validation:") {
        return Err(format!("expected failure line: {}", report.results[0]).into());
    }
    Ok(())
}
