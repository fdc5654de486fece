// crates/release-gate-report/src/allowlist.rs
// ============================================================================
// Module: Report Eligibility Allowlist
// Description: Path-prefix eligibility rules for the repository scan.
// Purpose: Decide which JSON documents the advisory report validates.
// Dependencies: (crate-internal)
// ============================================================================

//! ## Overview
//! An optional `release-gate.allowlist` at the scan root selects the files the
//! report validates. One path prefix per line; blank lines and `#` comments
//! are ignored; separators are normalized to `/` and every prefix gains a
//! trailing slash. A present-but-empty allowlist means nothing is eligible.
//! Without an allowlist only JSON under `examples/`, `demo/`, or `meta/`
//! directories is scanned.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::scan::ReportError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Allowlist filename looked up at the scan root.
pub const ALLOWLIST_FILENAME: &str = "release-gate.allowlist";
/// Maximum allowlist file size in bytes.
const MAX_ALLOWLIST_BYTES: usize = 64 * 1024;
/// Directory names eligible by default when no allowlist exists.
const DEFAULT_ELIGIBLE_DIRS: [&str; 3] = ["examples", "demo", "meta"];

// ============================================================================
// SECTION: Eligibility
// ============================================================================

/// Eligibility rules applied to scanned paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    /// No allowlist present; default directory rules apply.
    DefaultDirectories,
    /// Explicit allowlist prefixes; empty means nothing is eligible.
    Allowlist(Vec<String>),
}

impl Eligibility {
    /// Loads eligibility rules from `root`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] when an allowlist exists but cannot be read or
    /// exceeds the size limit.
    pub fn load(root: &Path) -> Result<Self, ReportError> {
        let path = root.join(ALLOWLIST_FILENAME);
        let raw = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Ok(Self::DefaultDirectories);
            }
            Err(err) => {
                return Err(ReportError::Io(format!("{}: {err}", path.display())));
            }
        };
        if raw.len() > MAX_ALLOWLIST_BYTES {
            return Err(ReportError::Io(format!(
                "{}: allowlist exceeds {MAX_ALLOWLIST_BYTES} byte limit",
                path.display()
            )));
        }
        let content = String::from_utf8_lossy(&raw);
        Ok(Self::Allowlist(parse_prefixes(&content)))
    }

    /// Returns true when a root-relative posix path is eligible for the scan.
    #[must_use]
    pub fn is_eligible(&self, relative: &str) -> bool {
        match self {
            Self::DefaultDirectories => relative
                .split('/')
                .any(|part| DEFAULT_ELIGIBLE_DIRS.contains(&part)),
            Self::Allowlist(prefixes) => {
                prefixes.iter().any(|prefix| relative.starts_with(prefix.as_str()))
            }
        }
    }

    /// Returns true when eligibility came from an explicit allowlist.
    #[must_use]
    pub const fn is_explicit(&self) -> bool {
        matches!(self, Self::Allowlist(_))
    }
}

/// Parses allowlist lines into normalized directory prefixes.
fn parse_prefixes(content: &str) -> Vec<String> {
    let mut prefixes = Vec::new();
    for raw in content.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut prefix = line.replace('\\', "/");
        if !prefix.ends_with('/') {
            prefix.push('/');
        }
        prefixes.push(prefix);
    }
    prefixes
}
