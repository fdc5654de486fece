// crates/release-gate-core/src/runtime/loader.rs
// ============================================================================
// Module: Release Gate Status Loader
// Description: Bounded, tolerant loading of the dependency-status document.
// Purpose: Turn file-system reality into an explicit snapshot plus provenance.
// Dependencies: crate::core, serde_json, sha2
// ============================================================================

//! ## Overview
//! The status document is partially trusted: absence and malformed content
//! are expected states, not errors. The loader therefore never fails; it
//! returns a [`StatusSnapshot`] that is either a parsed document or a
//! reasoned absence, together with the provenance the emitter publishes.
//! Reads are size-bounded and oversized files count as unreadable.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io;
use std::path::Path;

use sha2::Digest;
use sha2::Sha256;

use crate::core::global::SourceProvenance;
use crate::core::status::AbsenceReason;
use crate::core::status::StatusDocument;
use crate::core::status::StatusSnapshot;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default size cap for the status document, in bytes.
pub const DEFAULT_MAX_STATUS_BYTES: usize = 1024 * 1024;

// ============================================================================
// SECTION: Loaded Status
// ============================================================================

/// Loader output: the snapshot plus the provenance describing how it loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedStatus {
    /// Parsed document or reasoned absence.
    pub snapshot: StatusSnapshot,
    /// Provenance published alongside the run's results.
    pub provenance: SourceProvenance,
}

// ============================================================================
// SECTION: Loader
// ============================================================================

/// Loads the dependency-status document from `path` with a byte cap.
///
/// # Invariants
/// - Never fails: missing, unreadable, oversized, and malformed inputs all
///   map to [`StatusSnapshot::Absent`] with a reason.
/// - The digest covers the raw bytes actually read; rejected oversized
///   content carries no digest.
#[must_use]
pub fn load_status_document(path: &Path, max_bytes: usize) -> LoadedStatus {
    let recorded_path = Some(path.display().to_string());

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return absent(AbsenceReason::Missing, recorded_path, None);
        }
        Err(_) => {
            return absent(AbsenceReason::Unreadable, recorded_path, None);
        }
    };

    if bytes.len() > max_bytes {
        return absent(AbsenceReason::Unreadable, recorded_path, None);
    }

    let digest = Some(sha256_hex(&bytes));
    match serde_json::from_slice::<StatusDocument>(&bytes) {
        Ok(doc) => {
            let aggregated_records = doc.aggregated_records;
            LoadedStatus {
                snapshot: StatusSnapshot::Present(doc),
                provenance: SourceProvenance {
                    dependency_status_present: true,
                    dependency_status_path: recorded_path,
                    aggregated_records,
                    source_digest_sha256: digest,
                },
            }
        }
        Err(_) => absent(AbsenceReason::Unreadable, recorded_path, digest),
    }
}

/// Builds the absent snapshot with matching provenance.
fn absent(reason: AbsenceReason, path: Option<String>, digest: Option<String>) -> LoadedStatus {
    LoadedStatus {
        snapshot: StatusSnapshot::Absent(reason),
        provenance: SourceProvenance {
            dependency_status_present: false,
            dependency_status_path: path,
            aggregated_records: 0,
            source_digest_sha256: digest,
        },
    }
}

// ============================================================================
// SECTION: Digest Helpers
// ============================================================================

/// Computes the lowercase hex SHA-256 of the provided bytes.
fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex_encode(&hasher.finalize())
}

/// Encodes bytes as a lowercase hex string.
fn hex_encode(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(HEX[(byte >> 4) as usize] as char);
        out.push(HEX[(byte & 0x0f) as usize] as char);
    }
    out
}
