// crates/release-gate-core/src/core/time.rs
// ============================================================================
// Module: Release Gate Time Model
// Description: Canonical RFC3339 timestamp representation.
// Purpose: Provide explicit, replayable time values across Release Gate records.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! Release Gate embeds explicit time values in status artifacts and receipt
//! checks to keep evaluation deterministic. The core engine never reads
//! wall-clock time directly; hosts supply timestamps at every entry point
//! that needs one.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

// ============================================================================
// SECTION: Timestamp
// ============================================================================

/// Canonical RFC3339 instant used in Release Gate artifacts and receipts.
///
/// # Invariants
/// - Values are explicitly provided by callers; the core never reads
///   wall-clock time inside classification, gating, or receipt checks.
/// - Ordering follows the underlying instant, not the string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(#[serde(with = "time::serde::rfc3339")] OffsetDateTime);

impl Timestamp {
    /// Creates a timestamp from an already-parsed instant.
    #[must_use]
    pub const fn new(instant: OffsetDateTime) -> Self {
        Self(instant)
    }

    /// Captures the current UTC instant.
    ///
    /// Host-side constructor only; runtime functions take timestamps as
    /// arguments instead of calling this.
    #[must_use]
    pub fn now_utc() -> Self {
        Self(OffsetDateTime::now_utc())
    }

    /// Parses an RFC3339 string.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Parse`] when the string is not valid RFC3339.
    pub fn parse(raw: &str) -> Result<Self, TimeError> {
        OffsetDateTime::parse(raw, &Rfc3339)
            .map(Self)
            .map_err(|err| TimeError::Parse(err.to_string()))
    }

    /// Returns the underlying instant.
    #[must_use]
    pub const fn instant(&self) -> OffsetDateTime {
        self.0
    }

    /// Renders the timestamp as an RFC3339 string.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Format`] when the instant cannot be rendered,
    /// which only happens for years outside the RFC3339 range.
    pub fn to_rfc3339(&self) -> Result<String, TimeError> {
        self.0.format(&Rfc3339).map_err(|err| TimeError::Format(err.to_string()))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self.0.format(&Rfc3339).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when parsing or rendering timestamps.
#[derive(Debug, Error)]
pub enum TimeError {
    /// Input string was not valid RFC3339.
    #[error("invalid rfc3339 timestamp: {0}")]
    Parse(String),
    /// Instant could not be rendered as RFC3339.
    #[error("unrepresentable rfc3339 timestamp: {0}")]
    Format(String),
}
