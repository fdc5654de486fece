// crates/release-gate-config/src/config.rs
// ============================================================================
// Module: Release Gate Configuration
// Description: Configuration loading and validation for the runner.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: release-gate-core, serde, toml
// ============================================================================

//! ## Overview
//! Runner configuration is loaded from a TOML file with strict size and path
//! limits. Malformed configuration fails closed. An explicitly requested file
//! must exist; only the implicit default location may fall back to built-in
//! defaults, and only through [`RunnerConfig::load_or_default`].
//!
//! Security posture: config inputs are untrusted; every section validates its
//! own limits before use.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use release_gate_core::runtime::DEFAULT_MAX_STATUS_BYTES;
use serde::Deserialize;
use thiserror::Error;

use crate::engine::DecisionEngine;
use crate::engine::EngineKind;
use crate::engine::StaticRulesConfig;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "release-gate.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "RELEASE_GATE_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Hard ceiling on any configured input-file size limit, in bytes.
pub(crate) const MAX_INPUT_FILE_BYTES: usize = 10 * 1024 * 1024;
/// Default promotion-policy size cap in bytes.
pub(crate) const DEFAULT_MAX_POLICY_BYTES: usize = 64 * 1024;
/// Default receipt size cap in bytes.
pub(crate) const DEFAULT_MAX_RECEIPT_BYTES: usize = 64 * 1024;

// ============================================================================
// SECTION: Runner Configuration
// ============================================================================

/// Top-level runner configuration loaded from `release-gate.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunnerConfig {
    /// Input and output file locations.
    #[serde(default)]
    pub paths: PathsConfig,
    /// Size caps for external inputs.
    #[serde(default)]
    pub limits: LimitsConfig,
    /// Authorization decision-engine configuration.
    #[serde(default)]
    pub authz: AuthzConfig,
}

impl RunnerConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// Resolution order: explicit path, then the `RELEASE_GATE_CONFIG`
    /// environment variable, then `release-gate.toml` in the working
    /// directory. The resolved file must exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        Self::load_resolved(&resolved)
    }

    /// Loads configuration, falling back to defaults when only the implicit
    /// default location is missing.
    ///
    /// An explicit path or environment override still fails loudly when the
    /// file is absent; silent fallback is reserved for the unconfigured case.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an existing file fails to load or
    /// validate.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let explicit = path.is_some() || env::var(CONFIG_ENV_VAR).is_ok();
        let resolved = resolve_path(path)?;
        if !explicit && !resolved.exists() {
            return Ok(Self::default());
        }
        Self::load_resolved(&resolved)
    }

    /// Loads and validates the file at an already-resolved path.
    fn load_resolved(resolved: &Path) -> Result<Self, ConfigError> {
        validate_path(resolved)?;
        let bytes = fs::read(resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.paths.validate()?;
        self.limits.validate()?;
        self.authz.validate()?;
        Ok(())
    }
}

// ============================================================================
// SECTION: Paths
// ============================================================================

/// Input and output file locations for a run.
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    /// Dependency-status document materialized by the tracking service.
    #[serde(default = "default_status_document_path")]
    pub status_document: String,
    /// Promotion-policy JSON document.
    #[serde(default = "default_promotion_policy_path")]
    pub promotion_policy: String,
    /// Published global-status artifact.
    #[serde(default = "default_global_status_path")]
    pub global_status: String,
    /// Root of the repository tree scanned by the report command.
    #[serde(default = "default_report_root")]
    pub report_root: String,
    /// Directory holding the schema catalog for the report command.
    #[serde(default = "default_report_schema_dir")]
    pub report_schema_dir: String,
    /// Report output document.
    #[serde(default = "default_report_output_path")]
    pub report_output: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            status_document: default_status_document_path(),
            promotion_policy: default_promotion_policy_path(),
            global_status: default_global_status_path(),
            report_root: default_report_root(),
            report_schema_dir: default_report_schema_dir(),
            report_output: default_report_output_path(),
        }
    }
}

impl PathsConfig {
    /// Validates every configured path against length constraints.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_path_string("paths.status_document", &self.status_document)?;
        validate_path_string("paths.promotion_policy", &self.promotion_policy)?;
        validate_path_string("paths.global_status", &self.global_status)?;
        validate_path_string("paths.report_root", &self.report_root)?;
        validate_path_string("paths.report_schema_dir", &self.report_schema_dir)?;
        validate_path_string("paths.report_output", &self.report_output)?;
        Ok(())
    }
}

/// Returns the default dependency-status document path.
fn default_status_document_path() -> String {
    "meta/dependency_status.json".to_string()
}

/// Returns the default promotion-policy path.
fn default_promotion_policy_path() -> String {
    "meta/promotion_policy.json".to_string()
}

/// Returns the default global-status artifact path.
fn default_global_status_path() -> String {
    "meta/global_status.json".to_string()
}

/// Returns the default report scan root.
fn default_report_root() -> String {
    ".".to_string()
}

/// Returns the default schema catalog directory.
fn default_report_schema_dir() -> String {
    "schemas".to_string()
}

/// Returns the default report output path.
fn default_report_output_path() -> String {
    "release-gate-report.json".to_string()
}

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Size caps applied when reading external inputs.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Maximum dependency-status document size in bytes.
    #[serde(default = "default_max_status_bytes")]
    pub max_status_bytes: usize,
    /// Maximum promotion-policy document size in bytes.
    #[serde(default = "default_max_policy_bytes")]
    pub max_policy_bytes: usize,
    /// Maximum receipt payload size in bytes.
    #[serde(default = "default_max_receipt_bytes")]
    pub max_receipt_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_status_bytes: default_max_status_bytes(),
            max_policy_bytes: default_max_policy_bytes(),
            max_receipt_bytes: default_max_receipt_bytes(),
        }
    }
}

impl LimitsConfig {
    /// Validates every size cap against the hard ceiling.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_limit("limits.max_status_bytes", self.max_status_bytes)?;
        validate_limit("limits.max_policy_bytes", self.max_policy_bytes)?;
        validate_limit("limits.max_receipt_bytes", self.max_receipt_bytes)?;
        Ok(())
    }
}

/// Returns the default status-document size cap.
fn default_max_status_bytes() -> usize {
    DEFAULT_MAX_STATUS_BYTES
}

/// Returns the default promotion-policy size cap.
const fn default_max_policy_bytes() -> usize {
    DEFAULT_MAX_POLICY_BYTES
}

/// Returns the default receipt size cap.
const fn default_max_receipt_bytes() -> usize {
    DEFAULT_MAX_RECEIPT_BYTES
}

/// Validates a single size cap value.
fn validate_limit(field: &str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::Invalid(format!("{field} must be nonzero")));
    }
    if value > MAX_INPUT_FILE_BYTES {
        return Err(ConfigError::Invalid(format!("{field} exceeds hard ceiling")));
    }
    Ok(())
}

// ============================================================================
// SECTION: Authorization
// ============================================================================

/// Authorization decision-engine configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthzConfig {
    /// Decision engine selection.
    #[serde(default)]
    pub engine: EngineKind,
    /// Static rules, required when `engine = "static"`.
    #[serde(default, rename = "static")]
    pub static_rules: Option<StaticRulesConfig>,
}

impl AuthzConfig {
    /// Validates authorization configuration for internal consistency.
    fn validate(&self) -> Result<(), ConfigError> {
        match self.engine {
            EngineKind::Static => {
                let Some(static_rules) = &self.static_rules else {
                    return Err(ConfigError::Invalid(
                        "authz.engine=static requires authz.static".to_string(),
                    ));
                };
                static_rules.validate().map_err(ConfigError::Invalid)?;
            }
            EngineKind::AllowAll | EngineKind::DenyAll => {
                if self.static_rules.is_some() {
                    return Err(ConfigError::Invalid(
                        "authz.static only allowed when engine=static".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Builds the runtime decision engine.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the configuration is missing static rules.
    pub fn decision_engine(&self) -> Result<DecisionEngine, ConfigError> {
        match self.engine {
            EngineKind::AllowAll => Ok(DecisionEngine::AllowAll),
            EngineKind::DenyAll => Ok(DecisionEngine::DenyAll),
            EngineKind::Static => {
                let static_rules = self.static_rules.clone().ok_or_else(|| {
                    ConfigError::Invalid("authz.static is required for static engine".to_string())
                })?;
                Ok(DecisionEngine::Static(static_rules))
            }
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// Parsing error in a configuration document.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a configured path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    let path = Path::new(trimmed);
    for component in path.components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}
