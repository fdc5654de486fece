// crates/release-gate-cli/src/i18n.rs
// ============================================================================
// Module: CLI Internationalization Helpers
// Description: Provides message catalog and translation utilities for the CLI.
// Purpose: Centralize user-facing strings for future localization support.
// Dependencies: Standard library collections and formatting utilities.
// ============================================================================

//! ## Overview
//! The release-gate CLI stores user-facing strings in a small translation
//! catalog to enforce consistent messaging and to prepare for future locales.
//! All runtime output should be routed through the [`t!`](crate::t) macro.
//!
//! ## Invariants
//! - The catalog is initialized once and read-only thereafter.
//! - Missing keys fall back to English and then to the key itself.
//! - Placeholder substitutions preserve deterministic order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Supported CLI locales.
///
/// # Invariants
/// - Variants are stable for CLI parsing and catalog lookup.
/// - [`Locale::En`] is the default fallback locale.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Locale {
    /// English (default).
    En,
    /// Catalan.
    Ca,
}

impl Locale {
    /// Returns the canonical locale label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ca => "ca",
        }
    }

    /// Attempts to parse a locale value (case-insensitive, tolerant of region tags).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        let normalized = value.to_ascii_lowercase();
        let lang = normalized.split(['-', '_']).next().unwrap_or("");
        match lang {
            "en" => Some(Self::En),
            "ca" => Some(Self::Ca),
            _ => None,
        }
    }
}

/// Ordered list of supported CLI locales.
///
/// # Invariants
/// - Ordering is stable for deterministic presentation.
pub const SUPPORTED_LOCALES: &[Locale] = &[Locale::En, Locale::Ca];

/// A formatted message argument captured by the [`macro@crate::t`] macro.
///
/// # Invariants
/// - `key` matches a placeholder name without braces (for example, `path`).
/// - `value` is preformatted and should be safe for display.
#[derive(Clone)]
pub struct MessageArg {
    /// The placeholder name used in message templates (e.g., `"path"`).
    pub key: &'static str,
    /// The formatted string value to substitute for this placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`] from a key and displayable value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Locale Selection
// ============================================================================

/// Global locale selection for CLI output.
static CURRENT_LOCALE: OnceLock<Locale> = OnceLock::new();

/// Sets the CLI locale. Only the first call wins.
pub fn set_locale(locale: Locale) {
    let _ = CURRENT_LOCALE.set(locale);
}

/// Returns the current CLI locale (defaults to English).
#[must_use]
pub fn current_locale() -> Locale {
    CURRENT_LOCALE.get().copied().unwrap_or(Locale::En)
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Static English catalog entries loaded into the localized message bundle.
const CATALOG_EN: &[(&str, &str)] = &[
    ("main.version", "release-gate {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    (
        "input.read_too_large",
        "Refusing to read {kind} at {path} because it is {size} bytes (limit {limit}).",
    ),
    ("config.load_failed", "Failed to load config: {error}"),
    ("config.validate.ok", "Config valid."),
    ("policy.kind", "promotion policy"),
    ("policy.load_failed", "Failed to load promotion policy: {error}"),
    ("policy.read_failed", "Failed to read promotion policy at {path}: {error}"),
    ("policy.invalid", "Invalid promotion policy: {error}"),
    ("policy.validate.ok", "Promotion policy valid."),
    ("status.state", "Cluster state: {state}"),
    ("status.gate.allowed", "Promotion gate: allowed ({reason})"),
    ("status.gate.denied", "Promotion gate: denied ({reason})"),
    ("status.artifact.ok", "Global status written to {path}"),
    ("status.artifact.render_failed", "Failed to render global status: {error}"),
    ("status.artifact.write_failed", "Failed to write global status to {path}: {error}"),
    (
        "status.enforce.denied",
        "Promotion gate denied; exiting with failure because --enforce is set.",
    ),
    ("authz.receipt.kind", "receipt"),
    ("authz.receipt.read_failed", "Failed to read receipt at {path}: {error}"),
    ("authz.receipt.load_failed", "Failed to load receipt: {error}"),
    ("authz.engine.build_failed", "Failed to build decision engine: {error}"),
    ("authz.param.invalid", "Invalid --param value {value}; expected KEY=VALUE."),
    ("authz.check.allowed", "Decision: ALLOW ({reason})"),
    ("authz.check.denied", "Decision: {verdict} ({reason})"),
    ("authz.check.rejected", "Authorization rejected: {error}"),
    ("report.scan_failed", "Report scan failed: {error}"),
    ("report.render_failed", "Failed to render report: {error}"),
    ("report.write_failed", "Failed to write report to {path}: {error}"),
    ("report.ok", "Report written to {path}"),
    ("i18n.lang.invalid_env", "Invalid value for {env}: {value}. Expected 'en' or 'ca'."),
    (
        "i18n.disclaimer.machine_translated",
        "Note: non-English output is machine-translated and may be inaccurate.",
    ),
];

/// Static Catalan catalog entries loaded into the localized message bundle.
const CATALOG_CA: &[(&str, &str)] = &[
    ("main.version", "release-gate {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "sortida"),
    ("output.write_failed", "No s'ha pogut escriure a {stream}: {error}"),
    (
        "input.read_too_large",
        "Es rebutja llegir {kind} a {path} perquè fa {size} bytes (límit {limit}).",
    ),
    ("config.load_failed", "No s'ha pogut carregar la configuració: {error}"),
    ("config.validate.ok", "Configuració vàlida."),
    ("policy.kind", "política de promoció"),
    ("policy.load_failed", "No s'ha pogut carregar la política de promoció: {error}"),
    ("policy.read_failed", "No s'ha pogut llegir la política de promoció a {path}: {error}"),
    ("policy.invalid", "Política de promoció no vàlida: {error}"),
    ("policy.validate.ok", "Política de promoció vàlida."),
    ("status.state", "Estat del clúster: {state}"),
    ("status.gate.allowed", "Porta de promoció: permesa ({reason})"),
    ("status.gate.denied", "Porta de promoció: denegada ({reason})"),
    ("status.artifact.ok", "Estat global escrit a {path}"),
    ("status.artifact.render_failed", "No s'ha pogut renderitzar l'estat global: {error}"),
    (
        "status.artifact.write_failed",
        "No s'ha pogut escriure l'estat global a {path}: {error}",
    ),
    (
        "status.enforce.denied",
        "Porta de promoció denegada; se surt amb error perquè --enforce està activat.",
    ),
    ("authz.receipt.kind", "rebut"),
    ("authz.receipt.read_failed", "No s'ha pogut llegir el rebut a {path}: {error}"),
    ("authz.receipt.load_failed", "No s'ha pogut carregar el rebut: {error}"),
    ("authz.engine.build_failed", "No s'ha pogut construir el motor de decisió: {error}"),
    ("authz.param.invalid", "Valor de --param no vàlid {value}; s'esperava KEY=VALUE."),
    ("authz.check.allowed", "Decisió: ALLOW ({reason})"),
    ("authz.check.denied", "Decisió: {verdict} ({reason})"),
    ("authz.check.rejected", "Autorització rebutjada: {error}"),
    ("report.scan_failed", "L'escaneig de l'informe ha fallat: {error}"),
    ("report.render_failed", "No s'ha pogut renderitzar l'informe: {error}"),
    ("report.write_failed", "No s'ha pogut escriure l'informe a {path}: {error}"),
    ("report.ok", "Informe escrit a {path}"),
    ("i18n.lang.invalid_env", "Valor no vàlid per a {env}: {value}. S'esperava 'en' o 'ca'."),
    (
        "i18n.disclaimer.machine_translated",
        "Nota: la sortida que no és en anglès està traduïda automàticament i pot ser inexacta.",
    ),
];

/// Returns the message catalog for the requested locale.
pub(crate) fn catalog_for(locale: Locale) -> &'static HashMap<&'static str, &'static str> {
    static CATALOG_EN_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static CATALOG_CA_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    match locale {
        Locale::En => CATALOG_EN_MAP.get_or_init(|| CATALOG_EN.iter().copied().collect()),
        Locale::Ca => CATALOG_CA_MAP.get_or_init(|| CATALOG_CA.iter().copied().collect()),
    }
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Translates `key` using the selected locale while substituting `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    let locale = current_locale();
    let template = catalog_for(locale)
        .get(key)
        .copied()
        .or_else(|| catalog_for(Locale::En).get(key).copied())
        .unwrap_or(key);
    if args.is_empty() {
        return template.to_string();
    }

    let mut result = template.to_string();
    for arg in args {
        let placeholder = format!("{{{}}}", arg.key);
        result = result.replace(&placeholder, &arg.value);
    }
    result
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a localized message from a key and named arguments.
///
/// # Arguments
///
/// - `$key` must match a catalog entry.
/// - Named arguments are substituted into `{placeholder}` positions.
///
/// # Returns
///
/// A localized [`String`] with placeholders substituted.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}
