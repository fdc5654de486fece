// crates/release-gate-cli/src/main.rs
// ============================================================================
// Module: Release Gate CLI Entry Point
// Description: Command dispatcher for status, authorization, and report runs.
// Purpose: Provide a safe, localized CLI for cluster gating workflows.
// Dependencies: clap, release-gate-config, release-gate-core, release-gate-report.
// ============================================================================

//! ## Overview
//! The release-gate CLI aggregates dependency status into the published
//! global-status artifact, evaluates authorization receipts against the
//! configured decision engine, and produces advisory schema-validation
//! reports. All user-facing strings are routed through the i18n catalog.
//! Security posture: CLI inputs are untrusted and size-capped before parsing.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fs;
use std::fs::File;
use std::fs::OpenOptions;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use release_gate_cli::i18n::Locale;
use release_gate_cli::i18n::set_locale;
use release_gate_cli::t;
use release_gate_config::LimitsConfig;
use release_gate_config::RunnerConfig;
use release_gate_config::load_promotion_policy;
use release_gate_config::receipt_from_env;
use release_gate_core::ActionIntent;
use release_gate_core::AuthzError;
use release_gate_core::PromotionPolicy;
use release_gate_core::Timestamp;
use release_gate_core::VerifiedReceipt;
use release_gate_core::classify;
use release_gate_core::emit;
use release_gate_core::evaluate_gate;
use release_gate_core::load_status_document;
use release_gate_core::require_allowed;
use release_gate_report::render_report;
use release_gate_report::scan_repository;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable for CLI locale selection.
const LANG_ENV: &str = "RELEASE_GATE_LANG";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "release-gate", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Preferred output language (overrides `RELEASE_GATE_LANG`).
    #[arg(long, value_enum, value_name = "LANG", global = true)]
    lang: Option<LangArg>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Cluster status aggregation utilities.
    Status {
        /// Selected status subcommand.
        #[command(subcommand)]
        command: StatusCommand,
    },
    /// Authorization gate utilities.
    Authz {
        /// Selected authorization subcommand.
        #[command(subcommand)]
        command: AuthzCommand,
    },
    /// Advisory schema-validation report utilities.
    Report {
        /// Selected report subcommand.
        #[command(subcommand)]
        command: ReportCommand,
    },
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Promotion policy utilities.
    Policy {
        /// Selected policy subcommand.
        #[command(subcommand)]
        command: PolicyCommand,
    },
}

/// Status subcommands.
#[derive(Subcommand, Debug)]
enum StatusCommand {
    /// Classify the cluster and publish the global-status artifact.
    Compute(StatusComputeCommand),
}

/// Arguments for status computation.
#[derive(Args, Debug)]
struct StatusComputeCommand {
    /// Optional config file path (defaults to release-gate.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Exit with failure when the promotion gate denies.
    #[arg(long, action = ArgAction::SetTrue)]
    enforce: bool,
}

/// Authorization subcommands.
#[derive(Subcommand, Debug)]
enum AuthzCommand {
    /// Evaluate one action intent through the configured decision engine.
    Check(AuthzCheckCommand),
}

/// Arguments for authorization checks.
#[derive(Args, Debug)]
struct AuthzCheckCommand {
    /// Optional config file path (defaults to release-gate.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Action verb to authorize.
    #[arg(long, value_name = "ACTION")]
    action: String,
    /// Resource the action targets.
    #[arg(long, value_name = "RESOURCE")]
    resource: String,
    /// Scope the action executes under.
    #[arg(long, value_name = "SCOPE")]
    scope: String,
    /// Auxiliary intent parameter (KEY=VALUE, repeatable).
    #[arg(long = "param", value_name = "KEY=VALUE", action = ArgAction::Append)]
    params: Vec<String>,
    /// Receipt JSON file (defaults to the `RELEASE_GATE_RECEIPT_JSON` variable).
    #[arg(long, value_name = "PATH")]
    receipt: Option<PathBuf>,
}

/// Report subcommands.
#[derive(Subcommand, Debug)]
enum ReportCommand {
    /// Scan the repository and write the advisory report.
    Run(ReportRunCommand),
}

/// Arguments for report runs.
#[derive(Args, Debug)]
struct ReportRunCommand {
    /// Optional config file path (defaults to release-gate.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Schema catalog version label recorded in the report header.
    #[arg(long = "catalog-version", value_name = "VERSION", default_value = "unversioned")]
    catalog_version: String,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a runner configuration file.
    Validate(ConfigValidateCommand),
}

/// Arguments for config validation.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to release-gate.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Policy subcommands.
#[derive(Subcommand, Debug)]
enum PolicyCommand {
    /// Validate a promotion policy document.
    Validate(PolicyValidateCommand),
}

/// Arguments for policy validation.
#[derive(Args, Debug)]
struct PolicyValidateCommand {
    /// Promotion policy JSON file to validate.
    #[arg(long, value_name = "PATH")]
    policy: PathBuf,
}

/// Supported CLI language selections.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LangArg {
    /// English.
    En,
    /// Catalan.
    Ca,
}

/// Converts CLI language selections into locales.
impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Ca => Self::Ca,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Terminal CLI error carrying a localized message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let env_lang = std::env::var(LANG_ENV).ok();
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    set_locale(locale);
    if locale != Locale::En {
        write_stderr_line(&t!("i18n.disclaimer.machine_translated"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Status {
            command,
        } => command_status(command),
        Commands::Authz {
            command,
        } => command_authz(command),
        Commands::Report {
            command,
        } => command_report(command),
        Commands::Config {
            command,
        } => command_config(command),
        Commands::Policy {
            command,
        } => command_policy(command),
    }
}

/// Emits the top-level help message for the CLI.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Status Commands
// ============================================================================

/// Dispatches status subcommands.
fn command_status(command: StatusCommand) -> CliResult<ExitCode> {
    match command {
        StatusCommand::Compute(command) => command_status_compute(&command),
    }
}

/// Executes `status compute`.
///
/// A denied gate is a reported outcome, not a failure; the run exits with
/// success unless `--enforce` is set.
fn command_status_compute(command: &StatusComputeCommand) -> CliResult<ExitCode> {
    let config = load_runner_config(command.config.as_deref())?;
    let policy = load_promotion_policy(
        Path::new(&config.paths.promotion_policy),
        config.limits.max_policy_bytes,
    )
    .map_err(|err| CliError::new(t!("policy.load_failed", error = err)))?;
    let loaded = load_status_document(
        Path::new(&config.paths.status_document),
        config.limits.max_status_bytes,
    );
    let classification = classify(&loaded.snapshot);
    let verdict = evaluate_gate(classification.state, &loaded.snapshot, &policy);
    let status = emit(classification, verdict, loaded.provenance, Timestamp::now_utc());

    let rendered = status
        .to_canonical_json()
        .map_err(|err| CliError::new(t!("status.artifact.render_failed", error = err)))?;
    let output_path = Path::new(&config.paths.global_status);
    write_atomic(output_path, rendered.as_bytes()).map_err(|err| {
        CliError::new(t!(
            "status.artifact.write_failed",
            path = output_path.display(),
            error = err
        ))
    })?;

    write_stdout_line(&t!("status.state", state = status.cluster.state))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    let gate_line = if status.prod_gate.allowed {
        t!("status.gate.allowed", reason = status.prod_gate.reason)
    } else {
        t!("status.gate.denied", reason = status.prod_gate.reason)
    };
    write_stdout_line(&gate_line).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line(&t!("status.artifact.ok", path = output_path.display()))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;

    if command.enforce && !status.prod_gate.allowed {
        write_stderr_line(&t!("status.enforce.denied"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Authz Commands
// ============================================================================

/// Dispatches authorization subcommands.
fn command_authz(command: AuthzCommand) -> CliResult<ExitCode> {
    match command {
        AuthzCommand::Check(command) => command_authz_check(&command),
    }
}

/// Executes `authz check`.
///
/// The verdict line goes to stdout; any non-allow outcome exits with failure.
fn command_authz_check(command: &AuthzCheckCommand) -> CliResult<ExitCode> {
    let config = load_runner_config(command.config.as_deref())?;
    let engine = config
        .authz
        .decision_engine()
        .map_err(|err| CliError::new(t!("authz.engine.build_failed", error = err)))?;
    let receipt = match command.receipt.as_deref() {
        Some(path) => Some(load_receipt_file(path, config.limits.max_receipt_bytes)?),
        None => receipt_from_env(config.limits.max_receipt_bytes)
            .map_err(|err| CliError::new(t!("authz.receipt.load_failed", error = err)))?,
    };
    let parameters = parse_intent_params(&command.params)?;
    let intent = ActionIntent::new(
        command.action.clone(),
        command.resource.clone(),
        command.scope.clone(),
    )
    .with_parameters(parameters);

    match require_allowed(&engine, receipt.as_ref(), &intent, Timestamp::now_utc()) {
        Ok(decision) => {
            write_stdout_line(&t!("authz.check.allowed", reason = decision.reason_code))
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            Ok(ExitCode::SUCCESS)
        }
        Err(AuthzError::Denied {
            decision,
        }) => {
            write_stdout_line(&t!(
                "authz.check.denied",
                verdict = decision.verdict,
                reason = decision.reason_code
            ))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            Ok(ExitCode::FAILURE)
        }
        Err(err) => {
            write_stderr_line(&t!("authz.check.rejected", error = err))
                .map_err(|err| CliError::new(output_error("stderr", &err)))?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Loads and parses a receipt JSON file with a size cap.
fn load_receipt_file(path: &Path, max_bytes: usize) -> CliResult<VerifiedReceipt> {
    let bytes = read_bytes_with_limit(path, max_bytes).map_err(|err| match err {
        ReadLimitError::Io(err) => {
            CliError::new(t!("authz.receipt.read_failed", path = path.display(), error = err))
        }
        ReadLimitError::TooLarge {
            size,
            limit,
        } => CliError::new(t!(
            "input.read_too_large",
            kind = t!("authz.receipt.kind"),
            path = path.display(),
            size = size,
            limit = limit
        )),
    })?;
    let raw = String::from_utf8(bytes).map_err(|err| {
        CliError::new(t!("authz.receipt.read_failed", path = path.display(), error = err))
    })?;
    VerifiedReceipt::from_json_str(&raw)
        .map_err(|err| CliError::new(t!("authz.receipt.load_failed", error = err)))
}

/// Parses repeated `--param KEY=VALUE` flags into intent parameters.
///
/// Values that parse as JSON are stored typed; everything else is kept as a
/// plain string.
fn parse_intent_params(raw: &[String]) -> CliResult<BTreeMap<String, Value>> {
    let mut parameters = BTreeMap::new();
    for entry in raw {
        let Some((key, value)) = entry.split_once('=') else {
            return Err(CliError::new(t!("authz.param.invalid", value = entry)));
        };
        if key.trim().is_empty() {
            return Err(CliError::new(t!("authz.param.invalid", value = entry)));
        }
        let parsed =
            serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
        parameters.insert(key.to_string(), parsed);
    }
    Ok(parameters)
}

// ============================================================================
// SECTION: Report Commands
// ============================================================================

/// Dispatches report subcommands.
fn command_report(command: ReportCommand) -> CliResult<ExitCode> {
    match command {
        ReportCommand::Run(command) => command_report_run(&command),
    }
}

/// Executes `report run`.
///
/// Invalid documents surface as report findings; only scan or output failures
/// abort the run.
fn command_report_run(command: &ReportRunCommand) -> CliResult<ExitCode> {
    let config = load_runner_config(command.config.as_deref())?;
    let outcome = scan_repository(
        Path::new(&config.paths.report_root),
        Path::new(&config.paths.report_schema_dir),
    )
    .map_err(|err| CliError::new(t!("report.scan_failed", error = err)))?;
    let report = render_report(&outcome, env!("CARGO_PKG_VERSION"), &command.catalog_version);
    let rendered = report
        .to_canonical_json()
        .map_err(|err| CliError::new(t!("report.render_failed", error = err)))?;
    let output_path = Path::new(&config.paths.report_output);
    write_atomic(output_path, rendered.as_bytes()).map_err(|err| {
        CliError::new(t!("report.write_failed", path = output_path.display(), error = err))
    })?;
    write_stdout_line(&report.comment)
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line(&t!("report.ok", path = output_path.display()))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(&command),
    }
}

/// Executes `config validate`.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let _config = RunnerConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    write_stdout_line(&t!("config.validate.ok"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Loads the runner configuration for a command invocation.
fn load_runner_config(path: Option<&Path>) -> CliResult<RunnerConfig> {
    RunnerConfig::load_or_default(path)
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))
}

// ============================================================================
// SECTION: Policy Commands
// ============================================================================

/// Dispatches policy subcommands.
fn command_policy(command: PolicyCommand) -> CliResult<ExitCode> {
    match command {
        PolicyCommand::Validate(command) => command_policy_validate(&command),
    }
}

/// Executes `policy validate`.
///
/// Unlike `status compute`, a missing policy file is an error here.
fn command_policy_validate(command: &PolicyValidateCommand) -> CliResult<ExitCode> {
    let limit = LimitsConfig::default().max_policy_bytes;
    let bytes = read_bytes_with_limit(&command.policy, limit).map_err(|err| match err {
        ReadLimitError::Io(err) => CliError::new(t!(
            "policy.read_failed",
            path = command.policy.display(),
            error = err
        )),
        ReadLimitError::TooLarge {
            size,
            limit,
        } => CliError::new(t!(
            "input.read_too_large",
            kind = t!("policy.kind"),
            path = command.policy.display(),
            size = size,
            limit = limit
        )),
    })?;
    let policy: PromotionPolicy = serde_json::from_slice(&bytes)
        .map_err(|err| CliError::new(t!("policy.load_failed", error = err)))?;
    policy.validate().map_err(|err| CliError::new(t!("policy.invalid", error = err)))?;
    write_stdout_line(&t!("policy.validate.ok"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Input Helpers
// ============================================================================

/// Errors returned by bounded file reads.
#[derive(Debug)]
enum ReadLimitError {
    /// File I/O failure.
    Io(std::io::Error),
    /// File size exceeds the configured limit.
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Allowed limit in bytes.
        limit: usize,
    },
}

/// Reads a file from disk while enforcing a hard size limit.
fn read_bytes_with_limit(path: &Path, max_bytes: usize) -> Result<Vec<u8>, ReadLimitError> {
    let file = File::open(path).map_err(ReadLimitError::Io)?;
    let metadata = file.metadata().map_err(ReadLimitError::Io)?;
    let size = metadata.len();
    let limit = u64::try_from(max_bytes).map_err(|_| ReadLimitError::TooLarge {
        size,
        limit: max_bytes,
    })?;
    if size > limit {
        return Err(ReadLimitError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let read_limit = limit.saturating_add(1);
    let mut limited = file.take(read_limit);
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes).map_err(ReadLimitError::Io)?;
    if bytes.len() > max_bytes {
        let actual = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        return Err(ReadLimitError::TooLarge {
            size: actual,
            limit: max_bytes,
        });
    }
    Ok(bytes)
}

// ============================================================================
// SECTION: Output File Helpers
// ============================================================================

/// Attempts made to allocate a unique temporary output name.
const TEMP_ATTEMPTS: usize = 16;
/// Process-wide counter feeding temporary output names.
static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Writes `contents` to `path` via a temporary file and rename.
///
/// Parent directories are created automatically when missing. Readers never
/// observe a partially written artifact.
fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), String> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|err| err.to_string())?;
    }
    let (temp_path, mut file) = create_temp_output(path)?;
    if let Err(err) = file.write_all(contents) {
        let _ = fs::remove_file(&temp_path);
        return Err(err.to_string());
    }
    if let Err(err) = file.sync_all() {
        let _ = fs::remove_file(&temp_path);
        return Err(err.to_string());
    }
    persist_temp_output(&temp_path, path)
}

/// Creates a unique temporary output file alongside the destination.
fn create_temp_output(path: &Path) -> Result<(PathBuf, fs::File), String> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| "output path does not include a file name".to_string())?;
    for _ in 0 .. TEMP_ATTEMPTS {
        let attempt = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let temp_name = format!(".{file_name}.tmp.{}.{}", std::process::id(), attempt);
        let temp_path = parent.join(temp_name);
        match OpenOptions::new().write(true).create_new(true).open(&temp_path) {
            Ok(file) => return Ok((temp_path, file)),
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => continue,
            Err(err) => return Err(err.to_string()),
        }
    }
    Err("failed to allocate temporary output path".to_string())
}

/// Persists the temporary output file to the final destination.
///
/// On platforms without atomic replace, this falls back to remove-and-rename.
fn persist_temp_output(temp_path: &Path, path: &Path) -> Result<(), String> {
    match fs::rename(temp_path, path) {
        Ok(()) => Ok(()),
        Err(err) => {
            if path.exists() {
                fs::remove_file(path).map_err(|err| err.to_string())?;
                fs::rename(temp_path, path).map_err(|err| err.to_string())?;
                return Ok(());
            }
            let _ = fs::remove_file(temp_path);
            Err(err.to_string())
        }
    }
}

// ============================================================================
// SECTION: Locale Helpers
// ============================================================================

/// Resolves the CLI locale from flags or environment.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(Locale::En)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
