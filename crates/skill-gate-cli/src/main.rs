// crates/skill-gate-cli/src/main.rs
// ============================================================================
// Module: Skill Gate CLI Entry Point
// Description: Command dispatcher for skill bundle checks and baseline runs.
// Purpose: Provide a localized CLI for gating skill bundle changes in CI.
// Dependencies: clap, skill-gate-config, skill-gate-core, serde, thiserror, time.
// ============================================================================

//! ## Overview
//! The Skill Gate CLI runs the structural check catalog against a skill
//! bundle, measures bundle metrics, and compares them with the stored
//! baseline. All user-facing strings are routed through the i18n catalog.
//! Exit code 0 means the bundle passed; any failing check, regressed metric,
//! or error exits with 1.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use serde::Serialize;
use skill_gate_cli::i18n::Locale;
use skill_gate_cli::i18n::set_locale;
use skill_gate_cli::t;
use skill_gate_config::AuditSinkKind;
use skill_gate_config::LoggingConfig;
use skill_gate_config::SkillGateConfig;
use skill_gate_config::config_toml_example;
use skill_gate_core::AuditEvent;
use skill_gate_core::AuditSink;
use skill_gate_core::BASELINE_FORMAT_VERSION;
use skill_gate_core::BaselineRecord;
use skill_gate_core::BaselineSaveReason;
use skill_gate_core::BaselineStore;
use skill_gate_core::BundleMetrics;
use skill_gate_core::CheckId;
use skill_gate_core::CheckReport;
use skill_gate_core::CheckRunner;
use skill_gate_core::CheckStatus;
use skill_gate_core::CheckSuite;
use skill_gate_core::Comparison;
use skill_gate_core::FileAuditSink;
use skill_gate_core::NoopAuditSink;
use skill_gate_core::SkillBundle;
use skill_gate_core::StderrAuditSink;
use skill_gate_core::collect_metrics;
use skill_gate_core::compare_metrics;
use skill_gate_core::render_comparison_report;
use thiserror::Error;
use time::OffsetDateTime;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum size of canonical JSON written to stdout.
const MAX_JSON_OUTPUT_BYTES: usize = 8 * 1024 * 1024;
/// Environment variable for CLI locale selection.
const LANG_ENV: &str = "SKILL_GATE_LANG";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "skill-gate", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Preferred output language (overrides `SKILL_GATE_LANG`).
    #[arg(long, value_enum, value_name = "LANG", global = true)]
    lang: Option<LangArg>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Compare bundle metrics with the stored baseline.
    Compare(CompareCommand),
    /// Run the structural and regression check catalog.
    Check(CheckCommand),
    /// Print current bundle metrics.
    Metrics(MetricsCommand),
    /// Check catalog utilities.
    Checks {
        /// Selected checks subcommand.
        #[command(subcommand)]
        command: ChecksCommand,
    },
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Bundle selection shared by bundle commands.
#[derive(Args, Debug)]
struct BundleArgs {
    /// Skill bundle root directory.
    #[arg(long, value_name = "DIR", default_value = ".")]
    bundle: PathBuf,
    /// Optional config file path (defaults to env override, then the bundle's skill-gate.toml).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Arguments for `compare`.
#[derive(Args, Debug)]
struct CompareCommand {
    /// Bundle selection.
    #[command(flatten)]
    target: BundleArgs,
    /// Write the baseline from current metrics instead of comparing.
    #[arg(long, action = ArgAction::SetTrue)]
    create_baseline: bool,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Arguments for `check`.
#[derive(Args, Debug)]
struct CheckCommand {
    /// Bundle selection.
    #[command(flatten)]
    target: BundleArgs,
    /// Suites to run (repeatable; defaults to every suite).
    #[arg(long = "suite", value_enum, value_name = "SUITE")]
    suites: Vec<SuiteArg>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Arguments for `metrics`.
#[derive(Args, Debug)]
struct MetricsCommand {
    /// Bundle selection.
    #[command(flatten)]
    target: BundleArgs,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Check catalog subcommands.
#[derive(Subcommand, Debug)]
enum ChecksCommand {
    /// List every catalog check.
    List(ChecksListCommand),
}

/// Arguments for `checks list`.
#[derive(Args, Debug)]
struct ChecksListCommand {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a Skill Gate configuration file.
    Validate(ConfigValidateCommand),
    /// Print the canonical example configuration.
    Example,
}

/// Arguments for `config validate`.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to skill-gate.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Output format selection.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Canonical JSON output.
    Json,
}

/// Check suite selection.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum SuiteArg {
    /// Skill file checks.
    #[value(name = "skill_md")]
    SkillMd,
    /// Rule file checks.
    Rules,
    /// Directory structure checks.
    Structure,
    /// Scenario checks.
    Scenarios,
    /// Rule group contract checks.
    #[value(name = "rule_groups")]
    RuleGroups,
    /// Document contract checks.
    Documents,
    /// Baseline regression checks.
    Regression,
}

impl From<SuiteArg> for CheckSuite {
    fn from(value: SuiteArg) -> Self {
        match value {
            SuiteArg::SkillMd => Self::SkillMd,
            SuiteArg::Rules => Self::Rules,
            SuiteArg::Structure => Self::Structure,
            SuiteArg::Scenarios => Self::Scenarios,
            SuiteArg::RuleGroups => Self::RuleGroups,
            SuiteArg::Documents => Self::Documents,
            SuiteArg::Regression => Self::Regression,
        }
    }
}

/// Supported CLI language selections.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LangArg {
    /// English.
    En,
    /// Simplified Chinese.
    Zh,
}

impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Zh => Self::Zh,
        }
    }
}

// ============================================================================
// SECTION: Output Types
// ============================================================================

/// JSON payload of the `compare` command.
#[derive(Debug, Serialize)]
struct CompareOutput<'a> {
    /// Bundle name.
    bundle: String,
    /// True when a baseline was written instead of compared.
    baseline_created: bool,
    /// Baseline file path.
    baseline_path: String,
    /// True when every metric is within tolerance.
    passed: bool,
    /// Current metrics.
    metrics: &'a BundleMetrics,
    /// Per-metric comparison, absent when the baseline was just written.
    #[serde(skip_serializing_if = "Option::is_none")]
    comparison: Option<&'a Comparison>,
}

/// JSON entry of the `checks list` command.
#[derive(Debug, Serialize)]
struct CheckListEntry {
    /// Check identifier.
    id: CheckId,
    /// Owning suite.
    suite: CheckSuite,
    /// What the check verifies.
    description: &'static str,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
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
        Commands::Compare(command) => command_compare(&command),
        Commands::Check(command) => command_check(&command),
        Commands::Metrics(command) => command_metrics(&command),
        Commands::Checks {
            command,
        } => match command {
            ChecksCommand::List(command) => command_checks_list(&command),
        },
        Commands::Config {
            command,
        } => command_config(&command),
    }
}

/// Prints top-level help.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Compare Command
// ============================================================================

/// Executes `compare`.
fn command_compare(command: &CompareCommand) -> CliResult<ExitCode> {
    let session = BundleSession::open(&command.target)?;
    let run_at = local_now();
    let metrics = session.collect_metrics(run_at)?;
    let store = session.store();
    if command.create_baseline {
        let reason = BaselineSaveReason::Requested;
        return write_baseline(&session, &store, &metrics, reason, command.format);
    }
    let Some(baseline) = store
        .load()
        .map_err(|err| CliError::new(t!("baseline.load_failed", error = err)))?
    else {
        let reason = BaselineSaveReason::Missing;
        return write_baseline(&session, &store, &metrics, reason, command.format);
    };

    let policy = &session.config.baseline;
    let comparison = compare_metrics(&metrics, &baseline, policy);
    session.audit.record(&AuditEvent::baseline_compared(&session.bundle.name(), &comparison));
    let report = render_comparison_report(&comparison, &policy.report_title, run_at);
    let report_path = store
        .save_report(&report)
        .map_err(|err| CliError::new(t!("results.write_failed", error = err)))?;
    store
        .save_current(&metrics)
        .map_err(|err| CliError::new(t!("results.write_failed", error = err)))?;

    let passed = comparison.all_passed();
    match command.format {
        OutputFormat::Text => {
            write_stdout_line(&report).map_err(|err| CliError::new(output_error("stdout", &err)))?;
            write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
            write_stdout_line(&t!("report.saved", path = report_path.display()))
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
        OutputFormat::Json => write_canonical_json(&CompareOutput {
            bundle: session.bundle.name(),
            baseline_created: false,
            baseline_path: store.baseline_path().display().to_string(),
            passed,
            metrics: &metrics,
            comparison: Some(&comparison),
        })?,
    }
    Ok(exit_code(passed))
}

/// Writes the baseline from current metrics and reports it.
fn write_baseline(
    session: &BundleSession,
    store: &BaselineStore,
    metrics: &BundleMetrics,
    reason: BaselineSaveReason,
    format: OutputFormat,
) -> CliResult<ExitCode> {
    if reason == BaselineSaveReason::Missing {
        let warning = t!("baseline.missing");
        match format {
            OutputFormat::Text => write_stdout_line(&warning)
                .map_err(|err| CliError::new(output_error("stdout", &err)))?,
            OutputFormat::Json => write_stderr_line(&warning)
                .map_err(|err| CliError::new(output_error("stderr", &err)))?,
        }
    }
    let path = store
        .save(&BaselineRecord::from(metrics))
        .map_err(|err| CliError::new(t!("baseline.save_failed", error = err)))?;
    session.audit.record(&AuditEvent::baseline_saved(&session.bundle.name(), &path, reason));

    match format {
        OutputFormat::Text => {
            let saved = match reason {
                BaselineSaveReason::Missing => t!("baseline.created", path = path.display()),
                BaselineSaveReason::Requested => t!("baseline.updated", path = path.display()),
            };
            write_stdout_line(&saved).map_err(|err| CliError::new(output_error("stdout", &err)))?;
            if reason == BaselineSaveReason::Missing {
                write_stdout_line(&t!("baseline.run_again"))
                    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            }
        }
        OutputFormat::Json => write_canonical_json(&CompareOutput {
            bundle: session.bundle.name(),
            baseline_created: true,
            baseline_path: path.display().to_string(),
            passed: true,
            metrics,
            comparison: None,
        })?,
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Check Commands
// ============================================================================

/// Executes `check`.
fn command_check(command: &CheckCommand) -> CliResult<ExitCode> {
    let session = BundleSession::open(&command.target)?;
    let selection: Vec<CheckSuite> = command.suites.iter().copied().map(CheckSuite::from).collect();
    let baseline = if selection.is_empty() || selection.contains(&CheckSuite::Regression) {
        session
            .store()
            .load()
            .map_err(|err| CliError::new(t!("baseline.load_failed", error = err)))?
    } else {
        None
    };
    let policy = session.config.policy();
    let report = CheckRunner::new(&session.bundle, &policy)
        .with_baseline(baseline.as_ref())
        .run(&selection)
        .map_err(|err| CliError::new(t!("check.run_failed", error = err)))?;
    session.audit.record(&AuditEvent::check_run(&report));

    match command.format {
        OutputFormat::Text => render_check_report_text(&report)?,
        OutputFormat::Json => write_canonical_json(&report)?,
    }
    Ok(exit_code(report.is_passing()))
}

/// Renders a check report in text form.
fn render_check_report_text(report: &CheckReport) -> CliResult<()> {
    let mut output = String::new();
    output.push_str(&t!("check.header", bundle = report.bundle));
    output.push('\n');
    for outcome in &report.outcomes {
        output.push_str(&t!(
            "check.entry",
            status = status_label(outcome.status),
            check = outcome.check_id.as_str(),
            description = outcome.check_id.description()
        ));
        output.push('\n');
        for finding in &outcome.findings {
            output.push_str(&t!(
                "check.finding",
                subject = finding.subject,
                message = finding.message
            ));
            output.push('\n');
        }
        if let Some(note) = &outcome.note {
            output.push_str(&t!("check.skip_note", note = note));
            output.push('\n');
        }
    }
    output.push_str(&t!(
        "check.summary",
        passed = report.passed,
        failed = report.failed,
        skipped = report.skipped
    ));
    output.push('\n');
    write_stdout_bytes(output.as_bytes()).map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Returns the localized label of a check status.
fn status_label(status: CheckStatus) -> String {
    match status {
        CheckStatus::Pass => t!("check.status.pass"),
        CheckStatus::Fail => t!("check.status.fail"),
        CheckStatus::Skip => t!("check.status.skip"),
    }
}

/// Executes `checks list`.
fn command_checks_list(command: &ChecksListCommand) -> CliResult<ExitCode> {
    match command.format {
        OutputFormat::Text => {
            let mut output = String::new();
            output.push_str(&t!("checks.list.header", count = CheckId::ALL.len()));
            output.push('\n');
            for id in CheckId::ALL {
                output.push_str(&t!(
                    "checks.list.entry",
                    check = id.as_str(),
                    suite = id.suite().as_str(),
                    description = id.description()
                ));
                output.push('\n');
            }
            write_stdout_bytes(output.as_bytes())
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
        OutputFormat::Json => {
            let entries: Vec<CheckListEntry> = CheckId::ALL
                .into_iter()
                .map(|id| CheckListEntry {
                    id,
                    suite: id.suite(),
                    description: id.description(),
                })
                .collect();
            write_canonical_json(&entries)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Metrics Command
// ============================================================================

/// Executes `metrics`.
fn command_metrics(command: &MetricsCommand) -> CliResult<ExitCode> {
    let session = BundleSession::open(&command.target)?;
    let metrics = session.collect_metrics(local_now())?;
    match command.format {
        OutputFormat::Text => {
            let lines = [
                t!("metrics.header", bundle = session.bundle.name()),
                t!("metrics.entry", metric = "skill_md_lines", value = metrics.skill_md_lines),
                t!("metrics.entry", metric = "rule_file_count", value = metrics.rule_file_count),
                t!(
                    "metrics.entry",
                    metric = "avg_rule_lines",
                    value = format!("{:.1}", metrics.avg_rule_lines)
                ),
                t!("metrics.entry", metric = "bundle_digest", value = metrics.bundle_digest),
                t!("metrics.entry", metric = "timestamp", value = metrics.timestamp),
            ];
            for line in lines {
                write_stdout_line(&line)
                    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            }
        }
        OutputFormat::Json => write_canonical_json(&metrics)?,
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Executes config subcommands.
fn command_config(command: &ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(command),
        ConfigCommand::Example => {
            write_stdout_bytes(config_toml_example().as_bytes())
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let _config = SkillGateConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    write_stdout_line(&t!("config.validate.ok"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Bundle Session
// ============================================================================

/// Loaded config, opened bundle, and audit sink for one command.
struct BundleSession {
    /// Resolved configuration.
    config: SkillGateConfig,
    /// Opened bundle.
    bundle: SkillBundle,
    /// Audit sink selected by `logging`.
    audit: Box<dyn AuditSink>,
}

impl BundleSession {
    /// Resolves configuration and opens the bundle.
    fn open(target: &BundleArgs) -> CliResult<Self> {
        let config = SkillGateConfig::load_for_bundle(target.config.as_deref(), &target.bundle)
            .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
        let bundle = SkillBundle::open(&target.bundle, config.layout.clone())
            .map_err(|err| CliError::new(t!("bundle.open_failed", error = err)))?
            .with_limits(config.limits);
        let audit = build_audit_sink(&config.logging)?;
        Ok(Self {
            config,
            bundle,
            audit,
        })
    }

    /// Returns the baseline store under the bundle's results directory.
    fn store(&self) -> BaselineStore {
        BaselineStore::new(self.bundle.results_dir())
            .with_max_bytes(self.config.limits.max_file_bytes)
    }

    /// Measures the bundle and stamps it with the run time.
    fn collect_metrics(&self, run_at: OffsetDateTime) -> CliResult<BundleMetrics> {
        collect_metrics(&self.bundle, run_at, BASELINE_FORMAT_VERSION)
            .map_err(|err| CliError::new(t!("metrics.collect_failed", error = err)))
    }
}

/// Builds the audit sink selected by configuration.
fn build_audit_sink(logging: &LoggingConfig) -> CliResult<Box<dyn AuditSink>> {
    match (logging.sink, &logging.path) {
        (AuditSinkKind::Stderr, _) => Ok(Box::new(StderrAuditSink)),
        (AuditSinkKind::Disabled, _) => Ok(Box::new(NoopAuditSink)),
        (AuditSinkKind::File, Some(path)) => {
            let path = Path::new(path);
            let sink = FileAuditSink::new(path).map_err(|err| {
                CliError::new(t!("audit.open_failed", path = path.display(), error = err))
            })?;
            Ok(Box::new(sink))
        }
        (AuditSinkKind::File, None) => {
            Err(CliError::new(t!("audit.open_failed", path = "-", error = "logging.path")))
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the current local time, falling back to UTC when the local offset
/// cannot be determined.
fn local_now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// Maps a pass/fail outcome to the process exit code.
const fn exit_code(passed: bool) -> ExitCode {
    if passed { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

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

/// Writes raw bytes to stdout without adding a newline.
fn write_stdout_bytes(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes)
}

/// Writes canonical JSON to stdout with a size limit.
fn write_canonical_json<T: Serialize>(value: &T) -> CliResult<()> {
    let mut bytes = serde_jcs::to_vec(value)
        .map_err(|err| CliError::new(t!("output.json_failed", error = err)))?;
    if bytes.len() > MAX_JSON_OUTPUT_BYTES {
        return Err(CliError::new(t!(
            "output.json_failed",
            error = format!("output exceeds size limit ({} > {MAX_JSON_OUTPUT_BYTES})", bytes.len())
        )));
    }
    bytes.push(b'\n');
    write_stdout_bytes(&bytes).map_err(|err| CliError::new(output_error("stdout", &err)))
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
