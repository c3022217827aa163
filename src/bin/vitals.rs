//! Vitals CLI - Command-line interface for Synheart Vitals
//!
//! Commands:
//! - catalog: List metric definitions
//! - show: Print one metric definition
//! - resolve: Resolve a metric series against a recorded fixture
//! - snapshot: Resolve today's values for several metrics against a fixture
//! - doctor: Check catalog integrity and configuration

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use synheart_vitals::catalog::{self, CatalogIssue, MetricDefinition};
use synheart_vitals::config::ResolverConfig;
use synheart_vitals::recorded::Recording;
use synheart_vitals::resolver::MetricResolver;
use synheart_vitals::types::{MetricCategory, Platform, TimeWindow};
use synheart_vitals::{VitalsError, VITALS_VERSION};

/// Vitals - Metric registry and time-series resolution for health data
#[derive(Parser)]
#[command(name = "vitals")]
#[command(author = "Synheart AI Inc")]
#[command(version = VITALS_VERSION)]
#[command(about = "Inspect the metric catalog and resolve health series", long_about = None)]
struct Cli {
    /// Log source reads to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List metric definitions
    Catalog {
        /// Only metrics in this category
        #[arg(long)]
        category: Option<String>,

        /// Only metrics available on this platform (health_kit, health_connect)
        #[arg(long)]
        platform: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print one metric definition
    Show {
        /// Metric id, e.g. "steps"
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve a metric series against a recorded fixture
    Resolve {
        /// Fixture file describing what each source returns
        #[arg(short, long)]
        fixture: PathBuf,

        /// Metric id
        #[arg(short, long)]
        metric: String,

        /// Time window (instant, day, week, month, six_months, year or 1D, 1W, ...)
        #[arg(short, long, default_value = "week")]
        window: String,

        /// End of the window (RFC 3339); defaults to now
        #[arg(long)]
        anchor: Option<String>,

        /// Resolver configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Pretty-print the series
        #[arg(long)]
        pretty: bool,
    },

    /// Resolve today's values for several metrics against a recorded fixture
    Snapshot {
        /// Fixture file describing what each source returns
        #[arg(short, long)]
        fixture: PathBuf,

        /// Comma-separated metric ids
        #[arg(short, long, value_delimiter = ',', required = true)]
        metrics: Vec<String>,

        /// Reference time (RFC 3339); defaults to now
        #[arg(long)]
        at: Option<String>,

        /// Resolver configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check catalog integrity and configuration
    Doctor {
        /// Resolver configuration file to validate
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), VitalsCliError> {
    match cli.command {
        Commands::Catalog {
            category,
            platform,
            json,
        } => cmd_catalog(category.as_deref(), platform.as_deref(), json),
        Commands::Show { id, json } => cmd_show(&id, json),
        Commands::Resolve {
            fixture,
            metric,
            window,
            anchor,
            config,
            pretty,
        } => cmd_resolve(
            &fixture,
            &metric,
            &window,
            anchor.as_deref(),
            config.as_deref(),
            pretty,
        ),
        Commands::Snapshot {
            fixture,
            metrics,
            at,
            config,
        } => cmd_snapshot(&fixture, &metrics, at.as_deref(), config.as_deref()),
        Commands::Doctor { config, json } => cmd_doctor(config.as_deref(), json),
    }
}

fn cmd_catalog(
    category: Option<&str>,
    platform: Option<&str>,
    json: bool,
) -> Result<(), VitalsCliError> {
    let mut definitions: Vec<&MetricDefinition> = match platform {
        Some(p) => catalog::list_for_platform(p.parse::<Platform>()?),
        None => catalog::all().iter().collect(),
    };
    if let Some(c) = category {
        let category = c.parse::<MetricCategory>()?;
        definitions.retain(|d| d.category == category);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&definitions)?);
        return Ok(());
    }

    for def in &definitions {
        println!(
            "{:<28} {:<12} {:<10} {}{}",
            def.id,
            def.category.as_str(),
            def.unit,
            availability(def),
            def.display_name
        );
    }
    println!("\n{} metrics", definitions.len());
    Ok(())
}

/// Two-column platform marker, e.g. "[iA] "
fn availability(def: &MetricDefinition) -> String {
    let ios = if def.is_available_on(Platform::HealthKit) { 'i' } else { '-' };
    let android = if def.is_available_on(Platform::HealthConnect) { 'A' } else { '-' };
    format!("[{}{}] ", ios, android)
}

fn cmd_show(id: &str, json: bool) -> Result<(), VitalsCliError> {
    let def = catalog::lookup(id).ok_or_else(|| VitalsError::UnknownMetric(id.to_string()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(def)?);
        return Ok(());
    }

    println!("{} ({})", def.display_name, def.id);
    println!("  category:        {}", def.category);
    println!("  unit:            {}", def.unit);
    println!("  visual:          {:?}", def.visual_kind);
    println!("  healthkit:       {}", def.healthkit_type.unwrap_or("-"));
    println!("  health connect:  {}", def.health_connect_type.unwrap_or("-"));
    if let Some(goal) = def.goal {
        println!("  daily goal:      {}", goal);
    }
    Ok(())
}

fn cmd_resolve(
    fixture: &Path,
    metric: &str,
    window: &str,
    anchor: Option<&str>,
    config: Option<&Path>,
    pretty: bool,
) -> Result<(), VitalsCliError> {
    let window = window.parse::<TimeWindow>()?;
    let now = Utc::now();
    let anchor = anchor.map(parse_instant).transpose()?.unwrap_or(now);
    let resolver = build_resolver(fixture, config)?;

    let runtime = tokio::runtime::Runtime::new()?;
    let series = runtime.block_on(resolver.resolve_series_at(metric, window, anchor, now));

    if pretty {
        println!("{}", serde_json::to_string_pretty(&series)?);
    } else {
        println!("{}", serde_json::to_string(&series)?);
    }
    Ok(())
}

fn cmd_snapshot(
    fixture: &Path,
    metrics: &[String],
    at: Option<&str>,
    config: Option<&Path>,
) -> Result<(), VitalsCliError> {
    let now = at.map(parse_instant).transpose()?.unwrap_or_else(Utc::now);
    let resolver = build_resolver(fixture, config)?;

    let runtime = tokio::runtime::Runtime::new()?;
    let values = runtime.block_on(resolver.resolve_today_snapshots_at(metrics, now));

    let sorted: BTreeMap<String, f64> = values.into_iter().collect();
    println!("{}", serde_json::to_string_pretty(&sorted)?);
    Ok(())
}

fn cmd_doctor(config: Option<&Path>, json: bool) -> Result<(), VitalsCliError> {
    let mut checks: Vec<DoctorCheck> = Vec::new();

    checks.push(DoctorCheck {
        name: "vitals_version".to_string(),
        status: CheckStatus::Ok,
        message: format!("Vitals version {}", VITALS_VERSION),
    });

    let issues = catalog::validate_catalog();
    checks.push(if issues.is_empty() {
        DoctorCheck {
            name: "catalog".to_string(),
            status: CheckStatus::Ok,
            message: format!(
                "{} metrics ({} on HealthKit, {} on Health Connect)",
                catalog::all().len(),
                catalog::list_for_platform(Platform::HealthKit).len(),
                catalog::list_for_platform(Platform::HealthConnect).len()
            ),
        }
    } else {
        DoctorCheck {
            name: "catalog".to_string(),
            status: CheckStatus::Error,
            message: issues.iter().map(describe_issue).collect::<Vec<_>>().join("; "),
        }
    });

    if let Some(path) = config {
        let check = match load_config(Some(path)) {
            Ok(cfg) => DoctorCheck {
                name: "config".to_string(),
                status: CheckStatus::Ok,
                message: format!(
                    "{} with {} ms native timeout",
                    cfg.platform, cfg.native_timeout_ms
                ),
            },
            Err(e) => DoctorCheck {
                name: "config".to_string(),
                status: CheckStatus::Error,
                message: e.to_string(),
            },
        };
        checks.push(check);
    }

    let report = DoctorReport {
        version: VITALS_VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Vitals Doctor Report");
        println!("====================");
        println!("Version: {}", report.version);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    if report
        .checks
        .iter()
        .any(|c| matches!(c.status, CheckStatus::Error))
    {
        Err(VitalsCliError::DoctorFailed)
    } else {
        Ok(())
    }
}

fn describe_issue(issue: &CatalogIssue) -> String {
    match issue {
        CatalogIssue::DuplicateId(id) => format!("duplicate id {}", id),
        CatalogIssue::NoNativeSource(id) => format!("{} has no native source", id),
    }
}

fn build_resolver(fixture: &Path, config: Option<&Path>) -> Result<MetricResolver, VitalsError> {
    let config = load_config(config)?;
    let (native, cloud) = Recording::from_file(fixture)?.into_readers();
    MetricResolver::new(native, cloud, config)
}

fn load_config(path: Option<&Path>) -> Result<ResolverConfig, VitalsError> {
    match path {
        Some(path) => ResolverConfig::from_json(&fs::read_to_string(path)?),
        None => Ok(ResolverConfig::default()),
    }
}

fn parse_instant(s: &str) -> Result<DateTime<Utc>, VitalsError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| VitalsError::DateParseError(format!("{}: {}", s, e)))
}

// Error handling

enum VitalsCliError {
    Io(io::Error),
    Vitals(VitalsError),
    Json(serde_json::Error),
    DoctorFailed,
}

impl From<io::Error> for VitalsCliError {
    fn from(e: io::Error) -> Self {
        VitalsCliError::Io(e)
    }
}

impl From<VitalsError> for VitalsCliError {
    fn from(e: VitalsError) -> Self {
        VitalsCliError::Vitals(e)
    }
}

impl From<serde_json::Error> for VitalsCliError {
    fn from(e: serde_json::Error) -> Self {
        VitalsCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<VitalsCliError> for CliError {
    fn from(e: VitalsCliError) -> Self {
        match e {
            VitalsCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            VitalsCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: None,
            },
            VitalsCliError::Vitals(e) => {
                let (code, hint) = match &e {
                    VitalsError::UnknownMetric(_) => {
                        ("UNKNOWN_METRIC", "Run 'vitals catalog' to list metric ids")
                    }
                    VitalsError::InvalidWindow(_) => (
                        "INVALID_WINDOW",
                        "Use instant, day, week, month, six_months or year",
                    ),
                    VitalsError::InvalidPlatform(_) => {
                        ("INVALID_PLATFORM", "Use health_kit or health_connect")
                    }
                    VitalsError::InvalidCategory(_) => (
                        "INVALID_CATEGORY",
                        "Use one of the ten categories shown by 'vitals catalog'",
                    ),
                    VitalsError::DateParseError(_) => {
                        ("DATE_PARSE_ERROR", "Use RFC 3339, e.g. 2024-03-10T15:00:00Z")
                    }
                    VitalsError::InvalidConfig(_) => {
                        ("INVALID_CONFIG", "Run 'vitals doctor --config <file>' for details")
                    }
                    VitalsError::JsonError(_) => ("JSON_ERROR", "Check JSON syntax"),
                    VitalsError::IoError(_) => ("IO_ERROR", "Check file paths and permissions"),
                };
                CliError {
                    code: code.to_string(),
                    message: e.to_string(),
                    hint: Some(hint.to_string()),
                }
            }
            VitalsCliError::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct DoctorReport {
    version: String,
    checks: Vec<DoctorCheck>,
}

#[derive(serde::Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(serde::Serialize)]
enum CheckStatus {
    Ok,
    Error,
}
