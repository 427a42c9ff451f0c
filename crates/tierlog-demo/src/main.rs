use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tierlog::{FileNaming, LogSettings, Logger, LoggingResult, RoutePolicy, Severity};
use tracing::{debug, error, info, trace, warn};

/// Route log records by severity to the console and per-severity files.
#[derive(Parser, Debug)]
#[command(name = "tierlog-demo")]
#[command(version)]
#[command(about = "Route log records by severity to the console and per-severity files", long_about = None)]
struct Cli
{
    /// Application name used in log file names
    #[arg(long, default_value = "tierlog-demo", global = true)]
    app: String,
    /// Directory for log files (console only when omitted)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,
    /// Minimum severity (panic, fatal, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    level: Severity,
    /// File layout: per-severity or grouped
    #[arg(long, default_value = "per-severity", global = true)]
    layout: RoutePolicy,
    /// File naming: app-first or suffix-first
    #[arg(long, default_value = "app-first", global = true)]
    naming: FileNaming,
    /// Disable ANSI colors
    #[arg(long, default_value_t = false, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands
{
    /// Emit a single record
    Emit
    {
        /// Severity of the record
        severity: Severity,
        /// Message text
        message: String,
    },
    /// Emit one record at every severity
    Sweep,
    /// Configure from TIERLOG_* environment variables, then sweep
    Env,
}

fn main()
{
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> LoggingResult<()>
{
    let logger = match cli.command {
        Commands::Env => LogSettings::from_env()?.into_logger(&cli.app)?,
        _ => settings_from_flags(&cli).into_logger(&cli.app)?,
    };
    let logger = tierlog::install(logger)?;
    print_routes(&logger);

    match cli.command {
        Commands::Emit { severity, message } => emit(severity, &message),
        Commands::Sweep | Commands::Env => {
            for severity in Severity::ALL {
                emit(severity, &format!("sample {severity} record"));
            }
        }
    }

    logger.flush()
}

fn settings_from_flags(cli: &Cli) -> LogSettings
{
    LogSettings {
        dir: cli.dir.clone(),
        threshold: cli.level,
        policy: cli.layout,
        naming: cli.naming,
        color: !cli.no_color,
    }
}

fn emit(severity: Severity, message: &str)
{
    match severity {
        Severity::Panic => tierlog::panic_log!("{message}"),
        Severity::Fatal => tierlog::fatal!("{message}"),
        Severity::Error => error!("{message}"),
        Severity::Warn => warn!("{message}"),
        Severity::Info => info!("{message}"),
        Severity::Debug => debug!("{message}"),
        Severity::Trace => trace!("{message}"),
    }
}

fn print_routes(logger: &Logger)
{
    println!("Threshold: {}", logger.threshold());
    if let Some(console) = logger.console() {
        println!("  console -> {}", console.name());
    }
    for route in logger.routes() {
        let levels: Vec<&str> = route.levels().iter().map(Severity::as_str).collect();
        println!("  {} -> {}", levels.join(","), route.sink().name());
    }
}
