//! Hizuke CLI tool
//!
//! A command-line tool for turning picked dates into Japanese date strings and
//! YYYYMMDD tokens.

use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use hizuke::clipboard::{copy_output, Clipboard, CopyTarget, MemoryClipboard, SystemClipboard};
use hizuke::date::{parse_date, parse_date_list, parse_weekday};
use hizuke::format::FormattedDate;
use hizuke::render::{render, RenderedOutput};
use hizuke::selection::{generate, Selection, SelectionMode};
use hizuke::session::{run_session, AppState};

/// Hizuke - Japanese date lists and YYYYMMDD tokens
#[derive(Parser)]
#[command(name = "hizuke")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Every day from July 1st to 12th
    hizuke range 2025/07/01 2025/07/12

    # A handful of dates, comma-separated like the picker text field
    hizuke multiple \"2025/07/09, 2025/07/01, 2025/07/20\"

    # Every Tuesday in July, copying the combined tokens
    hizuke weekly 2025/07/01 2025/07/31 --weekday 火 --copy combined

    # Interactive session reading commands from stdin
    hizuke session --mode multiple")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format for one-shot commands
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, env = "HIZUKE_FORMAT", global = true)]
    format: OutputFormat,

    /// Copy part of the output to the clipboard after generating
    #[arg(long, value_enum, env = "HIZUKE_COPY", global = true)]
    copy: Option<CopyTarget>,

    /// More log output (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Less log output (repeat for less)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    quiet: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// One date, or every day between the earliest and latest given
    Range {
        /// Dates as YYYY/MM/DD, separately or comma-separated
        #[arg(required = true)]
        dates: Vec<String>,
    },

    /// Exactly the given dates, sorted
    Multiple {
        /// Dates as YYYY/MM/DD, separately or comma-separated
        #[arg(required = true)]
        dates: Vec<String>,
    },

    /// Every day from START to END falling on one weekday
    Weekly {
        /// First day of the range (YYYY/MM/DD)
        start: String,

        /// Last day of the range (YYYY/MM/DD)
        end: String,

        /// Target weekday: 0-6 (0 = Sunday), 日..土, or an English name
        #[arg(short, long)]
        weekday: String,
    },

    /// Interactive session: mode switching, picking, generate, copy, clear
    Session {
        /// Read commands from a file instead of stdin
        #[arg(long)]
        script: Option<PathBuf>,

        /// Mode to start in
        #[arg(long, value_enum, default_value_t = SelectionMode::Range)]
        mode: SelectionMode,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// JSON shape of a one-shot result
#[derive(Serialize)]
struct Report<'a> {
    mode: SelectionMode,
    #[serde(flatten)]
    output: &'a RenderedOutput,
    dates: &'a [FormattedDate],
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.verbose, cli.quiet) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }

    let result = match cli.command {
        Commands::Range { dates } => {
            parse_dates(&dates)
                .map(Selection::Range)
                .and_then(|selection| cmd_generate(&selection, cli.format, cli.copy))
        }
        Commands::Multiple { dates } => {
            parse_dates(&dates)
                .map(Selection::Multiple)
                .and_then(|selection| cmd_generate(&selection, cli.format, cli.copy))
        }
        Commands::Weekly { start, end, weekday } => {
            cmd_weekly(&start, &end, &weekday, cli.format, cli.copy)
        }
        Commands::Session { script, mode } => {
            cmd_session(script, mode)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

/// Install the stderr log subscriber
///
/// `RUST_LOG` wins when set; otherwise the level comes from -v/-q.
fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let default_level = match (verbose, quiet) {
        (_, q) if q >= 2 => "error",
        (0, _) | (_, 1) => "warn",
        (1, _) => "info",
        (2, _) => "debug",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {e}"))
}

/// Accept dates as separate arguments or as one comma-separated string
fn parse_dates(args: &[String]) -> anyhow::Result<Vec<hizuke::CalendarDate>> {
    Ok(parse_date_list(&args.join(","))?)
}

fn cmd_weekly(
    start: &str,
    end: &str,
    weekday: &str,
    format: OutputFormat,
    copy: Option<CopyTarget>,
) -> anyhow::Result<()> {
    let selection = Selection::Weekly {
        start: parse_date(start)?,
        end: parse_date(end)?,
        weekday: parse_weekday(weekday)?,
    };
    cmd_generate(&selection, format, copy)
}

/// Generate, print, and optionally copy
fn cmd_generate(selection: &Selection, format: OutputFormat, copy: Option<CopyTarget>) -> anyhow::Result<()> {
    let results = generate(selection)?;
    let output = render(&results);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Text => write!(out, "{}", output.to_text())?,
        OutputFormat::Json => {
            let report = Report {
                mode: results.mode,
                output: &output,
                dates: &results.dates,
            };
            serde_json::to_writer_pretty(&mut out, &report)?;
            writeln!(out)?;
        }
    }

    if let Some(target) = copy {
        // Copy problems are reported, never fatal
        let copied = SystemClipboard::new().and_then(|mut clipboard| copy_output(&mut clipboard, &output, target));
        match copied {
            Ok(message) => eprintln!("{}", message),
            Err(e) => eprintln!("! {}", e),
        }
    }

    Ok(())
}

/// Run an interactive (or scripted) session
fn cmd_session(script: Option<PathBuf>, mode: SelectionMode) -> anyhow::Result<()> {
    let mut state = AppState::new(mode);

    let mut clipboard: Box<dyn Clipboard> = match SystemClipboard::new() {
        Ok(clipboard) => Box::new(clipboard),
        Err(e) => {
            warn!(error = %e, "system clipboard unavailable, copying in memory only");
            Box::new(MemoryClipboard::new())
        }
    };

    let input: Box<dyn BufRead> = match &script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open script {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    debug!(%mode, scripted = script.is_some(), "starting session");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_session(&mut state, input, &mut out, clipboard.as_mut())?;
    Ok(())
}
