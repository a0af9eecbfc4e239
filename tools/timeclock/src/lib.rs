use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use timeclock_types::TimesheetReport;
use transcript::config::TimeclockConfig;

#[derive(Parser)]
#[command(
    name = "timeclock",
    about = "Turn an exported group chat into a work-hours timesheet"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a chat export and print per-shift hours plus weekly totals.
    Report {
        /// Path to the exported chat .txt file (UTF-8 or UTF-16).
        file: PathBuf,

        /// Keep only the most recent N weeks of totals (0 keeps every week).
        #[arg(long)]
        weeks: Option<usize>,

        /// Write the report to a file instead of stdout.
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Emit the report as pretty-printed JSON.
        #[arg(long)]
        json: bool,
    },

    /// Dump classified clock events as JSON lines (debugging aid).
    Events {
        /// Path to the exported chat .txt file.
        file: PathBuf,
    },
}

pub fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            file,
            weeks,
            out,
            json,
        } => run_report(&file, weeks, out.as_deref(), json),
        Commands::Events { file } => run_events(&file),
    }
}

fn run_report(file: &Path, weeks: Option<usize>, out: Option<&Path>, json: bool) -> Result<()> {
    let mut config = TimeclockConfig::from_env();
    if let Some(weeks) = weeks {
        config.recent_weeks = weeks;
    }

    let report = build_report_for_file(file, &config)?;
    if report.is_empty() {
        tracing::warn!("no clock-in/clock-out pairs found; report is empty");
    }

    let rendered = if json {
        let mut body = serde_json::to_string_pretty(&report)?;
        body.push('\n');
        body
    } else {
        render_plain(&report)
    };

    match out {
        Some(path) => {
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("create output dir {}", dir.display()))?;
            }
            fs::write(path, rendered).with_context(|| format!("write {}", path.display()))?;
            println!("Wrote report to {}", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

fn run_events(file: &Path) -> Result<()> {
    let config = TimeclockConfig::from_env();
    let text = transcript::decode::read_transcript(file)?;
    let parsed = transcript::parse::parse_transcript(&text)?;
    let matcher = config.matcher()?;

    for event in transcript::classify::classify_messages(&parsed.messages, &matcher) {
        println!("{}", serde_json::to_string(&event)?);
    }
    Ok(())
}

/// Decode, parse, classify, pair, and aggregate one transcript file.
fn build_report_for_file(file: &Path, config: &TimeclockConfig) -> Result<TimesheetReport> {
    let text = transcript::decode::read_transcript(file)?;
    let parsed = transcript::parse::parse_transcript(&text)?;
    tracing::info!(
        parsed = parsed.stats.parsed,
        skipped = parsed.stats.skipped,
        "parsed transcript"
    );

    let matcher = config.matcher()?;
    let events = transcript::classify::classify_messages(&parsed.messages, &matcher);
    Ok(rollup::build_report(&events, config))
}

fn render_plain(report: &TimesheetReport) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{:<16} {:<10} {:<9} {:>8} {:>8} {:>7}",
        "Author", "Date", "Day", "In", "Out", "Hours"
    );
    for interval in &report.intervals {
        let date = interval.date.to_string();
        let day = interval.date.format("%A").to_string();
        let start = interval.start.format("%I:%M %p").to_string();
        let end = interval.end.format("%I:%M %p").to_string();
        let _ = writeln!(
            out,
            "{:<16} {date:<10} {day:<9} {start:>8} {end:>8} {:>7.2}",
            interval.author, interval.hours
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<16} {:<10} {:<10} {:>7}",
        "Author", "Week of", "Through", "Hours"
    );
    for total in &report.totals {
        let week_start = total.week_start.to_string();
        let week_end = total.week_end.to_string();
        let _ = writeln!(
            out,
            "{:<16} {week_start:<10} {week_end:<10} {:>7.2}",
            total.author, total.total_hours
        );
    }
    out
}
