//! stylelift CLI
//!
//! Walks a directory, moves every inline `style` attribute in its HTML
//! documents into a stylesheet next to each document, and links the
//! stylesheet from the document's `head`.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use owo_colors::{OwoColorize, Stream};
use stylelift_extract::{BatchReport, FileReport, RunOptions, run_batch};
use tracing::debug;

/// Environment variable holding a tracing filter that overrides `-v`/`-q`.
const LOG_ENV: &str = "STYLELIFT_LOG";

/// Move inline styles out of HTML documents into generated stylesheets
#[derive(Parser, Debug)]
#[allow(clippy::struct_excessive_bools)]
#[command(name = "stylelift")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Rewrite every .html/.htm file under the current directory
    stylelift

    # See what would change without writing anything
    stylelift --dry-run ./site

    # One document at a time, report as JSON
    stylelift -j 1 --json ./site

LOGGING:
    STYLELIFT_LOG=debug stylelift ./site
"#)]
struct Cli {
    /// Directory to search for HTML documents
    #[arg(value_name = "ROOT", default_value = ".")]
    root: PathBuf,

    /// Run the extraction but write nothing
    #[arg(long)]
    dry_run: bool,

    /// Number of documents to process at once (default: one per CPU)
    #[arg(short, long, value_name = "N")]
    jobs: Option<usize>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Log what happens to every element
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Log errors only
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    const fn run_options(&self) -> RunOptions {
        RunOptions {
            dry_run: self.dry_run,
            jobs: self.jobs,
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;
    debug!(?cli, "starting");

    let report = run_batch(&cli.root, &cli.run_options())
        .with_context(|| format!("failed to process {}", cli.root.display()))?;

    if cli.json {
        let json = serde_json::to_string_pretty(&report).context("failed to encode report")?;
        println!("{json}");
    } else {
        print_report(&report);
    }

    Ok(if report.has_failures() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn print_report(report: &BatchReport) {
    let verb = if report.dry_run { "Would create" } else { "Created" };
    for file in report.rewritten() {
        print_file(file, verb);
    }

    for failure in &report.failures {
        eprintln!(
            "{} {}: {}",
            "error:".if_supports_color(Stream::Stderr, |t| t.red()),
            failure.path.display(),
            failure.error
        );
    }

    let rewritten = report.rewritten().count();
    let summary = format!(
        "{rewritten} of {} document(s) had inline styles, {} failed",
        report.files.len() + report.failures.len(),
        report.failures.len()
    );
    println!(
        "{}",
        summary.if_supports_color(Stream::Stdout, |t| t.bold())
    );
}

fn print_file(file: &FileReport, verb: &str) {
    let Some(stylesheet) = &file.stylesheet else {
        return;
    };
    println!(
        "{} {} ({} rule(s), {} synthetic id(s))",
        verb.if_supports_color(Stream::Stdout, |t| t.green()),
        stylesheet.display(),
        file.rules,
        file.synthetic
    );
    println!(
        "    {} {}",
        "for".if_supports_color(Stream::Stdout, |t| t.dimmed()),
        file.path.display()
    );
}
