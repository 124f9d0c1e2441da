//! Lease checker
//!
//! Reads a rental lease, asks a language model to review it against local
//! tenancy law, scores the findings and renders an HTML report.

mod pipeline;
mod validate;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lease_analyzer::score::{ScoreBreakdown, DEDUCTIONS};
use lease_config::LeaseCheckConfig;
use lease_report::ReportRenderer;
use pipeline::{Pipeline, DEFAULT_REPORT_FILENAME};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, error, info, warn};
use validate::ValidationError;

#[derive(Parser, Debug)]
#[command(name = "lease-check")]
#[command(about = "Check a rental lease for illegal clauses, red flags and scam signs")]
#[command(version)]
struct Cli {
    /// Config file (default: <config dir>/lease-check/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging and full error chains
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract, analyze and score a lease document
    Analyze {
        /// Lease document (PDF)
        file: PathBuf,

        /// Write the analysis JSON here instead of stdout
        #[arg(long, value_name = "OUT")]
        json: Option<PathBuf>,

        /// Also render an HTML report
        #[arg(long, value_name = "OUT.html")]
        report: Option<PathBuf>,
    },

    /// Render an HTML report from a saved analysis
    Report {
        /// Analysis JSON, either the bare record or {"analysis": ..., "filename": ...}
        input: PathBuf,

        /// File name shown in the report header
        #[arg(long)]
        filename: Option<String>,

        /// Write the report here instead of stdout
        #[arg(short, long, value_name = "OUT.html")]
        output: Option<PathBuf>,
    },

    /// Print the safety score of a saved analysis
    Score { input: PathBuf },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %error_chain(&err), "command failed");
            if cli.verbose {
                eprintln!("Error: {}", error_chain(&err));
            } else {
                eprintln!("Error: {err}");
            }
            ExitCode::from(exit_code(&err))
        }
    }
}

/// Outermost message followed by every cause
fn error_chain(err: &anyhow::Error) -> String {
    format!("{err:#}")
}

/// 2 for rejected input, 1 for everything else
fn exit_code(err: &anyhow::Error) -> u8 {
    if err.downcast_ref::<ValidationError>().is_some() {
        2
    } else {
        1
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let config = LeaseCheckConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match &cli.command {
        Command::Analyze { file, json, report } => {
            analyze(config, file, json.as_deref(), report.as_deref()).await
        }
        Command::Report {
            input,
            filename,
            output,
        } => render_report(&config, input, filename.as_deref(), output.as_deref()),
        Command::Score { input } => score(input),
    }
}

async fn analyze(
    config: LeaseCheckConfig,
    file: &Path,
    json: Option<&Path>,
    report: Option<&Path>,
) -> Result<()> {
    let runner = Pipeline::from_config(config)?;
    let record = runner.analyze_file(file).await?;

    let filename = pipeline::display_filename(file);
    let json_text = pipeline::analysis_json(&record, &filename)?;
    pipeline::write_output(json, &json_text)?;

    if let Some(report) = report {
        let html = ReportRenderer::new(runner.report_options()).render(&record, &filename);
        pipeline::write_output(Some(report), &html)?;
    }
    Ok(())
}

fn render_report(
    config: &LeaseCheckConfig,
    input: &Path,
    filename: Option<&str>,
    output: Option<&Path>,
) -> Result<()> {
    let stored = pipeline::read_stored_analysis(input)?;
    let filename = filename
        .map(str::to_string)
        .or(stored.filename)
        .unwrap_or_else(|| DEFAULT_REPORT_FILENAME.to_string());

    let html = ReportRenderer::new(pipeline::report_options(config)).render(&stored.record, &filename);
    info!(filename = %filename, "Rendered report");
    pipeline::write_output(output, &html)
}

fn score(input: &Path) -> Result<()> {
    let stored = pipeline::read_stored_analysis(input)?;
    let breakdown = ScoreBreakdown::compute(&stored.record, &DEDUCTIONS);
    for step in breakdown.steps.iter().filter(|step| step.points > 0) {
        debug!(reason = step.reason, count = step.count, points = step.points, "deduction");
    }
    if stored.record.safety_score.is_some_and(|stored| stored != breakdown.score) {
        warn!(
            stored = ?stored.record.safety_score,
            computed = breakdown.score,
            "Stored safety score differs from recomputed score"
        );
    }
    println!("{}", breakdown.score);
    Ok(())
}
