use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use codegraph_analyze::analyze_with_thresholds;
use codegraph_core::{sort_findings, CodeGraphError, Severity};
use codegraph_export::ExportFormat;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "codegraph")]
#[command(about = "Static analysis engine for Swift source trees", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a directory of Swift sources and report findings.
    Scan(ScanArgs),
}

#[derive(Args)]
struct ScanArgs {
    /// Root directory to walk for .swift files.
    path: PathBuf,

    /// Render the analysis result in one of the fixed export formats
    /// instead of the default human-readable report.
    #[arg(long, value_enum)]
    export: Option<ExportFormatArg>,

    /// Write the output to a file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Emit debug-level tracing output.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress the human-readable report; only errors are printed.
    #[arg(short, long)]
    quiet: bool,

    /// Disable colored output regardless of terminal support.
    #[arg(long = "no-color")]
    no_color: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormatArg {
    Json,
    Dot,
    Mermaid,
}

impl From<ExportFormatArg> for ExportFormat {
    fn from(value: ExportFormatArg) -> Self {
        match value {
            ExportFormatArg::Json => ExportFormat::Json,
            ExportFormatArg::Dot => ExportFormat::Dot,
            ExportFormatArg::Mermaid => ExportFormat::Mermaid,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let Commands::Scan(args) = &cli.command;
    init_tracing(args.verbose, args.quiet);

    if args.no_color {
        colored::control::set_override(false);
    }

    if let Err(err) = run_scan(args) {
        eprintln!("{} {}", "error:".red().bold(), err);
        std::process::exit(exit_code_for(&err));
    }
}

fn init_tracing(verbose: bool, quiet: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else if quiet {
        tracing::Level::ERROR
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .init();
}

/// Maps a fatal error to a process exit code. I/O and enumeration failures
/// that stop the scan before it produces a result exit non-zero; anything
/// reported as a finding inside a successful result never reaches here,
/// since finding severity does not affect the exit code.
fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.chain().find_map(|cause| cause.downcast_ref::<CodeGraphError>()) {
        Some(CodeGraphError::PathNotFound(_)) => 2,
        Some(CodeGraphError::CannotEnumerate(_)) => 3,
        _ => 1,
    }
}

fn run_scan(args: &ScanArgs) -> Result<()> {
    let paths = codegraph_parser::collect_source_files(&args.path)
        .context("failed to enumerate source files")?;

    let thresholds = codegraph_signals::load_from_dir(&args.path)
        .context("failed to load codegraph.toml")?;

    let parser = codegraph_parser::SwiftParser;
    let outcome = codegraph_parser::parse_all(&parser, &paths);

    let mut result = analyze_with_thresholds(outcome.parsed_files, false, &thresholds);
    result.findings.extend(outcome.findings);
    sort_findings(&mut result.findings);
    result.summary = codegraph_analyze::Summary::compute(&result.ir, &result.findings);

    let rendered = match args.export {
        Some(format) => codegraph_export::export(&result, format.into())
            .context("failed to render export output")?,
        None => render_report(&result, args.quiet),
    };

    match &args.output {
        Some(path) => {
            fs::write(path, rendered).with_context(|| format!("failed to write {}", path.display()))?;
        }
        None => {
            if !(args.quiet && args.export.is_none()) {
                println!("{rendered}");
            }
        }
    }

    Ok(())
}

fn render_report(result: &codegraph_analyze::AnalysisResult, quiet: bool) -> String {
    use std::fmt::Write as _;

    let mut out = String::new();
    if !quiet {
        for finding in &result.findings {
            let label = match finding.severity {
                Severity::Error => "error".red().bold(),
                Severity::Warning => "warning".yellow().bold(),
                Severity::Info => "info".blue().bold(),
            };
            let file = finding.file.as_deref().unwrap_or("-");
            let _ = writeln!(out, "{label} [{}] {file}: {}", finding.name, finding.message);
        }
    }
    let _ = writeln!(
        out,
        "{} files, {} types, {} functions, {} errors, {} warnings, {} info",
        result.summary.file_count,
        result.summary.type_count,
        result.summary.function_count,
        result.summary.error_count,
        result.summary.warning_count,
        result.summary.info_count,
    );
    out.trim_end().to_string()
}
